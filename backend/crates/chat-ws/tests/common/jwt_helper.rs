#![allow(dead_code)]

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Standard token shape: identity in `sub`
#[derive(Debug, Serialize)]
pub struct TestJwtClaims {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

fn sign(claims: &impl Serialize, secret: &[u8]) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret))
        .expect("Failed to encode JWT")
}

/// Create a valid JWT token for testing
pub fn create_test_token(user_id: Uuid, jwt_secret: &[u8]) -> String {
    create_test_token_with_expiry(user_id, jwt_secret, Duration::from_secs(3600))
}

pub fn create_test_token_with_expiry(
    user_id: Uuid,
    jwt_secret: &[u8],
    expires_in: Duration,
) -> String {
    let now = now_secs();
    let claims = TestJwtClaims {
        sub: user_id.to_string(),
        exp: now + expires_in.as_secs(),
        iat: now,
    };
    sign(&claims, jwt_secret)
}

/// Older token shape: identity in `user_id`
pub fn create_legacy_token(user_id: Uuid, jwt_secret: &[u8]) -> String {
    let now = now_secs();
    sign(
        &json!({ "user_id": user_id.to_string(), "exp": now + 3600, "iat": now }),
        jwt_secret,
    )
}

/// Expired an hour ago, well past any leeway
pub fn create_expired_token(user_id: Uuid, jwt_secret: &[u8]) -> String {
    let past = now_secs() - 3600;
    let claims = TestJwtClaims {
        sub: user_id.to_string(),
        exp: past,
        iat: past - 3600,
    };
    sign(&claims, jwt_secret)
}

pub fn create_token_wrong_secret(user_id: Uuid) -> String {
    create_test_token(user_id, b"wrong-secret-key-that-is-also-at-least-32-bytes")
}

/// Signed correctly but with no usable identity claim
pub fn create_token_without_identity(jwt_secret: &[u8]) -> String {
    let now = now_secs();
    sign(&json!({ "exp": now + 3600, "iat": now }), jwt_secret)
}

pub fn create_token_with_claims(claims: Value, jwt_secret: &[u8]) -> String {
    sign(&claims, jwt_secret)
}
