use crate::ChatMessage;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

fn sample_message(file_url: Option<&str>) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        session_id: Uuid::new_v4(),
        sender_id: Uuid::new_v4(),
        content: "hello".to_string(),
        file_url: file_url.map(str::to_string),
        is_ai_message: false,
        created_at: Utc::now(),
    }
}

#[test]
fn given_canonical_message_when_serialized_then_has_all_wire_fields() {
    // Given
    let message = sample_message(None);

    // When
    let json: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

    // Then
    for field in [
        "id",
        "session_id",
        "sender_id",
        "content",
        "file_url",
        "is_ai_message",
        "created_at",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["file_url"], Value::Null);
    assert_eq!(json["id"], Value::String(message.id.to_string()));
}

#[test]
fn given_message_with_file_when_serialized_then_file_url_present() {
    let message = sample_message(Some("https://cdn.example/a.png"));

    let json: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

    assert_eq!(json["file_url"], "https://cdn.example/a.png");
}
