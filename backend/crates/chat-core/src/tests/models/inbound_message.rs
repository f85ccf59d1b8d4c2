use crate::{CoreError, InboundMessage};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use uuid::Uuid;

#[test]
fn given_content_only_when_parse_then_defaults_applied() {
    // Given
    let frame = br#"{"content":"hi"}"#;

    // When
    let message = InboundMessage::parse(frame).unwrap();

    // Then
    assert_that!(message.content.as_str(), eq("hi"));
    assert_that!(message.file_url, none());
    assert_that!(message.is_ai_message, eq(false));
}

#[test]
fn given_explicit_nulls_when_parse_then_treated_as_absent() {
    let frame = br#"{"content":"hi","file_url":null,"is_ai_message":null}"#;

    let message = InboundMessage::parse(frame).unwrap();

    assert_that!(message.file_url, none());
    assert_that!(message.is_ai_message, eq(false));
}

#[test]
fn given_non_boolean_ai_flag_when_parse_then_validation_error() {
    let result = InboundMessage::parse(br#"{"content":"hi","is_ai_message":"yes"}"#);

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_all_fields_when_parse_then_all_fields_kept() {
    let frame = br#"{"content":"see file","file_url":"https://cdn.example/a.png","is_ai_message":true}"#;

    let message = InboundMessage::parse(frame).unwrap();

    assert_that!(
        message.file_url.as_deref(),
        some(eq("https://cdn.example/a.png"))
    );
    assert_that!(message.is_ai_message, eq(true));
}

#[test]
fn given_client_supplied_identity_when_parse_then_ignored() {
    let frame = br#"{"content":"hi","id":"not-yours","sender_id":"spoofed","created_at":"1970-01-01T00:00:00Z"}"#;

    let result = InboundMessage::parse(frame);

    assert!(result.is_ok());
}

#[test]
fn given_missing_content_when_parse_then_validation_error() {
    let result = InboundMessage::parse(br#"{"file_url":null}"#);

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_not_json_when_parse_then_validation_error() {
    let result = InboundMessage::parse(b"hello there");

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_blank_content_without_file_when_parse_then_rejected() {
    let result = InboundMessage::parse(br#"{"content":"   "}"#);

    match result {
        Err(CoreError::Validation { field, .. }) => {
            assert_eq!(field.as_deref(), Some("content"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_content_with_file_when_parse_then_accepted() {
    let result = InboundMessage::parse(br#"{"content":"","file_url":"https://cdn.example/a.pdf"}"#);

    assert!(result.is_ok());
}

#[test]
fn given_blank_file_url_when_parse_then_normalized_to_none() {
    let message = InboundMessage::parse(br#"{"content":"hi","file_url":"  "}"#).unwrap();

    assert_that!(message.file_url, none());
}

#[test]
fn given_message_when_into_draft_then_bound_to_connection() {
    let session_id = Uuid::new_v4();
    let sender_id = Uuid::new_v4();
    let message = InboundMessage::parse(br#"{"content":"hi","is_ai_message":true}"#).unwrap();

    let draft = message.into_draft(session_id, sender_id);

    assert_that!(draft.session_id, eq(session_id));
    assert_that!(draft.sender_id, eq(sender_id));
    assert_that!(draft.content.as_str(), eq("hi"));
    assert_that!(draft.is_ai_message, eq(true));
}
