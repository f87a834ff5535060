//! Tests for message models, batch validation and legacy conversion.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use crate::errors::ErrorKind;
use crate::messages::{
    legacy_content_to_parts, validate_message_batch, LegacyMessage, MessagePart, MessageRole,
    NewMessage, StoredMessage,
};

fn legacy(content: serde_json::Value) -> LegacyMessage {
    LegacyMessage {
        id: "legacy-1".to_string(),
        chat_id: "chat-1".to_string(),
        role: "assistant".to_string(),
        content,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }
}

// ==================== Parts Serialization ====================

#[test]
fn test_parts_are_tagged_by_type() {
    let parts = vec![
        MessagePart::text("Hello"),
        MessagePart::Reasoning {
            text: "thinking".to_string(),
        },
        MessagePart::ToolCall {
            tool_call_id: "tc-1".to_string(),
            tool_name: "getWeather".to_string(),
            args: json!({"city": "Lisbon"}),
        },
        MessagePart::ToolResult {
            tool_call_id: "tc-1".to_string(),
            tool_name: "getWeather".to_string(),
            result: json!({"temp": 21}),
        },
    ];

    let json = serde_json::to_string(&parts).unwrap();
    assert!(json.contains("\"type\":\"text\""));
    assert!(json.contains("\"type\":\"reasoning\""));
    assert!(json.contains("\"type\":\"toolCall\""));
    assert!(json.contains("\"toolCallId\":\"tc-1\""));
    assert!(json.contains("\"type\":\"toolResult\""));

    let back: Vec<MessagePart> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, parts);
}

#[test]
fn test_role_parsing_rejects_unknown_values() {
    assert_eq!("tool".parse::<MessageRole>().unwrap(), MessageRole::Tool);
    assert_eq!(MessageRole::Assistant.to_string(), "assistant");
    assert!("data".parse::<MessageRole>().is_err());
}

// ==================== Batch Validation ====================

#[test]
fn test_batch_accepts_equal_timestamps() {
    let t = Utc::now();
    let batch = vec![
        NewMessage::user_text("chat-1", "a", t),
        NewMessage::user_text("chat-1", "b", t),
        NewMessage::user_text("chat-1", "c", t + Duration::milliseconds(5)),
    ];
    assert!(validate_message_batch("chat-1", &batch).is_ok());
}

#[test]
fn test_batch_rejects_decreasing_timestamps() {
    let t = Utc::now();
    let batch = vec![
        NewMessage::user_text("chat-1", "a", t),
        NewMessage::user_text("chat-1", "b", t - Duration::seconds(1)),
    ];
    let err = validate_message_batch("chat-1", &batch).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_batch_rejects_empty_parts_and_foreign_chat() {
    let t = Utc::now();
    let empty = vec![NewMessage::new("chat-1", MessageRole::User, vec![], t)];
    assert_eq!(
        validate_message_batch("chat-1", &empty).unwrap_err().kind(),
        ErrorKind::Validation
    );

    let foreign = vec![NewMessage::user_text("chat-2", "x", t)];
    assert!(validate_message_batch("chat-1", &foreign).is_err());

    assert!(validate_message_batch("chat-1", &[]).is_err());
}

// ==================== Legacy Conversion ====================

#[test]
fn test_legacy_string_becomes_single_text_part() {
    let message = legacy(json!("Hello from v1")).to_current().unwrap();
    assert_eq!(message.parts, vec![MessagePart::text("Hello from v1")]);
    assert_eq!(message.id, "legacy-1");
    assert_eq!(message.role, MessageRole::Assistant);
    assert!(message.attachments.is_empty());
}

#[test]
fn test_legacy_content_array_maps_part_by_part() {
    let parts = legacy_content_to_parts(&json!([
        {"type": "reasoning", "text": "hmm"},
        {"type": "text", "text": "Answer"},
        {"type": "tool-call", "toolCallId": "c1", "toolName": "search", "args": {"q": "rust"}},
        {"type": "tool-result", "toolCallId": "c1", "toolName": "search", "result": [1, 2]}
    ]));

    assert_eq!(parts.len(), 4);
    assert_eq!(
        parts[0],
        MessagePart::Reasoning {
            text: "hmm".to_string()
        }
    );
    assert_eq!(parts[1], MessagePart::text("Answer"));
    if let MessagePart::ToolCall { tool_name, args, .. } = &parts[2] {
        assert_eq!(tool_name, "search");
        assert_eq!(args, &json!({"q": "rust"}));
    } else {
        panic!("Expected ToolCall part");
    }
    if let MessagePart::ToolResult { result, .. } = &parts[3] {
        assert_eq!(result, &json!([1, 2]));
    } else {
        panic!("Expected ToolResult part");
    }
}

#[test]
fn test_legacy_content_never_yields_empty_parts() {
    assert_eq!(legacy_content_to_parts(&json!(null)), vec![MessagePart::text("")]);
    assert_eq!(legacy_content_to_parts(&json!([])), vec![MessagePart::text("")]);
    assert_eq!(
        legacy_content_to_parts(&json!({"k": 1})),
        vec![MessagePart::text("{\"k\":1}")]
    );
}

#[test]
fn test_legacy_unknown_role_fails_validation() {
    let mut message = legacy(json!("x"));
    message.role = "data".to_string();
    assert_eq!(message.to_current().unwrap_err().kind(), ErrorKind::Validation);
}

#[test]
fn test_stored_message_normalizes_explicitly() {
    let stored = StoredMessage::Legacy(legacy(json!("old")));
    assert!(stored.is_legacy());
    assert_eq!(stored.id(), "legacy-1");
    let current = stored.into_current().unwrap();
    assert_eq!(current.text_content(), "old");
}
