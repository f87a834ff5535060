//! Deprecated single-blob message format.
//!
//! Legacy rows are read-only. They are converted one way into the parts
//! format, never the reverse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::messages_model::{Message, MessagePart, MessageRole};
use crate::errors::Result;

/// A message stored in the legacy format: one opaque JSON content value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMessage {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub content: Value,
    pub created_at: DateTime<Utc>,
}

impl LegacyMessage {
    /// Converts into the current format, keeping id, chat and timestamp.
    pub fn to_current(&self) -> Result<Message> {
        let role: MessageRole = self.role.parse()?;
        Ok(Message {
            id: self.id.clone(),
            chat_id: self.chat_id.clone(),
            role,
            parts: legacy_content_to_parts(&self.content),
            attachments: Vec::new(),
            created_at: self.created_at,
        })
    }
}

/// A persisted message in either format.
///
/// Read paths that see both tables return this and normalize explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredMessage {
    Legacy(LegacyMessage),
    Current(Message),
}

impl StoredMessage {
    pub fn id(&self) -> &str {
        match self {
            StoredMessage::Legacy(m) => &m.id,
            StoredMessage::Current(m) => &m.id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            StoredMessage::Legacy(m) => m.created_at,
            StoredMessage::Current(m) => m.created_at,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredMessage::Legacy(_))
    }

    pub fn into_current(self) -> Result<Message> {
        match self {
            StoredMessage::Legacy(m) => m.to_current(),
            StoredMessage::Current(m) => Ok(m),
        }
    }
}

/// Maps legacy content onto parts.
///
/// A plain string becomes one text part. An array of content parts maps
/// element by element (`text`, `reasoning`, `tool-call`, `tool-result`);
/// elements of unknown type are rendered as JSON text. Any other value is
/// rendered as JSON text. The result is never empty.
pub fn legacy_content_to_parts(content: &Value) -> Vec<MessagePart> {
    let parts: Vec<MessagePart> = match content {
        Value::String(text) => vec![MessagePart::text(text.as_str())],
        Value::Array(items) => items.iter().map(legacy_item_to_part).collect(),
        Value::Null => Vec::new(),
        other => vec![MessagePart::text(other.to_string())],
    };

    if parts.is_empty() {
        vec![MessagePart::text("")]
    } else {
        parts
    }
}

fn legacy_item_to_part(item: &Value) -> MessagePart {
    let str_field = |name: &str| {
        item.get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    match item.get("type").and_then(Value::as_str) {
        Some("text") => MessagePart::Text {
            text: str_field("text"),
        },
        Some("reasoning") => MessagePart::Reasoning {
            text: str_field("text"),
        },
        Some("tool-call") => MessagePart::ToolCall {
            tool_call_id: str_field("toolCallId"),
            tool_name: str_field("toolName"),
            args: item.get("args").cloned().unwrap_or(Value::Null),
        },
        Some("tool-result") => MessagePart::ToolResult {
            tool_call_id: str_field("toolCallId"),
            tool_name: str_field("toolName"),
            result: item.get("result").cloned().unwrap_or(Value::Null),
        },
        _ => match item {
            Value::String(text) => MessagePart::text(text.as_str()),
            other => MessagePart::text(other.to_string()),
        },
    }
}
