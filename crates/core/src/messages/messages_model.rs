//! Message and vote domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Author role of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Tool,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::Tool => write!(f, "tool"),
        }
    }
}

impl std::str::FromStr for MessageRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "tool" => Ok(MessageRole::Tool),
            _ => Err(ValidationError::InvalidEnumValue {
                field: "role".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One element of a message's ordered parts sequence.
///
/// Serialized with a `type` tag so the stored blob is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessagePart {
    #[serde(rename_all = "camelCase")]
    Text { text: String },

    /// Reasoning/thinking content (provider-dependent).
    #[serde(rename_all = "camelCase")]
    Reasoning { text: String },

    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        args: serde_json::Value,
    },

    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        result: serde_json::Value,
    },
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }
}

/// Reference to an uploaded object. Only the URL is stored, never the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub name: String,
    pub content_type: String,
}

/// A message in the current (parts-based) format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Concatenated text of all text parts.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Input model for appending a message.
///
/// `created_at` is supplied by the caller so that order survives any transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub id: Option<String>,
    pub chat_id: String,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl NewMessage {
    pub fn new(
        chat_id: &str,
        role: MessageRole,
        parts: Vec<MessagePart>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            chat_id: chat_id.to_string(),
            role,
            parts,
            attachments: Vec::new(),
            created_at,
        }
    }

    /// Create a user message holding a single text part.
    pub fn user_text(chat_id: &str, text: &str, created_at: DateTime<Utc>) -> Self {
        Self::new(chat_id, MessageRole::User, vec![MessagePart::text(text)], created_at)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Checks a batch destined for `append_messages`.
///
/// Every message must belong to `chat_id`, carry at least one part, and
/// timestamps must not decrease within the batch.
pub fn validate_message_batch(chat_id: &str, messages: &[NewMessage]) -> Result<()> {
    if messages.is_empty() {
        return Err(Error::invalid_input("message batch is empty"));
    }

    let mut previous: Option<DateTime<Utc>> = None;
    for (index, message) in messages.iter().enumerate() {
        if message.chat_id != chat_id {
            return Err(Error::invalid_input(format!(
                "message {} belongs to chat '{}', expected '{}'",
                index, message.chat_id, chat_id
            )));
        }
        if message.parts.is_empty() {
            return Err(ValidationError::MissingField(format!("messages[{}].parts", index)).into());
        }
        if let Some(prev) = previous {
            if message.created_at < prev {
                return Err(Error::invalid_input(format!(
                    "message {} has createdAt {} earlier than the previous message ({})",
                    index, message.created_at, prev
                )));
            }
        }
        previous = Some(message.created_at);
    }
    Ok(())
}

/// A user's vote on a message. At most one exists per (chat, message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub chat_id: String,
    pub message_id: String,
    pub is_upvoted: bool,
}
