//! Database models for messages and votes.
//!
//! Parts and attachments are stored as JSON text columns. The legacy table
//! keeps its content as an opaque JSON blob.

use diesel::prelude::*;

use chatvault_core::errors::Result;
use chatvault_core::ids::id_or_new;
use chatvault_core::messages::{LegacyMessage, Message, NewMessage, Vote};

use crate::errors::IntoCore;
use crate::utils::{from_millis, to_millis};

/// Database model for current-format messages
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::messages_v2)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MessageDB {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub parts: String,
    pub attachments: String,
    pub created_at: i64,
}

/// Database model for legacy single-blob messages
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::messages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LegacyMessageDB {
    pub id: String,
    pub chat_id: String,
    pub role: String,
    pub content: String,
    pub created_at: i64,
}

/// Database model for votes
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::votes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VoteDB {
    pub chat_id: String,
    pub message_id: String,
    pub is_upvoted: bool,
}

impl MessageDB {
    pub fn from_new(message: NewMessage) -> Result<Self> {
        Ok(Self {
            parts: serde_json::to_string(&message.parts).into_core()?,
            attachments: serde_json::to_string(&message.attachments).into_core()?,
            id: id_or_new(message.id),
            chat_id: message.chat_id,
            role: message.role.to_string(),
            created_at: to_millis(message.created_at),
        })
    }

    pub fn from_message(message: &Message) -> Result<Self> {
        Ok(Self {
            id: message.id.clone(),
            chat_id: message.chat_id.clone(),
            role: message.role.to_string(),
            parts: serde_json::to_string(&message.parts).into_core()?,
            attachments: serde_json::to_string(&message.attachments).into_core()?,
            created_at: to_millis(message.created_at),
        })
    }
}

impl TryFrom<MessageDB> for Message {
    type Error = chatvault_core::Error;

    fn try_from(db: MessageDB) -> Result<Self> {
        Ok(Self {
            role: db.role.parse()?,
            parts: serde_json::from_str(&db.parts).into_core()?,
            attachments: serde_json::from_str(&db.attachments).into_core()?,
            created_at: from_millis(db.created_at)?,
            id: db.id,
            chat_id: db.chat_id,
        })
    }
}

impl LegacyMessageDB {
    pub fn from_legacy(message: &LegacyMessage) -> Result<Self> {
        Ok(Self {
            id: message.id.clone(),
            chat_id: message.chat_id.clone(),
            role: message.role.clone(),
            content: serde_json::to_string(&message.content).into_core()?,
            created_at: to_millis(message.created_at),
        })
    }
}

impl TryFrom<LegacyMessageDB> for LegacyMessage {
    type Error = chatvault_core::Error;

    fn try_from(db: LegacyMessageDB) -> Result<Self> {
        Ok(Self {
            content: serde_json::from_str(&db.content).into_core()?,
            created_at: from_millis(db.created_at)?,
            id: db.id,
            chat_id: db.chat_id,
            role: db.role,
        })
    }
}

impl From<VoteDB> for Vote {
    fn from(db: VoteDB) -> Self {
        Self {
            chat_id: db.chat_id,
            message_id: db.message_id,
            is_upvoted: db.is_upvoted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatvault_core::messages::{Attachment, MessagePart, MessageRole};
    use chatvault_core::ErrorKind;
    use chrono::Utc;

    #[test]
    fn test_parts_and_attachments_stored_as_json() {
        let new_message = NewMessage::new(
            "chat-1",
            MessageRole::Assistant,
            vec![
                MessagePart::Reasoning {
                    text: "thinking".to_string(),
                },
                MessagePart::text("answer"),
            ],
            Utc::now(),
        )
        .with_id("m-1")
        .with_attachments(vec![Attachment {
            url: "https://blob.example/cat.png".to_string(),
            name: "cat.png".to_string(),
            content_type: "image/png".to_string(),
        }]);

        let db = MessageDB::from_new(new_message.clone()).unwrap();
        assert_eq!(db.role, "assistant");
        assert!(db.parts.contains(r#""type":"reasoning""#));

        let message = Message::try_from(db).unwrap();
        assert_eq!(message.id, "m-1");
        assert_eq!(message.parts, new_message.parts);
        assert_eq!(message.attachments, new_message.attachments);
    }

    #[test]
    fn test_corrupt_parts_are_internal_errors() {
        let db = MessageDB {
            id: "m-1".to_string(),
            chat_id: "chat-1".to_string(),
            role: "user".to_string(),
            parts: "not json".to_string(),
            attachments: "[]".to_string(),
            created_at: 0,
        };
        let err = Message::try_from(db).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_new_message_without_id_gets_one() {
        let db = MessageDB::from_new(NewMessage::user_text("chat-1", "hi", Utc::now())).unwrap();
        assert!(!db.id.is_empty());
    }
}
