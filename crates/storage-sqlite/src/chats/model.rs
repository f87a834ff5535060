//! Database models for chats.

use diesel::prelude::*;

use chatvault_core::chats::{Chat, NewChat};
use chatvault_core::errors::Error;
use chatvault_core::ids::id_or_new;

use crate::utils::from_millis;

/// Database model for chats
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::chats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatDB {
    pub id: String,
    pub created_at: i64,
    pub title: String,
    pub user_id: String,
    pub visibility: String,
}

impl ChatDB {
    pub fn from_new(new_chat: NewChat, created_at: i64) -> Self {
        Self {
            id: id_or_new(new_chat.id),
            created_at,
            title: new_chat.title,
            user_id: new_chat.user_id,
            visibility: new_chat.visibility.to_string(),
        }
    }
}

impl TryFrom<ChatDB> for Chat {
    type Error = Error;

    fn try_from(db: ChatDB) -> Result<Self, Self::Error> {
        Ok(Self {
            visibility: db.visibility.parse()?,
            created_at: from_millis(db.created_at)?,
            id: db.id,
            title: db.title,
            user_id: db.user_id,
        })
    }
}
