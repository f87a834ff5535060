use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::info;
use std::sync::Arc;

use chatvault_core::chats::{Chat, ChatRepositoryTrait, NewChat, Visibility};
use chatvault_core::errors::{Error, Result, ValidationError};

use super::model::ChatDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::messages::{delete_legacy_messages_for_chat, delete_messages_for_chat};
use crate::schema::chats;
use crate::streams::delete_streams_for_chat;
use crate::utils::now_millis;

pub struct ChatRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ChatRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ChatRepository { pool, writer }
    }
}

fn find_chat(conn: &mut SqliteConnection, chat_id: &str) -> Result<ChatDB> {
    chats::table
        .find(chat_id)
        .select(ChatDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("Chat {}", chat_id)))
}

/// Deletes a chat and everything hanging off it, children first.
///
/// The store declares references without cascade rules, so the order here is
/// what keeps every statement within the foreign key constraints. Must run
/// inside a transaction.
pub fn delete_chat_cascade(conn: &mut SqliteConnection, chat_id: &str) -> Result<Chat> {
    let chat = find_chat(conn, chat_id)?;

    // Removes the chat's votes along with its current-format messages.
    let messages_removed = delete_messages_for_chat(conn, chat_id)?;
    let legacy_removed = delete_legacy_messages_for_chat(conn, chat_id)?;
    let streams_removed = delete_streams_for_chat(conn, chat_id)?;
    diesel::delete(chats::table.find(chat_id))
        .execute(conn)
        .into_core()?;

    info!(
        "Deleted chat {} ({} messages, {} legacy messages, {} streams)",
        chat_id, messages_removed, legacy_removed, streams_removed
    );
    Chat::try_from(chat)
}

#[async_trait]
impl ChatRepositoryTrait for ChatRepository {
    async fn save_chat(&self, new_chat: NewChat) -> Result<Chat> {
        new_chat.validate()?;
        let chat_db = ChatDB::from_new(new_chat, now_millis());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Chat> {
                let created = diesel::insert_into(chats::table)
                    .values(&chat_db)
                    .returning(ChatDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Chat::try_from(created)
            })
            .await
    }

    fn get_chat(&self, chat_id: &str) -> Result<Chat> {
        let mut conn = get_connection(&self.pool)?;
        Chat::try_from(find_chat(&mut conn, chat_id)?)
    }

    fn get_chats_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Chat>> {
        let mut conn = get_connection(&self.pool)?;
        chats::table
            .filter(chats::user_id.eq(user_id))
            .order((chats::created_at.desc(), chats::id.desc()))
            .limit(limit)
            .select(ChatDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Chat::try_from)
            .collect()
    }

    async fn update_visibility(&self, chat_id: &str, visibility: Visibility) -> Result<Chat> {
        let chat_id = chat_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Chat> {
                find_chat(conn, &chat_id)?;
                let updated = diesel::update(chats::table.find(&chat_id))
                    .set(chats::visibility.eq(visibility.to_string()))
                    .returning(ChatDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Chat::try_from(updated)
            })
            .await
    }

    async fn update_title(&self, chat_id: &str, title: &str) -> Result<Chat> {
        if title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        let chat_id = chat_id.to_string();
        let title = title.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Chat> {
                find_chat(conn, &chat_id)?;
                let updated = diesel::update(chats::table.find(&chat_id))
                    .set(chats::title.eq(&title))
                    .returning(ChatDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Chat::try_from(updated)
            })
            .await
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<Chat> {
        let chat_id = chat_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| delete_chat_cascade(conn, &chat_id))
            .await
    }
}
