use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use chatvault_core::errors::{Error, Result};
use chatvault_core::messages::{
    validate_message_batch, LegacyMessage, Message, MessageRepositoryTrait, MessageRole,
    NewMessage, StoredMessage, Vote,
};

use super::model::{LegacyMessageDB, MessageDB, VoteDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{chats, messages, messages_v2, truncated_messages, votes};
use crate::utils::{now_millis, to_millis};

pub struct MessageRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MessageRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MessageRepository { pool, writer }
    }
}

// Rows sharing a created_at keep their insertion order via the rowid.
fn load_current(conn: &mut SqliteConnection, chat_id: &str) -> Result<Vec<Message>> {
    messages_v2::table
        .filter(messages_v2::chat_id.eq(chat_id))
        .order((messages_v2::created_at.asc(), sql::<BigInt>("rowid").asc()))
        .select(MessageDB::as_select())
        .load(conn)
        .into_core()?
        .into_iter()
        .map(Message::try_from)
        .collect()
}

fn load_legacy(conn: &mut SqliteConnection, chat_id: &str) -> Result<Vec<LegacyMessage>> {
    messages::table
        .filter(messages::chat_id.eq(chat_id))
        .order((messages::created_at.asc(), sql::<BigInt>("rowid").asc()))
        .select(LegacyMessageDB::as_select())
        .load(conn)
        .into_core()?
        .into_iter()
        .map(LegacyMessage::try_from)
        .collect()
}

/// Legacy ids of a chat hidden by an earlier truncation.
fn truncated_ids(conn: &mut SqliteConnection, chat_id: &str) -> Result<HashSet<String>> {
    Ok(truncated_messages::table
        .filter(truncated_messages::chat_id.eq(chat_id))
        .select(truncated_messages::id)
        .load::<String>(conn)
        .into_core()?
        .into_iter()
        .collect())
}

/// Deletes a chat's votes and current-format messages. Returns the number of
/// messages removed.
pub(crate) fn delete_messages_for_chat(conn: &mut SqliteConnection, chat_id: &str) -> Result<usize> {
    let votes_removed = diesel::delete(votes::table.filter(votes::chat_id.eq(chat_id)))
        .execute(conn)
        .into_core()?;
    debug!("Deleted {} votes of chat {}", votes_removed, chat_id);

    diesel::delete(messages_v2::table.filter(messages_v2::chat_id.eq(chat_id)))
        .execute(conn)
        .into_core()
}

/// Deletes a chat's legacy messages along with their truncation markers.
pub(crate) fn delete_legacy_messages_for_chat(
    conn: &mut SqliteConnection,
    chat_id: &str,
) -> Result<usize> {
    diesel::delete(truncated_messages::table.filter(truncated_messages::chat_id.eq(chat_id)))
        .execute(conn)
        .into_core()?;
    diesel::delete(messages::table.filter(messages::chat_id.eq(chat_id)))
        .execute(conn)
        .into_core()
}

#[async_trait]
impl MessageRepositoryTrait for MessageRepository {
    async fn append_messages(
        &self,
        chat_id: &str,
        new_messages: Vec<NewMessage>,
    ) -> Result<Vec<Message>> {
        validate_message_batch(chat_id, &new_messages)?;
        let rows = new_messages
            .into_iter()
            .map(MessageDB::from_new)
            .collect::<Result<Vec<_>>>()?;
        let chat_id = chat_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Message>> {
                // One statement per row so rowids follow batch order.
                let mut created = Vec::with_capacity(rows.len());
                for row in &rows {
                    let inserted = diesel::insert_into(messages_v2::table)
                        .values(row)
                        .returning(MessageDB::as_returning())
                        .get_result(conn)
                        .into_core()?;
                    created.push(Message::try_from(inserted)?);
                }
                debug!("Appended {} messages to chat {}", created.len(), chat_id);
                Ok(created)
            })
            .await
    }

    fn get_messages_by_chat(&self, chat_id: &str) -> Result<Vec<Message>> {
        let mut conn = get_connection(&self.pool)?;
        load_current(&mut conn, chat_id)
    }

    fn get_message_by_id(&self, message_id: &str) -> Result<Message> {
        let mut conn = get_connection(&self.pool)?;
        let row = messages_v2::table
            .find(message_id)
            .select(MessageDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Message {}", message_id)))?;
        Message::try_from(row)
    }

    async fn delete_messages_after(
        &self,
        chat_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<usize> {
        let chat_id = chat_id.to_string();
        let cutoff = to_millis(timestamp);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Legacy rows stay in place; marking them keeps them out of
                // history and out of later migrations.
                let legacy_after: Vec<String> = messages::table
                    .filter(messages::chat_id.eq(&chat_id))
                    .filter(messages::created_at.gt(cutoff))
                    .select(messages::id)
                    .load(conn)
                    .into_core()?;
                let truncated_at = now_millis();
                for id in &legacy_after {
                    diesel::insert_or_ignore_into(truncated_messages::table)
                        .values((
                            truncated_messages::id.eq(id),
                            truncated_messages::chat_id.eq(&chat_id),
                            truncated_messages::truncated_at.eq(truncated_at),
                        ))
                        .execute(conn)
                        .into_core()?;
                }

                let doomed: Vec<String> = messages_v2::table
                    .filter(messages_v2::chat_id.eq(&chat_id))
                    .filter(messages_v2::created_at.gt(cutoff))
                    .select(messages_v2::id)
                    .load(conn)
                    .into_core()?;
                if doomed.is_empty() {
                    return Ok(0);
                }

                diesel::delete(votes::table.filter(votes::message_id.eq_any(&doomed)))
                    .execute(conn)
                    .into_core()?;
                let removed = diesel::delete(messages_v2::table.filter(messages_v2::id.eq_any(&doomed)))
                    .execute(conn)
                    .into_core()?;

                info!("Deleted {} messages of chat {} after {}", removed, chat_id, cutoff);
                Ok(removed)
            })
            .await
    }

    async fn upsert_vote(&self, chat_id: &str, message_id: &str, is_upvoted: bool) -> Result<Vote> {
        let vote_db = VoteDB {
            chat_id: chat_id.to_string(),
            message_id: message_id.to_string(),
            is_upvoted,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vote> {
                let belongs = messages_v2::table
                    .filter(messages_v2::id.eq(&vote_db.message_id))
                    .filter(messages_v2::chat_id.eq(&vote_db.chat_id))
                    .count()
                    .get_result::<i64>(conn)
                    .into_core()?;
                if belongs == 0 {
                    return Err(Error::not_found(format!(
                        "Message {} in chat {}",
                        vote_db.message_id, vote_db.chat_id
                    )));
                }

                let saved = diesel::insert_into(votes::table)
                    .values(&vote_db)
                    .on_conflict((votes::chat_id, votes::message_id))
                    .do_update()
                    .set(votes::is_upvoted.eq(vote_db.is_upvoted))
                    .returning(VoteDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Vote::from(saved))
            })
            .await
    }

    fn get_votes_by_chat(&self, chat_id: &str) -> Result<Vec<Vote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = votes::table
            .filter(votes::chat_id.eq(chat_id))
            .order(votes::message_id.asc())
            .select(VoteDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Vote::from).collect())
    }

    fn count_user_messages_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        messages_v2::table
            .inner_join(chats::table)
            .filter(chats::user_id.eq(user_id))
            .filter(messages_v2::role.eq(MessageRole::User.to_string()))
            .filter(messages_v2::created_at.ge(to_millis(since)))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    fn read_legacy_messages(&self, chat_id: &str) -> Result<Vec<LegacyMessage>> {
        let mut conn = get_connection(&self.pool)?;
        load_legacy(&mut conn, chat_id)
    }

    fn load_history(&self, chat_id: &str) -> Result<Vec<StoredMessage>> {
        let mut conn = get_connection(&self.pool)?;
        let legacy = load_legacy(&mut conn, chat_id)?;
        let current = load_current(&mut conn, chat_id)?;
        let truncated = truncated_ids(&mut conn, chat_id)?;

        // Migrated rows exist in both tables; the current copy wins.
        let current_ids: HashSet<&str> = current.iter().map(|m| m.id.as_str()).collect();
        let mut history: Vec<StoredMessage> = legacy
            .into_iter()
            .filter(|m| !current_ids.contains(m.id.as_str()) && !truncated.contains(&m.id))
            .map(StoredMessage::Legacy)
            .collect();
        history.extend(current.into_iter().map(StoredMessage::Current));

        // Stable sort: on equal timestamps legacy rows come first.
        history.sort_by_key(|m| m.created_at());
        Ok(history)
    }

    async fn insert_legacy_messages(&self, legacy: Vec<LegacyMessage>) -> Result<usize> {
        if legacy.is_empty() {
            return Ok(0);
        }
        let rows = legacy
            .iter()
            .map(LegacyMessageDB::from_legacy)
            .collect::<Result<Vec<_>>>()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut inserted = 0;
                for row in &rows {
                    inserted += diesel::insert_into(messages::table)
                        .values(row)
                        .execute(conn)
                        .into_core()?;
                }
                Ok(inserted)
            })
            .await
    }

    async fn migrate_legacy_to_current(&self, chat_id: &str) -> Result<usize> {
        let chat_id = chat_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let legacy = load_legacy(conn, &chat_id)?;
                let legacy_ids: Vec<&str> = legacy.iter().map(|m| m.id.as_str()).collect();
                let migrated: HashSet<String> = messages_v2::table
                    .filter(messages_v2::id.eq_any(legacy_ids))
                    .select(messages_v2::id)
                    .load::<String>(conn)
                    .into_core()?
                    .into_iter()
                    .collect();

                let truncated = truncated_ids(conn, &chat_id)?;

                let mut inserted = 0;
                for message in legacy
                    .iter()
                    .filter(|m| !migrated.contains(&m.id) && !truncated.contains(&m.id))
                {
                    let row = MessageDB::from_message(&message.to_current()?)?;
                    inserted += diesel::insert_into(messages_v2::table)
                        .values(&row)
                        .execute(conn)
                        .into_core()?;
                }

                info!(
                    "Migrated {} legacy messages of chat {} ({} already present)",
                    inserted,
                    chat_id,
                    migrated.len()
                );
                Ok(inserted)
            })
            .await
    }
}
