use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use chatvault_core::errors::Result;
use chatvault_core::ids::new_id;
use chatvault_core::streams::{Stream, StreamRepositoryTrait};

use super::model::StreamDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::streams;
use crate::utils::next_chain_millis;

pub struct StreamRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StreamRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        StreamRepository { pool, writer }
    }
}

pub(crate) fn delete_streams_for_chat(conn: &mut SqliteConnection, chat_id: &str) -> Result<usize> {
    diesel::delete(streams::table.filter(streams::chat_id.eq(chat_id)))
        .execute(conn)
        .into_core()
}

#[async_trait]
impl StreamRepositoryTrait for StreamRepository {
    async fn begin_stream(&self, chat_id: &str) -> Result<Stream> {
        let chat_id = chat_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Stream> {
                let latest = streams::table
                    .filter(streams::chat_id.eq(&chat_id))
                    .select(max(streams::created_at))
                    .first::<Option<i64>>(conn)
                    .into_core()?;

                let row = StreamDB {
                    id: new_id(),
                    chat_id,
                    created_at: next_chain_millis(latest),
                };
                let saved = diesel::insert_into(streams::table)
                    .values(&row)
                    .returning(StreamDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                debug!("Began stream {} for chat {}", saved.id, saved.chat_id);
                Stream::try_from(saved)
            })
            .await
    }

    fn latest_stream(&self, chat_id: &str) -> Result<Option<Stream>> {
        let mut conn = get_connection(&self.pool)?;
        streams::table
            .filter(streams::chat_id.eq(chat_id))
            .order(streams::created_at.desc())
            .select(StreamDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(Stream::try_from)
            .transpose()
    }

    fn get_stream_ids_by_chat(&self, chat_id: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        streams::table
            .filter(streams::chat_id.eq(chat_id))
            .order(streams::created_at.asc())
            .select(streams::id)
            .load(&mut conn)
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatvault_core::ErrorKind;
    use crate::test_support::TestDb;

    fn setup() -> (TestDb, StreamRepository) {
        let db = TestDb::new();
        db.insert_user("user-1");
        db.insert_chat("chat-1", "user-1");
        let repo = StreamRepository::new(db.pool.clone(), db.writer.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_latest_stream_is_most_recent_begin() {
        let (_db, repo) = setup();
        assert!(repo.latest_stream("chat-1").unwrap().is_none());

        let first = repo.begin_stream("chat-1").await.unwrap();
        let second = repo.begin_stream("chat-1").await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.created_at > first.created_at);

        assert_eq!(repo.latest_stream("chat-1").unwrap(), Some(second.clone()));
        assert_eq!(repo.latest_stream_id("chat-1").unwrap(), Some(second.id.clone()));
        assert_eq!(
            repo.get_stream_ids_by_chat("chat-1").unwrap(),
            vec![first.id, second.id]
        );
    }

    #[tokio::test]
    async fn test_streams_are_scoped_to_chat() {
        let (db, repo) = setup();
        db.insert_chat("chat-2", "user-1");
        repo.begin_stream("chat-1").await.unwrap();
        assert!(repo.latest_stream("chat-2").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_begin_stream_for_unknown_chat_fails() {
        let (_db, repo) = setup();
        let err = repo.begin_stream("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IntegrityViolation);
    }
}
