//! Shared fixtures for repository tests.

use diesel::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

use crate::db::{self, spawn_writer, DbPool, WriteHandle};
use crate::schema::{chats, users};
use crate::utils::now_millis;

/// A migrated database in a temporary directory plus its writer.
///
/// Must be created inside a Tokio runtime because the writer is spawned
/// as a task.
pub(crate) struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _temp_dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .to_string();

        db::init_at(&db_path).expect("Failed to initialize database");
        let pool = db::create_pool(&db_path).expect("Failed to create pool");
        db::run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        Self {
            pool,
            writer,
            _temp_dir: temp_dir,
        }
    }

    pub fn insert_user(&self, id: &str) {
        let mut conn = self.pool.get().expect("Failed to get connection");
        diesel::insert_into(users::table)
            .values((
                users::id.eq(id),
                users::email.eq(format!("{}@example.com", id)),
            ))
            .execute(&mut conn)
            .expect("Failed to insert user");
    }

    pub fn insert_chat(&self, id: &str, user_id: &str) {
        self.insert_chat_at(id, user_id, now_millis());
    }

    pub fn insert_chat_at(&self, id: &str, user_id: &str, created_at: i64) {
        let mut conn = self.pool.get().expect("Failed to get connection");
        diesel::insert_into(chats::table)
            .values((
                chats::id.eq(id),
                chats::created_at.eq(created_at),
                chats::title.eq("Test chat"),
                chats::user_id.eq(user_id),
                chats::visibility.eq("private"),
            ))
            .execute(&mut conn)
            .expect("Failed to insert chat");
    }
}
