//! Process-wide entry point to the database.
//!
//! `SqliteStore` owns the connection pool and the single writer. It is built
//! once at start-up and hands out repositories that share both.

use diesel::SqliteConnection;
use log::info;
use std::any::Any;
use std::sync::Arc;

use chatvault_core::chats::ChatRepositoryTrait;
use chatvault_core::documents::DocumentRepositoryTrait;
use chatvault_core::errors::Result;
use chatvault_core::messages::MessageRepositoryTrait;
use chatvault_core::streams::{ResumePolicy, StreamRepositoryTrait, StreamService, StreamServiceTrait};
use chatvault_core::users::UserRepositoryTrait;

use crate::chats::ChatRepository;
use crate::db::{self, spawn_writer, DbPool, WriteHandle};
use crate::documents::DocumentRepository;
use crate::messages::MessageRepository;
use crate::streams::StreamRepository;
use crate::users::UserRepository;

pub struct SqliteStore {
    db_path: String,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteStore {
    /// Opens the database under `app_data_dir`, or wherever `DATABASE_URL`
    /// points, and applies pending migrations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(app_data_dir: &str) -> Result<Self> {
        let db_path = db::init(app_data_dir)?;
        Self::connect(db_path)
    }

    /// Like [`SqliteStore::open`] for an explicit database file.
    pub fn open_at(db_path: &str) -> Result<Self> {
        db::init_at(db_path)?;
        Self::connect(db_path.to_string())
    }

    fn connect(db_path: String) -> Result<Self> {
        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        let writer = spawn_writer((*pool).clone());
        info!("Store ready at {}", db_path);
        Ok(Self {
            db_path,
            pool,
            writer,
        })
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub fn pool(&self) -> Arc<DbPool> {
        self.pool.clone()
    }

    pub fn writer(&self) -> WriteHandle {
        self.writer.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepositoryTrait> {
        Arc::new(UserRepository::new(self.pool(), self.writer()))
    }

    pub fn chats(&self) -> Arc<dyn ChatRepositoryTrait> {
        Arc::new(ChatRepository::new(self.pool(), self.writer()))
    }

    pub fn messages(&self) -> Arc<dyn MessageRepositoryTrait> {
        Arc::new(MessageRepository::new(self.pool(), self.writer()))
    }

    pub fn documents(&self) -> Arc<dyn DocumentRepositoryTrait> {
        Arc::new(DocumentRepository::new(self.pool(), self.writer()))
    }

    pub fn streams(&self) -> Arc<dyn StreamRepositoryTrait> {
        Arc::new(StreamRepository::new(self.pool(), self.writer()))
    }

    pub fn stream_service(&self, policy: ResumePolicy) -> Arc<dyn StreamServiceTrait> {
        Arc::new(StreamService::new(self.streams(), policy))
    }

    /// Runs `job` as one transaction on the writer connection.
    ///
    /// Any error returned by `job` rolls back everything it wrote. Nested
    /// `conn.transaction` calls inside `job` become savepoints.
    pub async fn transaction<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        self.writer.exec(job).await
    }
}
