//! SQLite storage implementation for ChatVault.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `chatvault-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Diesel migrations
//! - Repository implementations for users, chats, messages, documents and streams
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place where Diesel dependencies exist. `core` is
//! database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod store;
pub mod utils;

// Repository implementations
pub mod chats;
pub mod documents;
pub mod messages;
pub mod streams;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, init_at, run_migrations, spawn_writer,
    DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use store::SqliteStore;

// Re-export from chatvault-core for convenience
pub use chatvault_core::errors::{DatabaseError, Error, Result};
