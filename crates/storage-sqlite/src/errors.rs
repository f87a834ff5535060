//! Storage-specific error types for SQLite operations.
//!
//! This module provides error types that wrap Diesel-specific errors and convert
//! them to the database-agnostic error types defined in `chatvault_core`.

use chatvault_core::errors::{DatabaseError, Error, ValidationError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
///
/// These errors are internal to the storage layer and are converted to
/// `chatvault_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A core error raised inside a write job. Kept intact so its kind
    /// survives the transaction wrapper.
    #[error("{0}")]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(e) => diesel_to_core(e),
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::SerializationError(e) => {
                Error::Database(DatabaseError::Internal(format!("corrupt stored JSON: {}", e)))
            }
            StorageError::Core(e) => e,
        }
    }
}

fn diesel_to_core(err: DieselError) -> Error {
    match err {
        DieselError::NotFound => Error::Database(DatabaseError::NotFound("Record not found".to_string())),
        DieselError::DatabaseError(kind, info) => {
            let message = info.message().to_string();
            match kind {
                DatabaseErrorKind::UniqueViolation => {
                    Error::Database(DatabaseError::UniqueViolation(message))
                }
                DatabaseErrorKind::ForeignKeyViolation => {
                    Error::Database(DatabaseError::ForeignKeyViolation(message))
                }
                DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
                    Error::Validation(ValidationError::InvalidInput(message))
                }
                DatabaseErrorKind::ClosedConnection => {
                    Error::Database(DatabaseError::ConnectionFailed(message))
                }
                _ if is_busy(&message) => Error::Database(DatabaseError::Busy(message)),
                _ => Error::Database(DatabaseError::QueryFailed(message)),
            }
        }
        DieselError::RollbackTransaction
        | DieselError::AlreadyInTransaction
        | DieselError::NotInTransaction
        | DieselError::BrokenTransactionManager => {
            Error::Database(DatabaseError::TransactionFailed(err.to_string()))
        }
        e => Error::Database(DatabaseError::QueryFailed(e.to_string())),
    }
}

fn is_busy(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("database is locked") || message.contains("database is busy")
}

/// Extension trait for easily converting Diesel Results to core Results.
///
/// This provides a `.into_core()` method on any `Result<T, diesel::result::Error>`
/// which handles the conversion through StorageError.
pub trait IntoCore<T> {
    fn into_core(self) -> chatvault_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> chatvault_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> chatvault_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, serde_json::Error> {
    fn into_core(self) -> chatvault_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
