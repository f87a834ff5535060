//! Core error types for ChatVault.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//! Callers classify failures through [`Error::kind`], which is what the HTTP
//! layer maps onto status codes.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the persistence core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// The database file is locked by another writer.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for caller input and persisted enum values.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidEnumValue { field: String, value: String },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input. Caller's fault, not retried.
    Validation,
    /// Referenced id or version does not exist.
    NotFound,
    /// A keyed write would duplicate an existing row.
    Conflict,
    /// Connection or transport failure. Safe to retry with backoff.
    StoreUnavailable,
    /// A referential precondition failed; the transaction was rolled back.
    IntegrityViolation,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Database(db) => match db {
                DatabaseError::NotFound(_) => ErrorKind::NotFound,
                DatabaseError::UniqueViolation(_) => ErrorKind::Conflict,
                DatabaseError::ForeignKeyViolation(_) => ErrorKind::IntegrityViolation,
                DatabaseError::ConnectionFailed(_)
                | DatabaseError::PoolCreationFailed(_)
                | DatabaseError::Busy(_) => ErrorKind::StoreUnavailable,
                DatabaseError::QueryFailed(_)
                | DatabaseError::TransactionFailed(_)
                | DatabaseError::MigrationFailed(_)
                | DatabaseError::Internal(_) => ErrorKind::Internal,
            },
            Error::Upload(_) | Error::Unexpected(_) => ErrorKind::Internal,
        }
    }

    /// Whether the calling layer may retry the operation. The core never retries.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::StoreUnavailable
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Error::Database(DatabaseError::NotFound(what.into()))
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(reason.into()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::invalid_input("bad").kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::not_found("chat").kind(), ErrorKind::NotFound);
        assert_eq!(
            Error::Database(DatabaseError::UniqueViolation("pk".into())).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            Error::Database(DatabaseError::ForeignKeyViolation("fk".into())).kind(),
            ErrorKind::IntegrityViolation
        );
        assert_eq!(
            Error::Database(DatabaseError::Busy("locked".into())).kind(),
            ErrorKind::StoreUnavailable
        );
        assert_eq!(
            Error::Database(DatabaseError::QueryFailed("syntax".into())).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_only_store_unavailable_is_retryable() {
        assert!(Error::Database(DatabaseError::ConnectionFailed("io".into())).is_retryable());
        assert!(Error::Database(DatabaseError::PoolCreationFailed("timeout".into())).is_retryable());
        assert!(!Error::not_found("doc").is_retryable());
        assert!(!Error::Database(DatabaseError::ForeignKeyViolation("fk".into())).is_retryable());
    }

    #[test]
    fn test_reason_is_inspectable() {
        let err = Error::not_found("Document abc at 1700000000000");
        assert_eq!(
            err.to_string(),
            "Database operation failed: Record not found: Document abc at 1700000000000"
        );
    }
}
