//! Utility functions for SQLite storage operations.
//!
//! Timestamps are persisted as integer milliseconds since the Unix epoch.

use chatvault_core::errors::{DatabaseError, Error, Result};
use chrono::{DateTime, Utc};

pub fn to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

pub fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        Error::Database(DatabaseError::Internal(format!(
            "timestamp out of range: {}",
            millis
        )))
    })
}

/// The current time, truncated to the stored precision.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Timestamp for a new row in a chain whose newest row is at `latest`.
///
/// Never earlier than now, and always strictly after `latest`.
pub fn next_chain_millis(latest: Option<i64>) -> i64 {
    let now = now_millis();
    match latest {
        Some(latest) if latest >= now => latest + 1,
        _ => now,
    }
}
