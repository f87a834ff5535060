use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::streams_model::{ResumeDecision, Stream};
use crate::errors::Result;

/// Trait for stream bookkeeping.
///
/// The tracker records generation episodes; it never owns or cancels them.
#[async_trait]
pub trait StreamRepositoryTrait: Send + Sync {
    /// Always inserts a new stream. Its `created_at` is strictly greater than
    /// that of every earlier stream of the chat, which supersedes them.
    async fn begin_stream(&self, chat_id: &str) -> Result<Stream>;

    fn latest_stream(&self, chat_id: &str) -> Result<Option<Stream>>;

    fn latest_stream_id(&self, chat_id: &str) -> Result<Option<String>> {
        Ok(self.latest_stream(chat_id)?.map(|s| s.id))
    }

    /// Stream ids of a chat, oldest first.
    fn get_stream_ids_by_chat(&self, chat_id: &str) -> Result<Vec<String>>;
}

/// Trait for the resumption workflow used by reconnecting clients.
#[async_trait]
pub trait StreamServiceTrait: Send + Sync {
    async fn begin_stream(&self, chat_id: &str) -> Result<Stream>;

    fn resume(&self, chat_id: &str, now: DateTime<Utc>) -> Result<ResumeDecision>;
}
