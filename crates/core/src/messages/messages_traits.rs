//! Message ledger repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::legacy::{LegacyMessage, StoredMessage};
use super::messages_model::{Message, NewMessage, Vote};
use crate::errors::Result;

/// Trait defining the contract for the message and vote ledger.
///
/// Every mutating call is atomic: on failure nothing it did is visible.
///
/// Timestamps are persisted with millisecond precision. Supplied `created_at`
/// values and truncation cutoffs are both truncated to the millisecond before
/// they are stored or compared.
#[async_trait]
pub trait MessageRepositoryTrait: Send + Sync {
    /// Inserts a batch of messages all-or-nothing, in the given order.
    async fn append_messages(
        &self,
        chat_id: &str,
        messages: Vec<NewMessage>,
    ) -> Result<Vec<Message>>;

    /// Messages of a chat by `created_at` ascending, ties in insertion order.
    fn get_messages_by_chat(&self, chat_id: &str) -> Result<Vec<Message>>;

    fn get_message_by_id(&self, message_id: &str) -> Result<Message>;

    /// Removes messages created strictly after `timestamp` and their votes.
    ///
    /// Legacy rows after `timestamp` are kept but marked as truncated, which
    /// hides them from `load_history` and `migrate_legacy_to_current`.
    /// Returns the number of current-format messages removed.
    async fn delete_messages_after(&self, chat_id: &str, timestamp: DateTime<Utc>)
        -> Result<usize>;

    async fn upsert_vote(&self, chat_id: &str, message_id: &str, is_upvoted: bool)
        -> Result<Vote>;

    fn get_votes_by_chat(&self, chat_id: &str) -> Result<Vec<Vote>>;

    /// Number of user-authored messages across the user's chats since `since`.
    fn count_user_messages_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<i64>;

    // ========================================================================
    // Legacy format
    // ========================================================================

    /// Legacy rows of a chat, unconverted.
    fn read_legacy_messages(&self, chat_id: &str) -> Result<Vec<LegacyMessage>>;

    /// Both formats of a chat, ordered by `created_at`.
    fn load_history(&self, chat_id: &str) -> Result<Vec<StoredMessage>>;

    /// Imports rows into the legacy table. This is the only legacy write path.
    async fn insert_legacy_messages(&self, messages: Vec<LegacyMessage>) -> Result<usize>;

    /// Copies converted legacy rows into the current table under the same ids.
    ///
    /// Legacy rows are kept; already migrated and truncated ids are skipped.
    /// Returns the number of rows inserted.
    async fn migrate_legacy_to_current(&self, chat_id: &str) -> Result<usize>;
}
