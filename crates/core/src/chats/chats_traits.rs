//! Chat repository trait.

use async_trait::async_trait;

use super::chats_model::{Chat, NewChat, Visibility};
use crate::errors::Result;

/// Trait defining the contract for chat repository operations.
#[async_trait]
pub trait ChatRepositoryTrait: Send + Sync {
    async fn save_chat(&self, new_chat: NewChat) -> Result<Chat>;

    /// Retrieves a chat by id, failing with `NotFound` when absent.
    fn get_chat(&self, chat_id: &str) -> Result<Chat>;

    /// Chats owned by a user, newest first.
    fn get_chats_by_user(&self, user_id: &str, limit: i64) -> Result<Vec<Chat>>;

    async fn update_visibility(&self, chat_id: &str, visibility: Visibility) -> Result<Chat>;

    async fn update_title(&self, chat_id: &str, title: &str) -> Result<Chat>;

    /// Deletes a chat together with its messages (both formats), votes and
    /// streams in one transaction. Returns the deleted chat.
    async fn delete_chat(&self, chat_id: &str) -> Result<Chat>;
}
