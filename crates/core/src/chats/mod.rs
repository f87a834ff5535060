//! Chats module - domain models and traits.

mod chats_model;
mod chats_traits;

pub use chats_model::{Chat, NewChat, Visibility};
pub use chats_traits::ChatRepositoryTrait;
