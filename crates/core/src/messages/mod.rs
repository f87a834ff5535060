//! Messages module - message ledger, votes and the legacy message format.

mod legacy;
mod messages_model;
mod messages_traits;

#[cfg(test)]
mod messages_model_tests;

pub use legacy::{legacy_content_to_parts, LegacyMessage, StoredMessage};
pub use messages_model::{
    validate_message_batch, Attachment, Message, MessagePart, MessageRole, NewMessage, Vote,
};
pub use messages_traits::MessageRepositoryTrait;
