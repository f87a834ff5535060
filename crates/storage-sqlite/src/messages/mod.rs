//! SQLite storage implementation for the message and vote ledger.

mod model;
mod repository;

pub use model::{LegacyMessageDB, MessageDB, VoteDB};
pub use repository::MessageRepository;
pub(crate) use repository::{delete_legacy_messages_for_chat, delete_messages_for_chat};
