//! SQLite storage implementation for chats.

mod model;
mod repository;

pub use model::ChatDB;
pub use repository::ChatRepository;
pub use repository::delete_chat_cascade;
