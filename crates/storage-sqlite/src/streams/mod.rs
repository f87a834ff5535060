//! SQLite storage implementation for resumable stream records.

mod model;
mod repository;

pub use model::StreamDB;
pub use repository::StreamRepository;
pub(crate) use repository::delete_streams_for_chat;
