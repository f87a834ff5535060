//! ChatVault Core - Domain entities, services, and traits.
//!
//! This crate contains the persistence model of a multi-user AI chat
//! application: chats, versioned messages, votes, versioned documents with
//! suggestions, and resumable stream bookkeeping. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod chats;
pub mod constants;
pub mod documents;
pub mod errors;
pub mod ids;
pub mod messages;
pub mod streams;
pub mod uploads;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::ErrorKind;
pub use errors::Result;
