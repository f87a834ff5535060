//! SQLite storage implementation for versioned documents and suggestions.

mod model;
mod repository;

pub use model::{DocumentDB, SuggestionDB};
pub use repository::DocumentRepository;
