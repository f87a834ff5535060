//! Documents module - versioned documents (artifacts) and suggestions.

mod documents_model;
mod documents_traits;

pub use documents_model::{
    Document, DocumentKind, NewDocumentVersion, NewSuggestion, Suggestion,
};
pub use documents_traits::DocumentRepositoryTrait;
