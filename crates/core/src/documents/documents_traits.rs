//! Versioned document engine trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::documents_model::{Document, NewDocumentVersion, NewSuggestion, Suggestion};
use crate::errors::Result;

/// Trait defining the contract for versioned documents and their suggestions.
///
/// Writers are not serialized per document id: two concurrent saves on the
/// same chain both succeed with distinct `created_at` values.
#[async_trait]
pub trait DocumentRepositoryTrait: Send + Sync {
    /// Appends a full snapshot and returns it with its assigned `created_at`.
    async fn save_version(&self, version: NewDocumentVersion) -> Result<Document>;

    /// All versions of a document by `created_at` ascending.
    fn get_chain(&self, document_id: &str) -> Result<Vec<Document>>;

    /// The version with the greatest `created_at`.
    fn get_current(&self, document_id: &str) -> Result<Document>;

    fn get_version_at(&self, document_id: &str, created_at: DateTime<Utc>) -> Result<Document>;

    /// Current version of every document owned by a user.
    fn get_documents_by_user(&self, user_id: &str) -> Result<Vec<Document>>;

    /// Deletes versions created strictly after `timestamp` together with the
    /// suggestions that reference them, atomically.
    ///
    /// Returns the number of versions deleted.
    async fn delete_versions_after(&self, document_id: &str, timestamp: DateTime<Utc>)
        -> Result<usize>;

    /// Fails with `NotFound` unless the referenced snapshot exists.
    async fn add_suggestion(&self, suggestion: NewSuggestion) -> Result<Suggestion>;

    /// Marks a suggestion resolved. Resolving twice is a no-op.
    async fn resolve_suggestion(&self, suggestion_id: &str) -> Result<Suggestion>;

    fn get_suggestions_by_document(&self, document_id: &str) -> Result<Vec<Suggestion>>;
}
