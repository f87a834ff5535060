use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::Arc;

use chatvault_core::documents::{
    Document, DocumentRepositoryTrait, NewDocumentVersion, NewSuggestion, Suggestion,
};
use chatvault_core::errors::{Error, Result};
use chatvault_core::ids::id_or_new;

use super::model::{DocumentDB, SuggestionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{documents, suggestions};
use crate::utils::{next_chain_millis, now_millis, to_millis};

pub struct DocumentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DocumentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        DocumentRepository { pool, writer }
    }
}

fn latest_version_millis(conn: &mut SqliteConnection, document_id: &str) -> Result<Option<i64>> {
    documents::table
        .filter(documents::id.eq(document_id))
        .select(max(documents::created_at))
        .first::<Option<i64>>(conn)
        .into_core()
}

#[async_trait]
impl DocumentRepositoryTrait for DocumentRepository {
    /// Appends a version to the chain named by `version.id`, or starts a new
    /// chain when no id is given.
    async fn save_version(&self, version: NewDocumentVersion) -> Result<Document> {
        version.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Document> {
                let id = id_or_new(version.id);
                let created_at = next_chain_millis(latest_version_millis(conn, &id)?);
                let row = DocumentDB {
                    id,
                    created_at,
                    title: version.title,
                    content: version.content,
                    kind: version.kind.to_string(),
                    user_id: version.user_id,
                };

                let saved = diesel::insert_into(documents::table)
                    .values(&row)
                    .returning(DocumentDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                debug!("Saved version {} of document {}", saved.created_at, saved.id);
                Document::try_from(saved)
            })
            .await
    }

    fn get_chain(&self, document_id: &str) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;
        documents::table
            .filter(documents::id.eq(document_id))
            .order(documents::created_at.asc())
            .select(DocumentDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Document::try_from)
            .collect()
    }

    fn get_current(&self, document_id: &str) -> Result<Document> {
        let mut conn = get_connection(&self.pool)?;
        let row = documents::table
            .filter(documents::id.eq(document_id))
            .order(documents::created_at.desc())
            .select(DocumentDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::not_found(format!("Document {}", document_id)))?;
        Document::try_from(row)
    }

    fn get_version_at(&self, document_id: &str, created_at: DateTime<Utc>) -> Result<Document> {
        let mut conn = get_connection(&self.pool)?;
        let millis = to_millis(created_at);
        let row = documents::table
            .find((document_id, millis))
            .select(DocumentDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| {
                Error::not_found(format!("Document {} version {}", document_id, millis))
            })?;
        Document::try_from(row)
    }

    fn get_documents_by_user(&self, user_id: &str) -> Result<Vec<Document>> {
        let mut conn = get_connection(&self.pool)?;
        let owned_ids: Vec<String> = documents::table
            .filter(documents::user_id.eq(user_id))
            .select(documents::id)
            .distinct()
            .load(&mut conn)
            .into_core()?;

        // The current version is picked across every owner of the chain, and
        // only then checked against `user_id`.
        let rows = documents::table
            .filter(documents::id.eq_any(&owned_ids))
            .order(documents::created_at.desc())
            .select(DocumentDB::as_select())
            .load(&mut conn)
            .into_core()?;

        let mut seen = HashSet::new();
        rows.into_iter()
            .filter(|row| seen.insert(row.id.clone()))
            .filter(|row| row.user_id == user_id)
            .map(Document::try_from)
            .collect()
    }

    async fn delete_versions_after(
        &self,
        document_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<usize> {
        let document_id = document_id.to_string();
        let cutoff = to_millis(timestamp);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let suggestions_removed = diesel::delete(
                    suggestions::table
                        .filter(suggestions::document_id.eq(&document_id))
                        .filter(suggestions::document_created_at.gt(cutoff)),
                )
                .execute(conn)
                .into_core()?;

                let versions_removed = diesel::delete(
                    documents::table
                        .filter(documents::id.eq(&document_id))
                        .filter(documents::created_at.gt(cutoff)),
                )
                .execute(conn)
                .into_core()?;

                info!(
                    "Truncated document {} after {}: {} versions, {} suggestions",
                    document_id, cutoff, versions_removed, suggestions_removed
                );
                Ok(versions_removed)
            })
            .await
    }

    async fn add_suggestion(&self, suggestion: NewSuggestion) -> Result<Suggestion> {
        suggestion.validate()?;
        let row = SuggestionDB::from_new(suggestion, now_millis());

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Suggestion> {
                let snapshot = documents::table
                    .find((&row.document_id, row.document_created_at))
                    .count()
                    .get_result::<i64>(conn)
                    .into_core()?;
                if snapshot == 0 {
                    return Err(Error::not_found(format!(
                        "Document {} version {}",
                        row.document_id, row.document_created_at
                    )));
                }

                let saved = diesel::insert_into(suggestions::table)
                    .values(&row)
                    .returning(SuggestionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Suggestion::try_from(saved)
            })
            .await
    }

    async fn resolve_suggestion(&self, suggestion_id: &str) -> Result<Suggestion> {
        let suggestion_id = suggestion_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Suggestion> {
                let updated = diesel::update(suggestions::table.find(&suggestion_id))
                    .set(suggestions::is_resolved.eq(true))
                    .returning(SuggestionDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::not_found(format!("Suggestion {}", suggestion_id)))?;
                Suggestion::try_from(updated)
            })
            .await
    }

    fn get_suggestions_by_document(&self, document_id: &str) -> Result<Vec<Suggestion>> {
        let mut conn = get_connection(&self.pool)?;
        suggestions::table
            .filter(suggestions::document_id.eq(document_id))
            .order(suggestions::created_at.asc())
            .select(SuggestionDB::as_select())
            .load(&mut conn)
            .into_core()?
            .into_iter()
            .map(Suggestion::try_from)
            .collect()
    }
}
