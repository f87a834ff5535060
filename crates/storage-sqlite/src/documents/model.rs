//! Database models for documents and suggestions.

use diesel::prelude::*;

use chatvault_core::documents::{Document, NewSuggestion, Suggestion};
use chatvault_core::errors::Error;
use chatvault_core::ids::id_or_new;

use crate::utils::{from_millis, to_millis};

/// One version of a document. A document is the chain of rows sharing `id`.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(primary_key(id, created_at))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentDB {
    pub id: String,
    pub created_at: i64,
    pub title: String,
    pub content: Option<String>,
    pub kind: String,
    pub user_id: String,
}

#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::suggestions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SuggestionDB {
    pub id: String,
    pub document_id: String,
    pub document_created_at: i64,
    pub original_text: String,
    pub suggested_text: String,
    pub description: Option<String>,
    pub is_resolved: bool,
    pub user_id: String,
    pub created_at: i64,
}

impl SuggestionDB {
    pub fn from_new(suggestion: NewSuggestion, created_at: i64) -> Self {
        Self {
            id: id_or_new(suggestion.id),
            document_id: suggestion.document_id,
            document_created_at: to_millis(suggestion.document_created_at),
            original_text: suggestion.original_text,
            suggested_text: suggestion.suggested_text,
            description: suggestion.description,
            is_resolved: false,
            user_id: suggestion.user_id,
            created_at,
        }
    }
}

impl TryFrom<DocumentDB> for Document {
    type Error = Error;

    fn try_from(db: DocumentDB) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: db.kind.parse()?,
            created_at: from_millis(db.created_at)?,
            id: db.id,
            title: db.title,
            content: db.content,
            user_id: db.user_id,
        })
    }
}

impl TryFrom<SuggestionDB> for Suggestion {
    type Error = Error;

    fn try_from(db: SuggestionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            document_created_at: from_millis(db.document_created_at)?,
            created_at: from_millis(db.created_at)?,
            id: db.id,
            document_id: db.document_id,
            original_text: db.original_text,
            suggested_text: db.suggested_text,
            description: db.description,
            is_resolved: db.is_resolved,
            user_id: db.user_id,
        })
    }
}
