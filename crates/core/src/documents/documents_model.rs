//! Document and suggestion domain models.
//!
//! A document is a version chain: rows sharing one `id`, each a full
//! immutable snapshot keyed by `(id, created_at)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    #[default]
    Text,
    Code,
    Image,
    Sheet,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Text => write!(f, "text"),
            DocumentKind::Code => write!(f, "code"),
            DocumentKind::Image => write!(f, "image"),
            DocumentKind::Sheet => write!(f, "sheet"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(DocumentKind::Text),
            "code" => Ok(DocumentKind::Code),
            "image" => Ok(DocumentKind::Image),
            "sheet" => Ok(DocumentKind::Sheet),
            _ => Err(ValidationError::InvalidEnumValue {
                field: "kind".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One snapshot of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub content: Option<String>,
    pub kind: DocumentKind,
    pub user_id: String,
}

/// Input for appending a snapshot. `id: None` starts a new chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocumentVersion {
    pub id: Option<String>,
    pub title: String,
    pub content: Option<String>,
    #[serde(default)]
    pub kind: DocumentKind,
    pub user_id: String,
}

impl NewDocumentVersion {
    pub fn new(title: &str, content: &str, kind: DocumentKind, user_id: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            content: Some(content.to_string()),
            kind,
            user_id: user_id.to_string(),
        }
    }

    /// Targets an existing chain.
    pub fn for_document(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        Ok(())
    }
}

/// A proposed edit attached to one exact document snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub document_id: String,
    pub document_created_at: DateTime<Utc>,
    pub original_text: String,
    pub suggested_text: String,
    pub description: Option<String>,
    pub is_resolved: bool,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSuggestion {
    pub id: Option<String>,
    pub document_id: String,
    pub document_created_at: DateTime<Utc>,
    pub original_text: String,
    pub suggested_text: String,
    pub description: Option<String>,
    pub user_id: String,
}

impl NewSuggestion {
    pub fn validate(&self) -> Result<()> {
        if self.document_id.trim().is_empty() {
            return Err(ValidationError::MissingField("documentId".to_string()).into());
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Error, ErrorKind};

    #[test]
    fn test_kind_accepts_only_enumerated_values() {
        for (text, kind) in [
            ("text", DocumentKind::Text),
            ("code", DocumentKind::Code),
            ("image", DocumentKind::Image),
            ("sheet", DocumentKind::Sheet),
        ] {
            assert_eq!(text.parse::<DocumentKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), text);
        }

        let err: Error = "pdf".parse::<DocumentKind>().unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_kind_rejected_during_deserialization() {
        let parsed = serde_json::from_str::<NewDocumentVersion>(
            r#"{"title":"T","content":"c","kind":"video","userId":"u"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_new_version_targets_chain() {
        let version = NewDocumentVersion::new("Essay", "A", DocumentKind::Text, "u1")
            .for_document("doc-1");
        assert_eq!(version.id.as_deref(), Some("doc-1"));
        assert!(version.validate().is_ok());
    }
}
