//! Chat domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Who can read a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(ValidationError::InvalidEnumValue {
                field: "visibility".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Domain model representing a chat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub user_id: String,
    pub visibility: Visibility,
}

/// Input model for creating a new chat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChat {
    pub id: Option<String>,
    pub title: String,
    pub user_id: String,
    #[serde(default)]
    pub visibility: Visibility,
}

impl NewChat {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_round_trips_as_text() {
        assert_eq!("public".parse::<Visibility>().unwrap(), Visibility::Public);
        assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);
        assert_eq!(Visibility::Public.to_string(), "public");
        assert!("PUBLIC".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_visibility_defaults_to_private() {
        let chat: NewChat =
            serde_json::from_str(r#"{"title":"Hi","userId":"u1"}"#).unwrap();
        assert_eq!(chat.visibility, Visibility::Private);
    }

    #[test]
    fn test_new_chat_requires_title() {
        let chat = NewChat {
            id: None,
            title: "   ".to_string(),
            user_id: "u1".to_string(),
            visibility: Visibility::Private,
        };
        assert!(chat.validate().is_err());
    }
}
