//! User domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Domain model representing a user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
}

/// Input model for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".to_string()).into());
        }
        Ok(())
    }
}
