use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait for user repository operations.
///
/// Users are never deleted by this core.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Retrieves a user by id, failing with `NotFound` when absent.
    fn get_user(&self, user_id: &str) -> Result<User>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}
