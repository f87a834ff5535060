use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use chatvault_core::errors::{Error, Result};
use chatvault_core::ids::id_or_new;
use chatvault_core::users::{NewUser, User, UserRepositoryTrait};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let user_db = UserDB {
            id: id_or_new(new_user.id),
            email: new_user.email,
            password_hash: new_user.password_hash,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let created = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(created))
            })
            .await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .find(user_id)
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(User::from)
            .ok_or_else(|| Error::not_found(format!("User {}", user_id)))
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use chatvault_core::ErrorKind;

    #[tokio::test]
    async fn test_create_and_lookup_user() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

        let user = repo
            .create_user(NewUser {
                id: None,
                email: "ada@example.com".to_string(),
                password_hash: Some("hash".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(repo.get_user(&user.id).unwrap(), user);
        let by_email = repo.get_user_by_email("ada@example.com").unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id));
        assert!(repo.get_user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        assert_eq!(repo.get_user("missing").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_user_id_conflicts() {
        let db = TestDb::new();
        let repo = UserRepository::new(db.pool.clone(), db.writer.clone());
        let new_user = NewUser {
            id: Some("u-1".to_string()),
            email: "a@example.com".to_string(),
            password_hash: None,
        };
        repo.create_user(new_user.clone()).await.unwrap();
        let err = repo.create_user(new_user).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
