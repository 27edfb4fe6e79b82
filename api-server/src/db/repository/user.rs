//! User account repository

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::UserAccount;
use shared::models::UserRole;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<UserAccount>> {
        let user: Option<UserAccount> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Find account by login email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserAccount>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user_account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<UserAccount> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new account
    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        role: UserRole,
        display_name: String,
        created_at: String,
    ) -> RepoResult<UserAccount> {
        // Duplicate check first for a clean error; the unique index backstops
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Account with email '{}' already exists",
                email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                "CREATE user_account SET
                    email = $email,
                    password_hash = $password_hash,
                    role = $role,
                    display_name = $display_name,
                    created_at = $created_at
                RETURN AFTER",
            )
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("role", role))
            .bind(("display_name", display_name))
            .bind(("created_at", created_at))
            .await?;
        let users: Vec<UserAccount> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create user account".to_string()))
    }
}
