//! PostgreSQL user store

use super::{NewUser, RepositoryError, UserStore};
use crate::db;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use user_registry_shared::User;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Translate unique-constraint violations into `Duplicate`
fn map_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let message = match db_err.constraint() {
                Some("users_username_key") => "Username already taken",
                Some("users_email_key") => "Email already taken",
                _ => "User already exists",
            };
            return RepositoryError::Duplicate(message.to_string());
        }
    }
    RepositoryError::Database(err)
}

/// User store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn update_username(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET username = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user.map(User::from))
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_converts_to_model() {
        let now = Utc::now();
        let record = UserRecord {
            id: 42,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$10$hash".to_string(),
            created_at: now,
            updated_at: now,
        };

        let user = User::from(record);
        assert_eq!(user.id, 42);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password_hash, "$2b$10$hash");
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = map_write_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    // Queries against a live database are covered by
    // tests/postgres_store_test.rs (run with --ignored)
}
