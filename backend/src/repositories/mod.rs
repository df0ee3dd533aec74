//! Database repositories
//!
//! Provides the data access layer. Handlers never talk to a pool
//! directly; they receive an `Arc<dyn UserStore>` through `AppState`.
//!
//! Two implementations exist with identical semantics:
//! - [`PgUserStore`]: PostgreSQL via sqlx
//! - [`MemoryUserStore`]: in-process, for development and tests
//!
//! Both enforce username and email uniqueness themselves, so the
//! existence checks done by the services are only a fast path.

use async_trait::async_trait;
use thiserror::Error;
use user_registry_shared::User;

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::PgUserStore;

/// Store-level failure
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A unique field (username or email) is already taken
    #[error("{0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Input for inserting a user; the hash is computed by the caller
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Persistence contract for the `users` table
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the stored row
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// All users ordered by id
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    async fn count(&self) -> Result<i64, RepositoryError>;

    /// Returns `None` when no row has this id
    async fn update_username(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<User>, RepositoryError>;

    /// Returns `false` when no row has this id
    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;

    /// Returns `false` when no row has this id
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> Result<(), RepositoryError>;
}
