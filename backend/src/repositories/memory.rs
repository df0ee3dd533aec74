//! In-memory user store
//!
//! Same contract as the PostgreSQL store, including the unique
//! constraints. Check-and-write happens under a single write lock.

use super::{NewUser, RepositoryError, UserStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use user_registry_shared::User;

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl Inner {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.users.values().any(|u| u.email == email)
    }
}

/// Process-local user store
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;

        if inner.username_taken(&new_user.username, None) {
            return Err(RepositoryError::Duplicate("Username already taken".to_string()));
        }
        if inner.email_taken(&new_user.email) {
            return Err(RepositoryError::Duplicate("Email already taken".to_string()));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.inner.read().await.users.len() as i64)
    }

    async fn update_username(
        &self,
        id: i64,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&id) {
            return Ok(None);
        }
        if inner.username_taken(username, Some(id)) {
            return Err(RepositoryError::Duplicate("Username already taken".to_string()));
        }

        let user = inner.users.get_mut(&id).map(|user| {
            user.username = username.to_string();
            user.updated_at = Utc::now();
            user.clone()
        });

        Ok(user)
    }

    async fn update_password_hash(
        &self,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
