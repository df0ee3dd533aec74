//! User management service: read, list, count, rename, delete

use crate::error::ApiError;
use crate::repositories::UserStore;
use tracing::info;
use user_registry_shared::types::UpdateUserRequest;
use user_registry_shared::validation::{describe_errors, normalize_username, validate_username};
use user_registry_shared::User;
use validator::Validate;

/// User CRUD operations
pub struct UserService;

impl UserService {
    /// All users, ordered by id
    pub async fn list(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
        Ok(store.list().await?)
    }

    pub async fn count(store: &dyn UserStore) -> Result<i64, ApiError> {
        Ok(store.count().await?)
    }

    pub async fn get(store: &dyn UserStore, id: i64) -> Result<User, ApiError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Rename a user
    ///
    /// Keeping one's own username is not a conflict.
    pub async fn update_username(
        store: &dyn UserStore,
        id: i64,
        req: UpdateUserRequest,
    ) -> Result<User, ApiError> {
        let req = UpdateUserRequest {
            username: normalize_username(&req.username),
        };
        req.validate()
            .map_err(|e| ApiError::Validation(describe_errors(&e)))?;
        validate_username(&req.username).map_err(ApiError::Validation)?;

        if let Some(existing) = store.find_by_username(&req.username).await? {
            if existing.id != id {
                return Err(ApiError::Conflict("Username already taken".to_string()));
            }
        }

        let user = store
            .update_username(id, &req.username)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = user.id, username = %user.username, "Username updated");
        Ok(user)
    }

    pub async fn delete(store: &dyn UserStore, id: i64) -> Result<(), ApiError> {
        if !store.delete(id).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = id, "User deleted");
        Ok(())
    }
}
