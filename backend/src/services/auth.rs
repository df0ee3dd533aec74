//! Authentication service: registration, login and password change
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserStore};
use tracing::{info, warn};
use user_registry_shared::types::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use user_registry_shared::validation::{
    describe_errors, normalize_email, normalize_username, validate_password, validate_username,
};
use user_registry_shared::User;
use validator::Validate;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

/// Authentication operations
pub struct AuthService;

impl AuthService {
    /// Register a new user
    ///
    /// The existence checks give friendly messages; the store's own
    /// uniqueness enforcement still decides races between them and the
    /// insert.
    pub async fn register(store: &dyn UserStore, req: RegisterRequest) -> Result<User, ApiError> {
        let req = RegisterRequest {
            username: normalize_username(&req.username),
            email: normalize_email(&req.email),
            password: req.password,
        };
        req.validate()
            .map_err(|e| ApiError::Validation(describe_errors(&e)))?;
        validate_username(&req.username).map_err(ApiError::Validation)?;
        validate_password(&req.password).map_err(ApiError::Validation)?;

        if store.find_by_username(&req.username).await?.is_some() {
            return Err(ApiError::Conflict(
                "Username already taken, try another one".to_string(),
            ));
        }

        if store.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict(
                "Email already taken, try another one".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = store
            .create(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with email and password
    ///
    /// Unknown email and wrong password produce the same error, and both
    /// pay for one bcrypt verification.
    pub async fn login(
        store: &dyn UserStore,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<Session, ApiError> {
        let email = normalize_email(&req.email);

        let Some(user) = store.find_by_email(&email).await? else {
            PasswordService::dummy_verify(req.password).await;
            warn!("Login failed: unknown email");
            return Err(ApiError::InvalidCredentials);
        };

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = user.id, "Login failed: wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = jwt_service
            .generate_token(user.id)
            .map_err(ApiError::Internal)?;

        info!(user_id = user.id, "User logged in");
        Ok(Session {
            token,
            expires_in: jwt_service.token_expiry_secs(),
            user,
        })
    }

    /// Change the password of an already authenticated user
    ///
    /// Existing tokens stay valid; they only carry the user id.
    pub async fn change_password(
        store: &dyn UserStore,
        user: &User,
        req: ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        let valid =
            PasswordService::verify_async(req.old_password.clone(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = user.id, "Password change rejected: wrong old password");
            return Err(ApiError::InvalidCredentials);
        }

        if req.new_password == req.old_password {
            return Err(ApiError::BadRequest(
                "New password should not be the same as the old password".to_string(),
            ));
        }

        validate_password(&req.new_password).map_err(ApiError::Validation)?;

        let password_hash = PasswordService::hash_async(req.new_password)
            .await
            .map_err(ApiError::Internal)?;

        if !store.update_password_hash(user.id, &password_hash).await? {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        info!(user_id = user.id, "Password changed");
        Ok(())
    }
}
