//! Authentication middleware
//!
//! `require_auth` is layered onto protected routes. It resolves the
//! bearer token to a stored user and attaches it to the request as
//! [`CurrentUser`], which handlers extract.
//!
//! Header policy: the value must be exactly `<scheme> <token>` with the
//! scheme `Bearer` (any case) and a non-empty token. Anything else is
//! treated as a missing token. Every rejection is a 401.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use user_registry_shared::{AuthError, User};

/// User resolved by [`require_auth`] for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Unauthorized".to_string()))
    }
}

/// Split an `Authorization` value into its bearer token
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(AuthError::MissingToken),
    }
}

/// Authentication middleware
///
/// One store lookup per request; never mutates.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header)
        .map_err(|_| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

    let claims = state.jwt().validate_token(token).map_err(|e| {
        warn!(reason = %e, "Rejected session token");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    let user = state.store().find_by_id(claims.id).await?.ok_or_else(|| {
        warn!(user_id = claims.id, "Session token for unknown user");
        ApiError::Unauthorized("Unauthorized".to_string())
    })?;

    debug!(user_id = user.id, "Authenticated request");
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
