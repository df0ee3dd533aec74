//! Authentication routes
//!
//! `POST /register` and `POST /login` are public; `GET /me` and
//! `PATCH /change-password` sit behind [`require_auth`].

use crate::auth::{require_auth, CurrentUser};
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use user_registry_shared::types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    RegisterResponse, UserEnvelope,
};

/// Create auth routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/change-password", patch(change_password))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// POST /register
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = body?;
    let user = AuthService::register(state.store(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Account created successfully".to_string(),
            user: user.into(),
        }),
    ))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = body?;
    let session = AuthService::login(state.store(), state.jwt(), req).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: session.user.into(),
    }))
}

/// GET /me
async fn me(CurrentUser(user): CurrentUser) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        message: "Authenticated user".to_string(),
        user: user.into(),
    })
}

/// PATCH /change-password
async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = body?;
    AuthService::change_password(state.store(), &user, req).await?;
    Ok(Json(MessageResponse::new("Password changed")))
}
