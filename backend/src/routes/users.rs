//! User management routes

use crate::auth::require_auth;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    middleware,
    routing::get,
    Json, Router,
};
use user_registry_shared::types::{
    MessageResponse, UpdateUserRequest, UserCountResponse, UserEnvelope, UsersResponse,
};

/// Create user routes
pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/users/count", get(count_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .merge(protected)
}

/// GET /users (authenticated)
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<UsersResponse>> {
    let users = UserService::list(state.store()).await?;

    Ok(Json(UsersResponse {
        message: "All users".to_string(),
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// GET /users/count
async fn count_users(State(state): State<AppState>) -> ApiResult<Json<UserCountResponse>> {
    let count = UserService::count(state.store()).await?;

    Ok(Json(UserCountResponse {
        message: "Total number of users".to_string(),
        count,
    }))
}

/// GET /users/:id
async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Path(id) = id?;
    let user = UserService::get(state.store(), id).await?;

    Ok(Json(UserEnvelope {
        message: "Operation successful".to_string(),
        user: user.into(),
    }))
}

/// PUT /users/:id
async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<UserEnvelope>> {
    let Path(id) = id?;
    let Json(req) = body?;
    let user = UserService::update_username(state.store(), id, req).await?;

    Ok(Json(UserEnvelope {
        message: "Username updated successfully".to_string(),
        user: user.into(),
    }))
}

/// DELETE /users/:id
async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    UserService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
