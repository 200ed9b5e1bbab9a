use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::{AppJson, AppPath},
    models::{CreateUserRequest, UserProfile},
    services::AppState,
};

/// POST /api/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserProfile>), ApiError> {
    req.validate()?;

    tracing::info!("Creating user: {}", req.username);
    let user = state.users.create_user(req).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .users
        .get_user(id)
        .await
        .map(|user| Json(user.into()))
        .ok_or_else(|| ApiError::not_found("User not found"))
}
