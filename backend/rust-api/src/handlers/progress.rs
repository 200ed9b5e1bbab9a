use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use super::ApiError;
use crate::{
    extractors::{AppJson, AppPath},
    models::{NewProgress, ProgressUpdate, UserProgress},
    services::{progress_store::grade_attempt, AppState},
};

/// POST /api/progress
pub async fn create_progress(
    State(state): State<Arc<AppState>>,
    AppJson(mut req): AppJson<NewProgress>,
) -> Result<Json<UserProgress>, ApiError> {
    req.validate()?;
    grade_attempt(&state.catalog, &mut req)?;

    tracing::info!(
        "Recording progress for user_id={}, question_id={}",
        req.user_id,
        req.question_id
    );

    Ok(Json(state.progress.create(req).await))
}

/// PATCH /api/progress/{id}
pub async fn update_progress(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<ProgressUpdate>,
) -> Result<Json<UserProgress>, ApiError> {
    req.validate()?;

    tracing::info!("Updating progress id={}", id);

    Ok(Json(state.progress.update(id, &req, &state.catalog).await?))
}

/// GET /api/progress/{userId}
pub async fn get_user_progress(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i32>,
) -> Json<Vec<UserProgress>> {
    Json(state.progress.get_user_progress(user_id).await)
}
