use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    extractors::AppPath,
    models::{Question, UserProgress},
    services::{question_service::QuestionService, AppState},
};

/// GET /api/bookmarks/{userId}
pub async fn get_bookmarks(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i32>,
) -> Json<Vec<Question>> {
    Json(QuestionService::new(&state).bookmarked(user_id).await)
}

/// POST /api/bookmarks/{userId}/{questionId}
pub async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    AppPath((user_id, question_id)): AppPath<(i32, i32)>,
) -> Json<UserProgress> {
    tracing::info!(
        "Toggling bookmark for user_id={}, question_id={}",
        user_id,
        question_id
    );
    Json(state.progress.toggle_bookmark(user_id, question_id).await)
}
