use axum::{extract::State, Json};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::{AppPath, AppQuery},
    models::{question::QuestionQuery, Question},
    services::{question_service::QuestionService, AppState},
};

/// GET /api/questions?category=&categories=&random=&limit=
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<QuestionQuery>,
) -> Json<Vec<Question>> {
    tracing::debug!("Listing questions: {:?}", query);
    Json(QuestionService::new(&state).list(&query))
}

/// GET /api/questions/{id}
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Question>, ApiError> {
    QuestionService::new(&state)
        .get(id)
        .map(Json)
        .map_err(|_| ApiError::not_found("Question not found"))
}
