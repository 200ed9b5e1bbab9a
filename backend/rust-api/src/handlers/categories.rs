use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    models::category::CategorySummary,
    services::{question_service::QuestionService, AppState},
};

/// GET /api/categories
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategorySummary>> {
    Json(QuestionService::new(&state).categories())
}
