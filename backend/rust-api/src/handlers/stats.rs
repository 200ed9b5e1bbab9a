use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    extractors::AppPath,
    models::UserStats,
    services::{stats_service::StatsService, AppState},
};

/// GET /api/stats/{userId}
pub async fn get_user_stats(
    State(state): State<Arc<AppState>>,
    AppPath(user_id): AppPath<i32>,
) -> Json<UserStats> {
    Json(StatsService::new(&state).user_stats(user_id).await)
}
