use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler).layer(middleware::from_fn_with_state(
                app_state.clone(),
                handlers::metrics_auth_middleware,
            )),
        )
        .nest("/api", api_routes().layer(cors))
        .with_state(app_state)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Catalog
        .route("/questions", get(handlers::questions::list_questions))
        .route("/questions/{id}", get(handlers::questions::get_question))
        .route("/categories", get(handlers::categories::list_categories))
        // Progress
        .route("/progress", post(handlers::progress::create_progress))
        .route(
            "/progress/{id}",
            get(handlers::progress::get_user_progress).patch(handlers::progress::update_progress),
        )
        .route("/stats/{user_id}", get(handlers::stats::get_user_stats))
        // Bookmarks
        .route("/bookmarks/{user_id}", get(handlers::bookmarks::get_bookmarks))
        .route(
            "/bookmarks/{user_id}/{question_id}",
            post(handlers::bookmarks::toggle_bookmark),
        )
        // Users
        .route("/users", post(handlers::users::create_user))
        .route("/users/{id}", get(handlers::users::get_user))
}
