use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
#[tracing::instrument(skip(state))]
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard pages and HTMX partials
        .route("/", get(handlers::executions::executions_page))
        .route(
            "/dashboard/executions",
            get(handlers::executions::executions_page),
        )
        .route(
            "/dashboard/refresh",
            post(handlers::executions::refresh_executions),
        )
        // Test trigger form submission
        .route("/trigger", post(handlers::trigger::submit_trigger))
        // Operational endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
