//! Routing definitions for the todo API.
//!
//! This module defines all API routes and configures the Axum router with
//! handlers, middleware, and state.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_todo, delete_todo, health_check, list_todos, update_todo,
};

/// Maximum accepted request body size (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Creates the main API router with all routes and middleware.
///
/// # Examples
///
/// ```ignore
/// use todo_service::api::{AppState, create_router};
///
/// let router = create_router(AppState::new(service));
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Creates the CORS layer configuration.
///
/// Any origin may call the API, as the browser front end can be served
/// from a different host during development.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
