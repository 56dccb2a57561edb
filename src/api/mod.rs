//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTodoRequest, HealthResponse, TodoResponse, UpdateTodoRequest};
pub use error::{ApiError, ApiErrorResponse, Operation};
pub use handlers::{AppState, create_todo, delete_todo, health_check, list_todos, update_todo};
pub use routes::{MAX_BODY_BYTES, create_router};
