//! HTTP handlers for the todo API.
//!
//! Handlers parse requests, call the [`TodoService`], and translate the
//! outcome into status codes and JSON bodies. They hold no business rules.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use super::dto::{
    CreateTodoRequest, HealthResponse, TodoResponse, UpdateTodoRequest, parse_object_body,
};
use super::error::{ApiErrorResponse, Operation};
use crate::domain::TodoId;
use crate::service::TodoService;

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Todo service backed by the configured repository.
    pub todo_service: TodoService,
}

impl AppState {
    /// Creates a new `AppState` around a todo service.
    #[must_use]
    pub const fn new(todo_service: TodoService) -> Self {
        Self { todo_service }
    }
}

// =============================================================================
// GET /api/todos Handler
// =============================================================================

/// Lists all todos in storage order.
///
/// # Response
///
/// - **200 OK**: JSON array of todos
/// - **500 Internal Server Error**: storage read failed
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] when the collection cannot be read.
pub async fn list_todos(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, ApiErrorResponse> {
    let todos = state
        .todo_service
        .list()
        .await
        .map_err(|error| ApiErrorResponse::from_service(error, Operation::List))?;

    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

// =============================================================================
// POST /api/todos Handler
// =============================================================================

/// Creates a new todo.
///
/// # Request Body
///
/// ```json
/// { "text": "Buy milk" }
/// ```
///
/// # Response
///
/// - **201 Created**: the created todo
/// - **400 Bad Request**: `INVALID_BODY`, `INVALID_INPUT`, `EMPTY_TEXT`, or
///   `TEXT_TOO_LONG`
/// - **500 Internal Server Error**: storage failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid bodies, rejected text, and
/// storage failures.
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiErrorResponse> {
    let request: CreateTodoRequest = parse_object_body(payload)?;

    let todo = state
        .todo_service
        .create(request.text())
        .await
        .map_err(|error| ApiErrorResponse::from_service(error, Operation::Create))?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

// =============================================================================
// PUT /api/todos/{id} Handler
// =============================================================================

/// Sets the completion flag of a todo.
///
/// # Request Body
///
/// ```json
/// { "completed": true }
/// ```
///
/// # Response
///
/// - **200 OK**: the updated todo
/// - **400 Bad Request**: `INVALID_BODY` or `INVALID_PARAMS`
/// - **404 Not Found**: unknown id
/// - **500 Internal Server Error**: storage failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid payloads, unknown ids, and
/// storage failures.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let request: UpdateTodoRequest = parse_object_body(payload)?;

    let todo = state
        .todo_service
        .set_completed(&TodoId::from(id), request.completed())
        .await
        .map_err(|error| ApiErrorResponse::from_service(error, Operation::Update))?;

    Ok(Json(TodoResponse::from(todo)))
}

// =============================================================================
// DELETE /api/todos/{id} Handler
// =============================================================================

/// Deletes a todo.
///
/// # Response
///
/// - **204 No Content**: deleted
/// - **404 Not Found**: unknown id
/// - **500 Internal Server Error**: storage failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for unknown ids and storage failures.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    state
        .todo_service
        .delete(&TodoId::from(id))
        .await
        .map_err(|error| ApiErrorResponse::from_service(error, Operation::Delete))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// GET /health Handler
// =============================================================================

/// Health check endpoint.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
