//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are first read as untyped JSON so that a wrong field type
//! is reported with the domain error code (`INVALID_INPUT`,
//! `INVALID_PARAMS`) rather than as a generic deserialization failure.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ApiErrorResponse;
use crate::domain::Todo;

// =============================================================================
// Request DTOs
// =============================================================================

/// Request DTO for `POST /api/todos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoRequest {
    /// Raw todo text; anything other than a JSON string is invalid input.
    #[serde(default)]
    pub text: Option<Value>,
}

impl CreateTodoRequest {
    /// Returns the text if it was sent as a JSON string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().and_then(Value::as_str)
    }
}

/// Request DTO for `PUT /api/todos/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New completion flag; anything other than a JSON boolean is invalid.
    #[serde(default)]
    pub completed: Option<Value>,
}

impl UpdateTodoRequest {
    /// Returns the flag if it was sent as a JSON boolean.
    #[must_use]
    pub fn completed(&self) -> Option<bool> {
        self.completed.as_ref().and_then(Value::as_bool)
    }
}

/// Parses a JSON request body that must be an object.
///
/// A body sent without a JSON content type is read as an empty object, so
/// the missing fields are reported by the operation itself.
///
/// # Errors
///
/// - 413 `PAYLOAD_TOO_LARGE` if the body exceeded the size limit
/// - 400 `INVALID_BODY` if the body is not valid JSON or not an object
pub fn parse_object_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let value = match payload {
        Ok(Json(value)) => value,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
        Err(rejection) => {
            tracing::debug!(%rejection, "Request body rejected");
            return Err(if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiErrorResponse::payload_too_large()
            } else {
                ApiErrorResponse::invalid_body()
            });
        }
    };

    if !value.is_object() {
        return Err(ApiErrorResponse::invalid_body());
    }

    serde_json::from_value(value).map_err(|_| ApiErrorResponse::invalid_body())
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Response DTO for a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text.clone(),
            completed: todo.completed,
            created_at: todo.created_at.to_string(),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Timestamp, TodoId};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"text": "Buy milk"}), Some("Buy milk"))]
    #[case(json!({"text": 123}), None)]
    #[case(json!({"text": null}), None)]
    #[case(json!({"text": ["a"]}), None)]
    #[case(json!({}), None)]
    fn create_request_exposes_only_string_text(
        #[case] body: Value,
        #[case] expected: Option<&str>,
    ) {
        let request: CreateTodoRequest = parse_object_body(Ok(Json(body))).unwrap();

        assert_eq!(request.text(), expected);
    }

    #[rstest]
    #[case(json!({"completed": true}), Some(true))]
    #[case(json!({"completed": false}), Some(false))]
    #[case(json!({"completed": "not a boolean"}), None)]
    #[case(json!({"completed": 1}), None)]
    #[case(json!({}), None)]
    fn update_request_exposes_only_boolean_flag(
        #[case] body: Value,
        #[case] expected: Option<bool>,
    ) {
        let request: UpdateTodoRequest = parse_object_body(Ok(Json(body))).unwrap();

        assert_eq!(request.completed(), expected);
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("text"))]
    #[case(json!(42))]
    #[case(json!(null))]
    fn non_object_body_is_invalid(#[case] body: Value) {
        let error = parse_object_body::<CreateTodoRequest>(Ok(Json(body))).unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error.code, "INVALID_BODY");
    }

    #[rstest]
    fn todo_response_from_todo() {
        let created_at = Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap();
        let todo = Todo::new(TodoId::new("1"), "Buy milk", created_at).with_completed(true);

        let response = TodoResponse::from(&todo);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "id": "1",
                "text": "Buy milk",
                "completed": true,
                "createdAt": "2024-01-01T00:00:00.000Z"
            })
        );
    }
}
