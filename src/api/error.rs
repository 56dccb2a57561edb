//! API error handling.
//!
//! This module shapes failures into `{error, code, details?}` JSON bodies
//! and picks the status code for each service error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ValidationError;
use crate::service::ServiceError;

// =============================================================================
// API Error
// =============================================================================

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
    /// Optional machine-readable details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Attaches details to the error.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

// =============================================================================
// Operation
// =============================================================================

/// The endpoint operation an error happened in.
///
/// Storage failures are reported with an operation-specific message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Message returned to the client when storage fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to read todos",
            Self::Create => "Failed to create todo",
            Self::Update => "Failed to update todo",
            Self::Delete => "Failed to delete todo",
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// Creates a 400 response for a body that is not a JSON object.
    #[must_use]
    pub fn invalid_body() -> Self {
        Self::bad_request("INVALID_BODY", "Invalid request body")
    }

    /// Creates a 400 response for a rejected todo text.
    #[must_use]
    pub fn validation(error: &ValidationError) -> Self {
        let api_error = ApiError::new(error.code(), error.to_string());
        let api_error = match error
            .details()
            .and_then(|details| serde_json::to_value(details).ok())
        {
            Some(details) => api_error.with_details(details),
            None => api_error,
        };
        Self::new(StatusCode::BAD_REQUEST, api_error)
    }

    /// Creates a 400 response for a bad update payload.
    #[must_use]
    pub fn invalid_params() -> Self {
        Self::bad_request("INVALID_PARAMS", "Invalid request parameters")
    }

    /// Creates a 404 Not Found response for an unknown todo.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ApiError::new("NOT_FOUND", "Todo not found"),
        )
    }

    /// Creates a 413 response for an oversized body.
    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::new("PAYLOAD_TOO_LARGE", "Request body too large"),
        )
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }

    /// Maps a service error raised while performing `operation`.
    ///
    /// Storage failures are logged here and never exposed to the client.
    #[must_use]
    pub fn from_service(error: ServiceError, operation: Operation) -> Self {
        match error {
            ServiceError::Validation(validation) => Self::validation(&validation),
            ServiceError::InvalidParams => Self::invalid_params(),
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Repository(repository_error) => {
                tracing::error!(
                    error = %repository_error,
                    ?operation,
                    "Storage failure"
                );
                Self::internal_error(operation.failure_message())
            }
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;
    use crate::infrastructure::RepositoryError;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_api_error_omits_absent_details() {
        let error = ApiError::new("NOT_FOUND", "Todo not found");

        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"error": "Todo not found", "code": "NOT_FOUND"})
        );
    }

    #[rstest]
    fn test_text_too_long_carries_details() {
        let response = ApiErrorResponse::validation(&ValidationError::TextTooLong {
            max_length: 500,
            current_length: 501,
        });

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "TEXT_TOO_LONG");
        assert_eq!(
            response.error.details,
            Some(json!({"maxLength": 500, "currentLength": 501}))
        );
    }

    #[rstest]
    #[case(ServiceError::Validation(ValidationError::InvalidInput), StatusCode::BAD_REQUEST, "INVALID_INPUT")]
    #[case(ServiceError::Validation(ValidationError::EmptyText), StatusCode::BAD_REQUEST, "EMPTY_TEXT")]
    #[case(ServiceError::InvalidParams, StatusCode::BAD_REQUEST, "INVALID_PARAMS")]
    #[case(ServiceError::NotFound(TodoId::new("999")), StatusCode::NOT_FOUND, "NOT_FOUND")]
    #[case(
        ServiceError::Repository(RepositoryError::Io("disk full".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR"
    )]
    fn test_service_error_mapping(
        #[case] error: ServiceError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let response = ApiErrorResponse::from_service(error, Operation::Update);

        assert_eq!(response.status, status);
        assert_eq!(response.error.code, code);
    }

    #[rstest]
    #[case(Operation::List, "Failed to read todos")]
    #[case(Operation::Create, "Failed to create todo")]
    #[case(Operation::Update, "Failed to update todo")]
    #[case(Operation::Delete, "Failed to delete todo")]
    fn test_storage_failure_hides_internal_details(
        #[case] operation: Operation,
        #[case] message: &str,
    ) {
        let error = ServiceError::Repository(RepositoryError::Io("/secret/path".to_string()));

        let response = ApiErrorResponse::from_service(error, operation);

        assert_eq!(response.error.error, message);
        assert!(response.error.details.is_none());
    }

    #[rstest]
    fn test_not_found_message_mentions_not_found() {
        let response = ApiErrorResponse::not_found();

        assert!(response.error.error.contains("not found"));
    }
}
