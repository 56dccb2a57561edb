//! Common test helpers for integration tests.
//!
//! Builds routers over the in-memory or file-backed repository and sends
//! requests through them with `tower::ServiceExt::oneshot`.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate. Helpers used only by one test
//! file would otherwise generate dead code warnings in the others.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use todo_service::api::{AppState, create_router};
use todo_service::infrastructure::{
    InMemoryTodoRepository, JsonFileTodoRepository, TodoRepository,
};
use todo_service::service::TodoService;

// =============================================================================
// Router Creation Helpers
// =============================================================================

/// Creates a router over `repository`.
pub fn create_router_with(repository: Arc<dyn TodoRepository + Send + Sync>) -> Router {
    create_router(AppState::new(TodoService::new(repository)))
}

/// Creates a router over an empty in-memory repository.
pub fn create_test_router() -> Router {
    create_router_with(Arc::new(InMemoryTodoRepository::new()))
}

/// Creates a router persisting to the JSON document at `path`.
pub fn create_file_router(path: &Path) -> Router {
    create_router_with(Arc::new(JsonFileTodoRepository::new(path)))
}

// =============================================================================
// Request Helpers
// =============================================================================

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` when the body is empty.
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Sends `request` through a clone of `router`.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Sends a bodiless request.
pub async fn send_empty(router: &Router, method: Method, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

/// Sends `body` as a JSON request.
pub async fn send_json(router: &Router, method: Method, uri: &str, body: &Value) -> TestResponse {
    send_raw(router, method, uri, body.to_string()).await
}

/// Sends `body` verbatim with a JSON content type.
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    body: impl Into<Body>,
) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(router, request).await
}

/// Creates a todo and returns its JSON representation.
pub async fn create_todo(router: &Router, text: &str) -> Value {
    let response = send_json(
        router,
        Method::POST,
        "/api/todos",
        &serde_json::json!({ "text": text }),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body
}

// =============================================================================
// Server Helpers
// =============================================================================

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}")
}

/// Returns a base URL nothing is listening on.
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}
