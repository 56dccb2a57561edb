//! # todo-service
//!
//! A small todo-list service. Todos are kept as a single JSON document on
//! disk and exposed through a JSON HTTP API; a headless client controller
//! mirrors the collection and renders it.
//!
//! ## Layers
//!
//! - [`domain`]: the todo record and text validation
//! - [`infrastructure`]: whole-collection storage backends
//! - [`service`]: list, create, update, and delete over a repository
//! - [`api`]: axum handlers and router
//! - [`server`]: listener bootstrap and graceful shutdown
//! - [`client`]: local mirror, input feedback, and rendering
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use todo_service::api::{AppState, create_router};
//! use todo_service::infrastructure::InMemoryTodoRepository;
//! use todo_service::service::TodoService;
//!
//! let service = TodoService::new(Arc::new(InMemoryTodoRepository::new()));
//! let router = create_router(AppState::new(service));
//! # let _ = router;
//! ```

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod service;
