//! Repository trait for the todo collection.
//!
//! The store only knows how to load and save the whole collection. Methods
//! return boxed futures so the trait stays object safe and backends can be
//! chosen at runtime by the [`RepositoryFactory`](super::RepositoryFactory).

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::Todo;

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// The stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

// =============================================================================
// Todo Repository
// =============================================================================

/// Whole-collection storage for todos.
///
/// Implementations never cache between calls: every `load_all` observes the
/// latest `save_all`.
pub trait TodoRepository: Send + Sync {
    /// Loads the full collection in storage order.
    ///
    /// Returns an empty collection when nothing has been stored yet.
    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Todo>, RepositoryError>>;

    /// Replaces the stored collection with `todos`.
    fn save_all<'a>(&'a self, todos: &'a [Todo]) -> BoxFuture<'a, Result<(), RepositoryError>>;
}

// =============================================================================
// Tests
// =============================================================================
