//! In-memory repository implementation.
//!
//! Suitable for tests and for running the server without touching disk
//! (`STORAGE_MODE=in_memory`). Contents are lost when the process exits.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::Todo;
use crate::infrastructure::{RepositoryError, TodoRepository};

/// In-memory [`TodoRepository`].
///
/// Clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `todos`.
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Todo>, RepositoryError>> {
        async move { Ok(self.todos.read().await.clone()) }.boxed()
    }

    fn save_all<'a>(&'a self, todos: &'a [Todo]) -> BoxFuture<'a, Result<(), RepositoryError>> {
        async move {
            *self.todos.write().await = todos.to_vec();
            Ok(())
        }
        .boxed()
    }
}
