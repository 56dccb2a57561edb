//! Todo service.
//!
//! Orchestrates validation and storage for the four todo operations. Every
//! mutation loads the full collection, changes it, and saves it back. The
//! cycle runs under a process-wide lock so concurrent requests cannot
//! overwrite each other's changes.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{Timestamp, Todo, TodoId, ValidationError, validate_todo_text};
use crate::infrastructure::{RepositoryError, TodoRepository};

// =============================================================================
// Service Error
// =============================================================================

/// Errors returned by [`TodoService`] operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The todo text was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The completion flag was absent or not a boolean.
    #[error("Invalid request parameters")]
    InvalidParams,

    /// No todo has the given identifier.
    #[error("Todo not found: {0}")]
    NotFound(TodoId),

    /// Loading or saving the collection failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

// =============================================================================
// Todo Service
// =============================================================================

/// Create/list/update/delete over a [`TodoRepository`].
///
/// Clones share the repository and the write lock.
#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository + Send + Sync>,
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for TodoService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TodoService")
            .field("repository", &"Arc<dyn TodoRepository>")
            .finish_non_exhaustive()
    }
}

impl TodoService {
    /// Creates a service over the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn TodoRepository + Send + Sync>) -> Self {
        Self {
            repository,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the full collection in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Repository`] if the collection cannot be read.
    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        Ok(self.repository.load_all().await?)
    }

    /// Validates `raw_text` and appends a new todo.
    ///
    /// `None` means the text was absent or not a string. Validation happens
    /// before storage is touched, so rejected input never causes a write.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Validation`] if the text is rejected
    /// - [`ServiceError::Repository`] if loading or saving fails
    pub async fn create(&self, raw_text: Option<&str>) -> Result<Todo, ServiceError> {
        let validated = validate_todo_text(raw_text).inspect_err(|error| {
            tracing::debug!(code = error.code(), %error, "Todo text rejected");
        })?;

        let _guard = self.write_lock.lock().await;
        let mut todos = self.repository.load_all().await?;

        let id = generate_unique_id(&todos);
        let todo = Todo::new(id, validated.sanitized.clone(), Timestamp::now());
        todos.push(todo.clone());
        self.repository.save_all(&todos).await?;

        tracing::info!(
            id = %todo.id,
            length = validated.length,
            sanitized = validated.was_escaped(),
            "Todo created"
        );

        Ok(todo)
    }

    /// Sets the completion flag of the todo with `id`.
    ///
    /// `None` means the flag was absent or not a boolean; it is rejected
    /// before the collection is loaded.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidParams`] if `completed` is `None`
    /// - [`ServiceError::NotFound`] if no todo has `id`
    /// - [`ServiceError::Repository`] if loading or saving fails
    pub async fn set_completed(
        &self,
        id: &TodoId,
        completed: Option<bool>,
    ) -> Result<Todo, ServiceError> {
        let completed = completed.ok_or(ServiceError::InvalidParams)?;

        let _guard = self.write_lock.lock().await;
        let mut todos = self.repository.load_all().await?;

        let todo = todos
            .iter_mut()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;
        todo.completed = completed;
        let updated = todo.clone();

        self.repository.save_all(&todos).await?;

        tracing::info!(id = %updated.id, completed, "Todo updated");

        Ok(updated)
    }

    /// Removes the todo with `id`.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`] if no todo has `id`
    /// - [`ServiceError::Repository`] if loading or saving fails
    pub async fn delete(&self, id: &TodoId) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let todos = self.repository.load_all().await?;

        let count_before = todos.len();
        let remaining: Vec<Todo> = todos.into_iter().filter(|todo| &todo.id != id).collect();

        if remaining.len() == count_before {
            return Err(ServiceError::NotFound(id.clone()));
        }

        self.repository.save_all(&remaining).await?;

        tracing::info!(id = %id, "Todo deleted");

        Ok(())
    }
}

/// Generates an identifier not used by any todo in `todos`.
fn generate_unique_id(todos: &[Todo]) -> TodoId {
    loop {
        let candidate = TodoId::generate_v7();
        if todos.iter().all(|todo| todo.id != candidate) {
            return candidate;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
