//! The client controller.
//!
//! Owns the [`ClientState`] and drives it through a [`TodoApi`]. The local
//! mirror changes only after the server confirms an operation; a failure
//! leaves the mirror untouched and posts a [`Notice`] instead.

use super::api::{ClientError, TodoApi};
use super::input::{InputFeedback, InputLevel, assess_input};
use super::render::render;
use super::state::{ClientState, Filter, Notice};
use crate::domain::{TodoId, validate_todo_text};

const NETWORK_FAILURE: &str = "Failed to connect to server";
const ADD_SUCCESS: &str = "Todo added successfully!";

#[derive(Debug, Clone, Copy)]
enum Action {
    Load,
    Add,
    Update,
    Delete,
}

impl Action {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::Load => "Failed to load todos",
            Self::Add => "Failed to add todo",
            Self::Update => "Failed to update todo",
            Self::Delete => "Failed to delete todo",
        }
    }
}

/// Returns the message shown to the user for a failed `action`.
fn failure_message(action: Action, error: &ClientError) -> String {
    match error {
        ClientError::Network(_) | ClientError::InvalidUrl(_) => NETWORK_FAILURE.to_string(),
        ClientError::Decode(_) => action.fallback_message().to_string(),
        ClientError::Server { message, .. } => message
            .clone()
            .unwrap_or_else(|| action.fallback_message().to_string()),
        ClientError::Validation(error) => error.to_string(),
        ClientError::UnknownTodo(_) => "Todo not found".to_string(),
    }
}

/// Drives the todo view against a remote API.
#[derive(Debug)]
pub struct TodoController<A> {
    api: A,
    state: ClientState,
}

impl<A: TodoApi> TodoController<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ClientState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Renders the current state.
    #[must_use]
    pub fn render(&self) -> String {
        render(&self.state)
    }

    /// Replaces the mirror with the server's collection.
    ///
    /// # Errors
    ///
    /// Returns the API error; the mirror is left as it was.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.state.notice = None;
        match self.api.list().await {
            Ok(todos) => {
                tracing::debug!(count = todos.len(), "Loaded todos");
                self.state.todos = todos;
                Ok(())
            }
            Err(error) => Err(self.fail(Action::Load, error)),
        }
    }

    /// Updates the draft and returns live feedback for it.
    ///
    /// A draft that is already too long is reported immediately.
    pub fn set_draft(&mut self, draft: impl Into<String>) -> InputFeedback {
        self.state.draft = draft.into();
        let feedback = assess_input(&self.state.draft);
        self.state.notice = match feedback.level {
            InputLevel::Invalid if !self.state.draft.trim().is_empty() => {
                feedback.message.clone().map(Notice::error)
            }
            InputLevel::Warning => feedback.message.clone().map(Notice::warning),
            _ => None,
        };
        feedback
    }

    /// Submits the draft.
    ///
    /// On success the new todo is appended to the mirror, the draft is
    /// cleared, and a success notice is posted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the server if
    /// the draft would be rejected, or the API error otherwise.
    pub async fn add(&mut self) -> Result<(), ClientError> {
        self.state.notice = None;
        if let Err(error) = validate_todo_text(Some(&self.state.draft)) {
            return Err(self.fail(Action::Add, error.into()));
        }

        let text = self.state.draft.trim().to_string();
        match self.api.create(&text).await {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "Added todo");
                self.state.todos.push(todo);
                self.state.draft.clear();
                self.state.notice = Some(Notice::success(ADD_SUCCESS));
                Ok(())
            }
            Err(error) => Err(self.fail(Action::Add, error)),
        }
    }

    /// Flips the completion state of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownTodo`] without contacting the server if
    /// `id` is not in the mirror, or the API error otherwise.
    pub async fn toggle(&mut self, id: &TodoId) -> Result<(), ClientError> {
        self.state.notice = None;
        let Some(current) = self.state.todos.iter().find(|todo| &todo.id == id) else {
            return Err(self.fail(Action::Update, ClientError::UnknownTodo(id.clone())));
        };
        let completed = !current.completed;

        match self.api.set_completed(id, completed).await {
            Ok(updated) => {
                if let Some(todo) = self.state.todos.iter_mut().find(|todo| &todo.id == id) {
                    todo.completed = updated.completed;
                }
                Ok(())
            }
            Err(error) => Err(self.fail(Action::Update, error)),
        }
    }

    /// Deletes `id` on the server, then drops it from the mirror.
    ///
    /// # Errors
    ///
    /// Returns the API error; the mirror is left as it was.
    pub async fn delete(&mut self, id: &TodoId) -> Result<(), ClientError> {
        self.state.notice = None;
        match self.api.delete(id).await {
            Ok(()) => {
                self.state.todos.retain(|todo| &todo.id != id);
                Ok(())
            }
            Err(error) => Err(self.fail(Action::Delete, error)),
        }
    }

    /// Changes the view filter. The mirror is not touched.
    pub const fn set_filter(&mut self, filter: Filter) {
        self.state.filter = filter;
    }

    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }

    fn fail(&mut self, action: Action, error: ClientError) -> ClientError {
        tracing::warn!(?action, %error, "Todo operation failed");
        self.state.notice = Some(Notice::error(failure_message(action, &error)));
        error
    }
}

// =============================================================================
// Tests
// =============================================================================
