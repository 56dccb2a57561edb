//! Client-side application state.
//!
//! [`ClientState`] is the local mirror of the server collection plus the
//! view state. It is plain data: the controller mutates it only after a
//! confirmed server response, and rendering reads it without side effects.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::Todo;

// =============================================================================
// Filter
// =============================================================================

/// Which subset of the mirror is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// All filters in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns the wire/display name of the filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` if `todo` belongs to this filter's view.
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown filter: '{0}'. Expected 'all', 'active' or 'completed'")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownFilter(value.to_string())),
        }
    }
}

// =============================================================================
// Notice
// =============================================================================

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
    Success,
}

impl NoticeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Counts over the whole mirror, independent of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TodoStats {
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|todo| todo.completed).count();
        Self {
            total: todos.len(),
            active: todos.len() - completed,
            completed,
        }
    }
}

impl fmt::Display for TodoStats {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} total, {} active, {} completed",
            self.total, self.active, self.completed
        )
    }
}

// =============================================================================
// Client State
// =============================================================================

/// Everything the view is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    /// Local mirror of the server collection, in server order.
    pub todos: Vec<Todo>,
    /// Current view filter.
    pub filter: Filter,
    /// Text currently typed into the input.
    pub draft: String,
    /// Message currently shown to the user, if any.
    pub notice: Option<Notice>,
}

impl ClientState {
    /// Returns the todos selected by the current filter, in mirror order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos
            .iter()
            .filter(|todo| self.filter.matches(todo))
            .collect()
    }

    /// Returns counts over the whole mirror.
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        TodoStats::from_todos(&self.todos)
    }
}

// =============================================================================
// Tests
// =============================================================================
