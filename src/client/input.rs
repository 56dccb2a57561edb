//! Live feedback for the todo input field.
//!
//! Mirrors the server's text rules so the user learns about a rejection
//! before anything is sent.

use crate::domain::{MAX_TEXT_LENGTH, text_length};

/// Raw length above which the user is warned about the limit.
pub const WARNING_THRESHOLD: usize = 400;

/// Raw length above which the character counter turns red.
pub const DANGER_THRESHOLD: usize = 450;

/// Validity of the current draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLevel {
    /// Nothing typed yet.
    Empty,
    /// The server would reject the draft.
    Invalid,
    /// Acceptable but close to the limit.
    Warning,
    Valid,
}

/// Styling of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

/// Assessment of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFeedback {
    /// Length of the draft as typed, in UTF-16 code units.
    pub length: usize,
    pub level: InputLevel,
    pub counter: CounterLevel,
    /// Explanation for `Invalid` and `Warning` levels.
    pub message: Option<String>,
}

impl InputFeedback {
    /// Returns `true` if the draft may be submitted.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        matches!(self.level, InputLevel::Warning | InputLevel::Valid)
    }
}

/// Assesses the draft currently in the input field.
#[must_use]
pub fn assess_input(draft: &str) -> InputFeedback {
    let length = text_length(draft);
    let trimmed_length = text_length(draft.trim());

    let counter = if length > DANGER_THRESHOLD {
        CounterLevel::Danger
    } else if length > WARNING_THRESHOLD {
        CounterLevel::Warning
    } else {
        CounterLevel::Normal
    };

    let (level, message) = if length == 0 {
        (InputLevel::Empty, None)
    } else if trimmed_length == 0 {
        (
            InputLevel::Invalid,
            Some("Todo cannot be empty or only whitespace".to_string()),
        )
    } else if trimmed_length > MAX_TEXT_LENGTH {
        (
            InputLevel::Invalid,
            Some(format!(
                "Todo cannot exceed {MAX_TEXT_LENGTH} characters (currently {trimmed_length})"
            )),
        )
    } else if length > WARNING_THRESHOLD {
        (
            InputLevel::Warning,
            Some(format!(
                "Approaching character limit ({length}/{MAX_TEXT_LENGTH})"
            )),
        )
    } else {
        (InputLevel::Valid, None)
    };

    InputFeedback {
        length,
        level,
        counter,
        message,
    }
}
