//! Todo text validation and sanitization.
//!
//! [`validate_todo_text`] is a pure function shared by the HTTP layer and
//! the client controller. `None` stands for input that is absent or not a
//! string at the boundary.

use serde::Serialize;
use thiserror::Error;

/// Maximum length of the trimmed text, in characters.
pub const MAX_TEXT_LENGTH: usize = 500;

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons a todo text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is absent or not a string.
    #[error("Todo text is required")]
    InvalidInput,

    /// The trimmed text is empty.
    #[error("Todo text cannot be empty or only whitespace")]
    EmptyText,

    /// The trimmed text is longer than [`MAX_TEXT_LENGTH`].
    #[error("Todo text cannot exceed {max_length} characters")]
    TextTooLong {
        max_length: usize,
        current_length: usize,
    },
}

/// Machine-readable details attached to a length violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthDetails {
    pub max_length: usize,
    pub current_length: usize,
}

impl ValidationError {
    /// Returns the wire error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::EmptyText => "EMPTY_TEXT",
            Self::TextTooLong { .. } => "TEXT_TOO_LONG",
        }
    }

    /// Returns length details for `TEXT_TOO_LONG`, `None` otherwise.
    #[must_use]
    pub const fn details(&self) -> Option<LengthDetails> {
        match *self {
            Self::TextTooLong {
                max_length,
                current_length,
            } => Some(LengthDetails {
                max_length,
                current_length,
            }),
            Self::InvalidInput | Self::EmptyText => None,
        }
    }
}

// =============================================================================
// Validated Text
// =============================================================================

/// Text that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedText {
    /// Trimmed, HTML-escaped text ready to be stored.
    pub sanitized: String,
    /// Length of the trimmed text before escaping, in UTF-16 code units.
    pub length: usize,
}

impl ValidatedText {
    /// Returns `true` if escaping altered the trimmed input.
    #[must_use]
    pub fn was_escaped(&self) -> bool {
        text_length(&self.sanitized) != self.length
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates and sanitizes raw todo text.
///
/// # Errors
///
/// - [`ValidationError::InvalidInput`] when `raw` is `None`
/// - [`ValidationError::EmptyText`] when the trimmed text is empty
/// - [`ValidationError::TextTooLong`] when the trimmed text exceeds
///   [`MAX_TEXT_LENGTH`] characters
pub fn validate_todo_text(raw: Option<&str>) -> Result<ValidatedText, ValidationError> {
    let trimmed = raw.ok_or(ValidationError::InvalidInput)?.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }

    let length = text_length(trimmed);
    if length > MAX_TEXT_LENGTH {
        return Err(ValidationError::TextTooLong {
            max_length: MAX_TEXT_LENGTH,
            current_length: length,
        });
    }

    Ok(ValidatedText {
        sanitized: escape_html(trimmed),
        length,
    })
}

/// Returns the length of `text` in UTF-16 code units.
///
/// This is the unit browsers report for input values, so a character
/// outside the Basic Multilingual Plane counts twice.
#[must_use]
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Escapes `& < > " '` to their HTML entities.
///
/// Ampersands are replaced first so entities produced by the later
/// substitutions are not escaped twice.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// =============================================================================
// Tests
// =============================================================================
