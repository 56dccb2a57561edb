//! Domain module for todo management.
//!
//! This module contains the todo model, its value objects, and the
//! text validator shared by the server and the client controller.

pub mod todo;
pub mod validation;

pub use todo::{Timestamp, Todo, TodoId};
pub use validation::{
    LengthDetails, MAX_TEXT_LENGTH, ValidatedText, ValidationError, escape_html, text_length,
    validate_todo_text,
};
