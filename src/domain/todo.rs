//! Todo domain model.
//!
//! A [`Todo`] is the only entity of the system. Its JSON form is shared by
//! the storage file and the HTTP API, so the field names are camelCase.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Opaque identifier of a todo.
///
/// Newly created todos get a time-ordered UUID (v7) rendered as a string.
/// Identifiers read back from storage may have any string shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh identifier from a time-ordered UUID (v7).
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    #[must_use]
    pub fn generate_v7() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Creation instant of a todo.
///
/// Serialized as ISO 8601 in UTC with millisecond precision and a `Z`
/// suffix, e.g. `2024-01-01T12:30:00.000Z`. Any RFC 3339 string is
/// accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Parses an RFC 3339 timestamp, normalizing it to UTC.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `value` is not RFC 3339.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|datetime| Self(datetime.with_timezone(&Utc)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Todo
// =============================================================================

/// A single task record.
///
/// `text` is stored already HTML-escaped; it is never unescaped on read.
/// Only `completed` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
}

impl Todo {
    /// Creates a new, not yet completed todo.
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    /// Returns a copy with the given completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Returns `true` while the todo is not completed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.completed
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn fixed_timestamp() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap())
    }

    #[rstest]
    fn generated_ids_are_unique() {
        let first = TodoId::generate_v7();
        let second = TodoId::generate_v7();

        assert_ne!(first, second);
    }

    #[rstest]
    fn timestamp_displays_with_milliseconds_and_z_suffix() {
        assert_eq!(fixed_timestamp().to_string(), "2024-01-01T12:30:00.000Z");
    }

    #[rstest]
    #[case("2024-01-01T12:30:00.000Z")]
    #[case("2024-01-01T12:30:00Z")]
    #[case("2024-01-01T13:30:00+01:00")]
    fn timestamp_parses_rfc3339_into_utc(#[case] input: &str) {
        let timestamp = Timestamp::parse(input).unwrap();

        assert_eq!(timestamp, fixed_timestamp());
    }

    #[rstest]
    fn timestamp_rejects_non_rfc3339() {
        assert!(Timestamp::parse("yesterday").is_err());
    }

    #[rstest]
    fn new_todo_is_active() {
        let todo = Todo::new(TodoId::new("1"), "Buy milk", fixed_timestamp());

        assert!(!todo.completed);
        assert!(todo.is_active());
        assert!(!todo.with_completed(true).is_active());
    }

    #[rstest]
    fn todo_serializes_with_camel_case_fields() {
        let todo = Todo::new(TodoId::new("42"), "Buy milk", fixed_timestamp());

        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "text": "Buy milk",
                "completed": false,
                "createdAt": "2024-01-01T12:30:00.000Z"
            })
        );
    }

    #[rstest]
    fn todo_deserializes_from_stored_shape() {
        let json = r#"{"id":"1","text":"Walk dog","completed":true,"createdAt":"2024-01-01T12:30:00.000Z"}"#;

        let todo: Todo = serde_json::from_str(json).unwrap();

        assert_eq!(todo.id.as_str(), "1");
        assert!(todo.completed);
        assert_eq!(todo.created_at, fixed_timestamp());
    }
}
