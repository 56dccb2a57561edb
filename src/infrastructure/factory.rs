//! Repository factory for runtime backend selection.
//!
//! This module picks the todo storage backend from environment
//! configuration. It supports the JSON file store used in production and an
//! in-memory store for tests and throwaway runs.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `file` (default) | `in_memory`
//! - `TODOS_FILE`: path of the JSON file (default: `todos.json`)
//!
//! # Example
//!
//! ```ignore
//! use todo_service::infrastructure::{RepositoryConfig, RepositoryFactory};
//!
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create();
//! let todos = repository.load_all().await?;
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{InMemoryTodoRepository, JsonFileTodoRepository, TodoRepository};

/// Default location of the todo file, relative to the working directory.
pub const DEFAULT_TODOS_FILE: &str = "todos.json";

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for the todo collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Single pretty-printed JSON file on disk.
    #[default]
    File,
    /// Process-local memory; nothing survives a restart.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "file" | "json" | "json_file" => Ok(Self::File),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Selected storage backend.
    pub storage_mode: StorageMode,
    /// JSON file path, used when `storage_mode` is `File`.
    pub todos_file: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            todos_file: PathBuf::from(DEFAULT_TODOS_FILE),
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if `STORAGE_MODE`
    /// holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if `STORAGE_MODE`
    /// holds an unknown value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage_mode = match read("STORAGE_MODE") {
            Some(value) => value.parse()?,
            None => StorageMode::default(),
        };

        let todos_file = read("TODOS_FILE").map_or_else(
            || PathBuf::from(DEFAULT_TODOS_FILE),
            PathBuf::from,
        );

        Ok(Self {
            storage_mode,
            todos_file,
        })
    }
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .storage_mode(StorageMode::File)
///     .todos_file("/tmp/todos.test.json")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    todos_file: Option<PathBuf>,
}

impl RepositoryConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Sets the JSON file path.
    #[must_use]
    pub fn todos_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.todos_file = Some(path.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> RepositoryConfig {
        RepositoryConfig {
            storage_mode: self.storage_mode,
            todos_file: self
                .todos_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TODOS_FILE)),
        }
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during factory configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'file' or 'in_memory'")]
    InvalidStorageMode(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory for creating the configured repository.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new repository factory with the given configuration.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this factory was built with.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Creates the repository selected by the configuration.
    #[must_use]
    pub fn create(&self) -> Arc<dyn TodoRepository + Send + Sync> {
        match self.config.storage_mode {
            StorageMode::File => {
                tracing::info!(path = %self.config.todos_file.display(), "Using JSON file storage");
                Arc::new(JsonFileTodoRepository::new(&self.config.todos_file))
            }
            StorageMode::InMemory => {
                tracing::info!("Using in-memory storage");
                Arc::new(InMemoryTodoRepository::new())
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::{Timestamp, Todo, TodoId};
    use rstest::rstest;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let variables: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| variables.get(key).cloned()
    }

    #[rstest]
    #[case("file", StorageMode::File)]
    #[case("JSON", StorageMode::File)]
    #[case("json_file", StorageMode::File)]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("inmemory", StorageMode::InMemory)]
    #[case("MEMORY", StorageMode::InMemory)]
    fn test_storage_mode_from_str_valid(#[case] input: &str, #[case] expected: StorageMode) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(result.unwrap(), expected);
    }

    #[rstest]
    #[case("postgres")]
    #[case("sqlite")]
    fn test_storage_mode_from_str_invalid(#[case] input: &str) {
        let result: Result<StorageMode, _> = input.parse();
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::InvalidStorageMode(input.to_string())
        );
    }

    #[rstest]
    fn test_repository_config_default() {
        let config = RepositoryConfig::default();
        assert_eq!(config.storage_mode, StorageMode::File);
        assert_eq!(config.todos_file, PathBuf::from("todos.json"));
    }

    #[rstest]
    fn test_from_lookup_without_variables_uses_defaults() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RepositoryConfig::default());
    }

    #[rstest]
    fn test_from_lookup_reads_file_override() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "file"),
            ("TODOS_FILE", "/tmp/todos.test.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_mode, StorageMode::File);
        assert_eq!(config.todos_file, PathBuf::from("/tmp/todos.test.json"));
    }

    #[rstest]
    fn test_from_lookup_treats_blank_values_as_unset() {
        let config = RepositoryConfig::from_lookup(lookup_from(&[
            ("STORAGE_MODE", "  "),
            ("TODOS_FILE", ""),
        ]))
        .unwrap();

        assert_eq!(config, RepositoryConfig::default());
    }

    #[rstest]
    fn test_from_lookup_rejects_unknown_mode() {
        let result = RepositoryConfig::from_lookup(lookup_from(&[("STORAGE_MODE", "redis")]));
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidStorageMode(_))
        ));
    }

    #[rstest]
    fn test_builder_sets_fields() {
        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::InMemory)
            .todos_file("data/todos.json")
            .build();

        assert_eq!(config.storage_mode, StorageMode::InMemory);
        assert_eq!(config.todos_file, PathBuf::from("data/todos.json"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_in_memory_repository() {
        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::InMemory)
            .build();
        let repository = RepositoryFactory::new(config).create();

        let todos = vec![Todo::new(TodoId::new("1"), "Buy milk", Timestamp::now())];
        repository.save_all(&todos).await.unwrap();

        assert_eq!(repository.load_all().await.unwrap(), todos);
    }

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_file_repository_at_configured_path() {
        let directory = tempfile::TempDir::new().unwrap();
        let path = directory.path().join("todos.json");
        let config = RepositoryConfig::builder().todos_file(&path).build();
        let repository = RepositoryFactory::new(config).create();

        repository.save_all(&[]).await.unwrap();

        assert!(path.exists());
    }
}
