//! Infrastructure module for storage.
//!
//! This module contains the repository trait for the todo collection, its
//! file and in-memory backends, and the factory selecting between them.

pub mod factory;
pub mod in_memory;
pub mod json_file;
pub mod repository;

pub use factory::{
    ConfigurationError, DEFAULT_TODOS_FILE, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryTodoRepository;
pub use json_file::JsonFileTodoRepository;
pub use repository::{RepositoryError, TodoRepository};
