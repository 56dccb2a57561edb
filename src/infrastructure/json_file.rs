//! JSON file repository.
//!
//! The whole collection lives in a single pretty-printed JSON array. Saves
//! go through a temp file in the same directory that is synced and then
//! renamed over the target, so readers never observe a partial write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::Todo;
use crate::infrastructure::{RepositoryError, TodoRepository};

/// File-backed [`TodoRepository`].
#[derive(Debug, Clone)]
pub struct JsonFileTodoRepository {
    path: PathBuf,
}

impl JsonFileTodoRepository {
    /// Creates a repository backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Todo>, RepositoryError> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, todos: &[Todo]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(todos)?;

        if let Some(directory) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(directory).await?;
        }

        let temp_path = self.temp_path();
        let result = async {
            write_synced(&temp_path, json.as_bytes()).await?;
            fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(error) = result {
            if let Err(cleanup_error) = fs::remove_file(&temp_path).await {
                tracing::warn!(
                    path = %temp_path.display(),
                    error = %cleanup_error,
                    "Failed to remove temp file"
                );
            }
            return Err(error.into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self.path.file_name().map_or_else(
            || "todos.json".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
    }
}

async fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

impl TodoRepository for JsonFileTodoRepository {
    fn load_all(&self) -> BoxFuture<'_, Result<Vec<Todo>, RepositoryError>> {
        self.read().boxed()
    }

    fn save_all<'a>(&'a self, todos: &'a [Todo]) -> BoxFuture<'a, Result<(), RepositoryError>> {
        self.write(todos).boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
