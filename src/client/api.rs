//! Remote access to the todo API.
//!
//! [`TodoApi`] is the seam between the controller and the network. The
//! production implementation, [`HttpTodoApi`], talks JSON over HTTP with
//! reqwest; tests substitute an in-process fake.

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::domain::{Todo, TodoId, ValidationError};

// =============================================================================
// Client Error
// =============================================================================

/// Errors surfaced by client operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The base URL cannot address API paths.
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("Failed to connect to server: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Server responded with {status}")]
    Server {
        status: u16,
        /// The `error` field of the response body, when present.
        message: Option<String>,
        /// The `code` field of the response body, when present.
        code: Option<String>,
    },

    /// A success response carried an unexpected body.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The draft was rejected locally and never sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The id is not present in the local mirror.
    #[error("Todo not found: {0}")]
    UnknownTodo(TodoId),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

// =============================================================================
// Todo Api
// =============================================================================

/// Operations the controller needs from the server.
pub trait TodoApi: Send + Sync {
    /// Fetches the full collection.
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, ClientError>>;

    /// Creates a todo from `text` and returns the stored record.
    fn create<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Todo, ClientError>>;

    /// Sets the completion state of `id` and returns the updated record.
    fn set_completed<'a>(
        &'a self,
        id: &'a TodoId,
        completed: bool,
    ) -> BoxFuture<'a, Result<Todo, ClientError>>;

    /// Deletes `id`.
    fn delete<'a>(&'a self, id: &'a TodoId) -> BoxFuture<'a, Result<(), ClientError>>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    code: Option<String>,
}

/// [`TodoApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTodoApi {
    base_url: Url,
    http_client: Client,
}

impl HttpTodoApi {
    /// Creates a client for the server at `base_url`, e.g. `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is not an absolute
    /// URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|error| ClientError::InvalidUrl(error.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            http_client: Client::new(),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn collection_url(&self) -> Result<Url, ClientError> {
        self.url(&["api", "todos"])
    }

    fn todo_url(&self, id: &TodoId) -> Result<Url, ClientError> {
        self.url(&["api", "todos", id.as_str()])
    }
}

/// Fails with [`ClientError::Server`] unless `response` has status `expected`.
async fn expect_status(response: Response, expected: StatusCode) -> Result<Response, ClientError> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }
    let body = response.json::<ErrorBody>().await.ok();
    let (message, code) = body.map_or((None, None), |body| (body.error, body.code));
    Err(ClientError::Server {
        status: status.as_u16(),
        message,
        code,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response
        .json::<T>()
        .await
        .map_err(|error| ClientError::Decode(error.to_string()))
}

impl TodoApi for HttpTodoApi {
    fn list(&self) -> BoxFuture<'_, Result<Vec<Todo>, ClientError>> {
        async move {
            let response = self.http_client.get(self.collection_url()?).send().await?;
            let response = expect_status(response, StatusCode::OK).await?;
            decode(response).await
        }
        .boxed()
    }

    fn create<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Todo, ClientError>> {
        async move {
            let response = self
                .http_client
                .post(self.collection_url()?)
                .json(&json!({ "text": text }))
                .send()
                .await?;
            let response = expect_status(response, StatusCode::CREATED).await?;
            decode(response).await
        }
        .boxed()
    }

    fn set_completed<'a>(
        &'a self,
        id: &'a TodoId,
        completed: bool,
    ) -> BoxFuture<'a, Result<Todo, ClientError>> {
        async move {
            let response = self
                .http_client
                .put(self.todo_url(id)?)
                .json(&json!({ "completed": completed }))
                .send()
                .await?;
            let response = expect_status(response, StatusCode::OK).await?;
            decode(response).await
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a TodoId) -> BoxFuture<'a, Result<(), ClientError>> {
        async move {
            let response = self.http_client.delete(self.todo_url(id)?).send().await?;
            expect_status(response, StatusCode::NO_CONTENT).await?;
            Ok(())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000")]
    #[case("http://localhost:3000/")]
    fn collection_url_ignores_trailing_slash(#[case] base: &str) {
        let api = HttpTodoApi::new(base).unwrap();

        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "http://localhost:3000/api/todos"
        );
    }

    #[rstest]
    fn todo_url_encodes_id_as_single_segment() {
        let api = HttpTodoApi::new("http://localhost:3000").unwrap();

        let url = api.todo_url(&TodoId::new("a/b c")).unwrap();

        assert_eq!(url.as_str(), "http://localhost:3000/api/todos/a%2Fb%20c");
    }

    #[rstest]
    fn base_path_is_preserved() {
        let api = HttpTodoApi::new("http://localhost:3000/app/").unwrap();

        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "http://localhost:3000/app/api/todos"
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:someone@example.com")]
    fn invalid_base_urls_are_rejected(#[case] base: &str) {
        assert!(matches!(
            HttpTodoApi::new(base),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
