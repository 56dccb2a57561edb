//! Todo API server.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `file` (default) | `in_memory`
//! - `TODOS_FILE`: Path of the JSON document (default: `todos.json`)
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_service=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `3000`)
//!
//! Variables may also be placed in a `.env` file in the working directory.

use todo_service::api::{AppState, create_router};
use todo_service::infrastructure::{RepositoryConfig, RepositoryFactory};
use todo_service::server::{Server, ServerConfig};
use todo_service::service::TodoService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Todo service - Starting Server");

    let repository_config = RepositoryConfig::from_env()?;
    let repository = RepositoryFactory::new(repository_config).create();

    let state = AppState::new(TodoService::new(repository));
    let router = create_router(state);

    let server = Server::new(ServerConfig::from_env());
    server.run(router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_service=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .init();
}
