//! HTTP server bootstrap.
//!
//! Binds the listener, serves the router, and shuts down gracefully on
//! SIGINT or SIGTERM.

use std::env;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

// =============================================================================
// Configuration
// =============================================================================

/// Listener address configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `HOST` and `PORT` from the environment.
    ///
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `HOST` and `PORT` through an arbitrary lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let host = lookup("HOST")
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|port| port.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serves `router` until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, router: Router) -> anyhow::Result<()> {
        let address = self.config.socket_addr();

        let listener = TcpListener::bind(&address).await?;

        match listener.local_addr() {
            Ok(local) => tracing::info!("Server running on http://{}", local),
            Err(error) => tracing::warn!(%error, "Could not determine local address"),
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod server_config {
        use super::*;

        #[rstest]
        fn new_creates_config() {
            let config = ServerConfig::new("127.0.0.1", 8080);

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8080);
        }

        #[rstest]
        fn default_config() {
            let config = ServerConfig::default();

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 3000);
        }

        #[rstest]
        fn socket_addr_formats_correctly() {
            let config = ServerConfig::new("localhost", 3000);

            assert_eq!(config.socket_addr(), "localhost:3000");
        }

        #[rstest]
        fn from_lookup_reads_host_and_port() {
            let config = ServerConfig::from_lookup(|key| match key {
                "HOST" => Some("127.0.0.1".to_string()),
                "PORT" => Some("8081".to_string()),
                _ => None,
            });

            assert_eq!(config, ServerConfig::new("127.0.0.1", 8081));
        }

        #[rstest]
        #[case(Some("not-a-port"))]
        #[case(Some("70000"))]
        #[case(None)]
        fn from_lookup_falls_back_to_default_port(#[case] port: Option<&str>) {
            let config = ServerConfig::from_lookup(|key| match key {
                "PORT" => port.map(str::to_string),
                _ => None,
            });

            assert_eq!(config, ServerConfig::default());
        }
    }
}
