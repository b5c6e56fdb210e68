//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the HTTP server and its fetch client
//! - Bind the listener and serve until a stop signal

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AggregatorConfig;
use crate::fetch::FetchError;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Errors that stop the service from starting or serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start every subsystem and serve until shutdown.
pub async fn run(config: AggregatorConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server
        .run(listener, stop)
        .await
        .map_err(StartupError::Serve)
}
