//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Resolve the log filter from `RUST_LOG`, else the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Default directives when `RUST_LOG` is unset.
pub fn default_directives(config: &ObservabilityConfig) -> String {
    format!(
        "sub_aggregator={level},tower_http={level}",
        level = config.log_level
    )
}

/// Install the global subscriber. Call once, from a binary's `main`.
pub fn init(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
