//! Proxy Subscription Aggregator
//!
//! Serves a single endpoint that builds a proxy-client subscription document
//! on every request.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ OPTIONS? ──▶ pre-flight (CORS only)
//!                          │
//!                          ▼
//!                  ┌──────────────────────────── pipeline ───────────────────────────┐
//!                  │ index resolver ──▶ concurrent source fetch (≤ cap, failures → ∅) │
//!                  │       ──▶ normalize (base64 | raw) ──▶ extract + brand           │
//!                  │       ──▶ order-stable dedupe ──▶ render                         │
//!                  └──────────────────────────────────────────────────────────────────┘
//!                          │
//!     Client Response      ▼
//!     ◀────────────── 200 document  |  500 fixed error   (CORS on both)
//! ```

use std::path::PathBuf;

use clap::Parser;

use sub_aggregator::config::load_or_default;
use sub_aggregator::lifecycle::startup;
use sub_aggregator::observability::logging;

#[derive(Parser)]
#[command(name = "sub-aggregator")]
#[command(about = "Serve an aggregated proxy subscription document", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "AGGREGATOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!("sub-aggregator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        index_url = %config.index.url,
        max_candidates = config.index.max_candidates,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
