//! Outbound fetch capability.
//!
//! # Data Flow
//! ```text
//! pipeline (index resolver, source fan-out)
//!     → Fetcher::get(url, FetchRequest)
//!     → client.rs (reqwest, identifying headers, cache hint)
//!     → body text | FetchError
//! ```
//!
//! # Design Decisions
//! - The pipeline only sees the `Fetcher` trait, never reqwest directly
//! - Non-success statuses are errors; callers decide whether they are fatal
//! - No timeout or retry here; the host's transport defaults apply

mod client;

use std::future::Future;

use thiserror::Error;

pub use client::HttpFetcher;

use crate::config::FetchConfig;

/// Errors from a single outbound GET.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Per-request hints attached to an outbound GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    /// Identifying `User-Agent` header.
    pub user_agent: Option<String>,
    /// Advisory cache lifetime, sent as `Cache-Control: max-age`.
    pub cache_ttl_secs: Option<u64>,
}

impl FetchRequest {
    /// Plain GET, used for the index document.
    pub fn plain() -> Self {
        Self::default()
    }

    /// GET carrying the source identification and cache hint.
    pub fn source(config: &FetchConfig) -> Self {
        Self {
            user_agent: Some(config.user_agent.clone()),
            cache_ttl_secs: Some(config.cache_ttl_secs),
        }
    }
}

/// Performs HTTP GET and returns the body as text.
pub trait Fetcher: Send + Sync {
    fn get(
        &self,
        url: &str,
        request: &FetchRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher for pipeline and router tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned bodies by URL; unknown URLs fail like a 404.
    #[derive(Default)]
    pub struct StaticFetcher {
        bodies: HashMap<String, Result<String, u16>>,
        pub calls: Mutex<Vec<(String, FetchRequest)>>,
    }

    impl StaticFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.bodies.insert(url.into(), Ok(body.into()));
            self
        }

        pub fn failing(mut self, url: impl Into<String>, status: u16) -> Self {
            self.bodies.insert(url.into(), Err(status));
            self
        }
    }

    impl Fetcher for StaticFetcher {
        async fn get(&self, url: &str, request: &FetchRequest) -> Result<String, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), request.clone()));
            match self.bodies.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
