//! Concurrent source fetching.
//!
//! # Responsibilities
//! - Fetch every candidate concurrently
//! - Convert each per-source failure into an empty document
//! - Return documents aligned with candidate order
//!
//! # Design Decisions
//! - Every task resolves to a document, so the join itself cannot fail
//! - Ordering comes from `buffered`, never from completion time
//! - No retry: a failed source is logged and skipped

use futures_util::stream::{self, StreamExt};

use crate::config::FetchConfig;
use crate::fetch::{FetchRequest, Fetcher};
use crate::observability::metrics;
use crate::pipeline::types::CandidateUrl;

/// Fetch all candidates; element `i` is the body of `candidates[i]` or empty.
pub async fn fetch_all<F: Fetcher>(
    fetcher: &F,
    candidates: &[CandidateUrl],
    config: &FetchConfig,
) -> Vec<String> {
    let request = FetchRequest::source(config);
    let limit = config
        .max_concurrency
        .unwrap_or(candidates.len())
        .max(1);

    let tasks: Vec<_> = candidates
        .iter()
        .map(|candidate| fetch_one(fetcher, candidate, &request))
        .collect();

    stream::iter(tasks).buffered(limit).collect().await
}

async fn fetch_one<F: Fetcher>(
    fetcher: &F,
    candidate: &CandidateUrl,
    request: &FetchRequest,
) -> String {
    match fetcher.get(candidate.as_str(), request).await {
        Ok(body) => {
            tracing::debug!(url = %candidate, bytes = body.len(), "Fetched source");
            metrics::record_source_fetch(true);
            body
        }
        Err(e) => {
            tracing::warn!(url = %candidate, error = %e, "Source fetch failed, skipping");
            metrics::record_source_fetch(false);
            String::new()
        }
    }
}
