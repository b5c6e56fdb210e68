//! Index document resolution.
//!
//! # Responsibilities
//! - Fetch the index document from its fixed location
//! - Pull every `http(s)://` token out of it
//! - Keep tokens carrying the host marker and a protocol marker
//! - Strip JSON punctuation trailing a kept token
//! - Cap the result, preserving document order

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::IndexConfig;
use crate::fetch::{FetchRequest, Fetcher};
use crate::pipeline::types::{CandidateUrl, PipelineError, PipelineResult};

/// A URL token ends at whitespace or a backslash.
static URL_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s\\]+").unwrap());

/// Characters left on a token by a surrounding JSON string or array.
const TRAILING_PUNCTUATION: [char; 2] = ['"', ','];

/// Select qualifying links from an index document, capped at `max_candidates`.
pub fn select_candidates(document: &str, config: &IndexConfig) -> Vec<CandidateUrl> {
    URL_TOKEN
        .find_iter(document)
        .map(|m| m.as_str())
        .filter(|url| is_candidate(url, config))
        .take(config.max_candidates)
        .map(|url| CandidateUrl::new(url.trim_end_matches(TRAILING_PUNCTUATION)))
        .collect()
}

fn is_candidate(url: &str, config: &IndexConfig) -> bool {
    url.contains(config.host_marker.as_str())
        && config
            .protocol_markers
            .iter()
            .any(|marker| !marker.is_empty() && url.contains(marker.as_str()))
}

/// Fetch the index document and select candidates from it.
///
/// A failed index fetch is fatal for the run. An index without qualifying
/// links yields an empty list.
pub async fn resolve_candidates<F: Fetcher>(
    fetcher: &F,
    config: &IndexConfig,
) -> PipelineResult<Vec<CandidateUrl>> {
    let document = fetcher
        .get(&config.url, &FetchRequest::plain())
        .await
        .map_err(PipelineError::IndexFetch)?;

    let candidates = select_candidates(&document, config);
    tracing::info!(
        index_url = %config.url,
        candidates = candidates.len(),
        "Resolved candidate sources"
    );
    Ok(candidates)
}
