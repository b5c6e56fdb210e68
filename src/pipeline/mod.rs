//! Aggregation pipeline.
//!
//! # Data Flow
//! ```text
//! index.rs     fetch index document → CandidateUrl list (capped)
//!     → fanout.rs   concurrent source fetches, failures become empty bodies
//!     → normalize.rs base64 or raw → plain text
//!     → extract.rs  vless:// URIs → BrandedEntry (label replaced)
//!     → dedupe.rs   AggregateSet (unique, first-seen order)
//!     → render      SubscriptionDocument
//! ```
//!
//! # Design Decisions
//! - Only the index fetch can fail a run; every source failure is absorbed
//! - Output order follows candidate order, never fetch completion order
//! - No state survives between runs

pub mod dedupe;
pub mod extract;
pub mod fanout;
pub mod geo;
pub mod index;
pub mod normalize;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

pub use dedupe::{aggregate, AggregateSet};
pub use extract::{extract, Brander};
pub use fanout::fetch_all;
pub use index::{resolve_candidates, select_candidates};
pub use normalize::{normalize, Normalized};
pub use types::{BrandedEntry, CandidateUrl, PipelineError, PipelineResult};

use crate::config::AggregatorConfig;
use crate::fetch::Fetcher;
use crate::observability::metrics;
use crate::render::{self, SubscriptionDocument};

/// Runs the fetch → normalize → extract → dedupe → render pipeline.
pub struct Aggregator<F> {
    fetcher: F,
    config: Arc<AggregatorConfig>,
    brander: Brander,
}

impl<F: Fetcher> Aggregator<F> {
    pub fn new(fetcher: F, config: Arc<AggregatorConfig>) -> Self {
        let brander = Brander::new(&config.branding);
        Self {
            fetcher,
            config,
            brander,
        }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Resolve the candidate sources from the index document.
    pub async fn candidates(&self) -> PipelineResult<Vec<CandidateUrl>> {
        resolve_candidates(&self.fetcher, &self.config.index).await
    }

    /// Collect the deduplicated entries from every candidate source.
    pub async fn collect(&self) -> PipelineResult<AggregateSet> {
        let candidates = self.candidates().await?;
        let documents = fetch_all(&self.fetcher, &candidates, &self.config.fetch).await;

        let per_source = candidates.iter().zip(documents).map(|(candidate, raw)| {
            let normalized = normalize(&raw);
            let entries = extract(normalized.text(), &self.brander);
            tracing::debug!(
                url = %candidate,
                decoded = normalized.is_decoded(),
                entries = entries.len(),
                "Extracted source entries"
            );
            entries
        });

        let mut set = aggregate(per_source);
        if let Some(max) = self.config.subscription.max_entries {
            set.truncate(max);
        }
        Ok(set)
    }

    /// Run the whole pipeline and render the subscription document.
    pub async fn build_document(&self) -> PipelineResult<SubscriptionDocument> {
        let start = Instant::now();
        let set = self.collect().await?;
        let document = render::render(&set, &self.config.subscription, &self.config.index.url);

        metrics::record_pipeline(document.entry_count, start);
        tracing::info!(
            entries = document.entry_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Subscription rendered"
        );
        Ok(document)
    }
}
