//! Pipeline value types and error definitions.

use std::fmt;

use thiserror::Error;

use crate::fetch::FetchError;

/// A source link selected from the index document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateUrl(String);

impl CandidateUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A proxy URI whose label has been replaced by the brand label.
///
/// Only [`Brander`](crate::pipeline::extract::Brander) constructs these, so every
/// value carries exactly one `#` followed by a non-empty label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrandedEntry(String);

impl BrandedEntry {
    pub(crate) fn from_parts(body: &str, label: &str) -> Self {
        Self(format!("{}#{}", body, label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BrandedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that abort a whole aggregation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The index document could not be retrieved.
    #[error("index fetch failed: {0}")]
    IndexFetch(#[source] FetchError),
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
