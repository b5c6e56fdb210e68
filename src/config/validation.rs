//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs and addresses parse
//! - Validate value ranges (caps > 0, non-empty labels and markers)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AggregatorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AggregatorConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid URL in {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("invalid socket address in {field}: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} must not contain '{ch}'")]
    Contains { field: &'static str, ch: char },
}

/// Check every semantic constraint, collecting all failures.
pub fn validate_config(config: &AggregatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !is_http_url(&config.index.url) {
        errors.push(ValidationError::InvalidUrl {
            field: "index.url",
            value: config.index.url.clone(),
        });
    }
    if config.index.host_marker.is_empty() {
        errors.push(ValidationError::Empty("index.host_marker"));
    }
    if config.index.protocol_markers.iter().all(|m| m.is_empty()) {
        errors.push(ValidationError::Empty("index.protocol_markers"));
    }
    if config.index.max_candidates == 0 {
        errors.push(ValidationError::Zero("index.max_candidates"));
    }

    if config.fetch.max_concurrency == Some(0) {
        errors.push(ValidationError::Zero("fetch.max_concurrency"));
    }

    if config.branding.label.trim().is_empty() {
        errors.push(ValidationError::Empty("branding.label"));
    }
    if config.branding.label.contains('#') {
        errors.push(ValidationError::Contains {
            field: "branding.label",
            ch: '#',
        });
    }

    if let Some(link) = &config.subscription.config_link {
        if !is_http_url(link) {
            errors.push(ValidationError::InvalidUrl {
                field: "subscription.config_link",
                value: link.clone(),
            });
        }
    }
    if config.subscription.redirect_scheme.is_empty() {
        errors.push(ValidationError::Empty("subscription.redirect_scheme"));
    }
    if config.subscription.max_entries == Some(0) {
        errors.push(ValidationError::Zero("subscription.max_entries"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
