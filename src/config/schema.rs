//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the aggregator.
//! All types derive Serde traits for deserialization from config files, and
//! every default reproduces the published subscription constants.

use serde::{Deserialize, Serialize};

/// Root configuration for the aggregator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Index document location and candidate filtering.
    pub index: IndexConfig,

    /// Outbound source fetch settings.
    pub fetch: FetchConfig,

    /// Label rewriting applied to every extracted entry.
    pub branding: BrandingConfig,

    /// Subscription document metadata and fallback page.
    pub subscription: SubscriptionConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Where the index document lives and which of its links qualify.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Fixed location of the index document.
    pub url: String,

    /// Substring a link must contain to count as hosted on a known platform.
    pub host_marker: String,

    /// A link must contain at least one of these.
    pub protocol_markers: Vec<String>,

    /// Maximum number of candidates kept, in document order.
    pub max_candidates: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: "https://raw.githubusercontent.com/Shervinuri/SUBscripSHEN/refs/heads/main/SUBscripSHEN.json"
                .to_string(),
            host_marker: "github".to_string(),
            protocol_markers: vec!["vless".to_string(), "v2ray".to_string()],
            max_candidates: 10,
        }
    }
}

/// Outbound fetch settings for candidate sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent sent with every source fetch.
    pub user_agent: String,

    /// Advisory edge cache lifetime in seconds, sent as a request hint.
    pub cache_ttl_secs: u64,

    /// Upper bound on in-flight source fetches. `None` keeps all in flight.
    pub max_concurrency: Option<usize>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            cache_ttl_secs: 3600,
            max_concurrency: None,
        }
    }
}

/// Branding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandingConfig {
    /// Label appended after `#` to every entry.
    pub label: String,

    /// Replace the label's flag with one derived from the entry host.
    pub geo_flags: bool,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            label: "SHΞN™ 🏳️".to_string(),
            geo_flags: false,
        }
    }
}

impl BrandingConfig {
    /// Label text before the flag, used when `geo_flags` is on.
    pub fn prefix(&self) -> &str {
        match self.label.rsplit_once(' ') {
            Some((prefix, _)) => prefix,
            None => &self.label,
        }
    }
}

/// Subscription document metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Display title, emitted base64-encoded.
    pub title: String,

    /// Update interval in hours.
    pub update_interval: u32,

    /// Advertised quota in bytes.
    pub total_bytes: u64,

    /// Advertised expiry (unix seconds).
    pub expire: i64,

    /// Reference link in `#hiddify-config`. Defaults to the index location.
    pub config_link: Option<String>,

    /// Deep-link scheme the fallback page redirects to.
    pub redirect_scheme: String,

    /// Fragment appended to the import deep-link.
    pub import_fragment: String,

    /// Client named on the status page while the redirect is pending.
    pub client_name: String,

    /// Delay before the fallback redirect fires.
    pub redirect_delay_ms: u64,

    /// User-agent substrings identifying proxy client software.
    pub client_agents: Vec<String>,

    /// Heading shown on the browser status page.
    pub page_heading: String,

    /// Cap on emitted entries after deduplication.
    pub max_entries: Option<usize>,

    /// `Cache-Control: max-age` on the served document.
    pub cache_max_age_secs: u64,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            title: "SHΞN™ Subscription".to_string(),
            update_interval: 1,
            total_bytes: 10_737_418_240,
            expire: 1_735_689_600,
            config_link: None,
            redirect_scheme: "hiddify://".to_string(),
            import_fragment: "#SHEN".to_string(),
            client_name: "Hiddify".to_string(),
            redirect_delay_ms: 3000,
            client_agents: vec!["v2ray".to_string(), "clash".to_string()],
            page_heading: "SHΞN™ V2Ray Subscription".to_string(),
            max_entries: None,
            cache_max_age_secs: 3600,
        }
    }
}

/// Timeout configuration for the inbound request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
