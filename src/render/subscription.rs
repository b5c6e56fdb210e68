//! Subscription document assembly.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};

use crate::config::SubscriptionConfig;
use crate::pipeline::AggregateSet;
use crate::render::fallback::fallback_script;

/// A rendered subscription document.
#[derive(Debug, Clone)]
pub struct SubscriptionDocument {
    /// Full response body.
    pub body: String,
    /// Number of entry lines in the body.
    pub entry_count: usize,
    /// Timestamp embedded in the fallback page.
    pub rendered_at: DateTime<Utc>,
}

/// Metadata preamble understood by proxy clients, ending with a blank line.
pub fn metadata(config: &SubscriptionConfig, index_url: &str) -> String {
    let title = STANDARD.encode(config.title.as_bytes());
    let link = config.config_link.as_deref().unwrap_or(index_url);
    format!(
        "#profile-title: base64:{}\n\
         #profile-update-interval:{}\n\
         #subscription-userinfo: upload=0; download=0; total={}; expire={}\n\
         #hiddify-config: {}\n\n",
        title, config.update_interval, config.total_bytes, config.expire, link
    )
}

/// Render `entries` at the current time.
pub fn render(
    entries: &AggregateSet,
    config: &SubscriptionConfig,
    index_url: &str,
) -> SubscriptionDocument {
    render_at(entries, config, index_url, Utc::now())
}

/// Render `entries` with an explicit timestamp; otherwise pure.
pub fn render_at(
    entries: &AggregateSet,
    config: &SubscriptionConfig,
    index_url: &str,
    rendered_at: DateTime<Utc>,
) -> SubscriptionDocument {
    let lines: Vec<&str> = entries.iter().map(|e| e.as_str()).collect();

    let mut body = metadata(config, index_url);
    body.push_str(&lines.join("\n"));
    body.push_str(&fallback_script(config, entries.len(), rendered_at));

    SubscriptionDocument {
        body,
        entry_count: entries.len(),
        rendered_at,
    }
}
