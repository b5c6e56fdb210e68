//! Proxy URI extraction and branding.
//!
//! # Responsibilities
//! - Find every `vless://` URI in normalized text
//! - Drop any existing `#label` fragment
//! - Append the brand label
//!
//! # Design Decisions
//! - A URI runs from the scheme to the next whitespace; its internals are not validated
//! - Zero matches is a normal outcome, not an error

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::BrandingConfig;
use crate::pipeline::geo;
use crate::pipeline::types::BrandedEntry;

static PROXY_URI: Lazy<Regex> = Lazy::new(|| Regex::new(r"vless://\S+").unwrap());

/// Rewrites entry labels according to the branding configuration.
#[derive(Debug, Clone)]
pub struct Brander {
    label: String,
    flag_prefix: Option<String>,
}

impl Brander {
    pub fn new(config: &BrandingConfig) -> Self {
        Self {
            label: config.label.clone(),
            flag_prefix: config.geo_flags.then(|| config.prefix().to_string()),
        }
    }

    /// Replace the fragment of `uri` with the brand label.
    pub fn brand(&self, uri: &str) -> BrandedEntry {
        let body = uri.split('#').next().unwrap_or(uri);
        match &self.flag_prefix {
            None => BrandedEntry::from_parts(body, &self.label),
            Some(prefix) => {
                let flag = geo::host_of(body).map_or(geo::UNKNOWN_FLAG, geo::flag_for_host);
                BrandedEntry::from_parts(body, &format!("{} {}", prefix, flag))
            }
        }
    }
}

/// Extract and brand every proxy URI in `text`, in order of appearance.
pub fn extract(text: &str, brander: &Brander) -> Vec<BrandedEntry> {
    PROXY_URI
        .find_iter(text)
        .map(|m| brander.brand(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brander() -> Brander {
        Brander::new(&BrandingConfig::default())
    }

    fn strings(entries: Vec<BrandedEntry>) -> Vec<String> {
        entries.into_iter().map(BrandedEntry::into_string).collect()
    }

    #[test]
    fn test_label_is_replaced_or_added() {
        let text = "vless://abc@host:443#foo\nvless://abc@host:443";
        let entries = strings(extract(text, &brander()));
        assert_eq!(
            entries,
            vec!["vless://abc@host:443#SHΞN™ 🏳️", "vless://abc@host:443#SHΞN™ 🏳️"]
        );
    }

    #[test]
    fn test_only_first_fragment_delimiter_counts() {
        let entries = strings(extract("vless://a@h:1?x=1#old#older", &brander()));
        assert_eq!(entries, vec!["vless://a@h:1?x=1#SHΞN™ 🏳️"]);
    }

    #[test]
    fn test_uris_stop_at_whitespace_and_ignore_other_schemes() {
        let text = "junk vless://one@h:1#a\tvmess://xyz trojan://t@h:2 vless://two@h:2\r\nend";
        let entries = strings(extract(text, &brander()));
        assert_eq!(
            entries,
            vec!["vless://one@h:1#SHΞN™ 🏳️", "vless://two@h:2#SHΞN™ 🏳️"]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(extract("no proxies here", &brander()).is_empty());
        assert!(extract("", &brander()).is_empty());
    }

    #[test]
    fn test_geo_flag_labels() {
        let brander = Brander::new(&BrandingConfig {
            geo_flags: true,
            ..BrandingConfig::default()
        });
        let entries = strings(extract(
            "vless://a@104.1.1.1:443#x vless://b@srv.example.de:443 vless://c@host:443",
            &brander,
        ));
        assert_eq!(
            entries,
            vec![
                "vless://a@104.1.1.1:443#SHΞN™ 🇺🇸",
                "vless://b@srv.example.de:443#SHΞN™ 🇩🇪",
                "vless://c@host:443#SHΞN™ 🏳️",
            ]
        );
    }
}
