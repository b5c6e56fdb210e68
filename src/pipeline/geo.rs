//! Host-derived country flags for entry labels.

use std::net::Ipv4Addr;

/// Flag used when nothing is known about the host.
pub const UNKNOWN_FLAG: &str = "🏳️";

/// Leading address octets mapped to a region flag.
const IP_PREFIXES: &[(&str, &str)] = &[
    ("1.1.1.", "🇺🇸"),
    ("8.8.8.", "🇺🇸"),
    ("104.", "🇺🇸"),
    ("172.", "🇺🇸"),
    ("185.", "🇪🇺"),
    ("46.", "🇪🇺"),
    ("78.", "🇪🇺"),
    ("91.", "🇪🇺"),
];

/// Top-level domain and keyword hints for named hosts.
const DOMAIN_HINTS: &[(&str, &str, &str)] = &[
    ("ir", "iran", "🇮🇷"),
    ("de", "germany", "🇩🇪"),
    ("fr", "france", "🇫🇷"),
    ("nl", "netherlands", "🇳🇱"),
    ("us", "usa", "🇺🇸"),
];

/// Host part of a `scheme://user@host:port...` URI, if present.
pub fn host_of(uri: &str) -> Option<&str> {
    let rest = uri.split_once("://")?.1;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@')?.1;
    let host = match host_port.strip_prefix('[') {
        Some(v6) => v6.split(']').next()?,
        None => host_port.rsplit_once(':').map_or(host_port, |(host, _)| host),
    };
    (!host.is_empty()).then_some(host)
}

/// Best-effort flag for a host name or IPv4 address.
pub fn flag_for_host(host: &str) -> &'static str {
    if host.parse::<Ipv4Addr>().is_ok() {
        return IP_PREFIXES
            .iter()
            .find(|(prefix, _)| host.starts_with(prefix))
            .map_or(UNKNOWN_FLAG, |(_, flag)| *flag);
    }

    let lower = host.to_ascii_lowercase();
    let tld = lower.rsplit('.').next().unwrap_or_default();
    DOMAIN_HINTS
        .iter()
        .find(|(suffix, keyword, _)| tld == *suffix || lower.contains(keyword))
        .map_or(UNKNOWN_FLAG, |(_, _, flag)| *flag)
}
