//! Browser fallback markup appended after the entry lines.
//!
//! Proxy clients ignore the trailing `<script>`. Browsers run it: after a
//! delay they are sent to the client import deep-link, and unless the user
//! agent looks like a proxy client the page is replaced by a status card.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::SubscriptionConfig;

/// Build the `<script>` block embedding the live entry count and timestamp.
pub fn fallback_script(
    config: &SubscriptionConfig,
    entry_count: usize,
    rendered_at: DateTime<Utc>,
) -> String {
    let scheme = js_string(&config.redirect_scheme);
    let import_prefix = js_string(&format!("{}import/", config.redirect_scheme));
    let import_fragment = js_string(&config.import_fragment);
    let client = template_text(&config.client_name);
    let browser_check = browser_condition(&config.client_agents);
    let heading = template_text(&config.page_heading);
    let timestamp = rendered_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    format!(
        r#"
<script>
setTimeout(function() {{
    if (window.location.href.indexOf({scheme}) === -1) {{
        window.location.href = {import_prefix} + window.location.href + {import_fragment};
    }}
}}, {delay});

document.addEventListener('DOMContentLoaded', function() {{
    if ({browser_check}) {{
        document.body.innerHTML = `
            <div style="font-family: Arial, sans-serif; text-align: center; padding: 50px; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; min-height: 100vh;">
                <h1 style="font-size: 3em; margin-bottom: 20px;">{heading}</h1>
                <div style="font-size: 1.5em; margin-bottom: 30px;">
                    <div style="animation: pulse 2s infinite;">🚀 Redirecting to {client}...</div>
                </div>
                <div style="background: rgba(255,255,255,0.1); padding: 20px; border-radius: 10px; margin: 20px auto; max-width: 600px;">
                    <h3>📱 How to use:</h3>
                    <p>1. Copy this URL: <code style="background: rgba(0,0,0,0.3); padding: 5px; border-radius: 5px;">${{window.location.href}}</code></p>
                    <p>2. Add to your V2Ray client as subscription link</p>
                    <p>3. Or wait for automatic redirect to {client}</p>
                </div>
                <div style="margin-top: 30px; font-size: 0.9em; opacity: 0.8;">
                    <p>🔄 Auto-updated every hour</p>
                    <p>🌍 Servers from multiple countries</p>
                    <p>⚡ High-speed connections</p>
                    <p>📊 Total configs: {entry_count}</p>
                    <p>⏰ Last updated: {timestamp}</p>
                </div>
            </div>
            <style>
                @keyframes pulse {{
                    0% {{ opacity: 1; }}
                    50% {{ opacity: 0.5; }}
                    100% {{ opacity: 1; }}
                }}
                code {{
                    word-break: break-all;
                }}
            </style>
        `;
    }}
}});
</script>"#,
        delay = config.redirect_delay_ms,
    )
}

/// JS expression true when the user agent matches none of `agents`.
fn browser_condition(agents: &[String]) -> String {
    let checks: Vec<String> = agents
        .iter()
        .filter(|agent| !agent.is_empty())
        .map(|agent| format!("navigator.userAgent.indexOf({}) === -1", js_string(agent)))
        .collect();
    if checks.is_empty() {
        "true".to_string()
    } else {
        checks.join(" && ")
    }
}

/// A JSON string literal is a valid JS string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Escape text for an HTML body inside a JS template literal.
fn template_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '`' => out.push_str("\\`"),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}
