//! reqwest-backed fetcher.

use reqwest::header::{CACHE_CONTROL, USER_AGENT};
use reqwest::Client;

use super::{FetchError, FetchRequest, Fetcher};

/// HTTP fetcher sharing one connection pool across requests.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a default client.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, request: &FetchRequest) -> Result<String, FetchError> {
        let mut builder = self.client.get(url);
        if let Some(agent) = &request.user_agent {
            builder = builder.header(USER_AGENT, agent);
        }
        if let Some(ttl) = request.cache_ttl_secs {
            builder = builder.header(CACHE_CONTROL, format!("max-age={}", ttl));
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
