use crate::error::{CrawlError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Sitesmith/0.1 (https://github.com/trapdoorsec/sitesmith)";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Single-shot page fetcher.
///
/// Follows redirects, identifies itself with a fixed user agent, and treats
/// anything outside [200, 300) as an opaque failure. One attempt per URL,
/// no retries. TLS certificate verification is disabled by default to match
/// the legacy tool this replaces; call `with_tls_verification(true)` to
/// turn it back on.
pub struct PageFetcher {
    client: Client,
}

/// Builder-side configuration for [`PageFetcher`].
pub struct FetcherConfig {
    timeout_secs: u64,
    verify_tls: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_tls: false,
        }
    }
}

impl FetcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_tls_verification(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    pub fn build(self) -> Result<PageFetcher> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()?;
        Ok(PageFetcher { client })
    }
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        FetcherConfig::default().build()
    }

    /// GET a page and return its body, or a failure for any non-2xx
    /// status, transport error, or timeout.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("fetching {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(CrawlError::FetchFailed {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.text().await?)
    }
}
