use crate::error::{CrawlError, Result};
use crate::extract::extract_links;
use crate::fetcher::PageFetcher;
use crate::outcome::{CrawlOutcome, Diagnostic};
use crate::progress::{ProgressCallback, ProgressState};
use std::collections::HashSet;
use tracing::{info, warn};
use url::Url;

const DEFAULT_FALLBACK_DOMAIN: &str = "localhost";

/// Sequential seed-URL crawl loop.
///
/// Seeds are processed strictly in input order, one fetch at a time, so the
/// progress stream stays ordered without any locking. Links found on a page
/// are never fetched themselves - this is a one-hop extraction pass, not a
/// spider.
pub struct Crawler {
    fetcher: PageFetcher,
    keyword_filters: Vec<String>,
    fallback_domain: String,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            keyword_filters: Vec::new(),
            fallback_domain: DEFAULT_FALLBACK_DOMAIN.to_string(),
            progress_callback: None,
        }
    }

    pub fn with_keyword_filters(mut self, filters: Vec<String>) -> Self {
        self.keyword_filters = filters;
        self
    }

    /// Domain to filter against when no seed URL yields a usable host.
    pub fn with_fallback_domain(mut self, domain: impl Into<String>) -> Self {
        self.fallback_domain = domain.into();
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Process every seed URL and accumulate the deduplicated link set.
    ///
    /// Per-seed problems (bad syntax, off-domain host, failed fetch) become
    /// diagnostics and the loop moves on; only an empty seed list is an
    /// error. A progress event is emitted after every seed's disposition
    /// and once more at completion.
    pub async fn run(&self, seed_urls: &[String]) -> Result<CrawlOutcome> {
        if seed_urls.is_empty() {
            return Err(CrawlError::NoSeedUrls);
        }

        let target_domain = self.derive_target_domain(seed_urls);
        info!(
            "starting crawl of {} seed(s), target domain {}",
            seed_urls.len(),
            target_domain
        );

        let mut outcome = CrawlOutcome::new(target_domain.clone());
        let mut seen: HashSet<String> = HashSet::new();
        let total = seed_urls.len();
        let mut processed = 0usize;

        self.emit(ProgressState::new(0, total, 0, "Starting to process URLs..."));

        for url in seed_urls {
            let host = Url::parse(url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));

            let Some(host) = host else {
                // Invalid seeds count toward the total but not toward the
                // processed counter, preserving the legacy tally.
                outcome
                    .diagnostics
                    .push(Diagnostic::InvalidSeed { url: url.clone() });
                self.emit(ProgressState::new(
                    processed,
                    total,
                    outcome.urls.len(),
                    format!("Skipping invalid URL: {}", url),
                ));
                continue;
            };

            if !host.contains(&target_domain) {
                outcome.diagnostics.push(Diagnostic::OffDomain {
                    url: url.clone(),
                    target_domain: target_domain.clone(),
                });
                self.emit(ProgressState::new(
                    processed,
                    total,
                    outcome.urls.len(),
                    format!(
                        "Skipping URL not from target domain ({}): {}",
                        target_domain, url
                    ),
                ));
                processed += 1;
                continue;
            }

            self.emit(ProgressState::new(
                processed,
                total,
                outcome.urls.len(),
                format!("Fetching: {}", url),
            ));

            match self.fetcher.fetch(url).await {
                Ok(body) => {
                    let links = extract_links(&body, url, &self.keyword_filters, &target_domain);
                    let found_here = links.len();
                    for link in links {
                        // First occurrence wins across the whole run.
                        if seen.insert(link.clone()) {
                            outcome.urls.push(link);
                        }
                    }
                    self.emit(ProgressState::new(
                        processed + 1,
                        total,
                        outcome.urls.len(),
                        format!("Processed: {} - found {} relevant links.", url, found_here),
                    ));
                }
                Err(e) => {
                    warn!("fetch failed for {}: {}", url, e);
                    outcome.diagnostics.push(Diagnostic::FetchFailed {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                    self.emit(ProgressState::new(
                        processed + 1,
                        total,
                        outcome.urls.len(),
                        format!("Failed to fetch: {}", url),
                    ));
                }
            }
            processed += 1;
        }

        self.emit(ProgressState::new(
            total,
            total,
            outcome.urls.len(),
            format!(
                "Generation complete. Found {} total unique URLs.",
                outcome.urls.len()
            ),
        ));
        info!("crawl complete, {} unique URLs", outcome.urls.len());

        Ok(outcome)
    }

    /// Host of the first seed that parses to a non-empty host, else the
    /// configured fallback.
    fn derive_target_domain(&self, seed_urls: &[String]) -> String {
        seed_urls
            .iter()
            .find_map(|u| {
                Url::parse(u)
                    .ok()
                    .and_then(|p| p.host_str().map(str::to_string))
            })
            .unwrap_or_else(|| self.fallback_domain.clone())
    }

    fn emit(&self, state: ProgressState) {
        if let Some(ref callback) = self.progress_callback {
            callback(state);
        }
    }
}
