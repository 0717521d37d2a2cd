use serde::{Deserialize, Serialize};
use std::fmt;

/// Final product of a crawl run: the globally deduplicated URL set in
/// first-seen order, the per-seed diagnostics, and the domain every link
/// was filtered against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutcome {
    pub urls: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub target_domain: String,
}

impl CrawlOutcome {
    pub fn new(target_domain: String) -> Self {
        Self {
            urls: Vec::new(),
            diagnostics: Vec::new(),
            target_domain,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Per-seed recoverable conditions. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    InvalidSeed { url: String },
    OffDomain { url: String, target_domain: String },
    FetchFailed { url: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidSeed { url } => write!(f, "Skipping invalid URL: {}", url),
            Diagnostic::OffDomain { url, target_domain } => {
                write!(f, "Skipping URL not from target domain ({}): {}", target_domain, url)
            }
            Diagnostic::FetchFailed { url, reason } => {
                write!(f, "Failed to fetch: {} ({})", url, reason)
            }
        }
    }
}
