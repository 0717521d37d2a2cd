pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod outcome;
pub mod progress;
pub mod resolve;

pub use crawler::Crawler;
pub use error::CrawlError;
pub use fetcher::PageFetcher;
pub use outcome::{CrawlOutcome, Diagnostic};
pub use progress::{ProgressCallback, ProgressState};
