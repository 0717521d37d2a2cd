use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Snapshot of crawl progress, replaced wholesale after every seed URL's
/// disposition and once more at completion. This is also the payload shape
/// the polling path serializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub processed: usize,
    pub total: usize,
    pub found: usize,
    pub message: String,
    pub percentage: u32,
}

impl ProgressState {
    pub fn new(processed: usize, total: usize, found: usize, message: impl Into<String>) -> Self {
        let percentage = if total > 0 {
            ((processed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            processed,
            total,
            found,
            message: message.into(),
            percentage,
        }
    }

    /// The payload a poller sees before the first real event lands.
    pub fn initializing() -> Self {
        Self::new(0, 0, 0, "Initializing...")
    }
}

pub type ProgressCallback = Arc<dyn Fn(ProgressState) + Send + Sync>;
