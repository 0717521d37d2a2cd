use sitesmith_scanner::progress::{ProgressCallback, ProgressState};
use std::sync::{Arc, RwLock};

/// Single-writer, single-reader progress slot.
///
/// The crawl loop replaces the whole state on every event (last write
/// wins); the polling path takes snapshots. No field is ever partially
/// updated, so the slot needs no coordination beyond the lock around the
/// replacement itself.
#[derive(Clone, Default)]
pub struct ProgressStore {
    slot: Arc<RwLock<Option<ProgressState>>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored state wholesale.
    pub fn publish(&self, state: ProgressState) {
        *self.slot.write().expect("progress slot poisoned") = Some(state);
    }

    /// Latest state, if any run has written one.
    pub fn snapshot(&self) -> Option<ProgressState> {
        self.slot.read().expect("progress slot poisoned").clone()
    }

    /// Empty the slot at run end.
    pub fn clear(&self) {
        *self.slot.write().expect("progress slot poisoned") = None;
    }

    /// Adapter handing the crawler a callback that writes into this store.
    pub fn callback(&self) -> ProgressCallback {
        let store = self.clone();
        Arc::new(move |state| store.publish(state))
    }
}
