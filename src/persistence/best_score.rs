//! Best score tracking
//!
//! Layout: one base-10 integer under `consts::BEST_SCORE_KEY`. Absent or
//! unparsable values read as zero; clearing the key resets to zero.

use super::{KeyValueStore, read_or_none, write_best_effort};
use crate::consts::BEST_SCORE_KEY;

/// Result of finishing a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub final_score: u64,
    /// Best score after this run was recorded
    pub best: u64,
    /// True only when `final_score` strictly beat the previous best
    pub is_new_best: bool,
}

/// Best score backed by a key-value store
pub struct BestScore {
    store: Box<dyn KeyValueStore>,
    best: u64,
}

impl BestScore {
    /// Load the persisted best (zero if missing, malformed or unreadable)
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let best = read_or_none(store.as_ref(), BEST_SCORE_KEY)
            .map(|raw| parse_score(&raw))
            .unwrap_or(0);
        log::info!("Loaded best score: {best}");
        Self { store, best }
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Record a finished run. Persists only when the previous best is beaten.
    pub fn record(&mut self, final_score: u64) -> RunSummary {
        let is_new_best = final_score > self.best;
        if is_new_best {
            self.best = final_score;
            write_best_effort(self.store.as_mut(), BEST_SCORE_KEY, &final_score.to_string());
            log::info!("New best score: {final_score}");
        }
        RunSummary {
            final_score,
            best: self.best,
            is_new_best,
        }
    }

    /// Forget the best score, in memory and in storage
    pub fn reset(&mut self) {
        self.best = 0;
        if let Err(e) = self.store.remove(BEST_SCORE_KEY) {
            log::warn!("Failed to clear best score: {e}");
        }
        log::info!("Best score reset");
    }

    /// Access the underlying store (settings share it)
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }
}

/// Parse a stored score leniently, like `parseInt`: leading digits win,
/// anything else is zero.
pub fn parse_score(raw: &str) -> u64 {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
