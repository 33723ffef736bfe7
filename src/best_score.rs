//! Best-score bookkeeping
//!
//! Read once at startup, written after every session. Storage is best-effort:
//! a failed read starts from zero, a failed write is logged and dropped.

use crate::persistence::ScoreStore;

/// Best score backed by a store
pub struct BestScore {
    value: u32,
    store: Box<dyn ScoreStore>,
}

impl BestScore {
    /// Load the stored best score (zero if missing or unreadable)
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let value = match store.load() {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                value
            }
            Ok(None) => {
                log::info!("No best score stored, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                0
            }
        };
        Self { value, store }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Record a finished session. Raises the value if `score` beats it and
    /// writes the result. Returns true if the best score was raised.
    pub fn record(&mut self, score: u32) -> bool {
        let raised = score > self.value;
        self.value = self.value.max(score);
        if let Err(e) = self.store.save(self.value) {
            log::warn!("Could not save best score: {}", e);
        }
        raised
    }
}
