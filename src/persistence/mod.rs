//! Best-score storage
//!
//! The game persists exactly one integer. Stores implement `ScoreStore`:
//! - `MemoryStore`: in-process, used natively and in tests
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage failures. Callers treat all of them as non-fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("stored value for {key} is not an integer: {value:?}")]
    Corrupt { key: String, value: String },
}

/// Durable key-value storage for a single named integer
pub trait ScoreStore {
    /// Read the value, `Ok(None)` if nothing has been stored yet
    fn load(&self) -> Result<Option<u32>, StoreError>;

    /// Write the value
    fn save(&mut self, value: u32) -> Result<(), StoreError>;
}

/// Shared handle, lets a caller keep looking at a store it handed over
impl<S: ScoreStore> ScoreStore for Rc<RefCell<S>> {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        self.borrow().load()
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        self.borrow_mut().save(value)
    }
}

/// Parse a stored integer. Accepts the decimal text form the game writes.
pub fn parse_stored(key: &str, raw: &str) -> Result<u32, StoreError> {
    raw.trim().parse::<u32>().map_err(|_| StoreError::Corrupt {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    /// When set, every operation fails with `Unavailable`
    pub fail: bool,
    /// Number of successful writes
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a value
    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Store whose reads and writes always fail
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value)
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable);
        }
        self.value = Some(value);
        self.writes += 1;
        Ok(())
    }
}
