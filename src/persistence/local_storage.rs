//! Browser LocalStorage backend

use super::{ScoreStore, StoreError, parse_stored};

/// Stores the value as decimal text under a fixed key
pub struct LocalStorageStore {
    key: &'static str,
}

impl LocalStorageStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StoreError> {
        let raw = self
            .storage()?
            .get_item(self.key)
            .map_err(|e| StoreError::Read {
                key: self.key.to_string(),
                reason: format!("{:?}", e),
            })?;

        raw.map(|raw| parse_stored(self.key, &raw)).transpose()
    }

    fn save(&mut self, value: u32) -> Result<(), StoreError> {
        self.storage()?
            .set_item(self.key, &value.to_string())
            .map_err(|e| StoreError::Write {
                key: self.key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}
