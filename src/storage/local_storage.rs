//! Browser `localStorage` backend.

use super::backend::{BackendType, StorageBackend};
use crate::{Error, Result};
use web_sys::Storage as WebStorage;

/// Prefix added to every key so pupcrawl entries don't collide with other
/// scripts on the same origin.
pub const KEY_PREFIX: &str = "pupcrawl_";

pub struct LocalStorageBackend {
    storage: WebStorage,
}

impl LocalStorageBackend {
    /// Attach to the window's `localStorage`.
    pub fn new() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| Error::Storage("no window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| Error::Storage(format!("localStorage unavailable: {:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }

    fn key(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(&Self::key(key))
            .map_err(|e| Error::Storage(format!("failed to read '{}': {:?}", key, e)))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(&Self::key(key), value)
            .map_err(|e| Error::Storage(format!("failed to write '{}': {:?}", key, e)))
    }

    fn location(&self) -> String {
        "localStorage".to_string()
    }

    fn backend_type(&self) -> BackendType {
        BackendType::LocalStorage
    }
}
