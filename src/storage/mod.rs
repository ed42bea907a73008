//! Storage layer for pupcrawl data.
//!
//! The core never touches files or browser storage directly. Everything goes
//! through [`Storage`], a small key-value port over a [`StorageBackend`]:
//!
//! - `load(key)` returns the stored value, or the type's default when the key
//!   is absent or its content cannot be parsed
//! - `save(key, value)` serializes the full value as JSON
//!
//! ## Keys
//!
//! Each key holds one independent JSON blob (see [`keys`]). The file backend
//! stores them as `~/.local/share/pupcrawl/<key>.json`.

pub mod backend;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod local_storage;
pub mod memory;

pub use backend::{BackendType, StorageBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBackend;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use local_storage::LocalStorageBackend;
pub use memory::MemoryBackend;

use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PUP_DATA_DIR";

/// Storage keys. Each holds one JSON blob.
pub mod keys {
    /// Array of plans
    pub const PLANS: &str = "plans";
    /// Map of location ID to paw rating
    pub const RATINGS: &str = "ratings";
    /// Map of location ID to category
    pub const CATEGORIES: &str = "categories";
    /// The active filter
    pub const FILTERS: &str = "filters";
    /// Map of location ID to private note
    pub const PRIVATE_NOTES: &str = "private_notes";
    /// Array of user-added location candidates
    pub const ADDED_LOCATIONS: &str = "added_locations";

    pub const ALL: &[&str] = &[
        PLANS,
        RATINGS,
        CATEGORIES,
        FILTERS,
        PRIVATE_NOTES,
        ADDED_LOCATIONS,
    ];
}

/// Key-value persistence port.
pub struct Storage {
    backend: Box<dyn StorageBackend>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("backend", &self.backend.backend_type())
            .field("location", &self.backend.location())
            .finish()
    }
}

impl Storage {
    /// Wrap a backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// File-backed storage rooted at `root`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn file(root: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(root))
    }

    /// Empty in-memory storage.
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// File-backed storage in the default data directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self> {
        Ok(Self::file(get_storage_dir()?))
    }

    /// Load the value under `key`.
    ///
    /// Absent keys, read failures, and unparseable content all yield
    /// `T::default()`.
    pub fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, using default");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is corrupt, using default");
                T::default()
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend
            .write(key, &json)
            .map_err(|e| Error::Storage(format!("failed to write '{}': {}", key, e)))
    }

    /// Read the raw text under `key`.
    pub fn read_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.read(key)
    }

    /// Write raw text under `key` without validation.
    pub fn write_raw(&mut self, key: &str, value: &str) -> Result<()> {
        self.backend.write(key, value)
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    pub fn backend_type(&self) -> BackendType {
        self.backend.backend_type()
    }
}

/// Get the data directory.
///
/// Uses `PUP_DATA_DIR` when set, otherwise `~/.local/share/pupcrawl/`
/// (platform equivalent).
pub fn get_storage_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("pupcrawl"))
}
