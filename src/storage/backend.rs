//! Storage backend trait and implementations.
//!
//! This module provides different storage backends for pupcrawl data:
//! - `FileBackend` - One JSON file per key in the data directory (default)
//! - `MemoryBackend` - In-process map, for tests and embedding
//! - `LocalStorageBackend` - Browser `localStorage` (wasm feature)

use crate::Result;

/// Trait for storage backends that handle raw key-value persistence.
///
/// Values are JSON text. Keys are independent; there are no cross-key
/// transactions.
pub trait StorageBackend {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Get the storage location description (for display purposes).
    fn location(&self) -> String;

    /// Get the backend type.
    fn backend_type(&self) -> BackendType;
}

/// Available storage backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// JSON files under ~/.local/share/pupcrawl/
    File,
    /// Process memory, lost on exit
    Memory,
    /// Browser localStorage
    LocalStorage,
}

impl BackendType {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
            Self::LocalStorage => "local-storage",
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
