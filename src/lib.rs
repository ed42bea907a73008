//! pupcrawl - dog-friendly brewery discovery and pub crawl planning.
//!
//! This library provides the state core behind the `pup` CLI and the
//! browser build: the location store, filter and selection state, the
//! itinerary manager, and the toast notification channel, all persisted
//! through a small key-value storage port.

pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod commands;
pub mod config;
pub mod ids;
pub mod models;
pub mod notifications;
pub mod share;
pub mod storage;
pub mod store;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use app::PupCrawl;

/// Test utilities for isolated test environments.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod test_utils {
    use std::path::Path;
    use tempfile::TempDir;

    use crate::app::PupCrawl;
    use crate::ids::SequentialTokens;
    use crate::models::dataset::DatasetRecord;
    use crate::storage::Storage;

    /// Test environment with an isolated data directory.
    pub struct TestEnv {
        pub data_dir: TempDir,
    }

    impl TestEnv {
        pub fn new() -> Self {
            Self {
                data_dir: TempDir::new().unwrap(),
            }
        }

        pub fn data_path(&self) -> &Path {
            self.data_dir.path()
        }

        /// File-backed storage rooted in this environment.
        pub fn storage(&self) -> Storage {
            Storage::file(self.data_path())
        }

        /// Open the app over this environment's storage with deterministic tokens.
        pub fn open_app(&self) -> PupCrawl {
            PupCrawl::open(self.storage(), records(), Box::new(SequentialTokens::new()))
        }
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Build a dataset record.
    pub fn record(name: &str, lat: f64, lng: f64, tags: &[&str], rating: i64) -> DatasetRecord {
        DatasetRecord {
            name: name.to_string(),
            address: Some(format!("{} St, Milwaukee, WI", name)),
            latitude: lat,
            longitude: lng,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            paw_rating: rating,
            review_link: None,
        }
    }

    /// Small fixture dataset: one of each category plus a duplicate row.
    pub fn records() -> Vec<DatasetRecord> {
        vec![
            record("Indoor Alehouse", 43.01, -87.91, &["Indoor"], 2),
            record("Patio Pints", 43.02, -87.92, &["Outdoor"], 3),
            record("Everywhere Brewing", 43.03, -87.93, &["Indoor", "Outdoor"], 4),
            record("Patio Pints", 43.02, -87.92, &["Outdoor"], 1),
        ]
    }

    /// App over in-memory storage.
    pub fn memory_app() -> PupCrawl {
        PupCrawl::open(Storage::memory(), records(), Box::new(SequentialTokens::new()))
    }
}

/// Library-level error type for pupcrawl operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pupcrawl operations.
pub type Result<T> = std::result::Result<T, Error>;
