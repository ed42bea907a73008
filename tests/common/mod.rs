//! Common test utilities for pupcrawl integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't pollute
//! the user's `~/.local/share/pupcrawl/` directory or config.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A small dataset with one location of each category plus a duplicate row.
pub const FIXTURE_DATASET: &str = r#"[
  {"name": "Indoor Alehouse", "address": "100 Indoor St, Milwaukee, WI", "latitude": 43.01, "longitude": -87.91, "tags": ["Indoor"], "pawRating": 2},
  {"name": "Patio Pints", "address": "200 Patio Ave, Milwaukee, WI", "latitude": 43.02, "longitude": -87.92, "tags": ["Outdoor"], "pawRating": 3},
  {"name": "Everywhere Brewing", "latitude": 43.03, "longitude": -87.93, "tags": ["Indoor", "Outdoor"], "pawRating": 4},
  {"name": "Patio Pints", "address": "200 Patio Ave, Milwaukee, WI", "latitude": 43.02, "longitude": -87.92, "tags": ["Outdoor"], "pawRating": 1}
]"#;

/// A test environment with isolated data storage.
///
/// Each `TestEnv` creates two temporary directories:
/// - `data_dir`: Holds pupcrawl's data (via `PUP_DATA_DIR`)
/// - `config_dir`: Holds `config.kdl` (via `PUP_CONFIG`) and fixture datasets
///
/// The `pup()` method sets the environment per-invocation, making tests
/// parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment using the fixture dataset.
    pub fn new() -> Self {
        let env = Self {
            data_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        };
        std::fs::write(env.dataset_path(), FIXTURE_DATASET).unwrap();
        env
    }

    /// Get a Command for the pup binary with isolated data and config.
    pub fn pup(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_pup"));
        cmd.env("PUP_DATA_DIR", self.data_dir.path());
        cmd.env("PUP_CONFIG", self.config_path());
        cmd.env("PUP_DATASET", self.dataset_path());
        cmd.env_remove("PUP_SHARE_ORIGIN");
        cmd.env_remove("PUP_DIRECTIONS_URL");
        cmd.env_remove("PUP_OUTPUT_FORMAT");
        cmd.env_remove("PUP_LOG");
        cmd
    }

    /// Run `pup` with `args` and parse its JSON stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.pup().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "pup {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.kdl")
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.config_dir.path().join("breweries.json")
    }

    /// Write config.kdl.
    pub fn write_config(&self, kdl: &str) {
        std::fs::write(self.config_path(), kdl).unwrap();
    }

    /// ID of the first location named `name`.
    pub fn location_id(&self, name: &str) -> String {
        let list = self.json(&["location", "list", "--all"]);
        list["locations"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["name"] == name)
            .and_then(|l| l["id"].as_str())
            .unwrap()
            .to_string()
    }

    /// Create a plan and return its ID.
    pub fn create_plan(&self, name: &str) -> String {
        self.json(&["plan", "create", name])["id"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
