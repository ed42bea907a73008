//! Configuration for pupcrawl.
//!
//! ## config.kdl - User preferences
//!
//! Located at `~/.config/pupcrawl/config.kdl` (platform equivalent), or at
//! the path in `PUP_CONFIG`.
//!
//! Contains:
//! - `output-format` - "json" or "human"
//! - `share-origin` - Origin used in share links
//! - `directions-url` - Base URL of the directions service
//! - `dataset` - Path to a dataset file replacing the built-in one
//!
//! ## Precedence
//!
//! CLI flag > environment variable > config.kdl > defaults.
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, Resolved, ResolvedConfig, ValueSource, resolve_config,
    resolve_config_with_env,
};
pub use schema::{OutputFormat, PupConfig};

use crate::{Error, Result};
use kdl::KdlDocument;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file path.
pub const CONFIG_ENV: &str = "PUP_CONFIG";

/// Path of the config file, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join("pupcrawl").join("config.kdl"))
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<PupConfig> {
    let doc: KdlDocument = text
        .parse()
        .map_err(|e| Error::Config(format!("invalid KDL: {}", e)))?;
    let config = PupConfig::from_kdl(&doc);
    config.validate().map_err(Error::Config)?;
    Ok(config)
}

/// Load the config file at `path`.
///
/// A missing file is an empty config. Unreadable, malformed, or invalid
/// files are reported with a warning and treated as empty.
pub fn load_config_from(path: &Path) -> PupConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return PupConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            return PupConfig::default();
        }
    };

    match parse_config(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
            PupConfig::default()
        }
    }
}

/// Load the config file from its default location.
pub fn load_config() -> PupConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => PupConfig::default(),
    }
}
