//! Command implementations for the pup CLI.
//!
//! Commands are organized by entity type:
//! - `location` - Browse, add, rate, categorize, annotate, report
//! - `filter` - Category and minimum-rating filter
//! - `plan` - Pub crawl plans, sharing, and directions
//! - `config` - Resolved configuration
//!
//! Every command returns a value implementing [`Output`].

pub mod config;
pub mod filter;
pub mod location;
pub mod plan;

use crate::app::PupCrawl;
use crate::config::ResolvedConfig;
use crate::ids::RandomTokens;
use crate::models::Filter;
use crate::models::dataset;
use crate::notifications::Toast;
use crate::storage::Storage;
use crate::Result;
use serde::Serialize;
use std::path::Path;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Serialize a result as compact JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// A command result together with the toast it raised.
#[derive(Debug)]
pub struct WithToast<T> {
    pub result: T,
    pub toast: Option<Toast>,
}

impl<T> WithToast<T> {
    /// Capture the app's visible toast alongside `result`.
    pub fn capture(result: T, app: &PupCrawl) -> Self {
        Self {
            result,
            toast: app.toast().cloned(),
        }
    }
}

impl<T: Output> Output for WithToast<T> {
    fn to_json(&self) -> String {
        let json = self.result.to_json();
        let Some(toast) = &self.toast else {
            return json;
        };
        match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "toast".to_string(),
                    serde_json::to_value(toast).unwrap_or_default(),
                );
                serde_json::Value::Object(map).to_string()
            }
            _ => json,
        }
    }

    fn to_human(&self) -> String {
        let human = self.result.to_human();
        match &self.toast {
            Some(toast) => format!("{}\n\n{}", human, toast.display()),
            None => human,
        }
    }
}

/// Open the app over the data directory and configured dataset.
///
/// With no `data_dir`, the default data directory is used.
pub fn open_app(data_dir: Option<&Path>, config: &ResolvedConfig) -> Result<PupCrawl> {
    let storage = match data_dir {
        Some(dir) => Storage::file(dir),
        None => Storage::open_default()?,
    };
    let records = match config.dataset() {
        Some(path) => dataset::from_path(path)?,
        None => dataset::builtin()?,
    };
    Ok(PupCrawl::open(storage, records, Box::new(RandomTokens)))
}

/// Overview shown when `pup` runs without a subcommand.
#[derive(Serialize)]
pub struct Status {
    pub version: String,
    pub data_location: String,
    pub total_locations: usize,
    pub visible_locations: usize,
    pub filter: Filter,
    pub plans: usize,
}

impl Output for Status {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("pupcrawl {}", self.version),
            format!("Data: {}", self.data_location),
            format!(
                "Locations: {} visible of {} (filter: {})",
                self.visible_locations, self.total_locations, self.filter
            ),
            format!("Plans: {}", self.plans),
        ];
        if self.total_locations == 0 {
            lines.push("No locations loaded. Check the dataset setting.".to_string());
        } else {
            lines.push(String::new());
            lines.push("Try `pup location list -H` or `pup plan create <name>`.".to_string());
        }
        lines.join("\n")
    }
}

/// Summarize the app state.
pub fn status(app: &PupCrawl) -> Status {
    Status {
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_location: app.storage().location(),
        total_locations: app.locations().len(),
        visible_locations: app.visible_locations().len(),
        filter: app.filter(),
        plans: app.plans().all().len(),
    }
}
