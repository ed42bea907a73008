//! KDL schema for config.kdl.
//!
//! ```kdl
//! output-format "human"  // or "json"
//! share-origin "https://pupcrawl.app"
//! directions-url "https://www.google.com/maps/dir/"
//! dataset "/path/to/breweries.json"
//! ```

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PupConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Origin that share links point at
    pub share_origin: Option<String>,

    /// Base URL of the directions service
    pub directions_url: Option<String>,

    /// Dataset file to load instead of the built-in one
    pub dataset: Option<String>,
}

fn first_string(doc: &KdlDocument, name: &str) -> Option<String> {
    doc.get(name)?
        .entries()
        .first()?
        .value()
        .as_string()
        .map(str::to_string)
}

fn string_node(name: &str, value: &str) -> KdlNode {
    let mut node = KdlNode::new(name);
    node.push(KdlEntry::new(KdlValue::String(value.to_string())));
    node
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl PupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message for the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(origin) = &self.share_origin {
            if !is_http_url(origin) {
                return Err(format!("share-origin must be an http(s) URL, got '{}'", origin));
            }
        }
        if let Some(url) = &self.directions_url {
            if !is_http_url(url) {
                return Err(format!("directions-url must be an http(s) URL, got '{}'", url));
            }
        }
        if let Some(dataset) = &self.dataset {
            if dataset.trim().is_empty() {
                return Err("dataset path cannot be empty".to_string());
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document. Unknown nodes are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        Self {
            output_format: first_string(doc, "output-format").and_then(|s| OutputFormat::parse(&s)),
            share_origin: first_string(doc, "share-origin"),
            directions_url: first_string(doc, "directions-url"),
            dataset: first_string(doc, "dataset"),
        }
    }

    /// Convert config to a KDL document.
    pub fn to_kdl(&self) -> KdlDocument {
        let mut doc = KdlDocument::new();
        let nodes = doc.nodes_mut();

        if let Some(format) = self.output_format {
            nodes.push(string_node("output-format", format.as_str()));
        }
        if let Some(origin) = &self.share_origin {
            nodes.push(string_node("share-origin", origin));
        }
        if let Some(url) = &self.directions_url {
            nodes.push(string_node("directions-url", url));
        }
        if let Some(dataset) = &self.dataset {
            nodes.push(string_node("dataset", dataset));
        }

        doc
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` if they are Some.
    pub fn merge(&mut self, other: &PupConfig) {
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.share_origin.is_some() {
            self.share_origin = other.share_origin.clone();
        }
        if other.directions_url.is_some() {
            self.directions_url = other.directions_url.clone();
        }
        if other.dataset.is_some() {
            self.dataset = other.dataset.clone();
        }
    }
}
