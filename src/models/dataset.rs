//! Static brewery dataset.
//!
//! The dataset is a read-only list of geocoded records. A copy is embedded in
//! the binary; a replacement file can be supplied through configuration.

use super::{Category, NewLocation, PawRating};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Embedded dataset, compiled in from `data/breweries.json`.
const BUILTIN_DATASET: &str = include_str!("../../data/breweries.json");

/// A raw dataset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    pub name: String,

    #[serde(default)]
    pub address: Option<String>,

    pub latitude: f64,

    pub longitude: f64,

    /// Seating tags, e.g. "Indoor", "Outdoor"
    #[serde(default)]
    pub tags: Vec<String>,

    pub paw_rating: i64,

    /// Review-site link
    #[serde(default, rename = "yelp")]
    pub review_link: Option<String>,
}

impl DatasetRecord {
    /// Convert into a location candidate.
    pub fn into_candidate(self) -> NewLocation {
        let category = category_from_tags(&self.tags);
        let mut candidate = NewLocation::new(
            self.name,
            [self.latitude, self.longitude],
            category,
            PawRating::clamped(self.paw_rating),
        );
        candidate.address = self.address.filter(|a| !a.trim().is_empty());
        candidate.review_link = self.review_link.filter(|l| !l.trim().is_empty());
        candidate
    }
}

/// Derive a category from seating tags.
///
/// `Both` requires both tags. Records without either tag are treated as
/// outdoor-only.
pub fn category_from_tags(tags: &[String]) -> Category {
    let has = |wanted: &str| tags.iter().any(|t| t.trim().eq_ignore_ascii_case(wanted));
    match (has("indoor"), has("outdoor")) {
        (true, true) => Category::Both,
        (true, false) => Category::Indoor,
        _ => Category::Outdoor,
    }
}

/// Parse a dataset from JSON text.
pub fn parse(json: &str) -> Result<Vec<DatasetRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// The dataset shipped with the binary.
pub fn builtin() -> Result<Vec<DatasetRecord>> {
    parse(BUILTIN_DATASET)
}

/// Load a dataset from a JSON file.
pub fn from_path(path: &Path) -> Result<Vec<DatasetRecord>> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}
