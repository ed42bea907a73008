//! Data models for pupcrawl entities.
//!
//! This module defines the core data structures:
//! - `Location` - A dog-friendly point of interest with a paw rating
//! - `Filter` - Category and minimum-rating predicate over locations
//! - `Plan` - A named, ordered pub crawl of location IDs
//! - `PrivateNote` - A personal note attached to a location
//! - `Report` - A user report about a listing

pub mod dataset;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where dogs are welcome at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Indoor,
    Outdoor,
    /// Both indoor and outdoor seating
    Both,
}

impl Category {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Indoor => "Indoor",
            Category::Outdoor => "Outdoor",
            Category::Both => "Indoor & Outdoor",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Indoor => "indoor",
            Category::Outdoor => "outdoor",
            Category::Both => "both",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indoor" => Ok(Category::Indoor),
            "outdoor" => Ok(Category::Outdoor),
            "both" => Ok(Category::Both),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Category selector used by a [`Filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Indoor,
    Outdoor,
}

impl CategoryFilter {
    /// Returns true if a location of the given category passes this selector.
    ///
    /// `Both` satisfies either sub-selector.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Indoor => matches!(category, Category::Indoor | Category::Both),
            CategoryFilter::Outdoor => matches!(category, Category::Outdoor | Category::Both),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CategoryFilter::All => "all",
            CategoryFilter::Indoor => "indoor",
            CategoryFilter::Outdoor => "outdoor",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "indoor" => Ok(CategoryFilter::Indoor),
            "outdoor" => Ok(CategoryFilter::Outdoor),
            _ => Err(format!("Unknown category filter: {}", s)),
        }
    }
}

/// Paw rating in the closed range 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PawRating(u8);

impl PawRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Create a rating, returning `None` when out of range.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Create a rating, pulling out-of-range values to the nearest bound.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Render as paw glyphs, e.g. `●●●○` for 3.
    pub fn paws(self) -> String {
        (Self::MIN..=Self::MAX)
            .map(|i| if i <= self.0 { '●' } else { '○' })
            .collect()
    }
}

impl TryFrom<u8> for PawRating {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "Paw rating must be {}-{}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )
        })
    }
}

impl From<PawRating> for u8 {
    fn from(rating: PawRating) -> Self {
        rating.0
    }
}

impl fmt::Display for PawRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PawRating {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("Invalid paw rating: {}", s))?;
        Self::try_from(value)
    }
}

/// Key used to detect duplicate locations: name plus coordinate pair.
pub fn dedup_key(name: &str, coordinates: [f64; 2]) -> String {
    format!("{}-{},{}", name, coordinates[0], coordinates[1])
}

/// A dog-friendly point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique identifier (e.g., "loc-3f9a1c2b7d0e")
    pub id: String,

    /// Display name
    pub name: String,

    /// Latitude, longitude
    pub coordinates: [f64; 2],

    /// Indoor, outdoor, or both
    #[serde(rename = "type")]
    pub category: Category,

    /// Paw rating (1-4)
    pub rating: PawRating,

    /// Link to an external review site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_link: Option<String>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name, self.coordinates)
    }

    /// Directions waypoint: the address if known, else "lat,lng".
    pub fn waypoint(&self) -> String {
        match &self.address {
            Some(address) if !address.trim().is_empty() => address.clone(),
            _ => format!("{},{}", self.coordinates[0], self.coordinates[1]),
        }
    }
}

/// A location candidate that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub name: String,
    pub coordinates: [f64; 2],
    #[serde(rename = "type")]
    pub category: Category,
    pub rating: PawRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NewLocation {
    /// Create a candidate with the required fields.
    pub fn new(
        name: impl Into<String>,
        coordinates: [f64; 2],
        category: Category,
        rating: PawRating,
    ) -> Self {
        Self {
            name: name.into(),
            coordinates,
            category,
            rating,
            review_link: None,
            notes: None,
            address: None,
        }
    }

    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name, self.coordinates)
    }

    /// Attach an ID, producing a full location.
    pub fn into_location(self, id: String) -> Location {
        Location {
            id,
            name: self.name,
            coordinates: self.coordinates,
            category: self.category,
            rating: self.rating,
            review_link: self.review_link,
            notes: self.notes,
            address: self.address,
        }
    }
}

/// Predicate narrowing the visible locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// Category selector
    #[serde(rename = "type", default)]
    pub category: CategoryFilter,

    /// Minimum paw rating; absent or zero means no threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<u8>,
}

impl Filter {
    pub fn new(category: CategoryFilter, min_rating: Option<u8>) -> Self {
        Self {
            category,
            min_rating: min_rating.filter(|r| *r > 0),
        }
    }

    /// The effective threshold, treating zero as none.
    pub fn threshold(&self) -> Option<u8> {
        self.min_rating.filter(|r| *r > 0)
    }

    /// Returns true if the location satisfies both the category and rating rules.
    pub fn matches(&self, location: &Location) -> bool {
        if !self.category.matches(location.category) {
            return false;
        }
        match self.threshold() {
            Some(min) => location.rating.get() >= min,
            None => true,
        }
    }

    pub fn is_default(&self) -> bool {
        self.category == CategoryFilter::All && self.threshold().is_none()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.threshold() {
            Some(min) => write!(f, "{} (min rating {})", self.category, min),
            None => write!(f, "{}", self.category),
        }
    }
}

/// A named, ordered pub crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier (e.g., "plan-a1B2c3D4")
    pub id: String,

    /// Display name
    pub name: String,

    /// Ordered location IDs, no duplicates
    #[serde(default)]
    pub locations: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Opaque token for share links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_code: Option<String>,
}

impl Plan {
    /// Create an empty plan with the given ID and name.
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            locations: Vec::new(),
            created_at: Utc::now(),
            notes: None,
            share_code: None,
        }
    }

    pub fn contains(&self, location_id: &str) -> bool {
        self.locations.iter().any(|id| id == location_id)
    }
}

/// A personal note attached to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateNote {
    pub content: String,
    pub last_updated: DateTime<Utc>,
}

impl PrivateNote {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            last_updated: Utc::now(),
        }
    }
}

/// A user report flagging a problem with a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub location_id: String,

    /// Name of the location at the time of the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    pub issue: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,

    pub created_at: DateTime<Utc>,
}
