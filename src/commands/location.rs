//! `pup location` commands.

use super::{Output, to_json};
use crate::app::PupCrawl;
use crate::models::{Category, Filter, Location, NewLocation, PawRating, PrivateNote, Report};
use crate::{Error, Result};
use serde::Serialize;

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("Location not found: {}", id))
}

fn summary_line(location: &Location) -> String {
    format!(
        "{}  {}  {} [{}]",
        location.id,
        location.rating.paws(),
        location.name,
        location.category
    )
}

#[derive(Serialize)]
pub struct LocationList {
    /// `None` when listing without the filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    pub count: usize,
    pub locations: Vec<Location>,
}

impl Output for LocationList {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::with_capacity(self.locations.len() + 1);
        match &self.filter {
            Some(filter) => lines.push(format!("{} location(s) ({})", self.count, filter)),
            None => lines.push(format!("{} location(s)", self.count)),
        }
        if self.locations.is_empty() {
            lines.push("  No locations match. Try `pup filter reset`.".to_string());
        }
        for location in &self.locations {
            lines.push(format!("  {}", summary_line(location)));
        }
        lines.join("\n")
    }
}

/// List locations, filtered unless `all`.
pub fn list(app: &PupCrawl, all: bool) -> LocationList {
    let locations: Vec<Location> = if all {
        app.locations().all().to_vec()
    } else {
        app.visible_locations().into_iter().cloned().collect()
    };
    LocationList {
        filter: (!all).then(|| app.filter()),
        count: locations.len(),
        locations,
    }
}

#[derive(Serialize)]
pub struct LocationDetail {
    #[serde(flatten)]
    pub location: Location,
    /// Whether the location passes the active filter
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_note: Option<PrivateNote>,
}

impl Output for LocationDetail {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let l = &self.location;
        let mut lines = vec![
            format!("{} ({})", l.name, l.id),
            format!("  Rating: {} ({}/{})", l.rating.paws(), l.rating, PawRating::MAX),
            format!("  Dogs welcome: {}", l.category.label()),
            format!("  Coordinates: {}, {}", l.coordinates[0], l.coordinates[1]),
        ];
        if let Some(address) = &l.address {
            lines.push(format!("  Address: {}", address));
        }
        if let Some(link) = &l.review_link {
            lines.push(format!("  Reviews: {}", link));
        }
        if let Some(notes) = &l.notes {
            lines.push(format!("  Notes: {}", notes));
        }
        if let Some(note) = &self.private_note {
            lines.push(format!(
                "  My note: {} (updated {})",
                note.content,
                note.last_updated.format("%Y-%m-%d %H:%M")
            ));
        }
        if !self.visible {
            lines.push("  (hidden by the current filter)".to_string());
        }
        lines.join("\n")
    }
}

fn detail(app: &PupCrawl, id: &str) -> Result<LocationDetail> {
    let location = app.location(id).ok_or_else(|| not_found(id))?;
    Ok(LocationDetail {
        visible: app.filter().matches(location),
        private_note: app.note(id).cloned(),
        location: location.clone(),
    })
}

/// Show one location.
pub fn show(app: &PupCrawl, id: &str) -> Result<LocationDetail> {
    detail(app, id)
}

#[derive(Serialize)]
pub struct LocationAdded {
    pub added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Output for LocationAdded {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        match &self.location {
            Some(location) => format!("Added {}", summary_line(location)),
            None => "A location with this name and coordinates already exists".to_string(),
        }
    }
}

/// Add a user-supplied location.
pub fn add(app: &mut PupCrawl, candidate: NewLocation) -> Result<LocationAdded> {
    if candidate.name.trim().is_empty() {
        return Err(Error::InvalidInput("Location name cannot be empty".to_string()));
    }
    let [lat, lng] = candidate.coordinates;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(Error::InvalidInput(format!(
            "Coordinates out of range: {}, {}",
            lat, lng
        )));
    }

    let location = app.add_location(candidate)?.cloned();
    Ok(LocationAdded {
        added: location.is_some(),
        location,
    })
}

/// Set a location's rating.
pub fn rate(app: &mut PupCrawl, id: &str, rating: PawRating) -> Result<LocationDetail> {
    if !app.update_rating(id, rating)? {
        return Err(not_found(id));
    }
    detail(app, id)
}

/// Set a location's category.
pub fn categorize(app: &mut PupCrawl, id: &str, category: Category) -> Result<LocationDetail> {
    if !app.update_category(id, category)? {
        return Err(not_found(id));
    }
    detail(app, id)
}

#[derive(Serialize)]
pub struct NoteUpdated {
    pub id: String,
    pub note: Option<PrivateNote>,
}

impl Output for NoteUpdated {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        match &self.note {
            Some(note) => format!("Saved note on {}: {}", self.id, note.content),
            None => format!("Cleared note on {}", self.id),
        }
    }
}

/// Set or clear the private note on a location.
pub fn note(app: &mut PupCrawl, id: &str, content: &str) -> Result<NoteUpdated> {
    if !app.set_note(id, content)? {
        return Err(not_found(id));
    }
    Ok(NoteUpdated {
        id: id.to_string(),
        note: app.note(id).cloned(),
    })
}

#[derive(Serialize)]
pub struct ReportSent {
    pub sent: bool,
    pub report: Report,
}

impl Output for ReportSent {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let name = self
            .report
            .location_name
            .as_deref()
            .unwrap_or(&self.report.location_id);
        format!("Reported issue with {}: {}", name, self.report.issue)
    }
}

/// Report a problem with a listing.
pub fn report(
    app: &mut PupCrawl,
    id: &str,
    issue: &str,
    email: Option<&str>,
) -> Result<ReportSent> {
    if app.location(id).is_none() {
        return Err(not_found(id));
    }
    let report = app.send_report(id, issue, email)?;
    Ok(ReportSent { sent: true, report })
}
