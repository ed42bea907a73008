//! `pup filter` commands.

use super::{Output, to_json};
use crate::app::PupCrawl;
use crate::models::{CategoryFilter, Filter};
use crate::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct FilterStatus {
    #[serde(flatten)]
    pub filter: Filter,
    pub visible: usize,
    pub total: usize,
}

impl Output for FilterStatus {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let rating = match self.filter.threshold() {
            Some(min) => format!("{}+ paws", min),
            None => "any".to_string(),
        };
        format!(
            "Filter: {} / rating {}\n{} of {} locations visible",
            self.filter.category, rating, self.visible, self.total
        )
    }
}

fn status(app: &PupCrawl) -> FilterStatus {
    FilterStatus {
        filter: app.filter(),
        visible: app.visible_locations().len(),
        total: app.locations().len(),
    }
}

pub fn show(app: &PupCrawl) -> FilterStatus {
    status(app)
}

/// Replace the filter.
pub fn set(
    app: &mut PupCrawl,
    category: CategoryFilter,
    min_rating: Option<u8>,
) -> Result<FilterStatus> {
    app.set_filter(Filter::new(category, min_rating))?;
    Ok(status(app))
}

pub fn reset(app: &mut PupCrawl) -> Result<FilterStatus> {
    app.reset_filter()?;
    Ok(status(app))
}

pub fn toggle_rating(app: &mut PupCrawl, rating: u8) -> Result<FilterStatus> {
    app.toggle_min_rating(rating)?;
    Ok(status(app))
}
