//! Active filter, persisted on every change.

use crate::models::{CategoryFilter, Filter};
use crate::storage::{Storage, keys};
use crate::Result;

#[derive(Debug, Default)]
pub struct FilterState {
    current: Filter,
}

impl FilterState {
    /// Restore the saved filter, or the default (`all`, no threshold).
    pub fn load(storage: &Storage) -> Self {
        Self {
            current: storage.load(keys::FILTERS),
        }
    }

    pub fn current(&self) -> Filter {
        self.current
    }

    /// Replace the filter wholesale.
    pub fn set(&mut self, filter: Filter, storage: &mut Storage) -> Result<()> {
        self.current = Filter::new(filter.category, filter.min_rating);
        storage.save(keys::FILTERS, &self.current)?;
        tracing::debug!(filter = %self.current, "filter changed");
        Ok(())
    }

    /// Restore the default filter.
    pub fn reset(&mut self, storage: &mut Storage) -> Result<()> {
        self.set(Filter::default(), storage)
    }

    /// Set the minimum rating, or clear it if it is already `rating`.
    pub fn toggle_min_rating(&mut self, rating: u8, storage: &mut Storage) -> Result<()> {
        let min_rating = if self.current.threshold() == Some(rating) {
            None
        } else {
            Some(rating)
        };
        self.set(Filter::new(self.current.category, min_rating), storage)
    }

    /// Change only the category selector.
    pub fn set_category(&mut self, category: CategoryFilter, storage: &mut Storage) -> Result<()> {
        self.set(Filter::new(category, self.current.min_rating), storage)
    }
}
