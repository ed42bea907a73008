//! Location store: the canonical list of points of interest.
//!
//! Locations come from the dataset plus any user-added candidates, deduped by
//! name and coordinates. User edits to rating and category are kept as sparse
//! id-keyed override maps and re-applied on every initialize.

use crate::ids;
use crate::models::dataset::DatasetRecord;
use crate::models::{Category, Filter, Location, NewLocation, PawRating, PrivateNote};
use crate::storage::{Storage, keys};
use crate::{Error, Result};
use std::collections::{BTreeMap, HashSet};

/// Single source of truth for locations and their user overrides.
#[derive(Debug, Default)]
pub struct LocationStore {
    locations: Vec<Location>,
    notes: BTreeMap<String, PrivateNote>,
    loading: bool,
}

impl LocationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset, dedupe it, and apply persisted overrides.
    ///
    /// The first record for each name+coordinates key wins. Missing or corrupt
    /// override maps are treated as empty.
    pub fn initialize(&mut self, records: Vec<DatasetRecord>, storage: &Storage) {
        self.loading = true;

        let mut seen = HashSet::new();
        let mut locations = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        let added: Vec<NewLocation> = storage.load(keys::ADDED_LOCATIONS);
        let candidates = records
            .into_iter()
            .map(DatasetRecord::into_candidate)
            .chain(added);

        for candidate in candidates {
            if !seen.insert(candidate.dedup_key()) {
                skipped += 1;
                continue;
            }
            let id = ids::location_id(&candidate.name, candidate.coordinates);
            locations.push(candidate.into_location(id));
        }

        let ratings: BTreeMap<String, u8> = storage.load(keys::RATINGS);
        let categories: BTreeMap<String, Category> = storage.load(keys::CATEGORIES);
        for location in &mut locations {
            if let Some(rating) = ratings.get(&location.id).and_then(|r| PawRating::new(*r)) {
                location.rating = rating;
            }
            if let Some(category) = categories.get(&location.id) {
                location.category = *category;
            }
        }

        self.notes = storage.load(keys::PRIVATE_NOTES);
        self.locations = locations;
        self.loading = false;

        tracing::debug!(
            count = self.locations.len(),
            duplicates = skipped,
            rating_overrides = ratings.len(),
            category_overrides = categories.len(),
            "initialized location store"
        );
    }

    /// True only inside [`initialize`](Self::initialize).
    ///
    /// Loading is synchronous and holds `&mut self`, so any caller holding the
    /// store observes `false`: before the first initialize the store is empty,
    /// afterwards it is populated.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Insert a user-supplied location.
    ///
    /// Returns `None` without changing anything if a location with the same
    /// name and coordinates already exists. Non-finite coordinates are
    /// rejected: JSON has no encoding for them and one such entry would make
    /// the whole persisted list unreadable.
    pub fn add_location(
        &mut self,
        candidate: NewLocation,
        storage: &mut Storage,
    ) -> Result<Option<&Location>> {
        if !candidate.coordinates.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "Coordinates must be finite numbers: {}, {}",
                candidate.coordinates[0], candidate.coordinates[1]
            )));
        }

        let key = candidate.dedup_key();
        if self.locations.iter().any(|l| l.dedup_key() == key) {
            tracing::debug!(name = %candidate.name, "location already exists, not adding");
            return Ok(None);
        }

        let mut added: Vec<NewLocation> = storage.load(keys::ADDED_LOCATIONS);
        added.push(candidate.clone());
        storage.save(keys::ADDED_LOCATIONS, &added)?;

        let id = ids::location_id(&candidate.name, candidate.coordinates);
        tracing::debug!(%id, name = %candidate.name, "added location");
        self.locations.push(candidate.into_location(id));
        Ok(self.locations.last())
    }

    /// Set the rating of a location and persist it as an override.
    ///
    /// Returns false if no location has this ID.
    pub fn update_rating(
        &mut self,
        id: &str,
        rating: PawRating,
        storage: &mut Storage,
    ) -> Result<bool> {
        let Some(location) = self.locations.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        location.rating = rating;

        let mut ratings: BTreeMap<String, u8> = storage.load(keys::RATINGS);
        ratings.insert(id.to_string(), rating.get());
        storage.save(keys::RATINGS, &ratings)?;

        tracing::debug!(id, rating = rating.get(), "updated rating");
        Ok(true)
    }

    /// Set the category of a location and persist it as an override.
    ///
    /// Returns false if no location has this ID.
    pub fn update_category(
        &mut self,
        id: &str,
        category: Category,
        storage: &mut Storage,
    ) -> Result<bool> {
        let Some(location) = self.locations.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        location.category = category;

        let mut categories: BTreeMap<String, Category> = storage.load(keys::CATEGORIES);
        categories.insert(id.to_string(), category);
        storage.save(keys::CATEGORIES, &categories)?;

        tracing::debug!(id, %category, "updated category");
        Ok(true)
    }

    /// Locations passing `filter`, in store order.
    pub fn filtered_view(&self, filter: &Filter) -> Vec<&Location> {
        self.locations.iter().filter(|l| filter.matches(l)).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Private note for a location.
    pub fn note(&self, id: &str) -> Option<&PrivateNote> {
        self.notes.get(id)
    }

    /// Set or clear the private note of a location. Blank content clears it.
    ///
    /// Returns false if no location has this ID.
    pub fn set_note(&mut self, id: &str, content: &str, storage: &mut Storage) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let content = content.trim();
        if content.is_empty() {
            self.notes.remove(id);
        } else {
            self.notes
                .insert(id.to_string(), PrivateNote::new(content.to_string()));
        }
        storage.save(keys::PRIVATE_NOTES, &self.notes)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryFilter;
    use crate::test_utils::{TestEnv, record, records};

    fn initialized(storage: &Storage) -> LocationStore {
        let mut store = LocationStore::new();
        store.initialize(records(), storage);
        store
    }

    fn id_of(store: &LocationStore, name: &str) -> String {
        store
            .all()
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.id.clone())
            .unwrap()
    }

    #[test]
    fn test_initialize_dedupes_by_name_and_coordinates() {
        let store = initialized(&Storage::memory());
        assert_eq!(store.len(), 3);
        let patio: Vec<_> = store
            .all()
            .iter()
            .filter(|l| l.name == "Patio Pints")
            .collect();
        assert_eq!(patio.len(), 1);
        // First occurrence wins
        assert_eq!(patio[0].rating.get(), 3);
        assert!(!store.is_loading());
    }

    #[test]
    fn test_same_name_different_coordinates_are_distinct() {
        let mut store = LocationStore::new();
        store.initialize(
            vec![
                record("Twin Taps", 43.0, -87.9, &["Indoor"], 2),
                record("Twin Taps", 43.1, -87.9, &["Indoor"], 2),
            ],
            &Storage::memory(),
        );
        assert_eq!(store.len(), 2);
        assert_ne!(store.all()[0].id, store.all()[1].id);
    }

    #[test]
    fn test_initialize_derives_categories_from_tags() {
        let store = initialized(&Storage::memory());
        let both = store.get(&id_of(&store, "Everywhere Brewing")).unwrap();
        assert_eq!(both.category, Category::Both);
        let indoor = store.get(&id_of(&store, "Indoor Alehouse")).unwrap();
        assert_eq!(indoor.category, Category::Indoor);
    }

    #[test]
    fn test_filtered_view_grid() {
        let store = initialized(&Storage::memory());
        let names = |filter: Filter| -> Vec<String> {
            store
                .filtered_view(&filter)
                .into_iter()
                .map(|l| l.name.clone())
                .collect()
        };

        assert_eq!(names(Filter::default()).len(), 3);
        assert_eq!(
            names(Filter::new(CategoryFilter::Indoor, None)),
            vec!["Indoor Alehouse", "Everywhere Brewing"]
        );
        assert_eq!(
            names(Filter::new(CategoryFilter::Outdoor, None)),
            vec!["Patio Pints", "Everywhere Brewing"]
        );
        // Patio Pints is rated 3: below, at, and above the threshold
        assert!(names(Filter::new(CategoryFilter::Outdoor, Some(2))).contains(&"Patio Pints".to_string()));
        assert!(names(Filter::new(CategoryFilter::Outdoor, Some(3))).contains(&"Patio Pints".to_string()));
        assert_eq!(
            names(Filter::new(CategoryFilter::Outdoor, Some(4))),
            vec!["Everywhere Brewing"]
        );
        assert!(names(Filter::new(CategoryFilter::Indoor, Some(4))) == vec!["Everywhere Brewing"]);
    }

    #[test]
    fn test_filtered_view_does_not_mutate() {
        let store = initialized(&Storage::memory());
        let before = store.all().to_vec();
        let _ = store.filtered_view(&Filter::new(CategoryFilter::Indoor, Some(4)));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_rating_override_survives_reload() {
        let env = TestEnv::new();
        let mut storage = env.storage();
        let mut store = initialized(&storage);
        let id = id_of(&store, "Indoor Alehouse");

        assert!(store
            .update_rating(&id, PawRating::new(3).unwrap(), &mut storage)
            .unwrap());

        let reloaded = initialized(&env.storage());
        assert_eq!(reloaded.get(&id).unwrap().rating.get(), 3);
    }

    #[test]
    fn test_category_override_survives_reload() {
        let env = TestEnv::new();
        let mut storage = env.storage();
        let mut store = initialized(&storage);
        let id = id_of(&store, "Patio Pints");

        store
            .update_category(&id, Category::Indoor, &mut storage)
            .unwrap();

        let reloaded = initialized(&env.storage());
        assert_eq!(reloaded.get(&id).unwrap().category, Category::Indoor);
    }

    #[test]
    fn test_override_map_is_merged_by_id() {
        let mut storage = Storage::memory();
        storage
            .write_raw(keys::RATINGS, r#"{"loc-from-older-dataset":2}"#)
            .unwrap();
        let mut store = initialized(&storage);
        let id = id_of(&store, "Patio Pints");

        store
            .update_rating(&id, PawRating::new(1).unwrap(), &mut storage)
            .unwrap();

        let ratings: BTreeMap<String, u8> = storage.load(keys::RATINGS);
        assert_eq!(ratings.get("loc-from-older-dataset"), Some(&2));
        assert_eq!(ratings.get(&id), Some(&1));
    }

    #[test]
    fn test_corrupt_overrides_fall_back_to_dataset() {
        let mut storage = Storage::memory();
        storage.write_raw(keys::RATINGS, "{{{{").unwrap();
        storage.write_raw(keys::CATEGORIES, r#"{"x": "patio"}"#).unwrap();

        let store = initialized(&storage);
        assert_eq!(store.len(), 3);
        let patio = store.get(&id_of(&store, "Patio Pints")).unwrap();
        assert_eq!(patio.rating.get(), 3);
        assert_eq!(patio.category, Category::Outdoor);
    }

    #[test]
    fn test_out_of_range_rating_override_is_ignored() {
        let mut storage = Storage::memory();
        let id = ids::location_id("Patio Pints", [43.02, -87.92]);
        storage
            .write_raw(keys::RATINGS, &format!(r#"{{"{}": 9}}"#, id))
            .unwrap();

        let store = initialized(&storage);
        assert_eq!(store.get(&id).unwrap().rating.get(), 3);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut storage = Storage::memory();
        let mut store = initialized(&storage);
        assert!(!store
            .update_rating("loc-missing", PawRating::new(2).unwrap(), &mut storage)
            .unwrap());
        assert!(!store
            .update_category("loc-missing", Category::Both, &mut storage)
            .unwrap());
        assert_eq!(storage.read_raw(keys::RATINGS).unwrap(), None);
    }

    #[test]
    fn test_add_location_rejects_duplicates() {
        let mut storage = Storage::memory();
        let mut store = initialized(&storage);

        let duplicate = NewLocation::new(
            "Patio Pints",
            [43.02, -87.92],
            Category::Both,
            PawRating::new(1).unwrap(),
        );
        assert!(store.add_location(duplicate, &mut storage).unwrap().is_none());
        assert_eq!(store.len(), 3);

        let fresh = NewLocation::new(
            "New Spot",
            [43.05, -87.95],
            Category::Indoor,
            PawRating::new(2).unwrap(),
        );
        let added = store.add_location(fresh, &mut storage).unwrap().unwrap();
        assert!(added.id.starts_with("loc-"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_added_locations_survive_reload() {
        let env = TestEnv::new();
        let mut storage = env.storage();
        let mut store = initialized(&storage);
        let fresh = NewLocation::new(
            "New Spot",
            [43.05, -87.95],
            Category::Indoor,
            PawRating::new(2).unwrap(),
        );
        let id = store
            .add_location(fresh, &mut storage)
            .unwrap()
            .unwrap()
            .id
            .clone();

        let reloaded = initialized(&env.storage());
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.get(&id).unwrap().name, "New Spot");
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let env = TestEnv::new();
        let mut storage = env.storage();
        let mut store = initialized(&storage);
        let rating = PawRating::new(2).unwrap();

        let good = NewLocation::new("Good Spot", [43.05, -87.95], Category::Indoor, rating);
        let id = store
            .add_location(good, &mut storage)
            .unwrap()
            .unwrap()
            .id
            .clone();

        for coordinates in [[f64::NAN, -87.95], [43.05, f64::INFINITY]] {
            let bad = NewLocation::new("Bad Spot", coordinates, Category::Indoor, rating);
            assert!(matches!(
                store.add_location(bad, &mut storage),
                Err(Error::InvalidInput(_))
            ));
        }
        assert_eq!(store.len(), 4);

        let reloaded = initialized(&env.storage());
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.get(&id).unwrap().name, "Good Spot");
    }

    #[test]
    fn test_not_loading_before_or_after_initialize() {
        let store = LocationStore::new();
        assert!(!store.is_loading());
        assert!(store.is_empty());

        let store = initialized(&Storage::memory());
        assert!(!store.is_loading());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_private_notes() {
        let env = TestEnv::new();
        let mut storage = env.storage();
        let mut store = initialized(&storage);
        let id = id_of(&store, "Indoor Alehouse");

        assert!(store.set_note(&id, "  Water bowls by the door ", &mut storage).unwrap());
        assert_eq!(store.note(&id).unwrap().content, "Water bowls by the door");

        let reloaded = initialized(&env.storage());
        assert!(reloaded.note(&id).is_some());

        store.set_note(&id, "   ", &mut storage).unwrap();
        assert!(store.note(&id).is_none());
        assert!(!store.set_note("loc-missing", "hi", &mut storage).unwrap());
    }
}
