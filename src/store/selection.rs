//! Transient selection: the viewed location and the active plan.
//!
//! Only IDs are held. Accessors resolve them against the current stores, so
//! a deleted plan or location reads back as `None` instead of dangling.

use crate::models::{Location, Plan};
use crate::store::{ItineraryManager, LocationStore};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    location_id: Option<String>,
    plan_id: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a location by ID. Unknown IDs clear the selection.
    pub fn select_location(&mut self, id: Option<&str>, locations: &LocationStore) -> bool {
        self.location_id = id
            .and_then(|id| locations.get(id))
            .map(|location| location.id.clone());
        self.location_id.is_some()
    }

    /// Select a plan by ID. Unknown IDs clear the selection.
    pub fn select_plan(&mut self, id: Option<&str>, plans: &ItineraryManager) -> bool {
        self.plan_id = id.and_then(|id| plans.get(id)).map(|plan| plan.id.clone());
        self.plan_id.is_some()
    }

    pub fn location<'a>(&self, locations: &'a LocationStore) -> Option<&'a Location> {
        self.location_id.as_deref().and_then(|id| locations.get(id))
    }

    pub fn plan<'a>(&self, plans: &'a ItineraryManager) -> Option<&'a Plan> {
        self.plan_id.as_deref().and_then(|id| plans.get(id))
    }

    /// ID of the active plan, if it still exists.
    pub fn plan_id(&self, plans: &ItineraryManager) -> Option<String> {
        self.plan(plans).map(|plan| plan.id.clone())
    }

    /// ID of the viewed location, if it still exists.
    pub fn location_id(&self, locations: &LocationStore) -> Option<String> {
        self.location(locations).map(|location| location.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialTokens;
    use crate::models::PawRating;
    use crate::storage::Storage;
    use crate::test_utils::records;

    fn stores(storage: &Storage) -> (LocationStore, ItineraryManager) {
        let mut locations = LocationStore::new();
        locations.initialize(records(), storage);
        (locations, ItineraryManager::load(storage))
    }

    #[test]
    fn test_select_unknown_location_is_none() {
        let storage = Storage::memory();
        let (locations, _) = stores(&storage);
        let mut selection = Selection::new();

        assert!(!selection.select_location(Some("loc-missing"), &locations));
        assert!(selection.location(&locations).is_none());
    }

    #[test]
    fn test_select_and_clear_location() {
        let storage = Storage::memory();
        let (locations, _) = stores(&storage);
        let id = locations.all()[1].id.clone();
        let mut selection = Selection::new();

        assert!(selection.select_location(Some(&id), &locations));
        assert_eq!(selection.location(&locations).unwrap().name, "Patio Pints");

        selection.select_location(None, &locations);
        assert!(selection.location(&locations).is_none());
    }

    #[test]
    fn test_selected_location_reflects_edits() {
        let mut storage = Storage::memory();
        let (mut locations, _) = stores(&storage);
        let id = locations.all()[0].id.clone();
        let mut selection = Selection::new();
        selection.select_location(Some(&id), &locations);

        locations
            .update_rating(&id, PawRating::new(4).unwrap(), &mut storage)
            .unwrap();
        assert_eq!(selection.location(&locations).unwrap().rating.get(), 4);
    }

    #[test]
    fn test_deleted_plan_does_not_dangle() {
        let mut storage = Storage::memory();
        let (_, mut plans) = stores(&storage);
        let mut tokens = SequentialTokens::new();
        let id = plans
            .create("Crawl", &mut tokens, &mut storage)
            .unwrap()
            .unwrap()
            .id
            .clone();

        let mut selection = Selection::new();
        assert!(selection.select_plan(Some(&id), &plans));
        assert_eq!(selection.plan_id(&plans), Some(id.clone()));

        plans.delete(&id, &mut storage).unwrap();
        assert!(selection.plan(&plans).is_none());
        assert_eq!(selection.plan_id(&plans), None);
    }
}
