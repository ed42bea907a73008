//! Itinerary manager: named, ordered pub crawls.
//!
//! Every mutation writes the full plan collection through to storage.
//! Invalid requests (blank names, unknown plans, out-of-range indices,
//! duplicate adds) are no-ops that report `false`/`None` rather than errors.

use crate::ids::{self, TokenGenerator};
use crate::models::Plan;
use crate::storage::{Storage, keys};
use crate::store::LocationStore;
use crate::Result;

/// Default directions service.
pub const DEFAULT_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

#[derive(Debug, Default)]
pub struct ItineraryManager {
    plans: Vec<Plan>,
}

impl ItineraryManager {
    /// Restore saved plans. A missing or corrupt collection loads as empty.
    pub fn load(storage: &Storage) -> Self {
        let plans: Vec<Plan> = storage.load(keys::PLANS);
        tracing::debug!(count = plans.len(), "loaded plans");
        Self { plans }
    }

    pub fn all(&self) -> &[Plan] {
        &self.plans
    }

    pub fn get(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == plan_id)
    }

    /// Create a new empty plan. Blank names are ignored.
    pub fn create(
        &mut self,
        name: &str,
        tokens: &mut dyn TokenGenerator,
        storage: &mut Storage,
    ) -> Result<Option<&Plan>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let plan = Plan::new(ids::plan_id(tokens), name.to_string());
        tracing::debug!(id = %plan.id, name, "created plan");
        self.plans.push(plan);
        self.persist(storage)?;
        Ok(self.plans.last())
    }

    /// Rename a plan. Blank names are ignored.
    pub fn rename(&mut self, plan_id: &str, name: &str, storage: &mut Storage) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.mutate(plan_id, storage, |plan| {
            plan.name = name.to_string();
            true
        })
    }

    /// Delete a plan.
    pub fn delete(&mut self, plan_id: &str, storage: &mut Storage) -> Result<bool> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != plan_id);
        if self.plans.len() == before {
            return Ok(false);
        }
        self.persist(storage)?;
        Ok(true)
    }

    /// Append a location to a plan. Already-present locations keep their position.
    pub fn add_location(
        &mut self,
        plan_id: &str,
        location_id: &str,
        storage: &mut Storage,
    ) -> Result<bool> {
        self.mutate(plan_id, storage, |plan| {
            if plan.contains(location_id) {
                return false;
            }
            plan.locations.push(location_id.to_string());
            true
        })
    }

    /// Remove every occurrence of a location from a plan.
    pub fn remove_location(
        &mut self,
        plan_id: &str,
        location_id: &str,
        storage: &mut Storage,
    ) -> Result<bool> {
        self.mutate(plan_id, storage, |plan| {
            let before = plan.locations.len();
            plan.locations.retain(|id| id != location_id);
            plan.locations.len() != before
        })
    }

    /// Move the stop at `from` so it ends up at index `to`.
    ///
    /// Both indices must be in bounds; otherwise nothing changes.
    pub fn reorder(
        &mut self,
        plan_id: &str,
        from: usize,
        to: usize,
        storage: &mut Storage,
    ) -> Result<bool> {
        self.mutate(plan_id, storage, |plan| {
            let len = plan.locations.len();
            if from >= len || to >= len || from == to {
                return false;
            }
            let moved = plan.locations.remove(from);
            plan.locations.insert(to, moved);
            true
        })
    }

    /// Replace the notes of a plan. Blank text clears them.
    pub fn set_notes(&mut self, plan_id: &str, text: &str, storage: &mut Storage) -> Result<bool> {
        let notes = (!text.trim().is_empty()).then(|| text.to_string());
        self.mutate(plan_id, storage, |plan| {
            plan.notes = notes;
            true
        })
    }

    /// Assign a fresh share code to a plan, replacing any previous one.
    pub fn generate_share_code(
        &mut self,
        plan_id: &str,
        tokens: &mut dyn TokenGenerator,
        storage: &mut Storage,
    ) -> Result<Option<String>> {
        if self.get(plan_id).is_none() {
            return Ok(None);
        }
        let code = ids::share_code(tokens);
        self.mutate(plan_id, storage, |plan| {
            plan.share_code = Some(code.clone());
            true
        })?;
        Ok(Some(code))
    }

    /// Find the local plan carrying `code`.
    pub fn resolve_share_code(&self, code: &str) -> Option<&Plan> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.plans
            .iter()
            .find(|p| p.share_code.as_deref() == Some(code))
    }

    fn mutate(
        &mut self,
        plan_id: &str,
        storage: &mut Storage,
        f: impl FnOnce(&mut Plan) -> bool,
    ) -> Result<bool> {
        let Some(plan) = self.plans.iter_mut().find(|p| p.id == plan_id) else {
            return Ok(false);
        };
        if !f(plan) {
            return Ok(false);
        }
        self.persist(storage)?;
        Ok(true)
    }

    fn persist(&self, storage: &mut Storage) -> Result<()> {
        storage.save(keys::PLANS, &self.plans)
    }
}

/// Build a directions URL visiting the plan's stops in order.
///
/// Each stop is its address if known, else "lat,lng", percent-encoded.
/// Stops whose location no longer exists are skipped. Returns an empty
/// string when no stop resolves.
pub fn export_directions_url(plan: &Plan, locations: &LocationStore, base_url: &str) -> String {
    let waypoints: Vec<String> = plan
        .locations
        .iter()
        .filter_map(|id| locations.get(id))
        .map(|location| urlencoding::encode(&location.waypoint()).into_owned())
        .collect();

    if waypoints.is_empty() {
        return String::new();
    }

    format!("{}/{}", base_url.trim_end_matches('/'), waypoints.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialTokens;
    use crate::test_utils::records;

    fn setup() -> (Storage, SequentialTokens, ItineraryManager, String) {
        let mut storage = Storage::memory();
        let mut tokens = SequentialTokens::new();
        let mut manager = ItineraryManager::load(&storage);
        let id = manager
            .create("Saturday Crawl", &mut tokens, &mut storage)
            .unwrap()
            .unwrap()
            .id
            .clone();
        (storage, tokens, manager, id)
    }

    fn stops(manager: &ItineraryManager, id: &str) -> Vec<String> {
        manager.get(id).unwrap().locations.clone()
    }

    #[test]
    fn test_create_plan() {
        let (storage, _tokens, manager, id) = setup();
        let plan = manager.get(&id).unwrap();
        assert_eq!(plan.name, "Saturday Crawl");
        assert!(plan.locations.is_empty());
        assert!(plan.share_code.is_none());

        let saved: Vec<Plan> = storage.load(keys::PLANS);
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_create_trims_and_rejects_blank_names() {
        let (mut storage, mut tokens, mut manager, _id) = setup();
        assert!(manager.create("   ", &mut tokens, &mut storage).unwrap().is_none());
        assert!(manager.create("", &mut tokens, &mut storage).unwrap().is_none());
        let plan = manager
            .create("  Bay View  ", &mut tokens, &mut storage)
            .unwrap()
            .unwrap();
        assert_eq!(plan.name, "Bay View");
        assert_eq!(manager.all().len(), 2);
    }

    #[test]
    fn test_add_location_is_idempotent() {
        let (mut storage, _tokens, mut manager, id) = setup();
        assert!(manager.add_location(&id, "a", &mut storage).unwrap());
        assert!(manager.add_location(&id, "b", &mut storage).unwrap());
        assert!(!manager.add_location(&id, "a", &mut storage).unwrap());
        assert_eq!(stops(&manager, &id), vec!["a", "b"]);
    }

    #[test]
    fn test_add_to_unknown_plan_is_noop() {
        let (mut storage, _tokens, mut manager, _id) = setup();
        assert!(!manager.add_location("plan-missing", "a", &mut storage).unwrap());
    }

    #[test]
    fn test_remove_location() {
        let (mut storage, _tokens, mut manager, id) = setup();
        for stop in ["a", "b", "c"] {
            manager.add_location(&id, stop, &mut storage).unwrap();
        }
        assert!(manager.remove_location(&id, "b", &mut storage).unwrap());
        assert!(!manager.remove_location(&id, "b", &mut storage).unwrap());
        assert_eq!(stops(&manager, &id), vec!["a", "c"]);
    }

    #[test]
    fn test_reorder_forward_and_backward() {
        let (mut storage, _tokens, mut manager, id) = setup();
        for stop in ["A", "B", "C"] {
            manager.add_location(&id, stop, &mut storage).unwrap();
        }

        assert!(manager.reorder(&id, 0, 2, &mut storage).unwrap());
        assert_eq!(stops(&manager, &id), vec!["B", "C", "A"]);

        // Back to A, B, C then move the last to the front
        manager.reorder(&id, 2, 0, &mut storage).unwrap();
        assert_eq!(stops(&manager, &id), vec!["A", "B", "C"]);
        manager.reorder(&id, 2, 0, &mut storage).unwrap();
        assert_eq!(stops(&manager, &id), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let (mut storage, _tokens, mut manager, id) = setup();
        for stop in ["A", "B", "C"] {
            manager.add_location(&id, stop, &mut storage).unwrap();
        }
        assert!(!manager.reorder(&id, 3, 0, &mut storage).unwrap());
        assert!(!manager.reorder(&id, 0, 7, &mut storage).unwrap());
        assert_eq!(stops(&manager, &id), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_set_notes() {
        let (mut storage, _tokens, mut manager, id) = setup();
        manager.set_notes(&id, "Bring treats", &mut storage).unwrap();
        assert_eq!(manager.get(&id).unwrap().notes.as_deref(), Some("Bring treats"));
        manager.set_notes(&id, "Leash required", &mut storage).unwrap();
        assert_eq!(manager.get(&id).unwrap().notes.as_deref(), Some("Leash required"));
        manager.set_notes(&id, "  ", &mut storage).unwrap();
        assert_eq!(manager.get(&id).unwrap().notes, None);
    }

    #[test]
    fn test_rename_and_delete() {
        let (mut storage, _tokens, mut manager, id) = setup();
        assert!(!manager.rename(&id, " ", &mut storage).unwrap());
        assert!(manager.rename(&id, "Sunday Crawl", &mut storage).unwrap());
        assert_eq!(manager.get(&id).unwrap().name, "Sunday Crawl");

        assert!(manager.delete(&id, &mut storage).unwrap());
        assert!(manager.get(&id).is_none());
        assert!(!manager.delete(&id, &mut storage).unwrap());
        assert!(ItineraryManager::load(&storage).all().is_empty());
    }

    #[test]
    fn test_share_code_round_trip() {
        let (mut storage, mut tokens, mut manager, id) = setup();
        let code = manager
            .generate_share_code(&id, &mut tokens, &mut storage)
            .unwrap()
            .unwrap();
        assert_eq!(manager.resolve_share_code(&code).unwrap().id, id);
        assert!(manager.resolve_share_code("nonexistent").is_none());
        assert!(manager.resolve_share_code("").is_none());
    }

    #[test]
    fn test_regenerated_share_code_replaces_old_one() {
        let (mut storage, mut tokens, mut manager, id) = setup();
        let first = manager
            .generate_share_code(&id, &mut tokens, &mut storage)
            .unwrap()
            .unwrap();
        let second = manager
            .generate_share_code(&id, &mut tokens, &mut storage)
            .unwrap()
            .unwrap();
        assert_ne!(first, second);
        assert!(manager.resolve_share_code(&first).is_none());
        assert_eq!(manager.resolve_share_code(&second).unwrap().id, id);
    }

    #[test]
    fn test_share_code_for_unknown_plan() {
        let (mut storage, mut tokens, mut manager, _id) = setup();
        assert!(manager
            .generate_share_code("plan-missing", &mut tokens, &mut storage)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_plans_reload_from_storage() {
        let (mut storage, _tokens, mut manager, id) = setup();
        manager.add_location(&id, "a", &mut storage).unwrap();
        let reloaded = ItineraryManager::load(&storage);
        assert_eq!(reloaded.all(), manager.all());
    }

    #[test]
    fn test_corrupt_plans_load_as_empty() {
        let mut storage = Storage::memory();
        storage.write_raw(keys::PLANS, "[{\"id\": 4}]").unwrap();
        assert!(ItineraryManager::load(&storage).all().is_empty());
    }

    fn location_store() -> LocationStore {
        let mut store = LocationStore::new();
        store.initialize(records(), &Storage::memory());
        store
    }

    #[test]
    fn test_export_uses_addresses_in_order() {
        let locations = location_store();
        let mut plan = Plan::new("plan-x".to_string(), "x".to_string());
        plan.locations = locations.all().iter().rev().map(|l| l.id.clone()).collect();

        let url = export_directions_url(&plan, &locations, DEFAULT_DIRECTIONS_URL);
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/\
             Everywhere%20Brewing%20St%2C%20Milwaukee%2C%20WI/\
             Patio%20Pints%20St%2C%20Milwaukee%2C%20WI/\
             Indoor%20Alehouse%20St%2C%20Milwaukee%2C%20WI"
        );
    }

    #[test]
    fn test_export_skips_dangling_ids() {
        let locations = location_store();
        let valid = locations.all()[0].id.clone();
        let mut plan = Plan::new("plan-x".to_string(), "x".to_string());
        plan.locations = vec!["loc-gone".to_string(), valid];

        let url = export_directions_url(&plan, &locations, DEFAULT_DIRECTIONS_URL);
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/Indoor%20Alehouse%20St%2C%20Milwaukee%2C%20WI"
        );
    }

    #[test]
    fn test_export_falls_back_to_coordinates() {
        let mut storage = Storage::memory();
        let mut locations = LocationStore::new();
        let mut record = crate::test_utils::record("No Address", 43.5, -87.25, &["Indoor"], 2);
        record.address = None;
        locations.initialize(vec![record], &storage);
        let id = locations.all()[0].id.clone();

        let mut manager = ItineraryManager::load(&storage);
        let mut tokens = SequentialTokens::new();
        let plan_id = manager
            .create("Coords", &mut tokens, &mut storage)
            .unwrap()
            .unwrap()
            .id
            .clone();
        manager.add_location(&plan_id, &id, &mut storage).unwrap();

        let url = export_directions_url(
            manager.get(&plan_id).unwrap(),
            &locations,
            "https://maps.example/dir",
        );
        assert_eq!(url, "https://maps.example/dir/43.5%2C-87.25");
    }

    #[test]
    fn test_export_empty_plan() {
        let locations = location_store();
        let mut plan = Plan::new("plan-x".to_string(), "x".to_string());
        assert_eq!(export_directions_url(&plan, &locations, DEFAULT_DIRECTIONS_URL), "");
        plan.locations = vec!["loc-gone".to_string()];
        assert_eq!(export_directions_url(&plan, &locations, DEFAULT_DIRECTIONS_URL), "");
    }
}
