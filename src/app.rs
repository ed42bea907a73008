//! Application facade.
//!
//! [`PupCrawl`] is constructed once at startup and handed to a front end (the
//! `pup` CLI or the browser bindings). It owns the storage port, every store,
//! the selection, and the notification channel, and is the only place where
//! cross-store effects happen, such as the "hidden by your filters" toast
//! after an edit.

use crate::ids::TokenGenerator;
use crate::models::dataset::DatasetRecord;
use crate::models::{
    Category, CategoryFilter, Filter, Location, NewLocation, PawRating, Plan, PrivateNote, Report,
};
use crate::notifications::{NotificationChannel, Toast, ToastAction};
use crate::share::{self, Clipboard};
use crate::storage::Storage;
use crate::store::{FilterState, ItineraryManager, LocationStore, Selection, export_directions_url};
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;

/// Result of sharing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub code: String,
    pub url: String,
    /// Whether the link made it onto the clipboard
    pub copied: bool,
}

pub struct PupCrawl {
    storage: Storage,
    locations: LocationStore,
    filter: FilterState,
    plans: ItineraryManager,
    selection: Selection,
    notifications: NotificationChannel,
    tokens: Box<dyn TokenGenerator>,
}

impl std::fmt::Debug for PupCrawl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PupCrawl")
            .field("storage", &self.storage)
            .field("locations", &self.locations.len())
            .field("plans", &self.plans.all().len())
            .field("filter", &self.filter.current())
            .field("selection", &self.selection)
            .finish()
    }
}

impl PupCrawl {
    /// Load all state from `storage` and the dataset `records`.
    pub fn open(
        storage: Storage,
        records: Vec<DatasetRecord>,
        tokens: Box<dyn TokenGenerator>,
    ) -> Self {
        let mut locations = LocationStore::new();
        locations.initialize(records, &storage);
        let filter = FilterState::load(&storage);
        let plans = ItineraryManager::load(&storage);

        tracing::debug!(
            backend = %storage.backend_type(),
            location = %storage.location(),
            "opened pupcrawl"
        );

        Self {
            storage,
            locations,
            filter,
            plans,
            selection: Selection::new(),
            notifications: NotificationChannel::new(),
            tokens,
        }
    }

    /// Give the storage back, dropping in-memory state.
    pub fn into_storage(self) -> Storage {
        self.storage
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn locations(&self) -> &LocationStore {
        &self.locations
    }

    pub fn plans(&self) -> &ItineraryManager {
        &self.plans
    }

    pub fn filter(&self) -> Filter {
        self.filter.current()
    }

    /// Locations passing the active filter.
    pub fn visible_locations(&self) -> Vec<&Location> {
        self.locations.filtered_view(&self.filter.current())
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.get(id)
    }

    pub fn note(&self, location_id: &str) -> Option<&PrivateNote> {
        self.locations.note(location_id)
    }

    // Locations

    /// Add a user-supplied location. Duplicates of an existing name and
    /// coordinates are ignored.
    pub fn add_location(&mut self, candidate: NewLocation) -> Result<Option<&Location>> {
        self.locations.add_location(candidate, &mut self.storage)
    }

    /// Change a location's rating, warning if the edit hides it.
    pub fn update_rating(&mut self, id: &str, rating: PawRating) -> Result<bool> {
        if !self.locations.update_rating(id, rating, &mut self.storage)? {
            return Ok(false);
        }
        self.notify_if_hidden(id);
        Ok(true)
    }

    /// Change a location's category, warning if the edit hides it.
    pub fn update_category(&mut self, id: &str, category: Category) -> Result<bool> {
        if !self.locations.update_category(id, category, &mut self.storage)? {
            return Ok(false);
        }
        self.notify_if_hidden(id);
        Ok(true)
    }

    fn notify_if_hidden(&mut self, id: &str) {
        let filter = self.filter.current();
        let Some(location) = self.locations.get(id) else {
            return;
        };
        if filter.matches(location) {
            return;
        }
        let message = format!("{} is hidden by your current filters", location.name);
        self.notifications
            .notify(message, Some(ToastAction::ResetFilters));
    }

    pub fn set_note(&mut self, location_id: &str, content: &str) -> Result<bool> {
        self.locations.set_note(location_id, content, &mut self.storage)
    }

    /// File a report about a listing.
    ///
    /// Reports are not stored; they are emitted as a structured log event.
    pub fn send_report(
        &mut self,
        location_id: &str,
        issue: &str,
        contact_email: Option<&str>,
    ) -> Result<Report> {
        let issue = issue.trim();
        if issue.is_empty() {
            return Err(Error::InvalidInput("Report issue cannot be empty".to_string()));
        }

        let report = Report {
            location_id: location_id.to_string(),
            location_name: self.locations.get(location_id).map(|l| l.name.clone()),
            issue: issue.to_string(),
            contact_email: contact_email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            created_at: Utc::now(),
        };

        tracing::info!(
            location_id = %report.location_id,
            location_name = report.location_name.as_deref().unwrap_or("unknown"),
            issue = %report.issue,
            contact = report.contact_email.is_some(),
            "location report"
        );
        self.notifications
            .notify("Thanks! Your report has been sent.", None);
        Ok(report)
    }

    // Filter

    pub fn set_filter(&mut self, filter: Filter) -> Result<()> {
        self.filter.set(filter, &mut self.storage)
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) -> Result<()> {
        self.filter.set_category(category, &mut self.storage)
    }

    pub fn toggle_min_rating(&mut self, rating: u8) -> Result<()> {
        self.filter.toggle_min_rating(rating, &mut self.storage)
    }

    pub fn reset_filter(&mut self) -> Result<()> {
        self.filter.reset(&mut self.storage)
    }

    // Selection

    /// Select a location; unknown IDs select nothing.
    pub fn select_location(&mut self, id: Option<&str>) -> bool {
        self.selection.select_location(id, &self.locations)
    }

    /// Activate a plan; unknown IDs deactivate.
    pub fn select_plan(&mut self, id: Option<&str>) -> bool {
        self.selection.select_plan(id, &self.plans)
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.selection.location(&self.locations)
    }

    pub fn active_plan(&self) -> Option<&Plan> {
        self.selection.plan(&self.plans)
    }

    // Plans

    /// Create a plan and make it active. Blank names are ignored.
    pub fn create_plan(&mut self, name: &str) -> Result<Option<&Plan>> {
        let id = match self
            .plans
            .create(name, &mut *self.tokens, &mut self.storage)?
        {
            Some(plan) => plan.id.clone(),
            None => return Ok(None),
        };
        self.selection.select_plan(Some(&id), &self.plans);
        Ok(self.plans.get(&id))
    }

    /// Add a known location to a plan.
    pub fn add_to_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool> {
        if self.locations.get(location_id).is_none() {
            return Ok(false);
        }
        self.plans
            .add_location(plan_id, location_id, &mut self.storage)
    }

    pub fn remove_from_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool> {
        self.plans
            .remove_location(plan_id, location_id, &mut self.storage)
    }

    pub fn reorder_plan(&mut self, plan_id: &str, from: usize, to: usize) -> Result<bool> {
        self.plans.reorder(plan_id, from, to, &mut self.storage)
    }

    pub fn set_plan_notes(&mut self, plan_id: &str, text: &str) -> Result<bool> {
        self.plans.set_notes(plan_id, text, &mut self.storage)
    }

    pub fn rename_plan(&mut self, plan_id: &str, name: &str) -> Result<bool> {
        self.plans.rename(plan_id, name, &mut self.storage)
    }

    pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool> {
        self.plans.delete(plan_id, &mut self.storage)
    }

    pub fn generate_share_code(&mut self, plan_id: &str) -> Result<Option<String>> {
        self.plans
            .generate_share_code(plan_id, &mut *self.tokens, &mut self.storage)
    }

    pub fn resolve_share_code(&self, code: &str) -> Option<&Plan> {
        self.plans.resolve_share_code(code)
    }

    /// Activate the plan named by a share link or bare code.
    ///
    /// Leaves the selection untouched when nothing matches.
    pub fn open_shared(&mut self, input: &str) -> Option<&Plan> {
        let code = share::share_code_from_input(input)?;
        let Some(id) = self.plans.resolve_share_code(&code).map(|p| p.id.clone()) else {
            tracing::debug!(%code, "share code not found locally");
            return None;
        };
        self.selection.select_plan(Some(&id), &self.plans);
        self.plans.get(&id)
    }

    /// Generate a fresh share link for a plan and try to copy it.
    ///
    /// Clipboard failures become a warning toast; the link is still returned.
    pub fn share_plan(
        &mut self,
        plan_id: &str,
        origin: &str,
        clipboard: &mut dyn Clipboard,
    ) -> Result<Option<ShareLink>> {
        let Some(code) = self.generate_share_code(plan_id)? else {
            return Ok(None);
        };
        let url = share::share_url(origin, &code);

        let copied = match clipboard.copy(&url) {
            Ok(()) => {
                self.notifications
                    .notify("Share link copied to clipboard", None);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "clipboard copy failed");
                self.notifications
                    .warn(format!("Couldn't copy to clipboard. Share this link: {}", url));
                false
            }
        };

        Ok(Some(ShareLink { code, url, copied }))
    }

    /// Directions URL for a plan, or `None` if the plan does not exist.
    pub fn export_directions(&self, plan_id: &str, base_url: &str) -> Option<String> {
        let plan = self.plans.get(plan_id)?;
        Some(export_directions_url(plan, &self.locations, base_url))
    }

    // Notifications

    pub fn notify(&mut self, message: impl Into<String>, action: Option<ToastAction>) {
        self.notifications.notify(message, action);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.notifications.warn(message);
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.notifications.current()
    }

    pub fn dismiss_toast(&mut self) {
        self.notifications.dismiss();
    }

    /// Run the action bound to the visible toast, if any.
    pub fn run_toast_action(&mut self) -> Result<Option<ToastAction>> {
        let action = self.notifications.take_action();
        match action {
            Some(ToastAction::ResetFilters) => self.reset_filter()?,
            None => {}
        }
        Ok(action)
    }
}
