//! JavaScript bindings for the browser build.
//!
//! [`WebSession`] is the platform-independent half: it wraps [`PupCrawl`] and
//! exchanges JSON strings, so it can be tested natively. On wasm32,
//! `PupCrawlApp` exposes it to JavaScript through wasm-bindgen.

use crate::app::PupCrawl;
use crate::ids::TokenGenerator;
use crate::models::dataset::DatasetRecord;
use crate::models::{Category, Filter, PawRating};
use crate::share;
use crate::storage::Storage;
use serde::Serialize;

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn err(e: crate::Error) -> String {
    e.to_string()
}

/// Browser-facing session over the app core.
///
/// Errors are returned as strings; the wasm layer turns them into
/// JavaScript exceptions.
#[derive(Debug)]
pub struct WebSession {
    app: PupCrawl,
}

impl WebSession {
    pub fn new(
        storage: Storage,
        records: Vec<DatasetRecord>,
        tokens: Box<dyn TokenGenerator>,
    ) -> Self {
        Self {
            app: PupCrawl::open(storage, records, tokens),
        }
    }

    pub fn app(&self) -> &PupCrawl {
        &self.app
    }

    /// Locations as a JSON array, filtered unless `all`.
    pub fn locations(&self, all: bool) -> Result<String, String> {
        if all {
            json(self.app.locations().all())
        } else {
            json(&self.app.visible_locations())
        }
    }

    pub fn filter(&self) -> Result<String, String> {
        json(&self.app.filter())
    }

    /// Replace the filter from its JSON form, e.g. `{"type":"indoor","minRating":3}`.
    pub fn set_filter(&mut self, filter_json: &str) -> Result<(), String> {
        let filter: Filter = serde_json::from_str(filter_json).map_err(|e| e.to_string())?;
        self.app.set_filter(filter).map_err(err)
    }

    pub fn reset_filter(&mut self) -> Result<(), String> {
        self.app.reset_filter().map_err(err)
    }

    pub fn toggle_min_rating(&mut self, rating: u8) -> Result<(), String> {
        self.app.toggle_min_rating(rating).map_err(err)
    }

    pub fn update_rating(&mut self, id: &str, rating: u8) -> Result<bool, String> {
        let rating = PawRating::try_from(rating)?;
        self.app.update_rating(id, rating).map_err(err)
    }

    pub fn update_category(&mut self, id: &str, category: &str) -> Result<bool, String> {
        let category: Category = category.parse()?;
        self.app.update_category(id, category).map_err(err)
    }

    pub fn set_note(&mut self, id: &str, content: &str) -> Result<bool, String> {
        self.app.set_note(id, content).map_err(err)
    }

    pub fn select_location(&mut self, id: Option<&str>) -> bool {
        self.app.select_location(id)
    }

    /// The selected location as JSON, or `None`.
    pub fn selected_location(&self) -> Result<Option<String>, String> {
        self.app.selected_location().map(json).transpose()
    }

    pub fn plans(&self) -> Result<String, String> {
        json(self.app.plans().all())
    }

    pub fn select_plan(&mut self, id: Option<&str>) -> bool {
        self.app.select_plan(id)
    }

    pub fn active_plan(&self) -> Result<Option<String>, String> {
        self.app.active_plan().map(json).transpose()
    }

    /// Create a plan, returning its ID. Blank names return `None`.
    pub fn create_plan(&mut self, name: &str) -> Result<Option<String>, String> {
        Ok(self
            .app
            .create_plan(name)
            .map_err(err)?
            .map(|plan| plan.id.clone()))
    }

    pub fn add_to_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool, String> {
        self.app.add_to_plan(plan_id, location_id).map_err(err)
    }

    pub fn remove_from_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool, String> {
        self.app.remove_from_plan(plan_id, location_id).map_err(err)
    }

    pub fn reorder_plan(&mut self, plan_id: &str, from: usize, to: usize) -> Result<bool, String> {
        self.app.reorder_plan(plan_id, from, to).map_err(err)
    }

    pub fn set_plan_notes(&mut self, plan_id: &str, text: &str) -> Result<bool, String> {
        self.app.set_plan_notes(plan_id, text).map_err(err)
    }

    pub fn rename_plan(&mut self, plan_id: &str, name: &str) -> Result<bool, String> {
        self.app.rename_plan(plan_id, name).map_err(err)
    }

    pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool, String> {
        self.app.delete_plan(plan_id).map_err(err)
    }

    /// Generate a share link for a plan.
    ///
    /// Copying is left to the page, which reports failures through
    /// [`clipboard_failed`](Self::clipboard_failed).
    pub fn share_link(&mut self, plan_id: &str, origin: &str) -> Result<Option<String>, String> {
        let code = self.app.generate_share_code(plan_id).map_err(err)?;
        Ok(code.map(|code| share::share_url(origin, &code)))
    }

    /// Tell the user the link could not be copied.
    pub fn clipboard_failed(&mut self, url: &str) {
        self.app
            .warn(format!("Couldn't copy to clipboard. Share this link: {}", url));
    }

    /// Activate the plan named by a share link or code; the plan JSON if found.
    pub fn open_shared(&mut self, input: &str) -> Result<Option<String>, String> {
        self.app.open_shared(input).map(json).transpose()
    }

    pub fn export_directions(&self, plan_id: &str, base_url: &str) -> Option<String> {
        self.app.export_directions(plan_id, base_url)
    }

    pub fn send_report(
        &mut self,
        location_id: &str,
        issue: &str,
        contact_email: Option<&str>,
    ) -> Result<String, String> {
        let report = self
            .app
            .send_report(location_id, issue, contact_email)
            .map_err(err)?;
        json(&report)
    }

    /// The visible toast as JSON, or `None`.
    pub fn toast(&self) -> Result<Option<String>, String> {
        self.app.toast().map(json).transpose()
    }

    pub fn dismiss_toast(&mut self) {
        self.app.dismiss_toast();
    }

    /// Run the visible toast's action; returns whether one ran.
    pub fn run_toast_action(&mut self) -> Result<bool, String> {
        Ok(self.app.run_toast_action().map_err(err)?.is_some())
    }
}

#[cfg(target_arch = "wasm32")]
mod js {
    use super::WebSession;
    use crate::ids::RandomTokens;
    use crate::models::dataset;
    use crate::storage::{LocalStorageBackend, Storage};
    use wasm_bindgen::prelude::*;

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// pupcrawl state exposed to JavaScript.
    #[wasm_bindgen]
    pub struct PupCrawlApp {
        session: WebSession,
    }

    #[wasm_bindgen]
    impl PupCrawlApp {
        /// Open the app over localStorage and the embedded dataset, then
        /// activate any plan named in the page's `?plan=` parameter.
        #[wasm_bindgen(constructor)]
        pub fn new() -> Result<PupCrawlApp, JsValue> {
            super::super::init_panic_hook();

            let storage = Storage::new(LocalStorageBackend::new().map_err(js_err)?);
            let records = dataset::builtin().map_err(js_err)?;
            let mut session = WebSession::new(storage, records, Box::new(RandomTokens));

            if let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) {
                if !search.is_empty() {
                    session.open_shared(&search).map_err(js_err)?;
                }
            }

            Ok(PupCrawlApp { session })
        }

        pub fn locations(&self, all: bool) -> Result<String, JsValue> {
            self.session.locations(all).map_err(js_err)
        }

        pub fn filter(&self) -> Result<String, JsValue> {
            self.session.filter().map_err(js_err)
        }

        #[wasm_bindgen(js_name = setFilter)]
        pub fn set_filter(&mut self, filter_json: &str) -> Result<(), JsValue> {
            self.session.set_filter(filter_json).map_err(js_err)
        }

        #[wasm_bindgen(js_name = resetFilter)]
        pub fn reset_filter(&mut self) -> Result<(), JsValue> {
            self.session.reset_filter().map_err(js_err)
        }

        #[wasm_bindgen(js_name = toggleMinRating)]
        pub fn toggle_min_rating(&mut self, rating: u8) -> Result<(), JsValue> {
            self.session.toggle_min_rating(rating).map_err(js_err)
        }

        #[wasm_bindgen(js_name = updateRating)]
        pub fn update_rating(&mut self, id: &str, rating: u8) -> Result<bool, JsValue> {
            self.session.update_rating(id, rating).map_err(js_err)
        }

        #[wasm_bindgen(js_name = updateCategory)]
        pub fn update_category(&mut self, id: &str, category: &str) -> Result<bool, JsValue> {
            self.session.update_category(id, category).map_err(js_err)
        }

        #[wasm_bindgen(js_name = setNote)]
        pub fn set_note(&mut self, id: &str, content: &str) -> Result<bool, JsValue> {
            self.session.set_note(id, content).map_err(js_err)
        }

        #[wasm_bindgen(js_name = selectLocation)]
        pub fn select_location(&mut self, id: Option<String>) -> bool {
            self.session.select_location(id.as_deref())
        }

        #[wasm_bindgen(js_name = selectedLocation)]
        pub fn selected_location(&self) -> Result<Option<String>, JsValue> {
            self.session.selected_location().map_err(js_err)
        }

        pub fn plans(&self) -> Result<String, JsValue> {
            self.session.plans().map_err(js_err)
        }

        #[wasm_bindgen(js_name = selectPlan)]
        pub fn select_plan(&mut self, id: Option<String>) -> bool {
            self.session.select_plan(id.as_deref())
        }

        #[wasm_bindgen(js_name = activePlan)]
        pub fn active_plan(&self) -> Result<Option<String>, JsValue> {
            self.session.active_plan().map_err(js_err)
        }

        #[wasm_bindgen(js_name = createPlan)]
        pub fn create_plan(&mut self, name: &str) -> Result<Option<String>, JsValue> {
            self.session.create_plan(name).map_err(js_err)
        }

        #[wasm_bindgen(js_name = addToPlan)]
        pub fn add_to_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool, JsValue> {
            self.session.add_to_plan(plan_id, location_id).map_err(js_err)
        }

        #[wasm_bindgen(js_name = removeFromPlan)]
        pub fn remove_from_plan(&mut self, plan_id: &str, location_id: &str) -> Result<bool, JsValue> {
            self.session.remove_from_plan(plan_id, location_id).map_err(js_err)
        }

        #[wasm_bindgen(js_name = reorderPlan)]
        pub fn reorder_plan(&mut self, plan_id: &str, from: usize, to: usize) -> Result<bool, JsValue> {
            self.session.reorder_plan(plan_id, from, to).map_err(js_err)
        }

        #[wasm_bindgen(js_name = setPlanNotes)]
        pub fn set_plan_notes(&mut self, plan_id: &str, text: &str) -> Result<bool, JsValue> {
            self.session.set_plan_notes(plan_id, text).map_err(js_err)
        }

        #[wasm_bindgen(js_name = renamePlan)]
        pub fn rename_plan(&mut self, plan_id: &str, name: &str) -> Result<bool, JsValue> {
            self.session.rename_plan(plan_id, name).map_err(js_err)
        }

        #[wasm_bindgen(js_name = deletePlan)]
        pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool, JsValue> {
            self.session.delete_plan(plan_id).map_err(js_err)
        }

        /// Share link for a plan, built against the page's origin.
        #[wasm_bindgen(js_name = shareLink)]
        pub fn share_link(&mut self, plan_id: &str) -> Result<Option<String>, JsValue> {
            let origin = web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default();
            self.session.share_link(plan_id, &origin).map_err(js_err)
        }

        #[wasm_bindgen(js_name = clipboardFailed)]
        pub fn clipboard_failed(&mut self, url: &str) {
            self.session.clipboard_failed(url);
        }

        #[wasm_bindgen(js_name = openShared)]
        pub fn open_shared(&mut self, input: &str) -> Result<Option<String>, JsValue> {
            self.session.open_shared(input).map_err(js_err)
        }

        #[wasm_bindgen(js_name = exportDirections)]
        pub fn export_directions(&self, plan_id: &str, base_url: &str) -> Option<String> {
            self.session.export_directions(plan_id, base_url)
        }

        #[wasm_bindgen(js_name = sendReport)]
        pub fn send_report(
            &mut self,
            location_id: &str,
            issue: &str,
            contact_email: Option<String>,
        ) -> Result<String, JsValue> {
            self.session
                .send_report(location_id, issue, contact_email.as_deref())
                .map_err(js_err)
        }

        pub fn toast(&self) -> Result<Option<String>, JsValue> {
            self.session.toast().map_err(js_err)
        }

        #[wasm_bindgen(js_name = dismissToast)]
        pub fn dismiss_toast(&mut self) {
            self.session.dismiss_toast();
        }

        #[wasm_bindgen(js_name = runToastAction)]
        pub fn run_toast_action(&mut self) -> Result<bool, JsValue> {
            self.session.run_toast_action().map_err(js_err)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use js::PupCrawlApp;
