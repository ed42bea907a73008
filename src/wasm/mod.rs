//! WASM module for the pupcrawl browser build.
//!
//! The page's JavaScript owns rendering (map, markers, geolocation, dialogs).
//! This module owns state: it runs the same [`PupCrawl`](crate::PupCrawl)
//! core as the CLI, persisted to `localStorage`.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │ JavaScript: map, UI events, clipboard     │
//! └────────────────────┬──────────────────────┘
//!                      │ wasm-bindgen (JSON strings)
//! ┌────────────────────▼──────────────────────┐
//! │ PupCrawlApp → WebSession → PupCrawl       │
//! └────────────────────┬──────────────────────┘
//!                      │ Storage port
//! ┌────────────────────▼──────────────────────┐
//! │ LocalStorageBackend (pupcrawl_* keys)     │
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! Built with `wasm-pack build --target web -- --features wasm`:
//!
//! ```javascript
//! import init, { PupCrawlApp } from './pupcrawl.js';
//!
//! await init();
//! const app = new PupCrawlApp();
//! const visible = JSON.parse(app.locations(false));
//! ```

// Bindings module - includes both wasm_bindgen exports for wasm32 and
// the session wrapper for testing on all platforms
mod bindings;

pub use bindings::*;

/// Initialize WASM panic hook for better error messages in browser console
#[cfg(target_arch = "wasm32")]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Version information for the WASM module
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
