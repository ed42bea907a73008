//! Application state stores.
//!
//! Each store owns one slice of state and writes it through the storage
//! port on every mutation.

pub mod filter;
pub mod locations;
pub mod plans;
pub mod selection;

pub use filter::FilterState;
pub use locations::LocationStore;
pub use plans::{DEFAULT_DIRECTIONS_URL, ItineraryManager, export_directions_url};
pub use selection::Selection;
