//! CLI argument definitions for pupcrawl.

use crate::models::{Category, CategoryFilter, PawRating};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pupcrawl - find dog-friendly breweries and plan pub crawls.
///
/// Start with `pup location list` to see what passes your filters, then
/// `pup plan create` to start a crawl.
#[derive(Parser, Debug)]
#[command(name = "pup")]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PUP_GIT_COMMIT"), " ", env!("PUP_BUILD_TIMESTAMP"), ")"),
    about = "Find dog-friendly breweries and plan shareable pub crawls",
    long_about = None
)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Directory holding saved plans, overrides, and filters.
    /// Can also be set via PUP_DATA_DIR environment variable.
    #[arg(long = "data-dir", global = true, env = "PUP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Dataset file to load instead of the built-in breweries.
    /// Can also be set via PUP_DATASET or the `dataset` config key.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Location browsing and editing
    Location {
        #[command(subcommand)]
        command: LocationCommands,
    },

    /// Filter management
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// Pub crawl plans
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },

    /// Configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Location subcommands
#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List locations passing the active filter
    List {
        /// Ignore the active filter
        #[arg(long)]
        all: bool,
    },

    /// Show a location with its private note
    Show {
        /// Location ID (e.g., loc-3f9a1c2b7d0e)
        id: String,
    },

    /// Add a location not in the dataset
    Add {
        /// Display name
        name: String,

        /// Latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Where dogs are welcome: indoor, outdoor, or both
        #[arg(long = "type", short = 't', default_value = "outdoor")]
        category: Category,

        /// Paw rating (1-4)
        #[arg(long, short = 'r', default_value = "2")]
        rating: PawRating,

        /// Postal address, used for directions
        #[arg(long)]
        address: Option<String>,

        /// Link to a review site
        #[arg(long)]
        review_link: Option<String>,

        /// Description
        #[arg(long)]
        notes: Option<String>,
    },

    /// Set a location's paw rating
    Rate {
        /// Location ID
        id: String,

        /// Paw rating (1-4)
        rating: PawRating,
    },

    /// Set whether dogs are welcome indoors, outdoors, or both
    Categorize {
        /// Location ID
        id: String,

        /// indoor, outdoor, or both
        category: Category,
    },

    /// Set or clear your private note on a location
    Note {
        /// Location ID
        id: String,

        /// Note text (empty to clear)
        content: String,
    },

    /// Report a problem with a listing
    Report {
        /// Location ID
        id: String,

        /// What is wrong
        issue: String,

        /// Contact email for follow-up
        #[arg(long)]
        email: Option<String>,
    },
}

/// Filter subcommands
#[derive(Subcommand, Debug)]
pub enum FilterCommands {
    /// Show the active filter
    Show,

    /// Replace the active filter
    Set {
        /// all, indoor, or outdoor
        #[arg(long = "type", short = 't', default_value = "all")]
        category: CategoryFilter,

        /// Minimum paw rating (0 for none)
        #[arg(long, short = 'm', value_parser = clap::value_parser!(u8).range(0..=4))]
        min_rating: Option<u8>,
    },

    /// Restore the default filter (all, no minimum rating)
    Reset,

    /// Set the minimum rating, or clear it if already set to this value
    ToggleRating {
        /// Paw rating (1-4)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=4))]
        rating: u8,
    },
}

/// Plan subcommands
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// Create a new plan
    Create {
        /// Plan name
        name: String,
    },

    /// List plans
    List,

    /// Show a plan with its stops
    Show {
        /// Plan ID (e.g., plan-a1B2c3D4)
        id: String,
    },

    /// Add a location to the end of a plan
    Add {
        /// Plan ID
        plan_id: String,

        /// Location ID
        location_id: String,
    },

    /// Remove a location from a plan
    Remove {
        /// Plan ID
        plan_id: String,

        /// Location ID
        location_id: String,
    },

    /// Move a stop to a new position (0-based)
    Move {
        /// Plan ID
        plan_id: String,

        /// Current position
        from: usize,

        /// New position
        to: usize,
    },

    /// Replace a plan's notes (empty to clear)
    Notes {
        /// Plan ID
        plan_id: String,

        /// Note text
        text: String,
    },

    /// Rename a plan
    Rename {
        /// Plan ID
        plan_id: String,

        /// New name
        name: String,
    },

    /// Delete a plan
    Delete {
        /// Plan ID
        plan_id: String,
    },

    /// Generate a share link for a plan and copy it to the clipboard
    Share {
        /// Plan ID
        plan_id: String,

        /// Origin for the link (overrides the share-origin config)
        #[arg(long)]
        origin: Option<String>,

        /// Print the link without touching the clipboard
        #[arg(long)]
        no_copy: bool,
    },

    /// Open a plan from a share link or code
    Open {
        /// Share link (https://...?plan=CODE) or bare code
        link: String,
    },

    /// Build a directions URL visiting the plan's stops in order
    Export {
        /// Plan ID
        plan_id: String,

        /// Directions service base URL (overrides the directions-url config)
        #[arg(long)]
        base_url: Option<String>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration and where each value came from
    Show,
}
