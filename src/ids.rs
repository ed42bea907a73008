//! ID and token generation.
//!
//! Location IDs are derived from the dedup key so a dataset record keeps the
//! same ID across reloads, which is what lets id-keyed overrides stick.
//! Plan IDs and share codes come from a [`TokenGenerator`] so tests can swap
//! in a deterministic source.

use crate::models::dedup_key;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};

/// Length of the random part of a plan ID.
pub const PLAN_ID_LEN: usize = 8;

/// Length of a share code.
pub const SHARE_CODE_LEN: usize = 10;

/// Source of opaque short tokens.
pub trait TokenGenerator {
    /// Produce a token of `len` URL-safe characters.
    fn token(&mut self, len: usize) -> String;
}

/// Random alphanumeric tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenGenerator for RandomTokens {
    fn token(&mut self, len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Zero-padded counter tokens: "00000001", "00000002", ...
#[derive(Debug, Default, Clone)]
pub struct SequentialTokens {
    next: u64,
}

impl SequentialTokens {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenGenerator for SequentialTokens {
    fn token(&mut self, len: usize) -> String {
        self.next += 1;
        format!("{:0>width$}", self.next, width = len)
    }
}

/// Generate a plan ID.
///
/// Format: `plan-<8 chars>`
pub fn plan_id(tokens: &mut dyn TokenGenerator) -> String {
    format!("plan-{}", tokens.token(PLAN_ID_LEN))
}

/// Generate a share code.
pub fn share_code(tokens: &mut dyn TokenGenerator) -> String {
    tokens.token(SHARE_CODE_LEN)
}

/// Derive the ID of a location from its name and coordinates.
///
/// Format: `loc-<12 hex chars>`
pub fn location_id(name: &str, coordinates: [f64; 2]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dedup_key(name, coordinates).as_bytes());
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("loc-{}", &hash_hex[..12])
}
