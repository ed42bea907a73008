//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`PUP_OUTPUT_FORMAT`, `PUP_SHARE_ORIGIN`,
//!    `PUP_DIRECTIONS_URL`, `PUP_DATASET`)
//! 3. config.kdl
//! 4. Built-in defaults

use crate::config::{OutputFormat, PupConfig};
use crate::share::DEFAULT_SHARE_ORIGIN;
use crate::store::DEFAULT_DIRECTIONS_URL;
use serde::Serialize;
use std::path::PathBuf;

pub const OUTPUT_FORMAT_ENV: &str = "PUP_OUTPUT_FORMAT";
pub const SHARE_ORIGIN_ENV: &str = "PUP_SHARE_ORIGIN";
pub const DIRECTIONS_URL_ENV: &str = "PUP_DIRECTIONS_URL";
pub const DATASET_ENV: &str = "PUP_DATASET";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

impl Serialize for ValueSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub output_format: Resolved<OutputFormat>,
    pub share_origin: Resolved<String>,
    pub directions_url: Resolved<String>,
    /// Dataset file; `None` means the built-in dataset
    pub dataset: Option<Resolved<PathBuf>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Json, ValueSource::Default),
            share_origin: Resolved::new(DEFAULT_SHARE_ORIGIN.to_string(), ValueSource::Default),
            directions_url: Resolved::new(
                DEFAULT_DIRECTIONS_URL.to_string(),
                ValueSource::Default,
            ),
            dataset: None,
        }
    }
}

impl ResolvedConfig {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn share_origin(&self) -> &str {
        &self.share_origin.value
    }

    pub fn directions_url(&self) -> &str {
        &self.directions_url.value
    }

    pub fn dataset(&self) -> Option<&PathBuf> {
        self.dataset.as_ref().map(|r| &r.value)
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_format: Option<OutputFormat>,
    pub share_origin: Option<String>,
    pub directions_url: Option<String>,
    pub dataset: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_share_origin(mut self, origin: impl Into<String>) -> Self {
        self.share_origin = Some(origin.into());
        self
    }

    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }
}

fn pick<T>(
    cli: Option<T>,
    env_name: &str,
    env: &dyn Fn(&str) -> Option<String>,
    parse_env: impl Fn(String) -> Option<T>,
    file: Option<T>,
) -> Option<Resolved<T>> {
    if let Some(value) = cli {
        return Some(Resolved::new(value, ValueSource::CliFlag));
    }
    if let Some(value) = env(env_name)
        .filter(|v| !v.trim().is_empty())
        .and_then(parse_env)
    {
        return Some(Resolved::new(
            value,
            ValueSource::EnvVar(env_name.to_string()),
        ));
    }
    file.map(|value| Resolved::new(value, ValueSource::ConfigFile))
}

/// Resolve configuration against the process environment.
pub fn resolve_config(file: &PupConfig, overrides: &ConfigOverrides) -> ResolvedConfig {
    resolve_config_with_env(file, overrides, &|name| std::env::var(name).ok())
}

/// Resolve configuration with an explicit environment lookup.
pub fn resolve_config_with_env(
    file: &PupConfig,
    overrides: &ConfigOverrides,
    env: &dyn Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let output_format = pick(
        overrides.output_format,
        OUTPUT_FORMAT_ENV,
        env,
        |v| OutputFormat::parse(&v),
        file.output_format,
    )
    .unwrap_or(defaults.output_format);

    let share_origin = pick(
        overrides.share_origin.clone(),
        SHARE_ORIGIN_ENV,
        env,
        Some,
        file.share_origin.clone(),
    )
    .unwrap_or(defaults.share_origin);

    let directions_url = pick(
        overrides.directions_url.clone(),
        DIRECTIONS_URL_ENV,
        env,
        Some,
        file.directions_url.clone(),
    )
    .unwrap_or(defaults.directions_url);

    let dataset = pick(
        overrides.dataset.clone(),
        DATASET_ENV,
        env,
        |v| Some(PathBuf::from(v)),
        file.dataset.as_ref().map(PathBuf::from),
    );

    ResolvedConfig {
        output_format,
        share_origin,
        directions_url,
        dataset,
    }
}
