//! `pup config` commands.

use super::{Output, to_json};
use crate::config::{ResolvedConfig, config_path};
use serde::Serialize;

#[derive(Serialize)]
pub struct ConfigShow {
    /// Path of config.kdl, whether or not it exists
    pub path: Option<String>,
    #[serde(flatten)]
    pub config: ResolvedConfig,
}

impl Output for ConfigShow {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let c = &self.config;
        let dataset = match &c.dataset {
            Some(r) => format!("{} ({})", r.value.display(), r.source),
            None => "built-in (default)".to_string(),
        };
        [
            format!(
                "Config file: {}",
                self.path.as_deref().unwrap_or("(none)")
            ),
            format!("output-format = {} ({})", c.output_format.value, c.output_format.source),
            format!("share-origin = {} ({})", c.share_origin.value, c.share_origin.source),
            format!("directions-url = {} ({})", c.directions_url.value, c.directions_url.source),
            format!("dataset = {}", dataset),
        ]
        .join("\n")
    }
}

pub fn show(config: &ResolvedConfig) -> ConfigShow {
    ConfigShow {
        path: config_path().map(|p| p.display().to_string()),
        config: config.clone(),
    }
}
