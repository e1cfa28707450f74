//! Configuration loading.
//!
//! The configuration file is TOML with a single `[house]` table:
//!
//! ```toml
//! [house]
//! capacity = 4
//! ```
//!
//! Missing keys fall back to [`HouseConfig::default`]. Command-line flags
//! override values from the file.

use std::fs;
use std::path::Path;

use anyhow::Context;
use dues_tracker::HouseConfig;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub house: HouseConfig,
}

pub fn parse(text: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(text)
}

/// Resolve the household configuration from an optional file and overrides.
pub fn load(path: Option<&Path>, capacity: Option<usize>) -> anyhow::Result<HouseConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            parse(&text)
                .with_context(|| format!("parsing config file {}", path.display()))?
                .house
        }
        None => HouseConfig::default(),
    };

    if let Some(capacity) = capacity {
        config.capacity = capacity;
    }
    Ok(config)
}
