use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::logging::LoggingConfig;
use crate::profile::ProfileConfig;
use crate::shapes::ShapeConfig;
use crate::validate;

// ---------------------------------------------------------------------------
// Raw TOML structure (intermediate representation)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CustomizerConfigRaw {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    shapes: HashMap<String, ShapeConfig>,
    #[serde(default, rename = "profile")]
    profiles: Vec<ProfileConfig>,
}

// ---------------------------------------------------------------------------
// CustomizerConfig (resolved, validated)
// ---------------------------------------------------------------------------

/// Top-level `customizer.toml`: logging, shape declarations, and the layered
/// profile → set → rule tree the rule store is built from.
#[derive(Debug)]
pub struct CustomizerConfig {
    pub logging: LoggingConfig,
    pub shapes: HashMap<String, ShapeConfig>,
    pub profiles: Vec<ProfileConfig>,
}

impl CustomizerConfig {
    /// Read and parse a `customizer.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for CustomizerConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a resolved, validated [`CustomizerConfig`].
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: CustomizerConfigRaw = toml::from_str(toml_str)?;

        // Sort profiles by name for deterministic ordering.
        let mut profiles = raw.profiles;
        profiles.sort_by(|a, b| a.name.cmp(&b.name));

        let config = CustomizerConfig {
            logging: raw.logging,
            shapes: raw.shapes,
            profiles,
        };

        validate::validate(&config)?;

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
