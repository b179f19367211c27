//! Runtime configuration for the dex.
//!
//! Defaults target PokeAPI and the Fire Red / Leaf Green version group. A RON file
//! named by `FRLG_DEX_CONFIG` may override any field, and a few environment
//! variables override the file.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "FRLG_DEX_CONFIG";
pub const BASE_URL_VAR: &str = "FRLG_DEX_BASE_URL";
pub const TIMEOUT_VAR: &str = "FRLG_DEX_TIMEOUT_SECS";
pub const CACHE_TTL_VAR: &str = "FRLG_DEX_CACHE_TTL_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    /// Root of the upstream API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. A timed-out lookup is reported like any other upstream failure.
    pub timeout_secs: u64,
    /// How long an upstream response stays cached. Zero keeps entries until evicted.
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    /// Version group whose learnsets are exposed.
    pub version_group: String,
    /// Game versions used for flavor text and wild encounters.
    pub versions: Vec<String>,
    /// Version groups preferred for move flavor text, in priority order.
    pub flavor_version_groups: Vec<String>,
    pub language: String,
    /// Highest national dex number available in the target games.
    pub max_dex_id: u32,
    pub default_list_limit: u32,
    pub max_list_limit: u32,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 86_400,
            cache_capacity: 512,
            version_group: "firered-leafgreen".to_string(),
            versions: vec!["firered".to_string(), "leafgreen".to_string()],
            flavor_version_groups: vec![
                "firered-leafgreen".to_string(),
                "ruby-sapphire".to_string(),
            ],
            language: "en".to_string(),
            max_dex_id: 386,
            default_list_limit: 151,
            max_list_limit: 251,
        }
    }
}

impl DexConfig {
    /// Loads the config file named by `FRLG_DEX_CONFIG` (if set), then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_VAR) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            self.timeout_secs = parse_secs(TIMEOUT_VAR, &value)?;
        }
        if let Some(value) = lookup(CACHE_TTL_VAR) {
            self.cache_ttl_secs = parse_secs(CACHE_TTL_VAR, &value)?;
        }
        Ok(())
    }
}

fn parse_secs(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}
