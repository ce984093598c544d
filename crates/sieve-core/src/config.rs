use crate::constants::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::constants::limits::{DEFAULT_MAX_INPUT_BYTES, DEFAULT_MAX_RECORDS};
use crate::error::{FacetError, FacetResult};
use crate::types::FacetPath;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use tracing::{info, warn};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_records: default_max_records(), max_input_bytes: default_max_input_bytes() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub facet_path: FacetPath,
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Propagate type mismatches on bound-level paths instead of skipping the bound
    #[serde(default)]
    pub strict_paths: bool,
}

impl EngineConfig {
    pub fn new(facet_path: FacetPath) -> Self {
        Self { facet_path, ..Self::default() }
    }

    /// Load configuration from `SIEVE_CONFIG_PATH` (default `sieve.toml`).
    ///
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load() -> FacetResult<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        match fs::read_to_string(&config_path) {
            Ok(config_str) => Self::from_toml_str(&config_str),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    config_path
                );
                Ok(Self::default())
            }
            Err(err) => Err(FacetError::configuration(
                CONFIG_PATH_ENV,
                format!("cannot read '{config_path}': {err}"),
            )),
        }
    }

    pub fn from_toml_str(config_str: &str) -> FacetResult<Self> {
        Ok(toml::from_str(config_str)?)
    }

    pub fn apply_env(mut self) -> FacetResult<Self> {
        info!("Applying environment overrides to engine configuration.");

        // Facet path overrides
        if let Ok(id) = std::env::var("SIEVE_ID_PATH") {
            self.facet_path.id = id;
        }
        if let Ok(array) = std::env::var("SIEVE_ARRAY_PATH") {
            self.facet_path.array = array;
        }
        if let Ok(name_field) = std::env::var("SIEVE_NAME_FIELD_PATH") {
            self.facet_path.name_field = name_field;
        }
        if let Ok(name_meta) = std::env::var("SIEVE_NAME_META_PATH") {
            self.facet_path.name_meta = name_meta;
        }
        if let Ok(value_map) = std::env::var("SIEVE_VALUE_MAP_PATH") {
            self.facet_path.value_map = value_map;
        }

        // Behaviour and limit overrides
        if let Ok(strict) = std::env::var("SIEVE_STRICT_PATHS") {
            self.strict_paths = parse_env("SIEVE_STRICT_PATHS", &strict)?;
        }
        if let Ok(max_records) = std::env::var("SIEVE_MAX_RECORDS") {
            self.limits.max_records = parse_env("SIEVE_MAX_RECORDS", &max_records)?;
        }
        if let Ok(max_bytes) = std::env::var("SIEVE_MAX_INPUT_BYTES") {
            self.limits.max_input_bytes = parse_env("SIEVE_MAX_INPUT_BYTES", &max_bytes)?;
        }

        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, raw: &str) -> FacetResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| FacetError::configuration(name, format!("cannot parse '{raw}'")))
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}
fn default_max_input_bytes() -> usize {
    DEFAULT_MAX_INPUT_BYTES
}
