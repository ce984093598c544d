//! Core constants used throughout the Sieve facet engine
//!
//! Defaults and limits live here so configuration, ingestion and tests agree on them.

/// Path handling constants
pub mod paths {
    /// Record id path used when a `FacetPath` leaves `id` blank
    pub const DEFAULT_ID_PATH: &str = "id";

    /// Separator between keys in dot-notation paths
    pub const SEPARATOR: char = '.';
}

/// Ingestion limits
pub mod limits {
    /// Default maximum number of records accepted by one ingest call
    pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

    /// Default maximum size of the JSON text accepted by one ingest call (256MB)
    pub const DEFAULT_MAX_INPUT_BYTES: usize = 256 * 1024 * 1024;
}

/// Configuration loading constants
pub mod config {
    /// Environment variable naming the configuration file
    pub const CONFIG_PATH_ENV: &str = "SIEVE_CONFIG_PATH";

    /// Configuration file used when `SIEVE_CONFIG_PATH` is unset
    pub const DEFAULT_CONFIG_FILE: &str = "sieve.toml";
}
