#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for the Sieve facet engine.
//!
//! This crate ingests JSON records, extracts numeric facets along configured
//! dot-notation paths into a faceted index, and answers conjunctive range queries
//! against it, returning matching ids together with the facets still available.

/// Engine configuration loading and environment overrides
pub mod config;
/// Core constants and defaults
pub mod constants;
/// Stateful faceting session over a swappable index
pub mod engine;
/// Structured error handling
pub mod error;
/// Per-record id and bound extraction
pub mod extract;
/// Facet index and its builder
pub mod index;
/// JSON ingestion boundary
pub mod ingest;
/// Dot-notation path resolution
pub mod path;
/// Range query evaluation
pub mod query;
/// Wire form of facet groups and ids
pub mod serialization;
/// Facet paths, groups, facets, ranges and queries
pub mod types;

pub use config::{EngineConfig, LimitsConfig};
pub use engine::FacetEngine;
pub use error::{ErrorSeverity, FacetError, FacetResult};
pub use extract::FacetExtractor;
pub use index::{FacetIndex, FacetIndexBuilder, FacetKey, IndexStats, Posting, RecordOrdinal};
pub use ingest::{decode_records, ingest, ingest_with_config};
pub use path::{DotPath, PathError};
pub use query::{QueryEngine, QueryResult};
pub use types::{
    ExtractedBound, ExtractedRecord, Facet, FacetGroup, FacetPath, Query, Range, RangeFilter,
};

pub use sieve_types::{RecordValue, UniqueStringSet};
