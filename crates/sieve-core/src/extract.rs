//! Pulls ids and bounds out of individual records
//!
//! Record-level paths (`id`, `array`) are strict: a blank id or a wrongly shaped value
//! aborts ingestion. Bound-level paths are lenient unless the extractor runs in strict
//! mode, which is how a `FacetPath` descriptor is checked against sample data.

use crate::error::{FacetError, FacetResult};
use crate::path::{DotPath, resolve_array, resolve_string, resolve_string_map};
use crate::types::{ExtractedBound, ExtractedRecord, FacetPath};
use sieve_types::RecordValue;
use tracing::{debug, trace};

/// Compiled form of a `FacetPath`, reused across every record of an ingest call
#[derive(Debug, Clone)]
pub struct FacetExtractor {
    id: DotPath,
    array: DotPath,
    name_field: DotPath,
    name_meta: DotPath,
    value_map: DotPath,
    strict: bool,
}

impl FacetExtractor {
    pub fn new(facet_path: &FacetPath) -> Self {
        Self {
            id: facet_path.id_path(),
            array: DotPath::parse(&facet_path.array),
            name_field: DotPath::parse(&facet_path.name_field),
            name_meta: DotPath::parse(&facet_path.name_meta),
            value_map: DotPath::parse(&facet_path.value_map),
            strict: false,
        }
    }

    /// Propagate bound-level type mismatches instead of skipping the bound
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn id_path(&self) -> &DotPath {
        &self.id
    }

    /// Extract the id and the surviving bounds of one record.
    ///
    /// `record_index` is the record's position in the ingested array and only
    /// feeds error context.
    pub fn extract_bounds(
        &self,
        record_index: usize,
        record: &RecordValue,
    ) -> FacetResult<ExtractedRecord> {
        let id = resolve_string(record, &self.id)?;
        if id.trim().is_empty() {
            return Err(FacetError::missing_record_id(record_index, self.id.to_string()));
        }

        let raw_bounds = resolve_array(record, &self.array)?;
        let mut bounds = Vec::with_capacity(raw_bounds.len());

        for (bound_index, raw_bound) in raw_bounds.iter().enumerate() {
            let bound = match self.extract_bound(raw_bound) {
                Ok(bound) => bound,
                Err(err) if !self.strict => {
                    debug!(id = %id, bound_index, error = %err, "Skipping malformed bound");
                    continue;
                }
                Err(err) => return Err(err),
            };

            if bound.is_skippable() {
                trace!(id = %id, bound_index, "Skipping sparse bound");
                continue;
            }
            bounds.push(bound);
        }

        Ok(ExtractedRecord { id, bounds })
    }

    fn extract_bound(&self, raw_bound: &RecordValue) -> FacetResult<ExtractedBound> {
        Ok(ExtractedBound {
            name: resolve_string(raw_bound, &self.name_field)?,
            meta_name: resolve_string(raw_bound, &self.name_meta)?,
            values: resolve_string_map(raw_bound, &self.value_map)?,
        })
    }
}
