//! Range query evaluation over a built `FacetIndex`
//!
//! Each filter produces a bitmap of matching record ordinals from its posting list.
//! The result is the intersection of those bitmaps, and the facet view is the index
//! scoped to the survivors.

use crate::error::FacetResult;
use crate::index::{FacetIndex, FacetKey};
use crate::serialization::{encode_groups, encode_ids};
use crate::types::{Query, RangeFilter};
use roaring::RoaringBitmap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Matching ids plus the facet view restricted to them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Matching record ids, in ingestion order
    pub ids: Vec<String>,
    /// Groups, facets and value sets over the matching records only. An empty
    /// query shares the queried index instead of copying it.
    pub facets: Arc<FacetIndex>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Wire form: the ids JSON array and the scoped groups JSON object
    pub fn to_wire(&self) -> FacetResult<(String, String)> {
        Ok((encode_ids(&self.ids)?, encode_groups(&self.facets)?))
    }
}

pub struct QueryEngine;

impl QueryEngine {
    /// Evaluate a conjunction of range filters against `index`.
    ///
    /// An empty query returns every id and the unscoped index. A filter on an
    /// unknown facet matches nothing, which empties the whole result.
    #[instrument(skip(index, query), fields(filters = query.len()))]
    pub fn query(index: &Arc<FacetIndex>, query: &Query) -> FacetResult<QueryResult> {
        if query.is_empty() {
            debug!(records = index.record_count(), "Empty query returns the full index");
            return Ok(QueryResult { ids: index.ids().to_vec(), facets: Arc::clone(index) });
        }

        let mut matched: Option<RoaringBitmap> = None;
        for filter in &query.filters {
            let candidates = Self::matching_records(index, filter)?;
            debug!(
                facet_group = %filter.facet_group,
                facet = %filter.facet,
                candidates = candidates.len(),
                "Evaluated filter"
            );

            let narrowed = match matched {
                Some(mut acc) => {
                    acc &= candidates;
                    acc
                }
                None => candidates,
            };
            let exhausted = narrowed.is_empty();
            matched = Some(narrowed);
            if exhausted {
                break;
            }
        }

        let matched = matched.unwrap_or_default();
        let result = QueryResult {
            ids: index.ids_for(&matched),
            facets: Arc::new(index.scoped(&matched)),
        };

        info!(
            matched = result.ids.len(),
            groups = result.facets.groups().len(),
            "Completed range query"
        );
        Ok(result)
    }

    /// Ordinals of records with at least one posting inside the filter's range
    pub fn matching_records(index: &FacetIndex, filter: &RangeFilter) -> FacetResult<RoaringBitmap> {
        let key = FacetKey::new(&filter.facet_group, &filter.facet);
        let mut records = RoaringBitmap::new();
        for posting in index.postings(&key) {
            if records.contains(posting.record) {
                continue;
            }
            if filter.admits(posting.numeric_value()?) {
                records.insert(posting.record);
            }
        }
        Ok(records)
    }
}
