//! Facet index: the group/facet/value-set tree plus the inverted index used by queries
//!
//! Both structures are filled by the same pass over the extracted bounds, so every
//! value in a facet's value set has at least one posting and vice versa.

use crate::error::{FacetError, FacetResult};
use crate::extract::FacetExtractor;
use crate::types::{ExtractedRecord, FacetGroup, FacetPath};
use roaring::RoaringBitmap;
use sieve_types::RecordValue;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Dense ordinal assigned to each distinct record id, in first-seen order
pub type RecordOrdinal = u32;

/// Inverted index key: case-folded facet group and facet names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetKey {
    pub facet_group: String,
    pub facet: String,
}

impl FacetKey {
    /// Build a key, case-folding both names
    pub fn new(facet_group: &str, facet: &str) -> Self {
        Self { facet_group: facet_group.to_lowercase(), facet: facet.to_lowercase() }
    }
}

/// One contribution of a record to a facet. A record contributing twice to the
/// same facet has two postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub record: RecordOrdinal,
    pub raw_value: String,
}

impl Posting {
    /// Numeric form of the raw value. Values were validated at build time, so a
    /// failure here is a broken invariant.
    pub fn numeric_value(&self) -> FacetResult<f64> {
        parse_facet_value(&self.raw_value).ok_or_else(|| {
            FacetError::internal_component(
                "facet_index",
                format!("stored facet value '{}' is not numeric", self.raw_value),
            )
        })
    }
}

/// Parse a raw facet value as a finite number
pub fn parse_facet_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// The built index. Immutable once built; queries only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetIndex {
    /// Facet groups keyed by case-folded `"name (metaName)"`
    groups: HashMap<String, FacetGroup>,
    /// Inverted index mapping (group, facet) -> contributing postings
    postings: HashMap<FacetKey, Vec<Posting>>,
    /// Record ids by ordinal, in first-seen order
    ids: Vec<String>,
    ordinals: HashMap<String, RecordOrdinal>,
}

impl FacetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &HashMap<String, FacetGroup> {
        &self.groups
    }

    pub fn group(&self, group_key: &str) -> Option<&FacetGroup> {
        self.groups.get(group_key)
    }

    /// Every record id seen during the build, in first-seen order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id_of(&self, ordinal: RecordOrdinal) -> Option<&str> {
        self.ids.get(ordinal as usize).map(String::as_str)
    }

    pub fn ordinal_of(&self, id: &str) -> Option<RecordOrdinal> {
        self.ordinals.get(id).copied()
    }

    /// Postings for a (group, facet) key; an unknown key has none
    pub fn postings(&self, key: &FacetKey) -> &[Posting] {
        self.postings.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn record_count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bitmap of every record ordinal
    pub fn all_records(&self) -> RoaringBitmap {
        (0..self.ids.len()).filter_map(|i| RecordOrdinal::try_from(i).ok()).collect()
    }

    /// Ids for a set of ordinals, in first-seen order
    pub fn ids_for(&self, records: &RoaringBitmap) -> Vec<String> {
        records.iter().filter_map(|ordinal| self.id_of(ordinal)).map(str::to_string).collect()
    }

    /// The index restricted to `records`: what is still available after narrowing.
    ///
    /// Groups, facets and value sets are rebuilt from the postings of the retained
    /// records only, and ordinals are renumbered densely.
    pub fn scoped(&self, records: &RoaringBitmap) -> FacetIndex {
        let mut scoped = FacetIndex::new();
        let mut renumbered: HashMap<RecordOrdinal, RecordOrdinal> =
            HashMap::with_capacity(records.len() as usize);

        for ordinal in records {
            if let Some(id) = self.id_of(ordinal) {
                renumbered.insert(ordinal, scoped.intern(id));
            }
        }

        for (key, postings) in &self.postings {
            for posting in postings {
                let Some(&record) = renumbered.get(&posting.record) else {
                    continue;
                };
                scoped.insert_posting(key, record, &posting.raw_value);
            }
        }

        scoped
    }

    /// Get statistics about the index
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            record_count: self.ids.len(),
            group_count: self.groups.len(),
            facet_count: self.groups.values().map(|group| group.facets.len()).sum(),
            posting_count: self.postings.values().map(Vec::len).sum(),
        }
    }

    fn intern(&mut self, id: &str) -> RecordOrdinal {
        if let Some(&ordinal) = self.ordinals.get(id) {
            return ordinal;
        }
        // Callers bound the record count before interning, see `FacetIndexBuilder::add_record`.
        let ordinal = self.ids.len() as RecordOrdinal;
        self.ids.push(id.to_string());
        self.ordinals.insert(id.to_string(), ordinal);
        ordinal
    }

    fn insert_posting(&mut self, key: &FacetKey, record: RecordOrdinal, raw_value: &str) {
        self.groups
            .entry(key.facet_group.clone())
            .or_insert_with(|| FacetGroup::new(key.facet_group.clone()))
            .add_value(&key.facet, raw_value);
        self.postings
            .entry(key.clone())
            .or_default()
            .push(Posting { record, raw_value: raw_value.to_string() });
    }
}

/// Statistics about a facet index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub record_count: usize,
    pub group_count: usize,
    pub facet_count: usize,
    pub posting_count: usize,
}

impl IndexStats {
    /// Get average postings per facet
    pub fn avg_postings_per_facet(&self) -> f64 {
        if self.facet_count == 0 {
            0.0
        } else {
            self.posting_count as f64 / self.facet_count as f64
        }
    }
}

/// Folds extracted records into a `FacetIndex`
#[derive(Debug, Default)]
pub struct FacetIndexBuilder {
    index: FacetIndex,
}

impl FacetIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record. The whole record is validated first, so a failed call
    /// leaves the builder unchanged.
    pub fn add_record(&mut self, record: &ExtractedRecord) -> FacetResult<()> {
        if self.index.ordinal_of(&record.id).is_none()
            && RecordOrdinal::try_from(self.index.ids.len()).is_err()
        {
            return Err(FacetError::limit_exceeded(
                RecordOrdinal::MAX as usize,
                self.index.ids.len() + 1,
                "too many distinct record ids",
            ));
        }

        let mut postings = Vec::new();
        for bound in &record.bounds {
            let group_key = bound.group_key();
            for (facet_name, raw_value) in &bound.values {
                let key = FacetKey { facet_group: group_key.clone(), facet: facet_name.to_lowercase() };
                if parse_facet_value(raw_value).is_none() {
                    return Err(FacetError::non_numeric(
                        &record.id,
                        &key.facet_group,
                        &key.facet,
                        raw_value,
                    ));
                }
                postings.push((key, raw_value.as_str()));
            }
        }

        let ordinal = self.index.intern(&record.id);
        for (key, raw_value) in &postings {
            self.index.insert_posting(key, ordinal, raw_value);
        }
        Ok(())
    }

    pub fn finish(self) -> FacetIndex {
        self.index
    }

    /// Build an index from decoded records
    #[instrument(skip(records, facet_path))]
    pub fn build(records: &[RecordValue], facet_path: &FacetPath) -> FacetResult<FacetIndex> {
        Self::build_with(records, &FacetExtractor::new(facet_path))
    }

    /// Build an index with a preconfigured extractor
    #[instrument(skip(records, extractor))]
    pub fn build_with(
        records: &[RecordValue],
        extractor: &FacetExtractor,
    ) -> FacetResult<FacetIndex> {
        info!(record_count = records.len(), "Building facet index");

        let mut builder = Self::new();
        for (record_index, record) in records.iter().enumerate() {
            let extracted = extractor.extract_bounds(record_index, record)?;
            debug!(id = %extracted.id, bounds = extracted.bounds.len(), "Folding record");
            builder.add_record(&extracted)?;
        }

        let index = builder.finish();
        let stats = index.stats();
        info!(
            records = stats.record_count,
            groups = stats.group_count,
            facets = stats.facet_count,
            postings = stats.posting_count,
            "Built facet index"
        );
        Ok(index)
    }
}
