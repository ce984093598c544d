use crate::constants::paths::DEFAULT_ID_PATH;
use crate::error::{FacetError, FacetResult};
use crate::path::DotPath;
use serde::{Deserialize, Serialize};
use sieve_types::UniqueStringSet;
use std::collections::HashMap;

/// Where to find the facet data inside each record.
///
/// `id` and `array` resolve from the record root; `name_field`, `name_meta` and
/// `value_map` resolve from the root of each bound found under `array`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetPath {
    pub id: String,
    #[serde(alias = "ArrayDotNotation")]
    pub array: String,
    #[serde(alias = "NameFieldDotNotation")]
    pub name_field: String,
    #[serde(alias = "NameMetaDotNotation")]
    pub name_meta: String,
    #[serde(alias = "ValueMapDotNotation")]
    pub value_map: String,
}

impl FacetPath {
    pub fn new(
        array: impl Into<String>,
        name_field: impl Into<String>,
        name_meta: impl Into<String>,
        value_map: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            array: array.into(),
            name_field: name_field.into(),
            name_meta: name_meta.into(),
            value_map: value_map.into(),
        }
    }

    /// Override the record id path
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Decode the JSON configuration object a caller hands across a binding
    pub fn from_json(config: &str) -> FacetResult<Self> {
        serde_json::from_str(config).map_err(|err| {
            FacetError::configuration("facet_path", format!("invalid facet path: {err}"))
        })
    }

    /// The id path, falling back to `"id"` when blank
    pub fn id_path(&self) -> DotPath {
        if self.id.trim().is_empty() {
            DotPath::parse(DEFAULT_ID_PATH)
        } else {
            DotPath::parse(&self.id)
        }
    }
}

/// One bound pulled out of a record, before it is folded into the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBound {
    pub name: String,
    pub meta_name: String,
    pub values: HashMap<String, String>,
}

impl ExtractedBound {
    /// Lower-cased `"name (metaName)"` key of the group this bound contributes to
    pub fn group_key(&self) -> String {
        group_key(&self.name, &self.meta_name)
    }

    /// Whether the bound is sparse data that contributes nothing
    pub fn is_skippable(&self) -> bool {
        self.name.trim().is_empty() || self.meta_name.trim().is_empty() || self.values.is_empty()
    }
}

/// A record's id together with its surviving bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub id: String,
    pub bounds: Vec<ExtractedBound>,
}

/// Build the case-folded facet group key for a name and meta-name
pub fn group_key(name: &str, meta_name: &str) -> String {
    format!("{name} ({meta_name})").to_lowercase()
}

/// A facet group: every bound with the same case-folded name and meta-name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGroup {
    pub name: String,
    pub facets: HashMap<String, Facet>,
}

impl FacetGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), facets: HashMap::new() }
    }

    /// Record a raw value under a facet, creating the facet on first sight
    pub fn add_value(&mut self, facet_key: &str, raw_value: &str) {
        self.facets
            .entry(facet_key.to_string())
            .or_insert_with(|| Facet::new(facet_key))
            .values
            .add(raw_value);
    }

    pub fn facet(&self, facet_key: &str) -> Option<&Facet> {
        self.facets.get(facet_key)
    }
}

/// A named numeric attribute and the distinct raw values seen for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    pub values: UniqueStringSet,
}

impl Facet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), values: UniqueStringSet::new() }
    }
}

/// One end of a range filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub value: f64,
    pub inclusive: bool,
}

impl Range {
    pub const fn inclusive(value: f64) -> Self {
        Self { value, inclusive: true }
    }

    pub const fn exclusive(value: f64) -> Self {
        Self { value, inclusive: false }
    }

    /// A lower bound every finite value passes
    pub const fn unbounded_below() -> Self {
        Self::exclusive(f64::NEG_INFINITY)
    }

    /// An upper bound every finite value passes
    pub const fn unbounded_above() -> Self {
        Self::exclusive(f64::INFINITY)
    }

    /// Test `value` against this range used as the minimum
    pub fn admits_as_min(&self, value: f64) -> bool {
        value > self.value || (self.inclusive && value == self.value)
    }

    /// Test `value` against this range used as the maximum
    pub fn admits_as_max(&self, value: f64) -> bool {
        value < self.value || (self.inclusive && value == self.value)
    }
}

/// A numeric bound on one facet of one facet group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter {
    pub facet_group: String,
    pub facet: String,
    pub min: Range,
    pub max: Range,
}

impl RangeFilter {
    /// Build a validated filter. Blank names or a NaN bound are rejected.
    pub fn new(
        facet_group: impl Into<String>,
        facet: impl Into<String>,
        min: Range,
        max: Range,
    ) -> FacetResult<Self> {
        let filter = Self { facet_group: facet_group.into(), facet: facet.into(), min, max };
        filter.validate()?;
        Ok(filter)
    }

    pub fn validate(&self) -> FacetResult<()> {
        if self.facet_group.trim().is_empty() {
            return Err(FacetError::invalid_filter(
                &self.facet_group,
                &self.facet,
                "facet group name is blank",
            ));
        }
        if self.facet.trim().is_empty() {
            return Err(FacetError::invalid_filter(
                &self.facet_group,
                &self.facet,
                "facet name is blank",
            ));
        }
        if self.min.value.is_nan() || self.max.value.is_nan() {
            return Err(FacetError::invalid_filter(
                &self.facet_group,
                &self.facet,
                "range bound is NaN",
            ));
        }
        Ok(())
    }

    /// Whether `value` lies within `[min, max]` under each end's inclusivity
    pub fn admits(&self, value: f64) -> bool {
        self.min.admits_as_min(value) && self.max.admits_as_max(value)
    }
}

/// A conjunction of range filters. Order only affects evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub filters: Vec<RangeFilter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style filter append
    pub fn with_filter(mut self, filter: RangeFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn push(&mut self, filter: RangeFilter) {
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

impl FromIterator<RangeFilter> for Query {
    fn from_iter<I: IntoIterator<Item = RangeFilter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}
