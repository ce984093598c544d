use crate::config::EngineConfig;
use crate::error::FacetResult;
use crate::index::FacetIndex;
use crate::ingest::ingest_with_config;
use crate::query::{QueryEngine, QueryResult};
use crate::types::{Query, Range, RangeFilter};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A faceting session: the current index plus the filters accumulated against it
#[derive(Debug, Clone, Default)]
pub struct FacetEngine {
    config: EngineConfig,
    index: Arc<FacetIndex>,
    filters: Query,
}

impl FacetEngine {
    /// Create an engine with an empty index
    #[instrument(skip(config))]
    pub fn new(config: EngineConfig) -> Self {
        info!(strict_paths = config.strict_paths, "Creating facet engine");
        Self { config, index: Arc::new(FacetIndex::new()), filters: Query::new() }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current index
    pub fn index(&self) -> &FacetIndex {
        &self.index
    }

    /// Shared handle to the current index. Later ingests do not affect it.
    pub fn snapshot(&self) -> Arc<FacetIndex> {
        Arc::clone(&self.index)
    }

    /// Replace the index with one built from `json`.
    ///
    /// On error the previous index and filters are left as they were.
    #[instrument(skip(self, json), fields(input_bytes = json.len()))]
    pub fn ingest(&mut self, json: &str) -> FacetResult<&FacetIndex> {
        let index = ingest_with_config(json, &self.config).inspect_err(|err| {
            warn!(category = err.category(), error = %err, "Ingest failed, keeping previous index");
        })?;

        if !self.filters.is_empty() {
            info!(cleared = self.filters.len(), "Clearing filters of the replaced index");
        }
        self.filters = Query::new();
        self.index = Arc::new(index);

        info!(records = self.index.record_count(), "Installed new facet index");
        Ok(&self.index)
    }

    /// Append a validated range filter to the current query
    #[instrument(skip(self))]
    pub fn add_filter(
        &mut self,
        facet_group: &str,
        facet: &str,
        min: Range,
        max: Range,
    ) -> FacetResult<()> {
        let filter = RangeFilter::new(facet_group, facet, min, max)?;
        self.filters.push(filter);
        info!(filter_count = self.filters.len(), "Added range filter");
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn clear_filters(&mut self) {
        info!(cleared = self.filters.len(), "Clearing range filters");
        self.filters = Query::new();
    }

    pub fn filters(&self) -> &Query {
        &self.filters
    }

    /// Evaluate the accumulated filters
    #[instrument(skip(self))]
    pub fn query(&self) -> FacetResult<QueryResult> {
        QueryEngine::query(&self.index, &self.filters)
    }

    /// Evaluate an explicit query, ignoring the accumulated filters
    pub fn query_with(&self, query: &Query) -> FacetResult<QueryResult> {
        QueryEngine::query(&self.index, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FacetError;
    use crate::types::FacetPath;

    const SCENARIO: &str = r#"[
        {"id":"r1","measurements":[{"measurementName":"area","metrics":{"metricName":"cube","measurements":{"side":"10"}}}]},
        {"id":"r2","measurements":[{"measurementName":"area","metrics":{"metricName":"cube","measurements":{"side":"20"}}}]}
    ]"#;

    fn engine() -> FacetEngine {
        FacetEngine::new(EngineConfig::new(FacetPath::new(
            "measurements",
            "measurementName",
            "metrics.metricName",
            "metrics.measurements",
        )))
    }

    #[test]
    fn test_ingest_then_query() {
        let mut engine = engine();
        let index = engine.ingest(SCENARIO).unwrap();
        assert_eq!(index.ids(), ["r1", "r2"]);

        engine.add_filter("area (cube)", "side", Range::inclusive(8.0), Range::exclusive(12.0)).unwrap();
        let result = engine.query().unwrap();
        assert_eq!(result.ids, ["r1"]);

        engine.clear_filters();
        assert!(engine.filters().is_empty());
        assert_eq!(engine.query().unwrap().ids, ["r1", "r2"]);
    }

    #[test]
    fn test_failed_ingest_keeps_previous_index() {
        let mut engine = engine();
        engine.ingest(SCENARIO).unwrap();
        engine.add_filter("area (cube)", "side", Range::inclusive(0.0), Range::inclusive(15.0)).unwrap();

        let err = engine.ingest("NOTJSON").unwrap_err();
        assert_eq!(err.category(), "invalid_json");
        assert_eq!(engine.index().ids(), ["r1", "r2"]);
        assert_eq!(engine.filters().len(), 1);
    }

    #[test]
    fn test_reingest_replaces_index_and_clears_filters() {
        let mut engine = engine();
        engine.ingest(SCENARIO).unwrap();
        let before = engine.snapshot();
        engine.add_filter("area (cube)", "side", Range::inclusive(0.0), Range::inclusive(15.0)).unwrap();

        engine.ingest(r#"[{"id":"r9"}]"#).unwrap();
        assert!(engine.filters().is_empty());
        assert_eq!(engine.index().ids(), ["r9"]);
        assert!(engine.index().groups().is_empty());
        // The old snapshot is untouched.
        assert_eq!(before.ids(), ["r1", "r2"]);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let mut engine = engine();
        let err = engine.add_filter("", "side", Range::inclusive(0.0), Range::inclusive(1.0)).unwrap_err();
        assert!(matches!(err, FacetError::InvalidFilter { .. }));
        assert!(!err.is_fatal());
        assert!(engine.filters().is_empty());
    }

    #[test]
    fn test_query_with_ignores_accumulated_filters() {
        let mut engine = engine();
        engine.ingest(SCENARIO).unwrap();
        engine.add_filter("area (cube)", "side", Range::inclusive(100.0), Range::inclusive(200.0)).unwrap();
        assert!(engine.query().unwrap().is_empty());
        assert_eq!(engine.query_with(&Query::new()).unwrap().ids, ["r1", "r2"]);
    }
}
