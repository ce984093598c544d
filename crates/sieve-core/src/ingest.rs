//! Ingestion boundary: JSON text in, `FacetIndex` out
//!
//! Every failure here is fatal for the whole call. Nothing is built until the
//! input has been decoded and checked against the configured limits.

use crate::config::{EngineConfig, LimitsConfig};
use crate::error::{FacetError, FacetResult};
use crate::extract::FacetExtractor;
use crate::index::{FacetIndex, FacetIndexBuilder};
use crate::types::FacetPath;
use sieve_types::RecordValue;
use tracing::{debug, instrument};

/// Decode ingest text into records. Blank text is an empty batch.
///
/// The text must be a JSON array whose elements are all objects.
pub fn decode_records(json: &str) -> FacetResult<Vec<RecordValue>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(json).map_err(|err| {
        FacetError::InvalidJson {
            message: err.to_string(),
            line: Some(err.line()),
            column: Some(err.column()),
        }
    })?;

    let serde_json::Value::Array(items) = &value else {
        return Err(FacetError::invalid_json(format!(
            "expected an array of records, found {}",
            json_type_name(&value)
        )));
    };

    items
        .iter()
        .enumerate()
        .map(|(record_index, item)| {
            if !item.is_object() {
                return Err(FacetError::invalid_json(format!(
                    "record {record_index} is {}, expected an object",
                    json_type_name(item)
                )));
            }
            RecordValue::try_from(item).map_err(|err| {
                FacetError::invalid_json(format!("record {record_index}: {err}"))
            })
        })
        .collect()
}

/// Build an index from JSON text with default limits and lenient bound paths
pub fn ingest(json: &str, facet_path: &FacetPath) -> FacetResult<FacetIndex> {
    ingest_with_config(json, &EngineConfig::new(facet_path.clone()))
}

/// Build an index from JSON text under `config`
#[instrument(skip(json, config), fields(input_bytes = json.len(), strict = config.strict_paths))]
pub fn ingest_with_config(json: &str, config: &EngineConfig) -> FacetResult<FacetIndex> {
    check_input_size(json, &config.limits)?;

    let records = decode_records(json)?;
    if records.len() > config.limits.max_records {
        return Err(FacetError::limit_exceeded(
            config.limits.max_records,
            records.len(),
            "too many records in ingest batch",
        ));
    }
    debug!(records = records.len(), "Decoded ingest batch");

    let extractor = FacetExtractor::new(&config.facet_path).strict(config.strict_paths);
    FacetIndexBuilder::build_with(&records, &extractor)
}

fn check_input_size(json: &str, limits: &LimitsConfig) -> FacetResult<()> {
    if json.len() > limits.max_input_bytes {
        return Err(FacetError::limit_exceeded(
            limits.max_input_bytes,
            json.len(),
            "ingest input is too large",
        ));
    }
    Ok(())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
