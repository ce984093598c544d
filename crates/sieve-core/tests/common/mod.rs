//! Shared fixtures for the integration tests
#![allow(dead_code)]

use sieve_core::FacetPath;

/// Install a fmt subscriber once per test binary; `RUST_LOG` controls output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn bounds_path() -> FacetPath {
    FacetPath::new("bounds", "name", "boundingType.name", "boundingType.measurements")
}

pub fn measurements_path() -> FacetPath {
    FacetPath::new("measurements", "measurementName", "metrics.metricName", "metrics.measurements")
}

/// Wrap fixtures into a JSON array
pub fn batch(objects: &[&str]) -> String {
    format!("[{}]", objects.join(","))
}

pub const OBJECT1: &str = r#"{
  "id": "object1",
  "bounds": [
    {"name": "total-area", "boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "15", "height": "20"}}},
    {"name": "head", "boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "15", "height": "5"}}},
    {"name": "shaft", "boundingType": {"name": "screwthread", "measurements": {"diameter": "10", "height": "15", "pitch": "1.5"}}}
  ]
}"#;

pub const OBJECT2: &str = r#"{
  "id": "object2",
  "bounds": [
    {"name": "total-area", "boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "16", "height": "20", "weird": "1"}}}
  ]
}"#;

pub const OBJECT3: &str = r#"{
  "id": "object3",
  "bounds": [
    {"name": "total-AREA", "boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "16", "height": "20", "Weird": "1"}}}
  ]
}"#;

pub const OBJECT4: &str = r#"{
  "id": "object4",
  "container": {
    "bounds": [
      {
        "container": {"name": "total-AREA"},
        "boundingType": {
          "container": {"name": "hex-cylinder"},
          "measurements": {"diameter": "16", "height": "20", "Weird": "1"}
        }
      }
    ]
  }
}"#;

pub const OBJECT5: &str = r#"{
  "id": "object5",
  "bounds": [
    {"name": "total-AREA", "boundingType": {"name": "hex-cylinder", "measurements": {}}}
  ]
}"#;

pub const OBJECT6: &str = r#"{
  "id": "object6",
  "bounds": [
    {"boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "16"}}}
  ]
}"#;

pub const OBJECT7: &str = r#"{
  "id": "object7",
  "bounds": [
    {"name": "total-AREA", "boundingType": {"name": "hex-cylinder", "measurements": {"diameter": "16"}}}
  ]
}"#;

pub const README_EXAMPLE: &str = r#"[
  {
    "id": "r1",
    "name": "record 1",
    "measurements": [
      {"measurementName": "area", "metrics": {"metricName": "cube", "measurements": {"side": "10"}}}
    ]
  },
  {
    "id": "r2",
    "name": "record 2",
    "measurements": [
      {"measurementName": "area", "metrics": {"metricName": "cube", "measurements": {"side": "20"}}}
    ]
  }
]"#;
