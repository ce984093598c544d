//! Dot-notation path resolution over `RecordValue` trees
//!
//! `resolve` walks one key at a time and reports a missing step as a `PathError`
//! instead of failing on a type assumption. The typed accessors turn a missing path
//! into an empty value, and only a resolved value of the wrong shape into an error.

use crate::constants::paths::SEPARATOR;
use crate::error::{FacetError, FacetResult};
use sieve_types::RecordValue;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A dot-separated sequence of object keys, parsed once
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotPath {
    segments: Vec<String>,
}

impl DotPath {
    /// Parse a dot-notation string. The empty string is one empty segment, so it
    /// only resolves against an object with a `""` key.
    pub fn parse(path: &str) -> Self {
        Self { segments: path.split(SEPARATOR).map(str::to_string).collect() }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl FromStr for DotPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for DotPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(&SEPARATOR.to_string()))
    }
}

/// Why a path did not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The key at `depth` is absent
    NotFound { segment: String, depth: usize },
    /// The value reached before `depth` is not an object, so `segment` cannot be looked up
    NotAnObject { segment: String, depth: usize, found: &'static str },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NotFound { segment, depth } => {
                write!(f, "key '{segment}' not found at depth {depth}")
            }
            PathError::NotAnObject { segment, depth, found } => {
                write!(f, "cannot look up '{segment}' at depth {depth} in a {found}")
            }
        }
    }
}

/// Follow `path` from `root` one key at a time
pub fn resolve<'a>(root: &'a RecordValue, path: &DotPath) -> Result<&'a RecordValue, PathError> {
    path.segments.iter().enumerate().try_fold(root, |current, (depth, segment)| {
        let object = current.as_object().ok_or_else(|| PathError::NotAnObject {
            segment: segment.clone(),
            depth,
            found: current.type_name(),
        })?;
        object
            .get(segment)
            .ok_or_else(|| PathError::NotFound { segment: segment.clone(), depth })
    })
}

/// Resolve a value, treating a missing path and an explicit `null` alike
fn resolve_present<'a>(root: &'a RecordValue, path: &DotPath) -> Option<&'a RecordValue> {
    resolve(root, path).ok().filter(|value| !value.is_null())
}

/// Resolve a string. Missing or `null` yields `""`.
pub fn resolve_string(root: &RecordValue, path: &DotPath) -> FacetResult<String> {
    match resolve_present(root, path) {
        None => Ok(String::new()),
        Some(RecordValue::String(s)) => Ok(s.clone()),
        Some(other) => Err(FacetError::type_mismatch(path.to_string(), "string", other.type_name())),
    }
}

/// Resolve an array. Missing or `null` yields an empty slice.
pub fn resolve_array<'a>(root: &'a RecordValue, path: &DotPath) -> FacetResult<&'a [RecordValue]> {
    match resolve_present(root, path) {
        None => Ok(&[]),
        Some(RecordValue::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(FacetError::type_mismatch(path.to_string(), "array", other.type_name())),
    }
}

/// Resolve an object as a map of strings. Missing or `null` yields an empty map.
///
/// Scalar entries are stringified and `null` entries dropped; an entry that is
/// itself an array or object is a type mismatch.
pub fn resolve_string_map(
    root: &RecordValue,
    path: &DotPath,
) -> FacetResult<HashMap<String, String>> {
    let object = match resolve_present(root, path) {
        None => return Ok(HashMap::new()),
        Some(RecordValue::Object(object)) => object,
        Some(other) => {
            return Err(FacetError::type_mismatch(path.to_string(), "object", other.type_name()));
        }
    };

    let mut values = HashMap::with_capacity(object.len());
    for (key, value) in object {
        if value.is_null() {
            continue;
        }
        let Some(text) = value.to_scalar_string() else {
            return Err(FacetError::type_mismatch(
                format!("{path}{SEPARATOR}{key}"),
                "scalar",
                value.type_name(),
            ));
        };
        values.insert(key.clone(), text);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RecordValue {
        RecordValue::try_from(&value).unwrap()
    }

    #[test]
    fn test_resolve_nested() {
        let root = record(json!({"metrics": {"metricName": "cube"}}));
        let value = resolve(&root, &DotPath::parse("metrics.metricName")).unwrap();
        assert_eq!(value.as_str(), Some("cube"));
    }

    #[test]
    fn test_resolve_single_segment_returns_value_directly() {
        let root = record(json!({"id": null}));
        assert!(resolve(&root, &DotPath::parse("id")).unwrap().is_null());
    }

    #[test]
    fn test_resolve_missing_key() {
        let root = record(json!({"a": {"b": 1}}));
        let err = resolve(&root, &DotPath::parse("a.c")).unwrap_err();
        assert_eq!(err, PathError::NotFound { segment: "c".to_string(), depth: 1 });
    }

    #[test]
    fn test_resolve_through_non_object() {
        let root = record(json!({"a": "leaf"}));
        let err = resolve(&root, &DotPath::parse("a.b")).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAnObject { segment: "b".to_string(), depth: 1, found: "string" }
        );
    }

    #[test]
    fn test_empty_path_is_the_empty_key() {
        let root = record(json!({"a": 1}));
        let err = resolve(&root, &DotPath::parse("")).unwrap_err();
        assert_eq!(err, PathError::NotFound { segment: String::new(), depth: 0 });

        let root = record(json!({"": {"": "deep"}}));
        assert_eq!(DotPath::parse("").segments(), [""]);
        let value = resolve(&root, &DotPath::parse(".")).unwrap();
        assert_eq!(value.as_str(), Some("deep"));
    }

    #[test]
    fn test_typed_accessors_default_when_missing() {
        let root = record(json!({"a": null}));
        assert_eq!(resolve_string(&root, &DotPath::parse("a")).unwrap(), "");
        assert_eq!(resolve_string(&root, &DotPath::parse("x.y")).unwrap(), "");
        assert!(resolve_array(&root, &DotPath::parse("a")).unwrap().is_empty());
        assert!(resolve_string_map(&root, &DotPath::parse("nope")).unwrap().is_empty());
    }

    #[test]
    fn test_typed_accessors_reject_wrong_shape() {
        let root = record(json!({"name": 7, "list": {"k": "v"}, "map": "flat"}));

        let err = resolve_string(&root, &DotPath::parse("name")).unwrap_err();
        assert_eq!(err, FacetError::type_mismatch("name", "string", "integer"));

        let err = resolve_array(&root, &DotPath::parse("list")).unwrap_err();
        assert_eq!(err.category(), "type_mismatch");

        let err = resolve_string_map(&root, &DotPath::parse("map")).unwrap_err();
        assert_eq!(err, FacetError::type_mismatch("map", "object", "string"));
    }

    #[test]
    fn test_string_map_stringifies_scalars() {
        let root = record(json!({"m": {"side": "10", "height": 20, "pitch": 1.5, "gap": null}}));
        let values = resolve_string_map(&root, &DotPath::parse("m")).unwrap();
        assert_eq!(values.len(), 3);
        assert_eq!(values["side"], "10");
        assert_eq!(values["height"], "20");
        assert_eq!(values["pitch"], "1.5");
    }

    #[test]
    fn test_string_map_rejects_nested_objects() {
        let root = record(json!({"m": {"side": {"value": 10}}}));
        let err = resolve_string_map(&root, &DotPath::parse("m")).unwrap_err();
        assert_eq!(err, FacetError::type_mismatch("m.side", "scalar", "object"));
    }

    #[test]
    fn test_dot_path_display_round_trips() {
        let path: DotPath = "metrics.measurements".parse().unwrap();
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.to_string(), "metrics.measurements");
    }
}
