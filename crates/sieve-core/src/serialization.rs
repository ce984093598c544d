//! Wire form of facet groups and id lists
//!
//! Groups encode as `{groupKey: {name, facets: {facetKey: {name, values}}}}` with
//! value arrays sorted. Group and facet keys are emitted in sorted order too, so two
//! encodings of equal indexes are byte-identical.

use crate::error::FacetResult;
use crate::index::FacetIndex;
use crate::types::{Facet, FacetGroup};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Borrowed, key-ordered view of a facet group
#[derive(Serialize)]
struct GroupView<'a> {
    name: &'a str,
    facets: BTreeMap<&'a str, &'a Facet>,
}

impl<'a> From<&'a FacetGroup> for GroupView<'a> {
    fn from(group: &'a FacetGroup) -> Self {
        Self {
            name: &group.name,
            facets: group.facets.iter().map(|(key, facet)| (key.as_str(), facet)).collect(),
        }
    }
}

/// Encode the facet groups of an index. An empty index encodes as `{}`.
pub fn encode_groups(index: &FacetIndex) -> FacetResult<String> {
    let view: BTreeMap<&str, GroupView<'_>> =
        index.groups().iter().map(|(key, group)| (key.as_str(), GroupView::from(group))).collect();
    Ok(serde_json::to_string(&view)?)
}

/// Decode facet groups from their wire form
pub fn decode_groups(json: &str) -> FacetResult<HashMap<String, FacetGroup>> {
    Ok(serde_json::from_str(json)?)
}

/// Encode record ids as a JSON array. No ids encode as `[]`.
pub fn encode_ids(ids: &[String]) -> FacetResult<String> {
    Ok(serde_json::to_string(ids)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FacetError;
    use crate::index::FacetIndexBuilder;
    use crate::types::{ExtractedBound, ExtractedRecord};

    fn sample_index() -> FacetIndex {
        let mut builder = FacetIndexBuilder::new();
        for (id, side, height) in [("r1", "10", "3"), ("r2", "20", "3")] {
            builder
                .add_record(&ExtractedRecord {
                    id: id.to_string(),
                    bounds: vec![ExtractedBound {
                        name: "Area".to_string(),
                        meta_name: "Cube".to_string(),
                        values: [("side", side), ("height", height)]
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect(),
                    }],
                })
                .unwrap();
        }
        builder.finish()
    }

    #[test]
    fn test_empty_encodings() {
        assert_eq!(encode_groups(&FacetIndex::new()).unwrap(), "{}");
        assert_eq!(encode_ids(&[]).unwrap(), "[]");
        assert!(decode_groups("{}").unwrap().is_empty());
    }

    #[test]
    fn test_encoding_is_sorted() {
        let encoded = encode_groups(&sample_index()).unwrap();
        assert_eq!(
            encoded,
            r#"{"area (cube)":{"name":"area (cube)","facets":{"height":{"name":"height","values":["3"]},"side":{"name":"side","values":["10","20"]}}}}"#
        );
    }

    #[test]
    fn test_round_trip_is_byte_stable() {
        let index = sample_index();
        let encoded = encode_groups(&index).unwrap();
        let decoded = decode_groups(&encoded).unwrap();
        assert_eq!(&decoded, index.groups());

        let view: BTreeMap<&str, GroupView<'_>> =
            decoded.iter().map(|(key, group)| (key.as_str(), GroupView::from(group))).collect();
        assert_eq!(serde_json::to_string(&view).unwrap(), encoded);
    }

    #[test]
    fn test_value_set_as_bare_string_is_rejected() {
        let err = decode_groups(
            r#"{"area (cube)":{"name":"area (cube)","facets":{"side":{"name":"side","values":"esplode"}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FacetError::TypeMismatch { .. }));
    }

    #[test]
    fn test_malformed_wire_text_is_invalid_json() {
        let err = decode_groups("{not json").unwrap_err();
        assert_eq!(err.category(), "invalid_json");
    }
}
