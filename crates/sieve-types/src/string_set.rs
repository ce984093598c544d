use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Unique-membership container over strings.
///
/// Storage order is irrelevant. The serialized form is always the lexicographically
/// sorted array, and deserialization only accepts an array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueStringSet {
    values: HashSet<String>,
}

impl UniqueStringSet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value. Returns `true` if it was not already present.
    pub fn add(&mut self, value: impl Into<String>) -> bool {
        self.values.insert(value.into())
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// Remove a value. Returns `true` if it was present.
    pub fn remove(&mut self, value: &str) -> bool {
        self.values.remove(value)
    }

    /// Number of distinct values
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in lexicographic order
    #[must_use]
    pub fn to_ordered_array(&self) -> Vec<String> {
        let mut ordered = self.to_array();
        ordered.sort_unstable();
        ordered
    }

    /// Values in unspecified order
    #[must_use]
    pub fn to_array(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }

    /// Iterate values in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for UniqueStringSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(Into::into).collect() }
    }
}

impl<S: Into<String>> Extend<S> for UniqueStringSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(Into::into));
    }
}

impl Serialize for UniqueStringSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut ordered: Vec<&String> = self.values.iter().collect();
        ordered.sort_unstable();
        let mut seq = serializer.serialize_seq(Some(ordered.len()))?;
        for value in ordered {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct UniqueStringSetVisitor;

impl<'de> Visitor<'de> for UniqueStringSetVisitor {
    type Value = UniqueStringSet;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an array of strings")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut set = UniqueStringSet::new();
        while let Some(value) = seq.next_element::<String>()? {
            set.add(value);
        }
        Ok(set)
    }
}

impl<'de> Deserialize<'de> for UniqueStringSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(UniqueStringSetVisitor)
    }
}
