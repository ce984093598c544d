use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A node of a decoded JSON record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RecordValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value that fits in an `i64`
    Integer(i64),
    /// Any other number
    Float(f64),
    /// String value
    String(String),
    /// Array of `RecordValues`
    Array(Vec<RecordValue>),
    /// Object/map of string keys to `RecordValues`
    Object(HashMap<String, RecordValue>),
}

// -------------------------------------------------------------------------------------------------
// Conversions between `RecordValue` and `serde_json::Value`.
// Ingestion decodes text with serde_json once and converts the generic tree here, so the rest
// of the engine only ever pattern-matches on `RecordValue`.
// -------------------------------------------------------------------------------------------------

impl From<RecordValue> for serde_json::Value {
    fn from(value: RecordValue) -> Self {
        match value {
            RecordValue::Null => Self::Null,
            RecordValue::Bool(b) => Self::Bool(b),
            RecordValue::Integer(i) => Self::Number(serde_json::Number::from(i)),
            RecordValue::Float(f) => {
                serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number)
            }
            RecordValue::String(s) => Self::String(s),
            RecordValue::Array(arr) => {
                Self::Array(arr.into_iter().map(std::convert::Into::into).collect())
            }
            RecordValue::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, v.into()))
                    .collect::<serde_json::Map<String, Self>>(),
            ),
        }
    }
}

impl TryFrom<&serde_json::Value> for RecordValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    return Err(anyhow!("Unsupported number value: {}", n));
                }
            }
            serde_json::Value::String(s) => Self::String(s.clone()),
            serde_json::Value::Array(arr) => {
                let inner = arr.iter().map(Self::try_from).collect::<Result<Vec<_>, _>>()?;
                Self::Array(inner)
            }
            serde_json::Value::Object(map) => {
                let mut inner = HashMap::with_capacity(map.len());
                for (k, v) in map {
                    inner.insert(k.clone(), Self::try_from(v)?);
                }
                Self::Object(inner)
            }
        })
    }
}

impl TryFrom<serde_json::Value> for RecordValue {
    type Error = anyhow::Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(fl) => write!(f, "{fl}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Array(arr) => {
                write!(f, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(obj) => {
                write!(f, "{{")?;
                let mut first = true;
                for (key, value) in obj {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                    first = false;
                }
                write!(f, "}}")
            }
        }
    }
}

impl RecordValue {
    /// Get the type name as a string
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Whether this is the JSON `null`
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload, if this is a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the elements, if this is an array
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Borrow the fields, if this is an object
    #[must_use]
    pub const fn as_object(&self) -> Option<&HashMap<String, Self>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Look up a key on an object. Any other variant has no keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Stringify a scalar. Arrays and objects have no scalar form.
    ///
    /// Integers render without a decimal point and floats in their shortest
    /// round-trip form, so `10` and `10.0` both become `"10"` and `1.5` stays `"1.5"`.
    #[must_use]
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            Self::Array(_) | Self::Object(_) => None,
            Self::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
