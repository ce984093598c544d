//! Structured error handling for the Sieve facet engine
//!
//! Ingestion errors are fatal: they abort the whole ingest call and no partial
//! index is produced. Sparse data (missing paths, blank names, empty value maps)
//! is never an error and never reaches this module.

use std::fmt;
use thiserror::Error;

/// Error type for facet engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacetError {
    /// The input text is not a JSON array of objects
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String, line: Option<usize>, column: Option<usize> },

    /// A record has no non-blank string at the configured id path
    #[error("Record {record_index} has no id at path '{path}'")]
    MissingRecordId { record_index: usize, path: String },

    /// A facet value does not parse as a finite number
    #[error("Facet '{facet}' in group '{facet_group}' of record '{id}' has non-numeric value '{value}'")]
    NonNumericFacetValue { id: String, facet_group: String, facet: String, value: String },

    /// A configured path resolved to a value of the wrong shape
    #[error("Type mismatch at path '{path}': expected {expected}, found {actual}")]
    TypeMismatch { path: String, expected: String, actual: String },

    /// A range filter is malformed
    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String, facet_group: Option<String>, facet: Option<String> },

    /// An ingestion limit was exceeded
    #[error("Limit exceeded: {message}")]
    LimitExceeded { message: String, limit: usize, actual: usize },

    /// Configuration loading and validation errors
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String> },

    /// Broken internal invariant
    #[error("Internal error: {message}")]
    Internal { message: String, component: Option<String> },
}

impl FacetError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            FacetError::InvalidJson { .. } => "invalid_json",
            FacetError::MissingRecordId { .. } => "missing_record_id",
            FacetError::NonNumericFacetValue { .. } => "non_numeric_facet_value",
            FacetError::TypeMismatch { .. } => "type_mismatch",
            FacetError::InvalidFilter { .. } => "invalid_filter",
            FacetError::LimitExceeded { .. } => "limit_exceeded",
            FacetError::Configuration { .. } => "configuration",
            FacetError::Internal { .. } => "internal",
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FacetError::InvalidFilter { .. } => ErrorSeverity::Low,
            FacetError::InvalidJson { .. }
            | FacetError::MissingRecordId { .. }
            | FacetError::NonNumericFacetValue { .. }
            | FacetError::TypeMismatch { .. }
            | FacetError::LimitExceeded { .. } => ErrorSeverity::Medium,
            FacetError::Configuration { .. } => ErrorSeverity::High,
            FacetError::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether this error aborts an ingest call
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FacetError::InvalidFilter { .. })
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Result type alias for facet engine operations
pub type FacetResult<T> = Result<T, FacetError>;

/// Convenience constructors for common error scenarios
impl FacetError {
    /// Create an invalid JSON error without position information
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::InvalidJson { message: message.into(), line: None, column: None }
    }

    /// Create a missing record id error
    pub fn missing_record_id(record_index: usize, path: impl Into<String>) -> Self {
        Self::MissingRecordId { record_index, path: path.into() }
    }

    /// Create a non-numeric facet value error
    pub fn non_numeric(id: &str, facet_group: &str, facet: &str, value: &str) -> Self {
        Self::NonNumericFacetValue {
            id: id.to_string(),
            facet_group: facet_group.to_string(),
            facet: facet.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a filter validation error
    pub fn invalid_filter(facet_group: &str, facet: &str, message: impl Into<String>) -> Self {
        Self::InvalidFilter {
            message: message.into(),
            facet_group: Some(facet_group.to_string()),
            facet: Some(facet.to_string()),
        }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: usize, actual: usize, message: impl Into<String>) -> Self {
        Self::LimitExceeded { message: message.into(), limit, actual }
    }

    /// Create a configuration error for a specific setting
    pub fn configuration(setting: &str, message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), setting: Some(setting.to_string()) }
    }

    /// Create an internal error with component context
    pub fn internal_component(component: &str, message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), component: Some(component.to_string()) }
    }
}

impl From<serde_json::Error> for FacetError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            // Data errors come from decoding a shape that does not match, e.g. a
            // value set persisted as a bare string.
            FacetError::TypeMismatch {
                path: format!("line {} column {}", err.line(), err.column()),
                expected: "serialized facet groups".to_string(),
                actual: err.to_string(),
            }
        } else {
            FacetError::InvalidJson {
                message: err.to_string(),
                line: Some(err.line()),
                column: Some(err.column()),
            }
        }
    }
}

impl From<toml::de::Error> for FacetError {
    fn from(err: toml::de::Error) -> Self {
        FacetError::Configuration { message: format!("TOML error: {err}"), setting: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_maps_to_invalid_json() {
        let err: FacetError = serde_json::from_str::<serde_json::Value>("NOTJSON").unwrap_err().into();
        assert_eq!(err.category(), "invalid_json");
        assert!(matches!(err, FacetError::InvalidJson { line: Some(1), .. }));
    }

    #[test]
    fn test_data_error_maps_to_type_mismatch() {
        let err: FacetError = serde_json::from_str::<Vec<String>>(r#""esplode""#).unwrap_err().into();
        assert_eq!(err.category(), "type_mismatch");
    }

    #[test]
    fn test_fatality() {
        assert!(FacetError::missing_record_id(0, "id").is_fatal());
        assert!(FacetError::non_numeric("r1", "area (cube)", "side", "ten").is_fatal());
        assert!(!FacetError::invalid_filter(" ", "side", "blank").is_fatal());
    }

    #[test]
    fn test_display_mentions_context() {
        let err = FacetError::non_numeric("r1", "area (cube)", "side", "ten");
        let text = err.to_string();
        assert!(text.contains("r1"));
        assert!(text.contains("ten"));
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }
}
