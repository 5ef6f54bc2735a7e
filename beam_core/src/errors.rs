//! # Error Types
//!
//! Structured error types for beam_core. Every failure in the analysis core is
//! a configuration problem surfaced immediately to the caller; nothing is
//! retried or silently clamped.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(height_m: f64) -> CalcResult<()> {
//!     if height_m <= 0.0 {
//!         return Err(CalcError::degenerate_geometry(
//!             "height",
//!             format!("section height must be positive, got {height_m}"),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_height(0.3).is_ok());
//! assert_eq!(validate_height(0.0).unwrap_err().error_code(), "DEGENERATE_GEOMETRY");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Coincident supports or a non-positive section dimension
    #[error("Degenerate geometry in '{field}': {reason}")]
    DegenerateGeometry { field: String, reason: String },

    /// Reactions or stresses requested before the beam is fully configured
    #[error("Incomplete configuration: {missing}")]
    IncompleteConfiguration { missing: String },

    /// Crack would sever the section
    #[error("Invalid crack depth {depth_m} m at x = {x_m} m: section height is {height_m} m")]
    InvalidCrackDepth { x_m: f64, depth_m: f64, height_m: f64 },

    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a DegenerateGeometry error
    pub fn degenerate_geometry(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateGeometry {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an IncompleteConfiguration error
    pub fn incomplete(missing: impl Into<String>) -> Self {
        CalcError::IncompleteConfiguration {
            missing: missing.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::IncompleteConfiguration { .. } => "INCOMPLETE_CONFIGURATION",
            CalcError::InvalidCrackDepth { .. } => "INVALID_CRACK_DEPTH",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }

    /// Whether the error aborts the analysis itself, as opposed to case-file handling
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CalcError::DegenerateGeometry { .. }
                | CalcError::IncompleteConfiguration { .. }
                | CalcError::InvalidCrackDepth { .. }
                | CalcError::InvalidInput { .. }
        )
    }
}

/// Reject NaN and infinities at the input boundary.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "value must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::InvalidCrackDepth {
            x_m: 2.0,
            depth_m: 0.4,
            height_m: 0.3,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidCrackDepth"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::incomplete("pin support").error_code(), "INCOMPLETE_CONFIGURATION");
        assert_eq!(
            CalcError::degenerate_geometry("supports", "coincident").error_code(),
            "DEGENERATE_GEOMETRY"
        );
    }

    #[test]
    fn test_configuration_classification() {
        assert!(CalcError::incomplete("loads").is_configuration_error());
        assert!(!CalcError::file_error("read", "a.json", "missing").is_configuration_error());
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("x", 1.5), Ok(1.5));
        assert!(require_finite("x", f64::NAN).is_err());
        assert!(require_finite("x", f64::INFINITY).is_err());
    }
}
