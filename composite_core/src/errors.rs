//! # Error Types
//!
//! Structured error types for composite_core. Errors serialize to JSON with a
//! `type` discriminator so a presentation layer can forward them unchanged.
//!
//! The raw formulas in [`crate::equations`] never fail: physically undefined
//! inputs (zero density, zero modulus) are guarded and return `0.0`. Errors
//! only come from the validating `calculate` layer, dataset handling and file I/O.
//!
//! ## Example
//!
//! ```rust
//! use composite_core::errors::{CompositeError, CompositeResult};
//!
//! fn validate_fvf(fvf_percent: f64) -> CompositeResult<()> {
//!     if !(0.0..=100.0).contains(&fvf_percent) {
//!         return Err(CompositeError::invalid_input(
//!             "fvf_percent",
//!             fvf_percent.to_string(),
//!             "Fiber volume fraction must be between 0 and 100",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_fvf(120.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for composite_core operations
pub type CompositeResult<T> = Result<T, CompositeError>;

/// Structured error type for engine operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CompositeError {
    /// An input value violates a documented precondition
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Constituent material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Calculation could not produce a result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
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

    /// Dataset schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CompositeError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CompositeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CompositeError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CompositeError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CompositeError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CompositeError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CompositeError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CompositeError::InvalidInput { .. } => "INVALID_INPUT",
            CompositeError::MissingField { .. } => "MISSING_FIELD",
            CompositeError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CompositeError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CompositeError::FileError { .. } => "FILE_ERROR",
            CompositeError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CompositeError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CompositeError {
    fn from(e: serde_json::Error) -> Self {
        CompositeError::serialization(e.to_string())
    }
}
