//! # Error Types
//!
//! Structured error types for matsim_core. Every failure the engine can report
//! is one of three kinds, and each carries enough context for a caller to
//! show or forward it without parsing message strings.
//!
//! ## Example
//!
//! ```rust
//! use matsim_core::errors::{EngineError, EngineResult};
//!
//! fn validate_pressure(pressure_mpa: f64) -> EngineResult<()> {
//!     if pressure_mpa < 0.0 {
//!         return Err(EngineError::invalid_request(
//!             "conditions.pressure_mpa",
//!             "Pressure cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_pressure(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Structured error type for simulation operations.
///
/// The engine performs no I/O, so none of these are transient: retrying the
/// same request yields the same error.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EngineError {
    /// The request is malformed (material source, conditions, or simulation type)
    #[error("Invalid request field '{field}': {reason}")]
    InvalidRequest { field: String, reason: String },

    /// Material identifier is not in the catalog
    #[error("Material not found: {material_id}")]
    NotFound { material_id: String },

    /// Resolved material lacks a property the requested domain needs
    #[error("Material '{material_id}' is missing '{field}' required for {domain} prediction")]
    IncompleteMaterial {
        material_id: String,
        domain: String,
        field: String,
    },
}

impl EngineError {
    /// Create an InvalidRequest error
    pub fn invalid_request(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(material_id: impl Into<String>) -> Self {
        EngineError::NotFound {
            material_id: material_id.into(),
        }
    }

    /// Create an IncompleteMaterial error
    pub fn incomplete_material(
        material_id: impl Into<String>,
        domain: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        EngineError::IncompleteMaterial {
            material_id: material_id.into(),
            domain: domain.into(),
            field: field.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::InvalidRequest { .. } => "INVALID_REQUEST",
            EngineError::NotFound { .. } => "NOT_FOUND",
            EngineError::IncompleteMaterial { .. } => "INCOMPLETE_MATERIAL",
        }
    }
}
