//! # Error Types
//!
//! Structured error types for pricing_core. Each variant carries enough
//! context for a caller (form, CLI, or another service) to explain the
//! problem without parsing a message string.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::errors::{PricingError, PricingResult};
//!
//! fn validate_students(students: u32) -> PricingResult<()> {
//!     if students == 0 {
//!         return Err(PricingError::invalid_input(
//!             "student_count",
//!             students.to_string(),
//!             "Student count must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pricing_core operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Structured error type for quoting operations.
///
/// A margin shortfall is *not* an error for [`calculate_quote`](crate::quote::calculate_quote);
/// it only surfaces as [`PricingError::MarginBelowGate`] when a caller asks for
/// something that requires a deliverable quote (e.g. the commercial split).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PricingError {
    /// An input value is invalid (out of range, zero where positive is required, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing or blank
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Program name not in the catalog
    #[error("Unknown program: {name}")]
    UnknownProgram { name: String },

    /// School schedule not recognised
    #[error("Unknown school schedule: {name}")]
    UnknownSchedule { name: String },

    /// Rate card contains an impossible value
    #[error("Invalid rate card field '{field}': {reason}")]
    InvalidRateCard { field: String, reason: String },

    /// Quote does not clear the gross-margin gate
    #[error("Gross margin {margin_percent:.2}% is below the {threshold_percent:.0}% gate")]
    MarginBelowGate {
        margin_percent: f64,
        threshold_percent: f64,
    },

    /// Rate card file could not be read or written
    #[error("Config error: '{path}' - {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl PricingError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        PricingError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownProgram error
    pub fn unknown_program(name: impl Into<String>) -> Self {
        PricingError::UnknownProgram { name: name.into() }
    }

    /// Create an UnknownSchedule error
    pub fn unknown_schedule(name: impl Into<String>) -> Self {
        PricingError::UnknownSchedule { name: name.into() }
    }

    /// Create an InvalidRateCard error
    pub fn invalid_rate_card(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidRateCard {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error is a business outcome rather than bad input
    pub fn is_business_outcome(&self) -> bool {
        matches!(self, PricingError::MarginBelowGate { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "INVALID_INPUT",
            PricingError::MissingField { .. } => "MISSING_FIELD",
            PricingError::UnknownProgram { .. } => "UNKNOWN_PROGRAM",
            PricingError::UnknownSchedule { .. } => "UNKNOWN_SCHEDULE",
            PricingError::InvalidRateCard { .. } => "INVALID_RATE_CARD",
            PricingError::MarginBelowGate { .. } => "MARGIN_BELOW_GATE",
            PricingError::ConfigError { .. } => "CONFIG_ERROR",
            PricingError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PricingError::invalid_input("discount_percent", "55", "Discount must be 0-40");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: PricingError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PricingError::missing_field("school_name").error_code(), "MISSING_FIELD");
        assert_eq!(PricingError::unknown_program("Robotics").error_code(), "UNKNOWN_PROGRAM");
        assert_eq!(PricingError::unknown_schedule("7").error_code(), "UNKNOWN_SCHEDULE");
    }

    #[test]
    fn test_margin_gate_is_business_outcome() {
        let gate = PricingError::MarginBelowGate {
            margin_percent: 12.5,
            threshold_percent: 30.0,
        };
        assert!(gate.is_business_outcome());
        assert!(!PricingError::missing_field("x").is_business_outcome());
        assert_eq!(gate.to_string(), "Gross margin 12.50% is below the 30% gate");
    }
}
