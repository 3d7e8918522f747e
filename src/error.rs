//! Custom error types for gestion-sol
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for gestion-sol operations
#[derive(Error, Debug)]
pub enum GestionError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for submitted records
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Bulk upload errors
    #[error("Upload error: {0}")]
    Upload(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GestionError {
    /// Create a "not found" error for providers
    pub fn provider_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Provider",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expense types
    pub fn expense_type_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense type",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<std::io::Error> for GestionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for GestionError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for GestionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for gestion-sol operations
pub type GestionResult<T> = Result<T, GestionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GestionError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = GestionError::provider_not_found("EPEC");
        assert_eq!(err.to_string(), "Provider not found: EPEC");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_error() {
        let err = GestionError::Duplicate {
            entity_type: "Expense type",
            identifier: "Servicio".into(),
        };
        assert_eq!(err.to_string(), "Expense type already exists: Servicio");
        assert!(err.is_duplicate());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GestionError = io_err.into();
        assert!(matches!(err, GestionError::Io(_)));
    }
}
