//! Custom error types for hoa-ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The line-item balancer never produces
//! these; they come from the storage, service and CLI layers around it.

use thiserror::Error;

/// The main error type for hoa-ledger operations
#[derive(Error, Debug)]
pub enum HoaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input and records
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

    /// Invoice is locked (approved)
    #[error("Invoice is locked: {0}")]
    Locked(String),

    /// Import errors (tabular files for duplicate scans)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HoaError {
    /// Create a "not found" error for invoices
    pub fn invoice_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Invoice",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for invoice numbers
    pub fn duplicate_invoice(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Invoice",
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
}

impl From<std::io::Error> for HoaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HoaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for HoaError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for hoa-ledger operations
pub type HoaResult<T> = Result<T, HoaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HoaError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = HoaError::invoice_not_found("INV-1001");
        assert_eq!(err.to_string(), "Invoice not found: INV-1001");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = HoaError::duplicate_invoice("INV-1001");
        assert_eq!(err.to_string(), "Invoice already exists: INV-1001");
    }

    #[test]
    fn test_locked_error() {
        let err = HoaError::Locked("INV-1001 is approved".into());
        assert_eq!(err.to_string(), "Invoice is locked: INV-1001 is approved");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: HoaError = io_err.into();
        assert!(matches!(err, HoaError::Io(_)));
    }
}
