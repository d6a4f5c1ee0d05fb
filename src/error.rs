//! Error types for the address book assistant.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors that can occur when operating on the address book or a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// No contact with this name
    #[error("Contact {0} not found")]
    NotFound(String),

    /// Note index outside `[0, len)`
    #[error("Invalid note index {index} (contact has {len} notes)")]
    InvalidNoteIndex { index: i64, len: usize },

    /// The name is the book key and cannot be changed in place
    #[error("Contact name cannot be changed")]
    ImmutableName,

    /// A field failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors that can occur while loading or saving the address book.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// No book path was configured and no home directory is known
    #[error("Cannot locate home directory; set ASSISTANT_X_BOOK_PATH")]
    MissingHome,
}

/// Convenience type alias for Results with BookError
pub type BookResult<T> = Result<T, BookError>;

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookError::NotFound("Ann".to_string());
        assert_eq!(err.to_string(), "Contact Ann not found");

        let err = BookError::InvalidNoteIndex { index: 3, len: 2 };
        assert_eq!(err.to_string(), "Invalid note index 3 (contact has 2 notes)");

        let err = ConfigError::InvalidValue {
            var: "ASSISTANT_X_BIRTHDAY_WINDOW_DAYS".to_string(),
            reason: "Must be a positive number".to_string(),
        };
        assert!(err.to_string().contains("ASSISTANT_X_BIRTHDAY_WINDOW_DAYS"));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: BookError = ValidationError::InvalidPhone("12".to_string()).into();
        assert_eq!(err.to_string(), "Invalid phone number: 12");
    }
}
