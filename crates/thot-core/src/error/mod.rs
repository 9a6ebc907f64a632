//! Error types and result aliases for Thot manifest operations.
//!
//! Provides a unified error type that covers all failure conditions across
//! the toolkit with actionable error messages.

use thiserror::Error;

/// Unified error type for all manifest operations
#[derive(Error, Debug)]
pub enum ThotError {
    // Manifest errors
    #[error("Failed to parse thot.toml: {message}")]
    TomlParse { message: String },

    #[error("Failed to parse metadata.json: {message}")]
    JsonParse { message: String },

    #[error("Manifest field '{field}' is invalid: {reason}")]
    Validation { field: String, reason: String },

    #[error("No thot.toml or metadata.json found in {searched} or parent directories")]
    ManifestNotFound { searched: String },

    // Emission errors
    #[error("Readme file not found: {path}")]
    ReadmeNotFound { path: String },

    #[error("Failed to serialize metadata: {message}")]
    Serialize { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for manifest operations
pub type ThotResult<T> = Result<T, ThotError>;

impl ThotError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a validation error for a manifest field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ThotError::Io { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ThotError::ManifestNotFound { .. } => {
                Some("Run 'thot init' to create a thot.toml in this directory")
            },
            ThotError::ReadmeNotFound { .. } => {
                Some("Create the readme file or update the 'readme' field in [package]")
            },
            ThotError::TomlParse { .. } => {
                Some("Check the manifest for missing separators or unclosed tables")
            },
            ThotError::Validation { .. } => {
                Some("Run 'thot check' for a field-by-field report")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_helper() {
        let err = ThotError::validation("package.name", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Manifest field 'package.name' is invalid: must not be empty"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_io_helper_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ThotError::io("Failed to read thot.toml".to_string(), source);
        assert!(err.is_recoverable());
        assert!(std::error::Error::source(&err).is_some());
    }
}
