//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use lindos_bridge::BridgeError;
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (stdin, stdout, config files)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the native bridge
    #[error("{0}")]
    Bridge(#[from] BridgeError),

    /// Input rejected by the native validator
    #[error("Invalid input (code {code}): {message}")]
    InvalidInput { code: i32, message: String },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Bridge(error) if error.is_fatal() => 2,
            Self::Bridge(_) => 3,
            Self::InvalidInput { .. } => 4,
            Self::FileNotFound { .. } => 5,
            Self::Config(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Check if this error should display a build hint
    pub fn is_missing_library(&self) -> bool {
        matches!(self, Self::Bridge(error) if error.is_fatal())
    }
}

/// Extension trait for displaying errors with context
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context(self, msg: &str) -> Result<T>;

    /// Add context with a closure (only evaluated on error)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", msg, inner),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other {
                message: format!("{}: {}", f(), inner),
            }
        })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lindos_bridge::{LoadError, ProcessingError};
    use pretty_assertions::assert_eq;

    fn missing_library() -> BridgeError {
        BridgeError::LibraryNotFound(LoadError::NotFound {
            path: PathBuf::from("/tmp/liblindos_core.so"),
            hint: "Please build it first".to_string(),
        })
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::from(missing_library()).exit_code(), 2);
        assert_eq!(
            Error::from(BridgeError::Processing(ProcessingError::from_code(3))).exit_code(),
            3
        );
        assert_eq!(
            Error::InvalidInput {
                code: 3,
                message: "Message cannot be empty".to_string()
            }
            .exit_code(),
            4
        );
        assert_eq!(Error::config("bad").exit_code(), 6);
        assert_eq!(Error::other("boom").exit_code(), 99);
    }

    #[test]
    fn test_missing_library_detection() {
        assert!(Error::from(missing_library()).is_missing_library());
        assert!(!Error::from(BridgeError::Encoding(ProcessingError::from_code(2))).is_missing_library());
    }

    #[test]
    fn test_bridge_error_display_is_passed_through() {
        let error = Error::from(BridgeError::Processing(ProcessingError::from_code(3)));
        assert_eq!(error.to_string(), "Processing error: Message cannot be empty");
    }

    #[test]
    fn test_format_error_without_color() {
        let error = Error::config("unknown field `libary`");
        assert_eq!(
            format_error(&error, false),
            "Error: Configuration error: unknown field `libary`"
        );
    }

    #[test]
    fn test_context() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let error = result.context("Reading stdin").unwrap_err();
        assert_eq!(error.to_string(), "Reading stdin: IO error: gone");

        let result: std::result::Result<(), Error> = Err(Error::config("bad"));
        let error = result
            .with_context(|| format!("Loading {}", "lindos.yaml"))
            .unwrap_err();
        assert_eq!(error.to_string(), "Loading lindos.yaml: Configuration error: bad");
    }
}
