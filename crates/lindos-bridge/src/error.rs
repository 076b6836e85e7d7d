//! Error types for the native bridge
//!
//! Three failure classes cross the bridge's outward interface:
//! the native library could not be made available ([`LoadError`]), the input
//! could not be encoded for the boundary, or the native side (or the
//! boundary contract) reported a [`ProcessingError`].

use crate::taxonomy::{ErrorCode, CONTRACT_VIOLATION};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience type alias for bridge results
pub type Result<T> = std::result::Result<T, BridgeError>;

/// A failure reported by the native library or synthesized by the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct ProcessingError {
    /// Status code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl ProcessingError {
    /// Create an error carrying the canonical description of `code`
    pub fn from_code(code: impl Into<ErrorCode>) -> Self {
        let code = code.into();
        Self {
            message: code.description().into_owned(),
            code,
        }
    }

    /// Create an error with a custom message
    pub fn with_message(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Success flag set but no data returned
    pub fn null_data() -> Self {
        Self::with_message(CONTRACT_VIOLATION, "native success with null data pointer")
    }

    /// Raw status code
    pub fn raw_code(&self) -> i32 {
        self.code.as_raw()
    }
}

/// Reasons the native library could not be made available
///
/// Load failures are cached by [`crate::loader::LibraryCell`], so the type is
/// `Clone` to hand the same failure to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No artifact at the resolved location
    #[error("native library not found at {}. {hint}", path.display())]
    NotFound {
        /// Attempted path
        path: PathBuf,
        /// Remediation hint
        hint: String,
    },

    /// The artifact exists but the dynamic loader rejected it
    #[error("failed to open native library {}: {message}", path.display())]
    Open {
        /// Attempted path
        path: PathBuf,
        /// Loader message
        message: String,
    },

    /// A required entry point is missing from the artifact
    #[error("symbol `{symbol}` not found in native library {}", path.display())]
    MissingSymbol {
        /// Library path
        path: PathBuf,
        /// Missing symbol name
        symbol: &'static str,
    },
}

impl LoadError {
    /// Path the failure relates to
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::NotFound { path, .. }
            | LoadError::Open { path, .. }
            | LoadError::MissingSymbol { path, .. } => path,
        }
    }
}

/// Main error type for bridge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The native library is missing or does not expose the expected ABI
    #[error("Library not found: {0}")]
    LibraryNotFound(#[from] LoadError),

    /// Input could not be represented in the boundary encoding
    #[error("Encoding error: {0}")]
    Encoding(ProcessingError),

    /// The native side reported a failure, or broke the boundary contract
    #[error("Processing error: {0}")]
    Processing(ProcessingError),
}

impl BridgeError {
    /// Whether the failure is process-level and will repeat on every call
    pub fn is_fatal(&self) -> bool {
        matches!(self, BridgeError::LibraryNotFound(_))
    }

    /// The typed processing error, when there is one
    pub fn processing_error(&self) -> Option<&ProcessingError> {
        match self {
            BridgeError::LibraryNotFound(_) => None,
            BridgeError::Encoding(error) | BridgeError::Processing(error) => Some(error),
        }
    }

    /// Raw status code, when there is one
    pub fn code(&self) -> Option<i32> {
        self.processing_error().map(ProcessingError::raw_code)
    }

    /// Presentable message for callers that cannot handle typed errors
    pub fn user_message(&self) -> String {
        match self {
            BridgeError::LibraryNotFound(error) => error.to_string(),
            BridgeError::Encoding(error) | BridgeError::Processing(error) => error.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_uses_canonical_message() {
        let error = ProcessingError::from_code(ErrorCode::NullPointer);
        assert_eq!(error.raw_code(), 1);
        assert_eq!(error.message, "No message provided");
        assert_eq!(error.to_string(), "No message provided");
    }

    #[test]
    fn test_custom_message() {
        let error = ProcessingError::with_message(1, "Custom message");
        assert_eq!(error.code, ErrorCode::NullPointer);
        assert_eq!(error.message, "Custom message");
    }

    #[test]
    fn test_unknown_code_message() {
        let error = ProcessingError::from_code(999);
        assert!(error.message.contains("unknown error (code: 999)"));
    }

    #[test]
    fn test_null_data_error() {
        let error = ProcessingError::null_data();
        assert_eq!(error.raw_code(), -1);
        assert!(error.message.contains("null data"));
    }

    #[test]
    fn test_not_found_mentions_path() {
        let error = LoadError::NotFound {
            path: PathBuf::from("/opt/lindos/liblindos_core.so"),
            hint: "Build it first.".to_string(),
        };
        let text = error.to_string();
        assert!(text.contains("/opt/lindos/liblindos_core.so"));
        assert!(text.contains("Build it first."));
    }

    #[test]
    fn test_bridge_error_classification() {
        let fatal = BridgeError::from(LoadError::Open {
            path: PathBuf::from("lib.so"),
            message: "bad ELF".to_string(),
        });
        assert!(fatal.is_fatal());
        assert_eq!(fatal.code(), None);
        assert!(fatal.user_message().contains("bad ELF"));

        let processing = BridgeError::Processing(ProcessingError::from_code(3));
        assert!(!processing.is_fatal());
        assert_eq!(processing.code(), Some(3));
        assert_eq!(processing.user_message(), "Message cannot be empty");
    }
}
