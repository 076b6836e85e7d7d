//! Status code taxonomy
//!
//! The native library reports failures as small integers. Four of them are
//! reserved and have fixed descriptions. Every other value is a
//! library-defined code and is rendered generically.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Raw status reported by the native side on success
pub const SUCCESS: i32 = 0;

/// Raw code used for results that break the boundary contract
/// (a success flag paired with a null data pointer)
pub const CONTRACT_VIOLATION: i32 = -1;

/// A status code reported by (or on behalf of) the native library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", from = "i32")]
pub enum ErrorCode {
    /// No message was provided (null input)
    NullPointer,
    /// The message is not representable in the boundary encoding
    InvalidUtf8,
    /// The message is empty
    EmptyMessage,
    /// The native side failed to process the message
    ProcessingFailure,
    /// Any other code, defined by the native library
    Native(i32),
}

impl ErrorCode {
    /// Classify a raw status code
    pub fn from_raw(code: i32) -> Self {
        match code {
            1 => ErrorCode::NullPointer,
            2 => ErrorCode::InvalidUtf8,
            3 => ErrorCode::EmptyMessage,
            4 => ErrorCode::ProcessingFailure,
            other => ErrorCode::Native(other),
        }
    }

    /// The raw status code on the wire
    pub fn as_raw(self) -> i32 {
        match self {
            ErrorCode::NullPointer => 1,
            ErrorCode::InvalidUtf8 => 2,
            ErrorCode::EmptyMessage => 3,
            ErrorCode::ProcessingFailure => 4,
            ErrorCode::Native(code) => code,
        }
    }

    /// Whether this is one of the four reserved codes
    pub fn is_reserved(self) -> bool {
        !matches!(self, ErrorCode::Native(_))
    }

    /// Human-readable description of this code
    pub fn description(self) -> Cow<'static, str> {
        match self {
            ErrorCode::NullPointer => Cow::Borrowed("No message provided"),
            ErrorCode::InvalidUtf8 => Cow::Borrowed("Message contains invalid characters"),
            ErrorCode::EmptyMessage => Cow::Borrowed("Message cannot be empty"),
            ErrorCode::ProcessingFailure => Cow::Borrowed("Failed to process message"),
            ErrorCode::Native(code) => Cow::Owned(format!("unknown error (code: {})", code)),
        }
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        ErrorCode::from_raw(code)
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.as_raw()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NullPointer => write!(f, "NULL_POINTER"),
            ErrorCode::InvalidUtf8 => write!(f, "INVALID_UTF8"),
            ErrorCode::EmptyMessage => write!(f, "EMPTY_MESSAGE"),
            ErrorCode::ProcessingFailure => write!(f, "PROCESSING_FAILURE"),
            ErrorCode::Native(code) => write!(f, "NATIVE({})", code),
        }
    }
}

/// Describe any raw status code. Total: never fails, never panics.
pub fn describe(code: i32) -> Cow<'static, str> {
    ErrorCode::from_raw(code).description()
}
