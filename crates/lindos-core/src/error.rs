//! Error handling for the FFI boundary
//!
//! Input problems are classified into status codes, and panics are caught
//! before they can unwind into the caller.

use std::any::Any;
use std::panic;
use std::str::Utf8Error;

use crate::types::codes;

/// Reasons a message cannot be processed
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Null message pointer
    #[error("null message pointer")]
    NullPointer,
    /// Message bytes are not UTF-8
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),
    /// Empty or whitespace-only message
    #[error("empty message")]
    EmptyMessage,
    /// Message exceeds the length limit
    #[error("message too long ({len} bytes)")]
    TooLong {
        /// Message length in bytes
        len: usize,
    },
    /// Processing panicked
    #[error("processing panicked: {0}")]
    Panicked(String),
}

impl InputError {
    /// Boundary status code
    pub fn code(&self) -> i32 {
        match self {
            InputError::NullPointer => codes::NULL_POINTER,
            InputError::InvalidUtf8(_) => codes::INVALID_UTF8,
            InputError::EmptyMessage => codes::EMPTY_MESSAGE,
            InputError::TooLong { .. } | InputError::Panicked(_) => codes::PROCESSING_FAILURE,
        }
    }

    /// Text shown to end users
    pub fn user_message(&self) -> &'static str {
        match self {
            InputError::NullPointer => "Error: No message provided",
            InputError::InvalidUtf8(_) => "Error: Message contains invalid characters",
            InputError::EmptyMessage => "Error: Message cannot be empty",
            InputError::TooLong { .. } | InputError::Panicked(_) => {
                "Error: Failed to process message"
            }
        }
    }
}

/// Canonical description of a status code, if the code is known
pub fn describe(code: i32) -> Option<&'static str> {
    match code {
        codes::NULL_POINTER => Some("No message provided"),
        codes::INVALID_UTF8 => Some("Message contains invalid characters"),
        codes::EMPTY_MESSAGE => Some("Message cannot be empty"),
        codes::PROCESSING_FAILURE => Some("Failed to process message"),
        _ => None,
    }
}

/// Safely execute a closure that might panic
///
/// A panic is converted to [`InputError::Panicked`] instead of unwinding
/// across the boundary.
pub fn catch_panic<F, R>(f: F) -> Result<R, InputError>
where
    F: FnOnce() -> Result<R, InputError> + panic::UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(result) => result,
        Err(panic_info) => Err(InputError::Panicked(get_panic_message(&panic_info))),
    }
}

/// Extract a message from panic info
fn get_panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}
