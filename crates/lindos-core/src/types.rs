//! FFI-safe type definitions
//!
//! All types in this module are designed to be safely passed across
//! the FFI boundary with C ABI compatibility.

use std::os::raw::c_char;

/// Status codes reported across the boundary
pub mod codes {
    /// Operation completed successfully
    pub const SUCCESS: i32 = 0;
    /// Null message pointer
    pub const NULL_POINTER: i32 = 1;
    /// Message is not valid UTF-8
    pub const INVALID_UTF8: i32 = 2;
    /// Message is empty or whitespace only
    pub const EMPTY_MESSAGE: i32 = 3;
    /// Message could not be processed
    pub const PROCESSING_FAILURE: i32 = 4;
}

/// Longest message (in bytes) the library accepts
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Result structure for calls that return both a status and data
///
/// `data` is owned by this library. Release the whole structure with
/// `lindos_result_free` exactly once.
#[repr(C)]
#[derive(Debug)]
pub struct LindosResult {
    /// Whether processing succeeded
    pub success: bool,
    /// Reply on success, user-facing error text on failure (may be null)
    pub data: *mut c_char,
    /// Status code (see [`codes`])
    pub error_code: i32,
}

impl LindosResult {
    /// Successful result carrying `data`
    pub fn success(data: *mut c_char) -> Self {
        Self {
            success: true,
            data,
            error_code: codes::SUCCESS,
        }
    }

    /// Failed result carrying an optional message
    pub fn failure(error_code: i32, data: *mut c_char) -> Self {
        Self {
            success: false,
            data,
            error_code,
        }
    }

    /// Check if the result indicates success
    pub fn is_success(&self) -> bool {
        self.success
    }
}
