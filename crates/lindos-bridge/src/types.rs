//! Boundary type definitions
//!
//! Everything in this module mirrors the C ABI of the native library
//! exactly. Field order, widths and calling conventions must not change.

use std::os::raw::c_char;

/// Symbol names exported by the native library
pub mod symbols {
    /// Structured processing entry point
    pub const PROCESS: &[u8] = b"lindos_process_message_safe\0";
    /// Validation entry point
    pub const VALIDATE: &[u8] = b"lindos_validate_message\0";
    /// Error description lookup
    pub const ERROR_MESSAGE: &[u8] = b"lindos_error_message\0";
    /// Release of library-owned strings
    pub const STRING_FREE: &[u8] = b"lindos_string_free\0";
    /// Release of a whole result structure
    pub const RESULT_FREE: &[u8] = b"lindos_result_free\0";
    /// Native debug toggle
    pub const SET_DEBUG: &[u8] = b"lindos_set_debug\0";

    /// Printable form of a symbol constant (without the trailing NUL)
    pub fn display(symbol: &'static [u8]) -> &'static str {
        let trimmed = symbol.strip_suffix(b"\0").unwrap_or(symbol);
        std::str::from_utf8(trimmed).unwrap_or("<invalid symbol>")
    }
}

/// Result structure returned by the native processing entry point
///
/// `data` is owned by the native library. It must be handed back through
/// the library's `result_free` exactly once, whatever `success` says and
/// even when `data` is null. Use [`crate::memory::OwnedResult`] rather than
/// handling this value directly.
#[repr(C)]
#[derive(Debug)]
pub struct RawResult {
    /// Whether processing succeeded
    pub success: bool,
    /// Library-owned NUL-terminated string, or null
    pub data: *mut c_char,
    /// Status code (0 on success)
    pub error_code: i32,
}

/// `lindos_process_message_safe`
pub type ProcessFn = unsafe extern "C" fn(message: *const c_char) -> RawResult;
/// `lindos_validate_message`
pub type ValidateFn = unsafe extern "C" fn(message: *const c_char) -> i32;
/// `lindos_error_message`
pub type ErrorMessageFn = unsafe extern "C" fn(error_code: i32) -> *mut c_char;
/// `lindos_string_free`
pub type StringFreeFn = unsafe extern "C" fn(ptr: *mut c_char);
/// `lindos_result_free`
pub type ResultFreeFn = unsafe extern "C" fn(result: RawResult);
/// `lindos_set_debug`
pub type SetDebugFn = unsafe extern "C" fn(enabled: bool);

/// The typed entry points of a loaded native library
///
/// Function pointers stay valid for as long as the library that produced
/// them stays mapped. [`crate::loader::LibraryHandle`] never unmaps it.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoints {
    /// Structured processing
    pub process: ProcessFn,
    /// Validation without processing
    pub validate: ValidateFn,
    /// Native error descriptions
    pub error_message: ErrorMessageFn,
    /// String release
    pub string_free: StringFreeFn,
    /// Result release
    pub result_free: ResultFreeFn,
    /// Native debug toggle
    pub set_debug: SetDebugFn,
}
