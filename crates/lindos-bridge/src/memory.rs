//! Decoding of boundary results and release of native-owned memory
//!
//! Every allocation the native library hands over is wrapped in a guard as
//! soon as it crosses the boundary. The guard's `Drop` hands it back through
//! the matching native free function, exactly once, on every exit path
//! including unwinding. Decoded values are copied into Rust-owned strings
//! before the guard goes away, so nothing native-owned escapes this module.

use crate::error::ProcessingError;
use crate::taxonomy::{describe, ErrorCode};
use crate::types::{EntryPoints, RawResult, ResultFreeFn, StringFreeFn};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr::NonNull;

/// Which text a failed call reports as its error message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageSource {
    /// Canonical description from the local taxonomy
    #[default]
    Taxonomy,
    /// Text the native library attached to the failure, when present
    Native,
}

/// Scoped ownership of a [`RawResult`]
///
/// Deliberately neither `Clone` nor `Send`: a result belongs to the call
/// that produced it.
pub struct OwnedResult {
    success: bool,
    data: *mut c_char,
    error_code: i32,
    free: ResultFreeFn,
}

impl OwnedResult {
    /// Take ownership of `raw`
    ///
    /// # Safety
    /// `raw` must have been returned by the library that `free` belongs to,
    /// and must not have been released already.
    pub unsafe fn new(raw: RawResult, free: ResultFreeFn) -> Self {
        Self {
            success: raw.success,
            data: raw.data,
            error_code: raw.error_code,
            free,
        }
    }

    /// Success flag reported by the native side
    pub fn success(&self) -> bool {
        self.success
    }

    /// Status code reported by the native side
    pub fn error_code(&self) -> i32 {
        self.error_code
    }

    /// The attached data, borrowed for as long as the guard lives
    pub fn data(&self) -> Option<&CStr> {
        if self.data.is_null() {
            None
        } else {
            // Non-null data is a NUL-terminated string owned by this guard.
            Some(unsafe { CStr::from_ptr(self.data) })
        }
    }
}

impl Drop for OwnedResult {
    fn drop(&mut self) {
        let raw = RawResult {
            success: self.success,
            data: self.data,
            error_code: self.error_code,
        };
        unsafe { (self.free)(raw) }
    }
}

/// Scoped ownership of a string allocated by the native library
pub struct OwnedString {
    ptr: NonNull<c_char>,
    free: StringFreeFn,
}

impl OwnedString {
    /// Take ownership of `ptr`; `None` when it is null (nothing to release)
    ///
    /// # Safety
    /// A non-null `ptr` must be a NUL-terminated string allocated by the
    /// library that `free` belongs to, and must not have been released already.
    pub unsafe fn new(ptr: *mut c_char, free: StringFreeFn) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr, free })
    }

    /// Borrow the string
    pub fn as_c_str(&self) -> &CStr {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    /// Copy the string out, replacing malformed bytes
    pub fn to_string_lossy(&self) -> String {
        self.as_c_str().to_string_lossy().into_owned()
    }
}

impl Drop for OwnedString {
    fn drop(&mut self) {
        unsafe { (self.free)(self.ptr.as_ptr()) }
    }
}

/// Run the native processing entry point and decode its result
///
/// The result is released before this function returns, whichever branch
/// is taken.
pub fn decode_and_process(
    entry_points: &EntryPoints,
    message: &CStr,
    debug: bool,
    source: MessageSource,
) -> Result<String, ProcessingError> {
    if debug {
        tracing::debug!(
            length = message.to_bytes().len(),
            "Processing message: {} bytes",
            message.to_bytes().len()
        );
    }

    let result = unsafe {
        let raw = (entry_points.process)(message.as_ptr());
        OwnedResult::new(raw, entry_points.result_free)
    };

    let outcome = decode(&result, debug, source);

    if debug {
        match &outcome {
            Ok(text) => tracing::debug!(
                length = text.len(),
                "Successfully processed message, result: {} bytes",
                text.len()
            ),
            Err(error) => tracing::debug!(
                code = error.raw_code(),
                "Native processing failed with error code: {}",
                error.raw_code()
            ),
        }
    }

    outcome
}

fn decode(
    result: &OwnedResult,
    debug: bool,
    source: MessageSource,
) -> Result<String, ProcessingError> {
    if result.success() {
        let data = result.data().ok_or_else(ProcessingError::null_data)?;
        return data
            .to_str()
            .map(str::to_owned)
            .map_err(|_| ProcessingError::from_code(ErrorCode::InvalidUtf8));
    }

    let error = ProcessingError::from_code(result.error_code());
    let Some(data) = result.data() else {
        return Err(error);
    };

    let native = data.to_string_lossy();
    if debug {
        tracing::debug!(native_message = %native, "Native error message: {}", native);
    }

    match source {
        MessageSource::Taxonomy => Err(error),
        MessageSource::Native => Err(ProcessingError::with_message(error.code, native)),
    }
}

/// Ask the native library to describe `code`
///
/// A null reply means the library has no description; the local taxonomy
/// answers instead and nothing is released.
pub fn describe_native(entry_points: &EntryPoints, code: i32) -> String {
    let reply = unsafe {
        let ptr = (entry_points.error_message)(code);
        OwnedString::new(ptr, entry_points.string_free)
    };

    match reply {
        Some(text) => text.to_string_lossy(),
        None => describe(code).into_owned(),
    }
}
