//! Memory management utilities for FFI
//!
//! Every string this library hands out is a `CString` turned into a raw
//! pointer; it comes back through `lindos_string_free` (directly, or via
//! `lindos_result_free`) and is rebuilt and dropped there.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::InputError;
use crate::types::LindosResult;

/// Allocate a new string for FFI return
///
/// Returns null if `s` contains an interior NUL byte.
/// The caller must free the string using `lindos_string_free`.
pub fn allocate_string(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string allocated by this library
///
/// # Safety
/// The pointer must have been returned by this library, must not have
/// been freed already, and must not be used afterwards. Null is a no-op.
#[no_mangle]
pub unsafe extern "C" fn lindos_string_free(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }

    // Reconstruct the CString and let it drop
    drop(CString::from_raw(ptr));
}

/// Free a result structure and the data it owns
///
/// # Safety
/// The result must have been returned by this library and must be freed
/// exactly once.
#[no_mangle]
pub unsafe extern "C" fn lindos_result_free(result: LindosResult) {
    if !result.data.is_null() {
        lindos_string_free(result.data);
    }
}

/// Borrow a C string as UTF-8
///
/// # Safety
/// The pointer must be null or point to a valid NUL-terminated string that
/// outlives the returned reference.
pub unsafe fn c_str_to_str<'a>(ptr: *const c_char) -> Result<&'a str, InputError> {
    if ptr.is_null() {
        return Err(InputError::NullPointer);
    }

    Ok(CStr::from_ptr(ptr).to_str()?)
}
