//! FFI API function definitions
//!
//! This module contains the extern "C" functions that form
//! the public API of the native library.

use std::os::raw::c_char;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{catch_panic, describe, InputError};
use crate::memory::{allocate_string, c_str_to_str};
use crate::types::{codes, LindosResult, MAX_MESSAGE_LEN};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Write a diagnostic line when debug output is enabled
fn debug_log(message: &str) {
    if DEBUG_ENABLED.load(Ordering::Relaxed) {
        eprintln!("[LINDOS DEBUG] {}", message);
    }
}

/// Produce the reply for a message
///
/// The reference library echoes its input unchanged.
fn generate_reply(input: &str) -> Result<String, InputError> {
    check_message(input)?;
    Ok(input.to_owned())
}

fn check_message(input: &str) -> Result<(), InputError> {
    if input.trim().is_empty() {
        return Err(InputError::EmptyMessage);
    }
    if input.len() > MAX_MESSAGE_LEN {
        return Err(InputError::TooLong { len: input.len() });
    }
    Ok(())
}

unsafe fn reply_for(message: *const c_char) -> Result<String, InputError> {
    catch_panic(|| {
        let input = c_str_to_str(message)?;
        generate_reply(input)
    })
}

/// Process a message and return a structured result
///
/// # Safety
/// - `message` must be null or point to a valid NUL-terminated string
/// - The returned result must be freed exactly once with `lindos_result_free`
#[no_mangle]
pub unsafe extern "C" fn lindos_process_message_safe(message: *const c_char) -> LindosResult {
    match reply_for(message) {
        Ok(reply) => {
            debug_log(&format!("Successfully processed message: {} bytes", reply.len()));
            LindosResult::success(allocate_string(&reply))
        }
        Err(error) => {
            debug_log(&format!("Processing failed: {}", error));
            LindosResult::failure(error.code(), allocate_string(error.user_message()))
        }
    }
}

/// Process a message and return the reply, or the error text, as one string
///
/// # Safety
/// - `message` must be null or point to a valid NUL-terminated string
/// - The returned string must be freed exactly once with `lindos_string_free`
#[no_mangle]
pub unsafe extern "C" fn lindos_process_message(message: *const c_char) -> *mut c_char {
    match reply_for(message) {
        Ok(reply) => allocate_string(&reply),
        Err(error) => {
            debug_log(&format!("Processing failed: {}", error));
            allocate_string(error.user_message())
        }
    }
}

/// Check whether a message would be accepted, without processing it
///
/// Returns 0 for a valid message, otherwise the status code of the failure.
///
/// # Safety
/// `message` must be null or point to a valid NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn lindos_validate_message(message: *const c_char) -> i32 {
    let status = match catch_panic(|| check_message(c_str_to_str(message)?)) {
        Ok(()) => codes::SUCCESS,
        Err(error) => error.code(),
    };
    debug_log(&format!("Validation status: {}", status));
    status
}

/// Get a human-readable description of a status code
///
/// Returns null for codes this library does not define. A non-null result
/// must be freed with `lindos_string_free`.
#[no_mangle]
pub extern "C" fn lindos_error_message(error_code: i32) -> *mut c_char {
    match describe(error_code) {
        Some(message) => allocate_string(message),
        None => ptr::null_mut(),
    }
}

/// Enable or disable debug output on stderr
#[no_mangle]
pub extern "C" fn lindos_set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
    if enabled {
        debug_log("Debug logging enabled");
    }
}

/// Whether debug output is enabled
pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}
