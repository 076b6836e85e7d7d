//! In-process stand-in for the native library, for handler tests

use crate::cli::OutputFormat;
use crate::output::tests::SharedBuffer;
use crate::output::OutputWriter;
use lindos_bridge::{EntryPoints, LibraryHandle, NativeBridge, RawResult};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) static NATIVE_DEBUG: AtomicBool = AtomicBool::new(false);

fn allocate(text: &str) -> *mut c_char {
    CString::new(text).unwrap().into_raw()
}

fn status(input: &[u8]) -> i32 {
    if input.iter().all(u8::is_ascii_whitespace) {
        3
    } else if input.len() > 1000 {
        4
    } else {
        0
    }
}

unsafe extern "C" fn fake_process(message: *const c_char) -> RawResult {
    let input = CStr::from_ptr(message).to_bytes();
    match status(input) {
        0 => RawResult {
            success: true,
            data: CString::new(input.to_vec()).unwrap().into_raw(),
            error_code: 0,
        },
        code => RawResult {
            success: false,
            data: allocate("native: nothing to say"),
            error_code: code,
        },
    }
}

unsafe extern "C" fn fake_validate(message: *const c_char) -> i32 {
    status(CStr::from_ptr(message).to_bytes())
}

unsafe extern "C" fn fake_error_message(code: i32) -> *mut c_char {
    match code {
        3 => allocate("native: empty"),
        _ => ptr::null_mut(),
    }
}

unsafe extern "C" fn fake_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

unsafe extern "C" fn fake_result_free(result: RawResult) {
    fake_string_free(result.data);
}

unsafe extern "C" fn fake_set_debug(enabled: bool) {
    NATIVE_DEBUG.store(enabled, Ordering::SeqCst);
}

/// Bridge over the fake entry points
pub(crate) fn fake_bridge() -> NativeBridge {
    NativeBridge::from_handle(LibraryHandle::from_entry_points(EntryPoints {
        process: fake_process,
        validate: fake_validate,
        error_message: fake_error_message,
        string_free: fake_string_free,
        result_free: fake_result_free,
        set_debug: fake_set_debug,
    }))
}

/// Colorless writer capturing everything it is given
pub(crate) fn capture(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    capture_verbose(format, 0)
}

/// Like [`capture`], at the given verbosity
pub(crate) fn capture_verbose(format: OutputFormat, verbose: u8) -> (OutputWriter, SharedBuffer) {
    colored::control::set_override(false);
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, verbose, Box::new(buffer.clone()));
    (writer, buffer)
}
