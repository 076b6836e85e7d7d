//! Lindos Core - reference build of the Lindos native library
//!
//! This crate exports the C ABI that the Lindos bridge loads: structured
//! processing, validation, error descriptions, debug control, and the
//! matching free functions. Its reply is the input echoed back unchanged,
//! which makes it suitable for exercising the boundary end to end.
//!
//! Empty and whitespace-only messages are rejected with
//! [`codes::EMPTY_MESSAGE`] instead of being answered with a canned greeting,
//! and replies carry no prefix. [`lindos_error_message`] returns null for any
//! code outside 1-4, which leaves the wording of unknown codes to the caller.
//!
//! # Safety
//!
//! Callers across the boundary must ensure:
//! - Message pointers are null or valid NUL-terminated strings
//! - Every returned string or result is freed exactly once, through this
//!   library's own free functions

#![warn(missing_docs)]

mod api;
mod error;
mod memory;
mod types;

// Re-export public API
pub use api::*;
pub use error::InputError;
pub use memory::{lindos_result_free, lindos_string_free};
pub use types::{codes, LindosResult, MAX_MESSAGE_LEN};
