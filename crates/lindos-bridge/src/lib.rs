//! Lindos Bridge - safe calls into the Lindos native text-processing library
//!
//! The native library is a pre-built C-ABI artifact. This crate loads it once,
//! turns its status codes and result structures into ordinary `Result`s, and
//! releases every allocation the library hands over exactly once.
//!
//! # Main Components
//!
//! - **Loader**: one-time, thread-safe loading and binding of the artifact
//! - **Encoder**: conversion of caller text into boundary strings
//! - **Memory**: result decoding with guaranteed release of native memory
//! - **Taxonomy**: status codes and their descriptions
//!
//! # Example
//!
//! ```no_run
//! use lindos_bridge::{BridgeConfig, NativeBridge};
//!
//! fn example() -> lindos_bridge::Result<()> {
//!     let bridge = NativeBridge::new(BridgeConfig::default());
//!     if let Some(error) = bridge.validate("hello")? {
//!         eprintln!("invalid input: {}", error);
//!         return Ok(());
//!     }
//!     println!("{}", bridge.process("hello")?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod config;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod memory;
pub mod taxonomy;
pub mod types;

// Re-export main types for convenience
pub use bridge::NativeBridge;
pub use config::BridgeConfig;
pub use error::{BridgeError, LoadError, ProcessingError, Result};
pub use loader::{LibraryCell, LibraryHandle};
pub use memory::MessageSource;
pub use taxonomy::{describe, ErrorCode};
pub use types::{EntryPoints, RawResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
