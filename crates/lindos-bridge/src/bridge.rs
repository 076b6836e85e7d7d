//! The bridge context
//!
//! [`NativeBridge`] owns the library cell and the debug flag, and exposes
//! the upward interface used by front ends.

use crate::config::BridgeConfig;
use crate::encoder::encode;
use crate::error::{BridgeError, ProcessingError, Result};
use crate::loader::{LibraryCell, LibraryHandle};
use crate::memory::{self, MessageSource};
use crate::taxonomy::{describe, SUCCESS};
use std::sync::atomic::{AtomicBool, Ordering};

/// Context for all calls into the native library
///
/// Share it by reference (or behind an `Arc`) between threads. The library is
/// loaded on first use and stays loaded.
#[derive(Debug)]
pub struct NativeBridge {
    library: LibraryCell,
    debug: AtomicBool,
}

impl NativeBridge {
    /// Bridge loading the artifact described by `config`
    pub fn new(config: BridgeConfig) -> Self {
        Self::with_library(LibraryCell::new(config))
    }

    /// Bridge over an explicit library cell
    pub fn with_library(library: LibraryCell) -> Self {
        Self {
            library,
            debug: AtomicBool::new(false),
        }
    }

    /// Bridge over entry points already linked into the process
    pub fn from_handle(handle: LibraryHandle) -> Self {
        Self::with_library(LibraryCell::preloaded(handle))
    }

    /// Acquire the library handle, loading it on first use
    pub fn handle(&self) -> Result<&LibraryHandle> {
        Ok(self.library.acquire()?)
    }

    /// Process `text` and return the native reply
    pub fn process(&self, text: &str) -> Result<String> {
        self.process_with(text, MessageSource::Taxonomy)
    }

    /// Process `text`, choosing where failure messages come from
    pub fn process_with(&self, text: &str, source: MessageSource) -> Result<String> {
        // Read once so the whole call traces under one setting.
        let debug = self.debug_enabled();

        let encoded = encode(text).map_err(|error| {
            if debug {
                tracing::debug!("Failed to convert message for the native boundary");
            }
            BridgeError::Encoding(error)
        })?;

        let handle = self.handle()?;
        memory::decode_and_process(handle.entry_points(), &encoded, debug, source)
            .map_err(BridgeError::Processing)
    }

    /// Process `text`, folding any failure into its description
    pub fn process_legacy(&self, text: &str) -> String {
        match self.process(text) {
            Ok(reply) => reply,
            Err(error) => error.user_message(),
        }
    }

    /// Check `text` with the native validator, without processing it
    ///
    /// `Ok(None)` means the input is valid.
    pub fn validate(&self, text: &str) -> Result<Option<ProcessingError>> {
        let debug = self.debug_enabled();

        let encoded = match encode(text) {
            Ok(encoded) => encoded,
            Err(error) => return Ok(Some(error)),
        };

        let handle = self.handle()?;
        let status = unsafe { (handle.entry_points().validate)(encoded.as_ptr()) };

        if debug {
            tracing::debug!(status, "Native validation returned status {}", status);
        }

        Ok((status != SUCCESS).then(|| ProcessingError::from_code(status)))
    }

    /// Toggle diagnostics on both sides of the boundary
    pub fn set_debug(&self, enabled: bool) -> Result<()> {
        let handle = self.handle()?;
        unsafe { (handle.entry_points().set_debug)(enabled) };
        self.debug.store(enabled, Ordering::SeqCst);
        tracing::debug!(enabled, "Bridge debug tracing {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    /// Whether bridge diagnostics are enabled
    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }

    /// Describe a status code from the local taxonomy
    pub fn describe_code(&self, code: i32) -> String {
        describe(code).into_owned()
    }

    /// Describe a status code as the native library does
    pub fn describe_native(&self, code: i32) -> Result<String> {
        let handle = self.handle()?;
        Ok(memory::describe_native(handle.entry_points(), code))
    }
}

impl Default for NativeBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}
