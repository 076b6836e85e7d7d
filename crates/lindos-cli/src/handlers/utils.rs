//! Shared utilities for command handlers

use crate::error::Result;
use lindos_bridge::{BridgeConfig, NativeBridge};
use tracing::debug;

/// Build the bridge for a command
///
/// The library itself is loaded lazily, so a command that never crosses
/// the boundary works without it. Enabling debug does cross it.
pub fn open_bridge(config: BridgeConfig, debug: bool) -> Result<NativeBridge> {
    debug!(artifact = %config.artifact_path().display(), "Using native library");
    let bridge = NativeBridge::new(config);

    if debug {
        bridge.set_debug(true)?;
    }

    Ok(bridge)
}
