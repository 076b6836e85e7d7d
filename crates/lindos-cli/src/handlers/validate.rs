//! Validate command handler

use crate::cli::ValidateArgs;
use crate::error::{Error, Result};
use crate::output::{OutputWriter, ValidationReport};
use lindos_bridge::NativeBridge;
use tracing::{debug, instrument};

/// Handle the validate command
///
/// Prints the verdict, then fails with [`Error::InvalidInput`] when the
/// message was rejected so the exit status reflects it.
#[instrument(skip_all)]
pub fn handle_validate(
    args: ValidateArgs,
    bridge: &NativeBridge,
    output: &mut OutputWriter,
) -> Result<()> {
    let message = args.message();
    let verdict = bridge.validate(&message)?;
    debug!(valid = verdict.is_none(), "Validation finished");

    output.validation_report(&ValidationReport {
        input: message,
        valid: verdict.is_none(),
        error: verdict.clone(),
    })?;

    match verdict {
        None => Ok(()),
        Some(error) => Err(Error::InvalidInput {
            code: error.raw_code(),
            message: error.message,
        }),
    }
}
