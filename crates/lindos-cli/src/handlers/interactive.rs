//! Interactive command handler
//!
//! Reads one message per line until end of input. Rejected messages are
//! reported and the session carries on; a missing library ends it.

use crate::cli::InteractiveArgs;
use crate::error::{ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ProcessReport};
use lindos_bridge::NativeBridge;
use std::io::BufRead;
use tracing::{info, instrument};

const PROMPT: &str = "> ";

/// Handle the interactive command
///
/// `prompt` controls whether a prompt is written before each line, which
/// only makes sense when a person is typing.
#[instrument(skip_all, fields(native_message = args.native_message))]
pub fn handle_interactive<R: BufRead>(
    args: InteractiveArgs,
    bridge: &NativeBridge,
    mut input: R,
    prompt: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    let timer = Timer::new("interactive_session");
    let source = args.message_source();
    let mut processed = 0usize;
    let mut failed = 0usize;
    let mut buffer = String::new();

    loop {
        if prompt {
            output.prompt(PROMPT)?;
        }

        buffer.clear();
        let read = input
            .read_line(&mut buffer)
            .context("Failed to read message from stdin")?;
        if read == 0 {
            break;
        }

        let line = buffer.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        processed += 1;
        match bridge.process_with(line, source) {
            Ok(reply) => output.process_report(&ProcessReport::replied(line, reply))?,
            Err(error) => match error.processing_error() {
                Some(failure) => {
                    failed += 1;
                    output.process_report(&ProcessReport::failed(line, failure.clone()))?;
                }
                None => return Err(error.into()),
            },
        }
    }

    if prompt {
        output.writeln("")?;
    }
    output.info(&format!("{} messages processed, {} failed", processed, failed))?;

    info!(
        processed,
        failed,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Interactive session ended"
    );
    Ok(())
}
