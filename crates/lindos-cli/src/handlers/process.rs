//! Process command handler

use crate::cli::ProcessArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{LegacyReport, OutputWriter, ProcessReport};
use lindos_bridge::NativeBridge;
use tracing::{debug, instrument};

/// Handle the process command
#[instrument(skip_all, fields(legacy = args.legacy, native_message = args.native_message))]
pub fn handle_process(
    args: ProcessArgs,
    bridge: &NativeBridge,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::new("process_command");
    let message = args.message();
    debug!(bytes = message.len(), "Processing message");

    if args.legacy {
        let text = bridge.process_legacy(&message);
        return if output.is_human() {
            output.writeln(&text)
        } else {
            output.data(&LegacyReport {
                input: message,
                output: text,
            })
        };
    }

    match bridge.process_with(&message, args.message_source()) {
        Ok(reply) => output.process_report(&ProcessReport::replied(message, reply)),
        Err(error) => {
            debug!(code = ?error.code(), "Processing failed: {}", error);

            // Machine consumers still get a report on stdout
            if let (false, Some(failure)) = (output.is_human(), error.processing_error()) {
                output.process_report(&ProcessReport::failed(message, failure.clone()))?;
            }
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use crate::handlers::testing::{capture, fake_bridge};
    use lindos_bridge::BridgeError;
    use pretty_assertions::assert_eq;

    fn args(text: &[&str]) -> ProcessArgs {
        ProcessArgs {
            text: text.iter().map(|s| s.to_string()).collect(),
            native_message: false,
            legacy: false,
        }
    }

    #[test]
    fn test_reply_is_printed() {
        let (mut output, buffer) = capture(OutputFormat::Human);
        handle_process(args(&["hello", "world"]), &fake_bridge(), &mut output).unwrap();
        assert_eq!(buffer.contents(), "hello world\n");
    }

    #[test]
    fn test_failure_uses_taxonomy_message() {
        let (mut output, buffer) = capture(OutputFormat::Human);
        let error = handle_process(args(&[""]), &fake_bridge(), &mut output).unwrap_err();

        assert_eq!(error.to_string(), "Processing error: Message cannot be empty");
        assert_eq!(error.exit_code(), 3);
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_failure_with_native_message() {
        let (mut output, _) = capture(OutputFormat::Human);
        let mut process_args = args(&["   "]);
        process_args.native_message = true;

        let error = handle_process(process_args, &fake_bridge(), &mut output).unwrap_err();
        assert_eq!(error.to_string(), "Processing error: native: nothing to say");
    }

    #[test]
    fn test_failure_report_in_json() {
        let (mut output, buffer) = capture(OutputFormat::Json);
        let error = handle_process(args(&[""]), &fake_bridge(), &mut output).unwrap_err();

        assert!(matches!(error, Error::Bridge(BridgeError::Processing(_))));
        let report: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(report["success"], false);
        assert_eq!(report["error"]["code"], 3);
    }

    #[test]
    fn test_encoding_failure() {
        let (mut output, _) = capture(OutputFormat::Human);
        let error = handle_process(args(&["a\0b"]), &fake_bridge(), &mut output).unwrap_err();
        assert!(matches!(error, Error::Bridge(BridgeError::Encoding(_))));
    }

    #[test]
    fn test_legacy_always_succeeds() {
        let (mut output, buffer) = capture(OutputFormat::Human);
        let mut legacy = args(&[""]);
        legacy.legacy = true;

        handle_process(legacy, &fake_bridge(), &mut output).unwrap();
        assert_eq!(buffer.contents(), "Message cannot be empty\n");
    }

    #[test]
    fn test_legacy_json() {
        let (mut output, buffer) = capture(OutputFormat::Json);
        let mut legacy = args(&["hi"]);
        legacy.legacy = true;

        handle_process(legacy, &fake_bridge(), &mut output).unwrap();
        assert_eq!(buffer.contents(), "{\"input\":\"hi\",\"output\":\"hi\"}\n");
    }
}
