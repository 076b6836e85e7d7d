//! Describe command handler

use crate::cli::DescribeArgs;
use crate::error::Result;
use crate::output::{DescriptionReport, DescriptionSource, OutputWriter};
use lindos_bridge::NativeBridge;

/// Handle the describe command
pub fn handle_describe(
    args: DescribeArgs,
    bridge: &NativeBridge,
    output: &mut OutputWriter,
) -> Result<()> {
    let reports = args
        .codes
        .iter()
        .map(|&code| -> Result<DescriptionReport> {
            Ok(if args.native {
                DescriptionReport::new(code, bridge.describe_native(code)?, DescriptionSource::Native)
            } else {
                DescriptionReport::new(code, bridge.describe_code(code), DescriptionSource::Taxonomy)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    output.descriptions(&reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::handlers::testing::{capture, fake_bridge};
    use lindos_bridge::{BridgeConfig, NativeBridge};
    use pretty_assertions::assert_eq;

    fn args(codes: &[i32], native: bool) -> DescribeArgs {
        DescribeArgs {
            codes: codes.to_vec(),
            native,
        }
    }

    #[test]
    fn test_taxonomy_descriptions() {
        let (mut output, buffer) = capture(OutputFormat::Human);
        handle_describe(args(&[2, 4], false), &fake_bridge(), &mut output).unwrap();

        assert_eq!(
            buffer.contents(),
            "2  INVALID_UTF8        Message contains invalid characters\n\
             4  PROCESSING_FAILURE  Failed to process message\n"
        );
    }

    #[test]
    fn test_native_descriptions_fall_back() {
        let (mut output, buffer) = capture(OutputFormat::Json);
        handle_describe(args(&[3, 42], true), &fake_bridge(), &mut output).unwrap();

        let reports: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        assert_eq!(reports[0]["description"], "native: empty");
        assert_eq!(reports[0]["source"], "native");
        assert_eq!(reports[1]["description"], "unknown error (code: 42)");
    }

    #[test]
    fn test_taxonomy_needs_no_library() {
        let dir = tempfile::TempDir::new().unwrap();
        let bridge = NativeBridge::new(BridgeConfig::with_project_root(dir.path()));

        let (mut output, _) = capture(OutputFormat::Json);
        handle_describe(args(&[1], false), &bridge, &mut output).unwrap();

        let (mut output, _) = capture(OutputFormat::Json);
        let error = handle_describe(args(&[1], true), &bridge, &mut output).unwrap_err();
        assert!(error.is_missing_library());
    }
}
