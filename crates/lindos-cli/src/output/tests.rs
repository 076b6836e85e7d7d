// Tests for report formatting
//
// Human output is checked with colors forced off; machine formats are
// checked by parsing them back.

use super::*;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

/// Writer that keeps everything written to it
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, verbose: u8) -> (OutputWriter, SharedBuffer) {
    colored::control::set_override(false);
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, false, verbose, Box::new(buffer.clone()));
    (writer, buffer)
}

fn empty_message() -> ProcessingError {
    ProcessingError::from_code(ErrorCode::EmptyMessage)
}

#[test]
fn test_process_report_human() {
    let (mut output, buffer) = writer(OutputFormat::Human, 0);

    output.process_report(&ProcessReport::replied("hi", "hello there")).unwrap();
    output.process_report(&ProcessReport::failed("", empty_message())).unwrap();

    assert_eq!(
        buffer.contents(),
        "hello there\n✗ Message cannot be empty (code 3, EMPTY_MESSAGE)\n"
    );
}

#[test]
fn test_process_report_json() {
    let (mut output, buffer) = writer(OutputFormat::Json, 0);

    output.process_report(&ProcessReport::failed("", empty_message())).unwrap();

    let value: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "input": "",
            "success": false,
            "error": {"code": 3, "message": "Message cannot be empty"}
        })
    );
}

#[test]
fn test_successful_report_omits_error() {
    let formatted = OutputFormat::Json
        .format_process_report(&ProcessReport::replied("hi", "hi"))
        .unwrap();
    assert_eq!(formatted, r#"{"input":"hi","success":true,"reply":"hi"}"#);
}

#[test]
fn test_validation_report_human() {
    colored::control::set_override(false);

    let valid = ValidationReport {
        input: "hello".to_string(),
        valid: true,
        error: None,
    };
    assert_eq!(
        OutputFormat::Human.format_validation_report(&valid).unwrap(),
        "✓ valid"
    );

    let invalid = ValidationReport {
        input: String::new(),
        valid: false,
        error: Some(empty_message()),
    };
    assert_eq!(
        OutputFormat::Human.format_validation_report(&invalid).unwrap(),
        "✗ invalid: Message cannot be empty (code 3, EMPTY_MESSAGE)"
    );
}

#[test]
fn test_validation_report_yaml() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, 0);

    output
        .validation_report(&ValidationReport {
            input: "hello".to_string(),
            valid: true,
            error: None,
        })
        .unwrap();

    let contents = buffer.contents();
    assert!(contents.contains("input: hello"));
    assert!(contents.contains("valid: true"));
    assert!(!contents.contains("error"));
    // No blank line after the YAML document
    assert!(!contents.ends_with("\n\n"));
}

#[test]
fn test_descriptions_human_are_aligned() {
    colored::control::set_override(false);

    let reports = vec![
        DescriptionReport::new(1, "No message provided", DescriptionSource::Taxonomy),
        DescriptionReport::new(42, "unknown error (code: 42)", DescriptionSource::Taxonomy),
    ];

    assert_eq!(
        OutputFormat::Human.format_descriptions(&reports).unwrap(),
        " 1  NULL_POINTER  No message provided\n42  NATIVE(42)    unknown error (code: 42)"
    );
}

#[test]
fn test_descriptions_json() {
    let reports = vec![DescriptionReport::new(3, "native: empty", DescriptionSource::Native)];

    let formatted = OutputFormat::Json.format_descriptions(&reports).unwrap();
    assert_eq!(
        formatted,
        r#"[{"code":3,"name":"EMPTY_MESSAGE","description":"native: empty","source":"native"}]"#
    );
}

#[test]
fn test_info_requires_verbosity() {
    let (mut output, buffer) = writer(OutputFormat::Human, 0);
    output.info("hidden").unwrap();
    assert_eq!(buffer.contents(), "");

    let (mut output, buffer) = writer(OutputFormat::Human, 1);
    output.info("shown").unwrap();
    assert_eq!(buffer.contents(), "INFO: shown\n");
}

#[test]
fn test_machine_formats_skip_decoration() {
    let (mut output, buffer) = writer(OutputFormat::Json, 1);

    output.info("info").unwrap();
    output.prompt("> ").unwrap();

    assert_eq!(buffer.contents(), "");
}
