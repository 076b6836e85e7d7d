//! Output formatting and writing utilities
//!
//! Every command produces a serializable report. Reports are written either
//! as human-readable text or in a machine format (JSON, YAML).

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use lindos_bridge::{ErrorCode, ProcessingError};
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Outcome of sending one message through the native library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessReport {
    /// Message as sent
    pub input: String,
    /// Whether the native library accepted it
    pub success: bool,
    /// Reply text on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    /// Failure details otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProcessingError>,
}

impl ProcessReport {
    pub fn replied(input: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            success: true,
            reply: Some(reply.into()),
            error: None,
        }
    }

    pub fn failed(input: impl Into<String>, error: ProcessingError) -> Self {
        Self {
            input: input.into(),
            success: false,
            reply: None,
            error: Some(error),
        }
    }
}

/// Output of the single-string processing mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyReport {
    pub input: String,
    /// Reply, or the description of the failure
    pub output: String,
}

/// Verdict of the native validator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProcessingError>,
}

/// Where a description came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionSource {
    Taxonomy,
    Native,
}

/// Description of one status code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionReport {
    pub code: i32,
    /// Symbolic name, e.g. `EMPTY_MESSAGE`
    pub name: String,
    pub description: String,
    pub source: DescriptionSource,
}

impl DescriptionReport {
    pub fn new(code: i32, description: impl Into<String>, source: DescriptionSource) -> Self {
        Self {
            code,
            name: ErrorCode::from_raw(code).to_string(),
            description: description.into(),
            source,
        }
    }
}

/// Trait for formatting output with specialized support for the reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the outcome of a processing call
    fn format_process_report(&self, report: &ProcessReport) -> Result<String>;

    /// Format a validation verdict
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format a list of code descriptions
    fn format_descriptions(&self, reports: &[DescriptionReport]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_process_report(&self, report: &ProcessReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_process_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_descriptions(&self, reports: &[DescriptionReport]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_descriptions_human(reports)),
            _ => self.format(&reports),
        }
    }
}

fn format_failure(error: &ProcessingError) -> String {
    format!("{} (code {}, {})", error.message, error.raw_code(), error.code)
}

fn format_process_report_human(report: &ProcessReport) -> String {
    match (&report.reply, &report.error) {
        (Some(reply), _) => reply.clone(),
        (None, Some(error)) => format!("{} {}", "✗".red(), format_failure(error)),
        (None, None) => String::new(),
    }
}

fn format_validation_report_human(report: &ValidationReport) -> String {
    match &report.error {
        None => format!("{} valid", "✓".green()),
        Some(error) => format!("{} invalid: {}", "✗".red(), format_failure(error)),
    }
}

fn format_descriptions_human(reports: &[DescriptionReport]) -> String {
    let name_width = reports.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let code_width = reports
        .iter()
        .map(|r| r.code.to_string().len())
        .max()
        .unwrap_or(0);

    reports
        .iter()
        .map(|r| {
            let name = format!("{:name_width$}", r.name, name_width = name_width);
            format!(
                "{:>code_width$}  {}  {}",
                r.code,
                name.bold(),
                r.description,
                code_width = code_width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Whether human-readable output is being produced
    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.verbose == 0 || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write the interactive prompt
    pub fn prompt(&mut self, prompt: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.write(&prompt.cyan().bold().to_string())
        } else {
            self.write(prompt)
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.emit(formatted)
    }

    /// Write a processing outcome
    pub fn process_report(&mut self, report: &ProcessReport) -> Result<()> {
        let formatted = self.format.format_process_report(report)?;
        self.emit(formatted)
    }

    /// Write a validation verdict
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        let formatted = self.format.format_validation_report(report)?;
        self.emit(formatted)
    }

    /// Write code descriptions
    pub fn descriptions(&mut self, reports: &[DescriptionReport]) -> Result<()> {
        let formatted = self.format.format_descriptions(reports)?;
        self.emit(formatted)
    }

    fn emit(&mut self, formatted: String) -> Result<()> {
        trace!(format = ?self.format, bytes = formatted.len(), "Writing report");

        // YAML documents already end with a newline
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
