//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments and their environment variables

use crate::cli::OutputFormat;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::LogFormat;
use lindos_bridge::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Native library layout
    pub library: BridgeConfig,

    /// Enable boundary diagnostics
    pub debug: bool,

    /// Output settings
    pub output: OutputSettings,

    /// Logging settings
    pub logging: LogSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format
    pub format: Option<OutputFormat>,

    /// Use colored output when attached to a terminal
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error) or filter directives
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<LogFormat>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.exists() {
                match Self::from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".lindos.yaml"),
            PathBuf::from(".lindos.json"),
            PathBuf::from("lindos.yaml"),
            PathBuf::from("lindos.json"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let lindos_dir = config_dir.join("lindos");
            paths.push(lindos_dir.join("config.yaml"));
            paths.push(lindos_dir.join("config.json"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".lindos.yaml"));
            paths.push(home_dir.join(".lindos.json"));
        }

        paths
    }

    /// Library layout with command-line overrides applied
    pub fn bridge_config(&self, library: Option<&Path>) -> BridgeConfig {
        match library {
            Some(path) => self.library.clone().with_artifact(path),
            None => self.library.clone(),
        }
    }

    /// Whether boundary diagnostics are requested
    pub fn debug_enabled(&self, flag: bool) -> bool {
        flag || self.debug
    }

    /// Effective output format
    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.output.format).unwrap_or(OutputFormat::Human)
    }
}
