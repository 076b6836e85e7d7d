//! Location of the native artifact
//!
//! The artifact is found relative to a fixed project root rather than
//! through loader search paths, so a missing library fails the same way on
//! every machine. The bridge never consults the environment; wrapping tools
//! may fill in `artifact` themselves.

use serde::{Deserialize, Serialize};
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

/// Library name of the native text-processing library
pub const DEFAULT_LIBRARY_NAME: &str = "lindos_core";

/// Build output directory of the native library, relative to the project root
pub const DEFAULT_LIBRARY_DIR: &str = "target/release";

/// Native artifact layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Project root the artifact is resolved against
    pub project_root: PathBuf,

    /// Directory holding the artifact, relative to `project_root`
    pub library_dir: PathBuf,

    /// Library name without platform prefix or suffix
    pub library_name: String,

    /// Explicit artifact path, bypassing the layout above
    pub artifact: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            artifact: None,
        }
    }
}

impl BridgeConfig {
    /// Layout rooted at `project_root`
    pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    /// Use an explicit artifact path
    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    /// Platform file name of the library, e.g. `liblindos_core.so`
    pub fn file_name(&self) -> String {
        format!("{}{}{}", DLL_PREFIX, self.library_name, DLL_SUFFIX)
    }

    /// Absolute (or root-relative) path of the artifact
    pub fn artifact_path(&self) -> PathBuf {
        match &self.artifact {
            Some(path) => path.clone(),
            None => self
                .project_root
                .join(&self.library_dir)
                .join(self.file_name()),
        }
    }

    /// Remediation hint shown when the artifact is missing
    pub fn remediation_hint(&self) -> String {
        format!(
            "Please build it first with: cargo build --release -p {} (from {})",
            self.library_name.replace('_', "-"),
            self.project_root.display()
        )
    }
}

/// Workspace root: two levels above this crate's manifest directory
fn default_project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}
