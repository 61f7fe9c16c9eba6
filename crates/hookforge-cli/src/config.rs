//! `hookforge.toml` configuration file support.
//!
//! CLI arguments always take precedence; the file supplies defaults for
//! scan caps, generation options, and export-validation settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the project-level configuration file.
pub const CONFIG_FILE: &str = "hookforge.toml";

/// Parsed `hookforge.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// `[scan]` section.
    #[serde(default)]
    pub scan: ScanSection,
    /// `[generate]` section.
    #[serde(default)]
    pub generate: GenerateSection,
    /// `[exports]` section.
    #[serde(default)]
    pub exports: ExportsSection,
}

/// Detector caps.
#[derive(Debug, Default, Deserialize)]
pub struct ScanSection {
    /// Maximum number of files to inspect per scan.
    pub max_files: Option<usize>,
    /// Maximum file size (and read cap) in bytes.
    pub max_file_size: Option<u64>,
}

/// Config generation options.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateSection {
    /// Minimum confidence for a technology to receive hooks.
    pub min_confidence: Option<f64>,
    /// Output path for the generated document.
    pub output: Option<PathBuf>,
}

/// Export validation options.
#[derive(Debug, Default, Deserialize)]
pub struct ExportsSection {
    /// Library paths to validate when none are given on the command line.
    #[serde(default)]
    pub libraries: Vec<PathBuf>,
    /// Call-site file patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Submodules consumers may import from directly.
    #[serde(default)]
    pub public_submodules: Vec<String>,
    /// Error-violation threshold for failure.
    pub max_violations: Option<usize>,
}

/// Loads configuration: an explicit `--config` path must exist; otherwise
/// `hookforge.toml` in the target directory is used when present, and
/// defaults apply when it is not.
pub fn load(explicit: Option<&Path>, search_dir: &Path) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = search_dir.join(CONFIG_FILE);
            if !candidate.is_file() {
                debug!("no {CONFIG_FILE} found, using defaults");
                return Ok(FileConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}
