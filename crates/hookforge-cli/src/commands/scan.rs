//! Scan command: detect technologies and print the result.

use anyhow::Result;
use hookforge_core::TechDetector;
use std::path::Path;

use crate::config::FileConfig;
use crate::OutputFormat;

/// Runs the scan command.
pub fn run(path: &Path, format: OutputFormat, config: &FileConfig) -> Result<()> {
    let mut detector = TechDetector::new(path);
    if let Some(max_files) = config.scan.max_files {
        detector = detector.with_max_files(max_files);
    }
    if let Some(max_file_size) = config.scan.max_file_size {
        detector = detector.with_max_file_size(max_file_size);
    }

    let report = detector.scan()?;
    super::output::print_scan(&report, format)
}
