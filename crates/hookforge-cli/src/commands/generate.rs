//! Generate command: scan, select technologies, and write the config.

use anyhow::{bail, Context, Result};
use hookforge_core::TechDetector;
use hookforge_hooks::Assembler;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::FileConfig;

/// Runs the generate command.
pub fn run(
    path: &Path,
    output: Option<PathBuf>,
    force: bool,
    min_confidence: Option<f64>,
    config: &FileConfig,
) -> Result<()> {
    let mut detector = TechDetector::new(path);
    if let Some(max_files) = config.scan.max_files {
        detector = detector.with_max_files(max_files);
    }
    if let Some(max_file_size) = config.scan.max_file_size {
        detector = detector.with_max_file_size(max_file_size);
    }
    let report = detector.scan()?;

    let threshold = min_confidence
        .or(config.generate.min_confidence)
        .unwrap_or(0.0);
    let selected: Vec<String> = report
        .technologies
        .values()
        .filter(|t| t.confidence >= threshold)
        .map(|t| t.name.clone())
        .collect();

    if selected.is_empty() {
        info!("no technologies selected; generating baseline-only config");
    } else {
        info!("selected technologies: {}", selected.join(", "));
    }

    let yaml = Assembler::new().assemble(&selected, &report.tokens);

    let target = output
        .or_else(|| config.generate.output.clone())
        .unwrap_or_else(|| path.join(".pre-commit-config.yaml"));

    if target == Path::new("-") {
        print!("{yaml}");
        return Ok(());
    }

    if target.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            target.display()
        );
    }

    std::fs::write(&target, &yaml)
        .with_context(|| format!("failed to write {}", target.display()))?;

    println!("Wrote {}", target.display());
    println!(
        "Included hooks for {} technolog{}.",
        selected.len(),
        if selected.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}
