//! Check-exports command: validate Python library boundaries.

use anyhow::{bail, Result};
use hookforge_exports::{validate_libraries, ValidateOptions};
use std::path::PathBuf;

use crate::config::FileConfig;
use crate::OutputFormat;

/// Inputs for the check-exports command.
pub struct Args {
    /// Library paths from the command line.
    pub libraries: Vec<PathBuf>,
    /// Exclude patterns (repeatable, possibly comma-separated).
    pub exclude: Vec<String>,
    /// Public submodule allow-list.
    pub public_submodules: Vec<String>,
    /// Error-violation threshold for failure.
    pub max_violations: Option<usize>,
    /// Output format.
    pub format: OutputFormat,
    /// Suppress the success message.
    pub quiet: bool,
    /// Print per-library statistics.
    pub show_stats: bool,
    /// Loaded configuration file.
    pub file_config: FileConfig,
}

/// Runs the check-exports command. Exits nonzero when error-class
/// violations fail the run; warnings alone never do.
pub fn run(args: Args) -> Result<()> {
    let libraries = if args.libraries.is_empty() {
        args.file_config.exports.libraries.clone()
    } else {
        args.libraries
    };
    if libraries.is_empty() {
        bail!("no libraries given; pass paths or set [exports] libraries in hookforge.toml");
    }

    let mut exclude = args.file_config.exports.exclude.clone();
    exclude.extend(split_patterns(&args.exclude));

    let public_submodules = if args.public_submodules.is_empty() {
        args.file_config.exports.public_submodules.clone()
    } else {
        args.public_submodules
    };

    let max_violations = args
        .max_violations
        .or(args.file_config.exports.max_violations);

    let opts = ValidateOptions {
        exclude,
        public_submodules,
    };
    let report = validate_libraries(&libraries, &opts)?;

    super::output::print_validation(&report, args.format, args.quiet, args.show_stats)?;

    let errors = report.error_count();
    let failed = match max_violations {
        Some(max) => errors > max,
        None => errors > 0,
    };
    if failed {
        if let Some(max) = max_violations {
            eprintln!("Found {errors} error violation(s), exceeds max of {max}");
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Splits comma-separated pattern arguments, the way repeated `--exclude`
/// flags accept both `-e a -e b` and `-e a,b`.
fn split_patterns(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_patterns_handles_commas_and_whitespace() {
        let raw = vec!["tests/*, build/*".to_string(), "docs/*".to_string()];
        assert_eq!(
            split_patterns(&raw),
            vec!["tests/*", "build/*", "docs/*"]
        );
    }

    #[test]
    fn split_patterns_drops_empties() {
        assert!(split_patterns(&[",,".to_string()]).is_empty());
    }
}
