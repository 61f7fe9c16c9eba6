//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# hookforge configuration

[scan]
# Cap on total files inspected per scan
# max_files = 5000

# Cap on file size (and bytes read) per file
# max_file_size = 10000

[generate]
# Only include technologies at or above this confidence
# min_confidence = 0.3

# Where to write the generated document
# output = ".pre-commit-config.yaml"

[exports]
# Python libraries to validate with `hookforge check-exports`
# libraries = ["./mylib"]

# Call-site file patterns to skip
# exclude = ["tests/*"]

# Submodules consumers may import from directly
# public_submodules = ["utils"]

# Fail only when error violations exceed this number
# max_violations = 0
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Run: hookforge scan");
    println!("  2. Run: hookforge generate");

    Ok(())
}
