//! Export/import boundary validation.
//!
//! Cross-references a library's declared export set with every external
//! import of it, producing error-class violations for imports of
//! non-exported symbols and warning-class violations for exported names
//! that follow the private naming convention.

use crate::export_parser::{exported_symbols, init_path};
use crate::import_locator::find_imports;

use miette::Diagnostic;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when validating a library.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The library path could not be resolved at all.
    #[error("cannot resolve library path {path}: {source}")]
    LibraryPath {
        /// Path as given by the caller.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Options for a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Glob patterns; call sites in matching files are not reported.
    pub exclude: Vec<String>,
    /// Submodules whose symbols consumers may import directly.
    pub public_submodules: Vec<String>,
}

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Library the import reaches into.
    pub lib_name: String,
    /// Symbol path relative to the library root (possibly dotted).
    pub func_name: String,
    /// File containing the violating import (entry point for warnings).
    pub file_path: PathBuf,
    /// Line number of the import (1 for warnings).
    pub line_num: usize,
    /// True for convention warnings, false for export violations.
    pub is_warning: bool,
    /// Remediation suggestion, when one applies.
    pub hint: Option<String>,
}

impl Violation {
    /// Formats the violation for terminal output, including any hint.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{self}\n");
        if let Some(hint) = &self.hint {
            let _ = writeln!(output, "  = help: {hint}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_warning {
            write!(
                f,
                "{}:{}: warning: exported name '{}' starts with underscore",
                self.file_path.display(),
                self.line_num,
                self.func_name,
            )
        } else {
            write!(
                f,
                "{}:{}: symbol '{}' is not exported from '{}'",
                self.file_path.display(),
                self.line_num,
                self.func_name,
                self.lib_name,
            )
        }
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: v.to_string(),
            help: v.hint.clone(),
        }
    }
}

/// Per-library validation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    /// Library name (directory basename).
    pub lib_name: String,
    /// Number of exported symbols found.
    pub exports_count: usize,
    /// Number of distinct imported symbol paths found.
    pub imports_count: usize,
    /// Number of violations (both classes).
    pub violations_count: usize,
    /// Wall-clock seconds spent on this library.
    pub execution_time: f64,
}

/// Aggregated result of validating one or more libraries.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All violations across libraries, in discovery order.
    pub violations: Vec<Violation>,
    /// Per-library statistics.
    pub libraries: Vec<LibraryStats>,
    /// Total exported symbols.
    pub total_exports: usize,
    /// Total distinct imported symbol paths.
    pub total_imports: usize,
    /// Total violations (both classes).
    pub total_violations: usize,
    /// Total wall-clock seconds.
    pub total_execution_time: f64,
}

impl ValidationReport {
    /// True if any error-class violation exists. Warnings never count.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| !v.is_warning)
    }

    /// Number of error-class violations.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.violations.iter().filter(|v| !v.is_warning).count()
    }

    /// Number of warning-class violations.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_warning).count()
    }
}

/// Validates that no non-exported symbols are imported from outside a library.
///
/// # Errors
///
/// Returns an error only when the library path cannot be resolved; a missing
/// or unreadable entry point is not an error — it yields an empty export set,
/// which flags every external import (an unreadable interface exports
/// nothing).
pub fn validate_library(
    lib_path: &Path,
    opts: &ValidateOptions,
) -> Result<(Vec<Violation>, LibraryStats), ValidateError> {
    let start = Instant::now();

    let lib_root = lib_path
        .canonicalize()
        .map_err(|source| ValidateError::LibraryPath {
            path: lib_path.to_path_buf(),
            source,
        })?;
    let lib_name = lib_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    info!("validating {lib_name}");

    let entry = init_path(&lib_root);
    let exported = exported_symbols(&entry);
    let imports = find_imports(&lib_root);

    let mut violations = Vec::new();

    // Convention check: private-prefixed names should not be re-exported.
    // No call site applies, so these attach to the entry point itself.
    for name in &exported {
        if name.starts_with('_') {
            violations.push(Violation {
                lib_name: lib_name.clone(),
                func_name: name.clone(),
                file_path: entry.clone(),
                line_num: 1,
                is_warning: true,
                hint: Some(format!(
                    "rename '{name}' or drop it from {lib_name}/__init__.py exports"
                )),
            });
        }
    }

    let prefix = format!("{lib_name}.");
    let excludes = compile_excludes(&opts.exclude);

    for (key, occurrences) in &imports {
        let Some(rel) = key.strip_prefix(&prefix) else {
            continue;
        };

        // Explicitly exported symbols are always allowed.
        if exported.contains(rel) {
            continue;
        }

        // Allow-listed submodules may be reached into directly.
        if opts
            .public_submodules
            .iter()
            .any(|sub| rel == sub.as_str() || rel.starts_with(&format!("{sub}.")))
        {
            continue;
        }

        for occurrence in occurrences {
            if is_excluded(&excludes, &occurrence.file, &lib_root) {
                debug!("excluded call site {}", occurrence.file.display());
                continue;
            }
            // Internal use is always fine; the locator already skips the
            // library's own files, re-checked here.
            if occurrence.file.starts_with(&lib_root) {
                continue;
            }

            violations.push(Violation {
                lib_name: lib_name.clone(),
                func_name: rel.to_string(),
                file_path: occurrence.file.clone(),
                line_num: occurrence.line,
                is_warning: false,
                hint: hint_for(rel, &lib_name),
            });
        }
    }

    let stats = LibraryStats {
        lib_name,
        exports_count: exported.len(),
        imports_count: imports.len(),
        violations_count: violations.len(),
        execution_time: start.elapsed().as_secs_f64(),
    };

    Ok((violations, stats))
}

/// Validates several libraries and rolls the statistics up.
///
/// # Errors
///
/// Returns an error when any library path cannot be resolved.
pub fn validate_libraries(
    lib_paths: &[PathBuf],
    opts: &ValidateOptions,
) -> Result<ValidationReport, ValidateError> {
    let mut report = ValidationReport::default();

    for lib_path in lib_paths {
        let (violations, stats) = validate_library(lib_path, opts)?;
        report.violations.extend(violations);
        report.total_exports += stats.exports_count;
        report.total_imports += stats.imports_count;
        report.total_violations += stats.violations_count;
        report.total_execution_time += stats.execution_time;
        report.libraries.push(stats);
    }

    Ok(report)
}

/// Remediation hint for a non-exported symbol path.
fn hint_for(rel: &str, lib_name: &str) -> Option<String> {
    let segments: Vec<&str> = rel.split('.').collect();
    match segments.len() {
        0 | 1 => None,
        2 => Some(format!(
            "add '{}' to public_submodules or export '{}' explicitly from {lib_name}/__init__.py",
            segments[0], segments[1],
        )),
        _ => Some(format!(
            "'{rel}' is deeply nested; consider restructuring {lib_name} so consumers don't reach into it"
        )),
    }
}

fn compile_excludes(patterns: &[String]) -> Vec<glob::Pattern> {
    patterns
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect()
}

/// A call site is excluded when any pattern matches its full path or its
/// path relative to the codebase root.
fn is_excluded(patterns: &[glob::Pattern], file: &Path, lib_root: &Path) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let full = file.to_string_lossy();
    let rel = lib_root
        .parent()
        .and_then(|root| file.strip_prefix(root).ok())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();

    patterns
        .iter()
        .any(|p| p.matches(&full) || (!rel.is_empty() && p.matches(&rel)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        let lib = dir.path().join("mylib");
        (dir, lib)
    }

    fn validate(lib: &Path) -> (Vec<Violation>, LibraryStats) {
        validate_library(lib, &ValidateOptions::default()).unwrap()
    }

    #[test]
    fn underscore_export_warns_once() {
        let (_dir, lib) = setup(&[
            (
                "mylib/__init__.py",
                "from .utils import public_func, _private_func\n",
            ),
            (
                "mylib/utils.py",
                "def public_func():\n    pass\n\ndef _private_func():\n    pass\n",
            ),
        ]);
        let (violations, _) = validate(&lib);

        let warnings: Vec<_> = violations.iter().filter(|v| v.is_warning).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].func_name, "_private_func");
        assert_eq!(warnings[0].line_num, 1);
        assert!(warnings[0].to_string().contains("starts with underscore"));
        assert_eq!(violations.iter().filter(|v| !v.is_warning).count(), 0);
    }

    #[test]
    fn external_import_of_private_symbol_is_flagged() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", "from .utils import public_func\n"),
            (
                "mylib/utils.py",
                "def public_func():\n    pass\n\ndef _private_func():\n    pass\n",
            ),
            ("app.py", "from mylib.utils import _private_func\n"),
        ]);
        let (violations, _) = validate(&lib);

        let errors: Vec<_> = violations.iter().filter(|v| !v.is_warning).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].func_name, "utils._private_func");
        assert_eq!(errors[0].line_num, 1);
        assert!(errors[0].file_path.ends_with("app.py"));
    }

    #[test]
    fn internal_import_is_never_flagged() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("mylib/utils.py", "def _private_func():\n    pass\n"),
            ("mylib/internal.py", "from mylib.utils import _private_func\n"),
        ]);
        let (violations, _) = validate(&lib);
        assert!(violations.is_empty());
    }

    #[test]
    fn exported_symbol_is_allowed() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", "from .utils import public_func\n"),
            ("mylib/utils.py", "def public_func():\n    pass\n"),
            ("app.py", "from mylib import public_func\n"),
        ]);
        let (violations, _) = validate(&lib);
        assert!(violations.is_empty());
    }

    #[test]
    fn public_submodule_allow_list() {
        let files: &[(&str, &str)] = &[
            ("mylib/__init__.py", ""),
            ("mylib/sub/__init__.py", "def foo():\n    pass\n"),
            ("app.py", "from mylib.sub import foo\n"),
        ];

        let (_dir, lib) = setup(files);
        let (violations, _) = validate(&lib);
        assert_eq!(violations.len(), 1);
        let hint = violations[0].hint.as_deref().unwrap();
        assert!(hint.contains("sub"));
        assert!(hint.contains("public_submodules"));

        let (_dir2, lib2) = setup(files);
        let opts = ValidateOptions {
            public_submodules: vec!["sub".to_string()],
            ..Default::default()
        };
        let (violations, _) = validate_library(&lib2, &opts).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn deeply_nested_import_gets_restructuring_hint() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("mylib/a/__init__.py", ""),
            ("mylib/a/b.py", "def f():\n    pass\n"),
            ("app.py", "from mylib.a.b import f\n"),
        ]);
        let (violations, _) = validate(&lib);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].func_name, "a.b.f");
        assert!(violations[0]
            .hint
            .as_deref()
            .unwrap()
            .contains("restructuring"));
    }

    #[test]
    fn exclude_pattern_suppresses_call_site() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("mylib/utils.py", "def helper():\n    pass\n"),
            ("tests/test_app.py", "from mylib.utils import helper\n"),
        ]);
        let opts = ValidateOptions {
            exclude: vec!["tests/*".to_string()],
            ..Default::default()
        };
        let (violations, _) = validate_library(&lib, &opts).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn missing_entry_point_flags_every_external_import() {
        let (_dir, lib) = setup(&[
            ("mylib/utils.py", "def helper():\n    pass\n"),
            ("app.py", "from mylib.utils import helper\n"),
        ]);
        let (violations, stats) = validate(&lib);
        assert_eq!(stats.exports_count, 0);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn unresolvable_path_is_an_error() {
        let result = validate_library(Path::new("/no/such/lib"), &ValidateOptions::default());
        assert!(matches!(result, Err(ValidateError::LibraryPath { .. })));
    }

    #[test]
    fn stats_roll_up_across_libraries() {
        let dir = tempfile::tempdir().unwrap();
        for lib in ["alpha", "beta"] {
            let root = dir.path().join(lib);
            std::fs::create_dir_all(root.join("inner")).unwrap();
            std::fs::write(root.join("__init__.py"), "").unwrap();
            std::fs::write(
                root.join("inner").join("mod.py"),
                "def hidden():\n    pass\n",
            )
            .unwrap();
            std::fs::write(
                dir.path().join(format!("use_{lib}.py")),
                format!("from {lib}.inner import hidden\n"),
            )
            .unwrap();
        }

        let paths = vec![dir.path().join("alpha"), dir.path().join("beta")];
        let report = validate_libraries(&paths, &ValidateOptions::default()).unwrap();

        assert_eq!(report.total_violations, 2);
        assert_eq!(report.libraries.len(), 2);
        assert!(report.libraries.iter().all(|s| s.violations_count == 1));
        assert!(report.has_errors());
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn violation_format_includes_hint() {
        let v = Violation {
            lib_name: "mylib".into(),
            func_name: "utils.helper".into(),
            file_path: PathBuf::from("app.py"),
            line_num: 3,
            is_warning: false,
            hint: Some("export it".into()),
        };
        assert!(v.format().contains("= help: export it"));
        let diag = ViolationDiagnostic::from(&v);
        assert!(diag.to_string().contains("utils.helper"));
    }

    #[test]
    fn violation_display_formats() {
        let error = Violation {
            lib_name: "mylib".into(),
            func_name: "utils.helper".into(),
            file_path: PathBuf::from("app.py"),
            line_num: 3,
            is_warning: false,
            hint: None,
        };
        insta::assert_snapshot!(
            error.to_string(),
            @"app.py:3: symbol 'utils.helper' is not exported from 'mylib'"
        );

        let warning = Violation {
            is_warning: true,
            func_name: "_secret".into(),
            line_num: 1,
            file_path: PathBuf::from("mylib/__init__.py"),
            ..error
        };
        insta::assert_snapshot!(
            warning.to_string(),
            @"mylib/__init__.py:1: warning: exported name '_secret' starts with underscore"
        );
    }
}
