//! Locates external imports of a library across a codebase.
//!
//! Scans every Python file outside the library's own directory and records
//! each import of one of the library's symbols, keyed by submodule-qualified
//! path. Internal imports are never reported; the export boundary only
//! constrains external consumers.

use crate::python::{PyItem, PythonModule};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One call site of an imported symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOccurrence {
    /// Source file containing the import statement.
    pub file: PathBuf,
    /// Line number of the import statement (1-indexed).
    pub line: usize,
}

/// True when `module` is the library itself or a dotted descendant of it.
fn belongs_to(module: &str, lib_name: &str) -> bool {
    module == lib_name || module.starts_with(&format!("{lib_name}."))
}

/// Finds every import of `lib_root`'s library from outside its directory.
///
/// Keys are symbol paths:
/// - `from lib.sub import name` records `lib.sub.name`
/// - `from lib import name` records `lib.name`
/// - `import lib.a.b` records `lib.b` (last segment)
///
/// Wildcard imports are skipped (they respect whatever the exporting side
/// declares). Occurrences are appended per call site, not deduplicated.
/// Files that fail to parse are skipped silently.
#[must_use]
pub fn find_imports(lib_root: &Path) -> BTreeMap<String, Vec<ImportOccurrence>> {
    let lib_name = lib_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let codebase_root = lib_root.parent().unwrap_or(lib_root);

    let mut imports: BTreeMap<String, Vec<ImportOccurrence>> = BTreeMap::new();

    let mut builder = ignore::WalkBuilder::new(codebase_root);
    builder.hidden(false).git_ignore(true);

    for entry in builder.build() {
        let Ok(entry) = entry else { continue };
        let path = entry.path();

        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }
        // The library's own files are out of scope.
        if path.starts_with(lib_root) {
            continue;
        }

        let Ok(source) = std::fs::read_to_string(path) else {
            continue;
        };
        let Some(module) = PythonModule::parse(&source) else {
            debug!("skipping unparseable file {}", path.display());
            continue;
        };

        for item in &module.items {
            match item {
                PyItem::ImportFrom {
                    module: from_module,
                    names,
                    wildcard,
                    line,
                } if !wildcard && belongs_to(from_module, &lib_name) => {
                    for name in names {
                        let key = format!("{from_module}.{}", name.path);
                        imports.entry(key).or_default().push(ImportOccurrence {
                            file: path.to_path_buf(),
                            line: *line,
                        });
                    }
                }
                PyItem::Import { names, line } => {
                    for name in names {
                        if !belongs_to(&name.path, &lib_name) {
                            continue;
                        }
                        let last = name.path.rsplit('.').next().unwrap_or(&name.path);
                        let key = if name.path == lib_name {
                            lib_name.clone()
                        } else {
                            format!("{lib_name}.{last}")
                        };
                        imports.entry(key).or_default().push(ImportOccurrence {
                            file: path.to_path_buf(),
                            line: *line,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    imports
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
        let lib_root = dir.path().canonicalize().unwrap().join("mylib");
        (dir, lib_root)
    }

    #[test]
    fn records_submodule_qualified_keys() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("app.py", "from mylib.utils import helper\n"),
        ]);
        let imports = find_imports(&lib);
        let occurrences = &imports["mylib.utils.helper"];
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].line, 1);
    }

    #[test]
    fn records_direct_imports() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("app.py", "from mylib import public_func\n"),
        ]);
        let imports = find_imports(&lib);
        assert!(imports.contains_key("mylib.public_func"));
    }

    #[test]
    fn plain_import_keyed_by_last_segment() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("app.py", "import mylib.sub.helper\n"),
        ]);
        let imports = find_imports(&lib);
        assert!(imports.contains_key("mylib.helper"));
    }

    #[test]
    fn internal_imports_are_not_recorded() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("mylib/internal.py", "from mylib.utils import secret\n"),
        ]);
        assert!(find_imports(&lib).is_empty());
    }

    #[test]
    fn wildcard_imports_are_skipped() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("app.py", "from mylib.utils import *\n"),
        ]);
        assert!(find_imports(&lib).is_empty());
    }

    #[test]
    fn other_libraries_are_ignored() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("app.py", "from otherlib.utils import helper\nimport mylibx\n"),
        ]);
        assert!(find_imports(&lib).is_empty());
    }

    #[test]
    fn call_sites_accumulate_per_symbol() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("a.py", "from mylib.utils import helper\n"),
            ("b.py", "from mylib.utils import helper\n"),
        ]);
        let imports = find_imports(&lib);
        assert_eq!(imports["mylib.utils.helper"].len(), 2);
    }

    #[test]
    fn unparseable_files_are_skipped() {
        let (_dir, lib) = setup(&[
            ("mylib/__init__.py", ""),
            ("bad.py", "def broken(:\n"),
            ("good.py", "from mylib import ok\n"),
        ]);
        let imports = find_imports(&lib);
        assert_eq!(imports.len(), 1);
        assert!(imports.contains_key("mylib.ok"));
    }
}
