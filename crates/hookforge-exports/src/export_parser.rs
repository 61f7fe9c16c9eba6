//! Export-set extraction from a library's `__init__.py`.
//!
//! A symbol counts as exported when it is named in `__all__`, defined as a
//! function in the entry point, or brought in by an explicit import (the
//! alias wins when one is given). Wildcard imports name nothing and are
//! ignored. This is a syntactic approximation: later deletion or
//! reassignment of a name is not tracked.

use crate::python::{PyItem, PythonModule};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of a library's entry point.
#[must_use]
pub fn init_path(lib_root: &Path) -> PathBuf {
    lib_root.join("__init__.py")
}

/// Extracts the set of symbols a library's entry point exposes.
///
/// A missing or unparseable file yields the empty set — an unreadable
/// interface exports nothing.
#[must_use]
pub fn exported_symbols(init_path: &Path) -> BTreeSet<String> {
    let Ok(source) = std::fs::read_to_string(init_path) else {
        debug!("no entry point at {}", init_path.display());
        return BTreeSet::new();
    };
    let Some(module) = PythonModule::parse(&source) else {
        debug!("entry point {} failed to parse", init_path.display());
        return BTreeSet::new();
    };

    let mut exported = BTreeSet::new();
    for item in &module.items {
        match item {
            PyItem::Assignment {
                target,
                string_list: Some(names),
                ..
            } if target == "__all__" => {
                exported.extend(names.iter().cloned());
            }
            PyItem::FunctionDef { name, .. } => {
                exported.insert(name.clone());
            }
            PyItem::ImportFrom {
                names, wildcard, ..
            } => {
                if !wildcard {
                    for name in names {
                        exported.insert(name.bound_name().to_string());
                    }
                }
            }
            PyItem::Import { names, .. } => {
                for name in names {
                    exported.insert(name.bound_name().to_string());
                }
            }
            PyItem::Assignment { .. } => {}
        }
    }
    exported
}
