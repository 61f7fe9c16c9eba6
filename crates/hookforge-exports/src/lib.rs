//! # hookforge-exports
//!
//! Export/import boundary validation for Python libraries.
//!
//! A library's public interface is whatever its `__init__.py` exposes;
//! outside code importing anything else is reaching into internals. This
//! crate provides:
//!
//! - [`PythonModule`] — Tree-sitter extraction of imports, definitions, and
//!   `__all__` assignments
//! - [`exported_symbols`] — the declared export set of an entry point
//! - [`find_imports`] — every external import of a library, by symbol path
//! - [`validate_library`] / [`validate_libraries`] — cross-reference the two
//!   into a violation list with per-library statistics

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod export_parser;
mod import_locator;
mod python;
mod validator;

pub use export_parser::{exported_symbols, init_path};
pub use import_locator::{find_imports, ImportOccurrence};
pub use python::{ImportedName, PyItem, PythonModule};
pub use validator::{
    validate_libraries, validate_library, LibraryStats, ValidateError, ValidateOptions,
    ValidationReport, Violation, ViolationDiagnostic,
};
