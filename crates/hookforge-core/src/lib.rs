//! # hookforge-core
//!
//! Repository technology detection: walk a file tree, match files against a
//! static technology catalog, and score each detected technology with a
//! confidence value.
//!
//! This crate provides:
//!
//! - [`RepoWalker`] for gitignore-aware file discovery
//! - [`catalog`] with the static technology pattern table
//! - [`TechDetector`] for running a scan and scoring confidence
//! - [`TechMatch`] for representing a detected technology
//!
//! ## Example
//!
//! ```ignore
//! use hookforge_core::TechDetector;
//!
//! let report = TechDetector::new("./my-repo").scan()?;
//! for (name, tech) in &report.technologies {
//!     println!("{name}: {} files, confidence {:.1}", tech.file_count, tech.confidence);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
mod detector;
mod manifest;
mod walker;

pub use detector::{DetectError, ScanReport, TechDetector, TechMatch};
pub use manifest::ManifestKind;
pub use walker::{IgnoreRules, RepoWalker, Walk, WalkError, DEFAULT_IGNORE_PATTERNS};
