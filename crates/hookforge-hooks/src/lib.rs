//! # hookforge-hooks
//!
//! Static pre-commit hook registry and configuration assembler.
//!
//! The registry is immutable configuration: a baseline repository that every
//! generated config carries, plus per-technology repositories keyed by the
//! detector's technology names. The [`Assembler`] turns a selection of
//! technology names into the final `.pre-commit-config.yaml` text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
pub mod registry;

pub use assembler::Assembler;
pub use registry::{HookDef, HookRepo};
