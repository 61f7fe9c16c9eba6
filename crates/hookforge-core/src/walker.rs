//! Gitignore-aware file discovery.
//!
//! Walks a repository root and yields the files that survive the project's
//! own ignore rules. The version-control metadata directory is always
//! excluded; when the project contributes no patterns of its own, a baked-in
//! default set covering common dependency and build directories applies.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Ignore patterns applied when the project has no usable `.gitignore`.
///
/// Trailing-slash entries match whole path segments; the rest are shell
/// globs tested against the relative path and the bare filename.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".svn/",
    ".hg/",
    "__pycache__/",
    ".venv/",
    "venv/",
    "node_modules/",
    ".pytest_cache/",
    ".mypy_cache/",
    ".tox/",
    "target/",
    "build/",
    "dist/",
];

/// The version-control metadata directory, excluded regardless of user patterns.
const FORCED_IGNORE: &str = ".git/";

/// Errors that can occur while walking a repository.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root directory does not exist or is not a directory.
    #[error("root directory not found: {0}")]
    RootNotFound(PathBuf),
}

/// Compiled ignore rules: directory-segment patterns plus file globs.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    /// Directory names (trailing-slash patterns, slash stripped).
    dir_patterns: BTreeSet<String>,
    /// Glob patterns matched against relative paths and bare filenames.
    file_patterns: Vec<glob::Pattern>,
}

impl IgnoreRules {
    /// Builds ignore rules for a repository root.
    ///
    /// Reads `.gitignore` at the root if present (`#` comments and blank
    /// lines dropped). The `.git/` directory is always excluded. If the
    /// project contributes no patterns beyond that, the baked-in defaults
    /// are applied instead.
    #[must_use]
    pub fn for_root(root: &Path) -> Self {
        let mut raw: Vec<String> = vec![FORCED_IGNORE.to_string()];

        let gitignore = root.join(".gitignore");
        if let Ok(content) = std::fs::read_to_string(&gitignore) {
            for line in content.lines() {
                let line = line.trim();
                if !line.is_empty() && !line.starts_with('#') {
                    raw.push(line.to_string());
                }
            }
        }

        // Only the forced default present: fall back to the baked-in set.
        if raw.len() == 1 {
            raw.extend(DEFAULT_IGNORE_PATTERNS.iter().map(ToString::to_string));
        }

        Self::from_patterns(&raw)
    }

    /// Compiles a list of raw gitignore-style patterns.
    #[must_use]
    pub fn from_patterns(patterns: &[String]) -> Self {
        let mut rules = Self::default();
        for pattern in patterns {
            if let Some(dir) = pattern.strip_suffix('/') {
                rules.dir_patterns.insert(dir.to_string());
            } else {
                match glob::Pattern::new(pattern) {
                    Ok(p) => rules.file_patterns.push(p),
                    Err(e) => warn!("skipping invalid ignore pattern {pattern:?}: {e}"),
                }
            }
        }
        rules
    }

    /// Checks whether a path (relative to the root) is ignored.
    ///
    /// A path outside the root is treated as ignored.
    #[must_use]
    pub fn is_ignored(&self, rel_path: &Path) -> bool {
        if rel_path.is_absolute() {
            return true;
        }

        if rel_path.components().any(|c| {
            matches!(c, std::path::Component::Normal(s)
                if s.to_str().is_some_and(|s| self.dir_patterns.contains(s)))
        }) {
            return true;
        }

        let rel_str = rel_path.to_string_lossy();
        let name = rel_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.file_patterns
            .iter()
            .any(|p| p.matches(&rel_str) || p.matches(&name))
    }

    /// Checks whether a directory name prunes the whole subtree.
    fn prunes_dir(&self, name: &str) -> bool {
        self.dir_patterns.contains(name)
    }
}

/// Result of walking a repository.
#[derive(Debug, Default)]
pub struct Walk {
    /// Absolute paths of every surviving file, in traversal order.
    pub files: Vec<PathBuf>,
    /// Lowercased basenames and extensions (with leading dot) of surviving files.
    pub tokens: BTreeSet<String>,
}

/// Walks a repository root, honoring the project's ignore rules.
pub struct RepoWalker {
    root: PathBuf,
}

impl RepoWalker {
    /// Creates a walker for the given root directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks the tree and returns surviving files plus discovered tokens.
    ///
    /// Unreadable directories are skipped; only files are reported, never
    /// directory entries.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::RootNotFound`] if the root is not a directory.
    pub fn walk(&self) -> Result<Walk, WalkError> {
        if !self.root.is_dir() {
            return Err(WalkError::RootNotFound(self.root.clone()));
        }

        let rules = IgnoreRules::for_root(&self.root);
        let mut walk = Walk::default();

        let iter = walkdir::WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                !rules.prunes_dir(&name)
            });

        for entry in iter {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path());
            if rules.is_ignored(rel) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_lowercase();
            walk.tokens.insert(name);
            if let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) {
                walk.tokens.insert(format!(".{}", ext.to_lowercase()));
            }
            walk.files.push(entry.path().to_path_buf());
        }

        walk.files.sort();
        Ok(walk)
    }
}
