//! Technology detection and confidence scoring.
//!
//! The detector walks a repository, matches every surviving file against the
//! [`catalog`], applies cross-technology implication, and scores each
//! detected technology. A scan is stateless per call: reset, walk, match,
//! imply, score.

use crate::catalog::{self, CANONICAL_MARKERS, IMPLIED_TECHNOLOGIES};
use crate::manifest::ManifestKind;
use crate::walker::{RepoWalker, WalkError};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Default cap on total files inspected per scan.
const DEFAULT_MAX_FILES: usize = 5000;

/// Default cap on bytes read (and file size accepted) per file.
const DEFAULT_MAX_FILE_SIZE: u64 = 10_000;

/// Errors that can occur during detection.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The repository root could not be walked.
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// A detected technology with its evidence and confidence score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechMatch {
    /// Technology identifier (matches the catalog entry name).
    #[serde(skip)]
    pub name: String,
    /// Number of files that matched any pattern for this technology.
    #[serde(rename = "count")]
    pub file_count: usize,
    /// Version string from a manifest, or a sentinel such as
    /// `implied-by-react` / `detected-via-requirements`.
    pub version: Option<String>,
    /// Confidence in `[0.0, 1.0]`, monotonic in file count.
    pub confidence: f64,
}

/// Result of a repository scan.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Detected technologies, keyed by name. Zero-count technologies never appear.
    pub technologies: BTreeMap<String, TechMatch>,
    /// Number of files actually classified (after caps and skips).
    pub files_scanned: usize,
    /// Lowercased basenames and extensions discovered by the walk.
    #[serde(skip)]
    pub tokens: BTreeSet<String>,
}

/// Why a file was skipped rather than classified.
#[derive(Debug)]
enum SkipReason {
    /// File metadata could not be read.
    Unreadable,
    /// File exceeds the per-file size cap.
    TooLarge(u64),
}

/// Outcome of classifying a single file.
#[derive(Debug)]
enum FileOutcome {
    /// File was inspected (it may have matched zero technologies).
    Classified,
    /// File was skipped; the scan continues.
    Skipped(SkipReason),
}

/// Per-scan accumulation, discarded when the scan returns.
struct ScanState {
    counts: BTreeMap<&'static str, usize>,
    paths: BTreeMap<&'static str, BTreeSet<String>>,
    names: BTreeMap<&'static str, BTreeSet<String>>,
    versions: BTreeMap<&'static str, Option<String>>,
}

impl ScanState {
    fn new() -> Self {
        let mut state = Self {
            counts: BTreeMap::new(),
            paths: BTreeMap::new(),
            names: BTreeMap::new(),
            versions: BTreeMap::new(),
        };
        for tech in catalog::technologies() {
            state.counts.insert(tech.name, 0);
            state.paths.insert(tech.name, BTreeSet::new());
            state.names.insert(tech.name, BTreeSet::new());
            state.versions.insert(tech.name, None);
        }
        state
    }

    fn record(&mut self, tech: &'static str, rel_path: &str, basename: &str) {
        *self.counts.entry(tech).or_default() += 1;
        self.paths
            .entry(tech)
            .or_default()
            .insert(rel_path.to_string());
        self.names
            .entry(tech)
            .or_default()
            .insert(basename.to_lowercase());
    }

    fn count(&self, tech: &str) -> usize {
        self.counts.get(tech).copied().unwrap_or(0)
    }

    fn version(&self, tech: &str) -> Option<&String> {
        self.versions.get(tech).and_then(Option::as_ref)
    }

    fn apply_versions(&mut self, updates: Vec<(&'static str, String)>) {
        for (tech, version) in updates {
            self.versions.insert(tech, Some(version));
        }
    }
}

/// Scans a repository and scores the technologies in use.
///
/// Each call to [`TechDetector::scan`] recomputes from scratch; no state is
/// carried between runs.
pub struct TechDetector {
    root: PathBuf,
    max_files: usize,
    max_file_size: u64,
}

impl TechDetector {
    /// Creates a detector for the given repository root with default caps.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Overrides the cap on total files inspected.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Overrides the per-file size / read cap in bytes.
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Runs the scan: reset, walk, match, imply, score.
    ///
    /// A single file's unreadability or malformed content never aborts the
    /// scan; hitting the file cap stops early with the results accumulated
    /// so far.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root directory itself cannot be walked.
    pub fn scan(&self) -> Result<ScanReport, DetectError> {
        info!("scanning {}", self.root.display());

        let walk = RepoWalker::new(&self.root).walk()?;
        let mut state = ScanState::new();
        let mut files_scanned = 0usize;

        for path in &walk.files {
            if files_scanned >= self.max_files {
                info!("file cap ({}) reached, stopping early", self.max_files);
                break;
            }
            match self.classify_file(&mut state, path) {
                FileOutcome::Classified => files_scanned += 1,
                FileOutcome::Skipped(reason) => {
                    debug!("skipping {}: {reason:?}", path.display());
                }
            }
        }

        Self::imply(&mut state);

        let technologies = Self::score(&state);
        info!(
            "scan complete: {} technologies in {} file(s)",
            technologies.len(),
            files_scanned
        );

        Ok(ScanReport {
            technologies,
            files_scanned,
            tokens: walk.tokens,
        })
    }

    /// Classifies one file against the catalog.
    ///
    /// Filename matching is not first-match-wins (a manifest may evidence
    /// several technologies at once); content matching is, in catalog order.
    fn classify_file(&self, state: &mut ScanState, path: &Path) -> FileOutcome {
        let Ok(meta) = std::fs::metadata(path) else {
            return FileOutcome::Skipped(SkipReason::Unreadable);
        };
        if meta.len() > self.max_file_size {
            return FileOutcome::Skipped(SkipReason::TooLarge(meta.len()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rel = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        let mut matched = false;
        for tech in catalog::technologies() {
            if tech.file_patterns.iter().any(|p| p.is_match(&name)) {
                state.record(tech.name, &rel, &name);
                matched = true;
                Self::maybe_probe_manifest(state, tech.manifest_files, &name, path);
            }
        }
        if matched {
            return FileOutcome::Classified;
        }

        let content = self.read_prefix(path);
        for tech in catalog::technologies() {
            if tech.content_patterns.iter().any(|p| p.is_match(&content)) {
                state.record(tech.name, &rel, &name);
                Self::maybe_probe_manifest(state, tech.manifest_files, &name, path);
                break;
            }
        }
        FileOutcome::Classified
    }

    fn maybe_probe_manifest(
        state: &mut ScanState,
        manifest_files: &[&str],
        name: &str,
        path: &Path,
    ) {
        if manifest_files.contains(&name) {
            if let Some(kind) = ManifestKind::from_filename(name) {
                state.apply_versions(kind.probe(path));
            }
        }
    }

    /// Reads up to the per-file cap of a file, lossily decoded.
    ///
    /// Read failures yield an empty string, which matches nothing.
    fn read_prefix(&self, path: &Path) -> String {
        let Ok(file) = std::fs::File::open(path) else {
            return String::new();
        };
        let mut buf = Vec::new();
        if file
            .take(self.max_file_size)
            .read_to_end(&mut buf)
            .is_err()
        {
            return String::new();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Cross-technology implication: a zero-count technology implied by a
    /// detected one gets a minimum count of 1 and a synthetic version marker.
    fn imply(state: &mut ScanState) {
        for &(implied, implying) in IMPLIED_TECHNOLOGIES {
            if state.count(implied) > 0 {
                continue;
            }
            for &tech in implying {
                if state.count(tech) > 0 {
                    state.counts.insert(implied, 1);
                    if state.version(implied).is_none() {
                        state
                            .versions
                            .insert(implied, Some(format!("implied-by-{tech}")));
                    }
                    debug!("{implied} implied by {tech}");
                    break;
                }
            }
        }
    }

    /// Scores every technology with a nonzero count; the rest are omitted.
    fn score(state: &ScanState) -> BTreeMap<String, TechMatch> {
        let mut result = BTreeMap::new();
        for (&tech, &count) in &state.counts {
            if count == 0 {
                continue;
            }
            if let Some(paths) = state.paths.get(tech) {
                debug!("{tech}: matched {paths:?}");
            }
            let confidence = Self::confidence(state, tech, count);
            result.insert(
                tech.to_string(),
                TechMatch {
                    name: tech.to_string(),
                    file_count: count,
                    version: state.version(tech).cloned(),
                    confidence,
                },
            );
        }
        result
    }

    /// Confidence: count bracket, plus bonuses for version info and
    /// canonical manifest markers, capped at 1.0.
    fn confidence(state: &ScanState, tech: &str, count: usize) -> f64 {
        let mut confidence = match count {
            0 => return 0.0,
            1 => 0.3,
            2..=4 => 0.5,
            5..=9 => 0.7,
            _ => 0.9,
        };

        if state.version(tech).is_some() {
            confidence = (confidence + 0.1_f64).min(1.0);
        }

        for &(marker_tech, marker_file) in CANONICAL_MARKERS {
            if marker_tech == tech
                && state
                    .names
                    .get(tech)
                    .is_some_and(|names| names.contains(marker_file))
            {
                confidence = (confidence + 0.1_f64).min(1.0);
            }
        }

        confidence
    }
}
