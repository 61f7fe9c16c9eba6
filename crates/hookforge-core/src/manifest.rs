//! Version extraction from dependency manifests.
//!
//! Each manifest format has its own tolerant probe: a parse failure is
//! swallowed and simply yields no version updates. Probes never abort a
//! scan. Version strings are best-effort; constraint expressions pass
//! through verbatim and sentinels (`detected-via-*`) are used where no
//! version text exists.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Manifest formats the detector knows how to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `package.json` — npm dependency manifest.
    PackageJson,
    /// `pyproject.toml` — Python project metadata.
    PyprojectToml,
    /// `requirements.txt` — flat Python dependency list.
    RequirementsTxt,
    /// `go.mod` — Go module file.
    GoMod,
    /// `Cargo.toml` — Rust package manifest.
    CargoToml,
}

impl ManifestKind {
    /// Resolves a manifest kind from an exact basename.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        match name {
            "package.json" => Some(Self::PackageJson),
            "pyproject.toml" => Some(Self::PyprojectToml),
            "requirements.txt" => Some(Self::RequirementsTxt),
            "go.mod" => Some(Self::GoMod),
            "Cargo.toml" => Some(Self::CargoToml),
            _ => None,
        }
    }

    /// Probes a manifest file for technology version strings.
    ///
    /// Returns `(technology, version)` updates; an unreadable or malformed
    /// manifest yields an empty list.
    #[must_use]
    pub fn probe(self, path: &Path) -> Vec<(&'static str, String)> {
        let updates = match self {
            Self::PackageJson => probe_package_json(path),
            Self::PyprojectToml => probe_pyproject(path),
            Self::RequirementsTxt => {
                vec![("python", "detected-via-requirements".to_string())]
            }
            Self::GoMod => probe_go_mod(path),
            Self::CargoToml => probe_cargo_toml(path),
        };
        debug!("probed {}: {} version update(s)", path.display(), updates.len());
        updates
    }
}

fn probe_package_json(path: &Path) -> Vec<(&'static str, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(data) = serde_json::from_str::<serde_json::Value>(&content) else {
        return Vec::new();
    };

    let deps = &data["dependencies"];
    let dev_deps = &data["devDependencies"];
    let mut updates = Vec::new();

    if let Some(v) = deps["react"].as_str() {
        updates.push(("react", v.to_string()));
        updates.push(("javascript", "detected-via-package.json".to_string()));
    }
    if let Some(v) = deps["vue"].as_str() {
        updates.push(("vue", v.to_string()));
        updates.push(("javascript", "detected-via-package.json".to_string()));
    }
    if let Some(v) = deps["typescript"].as_str().or_else(|| dev_deps["typescript"].as_str()) {
        updates.push(("typescript", v.to_string()));
    }
    if let Some(v) = deps["svelte"].as_str().or_else(|| dev_deps["svelte"].as_str()) {
        updates.push(("svelte", v.to_string()));
    }

    updates
}

fn probe_pyproject(path: &Path) -> Vec<(&'static str, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    static REQUIRES_PYTHON: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r#"requires-python\s*=\s*"([^"]+)""#).expect("literal regex")
    });

    if let Some(captures) = REQUIRES_PYTHON.captures(&content) {
        return vec![("python", captures[1].to_string())];
    }
    if content.contains("tool.poetry") {
        return vec![("python", "detected-via-poetry".to_string())];
    }
    Vec::new()
}

fn probe_go_mod(path: &Path) -> Vec<(&'static str, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    static GO_VERSION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"go (\d+\.\d+(?:\.\d+)?)").expect("literal regex"));

    GO_VERSION
        .captures(&content)
        .map(|c| vec![("go", c[1].to_string())])
        .unwrap_or_default()
}

fn probe_cargo_toml(path: &Path) -> Vec<(&'static str, String)> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    // A full TOML parse proves this is a manifest, not just a stray file.
    if toml::from_str::<toml::Value>(&content)
        .ok()
        .is_some_and(|v| v.get("package").is_some())
    {
        return vec![("rust", "detected-via-cargo".to_string())];
    }
    Vec::new()
}
