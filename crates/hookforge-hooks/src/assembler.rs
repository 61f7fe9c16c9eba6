//! Assembles the final pre-commit configuration document.
//!
//! Takes the selected technology names, pulls their hook repositories from
//! the registry, deduplicates repositories shared between technologies, and
//! renders the `repos:` document. Pinned revisions can be overridden by a
//! user-level `~/.hookforge/versions.json` file.

use crate::registry::{self, HookDef, HookRepo};

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const HEADER: &str = "# Generated by hookforge. Review before committing;\n# run `pre-commit autoupdate` to refresh pinned revisions.\n";

#[derive(Serialize)]
struct Document {
    repos: Vec<RepoOut>,
}

#[derive(Serialize)]
struct RepoOut {
    repo: String,
    rev: String,
    hooks: Vec<HookOut>,
}

#[derive(Serialize)]
struct HookOut {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
}

impl From<&HookDef> for HookOut {
    fn from(hook: &HookDef) -> Self {
        Self {
            id: hook.id.to_string(),
            name: hook.name.map(ToString::to_string),
            args: hook.args.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Renders a `.pre-commit-config.yaml` from selected technologies.
pub struct Assembler {
    /// Repository URL -> revision overrides.
    versions: HashMap<String, String>,
}

impl Assembler {
    /// Creates an assembler, loading revision overrides from the user's
    /// `~/.hookforge/versions.json` if present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            versions: load_versions(default_versions_path().as_deref()),
        }
    }

    /// Creates an assembler reading revision overrides from an explicit file.
    #[must_use]
    pub fn with_versions_file(path: &Path) -> Self {
        Self {
            versions: load_versions(Some(path)),
        }
    }

    /// Assembles the configuration document for the selected technologies.
    ///
    /// The baseline repository always comes first; conditional baseline
    /// hooks (syntax checks for YAML/TOML) are included only when the
    /// discovered tokens show matching files. Repositories shared between
    /// technologies appear once, with their hook lists merged.
    #[must_use]
    pub fn assemble(&self, selected: &[String], tokens: &BTreeSet<String>) -> String {
        let mut repos: Vec<RepoOut> = Vec::new();
        let mut by_url: HashMap<String, usize> = HashMap::new();

        for repo in registry::BASELINE {
            let hooks: Vec<HookOut> = repo
                .hooks
                .iter()
                .filter(|h| baseline_hook_applies(h.id, tokens))
                .map(HookOut::from)
                .collect();
            self.push_repo(&mut repos, &mut by_url, repo, hooks);
        }

        for (tech, tech_repos) in registry::TECH_HOOKS {
            if !selected.iter().any(|s| s == tech) {
                continue;
            }
            debug!("adding hooks for {tech}");
            for repo in *tech_repos {
                let hooks = repo.hooks.iter().map(HookOut::from).collect();
                self.push_repo(&mut repos, &mut by_url, repo, hooks);
            }
        }

        let document = Document { repos };
        let yaml = serde_yaml::to_string(&document).unwrap_or_else(|e| {
            warn!("failed to render configuration: {e}");
            String::new()
        });
        format!("{HEADER}{yaml}")
    }

    fn push_repo(
        &self,
        repos: &mut Vec<RepoOut>,
        by_url: &mut HashMap<String, usize>,
        repo: &HookRepo,
        hooks: Vec<HookOut>,
    ) {
        if let Some(&idx) = by_url.get(repo.repo) {
            // Same repository pulled in by several technologies: merge,
            // first occurrence of a hook id wins.
            let existing = &mut repos[idx];
            for hook in hooks {
                if !existing.hooks.iter().any(|h| h.id == hook.id) {
                    existing.hooks.push(hook);
                }
            }
            return;
        }

        let rev = self
            .versions
            .get(repo.repo)
            .cloned()
            .unwrap_or_else(|| repo.rev.to_string());
        by_url.insert(repo.repo.to_string(), repos.len());
        repos.push(RepoOut {
            repo: repo.repo.to_string(),
            rev,
            hooks,
        });
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// A baseline hook applies unless it is conditional on file tokens that
/// were not discovered.
fn baseline_hook_applies(id: &str, tokens: &BTreeSet<String>) -> bool {
    registry::CONDITIONAL_BASELINE
        .iter()
        .find(|(hook, _)| *hook == id)
        .map_or(true, |(_, required)| {
            required.iter().any(|t| tokens.contains(*t))
        })
}

fn default_versions_path() -> Option<PathBuf> {
    home::home_dir().map(|h| h.join(".hookforge").join("versions.json"))
}

/// Loads revision overrides; a missing or malformed file yields none.
fn load_versions(path: Option<&Path>) -> HashMap<String, String> {
    let Some(path) = path else {
        return HashMap::new();
    };
    let Ok(content) = std::fs::read_to_string(path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&content) {
        Ok(versions) => versions,
        Err(e) => {
            warn!("ignoring malformed versions file {}: {e}", path.display());
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> Assembler {
        // Isolated from any real ~/.hookforge/versions.json.
        Assembler {
            versions: HashMap::new(),
        }
    }

    fn tokens(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_selection_yields_baseline_only() {
        let yaml = assembler().assemble(&[], &BTreeSet::new());
        assert!(yaml.starts_with("# Generated by hookforge"));
        assert!(yaml.contains("pre-commit/pre-commit-hooks"));
        assert!(yaml.contains("trailing-whitespace"));
        assert!(!yaml.contains("ruff"));
    }

    #[test]
    fn conditional_baseline_hooks_follow_tokens() {
        let without = assembler().assemble(&[], &BTreeSet::new());
        assert!(!without.contains("check-yaml"));
        assert!(!without.contains("check-toml"));

        let with = assembler().assemble(&[], &tokens(&[".yml", ".toml"]));
        assert!(with.contains("check-yaml"));
        assert!(with.contains("check-toml"));
    }

    #[test]
    fn python_selection_pulls_python_hooks() {
        let yaml = assembler().assemble(&["python".to_string()], &tokens(&[".py"]));
        assert!(yaml.contains("astral-sh/ruff-pre-commit"));
        assert!(yaml.contains("id: pyright"));
        assert!(yaml.contains("id: gitleaks"));
    }

    #[test]
    fn shared_repositories_are_deduplicated() {
        let selected = vec![
            "javascript".to_string(),
            "typescript".to_string(),
            "react".to_string(),
        ];
        let yaml = assembler().assemble(&selected, &BTreeSet::new());
        assert_eq!(yaml.matches("mirrors-prettier").count(), 1);
        assert_eq!(yaml.matches("mirrors-eslint").count(), 1);
    }

    #[test]
    fn selection_order_does_not_matter() {
        let a = assembler().assemble(
            &["rust".to_string(), "python".to_string()],
            &BTreeSet::new(),
        );
        let b = assembler().assemble(
            &["python".to_string(), "rust".to_string()],
            &BTreeSet::new(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn versions_file_overrides_revisions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        std::fs::write(
            &path,
            r#"{"https://github.com/pre-commit/pre-commit-hooks": "v9.9.9"}"#,
        )
        .unwrap();

        let yaml = Assembler::with_versions_file(&path).assemble(&[], &BTreeSet::new());
        assert!(yaml.contains("v9.9.9"));
        assert!(!yaml.contains("v5.0.0"));
    }

    #[test]
    fn malformed_versions_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("versions.json");
        std::fs::write(&path, "{broken").unwrap();

        let yaml = Assembler::with_versions_file(&path).assemble(&[], &BTreeSet::new());
        assert!(yaml.contains("v5.0.0"));
    }

    #[test]
    fn document_parses_back_as_yaml() {
        let yaml = assembler().assemble(&["go".to_string()], &tokens(&[".go"]));
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let repos = parsed["repos"].as_sequence().unwrap();
        assert!(repos.len() >= 3);
        assert_eq!(
            repos[0]["repo"].as_str(),
            Some("https://github.com/pre-commit/pre-commit-hooks")
        );
    }
}
