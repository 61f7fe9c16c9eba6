//! Integration test: detection feeding config assembly end-to-end.

use hookforge_core::TechDetector;
use hookforge_hooks::Assembler;
use std::collections::HashMap;
use std::path::Path;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture dir should create");
    }
    std::fs::write(path, content).expect("fixture file should write");
}

fn assemble_for(root: &Path) -> String {
    let report = TechDetector::new(root).scan().expect("scan should succeed");
    let selected: Vec<String> = report.technologies.keys().cloned().collect();
    // Empty override map keeps the test hermetic from ~/.hookforge.
    let dir = tempfile::tempdir().expect("tempdir");
    let versions = dir.path().join("versions.json");
    std::fs::write(&versions, "{}").expect("versions file should write");
    Assembler::with_versions_file(&versions).assemble(&selected, &report.tokens)
}

#[test]
fn empty_repository_falls_back_to_baseline_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml = assemble_for(dir.path());

    assert!(yaml.contains("pre-commit/pre-commit-hooks"));
    assert!(yaml.contains("trailing-whitespace"));
    // No files discovered, so the conditional syntax checks drop out.
    assert!(!yaml.contains("check-yaml"));
    // And no technology hooks appear.
    assert!(!yaml.contains("ruff"));
    assert!(!yaml.contains("prettier"));
}

#[test]
fn python_repository_gets_python_hooks_and_yaml_checks() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "main.py", "import os\n");
    write(dir.path(), "ci.yaml", "jobs: []\n");

    let yaml = assemble_for(dir.path());

    assert!(yaml.contains("astral-sh/ruff-pre-commit"));
    assert!(yaml.contains("check-yaml"));
    assert!(yaml.contains("yamllint"));
    assert!(!yaml.contains("golangci-lint"));
}

#[test]
fn generated_document_round_trips_through_yaml() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "main.py", "import os\n");

    let yaml = assemble_for(dir.path());
    let parsed: serde_yaml::Value =
        serde_yaml::from_str(&yaml).expect("generated document should be valid YAML");

    let repos = parsed["repos"].as_sequence().expect("repos sequence");
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for repo in repos {
        let url = repo["repo"].as_str().expect("repo url");
        *seen.entry(url).or_default() += 1;
        assert!(repo["hooks"].as_sequence().is_some_and(|h| !h.is_empty()));
    }
    // Deduplication holds in the final document.
    assert!(seen.values().all(|&n| n == 1));
}
