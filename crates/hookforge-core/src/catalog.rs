//! Static technology pattern catalog.
//!
//! The single source of truth for detection: each entry maps a technology
//! name to filename regexes, content regexes, and manifest filenames. Adding
//! a technology means adding an entry here, not new control flow. Catalog
//! order is semantically significant: content-only matching is
//! first-match-wins, so entries are held in an ordered list.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Raw catalog entry, declarative only.
struct TechEntry {
    name: &'static str,
    file_patterns: &'static [&'static str],
    content_patterns: &'static [&'static str],
    manifest_files: &'static [&'static str],
}

/// A catalog entry with its patterns compiled.
pub struct TechPattern {
    /// Technology identifier (e.g. `"python"`, `"react"`).
    pub name: &'static str,
    /// Case-insensitive regexes matched against file basenames.
    pub file_patterns: Vec<Regex>,
    /// Multiline regexes matched against a capped content prefix.
    pub content_patterns: Vec<Regex>,
    /// Manifest filenames that trigger version extraction.
    pub manifest_files: &'static [&'static str],
}

const ENTRIES: &[TechEntry] = &[
    TechEntry {
        name: "python",
        file_patterns: &[
            r"\.py$",
            r"\.pyi$",
            r"\.pyx$",
            r"requirements\.txt$",
            r"setup\.py$",
            r"pyproject\.toml$",
        ],
        content_patterns: &[
            r"^import\s+[a-zA-Z_][a-zA-Z0-9_]*",
            r"^from\s+[a-zA-Z_][a-zA-Z0-9_.]+\s+import",
            r"def\s+[a-zA-Z_][a-zA-Z0-9_]*\s*\(",
            r"class\s+[a-zA-Z_][a-zA-Z0-9_]*\s*(?:\([^)]*\))?\s*:",
        ],
        manifest_files: &["requirements.txt", "setup.py", "pyproject.toml"],
    },
    TechEntry {
        name: "javascript",
        file_patterns: &[r"\.js$", r"\.jsx$", r"package\.json$", r"\.mjs$"],
        content_patterns: &[
            r"import\s+.*from",
            r"export\s+(default\s+)?(function|class|const)",
            r"require\(",
        ],
        manifest_files: &["package.json"],
    },
    TechEntry {
        name: "typescript",
        file_patterns: &[r"\.ts$", r"\.tsx$", r"tsconfig\.json$"],
        content_patterns: &[
            r"interface\s+\w+",
            r"type\s+\w+\s*=",
            r":\s*(string|number|boolean|any)\b",
        ],
        manifest_files: &["package.json"],
    },
    TechEntry {
        name: "react",
        file_patterns: &[r"\.jsx$", r"\.tsx$"],
        content_patterns: &[
            r"import\s+.*?React",
            r"React\.Component",
            r"<.*?>",
            r"useState|useEffect|useContext",
        ],
        manifest_files: &["package.json"],
    },
    TechEntry {
        name: "vue",
        file_patterns: &[r"\.vue$"],
        content_patterns: &[
            r"<template.*?>",
            r"<script.*?>",
            r"Vue\.component",
            r"createApp",
        ],
        manifest_files: &["package.json"],
    },
    TechEntry {
        name: "svelte",
        file_patterns: &[r"\.svelte$"],
        content_patterns: &[r"<script.*?>", r"<style.*?>", r"\$:", r"on:.*?="],
        manifest_files: &["package.json"],
    },
    TechEntry {
        name: "terraform",
        file_patterns: &[r"\.tf$", r"\.tfvars$"],
        content_patterns: &[
            r#"resource\s+".*?""#,
            r#"provider\s+".*?""#,
            r#"variable\s+".*?""#,
        ],
        manifest_files: &[],
    },
    TechEntry {
        name: "docker",
        file_patterns: &[r"Dockerfile", r"\.dockerfile$", r"docker-compose\.ya?ml$"],
        content_patterns: &[r"FROM\s+\w+", r"RUN\s+.*", r"CMD\s+.*", r"ENTRYPOINT\s+.*"],
        manifest_files: &[],
    },
    TechEntry {
        name: "shell",
        file_patterns: &[r"\.sh$", r"\.bash$", r"\.zsh$"],
        content_patterns: &[r"#!/bin/(ba)?sh", r"if\s+\[\[.*\]\]", r"while\s+.*;\s*do"],
        manifest_files: &[],
    },
    TechEntry {
        name: "html",
        file_patterns: &[r"\.html$", r"\.htm$", r"\.xhtml$"],
        content_patterns: &[
            r"<!DOCTYPE\s+html>",
            r"<html.*?>",
            r"<head.*?>",
            r"<body.*?>",
        ],
        manifest_files: &[],
    },
    TechEntry {
        name: "css",
        file_patterns: &[r"\.css$", r"\.scss$", r"\.sass$", r"\.less$"],
        content_patterns: &[r"@media", r"@import", r"\{[^}]*\}", r":\s*[^{};]+;"],
        manifest_files: &[],
    },
    TechEntry {
        name: "yaml",
        file_patterns: &[r"\.ya?ml$"],
        content_patterns: &[],
        manifest_files: &[],
    },
    TechEntry {
        name: "json",
        file_patterns: &[r"\.json$"],
        content_patterns: &[],
        manifest_files: &[],
    },
    TechEntry {
        name: "markdown",
        file_patterns: &[r"\.md$", r"\.markdown$"],
        content_patterns: &[],
        manifest_files: &[],
    },
    TechEntry {
        name: "go",
        file_patterns: &[r"\.go$", r"go\.mod$", r"go\.sum$"],
        content_patterns: &[
            r"package\s+\w+",
            r"import\s+\(",
            r"func\s+\w+\s*\(",
            r"type\s+\w+\s+struct\s*\{",
        ],
        manifest_files: &["go.mod"],
    },
    TechEntry {
        name: "rust",
        file_patterns: &[r"\.rs$", r"Cargo\.toml$", r"Cargo\.lock$"],
        content_patterns: &[
            r"fn\s+\w+\s*\(",
            r"struct\s+\w+",
            r"impl\s+\w+",
            r"mod\s+\w+",
            r"use\s+\w+",
        ],
        manifest_files: &["Cargo.toml"],
    },
];

/// Implication table: technology -> technologies whose presence implies it.
///
/// Order within each list matters: the first implying technology with a
/// nonzero count supplies the synthetic `implied-by-*` version marker.
pub const IMPLIED_TECHNOLOGIES: &[(&str, &[&str])] = &[
    ("javascript", &["typescript", "react", "vue", "svelte"]),
    ("html", &["react", "vue", "svelte"]),
    ("css", &["react", "vue", "svelte"]),
];

/// Manifests whose mere presence adds a confidence bonus for a technology.
pub const CANONICAL_MARKERS: &[(&str, &str)] =
    &[("python", "requirements.txt"), ("javascript", "package.json")];

/// How a pattern group is matched.
#[derive(Clone, Copy)]
enum Mode {
    /// Basename matching: case-insensitive.
    Filename,
    /// Content matching: multiline, `^`/`$` anchor per line.
    Content,
}

static CATALOG: Lazy<Vec<TechPattern>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|entry| TechPattern {
            name: entry.name,
            file_patterns: compile(entry.file_patterns, entry.name, Mode::Filename),
            content_patterns: compile(entry.content_patterns, entry.name, Mode::Content),
            manifest_files: entry.manifest_files,
        })
        .collect()
});

fn compile(patterns: &[&str], tech: &str, mode: Mode) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| {
            let mut builder = RegexBuilder::new(p);
            match mode {
                Mode::Filename => builder.case_insensitive(true),
                Mode::Content => builder.multi_line(true),
            };
            match builder.build() {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("invalid pattern {p:?} for {tech}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Returns the compiled catalog, in detection order.
#[must_use]
pub fn technologies() -> &'static [TechPattern] {
    &CATALOG
}
