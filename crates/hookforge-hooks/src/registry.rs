//! Static hook registry.
//!
//! Declarative tables only: a baseline repository included in every config,
//! per-technology repositories keyed by detector technology names, and hook
//! descriptions for display. Adding support for a technology means adding a
//! table entry, not new control flow.

/// A single hook within a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookDef {
    /// Hook identifier as published by the repository.
    pub id: &'static str,
    /// Display-name override, if the default is unclear.
    pub name: Option<&'static str>,
    /// Extra arguments passed to the hook.
    pub args: &'static [&'static str],
}

impl HookDef {
    /// A hook with no overrides.
    #[must_use]
    pub const fn plain(id: &'static str) -> Self {
        Self {
            id,
            name: None,
            args: &[],
        }
    }
}

/// A hook repository entry: URL, pinned revision, and its hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookRepo {
    /// Repository URL.
    pub repo: &'static str,
    /// Pinned revision (tag).
    pub rev: &'static str,
    /// Hooks to enable from this repository.
    pub hooks: &'static [HookDef],
}

/// Baseline repository, included in every generated configuration.
pub const BASELINE: &[HookRepo] = &[HookRepo {
    repo: "https://github.com/pre-commit/pre-commit-hooks",
    rev: "v5.0.0",
    hooks: &[
        HookDef {
            id: "trailing-whitespace",
            name: None,
            args: &["--markdown-linebreak-ext=md"],
        },
        HookDef::plain("end-of-file-fixer"),
        HookDef::plain("check-yaml"),
        HookDef::plain("check-added-large-files"),
        HookDef::plain("check-merge-conflict"),
        HookDef::plain("detect-private-key"),
        HookDef::plain("check-case-conflict"),
        HookDef::plain("check-executables-have-shebangs"),
        HookDef::plain("check-toml"),
        HookDef::plain("check-vcs-permalinks"),
    ],
}];

/// Baseline hook ids that only apply when matching files exist, keyed by
/// the file-extension tokens that justify them.
pub const CONDITIONAL_BASELINE: &[(&str, &[&str])] = &[
    ("check-yaml", &[".yaml", ".yml"]),
    ("check-toml", &[".toml"]),
];

const PRETTIER_ESLINT: &[HookRepo] = &[
    HookRepo {
        repo: "https://github.com/pre-commit/mirrors-prettier",
        rev: "v4.0.0-alpha.8",
        hooks: &[HookDef {
            id: "prettier",
            name: Some("Format code with Prettier"),
            args: &[],
        }],
    },
    HookRepo {
        repo: "https://github.com/pre-commit/mirrors-eslint",
        rev: "v9.25.0",
        hooks: &[HookDef {
            id: "eslint",
            name: Some("Lint code with ESLint"),
            args: &["--fix"],
        }],
    },
];

/// Per-technology hook repositories, in assembly order.
pub const TECH_HOOKS: &[(&str, &[HookRepo])] = &[
    (
        "python",
        &[
            HookRepo {
                repo: "https://github.com/astral-sh/ruff-pre-commit",
                rev: "v0.11.6",
                hooks: &[
                    HookDef {
                        id: "ruff-format",
                        name: Some("Format Python code with Ruff"),
                        args: &[],
                    },
                    HookDef {
                        id: "ruff",
                        name: Some("Lint Python code with Ruff"),
                        args: &["--fix"],
                    },
                ],
            },
            HookRepo {
                repo: "https://github.com/RobertCraigie/pyright-python",
                rev: "v1.1.399",
                hooks: &[HookDef {
                    id: "pyright",
                    name: Some("Check Python types with Pyright"),
                    args: &[],
                }],
            },
            HookRepo {
                repo: "https://github.com/abravalheri/validate-pyproject",
                rev: "v0.24.1",
                hooks: &[HookDef {
                    id: "validate-pyproject",
                    name: Some("Validate pyproject.toml"),
                    args: &[],
                }],
            },
            HookRepo {
                repo: "https://github.com/gitleaks/gitleaks",
                rev: "v8.24.3",
                hooks: &[HookDef::plain("gitleaks")],
            },
        ],
    ),
    ("javascript", PRETTIER_ESLINT),
    ("typescript", PRETTIER_ESLINT),
    ("react", PRETTIER_ESLINT),
    ("vue", PRETTIER_ESLINT),
    ("svelte", PRETTIER_ESLINT),
    (
        "terraform",
        &[HookRepo {
            repo: "https://github.com/antonbabenko/pre-commit-terraform",
            rev: "v1.83.5",
            hooks: &[
                HookDef::plain("terraform_fmt"),
                HookDef::plain("terraform_tflint"),
                HookDef::plain("terraform_docs"),
            ],
        }],
    ),
    (
        "docker",
        &[HookRepo {
            repo: "https://github.com/hadolint/hadolint",
            rev: "v2.12.0",
            hooks: &[HookDef {
                id: "hadolint",
                name: Some("Lint Dockerfiles"),
                args: &[],
            }],
        }],
    ),
    (
        "shell",
        &[HookRepo {
            repo: "https://github.com/shellcheck-py/shellcheck-py",
            rev: "v0.10.0.1",
            hooks: &[HookDef::plain("shellcheck")],
        }],
    ),
    (
        "html",
        &[HookRepo {
            repo: "https://github.com/thibaudcolas/curlylint",
            rev: "v0.13.1",
            hooks: &[HookDef::plain("curlylint")],
        }],
    ),
    (
        "css",
        &[HookRepo {
            repo: "https://github.com/pre-commit/mirrors-csslint",
            rev: "v1.0.5",
            hooks: &[HookDef::plain("csslint")],
        }],
    ),
    (
        "yaml",
        &[HookRepo {
            repo: "https://github.com/adrienverge/yamllint",
            rev: "v1.37.0",
            hooks: &[HookDef::plain("yamllint")],
        }],
    ),
    (
        "markdown",
        &[HookRepo {
            repo: "https://github.com/igorshubovych/markdownlint-cli",
            rev: "v0.44.0",
            hooks: &[HookDef::plain("markdownlint")],
        }],
    ),
    (
        "go",
        &[
            HookRepo {
                repo: "https://github.com/golangci/golangci-lint",
                rev: "v1.55.2",
                hooks: &[HookDef::plain("golangci-lint")],
            },
            HookRepo {
                repo: "https://github.com/dnephin/pre-commit-golang",
                rev: "v0.5.1",
                hooks: &[
                    HookDef::plain("go-fmt"),
                    HookDef::plain("go-vet"),
                    HookDef::plain("go-imports"),
                ],
            },
        ],
    ),
    (
        "rust",
        &[HookRepo {
            repo: "https://github.com/doublify/pre-commit-rust",
            rev: "v1.0",
            hooks: &[
                HookDef::plain("fmt"),
                HookDef::plain("cargo-check"),
                HookDef::plain("clippy"),
            ],
        }],
    ),
];

/// Descriptions shown when listing hooks.
pub const HOOK_DESCRIPTIONS: &[(&str, &str)] = &[
    ("trailing-whitespace", "Remove trailing whitespace from files"),
    ("end-of-file-fixer", "Ensure files end with a newline"),
    ("check-yaml", "Check YAML files for syntax errors"),
    ("check-added-large-files", "Prevent committing large files"),
    ("check-merge-conflict", "Check for merge conflict strings"),
    ("detect-private-key", "Detect private keys in code"),
    ("check-case-conflict", "Check for files with names that differ only in case"),
    ("check-executables-have-shebangs", "Ensure executables have shebangs"),
    ("check-toml", "Check TOML files for syntax errors"),
    ("check-vcs-permalinks", "Check that VCS links are permalinks"),
    ("ruff-format", "Format Python code using Ruff"),
    ("ruff", "Lint Python code using Ruff"),
    ("pyright", "Type check Python code using Pyright"),
    ("validate-pyproject", "Validate pyproject.toml file"),
    ("prettier", "Format code (JS, TS, JSON, CSS, etc.) using Prettier"),
    ("eslint", "Lint JavaScript/TypeScript code using ESLint"),
    ("curlylint", "Lint HTML templates"),
    ("csslint", "Lint CSS files"),
    ("yamllint", "Lint YAML files"),
    ("markdownlint", "Lint Markdown files"),
    ("hadolint", "Lint Dockerfile files"),
    ("terraform_fmt", "Format Terraform files"),
    ("terraform_tflint", "Lint Terraform files using TFLint"),
    ("terraform_docs", "Generate Terraform documentation"),
    ("shellcheck", "Lint shell scripts"),
    ("golangci-lint", "Lint Go code using GolangCI"),
    ("go-fmt", "Format Go code"),
    ("go-vet", "Examine Go code for potential issues"),
    ("go-imports", "Format Go imports"),
    ("fmt", "Format Rust code"),
    ("cargo-check", "Check Rust code for errors"),
    ("clippy", "Lint Rust code using Clippy"),
    ("gitleaks", "Detect hardcoded secrets in code"),
];

/// Hook repositories for a technology; unknown names get no hooks.
#[must_use]
pub fn for_technology(name: &str) -> &'static [HookRepo] {
    TECH_HOOKS
        .iter()
        .find(|(tech, _)| *tech == name)
        .map_or(&[], |(_, repos)| repos)
}

/// Human-readable description of a hook id.
#[must_use]
pub fn hook_description(id: &str) -> Option<&'static str> {
    HOOK_DESCRIPTIONS
        .iter()
        .find(|(hook, _)| *hook == id)
        .map(|(_, desc)| *desc)
}

/// Hook ids available for a technology, in assembly order.
#[must_use]
pub fn hook_ids_for(name: &str) -> Vec<&'static str> {
    for_technology(name)
        .iter()
        .flat_map(|repo| repo.hooks.iter().map(|h| h.id))
        .collect()
}
