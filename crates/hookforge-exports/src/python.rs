//! Python source extraction using Tree-sitter.
//!
//! Parses a module and reduces it to the statement kinds the boundary
//! checks care about: function definitions, the two import forms, and
//! assignments (for the `__all__` export-list convention). Everything else
//! is ignored.

use tree_sitter::{Node, Parser};

/// A name brought in by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedName {
    /// Dotted path as written (`"os.path"`, `"helper"`).
    pub path: String,
    /// Alias from an `as` clause, if any.
    pub alias: Option<String>,
}

impl ImportedName {
    /// The name this import binds: the alias if given, otherwise the path.
    #[must_use]
    pub fn bound_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.path)
    }
}

/// A module-level item relevant to export/import analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyItem {
    /// `def name(...):`
    FunctionDef {
        /// Function name.
        name: String,
        /// Line number (1-indexed).
        line: usize,
    },
    /// `from module import a, b as c` (or `from module import *`)
    ImportFrom {
        /// Dotted module path; relative imports keep their leading dots.
        module: String,
        /// Imported names, empty for wildcard imports.
        names: Vec<ImportedName>,
        /// True for `from module import *`.
        wildcard: bool,
        /// Line number (1-indexed).
        line: usize,
    },
    /// `import a.b, c as d`
    Import {
        /// Imported module paths.
        names: Vec<ImportedName>,
        /// Line number (1-indexed).
        line: usize,
    },
    /// `target = [...]` — captured for the `__all__` convention.
    Assignment {
        /// Assignment target identifier.
        target: String,
        /// String elements when the value is a list literal of strings.
        string_list: Option<Vec<String>>,
        /// Line number (1-indexed).
        line: usize,
    },
}

/// A parsed Python module, reduced to the items above.
#[derive(Debug, Clone, Default)]
pub struct PythonModule {
    /// All matched items, in source order (nested scopes included).
    pub items: Vec<PyItem>,
}

impl PythonModule {
    /// Parses Python source.
    ///
    /// Returns `None` when the source does not parse cleanly — Tree-sitter
    /// is error-tolerant, so a tree containing error nodes counts as a
    /// parse failure here, matching the strictness of a real Python parser.
    #[must_use]
    pub fn parse(source: &str) -> Option<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .expect("failed to set python language");

        let src = source.as_bytes();
        let tree = parser.parse(src, None)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }

        let mut module = Self::default();
        collect(&root, src, &mut module.items);
        Some(module)
    }
}

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    std::str::from_utf8(&src[node.start_byte()..node.end_byte()]).unwrap_or("")
}

fn line(node: &Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Recursively classifies every node into a tagged item (or skips it).
fn collect(node: &Node<'_>, src: &[u8], items: &mut Vec<PyItem>) {
    match node.kind() {
        "function_definition" => {
            if let Some(name) = node.child_by_field_name("name") {
                items.push(PyItem::FunctionDef {
                    name: text(&name, src).to_owned(),
                    line: line(node),
                });
            }
        }
        "import_from_statement" => {
            let module = node
                .child_by_field_name("module_name")
                .map(|m| text(&m, src).to_owned())
                .unwrap_or_default();
            let wildcard = has_child_of_kind(node, "wildcard_import");
            items.push(PyItem::ImportFrom {
                module,
                names: imported_names(node, src),
                wildcard,
                line: line(node),
            });
        }
        "import_statement" => {
            items.push(PyItem::Import {
                names: imported_names(node, src),
                line: line(node),
            });
        }
        "assignment" => {
            if let Some(item) = extract_assignment(node, src) {
                items.push(item);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(&child, src, items);
    }
}

fn has_child_of_kind(node: &Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

/// Collects the `name` fields of an import statement: plain dotted names
/// and `aliased_import` nodes.
fn imported_names(node: &Node<'_>, src: &[u8]) -> Vec<ImportedName> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        match child.kind() {
            "dotted_name" => names.push(ImportedName {
                path: text(&child, src).to_owned(),
                alias: None,
            }),
            "aliased_import" => {
                let Some(name) = child.child_by_field_name("name") else {
                    continue;
                };
                names.push(ImportedName {
                    path: text(&name, src).to_owned(),
                    alias: child
                        .child_by_field_name("alias")
                        .map(|a| text(&a, src).to_owned()),
                });
            }
            _ => {}
        }
    }
    names
}

fn extract_assignment(node: &Node<'_>, src: &[u8]) -> Option<PyItem> {
    let left = node.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }

    let string_list = node.child_by_field_name("right").and_then(|right| {
        if right.kind() != "list" {
            return None;
        }
        let mut strings = Vec::new();
        let mut cursor = right.walk();
        for element in right.children(&mut cursor) {
            if element.kind() == "string" {
                let mut inner = element.walk();
                for part in element.children(&mut inner) {
                    if part.kind() == "string_content" {
                        strings.push(text(&part, src).to_owned());
                    }
                }
            }
        }
        Some(strings)
    });

    Some(PyItem::Assignment {
        target: text(&left, src).to_owned(),
        string_list,
        line: line(node),
    })
}
