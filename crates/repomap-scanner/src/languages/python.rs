//! Python parse-facts provider
//!
//! Declarations and imports come from the tree-sitter tree. The control-flow
//! stream comes from a fixed keyword line scan, which tolerates partially
//! parsable files.

use std::path::Path;

use repomap_core::ScanError;
use tree_sitter::Node;

use crate::facts::{ControlFlow, FactsProvider, ImportKind, ImportSpec, ParseFacts};
use crate::parser_pool::{FileType, ParseRequest, ParserPool};

/// Keywords that open a branch or loop construct. A line contributes one
/// complexity point when its trimmed text starts with one of these.
const BRANCH_KEYWORDS: &[(&str, ControlFlow)] = &[
    ("if", ControlFlow::Conditional),
    ("elif", ControlFlow::Conditional),
    ("for", ControlFlow::Loop),
    ("while", ControlFlow::Loop),
    ("except", ControlFlow::TryCatch),
    ("case", ControlFlow::SwitchCase),
];

pub struct PythonFacts {
    pool: ParserPool,
}

impl PythonFacts {
    pub fn new(pool: ParserPool) -> Self {
        Self { pool }
    }
}

fn name_of(node: Node, source: &[u8]) -> Option<String> {
    node.child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
        .map(str::to_string)
}

/// Strip a `decorated_definition` wrapper, if present.
fn unwrap_decorated(node: Node) -> Node {
    if node.kind() == "decorated_definition" {
        if let Some(inner) = node.child_by_field_name("definition") {
            return inner;
        }
    }
    node
}

fn collect_imports(node: Node, source: &[u8], imports: &mut Vec<ImportSpec>) {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                let module = match child.kind() {
                    "dotted_name" => child.utf8_text(source).ok(),
                    "aliased_import" => child
                        .child_by_field_name("name")
                        .and_then(|n| n.utf8_text(source).ok()),
                    _ => None,
                };
                if let Some(module) = module {
                    imports.push(ImportSpec::new(module, ImportKind::Module));
                }
            }
        }
        "import_from_statement" => {
            if let Some(module) = node.child_by_field_name("module_name") {
                if let Ok(text) = module.utf8_text(source) {
                    imports.push(ImportSpec::new(text, ImportKind::Module));
                }
            }
        }
        _ => {}
    }
}

fn visit(node: Node, source: &[u8], facts: &mut ParseFacts) {
    match node.kind() {
        "function_definition" => {
            if let Some(name) = name_of(node, source) {
                facts.functions.push(name);
            }
        }
        "class_definition" => {
            if let Some(name) = name_of(node, source) {
                facts.classes.push(name);
            }
        }
        "assignment" => {
            // Module-level `NAME = ...` assignments only.
            let at_module_level = node
                .parent()
                .filter(|p| p.kind() == "expression_statement")
                .and_then(|p| p.parent())
                .map_or(false, |grand| grand.kind() == "module");
            if at_module_level {
                if let Some(left) = node.child_by_field_name("left") {
                    if left.kind() == "identifier" {
                        if let Ok(name) = left.utf8_text(source) {
                            facts.variables.push(name.to_string());
                        }
                    }
                }
            }
        }
        _ => collect_imports(node, source, &mut facts.imports),
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, facts);
    }
}

/// Python has no formal export list; the export count is the number of
/// top-level functions plus classes.
fn count_top_level_declarations(root: Node) -> usize {
    let mut count = 0;
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let definition = unwrap_decorated(child);
        if matches!(definition.kind(), "function_definition" | "class_definition") {
            count += 1;
        }
    }
    count
}

/// One point per line whose trimmed text begins with a branch keyword.
pub(crate) fn scan_branch_lines(content: &str) -> Vec<ControlFlow> {
    let mut hits = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        for (keyword, kind) in BRANCH_KEYWORDS {
            if !trimmed.starts_with(keyword) {
                continue;
            }
            let after = trimmed[keyword.len()..].chars().next();
            if matches!(after, None | Some(' ') | Some(':') | Some('(')) {
                hits.push(*kind);
                break;
            }
        }
    }
    hits
}

impl FactsProvider for PythonFacts {
    fn facts(&self, path: &Path, content: &str) -> Result<ParseFacts, ScanError> {
        let parsed = self
            .pool
            .parse_blocking(ParseRequest {
                file_type: FileType::Python,
                content: content.to_string(),
            })
            .map_err(|_| ScanError::Parse {
                path: path.to_path_buf(),
            })?;

        let mut facts = ParseFacts::default();
        let root = parsed.tree.root_node();
        visit(root, parsed.content.as_bytes(), &mut facts);
        facts.export_count = count_top_level_declarations(root);
        facts.control_flow = scan_branch_lines(&parsed.content);
        Ok(facts)
    }
}
