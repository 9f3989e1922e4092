//! TypeScript/JavaScript parse-facts provider using tree-sitter

use std::path::Path;

use repomap_core::ScanError;
use tree_sitter::Node;

use crate::facts::{ControlFlow, FactsProvider, ImportKind, ImportSpec, ParseFacts};
use crate::parser_pool::{FileType, ParseRequest, ParserPool};

pub struct TypeScriptFacts {
    pool: ParserPool,
}

impl TypeScriptFacts {
    pub fn new(pool: ParserPool) -> Self {
        Self { pool }
    }
}

fn string_literal_value(node: Node, source: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let raw = node.utf8_text(source).ok()?;
    Some(raw.trim_matches('"').trim_matches('\'').trim_matches('`').to_string())
}

fn named_child_text(node: Node, field: &str, source: &[u8]) -> Option<String> {
    let name_node = node.child_by_field_name(field)?;
    name_node.utf8_text(source).ok().map(str::to_string)
}

/// Top-level means directly under the program node, possibly wrapped in an
/// export statement.
fn is_top_level(node: Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "program" => true,
        Some(parent) if parent.kind() == "export_statement" => parent
            .parent()
            .map_or(false, |grand| grand.kind() == "program"),
        _ => false,
    }
}

fn collect_variable_names(declaration: Node, source: &[u8], out: &mut Vec<String>) {
    let mut cursor = declaration.walk();
    for child in declaration.children(&mut cursor) {
        if child.kind() == "variable_declarator" {
            if let Some(name) = named_child_text(child, "name", source) {
                out.push(name);
            }
        }
    }
}

fn visit(node: Node, source: &[u8], facts: &mut ParseFacts) {
    match node.kind() {
        "function_declaration" | "generator_function_declaration" | "method_definition" => {
            if let Some(name) = named_child_text(node, "name", source) {
                facts.functions.push(name);
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(name) = named_child_text(node, "name", source) {
                facts.classes.push(name);
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            if is_top_level(node) {
                collect_variable_names(node, source, &mut facts.variables);
            }
        }
        "export_statement" => {
            facts.export_count += 1;
            // Re-export with a module specifier: `export { x } from "./y"`.
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if let Some(specifier) = string_literal_value(child, source) {
                    facts
                        .imports
                        .push(ImportSpec::new(specifier, ImportKind::Reexport));
                }
            }
        }
        "import_statement" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if let Some(specifier) = string_literal_value(child, source) {
                    facts
                        .imports
                        .push(ImportSpec::new(specifier, ImportKind::Static));
                }
            }
        }
        "call_expression" => {
            // `require("x")` and dynamic `import("x")` with a string-literal
            // first argument.
            if let Some(callee) = node.child_by_field_name("function") {
                let callee_text = callee.utf8_text(source).unwrap_or("");
                if callee.kind() == "import" || callee_text == "require" {
                    if let Some(args) = node.child_by_field_name("arguments") {
                        if let Some(first) = args.named_child(0) {
                            if let Some(specifier) = string_literal_value(first, source) {
                                facts
                                    .imports
                                    .push(ImportSpec::new(specifier, ImportKind::Dynamic));
                            }
                        }
                    }
                }
            }
        }
        "if_statement" => facts.control_flow.push(ControlFlow::Conditional),
        "for_statement" | "for_in_statement" | "while_statement" | "do_statement" => {
            facts.control_flow.push(ControlFlow::Loop)
        }
        "switch_case" => facts.control_flow.push(ControlFlow::SwitchCase),
        "ternary_expression" => facts.control_flow.push(ControlFlow::Ternary),
        "catch_clause" => facts.control_flow.push(ControlFlow::TryCatch),
        "binary_expression" => {
            if let Some(op) = node.child_by_field_name("operator") {
                // Only short-circuit logical operators count.
                if matches!(op.kind(), "&&" | "||") {
                    facts.control_flow.push(ControlFlow::LogicalOp);
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, facts);
    }
}

impl FactsProvider for TypeScriptFacts {
    fn facts(&self, path: &Path, content: &str) -> Result<ParseFacts, ScanError> {
        let file_type = FileType::from_path(path).unwrap_or(FileType::TypeScript);
        let parsed = self
            .pool
            .parse_blocking(ParseRequest {
                file_type,
                content: content.to_string(),
            })
            .map_err(|_| ScanError::Parse {
                path: path.to_path_buf(),
            })?;

        let mut facts = ParseFacts::default();
        visit(parsed.tree.root_node(), parsed.content.as_bytes(), &mut facts);
        Ok(facts)
    }
}
