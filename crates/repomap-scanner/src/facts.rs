//! Parse-facts capability interface
//!
//! The analyzer consumes structural facts through this seam so the traversal
//! engine behind it can be swapped without touching analysis code.

use std::path::Path;

use repomap_core::ScanError;

/// Which resolution rules apply to an import specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import ... from "x"`
    Static,
    /// `export ... from "x"`
    Reexport,
    /// `require("x")` or dynamic `import("x")`
    Dynamic,
    /// Python dotted-module notation, including relative `from . import` forms.
    Module,
}

/// An unresolved import found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub specifier: String,
    pub kind: ImportKind,
}

impl ImportSpec {
    pub fn new(specifier: impl Into<String>, kind: ImportKind) -> Self {
        ImportSpec {
            specifier: specifier.into(),
            kind,
        }
    }
}

/// Control-flow-relevant syntax occurrences, streamed out for complexity
/// counting. Each occurrence contributes one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Conditional,
    Loop,
    SwitchCase,
    Ternary,
    TryCatch,
    LogicalOp,
}

/// Structural facts extracted from one file.
#[derive(Debug, Clone, Default)]
pub struct ParseFacts {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub variables: Vec<String>,
    pub export_count: usize,
    pub imports: Vec<ImportSpec>,
    pub control_flow: Vec<ControlFlow>,
}

/// Capability: given file content, yield declared function names, class
/// names, import specifiers, and a stream of control-flow occurrences.
pub trait FactsProvider: Send + Sync {
    fn facts(&self, path: &Path, content: &str) -> Result<ParseFacts, ScanError>;
}
