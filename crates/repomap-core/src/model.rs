//! Core data structures for the file-level dependency graph

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Placeholder hash carried by folder nodes, which have no content.
pub const FOLDER_HASH: &str = "folder";

/// Compute the content-addressed digest used for node hashes and
/// summarizer cache keys. Rendered as 16 hex digits.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Coarse, heuristically inferred structural position of a file.
///
/// Roles are mutually exclusive; the analyzer assigns exactly one per file.
/// `Unknown` only appears in the layer breakdown as the aggregator's
/// fallback key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ArchitectureRole {
    Verification,
    #[serde(rename = "Edge/API")]
    EdgeApi,
    Presentation,
    #[serde(rename = "Service/Logic")]
    ServiceLogic,
    Orchestration,
    Logic,
    Unknown,
}

impl ArchitectureRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitectureRole::Verification => "Verification",
            ArchitectureRole::EdgeApi => "Edge/API",
            ArchitectureRole::Presentation => "Presentation",
            ArchitectureRole::ServiceLogic => "Service/Logic",
            ArchitectureRole::Orchestration => "Orchestration",
            ArchitectureRole::Logic => "Logic",
            ArchitectureRole::Unknown => "Unknown",
        }
    }
}

impl Default for ArchitectureRole {
    fn default() -> Self {
        ArchitectureRole::Logic
    }
}

/// Heuristic design-pattern annotations. Non-exclusive; a file may carry
/// zero or many. False positives are acceptable by contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesignPattern {
    Proxy,
    EventEmitter,
    Configuration,
    #[serde(rename = "Abstract Base")]
    AbstractBase,
    #[serde(rename = "Singleton/Module")]
    SingletonModule,
    Provider,
}

impl DesignPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignPattern::Proxy => "Proxy",
            DesignPattern::EventEmitter => "EventEmitter",
            DesignPattern::Configuration => "Configuration",
            DesignPattern::AbstractBase => "Abstract Base",
            DesignPattern::SingletonModule => "Singleton/Module",
            DesignPattern::Provider => "Provider",
        }
    }
}

/// Per-file structural facts and derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub variables: Vec<String>,
    pub export_count: usize,
    pub loc: usize,
    pub complexity: u32,
    pub architecture_role: ArchitectureRole,
    pub design_patterns: Vec<DesignPattern>,
    pub dependency_count: usize,
}

impl FileAnalysis {
    /// The safe-default analysis used when a file cannot be read or parsed:
    /// naive line-count loc, complexity 0, empty fact lists, role Logic.
    pub fn degraded(content: &str) -> Self {
        FileAnalysis {
            functions: Vec::new(),
            classes: Vec::new(),
            variables: Vec::new(),
            export_count: 0,
            loc: if content.is_empty() { 0 } else { content.lines().count() },
            complexity: 0,
            architecture_role: ArchitectureRole::Logic,
            design_patterns: Vec::new(),
            dependency_count: 0,
        }
    }
}

/// A node in the dependency graph — a file or a folder.
///
/// A closed tagged union rather than a loosely typed record: folders can
/// never carry analysis data because the type has no place to put it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum GraphNode {
    File {
        /// Absolute, slash-normalized path; unique key.
        id: String,
        /// Basename for display.
        label: String,
        file_size: u64,
        hash: String,
        /// Containing folder node id, if the file is not at the scan root.
        /// A lookup convenience for the presentation layer, not ownership.
        #[serde(skip_serializing_if = "Option::is_none")]
        parent_id: Option<String>,
        data: FileAnalysis,
    },
    Folder {
        id: String,
        /// Path relative to the scan root.
        label: String,
        file_size: u64,
        hash: String,
    },
}

impl GraphNode {
    pub fn file(
        id: String,
        label: String,
        file_size: u64,
        hash: String,
        parent_id: Option<String>,
        data: FileAnalysis,
    ) -> Self {
        GraphNode::File {
            id,
            label,
            file_size,
            hash,
            parent_id,
            data,
        }
    }

    pub fn folder(id: String, label: String) -> Self {
        GraphNode::Folder {
            id,
            label,
            file_size: 0,
            hash: FOLDER_HASH.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            GraphNode::File { id, .. } | GraphNode::Folder { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GraphNode::File { label, .. } | GraphNode::Folder { label, .. } => label,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, GraphNode::File { .. })
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            GraphNode::File { parent_id, .. } => parent_id.as_deref(),
            GraphNode::Folder { .. } => None,
        }
    }

    pub fn analysis(&self) -> Option<&FileAnalysis> {
        match self {
            GraphNode::File { data, .. } => Some(data),
            GraphNode::Folder { .. } => None,
        }
    }

    pub fn analysis_mut(&mut self) -> Option<&mut FileAnalysis> {
        match self {
            GraphNode::File { data, .. } => Some(data),
            GraphNode::Folder { .. } => None,
        }
    }
}

/// A directed edge: source file imports resolved target file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn between(source: &str, target: &str) -> Self {
        GraphEdge {
            id: format!("e-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}
