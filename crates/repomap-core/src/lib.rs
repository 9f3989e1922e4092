//! repomap-core — graph data model, dependency graph container, and stats

pub mod error;
pub mod graph;
pub mod model;
pub mod stats;


pub use error::ScanError;
pub use graph::DependencyGraph;
pub use model::{
    content_hash, ArchitectureRole, DesignPattern, FileAnalysis, GraphEdge, GraphNode, FOLDER_HASH,
};
pub use stats::{aggregate, aggregate_with_limit, Hotspot, RepositoryStats, HOTSPOT_LIMIT};
