//! Scan orchestrator — the public entry point

use std::path::Path;

use repomap_core::{
    aggregate_with_limit, GraphEdge, GraphNode, RepositoryStats, ScanError, HOTSPOT_LIMIT,
};
use serde::{Deserialize, Serialize};

use crate::builder::GraphBuilder;

/// Tunables for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How many complexity hotspots the stats surface.
    pub hotspot_limit: usize,
    /// Directory names pruned in addition to the fixed exclusion set.
    pub extra_excluded_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            hotspot_limit: HOTSPOT_LIMIT,
            extra_excluded_dirs: Vec::new(),
        }
    }
}

/// The complete scan payload. Immutable once returned; clients only ever
/// see either this or a fatal error, never a partial graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub stats: RepositoryStats,
}

/// Scan `root` with default configuration.
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    scan_with_config(root, &ScanConfig::default())
}

/// Validate the root, build the graph, aggregate stats, and return the
/// combined payload.
pub fn scan_with_config(root: &Path, config: &ScanConfig) -> Result<ScanResult, ScanError> {
    let graph = GraphBuilder::new(root)
        .with_excluded(config.extra_excluded_dirs.clone())
        .build()?;
    let (nodes, edges) = graph.into_parts();
    let stats = aggregate_with_limit(&nodes, config.hotspot_limit);
    Ok(ScanResult {
        nodes,
        edges,
        stats,
    })
}
