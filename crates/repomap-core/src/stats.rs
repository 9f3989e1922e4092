//! Repository-wide statistics derived from the finished node set

use crate::model::{ArchitectureRole, GraphNode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many complexity hotspots the stats surface.
pub const HOTSPOT_LIMIT: usize = 5;

/// A high-complexity file surfaced for attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub name: String,
    pub score: u32,
}

/// Read-only snapshot computed once per scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub total_loc: u64,
    pub total_files: usize,
    pub average_complexity: f64,
    pub top_complex_files: Vec<Hotspot>,
    /// Role label -> file count. BTreeMap keeps serialization deterministic.
    pub layer_breakdown: BTreeMap<String, u64>,
}

/// Reduce the node set into repository-wide metrics with the default
/// hotspot limit.
pub fn aggregate(nodes: &[GraphNode]) -> RepositoryStats {
    aggregate_with_limit(nodes, HOTSPOT_LIMIT)
}

/// Reduce the node set into repository-wide metrics.
///
/// Total over any node list including the empty one: an empty scan yields
/// zeroed totals and an average of 0, never a division fault. Folder nodes
/// are skipped entirely.
pub fn aggregate_with_limit(nodes: &[GraphNode], hotspot_limit: usize) -> RepositoryStats {
    let files: Vec<&GraphNode> = nodes.iter().filter(|n| n.is_file()).collect();

    let mut total_loc: u64 = 0;
    let mut complexity_sum: u64 = 0;
    let mut layer_breakdown: BTreeMap<String, u64> = BTreeMap::new();
    // (discovery index implicit in iteration order, complexity, label)
    let mut ranked: Vec<(u32, &str)> = Vec::with_capacity(files.len());

    for node in &files {
        let role = node
            .analysis()
            .map(|a| a.architecture_role)
            .unwrap_or(ArchitectureRole::Unknown);
        *layer_breakdown.entry(role.as_str().to_string()).or_insert(0) += 1;

        if let Some(analysis) = node.analysis() {
            total_loc += analysis.loc as u64;
            complexity_sum += analysis.complexity as u64;
            ranked.push((analysis.complexity, node.label()));
        }
    }

    let total_files = files.len();
    let average_complexity = if total_files == 0 {
        0.0
    } else {
        let mean = complexity_sum as f64 / total_files as f64;
        (mean * 100.0).round() / 100.0
    };

    // Stable sort: ties keep discovery order.
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    let top_complex_files = ranked
        .into_iter()
        .take(hotspot_limit)
        .map(|(score, name)| Hotspot {
            name: name.to_string(),
            score,
        })
        .collect();

    RepositoryStats {
        total_loc,
        total_files,
        average_complexity,
        top_complex_files,
        layer_breakdown,
    }
}
