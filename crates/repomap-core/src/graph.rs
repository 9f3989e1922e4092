//! Dependency graph container over petgraph::StableDiGraph, keyed by path

use crate::model::{GraphEdge, GraphNode};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// The file-level dependency graph.
///
/// Nodes are keyed by their absolute slash-normalized path. Insertion order
/// is preserved (no removals happen during a scan), so iteration order
/// equals discovery order.
pub struct DependencyGraph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    index_of: HashMap<String, NodeIndex>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            inner: StableDiGraph::new(),
            index_of: HashMap::new(),
        }
    }

    /// Add a node, enforcing the one-node-per-path invariant.
    /// Returns false if a node with the same id already exists.
    pub fn add_node(&mut self, node: GraphNode) -> bool {
        let id = node.id().to_string();
        if self.index_of.contains_key(&id) {
            return false;
        }
        let idx = self.inner.add_node(node);
        self.index_of.insert(id, idx);
        true
    }

    /// Add a directed edge between two existing file nodes.
    ///
    /// Rejects self-edges, duplicate (source, target) pairs, and edges whose
    /// endpoints are missing or are folder nodes. Returns true if the edge
    /// was inserted.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        let (src_idx, dst_idx) = match (self.index_of.get(source), self.index_of.get(target)) {
            (Some(&s), Some(&t)) => (s, t),
            _ => return false,
        };
        let endpoints_are_files = self.inner[src_idx].is_file() && self.inner[dst_idx].is_file();
        if !endpoints_are_files {
            return false;
        }
        let duplicate = self
            .inner
            .edges_directed(src_idx, Direction::Outgoing)
            .any(|e| e.target() == dst_idx);
        if duplicate {
            return false;
        }
        self.inner
            .add_edge(src_idx, dst_idx, GraphEdge::between(source, target));
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of.get(id).map(|&idx| &self.inner[idx])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        let idx = *self.index_of.get(id)?;
        self.inner.node_weight_mut(idx)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Number of resolved outgoing dependencies of a node.
    pub fn out_degree(&self, id: &str) -> usize {
        match self.index_of.get(id) {
            Some(&idx) => self
                .inner
                .edges_directed(idx, Direction::Outgoing)
                .count(),
            None => 0,
        }
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// File nodes only, in discovery order.
    pub fn file_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes().filter(|n| n.is_file())
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Consume the graph into flat node and edge lists for the payload.
    pub fn into_parts(self) -> (Vec<GraphNode>, Vec<GraphEdge>) {
        let nodes = self
            .inner
            .node_indices()
            .filter_map(|idx| self.inner.node_weight(idx).cloned())
            .collect();
        let edges = self
            .inner
            .edge_indices()
            .filter_map(|idx| self.inner.edge_weight(idx).cloned())
            .collect();
        (nodes, edges)
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
