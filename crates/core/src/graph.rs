//! Graph data structures for named-vertex adjacency graphs
//!
//! Uses `petgraph::StableGraph` for storage, with a name → index map on the
//! side so vertices can be addressed by name. Every neighbor referenced by
//! an edge is itself a vertex in the graph, and an undirected graph stores
//! each edge in both directions.
//!
//! The structure is only mutated by [`Graph::from_adjacency_list`]; after
//! that it is read-only, and traversals keep their own bookkeeping so a
//! `&Graph` can be walked from several threads at once.

use std::collections::BTreeMap;
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};

/// Whether edges are one-way or symmetric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Directed => f.write_str("directed"),
            GraphKind::Undirected => f.write_str("undirected"),
        }
    }
}

/// A vertex, identified by its unique name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A graph of named vertices
///
/// Neighbor sets never contain duplicates: adding an edge that already
/// exists is a no-op.
#[derive(Debug, Clone)]
pub struct Graph {
    /// The underlying stable graph (private to enforce encapsulation)
    inner: StableGraph<Node, ()>,
    /// Name → index; its length is the graph's size
    index: BTreeMap<String, NodeIndex>,
    kind: GraphKind,
}

impl Graph {
    /// Create a new empty graph of the given kind
    pub fn new(kind: GraphKind) -> Self {
        Self {
            inner: StableGraph::new(),
            index: BTreeMap::new(),
            kind,
        }
    }

    /// Get the kind fixed at construction
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Number of distinct vertices
    pub fn size(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.inner.node_count());
        self.index.len()
    }

    /// True if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of stored adjacency entries
    ///
    /// Undirected edges are stored once per direction, so `A - B` counts
    /// twice and a self loop counts once.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Check whether a vertex with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a vertex by name
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index_of(name).and_then(|idx| self.inner.node_weight(idx))
    }

    /// All vertex names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// Neighbor names of `name`, sorted; `None` if the vertex is unknown
    pub fn neighbors(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.index_of(name)?;
        Some(
            self.sorted_neighbors(idx)
                .into_iter()
                .filter_map(|n| self.inner.node_weight(n))
                .map(|n| n.name.as_str())
                .collect(),
        )
    }

    /// True if `to` is in the neighbor set of `from`
    pub fn has_neighbor(&self, from: &str, to: &str) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(a), Some(b)) => self.inner.contains_edge(a, b),
            _ => false,
        }
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> Option<&Node> {
        self.inner.node_weight(idx)
    }

    /// Outgoing neighbors of `idx`, ordered by name
    ///
    /// Ordering by name makes every traversal deterministic regardless of
    /// insertion order.
    pub(crate) fn sorted_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.inner.neighbors(idx).collect();
        neighbors.sort_by(|a, b| self.name_at(*a).cmp(self.name_at(*b)));
        neighbors
    }

    fn name_at(&self, idx: NodeIndex) -> &str {
        self.inner
            .node_weight(idx)
            .map(|n| n.name.as_str())
            .unwrap_or_default()
    }

    /// Return the index for `name`, creating the vertex on first reference
    pub(crate) fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.index_of(name) {
            return idx;
        }
        let idx = self.inner.add_node(Node {
            name: name.to_string(),
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Add `to` to the neighbor set of `from`, and the reverse for undirected graphs
    pub(crate) fn add_neighbor(&mut self, from: NodeIndex, to: NodeIndex) {
        self.inner.update_edge(from, to, ());
        if self.kind == GraphKind::Undirected {
            self.inner.update_edge(to, from, ());
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(GraphKind::default())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph [Size: {}, Type: {}]", self.size(), self.kind)?;
        for (name, &idx) in &self.index {
            write!(f, "[{name}] -> {{")?;
            for neighbor in self.sorted_neighbors(idx) {
                write!(f, "{} ", self.name_at(neighbor))?;
            }
            writeln!(f, "}}")?;
        }
        Ok(())
    }
}
