//! Depth-first and breadth-first traversal with cycle detection
//!
//! Each call owns its bookkeeping (discovered set, visited set, cycle flag),
//! so the graph is never mutated and any number of traversals can run over
//! the same `&Graph`. The result of a call is a [`Traversal`] report; ask it
//! about cycles rather than the graph.
//!
//! Neighbors are always enumerated in name order, which makes visit order
//! fully deterministic.
//!
//! # Cycle rules (DFS only)
//! - Directed: reaching a node that is discovered but not yet visited is a
//!   back edge, hence a cycle. Reaching an already visited node is a
//!   forward or cross edge and is ignored.
//! - Undirected: reaching any discovered node is a cycle, except for the
//!   single edge leading back to the node we just came from.

use std::collections::HashSet;
use std::fmt;

use petgraph::stable_graph::NodeIndex;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, GraphKind, Node};
use crate::queue::BoundedQueue;

/// Which algorithm produced a [`Traversal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalKind {
    DepthFirst,
    BreadthFirst,
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalKind::DepthFirst => f.write_str("DFS"),
            TraversalKind::BreadthFirst => f.write_str("BFS"),
        }
    }
}

/// Outcome of a single traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    kind: TraversalKind,
    order: Vec<String>,
    has_cycles: bool,
}

impl Traversal {
    /// Get the algorithm that produced this report
    pub fn kind(&self) -> TraversalKind {
        self.kind
    }

    /// Names in the order they were visited
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Number of nodes visited
    pub fn visited_count(&self) -> usize {
        self.order.len()
    }

    /// Whether this traversal found a cycle
    ///
    /// Only depth-first traversal detects cycles; for breadth-first
    /// traversal this is always `false`.
    pub fn has_cycles(&self) -> bool {
        self.has_cycles
    }
}

/// Per-call bookkeeping
#[derive(Debug, Default)]
struct TraversalState {
    discovered: HashSet<NodeIndex>,
    visited: HashSet<NodeIndex>,
    has_cycles: bool,
    order: Vec<String>,
}

impl TraversalState {
    fn visit<F>(&mut self, graph: &Graph, idx: NodeIndex, visit: &mut F)
    where
        F: FnMut(&Node),
    {
        if let Some(node) = graph.node_at(idx) {
            tracing::trace!(node = %node.name, "visit");
            visit(node);
            self.order.push(node.name.clone());
        }
        self.visited.insert(idx);
    }

    fn finish(self, kind: TraversalKind) -> Traversal {
        Traversal {
            kind,
            order: self.order,
            has_cycles: self.has_cycles,
        }
    }
}

/// One level of the explicit DFS stack
struct Frame {
    node: NodeIndex,
    parent: Option<NodeIndex>,
    neighbors: Vec<NodeIndex>,
    next: usize,
}

impl Frame {
    fn new(graph: &Graph, node: NodeIndex, parent: Option<NodeIndex>) -> Self {
        Self {
            node,
            parent,
            neighbors: graph.sorted_neighbors(node),
            next: 0,
        }
    }
}

impl Graph {
    fn start_index(&self, start: &str) -> Result<NodeIndex> {
        self.index_of(start).ok_or_else(|| GraphError::NodeNotFound {
            name: start.to_string(),
        })
    }

    /// Depth-first traversal from `start`, visiting nodes in post-order
    ///
    /// A node is visited only after every node first discovered beneath it.
    /// Nodes unreachable from `start` are never visited.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `start` is not in the graph; nothing
    /// is visited in that case.
    pub fn dfs<F>(&self, start: &str, mut visit: F) -> Result<Traversal>
    where
        F: FnMut(&Node),
    {
        let start = self.start_index(start)?;
        tracing::debug!(size = self.size(), kind = %self.kind(), "starting DFS");

        let mut state = TraversalState::default();
        state.discovered.insert(start);
        let mut stack = vec![Frame::new(self, start, None)];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.neighbors.get(frame.next) else {
                // All neighbors handled, so the node is finished
                let node = frame.node;
                stack.pop();
                state.visit(self, node, &mut visit);
                continue;
            };
            frame.next += 1;

            if state.discovered.contains(&child) {
                match self.kind() {
                    GraphKind::Undirected => {
                        // Walking straight back along the edge we arrived on
                        if frame.parent != Some(child) {
                            state.has_cycles = true;
                        }
                    }
                    GraphKind::Directed => {
                        if !state.visited.contains(&child) {
                            state.has_cycles = true;
                        }
                    }
                }
                continue;
            }

            state.discovered.insert(child);
            let parent = frame.node;
            stack.push(Frame::new(self, child, Some(parent)));
        }

        tracing::debug!(
            visited = state.order.len(),
            has_cycles = state.has_cycles,
            "finished DFS"
        );
        Ok(state.finish(TraversalKind::DepthFirst))
    }

    /// Breadth-first traversal from `start`
    ///
    /// `start` is visited first, then every node at distance 1, then
    /// distance 2, and so on. Does not detect cycles.
    ///
    /// # Errors
    /// [`GraphError::NodeNotFound`] if `start` is not in the graph.
    /// [`GraphError::QueueOverflow`] if more nodes are queued than the
    /// graph holds, which would mean the graph's size is wrong.
    pub fn bfs<F>(&self, start: &str, mut visit: F) -> Result<Traversal>
    where
        F: FnMut(&Node),
    {
        let start = self.start_index(start)?;
        tracing::debug!(size = self.size(), kind = %self.kind(), "starting BFS");

        // Every node is queued at most once, so size is always enough
        let mut queue = BoundedQueue::with_capacity(self.size());
        let overflow = |capacity| GraphError::QueueOverflow { capacity };

        let mut state = TraversalState::default();
        state.discovered.insert(start);
        queue
            .enqueue(start)
            .map_err(|_| overflow(queue.capacity()))?;

        while let Some(node) = queue.dequeue() {
            for child in self.sorted_neighbors(node) {
                if !state.discovered.insert(child) {
                    continue;
                }
                if queue.enqueue(child).is_err() {
                    return Err(overflow(queue.capacity()));
                }
            }
            state.visit(self, node, &mut visit);
        }

        tracing::debug!(visited = state.order.len(), "finished BFS");
        Ok(state.finish(TraversalKind::BreadthFirst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AdjacencyList;

    fn build(kind: GraphKind, vertices: &[(&str, &[&str])]) -> Graph {
        let list = vertices
            .iter()
            .fold(AdjacencyList::new(kind), |list, (name, neighbors)| {
                list.vertex(name, neighbors.iter().copied())
            });
        Graph::from_adjacency_list(&list)
    }

    fn dfs_names(graph: &Graph, start: &str) -> Vec<String> {
        let mut names = Vec::new();
        graph
            .dfs(start, |node| names.push(node.name.clone()))
            .unwrap();
        names
    }

    fn bfs_names(graph: &Graph, start: &str) -> Vec<String> {
        let mut names = Vec::new();
        graph
            .bfs(start, |node| names.push(node.name.clone()))
            .unwrap();
        names
    }

    #[test]
    fn test_two_node_directed_graph() {
        let graph = build(GraphKind::Directed, &[("node1", &["node2"])]);

        let dfs = graph.dfs("node1", |_| {}).unwrap();
        assert_eq!(dfs.order(), ["node2", "node1"]);
        assert!(!dfs.has_cycles());

        let bfs = graph.bfs("node1", |_| {}).unwrap();
        assert_eq!(bfs.order(), ["node1", "node2"]);
        assert!(!bfs.has_cycles());
    }

    #[test]
    fn test_visitor_sees_same_order_as_report() {
        let graph = build(GraphKind::Directed, &[("a", &["b", "c"]), ("b", &["d"])]);

        let report = graph.dfs("a", |_| {}).unwrap();
        assert_eq!(dfs_names(&graph, "a"), report.order());
        assert_eq!(report.order(), ["d", "b", "c", "a"]);
        assert_eq!(report.kind(), TraversalKind::DepthFirst);
        assert_eq!(report.kind().to_string(), "DFS");

        let report = graph.bfs("a", |_| {}).unwrap();
        assert_eq!(bfs_names(&graph, "a"), report.order());
        assert_eq!(report.order(), ["a", "b", "c", "d"]);
        assert_eq!(report.kind(), TraversalKind::BreadthFirst);
    }

    #[test]
    fn test_directed_back_edge_is_cycle() {
        let graph = build(GraphKind::Directed, &[("A", &["B"]), ("B", &["A"])]);

        let report = graph.dfs("A", |_| {}).unwrap();
        assert!(report.has_cycles());
        assert_eq!(report.order(), ["B", "A"]);
    }

    #[test]
    fn test_directed_cross_edge_is_not_cycle() {
        // Diamond: d is reached twice, but never while still on the stack
        let graph = build(
            GraphKind::Directed,
            &[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"])],
        );

        let report = graph.dfs("a", |_| {}).unwrap();
        assert!(!report.has_cycles());
        assert_eq!(report.visited_count(), 4);
    }

    #[test]
    fn test_directed_self_loop_is_cycle() {
        let graph = build(GraphKind::Directed, &[("a", &["a"])]);
        assert!(graph.dfs("a", |_| {}).unwrap().has_cycles());
    }

    #[test]
    fn test_undirected_tree_has_no_cycles() {
        let graph = build(
            GraphKind::Undirected,
            &[("root", &["left", "right"]), ("left", &["leaf"])],
        );

        let report = graph.dfs("root", |_| {}).unwrap();
        assert!(!report.has_cycles());
        assert_eq!(report.order(), ["leaf", "left", "right", "root"]);

        // Starting from a leaf walks the same tree the other way round
        assert!(!graph.dfs("leaf", |_| {}).unwrap().has_cycles());
    }

    #[test]
    fn test_undirected_triangle_is_cycle() {
        let graph = build(GraphKind::Undirected, &[("a", &["b"]), ("b", &["c"]), ("c", &["a"])]);
        assert!(graph.dfs("a", |_| {}).unwrap().has_cycles());
    }

    #[test]
    fn test_undirected_self_loop_is_cycle() {
        let graph = build(GraphKind::Undirected, &[("a", &["a", "b"])]);
        assert!(graph.dfs("b", |_| {}).unwrap().has_cycles());
    }

    #[test]
    fn test_unreachable_nodes_are_ignored() {
        // The cycle lives in a separate component
        let graph = build(
            GraphKind::Directed,
            &[("a", &["b"]), ("x", &["y"]), ("y", &["x"])],
        );

        let report = graph.dfs("a", |_| {}).unwrap();
        assert_eq!(report.order(), ["b", "a"]);
        assert!(!report.has_cycles());
        assert_eq!(bfs_names(&graph, "a"), ["a", "b"]);
    }

    #[test]
    fn test_reports_are_independent() {
        let graph = build(GraphKind::Directed, &[("a", &["b"]), ("b", &["a"]), ("c", &["a"])]);

        let cyclic = graph.dfs("a", |_| {}).unwrap();
        let bfs = graph.bfs("c", |_| {}).unwrap();

        // A later traversal does not reset an earlier report
        assert!(cyclic.has_cycles());
        assert!(!bfs.has_cycles());
        assert_eq!(bfs.order(), ["c", "a", "b"]);
    }

    #[test]
    fn test_missing_start_node() {
        let graph = build(GraphKind::Directed, &[("a", &["b"])]);
        let mut called = false;

        let err = graph.dfs("ghost", |_| called = true).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { ref name } if name == "ghost"));
        assert!(err.is_invariant_violation());

        let err = graph.bfs("ghost", |_| called = true).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { .. }));
        assert!(!called);
    }

    #[test]
    fn test_empty_graph_has_no_start() {
        let graph = Graph::default();
        assert!(graph.dfs("", |_| {}).is_err());
        assert!(graph.bfs("", |_| {}).is_err());
    }

    #[test]
    fn test_deep_chain_does_not_overflow_stack() {
        let names: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let list = names
            .windows(2)
            .fold(AdjacencyList::new(GraphKind::Directed), |list, pair| {
                list.vertex(&pair[0], [pair[1].clone()])
            });
        let graph = Graph::from_adjacency_list(&list);

        let report = graph.dfs("n0", |_| {}).unwrap();
        assert_eq!(report.visited_count(), names.len());
        assert_eq!(report.order().first().map(String::as_str), Some("n49999"));
        assert_eq!(report.order().last().map(String::as_str), Some("n0"));
    }
}
