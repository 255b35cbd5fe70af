//! Graph Traversal Core Library
//!
//! This library builds named-vertex graphs from adjacency-list documents
//! and walks them depth-first or breadth-first, detecting cycles along the
//! way.

pub mod builder;
pub mod error;
pub mod graph;
pub mod loader;
pub mod queue;
pub mod traversal;

// Re-export commonly used types
pub use builder::AdjacencyList;
pub use error::GraphError;
pub use graph::{Graph, GraphKind, Node};
pub use loader::{load_graphs, LoadedGraph};
pub use traversal::{Traversal, TraversalKind};
