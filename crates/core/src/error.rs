//! Error types for graph loading and traversal
//!
//! Two tiers share one enum. `Io` and `Parse` are ordinary recoverable
//! failures of the loading step. `NodeNotFound` and `QueueOverflow` are
//! invariant violations: they mean the caller broke a precondition or the
//! graph's size accounting is wrong, and the traversal result must not be
//! trusted.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by this crate
#[derive(Error, Debug)]
pub enum GraphError {
    /// The source file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML document in the source was malformed
    #[error("document {document} is not a valid adjacency list: {source}")]
    Yaml {
        /// Zero-based position of the document in the stream
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    /// A JSON source was malformed
    #[error("invalid JSON adjacency list: {0}")]
    Json(#[from] serde_json::Error),

    /// Traversal was started from a name the graph does not know
    #[error("start node not found: {name}")]
    NodeNotFound { name: String },

    /// BFS tried to enqueue more nodes than the graph holds
    #[error("traversal queue overflowed its capacity of {capacity}")]
    QueueOverflow { capacity: usize },
}

impl GraphError {
    /// True for the invariant-violation tier (bad start node, size accounting bug)
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GraphError::NodeNotFound { .. } | GraphError::QueueOverflow { .. }
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
