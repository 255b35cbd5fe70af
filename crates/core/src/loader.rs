//! Loading graphs from YAML or JSON adjacency-list files
//!
//! A YAML source may hold several documents separated by `---`; each one
//! becomes its own graph. A JSON source holds either one adjacency-list
//! object or an array of them.
//!
//! Documents are split by the YAML parser, not by searching for `---`
//! text. A leading `---` starts the first document rather than closing an
//! empty one, so document numbers in errors count only real documents. An
//! explicitly empty document (`---` directly followed by `---`) still
//! yields an empty graph.
//!
//! # Example
//! ```no_run
//! use graph_traversal_core::loader;
//!
//! # fn main() -> Result<(), graph_traversal_core::GraphError> {
//! for loaded in loader::load_graphs(std::path::Path::new("graphs.yaml"))? {
//!     println!("{} (root: {:?})", loaded.graph, loaded.root);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::builder::AdjacencyList;
use crate::error::{GraphError, Result};
use crate::graph::Graph;

/// Source encodings understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is treated as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// A graph built from one source document, together with its declared root
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: Graph,
    /// Empty when the document declares no root
    pub root: String,
}

impl LoadedGraph {
    /// The declared root, falling back to `fallback` when there is none
    ///
    /// Returns `None` when neither is set.
    pub fn start_node<'a>(&'a self, fallback: Option<&'a str>) -> Option<&'a str> {
        if !self.root.is_empty() {
            return Some(&self.root);
        }
        fallback.filter(|start| !start.is_empty())
    }
}

/// Parse every adjacency list in `text`
pub fn parse_documents(text: &str, format: Format) -> Result<Vec<AdjacencyList>> {
    match format {
        Format::Yaml => parse_yaml(text),
        Format::Json => parse_json(text),
    }
}

fn parse_yaml(text: &str) -> Result<Vec<AdjacencyList>> {
    let mut lists = Vec::new();
    for (document, deserializer) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = serde_yaml::Value::deserialize(deserializer)
            .map_err(|source| GraphError::Yaml { document, source })?;

        // An empty document is an empty graph, not an error
        let list = if value.is_null() {
            AdjacencyList::default()
        } else {
            serde_yaml::from_value(value).map_err(|source| GraphError::Yaml { document, source })?
        };
        tracing::trace!(document, vertices = list.vertices.len(), "parsed YAML document");
        lists.push(list);
    }
    Ok(lists)
}

fn parse_json(text: &str) -> Result<Vec<AdjacencyList>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let lists = match value {
        serde_json::Value::Array(documents) => documents
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<AdjacencyList>, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(lists)
}

/// Build one graph per adjacency list, keeping each list's root
pub fn build_graphs(lists: &[AdjacencyList]) -> Vec<LoadedGraph> {
    lists
        .iter()
        .map(|list| LoadedGraph {
            graph: Graph::from_adjacency_list(list),
            root: list.root_or_empty().to_string(),
        })
        .collect()
}

/// Read `path` and build a graph for every document it contains
pub fn load_graphs(path: &Path) -> Result<Vec<LoadedGraph>> {
    let text = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = Format::from_path(path);
    let lists = parse_documents(&text, format)?;

    tracing::info!(
        path = %path.display(),
        ?format,
        documents = lists.len(),
        "loaded adjacency lists"
    );
    Ok(build_graphs(&lists))
}
