//! Building a [`Graph`] from a parsed adjacency list

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::graph::{Graph, GraphKind};

/// One graph description, as it appears in a source document
///
/// ```yaml
/// kind: undirected
/// root: animals
/// vertices:
///   animals: [mammals, birds]
///   mammals: [dogs]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjacencyList {
    /// Vertex name → names of its neighbors
    #[serde(deserialize_with = "nullable_vertices")]
    pub vertices: BTreeMap<String, Vec<String>>,
    pub kind: GraphKind,
    /// Suggested start node for traversal
    #[serde(deserialize_with = "scalar_root")]
    pub root: Option<String>,
}

/// A vertex name written as any scalar
///
/// `1`, `2.5` and `true` are names just like `"node1"`; their text is kept
/// as written by the parser's number formatting.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct ScalarName(String);

impl<'de> Deserialize<'de> for ScalarName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = ScalarName;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a vertex name (string, number or boolean)")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarName, E> {
                Ok(ScalarName(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarName, E> {
                Ok(ScalarName(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarName, E> {
                Ok(ScalarName(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarName, E> {
                Ok(ScalarName(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarName, E> {
                Ok(ScalarName(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarName, E> {
                Ok(ScalarName(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Accepts scalar names, and `leaf:` (null) as a vertex with no neighbors
fn nullable_vertices<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<ScalarName, Option<Vec<ScalarName>>>> =
        Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, neighbors)| {
            let neighbors = neighbors.unwrap_or_default();
            (name.0, neighbors.into_iter().map(|n| n.0).collect())
        })
        .collect())
}

fn scalar_root<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let root: Option<ScalarName> = Option::deserialize(deserializer)?;
    Ok(root.map(|name| name.0))
}

impl AdjacencyList {
    /// Create an empty adjacency list of the given kind
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Add a vertex record; chainable for building lists in code
    pub fn vertex<I, S>(mut self, name: &str, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertices
            .entry(name.to_string())
            .or_default()
            .extend(neighbors.into_iter().map(Into::into));
        self
    }

    /// Set the declared root
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = Some(root.to_string());
        self
    }

    /// The declared root, or `""` when the document has none
    ///
    /// An empty root means the caller has to supply a start node.
    pub fn root_or_empty(&self) -> &str {
        self.root.as_deref().unwrap_or_default()
    }
}

impl Graph {
    /// Materialize a graph from an adjacency list
    ///
    /// Neighbors that are never declared as vertices of their own still
    /// become vertices. For undirected lists every edge is also added in
    /// reverse. Building never fails.
    pub fn from_adjacency_list(list: &AdjacencyList) -> Graph {
        let mut graph = Graph::new(list.kind);

        for (name, neighbors) in &list.vertices {
            let vertex = graph.ensure_node(name);
            for neighbor in neighbors {
                let adjacent = graph.ensure_node(neighbor);
                graph.add_neighbor(vertex, adjacent);
            }
        }

        tracing::debug!(
            kind = %graph.kind(),
            size = graph.size(),
            edges = graph.edge_count(),
            "built graph from adjacency list"
        );
        graph
    }
}
