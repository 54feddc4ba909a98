//! Dependency Graph
//!
//! In-memory representation of a build's runtime dependency graph as
//! supplied by an external discovery tool. Nodes are identified by their
//! display names; the only mutation this crate performs is writing node
//! attributes.

pub mod discover;
pub mod label;

pub use discover::{GraphDiscoverer, JsonGraphFile, StaticGraph};
pub use label::{label_to_path, normalize_label};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    id: String,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

impl GraphNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attrs: BTreeMap::new(),
        }
    }

    /// Display name as supplied by the graph source, quoting included.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }
}

/// Directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Directed dependency graph with per-node string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGraph", into = "RawGraph")]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, usize>,
    edges: Vec<GraphEdge>,
    attrs: BTreeMap<String, String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node if no node with this id exists yet. Returns its position.
    pub fn add_node(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            return pos;
        }
        let pos = self.nodes.len();
        self.index.insert(id.clone(), pos);
        self.nodes.push(GraphNode::new(id));
        pos
    }

    /// Add an edge, creating either endpoint if missing.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        let to = to.into();
        self.add_node(from.clone());
        self.add_node(to.clone());
        self.edges.push(GraphEdge { from, to });
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Mutable access to the nodes. Handing out a slice lets callers touch
    /// attributes without being able to add or drop nodes.
    pub fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Split into nodes and the remaining structure, for callers that need
    /// to move nodes across threads and put them back.
    pub(crate) fn take_nodes(&mut self) -> Vec<GraphNode> {
        std::mem::take(&mut self.nodes)
    }

    /// Reinstall nodes previously removed with [`Self::take_nodes`].
    pub(crate) fn restore_nodes(&mut self, nodes: Vec<GraphNode>) {
        debug_assert_eq!(nodes.len(), self.index.len());
        self.nodes = nodes;
    }
}

/// Serialized shape of a graph.
#[derive(Serialize, Deserialize)]
struct RawGraph {
    #[serde(default)]
    attrs: BTreeMap<String, String>,
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

impl From<RawGraph> for DependencyGraph {
    fn from(raw: RawGraph) -> Self {
        let mut graph = DependencyGraph {
            attrs: raw.attrs,
            ..Default::default()
        };
        for node in raw.nodes {
            let pos = graph.add_node(node.id);
            graph.nodes[pos].attrs.extend(node.attrs);
        }
        for edge in raw.edges {
            graph.add_edge(edge.from, edge.to);
        }
        graph
    }
}

impl From<DependencyGraph> for RawGraph {
    fn from(graph: DependencyGraph) -> Self {
        RawGraph {
            attrs: graph.attrs,
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}
