//! Commit nodes and the graph envelope they arrive in.
//!
//! The graph is read-only input for one render pass. On the wire it is a map
//! from commit id to node record, plus the row and column counts the layout
//! needs to size the surface. Missing counts are derived from the highest
//! row and column in the tree:
//!
//! ```json
//! { "tree": { "abc": { "row": 0, "column": 0, "series": 0, "parents": ["def"],
//!                      "message": "Fix", "url": "/c/abc/" } },
//!   "max_row": 1, "next_column": 1 }
//! ```

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Commit identifier as supplied by the repository.
pub type CommitId = String;

/// One commit in the graph with its layout slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    pub id: CommitId,
    /// Vertical slot; row 0 is drawn first.
    pub row: u32,
    /// Horizontal slot.
    pub column: u32,
    /// Lane grouping used for connector color.
    pub series: u32,
    /// Parent ids in commit order; the first is the mainline parent.
    pub parents: Vec<CommitId>,
    pub message: String,
    pub url: String,
}

/// A commit DAG ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GraphWire", into = "GraphWire")]
pub struct CommitGraph {
    pub nodes: BTreeMap<CommitId, CommitNode>,
    pub max_row: u32,
    pub next_column: u32,
}

impl CommitGraph {
    /// Parse a graph from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the payload is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CommitNode> {
        self.nodes.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in routing order: by row, then by id for rows that share a slot.
    #[must_use]
    pub fn ordered(&self) -> Vec<&CommitNode> {
        let mut nodes: Vec<&CommitNode> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.row.cmp(&b.row).then_with(|| a.id.cmp(&b.id)));
        nodes
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
struct GraphWire {
    tree: BTreeMap<CommitId, NodeWire>,
    /// Row count; derived from the nodes when absent.
    #[serde(default)]
    max_row: Option<u32>,
    /// Column count; derived from the nodes when absent.
    #[serde(default)]
    next_column: Option<u32>,
}

#[derive(Clone, Serialize, Deserialize)]
struct NodeWire {
    row: u32,
    column: u32,
    #[serde(default)]
    series: u32,
    #[serde(default)]
    parents: Vec<CommitId>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    url: String,
}

impl From<GraphWire> for CommitGraph {
    fn from(wire: GraphWire) -> Self {
        let nodes = wire
            .tree
            .into_iter()
            .map(|(id, n)| {
                let node = CommitNode {
                    id: id.clone(),
                    row: n.row,
                    column: n.column,
                    series: n.series,
                    parents: n.parents,
                    message: n.message,
                    url: n.url,
                };
                (id, node)
            })
            .collect::<BTreeMap<_, _>>();
        let max_row = wire.max_row.unwrap_or_else(|| slot_count(nodes.values().map(|n| n.row)));
        let next_column = wire.next_column.unwrap_or_else(|| slot_count(nodes.values().map(|n| n.column)));
        Self { nodes, max_row, next_column }
    }
}

impl From<CommitGraph> for GraphWire {
    fn from(graph: CommitGraph) -> Self {
        let tree = graph
            .nodes
            .into_iter()
            .map(|(id, n)| {
                let wire = NodeWire {
                    row: n.row,
                    column: n.column,
                    series: n.series,
                    parents: n.parents,
                    message: n.message,
                    url: n.url,
                };
                (id, wire)
            })
            .collect();
        Self { tree, max_row: Some(graph.max_row), next_column: Some(graph.next_column) }
    }
}

/// One past the highest occupied slot, or 0 for an empty graph.
fn slot_count(slots: impl Iterator<Item = u32>) -> u32 {
    slots.max().map_or(0, |m| m.saturating_add(1))
}
