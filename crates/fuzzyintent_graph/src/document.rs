//! Portable artifact documents.
//!
//! [`GraphDocument`] is a flat node/edge listing of an [`IntentGraph`];
//! [`ExamplesDocument`] wraps an [`ExamplesIndex`]. Both carry a format
//! version so stale artifacts are rejected on load.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use fuzzyintent_foundation::{Error, Result};
use fuzzyintent_grammar::{Conversion, Example, SlotTag};

use crate::examples::ExamplesIndex;
use crate::graph::{EdgeLabel, IntentGraph, NodeId};
use crate::minimize::{Signature, canonicalize};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// A node record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node id.
    pub id: u32,
    /// Intents accepted at this node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepts: Vec<String>,
}

/// An edge record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source node id.
    pub source: u32,
    /// Target node id.
    pub target: u32,
    /// Spoken word.
    pub word: String,
    /// Output substitution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Slot membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotTag>,
    /// Converter chains starting at this token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversions: Vec<Conversion>,
}

/// Serialized form of an [`IntentGraph`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Format version.
    pub version: u32,
    /// Start node id.
    pub start: u32,
    /// Nodes.
    pub nodes: Vec<NodeRecord>,
    /// Edges.
    pub edges: Vec<EdgeRecord>,
}

impl From<&IntentGraph> for GraphDocument {
    fn from(graph: &IntentGraph) -> Self {
        let mut nodes = Vec::with_capacity(graph.node_count());
        let mut edges = Vec::with_capacity(graph.edge_count());
        for (id, node) in graph.nodes() {
            nodes.push(NodeRecord {
                id: id.0,
                accepts: node.accepts.clone(),
            });
            edges.extend(node.edges.iter().map(|edge| EdgeRecord {
                source: id.0,
                target: edge.target.0,
                word: edge.label.word.clone(),
                value: edge.label.value.clone(),
                slot: edge.label.slot.clone(),
                conversions: edge.label.conversions.clone(),
            }));
        }
        Self {
            version: FORMAT_VERSION,
            start: graph.start().0,
            nodes,
            edges,
        }
    }
}

impl TryFrom<GraphDocument> for IntentGraph {
    type Error = Error;

    /// Validates a document and rebuilds the graph.
    ///
    /// Node ids must be unique, edges must reference known nodes, a node may
    /// not have two edges with the same label, and the graph must be acyclic.
    fn try_from(doc: GraphDocument) -> Result<Self> {
        check_version(doc.version)?;

        let mut position: BTreeMap<u32, usize> = BTreeMap::new();
        let mut nodes: Vec<Signature> = Vec::with_capacity(doc.nodes.len());
        for record in doc.nodes {
            if position.insert(record.id, nodes.len()).is_some() {
                return Err(Error::invalid_artifact(format!("duplicate node {}", record.id)));
            }
            let mut accepts = record.accepts;
            accepts.sort();
            accepts.dedup();
            nodes.push((accepts, Vec::new()));
        }

        let lookup = |id: u32| {
            position
                .get(&id)
                .copied()
                .ok_or_else(|| Error::invalid_artifact(format!("edge references unknown node {id}")))
        };
        for record in doc.edges {
            let source = lookup(record.source)?;
            let target = lookup(record.target)?;
            let label = EdgeLabel {
                word: record.word,
                value: record.value,
                slot: record.slot,
                conversions: record.conversions,
            };
            nodes[source].1.push((label, target));
        }

        for (index, (_, edges)) in nodes.iter_mut().enumerate() {
            edges.sort();
            let labels: HashSet<&EdgeLabel> = edges.iter().map(|(label, _)| label).collect();
            if labels.len() != edges.len() {
                return Err(Error::invalid_artifact(format!(
                    "node {} has two edges with the same label",
                    NodeId::from_index(index)
                )));
            }
        }

        let start = position
            .get(&doc.start)
            .copied()
            .ok_or_else(|| Error::invalid_artifact(format!("unknown start node {}", doc.start)))?;
        check_acyclic(&nodes)?;
        Ok(canonicalize(&nodes, start))
    }
}

/// Kahn's algorithm over the edge lists.
fn check_acyclic(nodes: &[Signature]) -> Result<()> {
    let mut indegree = vec![0usize; nodes.len()];
    for (_, edges) in nodes {
        for (_, target) in edges {
            indegree[*target] += 1;
        }
    }
    let mut ready: Vec<usize> = (0..nodes.len()).filter(|&i| indegree[i] == 0).collect();
    let mut visited = 0;
    while let Some(node) = ready.pop() {
        visited += 1;
        for (_, target) in &nodes[node].1 {
            indegree[*target] -= 1;
            if indegree[*target] == 0 {
                ready.push(*target);
            }
        }
    }
    if visited == nodes.len() {
        Ok(())
    } else {
        Err(Error::invalid_artifact("intent graph contains a cycle"))
    }
}

fn check_version(version: u32) -> Result<()> {
    if version == FORMAT_VERSION {
        Ok(())
    } else {
        Err(Error::invalid_artifact(format!(
            "unsupported format version {version} (expected {FORMAT_VERSION})"
        )))
    }
}

/// Serialized form of an [`ExamplesIndex`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamplesDocument {
    /// Format version.
    pub version: u32,
    /// Examples per intent, in index order.
    pub intents: IndexMap<String, Vec<Example>>,
}

impl From<ExamplesIndex> for ExamplesDocument {
    fn from(index: ExamplesIndex) -> Self {
        Self {
            version: FORMAT_VERSION,
            intents: index.into_map(),
        }
    }
}

impl TryFrom<ExamplesDocument> for ExamplesIndex {
    type Error = Error;

    fn try_from(doc: ExamplesDocument) -> Result<Self> {
        check_version(doc.version)?;
        Ok(Self::from_map(doc.intents))
    }
}
