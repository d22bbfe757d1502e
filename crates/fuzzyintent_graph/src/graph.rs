//! The intent graph.
//!
//! An [`IntentGraph`] is an acyclic, deterministic word automaton. Every
//! labeled path from the start node to a node that accepts intent `I` spells
//! one example of `I`. Nodes are stored in a `Vec` and addressed by
//! [`NodeId`]; node 0 is always the start node.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use fuzzyintent_grammar::{Conversion, Example, ExampleToken, SlotTag};

/// Index of a node in an [`IntentGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The start node.
    pub const START: Self = Self(0);

    /// Returns the node index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Label on an edge: one example token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeLabel {
    /// Spoken word.
    pub word: String,
    /// Output substitution.
    pub value: Option<String>,
    /// Slot membership.
    pub slot: Option<SlotTag>,
    /// Converter chains starting at this token.
    pub conversions: Vec<Conversion>,
}

impl From<&ExampleToken> for EdgeLabel {
    fn from(token: &ExampleToken) -> Self {
        Self {
            word: token.word.clone(),
            value: token.value.clone(),
            slot: token.slot.clone(),
            conversions: token.conversions.clone(),
        }
    }
}

impl From<&EdgeLabel> for ExampleToken {
    fn from(label: &EdgeLabel) -> Self {
        Self {
            word: label.word.clone(),
            value: label.value.clone(),
            slot: label.slot.clone(),
            conversions: label.conversions.clone(),
        }
    }
}

/// An outgoing edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Token consumed along the edge.
    pub label: EdgeLabel,
    /// Destination node.
    pub target: NodeId,
}

/// A graph node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphNode {
    /// Intents whose examples end here, sorted.
    pub accepts: Vec<String>,
    /// Outgoing edges, sorted by label.
    pub edges: Vec<Edge>,
}

/// A start→accept path and the intent it realizes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GraphPath {
    /// Accepted intent.
    pub intent: String,
    /// Tokens along the path.
    pub example: Example,
}

/// Minimized, canonically numbered intent graph.
///
/// Two graphs built from the same set of examples compare equal regardless of
/// the order the examples were inserted in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentGraph {
    pub(crate) nodes: Vec<GraphNode>,
}

impl Default for IntentGraph {
    fn default() -> Self {
        Self {
            nodes: vec![GraphNode::default()],
        }
    }
}

impl IntentGraph {
    /// The start node.
    #[must_use]
    pub const fn start(&self) -> NodeId {
        NodeId::START
    }

    /// Returns a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Iterates over nodes with their ids.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    /// Returns true if no intent is accepted anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.accepts.is_empty())
    }

    /// Sorted names of every accepted intent.
    #[must_use]
    pub fn intents(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .nodes
            .iter()
            .flat_map(|n| n.accepts.iter().map(String::as_str))
            .collect();
        names.into_iter().collect()
    }

    /// Follows the edge with `label` out of `from`.
    #[must_use]
    pub fn step(&self, from: NodeId, label: &EdgeLabel) -> Option<NodeId> {
        let node = self.node(from)?;
        node.edges
            .binary_search_by(|edge| edge.label.cmp(label))
            .ok()
            .map(|i| node.edges[i].target)
    }

    /// Returns true if the path spelled by `example` ends at a node accepting
    /// `intent`.
    #[must_use]
    pub fn accepts(&self, intent: &str, example: &Example) -> bool {
        let mut at = self.start();
        for token in &example.tokens {
            match self.step(at, &EdgeLabel::from(token)) {
                Some(next) => at = next,
                None => return false,
            }
        }
        self.node(at)
            .is_some_and(|n| n.accepts.iter().any(|a| a == intent))
    }

    /// Enumerates every start→accept path, depth first in label order.
    ///
    /// A node accepting several intents yields one path per intent.
    #[must_use]
    pub fn paths(&self) -> Vec<GraphPath> {
        let mut paths = Vec::new();
        let mut labels: Vec<&EdgeLabel> = Vec::new();
        // (node, next edge index)
        let mut stack: Vec<(NodeId, usize)> = vec![(self.start(), 0)];
        self.collect_accepts(self.start(), &labels, &mut paths);

        while let Some((id, next)) = stack.last_mut() {
            let node = &self.nodes[id.index()];
            let Some(edge) = node.edges.get(*next) else {
                stack.pop();
                labels.pop();
                continue;
            };
            *next += 1;
            labels.push(&edge.label);
            self.collect_accepts(edge.target, &labels, &mut paths);
            stack.push((edge.target, 0));
        }
        paths
    }

    fn collect_accepts(&self, id: NodeId, labels: &[&EdgeLabel], out: &mut Vec<GraphPath>) {
        for intent in &self.nodes[id.index()].accepts {
            out.push(GraphPath {
                intent: intent.clone(),
                example: Example::new(labels.iter().map(|&l| ExampleToken::from(l)).collect()),
            });
        }
    }
}
