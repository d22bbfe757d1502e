//! Trie minimization and canonical numbering.
//!
//! Nodes are merged bottom-up when they accept the same intents and have the
//! same outgoing edges into already-merged nodes. The merged DAG is then
//! renumbered breadth-first from the start node, following edges in label
//! order, so equal example sets always produce identical graphs.

use std::collections::{HashMap, VecDeque};

use crate::builder::TrieNode;
use crate::graph::{Edge, EdgeLabel, GraphNode, IntentGraph, NodeId};

/// Merged node: sorted accepts and label-sorted edges into other classes.
pub(crate) type Signature = (Vec<String>, Vec<(EdgeLabel, usize)>);

pub(crate) fn minimize(trie: &[TrieNode]) -> IntentGraph {
    let mut class_of = vec![0usize; trie.len()];
    let mut classes: Vec<Signature> = Vec::new();
    let mut registry: HashMap<Signature, usize> = HashMap::new();

    // Children have larger indices, so reverse order visits them first.
    for (index, node) in trie.iter().enumerate().rev() {
        let signature: Signature = (
            node.accepts.iter().cloned().collect(),
            node.children
                .iter()
                .map(|(label, &child)| (label.clone(), class_of[child]))
                .collect(),
        );
        let class = *registry.entry(signature.clone()).or_insert_with(|| {
            classes.push(signature);
            classes.len() - 1
        });
        class_of[index] = class;
    }

    let Some(&root) = class_of.first() else {
        return IntentGraph::default();
    };
    canonicalize(&classes, root)
}

/// Renumbers a DAG breadth-first from `start`, dropping unreachable nodes.
///
/// `nodes[i]` holds the accepts and label-sorted edges of node `i`.
pub(crate) fn canonicalize(nodes: &[Signature], start: usize) -> IntentGraph {
    let mut renumbered: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    renumbered[start] = Some(0);
    let mut next_id = 1;

    while let Some(old) = queue.pop_front() {
        order.push(old);
        for (_, target) in &nodes[old].1 {
            if renumbered[*target].is_none() {
                renumbered[*target] = Some(next_id);
                next_id += 1;
                queue.push_back(*target);
            }
        }
    }

    let graph_nodes = order
        .iter()
        .map(|&old| {
            let (accepts, edges) = &nodes[old];
            GraphNode {
                accepts: accepts.clone(),
                edges: edges
                    .iter()
                    .map(|(label, target)| Edge {
                        label: label.clone(),
                        target: NodeId::from_index(renumbered[*target].unwrap_or_default()),
                    })
                    .collect(),
            }
        })
        .collect();

    IntentGraph { nodes: graph_nodes }
}
