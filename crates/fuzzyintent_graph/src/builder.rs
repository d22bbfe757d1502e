//! Trie construction for the intent graph.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use fuzzyintent_grammar::Example;

use crate::graph::{EdgeLabel, IntentGraph};
use crate::minimize::minimize;

/// A trie node. Children always have larger indices than their parent.
#[derive(Clone, Debug, Default)]
pub(crate) struct TrieNode {
    pub(crate) accepts: BTreeSet<String>,
    pub(crate) children: BTreeMap<EdgeLabel, usize>,
}

/// Accumulates examples into a trie and minimizes it into an [`IntentGraph`].
///
/// ```
/// use fuzzyintent_grammar::{Example, ExampleToken};
/// use fuzzyintent_graph::IntentGraphBuilder;
///
/// let mut builder = IntentGraphBuilder::new();
/// builder.insert("Greet", &Example::new(vec![ExampleToken::word("hello")]));
/// let graph = builder.finish();
/// assert_eq!(graph.node_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct IntentGraphBuilder {
    nodes: Vec<TrieNode>,
    examples: usize,
}

impl Default for IntentGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentGraphBuilder {
    /// Creates a builder holding only the start node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            examples: 0,
        }
    }

    /// Adds an example of `intent`.
    ///
    /// Returns false if the example was already present for that intent.
    pub fn insert(&mut self, intent: &str, example: &Example) -> bool {
        let mut at = 0;
        for token in &example.tokens {
            let label = EdgeLabel::from(token);
            at = match self.nodes[at].children.get(&label) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[at].children.insert(label, child);
                    child
                }
            };
        }
        let added = self.nodes[at].accepts.insert(intent.to_string());
        if added {
            self.examples += 1;
        }
        added
    }

    /// Number of distinct (intent, example) pairs inserted.
    #[must_use]
    pub const fn example_count(&self) -> usize {
        self.examples
    }

    /// Number of trie nodes so far.
    #[must_use]
    pub fn trie_size(&self) -> usize {
        self.nodes.len()
    }

    /// Minimizes the trie into a canonical graph.
    #[must_use]
    pub fn finish(self) -> IntentGraph {
        let trie_size = self.nodes.len();
        let graph = minimize(&self.nodes);
        debug!(
            examples = self.examples,
            trie_nodes = trie_size,
            graph_nodes = graph.node_count(),
            graph_edges = graph.edge_count(),
            "built intent graph"
        );
        graph
    }
}
