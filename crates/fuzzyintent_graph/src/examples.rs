//! Examples index: intent name to its distinct examples.

use indexmap::{IndexMap, IndexSet};

use fuzzyintent_grammar::Example;

use crate::graph::IntentGraph;

/// Ordered, deduplicated examples per intent.
///
/// Intents keep the order they were first inserted in; each intent keeps its
/// examples in insertion order with duplicates dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExamplesIndex {
    intents: IndexMap<String, IndexSet<Example>>,
}

impl ExamplesIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an example. Returns false if the intent already had it.
    pub fn insert(&mut self, intent: &str, example: Example) -> bool {
        if let Some(examples) = self.intents.get_mut(intent) {
            return examples.insert(example);
        }
        self.intents
            .insert(intent.to_string(), IndexSet::from([example]));
        true
    }

    /// Builds an index from every path of a graph.
    ///
    /// Intents appear in the order their first path is found.
    #[must_use]
    pub fn from_graph(graph: &IntentGraph) -> Self {
        let mut index = Self::new();
        for path in graph.paths() {
            index.insert(&path.intent, path.example);
        }
        index
    }

    /// Intent names in order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.intents.keys().map(String::as_str)
    }

    /// Examples of one intent.
    pub fn examples(&self, intent: &str) -> impl Iterator<Item = &Example> {
        self.intents.get(intent).into_iter().flatten()
    }

    /// Every (intent, example) pair in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Example)> {
        self.intents
            .iter()
            .flat_map(|(name, examples)| examples.iter().map(move |e| (name.as_str(), e)))
    }

    /// Returns true if the intent has the example.
    #[must_use]
    pub fn contains(&self, intent: &str, example: &Example) -> bool {
        self.intents
            .get(intent)
            .is_some_and(|examples| examples.contains(example))
    }

    /// Number of intents.
    #[must_use]
    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    /// Total number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intents.values().map(IndexSet::len).sum()
    }

    /// Returns true if there are no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub(crate) fn into_map(self) -> IndexMap<String, Vec<Example>> {
        self.intents
            .into_iter()
            .map(|(name, examples)| (name, examples.into_iter().collect()))
            .collect()
    }

    pub(crate) fn from_map(map: IndexMap<String, Vec<Example>>) -> Self {
        let mut index = Self::new();
        for (name, examples) in map {
            let entry = index.intents.entry(name).or_default();
            entry.extend(examples);
        }
        index
    }
}

impl<'a> IntoIterator for &'a ExamplesIndex {
    type Item = (&'a str, &'a Example);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Example)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
