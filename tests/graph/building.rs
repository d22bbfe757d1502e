//! Graph construction and minimization

use std::collections::BTreeSet;

use fuzzyintent_grammar::{Grammar, SlotStore};
use fuzzyintent_graph::{ExamplesIndex, IntentGraph, TrainingConfig, train};

fn trained(source: &str) -> (IntentGraph, ExamplesIndex) {
    let grammar = Grammar::parse(source).unwrap();
    let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
    (model.graph, model.examples)
}

#[test]
fn paths_equal_examples() {
    let (graph, examples) = trained("[Lights]\nturn (on | off) [the] light\n\n[GetTime]\nwhat time is it\n");

    let from_paths: BTreeSet<(String, String)> =
        graph.paths().into_iter().map(|p| (p.intent, p.example.text())).collect();
    let from_index: BTreeSet<(String, String)> =
        examples.iter().map(|(intent, e)| (intent.to_string(), e.text())).collect();
    assert_eq!(from_paths, from_index);
    assert_eq!(from_paths.len(), 5);
}

#[test]
fn shared_suffixes_are_stored_once() {
    let (graph, _) = trained("[A]\n(red | green | blue) light\n");
    // start, after color, after light
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 4);
}

#[test]
fn same_example_in_two_intents() {
    let (graph, examples) = trained("[A]\nhello\n\n[B]\nhello\n");
    let accepting: Vec<_> = graph.nodes().filter(|(_, n)| !n.accepts.is_empty()).collect();
    assert_eq!(accepting.len(), 1);
    assert_eq!(accepting[0].1.accepts, vec!["A", "B"]);
    assert_eq!(examples.len(), 2);
    assert_eq!(graph.intents(), vec!["A", "B"]);
}

#[test]
fn duplicate_examples_collapse() {
    let (graph, examples) = trained("[A]\n(hi | hi) there\nhi there\n");
    assert_eq!(examples.len(), 1);
    assert_eq!(graph.paths().len(), 1);
}

#[test]
fn index_from_graph_has_same_examples() {
    let (graph, examples) = trained("[A]\nturn (on | off)\n\n[B]\nstop [now]\n");
    let rebuilt = ExamplesIndex::from_graph(&graph);
    for (intent, example) in examples.iter() {
        assert!(rebuilt.contains(intent, example));
        assert!(graph.accepts(intent, example));
    }
    assert_eq!(rebuilt.len(), examples.len());
}
