//! Property tests for graph construction

use std::collections::BTreeSet;

use proptest::prelude::*;

use fuzzyintent_grammar::{Example, ExampleToken};
use fuzzyintent_graph::{ExamplesIndex, IntentGraph, IntentGraphBuilder};

fn arb_example() -> impl Strategy<Value = (String, Example)> {
    (
        prop::sample::select(vec!["A", "B", "C"]),
        prop::collection::vec(prop::sample::select(vec!["turn", "on", "off", "the", "light", "fan"]), 0..5),
    )
        .prop_map(|(intent, words)| {
            (
                intent.to_string(),
                Example::new(words.into_iter().map(ExampleToken::word).collect()),
            )
        })
}

fn build(examples: &[(String, Example)]) -> IntentGraph {
    let mut builder = IntentGraphBuilder::new();
    for (intent, example) in examples {
        builder.insert(intent, example);
    }
    builder.finish()
}

proptest! {
    #[test]
    fn insertion_order_does_not_matter(
        (examples, shuffled) in prop::collection::vec(arb_example(), 0..20)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        prop_assert_eq!(build(&examples), build(&shuffled));
    }

    #[test]
    fn duplicates_do_not_change_graph(examples in prop::collection::vec(arb_example(), 0..20)) {
        let mut doubled = examples.clone();
        doubled.extend(examples.iter().cloned());
        prop_assert_eq!(build(&examples), build(&doubled));
    }

    #[test]
    fn paths_are_exactly_the_inserted_examples(examples in prop::collection::vec(arb_example(), 0..20)) {
        let graph = build(&examples);
        let paths: BTreeSet<(String, Example)> =
            graph.paths().into_iter().map(|p| (p.intent, p.example)).collect();
        let inserted: BTreeSet<(String, Example)> = examples.iter().cloned().collect();
        prop_assert_eq!(paths, inserted);

        let index = ExamplesIndex::from_graph(&graph);
        prop_assert_eq!(index.len(), graph.paths().len());
    }
}
