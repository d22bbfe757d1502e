//! Training configuration and failures

use fuzzyintent_foundation::{ErrorKind, Limit, WordCasing};
use fuzzyintent_grammar::{CyclePolicy, Grammar, SlotStore};
use fuzzyintent_graph::{Strictness, TrainingConfig, train};

#[test]
fn casing_applies_to_grammar_and_slots() {
    let grammar = Grammar::parse("[Lights]\nTurn On $Room\n").unwrap();
    let mut slots = SlotStore::new();
    slots.insert("Room", ["Kitchen"]).unwrap();

    let config = TrainingConfig::new().with_casing(WordCasing::Lower);
    let model = train(&grammar, &slots, &config).unwrap();
    let texts: Vec<String> = model.examples.examples("Lights").map(|e| e.text()).collect();
    assert_eq!(texts, vec!["turn on kitchen"]);
}

#[test]
fn numbers_are_spelled_out_but_output_digits() {
    let grammar = Grammar::parse("[SetTimer]\nset a timer for 75 minutes\n").unwrap();
    let model = train(&grammar, &SlotStore::new(), &TrainingConfig::voice()).unwrap();
    let example = model.examples.examples("SetTimer").next().unwrap();
    assert_eq!(example.text(), "set a timer for seventy five minutes");
    assert_eq!(example.output_text(), "set a timer for 75 minutes");
}

#[test]
fn empty_intent_warns_by_default() {
    let grammar = Grammar::parse("[Empty]\n()\n\n[Full]\nhello\n").unwrap();
    let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
    // `()` yields the empty example, not zero examples
    assert_eq!(model.examples.intent_count(), 2);

    let mut slots = SlotStore::new();
    slots.insert("nothing", Vec::<String>::new()).unwrap();
    let grammar = Grammar::parse("[Empty]\n$nothing\n\n[Full]\nhello\n").unwrap();
    let model = train(&grammar, &slots, &TrainingConfig::default()).unwrap();
    assert_eq!(model.examples.intent_count(), 1);
    assert!(matches!(&model.warnings[0].kind, ErrorKind::EmptyIntent(name) if name == "Empty"));

    let err = train(&grammar, &slots, &TrainingConfig::strict()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyIntent(_)));
}

#[test]
fn max_examples_is_enforced() {
    let grammar = Grammar::parse("[A]\n(a | b | c) (d | e | f)\n").unwrap();
    let config = TrainingConfig::new().with_max_examples(5);
    let err = train(&grammar, &SlotStore::new(), &config).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::LimitExceeded(Limit::MaxExamples { limit: 5, .. })
    ));

    let config = TrainingConfig::new().with_max_examples(9);
    assert!(train(&grammar, &SlotStore::new(), &config).is_ok());
}

#[test]
fn skipped_cycles_become_warnings() {
    let grammar = Grammar::parse("[Loop]\n<Loop> more\n\n[Fine]\nok\n").unwrap();
    let config = TrainingConfig::new()
        .with_cycle_policy(CyclePolicy::SkipIntent)
        .with_empty_intents(Strictness::Warn);
    let model = train(&grammar, &SlotStore::new(), &config).unwrap();
    assert_eq!(model.graph.intents(), vec!["Fine"]);
    assert!(matches!(model.warnings[0].kind, ErrorKind::CyclicReference { .. }));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: TrainingConfig =
        serde_json::from_str(r#"{"casing": "lower", "max_examples": 100}"#).unwrap();
    assert_eq!(config.casing, WordCasing::Lower);
    assert_eq!(config.max_examples, Some(100));
    assert_eq!(config.cycle_policy, CyclePolicy::AbortAll);
}
