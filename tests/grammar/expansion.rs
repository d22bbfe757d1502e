//! Expansion into examples

use std::collections::BTreeSet;

use fuzzyintent_foundation::ErrorKind;
use fuzzyintent_grammar::{CyclePolicy, Example, Expander, Expansion, Grammar, SlotRole, SlotStore};

fn texts(expansion: &Expansion, intent: &str) -> Vec<String> {
    expansion.examples(intent).map(|e: Example| e.text()).collect()
}

fn expand(source: &str) -> Expansion {
    Expansion::of(&Grammar::parse(source).unwrap(), &SlotStore::new()).unwrap()
}

// =============================================================================
// Semantics
// =============================================================================

#[test]
fn literal_grammar_has_one_example() {
    let expansion = expand("[GetTime]\nwhat time is it\n");
    assert_eq!(expansion.example_count("GetTime"), 1);
    assert_eq!(texts(&expansion, "GetTime"), vec!["what time is it"]);
}

#[test]
fn alternation_is_union_of_branches() {
    let both = expand("[A]\n(turn on the light | switch the lamp on)\n");
    let left = expand("[A]\nturn on the light\n");
    let right = expand("[A]\nswitch the lamp on\n");

    let union: BTreeSet<String> = texts(&left, "A").into_iter().chain(texts(&right, "A")).collect();
    let combined: BTreeSet<String> = texts(&both, "A").into_iter().collect();
    assert_eq!(combined, union);
}

#[test]
fn sequence_is_cartesian_in_authored_order() {
    let expansion = expand("[Lights]\nturn (on | off) [the] light\n");
    assert_eq!(
        texts(&expansion, "Lights"),
        vec!["turn on the light", "turn on light", "turn off the light", "turn off light"]
    );
}

#[test]
fn sentences_of_an_intent_are_alternatives() {
    let expansion = expand("[Greet]\nhello\nhi there\n");
    assert_eq!(texts(&expansion, "Greet"), vec!["hello", "hi there"]);
}

#[test]
fn local_and_remote_rules_expand() {
    let expansion = expand(
        "[Colors]\ncolor = (red | green)\n<color>\n\n[Paint]\npaint it <Colors.color>\n\n[Again]\n<Paint> again\n",
    );
    assert_eq!(texts(&expansion, "Paint"), vec!["paint it red", "paint it green"]);
    assert_eq!(texts(&expansion, "Again"), vec!["paint it red again", "paint it green again"]);
}

#[test]
fn substitutions_change_output_only() {
    let expansion = expand("[Count]\n(ten:10 | eleven:11) point: five:5\n");
    let examples: Vec<Example> = expansion.examples("Count").collect();
    assert_eq!(examples[0].text(), "ten point five");
    assert_eq!(examples[0].output_text(), "10 5");
}

#[test]
fn tagged_words_carry_roles() {
    let expansion = expand("[Lights]\nturn on the (living room lamp){name}\n");
    let example = expansion.examples("Lights").next().unwrap();
    let roles: Vec<Option<SlotRole>> = example.tokens.iter().map(|t| t.slot.as_ref().map(|s| s.role)).collect();
    assert_eq!(
        roles,
        vec![None, None, None, Some(SlotRole::Begin), Some(SlotRole::Inside), Some(SlotRole::End)]
    );
}

#[test]
fn shared_rules_are_compiled_once() {
    let expansion = expand("[A]\nx = (one | two | three)\n<x> <x> <x>\n");
    assert_eq!(expansion.example_count("A"), 27);
    assert!(expansion.arena().len() < 10);
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn self_reference_is_cyclic_not_a_hang() {
    let grammar = Grammar::parse("[A]\n<A>\n").unwrap();
    let err = Expansion::of(&grammar, &SlotStore::new()).unwrap_err();
    let ErrorKind::CyclicReference { chain } = err.kind else {
        panic!("expected cycle");
    };
    assert_eq!(chain.first(), chain.last());
}

#[test]
fn cycle_through_slot_values() {
    let grammar = Grammar::parse("[A]\nsay $word\n").unwrap();
    let mut slots = SlotStore::new();
    slots.insert("word", ["hello", "again $word"]).unwrap();
    let err = Expansion::of(&grammar, &slots).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicReference { .. }));
}

#[test]
fn skip_policy_keeps_other_intents() {
    let grammar = Grammar::parse("[Loop]\nagain <Loop>\n\n[Fine]\nall good\n").unwrap();
    let slots = SlotStore::new();
    let expansion = Expander::new(&grammar, &slots)
        .with_cycle_policy(CyclePolicy::SkipIntent)
        .expand()
        .unwrap();

    assert!(expansion.root("Loop").is_none());
    assert_eq!(texts(&expansion, "Fine"), vec!["all good"]);
    assert_eq!(expansion.skipped().len(), 1);
}
