//! Slot stores and slot expansion

use fuzzyintent_foundation::{Error, ErrorKind};
use fuzzyintent_grammar::{Expansion, GeneratedList, Grammar, SlotStore, StaticList};

#[test]
fn slot_values_are_tagged_with_slot_name() {
    let grammar = Grammar::parse("[SetBrightness]\nset $brightness\n").unwrap();
    let mut slots = SlotStore::new();
    slots.load(&StaticList::new("brightness", ["fifty", "seventy five"])).unwrap();

    let expansion = Expansion::of(&grammar, &slots).unwrap();
    let examples: Vec<_> = expansion.examples("SetBrightness").collect();
    assert_eq!(examples.len(), 2);
    let spans = examples[1].slot_spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "brightness");
    assert_eq!((spans[0].start, spans[0].end), (1, 3));
}

#[test]
fn explicit_tag_overrides_slot_name() {
    let grammar = Grammar::parse("[Read]\nread me ($audio-book-name){book}\n").unwrap();
    let mut slots = SlotStore::new();
    slots.insert("audio-book-name", ["the hobbit"]).unwrap();

    let expansion = Expansion::of(&grammar, &slots).unwrap();
    let example = expansion.examples("Read").next().unwrap();
    let names: Vec<String> = example.slot_spans().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["book"]);
}

#[test]
fn values_may_use_grammar_syntax() {
    let grammar = Grammar::parse("[Go]\ngo to $room\n").unwrap();
    let mut slots = SlotStore::new();
    slots.insert("room", ["[the] kitchen", "(office | study:office)"]).unwrap();

    let expansion = Expansion::of(&grammar, &slots).unwrap();
    let outputs: Vec<String> = expansion.examples("Go").map(|e| e.output_text()).collect();
    assert_eq!(outputs, vec!["go to the kitchen", "go to kitchen", "go to office", "go to office"]);
}

#[test]
fn generated_lists_load_at_insert_time() {
    let mut slots = SlotStore::new();
    slots
        .load(&GeneratedList::new("numbers", || Ok((1..=3).map(|n| format!("n{n}")).collect())))
        .unwrap();
    assert_eq!(slots.get("numbers").unwrap().len(), 3);
}

#[test]
fn failing_source_is_reported_for_its_slot() {
    let mut slots = SlotStore::new();
    let err = slots
        .load(&GeneratedList::new("broken", || Err(Error::io("disk on fire"))))
        .unwrap_err();
    match err.kind {
        ErrorKind::SlotSource { slot, message } => {
            assert_eq!(slot, "broken");
            assert!(message.contains("disk on fire"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_slot_is_unresolved() {
    let grammar = Grammar::parse("[Go]\ngo to $nowhere\n").unwrap();
    let err = Expansion::of(&grammar, &SlotStore::new()).unwrap_err();
    match err.kind {
        ErrorKind::UnresolvedReference { name, referenced_from } => {
            assert_eq!(name, "$nowhere");
            assert_eq!(referenced_from, "Go");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
