//! Slot reconstruction

use fuzzyintent_grammar::SlotStore;
use fuzzyintent_recognizer::RecognizerConfig;

use crate::recognizer;

#[test]
fn slot_value_from_aligned_words() {
    let mut slots = SlotStore::new();
    slots.insert("brightness", ["fifty", "seventy five"]).unwrap();
    let recognizer = recognizer("[SetBrightness]\nset $brightness\n", &slots, RecognizerConfig::default());

    let recognition = recognizer.recognize("set fifty").into_recognition().unwrap();
    assert_eq!(recognition.intent, "SetBrightness");
    assert_eq!(recognition.slot_values().get("brightness"), Some(&"fifty"));
}

#[test]
fn multi_word_value_spans_query_tokens() {
    let mut slots = SlotStore::new();
    slots.insert("brightness", ["fifty", "seventy five"]).unwrap();
    let recognizer = recognizer("[SetBrightness]\nset $brightness\n", &slots, RecognizerConfig::default());

    let recognition = recognizer.recognize("set seventy five").into_recognition().unwrap();
    let slot = recognition.slot("brightness").unwrap();
    assert_eq!(slot.value, "seventy five");
    assert_eq!((slot.start, slot.end), (1, 3));
}

#[test]
fn optional_entity_may_be_absent() {
    let mut slots = SlotStore::new();
    slots.insert("audio-book-name", ["the hobbit", "dune"]).unwrap();
    slots.insert("assistant-zones", ["kitchen", "living room"]).unwrap();
    let recognizer = recognizer(
        "[ReadBook]\nread me ($audio-book-name){book} in [the] [($assistant-zones){zone}]\n",
        &slots,
        RecognizerConfig::default(),
    );

    let with_zone = recognizer.recognize("read me dune in the kitchen").into_recognition().unwrap();
    let values = with_zone.slot_values();
    assert_eq!(values.get("book"), Some(&"dune"));
    assert_eq!(values.get("zone"), Some(&"kitchen"));

    let without_zone = recognizer.recognize("read me the hobbit in").into_recognition().unwrap();
    let values = without_zone.slot_values();
    assert_eq!(values.get("book"), Some(&"the hobbit"));
    assert_eq!(values.get("zone"), None);
}

#[test]
fn canonical_value_uses_substitution() {
    let recognizer = recognizer(
        "[Lights]\nturn (on | off:disable){state} the light\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    );
    let recognition = recognizer.recognize("turn off the light").into_recognition().unwrap();
    let slot = recognition.slot("state").unwrap();
    assert_eq!(slot.value, "off");
    assert_eq!(slot.canonical_value, "disable");
    assert_eq!(recognition.text, "turn disable the light");
}

#[test]
fn typo_in_slot_keeps_raw_words() {
    let mut slots = SlotStore::new();
    slots.insert("room", ["kitchen", "bedroom"]).unwrap();
    let recognizer = recognizer("[Lights]\nlights in the $room\n", &slots, RecognizerConfig::default());

    let recognition = recognizer.recognize("lights in the kitchn").into_recognition().unwrap();
    let slot = recognition.slot("room").unwrap();
    assert_eq!(slot.value, "kitchn");
    assert_eq!(slot.canonical_value, "kitchen");
}

#[test]
fn numbers_in_queries_fill_slots() {
    let mut slots = SlotStore::new();
    slots.insert("level", ["fifty", "seventy five"]).unwrap();
    let config = RecognizerConfig::default().with_replace_numbers(true);
    let recognizer = recognizer("[SetBrightness]\nset brightness to $level\n", &slots, config);

    let recognition = recognizer.recognize("set brightness to 75").into_recognition().unwrap();
    let slot = recognition.slot("level").unwrap();
    assert_eq!(slot.value, "seventy five");
    assert_eq!(slot.raw_value, "75");
}
