//! Integration tests for Layer 3: Recognizer
//!
//! Tests scoring, selection, slot reconstruction, and filtering.

mod converters;
mod matching;
mod slots;

use fuzzyintent_grammar::{Grammar, SlotStore};
use fuzzyintent_graph::{TrainingConfig, train};
use fuzzyintent_recognizer::{Recognizer, RecognizerConfig};

/// Trains on `source` and builds a recognizer over its examples.
pub fn recognizer(source: &str, slots: &SlotStore, config: RecognizerConfig) -> Recognizer {
    let grammar = Grammar::parse(source).unwrap();
    let model = train(&grammar, slots, &TrainingConfig::default()).unwrap();
    Recognizer::new(&model.examples, config)
}
