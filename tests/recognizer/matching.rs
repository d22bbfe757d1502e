//! Scoring and selection

use fuzzyintent_foundation::WordCasing;
use fuzzyintent_grammar::{Grammar, SlotStore};
use fuzzyintent_graph::{TrainingConfig, train};
use fuzzyintent_recognizer::{Metric, RecognitionOutcome, Recognizer, RecognizerConfig};

use crate::recognizer;

const HOME: &str = "[GetTime]\nwhat time is it\n\n[LightOn]\nturn on the light\n\n[LightOff]\nturn off the light\n";

#[test]
fn exact_query_scores_one_and_ranks_first() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    let outcome = recognizer.recognize("turn on the light");
    let recognition = outcome.recognition().unwrap();
    assert_eq!(recognition.intent, "LightOn");
    assert!((recognition.confidence - 1.0).abs() < 1e-9);

    let ranked = recognizer.rank("turn on the light");
    assert_eq!(ranked[0].intent, "LightOn");
    assert!(ranked.iter().all(|r| r.score <= ranked[0].score));
}

#[test]
fn typo_lowers_confidence_but_keeps_intent() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    let recognition = recognizer.recognize("what tme is it").into_recognition().unwrap();
    assert_eq!(recognition.intent, "GetTime");
    assert!(recognition.confidence < 1.0);
    assert!(recognition.confidence >= 0.5);
}

#[test]
fn unrelated_query_is_no_match() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    let outcome = recognizer.recognize("purple monkey dishwasher");
    assert!(matches!(outcome, RecognitionOutcome::NoMatch { .. }));
    assert!(outcome.score() < 0.5);
}

#[test]
fn empty_query_is_no_match() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    assert_eq!(recognizer.recognize("  "), RecognitionOutcome::NoMatch { best_score: 0.0 });
}

#[test]
fn extra_words_are_tolerated() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    let recognition = recognizer.recognize("please turn off the light now").into_recognition().unwrap();
    assert_eq!(recognition.intent, "LightOff");
    assert_eq!(recognition.raw_text, "please turn off the light now");
    assert_eq!(recognition.text, "turn off the light");
}

#[test]
fn threshold_controls_acceptance() {
    let strict = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default().with_threshold(0.99));
    assert!(!strict.recognize("what tme is it").is_match());
    assert!(strict.recognize("what time is it").is_match());
}

#[test]
fn exact_metric_rejects_typos() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::exact());
    let outcome = recognizer.recognize("whta tmie si ti");
    assert!(!outcome.is_match());
}

#[test]
fn jaro_winkler_metric_is_selectable() {
    let config = RecognizerConfig::default().with_metric(Metric::JaroWinkler);
    let recognizer = recognizer(HOME, &SlotStore::new(), config);
    let recognition = recognizer.recognize("turn on the lite").into_recognition().unwrap();
    assert_eq!(recognition.intent, "LightOn");
}

#[test]
fn casing_is_applied_to_queries() {
    let config = RecognizerConfig::default().with_casing(WordCasing::Lower);
    let recognizer = recognizer(HOME, &SlotStore::new(), config);
    let recognition = recognizer.recognize("What Time Is It?").into_recognition().unwrap();
    assert_eq!(recognition.intent, "GetTime");
    assert!((recognition.confidence - 1.0).abs() < 1e-9);
    assert_eq!(recognition.raw_tokens, vec!["What", "Time", "Is", "It"]);
}

#[test]
fn earlier_example_wins_ties() {
    let recognizer = recognizer(
        "[First]\nopen the door\n\n[Second]\nopen the door\n",
        &SlotStore::new(),
        RecognizerConfig::default(),
    );
    assert_eq!(recognizer.recognize("open the door").recognition().unwrap().intent, "First");
}

#[test]
fn intent_filter_restricts_candidates() {
    let recognizer = recognizer(HOME, &SlotStore::new(), RecognizerConfig::default());
    let outcome = recognizer.recognize_filtered("turn on the light", |intent| intent != "LightOn");
    assert_eq!(outcome.recognition().unwrap().intent, "LightOff");

    let outcome = recognizer.recognize_filtered("turn on the light", |_| false);
    assert!(!outcome.is_match());
}

#[test]
fn graph_and_index_recognize_alike() {
    let grammar = Grammar::parse(HOME).unwrap();
    let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
    let from_index = Recognizer::new(&model.examples, RecognizerConfig::default());
    let from_graph = Recognizer::from_graph(&model.graph, RecognizerConfig::default());

    for query in ["turn on the light", "what tme is it", "nothing like it"] {
        assert_eq!(
            from_index.recognize(query).recognition().map(|r| r.intent.clone()),
            from_graph.recognize(query).recognition().map(|r| r.intent.clone()),
            "{query}"
        );
    }
}

#[test]
fn recognizer_is_shareable_across_threads() {
    let recognizer = std::sync::Arc::new(recognizer(HOME, &SlotStore::new(), RecognizerConfig::default()));
    let handles: Vec<_> = ["turn on the light", "turn off the light"]
        .into_iter()
        .map(|query| {
            let recognizer = std::sync::Arc::clone(&recognizer);
            std::thread::spawn(move || recognizer.recognize(query).into_recognition().map(|r| r.intent))
        })
        .collect();
    let intents: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(intents, vec![Some("LightOn".to_string()), Some("LightOff".to_string())]);
}
