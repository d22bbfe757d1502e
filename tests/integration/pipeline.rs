//! End-to-end: sentence files to recognitions

use std::fs;
use std::path::Path;

use fuzzyintent::runtime::artifacts::{ArtifactPaths, load_examples, load_graph, save_model};
use fuzzyintent::{ErrorKind, Recognizer, RecognizerConfig, TrainingConfig, TrainingPaths, WordCasing, train_from_paths};

const SENTENCES: &str = "\
# Home assistant
[GetTime]
what time is it
tell me the time

[ChangeLightState]
state = (on | off){state}
turn <state> [the] ($rooms){room} light
turn [the] ($rooms){room} light <state>

[SetBrightness]
set [the] brightness to ($levels){level}
";

fn workspace(dir: &Path) -> TrainingPaths {
    fs::write(dir.join("sentences.ini"), SENTENCES).unwrap();
    let slots = dir.join("slots");
    fs::create_dir_all(&slots).unwrap();
    fs::write(slots.join("rooms"), "# rooms\nkitchen\nliving room\n").unwrap();
    fs::write(slots.join("levels"), "ten:10\nfifty:50\n").unwrap();
    TrainingPaths::new([dir.join("sentences.ini")]).with_slot_dir(slots)
}

#[test]
fn train_save_load_recognize() {
    let dir = tempfile::tempdir().unwrap();
    let paths = workspace(dir.path());
    let config = TrainingConfig::voice();
    let model = train_from_paths(&paths, &config).unwrap();
    assert!(model.warnings.is_empty());

    let artifacts = ArtifactPaths {
        intent_graph: Some(dir.path().join("intent_graph.msgpack")),
        examples: Some(dir.path().join("examples.json")),
    };
    save_model(&model, &artifacts).unwrap();

    let examples = load_examples(artifacts.examples.as_ref().unwrap()).unwrap();
    let graph = load_graph(artifacts.intent_graph.as_ref().unwrap()).unwrap();
    assert_eq!(graph, model.graph);

    let recognizer = Recognizer::new(&examples, RecognizerConfig::voice());
    let recognition = recognizer
        .recognize("Turn on the living room light")
        .into_recognition()
        .unwrap();
    assert_eq!(recognition.intent, "ChangeLightState");
    let values = recognition.slot_values();
    assert_eq!(values.get("state"), Some(&"on"));
    assert_eq!(values.get("room"), Some(&"living room"));

    let recognition = recognizer.recognize("set brightness to 50").into_recognition().unwrap();
    assert_eq!(recognition.intent, "SetBrightness");
    let level = recognition.slot("level").unwrap();
    assert_eq!(level.canonical_value, "50");
    assert_eq!(level.raw_value, "50");

    assert!(!recognizer.recognize("order a pizza with anchovies").is_match());
}

#[test]
fn upper_casing_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let paths = workspace(dir.path());
    let model = train_from_paths(&paths, &TrainingConfig::new().with_casing(WordCasing::Upper)).unwrap();
    assert!(model.examples.iter().all(|(_, e)| e.words().all(|w| w == w.to_uppercase())));

    let recognizer = Recognizer::new(&model.examples, RecognizerConfig::new().with_casing(WordCasing::Upper));
    let recognition = recognizer.recognize("what time is it").into_recognition().unwrap();
    assert_eq!(recognition.intent, "GetTime");
}

#[test]
fn missing_slot_file_fails_training() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sentences.ini"), "[Go]\ngo to $nowhere\n").unwrap();
    let paths = TrainingPaths::new([dir.path().join("sentences.ini")]);
    let err = train_from_paths(&paths, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference { .. }));
}

#[test]
fn syntax_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.ini"), "[Go]\ngo to (the park\n").unwrap();
    let paths = TrainingPaths::new([dir.path().join("broken.ini")]);
    let err = train_from_paths(&paths, &TrainingConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::GrammarSyntax { line: 2, .. }));
    assert!(err.to_string().contains("broken.ini"));
}

#[cfg(unix)]
#[test]
fn slot_programs_feed_training() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sentences.ini"), "[Play]\nplay ($music/artists){artist}\n").unwrap();
    let programs = dir.path().join("slot_programs");
    fs::create_dir_all(programs.join("music")).unwrap();
    let script = programs.join("music").join("artists");
    fs::write(&script, "#!/bin/sh\necho queen\necho the beatles\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let paths = TrainingPaths::new([dir.path().join("sentences.ini")]).with_slot_program_dir(&programs);
    let model = train_from_paths(&paths, &TrainingConfig::default()).unwrap();
    let texts: Vec<String> = model.examples.examples("Play").map(|e| e.text()).collect();
    assert_eq!(texts, vec!["play queen", "play the beatles"]);
}
