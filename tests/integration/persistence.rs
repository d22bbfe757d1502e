//! Artifact files

use std::fs;

use fuzzyintent::runtime::artifacts::{ArtifactPaths, load_examples, load_graph, save_examples, save_graph, save_model};
use fuzzyintent::{ErrorKind, Grammar, SlotStore, TrainingConfig, train};

fn model() -> fuzzyintent::TrainedModel {
    let grammar = Grammar::parse("[A]\n(one | two) three\n\n[B]\nfour [five]\n").unwrap();
    train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap()
}

#[test]
fn json_and_msgpack_load_identically() {
    let dir = tempfile::tempdir().unwrap();
    let model = model();
    save_graph(&model.graph, dir.path().join("g.json")).unwrap();
    save_graph(&model.graph, dir.path().join("g.mp")).unwrap();
    save_examples(&model.examples, dir.path().join("e.json")).unwrap();
    save_examples(&model.examples, dir.path().join("e.msgpack")).unwrap();

    assert_eq!(load_graph(dir.path().join("g.json")).unwrap(), load_graph(dir.path().join("g.mp")).unwrap());
    assert_eq!(
        load_examples(dir.path().join("e.json")).unwrap(),
        load_examples(dir.path().join("e.msgpack")).unwrap()
    );
}

#[test]
fn msgpack_is_smaller_than_json() {
    let dir = tempfile::tempdir().unwrap();
    let model = model();
    save_graph(&model.graph, dir.path().join("g.json")).unwrap();
    save_graph(&model.graph, dir.path().join("g.msgpack")).unwrap();
    let json = fs::metadata(dir.path().join("g.json")).unwrap().len();
    let msgpack = fs::metadata(dir.path().join("g.msgpack")).unwrap().len();
    assert!(msgpack < json);
}

#[test]
fn failed_save_leaves_no_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths {
        intent_graph: Some(dir.path().join("graph.json")),
        examples: Some(dir.path().join("examples.unknown")),
    };
    assert!(save_model(&model(), &paths).is_err());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn unwritable_second_artifact_leaves_no_graph() {
    let dir = tempfile::tempdir().unwrap();
    let graph = dir.path().join("graph.json");
    let paths = ArtifactPaths {
        intent_graph: Some(graph.clone()),
        examples: Some(dir.path().join("missing_dir").join("examples.json")),
    };
    let err = save_model(&model(), &paths).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(!graph.exists());
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn tampered_graph_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    save_graph(&model().graph, &path).unwrap();

    let mut doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    doc["version"] = serde_json::json!(99);
    fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    let err = load_graph(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArtifact(_)));
}
