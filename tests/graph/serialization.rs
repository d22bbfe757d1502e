//! Artifact round trips

use std::collections::BTreeSet;

use fuzzyintent_foundation::ErrorKind;
use fuzzyintent_grammar::{Grammar, SlotStore};
use fuzzyintent_graph::serialize::{examples_from_bytes, examples_to_bytes, graph_from_bytes, graph_to_bytes};
use fuzzyintent_graph::{Format, GraphDocument, GraphPath, IntentGraph, TrainedModel, TrainingConfig, train};

fn model() -> TrainedModel {
    let grammar = Grammar::parse(
        "[SetBrightness]\nset [the] brightness to $brightness\n\n[Lights]\nturn (on | off:disable){state} the light\n",
    )
    .unwrap();
    let mut slots = SlotStore::new();
    slots.insert("brightness", ["fifty", "seventy five"]).unwrap();
    train(&grammar, &slots, &TrainingConfig::default()).unwrap()
}

fn path_set(graph: &IntentGraph) -> BTreeSet<GraphPath> {
    graph.paths().into_iter().collect()
}

#[test]
fn graph_round_trip_preserves_paths() {
    let model = model();
    for format in [Format::Json, Format::MessagePack] {
        let bytes = graph_to_bytes(&model.graph, format).unwrap();
        let loaded = graph_from_bytes(&bytes, format).unwrap();
        assert_eq!(path_set(&loaded), path_set(&model.graph), "{format}");
        assert_eq!(loaded, model.graph, "{format}");
    }
}

#[test]
fn examples_round_trip_preserves_order() {
    let model = model();
    for format in [Format::Json, Format::MessagePack] {
        let bytes = examples_to_bytes(&model.examples, format).unwrap();
        let loaded = examples_from_bytes(&bytes, format).unwrap();
        let before: Vec<_> = model.examples.iter().collect();
        let after: Vec<_> = loaded.iter().collect();
        assert_eq!(before, after, "{format}");
    }
}

#[test]
fn json_document_shape() {
    let bytes = graph_to_bytes(&model().graph, Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(value["start"], 0);
    assert!(value["nodes"].as_array().unwrap().iter().any(|n| n["accepts"].as_array().is_some_and(|a| !a.is_empty())));
    let edge = &value["edges"][0];
    assert!(edge.get("source").is_some() && edge.get("target").is_some() && edge.get("word").is_some());
}

#[test]
fn cyclic_document_is_rejected() {
    let mut doc = GraphDocument::from(&model().graph);
    let last = doc.nodes.last().unwrap().id;
    let mut back = doc.edges[0].clone();
    back.source = last;
    back.target = 0;
    back.word = "again".to_string();
    doc.edges.push(back);

    let err = IntentGraph::try_from(doc).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArtifact(_)));
}

#[test]
fn dangling_edge_is_rejected() {
    let mut doc = GraphDocument::from(&model().graph);
    doc.edges[0].target = 9999;
    let err = IntentGraph::try_from(doc).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArtifact(_)));
}

#[test]
fn format_from_extension() {
    assert_eq!(Format::from_path("graph.json").unwrap(), Format::Json);
    assert_eq!(Format::from_path("graph.msgpack").unwrap(), Format::MessagePack);
    assert_eq!(Format::from_path("graph.mp").unwrap(), Format::MessagePack);
    assert!(Format::from_path("graph.yaml").is_err());
}

#[test]
fn conversions_survive_round_trips() {
    let grammar = Grammar::parse("[SetTemperature]\nset to (ten:10!int){degrees!float} please\n").unwrap();
    let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
    for format in [Format::Json, Format::MessagePack] {
        let graph = graph_from_bytes(&graph_to_bytes(&model.graph, format).unwrap(), format).unwrap();
        assert_eq!(graph, model.graph, "{format}");

        let examples = examples_from_bytes(&examples_to_bytes(&model.examples, format).unwrap(), format).unwrap();
        let example = examples.examples("SetTemperature").next().unwrap();
        let ten = example.tokens.iter().find(|t| t.word == "ten").unwrap();
        let names: Vec<Vec<&str>> = ten
            .conversions
            .iter()
            .map(|c| c.converters.iter().map(|v| v.name.as_str()).collect())
            .collect();
        assert_eq!(names, vec![vec!["int"], vec!["float"]], "{format}");
    }

    let bytes = graph_to_bytes(&model.graph, Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let edges = value["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e.get("conversions").is_some()));
    assert!(edges.iter().any(|e| e.get("conversions").is_none()));
}
