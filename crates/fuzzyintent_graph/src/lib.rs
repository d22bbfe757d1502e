//! Intent graph construction for fuzzyintent.
//!
//! This crate provides:
//! - [`IntentGraphBuilder`] - Trie construction and minimization
//! - [`IntentGraph`] - Canonical, index-based word DAG with accept markers
//! - [`ExamplesIndex`] - Ordered, deduplicated examples per intent
//! - [`GraphDocument`] / [`ExamplesDocument`] - Portable artifact forms
//! - [`train`] - The grammar-to-artifacts pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod document;
pub mod examples;
pub mod graph;
mod minimize;
pub mod serialize;
pub mod train;

pub use builder::IntentGraphBuilder;
pub use document::{EdgeRecord, ExamplesDocument, FORMAT_VERSION, GraphDocument, NodeRecord};
pub use examples::ExamplesIndex;
pub use graph::{Edge, EdgeLabel, GraphNode, GraphPath, IntentGraph, NodeId};
pub use serialize::Format;
pub use train::{Strictness, TrainedModel, TrainingConfig, train};
