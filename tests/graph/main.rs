//! Integration tests for Layer 2: Graph
//!
//! Tests graph construction, minimization, artifacts, and training.

mod building;
mod properties;
mod serialization;
mod training;
