//! Integration tests across all layers
//!
//! Tests training from files, artifact persistence, and recognition from
//! loaded artifacts.

mod persistence;
mod pipeline;
