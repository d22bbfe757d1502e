//! Integration tests for Layer 1: Grammar
//!
//! Tests sentence parsing, reference resolution, slots, and expansion.

mod expansion;
mod slots;
