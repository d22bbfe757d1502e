//! File-backed runtime for fuzzyintent.
//!
//! This crate provides:
//! - [`SlotFile`] / [`SlotProgram`] - Slot values from files and executables
//! - [`train_from_paths`] - Training from sentence files and slot directories
//! - [`artifacts`] - Reading and writing graph and examples files
//! - [`init_logging`] - Console logging for the command-line tool
//! - [`cli`] - The `fuzzyintent` command line

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod artifacts;
pub mod cli;
pub mod logging;
pub mod slots;
pub mod training;

pub use artifacts::{ArtifactPaths, load_examples, load_graph, save_examples, save_graph, save_model};
pub use logging::init_logging;
pub use slots::{SlotFile, SlotProgram, load_slot_dirs, load_slot_programs};
pub use training::{TrainingPaths, train_from_paths};
