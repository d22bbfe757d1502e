//! fuzzyintent - Sentence-template grammar compiler and fuzzy intent recognizer
//!
//! This crate re-exports all layers of the fuzzyintent system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: fuzzyintent_runtime     - Slot files, artifact I/O, logging, CLI
//! Layer 3: fuzzyintent_recognizer  - Tokenizer, alignment, best-example selection
//! Layer 2: fuzzyintent_graph       - Intent graph, examples index, training
//! Layer 1: fuzzyintent_grammar     - Lexer, parser, slot store, expander
//! Layer 0: fuzzyintent_foundation  - Error, word casing, number words
//! ```
//!
//! # Example
//!
//! ```
//! use fuzzyintent::{Grammar, Recognizer, RecognizerConfig, SlotStore, TrainingConfig, train};
//!
//! let grammar = Grammar::parse("[GetTime]\nwhat time is it\n").unwrap();
//! let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
//! let recognizer = Recognizer::new(&model.examples, RecognizerConfig::default());
//! assert!(recognizer.recognize("what time is it").is_match());
//! ```

pub use fuzzyintent_foundation as foundation;
pub use fuzzyintent_grammar as grammar;
pub use fuzzyintent_graph as graph;
pub use fuzzyintent_recognizer as recognizer;
pub use fuzzyintent_runtime as runtime;

pub use fuzzyintent_foundation::{Error, ErrorKind, Result, WordCasing};
pub use fuzzyintent_grammar::{Example, Grammar, GrammarBuilder, SlotStore};
pub use fuzzyintent_graph::{ExamplesIndex, IntentGraph, TrainedModel, TrainingConfig, train};
pub use fuzzyintent_recognizer::{Recognition, RecognitionOutcome, Recognizer, RecognizerConfig};
pub use fuzzyintent_runtime::{TrainingPaths, train_from_paths};
