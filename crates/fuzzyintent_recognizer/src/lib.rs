//! Fuzzy intent recognition for fuzzyintent.
//!
//! This crate provides:
//! - [`QueryTokenizer`] - Query text to comparable words
//! - [`Similarity`] / [`Metric`] - Word similarity measures
//! - [`align`](align::align) - Weighted order-preserving token alignment
//! - [`Recognizer`] - Best-example selection and slot reconstruction
//! - [`Converters`] - Converter application to recognized outputs
//!
//! # Example
//!
//! ```
//! use fuzzyintent_grammar::{Grammar, SlotStore};
//! use fuzzyintent_graph::{TrainingConfig, train};
//! use fuzzyintent_recognizer::{Recognizer, RecognizerConfig};
//!
//! let grammar = Grammar::parse("[LightOn]\nturn on [the] light\n").unwrap();
//! let model = train(&grammar, &SlotStore::new(), &TrainingConfig::default()).unwrap();
//! let recognizer = Recognizer::new(&model.examples, RecognizerConfig::default());
//!
//! let outcome = recognizer.recognize("turn on the lihgt");
//! assert_eq!(outcome.recognition().unwrap().intent, "LightOn");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod align;
pub mod config;
pub mod convert;
pub mod recognizer;
pub mod similarity;
pub mod tokenizer;

pub use config::RecognizerConfig;
pub use convert::{ConverterFn, Converters, single_value, value_text};
pub use recognizer::{RankedExample, Recognition, RecognitionOutcome, Recognizer, SlotMatch};
pub use similarity::{Metric, Similarity};
pub use tokenizer::{QueryTokenizer, TokenizedQuery};
