//! Sentence grammar for fuzzyintent.
//!
//! This crate provides:
//! - [`Lexer`] and [`Parser`] - Template text to [`Node`] trees
//! - [`Grammar`] - Intents and local rules read from sentence files
//! - [`Converter`] - Value converters recorded on examples as [`Conversion`]s
//! - [`SlotStore`] - Slot values loaded from [`SlotSource`]s
//! - [`Expander`] - Compilation into a hash-consed [`FragmentArena`]
//! - [`ExampleIter`] - Lazy enumeration of [`Example`]s
//!
//! # Example
//!
//! ```
//! use fuzzyintent_grammar::{Expansion, Grammar, SlotStore};
//!
//! let grammar = Grammar::parse("[Lights]\nturn (on | off) [the] light\n").unwrap();
//! let expansion = Expansion::of(&grammar, &SlotStore::new()).unwrap();
//! assert_eq!(expansion.example_count("Lights"), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod converter;
pub mod example;
pub mod expander;
pub mod fragment;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod sentences;
pub mod slots;
pub mod span;
pub mod token;
pub mod transform;


pub use ast::Node;
pub use converter::{Conversion, Converter};
pub use example::{Example, ExampleToken, SlotRole, SlotSpan, SlotTag};
pub use expander::{CyclePolicy, ExampleIter, Expander, Expansion};
pub use fragment::{Fragment, FragmentArena, FragmentId};
pub use grammar::{Grammar, GrammarBuilder, Intent, Rule};
pub use lexer::Lexer;
pub use parser::{Parser, parse_template};
pub use slots::{GeneratedList, SlotSource, SlotStore, SlotValue, StaticList};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use transform::WordTransform;
