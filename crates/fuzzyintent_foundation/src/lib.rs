//! Core error types and text transforms for fuzzyintent.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`WordCasing`] - Casing policy shared by training and recognition
//! - [`numbers`] - Number-to-words replacement

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod casing;
pub mod error;
pub mod numbers;

pub use casing::WordCasing;
pub use error::{Error, ErrorContext, ErrorKind, Limit, Result};
