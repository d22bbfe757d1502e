//! Value converters attached to template elements.
//!
//! `ten:10!int` converts the output of one word, `(is a test)!upper` the
//! outputs of a group, and `(four: point: two:4.2){number!float}` the value
//! of a slot. Converters chain left to right and may take comma-separated
//! arguments (`!pow,3`). They are only recorded here; recognition applies
//! them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named converter with its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Converter {
    /// Converter name.
    pub name: String,
    /// Arguments after the name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub args: Vec<String>,
}

impl Converter {
    /// Creates a converter without arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Parses `name[,arg...]`, the text after a `!`.
    ///
    /// Returns None if the name is empty.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',');
        let name = parts.next().filter(|n| !n.is_empty())?;
        Some(Self {
            name: name.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.name)?;
        for arg in &self.args {
            write!(f, ",{arg}")?;
        }
        Ok(())
    }
}

/// A converter chain covering `len` consecutive example tokens.
///
/// Stored on the first covered token. A token opening several chains lists
/// them innermost first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conversion {
    /// Converters, applied in order.
    pub converters: Vec<Converter>,
    /// Number of tokens covered.
    pub len: usize,
}

impl Conversion {
    /// Creates a conversion over `len` tokens.
    #[must_use]
    pub const fn new(converters: Vec<Converter>, len: usize) -> Self {
        Self { converters, len }
    }
}
