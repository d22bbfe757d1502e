//! Slot store: named lists of replacement templates.
//!
//! Each slot value is itself a template, so a value may contain alternatives,
//! optional words, rule references, or other slots. Values are parsed when
//! they are inserted so malformed values fail early.

use indexmap::IndexMap;
use tracing::debug;

use fuzzyintent_foundation::{Error, ErrorKind, Result};

use crate::ast::Node;
use crate::parser::Parser;
use crate::transform::WordTransform;

/// One slot value: its text and parsed template.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotValue {
    /// Value text as loaded.
    pub text: String,
    /// Parsed template.
    pub body: Node,
}

/// A source of values for one slot.
pub trait SlotSource {
    /// The slot this source provides values for.
    fn slot_name(&self) -> &str;

    /// Produces the value texts, in order.
    ///
    /// # Errors
    /// Returns an error if the values cannot be produced.
    fn load(&self) -> Result<Vec<String>>;
}

/// A fixed list of values.
#[derive(Clone, Debug)]
pub struct StaticList {
    name: String,
    values: Vec<String>,
}

impl StaticList {
    /// Creates a static slot list.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl SlotSource for StaticList {
    fn slot_name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<String>> {
        Ok(self.values.clone())
    }
}

/// Values produced by a function at load time.
pub struct GeneratedList<F> {
    name: String,
    generate: F,
}

impl<F> GeneratedList<F>
where
    F: Fn() -> Result<Vec<String>>,
{
    /// Creates a generated slot list.
    pub fn new(name: impl Into<String>, generate: F) -> Self {
        Self {
            name: name.into(),
            generate,
        }
    }
}

impl<F> SlotSource for GeneratedList<F>
where
    F: Fn() -> Result<Vec<String>>,
{
    fn slot_name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<String>> {
        (self.generate)()
    }
}

/// Mapping from slot name to its ordered values.
#[derive(Clone, Debug, Default)]
pub struct SlotStore {
    slots: IndexMap<String, Vec<SlotValue>>,
}

impl SlotStore {
    /// Creates an empty slot store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and stores values for a slot, replacing any previous values.
    ///
    /// # Errors
    /// Returns a syntax error if a value is not a valid template. The error's
    /// line is the 1-based index of the value within the list.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut parsed = Vec::new();
        for (index, text) in values.into_iter().enumerate() {
            let text = text.into();
            let line = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let body = Parser::at(&text, line, 1, &text)
                .parse()
                .map_err(|e| e.in_source(format!("${name}")))?;
            parsed.push(SlotValue { text, body });
        }
        debug!(slot = %name, values = parsed.len(), "loaded slot");
        self.slots.insert(name, parsed);
        Ok(())
    }

    /// Loads a slot from a source.
    ///
    /// # Errors
    /// Returns a slot source error if loading fails, or a syntax error for a
    /// malformed value.
    pub fn load(&mut self, source: &dyn SlotSource) -> Result<()> {
        let name = source.slot_name().to_string();
        let values = source.load().map_err(|e| match e.kind {
            ErrorKind::SlotSource { .. } => e,
            kind => Error::new(ErrorKind::SlotSource {
                slot: name.clone(),
                message: kind.to_string(),
            }),
        })?;
        self.insert(name, values)
    }

    /// Returns the values of a slot.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[SlotValue]> {
        self.slots.get(name).map(Vec::as_slice)
    }

    /// Returns true if the slot is defined.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Iterates over slot names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no slots are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Applies a word transform to every slot value.
    pub fn transform(&mut self, transform: &WordTransform) {
        for values in self.slots.values_mut() {
            for value in values {
                transform.apply(&mut value.body);
            }
        }
    }
}
