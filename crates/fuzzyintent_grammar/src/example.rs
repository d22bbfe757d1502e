//! Examples: concrete word sequences produced by expanding an intent.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::converter::Conversion;

/// Position of a token within a slot occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SlotRole {
    /// First token of an occurrence (also used for single-token occurrences).
    Begin,
    /// A token strictly between the first and last.
    Inside,
    /// Last token of a multi-token occurrence.
    End,
}

/// Slot membership of a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotTag {
    /// Slot name.
    pub name: String,
    /// Role within the occurrence.
    pub role: SlotRole,
}

/// A single word of an example.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExampleToken {
    /// Spoken word.
    pub word: String,
    /// Output substitution; `Some("")` outputs nothing.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value: Option<String>,
    /// Slot this word belongs to.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub slot: Option<SlotTag>,
    /// Converter chains starting at this word, innermost first.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub conversions: Vec<Conversion>,
}

impl ExampleToken {
    /// Creates an untagged word.
    #[must_use]
    pub fn word(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            value: None,
            slot: None,
            conversions: Vec::new(),
        }
    }

    /// Sets the output substitution.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Tags the word with a slot.
    #[must_use]
    pub fn in_slot(mut self, name: impl Into<String>, role: SlotRole) -> Self {
        self.slot = Some(SlotTag {
            name: name.into(),
            role,
        });
        self
    }

    /// Starts a converter chain at this word.
    #[must_use]
    pub fn with_conversion(mut self, conversion: Conversion) -> Self {
        self.conversions.push(conversion);
        self
    }

    /// Output text of this word.
    #[must_use]
    pub fn output(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.word)
    }
}

/// A contiguous slot occurrence within an example.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotSpan {
    /// Slot name.
    pub name: String,
    /// Index of the first token.
    pub start: usize,
    /// One past the last token.
    pub end: usize,
}

/// An ordered word sequence realizing an intent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Example {
    /// Tokens in order.
    pub tokens: Vec<ExampleToken>,
}

impl Example {
    /// Creates an example from tokens.
    #[must_use]
    pub const fn new(tokens: Vec<ExampleToken>) -> Self {
        Self { tokens }
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the example has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Spoken words.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.word.as_str())
    }

    /// Spoken text, words joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.words().collect::<Vec<_>>().join(" ")
    }

    /// Output text with substitutions applied and empty outputs dropped.
    #[must_use]
    pub fn output_text(&self) -> String {
        join_outputs(&self.tokens)
    }

    /// Number of tokens that belong to any slot.
    #[must_use]
    pub fn slot_token_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.slot.is_some()).count()
    }

    /// Slot occurrences in order.
    ///
    /// An occurrence starts at a `Begin` token and extends over the following
    /// tokens of the same slot that are not themselves `Begin`.
    #[must_use]
    pub fn slot_spans(&self) -> Vec<SlotSpan> {
        let mut spans: Vec<SlotSpan> = Vec::new();
        for (i, token) in self.tokens.iter().enumerate() {
            let Some(tag) = &token.slot else {
                continue;
            };
            match spans.last_mut() {
                Some(span) if tag.role != SlotRole::Begin && span.end == i && span.name == tag.name => {
                    span.end = i + 1;
                }
                _ => spans.push(SlotSpan {
                    name: tag.name.clone(),
                    start: i,
                    end: i + 1,
                }),
            }
        }
        spans
    }

    /// Output text of a token range.
    #[must_use]
    pub fn output_of(&self, start: usize, end: usize) -> String {
        join_outputs(&self.tokens[start..end])
    }
}

fn join_outputs(tokens: &[ExampleToken]) -> String {
    tokens
        .iter()
        .map(ExampleToken::output)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
