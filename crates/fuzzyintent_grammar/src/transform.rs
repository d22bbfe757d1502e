//! Word transforms applied to templates before expansion.

use fuzzyintent_foundation::WordCasing;
use fuzzyintent_foundation::numbers::{number_to_words, parse_number};

use crate::ast::Node;

/// Casing and number replacement applied to every literal word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordTransform {
    /// Casing policy for literal words.
    pub casing: WordCasing,
    /// Spell out numeric literals ("75" becomes "seventy five").
    pub replace_numbers: bool,
}

impl WordTransform {
    /// Creates a transform.
    #[must_use]
    pub const fn new(casing: WordCasing, replace_numbers: bool) -> Self {
        Self {
            casing,
            replace_numbers,
        }
    }

    /// Returns true if applying this transform changes nothing.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.casing.is_identity() && !self.replace_numbers
    }

    /// Rewrites the literals of a template in place.
    ///
    /// A replaced number keeps its digits as output: `75` becomes
    /// `seventy:75 five:`, so a slot filled by it still reports `75`.
    pub fn apply(&self, node: &mut Node) {
        if self.is_identity() {
            return;
        }
        node.walk_mut(&mut |n| {
            let Node::Literal {
                text,
                substitution,
                span,
            } = &mut *n
            else {
                return;
            };

            if self.replace_numbers {
                if let Some(number) = parse_number(text) {
                    let output = substitution.take().unwrap_or_else(|| text.clone());
                    let span = *span;
                    let words = number_to_words(number)
                        .into_iter()
                        .enumerate()
                        .map(|(i, word)| Node::Literal {
                            text: self.casing.apply(&word),
                            substitution: Some(if i == 0 { output.clone() } else { String::new() }),
                            span,
                        })
                        .collect();
                    *n = Node::Sequence(words, span);
                    return;
                }
            }

            *text = self.casing.apply(text);
        });
    }
}
