//! Query tokenization.
//!
//! Converts raw query text into the words compared against examples.

use fuzzyintent_foundation::WordCasing;
use fuzzyintent_foundation::numbers::{number_to_words, parse_number};

/// A tokenized query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenizedQuery {
    /// Words as typed, punctuation stripped.
    pub raw_tokens: Vec<String>,
    /// Words after casing and number replacement.
    pub tokens: Vec<String>,
    /// For each entry of `tokens`, the index of the raw token it came from.
    pub origin: Vec<usize>,
}

impl TokenizedQuery {
    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the query has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Raw text covered by tokens `start..=end`.
    #[must_use]
    pub fn raw_between(&self, start: usize, end: usize) -> String {
        let (from, to) = (self.origin[start], self.origin[end]);
        self.raw_tokens[from..=to].join(" ")
    }
}

/// Splits queries into words.
///
/// - Splits on whitespace
/// - Strips leading and trailing punctuation (`what's` keeps its apostrophe)
/// - Applies the word casing
/// - Optionally spells out numbers (`75` becomes `seventy five`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryTokenizer {
    casing: WordCasing,
    replace_numbers: bool,
}

impl QueryTokenizer {
    /// Creates a tokenizer.
    #[must_use]
    pub const fn new(casing: WordCasing, replace_numbers: bool) -> Self {
        Self {
            casing,
            replace_numbers,
        }
    }

    /// Tokenizes a query.
    #[must_use]
    pub fn tokenize(&self, input: &str) -> TokenizedQuery {
        let mut query = TokenizedQuery::default();

        for word in input.split_whitespace() {
            let word = word.trim_matches(is_punctuation);
            if word.is_empty() {
                continue;
            }
            let raw_index = query.raw_tokens.len();
            query.raw_tokens.push(word.to_string());

            match parse_number(word).filter(|_| self.replace_numbers) {
                Some(number) => {
                    for spelled in number_to_words(number) {
                        query.tokens.push(self.casing.apply(&spelled));
                        query.origin.push(raw_index);
                    }
                }
                None => {
                    query.tokens.push(self.casing.apply(word));
                    query.origin.push(raw_index);
                }
            }
        }

        query
    }
}

fn is_punctuation(c: char) -> bool {
    (c.is_ascii_punctuation() && c != '-') || matches!(c, '“' | '”' | '‘' | '’' | '¿' | '¡')
}
