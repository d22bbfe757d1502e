//! Intent recognition.
//!
//! A [`Recognizer`] aligns a query against every example in its index and
//! reports the best one. Ties go to the example with fewer slot words, then
//! to the earlier example.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use fuzzyintent_grammar::Example;
use fuzzyintent_graph::{ExamplesIndex, IntentGraph};

use crate::align::{Alignment, align, score_bound};
use crate::config::RecognizerConfig;
use crate::convert::{Converters, single_value, value_text};
use crate::similarity::Similarity;
use crate::tokenizer::{QueryTokenizer, TokenizedQuery};

/// A filled slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotMatch {
    /// Slot name.
    pub name: String,
    /// Query words aligned to the slot.
    pub value: String,
    /// The same words as typed, before casing and number replacement.
    pub raw_value: String,
    /// The matched example's output for the slot, converted.
    pub canonical_value: Value,
    /// First query token of the value.
    pub start: usize,
    /// One past the last query token of the value.
    pub end: usize,
}

/// A successful recognition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recognition {
    /// Recognized intent.
    pub intent: String,
    /// Alignment score of the winning example, in `[0, 1]`.
    pub confidence: f64,
    /// Slots with at least one aligned query word, in example order.
    pub slots: Vec<SlotMatch>,
    /// Output text of the winning example.
    pub text: String,
    /// The query as given.
    pub raw_text: String,
    /// Converted outputs of the winning example.
    pub tokens: Vec<Value>,
    /// Query words as typed.
    pub raw_tokens: Vec<String>,
    /// Time spent recognizing, in seconds.
    pub recognize_seconds: f64,
}

impl Recognition {
    /// Slot name to value. A slot filled twice keeps its last value.
    #[must_use]
    pub fn slot_values(&self) -> BTreeMap<&str, &str> {
        self.slots
            .iter()
            .map(|s| (s.name.as_str(), s.value.as_str()))
            .collect()
    }

    /// Returns the first match of a slot.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&SlotMatch> {
        self.slots.iter().find(|s| s.name == name)
    }
}

/// Result of recognizing one query.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecognitionOutcome {
    /// The best example scored at or above the threshold.
    Match(Recognition),
    /// Nothing scored high enough.
    NoMatch {
        /// Score of the best candidate (0 when there were none).
        best_score: f64,
    },
}

impl RecognitionOutcome {
    /// Returns true for a match.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }

    /// Returns the recognition, if any.
    #[must_use]
    pub const fn recognition(&self) -> Option<&Recognition> {
        match self {
            Self::Match(r) => Some(r),
            Self::NoMatch { .. } => None,
        }
    }

    /// Consumes the outcome, returning the recognition, if any.
    #[must_use]
    pub fn into_recognition(self) -> Option<Recognition> {
        match self {
            Self::Match(r) => Some(r),
            Self::NoMatch { .. } => None,
        }
    }

    /// Score of the best candidate.
    #[must_use]
    pub const fn score(&self) -> f64 {
        match self {
            Self::Match(r) => r.confidence,
            Self::NoMatch { best_score } => *best_score,
        }
    }
}

/// A scored example, as returned by [`Recognizer::rank`].
#[derive(Clone, Debug, PartialEq)]
pub struct RankedExample<'a> {
    /// Intent of the example.
    pub intent: &'a str,
    /// The example.
    pub example: &'a Example,
    /// Alignment score.
    pub score: f64,
}

#[derive(Debug)]
struct Candidate {
    intent: usize,
    example: Example,
    /// Example words with the configured casing applied.
    words: Vec<String>,
    slot_tokens: usize,
}

/// Per-query similarities: example word to its score against each query token.
struct SimilarityCache<'a> {
    rows: HashMap<&'a str, Vec<f64>>,
}

struct Best {
    candidate: usize,
    slot_tokens: usize,
    alignment: Alignment,
}

/// Fuzzy intent recognizer over an examples index.
///
/// All state needed for a query is allocated per call, so a recognizer can be
/// shared between threads.
pub struct Recognizer {
    intents: Vec<String>,
    candidates: Vec<Candidate>,
    config: RecognizerConfig,
    tokenizer: QueryTokenizer,
    similarity: Box<dyn Similarity>,
    converters: Converters,
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("intents", &self.intents)
            .field("candidates", &self.candidates.len())
            .field("config", &self.config)
            .field("converters", &self.converters)
            .finish_non_exhaustive()
    }
}

impl Recognizer {
    /// Creates a recognizer over an examples index.
    #[must_use]
    pub fn new(index: &ExamplesIndex, config: RecognizerConfig) -> Self {
        let mut intents: Vec<String> = Vec::new();
        let mut candidates = Vec::with_capacity(index.len());

        for (intent, example) in index {
            if intents.last().is_none_or(|last| last != intent) {
                intents.push(intent.to_string());
            }
            candidates.push(Candidate {
                intent: intents.len() - 1,
                words: example.words().map(|w| config.casing.apply(w)).collect(),
                slot_tokens: example.slot_token_count(),
                example: example.clone(),
            });
        }

        debug!(
            intents = intents.len(),
            examples = candidates.len(),
            "recognizer ready"
        );
        Self {
            intents,
            candidates,
            tokenizer: QueryTokenizer::new(config.casing, config.replace_numbers),
            similarity: Box::new(config.metric),
            converters: Converters::new(),
            config,
        }
    }

    /// Creates a recognizer over every path of an intent graph.
    #[must_use]
    pub fn from_graph(graph: &IntentGraph, config: RecognizerConfig) -> Self {
        Self::new(&ExamplesIndex::from_graph(graph), config)
    }

    /// Replaces the configured metric with a custom word similarity.
    #[must_use]
    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    /// Replaces the converter registry.
    #[must_use]
    pub fn with_converters(mut self, converters: Converters) -> Self {
        self.converters = converters;
        self
    }

    /// Registers a custom converter.
    #[must_use]
    pub fn with_converter<F>(mut self, name: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&[Value], &[String]) -> Result<Vec<Value>, String> + Send + Sync + 'static,
    {
        self.converters.insert(name, converter);
        self
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Intent names in index order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.intents.iter().map(String::as_str)
    }

    /// Number of examples considered per query.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.config
            .max_candidates
            .map_or(self.candidates.len(), |max| max.min(self.candidates.len()))
    }

    /// Recognizes a query against every intent.
    #[must_use]
    pub fn recognize(&self, text: &str) -> RecognitionOutcome {
        self.recognize_filtered(text, |_| true)
    }

    /// Recognizes a query, considering only intents accepted by `filter`.
    #[must_use]
    pub fn recognize_filtered(&self, text: &str, filter: impl Fn(&str) -> bool) -> RecognitionOutcome {
        let started = Instant::now();
        let query = self.tokenizer.tokenize(text);
        let mut cache = SimilarityCache {
            rows: HashMap::new(),
        };
        let mut best: Option<Best> = None;

        for (index, candidate) in self.scanned() {
            if !filter(&self.intents[candidate.intent]) {
                continue;
            }
            if let Some(current) = &best {
                if score_bound(query.len(), candidate.words.len()) < current.alignment.score {
                    continue;
                }
            }

            let alignment = self.align(&query, candidate, &mut cache);
            let better = match &best {
                None => true,
                Some(current) => match alignment.score.total_cmp(&current.alignment.score) {
                    Ordering::Greater => true,
                    Ordering::Equal => candidate.slot_tokens < current.slot_tokens,
                    Ordering::Less => false,
                },
            };
            if better {
                best = Some(Best {
                    candidate: index,
                    slot_tokens: candidate.slot_tokens,
                    alignment,
                });
            }
        }

        let Some(best) = best.filter(|b| b.alignment.score > 0.0) else {
            debug!(query = text, "no candidates");
            return RecognitionOutcome::NoMatch { best_score: 0.0 };
        };
        if best.alignment.score < self.config.threshold {
            debug!(query = text, best_score = best.alignment.score, "below threshold");
            return RecognitionOutcome::NoMatch {
                best_score: best.alignment.score,
            };
        }

        let mut recognition = self.recognition(text, &query, &self.candidates[best.candidate], &best.alignment);
        recognition.recognize_seconds = started.elapsed().as_secs_f64();
        debug!(
            query = text,
            intent = %recognition.intent,
            confidence = recognition.confidence,
            "recognized"
        );
        RecognitionOutcome::Match(recognition)
    }

    /// Scores every example against a query, best first.
    ///
    /// Ordering follows the selection rule used by [`recognize`](Self::recognize).
    #[must_use]
    pub fn rank(&self, text: &str) -> Vec<RankedExample<'_>> {
        let query = self.tokenizer.tokenize(text);
        let mut cache = SimilarityCache {
            rows: HashMap::new(),
        };
        let mut scored: Vec<(usize, f64)> = self
            .scanned()
            .map(|(index, candidate)| (index, self.align(&query, candidate, &mut cache).score))
            .collect();
        scored.sort_by(|(a, sa), (b, sb)| {
            sb.total_cmp(sa)
                .then(self.candidates[*a].slot_tokens.cmp(&self.candidates[*b].slot_tokens))
                .then(a.cmp(b))
        });
        scored
            .into_iter()
            .map(|(index, score)| {
                let candidate = &self.candidates[index];
                RankedExample {
                    intent: &self.intents[candidate.intent],
                    example: &candidate.example,
                    score,
                }
            })
            .collect()
    }

    fn scanned(&self) -> impl Iterator<Item = (usize, &Candidate)> {
        self.candidates.iter().enumerate().take(self.candidate_count())
    }

    fn align<'a>(
        &'a self,
        query: &TokenizedQuery,
        candidate: &'a Candidate,
        cache: &mut SimilarityCache<'a>,
    ) -> Alignment {
        for word in &candidate.words {
            cache.rows.entry(word.as_str()).or_insert_with(|| {
                query
                    .tokens
                    .iter()
                    .map(|token| self.similarity.similarity(token, word))
                    .collect()
            });
        }
        let rows: Vec<&[f64]> = candidate
            .words
            .iter()
            .map(|word| cache.rows.get(word.as_str()).map_or(&[][..], Vec::as_slice))
            .collect();

        align(
            query.len(),
            candidate.words.len(),
            self.config.min_token_similarity,
            |q, e| rows[e].get(q).copied().unwrap_or(0.0),
        )
    }

    fn recognition(
        &self,
        text: &str,
        query: &TokenizedQuery,
        candidate: &Candidate,
        alignment: &Alignment,
    ) -> Recognition {
        let example = &candidate.example;
        let slots = example
            .slot_spans()
            .into_iter()
            .filter_map(|span| {
                let mut positions = alignment.query_positions(span.start, span.end);
                let first = positions.next()?;
                let last = positions.last().unwrap_or(first);
                Some(SlotMatch {
                    value: query.tokens[first..=last].join(" "),
                    raw_value: query.raw_between(first, last),
                    canonical_value: single_value(
                        self.converters
                            .convert(&example.tokens[span.start..span.end]),
                    ),
                    name: span.name,
                    start: first,
                    end: last + 1,
                })
            })
            .collect();

        let tokens = self.converters.convert(&example.tokens);

        Recognition {
            intent: self.intents[candidate.intent].clone(),
            confidence: alignment.score,
            slots,
            text: tokens.iter().map(value_text).collect::<Vec<_>>().join(" "),
            raw_text: text.to_string(),
            tokens,
            raw_tokens: query.raw_tokens.clone(),
            recognize_seconds: 0.0,
        }
    }
}
