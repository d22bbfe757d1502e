//! Configuration for recognition.

use serde::{Deserialize, Serialize};

use fuzzyintent_foundation::WordCasing;

use crate::similarity::Metric;

/// Configuration for a [`Recognizer`](crate::Recognizer).
///
/// Casing and number replacement should match the options the examples were
/// trained with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Minimum confidence for a match; lower scores yield no match.
    pub threshold: f64,
    /// Minimum word similarity for two words to be aligned.
    pub min_token_similarity: f64,
    /// Word similarity measure.
    pub metric: Metric,
    /// Casing applied to query and example words before comparison.
    pub casing: WordCasing,
    /// Spell out numbers in queries.
    pub replace_numbers: bool,
    /// Scan at most this many examples, in index order.
    pub max_candidates: Option<usize>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            min_token_similarity: 0.5,
            metric: Metric::Levenshtein,
            casing: WordCasing::Ignore,
            replace_numbers: false,
            max_candidates: None,
        }
    }
}

impl RecognizerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches a model trained with `TrainingConfig::voice`.
    #[must_use]
    pub fn voice() -> Self {
        Self {
            casing: WordCasing::Lower,
            replace_numbers: true,
            ..Self::default()
        }
    }

    /// Exact words only.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            metric: Metric::Exact,
            min_token_similarity: 1.0,
            ..Self::default()
        }
    }

    /// Builder method to set the match threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder method to set the minimum word similarity.
    #[must_use]
    pub const fn with_min_token_similarity(mut self, min: f64) -> Self {
        self.min_token_similarity = min;
        self
    }

    /// Builder method to set the similarity metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Builder method to set word casing.
    #[must_use]
    pub const fn with_casing(mut self, casing: WordCasing) -> Self {
        self.casing = casing;
        self
    }

    /// Builder method to enable or disable number replacement.
    #[must_use]
    pub const fn with_replace_numbers(mut self, replace: bool) -> Self {
        self.replace_numbers = replace;
        self
    }

    /// Builder method to cap the number of scanned examples.
    #[must_use]
    pub const fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = Some(max);
        self
    }
}
