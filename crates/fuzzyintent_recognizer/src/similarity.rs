//! Word similarity.
//!
//! A [`Similarity`] scores two words in `[0, 1]`, where 1 means identical.
//! [`Metric`] covers the built-in `strsim` measures; any
//! `Fn(&str, &str) -> f64` closure can be used as well.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scores how alike two words are, from 0 (unrelated) to 1 (identical).
pub trait Similarity: Send + Sync {
    /// Returns the similarity of `a` and `b`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Built-in similarity measures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Normalized Levenshtein distance.
    #[default]
    Levenshtein,
    /// Jaro-Winkler similarity, which favors shared prefixes.
    JaroWinkler,
    /// 1 for equal words, 0 otherwise.
    Exact,
}

impl Similarity for Metric {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        match self {
            Self::Levenshtein => strsim::normalized_levenshtein(a, b),
            Self::JaroWinkler => strsim::jaro_winkler(a, b),
            Self::Exact => 0.0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Levenshtein => "levenshtein",
            Self::JaroWinkler => "jaro-winkler",
            Self::Exact => "exact",
        })
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "levenshtein" => Ok(Self::Levenshtein),
            "jaro-winkler" => Ok(Self::JaroWinkler),
            "exact" => Ok(Self::Exact),
            other => Err(format!("unknown similarity metric: {other}")),
        }
    }
}
