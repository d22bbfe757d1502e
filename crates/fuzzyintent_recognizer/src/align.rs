//! Weighted token alignment.
//!
//! Finds the order-preserving pairing of query tokens with example tokens
//! that maximizes the summed similarity of the paired words. A pair is only
//! eligible when its similarity reaches the configured minimum; unpaired
//! tokens on either side contribute nothing.
//!
//! The score is normalized by the combined length, so extra or missing words
//! lower it:
//!
//! ```text
//! score = 2 * S / (|query| + |example|)
//! ```

/// Result of aligning a query with one example.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alignment {
    /// Normalized score in `[0, 1]`.
    pub score: f64,
    /// Summed similarity of the paired tokens.
    pub weight: f64,
    /// `(query index, example index)` pairs in increasing order.
    pub pairs: Vec<(usize, usize)>,
}

impl Alignment {
    /// Query positions aligned to example positions in `start..end`.
    pub fn query_positions(&self, start: usize, end: usize) -> impl Iterator<Item = usize> + '_ {
        self.pairs
            .iter()
            .filter(move |(_, e)| (start..end).contains(e))
            .map(|&(q, _)| q)
    }
}

/// Upper bound on the score of any alignment between these lengths.
#[must_use]
pub fn score_bound(query_len: usize, example_len: usize) -> f64 {
    let total = query_len + example_len;
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let bound = 2.0 * query_len.min(example_len) as f64 / total as f64;
    bound
}

/// Aligns `query_len` query tokens with `example_len` example tokens.
///
/// `similarity(q, e)` scores query token `q` against example token `e`.
/// Pairs scoring below `min_similarity` are never aligned.
pub fn align(
    query_len: usize,
    example_len: usize,
    min_similarity: f64,
    mut similarity: impl FnMut(usize, usize) -> f64,
) -> Alignment {
    if query_len == 0 || example_len == 0 {
        return Alignment::default();
    }

    let width = example_len + 1;
    let mut best = vec![0.0f64; (query_len + 1) * width];
    let mut pair = vec![f64::NEG_INFINITY; (query_len + 1) * width];

    for q in 1..=query_len {
        for e in 1..=example_len {
            let sim = similarity(q - 1, e - 1);
            let at = q * width + e;
            let up = best[at - width];
            let left = best[at - 1];
            let mut value = up.max(left);
            if sim >= min_similarity {
                let diagonal = best[at - width - 1] + sim;
                pair[at] = diagonal;
                value = value.max(diagonal);
            }
            best[at] = value;
        }
    }

    // Walk back, preferring a pair, then skipping a query token.
    let mut pairs = Vec::new();
    let (mut q, mut e) = (query_len, example_len);
    while q > 0 && e > 0 {
        let at = q * width + e;
        if pair[at] >= best[at] {
            pairs.push((q - 1, e - 1));
            q -= 1;
            e -= 1;
        } else if best[at - width] >= best[at] {
            q -= 1;
        } else {
            e -= 1;
        }
    }
    pairs.reverse();

    let weight = best[query_len * width + example_len];
    #[allow(clippy::cast_precision_loss)]
    let score = 2.0 * weight / (query_len + example_len) as f64;
    Alignment {
        score,
        weight,
        pairs,
    }
}
