//! String-similarity primitives for fuzzy label matching.
//!
//! Scores live on a 0-100 scale where 100 means identical after
//! normalization. The algorithm is pluggable behind [`Similarity`] so the
//! classifier's control logic never changes when the scoring does.

use std::fmt::Debug;

/// Normalizes a label for comparison: lowercase, collapse internal
/// whitespace, trim.
#[must_use]
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A string-similarity scorer over normalized inputs.
pub trait Similarity: Debug + Send + Sync {
    /// Scores two normalized strings on a 0-100 scale (100 = identical).
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Normalized edit-distance ratio: `100 * (1 - levenshtein / max_len)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Levenshtein;

impl Similarity for Levenshtein {
    fn score(&self, a: &str, b: &str) -> u8 {
        if a == b {
            return 100;
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let max_len = a.len().max(b.len());
        if max_len == 0 {
            return 100;
        }
        let distance = levenshtein(&a, &b);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ratio = (100.0 * (1.0 - distance as f64 / max_len as f64)).round() as u8;
        ratio
    }
}

/// Order-insensitive variant: whitespace tokens are sorted before the
/// edit-distance ratio is taken, so "sheets balance" still matches
/// "balance sheets".
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenSort;

impl Similarity for TokenSort {
    fn score(&self, a: &str, b: &str) -> u8 {
        Levenshtein.score(&sort_tokens(a), &sort_tokens(b))
    }
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Classic two-row Levenshtein distance over char sequences.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(
            normalize("  CONSOLIDATED   Balance\tSheets "),
            "consolidated balance sheets"
        );
    }

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(Levenshtein.score("balance sheet", "balance sheet"), 100);
        assert_eq!(Levenshtein.score("", ""), 100);
    }

    #[test]
    fn singular_plural_scores_high() {
        let score = Levenshtein.score(
            "consolidated balance sheet",
            "consolidated balance sheets",
        );
        assert!(score >= 90, "score was {score}");
    }

    #[test]
    fn unrelated_labels_score_low() {
        let score = Levenshtein.score(
            "segment reporting disclosure",
            "consolidated balance sheets",
        );
        assert!(score < 50, "score was {score}");
    }

    #[test]
    fn token_sort_ignores_word_order() {
        assert_eq!(TokenSort.score("sheets balance", "balance sheets"), 100);
        assert!(Levenshtein.score("sheets balance", "balance sheets") < 100);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = "statement of operations";
        let b = "statements of cash flows";
        assert_eq!(Levenshtein.score(a, b), Levenshtein.score(b, a));
    }
}
