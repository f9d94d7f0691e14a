//! Two-phase statement classification: exact synonyms, then fuzzy fallback.

use std::collections::HashMap;

use tracing::debug;

use filings_core::{ResolveError, Result, StatementType, SynonymTable};

use crate::similarity::{Levenshtein, Similarity, normalize};

/// Default minimum similarity score for a fuzzy classification.
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Maps a manifest's statement short names to canonical statement types.
///
/// Exact synonym coverage cannot be exhaustive across thousands of issuers
/// ("Consolidated Balance Sheets - Southern"), so classification runs in
/// two phases: exact normalized match against the requested type's synonym
/// list in priority order, then a fuzzy pass over the union vocabulary of
/// all types. The union matters: a candidate whose best fuzzy match belongs
/// to a *different* type is a cross-type collision and is rejected rather
/// than guessed at.
#[derive(Debug)]
pub struct StatementClassifier {
    synonyms: SynonymTable,
    threshold: u8,
    similarity: Box<dyn Similarity>,
}

impl StatementClassifier {
    /// Creates a classifier over the given synonym table with the default
    /// threshold and edit-distance scorer.
    #[must_use]
    pub fn new(synonyms: SynonymTable) -> Self {
        Self {
            synonyms,
            threshold: DEFAULT_THRESHOLD,
            similarity: Box::new(Levenshtein),
        }
    }

    /// Overrides the minimum fuzzy-match score (0-100).
    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Swaps in an alternative similarity algorithm.
    #[must_use]
    pub fn with_similarity(mut self, similarity: Box<dyn Similarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Resolves the file name for one canonical statement type.
    ///
    /// `candidates` maps manifest short names to file names, as produced by
    /// the filing-summary resolver. Fails with
    /// [`ResolveError::StatementNotFound`] when no candidate matches exactly
    /// and no candidate clears the fuzzy threshold for the requested type.
    pub fn classify(
        &self,
        statement: StatementType,
        candidates: &HashMap<String, String>,
    ) -> Result<String> {
        // Normalized candidates, sorted for deterministic iteration.
        let mut normalized: Vec<(String, &str)> = candidates
            .iter()
            .map(|(short_name, file)| (normalize(short_name), file.as_str()))
            .collect();
        normalized.sort_unstable();

        // Phase 1: exact match in synonym priority order.
        for phrase in self.synonyms.phrases(statement) {
            let phrase = normalize(phrase);
            if let Some((_, file)) = normalized.iter().find(|(name, _)| *name == phrase) {
                debug!(%statement, %phrase, file, "exact synonym match");
                return Ok((*file).to_owned());
            }
        }

        // Phase 2: best fuzzy match over the union vocabulary.
        let mut best: Option<FuzzyHit<'_>> = None;
        for (name, file) in &normalized {
            for (vocab_type, phrase) in self.synonyms.vocabulary() {
                let score = self.similarity.score(name, &normalize(phrase));
                let better = match &best {
                    Some(hit) => {
                        score > hit.score
                            || (score == hit.score
                                && vocab_type == statement
                                && hit.statement != statement)
                    }
                    None => true,
                };
                if better {
                    best = Some(FuzzyHit {
                        score,
                        statement: vocab_type,
                        candidate: name,
                        file,
                    });
                }
            }
        }

        match best {
            Some(hit) if hit.score >= self.threshold && hit.statement == statement => {
                debug!(
                    %statement,
                    candidate = hit.candidate,
                    score = hit.score,
                    file = hit.file,
                    "fuzzy match"
                );
                Ok(hit.file.to_owned())
            }
            Some(hit) => {
                debug!(
                    requested = %statement,
                    candidate = hit.candidate,
                    score = hit.score,
                    matched = %hit.statement,
                    "no acceptable match"
                );
                Err(ResolveError::StatementNotFound(statement))
            }
            None => Err(ResolveError::StatementNotFound(statement)),
        }
    }
}

struct FuzzyHit<'a> {
    score: u8,
    statement: StatementType,
    candidate: &'a str,
    file: &'a str,
}
