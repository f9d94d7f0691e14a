#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/orpheus-val/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Statement classification for EDGAR filing resolution.
//!
//! Filer-chosen report names are noisy and inconsistently labeled across
//! issuers and filing vintages. This crate bridges them to the canonical
//! statement types with:
//!
//! - [`StatementClassifier`] - exact synonym match, then fuzzy fallback
//! - [`Similarity`] - pluggable 0-100 string-similarity scoring
//! - [`Levenshtein`] / [`TokenSort`] - bundled scorers
//!
//! # Example
//!
//! ```
//! use filings_core::{StatementType, SynonymTable};
//! use filings_match::StatementClassifier;
//! use std::collections::HashMap;
//!
//! let classifier = StatementClassifier::new(SynonymTable::default());
//! let candidates: HashMap<String, String> =
//!     [("consolidated balance sheets".to_string(), "R2.htm".to_string())]
//!         .into_iter()
//!         .collect();
//!
//! let file = classifier.classify(StatementType::BalanceSheet, &candidates).unwrap();
//! assert_eq!(file, "R2.htm");
//! ```

/// Two-phase statement classification.
pub mod classifier;
/// String-similarity primitives.
pub mod similarity;

pub use classifier::{DEFAULT_THRESHOLD, StatementClassifier};
pub use similarity::{Levenshtein, Similarity, TokenSort, normalize};
