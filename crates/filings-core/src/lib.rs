#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/orpheus-val/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for EDGAR filing resolution.
//!
//! This crate provides the foundational types shared across the workspace:
//!
//! - [`Ticker`](types::Ticker) / [`Cik`](types::Cik) - issuer identity
//! - [`FilingRecord`](types::FilingRecord) - one filing submission
//! - [`StatementType`](types::StatementType) - canonical statement categories
//! - [`SynonymTable`](synonyms::SynonymTable) - classifier vocabulary
//! - [`Table`](types::Table) / [`XbrlFact`](types::XbrlFact) - resolved output
//! - [`XmlNode`](xml::XmlNode) - typed XML document nodes
//! - [`ResolveError`](error::ResolveError) - error taxonomy

/// Error types for filing resolution.
pub mod error;
/// Synonym vocabulary for statement classification.
pub mod synonyms;
/// Core data types (Ticker, Cik, FilingRecord, Table, etc.).
pub mod types;
/// Typed recursive XML document nodes.
pub mod xml;

// Re-export commonly used items at crate root
pub use error::{ResolveError, Result};
pub use synonyms::SynonymTable;
pub use types::{
    Cik, DEFAULT_NAMESPACE_KEY, FactPeriod, FilingRecord, NamespaceMap, StatementType,
    SummaryEntry, Table, TaxonomyDefinition, Ticker, XbrlFact,
};
pub use xml::XmlNode;
