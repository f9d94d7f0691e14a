#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/orpheus-val/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Resolve SEC EDGAR filings into canonical financial statements.
//!
//! This crate ties the workspace together: the core types, the
//! classifier, and the EDGAR fetch surface, behind one [`Pipeline`].
//!
//! # Example
//!
//! ```no_run
//! use filings::{Pipeline, PipelineConfig, StatementType, Ticker};
//!
//! #[tokio::main]
//! async fn main() -> filings::Result<()> {
//!     let pipeline = Pipeline::new(PipelineConfig::new("MyApp/1.0 (contact@example.com)"));
//!     let bundle = pipeline.run(&Ticker::new("AMZN")).await?;
//!
//!     if let Some(balance_sheet) = bundle.statements.get(&StatementType::BalanceSheet) {
//!         for row in balance_sheet.rows() {
//!             println!("{row:?}");
//!         }
//!     }
//!     for failure in &bundle.failures {
//!         eprintln!("unresolved {}: {}", failure.statement, failure.error);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core types and errors
pub use filings_core::*;

// Classification
pub use filings_match::{DEFAULT_THRESHOLD, Levenshtein, Similarity, StatementClassifier, TokenSort};

// Fetch surface
pub use filings_edgar::{EdgarClient, IssuerDirectory, IssuerRecord};

mod pipeline;
pub use pipeline::{
    DEFAULT_FORM_TYPE, FilingBundle, Pipeline, PipelineConfig, StatementFailure,
};
