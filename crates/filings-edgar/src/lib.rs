#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/orpheus-val/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR fetch surface for filing resolution.
//!
//! Everything that touches the network lives here, behind one
//! rate-limited [`EdgarClient`]:
//!
//! - [`IssuerDirectory`](directory::IssuerDirectory) - ticker to CIK lookup
//! - [`filing_history`](EdgarClient::filing_history) / [`latest_filing`](EdgarClient::latest_filing) - filing index
//! - [`filing_summary`](EdgarClient::filing_summary) - statement candidates
//! - [`document_namespaces`](EdgarClient::document_namespaces) - instance namespaces
//! - [`taxonomy_definitions`](EdgarClient::taxonomy_definitions) - role definitions
//! - [`fetch_statement`](EdgarClient::fetch_statement) - statement tables
//! - [`company_facts`](EdgarClient::company_facts) - structured facts
//!
//! Every fetch has a pure `parse_*` counterpart so payloads can be
//! exercised offline.

/// Rate-limited, retrying HTTP client for the EDGAR endpoints.
pub mod client;
/// Process-wide issuer directory (ticker to CIK).
pub mod directory;
/// Structured fact extraction from the company-facts feed.
pub mod facts;
/// Filing history normalization and target-filing selection.
pub mod index;
/// Instance-document namespace resolution.
pub mod namespace;
/// Statement document fetching and table extraction.
pub mod statement;
/// Filing-summary manifest resolution.
pub mod summary;
/// Extension taxonomy schema resolution.
pub mod taxonomy;

// Re-export commonly used items at crate root
pub use client::{COMPANY_TICKERS_URL, EDGAR_ARCHIVES_URL, EDGAR_DATA_URL, EdgarClient};
pub use directory::{IssuerDirectory, IssuerRecord, parse_directory};
pub use facts::parse_company_facts;
pub use index::{parse_submissions, select_filing};
pub use namespace::parse_namespaces;
pub use statement::extract_table;
pub use summary::{FILING_SUMMARY_FILE, parse_summary, statement_candidates};
pub use taxonomy::{find_by_substring, parse_taxonomy};
