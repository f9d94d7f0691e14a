//! Error types for filing resolution.
//!
//! This module defines [`ResolveError`] which covers all error cases that can
//! occur while locating, classifying, or fetching filing documents.

use thiserror::Error;

use crate::types::StatementType;

/// Errors that can occur during filing resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The ticker symbol has no entry in the issuer directory.
    #[error("No CIK found for ticker {0}")]
    IssuerNotFound(String),

    /// The issuer directory itself could not be fetched.
    ///
    /// The directory cache is left unpopulated; callers must retry the load
    /// before lookups can succeed.
    #[error("Issuer directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// No filing of the requested form type exists in the issuer's history.
    #[error("No {form_type} filing found for CIK {cik}")]
    FilingNotFound {
        /// The issuer identifier that was searched.
        cik: String,
        /// The form type that was requested (e.g. "10-K").
        form_type: String,
    },

    /// The filing's summary manifest could not be fetched.
    #[error("Filing summary unavailable: {0}")]
    FilingSummaryUnavailable(String),

    /// No manifest entry could be classified as the requested statement type.
    #[error("No statement file resolved for {0}")]
    StatementNotFound(StatementType),

    /// A document's namespace declarations could not be resolved.
    #[error("Namespace resolution failed: {0}")]
    NamespaceResolution(String),

    /// The filing's taxonomy schema could not be fetched or parsed.
    #[error("Taxonomy schema error: {0}")]
    TaxonomySchema(String),

    /// A statement document could not be fetched or parsed into a table.
    #[error("Statement fetch failed: {0}")]
    StatementFetch(String),

    /// Transport-level failure (connection error, timeout, 5xx after retries).
    #[error("Network error: {0}")]
    Network(String),

    /// The registry rejected the request rate.
    #[error("Rate limited: retry after {retry_after:?}")]
    RateLimited {
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// The caller-supplied deadline elapsed before the pipeline finished.
    #[error("Pipeline deadline of {0:?} elapsed")]
    PipelineTimeout(std::time::Duration),

    /// Error parsing a payload from the registry.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ResolveError {
    /// Returns true for failure classes where a retry may succeed.
    ///
    /// Permanent failures (missing issuers, 404s surfaced as component
    /// errors, malformed payloads) are never retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

/// Result type alias using [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;
