//! Core data types for filing resolution.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Trading symbol of an issuer
//! - [`Cik`] - Fixed-width issuer identifier
//! - [`FilingRecord`] - One filing submission from the issuer's history
//! - [`SummaryEntry`] - One report entry from a filing-summary manifest
//! - [`StatementType`] - Canonical financial-statement categories
//! - [`Table`] - Ordered rows of cell strings from a statement document
//! - [`XbrlFact`] - A labeled fact series from the structured facts feed

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A ticker symbol.
///
/// Tickers are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A Central Index Key: the registry's fixed-width issuer identifier.
///
/// Always exactly ten digits, zero-padded on the left. The registry's
/// ticker directory publishes the numeric form without leading zeros.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK from the registry's numeric form, zero-padding to
    /// ten digits.
    #[must_use]
    pub fn from_numeric(raw: u64) -> Self {
        Self(format!("{raw:010}"))
    }

    /// Creates a CIK from a possibly short digit string, zero-padding to
    /// ten digits.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(format!("{raw:0>10}"))
    }

    /// Returns the zero-padded identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One filing submission from an issuer's filing history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Form type (e.g. "10-K", "10-Q").
    pub form_type: String,
    /// Accession number in the registry's hyphen-grouped form.
    pub accession_number: String,
    /// Primary document file name within the filing.
    pub primary_document: String,
    /// Date the filing was submitted.
    pub filing_date: NaiveDate,
    /// End of the period the filing covers. Missing on some older rows.
    pub report_date: Option<NaiveDate>,
}

impl FilingRecord {
    /// Returns the accession number with hyphens stripped, the form used
    /// in archive document URLs.
    #[must_use]
    pub fn accession_compact(&self) -> String {
        self.accession_number.chars().filter(|c| *c != '-').collect()
    }

    /// Returns the primary document name without its extension.
    #[must_use]
    pub fn primary_document_stem(&self) -> &str {
        self.primary_document
            .split_once('.')
            .map_or(self.primary_document.as_str(), |(stem, _)| stem)
    }
}

/// One report entry from a filing-summary manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Filer-chosen short name of the report.
    pub short_name: Option<String>,
    /// Long descriptive name of the report.
    pub long_name: Option<String>,
    /// File name of the report document within the filing.
    pub file_name: Option<String>,
}

impl SummaryEntry {
    /// Returns true if this entry looks like a financial-statement file:
    /// both names present, a non-empty file name, and a long name carrying
    /// the "Statement" token.
    #[must_use]
    pub fn is_statement_candidate(&self) -> bool {
        match (&self.short_name, &self.long_name, &self.file_name) {
            (Some(short), Some(long), Some(file)) => {
                !short.is_empty() && !file.is_empty() && long.contains("Statement")
            }
            _ => false,
        }
    }
}

/// Canonical financial-statement categories.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StatementType {
    /// Statement of financial position.
    BalanceSheet,
    /// Statement of operations/income.
    IncomeStatement,
    /// Statement of cash flows.
    CashFlowStatement,
}

impl StatementType {
    /// All canonical statement types, in resolution order.
    pub const ALL: [Self; 3] = [
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlowStatement,
    ];
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BalanceSheet => "balance sheet",
            Self::IncomeStatement => "income statement",
            Self::CashFlowStatement => "cash-flow statement",
        };
        write!(f, "{name}")
    }
}

/// Namespace prefix to URI mapping for one XML document.
///
/// The unprefixed default namespace, when declared, is stored under
/// [`DEFAULT_NAMESPACE_KEY`] so the map never carries an absent key.
pub type NamespaceMap = BTreeMap<String, String>;

/// Key under which a document's unprefixed default namespace is exposed.
pub const DEFAULT_NAMESPACE_KEY: &str = "default";

/// A role/definition pair extracted from a taxonomy schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyDefinition {
    /// URI of the disclosure role.
    pub role_uri: String,
    /// Descriptive label of the disclosure.
    pub label: String,
    /// Grouping token from the definition text (e.g. "Statement",
    /// "Disclosure"), when present.
    pub statement_group: Option<String>,
}

/// Tabular content of one statement document.
///
/// Rows and cells preserve document order exactly; no column reordering
/// is performed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Creates a table from a vector of rows.
    #[must_use]
    pub const fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Appends a row to the table.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Returns the rows in document order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the table and returns the underlying rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl IntoIterator for Table {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<Vec<String>> for Table {
    fn from_iter<I: IntoIterator<Item = Vec<String>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// One reported value with its period from the structured facts feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactPeriod {
    /// Start of the reporting period; absent for instant facts.
    pub start: Option<NaiveDate>,
    /// End of the reporting period.
    pub end: NaiveDate,
    /// Reported value.
    pub value: f64,
}

/// A labeled fact series keyed by accounting tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct XbrlFact {
    /// Accounting tag (e.g. "OperatingLeasePayments").
    pub tag: String,
    /// Declared label for the tag.
    pub label: String,
    /// Unit the values are reported in (e.g. "USD").
    pub unit: String,
    /// Reported values in feed order.
    pub values: Vec<FactPeriod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_uppercases() {
        assert_eq!(Ticker::new("amzn").as_str(), "AMZN");
        assert_eq!(Ticker::new("AMZN"), Ticker::new("amzn"));
    }

    #[test]
    fn cik_is_ten_digits() {
        let cik = Cik::from_numeric(320_193);
        assert_eq!(cik.as_str(), "0000320193");
        assert_eq!(cik.as_str().len(), 10);
        assert_eq!(Cik::new("320193"), cik);
    }

    #[test]
    fn accession_compact_strips_hyphens() {
        let record = FilingRecord {
            form_type: "10-K".into(),
            accession_number: "0001018724-24-000008".into(),
            primary_document: "amzn-20231231.htm".into(),
            filing_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            report_date: NaiveDate::from_ymd_opt(2023, 12, 31),
        };
        assert_eq!(record.accession_compact(), "000101872424000008");
        assert_eq!(record.primary_document_stem(), "amzn-20231231");
    }

    #[test]
    fn statement_candidate_predicate() {
        let entry = SummaryEntry {
            short_name: Some("Consolidated Balance Sheets".into()),
            long_name: Some("1001 - Statement - Consolidated Balance Sheets".into()),
            file_name: Some("R2.htm".into()),
        };
        assert!(entry.is_statement_candidate());

        let footnote = SummaryEntry {
            short_name: Some("Leases".into()),
            long_name: Some("2301 - Disclosure - Leases".into()),
            file_name: Some("R45.htm".into()),
        };
        assert!(!footnote.is_statement_candidate());

        let incomplete = SummaryEntry {
            short_name: Some("Consolidated Balance Sheets".into()),
            long_name: None,
            file_name: Some("R2.htm".into()),
        };
        assert!(!incomplete.is_statement_candidate());

        let no_file = SummaryEntry {
            short_name: Some("Consolidated Balance Sheets".into()),
            long_name: Some("Statement - Consolidated Balance Sheets".into()),
            file_name: Some(String::new()),
        };
        assert!(!no_file.is_statement_candidate());
    }

    #[test]
    fn table_round_trips_through_serde() {
        let table = Table::from_rows(vec![
            vec!["Total assets".into(), "527,854".into(), "462,675".into()],
            vec!["Total liabilities".into(), "325,979".into(), "316,632".into()],
        ]);
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), table.len());
        assert_eq!(back, table);
    }
}
