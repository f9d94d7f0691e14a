//! Filing history normalization and target-filing selection.
//!
//! The submissions endpoint publishes the filing history as parallel
//! arrays. Those are normalized into [`FilingRecord`]s here, then the
//! target filing is selected by reporting period rather than submission
//! date: downstream valuation wants the freshest *reporting period*, so
//! `report_date` is the primary key, with `filing_date` and accession
//! number as deterministic tie-breaks.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use filings_core::{Cik, FilingRecord, ResolveError, Result};

use crate::client::EdgarClient;

/// Submissions payload: the history lives under `filings.recent`.
#[derive(Debug, Deserialize)]
struct Submissions {
    filings: Filings,
}

#[derive(Debug, Deserialize)]
struct Filings {
    recent: RecentFilings,
}

/// Parallel arrays, one entry per filing. Some vintages omit columns.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RecentFilings {
    accession_number: Vec<String>,
    form: Vec<String>,
    filing_date: Vec<String>,
    report_date: Vec<String>,
    primary_document: Vec<String>,
}

/// Parses a submissions payload into filing records.
///
/// Rows with an unparsable filing date are dropped; an empty or missing
/// report date becomes `None` and sorts below any dated row.
pub fn parse_submissions(body: &str) -> Result<Vec<FilingRecord>> {
    let submissions: Submissions = serde_json::from_str(body)
        .map_err(|e| ResolveError::Parse(format!("submissions: {e}")))?;
    let recent = submissions.filings.recent;

    let len = recent
        .accession_number
        .len()
        .min(recent.form.len())
        .min(recent.filing_date.len());

    let mut records = Vec::with_capacity(len);
    for i in 0..len {
        let Ok(filing_date) = NaiveDate::parse_from_str(&recent.filing_date[i], "%Y-%m-%d")
        else {
            continue;
        };
        let report_date = recent
            .report_date
            .get(i)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        records.push(FilingRecord {
            form_type: recent.form[i].clone(),
            accession_number: recent.accession_number[i].clone(),
            primary_document: recent.primary_document.get(i).cloned().unwrap_or_default(),
            filing_date,
            report_date,
        });
    }
    Ok(records)
}

/// Selects the target filing of the requested form type.
///
/// Deterministic: maximum `report_date`, ties broken by maximum
/// `filing_date`, then by the lexicographically greatest accession number.
pub fn select_filing(
    cik: &Cik,
    records: &[FilingRecord],
    form_type: &str,
) -> Result<FilingRecord> {
    records
        .iter()
        .filter(|r| r.form_type == form_type)
        .max_by_key(|r| (r.report_date, r.filing_date, &r.accession_number))
        .cloned()
        .ok_or_else(|| ResolveError::FilingNotFound {
            cik: cik.to_string(),
            form_type: form_type.to_owned(),
        })
}

impl EdgarClient {
    /// Fetches and normalizes an issuer's full filing history.
    pub async fn filing_history(&self, cik: &Cik) -> Result<Vec<FilingRecord>> {
        let url = self.submissions_url(cik);
        debug!(%cik, %url, "fetching filing history");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::FilingNotFound {
                cik: cik.to_string(),
                form_type: format!("HTTP {}", response.status()),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        parse_submissions(&body)
    }

    /// Fetches the filing history and selects the latest filing of the
    /// requested form type.
    pub async fn latest_filing(&self, cik: &Cik, form_type: &str) -> Result<FilingRecord> {
        let records = self.filing_history(cik).await?;
        select_filing(cik, &records, form_type)
    }
}
