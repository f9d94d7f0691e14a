//! Filing-summary manifest resolution.
//!
//! `FilingSummary.xml` indexes every report and exhibit within a filing.
//! Only entries that look like financial-statement files survive here:
//! both names present, a non-empty file name, and a long name carrying the
//! "Statement" token. The result maps lower-cased short names to file
//! names for the classifier.

use std::collections::HashMap;

use tracing::debug;

use filings_core::{Cik, FilingRecord, ResolveError, Result, SummaryEntry, XmlNode};

use crate::client::EdgarClient;

/// File name of the manifest within a filing's archive directory.
pub const FILING_SUMMARY_FILE: &str = "FilingSummary.xml";

/// Parses a filing-summary manifest into its report entries.
///
/// Entries keep their optional fields; candidate filtering happens in
/// [`statement_candidates`].
pub fn parse_summary(body: &str) -> Result<Vec<SummaryEntry>> {
    let root = XmlNode::parse(body)
        .map_err(|e| ResolveError::Parse(format!("filing summary: {e}")))?;
    let reports = root
        .child("MyReports")
        .map(|r| r.children_named("Report").collect::<Vec<_>>())
        .unwrap_or_default();

    let entries = reports
        .into_iter()
        .map(|report| SummaryEntry {
            short_name: child_text(report, "ShortName"),
            long_name: child_text(report, "LongName"),
            file_name: child_text(report, "HtmlFileName")
                .or_else(|| child_text(report, "XmlFileName")),
        })
        .collect();
    Ok(entries)
}

fn child_text(node: &XmlNode, name: &str) -> Option<String> {
    node.child(name).and_then(|c| c.text()).map(ToOwned::to_owned)
}

/// Restricts manifest entries to statement candidates, keyed by
/// lower-cased short name.
///
/// An empty map is a valid outcome (a manifest with no statement-like
/// entries); it surfaces later as `StatementNotFound` per statement type.
#[must_use]
pub fn statement_candidates(entries: &[SummaryEntry]) -> HashMap<String, String> {
    let mut candidates = HashMap::new();
    for entry in entries {
        if !entry.is_statement_candidate() {
            continue;
        }
        // Fields are present: the predicate checked them.
        if let (Some(short), Some(file)) = (&entry.short_name, &entry.file_name) {
            candidates.insert(short.to_lowercase(), file.clone());
        }
    }
    candidates
}

impl EdgarClient {
    /// Fetches a filing's summary manifest and returns its statement
    /// candidates.
    pub async fn filing_summary(
        &self,
        cik: &Cik,
        filing: &FilingRecord,
    ) -> Result<HashMap<String, String>> {
        let url = self.archive_url(cik, filing, FILING_SUMMARY_FILE);
        debug!(%cik, %url, "fetching filing summary");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::FilingSummaryUnavailable(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let entries = parse_summary(&body)?;
        let candidates = statement_candidates(&entries);
        debug!(
            reports = entries.len(),
            candidates = candidates.len(),
            "filing summary resolved"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<FilingSummary>
  <Version>3.24.0</Version>
  <MyReports>
    <Report instance="amzn-20231231.htm">
      <IsDefault>false</IsDefault>
      <ShortName>Consolidated Balance Sheets</ShortName>
      <LongName>1003 - Statement - Consolidated Balance Sheets</LongName>
      <HtmlFileName>R4.htm</HtmlFileName>
    </Report>
    <Report instance="amzn-20231231.htm">
      <ShortName>Consolidated Statements of Operations</ShortName>
      <LongName>1001 - Statement - Consolidated Statements of Operations</LongName>
      <HtmlFileName>R2.htm</HtmlFileName>
    </Report>
    <Report instance="amzn-20231231.htm">
      <ShortName>Leases</ShortName>
      <LongName>2310 - Disclosure - Leases</LongName>
      <HtmlFileName>R40.htm</HtmlFileName>
    </Report>
    <Report instance="amzn-20231231.htm">
      <ShortName>Consolidated Statements of Cash Flows</ShortName>
      <LongName>1000 - Statement - Consolidated Statements of Cash Flows</LongName>
      <XmlFileName>R1.xml</XmlFileName>
    </Report>
    <Report>
      <LongName>9999 - Statement - Orphaned</LongName>
      <HtmlFileName>R99.htm</HtmlFileName>
    </Report>
  </MyReports>
</FilingSummary>"#;

    #[test]
    fn parses_all_report_entries() {
        let entries = parse_summary(SUMMARY).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[0].short_name.as_deref(),
            Some("Consolidated Balance Sheets")
        );
        assert_eq!(entries[3].file_name.as_deref(), Some("R1.xml"));
    }

    #[test]
    fn candidates_keep_statements_only() {
        let entries = parse_summary(SUMMARY).unwrap();
        let candidates = statement_candidates(&entries);

        assert_eq!(candidates.len(), 3);
        assert_eq!(
            candidates.get("consolidated balance sheets").map(String::as_str),
            Some("R4.htm")
        );
        assert_eq!(
            candidates
                .get("consolidated statements of cash flows")
                .map(String::as_str),
            Some("R1.xml")
        );
        // Disclosure entry and the nameless entry are excluded.
        assert!(!candidates.contains_key("leases"));
    }

    #[test]
    fn manifest_without_statements_is_empty_not_an_error() {
        let body = r#"<FilingSummary><MyReports>
            <Report>
              <ShortName>Cover Page</ShortName>
              <LongName>0000 - Document - Cover Page</LongName>
              <HtmlFileName>R1.htm</HtmlFileName>
            </Report>
        </MyReports></FilingSummary>"#;
        let entries = parse_summary(body).unwrap();
        assert!(statement_candidates(&entries).is_empty());
    }

    #[test]
    fn malformed_manifest_is_a_parse_error() {
        assert!(matches!(
            parse_summary("<FilingSummary>").unwrap_err(),
            ResolveError::Parse(_)
        ));
    }
}
