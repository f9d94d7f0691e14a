//! Statement document fetching and table extraction.
//!
//! Classified statement files arrive in one of two renderings: an HTML
//! report (`R*.htm`) or the older XML report (`R*.xml`). Both reduce to
//! the same [`Table`] of cell strings in document order; the extension
//! picks the extractor.

use scraper::{Html, Selector};
use tracing::debug;

use filings_core::{Cik, FilingRecord, ResolveError, Result, Table, XmlNode};

use crate::client::EdgarClient;

/// Extracts a table from a statement document, dispatching on the file
/// extension.
///
/// A document with no tabular rows is an error: a statement file that
/// renders to nothing is indistinguishable from a fetch of the wrong
/// document.
pub fn extract_table(file_name: &str, body: &str) -> Result<Table> {
    let table = if file_name.ends_with(".xml") {
        extract_xml_table(body)?
    } else {
        extract_html_table(body)
    };
    if table.is_empty() {
        return Err(ResolveError::StatementFetch(format!(
            "no tabular rows in {file_name}"
        )));
    }
    Ok(table)
}

/// Extracts rows from an HTML report.
///
/// Every `tr` becomes one row; header and data cells are taken together
/// in document order so label columns stay aligned with their values.
fn extract_html_table(body: &str) -> Table {
    let document = Html::parse_document(body);
    let row_selector = Selector::parse("tr").expect("static selector");
    let cell_selector = Selector::parse("th,td").expect("static selector");

    let mut table = Table::new();
    for tr in document.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .map(|cell| normalize_cell(&cell.text().collect::<String>()))
            .collect();
        if cells.iter().any(|c| !c.is_empty()) {
            table.push_row(cells);
        }
    }
    table
}

/// Extracts rows from an XML report.
///
/// Each `Row` element becomes one row: its label followed by one cell
/// per `Cell` child. The registry spells the text element
/// "NonNumbericText"; both spellings are accepted.
fn extract_xml_table(body: &str) -> Result<Table> {
    let root = XmlNode::parse(body)
        .map_err(|e| ResolveError::StatementFetch(format!("statement document: {e}")))?;

    let mut table = Table::new();
    for row in root.descendants().filter(|n| n.local_name() == "Row") {
        let mut cells = Vec::new();
        if let Some(label) = row.child("Label").and_then(XmlNode::text) {
            cells.push(normalize_cell(label));
        }
        for cell in collect_cells(row) {
            cells.push(cell_value(cell));
        }
        if cells.iter().any(|c| !c.is_empty()) {
            table.push_row(cells);
        }
    }
    Ok(table)
}

fn collect_cells(row: &XmlNode) -> Vec<&XmlNode> {
    match row.child("Cells") {
        Some(cells) => cells.children_named("Cell").collect(),
        None => row.children_named("Cell").collect(),
    }
}

fn cell_value(cell: &XmlNode) -> String {
    for name in ["RoundedNumericAmount", "NumericAmount", "NonNumbericText", "NonNumericText"] {
        if let Some(text) = cell.child(name).and_then(XmlNode::text) {
            return normalize_cell(text);
        }
    }
    String::new()
}

/// Collapses runs of whitespace (including non-breaking spaces) and
/// trims.
fn normalize_cell(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl EdgarClient {
    /// Fetches a statement document from a filing's archive directory and
    /// extracts its table.
    pub async fn fetch_statement(
        &self,
        cik: &Cik,
        filing: &FilingRecord,
        file_name: &str,
    ) -> Result<Table> {
        let url = self.archive_url(cik, filing, file_name);
        debug!(%cik, %url, "fetching statement document");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::StatementFetch(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let table = extract_table(file_name, &body)?;
        debug!(rows = table.len(), file_name, "statement extracted");
        Ok(table)
    }
}
