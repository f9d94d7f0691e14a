//! Extension taxonomy schema resolution.
//!
//! Each filing ships a taxonomy schema (`{stem}.xsd`) declaring the
//! disclosure roles the filer used. The role definitions follow a
//! loose `"<sort code> - <group> - <label>"` convention; the group token
//! ("Statement", "Disclosure", "Document") separates the financial
//! statements from footnotes and cover pages.

use std::collections::BTreeSet;

use tracing::debug;

use filings_core::{Cik, FilingRecord, ResolveError, Result, TaxonomyDefinition, XmlNode};

use crate::client::EdgarClient;

/// Parses a taxonomy schema into its role definitions.
///
/// Roles without a definition text are skipped; a definition that does
/// not follow the three-part convention keeps its full text as the label
/// with no group.
pub fn parse_taxonomy(body: &str) -> Result<Vec<TaxonomyDefinition>> {
    let root = XmlNode::parse(body)
        .map_err(|e| ResolveError::TaxonomySchema(format!("taxonomy schema: {e}")))?;

    let mut definitions = Vec::new();
    for node in root.descendants() {
        if node.local_name() != "roleType" {
            continue;
        }
        let Some(role_uri) = node.attr("roleURI") else {
            continue;
        };
        let Some(text) = node.child("definition").and_then(XmlNode::text) else {
            continue;
        };

        let mut parts = text.splitn(3, " - ");
        let (label, statement_group) = match (parts.next(), parts.next(), parts.next()) {
            (Some(_sort), Some(group), Some(label)) => {
                (label.trim().to_owned(), Some(group.trim().to_owned()))
            }
            _ => (text.trim().to_owned(), None),
        };
        definitions.push(TaxonomyDefinition {
            role_uri: role_uri.to_owned(),
            label,
            statement_group,
        });
    }
    Ok(definitions)
}

/// Returns the labels whose text contains the query, case-insensitively.
///
/// The result is a sorted set, so repeated queries are deterministic.
#[must_use]
pub fn find_by_substring<'a>(
    definitions: &'a [TaxonomyDefinition],
    query: &str,
) -> BTreeSet<&'a str> {
    let needle = query.to_lowercase();
    definitions
        .iter()
        .filter(|d| d.label.to_lowercase().contains(&needle))
        .map(|d| d.label.as_str())
        .collect()
}

impl EdgarClient {
    /// Fetches a filing's taxonomy schema and extracts its role
    /// definitions.
    pub async fn taxonomy_definitions(
        &self,
        cik: &Cik,
        filing: &FilingRecord,
    ) -> Result<Vec<TaxonomyDefinition>> {
        let url = self.schema_url(cik, filing);
        debug!(%cik, %url, "fetching taxonomy schema");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::TaxonomySchema(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let definitions = parse_taxonomy(&body)?;
        debug!(roles = definitions.len(), "taxonomy schema resolved");
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
            xmlns:link="http://www.xbrl.org/2003/linkbase">
  <xsd:annotation>
    <xsd:appinfo>
      <link:roleType roleURI="http://www.amazon.com/role/ConsolidatedBalanceSheets" id="r1">
        <link:definition>1003 - Statement - Consolidated Balance Sheets</link:definition>
        <link:usedOn>link:presentationLink</link:usedOn>
      </link:roleType>
      <link:roleType roleURI="http://www.amazon.com/role/Leases" id="r2">
        <link:definition>2310 - Disclosure - Leases</link:definition>
      </link:roleType>
      <link:roleType roleURI="http://www.amazon.com/role/CoverPage" id="r3">
        <link:definition>0001 - Document - Cover Page</link:definition>
      </link:roleType>
      <link:roleType roleURI="http://www.amazon.com/role/Unconventional" id="r4">
        <link:definition>Free-form definition</link:definition>
      </link:roleType>
      <link:roleType roleURI="http://www.amazon.com/role/NoDefinition" id="r5"/>
    </xsd:appinfo>
  </xsd:annotation>
</xsd:schema>"#;

    #[test]
    fn splits_definitions_into_group_and_label() {
        let definitions = parse_taxonomy(SCHEMA).unwrap();
        assert_eq!(definitions.len(), 4);

        let balance = &definitions[0];
        assert_eq!(
            balance.role_uri,
            "http://www.amazon.com/role/ConsolidatedBalanceSheets"
        );
        assert_eq!(balance.label, "Consolidated Balance Sheets");
        assert_eq!(balance.statement_group.as_deref(), Some("Statement"));

        let leases = &definitions[1];
        assert_eq!(leases.statement_group.as_deref(), Some("Disclosure"));
    }

    #[test]
    fn unconventional_definition_keeps_full_text() {
        let definitions = parse_taxonomy(SCHEMA).unwrap();
        let free_form = &definitions[3];
        assert_eq!(free_form.label, "Free-form definition");
        assert_eq!(free_form.statement_group, None);
    }

    #[test]
    fn substring_search_is_case_insensitive_and_sorted() {
        let definitions = parse_taxonomy(SCHEMA).unwrap();
        let hits = find_by_substring(&definitions, "balance");
        assert_eq!(
            hits.into_iter().collect::<Vec<_>>(),
            ["Consolidated Balance Sheets"]
        );
        assert!(find_by_substring(&definitions, "goodwill").is_empty());
    }

    #[test]
    fn malformed_schema_is_a_taxonomy_error() {
        assert!(matches!(
            parse_taxonomy("<xsd:schema>").unwrap_err(),
            ResolveError::TaxonomySchema(_)
        ));
    }
}
