//! XBRL instance-document namespace resolution.
//!
//! Filers prefix their extension taxonomies inconsistently (`amzn:`,
//! `aapl:`, sometimes none at all). The namespace declarations on the
//! instance document's root element map those prefixes to stable URIs so
//! downstream consumers can address tags without guessing prefixes.

use tracing::debug;

use filings_core::{
    Cik, DEFAULT_NAMESPACE_KEY, FilingRecord, NamespaceMap, ResolveError, Result, XmlNode,
};

use crate::client::EdgarClient;

/// Extracts the namespace declarations from a document's root element.
///
/// Prefixed declarations (`xmlns:us-gaap="..."`) are keyed by prefix; an
/// unprefixed default declaration is keyed by [`DEFAULT_NAMESPACE_KEY`].
/// Declarations below the root are ignored.
pub fn parse_namespaces(body: &str) -> Result<NamespaceMap> {
    let root = XmlNode::parse(body)
        .map_err(|e| ResolveError::NamespaceResolution(format!("instance document: {e}")))?;

    let mut namespaces = NamespaceMap::new();
    for (key, value) in &root.attributes {
        if key == "xmlns" {
            namespaces.insert(DEFAULT_NAMESPACE_KEY.to_owned(), value.clone());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.insert(prefix.to_owned(), value.clone());
        }
    }
    Ok(namespaces)
}

impl EdgarClient {
    /// Fetches a filing's XBRL instance document and resolves its
    /// namespace declarations.
    pub async fn document_namespaces(
        &self,
        cik: &Cik,
        filing: &FilingRecord,
    ) -> Result<NamespaceMap> {
        let url = self.instance_document_url(cik, filing);
        debug!(%cik, %url, "fetching instance document");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::NamespaceResolution(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let namespaces = parse_namespaces(&body)?;
        debug!(prefixes = namespaces.len(), "namespaces resolved");
        Ok(namespaces)
    }
}
