//! Process-wide issuer directory: ticker to CIK lookup.
//!
//! The registry publishes one directory file covering every listed issuer.
//! It is loaded at most once per process (lazily, with an explicit
//! [`IssuerDirectory::reload`] to invalidate) and held read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use filings_core::{Cik, ResolveError, Result, Ticker};

use crate::client::{COMPANY_TICKERS_URL, EdgarClient};

/// One issuer from the directory snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerRecord {
    /// Ticker symbol, uppercased.
    pub ticker: String,
    /// Ten-digit issuer identifier.
    pub cik: Cik,
    /// Registered company name.
    pub name: String,
}

/// Directory row as published: numeric CIK without leading zeros.
#[derive(Debug, Deserialize)]
struct DirectoryRow {
    cik_str: u64,
    ticker: String,
    title: String,
}

/// Lazily loaded ticker directory with case-insensitive lookup.
#[derive(Debug, Default)]
pub struct IssuerDirectory {
    // Keyed by uppercased ticker. None until the first successful load.
    entries: RwLock<Option<HashMap<String, IssuerRecord>>>,
}

impl IssuerDirectory {
    /// Creates an empty, unloaded directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide directory instance.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<IssuerDirectory> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Returns true once a snapshot has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.entries.read().await.is_some()
    }

    /// Loads the directory if it has not been loaded yet.
    ///
    /// On failure the directory stays unpopulated and the caller must
    /// retry before lookups can succeed.
    pub async fn ensure_loaded(&self, client: &EdgarClient) -> Result<()> {
        if self.is_loaded().await {
            return Ok(());
        }
        self.reload(client).await
    }

    /// Fetches a fresh snapshot, replacing any previous one on success.
    pub async fn reload(&self, client: &EdgarClient) -> Result<()> {
        debug!("fetching issuer directory");
        let response = client.get(COMPANY_TICKERS_URL).await?;
        if !response.status().is_success() {
            return Err(ResolveError::DirectoryUnavailable(format!(
                "HTTP {} from {COMPANY_TICKERS_URL}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let snapshot = parse_directory(&body)?;
        debug!(issuers = snapshot.len(), "issuer directory loaded");
        *self.entries.write().await = Some(snapshot);
        Ok(())
    }

    /// Looks up an issuer's CIK by ticker, case-insensitively.
    pub async fn lookup(&self, ticker: &Ticker) -> Result<Cik> {
        let entries = self.entries.read().await;
        let entries = entries.as_ref().ok_or_else(|| {
            ResolveError::DirectoryUnavailable("issuer directory not loaded".into())
        })?;
        entries
            .get(ticker.as_str())
            .map(|record| record.cik.clone())
            .ok_or_else(|| ResolveError::IssuerNotFound(ticker.to_string()))
    }

    /// Installs a pre-parsed snapshot, bypassing the network.
    pub async fn install_snapshot(&self, snapshot: HashMap<String, IssuerRecord>) {
        *self.entries.write().await = Some(snapshot);
    }
}

/// Parses the directory payload into a ticker-keyed snapshot.
///
/// The payload is a JSON object with numeric string keys
/// (`{"0": {"cik_str": 1018724, "ticker": "AMZN", "title": "..."}, ...}`).
pub fn parse_directory(body: &str) -> Result<HashMap<String, IssuerRecord>> {
    let rows: HashMap<String, DirectoryRow> = serde_json::from_str(body)
        .map_err(|e| ResolveError::Parse(format!("issuer directory: {e}")))?;

    let mut snapshot = HashMap::with_capacity(rows.len());
    for row in rows.into_values() {
        let ticker = row.ticker.to_uppercase();
        snapshot.insert(
            ticker.clone(),
            IssuerRecord {
                ticker,
                cik: Cik::from_numeric(row.cik_str),
                name: row.title,
            },
        );
    }
    Ok(snapshot)
}
