//! Rate-limited, retrying HTTP client for the EDGAR endpoints.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use filings_core::{Cik, FilingRecord, ResolveError, Result};

/// EDGAR structured-data API base URL.
pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";

/// EDGAR archive base URL for filing documents.
pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov";

/// Issuer directory URL.
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC fair-use ceiling).
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Attempts per request before a transient failure is surfaced.
const MAX_ATTEMPTS: u32 = 3;

/// Initial backoff delay; doubles per retry.
const BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Rate limiter ensuring a minimum interval between outbound requests.
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// HTTP client for the EDGAR endpoints.
///
/// All requests carry the identifying user agent the SEC requires, pass
/// through one shared rate limiter, and retry transient failures
/// (transport errors, 429, 5xx) with exponential backoff. Permanent
/// failures (404, malformed payloads) surface immediately.
#[derive(Debug)]
pub struct EdgarClient {
    pub(crate) client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl EdgarClient {
    /// Creates a client with the specified identifying user agent.
    ///
    /// The SEC requires contact information in the user agent, e.g.
    /// "MyApp/1.0 (contact@example.com)".
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self::with_client(client)
    }

    /// Creates a client around a pre-configured `reqwest` client.
    ///
    /// The caller is responsible for setting an identifying user agent.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
        }
    }

    /// Issues a rate-limited GET, retrying transient failures.
    ///
    /// The returned response may still carry a non-success status (e.g.
    /// 404); callers map that to their component error.
    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut backoff = BACKOFF_BASE;
        for attempt in 1..=MAX_ATTEMPTS {
            self.rate_limiter.lock().await.wait().await;

            debug!(url, attempt, "GET");
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !is_transient_status(status) {
                        return Ok(response);
                    }
                    if attempt == MAX_ATTEMPTS {
                        if status == StatusCode::TOO_MANY_REQUESTS {
                            return Err(ResolveError::RateLimited { retry_after: None });
                        }
                        return Err(ResolveError::Network(format!(
                            "HTTP {status} from {url} after {attempt} attempts"
                        )));
                    }
                    warn!(url, %status, attempt, "transient HTTP status, backing off");
                }
                Err(e) => {
                    if attempt == MAX_ATTEMPTS {
                        return Err(ResolveError::Network(e.to_string()));
                    }
                    warn!(url, error = %e, attempt, "request failed, backing off");
                }
            }

            sleep(backoff).await;
            backoff *= 2;
        }
        unreachable!("retry loop always returns within MAX_ATTEMPTS")
    }

    pub(crate) fn submissions_url(&self, cik: &Cik) -> String {
        format!("{EDGAR_DATA_URL}/submissions/CIK{cik}.json")
    }

    pub(crate) fn company_facts_url(&self, cik: &Cik) -> String {
        format!("{EDGAR_DATA_URL}/api/xbrl/companyfacts/CIK{cik}.json")
    }

    pub(crate) fn archive_url(&self, cik: &Cik, filing: &FilingRecord, file: &str) -> String {
        format!(
            "{EDGAR_ARCHIVES_URL}/Archives/edgar/data/{cik}/{accession}/{file}",
            accession = filing.accession_compact()
        )
    }

    /// URL of a filing's XBRL instance document (`{stem}_htm.xml`).
    #[must_use]
    pub fn instance_document_url(&self, cik: &Cik, filing: &FilingRecord) -> String {
        let file = format!("{}_htm.xml", filing.primary_document_stem());
        self.archive_url(cik, filing, &file)
    }

    /// URL of a filing's taxonomy schema (`{stem}.xsd`).
    #[must_use]
    pub fn schema_url(&self, cik: &Cik, filing: &FilingRecord) -> String {
        let file = format!("{}.xsd", filing.primary_document_stem());
        self.archive_url(cik, filing, &file)
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || matches!(status, StatusCode::TOO_MANY_REQUESTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filing() -> FilingRecord {
        FilingRecord {
            form_type: "10-K".into(),
            accession_number: "0001018724-24-000008".into(),
            primary_document: "amzn-20231231.htm".into(),
            filing_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            report_date: NaiveDate::from_ymd_opt(2023, 12, 31),
        }
    }

    #[test]
    fn urls_use_compact_accession_and_padded_cik() {
        let client = EdgarClient::new("Test/1.0 (test@example.com)");
        let cik = Cik::from_numeric(1_018_724);

        assert_eq!(
            client.submissions_url(&cik),
            "https://data.sec.gov/submissions/CIK0001018724.json"
        );
        assert_eq!(
            client.company_facts_url(&cik),
            "https://data.sec.gov/api/xbrl/companyfacts/CIK0001018724.json"
        );
        assert_eq!(
            client.archive_url(&cik, &filing(), "R2.htm"),
            "https://www.sec.gov/Archives/edgar/data/0001018724/000101872424000008/R2.htm"
        );
        assert_eq!(
            client.instance_document_url(&cik, &filing()),
            "https://www.sec.gov/Archives/edgar/data/0001018724/000101872424000008/amzn-20231231_htm.xml"
        );
        assert_eq!(
            client.schema_url(&cik, &filing()),
            "https://www.sec.gov/Archives/edgar/data/0001018724/000101872424000008/amzn-20231231.xsd"
        );
    }

    #[test]
    fn transient_status_classes() {
        assert!(is_transient_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_transient_status(StatusCode::NOT_FOUND));
        assert!(!is_transient_status(StatusCode::OK));
    }

    #[tokio::test]
    async fn rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
