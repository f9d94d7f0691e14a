//! End-to-end resolution pipeline: ticker in, filing bundle out.
//!
//! The pipeline chains the lookup stages (directory, filing index), runs
//! the independent document fetches concurrently, then classifies and
//! fetches each canonical statement type. Advisory stages (taxonomy,
//! namespaces) degrade to empty results with a warning; statement
//! resolution degrades per type, recorded in the bundle's failures.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::{debug, warn};

use filings_core::{
    Cik, FilingRecord, NamespaceMap, ResolveError, Result, StatementType, SynonymTable, Table,
    TaxonomyDefinition, Ticker, XbrlFact,
};
use filings_edgar::{EdgarClient, IssuerDirectory};
use filings_match::{DEFAULT_THRESHOLD, StatementClassifier};

/// Form type resolved when the caller does not override it.
pub const DEFAULT_FORM_TYPE: &str = "10-K";

/// Pipeline configuration.
///
/// Everything the run depends on is carried here; there is no ambient
/// configuration beyond the process-wide issuer directory cache.
#[derive(Debug)]
pub struct PipelineConfig {
    /// Identifying user agent, required by the SEC.
    pub user_agent: String,
    /// Form type to resolve (e.g. "10-K", "10-Q").
    pub form_type: String,
    /// Classifier vocabulary.
    pub synonyms: SynonymTable,
    /// Minimum fuzzy-match score (0-100).
    pub threshold: u8,
    /// Optional overall deadline for one run.
    pub deadline: Option<Duration>,
}

impl PipelineConfig {
    /// Creates a configuration with defaults: latest 10-K, the built-in
    /// synonym vocabulary, the default threshold, and no deadline.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            form_type: DEFAULT_FORM_TYPE.to_owned(),
            synonyms: SynonymTable::default(),
            threshold: DEFAULT_THRESHOLD,
            deadline: None,
        }
    }

    /// Overrides the form type to resolve.
    #[must_use]
    pub fn with_form_type(mut self, form_type: impl Into<String>) -> Self {
        self.form_type = form_type.into();
        self
    }

    /// Replaces the classifier vocabulary.
    #[must_use]
    pub fn with_synonyms(mut self, synonyms: SynonymTable) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Overrides the minimum fuzzy-match score.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Bounds one full run; elapsing it yields
    /// [`ResolveError::PipelineTimeout`].
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// One statement type that could not be resolved, with its cause.
#[derive(Debug)]
pub struct StatementFailure {
    /// The statement type that failed.
    pub statement: StatementType,
    /// Why it failed.
    pub error: ResolveError,
}

/// Everything resolved from one filing.
///
/// Statement resolution is partial by design: each type either appears in
/// `statements` or contributes an entry to `failures`, never neither.
#[derive(Debug)]
pub struct FilingBundle {
    /// The requested ticker.
    pub ticker: Ticker,
    /// The resolved issuer identifier.
    pub cik: Cik,
    /// The filing the bundle was resolved from.
    pub filing: FilingRecord,
    /// Resolved statement tables by canonical type.
    pub statements: BTreeMap<StatementType, Table>,
    /// Structured facts keyed by accounting tag.
    pub facts: BTreeMap<String, XbrlFact>,
    /// Role definitions from the filing's taxonomy schema; empty when the
    /// schema was unavailable.
    pub taxonomy: Vec<TaxonomyDefinition>,
    /// Namespace declarations from the instance document; empty when the
    /// document was unavailable.
    pub namespaces: NamespaceMap,
    /// Statement types that could not be resolved.
    pub failures: Vec<StatementFailure>,
}

/// The resolution pipeline.
#[derive(Debug)]
pub struct Pipeline {
    client: EdgarClient,
    classifier: StatementClassifier,
    form_type: String,
    deadline: Option<Duration>,
}

impl Pipeline {
    /// Builds a pipeline from its configuration.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            client: EdgarClient::new(&config.user_agent),
            classifier: StatementClassifier::new(config.synonyms)
                .with_threshold(config.threshold),
            form_type: config.form_type,
            deadline: config.deadline,
        }
    }

    /// Resolves a ticker's latest filing of the configured form type into
    /// a [`FilingBundle`].
    pub async fn run(&self, ticker: &Ticker) -> Result<FilingBundle> {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, self.run_inner(ticker))
                .await
                .map_err(|_| ResolveError::PipelineTimeout(deadline))?,
            None => self.run_inner(ticker).await,
        }
    }

    async fn run_inner(&self, ticker: &Ticker) -> Result<FilingBundle> {
        let directory = IssuerDirectory::global();
        directory.ensure_loaded(&self.client).await?;
        let cik = directory.lookup(ticker).await?;
        debug!(%ticker, %cik, "issuer resolved");

        let filing = self.client.latest_filing(&cik, &self.form_type).await?;
        debug!(
            accession = %filing.accession_number,
            report_date = ?filing.report_date,
            "filing selected"
        );

        // Independent document fetches. The manifest and the facts are
        // required; taxonomy and namespaces are advisory.
        let (candidates, taxonomy, namespaces, facts) = futures::join!(
            self.client.filing_summary(&cik, &filing),
            self.client.taxonomy_definitions(&cik, &filing),
            self.client.document_namespaces(&cik, &filing),
            self.client.company_facts(&cik),
        );
        let candidates = candidates?;
        let facts = facts?;
        let taxonomy = taxonomy.unwrap_or_else(|e| {
            warn!(%cik, error = %e, "taxonomy schema unavailable, continuing");
            Vec::new()
        });
        let namespaces = namespaces.unwrap_or_else(|e| {
            warn!(%cik, error = %e, "namespace resolution failed, continuing");
            NamespaceMap::new()
        });

        let mut statements = BTreeMap::new();
        let mut failures = Vec::new();
        for statement in StatementType::ALL {
            match self.resolve_statement(statement, &cik, &filing, &candidates).await {
                Ok(table) => {
                    statements.insert(statement, table);
                }
                Err(error) => {
                    warn!(%statement, %error, "statement unresolved");
                    failures.push(StatementFailure { statement, error });
                }
            }
        }

        Ok(FilingBundle {
            ticker: ticker.clone(),
            cik,
            filing,
            statements,
            facts,
            taxonomy,
            namespaces,
            failures,
        })
    }

    async fn resolve_statement(
        &self,
        statement: StatementType,
        cik: &Cik,
        filing: &FilingRecord,
        candidates: &std::collections::HashMap<String, String>,
    ) -> Result<Table> {
        let file = self.classifier.classify(statement, candidates)?;
        self.client.fetch_statement(cik, filing, &file).await
    }
}
