//! Synonym vocabulary mapping canonical statement types to filer labels.
//!
//! Filer-chosen report names vary idiosyncratically across issuers and
//! vintages ("Consolidated Balance Sheets", "CONSOLIDATED STATEMENTS OF
//! FINANCIAL POSITION", ...). The classifier first tries these phrases as
//! exact normalized matches, in order, before falling back to fuzzy
//! matching, so ordering within each list is a priority ranking.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::StatementType;

/// Ordered synonym phrases per canonical statement type.
///
/// The table is plain data: callers may replace it wholesale, extend
/// individual lists, or deserialize one from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymTable {
    entries: BTreeMap<StatementType, Vec<String>>,
}

impl SynonymTable {
    /// Creates an empty table with no synonyms.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the synonym phrases for a statement type, in priority order.
    #[must_use]
    pub fn phrases(&self, statement: StatementType) -> &[String] {
        self.entries
            .get(&statement)
            .map_or(&[], |phrases| phrases.as_slice())
    }

    /// Appends a phrase to a statement type's list.
    pub fn push(&mut self, statement: StatementType, phrase: impl Into<String>) {
        self.entries.entry(statement).or_default().push(phrase.into());
    }

    /// Appends several phrases to a statement type's list.
    pub fn extend<I, S>(&mut self, statement: StatementType, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(statement)
            .or_default()
            .extend(phrases.into_iter().map(Into::into));
    }

    /// Iterates the full vocabulary as (statement type, phrase) pairs.
    ///
    /// The union across all types is what the fuzzy fallback scores
    /// against, so cross-type collisions can be detected.
    pub fn vocabulary(&self) -> impl Iterator<Item = (StatementType, &str)> {
        self.entries.iter().flat_map(|(statement, phrases)| {
            phrases.iter().map(|p| (*statement, p.as_str()))
        })
    }

    /// Returns true if no type has any phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

impl Default for SynonymTable {
    /// Vocabulary seeded with the short names observed across common
    /// 10-K/10-Q filings.
    fn default() -> Self {
        let mut table = Self::empty();
        table.extend(
            StatementType::BalanceSheet,
            [
                "consolidated balance sheets",
                "consolidated balance sheet",
                "consolidated statements of financial position",
                "consolidated statement of financial position",
                "balance sheets",
                "balance sheet",
            ],
        );
        table.extend(
            StatementType::IncomeStatement,
            [
                "consolidated statements of operations",
                "consolidated statement of operations",
                "consolidated statements of income",
                "consolidated statements of earnings",
                "consolidated income statements",
                "statements of operations",
                "statement of operations",
                "income statements",
                "income statement",
            ],
        );
        table.extend(
            StatementType::CashFlowStatement,
            [
                "consolidated statements of cash flows",
                "consolidated statement of cash flows",
                "statements of cash flows",
                "statement of cash flows",
                "cash flow statements",
                "cash flow statement",
            ],
        );
        table
    }
}
