//! Structured fact extraction from the company-facts feed.
//!
//! The feed publishes every reported value keyed by taxonomy and tag.
//! Only the accounting taxonomies (us-gaap, then dei) are kept; a tag
//! that appears in both keeps its us-gaap series. Each tag contributes
//! one unit's series, chosen by a fixed preference order.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use filings_core::{Cik, FactPeriod, ResolveError, Result, XbrlFact};

use crate::client::EdgarClient;

/// Taxonomies extracted from the feed, in precedence order.
const TAXONOMIES: [&str; 2] = ["us-gaap", "dei"];

/// Unit preference when a tag reports under several units.
const UNIT_PREFERENCE: [&str; 3] = ["USD", "shares", "pure"];

#[derive(Debug, Deserialize)]
struct CompanyFacts {
    #[serde(default)]
    facts: BTreeMap<String, BTreeMap<String, RawFact>>,
}

#[derive(Debug, Deserialize)]
struct RawFact {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    units: BTreeMap<String, Vec<RawPeriod>>,
}

#[derive(Debug, Deserialize)]
struct RawPeriod {
    #[serde(default)]
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    val: Option<f64>,
}

/// Parses a company-facts payload into a tag-keyed fact map.
///
/// Periods missing an end date or a numeric value are dropped; a tag
/// whose every period is dropped is omitted entirely.
pub fn parse_company_facts(body: &str) -> Result<BTreeMap<String, XbrlFact>> {
    let payload: CompanyFacts = serde_json::from_str(body)
        .map_err(|e| ResolveError::Parse(format!("company facts: {e}")))?;

    let mut facts = BTreeMap::new();
    for taxonomy in TAXONOMIES {
        let Some(tags) = payload.facts.get(taxonomy) else {
            continue;
        };
        for (tag, raw) in tags {
            if facts.contains_key(tag) {
                continue;
            }
            let Some((unit, periods)) = pick_unit(&raw.units) else {
                continue;
            };
            let values: Vec<FactPeriod> = periods
                .iter()
                .filter_map(|p| {
                    Some(FactPeriod {
                        start: p.start,
                        end: p.end?,
                        value: p.val?,
                    })
                })
                .collect();
            if values.is_empty() {
                continue;
            }
            facts.insert(
                tag.clone(),
                XbrlFact {
                    tag: tag.clone(),
                    label: raw.label.clone().unwrap_or_else(|| tag.clone()),
                    unit: unit.to_owned(),
                    values,
                },
            );
        }
    }
    Ok(facts)
}

/// Picks one unit's series per tag: preferred units first, then the
/// alphabetically first remaining unit for determinism.
fn pick_unit(units: &BTreeMap<String, Vec<RawPeriod>>) -> Option<(&str, &[RawPeriod])> {
    for preferred in UNIT_PREFERENCE {
        if let Some(periods) = units.get(preferred) {
            return Some((preferred, periods));
        }
    }
    units
        .iter()
        .next()
        .map(|(unit, periods)| (unit.as_str(), periods.as_slice()))
}

impl EdgarClient {
    /// Fetches and parses an issuer's structured facts.
    pub async fn company_facts(&self, cik: &Cik) -> Result<BTreeMap<String, XbrlFact>> {
        let url = self.company_facts_url(cik);
        debug!(%cik, %url, "fetching company facts");
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(ResolveError::Parse(format!(
                "company facts: HTTP {} from {url}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ResolveError::Network(e.to_string()))?;
        let facts = parse_company_facts(&body)?;
        debug!(tags = facts.len(), "company facts extracted");
        Ok(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const FACTS: &str = r#"{
        "cik": 1018724,
        "entityName": "AMAZON.COM, INC.",
        "facts": {
            "dei": {
                "EntityCommonStockSharesOutstanding": {
                    "label": "Entity Common Stock, Shares Outstanding",
                    "units": {
                        "shares": [
                            {"end": "2024-01-24", "val": 10383000000.0}
                        ]
                    }
                }
            },
            "us-gaap": {
                "Assets": {
                    "label": "Assets",
                    "units": {
                        "USD": [
                            {"end": "2022-12-31", "val": 462675000000.0},
                            {"end": "2023-12-31", "val": 527854000000.0}
                        ]
                    }
                },
                "OperatingLeasePayments": {
                    "label": "Operating Lease, Payments",
                    "units": {
                        "USD": [
                            {"start": "2023-01-01", "end": "2023-12-31", "val": 10500000000.0}
                        ]
                    }
                },
                "EffectiveIncomeTaxRate": {
                    "label": "Effective Tax Rate",
                    "units": {
                        "pure": [
                            {"end": "2023-12-31", "val": 0.19},
                            {"end": "2022-12-31"}
                        ]
                    }
                },
                "Unreported": {
                    "label": "Nothing usable",
                    "units": {
                        "USD": [
                            {"end": "2023-12-31"}
                        ]
                    }
                }
            },
            "invent": {
                "MadeUp": {
                    "label": "Not an accounting taxonomy",
                    "units": {"USD": [{"end": "2023-12-31", "val": 1.0}]}
                }
            }
        }
    }"#;

    #[test]
    fn extracts_accounting_taxonomies_only() {
        let facts = parse_company_facts(FACTS).unwrap();
        assert!(facts.contains_key("Assets"));
        assert!(facts.contains_key("EntityCommonStockSharesOutstanding"));
        assert!(!facts.contains_key("MadeUp"));
    }

    #[test]
    fn durations_keep_start_and_instants_do_not() {
        let facts = parse_company_facts(FACTS).unwrap();

        let assets = &facts["Assets"];
        assert_eq!(assets.unit, "USD");
        assert_eq!(assets.values.len(), 2);
        assert_eq!(assets.values[0].start, None);
        assert_eq!(
            assets.values[1].end,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );

        let lease = &facts["OperatingLeasePayments"];
        assert_eq!(lease.label, "Operating Lease, Payments");
        assert_eq!(
            lease.values[0].start,
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
    }

    #[test]
    fn valueless_periods_are_dropped() {
        let facts = parse_company_facts(FACTS).unwrap();
        assert_eq!(facts["EffectiveIncomeTaxRate"].values.len(), 1);
        assert!(!facts.contains_key("Unreported"));
    }

    #[test]
    fn unit_preference_falls_back_alphabetically() {
        let mut units = BTreeMap::new();
        units.insert("EUR".to_owned(), vec![]);
        units.insert("CAD".to_owned(), vec![]);
        assert_eq!(pick_unit(&units).unwrap().0, "CAD");

        units.insert("USD".to_owned(), vec![]);
        assert_eq!(pick_unit(&units).unwrap().0, "USD");
    }

    #[test]
    fn malformed_payload_is_a_parse_error() {
        assert!(matches!(
            parse_company_facts("[]").unwrap_err(),
            ResolveError::Parse(_)
        ));
    }
}
