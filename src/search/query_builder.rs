// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search query construction for expert lookups
//!
//! Builds an ordered plan of query tiers, from the most precise
//! (clinical directory sites) to the most general. No network access.

use std::fmt;
use std::str::FromStr;

/// Clinical directory sites searched first
const DIRECTORY_SITES: &[&str] = &[
    "healthgrades.com",
    "usnews.com",
    "sharecare.com",
    "vitals.com",
];

const DIRECTORY_KEYWORDS: &[&str] = &["conditions treated", "clinical expertise", "subspecialties"];

/// Institutional scopes for the fallback tier
const INSTITUTION_SCOPES: &[&str] = &["site:.edu", "site:.org", "inurl:hospital"];

const INSTITUTION_KEYWORDS: &[&str] = &["clinical interest", "areas of expertise"];

/// Keyword axes for the per-axis strategy, one query each
const AXIS_KEYWORDS: &[&str] = &[
    "clinical interests",
    "areas of expertise",
    "diseases treated",
    "procedures",
];

/// How queries are grouped and evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStrategy {
    /// Directory-scoped tier, then institution-scoped tier; stop at the
    /// first tier that yields enough evidence
    #[default]
    Tiered,
    /// One unscoped query per keyword axis, all results unioned
    PerAxis,
}

impl FromStr for QueryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiered" => Ok(Self::Tiered),
            "per-axis" | "per_axis" | "axis" => Ok(Self::PerAxis),
            other => Err(format!("unknown query strategy '{}'", other)),
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tiered => write!(f, "tiered"),
            Self::PerAxis => write!(f, "per-axis"),
        }
    }
}

/// A group of queries of equal generality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTier {
    /// Position in the plan, 1-based
    pub level: usize,
    /// Short label for logs
    pub label: &'static str,
    /// Queries in issue order
    pub queries: Vec<String>,
}

/// Ordered query tiers for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub strategy: QueryStrategy,
    pub tiers: Vec<QueryTier>,
}

impl QueryPlan {
    /// Whether evaluation may stop after a tier that produced enough evidence
    pub fn stops_early(&self) -> bool {
        self.strategy == QueryStrategy::Tiered
    }

    pub fn query_count(&self) -> usize {
        self.tiers.iter().map(|t| t.queries.len()).sum()
    }
}

/// Builds query plans for (expert, specialty) pairs
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    strategy: QueryStrategy,
}

impl QueryBuilder {
    pub fn new(strategy: QueryStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> QueryStrategy {
        self.strategy
    }

    /// Build the query plan
    ///
    /// Deterministic for identical inputs. Callers validate that the name is
    /// non-empty and the specialty exists.
    pub fn build(&self, expert_name: &str, specialty: &str) -> QueryPlan {
        let subject = subject_phrase(expert_name, specialty);

        let tiers = match self.strategy {
            QueryStrategy::Tiered => vec![
                QueryTier {
                    level: 1,
                    label: "clinical-directories",
                    queries: vec![format!(
                        "{} {} {}",
                        subject,
                        any_of(DIRECTORY_KEYWORDS),
                        DIRECTORY_SITES
                            .iter()
                            .map(|s| format!("site:{}", s))
                            .collect::<Vec<_>>()
                            .join(" OR ")
                    )],
                },
                QueryTier {
                    level: 2,
                    label: "institutions",
                    queries: vec![format!(
                        "{} {} {}",
                        subject,
                        any_of(INSTITUTION_KEYWORDS),
                        INSTITUTION_SCOPES.join(" OR ")
                    )],
                },
            ],
            QueryStrategy::PerAxis => vec![QueryTier {
                level: 1,
                label: "keyword-axes",
                queries: AXIS_KEYWORDS
                    .iter()
                    .map(|axis| format!("{} {}", subject, axis))
                    .collect(),
            }],
        };

        QueryPlan {
            strategy: self.strategy,
            tiers,
        }
    }
}

/// Quoted expert name followed by the specialty
fn subject_phrase(expert_name: &str, specialty: &str) -> String {
    let name = collapse(&expert_name.replace('"', " "));
    let specialty = collapse(specialty);
    if specialty.is_empty() {
        format!("\"{}\"", name)
    } else {
        format!("\"{}\" {}", name, specialty)
    }
}

fn any_of(keywords: &[&str]) -> String {
    keywords.join(" OR ")
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
