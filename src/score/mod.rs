//! Impurity scoring: Gini impurity over outcome classes and the
//! per-question utility score aggregated across a question's answer
//! partitions.
//!
//! Lower is always better: a score of 0 means the question splits the
//! subset into perfectly pure outcome groups. Two weight policies exist in
//! the historical scoring pipelines and both are kept as configuration;
//! neither was ever declared authoritative, so callers choose and the
//! adaptive path defaults to rarity weighting.

use crate::data::{OutcomeClass, Subset, Value};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

mod record;

pub use record::ScoreRecord;

#[cfg(test)]
mod tests;

/// Sentinel score for a question that cannot be scored (empty choice set).
///
/// Worse than any computable utility score, so unscoreable questions sink
/// to the bottom of every ranking instead of being silently dropped from
/// the tree.
pub const WORST_SCORE: f64 = 1.0;

/// Gini impurity of a multiset of outcome classes.
///
/// Returns 0 for an empty multiset; otherwise `1 − Σ p_c²` over the
/// classes present. Range is [0, 1 − 1/k] for k observed classes.
#[must_use]
pub fn gini_impurity(labels: &[OutcomeClass]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let total = labels.len() as f64;
    let mut impurity = 1.0;
    for class in OutcomeClass::ALL {
        let count = labels.iter().filter(|&&c| c == class).count();
        let p = count as f64 / total;
        impurity -= p * p;
    }
    impurity
}

/// How an answer partition's impurity is weighted by the partition's
/// probability mass before aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightPolicy {
    /// Weight by `1 − p`: upweights low-probability answer branches so
    /// rare-but-decisive answers are not starved by high-probability
    /// noise answers. The default for adaptive elicitation.
    #[default]
    RarityWeighted,
    /// Weight by `p`: favors common, highly discriminating answers.
    /// Used for pure ranking and reporting.
    ImpurityWeighted,
}

impl WeightPolicy {
    /// The weight applied to a partition with probability mass `p`.
    #[must_use]
    pub fn weight(self, p: f64) -> f64 {
        match self {
            WeightPolicy::RarityWeighted => 1.0 - p,
            WeightPolicy::ImpurityWeighted => p,
        }
    }
}

impl fmt::Display for WeightPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightPolicy::RarityWeighted => f.write_str("rarity-weighted"),
            WeightPolicy::ImpurityWeighted => f.write_str("impurity-weighted"),
        }
    }
}

impl FromStr for WeightPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rarity" | "rarity-weighted" => Ok(WeightPolicy::RarityWeighted),
            "impurity" | "impurity-weighted" => Ok(WeightPolicy::ImpurityWeighted),
            other => Err(format!("unknown weight policy '{other}' (expected rarity or impurity)")),
        }
    }
}

/// Utility score of one question over a subset, aggregated across its
/// answer partitions.
///
/// For each answer `a` in `choices`: the Gini impurity of the outcome
/// classes in the rows where `question == a`, weighted by
/// `policy.weight(p_a)` with `p_a` the partition's share of the subset.
/// The weighted sum is divided by the number of choices — deliberately not
/// by the total probability mass, which penalizes questions with many
/// rare answer values.
///
/// Returns `None` when `choices` is empty: the score is undefined
/// (division by zero) and callers must special-case it, typically with
/// [`WORST_SCORE`].
#[must_use]
pub fn utility_score(
    subset: &Subset<'_>,
    question: &str,
    choices: &[Value],
    policy: WeightPolicy,
) -> Option<ScoreRecord> {
    if choices.is_empty() {
        return None;
    }

    let total_rows = subset.len();
    let mut weighted_sum = 0.0;
    for answer in choices {
        let labels = subset.partition_outcomes(question, answer);
        if total_rows == 0 {
            continue; // empty subset: every partition is empty, term is 0
        }
        let impurity = gini_impurity(&labels);
        let p = labels.len() as f64 / total_rows as f64;
        weighted_sum += impurity * policy.weight(p);
    }

    Some(ScoreRecord::new(
        question.to_string(),
        weighted_sum / choices.len() as f64,
        choices.to_vec(),
    ))
}
