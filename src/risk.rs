//! End-of-session risk aggregation.
//!
//! Compares the filtered subset's outcome distribution against the full
//! dataset's, rarity-adjusting for class imbalance: rare classes in the
//! population get amplified when they do appear in the subset. The final
//! decision rule is a documented heuristic carried over from the
//! deployed screening pipeline, including its low-maximum override.

use crate::data::{Dataset, OutcomeClass, Subset};
use serde::Serialize;

/// Per-class outcome counts for a row collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ClassCounts {
    /// Count outcomes across a subset's retained rows.
    #[must_use]
    pub fn from_subset(subset: &Subset<'_>) -> Self {
        let mut counts = Self::default();
        for outcome in subset.outcomes() {
            counts.record(outcome);
        }
        counts
    }

    /// Count outcomes across the whole dataset.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::from_subset(&Subset::full(dataset))
    }

    /// Add one observation.
    pub fn record(&mut self, class: OutcomeClass) {
        match class {
            OutcomeClass::Low => self.low += 1,
            OutcomeClass::Medium => self.medium += 1,
            OutcomeClass::High => self.high += 1,
        }
    }

    /// Count for one class.
    #[must_use]
    pub fn get(&self, class: OutcomeClass) -> usize {
        match class {
            OutcomeClass::Low => self.low,
            OutcomeClass::Medium => self.medium,
            OutcomeClass::High => self.high,
        }
    }

    /// Total observations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Rarity-adjusted per-class risk scores.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskScores {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl RiskScores {
    fn get(&self, class: OutcomeClass) -> f64 {
        match class {
            OutcomeClass::Low => self.low,
            OutcomeClass::Medium => self.medium,
            OutcomeClass::High => self.high,
        }
    }

    fn max(&self) -> f64 {
        self.low.max(self.medium).max(self.high)
    }
}

/// The aggregated decision, with the scores that produced it and a
/// human-readable account of which branch of the rule fired.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub class: OutcomeClass,
    pub scores: RiskScores,
    pub rationale: String,
}

/// Aggregate subset and population outcome counts into a final class.
///
/// Each class present in the subset scores
/// `count_subset(c) * (1 − count_full(c)/N)` — the rarer a class is in
/// the population, the more weight each subset occurrence carries.
/// The decision rule, in order:
///
/// 1. the subset holds no outcomes at all → `low` (without this branch
///    the all-zero scores would tie and the rule below would read the
///    tie as a high maximum);
/// 2. low holds the maximum but medium + high together outweigh it →
///    `medium` (the heuristic refuses to call a borderline pool low);
/// 3. high holds the maximum → `high`;
/// 4. medium holds the maximum → `medium`;
/// 5. otherwise → `low`.
#[must_use]
pub fn aggregate_risk(
    subset_counts: &ClassCounts,
    full_counts: &ClassCounts,
    total_rows: usize,
) -> RiskAssessment {
    let score = |class: OutcomeClass| -> f64 {
        let in_subset = subset_counts.get(class);
        if in_subset == 0 || total_rows == 0 {
            return 0.0;
        }
        let prevalence = full_counts.get(class) as f64 / total_rows as f64;
        in_subset as f64 * (1.0 - prevalence)
    };

    let scores = RiskScores {
        low: score(OutcomeClass::Low),
        medium: score(OutcomeClass::Medium),
        high: score(OutcomeClass::High),
    };

    if subset_counts.total() == 0 {
        return RiskAssessment {
            class: OutcomeClass::Low,
            scores,
            rationale: "no outcomes in the filtered subset".to_string(),
        };
    }

    let m = scores.max();

    let (class, rationale) = if scores.get(OutcomeClass::Low) == m
        && scores.medium + scores.high > scores.low
    {
        (
            OutcomeClass::Medium,
            "low holds the maximum rarity-adjusted score, but medium and high together outweigh it"
                .to_string(),
        )
    } else if scores.get(OutcomeClass::High) == m {
        (OutcomeClass::High, "high holds the maximum rarity-adjusted score".to_string())
    } else if scores.get(OutcomeClass::Medium) == m {
        (OutcomeClass::Medium, "medium holds the maximum rarity-adjusted score".to_string())
    } else {
        (OutcomeClass::Low, "low holds the maximum rarity-adjusted score".to_string())
    };

    RiskAssessment { class, scores, rationale }
}
