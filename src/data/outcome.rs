//! Outcome classes for risk screening.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three-way risk classification attached to every dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeClass {
    Low,
    Medium,
    High,
}

impl OutcomeClass {
    /// All classes, in severity order.
    pub const ALL: [OutcomeClass; 3] = [OutcomeClass::Low, OutcomeClass::Medium, OutcomeClass::High];

    /// Convert a fractional risk score in [0, 1] to a class.
    ///
    /// Thresholds match the historical scoring pipeline: below 0.4 is low,
    /// below 0.7 is medium, everything else is high.
    #[must_use]
    pub fn from_scale(score: f64) -> Self {
        if score < 0.4 {
            OutcomeClass::Low
        } else if score < 0.7 {
            OutcomeClass::Medium
        } else {
            OutcomeClass::High
        }
    }

    /// Lowercase label, as stored in the artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeClass::Low => "low",
            OutcomeClass::Medium => "medium",
            OutcomeClass::High => "high",
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(OutcomeClass::Low),
            "medium" => Ok(OutcomeClass::Medium),
            "high" => Ok(OutcomeClass::High),
            other => Err(format!("unknown outcome class '{other}' (expected low/medium/high)")),
        }
    }
}
