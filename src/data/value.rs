//! Answer cell values.
//!
//! A dataset cell is numeric, categorical text, or missing. The missing
//! sentinel is a first-class variant rather than a magic constant, and it
//! is never a member of a choice set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One answer value as observed in the dataset or supplied by a respondent.
///
/// Equality is type-aware: numbers compare numerically, text compares as
/// strings, and `Missing` equals only `Missing`. This is what makes the
/// session's subset filtering work for both numeric and categorical
/// questions without runtime type sniffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric answer (booleans and coded scales are stored as numbers).
    Number(f64),
    /// Categorical answer.
    Text(String),
    /// Missing-data sentinel; deserializes from JSON `null`.
    Missing,
}

impl Value {
    /// True iff this is the missing sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Whether this answer unlocks follow-up questions.
    ///
    /// Numeric answers are affirmative iff nonzero (zero encodes "no").
    /// Text answers are always affirmative; a categorical choice is a
    /// concrete response, not a refusal.
    #[must_use]
    pub fn is_affirmative(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0,
            Value::Text(_) => true,
            Value::Missing => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral codes print without a trailing ".0"
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Missing => write!(f, "<missing>"),
        }
    }
}
