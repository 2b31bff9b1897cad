//! Immutable per-question score records.

use crate::data::Value;
use serde::Serialize;
use std::fmt;

/// One scored question: created fresh per scoring call, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    /// Question code.
    pub question: String,
    /// Aggregated utility score; 0 is a perfect split, ~1 is worst.
    pub score: f64,
    /// The choice set the score was computed over.
    pub choices: Vec<Value>,
    /// Number of distinct answer values.
    pub answer_count: usize,
}

impl ScoreRecord {
    pub(crate) fn new(question: String, score: f64, choices: Vec<Value>) -> Self {
        let answer_count = choices.len();
        Self { question, score, choices, answer_count }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} score={:<8.4} answers={}",
            self.question, self.score, self.answer_count
        )
    }
}
