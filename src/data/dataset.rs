//! The historical answer table and filtered views over it.
//!
//! `Dataset` owns the cleaned table: one column per question code plus one
//! outcome class per row. It is read-only after construction. All scoring
//! and elicitation operates on `Subset`, a borrowed row-index view; the
//! full dataset is just the view that retains every row.

use super::outcome::OutcomeClass;
use super::value::Value;
use crate::error::{CribarError, Result};
use std::collections::HashMap;

/// Owned, immutable answer table.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
    outcomes: Vec<OutcomeClass>,
}

impl Dataset {
    /// Build a dataset from question columns, row-major values, and one
    /// outcome class per row.
    ///
    /// # Errors
    ///
    /// Returns `DatasetShape` if a row width disagrees with the column
    /// count, the outcome count disagrees with the row count, or a column
    /// code is duplicated.
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        outcomes: Vec<OutcomeClass>,
    ) -> Result<Self> {
        if outcomes.len() != rows.len() {
            return Err(CribarError::DatasetShape {
                message: format!("{} rows but {} outcome values", rows.len(), outcomes.len()),
            });
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CribarError::DatasetShape {
                    message: format!(
                        "row {i} has {} values, expected {} (one per question column)",
                        row.len(),
                        columns.len()
                    ),
                });
            }
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (i, code) in columns.iter().enumerate() {
            if index.insert(code.clone(), i).is_some() {
                return Err(CribarError::DatasetShape {
                    message: format!("duplicate question column '{code}'"),
                });
            }
        }

        Ok(Self { columns, index, rows, outcomes })
    }

    /// Number of respondent rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Question column codes, in table order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a question column, if present.
    #[must_use]
    pub fn column_index(&self, question: &str) -> Option<usize> {
        self.index.get(question).copied()
    }

    /// Outcome class of one row.
    #[must_use]
    pub fn outcome(&self, row: usize) -> OutcomeClass {
        self.outcomes[row]
    }

    /// Cell value at (row, column index).
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> &Value {
        &self.rows[row][column]
    }
}

/// Borrowed view over a subset of dataset rows.
///
/// Rows only ever leave the view as answers are applied; the row count is
/// monotonically non-increasing and an empty subset is a valid terminal
/// state, not an error.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    data: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> Subset<'a> {
    /// The view retaining every row of the dataset.
    #[must_use]
    pub fn full(data: &'a Dataset) -> Self {
        Self { data, rows: (0..data.n_rows()).collect() }
    }

    /// Number of retained rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True iff no rows remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The underlying dataset.
    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.data
    }

    /// Distinct non-missing values observed for `question` among the
    /// retained rows, in first-seen order.
    ///
    /// An unknown column yields an empty choice set; such a question is
    /// unscoreable rather than an error.
    #[must_use]
    pub fn choice_set(&self, question: &str) -> Vec<Value> {
        let Some(col) = self.data.column_index(question) else {
            return Vec::new();
        };
        let mut choices: Vec<Value> = Vec::new();
        for &row in &self.rows {
            let value = self.data.value(row, col);
            if !value.is_missing() && !choices.contains(value) {
                choices.push(value.clone());
            }
        }
        choices
    }

    /// Narrow the view to rows where `question` equals `answer`.
    ///
    /// Value equality covers numeric and categorical answers alike. An
    /// unknown column filters to the empty view.
    #[must_use]
    pub fn filter(&self, question: &str, answer: &Value) -> Subset<'a> {
        let Some(col) = self.data.column_index(question) else {
            return Subset { data: self.data, rows: Vec::new() };
        };
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&row| self.data.value(row, col) == answer)
            .collect();
        Subset { data: self.data, rows }
    }

    /// Outcome classes of the retained rows, in row order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<OutcomeClass> {
        self.rows.iter().map(|&row| self.data.outcome(row)).collect()
    }

    /// Outcome classes of retained rows where `question` equals `answer`.
    ///
    /// This is the partition a utility score aggregates over; exposing it
    /// here keeps the scorer free of row bookkeeping.
    #[must_use]
    pub fn partition_outcomes(&self, question: &str, answer: &Value) -> Vec<OutcomeClass> {
        let Some(col) = self.data.column_index(question) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .copied()
            .filter(|&row| self.data.value(row, col) == answer)
            .map(|row| self.data.outcome(row))
            .collect()
    }
}
