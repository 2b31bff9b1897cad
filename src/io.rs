//! Artifact loading.
//!
//! Consumes the three cleaned artifacts produced upstream: the question
//! catalog, the dependency forest, and the dataset table. Raw CSV
//! cleaning and taxonomy-XML parsing happen before these files exist and
//! are not this crate's concern.
//!
//! At load the dataset gets its final shape: rows with a missing outcome
//! are dropped (the core's invariant is that the outcome column has no
//! missing values), fractional outcome scores become classes, and
//! `scale`-kind question columns are likewise converted so the engine
//! only ever partitions on class labels.

use crate::data::{Dataset, DependencyForest, OutcomeClass, QuestionCatalog, Value, ValueKind};
use crate::error::{CribarError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of the dataset artifact.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    /// All column codes, including the outcome column.
    columns: Vec<String>,
    /// Code of the outcome column.
    outcome: String,
    /// Row-major cell values; JSON `null` is the missing sentinel.
    rows: Vec<Vec<Value>>,
}

/// Load the question catalog (code → prompt + value kind).
pub fn load_catalog(path: impl AsRef<Path>) -> Result<QuestionCatalog> {
    read_json(path.as_ref())
}

/// Load the dependency forest and validate it is acyclic.
pub fn load_forest(path: impl AsRef<Path>) -> Result<DependencyForest> {
    let forest: DependencyForest = read_json(path.as_ref())?;
    forest.validate_acyclic()?;
    Ok(forest)
}

/// Load the dataset table.
///
/// # Errors
///
/// Returns `DatasetShape` when the declared outcome column is absent, a
/// row width disagrees with the column count, or an outcome cell holds an
/// unparseable class label.
pub fn load_dataset(path: impl AsRef<Path>, catalog: &QuestionCatalog) -> Result<Dataset> {
    let file: DatasetFile = read_json(path.as_ref())?;

    let outcome_idx = file
        .columns
        .iter()
        .position(|c| c == &file.outcome)
        .ok_or_else(|| CribarError::DatasetShape {
            message: format!("outcome column '{}' not present in columns", file.outcome),
        })?;

    let mut columns = file.columns;
    columns.remove(outcome_idx);

    let scale_columns: Vec<bool> = columns
        .iter()
        .map(|code| catalog.get(code).is_some_and(|q| q.kind == ValueKind::Scale))
        .collect();

    let mut rows = Vec::with_capacity(file.rows.len());
    let mut outcomes = Vec::with_capacity(file.rows.len());

    for (i, mut row) in file.rows.into_iter().enumerate() {
        if row.len() != columns.len() + 1 {
            return Err(CribarError::DatasetShape {
                message: format!(
                    "row {i} has {} values, expected {}",
                    row.len(),
                    columns.len() + 1
                ),
            });
        }
        let outcome_cell = row.remove(outcome_idx);
        let Some(outcome) = parse_outcome(&outcome_cell, i)? else {
            continue; // missing outcome: the row never reaches the core
        };

        for (cell, &is_scale) in row.iter_mut().zip(&scale_columns) {
            if is_scale {
                if let Value::Number(score) = *cell {
                    *cell = Value::Text(OutcomeClass::from_scale(score).to_string());
                }
            }
        }

        rows.push(row);
        outcomes.push(outcome);
    }

    Dataset::new(columns, rows, outcomes)
}

fn parse_outcome(cell: &Value, row: usize) -> Result<Option<OutcomeClass>> {
    match cell {
        Value::Missing => Ok(None),
        Value::Number(score) => Ok(Some(OutcomeClass::from_scale(*score))),
        Value::Text(label) => label.parse().map(Some).map_err(|e: String| {
            CribarError::DatasetShape { message: format!("row {row} outcome: {e}") }
        }),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CribarError::ArtifactNotFound { path: path.to_path_buf() });
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| CribarError::io(format!("reading {}", path.display()), e))?;
    serde_json::from_str(&content).map_err(|e| CribarError::ArtifactParsing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
