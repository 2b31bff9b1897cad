//! Cribar: adaptive question selection for risk screening.
//!
//! A fixed historical dataset of answered questionnaires with known
//! outcomes is mined to rank candidate questions by how well they split
//! respondents into distinct outcome classes; the ranking drives an
//! adaptive interview that reaches a low/medium/high classification
//! while asking as few questions as possible.
//!
//! ## Architecture
//!
//! - `data`: answer values, outcome classes, the answer table with its
//!   filtered `Subset` views, the question catalog, and the dependency
//!   forest
//! - `score`: Gini impurity and the per-question utility score under two
//!   selectable weight policies
//! - `tree`: offline recursive forest construction with bottom-up
//!   best-score propagation, plus greedy global rank extraction
//! - `session`: the online elicitation loop, one respondent at a time,
//!   behind the `AnswerCollector` seam
//! - `risk`: end-of-session rarity-adjusted risk aggregation
//! - `io`: loading of the catalog, forest, and dataset artifacts
//!
//! ## Example
//!
//! ```
//! use cribar::data::{Dataset, OutcomeClass, Subset, Value};
//! use cribar::score::{utility_score, WeightPolicy};
//!
//! let dataset = Dataset::new(
//!     vec!["q1".into()],
//!     vec![
//!         vec![Value::Number(0.0)],
//!         vec![Value::Number(0.0)],
//!         vec![Value::Number(1.0)],
//!         vec![Value::Number(1.0)],
//!     ],
//!     vec![
//!         OutcomeClass::Low,
//!         OutcomeClass::Low,
//!         OutcomeClass::High,
//!         OutcomeClass::High,
//!     ],
//! )
//! .expect("well-formed table");
//!
//! let subset = Subset::full(&dataset);
//! let choices = subset.choice_set("q1");
//! let record = utility_score(&subset, "q1", &choices, WeightPolicy::RarityWeighted)
//!     .expect("non-empty choice set");
//! assert_eq!(record.score, 0.0); // q1 splits the outcomes perfectly
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod io;
pub mod risk;
pub mod score;
pub mod session;
pub mod tree;

pub use error::{CribarError, Result};
