//! Data model: answer values, outcome classes, the historical answer
//! table with its filtered views, the question catalog, and the
//! dependency forest.
//!
//! Everything here is read-only once constructed; the adaptive session
//! narrows the data only through `Subset` views, never by mutation.

mod catalog;
mod dataset;
mod forest;
mod outcome;
mod value;

pub use catalog::{Question, QuestionCatalog, ValueKind};
pub use dataset::{Dataset, Subset};
pub use forest::DependencyForest;
pub use outcome::OutcomeClass;
pub use value::Value;
