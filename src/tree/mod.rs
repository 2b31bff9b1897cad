//! Offline question-tree construction and rank extraction.
//!
//! - `TreeBuilder`: recursive, depth-first construction of a scored
//!   forest honoring the dependency forest, with bottom-up best-score
//!   propagation and configurable depth/sample bounds.
//! - `rank_questions`: greedy best-first extraction of a single global
//!   ordering from a scored forest.

mod builder;
mod node;
mod rank;


pub use builder::{BuildConfig, TreeBuilder};
pub use node::TreeNode;
pub use rank::{rank_questions, RankedQuestion};
