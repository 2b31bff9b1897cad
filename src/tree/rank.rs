//! Global rank extraction: a best-first linear ordering of a scored
//! forest, used to report the most informative questions overall.

use super::node::TreeNode;
use serde::Serialize;

/// One entry of the global ordering.
#[derive(Debug, Clone, Serialize)]
pub struct RankedQuestion {
    /// Question code.
    pub question: String,
    /// The question's own score.
    pub score: f64,
    /// Best score in its subtree at the moment it was expanded.
    pub best_score: f64,
}

/// Greedy best-first expansion of a scored forest.
///
/// A frontier starts at the roots; each step removes the frontier node
/// with the minimal `best_score` (first-seen order breaks ties), emits its
/// question, and adds its children to the frontier. Equivalent to
/// repeatedly diving into the most promising unexplored branch: the
/// selection is locally greedy, so the output is not globally sorted by
/// `best_score` — a node can rank ahead of a better descendant of an
/// unexplored sibling.
///
/// Visits every node exactly once; terminates because the forest is
/// finite and acyclic.
#[must_use]
pub fn rank_questions(forest: &[TreeNode]) -> Vec<RankedQuestion> {
    let mut frontier: Vec<&TreeNode> = forest.iter().collect();
    let mut ordering = Vec::new();

    while !frontier.is_empty() {
        let mut best = 0;
        for (i, node) in frontier.iter().enumerate().skip(1) {
            // strict less-than keeps the earliest seen node on ties
            if node.best_score < frontier[best].best_score {
                best = i;
            }
        }
        let node = frontier.remove(best);
        ordering.push(RankedQuestion {
            question: node.question.clone(),
            score: node.score,
            best_score: node.best_score,
        });
        frontier.extend(node.children.iter());
    }

    ordering
}
