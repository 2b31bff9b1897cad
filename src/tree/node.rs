//! Scored question nodes.

use crate::data::Value;
use serde::Serialize;
use std::fmt;

/// One question in a scored forest.
///
/// A node owns its children exclusively — the forest is a tree, never a
/// graph, and no back-pointers exist. `best_score` is derived state: the
/// minimum score anywhere in the node's subtree, recomputed bottom-up
/// whenever children are attached and never set from outside.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    /// Question code.
    pub question: String,
    /// This question's own utility score.
    pub score: f64,
    /// Minimum score in this subtree (equals `score` for a leaf).
    pub best_score: f64,
    /// Choice set the score was computed over.
    pub choices: Vec<Value>,
    /// Depth in the forest; roots are at 0. Display-only.
    #[serde(skip)]
    pub depth: usize,
    /// Scored follow-up questions.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a childless node; `best_score` starts as its own score.
    #[must_use]
    pub fn new(question: String, score: f64, choices: Vec<Value>, depth: usize) -> Self {
        Self { question, score, best_score: score, choices, depth, children: Vec::new() }
    }

    /// Attach a subtree and recompute `best_score` from the new children.
    pub fn attach_children(&mut self, children: Vec<TreeNode>) {
        self.children = children;
        self.recompute_best_score();
    }

    /// Restore the bottom-up invariant:
    /// `best_score = min(score, min over children's best_score)`.
    pub fn recompute_best_score(&mut self) {
        self.best_score = self
            .children
            .iter()
            .map(|child| child.best_score)
            .fold(self.score, f64::min);
    }

    /// True iff the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Nodes in this subtree, including this one.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::subtree_size).sum::<usize>()
    }

    /// Indented text rendering of this subtree, one node per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        let indent = "    ".repeat(self.depth);
        out.push_str(&format!("{indent}|___ {self}\n"));
        for child in &self.children {
            child.render_into(out);
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<28} score={:<8.4} best={:<8.4} choices={}",
            self.question,
            self.score,
            self.best_score,
            self.choices.len()
        )
    }
}
