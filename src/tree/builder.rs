//! Offline forest construction.
//!
//! The builder is a ranking pass over the fixed dataset, independent of
//! any particular respondent's answers: every node is scored against the
//! same subset (normally the full dataset). The adaptive session is the
//! online counterpart that narrows the subset per answer.

use super::node::TreeNode;
use crate::data::{Dataset, DependencyForest, QuestionCatalog, Subset};
use crate::error::{CribarError, Result};
use crate::score::{utility_score, WeightPolicy, WORST_SCORE};
use std::collections::HashSet;

/// Termination knobs for recursive construction.
///
/// Depth and sample bounds are independent and combinable; either alone
/// (or neither) is a valid configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildConfig {
    /// Stop recursing past this depth; `None` means unbounded.
    pub max_depth: Option<usize>,
    /// Stop recursing when the builder's subset holds fewer rows than
    /// this; `None` means no sample bound.
    pub min_samples: Option<usize>,
    /// Weight policy used for every node score.
    pub policy: WeightPolicy,
}

/// Recursive, depth-first builder of scored question forests.
pub struct TreeBuilder<'a> {
    subset: Subset<'a>,
    forest: &'a DependencyForest,
    catalog: &'a QuestionCatalog,
    config: BuildConfig,
}

impl<'a> TreeBuilder<'a> {
    /// Builder over the full dataset.
    #[must_use]
    pub fn new(
        dataset: &'a Dataset,
        forest: &'a DependencyForest,
        catalog: &'a QuestionCatalog,
        config: BuildConfig,
    ) -> Self {
        Self::over_subset(Subset::full(dataset), forest, catalog, config)
    }

    /// Subset-aware variant: score every node against an already narrowed
    /// view. The `min_samples` bound applies to this subset.
    #[must_use]
    pub fn over_subset(
        subset: Subset<'a>,
        forest: &'a DependencyForest,
        catalog: &'a QuestionCatalog,
        config: BuildConfig,
    ) -> Self {
        Self { subset, forest, catalog, config }
    }

    /// Build one fully scored subtree per root question.
    ///
    /// Questions absent from the catalog are skipped. A question whose
    /// choice set is empty still appears, carrying the worst sentinel
    /// score and no children, so uninformative questions are visible in
    /// reports rather than silently dropped.
    ///
    /// # Errors
    ///
    /// Returns `CyclicDependency` if a question code recurs on the
    /// current descent path. The forest is validated acyclic at load;
    /// this guard keeps a corrupt mapping from recursing unboundedly.
    pub fn build_forest(&self, roots: &[String]) -> Result<Vec<TreeNode>> {
        let mut path = HashSet::new();
        self.build_level(roots, 0, &mut path)
    }

    fn build_level(
        &self,
        codes: &[String],
        depth: usize,
        path: &mut HashSet<String>,
    ) -> Result<Vec<TreeNode>> {
        let mut nodes = Vec::new();
        for code in codes {
            if !self.catalog.contains(code) {
                continue;
            }
            if !path.insert(code.clone()) {
                return Err(CribarError::CyclicDependency { question: code.clone() });
            }

            let choices = self.subset.choice_set(code);
            let mut node = match utility_score(&self.subset, code, &choices, self.config.policy) {
                Some(record) => TreeNode::new(code.clone(), record.score, record.choices, depth),
                // unscoreable: sentinel score, and no subtree either
                None => TreeNode::new(code.clone(), WORST_SCORE, Vec::new(), depth),
            };

            if !choices.is_empty() && self.may_recurse(depth) {
                if let Some(kids) = self.forest.children_of(code) {
                    node.attach_children(self.build_level(kids, depth + 1, path)?);
                }
            }

            path.remove(code);
            nodes.push(node);
        }
        Ok(nodes)
    }

    fn may_recurse(&self, depth: usize) -> bool {
        let depth_ok = self.config.max_depth.is_none_or(|limit| depth < limit);
        let samples_ok = self.config.min_samples.is_none_or(|min| self.subset.len() >= min);
        depth_ok && samples_ok
    }
}
