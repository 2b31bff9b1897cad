//! The question-dependency forest.
//!
//! Maps each question code to its ordered follow-up questions, or `None`
//! when it has no children. The distinction matters: "no entry" and an
//! explicit `null` both mean childless, while an empty list means "has a
//! children slot that is currently empty" — callers treat only a
//! non-empty `Some` as having children.
//!
//! The forest is externally supplied configuration; acyclicity is
//! validated once at load rather than defended against at every
//! traversal.

use crate::error::{CribarError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Parent → ordered children mapping over question codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyForest {
    children: HashMap<String, Option<Vec<String>>>,
}

impl DependencyForest {
    /// Build a forest from an explicit map.
    #[must_use]
    pub fn from_map(children: HashMap<String, Option<Vec<String>>>) -> Self {
        Self { children }
    }

    /// Direct children of a code.
    ///
    /// Returns `None` both for an explicit childless entry and for a code
    /// the forest never mentions.
    #[must_use]
    pub fn children_of(&self, code: &str) -> Option<&[String]> {
        match self.children.get(code) {
            Some(Some(kids)) => Some(kids.as_slice()),
            _ => None,
        }
    }

    /// True iff the code has at least one child.
    #[must_use]
    pub fn has_children(&self, code: &str) -> bool {
        self.children_of(code).is_some_and(|kids| !kids.is_empty())
    }

    /// Number of mapped codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True iff nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Verify the forest is acyclic.
    ///
    /// Depth-first walk over every entry with a path-local visited set.
    ///
    /// # Errors
    ///
    /// Returns `CyclicDependency` naming the first code found on a cycle.
    pub fn validate_acyclic(&self) -> Result<()> {
        let mut done: HashSet<&str> = HashSet::new();
        for code in self.children.keys() {
            if !done.contains(code.as_str()) {
                let mut path: Vec<&str> = Vec::new();
                self.walk(code, &mut path, &mut done)?;
            }
        }
        Ok(())
    }

    fn walk<'a>(
        &'a self,
        code: &'a str,
        path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
    ) -> Result<()> {
        if path.contains(&code) {
            return Err(CribarError::CyclicDependency { question: code.to_string() });
        }
        if done.contains(code) {
            return Ok(());
        }
        path.push(code);
        if let Some(kids) = self.children_of(code) {
            for kid in kids {
                self.walk(kid, path, done)?;
            }
        }
        path.pop();
        done.insert(code);
        Ok(())
    }
}
