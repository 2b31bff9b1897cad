//! Question catalog: code → prompt text and declared value kind.
//!
//! The catalog artifact is produced upstream from the taxonomy; this module
//! only consumes it. The declared `ValueKind` replaces runtime type
//! sniffing of stored answers: a question's kind is configuration, not
//! something inferred per cell.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declared kind of a question's answer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Yes/no, stored as 0/1.
    Boolean,
    /// Fractional score in [0, 1], converted to outcome classes at load.
    Scale,
    /// Free categorical values.
    Categorical,
    /// Structural taxonomy node; groups children, never asked directly.
    Layer,
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Human-readable prompt shown when eliciting an answer.
    #[serde(rename = "question")]
    pub prompt: String,
    /// Declared answer kind.
    #[serde(rename = "values")]
    pub kind: ValueKind,
}

/// Lookup table from question code to catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: HashMap<String, Question>,
}

impl QuestionCatalog {
    /// Build a catalog from an explicit map.
    #[must_use]
    pub fn from_map(questions: HashMap<String, Question>) -> Self {
        Self { questions }
    }

    /// Entry for a code, if declared.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Question> {
        self.questions.get(code)
    }

    /// True iff the code is declared.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.questions.contains_key(code)
    }

    /// Prompt text for a code, falling back to the code itself.
    ///
    /// A missing prompt must not block the interview; the code is still
    /// meaningful to a clinician.
    #[must_use]
    pub fn prompt_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map_or(code, |q| q.prompt.as_str())
    }

    /// Number of declared questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True iff no questions are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Retain only catalog-declared codes, preserving input order.
    ///
    /// Applied to every queue insertion: codes the taxonomy references but
    /// the catalog never declared are silently skipped, never enqueued.
    #[must_use]
    pub fn filter_known<'a, I>(&self, codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        codes.into_iter().filter(|code| self.contains(code)).cloned().collect()
    }
}
