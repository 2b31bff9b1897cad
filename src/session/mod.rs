//! The adaptive elicitation session.
//!
//! A single-pass, stateful loop over one respondent: each round scores the
//! pending queue against the live subset, prunes clearly worse candidates,
//! asks the best question through the `AnswerCollector` seam, narrows the
//! subset by the answer, and unlocks follow-up questions on affirmative
//! answers. Terminates when the queue empties or the subset collapses
//! below the sample threshold.
//!
//! All session state lives in the `Session` value; nothing ambient is
//! mutated, and independent sessions never share state.

mod driver;


pub use driver::run_session;

use crate::data::{Subset, Value};
use crate::error::Result;
use crate::score::{ScoreRecord, WeightPolicy};
use serde::Serialize;

/// The answer-collection seam: the session's sole I/O boundary.
///
/// Implementations block until an answer is available (a human at a
/// terminal, a scripted stub in tests). The driver validates the returned
/// value against the question's choice set and re-invokes the collector
/// until a valid answer arrives; an invalid answer never advances the
/// session. A collector that cannot produce an answer at all (closed
/// input, lost connection) returns an error, which aborts the session.
pub trait AnswerCollector {
    /// Produce one answer for `question`, drawn from `choices`.
    ///
    /// # Errors
    ///
    /// Returns an error when no answer can be obtained; the session
    /// propagates it to the caller.
    fn collect(&mut self, question: &str, choices: &[Value]) -> Result<Value>;
}

/// Why a session stopped, or that it has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Still accepting answers.
    Running,
    /// No candidate questions remain.
    DoneQueueEmpty,
    /// The live subset fell below the sample threshold.
    DoneSubsetTooSmall,
}

/// Tunables for one session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Terminate once the subset holds fewer rows than this.
    pub min_sample_threshold: usize,
    /// Per-round pruning bound: questions scoring above
    /// `best * reject_multiplier` are dropped from the queue for good.
    /// Must be at least 1.0, or the bound would prune the best question
    /// itself.
    pub reject_multiplier: f64,
    /// Weight policy for per-round scoring.
    pub policy: WeightPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // historical operating point of the screening deployment
            min_sample_threshold: 100,
            reject_multiplier: 1.5,
            policy: WeightPolicy::RarityWeighted,
        }
    }
}

/// A finished (or in-progress) session.
///
/// Mutated only by [`run_session`], one question at a time; once a
/// terminal state is reached the value is immutable.
#[derive(Debug)]
pub struct Session<'a> {
    state: SessionState,
    subset: Subset<'a>,
    asked: Vec<(String, Value)>,
    rounds: Vec<Vec<ScoreRecord>>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        state: SessionState,
        subset: Subset<'a>,
        asked: Vec<(String, Value)>,
        rounds: Vec<Vec<ScoreRecord>>,
    ) -> Self {
        Self { state, subset, asked, rounds }
    }

    /// Terminal state tag (or `Running` for an in-flight snapshot).
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The final filtered subset.
    #[must_use]
    pub fn subset(&self) -> &Subset<'a> {
        &self.subset
    }

    /// Full question/answer history, in the order asked.
    #[must_use]
    pub fn asked(&self) -> &[(String, Value)] {
        &self.asked
    }

    /// Per-round score tables, one entry per question asked: the scored
    /// queue as it stood before that round's pruning and selection.
    #[must_use]
    pub fn score_rounds(&self) -> &[Vec<ScoreRecord>] {
        &self.rounds
    }
}
