//! The session state machine.

use super::{AnswerCollector, Session, SessionConfig, SessionState};
use crate::data::{Dataset, DependencyForest, QuestionCatalog, Subset, Value};
use crate::error::{CribarError, Result};
use crate::score::{utility_score, ScoreRecord};

/// Run one adaptive session to termination.
///
/// The initial queue is deduplicated and filtered to catalog-declared
/// codes. Each iteration:
///
/// 1. scores every queued question against the current subset, removing
///    any whose choice set is empty, and records the round's score table
///    on the session;
/// 2. prunes questions scoring above `best * reject_multiplier` (this
///    round's queue only, not a permanent exclusion);
/// 3. selects the lowest-scoring survivor, ties broken by queue order;
/// 4. collects an answer, re-invoking the collector until the value is a
///    member of the choice set;
/// 5. filters the subset to rows matching the answer;
/// 6. on an affirmative answer, prepends the question's children to the
///    queue front — just-unlocked follow-ups are asked before previously
///    queued siblings;
/// 7. re-checks the stop conditions (queue exhausted, subset collapsed).
///
/// # Errors
///
/// Returns `InvalidParameter` when `reject_multiplier < 1.0`, and
/// propagates any error from the collector.
pub fn run_session<'a, C: AnswerCollector>(
    initial_queue: &[String],
    dataset: &'a Dataset,
    forest: &DependencyForest,
    catalog: &QuestionCatalog,
    collector: &mut C,
    config: &SessionConfig,
) -> Result<Session<'a>> {
    if config.reject_multiplier < 1.0 {
        return Err(CribarError::InvalidParameter(format!(
            "reject_multiplier must be >= 1.0, got {} (it would prune the selected best)",
            config.reject_multiplier
        )));
    }

    let mut queue = dedup_queue(catalog.filter_known(initial_queue));
    let mut subset = Subset::full(dataset);
    let mut asked: Vec<(String, Value)> = Vec::new();
    let mut rounds: Vec<Vec<ScoreRecord>> = Vec::new();
    let mut state =
        if queue.is_empty() { SessionState::DoneQueueEmpty } else { SessionState::Running };

    while state == SessionState::Running {
        let scores = score_queue(&mut queue, &subset, config);
        if queue.is_empty() {
            state = SessionState::DoneQueueEmpty;
            break;
        }
        rounds.push(scores.clone());

        let (selected, choices) = select_and_prune(&mut queue, scores, config.reject_multiplier);

        let answer = loop {
            let candidate = collector.collect(&selected, &choices)?;
            if choices.contains(&candidate) {
                break candidate;
            }
            // out-of-set answer: rejected, never coerced; ask again
        };

        subset = subset.filter(&selected, &answer);

        if forest.has_children(&selected) && answer.is_affirmative() {
            unlock_children(&mut queue, &asked, forest, catalog, &selected);
        }

        asked.push((selected, answer));

        if queue.is_empty() {
            state = SessionState::DoneQueueEmpty;
        } else if subset.len() < config.min_sample_threshold {
            state = SessionState::DoneSubsetTooSmall;
        }
    }

    Ok(Session::new(state, subset, asked, rounds))
}

/// Deduplicate while preserving first occurrence order.
fn dedup_queue(codes: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    codes.into_iter().filter(|code| seen.insert(code.clone())).collect()
}

/// Score the queue against the live subset, dropping unscoreable entries
/// (empty choice set) from the queue. The returned records stay aligned
/// with the surviving queue.
fn score_queue(
    queue: &mut Vec<String>,
    subset: &Subset<'_>,
    config: &SessionConfig,
) -> Vec<ScoreRecord> {
    let mut scores = Vec::with_capacity(queue.len());
    queue.retain(|code| {
        let choices = subset.choice_set(code);
        match utility_score(subset, code, &choices, config.policy) {
            Some(record) => {
                scores.push(record);
                true
            }
            None => false,
        }
    });
    scores
}

/// Prune everything above the rejection bound, pick the best survivor,
/// and remove it from the queue. Returns the selected code and its
/// choice set.
fn select_and_prune(
    queue: &mut Vec<String>,
    scores: Vec<ScoreRecord>,
    reject_multiplier: f64,
) -> (String, Vec<Value>) {
    let best = scores.iter().map(|r| r.score).fold(f64::INFINITY, f64::min);
    let reject_threshold = best * reject_multiplier;

    let mut survivors: Vec<ScoreRecord> =
        scores.into_iter().filter(|r| r.score <= reject_threshold).collect();
    queue.retain(|code| survivors.iter().any(|r| &r.question == code));

    // lowest score wins; first occurrence in queue order breaks ties
    let mut winner = 0;
    for (i, record) in survivors.iter().enumerate().skip(1) {
        if record.score < survivors[winner].score {
            winner = i;
        }
    }
    let selected = survivors.swap_remove(winner);
    queue.retain(|code| code != &selected.question);
    (selected.question, selected.choices)
}

/// Prepend the selected question's children to the queue front, keeping
/// declared order, skipping codes outside the catalog and codes already
/// queued or already asked (the queue never holds duplicates).
fn unlock_children(
    queue: &mut Vec<String>,
    asked: &[(String, Value)],
    forest: &DependencyForest,
    catalog: &QuestionCatalog,
    selected: &str,
) {
    let Some(kids) = forest.children_of(selected) else {
        return;
    };
    let fresh: Vec<String> = catalog
        .filter_known(kids)
        .into_iter()
        .filter(|kid| !queue.contains(kid) && !asked.iter().any(|(q, _)| q == kid))
        .collect();
    queue.splice(0..0, fresh);
}
