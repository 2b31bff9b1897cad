//! Property tests for the scoring and tree-construction engine.
//!
//! Ensures the core invariants hold for arbitrary inputs:
//! - Impurity and utility scores bounded, never NaN or infinite
//! - Bottom-up best-score invariant over arbitrary forests
//! - Rank extraction visits every node exactly once
//! - Sessions terminate within the reachable-question bound

use cribar::data::{Dataset, DependencyForest, OutcomeClass, QuestionCatalog, Subset, Value};
use cribar::score::{gini_impurity, utility_score, WeightPolicy};
use cribar::session::{run_session, AnswerCollector, SessionConfig, SessionState};
use cribar::tree::{rank_questions, TreeNode};
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// Strategy Helpers
// =============================================================================

fn arb_class() -> impl Strategy<Value = OutcomeClass> {
    prop_oneof![
        Just(OutcomeClass::Low),
        Just(OutcomeClass::Medium),
        Just(OutcomeClass::High),
    ]
}

/// A one-column dataset with coded answers in [0, n_codes).
fn arb_dataset(n_codes: u8, rows: std::ops::Range<usize>) -> impl Strategy<Value = Dataset> {
    rows.prop_flat_map(move |n| {
        (vec(0..n_codes, n), vec(arb_class(), n)).prop_map(|(answers, outcomes)| {
            let rows = answers
                .into_iter()
                .map(|a| vec![Value::Number(f64::from(a))])
                .collect();
            Dataset::new(vec!["q".into()], rows, outcomes).expect("well-formed table")
        })
    })
}

/// An arbitrary scored tree, built through the same attach path the
/// builder uses, so the best-score invariant is exercised for real.
fn arb_tree(depth: u32) -> impl Strategy<Value = TreeNode> {
    let leaf = (0.0f64..=1.0).prop_map(|score| {
        TreeNode::new("q".into(), score, vec![Value::Number(1.0)], 0)
    });
    leaf.prop_recursive(depth, 64, 4, |inner| {
        (0.0f64..=1.0, vec(inner, 0..4)).prop_map(|(score, children)| {
            let mut node = TreeNode::new("q".into(), score, vec![Value::Number(1.0)], 0);
            node.attach_children(children);
            node
        })
    })
}

fn check_best_score(node: &TreeNode) {
    let expected = node
        .children
        .iter()
        .map(|c| c.best_score)
        .fold(node.score, f64::min);
    assert_eq!(node.best_score, expected);
    assert!(node.best_score <= node.score);
    for child in &node.children {
        check_best_score(child);
    }
}

struct FirstChoice;

impl AnswerCollector for FirstChoice {
    fn collect(&mut self, _question: &str, choices: &[Value]) -> cribar::Result<Value> {
        Ok(choices[0].clone())
    }
}

// =============================================================================
// Impurity and Utility Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_impurity_bounded(labels in vec(arb_class(), 0..200)) {
        let g = gini_impurity(&labels);
        prop_assert!(g.is_finite(), "impurity {} not finite", g);
        // three observed classes cap the impurity at 1 - 1/3
        prop_assert!((0.0..=2.0 / 3.0 + 1e-12).contains(&g), "impurity {} out of range", g);
    }

    #[test]
    fn prop_pure_labels_have_zero_impurity(
        class in arb_class(),
        n in 1usize..100
    ) {
        let labels = vec![class; n];
        prop_assert_eq!(gini_impurity(&labels), 0.0);
    }

    #[test]
    fn prop_utility_bounded_both_policies(dataset in arb_dataset(4, 1..60)) {
        let subset = Subset::full(&dataset);
        let choices = subset.choice_set("q");
        prop_assume!(!choices.is_empty());

        for policy in [WeightPolicy::RarityWeighted, WeightPolicy::ImpurityWeighted] {
            let record = utility_score(&subset, "q", &choices, policy)
                .expect("non-empty choice set");
            prop_assert!(record.score.is_finite());
            prop_assert!(
                (0.0..=1.0).contains(&record.score),
                "{policy} score {} not in [0, 1]",
                record.score
            );
        }
    }

    #[test]
    fn prop_single_choice_rarity_score_is_zero(
        outcomes in vec(arb_class(), 1..50)
    ) {
        // every row shares one answer: p = 1, so the rarity weight (1 - p)
        // zeroes the only term
        let rows = outcomes.iter().map(|_| vec![Value::Number(1.0)]).collect();
        let dataset = Dataset::new(vec!["q".into()], rows, outcomes).unwrap();
        let subset = Subset::full(&dataset);
        let choices = subset.choice_set("q");

        let record = utility_score(&subset, "q", &choices, WeightPolicy::RarityWeighted)
            .expect("non-empty choice set");
        prop_assert!(record.score.abs() < 1e-12);
    }
}

// =============================================================================
// Forest Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_best_score_invariant(root in arb_tree(4)) {
        check_best_score(&root);
    }

    #[test]
    fn prop_rank_visits_every_node_once(root in arb_tree(4)) {
        let total = root.subtree_size();
        let ordering = rank_questions(std::slice::from_ref(&root));
        prop_assert_eq!(ordering.len(), total);
    }

    #[test]
    fn prop_rank_first_entry_holds_forest_minimum(root in arb_tree(4)) {
        let ordering = rank_questions(std::slice::from_ref(&root));
        // the first expansion is the root; its best_score is by the
        // invariant the minimum of the whole forest
        let min_emitted = ordering
            .iter()
            .map(|r| r.best_score)
            .fold(f64::INFINITY, f64::min);
        prop_assert_eq!(ordering[0].best_score, min_emitted);
    }
}

// =============================================================================
// Session Properties
// =============================================================================

fn session_fixture(dataset: &Dataset) -> (QuestionCatalog, DependencyForest) {
    let catalog: QuestionCatalog = serde_json::from_str(
        r#"{"q": {"question": "Only question", "values": "boolean"}}"#,
    )
    .unwrap();
    let forest: DependencyForest = serde_json::from_str(r#"{"q": null}"#).unwrap();
    let _ = dataset;
    (catalog, forest)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_session_terminates_within_bound(dataset in arb_dataset(3, 1..40)) {
        let (catalog, forest) = session_fixture(&dataset);
        let config = SessionConfig {
            min_sample_threshold: 0,
            reject_multiplier: 2.0,
            policy: WeightPolicy::RarityWeighted,
        };
        let queue: Vec<String> = vec!["q".into()];

        let session =
            run_session(&queue, &dataset, &forest, &catalog, &mut FirstChoice, &config)
                .expect("valid config");

        // one root, no descendants: at most one question asked
        prop_assert!(session.asked().len() <= 1);
        prop_assert!(session.state() != SessionState::Running);
    }

    #[test]
    fn prop_session_subset_never_grows(dataset in arb_dataset(3, 1..40)) {
        let (catalog, forest) = session_fixture(&dataset);
        let config = SessionConfig {
            min_sample_threshold: 0,
            reject_multiplier: 2.0,
            policy: WeightPolicy::RarityWeighted,
        };
        let queue: Vec<String> = vec!["q".into()];

        let session =
            run_session(&queue, &dataset, &forest, &catalog, &mut FirstChoice, &config)
                .expect("valid config");
        prop_assert!(session.subset().len() <= dataset.n_rows());
    }
}
