use super::*;
use crate::data::Dataset;
use approx::assert_relative_eq;
use OutcomeClass::{High, Low, Medium};

fn one_column(values: Vec<Value>, outcomes: Vec<OutcomeClass>) -> Dataset {
    let rows = values.into_iter().map(|v| vec![v]).collect();
    Dataset::new(vec!["q1".into()], rows, outcomes).unwrap()
}

#[test]
fn test_impurity_empty_is_zero() {
    assert_eq!(gini_impurity(&[]), 0.0);
}

#[test]
fn test_impurity_pure_is_zero() {
    assert_eq!(gini_impurity(&[High, High, High]), 0.0);
    assert_eq!(gini_impurity(&[Low]), 0.0);
}

#[test]
fn test_impurity_even_two_way_split() {
    assert_relative_eq!(gini_impurity(&[High, Low]), 0.5);
}

#[test]
fn test_impurity_three_way_maximum() {
    // three classes, evenly present: 1 - 3*(1/3)^2 = 2/3
    assert_relative_eq!(gini_impurity(&[Low, Medium, High]), 2.0 / 3.0);
}

#[test]
fn test_weight_policies_are_complementary() {
    for p in [0.0, 0.25, 0.5, 1.0] {
        assert_relative_eq!(
            WeightPolicy::RarityWeighted.weight(p) + WeightPolicy::ImpurityWeighted.weight(p),
            1.0
        );
    }
}

#[test]
fn test_policy_parsing() {
    assert_eq!("rarity".parse::<WeightPolicy>().unwrap(), WeightPolicy::RarityWeighted);
    assert_eq!(
        "impurity-weighted".parse::<WeightPolicy>().unwrap(),
        WeightPolicy::ImpurityWeighted
    );
    assert!("entropy".parse::<WeightPolicy>().is_err());
}

#[test]
fn test_perfect_split_scores_zero() {
    // q1=0 rows are all low, q1=1 rows are all high: both partitions are
    // pure, so the utility score is 0 under either policy.
    let data = one_column(
        vec![Value::Number(0.0), Value::Number(0.0), Value::Number(1.0), Value::Number(1.0)],
        vec![Low, Low, High, High],
    );
    let subset = Subset::full(&data);
    let choices = subset.choice_set("q1");

    for policy in [WeightPolicy::ImpurityWeighted, WeightPolicy::RarityWeighted] {
        let record = utility_score(&subset, "q1", &choices, policy).unwrap();
        assert_relative_eq!(record.score, 0.0);
        assert_eq!(record.answer_count, 2);
    }
}

#[test]
fn test_uninformative_question_scores_high() {
    // Both answers split the outcomes 50/50: each partition has impurity
    // 0.5 and mass 0.5, so weight=p gives (0.5*0.5 + 0.5*0.5)/2 = 0.25.
    let data = one_column(
        vec![Value::Number(0.0), Value::Number(0.0), Value::Number(1.0), Value::Number(1.0)],
        vec![Low, High, Low, High],
    );
    let subset = Subset::full(&data);
    let choices = subset.choice_set("q1");

    let record = utility_score(&subset, "q1", &choices, WeightPolicy::ImpurityWeighted).unwrap();
    assert_relative_eq!(record.score, 0.25);
}

#[test]
fn test_rarity_weighting_upweights_rare_branch() {
    // One rare impure answer, one common pure answer. Rarity weighting
    // must score this question worse than impurity weighting does.
    let data = one_column(
        vec![
            Value::Number(0.0),
            Value::Number(0.0),
            Value::Number(0.0),
            Value::Number(0.0),
            Value::Number(1.0),
            Value::Number(1.0),
        ],
        vec![Low, Low, Low, Low, Low, High],
    );
    let subset = Subset::full(&data);
    let choices = subset.choice_set("q1");

    let rarity = utility_score(&subset, "q1", &choices, WeightPolicy::RarityWeighted).unwrap();
    let freq = utility_score(&subset, "q1", &choices, WeightPolicy::ImpurityWeighted).unwrap();
    assert!(rarity.score > freq.score);
}

#[test]
fn test_empty_choices_is_unscoreable() {
    let data = one_column(vec![Value::Missing], vec![Low]);
    let subset = Subset::full(&data);
    assert!(utility_score(&subset, "q1", &[], WeightPolicy::RarityWeighted).is_none());
}

#[test]
fn test_empty_subset_scores_zero_not_nan() {
    let data = one_column(vec![Value::Number(1.0)], vec![Low]);
    let full = Subset::full(&data);
    let empty = full.filter("q1", &Value::Number(7.0));
    assert!(empty.is_empty());

    let record =
        utility_score(&empty, "q1", &[Value::Number(1.0)], WeightPolicy::RarityWeighted).unwrap();
    assert_eq!(record.score, 0.0);
    assert!(record.score.is_finite());
}

#[test]
fn test_score_record_display_lists_question() {
    let data = one_column(vec![Value::Number(1.0)], vec![Low]);
    let subset = Subset::full(&data);
    let record = utility_score(&subset, "q1", &[Value::Number(1.0)], WeightPolicy::RarityWeighted)
        .unwrap();
    let line = record.to_string();
    assert!(line.contains("q1"));
    assert!(line.contains("answers=1"));
}
