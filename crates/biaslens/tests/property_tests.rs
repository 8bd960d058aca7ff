//! Property-based tests for the metric engine.
//!
//! These tests use proptest to generate random label columns and group
//! assignments and check the invariants of the computed metrics.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p biaslens --test property_tests
//!
//! # More cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p biaslens --test property_tests
//! ```

use proptest::prelude::*;

use biaslens::input::{DataTable, Parser};
use biaslens::metrics::{
    accuracy, equal_opportunity_difference, true_positive_rates, GroupProportions, Label,
    MetricEngine, FEMALE_GROUP, MALE_GROUP,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn label() -> impl Strategy<Value = Label> {
    prop_oneof![Just(Label::Positive), Just(Label::Negative)]
}

fn group() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(MALE_GROUP), Just(FEMALE_GROUP), Just("nonbinary"), Just("Male")]
}

/// Rows of (target, predicted, group).
fn rows() -> impl Strategy<Value = Vec<(Label, Label, &'static str)>> {
    prop::collection::vec((label(), label(), group()), 1..200)
}

fn label_text(label: Label) -> &'static str {
    if label.is_positive() {
        "hired"
    } else {
        "not hired"
    }
}

fn to_csv(rows: &[(Label, Label, &str)]) -> String {
    let mut out = String::from("target,predicted,gender\n");
    for (target, predicted, group) in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            label_text(*target),
            label_text(*predicted),
            group
        ));
    }
    out
}

fn table(rows: &[(Label, Label, &str)]) -> DataTable {
    Parser::new().parse_bytes(to_csv(rows).as_bytes()).unwrap().0
}

// =============================================================================
// Metric Invariants
// =============================================================================

proptest! {
    #[test]
    fn accuracy_is_a_percentage(rows in rows()) {
        let y_true: Vec<Label> = rows.iter().map(|r| r.0).collect();
        let y_pred: Vec<Label> = rows.iter().map(|r| r.1).collect();

        let acc = accuracy(&y_true, &y_pred);
        prop_assert!((0.0..=100.0).contains(&acc));
        prop_assert_eq!(accuracy(&y_true, &y_true), 100.0);
    }

    #[test]
    fn bias_score_is_bounded(rows in rows()) {
        let report = MetricEngine::new().evaluate(&table(&rows), "gender").unwrap();
        prop_assert!((0.0..=1.0).contains(&report.bias_score));
    }

    #[test]
    fn perfect_predictions_have_no_gap(rows in rows()) {
        let y_true: Vec<Label> = rows.iter().map(|r| r.0).collect();
        let groups: Vec<&str> = rows.iter().map(|r| r.2).collect();

        // Every group with a positive target has TPR 1; groups without have 0.
        let rates = true_positive_rates(&y_true, &y_true, &groups);
        let all_have_positives = rates.values().all(|r| r.positives > 0);
        if all_have_positives {
            prop_assert_eq!(equal_opportunity_difference(&rates), 0.0);
        }
    }

    #[test]
    fn engine_matches_direct_computation(rows in rows()) {
        let y_true: Vec<Label> = rows.iter().map(|r| r.0).collect();
        let y_pred: Vec<Label> = rows.iter().map(|r| r.1).collect();
        let groups: Vec<&str> = rows.iter().map(|r| r.2).collect();

        let report = MetricEngine::new().evaluate(&table(&rows), "GENDER").unwrap();
        let rates = true_positive_rates(&y_true, &y_pred, &groups);

        prop_assert_eq!(report.row_count, rows.len());
        prop_assert_eq!(report.accuracy, accuracy(&y_true, &y_pred));
        prop_assert_eq!(report.bias_score, equal_opportunity_difference(&rates));
    }

    #[test]
    fn proportions_sum_to_hundred_when_groups_present(values in prop::collection::vec(group(), 0..100)) {
        let props = GroupProportions::compute(values.iter().copied());
        let literal = props.male_count + props.female_count;

        if literal == 0 {
            prop_assert_eq!(props.male_percentage, 0.0);
            prop_assert_eq!(props.female_percentage, 0.0);
        } else {
            let total = props.male_percentage + props.female_percentage;
            prop_assert!((total - 100.0).abs() <= 0.011);
        }
    }

    #[test]
    fn unknown_labels_are_rejected(noise in "[a-zA-Z ]{1,12}") {
        prop_assume!(noise != "hired" && noise != "not hired");
        let csv = format!("target,predicted,gender\nhired,{},male\n", noise);
        let (table, _) = Parser::new().parse_bytes(csv.as_bytes()).unwrap();

        prop_assert!(MetricEngine::new().evaluate(&table, "gender").is_err());
    }
}
