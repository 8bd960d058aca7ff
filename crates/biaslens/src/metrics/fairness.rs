//! Accuracy, true-positive rates and group proportions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::labels::Label;

/// Literal group value counted as "male" in proportion reports.
pub const MALE_GROUP: &str = "male";

/// Literal group value counted as "female" in proportion reports.
pub const FEMALE_GROUP: &str = "female";

/// Percentage of rows where the prediction matches the target (0-100).
///
/// Returns 0 for empty input.
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> f64 {
    let total = y_true.len().min(y_pred.len());
    if total == 0 {
        return 0.0;
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();

    correct as f64 / total as f64 * 100.0
}

/// True-positive rate of one sensitive group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRate {
    /// Rows in the group.
    pub rows: usize,
    /// Rows with target = 1.
    pub positives: usize,
    /// Rows with target = 1 and predicted = 1.
    pub true_positives: usize,
}

impl GroupRate {
    /// TPR, or 0 when the group has no positive targets.
    pub fn rate(&self) -> f64 {
        if self.positives == 0 {
            0.0
        } else {
            self.true_positives as f64 / self.positives as f64
        }
    }
}

/// Per-group true-positive rates, in order of first appearance.
pub fn true_positive_rates(
    y_true: &[Label],
    y_pred: &[Label],
    groups: &[&str],
) -> IndexMap<String, GroupRate> {
    let mut rates: IndexMap<String, GroupRate> = IndexMap::new();

    for ((truth, pred), group) in y_true.iter().zip(y_pred).zip(groups) {
        let entry = rates.entry((*group).to_string()).or_insert(GroupRate {
            rows: 0,
            positives: 0,
            true_positives: 0,
        });
        entry.rows += 1;
        if truth.is_positive() {
            entry.positives += 1;
            if pred.is_positive() {
                entry.true_positives += 1;
            }
        }
    }

    rates
}

/// Equal opportunity difference: largest gap between group TPRs.
pub fn equal_opportunity_difference(rates: &IndexMap<String, GroupRate>) -> f64 {
    let mut values = rates.values().map(GroupRate::rate);
    let Some(first) = values.next() else {
        return 0.0;
    };

    let (min, max) = values.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r)));
    max - min
}

/// Share of the "male" and "female" groups in a sensitive column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupProportions {
    pub male_count: usize,
    pub female_count: usize,
    /// Percentage rounded to two decimals.
    pub male_percentage: f64,
    /// Percentage rounded to two decimals.
    pub female_percentage: f64,
}

impl GroupProportions {
    /// Count exact `"male"` / `"female"` cells. Other values are ignored.
    pub fn compute<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut male_count: usize = 0;
        let mut female_count: usize = 0;

        for value in values {
            match value {
                MALE_GROUP => male_count += 1,
                FEMALE_GROUP => female_count += 1,
                _ => {}
            }
        }

        // Avoid division by zero when neither group appears
        let total = (male_count + female_count).max(1) as f64;

        Self {
            male_count,
            female_count,
            male_percentage: round2(male_count as f64 / total * 100.0),
            female_percentage: round2(female_count as f64 / total * 100.0),
        }
    }

    /// Whether either group exceeds `threshold` percent.
    pub fn is_dominated(&self, threshold: f64) -> bool {
        self.male_percentage > threshold || self.female_percentage > threshold
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
