//! Metric engine: label mapping, accuracy and the equal opportunity gap.
//!
//! The engine works on a parsed [`DataTable`](crate::input::DataTable) and
//! never touches storage, so it can be exercised directly:
//!
//! ```
//! use biaslens::input::Parser;
//! use biaslens::metrics::MetricEngine;
//!
//! let csv = "target,predicted,gender\nhired,hired,male\nhired,not hired,female\n";
//! let (table, _hash) = Parser::new().parse_bytes(csv.as_bytes()).unwrap();
//!
//! let report = MetricEngine::new().evaluate(&table, "gender").unwrap();
//! assert_eq!(report.accuracy, 50.0);
//! assert_eq!(report.bias_score, 1.0);
//! ```

mod engine;
mod fairness;
mod labels;

pub use engine::{MetricEngine, MetricReport, PREDICTED_COLUMN, TARGET_COLUMN};
pub use fairness::{
    accuracy, equal_opportunity_difference, round2, true_positive_rates, GroupProportions,
    GroupRate, FEMALE_GROUP, MALE_GROUP,
};
pub use labels::{map_labels, Label, NEGATIVE_LABEL, POSITIVE_LABEL};
