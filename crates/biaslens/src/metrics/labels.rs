//! Binary outcome labels.

use serde::{Deserialize, Serialize};

use crate::error::{BiasLensError, Result};

/// Cell value for the negative outcome.
pub const NEGATIVE_LABEL: &str = "not hired";

/// Cell value for the positive outcome.
pub const POSITIVE_LABEL: &str = "hired";

/// A mapped outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// `"not hired"`, mapped to 0.
    Negative,
    /// `"hired"`, mapped to 1.
    Positive,
}

impl Label {
    /// Map a raw cell through the vocabulary. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            NEGATIVE_LABEL => Some(Label::Negative),
            POSITIVE_LABEL => Some(Label::Positive),
            _ => None,
        }
    }

    /// Whether this is the positive outcome.
    pub fn is_positive(&self) -> bool {
        matches!(self, Label::Positive)
    }
}

/// Map every value of a label column, failing on the first unknown value.
///
/// Rows in the error are 1-based data rows (the header is not counted).
pub fn map_labels<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Label>> {
    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            Label::parse(value).ok_or_else(|| BiasLensError::InvalidLabelValue {
                column: column.to_string(),
                row: idx + 1,
                value: value.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!(Label::parse("hired"), Some(Label::Positive));
        assert_eq!(Label::parse("not hired"), Some(Label::Negative));
        assert_eq!(Label::parse("Hired"), None);
        assert_eq!(Label::parse("1"), None);
        assert!(Label::Positive.is_positive());
        assert!(!Label::Negative.is_positive());
    }

    #[test]
    fn test_map_labels_reports_first_bad_row() {
        let err = map_labels("target", ["hired", "not hired", "maybe", "nope"]).unwrap_err();
        match err {
            BiasLensError::InvalidLabelValue { column, row, value } => {
                assert_eq!(column, "target");
                assert_eq!(row, 3);
                assert_eq!(value, "maybe");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
