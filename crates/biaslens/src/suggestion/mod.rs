//! Remediation suggestions for biased analyses.
//!
//! This module defines the stored suggestion record and the threshold rules
//! that produce suggestions from an analysis.

mod generator;
mod suggestion;

pub use generator::{SuggestionEngine, SuggestionThresholds, MITIGATE_TEXT, REBALANCE_TEXT};
pub use suggestion::{NewSuggestion, Suggestion, SuggestionCategory};
