//! Layout-independent content of a bias report.

use serde::Serialize;

use crate::store::Analysis;
use crate::suggestion::Suggestion;

/// Note printed when an analysis has no applied fixes.
pub const NO_FIXES_NOTE: &str = "No fixes applied.";

/// Everything a rendered report shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub analysis_id: u64,
    pub title: String,
    /// Label/value rows of the summary table.
    pub summary: Vec<(String, String)>,
    /// Texts of applied suggestions, in creation order.
    pub applied_fixes: Vec<String>,
}

impl ReportDocument {
    /// Build the document from an analysis and its applied suggestions.
    ///
    /// Suggestions that are not applied are skipped.
    pub fn new(analysis: &Analysis, suggestions: &[Suggestion]) -> Self {
        Self {
            analysis_id: analysis.id,
            title: format!("Bias Analysis Report (ID: {})", analysis.id),
            summary: vec![
                ("Accuracy:".to_string(), format!("{:.2}%", analysis.accuracy)),
                ("Bias Score:".to_string(), format!("{:.4}", analysis.bias_score)),
            ],
            applied_fixes: suggestions
                .iter()
                .filter(|s| s.applied)
                .map(|s| s.text.clone())
                .collect(),
        }
    }

    /// Lines for the fixes section: bullets, or the "no fixes" note.
    pub fn fix_lines(&self) -> Vec<String> {
        if self.applied_fixes.is_empty() {
            vec![NO_FIXES_NOTE.to_string()]
        } else {
            self.applied_fixes.iter().map(|f| format!("- {}", f)).collect()
        }
    }

    /// Plain-text rendering, used for terminal output.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        for (label, value) in &self.summary {
            out.push_str(&format!("  {:12} {}\n", label, value));
        }
        out.push_str("\nApplied Fixes:\n");
        for line in self.fix_lines() {
            out.push_str(&format!("  {}\n", line));
        }
        out
    }
}
