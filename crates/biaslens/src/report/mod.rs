//! Report views and PDF export.
//!
//! [`BiasReport`] and [`SuggestionOutcome`] are the JSON views served by the
//! API. [`ReportDocument`] holds what the PDF shows and [`ReportRenderer`]
//! lays it out and writes `bias_report_<id>.pdf`.

mod document;
mod pdf;
mod view;

pub use document::{ReportDocument, NO_FIXES_NOTE};
pub use pdf::{render_pdf, report_file_name, ReportRenderer};
pub use view::{bias_levels, AnalysisSummary, BiasLevel, BiasReport, SuggestionOutcome};
