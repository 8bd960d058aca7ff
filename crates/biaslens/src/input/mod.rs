//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{content_hash, Parser, ParserConfig};
pub use source::{normalize_column_name, DataTable, SourceMetadata};
