//! API request handlers.

mod analyses;
mod datasets;
mod reports;
mod suggestions;

pub use analyses::*;
pub use datasets::*;
pub use reports::*;
pub use suggestions::*;
