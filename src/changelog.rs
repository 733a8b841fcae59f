//! Release note processing: split bodies into sections, classify them, merge
//! across releases and render the result.

/// Cross-release aggregation into a combined document.
pub mod aggregate;

/// Section title classification and group priority.
pub mod category;

/// Markdown section parsing.
pub mod parser;

/// Markdown and JSON output.
pub mod render;
