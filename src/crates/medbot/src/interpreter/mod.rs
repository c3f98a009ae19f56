//! Tool result interpretation
//!
//! Turns structured [`ToolResult`](tooling::ToolResult) values into the text
//! blocks that make up the generation context.

pub mod formatter;

pub use formatter::{ResponseFormatter, DRUG_NOT_FOUND_GUIDANCE};
