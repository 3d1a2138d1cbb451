//! Application layer - use cases and orchestration.
//!
//! This layer classifies and resolves remote entities, exports folders and
//! renders the results.

pub mod classifier;
pub mod exporter;
pub mod formatter;
pub mod resolver;

pub use exporter::export_all_folders;
pub use formatter::{format_folders_json, format_folders_text, format_stats, OutputFormat};
