//! Shared utilities for velotrace-cli
//!
//! Argument parsing, input expansion and config resolution used by the
//! `velotrace` subcommands.

pub mod parsers;
pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use parsers::{parse_crossing_indices, OutputFormat};
pub use processing::{
    apply_overrides, batch_output_path, batch_output_paths, determine_output_path, expand_inputs,
    resolve_extraction_config, ExtractionOverrides, SUPPORTED_EXTENSIONS,
};
