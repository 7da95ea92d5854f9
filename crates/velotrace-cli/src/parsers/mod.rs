//! Parsing functions for CLI arguments.

mod selection;

pub use selection::{parse_crossing_indices, OutputFormat};
