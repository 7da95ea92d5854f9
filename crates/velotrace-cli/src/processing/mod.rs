//! Input handling and configuration resolution.

mod config;
mod input;

pub use config::{apply_overrides, resolve_extraction_config, ExtractionOverrides};
pub use input::{
    batch_output_path, batch_output_paths, determine_output_path, expand_inputs,
    SUPPORTED_EXTENSIONS,
};
