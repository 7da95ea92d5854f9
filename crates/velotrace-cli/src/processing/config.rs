//! Extraction config resolution for CLI commands.

use std::path::Path;

use velotrace_core::config::{load_config, load_config_file};
use velotrace_core::models::{CrossingSelection, ExtractionConfig};

use crate::parsers::parse_crossing_indices;

/// Command-line settings that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ExtractionOverrides {
    /// Comma-separated crossing ordinals
    pub manual: Option<String>,
    /// Use automatic lobe-based selection
    pub auto: bool,
    /// Keep the cycle's first and last samples as measured
    pub no_zero_endpoints: bool,
}

/// Load the extraction config for a command.
///
/// An explicit `config_path` must load; without one, discovery falls back
/// to built-in defaults.
pub fn resolve_extraction_config(config_path: Option<&Path>) -> Result<ExtractionConfig, String> {
    let config = match config_path {
        Some(path) => {
            let config = load_config_file(path).map_err(|e| e.to_string())?;
            log::info!("loaded config from {}", path.display());
            config
        }
        None => {
            let handle = load_config(None);
            handle.log_usage();
            handle.config
        }
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Apply command-line overrides on top of a loaded config.
pub fn apply_overrides(
    config: &mut ExtractionConfig,
    overrides: &ExtractionOverrides,
) -> Result<(), String> {
    if let Some(list) = &overrides.manual {
        if overrides.auto {
            return Err("--manual and --auto cannot be combined".to_string());
        }
        config.segmenter.selection = CrossingSelection::Manual {
            indices: parse_crossing_indices(list)?,
        };
    } else if overrides.auto {
        // Keep tuned window/ratio from the config if it already selects automatically
        if !matches!(config.segmenter.selection, CrossingSelection::Automatic { .. }) {
            config.segmenter.selection = CrossingSelection::automatic();
        }
    }
    if overrides.no_zero_endpoints {
        config.segmenter.force_zero_endpoints = false;
    }
    Ok(())
}
