//! Extraction configuration discovery and persistence.
//!
//! Configuration is YAML for [`ExtractionConfig`]. [`load_config`] walks a
//! list of candidate locations and falls back to built-in defaults, keeping
//! a warning for every candidate it had to skip.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WaveformError};
use crate::models::ExtractionConfig;

/// Environment variable naming a config file to try after the explicit path
pub const CONFIG_ENV_VAR: &str = "VELOTRACE_CONFIG";

/// Candidate config file names searched on disk
const CONFIG_FILENAMES: &[&str] = &["velotrace.yml", "velotrace.yaml"];

/// Loaded configuration with its source path and any warnings.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    pub config: ExtractionConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: ExtractionConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }

    /// Report where the configuration came from and what was skipped.
    pub fn log_usage(&self) {
        match &self.source {
            Some(source) => log::info!("loaded config from {}", source.display()),
            None => log::info!("using built-in extraction defaults"),
        }
        for warning in &self.warnings {
            log::warn!("config: {}", warning);
        }
    }
}

/// Load configuration from the first candidate that parses.
///
/// Order: `custom_path`, `$VELOTRACE_CONFIG`, `./config/velotrace.yml`,
/// `./velotrace.yml` (each also as `.yaml`), then `~/velotrace/velotrace.yml`.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in config_candidates(custom_path) {
        if !candidate.is_file() {
            continue;
        }
        match load_config_file(&candidate) {
            Ok(config) => {
                let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                return ConfigHandle::with_config(config, Some(source), warnings);
            }
            Err(err) => warnings.push(err.to_string()),
        }
    }

    if let Some(path) = custom_path {
        if !path.is_file() {
            warnings.push(format!("config file {} does not exist", path.display()));
        }
    }
    warnings.push("no extraction config found; using built-in defaults".to_string());
    ConfigHandle::with_config(ExtractionConfig::default(), None, warnings)
}

/// Read and sanitize one config file, failing on any read or parse error.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ExtractionConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| WaveformError::io(path, e))?;
    let config: ExtractionConfig = serde_yaml::from_str(&contents).map_err(|e| {
        WaveformError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;
    Ok(config.sanitize())
}

/// Serialize `config` as YAML to `path`.
pub fn save_config<P: AsRef<Path>>(config: &ExtractionConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_yaml(config)?).map_err(|e| WaveformError::io(path, e))
}

/// YAML text for `config`
pub fn to_yaml(config: &ExtractionConfig) -> Result<String> {
    serde_yaml::to_string(config)
        .map_err(|e| WaveformError::Config(format!("failed to serialize config: {}", e)))
}

fn config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
        }
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join(name));
        }
    }

    if let Some(user_dir) = user_config_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(user_dir.join(name));
        }
    }

    candidates
}

/// `~/velotrace`, if the home directory is known
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("velotrace"))
}

/// Default location `velotrace init` writes to
pub fn user_config_path() -> Option<PathBuf> {
    user_config_dir().map(|dir| dir.join(CONFIG_FILENAMES[0]))
}
