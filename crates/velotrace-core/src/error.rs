//! Error type shared by every stage of the extraction pipeline.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WaveformError>;

/// Failures that stop an extraction before a cycle can be produced.
///
/// A degenerate segmentation (no usable crossings) is not an error; it is
/// reported through [`crate::pipeline::CycleOutcome::Degenerate`].
#[derive(Debug, thiserror::Error)]
pub enum WaveformError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of the supported raster formats
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The file was readable but its contents could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// A configuration value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configured geometry does not fit the actual image
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A configuration file could not be read back or written out
    #[error("Config file error: {0}")]
    Config(String),

    /// Writing an output artifact failed
    #[error("Export error: {0}")]
    Export(String),
}

impl WaveformError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
