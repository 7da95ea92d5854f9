//! Velotrace Core Library
//!
//! Extracts a representative Doppler velocity cycle from an echocardiogram
//! image: decode, convert to HSV, classify trace pixels, build a per-column
//! velocity function, and segment it into cardiac cycles.

pub mod color;
pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod interp;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use color::{Hsv, HsvFrame};
pub use config::{load_config, ConfigHandle};
pub use decoders::DecodedImage;
pub use error::{Result, WaveformError};
pub use models::{
    BorderPolicy, Calibration, ClassifierConfig, CrossingSelection, CycleLength, DenoiseConfig,
    ExtractionConfig, HueBand, RowBand, SegmenterConfig, SmoothingConfig,
};
pub use pipeline::{
    extract_cycle, process_file, CycleOutcome, DegenerateReason, ExtractionResult, Mask,
    ResampledSignal, SelectedCycle, Segmentation, VelocityTrace, CYCLE_POINTS, INVALID_CYCLE_MARKER,
};
