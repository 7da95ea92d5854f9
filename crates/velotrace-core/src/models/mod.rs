//! Data models for Velotrace
//!
//! Configuration structures for each pipeline stage. All of them deserialize
//! from YAML with per-field defaults so a config file only needs to name what
//! it changes.

mod calibration;
mod classifier;
mod extraction;
mod segmenter;

#[cfg(test)]
mod tests;

pub use calibration::Calibration;
pub use classifier::{BorderPolicy, ClassifierConfig, DenoiseConfig, HueBand, RowBand, RowRange};
pub use extraction::{ExtractionConfig, ResolvedGeometry};
pub use segmenter::{
    CrossingSelection, CycleLength, SegmenterConfig, SmoothingConfig, MIN_RESAMPLE_STEP,
};
