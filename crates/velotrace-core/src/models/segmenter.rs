//! Signal smoothing and cycle segmentation settings.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaveformError};

/// Finest resample spacing accepted, in columns
pub const MIN_RESAMPLE_STEP: f64 = 1e-4;

/// Velocity function post-processing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Centered moving-average width in columns (odd)
    pub window: usize,

    /// Softmax sharpness for columns that straddle the baseline
    pub sharpness: f64,

    /// Resample spacing in column units for crossing detection
    pub resample_step: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: 13,
            sharpness: 10.0,
            resample_step: 0.01,
        }
    }
}

/// Plausible length of one cardiac cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CycleLength {
    /// Bounds in resampled grid points, inclusive
    Points { min: usize, max: usize },

    /// Bounds derived from sweep speed and a heart-rate range
    HeartRate {
        columns_per_second: f64,
        min_bpm: f64,
        max_bpm: f64,
    },
}

impl Default for CycleLength {
    fn default() -> Self {
        CycleLength::Points {
            min: 15_000,
            max: 30_000,
        }
    }
}

impl CycleLength {
    /// Inclusive `(min, max)` gap between crossings, in grid points.
    pub fn bounds(&self, step: f64) -> Result<(usize, usize)> {
        match *self {
            CycleLength::Points { min, max } => {
                if min > max {
                    return Err(WaveformError::InvalidConfig(format!(
                        "cycle length min {} exceeds max {}",
                        min, max
                    )));
                }
                Ok((min, max))
            }
            CycleLength::HeartRate {
                columns_per_second,
                min_bpm,
                max_bpm,
            } => {
                if !(columns_per_second > 0.0 && min_bpm > 0.0 && min_bpm < max_bpm) {
                    return Err(WaveformError::InvalidConfig(format!(
                        "heart rate bounds need columns_per_second > 0 and 0 < min_bpm < max_bpm \
                         (got {}, {}, {})",
                        columns_per_second, min_bpm, max_bpm
                    )));
                }
                if !(step > 0.0) {
                    return Err(WaveformError::InvalidConfig(format!(
                        "resample step must be positive, got {}",
                        step
                    )));
                }
                let points_per_beat = |bpm: f64| columns_per_second * 60.0 / bpm / step;
                // Faster heart, shorter cycle
                let min = (points_per_beat(max_bpm) + 1e-9).floor() as usize;
                let max = (points_per_beat(min_bpm) - 1e-9).ceil() as usize;
                Ok((min, max))
            }
        }
    }
}

/// Which detected crossings delimit the extracted cycles.
/// Exactly one policy is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CrossingSelection {
    /// Keep every crossing
    #[default]
    All,

    /// Keep the crossings at these ordinal positions (0-based, detection order)
    Manual { indices: Vec<usize> },

    /// Keep crossings preceded by a negative lobe comparable to the deepest one.
    /// `window` is the trailing integration length in column units and
    /// `ratio` the fraction of the deepest lobe a crossing must reach.
    Automatic {
        #[serde(default = "default_auto_window")]
        window: f64,
        #[serde(default = "default_auto_ratio")]
        ratio: f64,
    },
}

fn default_auto_window() -> f64 {
    30.0
}

fn default_auto_ratio() -> f64 {
    0.5
}

impl CrossingSelection {
    pub fn automatic() -> Self {
        CrossingSelection::Automatic {
            window: default_auto_window(),
            ratio: default_auto_ratio(),
        }
    }
}

/// Cycle segmentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub cycle_length: CycleLength,
    pub selection: CrossingSelection,

    /// Pin the first and last sample of the selected cycle to zero
    pub force_zero_endpoints: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            cycle_length: CycleLength::default(),
            selection: CrossingSelection::All,
            force_zero_endpoints: true,
        }
    }
}
