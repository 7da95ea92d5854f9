//! Pixel classifier settings: hue band, row exclusions and denoising.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaveformError};

/// Exclusive hue range (degrees) identifying the trace color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueBand {
    pub lower: f32,
    pub upper: f32,
}

impl Default for HueBand {
    fn default() -> Self {
        // Yellow trace, pure hue 60
        Self {
            lower: 50.0,
            upper: 70.0,
        }
    }
}

impl HueBand {
    /// True when `hue` lies strictly inside the band
    #[inline]
    pub fn contains(&self, hue: f32) -> bool {
        hue > self.lower && hue < self.upper
    }
}

/// Band of image rows that is never classified as signal.
///
/// Fractions are relative to image height so a band survives a change of
/// export resolution; absolute rows are checked against the real height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum RowBand {
    /// `start..end` as fractions of height (0.0-1.0)
    Fraction { start: f32, end: f32 },
    /// `start..end` as absolute row indices, end exclusive
    Rows { start: u32, end: u32 },
}

/// Half-open row range resolved against a concrete image height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: u32,
    pub end: u32,
}

impl RowRange {
    #[inline]
    pub fn contains(&self, row: u32) -> bool {
        row >= self.start && row < self.end
    }
}

impl RowBand {
    /// Resolve to concrete rows for an image of `height` rows.
    pub fn resolve(&self, height: u32) -> Result<RowRange> {
        match *self {
            RowBand::Fraction { start, end } => {
                let in_unit = |f: f32| f.is_finite() && (0.0..=1.0).contains(&f);
                if !in_unit(start) || !in_unit(end) {
                    return Err(WaveformError::InvalidConfig(format!(
                        "row band fractions must be within 0.0-1.0, got {}..{}",
                        start, end
                    )));
                }
                if start > end {
                    return Err(WaveformError::InvalidConfig(format!(
                        "row band start {} is after end {}",
                        start, end
                    )));
                }
                Ok(RowRange {
                    start: (start * height as f32).round() as u32,
                    end: ((end * height as f32).round() as u32).min(height),
                })
            }
            RowBand::Rows { start, end } => {
                if start > end {
                    return Err(WaveformError::InvalidConfig(format!(
                        "row band start {} is after end {}",
                        start, end
                    )));
                }
                if end > height {
                    return Err(WaveformError::DimensionMismatch(format!(
                        "row band {}..{} exceeds image height {}",
                        start, end, height
                    )));
                }
                Ok(RowRange { start, end })
            }
        }
    }
}

/// What a denoise neighborhood does when it reaches past the image edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Neighborhood mean is taken as 0, so a dark border pixel is always dropped
    #[default]
    TreatAsDark,

    /// Average only the in-bounds part of the neighborhood
    Clip,
}

/// Isolated dark-pixel removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseConfig {
    pub enabled: bool,

    /// Neighborhood half-size; the square is (2r+1) pixels wide
    pub radius: u32,

    /// Pixels and neighborhoods with mean value below this are noise
    pub dark_value: f32,

    /// Neighbors with this hue (overlay graphics) are left out of the mean
    pub ignore_hue: Option<f32>,

    /// Neighbors with this saturation (text overlays) are left out of the mean
    pub ignore_saturation: Option<f32>,

    pub border: BorderPolicy,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 2,
            dark_value: 0.35,
            ignore_hue: None,
            ignore_saturation: None,
            border: BorderPolicy::TreatAsDark,
        }
    }
}

/// Complete classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClassifierConfig {
    pub hue_band: HueBand,
    pub exclusions: Vec<RowBand>,
    pub denoise: DenoiseConfig,
}
