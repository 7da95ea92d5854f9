//! Pixel row to velocity calibration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaveformError};

/// Affine row -> velocity mapping defined by one reference pair:
/// `zero_row` maps to 0 and `reference_row` maps to `reference_value`.
///
/// Read the pair off the scale printed on the Doppler image; it changes
/// with export resolution and velocity range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub zero_row: f64,
    pub reference_row: f64,
    pub reference_value: f64,
}

impl Calibration {
    /// Normalized fallback: baseline at mid-height, one unit per half-height,
    /// increasing downward.
    pub fn centered(height: u32) -> Self {
        let half = height as f64 / 2.0;
        Self {
            zero_row: half,
            reference_row: height as f64,
            reference_value: 1.0,
        }
    }

    /// Velocity units per row
    pub fn slope(&self) -> f64 {
        self.reference_value / (self.reference_row - self.zero_row)
    }

    #[inline]
    pub fn value_at(&self, row: u32) -> f64 {
        (row as f64 - self.zero_row) * self.slope()
    }

    /// Check the pair is usable for an image of `height` rows.
    pub fn validate(&self, height: u32) -> Result<()> {
        let finite = [self.zero_row, self.reference_row, self.reference_value]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(WaveformError::InvalidConfig(
                "calibration values must be finite".to_string(),
            ));
        }
        if self.zero_row == self.reference_row {
            return Err(WaveformError::InvalidConfig(format!(
                "calibration rows must differ (both {})",
                self.zero_row
            )));
        }
        if self.reference_value == 0.0 {
            return Err(WaveformError::InvalidConfig(
                "calibration reference value must be non-zero".to_string(),
            ));
        }
        for (name, row) in [("zero_row", self.zero_row), ("reference_row", self.reference_row)] {
            if row < 0.0 || row > height as f64 {
                return Err(WaveformError::DimensionMismatch(format!(
                    "calibration {} {} is outside image height {}",
                    name, row, height
                )));
            }
        }
        Ok(())
    }
}
