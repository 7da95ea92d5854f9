//! Top-level extraction configuration.

use serde::{Deserialize, Serialize};

use super::{
    Calibration, ClassifierConfig, CrossingSelection, RowRange, SegmenterConfig, SmoothingConfig,
    MIN_RESAMPLE_STEP,
};
use crate::error::{Result, WaveformError};

/// Largest denoise radius accepted; wider squares stop being "local"
const MAX_DENOISE_RADIUS: u32 = 64;

/// Everything the pipeline needs besides the image itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtractionConfig {
    /// `[width, height]` the geometry below was measured on. When set, an
    /// image of any other size is rejected instead of silently misread.
    pub expected_dimensions: Option<[u32; 2]>,

    pub classifier: ClassifierConfig,

    /// Row -> velocity mapping; `None` uses [`Calibration::centered`]
    pub calibration: Option<Calibration>,

    pub smoothing: SmoothingConfig,
    pub segmenter: SegmenterConfig,
}

/// Config geometry resolved against one concrete image
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    pub exclusions: Vec<RowRange>,
    pub calibration: Calibration,
    /// Inclusive crossing gap bounds in grid points
    pub cycle_bounds: (usize, usize),
}

impl ExtractionConfig {
    /// Clamp numeric fields into their working ranges.
    pub fn sanitize(mut self) -> Self {
        let smoothing = &mut self.smoothing;
        smoothing.window = smoothing.window.max(1);
        if smoothing.window % 2 == 0 {
            smoothing.window += 1;
        }
        if !(smoothing.resample_step > 0.0) {
            smoothing.resample_step = SmoothingConfig::default().resample_step;
        }
        smoothing.resample_step = smoothing.resample_step.max(MIN_RESAMPLE_STEP);
        if !smoothing.sharpness.is_finite() {
            smoothing.sharpness = SmoothingConfig::default().sharpness;
        }

        let denoise = &mut self.classifier.denoise;
        denoise.radius = denoise.radius.min(MAX_DENOISE_RADIUS);
        denoise.dark_value = denoise.dark_value.clamp(0.0, 1.0);

        if let CrossingSelection::Automatic { window, ratio } = &mut self.segmenter.selection {
            *ratio = ratio.clamp(0.0, 1.0);
            *window = window.max(0.0);
        }
        self
    }

    /// Structural checks that do not depend on the image.
    pub fn validate(&self) -> Result<()> {
        let band = self.classifier.hue_band;
        if !(band.lower < band.upper) {
            return Err(WaveformError::InvalidConfig(format!(
                "hue band lower {} must be below upper {}",
                band.lower, band.upper
            )));
        }
        let window = self.smoothing.window;
        if window == 0 || window % 2 == 0 {
            return Err(WaveformError::InvalidConfig(format!(
                "smoothing window must be odd and positive, got {}",
                window
            )));
        }
        if !(self.smoothing.resample_step >= MIN_RESAMPLE_STEP) {
            return Err(WaveformError::InvalidConfig(format!(
                "resample step must be at least {}, got {}",
                MIN_RESAMPLE_STEP, self.smoothing.resample_step
            )));
        }
        if let CrossingSelection::Manual { indices } = &self.segmenter.selection {
            if indices.len() < 2 {
                return Err(WaveformError::InvalidConfig(
                    "manual crossing selection needs at least two indices".to_string(),
                ));
            }
        }
        self.segmenter
            .cycle_length
            .bounds(self.smoothing.resample_step)?;
        Ok(())
    }

    /// Validate and resolve all resolution-dependent settings for an image.
    /// Fails fast on any mismatch instead of clipping.
    pub fn resolve(&self, width: u32, height: u32) -> Result<ResolvedGeometry> {
        self.validate()?;

        if let Some([w, h]) = self.expected_dimensions {
            if (w, h) != (width, height) {
                return Err(WaveformError::DimensionMismatch(format!(
                    "config was measured on {}x{} but image is {}x{}",
                    w, h, width, height
                )));
            }
        }

        let exclusions = self
            .classifier
            .exclusions
            .iter()
            .map(|band| band.resolve(height))
            .collect::<Result<Vec<_>>>()?;

        let calibration = match self.calibration {
            Some(calibration) => calibration,
            None => {
                log::warn!("no calibration configured; using normalized centered axis");
                Calibration::centered(height)
            }
        };
        calibration.validate(height)?;

        let cycle_bounds = self
            .segmenter
            .cycle_length
            .bounds(self.smoothing.resample_step)?;

        Ok(ResolvedGeometry {
            exclusions,
            calibration,
            cycle_bounds,
        })
    }
}
