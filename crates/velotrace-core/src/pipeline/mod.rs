//! Extraction pipeline
//!
//! Decoded image in, representative cycle out. Organized into submodules:
//! - `classify`: hue threshold, row exclusion and dark-noise removal
//! - `extract`: per-column velocity, smoothing and resampling
//! - `segment`: zero-crossing segmentation and cycle selection

mod classify;
mod extract;
mod segment;


use std::path::Path;

pub use classify::{classify, Mask};
pub use extract::{column_velocity, extract_velocity, smooth_trace, ResampledSignal, VelocityTrace};
pub use segment::{
    find_crossings, manhattan_distance, mean_cycle, normalize_cycle, segment, select_crossings,
    trailing_integral, CycleOutcome, DegenerateReason, Segmentation, SelectedCycle, CYCLE_POINTS,
    INVALID_CYCLE_MARKER,
};

use crate::color::HsvFrame;
use crate::decoders::{decode_image, DecodedImage};
use crate::error::Result;
use crate::models::ExtractionConfig;

/// Every intermediate of one extraction, kept for diagnostics and export
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Image width
    pub width: u32,

    /// Image height
    pub height: u32,

    /// Classified trace pixels
    pub mask: Mask,

    /// Per-column velocity before smoothing
    pub raw_trace: VelocityTrace,

    /// Per-column velocity after smoothing
    pub trace: VelocityTrace,

    /// Smoothed trace on the fine uniform grid
    pub signal: ResampledSignal,

    pub segmentation: Segmentation,
}

impl ExtractionResult {
    pub fn outcome(&self) -> &CycleOutcome {
        &self.segmentation.outcome
    }
}

/// Run the full pipeline on a decoded image.
///
/// Configuration problems (bad geometry for this image, out-of-range manual
/// crossings) and pixel buffers that disagree with the image size are errors. An image without a usable trace is not: it yields
/// a degenerate [`CycleOutcome`].
pub fn extract_cycle(image: &DecodedImage, config: &ExtractionConfig) -> Result<ExtractionResult> {
    let geometry = config.resolve(image.width, image.height)?;

    let frame = HsvFrame::from_image(image)?;
    let mask = classify(&frame, &config.classifier, &geometry.exclusions);

    let raw_trace = extract_velocity(&mask, &geometry.calibration, config.smoothing.sharpness);
    log::debug!(
        "velocity present in {}/{} columns",
        raw_trace.present_count(),
        raw_trace.len()
    );
    let trace = smooth_trace(&raw_trace, config.smoothing.window);
    let signal = ResampledSignal::from_trace(&trace, config.smoothing.resample_step);
    log::debug!("resampled signal: {} points", signal.len());

    let segmentation = segment(&signal, &config.segmenter, geometry.cycle_bounds)?;

    Ok(ExtractionResult {
        width: image.width,
        height: image.height,
        mask,
        raw_trace,
        trace,
        signal,
        segmentation,
    })
}

/// Decode `path` and run [`extract_cycle`] on it.
pub fn process_file<P: AsRef<Path>>(path: P, config: &ExtractionConfig) -> Result<ExtractionResult> {
    let path = path.as_ref();
    let image = decode_image(path)?;
    log::info!(
        "decoded {} ({}x{})",
        path.display(),
        image.width,
        image.height
    );
    if image.source_is_grayscale {
        log::warn!(
            "{} is grayscale; no pixel can match the trace hue",
            path.display()
        );
    }
    extract_cycle(&image, config)
}
