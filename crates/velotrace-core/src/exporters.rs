//! Writers for extraction results
//!
//! Cycles go out as JSON or plain text, traces as JSON, and the final mask
//! as an 8-bit grayscale PNG for visual inspection.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, WaveformError};
use crate::pipeline::{CycleOutcome, Mask, VelocityTrace, CYCLE_POINTS};

/// JSON document for one extracted cycle
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub source: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub points: usize,
    pub values: Vec<f64>,
}

impl CycleReport {
    pub fn new(outcome: &CycleOutcome, source: &str) -> Self {
        let reason = match outcome {
            CycleOutcome::Selected(_) => None,
            CycleOutcome::Degenerate(reason) => Some(reason.to_string()),
        };
        Self {
            source: source.to_string(),
            valid: outcome.is_valid(),
            reason,
            points: CYCLE_POINTS,
            values: outcome.to_flat(),
        }
    }
}

/// Raw and smoothed per-column velocity; gaps serialize as `null`
#[derive(Debug, Clone, Serialize)]
struct TraceReport<'a> {
    columns: usize,
    raw: &'a [Option<f64>],
    smoothed: &'a [Option<f64>],
}

fn create<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let path = path.as_ref();
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| WaveformError::io(path, e))
}

fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| WaveformError::Export(format!("failed to write {}: {}", path.display(), e)))?;
    writer.flush().map_err(|e| WaveformError::io(path, e))
}

/// Write the cycle (or the sentinel array) as a JSON report.
pub fn write_cycle_json<P: AsRef<Path>>(outcome: &CycleOutcome, source: &str, path: P) -> Result<()> {
    write_json(&CycleReport::new(outcome, source), path)
}

/// Write the cycle (or the sentinel array) one value per line.
pub fn write_cycle_text<P: AsRef<Path>>(outcome: &CycleOutcome, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create(path)?;
    for value in outcome.to_flat() {
        writeln!(writer, "{}", value).map_err(|e| WaveformError::io(path, e))?;
    }
    writer.flush().map_err(|e| WaveformError::io(path, e))
}

/// Write raw and smoothed velocity traces side by side.
pub fn write_trace_json<P: AsRef<Path>>(
    raw: &VelocityTrace,
    smoothed: &VelocityTrace,
    path: P,
) -> Result<()> {
    if raw.len() != smoothed.len() {
        return Err(WaveformError::DimensionMismatch(format!(
            "raw trace has {} columns, smoothed has {}",
            raw.len(),
            smoothed.len()
        )));
    }
    let report = TraceReport {
        columns: raw.len(),
        raw: raw.values(),
        smoothed: smoothed.values(),
    };
    write_json(&report, path)
}

/// Write the mask as a black/white 8-bit grayscale PNG.
pub fn write_mask_png<P: AsRef<Path>>(mask: &Mask, path: P) -> Result<()> {
    let path = path.as_ref();
    let (width, height) = (mask.width(), mask.height());
    let data: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| if mask.get(x, y) { 255 } else { 0 })
        .collect();

    let writer = create(path)?;
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| WaveformError::Export(format!("failed to write PNG header: {}", e)))?;
    png_writer
        .write_image_data(&data)
        .map_err(|e| WaveformError::Export(format!("failed to write mask PNG: {}", e)))?;
    png_writer
        .finish()
        .map_err(|e| WaveformError::Export(format!("failed to finish mask PNG: {}", e)))
}
