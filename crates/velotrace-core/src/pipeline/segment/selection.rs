//! Crossing selection policies

use crate::error::{Result, WaveformError};
use crate::models::CrossingSelection;
use crate::pipeline::extract::ResampledSignal;

/// Apply the active selection policy to the detected crossings.
pub fn select_crossings(
    signal: &ResampledSignal,
    crossings: &[usize],
    selection: &CrossingSelection,
) -> Result<Vec<usize>> {
    match selection {
        CrossingSelection::All => Ok(crossings.to_vec()),

        CrossingSelection::Manual { indices } => {
            let mut ordinals = indices.clone();
            ordinals.sort_unstable();
            ordinals.dedup();
            ordinals
                .into_iter()
                .map(|k| {
                    crossings.get(k).copied().ok_or_else(|| {
                        WaveformError::InvalidConfig(format!(
                            "manual crossing {} requested but only {} detected",
                            k,
                            crossings.len()
                        ))
                    })
                })
                .collect()
        }

        CrossingSelection::Automatic { window, ratio } => {
            let window_points = (window / signal.step).round() as usize;
            let integrals: Vec<f64> = crossings
                .iter()
                .map(|&c| trailing_integral(&signal.values, c, window_points, signal.step))
                .collect();
            let deepest = integrals.iter().copied().fold(f64::INFINITY, f64::min);
            log::debug!("trailing integrals {:?}, deepest {}", integrals, deepest);

            if !(deepest < 0.0) {
                return Ok(crossings.to_vec());
            }
            Ok(crossings
                .iter()
                .zip(&integrals)
                .filter(|(_, &integral)| integral / deepest >= *ratio)
                .map(|(&c, _)| c)
                .collect())
        }
    }
}

/// Trapezoidal integral of `values` over the `window_points` samples before
/// `end` (inclusive), clamped at the start of the signal.
pub fn trailing_integral(values: &[f64], end: usize, window_points: usize, step: f64) -> f64 {
    let start = end.saturating_sub(window_points);
    values[start..=end]
        .windows(2)
        .map(|w| (w[0] + w[1]) * 0.5 * step)
        .sum()
}
