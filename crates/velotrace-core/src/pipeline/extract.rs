//! Signal extraction: mask -> per-column velocity -> smoothed, resampled signal.

use serde::Serialize;

use super::classify::Mask;
use crate::interp::interpolate_at;
use crate::models::Calibration;

/// One velocity per image column; `None` where no trace pixel was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityTrace {
    values: Vec<Option<f64>>,
}

impl VelocityTrace {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of columns (equals image width)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Columns that carry a value
    pub fn present_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Velocity for one column from its top (`a`) and bottom (`b`) boundary values.
///
/// A column entirely on one side of the baseline reports the boundary farther
/// from zero. A column straddling it blends both with a softmax weight; the
/// larger `sharpness` is, the harder the blend snaps to the dominant side.
pub fn column_velocity(a: f64, b: f64, sharpness: f64) -> f64 {
    if a > 0.0 {
        return b;
    }
    if b < 0.0 {
        return a;
    }
    let span = b - a;
    if span == 0.0 {
        return a;
    }
    // exp(λ(-a)/span) / (exp(λ(-a)/span) + exp(λb/span)) without overflow
    let sigma = 1.0 / (1.0 + (sharpness * (b + a) / span).exp());
    a * sigma + b * (1.0 - sigma)
}

/// Map every mask column to a velocity.
pub fn extract_velocity(mask: &Mask, calibration: &Calibration, sharpness: f64) -> VelocityTrace {
    let values = (0..mask.width())
        .map(|x| {
            mask.column_extent(x).map(|(top, bottom)| {
                column_velocity(
                    calibration.value_at(top),
                    calibration.value_at(bottom),
                    sharpness,
                )
            })
        })
        .collect();
    VelocityTrace { values }
}

/// Centered moving average of odd `window`.
///
/// The `window / 2` columns at each end are copied verbatim. Interior columns
/// with a value are averaged over the values present in their window; empty
/// columns stay empty.
pub fn smooth_trace(trace: &VelocityTrace, window: usize) -> VelocityTrace {
    let n = trace.len();
    let half = window / 2;
    if half == 0 || n < window {
        return trace.clone();
    }

    let mut out = trace.values.clone();
    for (i, slot) in out.iter_mut().enumerate().take(n - half).skip(half) {
        if trace.values[i].is_none() {
            continue;
        }
        let (sum, count) = trace.values[i - half..=i + half]
            .iter()
            .flatten()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        *slot = Some(sum / count as f64);
    }
    VelocityTrace { values: out }
}

/// Trace interpolated linearly across its present columns and sampled on a
/// uniform grid. Sample `i` sits at column position `start + i * step`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResampledSignal {
    pub start: f64,
    pub step: f64,
    pub values: Vec<f64>,
}

impl ResampledSignal {
    /// Resample `trace` from its first to its last present column.
    /// Fewer than two present columns give an empty signal.
    pub fn from_trace(trace: &VelocityTrace, step: f64) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = trace
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .unzip();

        let start = xs.first().copied().unwrap_or(0.0);
        if xs.len() < 2 || !(step > 0.0) {
            return Self {
                start,
                step,
                values: Vec::new(),
            };
        }

        let span = xs[xs.len() - 1] - start;
        let count = (span / step + 1e-9).floor() as usize + 1;
        let values = (0..count)
            .map(|k| interpolate_at(&xs, &ys, start + k as f64 * step))
            .collect();

        Self {
            start,
            step,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column position of sample `index`
    pub fn position(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}
