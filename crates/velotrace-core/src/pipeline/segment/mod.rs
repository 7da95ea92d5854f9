//! Cycle segmentation
//!
//! Splits the resampled velocity signal at upward zero crossings, normalizes
//! every cycle onto a fixed grid, and picks the cycle closest to the mean.
//! When no plausible cycles exist the outcome is a recognized degenerate
//! state rather than an error, so callers can skip the image or ask for a
//! manual selection.

mod selection;


use std::fmt;

use serde::Serialize;

use super::extract::ResampledSignal;
use crate::error::Result;
use crate::interp::resample_linear;
use crate::models::SegmenterConfig;

pub use selection::{select_crossings, trailing_integral};

/// Samples in a normalized cycle
pub const CYCLE_POINTS: usize = 1001;

/// Fill value for the flat export of a degenerate outcome; well outside any
/// physical blood-flow velocity.
pub const INVALID_CYCLE_MARKER: f64 = 9999.0;

/// Why no cycle could be selected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegenerateReason {
    /// Fewer than two upward crossings in the signal
    TooFewCrossings { found: usize },

    /// A gap between consecutive crossings is outside the plausible range
    ImplausibleSpacing { gap: usize, min: usize, max: usize },

    /// The selection policy kept fewer than two crossings
    TooFewSelected { selected: usize },
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCrossings { found } => {
                write!(f, "found {} zero crossing(s), need at least 2", found)
            }
            Self::ImplausibleSpacing { gap, min, max } => write!(
                f,
                "crossing gap of {} points is outside plausible range {}..={}",
                gap, min, max
            ),
            Self::TooFewSelected { selected } => {
                write!(f, "selection kept {} crossing(s), need at least 2", selected)
            }
        }
    }
}

/// The representative cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedCycle {
    /// `CYCLE_POINTS` samples over normalized time [0, 1]
    pub values: Vec<f64>,

    /// Position among the candidate cycles
    pub candidate: usize,

    /// Manhattan distance to the mean cycle
    pub distance: f64,

    /// Signal indices of the delimiting crossings
    pub start: usize,
    pub end: usize,
}

/// Result of segmentation
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Selected(SelectedCycle),
    Degenerate(DegenerateReason),
}

impl CycleOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    pub fn selected(&self) -> Option<&SelectedCycle> {
        match self {
            Self::Selected(cycle) => Some(cycle),
            Self::Degenerate(_) => None,
        }
    }

    /// Flat `CYCLE_POINTS` array; degenerate outcomes are all
    /// [`INVALID_CYCLE_MARKER`].
    pub fn to_flat(&self) -> Vec<f64> {
        match self {
            Self::Selected(cycle) => cycle.values.clone(),
            Self::Degenerate(_) => vec![INVALID_CYCLE_MARKER; CYCLE_POINTS],
        }
    }
}

/// Everything the segmenter found, for diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Every upward crossing, as signal indices
    pub crossings: Vec<usize>,

    /// Crossings kept by the selection policy
    pub selected_crossings: Vec<usize>,

    /// Normalized candidate cycles
    pub cycles: Vec<Vec<f64>>,

    /// Elementwise mean of `cycles`
    pub mean_cycle: Option<Vec<f64>>,

    pub outcome: CycleOutcome,
}

impl Segmentation {
    fn degenerate(crossings: Vec<usize>, selected: Vec<usize>, reason: DegenerateReason) -> Self {
        log::warn!("no cycle selected: {}", reason);
        Self {
            crossings,
            selected_crossings: selected,
            cycles: Vec::new(),
            mean_cycle: None,
            outcome: CycleOutcome::Degenerate(reason),
        }
    }
}

/// Indices `i` where the signal goes from non-positive to positive.
pub fn find_crossings(values: &[f64]) -> Vec<usize> {
    values
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] <= 0.0 && w[1] > 0.0)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Cut `values[start..=end]` and resample it onto `CYCLE_POINTS`.
pub fn normalize_cycle(values: &[f64], start: usize, end: usize) -> Vec<f64> {
    resample_linear(&values[start..=end], CYCLE_POINTS)
}

/// Elementwise mean of equally long cycles
pub fn mean_cycle(cycles: &[Vec<f64>]) -> Vec<f64> {
    let mut mean = vec![0.0; CYCLE_POINTS];
    for cycle in cycles {
        for (m, v) in mean.iter_mut().zip(cycle) {
            *m += v;
        }
    }
    let n = cycles.len().max(1) as f64;
    mean.iter_mut().for_each(|m| *m /= n);
    mean
}

pub fn manhattan_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Segment a resampled signal into cycles and pick the representative one.
///
/// `bounds` is the inclusive plausible crossing gap in grid points.
/// Errors only for a manual selection that names a crossing that does not
/// exist; every image-quality failure is a degenerate outcome.
pub fn segment(
    signal: &ResampledSignal,
    config: &SegmenterConfig,
    bounds: (usize, usize),
) -> Result<Segmentation> {
    let values = &signal.values;
    let crossings = find_crossings(values);
    log::debug!("{} upward crossings", crossings.len());

    if crossings.len() < 2 {
        let reason = DegenerateReason::TooFewCrossings {
            found: crossings.len(),
        };
        return Ok(Segmentation::degenerate(crossings, Vec::new(), reason));
    }

    let (min, max) = bounds;
    if let Some(gap) = crossings
        .windows(2)
        .map(|w| w[1] - w[0])
        .find(|gap| *gap < min || *gap > max)
    {
        let reason = DegenerateReason::ImplausibleSpacing { gap, min, max };
        return Ok(Segmentation::degenerate(crossings, Vec::new(), reason));
    }

    let selected = select_crossings(signal, &crossings, &config.selection)?;
    if selected.len() < 2 {
        let reason = DegenerateReason::TooFewSelected {
            selected: selected.len(),
        };
        return Ok(Segmentation::degenerate(crossings, selected, reason));
    }

    let cycles: Vec<Vec<f64>> = selected
        .windows(2)
        .map(|w| normalize_cycle(values, w[0], w[1]))
        .collect();
    let mean = mean_cycle(&cycles);

    let (candidate, distance) = cycles
        .iter()
        .map(|cycle| manhattan_distance(cycle, &mean))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| {
            if d < best.1 {
                (i, d)
            } else {
                best
            }
        });

    let mut chosen = cycles[candidate].clone();
    if config.force_zero_endpoints {
        chosen[0] = 0.0;
        chosen[CYCLE_POINTS - 1] = 0.0;
    }
    log::info!(
        "selected cycle {} of {} (distance to mean {:.3})",
        candidate,
        cycles.len(),
        distance
    );

    let outcome = CycleOutcome::Selected(SelectedCycle {
        values: chosen,
        candidate,
        distance,
        start: selected[candidate],
        end: selected[candidate + 1],
    });

    Ok(Segmentation {
        crossings,
        selected_crossings: selected,
        cycles,
        mean_cycle: Some(mean),
        outcome,
    })
}
