//! Pixel classification: which pixels belong to the Doppler trace.
//!
//! Three passes over one mask, in order:
//! 1. hue band threshold
//! 2. row exclusion (scale text, baseline, footer)
//! 3. removal of dark pixels sitting in dark neighborhoods

use crate::color::{Hsv, HsvFrame};
use crate::models::{BorderPolicy, ClassifierConfig, DenoiseConfig, RowRange};

/// Hue/saturation match tolerance for the denoise ignore filters
const IGNORE_TOLERANCE: f32 = 1e-3;

/// Boolean grid marking trace pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// All-false mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Number of marked pixels
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Topmost and bottommost marked rows of column `x`
    pub fn column_extent(&self, x: u32) -> Option<(u32, u32)> {
        let mut rows = (0..self.height).filter(|&y| self.get(x, y));
        let top = rows.next()?;
        let bottom = rows.last().unwrap_or(top);
        Some((top, bottom))
    }
}

/// Build the trace mask for an HSV frame.
///
/// `exclusions` must already be resolved against the frame height
/// (see [`crate::models::ExtractionConfig::resolve`]).
pub fn classify(frame: &HsvFrame, config: &ClassifierConfig, exclusions: &[RowRange]) -> Mask {
    let (width, height) = (frame.width(), frame.height());
    let band = config.hue_band;

    let mut mask = Mask {
        width,
        height,
        cells: frame.pixels().iter().map(|p| band.contains(p.h)).collect(),
    };
    log::debug!("hue band {}..{}: {} pixels", band.lower, band.upper, mask.count());

    for range in exclusions {
        for y in range.start..range.end.min(height) {
            for x in 0..width {
                mask.set(x, y, false);
            }
        }
    }
    log::debug!("after row exclusion: {} pixels", mask.count());

    if config.denoise.enabled {
        remove_dark_noise(frame, &mut mask, &config.denoise);
        log::debug!("after denoise: {} pixels", mask.count());
    }

    mask
}

/// Unmark dark pixels whose neighborhood is dark as well.
/// Decisions read only the frame, so visiting order does not matter.
fn remove_dark_noise(frame: &HsvFrame, mask: &mut Mask, config: &DenoiseConfig) {
    for y in 0..mask.height {
        for x in 0..mask.width {
            if !mask.get(x, y) || frame.get(x, y).v >= config.dark_value {
                continue;
            }
            if neighborhood_mean(frame, x, y, config) < config.dark_value {
                mask.set(x, y, false);
            }
        }
    }
}

fn is_ignored(pixel: &Hsv, config: &DenoiseConfig) -> bool {
    let near = |target: Option<f32>, value: f32| {
        target.is_some_and(|t| (t - value).abs() <= IGNORE_TOLERANCE)
    };
    near(config.ignore_hue, pixel.h) || near(config.ignore_saturation, pixel.s)
}

/// Mean value over the (2r+1)^2 square centered on `(x, y)`.
pub(crate) fn neighborhood_mean(frame: &HsvFrame, x: u32, y: u32, config: &DenoiseConfig) -> f32 {
    let r = config.radius as i64;
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    let (cx, cy) = (x as i64, y as i64);

    let fits = cx - r >= 0 && cy - r >= 0 && cx + r < w && cy + r < h;
    if !fits && config.border == BorderPolicy::TreatAsDark {
        return 0.0;
    }

    let mut sum = 0.0f32;
    let mut count = 0usize;
    for ny in (cy - r).max(0)..=(cy + r).min(h - 1) {
        for nx in (cx - r).max(0)..=(cx + r).min(w - 1) {
            let pixel = frame.get(nx as u32, ny as u32);
            if is_ignored(&pixel, config) {
                continue;
            }
            sum += pixel.v;
            count += 1;
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HueBand, RowBand};

    fn hsv(h: f32, s: f32, v: f32) -> Hsv {
        Hsv { h, s, v }
    }

    fn uniform_frame(width: u32, height: u32, pixel: Hsv) -> HsvFrame {
        HsvFrame::from_pixels(width, height, vec![pixel; (width * height) as usize]).unwrap()
    }

    fn with_pixel(frame: &HsvFrame, x: u32, y: u32, pixel: Hsv) -> HsvFrame {
        let mut pixels = frame.pixels().to_vec();
        pixels[(y * frame.width() + x) as usize] = pixel;
        HsvFrame::from_pixels(frame.width(), frame.height(), pixels).unwrap()
    }

    #[test]
    fn test_target_hue_is_classified() {
        // Bright background, one mid-value yellow pixel in the middle
        let frame = uniform_frame(9, 9, hsv(200.0, 0.2, 0.9));
        let frame = with_pixel(&frame, 4, 4, hsv(60.0, 0.5, 0.5));

        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert!(mask.get(4, 4));
        assert_eq!(mask.count(), 1);

        let frame = with_pixel(&frame, 4, 4, hsv(80.0, 0.5, 0.5));
        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert!(!mask.get(4, 4));
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        let frame = HsvFrame::from_pixels(
            3,
            1,
            vec![hsv(50.0, 1.0, 1.0), hsv(50.5, 1.0, 1.0), hsv(70.0, 1.0, 1.0)],
        )
        .unwrap();
        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert_eq!((mask.get(0, 0), mask.get(1, 0), mask.get(2, 0)), (false, true, false));
    }

    #[test]
    fn test_excluded_rows_are_cleared() {
        let frame = uniform_frame(4, 10, hsv(60.0, 1.0, 1.0));
        let exclusions = [
            RowBand::Rows { start: 0, end: 2 }.resolve(10).unwrap(),
            RowBand::Fraction { start: 0.5, end: 0.6 }.resolve(10).unwrap(),
        ];
        let mask = classify(&frame, &ClassifierConfig::default(), &exclusions);

        for x in 0..4 {
            assert!(!mask.get(x, 0));
            assert!(!mask.get(x, 1));
            assert!(mask.get(x, 2));
            assert!(!mask.get(x, 5));
            assert!(mask.get(x, 6));
        }
        assert_eq!(mask.count(), 4 * 7);
    }

    #[test]
    fn test_dark_pixel_in_dark_neighborhood_is_removed() {
        let frame = uniform_frame(9, 9, hsv(0.0, 0.0, 0.05));
        let frame = with_pixel(&frame, 4, 4, hsv(60.0, 0.8, 0.2));

        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert!(!mask.get(4, 4));
    }

    #[test]
    fn test_dark_pixel_in_bright_neighborhood_survives() {
        let frame = uniform_frame(9, 9, hsv(0.0, 0.0, 0.9));
        let frame = with_pixel(&frame, 4, 4, hsv(60.0, 0.8, 0.2));

        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert!(mask.get(4, 4));
    }

    #[test]
    fn test_border_policy() {
        let frame = uniform_frame(5, 5, hsv(0.0, 0.0, 0.9));
        let frame = with_pixel(&frame, 0, 2, hsv(60.0, 0.8, 0.2));

        // Default: a partial neighborhood counts as dark
        let mask = classify(&frame, &ClassifierConfig::default(), &[]);
        assert!(!mask.get(0, 2));

        let mut config = ClassifierConfig::default();
        config.denoise.border = BorderPolicy::Clip;
        let mask = classify(&frame, &config, &[]);
        assert!(mask.get(0, 2));
    }

    #[test]
    fn test_ignored_neighbors_do_not_brighten() {
        // Bright neighbors are all white text (saturation 0): ignoring them
        // leaves only the dark center, so the pixel goes
        let frame = uniform_frame(5, 5, hsv(0.0, 0.0, 1.0));
        let frame = with_pixel(&frame, 2, 2, hsv(60.0, 0.8, 0.2));

        let mut config = ClassifierConfig::default();
        assert!(classify(&frame, &config, &[]).get(2, 2));

        config.denoise.ignore_saturation = Some(0.0);
        assert!(!classify(&frame, &config, &[]).get(2, 2));
    }

    #[test]
    fn test_denoise_disabled_keeps_dark_pixels() {
        let frame = uniform_frame(3, 3, hsv(60.0, 0.8, 0.1));
        let mut config = ClassifierConfig::default();
        config.denoise.enabled = false;
        assert_eq!(classify(&frame, &config, &[]).count(), 9);
    }

    #[test]
    fn test_custom_hue_band() {
        let frame = uniform_frame(2, 2, hsv(200.0, 1.0, 1.0));
        let config = ClassifierConfig {
            hue_band: HueBand {
                lower: 190.0,
                upper: 210.0,
            },
            ..Default::default()
        };
        assert_eq!(classify(&frame, &config, &[]).count(), 4);
    }

    #[test]
    fn test_column_extent() {
        let mut mask = Mask::new(3, 6);
        assert_eq!(mask.column_extent(1), None);
        mask.set(1, 4, true);
        assert_eq!(mask.column_extent(1), Some((4, 4)));
        mask.set(1, 1, true);
        mask.set(1, 2, true);
        assert_eq!(mask.column_extent(1), Some((1, 4)));
    }
}
