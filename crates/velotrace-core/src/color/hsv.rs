//! HSV (Hue-Saturation-Value) color space conversion

/// HSV color representation
/// - H (hue): 0.0-360.0 degrees
/// - S (saturation): 0.0-1.0
/// - V (value): 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// Convert RGB to HSV
///
/// Input: RGB values in range 0.0-1.0
/// Output: HSV where H is 0.0-360.0, S and V are 0.0-1.0
#[inline]
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> Hsv {
    let r = r.clamp(0.0, 1.0);
    let g = g.clamp(0.0, 1.0);
    let b = b.clamp(0.0, 1.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;

    // Achromatic case
    if delta < 1e-6 {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let s = delta / max;

    let h = if max == r {
        let mut h = (g - b) / delta;
        if h < 0.0 {
            h += 6.0;
        }
        h * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    Hsv { h: h % 360.0, s, v }
}

/// Convert 8-bit RGB components (0-255) to HSV
#[inline]
pub fn rgb_to_hsv_u8(r: u8, g: u8, b: u8) -> Hsv {
    rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
