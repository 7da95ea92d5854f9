//! Per-pixel HSV grid derived from a decoded image

use rayon::prelude::*;

use super::hsv::{rgb_to_hsv, Hsv};
use crate::decoders::DecodedImage;
use crate::error::{Result, WaveformError};

/// Pixel count above which conversion is split across rayon workers
const PARALLEL_THRESHOLD: usize = 100_000;

/// Row-major grid of HSV pixels with the same dimensions as its source image
#[derive(Debug, Clone)]
pub struct HsvFrame {
    width: u32,
    height: u32,
    pixels: Vec<Hsv>,
}

impl HsvFrame {
    /// Convert every pixel of a decoded image to HSV.
    ///
    /// The buffer must hold `width * height` pixels of at least three
    /// interleaved channels; anything else is a [`WaveformError::DimensionMismatch`].
    pub fn from_image(image: &DecodedImage) -> Result<Self> {
        let channels = image.channels as usize;
        let pixel_count = image.width as usize * image.height as usize;
        if channels < 3 {
            return Err(WaveformError::DimensionMismatch(format!(
                "image needs at least 3 channels, got {}",
                channels
            )));
        }
        let expected = pixel_count * channels;
        if image.data.len() != expected {
            return Err(WaveformError::DimensionMismatch(format!(
                "image {}x{} with {} channels needs {} samples, got {}",
                image.width,
                image.height,
                channels,
                expected,
                image.data.len()
            )));
        }

        let convert = |px: &[f32]| rgb_to_hsv(px[0], px[1], px[2]);
        let pixels: Vec<Hsv> = if pixel_count >= PARALLEL_THRESHOLD {
            image.data.par_chunks_exact(channels).map(convert).collect()
        } else {
            image.data.chunks_exact(channels).map(convert).collect()
        };

        Ok(Self {
            width: image.width,
            height: image.height,
            pixels,
        })
    }

    /// Build a frame from already-converted pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Hsv>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(WaveformError::DimensionMismatch(format!(
                "HSV frame {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Hsv {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[Hsv] {
        &self.pixels
    }
}
