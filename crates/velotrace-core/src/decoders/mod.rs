//! Image decoders for echocardiogram exports
//!
//! PNG and TIFF are read with their format crates directly; JPEG, BMP and any
//! PNG layout the direct path does not handle go through the `image` crate.

mod png;
mod raster;
mod tiff;


use std::path::Path;

use crate::error::{Result, WaveformError};

/// Extensions accepted by [`decode_image`]
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "jpg", "jpeg", "bmp"];

/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved RGB data (f32, 0.0-1.0 range)
    pub data: Vec<f32>,

    /// Number of channels (always 3 after decoding)
    pub channels: u8,

    /// Whether the source image was grayscale and has been expanded to RGB.
    /// A grayscale Doppler export carries no hue, so nothing will classify.
    pub source_is_grayscale: bool,
}

#[cfg(test)]
impl DecodedImage {
    /// RGB triple at column `x`, row `y`
    pub(crate) fn rgb(&self, x: u32, y: u32) -> [f32; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }
}

/// Decode an image from a file path
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(WaveformError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "image file not found"),
        ));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| WaveformError::UnsupportedFormat("no file extension found".to_string()))?;

    let decoded = match extension.as_str() {
        "png" => png::decode_png(path)?,
        "tif" | "tiff" => tiff::decode_tiff(path)?,
        "jpg" | "jpeg" | "bmp" => raster::decode_raster(path)?,
        _ => return Err(WaveformError::UnsupportedFormat(extension)),
    };

    log::debug!(
        "decoded {} ({}x{}, grayscale source: {})",
        path.display(),
        decoded.width,
        decoded.height,
        decoded.source_is_grayscale
    );
    Ok(decoded)
}

/// Expand 1-channel samples to RGB
pub(crate) fn expand_gray(gray: impl Iterator<Item = f32>, pixel_count: usize) -> Vec<f32> {
    let mut rgb_data = Vec::with_capacity(pixel_count * 3);
    for val in gray {
        rgb_data.push(val);
        rgb_data.push(val);
        rgb_data.push(val);
    }
    rgb_data
}

/// Check a decoded buffer against the size implied by its header
pub(crate) fn check_len(format: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(WaveformError::Decode(format!(
            "{} buffer size mismatch: expected {}, got {}",
            format, expected, actual
        )));
    }
    Ok(())
}
