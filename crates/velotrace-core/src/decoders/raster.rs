//! Generic raster decoder backed by the `image` crate (JPEG, BMP, palette PNG)

use std::path::Path;

use super::DecodedImage;
use crate::error::{Result, WaveformError};

pub(crate) fn decode_raster(path: &Path) -> Result<DecodedImage> {
    let dynamic = image::ImageReader::open(path)
        .map_err(|e| WaveformError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| WaveformError::io(path, e))?
        .decode()
        .map_err(|e| WaveformError::Decode(format!("{}: {}", path.display(), e)))?;

    let source_is_grayscale = !dynamic.color().has_color();
    let rgb = dynamic.to_rgb32f();
    let (width, height) = rgb.dimensions();

    Ok(DecodedImage {
        width,
        height,
        data: rgb.into_raw(),
        channels: 3,
        source_is_grayscale,
    })
}
