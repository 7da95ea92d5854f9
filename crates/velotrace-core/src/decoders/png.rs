//! PNG image decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{check_len, expand_gray, raster, DecodedImage};
use crate::error::{Result, WaveformError};

/// Decode a PNG file
pub(crate) fn decode_png<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WaveformError::io(path, e))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .map_err(|e| WaveformError::Decode(format!("Failed to read PNG info: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    // Layout after the decoder's default transformations
    let (color_type, bit_depth) = reader.output_color_type();

    // Palette and sub-byte layouts are left to the generic decoder
    let direct = matches!(
        (color_type, bit_depth),
        (
            png::ColorType::Grayscale | png::ColorType::Rgb | png::ColorType::Rgba,
            png::BitDepth::Eight | png::BitDepth::Sixteen
        )
    );
    if !direct {
        log::debug!(
            "PNG {:?}/{:?} not handled directly, using generic decoder",
            color_type,
            bit_depth
        );
        return raster::decode_raster(path);
    }

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| WaveformError::Decode("Failed to determine PNG buffer size".to_string()))?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| WaveformError::Decode(format!("Failed to read PNG frame: {}", e)))?;
    let bytes = &buf[..frame_info.buffer_size()];

    let pixel_count = width as usize * height as usize;
    let sixteen = bit_depth == png::BitDepth::Sixteen;
    let samples = samples_to_f32(bytes, sixteen);

    let data = match color_type {
        png::ColorType::Grayscale => {
            check_len("PNG", samples.len(), pixel_count)?;
            expand_gray(samples.into_iter(), pixel_count)
        }
        png::ColorType::Rgb => {
            check_len("PNG", samples.len(), pixel_count * 3)?;
            samples
        }
        _ => {
            check_len("PNG", samples.len(), pixel_count * 4)?;
            // Drop alpha, keep RGB
            samples
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect()
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
        source_is_grayscale: color_type == png::ColorType::Grayscale,
    })
}

/// Normalize raw PNG samples; 16-bit samples are big-endian
fn samples_to_f32(bytes: &[u8], sixteen: bool) -> Vec<f32> {
    if sixteen {
        bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]) as f32 / 65535.0)
            .collect()
    } else {
        bytes.iter().map(|&v| v as f32 / 255.0).collect()
    }
}
