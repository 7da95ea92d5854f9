//! TIFF image decoder

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};

use super::{check_len, expand_gray, DecodedImage};
use crate::error::{Result, WaveformError};

/// Decode a TIFF file
pub(crate) fn decode_tiff<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| WaveformError::io(path, e))?;
    let decode_err = |what: &str, e: tiff::TiffError| {
        WaveformError::Decode(format!("Failed to {} TIFF: {}", what, e))
    };

    let mut decoder = Decoder::new(BufReader::new(file)).map_err(|e| decode_err("open", e))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| decode_err("read dimensions of", e))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| decode_err("read color type of", e))?;
    let image_data = decoder
        .read_image()
        .map_err(|e| decode_err("read image data of", e))?;

    let data = match image_data {
        DecodingResult::U8(buf) => decode_tiff_buffer(&buf, width, height, color_type)?,
        DecodingResult::U16(buf) => decode_tiff_buffer(&buf, width, height, color_type)?,
        DecodingResult::U32(buf) => decode_tiff_buffer(&buf, width, height, color_type)?,
        DecodingResult::F32(buf) => decode_tiff_buffer(&buf, width, height, color_type)?,
        DecodingResult::F64(buf) => decode_tiff_buffer(&buf, width, height, color_type)?,
        _ => {
            return Err(WaveformError::Decode(
                "Unsupported TIFF sample format".to_string(),
            ))
        }
    };

    Ok(DecodedImage {
        width,
        height,
        data,
        channels: 3,
        source_is_grayscale: matches!(color_type, tiff::ColorType::Gray(_)),
    })
}

/// Trait for TIFF sample types that can be normalized to f32
trait TiffValue: Copy {
    /// Normalize this value to f32 in range [0.0, 1.0]
    fn to_normalized_f32(self) -> f32;
}

impl TiffValue for u8 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self as f32 / 255.0
    }
}

impl TiffValue for u16 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self as f32 / 65535.0
    }
}

impl TiffValue for u32 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        (self as f64 / u32::MAX as f64) as f32
    }
}

impl TiffValue for f32 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self
    }
}

impl TiffValue for f64 {
    #[inline]
    fn to_normalized_f32(self) -> f32 {
        self as f32
    }
}

fn decode_tiff_buffer<T: TiffValue>(
    buf: &[T],
    width: u32,
    height: u32,
    color_type: tiff::ColorType,
) -> Result<Vec<f32>> {
    let channels = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        other => {
            return Err(WaveformError::Decode(format!(
                "TIFF color type {:?} not supported",
                other
            )))
        }
    };

    let pixel_count = width as usize * height as usize;
    check_len("TIFF", buf.len(), pixel_count * channels)?;

    let data = match channels {
        1 => expand_gray(buf.iter().map(|v| v.to_normalized_f32()), pixel_count),
        4 => buf
            .chunks_exact(4)
            .flat_map(|rgba| {
                [
                    rgba[0].to_normalized_f32(),
                    rgba[1].to_normalized_f32(),
                    rgba[2].to_normalized_f32(),
                ]
            })
            .collect(),
        _ => buf.iter().map(|v| v.to_normalized_f32()).collect(),
    };
    Ok(data)
}
