//! Tests for color conversion functions

use super::*;
use crate::decoders::DecodedImage;
use crate::error::WaveformError;

fn assert_hsv(hsv: Hsv, h: f32, s: f32, v: f32) {
    assert!((hsv.h - h).abs() < 1e-3, "hue {} != {}", hsv.h, h);
    assert!((hsv.s - s).abs() < 1e-5, "saturation {} != {}", hsv.s, s);
    assert!((hsv.v - v).abs() < 1e-5, "value {} != {}", hsv.v, v);
}

#[test]
fn test_primary_colors() {
    assert_hsv(rgb_to_hsv(1.0, 0.0, 0.0), 0.0, 1.0, 1.0);
    assert_hsv(rgb_to_hsv(0.0, 1.0, 0.0), 120.0, 1.0, 1.0);
    assert_hsv(rgb_to_hsv(0.0, 0.0, 1.0), 240.0, 1.0, 1.0);
}

#[test]
fn test_yellow_is_sixty_degrees() {
    // Pure yellow is the target hue of a Doppler trace overlay
    assert_hsv(rgb_to_hsv(1.0, 1.0, 0.0), 60.0, 1.0, 1.0);
    assert_hsv(rgb_to_hsv(0.5, 0.5, 0.25), 60.0, 0.5, 0.5);
}

#[test]
fn test_achromatic() {
    assert_hsv(rgb_to_hsv(0.0, 0.0, 0.0), 0.0, 0.0, 0.0);
    assert_hsv(rgb_to_hsv(1.0, 1.0, 1.0), 0.0, 0.0, 1.0);
    assert_hsv(rgb_to_hsv(0.4, 0.4, 0.4), 0.0, 0.0, 0.4);
}

#[test]
fn test_magenta_wraps_below_360() {
    let hsv = rgb_to_hsv(1.0, 0.0, 1.0);
    assert_hsv(hsv, 300.0, 1.0, 1.0);

    let hsv = rgb_to_hsv(1.0, 0.0, 0.001);
    assert!(hsv.h < 360.0 && hsv.h > 359.0);
}

#[test]
fn test_u8_matches_normalized() {
    let a = rgb_to_hsv_u8(255, 128, 0);
    let b = rgb_to_hsv(1.0, 128.0 / 255.0, 0.0);
    assert_eq!(a, b);
}

#[test]
fn test_out_of_range_inputs_are_clamped() {
    assert_hsv(rgb_to_hsv(2.0, -1.0, 0.0), 0.0, 1.0, 1.0);
}

#[test]
fn test_frame_from_image_preserves_layout() {
    let image = DecodedImage {
        width: 2,
        height: 2,
        data: vec![
            1.0, 0.0, 0.0, // (0,0) red
            0.0, 1.0, 0.0, // (1,0) green
            0.0, 0.0, 1.0, // (0,1) blue
            1.0, 1.0, 0.0, // (1,1) yellow
        ],
        channels: 3,
        source_is_grayscale: false,
    };

    let frame = HsvFrame::from_image(&image).unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 2);
    assert_hsv(frame.get(1, 0), 120.0, 1.0, 1.0);
    assert_hsv(frame.get(0, 1), 240.0, 1.0, 1.0);
    assert_hsv(frame.get(1, 1), 60.0, 1.0, 1.0);
}

#[test]
fn test_frame_rejects_wrong_pixel_count() {
    let result = HsvFrame::from_pixels(3, 3, vec![rgb_to_hsv(0.0, 0.0, 0.0); 8]);
    assert!(result.is_err());
}

#[test]
fn test_frame_rejects_short_buffer() {
    let image = DecodedImage {
        width: 4,
        height: 4,
        data: vec![0.0; 12],
        channels: 3,
        source_is_grayscale: false,
    };
    let result = HsvFrame::from_image(&image);
    assert!(matches!(result, Err(WaveformError::DimensionMismatch(_))));
}

#[test]
fn test_frame_rejects_single_channel() {
    let image = DecodedImage {
        width: 2,
        height: 2,
        data: vec![0.5; 4],
        channels: 1,
        source_is_grayscale: true,
    };
    let result = HsvFrame::from_image(&image);
    assert!(matches!(result, Err(WaveformError::DimensionMismatch(_))));
}
