//! Color-space conversions
//!
//! Provides the RGB -> HSV conversion used by the pixel classifier, both per
//! pixel and for a whole decoded frame.

mod frame;
mod hsv;

#[cfg(test)]
mod tests;

// Re-export primary types
pub use frame::HsvFrame;
pub use hsv::Hsv;

// Re-export HSV functions
pub use hsv::{rgb_to_hsv, rgb_to_hsv_u8};
