//! Radiance to display color mapping.

use crate::Color;
use ember_math::Interval;

/// Channel range written to 8-bit output. Stays below 1.0 so that
/// `255.999 * x` never rounds up past 255.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Apply display gamma: `x^(1/gamma)`.
///
/// Negative inputs (numerical drift) are clamped to 0 first. `gamma` must be
/// positive.
#[inline]
pub fn linear_to_gamma(linear: f32, gamma: f32) -> f32 {
    let linear = linear.max(0.0);
    if gamma == 1.0 {
        linear
    } else {
        linear.powf(1.0 / gamma)
    }
}

/// Undo [`linear_to_gamma`]: `x^gamma`.
#[inline]
pub fn gamma_to_linear(encoded: f32, gamma: f32) -> f32 {
    let encoded = encoded.max(0.0);
    if gamma == 1.0 {
        encoded
    } else {
        encoded.powf(gamma)
    }
}

/// Quantize one gamma-encoded channel to [0, 255].
#[inline]
fn to_byte(x: f32) -> u8 {
    (255.999 * INTENSITY.clamp(x)) as u8
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb8(color: Color, gamma: f32) -> [u8; 3] {
    [
        to_byte(linear_to_gamma(color.x, gamma)),
        to_byte(linear_to_gamma(color.y, gamma)),
        to_byte(linear_to_gamma(color.z, gamma)),
    ]
}
