//! Hue rotation in RGB space
//!
//! Rotates a color around the gray diagonal of the RGB cube, which shifts
//! the hue without a round trip through HSV. Saturation and value are plain
//! multipliers applied in the same pass.

use libm::{cosf, sinf, sqrtf};

use crate::{color::Rgb, math8::clamp8};

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Shift hue by `hue_deg` degrees and scale saturation and value.
///
/// `sat` of 1.0 keeps the saturation, 0.0 collapses to gray. `val`
/// multiplies the resulting brightness. Channels are clamped to `[0, 255]`.
pub fn shift_hsv(color: Rgb, hue_deg: f32, sat: f32, val: f32) -> Rgb {
    let cos_a = sat * cosf(hue_deg * DEG_TO_RAD);
    let sin_a = sat * sinf(hue_deg * DEG_TO_RAD);

    let third = 1.0 / 3.0;
    let root_third = sqrtf(third);
    let one_minus_cos = 1.0 - cos_a;
    let diagonal = cos_a + one_minus_cos * third;
    let plus = one_minus_cos * third + root_third * sin_a;
    let minus = one_minus_cos * third - root_third * sin_a;

    let r = f32::from(color.r);
    let g = f32::from(color.g);
    let b = f32::from(color.b);

    Rgb {
        r: clamp8((r * diagonal + g * minus + b * plus) * val),
        g: clamp8((r * plus + g * diagonal + b * minus) * val),
        b: clamp8((r * minus + g * plus + b * diagonal) * val),
    }
}

/// Build `C` colors by rotating `base` in even hue steps around the wheel.
///
/// The first entry is `base` itself.
#[allow(clippy::cast_precision_loss)]
pub fn hue_wheel<const C: usize>(base: Rgb) -> [Rgb; C] {
    let step = 360.0 / C.max(1) as f32;
    let mut colors = [base; C];
    for (i, color) in colors.iter_mut().enumerate().skip(1) {
        *color = shift_hsv(base, step * i as f32, 1.0, 1.0);
    }
    colors
}
