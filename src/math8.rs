//! 8-bit fixed-point helpers shared by the pulse curve and the effects.

/// Scale an 8-bit value by `amount / 255`, rounding toward zero.
///
/// `scale_floor(v, 255) == v` and `scale_floor(v, 0) == 0`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_floor(value: u8, amount: u8) -> u8 {
    ((value as u16 * amount as u16) / 255) as u8
}

/// Scale an 8-bit value by a factor in `[0, 1]`, rounding toward zero.
///
/// Factors outside the range are clamped first.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_by(value: u8, factor: f32) -> u8 {
    let factor = factor.clamp(0.0, 1.0);
    (f32::from(value) * factor) as u8
}

/// Clamp a float into `[0, 255]` and truncate it to a byte
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp8(value: f32) -> u8 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= 255.0 {
        255
    } else {
        value as u8
    }
}

/// Saturating subtract, mirrors `FastLED` `qsub8`
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Ease out quadratic over `t` in `[0, 1]`
///
/// Fast at the start, slowing down toward the end.
#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv
}
