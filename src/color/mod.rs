mod hue;

use smart_leds::RGB8;

use crate::math8::scale_floor;

pub use hue::{hue_wheel, shift_hsv};

pub type Rgb = RGB8;

/// Turned-off pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Scale every channel of `color` by `amount / 255`, rounding toward zero
#[inline]
pub const fn scale_color(color: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: scale_floor(color.r, amount),
        g: scale_floor(color.g, amount),
        b: scale_floor(color.b, amount),
    }
}
