//! Selectable colors and patterns
//!
//! Buttons cycle through a fixed palette and the closed set of patterns.
//! Indices always wrap, so no input can push the selection out of range.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    color::{Rgb, hue_wheel, rgb_from_u32},
    effect::PatternId,
};

const BUTTON_NEXT_COLOR: u8 = 0;
const BUTTON_NEXT_PATTERN: u8 = 1;
const BUTTON_PREVIOUS_COLOR: u8 = 2;
const BUTTON_TOUCH_SYNC: u8 = 3;

/// Number of colors in [`DEFAULT_PALETTE`]
pub const DEFAULT_PALETTE_SIZE: usize = 6;

/// Warm amber first, then a spread of saturated hues
#[allow(clippy::unreadable_literal)]
pub const DEFAULT_PALETTE: [Rgb; DEFAULT_PALETTE_SIZE] = [
    rgb_from_u32(0xFF7823), // Amber
    rgb_from_u32(0xFF0000), // Red
    rgb_from_u32(0x00FF40), // Green
    rgb_from_u32(0x0050FF), // Blue
    rgb_from_u32(0xB400FF), // Violet
    rgb_from_u32(0xFFFFFF), // White
];

/// Physical button actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Button {
    NextColor = BUTTON_NEXT_COLOR,
    NextPattern = BUTTON_NEXT_PATTERN,
    PreviousColor = BUTTON_PREVIOUS_COLOR,
    TouchSync = BUTTON_TOUCH_SYNC,
}

impl Button {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            BUTTON_NEXT_COLOR => Self::NextColor,
            BUTTON_NEXT_PATTERN => Self::NextPattern,
            BUTTON_PREVIOUS_COLOR => Self::PreviousColor,
            BUTTON_TOUCH_SYNC => Self::TouchSync,
            _ => return None,
        })
    }
}

/// Fixed, ordered set of colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette<const C: usize> {
    colors: [Rgb; C],
}

impl<const C: usize> ColorPalette<C> {
    pub const fn new(colors: [Rgb; C]) -> Self {
        const { assert!(C > 0, "palette needs at least one color") };
        Self { colors }
    }

    /// Palette of `C` colors evenly rotated around the hue wheel from `base`
    pub fn hue_wheel(base: Rgb) -> Self {
        Self::new(hue_wheel::<C>(base))
    }

    pub const fn len(&self) -> usize {
        C
    }

    pub const fn is_empty(&self) -> bool {
        C == 0
    }

    /// Color at `index`, wrapped modulo the palette size
    pub const fn get(&self, index: usize) -> Rgb {
        self.colors[index % C]
    }
}

impl Default for ColorPalette<DEFAULT_PALETTE_SIZE> {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE)
    }
}

/// Current color and pattern choice
///
/// `current_color` always equals `palette[color_index]` and
/// `pending_next_color` the entry after it.
#[derive(Debug, Clone)]
pub struct PaletteSelection<const C: usize> {
    palette: ColorPalette<C>,
    color_index: usize,
    pattern: PatternId,
    current_color: Rgb,
    pending_next_color: Rgb,
}

impl<const C: usize> PaletteSelection<C> {
    pub const fn new(palette: ColorPalette<C>, color_index: usize, pattern: PatternId) -> Self {
        let color_index = color_index % C;
        Self {
            palette,
            color_index,
            pattern,
            current_color: palette.get(color_index),
            pending_next_color: palette.get(color_index + 1),
        }
    }

    pub const fn palette(&self) -> &ColorPalette<C> {
        &self.palette
    }

    pub const fn color_index(&self) -> usize {
        self.color_index
    }

    pub const fn pattern(&self) -> PatternId {
        self.pattern
    }

    pub const fn current_color(&self) -> Rgb {
        self.current_color
    }

    pub const fn pending_next_color(&self) -> Rgb {
        self.pending_next_color
    }

    /// Move the color selection by `step` entries, wrapping both ways
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn advance_color(&mut self, step: i32) {
        let count = C as i64;
        let index = (self.color_index as i64 + i64::from(step)).rem_euclid(count);
        self.set_color_index(index as usize);
    }

    /// Select the color at `index`, wrapped modulo the palette size
    pub fn set_color_index(&mut self, index: usize) {
        self.color_index = index % C;
        self.current_color = self.palette.get(self.color_index);
        self.pending_next_color = self.palette.get(self.color_index + 1);
        #[cfg(feature = "esp32-log")]
        println!(
            "[PaletteSelection] color {} -> {:?}",
            self.color_index, self.current_color
        );
    }

    /// Move the pattern selection by `step` entries, wrapping both ways
    pub fn advance_pattern(&mut self, step: i32) {
        self.pattern = self.pattern.offset(step);
        #[cfg(feature = "esp32-log")]
        println!("[PaletteSelection] pattern -> {}", self.pattern.as_str());
    }

    pub fn set_pattern(&mut self, pattern: PatternId) {
        self.pattern = pattern;
    }
}
