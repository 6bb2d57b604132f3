//! Pattern system with a closed set of variants
//!
//! Each pattern implements the `Effect` trait. Patterns share the per-pixel
//! decay array and the random source through [`SharedState`], so switching
//! patterns mid-stream carries some state over.

mod fade;
mod fire;
mod meteor;

pub use fade::FadeEffect;
pub use fire::{
    DEFAULT_COOLING_CHANCE, DEFAULT_COOLING_MAX, DEFAULT_SPARK_HEAT_MIN, DEFAULT_SPARK_SCALE,
    DEFAULT_SPARK_ZONE, FireEffect, FireTuning,
};
pub use meteor::{DEFAULT_DECAY_CHANCE, DEFAULT_TRAVEL, MeteorEffect, MeteorTuning};
use rand::{SeedableRng, rngs::SmallRng};

use crate::color::Rgb;

const PATTERN_NAME_FADE: &str = "fade";
const PATTERN_NAME_METEOR: &str = "meteor";
const PATTERN_NAME_FIRE: &str = "fire";

const PATTERN_ID_FADE: u8 = 0;
const PATTERN_ID_METEOR: u8 = 1;
const PATTERN_ID_FIRE: u8 = 2;

/// Default seed for the pattern random source
pub const DEFAULT_SEED: u64 = 0x5357_4152_4d00_0001;

/// Inputs shared by every pattern for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub phase: u32,
    pub period: u32,
    /// Pulse brightness, 0-255
    pub amplitude: u8,
    pub color: Rgb,
}

impl FrameInput {
    /// Position within the cycle, `0.0 <= progress < 1.0`
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        self.phase as f32 / self.period.max(1) as f32
    }
}

/// State arrays shared between patterns
#[derive(Debug, Clone)]
pub struct SharedState<const N: usize> {
    /// Per-pixel brightness factor in `[0, 1]`
    pub decay: [f32; N],
    pub rng: SmallRng,
}

impl<const N: usize> SharedState<N> {
    pub fn new(seed: u64) -> Self {
        Self {
            decay: [0.0; N],
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

pub trait Effect<const N: usize> {
    /// Render a single frame into `leds`
    fn render(&mut self, frame: &FrameInput, shared: &mut SharedState<N>, leds: &mut [Rgb; N]);

    /// Reset pattern-local state
    fn reset(&mut self) {}
}

/// Known pattern ids that can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PatternId {
    #[default]
    Fade = PATTERN_ID_FADE,
    Meteor = PATTERN_ID_METEOR,
    Fire = PATTERN_ID_FIRE,
}

impl PatternId {
    /// Number of patterns
    pub const COUNT: u8 = 3;

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PATTERN_ID_FADE => Self::Fade,
            PATTERN_ID_METEOR => Self::Meteor,
            PATTERN_ID_FIRE => Self::Fire,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fade => PATTERN_NAME_FADE,
            Self::Meteor => PATTERN_NAME_METEOR,
            Self::Fire => PATTERN_NAME_FIRE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PATTERN_NAME_FADE => Some(Self::Fade),
            PATTERN_NAME_METEOR => Some(Self::Meteor),
            PATTERN_NAME_FIRE => Some(Self::Fire),
            _ => None,
        }
    }

    /// Pattern `step` places away, wrapping over [`Self::COUNT`]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn offset(self, step: i32) -> Self {
        let index = (i64::from(self as u8) + i64::from(step)).rem_euclid(i64::from(Self::COUNT));
        Self::from_raw(index as u8).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn previous(self) -> Self {
        self.offset(-1)
    }
}
