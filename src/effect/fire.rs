//! Fire simulation
//!
//! One byte of heat per pixel, index 0 at the base of the flame. Each frame
//! the strip cools at random, heat drifts upward, and the base occasionally
//! sparks. Heat is kept across frames and across phase cycles.

use rand::Rng;

use super::{Effect, FrameInput, SharedState};
use crate::{
    color::{Rgb, scale_color},
    math8::{qsub8, scale_floor},
};

/// Chance out of 256 that a pixel cools on a frame
pub const DEFAULT_COOLING_CHANCE: u8 = 140;

/// Largest heat a single cooling step removes
pub const DEFAULT_COOLING_MAX: u8 = 24;

/// Spark chance out of 256 at full amplitude
pub const DEFAULT_SPARK_SCALE: u8 = 120;

/// Pixels from the base where sparks may ignite
pub const DEFAULT_SPARK_ZONE: usize = 3;

/// Lowest heat of a fresh spark
pub const DEFAULT_SPARK_HEAT_MIN: u8 = 160;

/// Fire tuning, chances of zero disable the matching step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireTuning {
    pub cooling_chance: u8,
    pub cooling_max: u8,
    /// Spark chance is `amplitude * spark_scale / 255` out of 256
    pub spark_scale: u8,
    pub spark_zone: usize,
    pub spark_heat_min: u8,
}

impl FireTuning {
    pub const fn new() -> Self {
        Self {
            cooling_chance: DEFAULT_COOLING_CHANCE,
            cooling_max: DEFAULT_COOLING_MAX,
            spark_scale: DEFAULT_SPARK_SCALE,
            spark_zone: DEFAULT_SPARK_ZONE,
            spark_heat_min: DEFAULT_SPARK_HEAT_MIN,
        }
    }
}

impl Default for FireTuning {
    fn default() -> Self {
        Self::new()
    }
}

/// Fire pattern state
#[derive(Debug, Clone)]
pub struct FireEffect<const N: usize> {
    tuning: FireTuning,
    heat: [u8; N],
}

impl<const N: usize> FireEffect<N> {
    pub const fn new(tuning: FireTuning) -> Self {
        Self {
            tuning,
            heat: [0; N],
        }
    }

    pub const fn heat(&self) -> &[u8; N] {
        &self.heat
    }

    /// Seed the heat field, e.g. at power-on
    pub const fn set_heat(&mut self, heat: [u8; N]) {
        self.heat = heat;
    }

    fn cool(&mut self, rng: &mut impl Rng) {
        for heat in &mut self.heat {
            if rng.r#gen::<u8>() < self.tuning.cooling_chance {
                *heat = qsub8(*heat, rng.gen_range(0..=self.tuning.cooling_max));
            }
        }
    }

    /// Each pixel takes a weighted average of the two below it.
    ///
    /// The result never exceeds the hottest input, so diffusion alone cannot
    /// add heat.
    #[allow(clippy::cast_possible_truncation)]
    fn diffuse(&mut self) {
        for k in (2..N).rev() {
            let below = u16::from(self.heat[k - 1]);
            let further = u16::from(self.heat[k - 2]);
            self.heat[k] = ((below + 2 * further) / 3) as u8;
        }
    }

    fn spark(&mut self, amplitude: u8, rng: &mut impl Rng) {
        let zone = self.tuning.spark_zone.min(N);
        if zone == 0 {
            return;
        }
        let chance = scale_floor(amplitude, self.tuning.spark_scale);
        if rng.r#gen::<u8>() < chance {
            let at = rng.gen_range(0..zone);
            let heat = rng.gen_range(self.tuning.spark_heat_min..=u8::MAX);
            self.heat[at] = self.heat[at].saturating_add(heat);
        }
    }
}

impl<const N: usize> Default for FireEffect<N> {
    fn default() -> Self {
        Self::new(FireTuning::new())
    }
}

impl<const N: usize> Effect<N> for FireEffect<N> {
    fn render(&mut self, frame: &FrameInput, shared: &mut SharedState<N>, leds: &mut [Rgb; N]) {
        self.cool(&mut shared.rng);
        self.diffuse();
        self.spark(frame.amplitude, &mut shared.rng);

        for (led, heat) in leds.iter_mut().zip(self.heat.iter()) {
            *led = scale_color(frame.color, *heat);
        }
    }

    fn reset(&mut self) {
        self.heat = [0; N];
    }
}
