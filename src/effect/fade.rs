//! Uniform fade
//!
//! Every pixel shows the selected color scaled by the pulse amplitude.

use super::{Effect, FrameInput, SharedState};
use crate::color::{Rgb, scale_color};

/// Whole strip breathing in one color
#[derive(Debug, Clone, Default)]
pub struct FadeEffect;

impl FadeEffect {
    pub const fn new() -> Self {
        Self
    }
}

impl<const N: usize> Effect<N> for FadeEffect {
    fn render(&mut self, frame: &FrameInput, shared: &mut SharedState<N>, leds: &mut [Rgb; N]) {
        let color = scale_color(frame.color, frame.amplitude);
        let level = f32::from(frame.amplitude) / 255.0;

        for (led, decay) in leds.iter_mut().zip(shared.decay.iter_mut()) {
            *led = color;
            // Left behind for the meteor if the user switches mid-cycle.
            *decay = level;
        }
    }
}
