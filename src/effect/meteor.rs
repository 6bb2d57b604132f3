//! Traveling meteor
//!
//! Once per phase cycle a bright head runs from the strip origin to its end
//! over the first part of the cycle, easing out as it goes. Pixels it passed
//! keep glowing and fade out at random, like embers.
//!
//! A new cycle is detected when the phase progress drops compared to the
//! previous frame, which covers both the natural wrap and a sync reset.

use rand::Rng;

use super::{Effect, FrameInput, SharedState};
use crate::{
    color::{BLACK, Rgb},
    math8::{ease_out_quad, scale_by},
};

/// Chance per frame that a lit pixel dims
pub const DEFAULT_DECAY_CHANCE: f32 = 0.2;

/// Share of the cycle the head needs to reach the strip end
pub const DEFAULT_TRAVEL: f32 = 0.5;

/// Meteor tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorTuning {
    /// Probability in `[0, 1]` that a lit pixel is damped on a frame
    pub decay_chance: f32,
    /// Lower bound of the random damping factor
    pub damping_min: f32,
    /// Upper bound (exclusive) of the random damping factor
    pub damping_max: f32,
    /// Share of the cycle spent traveling
    pub travel: f32,
}

impl MeteorTuning {
    pub const fn new() -> Self {
        Self {
            decay_chance: DEFAULT_DECAY_CHANCE,
            damping_min: 0.5,
            damping_max: 0.9,
            travel: DEFAULT_TRAVEL,
        }
    }
}

impl Default for MeteorTuning {
    fn default() -> Self {
        Self::new()
    }
}

/// Meteor pattern state
#[derive(Debug, Clone)]
pub struct MeteorEffect {
    tuning: MeteorTuning,
    /// Head position, non-decreasing within a cycle
    head: usize,
    /// Whether the head pixel at `head` was already lit this cycle
    head_drawn: bool,
    /// Set on cycle restart, keeps the head at the origin for one frame
    restarted: bool,
    last_progress: Option<f32>,
    /// Frames seen since the current cycle started
    cycle_frames: u32,
}

impl MeteorEffect {
    pub const fn new(tuning: MeteorTuning) -> Self {
        Self {
            tuning,
            head: 0,
            head_drawn: false,
            restarted: false,
            last_progress: None,
            cycle_frames: 0,
        }
    }

    pub const fn head(&self) -> usize {
        self.head
    }

    pub const fn cycle_frames(&self) -> u32 {
        self.cycle_frames
    }

    /// Observe the progress of the current frame.
    ///
    /// Called every frame whatever the selected pattern, so wraps are not
    /// missed while another pattern is shown. Returns `true` when a new cycle
    /// started; the shared decay array is cleared in that case.
    pub fn track_cycle<const N: usize>(&mut self, progress: f32, shared: &mut SharedState<N>) -> bool {
        let restarted = self.last_progress.is_none_or(|last| progress < last);
        self.last_progress = Some(progress);

        if restarted {
            self.head = 0;
            self.head_drawn = false;
            self.restarted = true;
            self.cycle_frames = 0;
            shared.decay = [0.0; N];
        } else {
            // Only the frame that saw the drop starts at the origin.
            self.restarted = false;
            self.cycle_frames = self.cycle_frames.saturating_add(1);
        }

        restarted
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn target_head<const N: usize>(&self, progress: f32) -> usize {
        let last = N.saturating_sub(1);
        if self.tuning.travel <= 0.0 || progress >= self.tuning.travel {
            return last;
        }
        let eased = ease_out_quad(progress / self.tuning.travel);
        ((eased * last as f32) as usize).min(last)
    }

    fn damp<const N: usize>(&self, shared: &mut SharedState<N>) {
        let SharedState { decay, rng } = shared;
        for level in decay.iter_mut() {
            if *level <= 0.0 {
                continue;
            }
            if rng.r#gen::<f32>() < self.tuning.decay_chance {
                let factor = if self.tuning.damping_min < self.tuning.damping_max {
                    rng.gen_range(self.tuning.damping_min..self.tuning.damping_max)
                } else {
                    self.tuning.damping_min
                };
                *level *= factor.clamp(0.0, 1.0);
            }
        }
    }
}

impl Default for MeteorEffect {
    fn default() -> Self {
        Self::new(MeteorTuning::new())
    }
}

/// Scale a channel by `level`, never below 1 while the pixel is lit
fn ember(channel: u8, level: f32) -> u8 {
    if level <= 0.0 || channel == 0 {
        return 0;
    }
    scale_by(channel, level).max(1)
}

impl<const N: usize> Effect<N> for MeteorEffect {
    fn render(&mut self, frame: &FrameInput, shared: &mut SharedState<N>, leds: &mut [Rgb; N]) {
        if N == 0 {
            return;
        }

        let progress = frame.progress();
        let target = if self.restarted {
            0
        } else {
            self.target_head::<N>(progress)
        };
        self.restarted = false;

        // Embers first, so the pixels lit this frame stay at full brightness.
        self.damp(shared);

        let traveling = self.tuning.travel > 0.0 && progress < self.tuning.travel;
        let next_head = self.head.max(target);
        // A tick can land past the travel window before the eased target
        // reached the strip end, so any forward jump is still drawn.
        if traveling || !self.head_drawn || next_head > self.head {
            let from = if self.head_drawn { self.head + 1 } else { self.head };
            for level in shared.decay.iter_mut().take(next_head + 1).skip(from) {
                *level = 1.0;
            }
            // A head that did not move this frame stays at full brightness.
            shared.decay[next_head] = 1.0;
            self.head_drawn = true;
        }
        self.head = next_head;

        for (led, level) in leds.iter_mut().zip(shared.decay.iter()) {
            *led = if *level > 0.0 {
                Rgb {
                    r: ember(frame.color.r, *level),
                    g: ember(frame.color.g, *level),
                    b: ember(frame.color.b, *level),
                }
            } else {
                BLACK
            };
        }
    }

    fn reset(&mut self) {
        self.head = 0;
        self.head_drawn = false;
        self.restarted = false;
        self.last_progress = None;
        self.cycle_frames = 0;
    }
}
