use crate::color::Rgb;
use crate::effect::{
    Effect, FadeEffect, FireEffect, FireTuning, FrameInput, MeteorEffect, MeteorTuning,
    PatternId, SharedState,
};

/// Turns phase, amplitude, pattern and color into a pixel buffer
///
/// Owns the frame buffer and every pattern's state, so switching patterns
/// never allocates and the fire keeps its heat while another pattern runs.
pub struct AnimationRenderer<const N: usize> {
    frame_buffer: [Rgb; N],
    shared: SharedState<N>,
    fade: FadeEffect,
    meteor: MeteorEffect,
    fire: FireEffect<N>,
}

impl<const N: usize> AnimationRenderer<N> {
    pub fn new(meteor: MeteorTuning, fire: FireTuning, seed: u64) -> Self {
        Self {
            frame_buffer: [Rgb::default(); N],
            shared: SharedState::new(seed),
            fade: FadeEffect::new(),
            meteor: MeteorEffect::new(meteor),
            fire: FireEffect::new(fire),
        }
    }

    /// Render one frame
    ///
    /// The whole buffer is rewritten on every call.
    pub fn render(&mut self, frame: &FrameInput, pattern: PatternId) -> &[Rgb; N] {
        self.meteor.track_cycle(frame.progress(), &mut self.shared);

        match pattern {
            PatternId::Fade => self.fade.render(frame, &mut self.shared, &mut self.frame_buffer),
            PatternId::Meteor => {
                self.meteor
                    .render(frame, &mut self.shared, &mut self.frame_buffer);
            }
            PatternId::Fire => self.fire.render(frame, &mut self.shared, &mut self.frame_buffer),
        }

        &self.frame_buffer
    }

    /// Drop every pattern's state and blank the frame
    pub fn reset(&mut self) {
        Effect::<N>::reset(&mut self.fade);
        Effect::<N>::reset(&mut self.meteor);
        self.fire.reset();
        self.shared.decay = [0.0; N];
        self.frame_buffer = [Rgb::default(); N];
    }

    /// Last rendered frame, all off before the first render
    pub const fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }

    pub const fn meteor(&self) -> &MeteorEffect {
        &self.meteor
    }

    pub const fn fire(&self) -> &FireEffect<N> {
        &self.fire
    }

    pub const fn fire_mut(&mut self) -> &mut FireEffect<N> {
        &mut self.fire
    }

    pub const fn decay(&self) -> &[f32; N] {
        &self.shared.decay
    }
}
