//! All mutable node state in one place
//!
//! The context is owned by the main loop. Callbacks never touch it directly;
//! they go through the event queue and [`SwarmContext::handle`].

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::beacon::{BeaconPayload, EncodeError};
use crate::color::Rgb;
use crate::config::SwarmConfig;
use crate::effect::FrameInput;
use crate::event::SwarmEvent;
use crate::palette::{Button, ColorPalette, PaletteSelection};
use crate::phase::{PhaseClock, PulseConfig};
use crate::renderer::AnimationRenderer;
use crate::sync::{SyncMonitor, SyncOutcome};

/// Result of one frame tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Phase the frame was rendered at
    pub phase: u32,
    pub amplitude: u8,
    /// The tick crossed the advertise point, a beacon should go out
    pub advertise: bool,
}

/// What handling one event produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A new frame is ready in [`SwarmContext::frame`]
    Frame(TickOutcome),
    Sync(SyncOutcome),
    /// State changed (or not), nothing to report
    Done,
}

/// Phase clock, sync monitor, palette selection and renderer of one node
pub struct SwarmContext<const N: usize, const C: usize> {
    tick_delta: u32,
    pulse: PulseConfig,
    advertise_phase: Option<u32>,

    clock: PhaseClock,
    sync: SyncMonitor,
    selection: PaletteSelection<C>,
    renderer: AnimationRenderer<N>,
}

impl<const N: usize, const C: usize> SwarmContext<N, C> {
    pub fn new(config: &SwarmConfig, palette: ColorPalette<C>) -> Self {
        Self {
            tick_delta: config.tick_delta(),
            pulse: config.pulse,
            advertise_phase: config.advertise_phase,
            clock: PhaseClock::new(config.phase_duration),
            sync: SyncMonitor::new(config.beacon, config.sync_timeout),
            selection: PaletteSelection::new(palette, config.color_index, config.pattern),
            renderer: AnimationRenderer::new(config.meteor, config.fire, config.seed),
        }
    }

    /// Dispatch one queued event
    pub fn handle(&mut self, event: &SwarmEvent) -> Handled {
        match event {
            SwarmEvent::Tick => Handled::Frame(self.tick()),
            SwarmEvent::CounterTick => {
                self.on_counter_tick();
                Handled::Done
            }
            SwarmEvent::BeaconReceived(payload) => Handled::Sync(self.on_beacon(payload)),
            SwarmEvent::ButtonPressed(button) => {
                self.on_button(*button);
                Handled::Done
            }
            SwarmEvent::TouchSync => {
                self.touch_sync();
                Handled::Done
            }
        }
    }

    /// Advance the phase by one tick and render the frame
    pub fn tick(&mut self) -> TickOutcome {
        let advertise = self
            .advertise_phase
            .is_some_and(|mark| self.clock.crosses(self.tick_delta, mark));
        self.clock.advance(self.tick_delta);

        let amplitude = self.render_current();
        TickOutcome {
            phase: self.clock.get(),
            amplitude,
            advertise,
        }
    }

    /// Render at the current phase without advancing it
    pub fn render(&mut self) -> &[Rgb; N] {
        self.render_current();
        self.renderer.frame()
    }

    fn render_current(&mut self) -> u8 {
        let amplitude = self.amplitude();
        let input = FrameInput {
            phase: self.clock.get(),
            period: self.clock.period(),
            amplitude,
            color: self.selection.current_color(),
        };
        self.renderer.render(&input, self.selection.pattern());
        amplitude
    }

    pub fn on_counter_tick(&mut self) {
        self.sync.tick_counter();
    }

    pub fn on_beacon(&mut self, payload: &[u8]) -> SyncOutcome {
        self.sync.on_receive(payload, &mut self.clock)
    }

    pub fn on_button(&mut self, button: Button) {
        #[cfg(feature = "esp32-log")]
        println!("[SwarmContext.on_button] {:?}", button);
        match button {
            Button::NextColor => self.selection.advance_color(1),
            Button::PreviousColor => self.selection.advance_color(-1),
            Button::NextPattern => self.selection.advance_pattern(1),
            Button::TouchSync => self.touch_sync(),
        }
    }

    pub fn touch_sync(&mut self) {
        self.sync.touch_sync();
    }

    /// Beacon carrying the current time-alive counter
    pub fn beacon_payload(&self) -> Result<BeaconPayload, EncodeError> {
        self.sync.beacon()
    }

    /// Pulse amplitude at the current phase
    pub fn amplitude(&self) -> u8 {
        self.pulse.amplitude(self.clock.get(), self.clock.period())
    }

    /// Last rendered frame, all off before the first render
    pub const fn frame(&self) -> &[Rgb; N] {
        self.renderer.frame()
    }

    pub const fn clock(&self) -> &PhaseClock {
        &self.clock
    }

    pub const fn sync(&self) -> &SyncMonitor {
        &self.sync
    }

    pub const fn sync_mut(&mut self) -> &mut SyncMonitor {
        &mut self.sync
    }

    pub const fn selection(&self) -> &PaletteSelection<C> {
        &self.selection
    }

    pub const fn selection_mut(&mut self) -> &mut PaletteSelection<C> {
        &mut self.selection
    }

    pub const fn renderer(&self) -> &AnimationRenderer<N> {
        &self.renderer
    }

    pub const fn renderer_mut(&mut self) -> &mut AnimationRenderer<N> {
        &mut self.renderer
    }
}
