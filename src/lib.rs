#![no_std]

pub mod beacon;
pub mod color;
pub mod config;
pub mod context;
pub mod effect;
pub mod event;
pub mod frame_scheduler;
pub mod math8;
pub mod node;
pub mod palette;
pub mod phase;
pub mod renderer;
pub mod sync;

pub use beacon::{BeaconCodec, BeaconConfig, BeaconPayload, CounterWidth, DecodeError, EncodeError};
pub use config::SwarmConfig;
pub use context::{Handled, SwarmContext, TickOutcome};
pub use effect::{FireTuning, FrameInput, MeteorTuning, PatternId};
pub use event::{EventQueue, EventReceiver, EventSender, SwarmEvent};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use node::{PollSummary, SwarmNode};
pub use palette::{Button, ColorPalette, PaletteSelection};
pub use phase::{PhaseClock, PulseConfig, PulseCurve};
pub use renderer::AnimationRenderer;
pub use sync::{SyncMonitor, SyncOutcome, SyncState};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Pixel output trait
///
/// Implement this trait to push finished frames to the LED hardware.
/// The node is generic over this trait.
pub trait PixelSink {
    /// Transmit one finished frame
    fn write(&mut self, colors: &[Rgb]);
}

/// Advertising collaborator
///
/// Receives the encoded beacon once per phase cycle and broadcasts it at
/// its own cadence.
pub trait Advertiser {
    /// Take over the encoded beacon for broadcasting
    fn advertise(&mut self, payload: &[u8]);
}
