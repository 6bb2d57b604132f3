//! Main-loop side of a swarm node
//!
//! Drains the event queue, hands finished frames to the pixel sink and
//! beacons to the advertiser.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::context::{Handled, SwarmContext, TickOutcome};
use crate::event::EventReceiver;
use crate::sync::SyncOutcome;
use crate::{Advertiser, PixelSink};

/// Counts of what one [`SwarmNode::poll`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// Events taken from the queue
    pub events: u32,
    /// Frames rendered and written to the sink
    pub frames: u32,
    /// Beacons that reset the local phase
    pub phase_resets: u32,
    /// Beacons handed to the advertiser
    pub advertised: u32,
}

/// Swarm node - owns the context and its collaborators
pub struct SwarmNode<'a, S: PixelSink, A: Advertiser, const N: usize, const C: usize, const Q: usize>
{
    events: EventReceiver<'a, Q>,
    sink: S,
    advertiser: A,
    context: SwarmContext<N, C>,
}

impl<'a, S: PixelSink, A: Advertiser, const N: usize, const C: usize, const Q: usize>
    SwarmNode<'a, S, A, N, C, Q>
{
    pub const fn new(
        events: EventReceiver<'a, Q>,
        sink: S,
        advertiser: A,
        context: SwarmContext<N, C>,
    ) -> Self {
        Self {
            events,
            sink,
            advertiser,
            context,
        }
    }

    /// Process every pending event (non-blocking)
    ///
    /// Each `Tick` renders a frame and writes it to the sink before the next
    /// event is taken, so at most one frame is in flight.
    pub fn poll(&mut self) -> PollSummary {
        let mut summary = PollSummary::default();

        while let Ok(event) = self.events.try_receive() {
            summary.events += 1;
            match self.context.handle(&event) {
                Handled::Frame(outcome) => {
                    summary.frames += 1;
                    if self.publish(outcome) {
                        summary.advertised += 1;
                    }
                }
                Handled::Sync(SyncOutcome::PhaseReset { .. }) => summary.phase_resets += 1,
                Handled::Sync(_) | Handled::Done => {}
            }
        }

        summary
    }

    /// Advance one tick, render and publish without going through the queue
    pub fn step(&mut self) -> TickOutcome {
        let outcome = self.context.tick();
        self.publish(outcome);
        outcome
    }

    /// Write the current frame and, when due, the beacon.
    ///
    /// Returns whether a beacon was advertised.
    fn publish(&mut self, outcome: TickOutcome) -> bool {
        self.sink.write(self.context.frame());

        if !outcome.advertise {
            return false;
        }
        match self.context.beacon_payload() {
            Ok(payload) => {
                self.advertiser.advertise(&payload);
                true
            }
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[SwarmNode.publish] beacon dropped: {:?}", _err);
                false
            }
        }
    }

    pub const fn context(&self) -> &SwarmContext<N, C> {
        &self.context
    }

    pub const fn context_mut(&mut self) -> &mut SwarmContext<N, C> {
        &mut self.context
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn advertiser(&self) -> &A {
        &self.advertiser
    }
}
