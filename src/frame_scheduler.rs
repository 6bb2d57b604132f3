//! Frame and counter pacing for polling platforms.
//!
//! Where no hardware timer feeds `Tick` events, the caller loops over
//! [`FrameScheduler::tick`] and sleeps for the returned duration in between.

use embassy_time::{Duration, Instant};

use crate::node::{PollSummary, SwarmNode};
use crate::{Advertiser, PixelSink};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Time-alive counter ticks fired during this call.
    pub counter_ticks: u32,
    /// What draining the event queue did.
    pub events: PollSummary,
}

/// Portable scheduler that paces frames and the time-alive counter.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(node, tick_interval, counter_interval);
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    S: PixelSink,
    A: Advertiser,
    const N: usize,
    const C: usize,
    const Q: usize,
> {
    node: SwarmNode<'a, S, A, N, C, Q>,
    next_frame: Instant,
    next_count: Instant,
    frame_duration: Duration,
    counter_interval: Duration,
}

impl<'a, S: PixelSink, A: Advertiser, const N: usize, const C: usize, const Q: usize>
    FrameScheduler<'a, S, A, N, C, Q>
{
    pub const fn new(
        node: SwarmNode<'a, S, A, N, C, Q>,
        frame_duration: Duration,
        counter_interval: Duration,
    ) -> Self {
        Self {
            node,
            next_frame: Instant::from_millis(0),
            next_count: counter_interval_start(counter_interval),
            frame_duration,
            counter_interval,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// 1. Fires every counter tick that came due since the last call
    /// 2. Drains pending events
    /// 3. Applies drift correction if we've fallen too far behind
    /// 4. Advances the phase, renders and writes the frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let mut counter_ticks = 0;
        if self.counter_interval.as_ticks() > 0 {
            while now >= self.next_count {
                self.node.context_mut().on_counter_tick();
                self.next_count += self.counter_interval;
                counter_ticks += 1;
            }
        }

        let events = self.node.poll();

        // Skip the backlog after a long stall instead of bursting frames.
        let max_drift = Duration::from_ticks(self.frame_duration.as_ticks() * 2);
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.node.step();
        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            counter_ticks,
            events,
        }
    }

    pub const fn node(&self) -> &SwarmNode<'a, S, A, N, C, Q> {
        &self.node
    }

    pub const fn node_mut(&mut self) -> &mut SwarmNode<'a, S, A, N, C, Q> {
        &mut self.node
    }
}

/// The first counter tick is one interval after boot
const fn counter_interval_start(interval: Duration) -> Instant {
    Instant::from_ticks(interval.as_ticks())
}
