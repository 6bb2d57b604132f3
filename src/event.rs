//! Events from the hardware callbacks
//!
//! Timer, radio and button callbacks run outside the main loop. They only
//! enqueue a [`SwarmEvent`]; the main loop drains the queue between frames,
//! so shared state is only ever touched from one place. The queue is a
//! `heapless::Deque` behind a `critical-section` mutex, safe to push from
//! interrupts.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::beacon::{BeaconPayload, MAX_BEACON_LEN};
use crate::palette::Button;

/// Default event queue depth
pub const DEFAULT_EVENT_QUEUE_SIZE: usize = 16;

/// Something that happened between two loop iterations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwarmEvent {
    /// Frame timer fired, advance the phase and render
    Tick,
    /// Time-alive cadence elapsed (1 Hz by default)
    CounterTick,
    /// Raw advertising payload from the scanner
    BeaconReceived(BeaconPayload),
    ButtonPressed(Button),
    /// Explicit sync signal from outside the radio path
    TouchSync,
}

/// Error returned when the queue is full; carries the rejected event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError(pub SwarmEvent);

/// Error returned when trying to receive from an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded, interrupt-safe event queue
pub struct EventQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<SwarmEvent, SIZE>>>,
}

impl<const SIZE: usize> EventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for callbacks; any number may coexist.
    pub const fn sender(&self) -> EventSender<'_, SIZE> {
        EventSender { queue: self }
    }

    /// Handle for the main loop. Only one should drain the queue.
    pub const fn receiver(&self) -> EventReceiver<'_, SIZE> {
        EventReceiver { queue: self }
    }

    pub fn try_send(&self, event: SwarmEvent) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(event).map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<SwarmEvent, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle used from callbacks
#[derive(Clone, Copy)]
pub struct EventSender<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventSender<'_, SIZE> {
    pub fn try_send(&self, event: SwarmEvent) -> Result<(), TrySendError> {
        self.queue.try_send(event)
    }

    pub fn tick(&self) -> Result<(), TrySendError> {
        self.try_send(SwarmEvent::Tick)
    }

    pub fn counter_tick(&self) -> Result<(), TrySendError> {
        self.try_send(SwarmEvent::CounterTick)
    }

    /// Copy a received payload into the queue.
    ///
    /// Payloads longer than [`MAX_BEACON_LEN`] cannot be swarm beacons and
    /// are dropped without queueing.
    pub fn beacon(&self, payload: &[u8]) -> Result<(), TrySendError> {
        if payload.len() > MAX_BEACON_LEN {
            return Ok(());
        }
        let mut bytes = BeaconPayload::new();
        // Length was checked above.
        let _ = bytes.extend_from_slice(payload);
        self.try_send(SwarmEvent::BeaconReceived(bytes))
    }

    /// Queue a press of the raw button `id`; unknown ids are ignored.
    pub fn button(&self, id: u8) -> Result<(), TrySendError> {
        match Button::from_raw(id) {
            Some(button) => self.try_send(SwarmEvent::ButtonPressed(button)),
            None => Ok(()),
        }
    }

    pub fn touch_sync(&self) -> Result<(), TrySendError> {
        self.try_send(SwarmEvent::TouchSync)
    }
}

/// Consumer handle drained by the main loop
#[derive(Clone, Copy)]
pub struct EventReceiver<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<SwarmEvent, TryReceiveError> {
        self.queue.try_receive()
    }
}
