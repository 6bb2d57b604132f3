//! Beacon-driven phase alignment
//!
//! Every node counts seconds alive and broadcasts the count. A peer whose
//! count is strictly greater is taken as "ahead" and the local phase jumps
//! to zero. Counters are never merged: each node keeps its own.
//!
//! There is no quorum and no duplicate filtering. A single peer reporting a
//! large counter resets every node that hears it, on every beacon.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::beacon::{BeaconCodec, BeaconConfig, BeaconPayload, EncodeError};
use crate::phase::PhaseClock;

/// Default number of counter ticks a sync stays fresh
pub const DEFAULT_SYNC_TIMEOUT: u32 = 8;

/// Returned by [`SyncMonitor::time_since_last_sync`] when no sync happened yet
pub const NEVER_SYNCED: i64 = -1;

/// Synchronization lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Inactive,
    /// A sync was just recorded, promoted on the next counter tick
    Activating,
    Active,
    /// The last sync aged out, dropped on the next counter tick
    Deactivating,
}

/// What a received payload did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Not a swarm beacon, nothing changed
    Ignored,
    /// Valid beacon from a peer that is not ahead
    PeerNotAhead { remote: u32 },
    /// Peer is ahead, the local phase was reset
    PhaseReset { remote: u32 },
}

/// Tracks the time-alive counter and the sync state machine
#[derive(Debug, Clone)]
pub struct SyncMonitor {
    codec: BeaconCodec,
    state: SyncState,
    local_counter: u32,
    last_sync: Option<u32>,
    timeout: Option<u32>,
}

impl SyncMonitor {
    pub const fn new(beacon: BeaconConfig, timeout: Option<u32>) -> Self {
        Self {
            codec: BeaconCodec::new(beacon),
            state: SyncState::Inactive,
            local_counter: 0,
            last_sync: None,
            timeout,
        }
    }

    pub const fn state(&self) -> SyncState {
        self.state
    }

    pub const fn local_counter(&self) -> u32 {
        self.local_counter
    }

    pub const fn last_sync(&self) -> Option<u32> {
        self.last_sync
    }

    /// Advance the time-alive counter by one and age the sync state.
    ///
    /// Called at the fixed counter cadence (1 Hz by default). The counter
    /// wraps at `u32::MAX`.
    pub fn tick_counter(&mut self) {
        self.local_counter = self.local_counter.wrapping_add(1);
        self.age();
    }

    /// Move the counter forward without touching the sync state
    pub const fn jump_counter(&mut self, amount: u32) {
        self.local_counter = self.local_counter.wrapping_add(amount);
    }

    /// Handle a received payload.
    ///
    /// Payloads without the marker, or with the counter cut off, leave every
    /// field untouched. The comparison is a plain unsigned `>` on the counter
    /// truncated to the wire width; it is not wraparound-aware.
    pub fn on_receive(&mut self, payload: &[u8], clock: &mut PhaseClock) -> SyncOutcome {
        let Ok(remote) = self.codec.decode(payload) else {
            return SyncOutcome::Ignored;
        };

        let local = self.codec.width().truncate(self.local_counter);
        if remote <= local {
            return SyncOutcome::PeerNotAhead { remote };
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[SyncMonitor.on_receive] peer {} > local {}, resetting phase",
            remote, local
        );
        clock.reset();
        self.record_sync();

        SyncOutcome::PhaseReset { remote }
    }

    /// Explicit sync signal, e.g. from a user action
    pub fn touch_sync(&mut self) {
        self.record_sync();
    }

    /// Counter ticks since the last recorded sync.
    ///
    /// Returns [`NEVER_SYNCED`] and forces [`SyncState::Inactive`] when no
    /// sync was ever recorded. Elapsed time is computed with wrapping
    /// subtraction, so it stays correct across one counter overflow.
    pub fn time_since_last_sync(&mut self) -> i64 {
        match self.last_sync {
            Some(at) => i64::from(self.local_counter.wrapping_sub(at)),
            None => {
                self.state = SyncState::Inactive;
                NEVER_SYNCED
            }
        }
    }

    /// Outgoing beacon carrying the current counter
    pub fn beacon(&self) -> Result<BeaconPayload, EncodeError> {
        self.codec.encode(self.local_counter)
    }

    fn record_sync(&mut self) {
        self.last_sync = Some(self.local_counter);
        match self.state {
            SyncState::Inactive | SyncState::Deactivating => {
                self.set_state(SyncState::Activating);
            }
            SyncState::Activating | SyncState::Active => {}
        }
    }

    fn age(&mut self) {
        match self.state {
            SyncState::Inactive => {}
            SyncState::Activating => self.set_state(SyncState::Active),
            SyncState::Active => {
                let Some(timeout) = self.timeout else {
                    return;
                };
                let elapsed = self.time_since_last_sync();
                if elapsed < 0 || elapsed > i64::from(timeout) {
                    self.set_state(SyncState::Deactivating);
                }
            }
            SyncState::Deactivating => self.set_state(SyncState::Inactive),
        }
    }

    fn set_state(&mut self, state: SyncState) {
        #[cfg(feature = "esp32-log")]
        println!("[SyncMonitor] {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}
