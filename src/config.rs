//! Node configuration
//!
//! Phase period, tick interval, marker and counter width must match across
//! every node of a swarm, otherwise beacons are ignored or misread.

use embassy_time::Duration;

use crate::beacon::BeaconConfig;
use crate::effect::{DEFAULT_SEED, FireTuning, MeteorTuning, PatternId};
use crate::phase::{DEFAULT_PHASE_DURATION, PulseConfig};
use crate::sync::DEFAULT_SYNC_TIMEOUT;

/// Default phase advance per frame
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Default cadence of the time-alive counter
pub const DEFAULT_COUNTER_INTERVAL: Duration = Duration::from_secs(1);

/// Phase at which the beacon goes out, shortly before the cycle ends
pub const DEFAULT_ADVERTISE_PHASE: u32 = DEFAULT_PHASE_DURATION - 128;

/// Configuration for a swarm node
#[derive(Debug, Clone)]
pub struct SwarmConfig {
    /// Phase period in milliseconds
    pub phase_duration: u32,
    pub tick_interval: Duration,
    pub counter_interval: Duration,
    pub pulse: PulseConfig,
    pub beacon: BeaconConfig,
    /// Counter ticks a sync stays fresh, `None` never ages out
    pub sync_timeout: Option<u32>,
    /// Phase at which one beacon per cycle is advertised, `None` disables
    pub advertise_phase: Option<u32>,
    pub meteor: MeteorTuning,
    pub fire: FireTuning,
    pub pattern: PatternId,
    pub color_index: usize,
    pub seed: u64,
}

impl SwarmConfig {
    pub const fn new() -> Self {
        Self {
            phase_duration: DEFAULT_PHASE_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            counter_interval: DEFAULT_COUNTER_INTERVAL,
            pulse: PulseConfig::new(),
            beacon: BeaconConfig::new(),
            sync_timeout: Some(DEFAULT_SYNC_TIMEOUT),
            advertise_phase: Some(DEFAULT_ADVERTISE_PHASE),
            meteor: MeteorTuning::new(),
            fire: FireTuning::new(),
            pattern: PatternId::Fade,
            color_index: 0,
            seed: DEFAULT_SEED,
        }
    }

    /// Phase advance per tick in milliseconds, saturating at `u32::MAX`
    pub fn tick_delta(&self) -> u32 {
        u32::try_from(self.tick_interval.as_millis()).unwrap_or(u32::MAX)
    }
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self::new()
    }
}
