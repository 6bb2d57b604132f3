//! Local pulsing timebase
//!
//! The phase is a bounded counter in milliseconds that wraps at the
//! configured period. Every animation reads it; nothing reads wall-clock
//! time directly.

/// Default phase period (`PHASE_DURATION`) in milliseconds
pub const DEFAULT_PHASE_DURATION: u32 = 4096;

/// Default low bound of the pulse amplitude
pub const DEFAULT_PULSE_LOW: u8 = 10;

/// Default high bound of the pulse amplitude
pub const DEFAULT_PULSE_HIGH: u8 = 255;

/// Bounded phase counter, `0 <= phase < period` at all times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseClock {
    phase: u32,
    period: u32,
}

impl PhaseClock {
    /// Create a clock at phase 0. A zero period is treated as 1.
    pub const fn new(period: u32) -> Self {
        Self {
            phase: 0,
            period: if period == 0 { 1 } else { period },
        }
    }

    /// Advance the phase by `delta` and wrap at the period
    #[allow(clippy::cast_possible_truncation)]
    pub const fn advance(&mut self, delta: u32) {
        // The remainder is below `period`, so it fits back in u32.
        self.phase = ((self.phase as u64 + delta as u64) % self.period as u64) as u32;
    }

    /// Jump back to the start of the cycle
    pub const fn reset(&mut self) {
        self.phase = 0;
    }

    pub const fn get(&self) -> u32 {
        self.phase
    }

    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Position within the cycle, `0.0 <= progress < 1.0`
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        self.phase as f32 / self.period as f32
    }

    /// Whether advancing by `delta` from the current phase passes `mark`.
    ///
    /// Used to fire once-per-cycle actions at a fixed point of the phase.
    pub const fn crosses(&self, delta: u32, mark: u32) -> bool {
        if mark >= self.period {
            return false;
        }
        let distance = if mark >= self.phase {
            mark - self.phase
        } else {
            self.period - self.phase + mark
        };
        distance != 0 && distance <= delta
    }
}

/// Shape of the brightness pulse over one phase cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseCurve {
    /// Raised cosine, low at phase 0 and high at the midpoint
    #[default]
    Cosine,
    /// Triangle wave with the same endpoints
    Linear,
}

/// Amplitude bounds and curve shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseConfig {
    pub low: u8,
    pub high: u8,
    pub curve: PulseCurve,
}

impl PulseConfig {
    pub const fn new() -> Self {
        Self {
            low: DEFAULT_PULSE_LOW,
            high: DEFAULT_PULSE_HIGH,
            curve: PulseCurve::Cosine,
        }
    }

    /// Amplitude for `phase` within `period`
    ///
    /// Cosine: `round((cos(phase * 2pi / period + pi) + 1) * (high - low) / 2 + low)`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_lossless
    )]
    pub fn amplitude(&self, phase: u32, period: u32) -> u8 {
        let period = f64::from(period.max(1));
        let phase = f64::from(phase) % period;
        let low = f64::from(self.low.min(self.high));
        let high = f64::from(self.high.max(self.low));

        let value = match self.curve {
            PulseCurve::Cosine => {
                let theta = phase * (2.0 * core::f64::consts::PI / period) + core::f64::consts::PI;
                (libm::cos(theta) + 1.0) * (high - low) / 2.0 + low
            }
            PulseCurve::Linear => {
                let midpoint = period / 2.0;
                let slope = (high - low) / midpoint;
                if phase < midpoint {
                    low + slope * phase
                } else {
                    high - slope * (phase - midpoint)
                }
            }
        };

        libm::round(value).clamp(0.0, 255.0) as u8
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self::new()
    }
}
