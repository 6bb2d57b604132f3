//! Beacon payload codec
//!
//! Outgoing layout, one AD structure:
//!
//! ```text
//! [length][ad type]['S']['W']['A']['R']['M'][counter, big-endian, 2 or 4 bytes]
//! ```
//!
//! `length` counts the AD type, marker and counter bytes but not itself.
//! Received payloads are scanned for the marker anywhere in the buffer; the
//! counter is read right after it.

use heapless::Vec;

/// Identifying token carried by every swarm beacon
pub const BEACON_MARKER: &[u8] = b"SWARM";

/// AD type "Complete Local Name"
pub const AD_TYPE_COMPLETE_LOCAL_NAME: u8 = 0x09;

/// Maximum legacy advertising payload size
pub const MAX_BEACON_LEN: usize = 31;

/// Raw beacon bytes, outgoing or received
pub type BeaconPayload = Vec<u8, MAX_BEACON_LEN>;

/// Width of the counter field on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CounterWidth {
    Two = 2,
    #[default]
    Four = 4,
}

impl CounterWidth {
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Keep only the bits that fit on the wire
    #[allow(clippy::cast_possible_truncation)]
    pub const fn truncate(self, counter: u32) -> u32 {
        match self {
            Self::Two => counter as u16 as u32,
            Self::Four => counter,
        }
    }
}

/// Why a received payload was not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The marker does not occur in the payload
    MissingMarker,
    /// The marker is there but the counter bytes are cut off
    Truncated,
}

/// Why a beacon could not be built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Marker plus counter exceed [`MAX_BEACON_LEN`]
    MarkerTooLong,
}

/// Beacon wire settings, identical across every node of a swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconConfig {
    pub marker: &'static [u8],
    pub ad_type: u8,
    pub width: CounterWidth,
}

impl BeaconConfig {
    pub const fn new() -> Self {
        Self {
            marker: BEACON_MARKER,
            ad_type: AD_TYPE_COMPLETE_LOCAL_NAME,
            width: CounterWidth::Four,
        }
    }
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes the local counter and extracts peer counters
#[derive(Debug, Clone, Copy)]
pub struct BeaconCodec {
    config: BeaconConfig,
}

impl BeaconCodec {
    pub const fn new(config: BeaconConfig) -> Self {
        Self { config }
    }

    pub const fn width(&self) -> CounterWidth {
        self.config.width
    }

    /// Build the outgoing payload for `counter`.
    ///
    /// The 2-byte variant sends the low 16 bits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn encode(&self, counter: u32) -> Result<BeaconPayload, EncodeError> {
        let width = self.config.width.bytes();
        let body_len = 1 + self.config.marker.len() + width;
        // The length byte itself is not part of the body.
        if body_len + 1 > MAX_BEACON_LEN {
            return Err(EncodeError::MarkerTooLong);
        }

        let mut payload = BeaconPayload::new();
        let counter_bytes = counter.to_be_bytes();
        // Capacity was checked above, so none of the pushes can fail.
        let _ = payload.push(body_len as u8);
        let _ = payload.push(self.config.ad_type);
        let _ = payload.extend_from_slice(self.config.marker);
        let _ = payload.extend_from_slice(&counter_bytes[counter_bytes.len() - width..]);

        Ok(payload)
    }

    /// Read the peer counter out of a received payload
    pub fn decode(&self, payload: &[u8]) -> Result<u32, DecodeError> {
        let marker = self.config.marker;
        let start = find(payload, marker).ok_or(DecodeError::MissingMarker)?;
        let offset = start + marker.len();
        let width = self.config.width.bytes();

        let bytes = payload
            .get(offset..offset + width)
            .ok_or(DecodeError::Truncated)?;

        Ok(bytes
            .iter()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte)))
    }
}

/// Position of the first occurrence of `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
