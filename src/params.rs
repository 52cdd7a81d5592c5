//! X16Rv3 Algorithm Parameters
//!
//! Byte offsets and sizes fixed by the network-consensus definition.

/// Bytes of header read by the algorithm (everything past this is ignored)
pub const HEADER_WINDOW: usize = 113;

/// Header window zero-padded to a whole number of lanes
pub const MIX_WINDOW: usize = 128;

/// Size of one mixing lane in bytes
pub const LANE_SIZE: usize = 16;

/// Number of lanes loaded from the header
pub const DATA_LANES: usize = MIX_WINDOW / LANE_SIZE;

/// Number of round keys in the schedule
pub const ROUND_KEYS: usize = 12;

/// Offset of the key material inside the header
pub const KEY_OFFSET: usize = 4;

/// Raw key material: six 16-byte keys, the other six are XOR pairs
pub const KEY_MATERIAL: usize = 6 * LANE_SIZE;

/// Lane whose low nibbles select the hash order
pub const ORDER_LANE: usize = 6;

/// Number of chained hash stages (and palette slots)
pub const CHAIN_LENGTH: usize = 16;

/// Size of the running chain state (512-bit digests)
pub const STATE_SIZE: usize = 64;

/// Final digest size
pub const DIGEST_SIZE: usize = 32;

/// Where the 64-byte chain state comes from before the first stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChainSeed {
    /// Mixer lanes 8..12 serialized as 64 bytes (network-consensus behavior).
    #[default]
    MixerOutput,
    /// First 64 bytes of the header window.
    HeaderPrefix,
}
