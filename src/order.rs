//! Hash-order derivation
//!
//! A one-round AES mixing network over the 113-byte header window:
//! - round keys: `header[4..100]` as six lanes plus six pairwise XORs
//! - lanes 0..8: one AES round of each 16-byte header lane
//! - lanes 8..12: one AES round of `A4 ^ A5 ^ A6 ^ A7 ^ A[i]`
//! - order: low nibble of each byte of lane 6
//!
//! Lanes 8..12 are the mixer output stream that seeds the hash chain.

use core::fmt;

use crate::error::X16Error;
use crate::lane::Lane128;
use crate::palette::Algorithm;
use crate::params::*;

/// Pairs of raw keys XORed together to form keys 6..12
const KEY_PAIRS: [(usize, usize); ROUND_KEYS - 6] = [(0, 2), (1, 3), (0, 4), (1, 5), (2, 4), (3, 5)];

/// Number of mixer output lanes
const OUTPUT_LANES: usize = ROUND_KEYS - DATA_LANES;

/// Per-call round key schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundKeys([Lane128; ROUND_KEYS]);

impl RoundKeys {
    /// Expand the key schedule from a header
    ///
    /// Reads `input[4..100]`; the first six keys are loaded directly and the
    /// last six are XORs of pairs of them.
    pub fn expand(input: &[u8]) -> Result<Self, X16Error> {
        let end = KEY_OFFSET + KEY_MATERIAL;
        let material = input.get(KEY_OFFSET..end).ok_or(X16Error::InputTooShort {
            len: input.len(),
            min: end,
        })?;

        let mut keys = [Lane128::ZERO; ROUND_KEYS];
        for (key, chunk) in keys.iter_mut().zip(material.chunks_exact(LANE_SIZE)) {
            *key = Lane128::load(chunk);
        }
        for (i, &(a, b)) in KEY_PAIRS.iter().enumerate() {
            keys[6 + i] = keys[a] ^ keys[b];
        }

        Ok(Self(keys))
    }

    /// Round key `index` (0..12)
    #[inline(always)]
    pub fn key(&self, index: usize) -> Lane128 {
        self.0[index]
    }
}

/// The twelve accumulator lanes after one pass of the mixer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerLanes([Lane128; ROUND_KEYS]);

impl MixerLanes {
    /// Accumulator lane `index` (0..12)
    #[inline(always)]
    pub fn lane(&self, index: usize) -> Lane128 {
        self.0[index]
    }

    /// Hash order read from the low nibbles of lane 6
    pub fn order(&self) -> HashOrder {
        let bytes = self.0[ORDER_LANE].to_bytes();
        HashOrder(core::array::from_fn(|k| Algorithm::from_nibble(bytes[k])))
    }

    /// Lanes 8..12 serialized back to back
    pub fn output(&self) -> [u8; STATE_SIZE] {
        let mut out = [0u8; STATE_SIZE];
        for (chunk, lane) in out.chunks_exact_mut(LANE_SIZE).zip(&self.0[DATA_LANES..]) {
            chunk.copy_from_slice(lane.as_bytes());
        }
        out
    }
}

/// One mixer step: AES round over `state ^ data`
///
/// Every accumulator starts at zero and is written exactly once, so `state`
/// is always zero in practice and the round sees `data` alone.
#[inline(always)]
fn aes_enc(state: Lane128, data: Lane128, key: Lane128) -> Lane128 {
    (state ^ data).aes_round(key)
}

/// Run the mixing network over a header
///
/// Requires at least [`HEADER_WINDOW`] bytes. Only the first 113 bytes take
/// part; they are zero-padded to 128 bytes before being split into lanes.
pub fn mix(input: &[u8]) -> Result<MixerLanes, X16Error> {
    if input.len() < HEADER_WINDOW {
        return Err(X16Error::InputTooShort {
            len: input.len(),
            min: HEADER_WINDOW,
        });
    }

    let keys = RoundKeys::expand(input)?;

    let mut window = [0u8; MIX_WINDOW];
    window[..HEADER_WINDOW].copy_from_slice(&input[..HEADER_WINDOW]);

    let mut lanes = [Lane128::ZERO; ROUND_KEYS];
    for (j, chunk) in window.chunks_exact(LANE_SIZE).enumerate() {
        lanes[j] = aes_enc(lanes[j], Lane128::load(chunk), keys.key(j));
    }

    let upper = lanes[4] ^ lanes[5] ^ lanes[6] ^ lanes[7];
    for i in 0..OUTPUT_LANES {
        let j = DATA_LANES + i;
        lanes[j] = aes_enc(lanes[j], upper ^ lanes[i], keys.key(j));
    }

    Ok(MixerLanes(lanes))
}

/// Derive the hash order of a header
pub fn derive_order(input: &[u8]) -> Result<HashOrder, X16Error> {
    Ok(mix(input)?.order())
}

/// The sixteen-stage execution order of one hash call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashOrder([Algorithm; CHAIN_LENGTH]);

impl HashOrder {
    /// Build an order directly from sixteen palette slots
    pub const fn new(stages: [Algorithm; CHAIN_LENGTH]) -> Self {
        Self(stages)
    }

    /// Stages in execution order
    pub fn stages(&self) -> &[Algorithm; CHAIN_LENGTH] {
        &self.0
    }

    /// Stages as raw selectors in [0, 16)
    pub fn selectors(&self) -> [u8; CHAIN_LENGTH] {
        self.0.map(|a| a.index() as u8)
    }

    pub fn iter(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for HashOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, algorithm) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{algorithm}")?;
        }
        Ok(())
    }
}
