//! Core X16Rv3 chain
//!
//! One call runs a fixed 16-stage pipeline:
//! - Order: derived from the header by the AES mixer (`order::mix`)
//! - Seed: 64 bytes, the mixer output lanes by default
//! - Stages: state = Palette[order[i]](state), engine reset before each use
//! - Output: first 32 bytes of the final state
//!
//! Nothing about a call outlives it except the (reset) engines, so a hasher
//! can be reused and one hasher per thread is enough for concurrent use.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::X16Error;
use crate::order::{HashOrder, mix};
use crate::palette::{Algorithm, Palette};
use crate::params::*;

/// X16Rv3 hasher
///
/// Owns one engine per palette slot. Reuse it for many headers to avoid
/// rebuilding the engines.
#[derive(Clone, Debug)]
pub struct X16Hasher {
    palette: Palette,
    seed: ChainSeed,
}

impl X16Hasher {
    /// Create a hasher over a complete palette
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            seed: ChainSeed::default(),
        }
    }

    /// Choose how the chain state is seeded
    pub fn with_seed(mut self, seed: ChainSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn seed(&self) -> ChainSeed {
        self.seed
    }

    /// Hash a header into `out[..32]`
    ///
    /// `input` must hold at least 113 bytes and `out` at least 32. On error
    /// `out` is left untouched.
    pub fn hash(&mut self, input: &[u8], out: &mut [u8]) -> Result<(), X16Error> {
        if input.len() < HEADER_WINDOW {
            return Err(X16Error::InputTooShort {
                len: input.len(),
                min: HEADER_WINDOW,
            });
        }
        if out.len() < DIGEST_SIZE {
            return Err(X16Error::OutputTooShort {
                len: out.len(),
                min: DIGEST_SIZE,
            });
        }

        let digest = self.digest(input)?;
        out[..DIGEST_SIZE].copy_from_slice(&digest);
        Ok(())
    }

    /// Hash a header and return the 32-byte digest
    pub fn digest(&mut self, input: &[u8]) -> Result<[u8; DIGEST_SIZE], X16Error> {
        // Phase 1: derive the order and the mixer output
        let lanes = mix(input)?;
        let order = lanes.order();
        log::debug!("x16rv3 order {order}");

        // Phase 2: seed the chain state
        let mut state = match self.seed {
            ChainSeed::MixerOutput => lanes.output(),
            ChainSeed::HeaderPrefix => {
                let mut prefix = [0u8; STATE_SIZE];
                prefix.copy_from_slice(&input[..STATE_SIZE]);
                prefix
            }
        };

        // Phase 3: run every stage
        self.run_chain(&order, &mut state)?;

        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&state[..DIGEST_SIZE]);
        Ok(digest)
    }

    /// Feed `state` through the palette in `order`
    ///
    /// Exposed so that callers holding a precomputed order (or a custom seed)
    /// can run the chain directly.
    pub fn run_chain(
        &mut self,
        order: &HashOrder,
        state: &mut [u8; STATE_SIZE],
    ) -> Result<(), X16Error> {
        for (stage, algorithm) in order.iter().enumerate() {
            self.stage(algorithm, state)?;
            log::trace!("stage {stage:2} {algorithm}");
        }
        Ok(())
    }

    /// One chain stage: reset, absorb the state, finalize over it
    #[inline(always)]
    fn stage(
        &mut self,
        algorithm: Algorithm,
        state: &mut [u8; STATE_SIZE],
    ) -> Result<(), X16Error> {
        let engine = self.palette.engine_mut(algorithm);

        let len = engine.output_size();
        if len != STATE_SIZE {
            return Err(X16Error::PrimitiveOutputSizeMismatch {
                algorithm,
                len,
                expected: STATE_SIZE,
            });
        }

        engine.reset();
        engine.absorb(&state[..]);
        engine.finalize_into(&mut state[..]);
        Ok(())
    }

    /// Hash many headers, each worker on its own copy of the palette
    ///
    /// Fails if any header fails; digests come back in input order.
    #[cfg(feature = "parallel")]
    pub fn hash_batch<I: AsRef<[u8]> + Sync>(
        &self,
        inputs: &[I],
    ) -> Result<Vec<[u8; DIGEST_SIZE]>, X16Error> {
        inputs
            .par_iter()
            .map_init(|| self.clone(), |hasher, input| hasher.digest(input.as_ref()))
            .collect()
    }

    /// Hash many headers (sequential fallback)
    #[cfg(not(feature = "parallel"))]
    pub fn hash_batch<I: AsRef<[u8]> + Sync>(
        &self,
        inputs: &[I],
    ) -> Result<Vec<[u8; DIGEST_SIZE]>, X16Error> {
        let mut hasher = self.clone();
        inputs
            .iter()
            .map(|input| hasher.digest(input.as_ref()))
            .collect()
    }
}

/// Convenience function for single-shot hashing
///
/// Builds a throwaway hasher over a fresh copy of `palette`. For repeated
/// hashing, keep an [`X16Hasher`] instead.
pub fn hash(palette: &Palette, input: &[u8]) -> Result<[u8; DIGEST_SIZE], X16Error> {
    X16Hasher::new(palette.fresh()).digest(input)
}
