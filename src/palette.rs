//! The sixteen-slot primitive palette
//!
//! Every chained hash is driven through one capability, [`Primitive`]:
//! reset, absorb, finalize. Stateful RustCrypto hashers are wrapped by
//! [`DigestPrimitive`]; stateless one-shot transforms by [`OneShot`].
//! A [`Palette`] is the dispatch table indexed by selector.

use core::fmt;

use digest::consts::U64;
use digest::{Digest, FixedOutputReset};

use crate::error::X16Error;
use crate::params::{CHAIN_LENGTH, STATE_SIZE};

/// Palette slots, numbered as the hash-order selectors number them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Blake = 0,
    Bmw = 1,
    Groestl = 2,
    Jh = 3,
    Keccak = 4,
    Skein = 5,
    Luffa = 6,
    CubeHash = 7,
    Shavite = 8,
    Simd = 9,
    Echo = 10,
    Hamsi = 11,
    Fugue = 12,
    Shabal = 13,
    Whirlpool = 14,
    Sha512 = 15,
}

impl Algorithm {
    /// All slots in selector order
    pub const ALL: [Algorithm; CHAIN_LENGTH] = [
        Algorithm::Blake,
        Algorithm::Bmw,
        Algorithm::Groestl,
        Algorithm::Jh,
        Algorithm::Keccak,
        Algorithm::Skein,
        Algorithm::Luffa,
        Algorithm::CubeHash,
        Algorithm::Shavite,
        Algorithm::Simd,
        Algorithm::Echo,
        Algorithm::Hamsi,
        Algorithm::Fugue,
        Algorithm::Shabal,
        Algorithm::Whirlpool,
        Algorithm::Sha512,
    ];

    /// Slot selected by the low four bits of `byte`
    #[inline(always)]
    pub const fn from_nibble(byte: u8) -> Self {
        Self::ALL[(byte & 0x0F) as usize]
    }

    /// Selector value in [0, 16)
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Blake => "blake",
            Algorithm::Bmw => "bmw",
            Algorithm::Groestl => "groestl",
            Algorithm::Jh => "jh",
            Algorithm::Keccak => "keccak",
            Algorithm::Skein => "skein",
            Algorithm::Luffa => "luffa",
            Algorithm::CubeHash => "cubehash",
            Algorithm::Shavite => "shavite",
            Algorithm::Simd => "simd",
            Algorithm::Echo => "echo",
            Algorithm::Hamsi => "hamsi",
            Algorithm::Fugue => "fugue",
            Algorithm::Shabal => "shabal",
            Algorithm::Whirlpool => "whirlpool",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resettable digest engine occupying one palette slot
///
/// Engines are reset before every stage, so an implementation must not
/// carry anything across a `reset`.
pub trait Primitive: Send + Sync {
    /// Drop any absorbed input
    fn reset(&mut self);

    /// Append `data` to the message
    fn absorb(&mut self, data: &[u8]);

    /// Length of the digest `finalize_into` writes
    fn output_size(&self) -> usize;

    /// Write the digest of everything absorbed since the last reset
    ///
    /// `out` is exactly `output_size()` bytes long.
    fn finalize_into(&mut self, out: &mut [u8]);

    /// A new engine of the same kind with no absorbed input
    fn fresh(&self) -> Box<dyn Primitive>;
}

/// [`Primitive`] adapter for RustCrypto hashers
#[derive(Default, Clone)]
pub struct DigestPrimitive<D> {
    inner: D,
}

impl<D: Digest + FixedOutputReset + Default> DigestPrimitive<D> {
    pub fn new() -> Self {
        Self { inner: D::default() }
    }
}

impl<D> Primitive for DigestPrimitive<D>
where
    D: Digest + FixedOutputReset + Default + Send + Sync + 'static,
{
    fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    fn absorb(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn output_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        out.copy_from_slice(&Digest::finalize_reset(&mut self.inner));
    }

    fn fresh(&self) -> Box<dyn Primitive> {
        Box::new(Self::new())
    }
}

/// One-shot 512-bit transform: message in, 64-byte digest out
pub type OneShotFn = fn(&[u8], &mut [u8; STATE_SIZE]);

/// [`Primitive`] adapter for stateless one-shot transforms
///
/// Absorbed bytes are buffered; `finalize_into` runs the transform over the
/// whole buffer.
#[derive(Clone)]
pub struct OneShot {
    transform: OneShotFn,
    buffer: Vec<u8>,
}

impl OneShot {
    pub fn new(transform: OneShotFn) -> Self {
        Self {
            transform,
            buffer: Vec::with_capacity(STATE_SIZE),
        }
    }
}

impl Primitive for OneShot {
    fn reset(&mut self) {
        self.buffer.clear();
    }

    fn absorb(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    fn output_size(&self) -> usize {
        STATE_SIZE
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        let mut digest = [0u8; STATE_SIZE];
        (self.transform)(&self.buffer, &mut digest);
        out.copy_from_slice(&digest);
        self.buffer.clear();
    }

    fn fresh(&self) -> Box<dyn Primitive> {
        Box::new(Self::new(self.transform))
    }
}

/// Engine shipped with the crate for `algorithm`, if there is one
///
/// Bundled: Groestl, JH, Keccak, Skein, Shabal, Whirlpool and SHA-512.
pub fn bundled(algorithm: Algorithm) -> Option<Box<dyn Primitive>> {
    let engine: Box<dyn Primitive> = match algorithm {
        Algorithm::Groestl => Box::new(DigestPrimitive::<groestl::Groestl512>::new()),
        Algorithm::Jh => Box::new(DigestPrimitive::<jh::Jh512>::new()),
        Algorithm::Keccak => Box::new(DigestPrimitive::<sha3::Keccak512>::new()),
        Algorithm::Skein => Box::new(DigestPrimitive::<skein::Skein512<U64>>::new()),
        Algorithm::Shabal => Box::new(DigestPrimitive::<shabal::Shabal512>::new()),
        Algorithm::Whirlpool => Box::new(DigestPrimitive::<whirlpool::Whirlpool>::new()),
        Algorithm::Sha512 => Box::new(DigestPrimitive::<sha2::Sha512>::new()),
        _ => return None,
    };
    Some(engine)
}

/// Dispatch table of sixteen engines, one per [`Algorithm`]
pub struct Palette {
    // One engine per selector, in `Algorithm::ALL` order
    engines: Box<[Box<dyn Primitive>]>,
}

impl Palette {
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::default()
    }

    /// Engine for `algorithm`
    #[inline(always)]
    pub fn engine_mut(&mut self, algorithm: Algorithm) -> &mut dyn Primitive {
        self.engines[algorithm.index()].as_mut()
    }

    /// Independent copy with fresh engines of the same kinds
    pub fn fresh(&self) -> Self {
        Self {
            engines: self.engines.iter().map(|engine| engine.fresh()).collect(),
        }
    }
}

impl Clone for Palette {
    fn clone(&self) -> Self {
        self.fresh()
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette").finish_non_exhaustive()
    }
}

/// Collects one engine per slot before building a [`Palette`]
#[derive(Default)]
pub struct PaletteBuilder {
    engines: [Option<Box<dyn Primitive>>; CHAIN_LENGTH],
}

impl PaletteBuilder {
    /// Builder with every bundled engine already in place
    pub fn bundled() -> Self {
        let mut builder = Self::default();
        for algorithm in Algorithm::ALL {
            builder.engines[algorithm.index()] = bundled(algorithm);
        }
        builder
    }

    /// Put `engine` in the slot for `algorithm`, replacing any previous one
    pub fn set(mut self, algorithm: Algorithm, engine: impl Primitive + 'static) -> Self {
        self.engines[algorithm.index()] = Some(Box::new(engine));
        self
    }

    /// Same as [`set`](Self::set) for an already boxed engine
    pub fn set_boxed(mut self, algorithm: Algorithm, engine: Box<dyn Primitive>) -> Self {
        self.engines[algorithm.index()] = Some(engine);
        self
    }

    /// Slots that still have no engine
    pub fn missing(&self) -> Vec<Algorithm> {
        Algorithm::ALL
            .into_iter()
            .filter(|a| self.engines[a.index()].is_none())
            .collect()
    }

    /// Finish the table; fails on the first empty slot
    pub fn build(self) -> Result<Palette, X16Error> {
        let engines: Box<[Box<dyn Primitive>]> = Algorithm::ALL
            .into_iter()
            .zip(self.engines)
            .map(|(algorithm, slot)| slot.ok_or(X16Error::MissingPrimitive(algorithm)))
            .collect::<Result<_, _>>()?;

        Ok(Palette { engines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha512_oneshot(data: &[u8], out: &mut [u8; STATE_SIZE]) {
        out.copy_from_slice(&sha2::Sha512::digest(data));
    }

    #[test]
    fn test_nibble_selects_slot() {
        for (i, algorithm) in Algorithm::ALL.iter().enumerate() {
            assert_eq!(algorithm.index(), i);
            assert_eq!(Algorithm::from_nibble(i as u8), *algorithm);
            assert_eq!(Algorithm::from_nibble(0xA0 | i as u8), *algorithm);
        }
    }

    #[test]
    fn test_bundled_engines_emit_512_bits() {
        let mut count = 0;
        for algorithm in Algorithm::ALL {
            if let Some(mut engine) = bundled(algorithm) {
                count += 1;
                assert_eq!(engine.output_size(), STATE_SIZE, "{algorithm}");

                let mut out = [0u8; STATE_SIZE];
                engine.absorb(b"abc");
                engine.finalize_into(&mut out);
                assert_ne!(out, [0u8; STATE_SIZE]);
            }
        }
        assert_eq!(count, 7);
    }

    #[test]
    fn test_sha512_engine_matches_reference() {
        let mut engine = bundled(Algorithm::Sha512).unwrap();
        let mut out = [0u8; STATE_SIZE];
        engine.absorb(b"abc");
        engine.finalize_into(&mut out);

        assert_eq!(
            hex::encode(out),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_reset_discards_input() {
        for algorithm in Algorithm::ALL {
            let Some(mut engine) = bundled(algorithm) else {
                continue;
            };
            let mut clean = [0u8; STATE_SIZE];
            engine.absorb(b"payload");
            engine.finalize_into(&mut clean);

            let mut dirty = [0u8; STATE_SIZE];
            engine.absorb(b"leftover");
            engine.reset();
            engine.absorb(b"payload");
            engine.finalize_into(&mut dirty);

            assert_eq!(clean, dirty, "{algorithm} leaked state across reset");
        }
    }

    #[test]
    fn test_oneshot_buffers_until_finalize() {
        let mut engine = OneShot::new(sha512_oneshot);
        engine.absorb(b"ab");
        engine.absorb(b"c");

        let mut out = [0u8; STATE_SIZE];
        engine.finalize_into(&mut out);
        assert_eq!(out[..], sha2::Sha512::digest(b"abc")[..]);

        // Buffer is empty again after finalize
        engine.finalize_into(&mut out);
        assert_eq!(out[..], sha2::Sha512::digest(b"")[..]);
    }

    #[test]
    fn test_builder_reports_missing_slot() {
        let builder = PaletteBuilder::bundled();
        assert_eq!(
            builder.missing(),
            vec![
                Algorithm::Blake,
                Algorithm::Bmw,
                Algorithm::Luffa,
                Algorithm::CubeHash,
                Algorithm::Shavite,
                Algorithm::Simd,
                Algorithm::Echo,
                Algorithm::Hamsi,
                Algorithm::Fugue,
            ]
        );

        let err = builder.build().unwrap_err();
        assert_eq!(err, X16Error::MissingPrimitive(Algorithm::Blake));
    }

    #[test]
    fn test_builder_complete() {
        let mut builder = PaletteBuilder::bundled();
        for algorithm in builder.missing() {
            builder = builder.set(algorithm, OneShot::new(sha512_oneshot));
        }

        let mut palette = builder.build().unwrap();
        let mut copy = palette.fresh();
        for algorithm in Algorithm::ALL {
            assert_eq!(palette.engine_mut(algorithm).output_size(), STATE_SIZE);
            assert_eq!(copy.engine_mut(algorithm).output_size(), STATE_SIZE);
        }
    }
}
