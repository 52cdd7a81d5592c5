//! # X16Rv3 Core Algorithm
//!
//! A proof-of-work hash that chains sixteen 512-bit hash functions in an
//! order derived from the block header itself.
//!
//! ## Algorithm
//!
//! 1. **Order**: one AES round per 16-byte lane of the 113-byte header window
//!    (keys from `header[4..100]`); the low nibbles of lane 6 pick sixteen
//!    palette slots, repeats allowed
//! 2. **Seed**: four more AES lanes give the 64-byte starting state
//! 3. **Chain**: the state runs through the selected hash of every stage
//! 4. **Output**: the first 32 bytes of the final state
//!
//! ## Palette
//!
//! | Slot | Hash | Slot | Hash |
//! |------|------|------|------|
//! | 0 | BLAKE | 8 | SHAvite |
//! | 1 | BMW | 9 | SIMD |
//! | 2 | Groestl | 10 | ECHO |
//! | 3 | JH | 11 | Hamsi |
//! | 4 | Keccak | 12 | Fugue |
//! | 5 | Skein | 13 | Shabal |
//! | 6 | Luffa | 14 | Whirlpool |
//! | 7 | CubeHash | 15 | SHA-512 |
//!
//! Groestl, JH, Keccak, Skein, Shabal, Whirlpool and SHA-512 ship with the
//! crate. The other slots take any [`Primitive`] implementation.
//!
//! ## Example
//!
//! ```rust
//! use x16rv3::{OneShot, PaletteBuilder, X16Hasher};
//!
//! # fn blake512(_data: &[u8], _out: &mut [u8; 64]) {}
//! let mut builder = PaletteBuilder::bundled();
//! for algorithm in builder.missing() {
//!     // plug in the real engine for each remaining slot
//!     builder = builder.set(algorithm, OneShot::new(blake512));
//! }
//!
//! // Reusable hasher (engines are reset, never rebuilt)
//! let mut hasher = X16Hasher::new(builder.build()?);
//!
//! let header = [0u8; 113];
//! let mut out = [0u8; 32];
//! hasher.hash(&header, &mut out)?;
//! # Ok::<(), x16rv3::X16Error>(())
//! ```

mod error;
mod lane;
mod order;
mod palette;
mod params;
mod x16;

pub use error::X16Error;
pub use lane::Lane128;
pub use order::{HashOrder, MixerLanes, RoundKeys, derive_order, mix};
pub use palette::{
    Algorithm, DigestPrimitive, OneShot, OneShotFn, Palette, PaletteBuilder, Primitive, bundled,
};
pub use params::*;
pub use x16::{X16Hasher, hash};
