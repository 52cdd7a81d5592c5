//! 128-bit lane arithmetic for the order mixer
//!
//! The mixer only ever needs byte loads, XOR and a single AES encryption
//! round (the AESENC instruction: ShiftRows, SubBytes, MixColumns, then
//! AddRoundKey). Lanes keep memory byte order, so a lane loaded from
//! `bytes[0..16]` behaves exactly like `_mm_loadu_si128` on the same bytes.

use core::ops::{BitXor, BitXorAssign};

use crate::params::LANE_SIZE;

/// One 128-bit operand or key of the mixing network
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Lane128([u8; LANE_SIZE]);

impl Lane128 {
    /// All-zero lane
    pub const ZERO: Self = Self([0u8; LANE_SIZE]);

    /// Wrap 16 bytes as a lane
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; LANE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Load a lane from the first 16 bytes of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than 16 bytes.
    #[inline(always)]
    pub fn load(bytes: &[u8]) -> Self {
        let mut lane = [0u8; LANE_SIZE];
        lane.copy_from_slice(&bytes[..LANE_SIZE]);
        Self(lane)
    }

    /// Lane contents in memory order
    #[inline(always)]
    pub const fn to_bytes(self) -> [u8; LANE_SIZE] {
        self.0
    }

    /// Borrow the lane contents in memory order
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; LANE_SIZE] {
        &self.0
    }

    /// One AES encryption round with `key` as the round key
    #[inline(always)]
    pub fn aes_round(self, key: Self) -> Self {
        #[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
        {
            aes_round_x86(self, key)
        }

        #[cfg(all(target_arch = "aarch64", target_feature = "aes"))]
        {
            aes_round_arm(self, key)
        }

        #[cfg(not(any(
            all(target_arch = "x86_64", target_feature = "aes"),
            all(target_arch = "aarch64", target_feature = "aes")
        )))]
        {
            aes_round_soft(self, key)
        }
    }
}

impl BitXor for Lane128 {
    type Output = Self;

    #[inline(always)]
    fn bitxor(mut self, rhs: Self) -> Self {
        self ^= rhs;
        self
    }
}

impl BitXorAssign for Lane128 {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a ^= b;
        }
    }
}

impl core::fmt::Debug for Lane128 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Lane128(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// x86_64 AES-NI round
#[cfg(all(target_arch = "x86_64", target_feature = "aes"))]
#[inline(always)]
fn aes_round_x86(state: Lane128, key: Lane128) -> Lane128 {
    use core::arch::x86_64::{__m128i, _mm_aesenc_si128, _mm_loadu_si128, _mm_storeu_si128};

    // SAFETY: the `aes` target feature is enabled at compile time and every
    // load/store touches exactly 16 bytes of a 16-byte array.
    unsafe {
        let s = _mm_loadu_si128(state.0.as_ptr() as *const __m128i);
        let k = _mm_loadu_si128(key.0.as_ptr() as *const __m128i);
        let mut out = [0u8; LANE_SIZE];
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_aesenc_si128(s, k));
        Lane128(out)
    }
}

/// ARMv8 crypto-extension round
#[cfg(all(target_arch = "aarch64", target_feature = "aes"))]
#[inline(always)]
fn aes_round_arm(state: Lane128, key: Lane128) -> Lane128 {
    use core::arch::aarch64::{vaeseq_u8, vaesmcq_u8, vdupq_n_u8, veorq_u8, vld1q_u8, vst1q_u8};

    // SAFETY: the `aes` target feature is enabled at compile time and every
    // load/store touches exactly 16 bytes of a 16-byte array.
    unsafe {
        let s = vld1q_u8(state.0.as_ptr());
        let k = vld1q_u8(key.0.as_ptr());

        // AESE XORs its key before SubBytes while AESENC XORs after
        // MixColumns: run AESE with a zero key, then AESMC, then XOR.
        let r = veorq_u8(vaesmcq_u8(vaeseq_u8(s, vdupq_n_u8(0))), k);

        let mut out = [0u8; LANE_SIZE];
        vst1q_u8(out.as_mut_ptr(), r);
        Lane128(out)
    }
}

/// Portable round for targets built without hardware AES
#[cfg(not(any(
    all(target_arch = "x86_64", target_feature = "aes"),
    all(target_arch = "aarch64", target_feature = "aes")
)))]
#[inline(always)]
fn aes_round_soft(state: Lane128, key: Lane128) -> Lane128 {
    let mut block = aes::Block::clone_from_slice(&state.0);
    aes::hazmat::cipher_round(&mut block, &aes::Block::clone_from_slice(&key.0));
    let mut out = [0u8; LANE_SIZE];
    out.copy_from_slice(&block);
    Lane128(out)
}
