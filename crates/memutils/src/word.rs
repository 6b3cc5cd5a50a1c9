//! Machine words as seen by the scanners.
//!
//! Every load and store here is bounded by the slice it is given: a word is
//! only read when a full word of bytes remains, so scans never run past the
//! end of an allocation. Callers handle the remaining tail a byte at a time.

use core::fmt::Debug;

/// An unsigned integer that can be loaded from and stored to a byte slice.
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. The scanning helpers are
/// generic over this trait so that the 4-byte and 8-byte paths share one
/// implementation.
pub trait Word: Copy + Eq + Debug {
    /// Width of the word in bytes.
    const BYTES: usize;
    /// All bits clear.
    const ZERO: Self;
    /// `0x01` repeated in every byte.
    const LO: Self;
    /// `0x80` repeated in every byte.
    const HI: Self;

    /// Reads a word from the front of `bytes` in native byte order.
    ///
    /// Returns `None` when fewer than [`Self::BYTES`] bytes remain.
    fn load(bytes: &[u8]) -> Option<Self>;

    /// Writes the word to the front of `bytes` in native byte order.
    ///
    /// Returns `false`, leaving `bytes` untouched, when fewer than
    /// [`Self::BYTES`] bytes remain.
    fn store(self, bytes: &mut [u8]) -> bool;

    /// Whether any byte of the word is zero.
    ///
    /// Uses `(v - LO) & !v & HI`, which is nonzero exactly when some byte of
    /// `v` is zero. A borrow out of a zero byte can set the high bit of the
    /// byte above it, but only above a genuine zero byte, so the test as a
    /// whole is exact even though the flagged position may not be.
    fn has_zero(self) -> bool;
}

macro_rules! impl_word {
    ($t:ty, $n:literal) => {
        impl Word for $t {
            const BYTES: usize = $n;
            const ZERO: Self = 0;
            const LO: Self = <$t>::from_ne_bytes([0x01; $n]);
            const HI: Self = <$t>::from_ne_bytes([0x80; $n]);

            #[inline]
            fn load(bytes: &[u8]) -> Option<Self> {
                bytes.first_chunk::<$n>().map(|chunk| <$t>::from_ne_bytes(*chunk))
            }

            #[inline]
            fn store(self, bytes: &mut [u8]) -> bool {
                match bytes.first_chunk_mut::<$n>() {
                    Some(chunk) => {
                        *chunk = self.to_ne_bytes();
                        true
                    }
                    None => false,
                }
            }

            #[inline]
            fn has_zero(self) -> bool {
                self.wrapping_sub(Self::LO) & !self & Self::HI != 0
            }
        }
    };
}

impl_word!(u8, 1);
impl_word!(u16, 2);
impl_word!(u32, 4);
impl_word!(u64, 8);

/// The widest word the target handles natively.
#[cfg(target_pointer_width = "64")]
pub type NativeWord = u64;

/// The widest word the target handles natively.
#[cfg(not(target_pointer_width = "64"))]
pub type NativeWord = u32;
