//! Zero-fill and copy of byte ranges, a machine word at a time.
//!
//! Both operations walk the range with the widest word first, then finish the
//! remainder with at most one 4-byte, one 2-byte and one single-byte access.

use crate::word::Word;

/// Stores `W::ZERO` at `offset` up to `max_words` times. Returns the offset
/// just past the last store.
#[inline]
fn fill_words<W: Word>(buffer: &mut [u8], mut offset: usize, max_words: usize) -> usize {
    for _ in 0..max_words {
        if !W::ZERO.store(&mut buffer[offset..]) {
            break;
        }
        offset += W::BYTES;
    }
    offset
}

#[inline]
fn copy_words<W: Word>(
    destination: &mut [u8],
    source: &[u8],
    mut offset: usize,
    max_words: usize,
) -> usize {
    for _ in 0..max_words {
        let Some(word) = W::load(&source[offset..]) else {
            break;
        };
        word.store(&mut destination[offset..]);
        offset += W::BYTES;
    }
    offset
}

/// Writes zero over every byte of `buffer`.
///
/// To clear only a prefix, slice first: `zero_fill(&mut buf[..len])`.
///
/// ```rust
/// let mut buf = *b"abcdefghijk";
/// memutils::zero_fill(&mut buf[..9]);
/// assert_eq!(&buf, b"\0\0\0\0\0\0\0\0\0jk");
/// ```
pub fn zero_fill(buffer: &mut [u8]) {
    let offset = fill_words::<u64>(buffer, 0, usize::MAX);
    let offset = fill_words::<u32>(buffer, offset, 1);
    let offset = fill_words::<u16>(buffer, offset, 1);
    let offset = fill_words::<u8>(buffer, offset, 1);
    debug_assert_eq!(offset, buffer.len());
}

/// Copies all of `source` into the front of `destination`.
///
/// The two ranges cannot overlap; the borrow rules already forbid it.
/// Bytes of `destination` past `source.len()` are left as they were.
///
/// # Panics
///
/// Panics if `destination` is shorter than `source`.
///
/// ```rust
/// let mut dst = [0u8; 6];
/// memutils::block_copy(&mut dst, b"hello");
/// assert_eq!(&dst, b"hello\0");
/// ```
pub fn block_copy(destination: &mut [u8], source: &[u8]) {
    assert!(
        destination.len() >= source.len(),
        "block_copy: destination holds {} bytes, source has {}",
        destination.len(),
        source.len()
    );
    let destination = &mut destination[..source.len()];

    let offset = copy_words::<u64>(destination, source, 0, usize::MAX);
    let offset = copy_words::<u32>(destination, source, offset, 1);
    let offset = copy_words::<u16>(destination, source, offset, 1);
    let offset = copy_words::<u8>(destination, source, offset, 1);
    debug_assert_eq!(offset, source.len());
}
