//! NUL-terminated strings over byte slices, scanned a word at a time.
//!
//! A string is a byte slice whose logical content ends at the first zero byte.
//! When the slice holds no zero byte, its end plays the terminator. Scans
//! therefore stop at whichever comes first and never read outside the slice,
//! whatever the alignment or padding of the underlying allocation.
//!
//! Absent strings are `None`. Entry points that accept one take
//! `impl Into<Option<&[u8]>>`, so both `string_length(s)` and
//! `string_length(None)` work.
//!
//! Every string allocated here ends with an explicit terminator.

use alloc::vec::Vec;

use crate::{
    alloc_guard::{AllocGuard, Allocator},
    block::block_copy,
    word::{NativeWord, Word},
};


/// Offset of the first zero byte of `s`, or `s.len()` when there is none.
///
/// Skips whole words until one contains a zero byte, then finishes inside
/// that word (or in the sub-word tail) a byte at a time.
#[inline]
pub fn scan_length<W: Word>(s: &[u8]) -> usize {
    let mut offset = 0;
    while let Some(word) = W::load(&s[offset..]) {
        if word.has_zero() {
            break;
        }
        offset += W::BYTES;
    }
    s[offset..]
        .iter()
        .position(|&b| b == 0)
        .map_or(s.len(), |at| offset + at)
}

/// Compares the logical contents of `a` and `b`, a word pair at a time.
#[inline]
pub fn equal_words<W: Word>(a: &[u8], b: &[u8]) -> bool {
    let mut offset = 0;
    while let (Some(wa), Some(wb)) = (W::load(&a[offset..]), W::load(&b[offset..])) {
        if wa.has_zero() || wb.has_zero() {
            break;
        }
        if wa != wb {
            return false;
        }
        offset += W::BYTES;
    }

    // Tail: the slice end counts as a terminator on either side.
    let mut tail_a = a[offset..].iter().copied().chain(core::iter::once(0));
    let mut tail_b = b[offset..].iter().copied().chain(core::iter::once(0));
    loop {
        match (tail_a.next(), tail_b.next()) {
            (Some(ca), Some(cb)) if ca != cb => return false,
            (Some(0), Some(0)) => return true,
            (Some(_), Some(_)) => {}
            // The chained terminator always ends both sides first.
            _ => return false,
        }
    }
}

/// Length of a string, not counting its terminator. `None` has length 0.
///
/// ```rust
/// use memutils::string_length;
///
/// assert_eq!(string_length(b"hello\0world".as_slice()), 5);
/// assert_eq!(string_length(b"no terminator".as_slice()), 13);
/// assert_eq!(string_length(None), 0);
/// ```
pub fn string_length<'a>(s: impl Into<Option<&'a [u8]>>) -> usize {
    s.into().map_or(0, scan_length::<NativeWord>)
}

/// The logical content of `s`: everything before its terminator.
#[must_use]
pub fn until_nul(s: &[u8]) -> &[u8] {
    &s[..scan_length::<NativeWord>(s)]
}

/// Whether two strings have the same logical content.
///
/// ```rust
/// use memutils::strings_equal;
///
/// assert!(strings_equal(b"abc\0", b"abc"));
/// assert!(!strings_equal(b"ab", b"abc"));
/// ```
#[must_use]
pub fn strings_equal(a: &[u8], b: &[u8]) -> bool {
    equal_words::<NativeWord>(a, b)
}

/// Copies the string `source` and its terminator into `destination`.
/// Returns the length of the copied string.
///
/// # Panics
///
/// Panics if `destination` cannot hold the string plus its terminator.
pub fn string_copy(destination: &mut [u8], source: &[u8]) -> usize {
    let len = string_length(source);
    assert!(
        destination.len() > len,
        "string_copy: destination holds {} bytes, string needs {}",
        destination.len(),
        len + 1
    );
    block_copy(destination, &source[..len]);
    destination[len] = 0;
    len
}

/// Allocates a terminated copy of `src`. `None` yields `None`.
pub fn duplicate<'a>(src: impl Into<Option<&'a [u8]>>) -> Option<Vec<u8>> {
    duplicate_in(src, &AllocGuard::global())
}

/// [`duplicate`] with storage from `guard`.
pub fn duplicate_in<'a, A: Allocator>(
    src: impl Into<Option<&'a [u8]>>,
    guard: &AllocGuard<A>,
) -> Option<Vec<u8>> {
    let src = until_nul(src.into()?);
    let mut copy = guard.allocate(src.len() + 1);
    // The allocation is zeroed, so the terminator is already in place.
    block_copy(&mut copy, src);
    Some(copy)
}

/// Allocates the concatenation of `a` and `b`, followed by a terminator.
/// An absent operand counts as empty.
///
/// ```rust
/// use memutils::concatenate;
///
/// assert_eq!(concatenate(b"foo".as_slice(), b"bar\0".as_slice()), b"foobar\0");
/// assert_eq!(concatenate(None, b"bar".as_slice()), b"bar\0");
/// ```
pub fn concatenate<'a, 'b>(
    a: impl Into<Option<&'a [u8]>>,
    b: impl Into<Option<&'b [u8]>>,
) -> Vec<u8> {
    concatenate_in(a, b, &AllocGuard::global())
}

/// [`concatenate`] with storage from `guard`.
pub fn concatenate_in<'a, 'b, A: Allocator>(
    a: impl Into<Option<&'a [u8]>>,
    b: impl Into<Option<&'b [u8]>>,
    guard: &AllocGuard<A>,
) -> Vec<u8> {
    let a = a.into().map_or(&[][..], until_nul);
    let b = b.into().map_or(&[][..], until_nul);
    let mut joined = guard.allocate(a.len() + b.len() + 1);
    block_copy(&mut joined, a);
    block_copy(&mut joined[a.len()..], b);
    joined
}
