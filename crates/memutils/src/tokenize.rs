//! Splitting a string in place and joining strings back together.

use alloc::vec::Vec;
use core::mem;

use bstr::BStr;

use crate::{
    alloc_guard::{AllocGuard, Allocator, Global},
    pointer_set::PointerSet,
    string::{concatenate_in, duplicate_in, string_length},
};

/// Splits `s` on `delimiter`, appending each segment to `parts` from left to
/// right. Returns the number of segments appended.
///
/// Every delimiter inside the logical string is overwritten with a zero byte,
/// so the buffer afterwards holds the segments as consecutive terminated
/// strings. The segments borrow the buffer and exclude their terminators.
/// An absent or empty string yields no segments.
///
/// Equal segments are equal handles in the result; use
/// [`PointerSet::remove_by`] with an address comparison to drop one
/// particular segment.
///
/// ```rust
/// use memutils::{PointerSet, split_into};
///
/// let mut buf = *b"k=v\0";
/// let mut parts = PointerSet::new();
/// assert_eq!(split_into(&mut buf[..], b'=', &mut parts), 2);
/// assert_eq!(parts.as_slice(), [&b"k"[..], &b"v"[..]]);
/// drop(parts);
/// assert_eq!(&buf, b"k\0v\0");
/// ```
pub fn split_into<'a, A: Allocator>(
    s: impl Into<Option<&'a mut [u8]>>,
    delimiter: u8,
    parts: &mut PointerSet<&'a [u8], A>,
) -> usize {
    let Some(s) = s.into() else {
        return 0;
    };
    let len = string_length(&*s);
    if len == 0 {
        return 0;
    }

    let (mut rest, _) = s.split_at_mut(len);
    let mut count = 0;
    loop {
        let Some(at) = rest.iter().position(|&b| b == delimiter) else {
            let last = mem::take(&mut rest);
            parts.insert(last);
            count += 1;
            break;
        };
        let (head, tail) = mem::take(&mut rest).split_at_mut(at);
        tail[0] = 0;
        let head: &'a [u8] = head;
        parts.insert(head);
        count += 1;
        rest = &mut tail[1..];
    }

    log::trace!(
        "split {len} bytes on {:?} into {count} segments",
        BStr::new(&[delimiter])
    );
    count
}

/// Splits `s` on `delimiter` into a fresh set of segments.
///
/// See [`split_into`].
pub fn split<'a>(s: impl Into<Option<&'a mut [u8]>>, delimiter: u8) -> PointerSet<&'a [u8], Global> {
    let mut parts = PointerSet::new();
    split_into(s, delimiter, &mut parts);
    parts
}

/// Joins `strings` with `separator` between consecutive pairs into one
/// terminated buffer.
///
/// No strings yield the empty string; a single string yields a copy of it.
///
/// ```rust
/// use memutils::join;
///
/// assert_eq!(join(&[b"a", b"b", b"c"], b"-"), b"a-b-c\0");
/// assert_eq!(join(&[b"alone"], b"-"), b"alone\0");
/// assert_eq!(join::<&[u8]>(&[], b"-"), b"\0");
/// ```
pub fn join<S: AsRef<[u8]>>(strings: &[S], separator: &[u8]) -> Vec<u8> {
    join_in(strings, separator, &AllocGuard::global())
}

/// [`join`] with storage from `guard`.
///
/// The result is built by folding [`concatenate`](crate::concatenate) over
/// the inputs; each intermediate buffer is dropped as soon as the next one
/// exists.
pub fn join_in<S: AsRef<[u8]>, A: Allocator>(
    strings: &[S],
    separator: &[u8],
    guard: &AllocGuard<A>,
) -> Vec<u8> {
    let Some((first, rest)) = strings.split_first() else {
        return guard.allocate(1);
    };
    let mut joined = duplicate_in(first.as_ref(), guard).unwrap_or_else(|| guard.allocate(1));
    for s in rest {
        let with_separator = concatenate_in(joined.as_slice(), separator, guard);
        joined = concatenate_in(with_separator.as_slice(), s.as_ref(), guard);
    }

    log::trace!(
        "joined {} strings with {:?} into {} bytes",
        strings.len(),
        BStr::new(separator),
        joined.len() - 1
    );
    joined
}
