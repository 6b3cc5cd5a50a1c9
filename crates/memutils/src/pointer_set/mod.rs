//! PointerSet: an unordered bag of handles with chunked storage.
//!
//! Storage grows and shrinks in whole chunks of [`CHUNK_SIZE`] slots:
//!
//! - an insertion that starts on a chunk boundary first grows the storage by
//!   one chunk;
//! - a removal that lands on a chunk boundary trims the storage to that
//!   boundary, and the last removal releases it entirely.
//!
//! After every call `capacity() == len().next_multiple_of(CHUNK_SIZE)`.
//!
//! Removal swaps the last handle into the vacated slot, so order is only
//! meaningful for a set that has seen insertions alone (as the tokenizer's
//! results do).
//!
//! Handles are compared with `PartialEq`. For raw pointers, `NonNull` or
//! indices that is identity; for borrowed slices it is content equality, and
//! [`PointerSet::remove_by`] with `core::ptr::eq` removes by address.

use alloc::vec::Vec;
use core::{fmt, mem, slice};

use crate::alloc_guard::{AllocGuard, Allocator, Global};


/// Number of slots added or removed at a time.
pub const CHUNK_SIZE: usize = 64;

/// An unordered collection of `Copy` handles with amortized chunked growth.
pub struct PointerSet<T, A: Allocator = Global> {
    items: Vec<T>,
    guard: AllocGuard<A>,
}

impl<T> PointerSet<T> {
    /// An empty set over the global allocator. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(AllocGuard::global())
    }
}

impl<T, A: Allocator> PointerSet<T, A> {
    /// An empty set whose storage comes from `guard`. Does not allocate.
    pub const fn new_in(guard: AllocGuard<A>) -> Self {
        Self {
            items: Vec::new(),
            guard,
        }
    }

    /// Number of handles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of slots currently allocated; always a multiple of
    /// [`CHUNK_SIZE`].
    ///
    /// Zero-sized handles need no storage, so for them this reports the
    /// chunked slot count the set would hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            self.items.len().next_multiple_of(CHUNK_SIZE)
        } else {
            self.items.capacity()
        }
    }

    /// The handles, in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates the handles in storage order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The guard the set allocates through.
    pub fn guard(&self) -> &AllocGuard<A> {
        &self.guard
    }
}

impl<T: Copy + PartialEq, A: Allocator> PointerSet<T, A> {
    /// Appends `item`, growing the storage by one chunk when the set is full.
    ///
    /// Terminates the process if the storage cannot grow (see
    /// [`AllocGuard::reallocate`]).
    pub fn insert(&mut self, item: T) {
        let len = self.items.len();
        if len % CHUNK_SIZE == 0 {
            self.guard.reallocate(&mut self.items, len + CHUNK_SIZE);
            log::trace!("pointer set grown to {} slots", self.items.capacity());
        }
        self.items.push(item);
    }

    /// Removes the first handle equal to `item` by moving the last handle
    /// into its slot. Returns whether a handle was removed.
    pub fn remove(&mut self, item: T) -> bool {
        self.remove_by(|&held| held == item)
    }

    /// Removes the first handle for which `matches` returns `true`, in the
    /// same way as [`remove`](Self::remove).
    ///
    /// Slice handles compare by content under `PartialEq`; to remove one
    /// particular segment, match on its address instead:
    ///
    /// ```rust
    /// use memutils::split;
    ///
    /// let mut buf = *b"x,x\0";
    /// let mut parts = split(&mut buf[..], b',');
    /// let (first, second) = (parts.as_slice()[0], parts.as_slice()[1]);
    /// assert!(parts.remove_by(|held| core::ptr::eq(*held, second)));
    /// assert_eq!(parts.len(), 1);
    /// assert!(core::ptr::eq(parts.as_slice()[0], first));
    /// ```
    pub fn remove_by(&mut self, matches: impl FnMut(&T) -> bool) -> bool {
        let Some(index) = self.items.iter().position(matches) else {
            return false;
        };
        self.items.swap_remove(index);

        let len = self.items.len();
        if len == 0 {
            self.guard.release(mem::take(&mut self.items));
            log::trace!("pointer set storage released");
        } else if len % CHUNK_SIZE == 0 {
            self.guard.reallocate(&mut self.items, len);
            log::trace!("pointer set trimmed to {} slots", self.items.capacity());
        }
        true
    }

    /// Whether some handle equals `item`.
    #[must_use]
    pub fn contains(&self, item: T) -> bool {
        self.items.contains(&item)
    }

    /// The handle at `index` in storage order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }
}

/// Inserts `item` into `set`; a missing set is a no-op.
pub fn add_item<T: Copy + PartialEq, A: Allocator>(set: Option<&mut PointerSet<T, A>>, item: T) {
    if let Some(set) = set {
        set.insert(item);
    }
}

/// Removes `item` from `set`; a missing set or a missing item is a no-op.
pub fn remove_item<T: Copy + PartialEq, A: Allocator>(
    set: Option<&mut PointerSet<T, A>>,
    item: T,
) {
    if let Some(set) = set {
        set.remove(item);
    }
}

impl<T, A: Allocator> Drop for PointerSet<T, A> {
    fn drop(&mut self) {
        if self.capacity() > 0 {
            self.guard.release(mem::take(&mut self.items));
        }
    }
}

impl<T> Default for PointerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for PointerSet<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<'s, T, A: Allocator> IntoIterator for &'s PointerSet<T, A> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
