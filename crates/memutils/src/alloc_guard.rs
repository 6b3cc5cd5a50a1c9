//! Allocation with a fatal failure policy.
//!
//! Every buffer the crate hands out is obtained through an [`AllocGuard`].
//! The guard exposes two flavours of each request:
//!
//! - `try_allocate` / `try_reallocate` return [`AllocError`] and leave the
//!   decision to the caller;
//! - `allocate` / `reallocate` treat failure as unrecoverable: they report
//!   [`ALLOC_FAILURE_MESSAGE`] (through the failure hook when one is set,
//!   otherwise on standard error) and terminate the process with
//!   [`ALLOC_FAILURE_EXIT_CODE`].
//!
//! The higher layers use the fatal flavour so that none of them has to thread
//! allocation errors through string and collection code.
//!
//! The guard does not implement allocation itself. It wraps an
//! [`Allocator`], which defaults to [`Global`]; tests plug in counting or
//! always-failing allocators through the same seam.

use alloc::vec::Vec;
use core::{cmp::Ordering, fmt, mem};

use crate::error::AllocError;

/// Text reported when a guarded allocation fails.
pub const ALLOC_FAILURE_MESSAGE: &str = "FATAL: Memory allocation error!";

/// Process exit status after a guarded allocation fails.
///
/// Unix parents only observe the low byte, `0xEF`.
#[allow(clippy::cast_possible_wrap)]
pub const ALLOC_FAILURE_EXIT_CODE: i32 = 0xDEAD_BEEF_u32 as i32;

/// Callback invoked with [`ALLOC_FAILURE_MESSAGE`] right before the process
/// terminates.
///
/// Plain functions coerce from `&name`; closures that carry state can be
/// stored in a `static` or leaked.
pub type FailureHook = &'static dyn Fn(&str);

/// Backing storage provider for [`AllocGuard`].
///
/// Storage is always carried in a `Vec`, so implementations decide how much
/// capacity to obtain and when to give it back, never how bytes are laid out.
pub trait Allocator {
    /// Makes `buf` able to hold at least `capacity` elements without
    /// reallocating. A no-op when it already can.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the storage cannot be obtained; `buf` is
    /// left unchanged in that case.
    fn grow<T>(&self, buf: &mut Vec<T>, capacity: usize) -> Result<(), AllocError>;

    /// Reduces the storage of `buf` to `capacity` elements, never below its
    /// length.
    fn shrink<T>(&self, buf: &mut Vec<T>, capacity: usize) {
        buf.shrink_to(capacity);
    }

    /// Gives the storage of `buf` back.
    fn release<T>(&self, buf: Vec<T>) {
        drop(buf);
    }
}

/// The global Rust allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn grow<T>(&self, buf: &mut Vec<T>, capacity: usize) -> Result<(), AllocError> {
        if capacity <= buf.capacity() {
            return Ok(());
        }
        buf.try_reserve_exact(capacity - buf.len())
            .map_err(|_| AllocError::for_request(capacity, mem::size_of::<T>()))
    }
}

impl<A: Allocator> Allocator for &A {
    fn grow<T>(&self, buf: &mut Vec<T>, capacity: usize) -> Result<(), AllocError> {
        (**self).grow(buf, capacity)
    }

    fn shrink<T>(&self, buf: &mut Vec<T>, capacity: usize) {
        (**self).shrink(buf, capacity);
    }

    fn release<T>(&self, buf: Vec<T>) {
        (**self).release(buf);
    }
}

/// An [`Allocator`] together with the policy applied when it fails.
///
/// ```rust
/// use memutils::AllocGuard;
///
/// fn report(msg: &str) {
///     eprintln!("my-tool: {msg}");
/// }
///
/// let guard = AllocGuard::global().with_failure_hook(&report);
/// let buf = guard.allocate(16);
/// assert_eq!(buf, [0u8; 16]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct AllocGuard<A = Global> {
    allocator: A,
    on_failure: Option<FailureHook>,
}

impl AllocGuard<Global> {
    /// A guard over the global allocator with no failure hook.
    #[must_use]
    pub const fn global() -> Self {
        Self::new(Global)
    }
}

impl<A> AllocGuard<A> {
    /// A guard over `allocator` with no failure hook.
    pub const fn new(allocator: A) -> Self {
        Self {
            allocator,
            on_failure: None,
        }
    }

    /// Routes the failure message to `hook` instead of standard error.
    #[must_use]
    pub const fn with_failure_hook(mut self, hook: FailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// The wrapped allocator.
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The failure hook, if any.
    pub const fn failure_hook(&self) -> Option<FailureHook> {
        self.on_failure
    }
}

impl<A: Allocator> AllocGuard<A> {
    /// Allocates a zeroed buffer of exactly `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the allocator cannot provide the storage.
    pub fn try_allocate(&self, size: usize) -> Result<Vec<u8>, AllocError> {
        let mut buf = Vec::new();
        self.allocator.grow(&mut buf, size)?;
        // Within the capacity just obtained, so no further allocation.
        buf.resize(size, 0);
        Ok(buf)
    }

    /// Resizes the storage of `buf` to hold `capacity` elements.
    ///
    /// Growing goes through [`Allocator::grow`], shrinking through
    /// [`Allocator::shrink`]. An empty, unallocated `Vec` is a valid input and
    /// behaves like a fresh allocation.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growing fails; `buf` is unchanged then.
    pub fn try_reallocate<T>(&self, buf: &mut Vec<T>, capacity: usize) -> Result<(), AllocError> {
        match capacity.cmp(&buf.capacity()) {
            Ordering::Greater => self.allocator.grow(buf, capacity),
            Ordering::Less => {
                self.allocator.shrink(buf, capacity);
                Ok(())
            }
            Ordering::Equal => Ok(()),
        }
    }

    /// Like [`try_allocate`](Self::try_allocate), but terminates the process
    /// on failure.
    pub fn allocate(&self, size: usize) -> Vec<u8> {
        self.try_allocate(size)
            .unwrap_or_else(|err| fatal(self.on_failure, err))
    }

    /// Like [`try_reallocate`](Self::try_reallocate), but terminates the
    /// process on failure.
    pub fn reallocate<T>(&self, buf: &mut Vec<T>, capacity: usize) {
        if let Err(err) = self.try_reallocate(buf, capacity) {
            fatal(self.on_failure, err);
        }
    }

    /// Returns the storage of `buf` to the allocator.
    pub fn release<T>(&self, buf: Vec<T>) {
        self.allocator.release(buf);
    }
}

impl<A: fmt::Debug> fmt::Debug for AllocGuard<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocGuard")
            .field("allocator", &self.allocator)
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

/// Allocates a zeroed buffer of `size` bytes from the global allocator,
/// terminating the process on failure.
pub fn guarded_allocate(size: usize, on_failure: Option<FailureHook>) -> Vec<u8> {
    hooked(on_failure).allocate(size)
}

/// Resizes `existing` to hold `capacity` elements using the global allocator,
/// terminating the process on failure. `existing` may be empty and
/// unallocated.
pub fn guarded_reallocate<T>(existing: &mut Vec<T>, capacity: usize, on_failure: Option<FailureHook>) {
    hooked(on_failure).reallocate(existing, capacity);
}

fn hooked(on_failure: Option<FailureHook>) -> AllocGuard {
    AllocGuard {
        allocator: Global,
        on_failure,
    }
}

#[cold]
#[inline(never)]
fn fatal(on_failure: Option<FailureHook>, err: AllocError) -> ! {
    log::error!("{ALLOC_FAILURE_MESSAGE} ({err})");
    match on_failure {
        Some(hook) => hook(ALLOC_FAILURE_MESSAGE),
        None => report(),
    }
    terminate(err)
}

#[cfg(feature = "std")]
fn report() {
    std::eprintln!("{ALLOC_FAILURE_MESSAGE}");
}

#[cfg(not(feature = "std"))]
fn report() {}

#[cfg(feature = "std")]
fn terminate(_: AllocError) -> ! {
    std::process::exit(ALLOC_FAILURE_EXIT_CODE)
}

#[cfg(not(feature = "std"))]
fn terminate(err: AllocError) -> ! {
    let layout = core::alloc::Layout::from_size_align(err.requested(), 1)
        .unwrap_or(core::alloc::Layout::new::<u8>());
    alloc::alloc::handle_alloc_error(layout)
}
