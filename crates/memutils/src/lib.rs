//! Memory and string primitives that work a machine word at a time.
//!
//! - [`zero_fill`] and [`block_copy`] move bytes in 8/4/2/1-byte steps.
//! - [`AllocGuard`] hands out storage and, in its fatal flavour, turns
//!   allocation failure into process termination.
//! - [`PointerSet`] is an unordered handle bag that grows in chunks of
//!   [`CHUNK_SIZE`].
//! - [`string_length`], [`strings_equal`], [`duplicate`] and [`concatenate`]
//!   treat byte slices as NUL-terminated strings and scan them a word at a
//!   time with the zero-byte bit trick.
//! - [`split`] and [`join`] tokenize a buffer in place and glue strings back
//!   together.
//!
//! ```rust
//! use memutils::{join, split, strings_equal};
//!
//! let mut line = *b"usr,local,bin\0";
//! let parts = split(&mut line[..], b',');
//! assert_eq!(parts.len(), 3);
//!
//! let path = join(parts.as_slice(), b"/");
//! assert!(strings_equal(&path, b"usr/local/bin"));
//! ```

#![no_std]
#![deny(unsafe_code)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod alloc_guard;
mod block;
mod error;
mod pointer_set;
mod string;
mod tokenize;
pub mod word;

#[cfg(test)]
mod tests;

pub use alloc_guard::{
    ALLOC_FAILURE_EXIT_CODE, ALLOC_FAILURE_MESSAGE, AllocGuard, Allocator, FailureHook, Global,
    guarded_allocate, guarded_reallocate,
};
pub use block::{block_copy, zero_fill};
pub use error::AllocError;
pub use pointer_set::{CHUNK_SIZE, PointerSet, add_item, remove_item};
pub use string::{
    concatenate, concatenate_in, duplicate, duplicate_in, string_copy, string_length,
    strings_equal, until_nul,
};
pub use tokenize::{join, join_in, split, split_into};

/// Width-generic scanners, exposed for the fuzz targets.
#[cfg(feature = "fuzzing")]
#[doc(hidden)]
pub mod fuzzing {
    pub use crate::string::{equal_words, scan_length};
}
