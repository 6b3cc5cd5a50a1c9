use thiserror::Error;

/// Why an allocation request could not be satisfied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The request does not fit in the address space (`isize::MAX` bytes).
    #[error("capacity overflow: {requested} bytes requested")]
    CapacityOverflow {
        /// Total size of the request in bytes.
        requested: usize,
    },
    /// The underlying allocator refused the request.
    #[error("out of memory: {requested} bytes requested")]
    OutOfMemory {
        /// Total size of the request in bytes.
        requested: usize,
    },
}

impl AllocError {
    /// Classifies a failed request for `count` elements of `elem_size` bytes.
    pub(crate) fn for_request(count: usize, elem_size: usize) -> Self {
        match count.checked_mul(elem_size) {
            Some(requested) if isize::try_from(requested).is_ok() => {
                AllocError::OutOfMemory { requested }
            }
            Some(requested) => AllocError::CapacityOverflow { requested },
            None => AllocError::CapacityOverflow {
                requested: usize::MAX,
            },
        }
    }

    /// Size of the failed request in bytes.
    #[must_use]
    pub fn requested(&self) -> usize {
        match *self {
            AllocError::CapacityOverflow { requested } | AllocError::OutOfMemory { requested } => {
                requested
            }
        }
    }
}
