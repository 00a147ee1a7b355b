//! Error type shared by every container and parallel view in this crate.
//!
//! All failures are local and synchronous: they are returned from the call
//! that violates a contract and never retried or swallowed internally.

use thiserror::Error;

/// Errors raised by the immutable containers and their parallel views.
///
/// # Examples
///
/// ```rust
/// use sorted_batch::error::CollectionError;
/// use sorted_batch::persistent::ImmutableSortedSet;
///
/// let empty: ImmutableSortedSet<i32> = ImmutableSortedSet::new();
/// assert_eq!(empty.first(), Err(CollectionError::EmptyCollection));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// An index fell outside `[0, size)`.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The size of the container at the time of the call.
        size: usize,
    },

    /// A range operation received `from > to`.
    #[error("fromIndex ({from}) must not be greater than toIndex ({to})")]
    InvalidRange {
        /// Inclusive start of the requested range.
        from: usize,
        /// Inclusive end of the requested range.
        to: usize,
    },

    /// `first` or `last` was requested on a container with no elements.
    #[error("container is empty")]
    EmptyCollection,

    /// An in-place mutation was attempted on an immutable container.
    #[error("cannot call {operation}() on an immutable container")]
    ImmutableCollection {
        /// Name of the rejected mutation.
        operation: &'static str,
    },

    /// A parallel view or partition was requested with a batch size of zero.
    #[error("batch size must be at least 1, got {batch_size}")]
    InvalidBatchSize {
        /// The rejected batch size.
        batch_size: usize,
    },

    /// A parallel view was requested without a worker pool.
    #[error("a worker pool is required to build a parallel view")]
    MissingWorkerPool,

    /// Two elements mapped to the same key in a unique-key grouping.
    #[error("duplicate key produced while grouping by unique key")]
    DuplicateKey,
}

impl CollectionError {
    /// Returns `true` for failures caused by an invalid parallel configuration.
    #[must_use]
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidBatchSize { .. } | Self::MissingWorkerPool
        )
    }

    /// Returns `true` for index and range violations.
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::InvalidRange { .. }
        )
    }
}

/// Validates an inclusive `[from, to]` range against a container of `size`.
///
/// The ordering check runs first, so `from > to` is always reported as
/// [`CollectionError::InvalidRange`] even when an index is also out of bounds.
#[cfg_attr(not(feature = "persistent"), allow(dead_code))]
pub(crate) const fn check_inclusive_range(
    from: usize,
    to: usize,
    size: usize,
) -> Result<(), CollectionError> {
    if from > to {
        return Err(CollectionError::InvalidRange { from, to });
    }
    if from >= size {
        return Err(CollectionError::IndexOutOfBounds { index: from, size });
    }
    if to >= size {
        return Err(CollectionError::IndexOutOfBounds { index: to, size });
    }
    Ok(())
}
