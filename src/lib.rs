//! # sorted-batch
//!
//! Immutable, comparator-ordered containers with batched parallel iteration.
//!
//! ## Overview
//!
//! - **Ordering**: [`ordering::OrderingPolicy`], natural or a custom comparator
//!   that is authoritative for ordering and equality
//! - **Containers**: [`persistent::ImmutableSortedSet`] and
//!   [`persistent::ImmutableArrayList`], shared array storage
//! - **Parallel iteration**: batches, partitions and views that run per batch
//!   on a caller-supplied [`rayon::ThreadPool`]
//!
//! ## Feature Flags
//!
//! - `persistent`: the immutable containers (default)
//! - `parallel`: batch protocol and parallel views, pulls in `rayon` and
//!   `parking_lot` (default)
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use sorted_batch::prelude::*;
//!
//! let set = ImmutableSortedSet::with_elements([3, 1, 4, 1, 5, 9, 2, 6]);
//! assert_eq!(set.len(), 7);
//! assert_eq!(set.first(), Ok(&1));
//!
//! let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
//! let view = set.as_parallel(Some(&pool), 3).unwrap();
//! assert_eq!(view.count(|&&element| element > 2), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use sorted_batch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::CollectionError;
    pub use crate::ordering::{Comparator, OrderingPolicy};

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{
        Batch, BatchSource, ParallelIterable, ParallelView, SequentialFallback, ThreadPool,
        ThreadPoolBuilder,
    };
}

pub mod error;
pub mod ordering;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "parallel")]
pub mod parallel;
