//! Batched parallel iteration over immutable containers.
//!
//! The protocol has four pieces, each independent of any concrete container:
//!
//! - [`Batch`]: a sequential, read-only view over `[start, end)`.
//! - [`BatchSource`]: a container able to hand out batches.
//! - [`Partition`]: the lazy, restartable sequence of batches of one size.
//! - [`ParallelIterable`]: submits batches to a [`rayon::ThreadPool`] and
//!   combines their results.
//!
//! [`ParallelView`] ties a container, a borrowed pool and a batch size
//! together. Operations that do not actually run per batch live on the
//! separate [`SequentialFallback`] trait; see the table in [`iterable`].
//!
//! # Examples
//!
//! ```rust
//! use rayon::ThreadPoolBuilder;
//! use sorted_batch::parallel::{ParallelIterable, SequentialFallback};
//! use sorted_batch::persistent::ImmutableSortedSet;
//!
//! let pool = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
//! let set: ImmutableSortedSet<u32> = (1..=100).collect();
//! let view = set.as_parallel(Some(&pool), 16).unwrap();
//!
//! // True parallel: one job per batch.
//! assert_eq!(view.count(|&&element| element % 10 == 0), 10);
//!
//! // Lazy adapters compose and still run per batch.
//! let squares_over_5000 = view
//!     .select(|&&element| element > 70)
//!     .collect(|&element| element * element)
//!     .count(|&square| square > 5000);
//! assert_eq!(squares_over_5000, 30);
//!
//! // Sequential fallback: runs on this thread over the whole set.
//! let by_tens = view.group_by(|&element| element / 10);
//! assert_eq!(by_tens[&3].len(), 10);
//! ```

pub mod aggregate;
mod batch;
pub mod iterable;
mod partition;
mod view;

pub use batch::Batch;
pub use batch::CollectBatch;
pub use batch::SelectBatch;
pub use batch::SliceBatch;
pub use iterable::ParallelCollect;
pub use iterable::ParallelIterable;
pub use iterable::ParallelSelect;
pub use iterable::SequentialFallback;
pub use partition::BatchSource;
pub use partition::Partition;
pub use rayon::ThreadPool;
pub use rayon::ThreadPoolBuilder;
pub use view::ParallelView;

static_assertions::assert_impl_all!(SliceBatch<'static, i32>: Send, Sync, Copy);
static_assertions::assert_impl_all!(Partition<'static, [i32]>: Send, Sync, Clone);
static_assertions::assert_impl_all!(ParallelView<'static, 'static, [i32]>: Send, Sync, Copy);
