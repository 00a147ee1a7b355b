//! The handle combining a container, a worker pool and a batch size.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;

use rayon::ThreadPool;
use tracing::debug;

use super::batch::Batch;
use super::iterable::{ParallelIterable, SequentialFallback};
use super::partition::{BatchSource, Partition};
use crate::error::CollectionError;
use crate::ordering::OrderingPolicy;
use crate::persistent::{ImmutableArrayList, ImmutableSortedSet};

/// A batched parallel view over a container.
///
/// The view borrows both the container and the pool; it owns no threads and
/// never starts or stops the pool. Construction validates the configuration,
/// so every view in existence has a pool and a batch size of at least one.
///
/// # Examples
///
/// ```rust
/// use rayon::ThreadPoolBuilder;
/// use sorted_batch::parallel::ParallelIterable;
/// use sorted_batch::persistent::ImmutableSortedSet;
///
/// let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
/// let set = ImmutableSortedSet::with_elements([3, 1, 4, 1, 5, 9, 2, 6]);
/// let view = set.as_parallel(Some(&pool), 3).unwrap();
///
/// assert!(view.any_satisfy(|&&element| element > 8));
/// assert!(view.all_satisfy(|&&element| element > 0));
/// assert!(!view.all_satisfy(|&&element| element > 2));
/// ```
pub struct ParallelView<'a, 'p, S: ?Sized> {
    source: &'a S,
    pool: &'p ThreadPool,
    batch_size: NonZeroUsize,
}

impl<'a, 'p, S> ParallelView<'a, 'p, S>
where
    S: BatchSource<'a> + ?Sized,
{
    /// Builds a view over `source`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::MissingWorkerPool`] if `pool` is `None`
    /// - [`CollectionError::InvalidBatchSize`] if `batch_size` is zero
    pub fn new(
        source: &'a S,
        pool: Option<&'p ThreadPool>,
        batch_size: usize,
    ) -> Result<Self, CollectionError> {
        let pool = pool.ok_or(CollectionError::MissingWorkerPool)?;
        let batch_size =
            NonZeroUsize::new(batch_size).ok_or(CollectionError::InvalidBatchSize { batch_size })?;
        Ok(Self {
            source,
            pool,
            batch_size,
        })
    }

    /// The container this view reads from.
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &'a S {
        self.source
    }

    /// A fresh partition of the container using this view's batch size.
    #[must_use]
    pub fn partition(&self) -> Partition<'a, S> {
        Partition::with_batch_size(self.source, self.batch_size)
    }
}

impl<'a, 'p, S> ParallelIterable<'a> for ParallelView<'a, 'p, S>
where
    S: BatchSource<'a> + Sync + ?Sized,
    S::Batch: Send,
    <S::Batch as Batch>::Item: Send,
{
    type Item = <S::Batch as Batch>::Item;
    type Batch = S::Batch;

    #[inline]
    fn pool(&self) -> &ThreadPool {
        self.pool
    }

    #[inline]
    fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    fn split(&self) -> impl Iterator<Item = Self::Batch> {
        self.partition()
    }
}

impl<S: ?Sized> Clone for ParallelView<'_, '_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ParallelView<'_, '_, S> {}

impl<S: ?Sized> fmt::Debug for ParallelView<'_, '_, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ParallelView")
            .field("batch_size", &self.batch_size)
            .field("threads", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}

impl<'a, T> ParallelView<'a, '_, ImmutableSortedSet<T>> {
    /// The ordering policy of the underlying set.
    #[inline]
    #[must_use]
    pub const fn ordering_policy(&self) -> &'a OrderingPolicy<T> {
        self.source.ordering_policy()
    }
}

fn log_fallback(operation: &'static str, size: usize) {
    debug!(operation, size, "running sequential fallback on the calling thread");
}

impl<'a, T> SequentialFallback<'a> for ParallelView<'a, '_, ImmutableSortedSet<T>>
where
    T: Clone + 'a,
{
    type Element = T;
    type Group = ImmutableSortedSet<T>;

    fn to_vec(&self) -> Vec<T> {
        log_fallback("to_vec", self.source.len());
        self.source.to_vec()
    }

    fn flat_collect<V, I, F>(&self, function: F) -> ImmutableArrayList<V>
    where
        F: FnMut(&'a T) -> I,
        I: IntoIterator<Item = V>,
    {
        log_fallback("flat_collect", self.source.len());
        self.source.flat_collect(function)
    }

    fn group_by<K, F>(&self, function: F) -> BTreeMap<K, ImmutableSortedSet<T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        log_fallback("group_by", self.source.len());
        self.source.group_by(function)
    }

    fn group_by_each<K, I, F>(&self, function: F) -> BTreeMap<K, ImmutableSortedSet<T>>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
        F: FnMut(&T) -> I,
    {
        log_fallback("group_by_each", self.source.len());
        self.source.group_by_each(function)
    }

    fn group_by_unique_key<K, F>(&self, function: F) -> Result<BTreeMap<K, T>, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        log_fallback("group_by_unique_key", self.source.len());
        self.source.group_by_unique_key(function)
    }
}

impl<'a, T> SequentialFallback<'a> for ParallelView<'a, '_, ImmutableArrayList<T>>
where
    T: Clone + 'a,
{
    type Element = T;
    type Group = ImmutableArrayList<T>;

    fn to_vec(&self) -> Vec<T> {
        log_fallback("to_vec", self.source.len());
        self.source.to_vec()
    }

    fn flat_collect<V, I, F>(&self, function: F) -> ImmutableArrayList<V>
    where
        F: FnMut(&'a T) -> I,
        I: IntoIterator<Item = V>,
    {
        log_fallback("flat_collect", self.source.len());
        self.source.flat_collect(function)
    }

    fn group_by<K, F>(&self, function: F) -> BTreeMap<K, ImmutableArrayList<T>>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        log_fallback("group_by", self.source.len());
        self.source.group_by(function)
    }

    fn group_by_each<K, I, F>(&self, function: F) -> BTreeMap<K, ImmutableArrayList<T>>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
        F: FnMut(&T) -> I,
    {
        log_fallback("group_by_each", self.source.len());
        self.source.group_by_each(function)
    }

    fn group_by_unique_key<K, F>(&self, function: F) -> Result<BTreeMap<K, T>, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        log_fallback("group_by_unique_key", self.source.len());
        self.source.group_by_unique_key(function)
    }
}
