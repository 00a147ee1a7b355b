//! Parallel iteration traits.
//!
//! Operations are split across two traits so a call site always shows how an
//! operation scales:
//!
//! | Operation | Trait | Execution |
//! |-----------|-------|-----------|
//! | `for_each`, `try_for_each` | [`ParallelIterable`] | one pool job per batch |
//! | `count` | [`ParallelIterable`] | one pool job per batch, summed |
//! | `any_satisfy`, `all_satisfy` | [`ParallelIterable`] | per batch, short-circuits |
//! | `detect` | [`ParallelIterable`] | per batch, short-circuits, any match |
//! | `select`, `collect` | [`ParallelIterable`] | lazy, applied inside each batch |
//! | `to_vec`, `flat_collect` | [`SequentialFallback`] | whole container, calling thread |
//! | `group_by`, `group_by_each`, `group_by_unique_key` | [`SequentialFallback`] | whole container, calling thread |

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::ThreadPool;

use super::aggregate;
use super::batch::{Batch, CollectBatch, SelectBatch};
use crate::error::CollectionError;
use crate::persistent::ImmutableArrayList;

/// A batched view whose operations run per batch on a worker pool.
pub trait ParallelIterable<'a>: Sync {
    /// The element type produced by this view's batches.
    type Item: Send + 'a;

    /// The batch type this view is split into.
    type Batch: Batch<Item = Self::Item> + Send + 'a;

    /// The worker pool batches are submitted to.
    fn pool(&self) -> &ThreadPool;

    /// Number of elements per batch (the last batch may be shorter).
    fn batch_size(&self) -> usize;

    /// Lazily splits the view into batches, ascending by start index.
    fn split(&self) -> impl Iterator<Item = Self::Batch>;

    /// Runs `action` on every element. See [`aggregate::for_each`].
    fn for_each<F>(&self, action: F)
    where
        F: Fn(Self::Item) + Sync,
    {
        aggregate::for_each(self, action);
    }

    /// Runs a fallible `action` on every element. See [`aggregate::try_for_each`].
    ///
    /// # Errors
    ///
    /// Returns the first error recorded by any batch.
    fn try_for_each<F, E>(&self, action: F) -> Result<(), E>
    where
        F: Fn(Self::Item) -> Result<(), E> + Sync,
        E: Send,
    {
        aggregate::try_for_each(self, action)
    }

    /// Counts the elements that satisfy `predicate`.
    fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Self::Item) -> bool + Sync,
    {
        aggregate::count(self, predicate)
    }

    /// Returns `true` if any element satisfies `predicate`.
    fn any_satisfy<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool + Sync,
    {
        aggregate::any_satisfy(self, predicate)
    }

    /// Returns `true` if every element satisfies `predicate`.
    fn all_satisfy<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool + Sync,
    {
        aggregate::all_satisfy(self, predicate)
    }

    /// Returns some element that satisfies `predicate`.
    ///
    /// Not necessarily the lowest-index match. See [`aggregate::detect`].
    fn detect<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: Fn(&Self::Item) -> bool + Sync,
    {
        aggregate::detect(self, predicate)
    }

    /// Lazily keeps the elements that satisfy `predicate`.
    fn select<P>(self, predicate: P) -> ParallelSelect<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool + Send + Sync + 'a,
    {
        ParallelSelect {
            view: self,
            predicate: Arc::new(predicate),
        }
    }

    /// Lazily maps every element through `function`.
    fn collect<F, U>(self, function: F) -> ParallelCollect<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U + Send + Sync + 'a,
        U: Send + 'a,
    {
        ParallelCollect {
            view: self,
            function: Arc::new(function),
        }
    }
}

/// Operations exposed next to a parallel view that run sequentially over the
/// whole container on the calling thread.
///
/// These never touch the worker pool. They exist so that code written
/// against a parallel view can still reach them, but they do not scale with
/// the pool.
pub trait SequentialFallback<'a> {
    /// The element type of the underlying container.
    type Element: 'a;

    /// The container type each group is collected into.
    type Group;

    /// Copies all elements in container order.
    fn to_vec(&self) -> Vec<Self::Element>;

    /// Maps every element to an iterable and concatenates the results.
    ///
    /// The result is an owned list rather than a view, since a view only
    /// borrows its source. Re-wrap it with the same configuration to keep
    /// working in parallel:
    ///
    /// ```rust
    /// use sorted_batch::parallel::{ParallelIterable, SequentialFallback, ThreadPoolBuilder};
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    /// let set = ImmutableSortedSet::with_elements([1, 2, 3]);
    /// let view = set.as_parallel(Some(&pool), 2).unwrap();
    ///
    /// let flattened = view.flat_collect(|&element| [element, element * 10]);
    /// let rewrapped = flattened
    ///     .as_parallel(Some(view.pool()), view.batch_size())
    ///     .unwrap();
    /// assert_eq!(rewrapped.count(|&&element| element >= 10), 3);
    /// ```
    fn flat_collect<V, I, F>(&self, function: F) -> ImmutableArrayList<V>
    where
        F: FnMut(&'a Self::Element) -> I,
        I: IntoIterator<Item = V>;

    /// Groups elements by the key `function` returns.
    fn group_by<K, F>(&self, function: F) -> BTreeMap<K, Self::Group>
    where
        K: Ord,
        F: FnMut(&Self::Element) -> K;

    /// Groups every element under each of the keys `function` returns.
    fn group_by_each<K, I, F>(&self, function: F) -> BTreeMap<K, Self::Group>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
        F: FnMut(&Self::Element) -> I;

    /// Indexes elements by a key that must be unique.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateKey`] if two elements share a key.
    fn group_by_unique_key<K, F>(
        &self,
        function: F,
    ) -> Result<BTreeMap<K, Self::Element>, CollectionError>
    where
        K: Ord,
        F: FnMut(&Self::Element) -> K;
}

// =============================================================================
// ParallelSelect
// =============================================================================

/// A parallel view filtered lazily inside each batch.
pub struct ParallelSelect<V, P> {
    view: V,
    predicate: Arc<P>,
}

impl<'a, V, P> ParallelIterable<'a> for ParallelSelect<V, P>
where
    V: ParallelIterable<'a>,
    P: Fn(&V::Item) -> bool + Send + Sync + 'a,
{
    type Item = V::Item;
    type Batch = SelectBatch<V::Batch, P>;

    #[inline]
    fn pool(&self) -> &ThreadPool {
        self.view.pool()
    }

    #[inline]
    fn batch_size(&self) -> usize {
        self.view.batch_size()
    }

    fn split(&self) -> impl Iterator<Item = Self::Batch> {
        let predicate = &self.predicate;
        self.view
            .split()
            .map(move |batch| SelectBatch::shared(batch, Arc::clone(predicate)))
    }
}

// =============================================================================
// ParallelCollect
// =============================================================================

/// A parallel view mapped lazily inside each batch.
pub struct ParallelCollect<V, F> {
    view: V,
    function: Arc<F>,
}

impl<'a, V, F, U> ParallelIterable<'a> for ParallelCollect<V, F>
where
    V: ParallelIterable<'a>,
    F: Fn(V::Item) -> U + Send + Sync + 'a,
    U: Send + 'a,
{
    type Item = U;
    type Batch = CollectBatch<V::Batch, F>;

    #[inline]
    fn pool(&self) -> &ThreadPool {
        self.view.pool()
    }

    #[inline]
    fn batch_size(&self) -> usize {
        self.view.batch_size()
    }

    fn split(&self) -> impl Iterator<Item = Self::Batch> {
        let function = &self.function;
        self.view
            .split()
            .map(move |batch| CollectBatch::shared(batch, Arc::clone(function)))
    }
}
