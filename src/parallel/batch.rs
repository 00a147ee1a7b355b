//! Batches: read-only views over a contiguous index range.
//!
//! A [`Batch`] is the unit of work handed to a worker. Every operation scans
//! the batch in ascending index order. [`Batch::select`] and
//! [`Batch::collect`] do not copy anything: they wrap the batch and apply
//! their function while it is being consumed.
//!
//! # Examples
//!
//! ```rust
//! use sorted_batch::parallel::{Batch, SliceBatch};
//!
//! let elements = [1, 2, 3, 4, 5, 6, 9];
//! let batch = SliceBatch::new(&elements, 3, 6);
//!
//! assert_eq!(batch.count(|&&element| element % 2 == 0), 2);
//! assert_eq!(batch.detect(|&&element| element > 4), Some(&5));
//!
//! let doubled = batch.collect(|&element| element * 2);
//! let mut seen = Vec::new();
//! doubled.for_each(|element| seen.push(element));
//! assert_eq!(seen, vec![8, 10, 12]);
//! ```

use std::fmt;
use std::ops::{ControlFlow, Range};
use std::sync::Arc;

/// A sequential, order-preserving unit of parallel work.
pub trait Batch {
    /// The element type produced by this batch.
    type Item;

    /// Feeds every element, in ascending index order, to `function` until it
    /// returns [`ControlFlow::Break`].
    fn try_for_each<B, F>(&self, function: F) -> ControlFlow<B>
    where
        F: FnMut(Self::Item) -> ControlFlow<B>;

    /// Invokes `action` once per element in ascending index order.
    fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(Self::Item),
    {
        let _ = self.try_for_each(|item| {
            action(item);
            ControlFlow::<()>::Continue(())
        });
    }

    /// Counts the elements that satisfy `predicate`.
    fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Self::Item) -> bool,
    {
        let mut count = 0;
        self.for_each(|item| {
            if predicate(&item) {
                count += 1;
            }
        });
        count
    }

    /// Returns `true` on the first element that satisfies `predicate`.
    fn any_satisfy<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.try_for_each(|item| {
            if predicate(&item) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Returns `false` on the first element that fails `predicate`.
    ///
    /// An empty batch satisfies every predicate.
    fn all_satisfy<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.try_for_each(|item| {
            if predicate(&item) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })
        .is_continue()
    }

    /// Returns the first element in index order that satisfies `predicate`.
    fn detect<P>(&self, predicate: P) -> Option<Self::Item>
    where
        P: Fn(&Self::Item) -> bool,
    {
        match self.try_for_each(|item| {
            if predicate(&item) {
                ControlFlow::Break(item)
            } else {
                ControlFlow::Continue(())
            }
        }) {
            ControlFlow::Break(item) => Some(item),
            ControlFlow::Continue(()) => None,
        }
    }

    /// Lazily keeps only the elements that satisfy `predicate`.
    fn select<P>(self, predicate: P) -> SelectBatch<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        SelectBatch::shared(self, Arc::new(predicate))
    }

    /// Lazily maps every element through `function`.
    fn collect<F, U>(self, function: F) -> CollectBatch<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        CollectBatch::shared(self, Arc::new(function))
    }
}

// =============================================================================
// SliceBatch
// =============================================================================

/// The root batch: `[start, end)` of a shared backing slice.
pub struct SliceBatch<'a, T> {
    elements: &'a [T],
    start: usize,
    end: usize,
}

impl<'a, T> SliceBatch<'a, T> {
    /// Creates a batch over `elements[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > elements.len()`. Batches are built by
    /// the partitioner, which never produces such ranges.
    #[must_use]
    pub fn new(elements: &'a [T], start: usize, end: usize) -> Self {
        assert!(
            start <= end && end <= elements.len(),
            "batch range {start}..{end} exceeds backing store of size {}",
            elements.len()
        );
        Self {
            elements,
            start,
            end,
        }
    }

    /// First index covered by this batch.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// One past the last index covered by this batch.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The covered index range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of elements covered by this batch.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the batch covers no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The elements covered by this batch.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &'a [T] {
        &self.elements[self.start..self.end]
    }
}

impl<'a, T> Batch for SliceBatch<'a, T> {
    type Item = &'a T;

    #[inline]
    fn try_for_each<B, F>(&self, function: F) -> ControlFlow<B>
    where
        F: FnMut(Self::Item) -> ControlFlow<B>,
    {
        self.as_slice().iter().try_for_each(function)
    }
}

impl<T> Clone for SliceBatch<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceBatch<'_, T> {}

impl<T> PartialEq for SliceBatch<'_, T> {
    /// Batches are range-equal when they cover the same indices of the same store.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.elements, other.elements)
            && self.start == other.start
            && self.end == other.end
    }
}

impl<T> fmt::Debug for SliceBatch<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SliceBatch")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

// =============================================================================
// SelectBatch
// =============================================================================

/// A batch filtered by a predicate at consumption time.
pub struct SelectBatch<B, P> {
    inner: B,
    predicate: Arc<P>,
}

impl<B, P> SelectBatch<B, P> {
    pub(crate) const fn shared(inner: B, predicate: Arc<P>) -> Self {
        Self { inner, predicate }
    }
}

impl<B, P> Batch for SelectBatch<B, P>
where
    B: Batch,
    P: Fn(&B::Item) -> bool,
{
    type Item = B::Item;

    fn try_for_each<R, F>(&self, mut function: F) -> ControlFlow<R>
    where
        F: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let predicate = &*self.predicate;
        self.inner.try_for_each(|item| {
            if predicate(&item) {
                function(item)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

impl<B: Clone, P> Clone for SelectBatch<B, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<B: fmt::Debug, P> fmt::Debug for SelectBatch<B, P> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SelectBatch")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CollectBatch
// =============================================================================

/// A batch whose elements are mapped through a function at consumption time.
pub struct CollectBatch<B, F> {
    inner: B,
    function: Arc<F>,
}

impl<B, F> CollectBatch<B, F> {
    pub(crate) const fn shared(inner: B, function: Arc<F>) -> Self {
        Self { inner, function }
    }
}

impl<B, F, U> Batch for CollectBatch<B, F>
where
    B: Batch,
    F: Fn(B::Item) -> U,
{
    type Item = U;

    fn try_for_each<R, G>(&self, mut function: G) -> ControlFlow<R>
    where
        G: FnMut(Self::Item) -> ControlFlow<R>,
    {
        let mapper = &*self.function;
        self.inner.try_for_each(|item| function(mapper(item)))
    }
}

impl<B: Clone, F> Clone for CollectBatch<B, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            function: Arc::clone(&self.function),
        }
    }
}

impl<B: fmt::Debug, F> fmt::Debug for CollectBatch<B, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CollectBatch")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ELEMENTS: [i32; 7] = [1, 2, 3, 4, 5, 6, 9];

    fn visit<B: Batch>(batch: &B) -> Vec<B::Item> {
        let mut seen = Vec::new();
        batch.for_each(|item| seen.push(item));
        seen
    }

    #[rstest]
    fn test_for_each_visits_range_in_ascending_order() {
        let batch = SliceBatch::new(&ELEMENTS, 3, 6);
        assert_eq!(visit(&batch), vec![&4, &5, &6]);
    }

    #[rstest]
    #[case(0, 3, 1)]
    #[case(3, 6, 2)]
    #[case(6, 7, 0)]
    fn test_count_even(#[case] start: usize, #[case] end: usize, #[case] expected: usize) {
        let batch = SliceBatch::new(&ELEMENTS, start, end);
        assert_eq!(batch.count(|&&element| element % 2 == 0), expected);
    }

    #[rstest]
    fn test_any_satisfy_short_circuits_on_first_match() {
        let batch = SliceBatch::new(&ELEMENTS, 0, 7);
        let calls = std::cell::Cell::new(0);
        let found = batch.any_satisfy(|&&element| {
            calls.set(calls.get() + 1);
            element == 2
        });
        assert!(found);
        assert_eq!(calls.get(), 2);
    }

    #[rstest]
    fn test_all_satisfy_short_circuits_on_first_failure() {
        let batch = SliceBatch::new(&ELEMENTS, 0, 7);
        let calls = std::cell::Cell::new(0);
        let all = batch.all_satisfy(|&&element| {
            calls.set(calls.get() + 1);
            element < 3
        });
        assert!(!all);
        assert_eq!(calls.get(), 3);
    }

    #[rstest]
    fn test_empty_batch_is_vacuously_true() {
        let batch = SliceBatch::new(&ELEMENTS, 4, 4);
        assert!(batch.is_empty());
        assert!(batch.all_satisfy(|_| false));
        assert!(!batch.any_satisfy(|_| true));
        assert_eq!(batch.detect(|_| true), None);
    }

    #[rstest]
    fn test_detect_returns_first_match_in_index_order() {
        let batch = SliceBatch::new(&ELEMENTS, 0, 7);
        assert_eq!(batch.detect(|&&element| element > 3), Some(&4));
        assert_eq!(batch.detect(|&&element| element > 100), None);
    }

    #[rstest]
    fn test_select_filters_without_copying() {
        let batch = SliceBatch::new(&ELEMENTS, 0, 7);
        let odd = batch.select(|&&element| element % 2 == 1);
        assert_eq!(visit(&odd), vec![&1, &3, &5, &9]);
        assert_eq!(odd.count(|&&element| element > 3), 2);
        // The source batch is still usable: selection never consumed it.
        assert_eq!(batch.len(), 7);
    }

    #[rstest]
    fn test_collect_carries_its_own_element_type() {
        let batch = SliceBatch::new(&ELEMENTS, 5, 7);
        let labels = batch.collect(|element: &i32| format!("#{element}"));
        assert_eq!(visit(&labels), vec!["#6".to_string(), "#9".to_string()]);
    }

    #[rstest]
    fn test_select_then_collect_compose() {
        let batch = SliceBatch::new(&ELEMENTS, 0, 7);
        let squares = batch
            .select(|&&element| element > 4)
            .collect(|element: &i32| element * element);
        assert_eq!(visit(&squares), vec![25, 36, 81]);
        assert_eq!(squares.detect(|&square| square > 30), Some(36));
    }

    #[rstest]
    fn test_batches_over_same_store_are_range_equal() {
        assert_eq!(
            SliceBatch::new(&ELEMENTS, 0, 3),
            SliceBatch::new(&ELEMENTS, 0, 3)
        );
        assert_ne!(
            SliceBatch::new(&ELEMENTS, 0, 3),
            SliceBatch::new(&ELEMENTS, 3, 6)
        );
    }

    #[rstest]
    #[should_panic(expected = "exceeds backing store")]
    fn test_new_rejects_range_past_end() {
        let _ = SliceBatch::new(&ELEMENTS, 5, 8);
    }
}
