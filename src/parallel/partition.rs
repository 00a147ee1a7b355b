//! Splitting a container into batches.
//!
//! A [`Partition`] lazily walks `[0, len)` in steps of the batch size and
//! yields one batch per step; the last batch is truncated to fit. It holds
//! nothing but a shared reference and three integers, so it is cheap to clone
//! and cloning it before iteration restarts the same sequence.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use super::batch::{Batch, SliceBatch};
use crate::error::CollectionError;

/// A container that can hand out batches over index ranges of its storage.
#[allow(clippy::len_without_is_empty)]
pub trait BatchSource<'a> {
    /// The root batch type produced for this container.
    type Batch: Batch + 'a;

    /// Number of elements addressable by batches.
    fn len(&self) -> usize;

    /// Builds the batch covering `[start, end)`.
    fn batch(&'a self, start: usize, end: usize) -> Self::Batch;

    /// Partitions the source into batches of `batch_size` elements.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidBatchSize`] if `batch_size` is zero.
    fn partition(&'a self, batch_size: usize) -> Result<Partition<'a, Self>, CollectionError> {
        Partition::new(self, batch_size)
    }
}

impl<'a, T: 'a> BatchSource<'a> for [T] {
    type Batch = SliceBatch<'a, T>;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn batch(&'a self, start: usize, end: usize) -> Self::Batch {
        SliceBatch::new(self, start, end)
    }
}

/// A lazy, finite sequence of batches covering a source exactly once.
///
/// # Examples
///
/// ```rust
/// use sorted_batch::parallel::BatchSource;
///
/// let elements = [1, 2, 3, 4, 5, 6, 9];
/// let ranges: Vec<_> = elements[..]
///     .partition(3)
///     .unwrap()
///     .map(|batch| batch.range())
///     .collect();
/// assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
/// ```
pub struct Partition<'a, S: ?Sized> {
    source: &'a S,
    batch_size: NonZeroUsize,
    size: usize,
    chunk_index: usize,
}

impl<'a, S> Partition<'a, S>
where
    S: BatchSource<'a> + ?Sized,
{
    /// Creates a partition of `source` with the given batch size.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidBatchSize`] if `batch_size` is zero.
    pub fn new(source: &'a S, batch_size: usize) -> Result<Self, CollectionError> {
        NonZeroUsize::new(batch_size)
            .map(|batch_size| Self::with_batch_size(source, batch_size))
            .ok_or(CollectionError::InvalidBatchSize { batch_size })
    }

    /// Creates a partition with an already validated batch size.
    #[must_use]
    pub fn with_batch_size(source: &'a S, batch_size: NonZeroUsize) -> Self {
        Self {
            source,
            batch_size,
            size: source.len(),
            chunk_index: 0,
        }
    }

    /// The configured batch size.
    #[inline]
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size.get()
    }

    /// Total number of batches in this partition, `ceil(len / batch_size)`.
    #[inline]
    #[must_use]
    pub const fn batch_count(&self) -> usize {
        self.size.div_ceil(self.batch_size.get())
    }

    /// Returns a fresh partition positioned at the first batch.
    #[must_use]
    pub const fn restart(&self) -> Self {
        Self {
            source: self.source,
            batch_size: self.batch_size,
            size: self.size,
            chunk_index: 0,
        }
    }
}

impl<'a, S> Iterator for Partition<'a, S>
where
    S: BatchSource<'a> + ?Sized,
{
    type Item = S::Batch;

    fn next(&mut self) -> Option<Self::Item> {
        let batch_size = self.batch_size.get();
        let start = self.chunk_index.checked_mul(batch_size)?;
        if start >= self.size {
            return None;
        }
        let end = start.saturating_add(batch_size).min(self.size);
        self.chunk_index += 1;
        Some(self.source.batch(start, end))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batch_count().saturating_sub(self.chunk_index);
        (remaining, Some(remaining))
    }
}

impl<'a, S> ExactSizeIterator for Partition<'a, S> where S: BatchSource<'a> + ?Sized {}

impl<'a, S> FusedIterator for Partition<'a, S> where S: BatchSource<'a> + ?Sized {}

impl<S: ?Sized> Clone for Partition<'_, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            batch_size: self.batch_size,
            size: self.size,
            chunk_index: self.chunk_index,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for Partition<'_, S> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Partition")
            .field("batch_size", &self.batch_size)
            .field("size", &self.size)
            .field("chunk_index", &self.chunk_index)
            .finish()
    }
}
