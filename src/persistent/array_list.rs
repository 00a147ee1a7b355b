//! Immutable list backed by a shared array.
//!
//! [`ImmutableArrayList`] is the positional counterpart of
//! [`ImmutableSortedSet`](super::ImmutableSortedSet): it keeps insertion
//! order, allows duplicates and uses the element's own `PartialEq` for
//! membership. `flat_collect` results are returned as this type.
//!
//! # Examples
//!
//! ```rust
//! use sorted_batch::persistent::ImmutableArrayList;
//!
//! let list: ImmutableArrayList<_> = ["b", "a", "b"].into_iter().collect();
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.get(2), Ok(&"b"));
//! assert_eq!(list.index_of(&"b"), Some(0));
//!
//! let longer = list.new_with("c");
//! assert_eq!(list.len(), 3);
//! assert_eq!(longer.last(), Ok(&"c"));
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::mutation::MutableCollection;
use crate::error::{CollectionError, check_inclusive_range};

/// An immutable, positionally indexed sequence.
///
/// Cloning is O(1): clones share the backing array.
pub struct ImmutableArrayList<T> {
    elements: Arc<[T]>,
}

impl<T> ImmutableArrayList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Takes ownership of `elements` without copying them.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self {
            elements: Arc::from(elements),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements in list order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Iterates the elements in list order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.elements
            .get(index)
            .ok_or(CollectionError::IndexOutOfBounds {
                index,
                size: self.len(),
            })
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn first(&self) -> Result<&T, CollectionError> {
        self.elements.first().ok_or(CollectionError::EmptyCollection)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the list is empty.
    pub fn last(&self) -> Result<&T, CollectionError> {
        self.elements.last().ok_or(CollectionError::EmptyCollection)
    }

    /// Returns `true` if an element `==` to `element` is present.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.contains(element)
    }

    /// Position of the first element equal to `element`.
    #[must_use]
    pub fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.elements.iter().position(|candidate| candidate == element)
    }

    /// Visits the elements at indices `from..=to` in order.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::InvalidRange`] if `from > to`
    /// - [`CollectionError::IndexOutOfBounds`] if `to >= len()`
    pub fn for_each_in_range<F>(&self, from: usize, to: usize, action: F) -> Result<(), CollectionError>
    where
        F: FnMut(&T),
    {
        check_inclusive_range(from, to, self.len())?;
        self.elements[from..=to].iter().for_each(action);
        Ok(())
    }

    /// Visits the elements at indices `from..=to` together with their index.
    ///
    /// # Errors
    ///
    /// Same as [`for_each_in_range`](Self::for_each_in_range).
    pub fn for_each_with_index_in_range<F>(
        &self,
        from: usize,
        to: usize,
        mut action: F,
    ) -> Result<(), CollectionError>
    where
        F: FnMut(&T, usize),
    {
        check_inclusive_range(from, to, self.len())?;
        for (offset, element) in self.elements[from..=to].iter().enumerate() {
            action(element, from + offset);
        }
        Ok(())
    }

    /// Maps every element to an iterable and concatenates the results in
    /// list order.
    pub fn flat_collect<'s, V, I, F>(&'s self, function: F) -> ImmutableArrayList<V>
    where
        F: FnMut(&'s T) -> I,
        I: IntoIterator<Item = V>,
    {
        self.elements.iter().flat_map(function).collect()
    }
}

impl<T: Clone> ImmutableArrayList<T> {
    /// Returns a new list with `element` appended; `self` is untouched.
    #[must_use]
    pub fn new_with(&self, element: T) -> Self {
        let mut elements = Vec::with_capacity(self.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(element);
        Self::from_vec(elements)
    }

    /// Copies the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.to_vec()
    }

    /// Groups elements by key, preserving list order inside each group.
    pub fn group_by<K, F>(&self, mut function: F) -> BTreeMap<K, Self>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for element in self.elements.iter() {
            groups.entry(function(element)).or_default().push(element.clone());
        }
        into_groups(groups)
    }

    /// Groups every element under each key `function` returns for it.
    ///
    /// A key returned twice for the same element adds it to that group twice.
    pub fn group_by_each<K, I, F>(&self, mut function: F) -> BTreeMap<K, Self>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
        F: FnMut(&T) -> I,
    {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for element in self.elements.iter() {
            for key in function(element) {
                groups.entry(key).or_default().push(element.clone());
            }
        }
        into_groups(groups)
    }

    /// Indexes elements by a key that must be unique across the list.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateKey`] if two elements share a key.
    pub fn group_by_unique_key<K, F>(&self, mut function: F) -> Result<BTreeMap<K, T>, CollectionError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut index = BTreeMap::new();
        for element in self.elements.iter() {
            match index.entry(function(element)) {
                Entry::Vacant(slot) => {
                    slot.insert(element.clone());
                }
                Entry::Occupied(_) => return Err(CollectionError::DuplicateKey),
            }
        }
        Ok(index)
    }
}

fn into_groups<K: Ord, T>(groups: BTreeMap<K, Vec<T>>) -> BTreeMap<K, ImmutableArrayList<T>> {
    groups
        .into_iter()
        .map(|(key, elements)| (key, ImmutableArrayList::from_vec(elements)))
        .collect()
}

impl<T> Default for ImmutableArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ImmutableArrayList<T> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableArrayList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ImmutableArrayList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for ImmutableArrayList<T> {}

impl<T: Hash> Hash for ImmutableArrayList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl<T> From<Vec<T>> for ImmutableArrayList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<T> FromIterator<T> for ImmutableArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableArrayList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> MutableCollection<T> for ImmutableArrayList<T> {
    fn add(&mut self, _element: T) -> Result<bool, CollectionError> {
        Err(CollectionError::ImmutableCollection { operation: "add" })
    }

    fn remove(&mut self, _element: &T) -> Result<bool, CollectionError> {
        Err(CollectionError::ImmutableCollection { operation: "remove" })
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Err(CollectionError::ImmutableCollection { operation: "clear" })
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::ThreadPool;

    use super::ImmutableArrayList;
    use crate::error::CollectionError;
    use crate::parallel::{BatchSource, ParallelView, SliceBatch};

    impl<'a, T: 'a> BatchSource<'a> for ImmutableArrayList<T> {
        type Batch = SliceBatch<'a, T>;

        fn len(&self) -> usize {
            self.elements.len()
        }

        fn batch(&'a self, start: usize, end: usize) -> Self::Batch {
            SliceBatch::new(self.as_slice(), start, end)
        }
    }

    impl<T> ImmutableArrayList<T> {
        /// Returns a parallel view over this list.
        ///
        /// # Errors
        ///
        /// - [`CollectionError::MissingWorkerPool`] if `pool` is `None`
        /// - [`CollectionError::InvalidBatchSize`] if `batch_size` is zero
        pub fn as_parallel<'p>(
            &self,
            pool: Option<&'p ThreadPool>,
            batch_size: usize,
        ) -> Result<ParallelView<'_, 'p, Self>, CollectionError> {
            ParallelView::new(self, pool, batch_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn octuplet() -> ImmutableArrayList<i32> {
        ImmutableArrayList::from_vec(vec![1, 2, 3, 4, 5, 6, 7, 8])
    }

    #[rstest]
    #[case(0, Ok(&1))]
    #[case(7, Ok(&8))]
    #[case(8, Err(CollectionError::IndexOutOfBounds { index: 8, size: 8 }))]
    fn test_get(#[case] index: usize, #[case] expected: Result<&i32, CollectionError>) {
        assert_eq!(octuplet().get(index), expected);
    }

    #[rstest]
    fn test_new_with_grows_by_one() {
        let list = octuplet();
        let grown = list.new_with(9);
        assert_eq!(grown.len(), 9);
        assert_eq!(grown.last(), Ok(&9));
        assert_eq!(list.len(), 8);
    }

    #[rstest]
    fn test_allows_duplicates_in_insertion_order() {
        let list: ImmutableArrayList<_> = [3, 1, 3].into_iter().collect();
        assert_eq!(list.as_slice(), &[3, 1, 3]);
        assert_eq!(list.index_of(&3), Some(0));
        assert!(!list.contains(&2));
    }

    #[rstest]
    fn test_range_visit_is_inclusive() {
        let mut visited = Vec::new();
        octuplet()
            .for_each_with_index_in_range(2, 4, |&element, index| visited.push((index, element)))
            .unwrap();
        assert_eq!(visited, vec![(2, 3), (3, 4), (4, 5)]);
    }

    #[rstest]
    fn test_group_by_each_keeps_repeated_keys() {
        let list = ImmutableArrayList::from_vec(vec![1, 2]);
        let groups = list.group_by_each(|&element| [0, element, 0]);
        assert_eq!(groups[&0].as_slice(), &[1, 1, 2, 2]);
        assert_eq!(groups[&2].as_slice(), &[2]);
    }

    #[rstest]
    fn test_clear_is_rejected() {
        let mut list = octuplet();
        assert_eq!(
            list.clear(),
            Err(CollectionError::ImmutableCollection { operation: "clear" })
        );
        assert_eq!(list.len(), 8);
    }
}
