//! Immutable sorted set backed by a shared sorted array.
//!
//! This module provides [`ImmutableSortedSet`], a set whose elements are
//! stored once, deduplicated and in ascending order under an
//! [`OrderingPolicy`], in an `Arc<[T]>` that is never mutated after
//! construction.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | `with_elements`    | O(n log n) |
//! | `from_sorted`      | O(n)       |
//! | `len` / `is_empty` | O(1)       |
//! | `contains`         | O(log n)   |
//! | `index_of`         | O(n)       |
//! | `first` / `last`   | O(1)       |
//! | `get`              | O(1)       |
//! | `compare_to`       | O(min(n, m)) |
//! | `new_with`         | O(n)       |
//! | `union` / `intersection` / `difference` | O(n + m) |
//!
//! `index_of` deliberately scans linearly. `contains` being O(log n) says
//! nothing about `index_of`.
//!
//! # Examples
//!
//! ```rust
//! use sorted_batch::persistent::ImmutableSortedSet;
//!
//! let set = ImmutableSortedSet::with_elements([3, 1, 4, 1, 5, 9, 2, 6]);
//!
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 9]);
//! assert!(set.contains(&5));
//! assert!(!set.contains(&7));
//! assert_eq!(set.index_of(&9), Some(6));
//! assert_eq!(set.first(), Ok(&1));
//! assert_eq!(set.last(), Ok(&9));
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::array_list::ImmutableArrayList;
use super::mutation::MutableCollection;
use crate::error::{CollectionError, check_inclusive_range};
use crate::ordering::OrderingPolicy;

/// An immutable set of unique elements kept in ascending order.
///
/// Equality, ordering and membership are decided exclusively by the set's
/// [`OrderingPolicy`]. Two values that are `==` but compare as non-equal under
/// a custom comparator are distinct elements, and vice versa.
///
/// Cloning is O(1): clones share the backing array.
///
/// # Examples
///
/// ```rust
/// use sorted_batch::persistent::ImmutableSortedSet;
///
/// let descending = ImmutableSortedSet::with_comparator(
///     |left: &i32, right: &i32| right.cmp(left),
///     [1, 3, 2, 3],
/// );
/// assert_eq!(descending.as_slice(), &[3, 2, 1]);
/// ```
pub struct ImmutableSortedSet<T> {
    elements: Arc<[T]>,
    policy: OrderingPolicy<T>,
}

impl<T: Ord> ImmutableSortedSet<T> {
    /// Creates an empty set using the natural ordering of `T`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_sorted(OrderingPolicy::natural(), Vec::new())
    }

    /// Builds a set from arbitrary elements in natural order.
    ///
    /// Duplicates are dropped; the first occurrence in input order is kept.
    #[must_use]
    pub fn with_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_policy(OrderingPolicy::natural(), elements)
    }

    /// Copies an existing natural-order sorted set.
    #[must_use]
    pub fn from_btree_set(set: &BTreeSet<T>) -> Self
    where
        T: Clone,
    {
        Self::from_sorted(OrderingPolicy::natural(), set.iter().cloned())
    }
}

impl<T> ImmutableSortedSet<T> {
    /// Builds a set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let by_length = ImmutableSortedSet::with_comparator(
    ///     |left: &String, right: &String| left.len().cmp(&right.len()),
    ///     ["ccc", "a", "bb", "dd"].map(String::from),
    /// );
    /// // "dd" has the same length as "bb" and is therefore a duplicate.
    /// assert_eq!(by_length.as_slice(), &["a", "bb", "ccc"].map(String::from));
    /// ```
    #[must_use]
    pub fn with_comparator<F, I>(comparator: F, elements: I) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Self::with_policy(OrderingPolicy::by(comparator), elements)
    }

    /// Builds a set from arbitrary elements ordered by `policy`.
    ///
    /// Sorting is stable, so among elements equal under the policy the first
    /// one in input order is the one kept.
    #[must_use]
    pub fn with_policy<I>(policy: OrderingPolicy<T>, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut elements: Vec<T> = elements.into_iter().collect();
        elements.sort_by(|left, right| policy.compare(left, right));
        elements.dedup_by(|current, kept| policy.equivalent(kept, current));
        Self {
            elements: Arc::from(elements),
            policy,
        }
    }

    /// Builds a set from elements already strictly ascending under `policy`.
    ///
    /// The input is trusted, not re-sorted. In debug builds the precondition
    /// is checked with `debug_assert!`; in release builds a violation yields a
    /// set whose lookups are wrong (a logic error, not memory unsafety).
    #[must_use]
    pub fn from_sorted<I>(policy: OrderingPolicy<T>, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let elements: Vec<T> = elements.into_iter().collect();
        debug_assert!(
            policy.is_strictly_ascending(&elements),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self {
            elements: Arc::from(elements),
            policy,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The ordering policy fixed at construction.
    #[inline]
    #[must_use]
    pub const fn ordering_policy(&self) -> &OrderingPolicy<T> {
        &self.policy
    }

    /// The elements in ascending order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over the elements in ascending order.
    ///
    /// Every call restarts from the smallest element.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Returns `true` if an element equal to `element` under the ordering
    /// policy is present. Binary search, O(log n).
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.search(element).is_ok()
    }

    /// Returns the position of `element` by linear scan, O(n).
    ///
    /// Equality is decided by the ordering policy, so this always agrees with
    /// [`contains`](Self::contains) on presence.
    #[must_use]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements
            .iter()
            .position(|candidate| self.policy.equivalent(candidate, element))
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

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the set is empty.
    pub fn first(&self) -> Result<&T, CollectionError> {
        self.elements.first().ok_or(CollectionError::EmptyCollection)
    }

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyCollection`] if the set is empty.
    pub fn last(&self) -> Result<&T, CollectionError> {
        self.elements.last().ok_or(CollectionError::EmptyCollection)
    }

    /// Lexicographically compares this set against another ordered sequence
    /// using this set's ordering policy.
    ///
    /// The first differing position decides; otherwise the longer sequence is
    /// greater.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let set = ImmutableSortedSet::with_elements([1, 2, 3]);
    /// assert_eq!(set.compare_to(&[1, 2, 3]), Ordering::Equal);
    /// assert_eq!(set.compare_to(&[1, 2]), Ordering::Greater);
    /// assert_eq!(set.compare_to(&[1, 5]), Ordering::Less);
    /// ```
    pub fn compare_to<'b, I>(&self, other: I) -> Ordering
    where
        I: IntoIterator<Item = &'b T>,
        T: 'b,
    {
        let mut other = other.into_iter();
        for element in self.elements.iter() {
            let Some(other_element) = other.next() else {
                return Ordering::Greater;
            };
            match self.policy.compare(element, other_element) {
                Ordering::Equal => {}
                decided => return decided,
            }
        }
        if other.next().is_some() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Visits the elements at indices `from..=to` in ascending order.
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
        for (index, element) in self.elements[from..=to].iter().enumerate() {
            action(element, from + index);
        }
        Ok(())
    }

    fn search(&self, element: &T) -> Result<usize, usize> {
        self.elements
            .binary_search_by(|probe| self.policy.compare(probe, element))
    }

    fn with_sorted_vec(&self, elements: Vec<T>) -> Self {
        Self::from_sorted(self.policy.clone(), elements)
    }
}

impl<T: Clone> ImmutableSortedSet<T> {
    /// Returns a new set that also contains `element`; `self` is untouched.
    ///
    /// If an equal element is already present, the result shares this set's
    /// backing array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let set = ImmutableSortedSet::with_elements([1, 3]);
    /// let grown = set.new_with(2);
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(grown.as_slice(), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn new_with(&self, element: T) -> Self {
        match self.search(&element) {
            Ok(_) => self.clone(),
            Err(position) => {
                let mut elements = Vec::with_capacity(self.len() + 1);
                elements.extend_from_slice(&self.elements[..position]);
                elements.push(element);
                elements.extend_from_slice(&self.elements[position..]);
                self.with_sorted_vec(elements)
            }
        }
    }

    /// Returns a new set that also contains every element of `elements`.
    #[must_use]
    pub fn new_with_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let additions = Self::with_policy(self.policy.clone(), elements);
        self.union(&additions)
    }

    /// Returns a new set without `element`; `self` is untouched.
    #[must_use]
    pub fn new_without(&self, element: &T) -> Self {
        match self.search(element) {
            Err(_) => self.clone(),
            Ok(position) => {
                let mut elements = Vec::with_capacity(self.len() - 1);
                elements.extend_from_slice(&self.elements[..position]);
                elements.extend_from_slice(&self.elements[position + 1..]);
                self.with_sorted_vec(elements)
            }
        }
    }

    /// Returns the union of both sets, ordered by this set's policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let left = ImmutableSortedSet::with_elements([1, 3, 5]);
    /// let right = ImmutableSortedSet::with_elements([2, 3, 4]);
    /// assert_eq!(left.union(&right).as_slice(), &[1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        let right = self.aligned(other);
        self.with_sorted_vec(merge_slices(&self.policy, &self.elements, &right))
    }

    /// Returns the elements of this set that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        let right = self.aligned(other);
        self.with_sorted_vec(difference_slices(&self.policy, &self.elements, &right))
    }

    /// Returns the elements present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.with_sorted_vec(Vec::new());
        }
        let right = self.aligned(other);
        self.with_sorted_vec(intersection_slices(&self.policy, &self.elements, &right))
    }

    /// Copies the elements into a `Vec` in ascending order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.to_vec()
    }

    /// Groups elements by key. Each group keeps this set's ordering policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sorted_batch::persistent::ImmutableSortedSet;
    ///
    /// let set = ImmutableSortedSet::with_elements(1..=6);
    /// let by_parity = set.group_by(|element| element % 2);
    /// assert_eq!(by_parity[&0].as_slice(), &[2, 4, 6]);
    /// assert_eq!(by_parity[&1].as_slice(), &[1, 3, 5]);
    /// ```
    pub fn group_by<K, F>(&self, mut function: F) -> BTreeMap<K, Self>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for element in self.elements.iter() {
            groups.entry(function(element)).or_default().push(element.clone());
        }
        self.into_groups(groups)
    }

    /// Groups every element under each key `function` returns for it.
    pub fn group_by_each<K, I, F>(&self, mut function: F) -> BTreeMap<K, Self>
    where
        K: Ord,
        I: IntoIterator<Item = K>,
        F: FnMut(&T) -> I,
    {
        let mut groups: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for element in self.elements.iter() {
            for key in function(element) {
                let group = groups.entry(key).or_default();
                // Elements arrive in ascending order, so a repeated key for
                // the same element can only collide with the last push.
                if group
                    .last()
                    .is_none_or(|last| !self.policy.equivalent(last, element))
                {
                    group.push(element.clone());
                }
            }
        }
        self.into_groups(groups)
    }

    /// Indexes elements by a key that must be unique across the set.
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

    /// Returns `other`'s elements ordered by this set's policy, borrowing them
    /// when both sets already share a policy.
    fn aligned<'s>(&self, other: &'s Self) -> Cow<'s, [T]> {
        if self.policy.same_as(&other.policy) {
            Cow::Borrowed(other.as_slice())
        } else {
            Cow::Owned(Self::with_policy(self.policy.clone(), other.iter().cloned()).to_vec())
        }
    }

    fn into_groups<K: Ord>(&self, groups: BTreeMap<K, Vec<T>>) -> BTreeMap<K, Self> {
        groups
            .into_iter()
            .map(|(key, elements)| (key, self.with_sorted_vec(elements)))
            .collect()
    }
}

impl<T> ImmutableSortedSet<T> {
    /// Maps every element to an iterable and concatenates the results in
    /// ascending element order.
    pub fn flat_collect<'s, V, I, F>(&'s self, function: F) -> ImmutableArrayList<V>
    where
        F: FnMut(&'s T) -> I,
        I: IntoIterator<Item = V>,
    {
        self.elements.iter().flat_map(function).collect()
    }
}

impl<T: Ord> Default for ImmutableSortedSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ImmutableSortedSet<T> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
            policy: self.policy.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableSortedSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for ImmutableSortedSet<T> {
    /// Same size, and every element of each set is contained in the other
    /// under the containing set's ordering policy.
    ///
    /// A natural-ordering set never equals a set with a custom comparator, so
    /// that equal sets always hash equally.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.policy.is_natural() != other.policy.is_natural() {
            return false;
        }
        other.iter().all(|element| self.contains(element))
            && (self.policy.same_as(&other.policy)
                || self.iter().all(|element| other.contains(element)))
    }
}

impl<T> Eq for ImmutableSortedSet<T> {}

impl<T> PartialOrd for ImmutableSortedSet<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare_to(other.iter()))
    }
}

impl<T: Hash> Hash for ImmutableSortedSet<T> {
    /// Hashes the wrapping sum of the element hashes, so the result does not
    /// depend on iteration order.
    ///
    /// A custom comparator may equate elements whose own hashes differ, so
    /// sets with one hash only their size.
    fn hash<H: Hasher>(&self, state: &mut H) {
        if !self.policy.is_natural() {
            state.write_usize(self.len());
            return;
        }
        let sum = self
            .elements
            .iter()
            .map(|element| {
                let mut hasher = FxHasher::default();
                element.hash(&mut hasher);
                hasher.finish()
            })
            .fold(0_u64, u64::wrapping_add);
        state.write_u64(sum);
    }
}

impl<'a, T> IntoIterator for &'a ImmutableSortedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> FromIterator<T> for ImmutableSortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::with_elements(iter)
    }
}

impl<T> MutableCollection<T> for ImmutableSortedSet<T> {
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

    use super::ImmutableSortedSet;
    use crate::error::CollectionError;
    use crate::parallel::{BatchSource, ParallelView, SliceBatch};

    impl<'a, T: 'a> BatchSource<'a> for ImmutableSortedSet<T> {
        type Batch = SliceBatch<'a, T>;

        #[inline]
        fn len(&self) -> usize {
            self.elements.len()
        }

        #[inline]
        fn batch(&'a self, start: usize, end: usize) -> Self::Batch {
            SliceBatch::new(self.as_slice(), start, end)
        }
    }

    impl<T> ImmutableSortedSet<T> {
        /// Returns a parallel view that splits this set into batches of
        /// `batch_size` elements and runs them on `pool`.
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

// =============================================================================
// Sorted slice algebra
// =============================================================================

/// Merges two slices sorted under `policy` into a sorted, deduplicated `Vec`.
///
/// When the ranges do not overlap the comparison loop is skipped and the
/// slices are concatenated.
fn merge_slices<T: Clone>(policy: &OrderingPolicy<T>, left: &[T], right: &[T]) -> Vec<T> {
    let (Some(left_first), Some(left_last)) = (left.first(), left.last()) else {
        return right.to_vec();
    };
    let (Some(right_first), Some(right_last)) = (right.first(), right.last()) else {
        return left.to_vec();
    };

    let mut result = Vec::with_capacity(left.len() + right.len());
    if policy.compare(left_last, right_first) == Ordering::Less {
        result.extend_from_slice(left);
        result.extend_from_slice(right);
        return result;
    }
    if policy.compare(right_last, left_first) == Ordering::Less {
        result.extend_from_slice(right);
        result.extend_from_slice(left);
        return result;
    }

    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match policy.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => {
                result.push(right[right_index].clone());
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result.extend_from_slice(&left[left_index..]);
    result.extend_from_slice(&right[right_index..]);
    result
}

/// Elements of `left` absent from `right`; both sorted under `policy`.
fn difference_slices<T: Clone>(policy: &OrderingPolicy<T>, left: &[T], right: &[T]) -> Vec<T> {
    if disjoint(policy, left, right) {
        return left.to_vec();
    }

    let mut result = Vec::with_capacity(left.len());
    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match policy.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result.extend_from_slice(&left[left_index..]);
    result
}

/// Elements present in both `left` and `right`; both sorted under `policy`.
fn intersection_slices<T: Clone>(policy: &OrderingPolicy<T>, left: &[T], right: &[T]) -> Vec<T> {
    if disjoint(policy, left, right) {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;
    while left_index < left.len() && right_index < right.len() {
        match policy.compare(&left[left_index], &right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }
    result
}

/// `true` if either slice is empty or their value ranges do not overlap.
fn disjoint<T>(policy: &OrderingPolicy<T>, left: &[T], right: &[T]) -> bool {
    match (left.first(), left.last(), right.first(), right.last()) {
        (Some(left_first), Some(left_last), Some(right_first), Some(right_last)) => {
            policy.compare(left_last, right_first) == Ordering::Less
                || policy.compare(right_last, left_first) == Ordering::Less
        }
        _ => true,
    }
}

const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "from_sorted requires strictly increasing elements under the ordering policy";
