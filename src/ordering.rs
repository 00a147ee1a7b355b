//! Ordering policies for sorted containers.
//!
//! An [`OrderingPolicy`] is the single source of truth for ordering and
//! equality inside a sorted container. When a custom comparator is supplied,
//! it is used exclusively: the element's own `Eq`/`Ord` are never consulted
//! for membership, deduplication or iteration order.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use sorted_batch::ordering::OrderingPolicy;
//!
//! let natural = OrderingPolicy::<i32>::natural();
//! assert_eq!(natural.compare(&1, &2), Ordering::Less);
//! assert!(natural.comparator().is_none());
//!
//! let reversed = OrderingPolicy::by(|left: &i32, right: &i32| right.cmp(left));
//! assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A shared three-way comparison function.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

enum PolicyKind<T> {
    Natural(fn(&T, &T) -> Ordering),
    Custom(Comparator<T>),
}

/// A pluggable three-way comparison, fixed when a container is built.
pub struct OrderingPolicy<T> {
    kind: PolicyKind<T>,
}

impl<T> OrderingPolicy<T> {
    /// Uses the element type's intrinsic total order.
    #[inline]
    #[must_use]
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self {
            kind: PolicyKind::Natural(<T as Ord>::cmp),
        }
    }

    /// Uses `comparator` for every ordering and equality decision.
    #[must_use]
    pub fn by<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            kind: PolicyKind::Custom(Arc::new(comparator)),
        }
    }

    /// Wraps an already shared comparator.
    #[inline]
    #[must_use]
    pub const fn from_comparator(comparator: Comparator<T>) -> Self {
        Self {
            kind: PolicyKind::Custom(comparator),
        }
    }

    /// Compares two elements under this policy.
    #[inline]
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        match &self.kind {
            PolicyKind::Natural(compare) => compare(left, right),
            PolicyKind::Custom(comparator) => comparator(left, right),
        }
    }

    /// Returns `true` if the two elements are equal under this policy.
    #[inline]
    pub fn equivalent(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Equal
    }

    /// Returns the custom comparator, or `None` for natural ordering.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> Option<&Comparator<T>> {
        match &self.kind {
            PolicyKind::Natural(_) => None,
            PolicyKind::Custom(comparator) => Some(comparator),
        }
    }

    /// Returns `true` if this policy uses the intrinsic order of `T`.
    #[inline]
    #[must_use]
    pub const fn is_natural(&self) -> bool {
        matches!(self.kind, PolicyKind::Natural(_))
    }

    /// Returns `true` if both policies are known to order identically: both
    /// natural, or both sharing the same comparator allocation.
    ///
    /// Distinct comparators that happen to agree are not detected.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (PolicyKind::Natural(_), PolicyKind::Natural(_)) => true,
            (PolicyKind::Custom(left), PolicyKind::Custom(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Returns `true` if `slice` is strictly ascending under this policy.
    pub fn is_strictly_ascending(&self, slice: &[T]) -> bool {
        slice
            .windows(2)
            .all(|window| self.compare(&window[0], &window[1]) == Ordering::Less)
    }
}

impl<T> Clone for OrderingPolicy<T> {
    fn clone(&self) -> Self {
        Self {
            kind: match &self.kind {
                PolicyKind::Natural(compare) => PolicyKind::Natural(*compare),
                PolicyKind::Custom(comparator) => PolicyKind::Custom(Arc::clone(comparator)),
            },
        }
    }
}

impl<T: Ord> Default for OrderingPolicy<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> fmt::Debug for OrderingPolicy<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PolicyKind::Natural(_) => formatter.write_str("OrderingPolicy::Natural"),
            PolicyKind::Custom(_) => formatter.write_str("OrderingPolicy::Custom"),
        }
    }
}
