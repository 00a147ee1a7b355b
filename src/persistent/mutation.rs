//! In-place mutation protocol.
//!
//! [`MutableCollection`] is the interface generic code uses to mutate a
//! collection in place. The immutable containers of this crate implement it
//! by always returning [`CollectionError::ImmutableCollection`], which keeps
//! the failure distinct from every other error kind; their own growth methods
//! (`new_with`, `new_without`, ...) return new instances instead.

use crate::error::CollectionError;

/// A collection that may support in-place mutation.
///
/// # Examples
///
/// ```rust
/// use sorted_batch::error::CollectionError;
/// use sorted_batch::persistent::{ImmutableSortedSet, MutableCollection};
///
/// fn add_all<C: MutableCollection<i32>>(target: &mut C) -> Result<(), CollectionError> {
///     for element in [1, 2, 3] {
///         target.add(element)?;
///     }
///     Ok(())
/// }
///
/// let mut growable = Vec::new();
/// assert_eq!(add_all(&mut growable), Ok(()));
/// assert_eq!(growable, vec![1, 2, 3]);
///
/// let mut frozen = ImmutableSortedSet::<i32>::new();
/// assert_eq!(
///     add_all(&mut frozen),
///     Err(CollectionError::ImmutableCollection { operation: "add" })
/// );
/// ```
pub trait MutableCollection<T> {
    /// Inserts `element`, returning whether the collection changed.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ImmutableCollection`] if the collection
    /// cannot be mutated in place.
    fn add(&mut self, element: T) -> Result<bool, CollectionError>;

    /// Removes one occurrence of `element`, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ImmutableCollection`] if the collection
    /// cannot be mutated in place.
    fn remove(&mut self, element: &T) -> Result<bool, CollectionError>;

    /// Removes every element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ImmutableCollection`] if the collection
    /// cannot be mutated in place.
    fn clear(&mut self) -> Result<(), CollectionError>;
}

impl<T: PartialEq> MutableCollection<T> for Vec<T> {
    fn add(&mut self, element: T) -> Result<bool, CollectionError> {
        self.push(element);
        Ok(true)
    }

    fn remove(&mut self, element: &T) -> Result<bool, CollectionError> {
        Ok(self
            .iter()
            .position(|candidate| candidate == element)
            .map(|index| Vec::remove(self, index))
            .is_some())
    }

    fn clear(&mut self) -> Result<(), CollectionError> {
        Vec::clear(self);
        Ok(())
    }
}
