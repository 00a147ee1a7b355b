//! Immutable array-backed containers.
//!
//! - [`ImmutableSortedSet`]: unique elements in ascending order under an
//!   [`OrderingPolicy`](crate::ordering::OrderingPolicy)
//! - [`ImmutableArrayList`]: positional sequence, duplicates allowed
//!
//! Both share their backing array between clones and never change after
//! construction. Operations that would mutate return a new container;
//! the in-place [`MutableCollection`] methods fail with
//! [`CollectionError::ImmutableCollection`](crate::error::CollectionError::ImmutableCollection).
//!
//! # Thread Safety
//!
//! With `T: Send + Sync` both containers are `Send + Sync` and can be read
//! from any number of threads, which is what the parallel views rely on.
//!
//! # Examples
//!
//! ```rust
//! use sorted_batch::persistent::ImmutableSortedSet;
//!
//! let set = ImmutableSortedSet::with_elements([5, 3, 8]);
//! let more = set.new_with(4);
//!
//! assert_eq!(set.as_slice(), &[3, 5, 8]);     // Original unchanged
//! assert_eq!(more.as_slice(), &[3, 4, 5, 8]); // New version
//! ```

mod array_list;
mod mutation;
mod sorted_set;

pub use array_list::ImmutableArrayList;
pub use mutation::MutableCollection;
pub use sorted_set::ImmutableSortedSet;

static_assertions::assert_impl_all!(ImmutableSortedSet<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(ImmutableArrayList<i32>: Send, Sync, Clone);
