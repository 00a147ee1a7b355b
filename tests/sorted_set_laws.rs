#![cfg(feature = "persistent")]
//! Property-based tests for ImmutableSortedSet.
//!
//! These tests check the set invariants against `BTreeSet` as a model.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use proptest::prelude::*;
use sorted_batch::persistent::ImmutableSortedSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

fn arbitrary_elements(max_size: usize) -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-50..50_i32, 0..max_size)
}

// =============================================================================
// Construction Laws
// =============================================================================

proptest! {
    /// Law: iteration is strictly ascending and matches the model.
    #[test]
    fn prop_iteration_matches_model(elements in arbitrary_elements(64)) {
        let set: ImmutableSortedSet<i32> = elements.iter().copied().collect();
        let model: BTreeSet<i32> = elements.into_iter().collect();
        prop_assert!(set.iter().zip(set.iter().skip(1)).all(|(left, right)| left < right));
        prop_assert_eq!(set.to_vec(), model.into_iter().collect::<Vec<_>>());
    }

    /// Law: contains and index_of agree on presence.
    #[test]
    fn prop_contains_agrees_with_index_of(elements in arbitrary_elements(64), probe in -60..60_i32) {
        let set: ImmutableSortedSet<i32> = elements.into_iter().collect();
        prop_assert_eq!(set.contains(&probe), set.index_of(&probe).is_some());
        if let Some(index) = set.index_of(&probe) {
            prop_assert_eq!(set.get(index), Ok(&probe));
        }
    }

    /// Law: a custom comparator alone decides order.
    #[test]
    fn prop_reversed_comparator_reverses_iteration(elements in arbitrary_elements(64)) {
        let natural: ImmutableSortedSet<i32> = elements.iter().copied().collect();
        let reversed = ImmutableSortedSet::with_comparator(
            |left: &i32, right: &i32| right.cmp(left),
            elements,
        );
        let mut expected = natural.to_vec();
        expected.reverse();
        prop_assert_eq!(reversed.to_vec(), expected);
    }
}

// =============================================================================
// Growth Laws
// =============================================================================

proptest! {
    /// Law: new_with then contains.
    #[test]
    fn prop_new_with_contains(elements in arbitrary_elements(32), element in -60..60_i32) {
        let set: ImmutableSortedSet<i32> = elements.into_iter().collect();
        let grown = set.new_with(element);
        prop_assert!(grown.contains(&element));
        prop_assert_eq!(grown.len(), set.len() + usize::from(!set.contains(&element)));
    }

    /// Law: new_without then not contains, and new_without(new_with(x)) == self
    /// when x was absent.
    #[test]
    fn prop_new_without_inverts_new_with(elements in arbitrary_elements(32), element in -60..60_i32) {
        let set: ImmutableSortedSet<i32> = elements.into_iter().collect();
        prop_assert!(!set.new_without(&element).contains(&element));
        if !set.contains(&element) {
            prop_assert_eq!(set.new_with(element).new_without(&element), set);
        }
    }
}

// =============================================================================
// Algebra Laws
// =============================================================================

proptest! {
    /// Law: union, intersection and difference match the model.
    #[test]
    fn prop_set_algebra_matches_model(
        left in arbitrary_elements(32),
        right in arbitrary_elements(32)
    ) {
        let left_set: ImmutableSortedSet<i32> = left.iter().copied().collect();
        let right_set: ImmutableSortedSet<i32> = right.iter().copied().collect();
        let left_model: BTreeSet<i32> = left.into_iter().collect();
        let right_model: BTreeSet<i32> = right.into_iter().collect();

        prop_assert_eq!(
            left_set.union(&right_set).to_vec(),
            left_model.union(&right_model).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            left_set.intersection(&right_set).to_vec(),
            left_model.intersection(&right_model).copied().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            left_set.difference(&right_set).to_vec(),
            left_model.difference(&right_model).copied().collect::<Vec<_>>()
        );
    }
}

// =============================================================================
// Comparison Laws
// =============================================================================

proptest! {
    /// Law: compare_to is the lexicographic order of the element sequences.
    #[test]
    fn prop_compare_to_is_lexicographic(
        left in arbitrary_elements(8),
        right in arbitrary_elements(8)
    ) {
        let left_set: ImmutableSortedSet<i32> = left.into_iter().collect();
        let right_set: ImmutableSortedSet<i32> = right.into_iter().collect();
        let expected = left_set.to_vec().cmp(&right_set.to_vec());
        prop_assert_eq!(left_set.compare_to(&right_set), expected);
    }

    /// Law: compare_to is antisymmetric.
    #[test]
    fn prop_compare_to_is_antisymmetric(
        left in arbitrary_elements(8),
        right in arbitrary_elements(8)
    ) {
        let left_set: ImmutableSortedSet<i32> = left.into_iter().collect();
        let right_set: ImmutableSortedSet<i32> = right.into_iter().collect();
        prop_assert_eq!(
            left_set.compare_to(&right_set),
            right_set.compare_to(&left_set).reverse()
        );
    }

    /// Law: equality agrees with compare_to returning Equal.
    #[test]
    fn prop_equality_agrees_with_compare_to(
        left in arbitrary_elements(8),
        right in arbitrary_elements(8)
    ) {
        let left_set: ImmutableSortedSet<i32> = left.into_iter().collect();
        let right_set: ImmutableSortedSet<i32> = right.into_iter().collect();
        prop_assert_eq!(
            left_set == right_set,
            left_set.compare_to(&right_set) == Ordering::Equal
        );
    }
}
