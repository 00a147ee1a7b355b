//! Integration tests for parallel views over the immutable containers.
//!
//! Parallel results are compared against the equivalent sequential scan.
//! Tests never assume an order between batches.

#![cfg(feature = "parallel")]

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rstest::{fixture, rstest};
use sorted_batch::error::CollectionError;
use sorted_batch::parallel::{
    Batch, BatchSource, ParallelIterable, SequentialFallback, ThreadPool, ThreadPoolBuilder,
};
use sorted_batch::persistent::{ImmutableArrayList, ImmutableSortedSet};

#[fixture]
fn pool() -> ThreadPool {
    ThreadPoolBuilder::new().num_threads(4).build().unwrap()
}

#[fixture]
fn scenario() -> ImmutableSortedSet<i32> {
    ImmutableSortedSet::with_elements([3, 1, 4, 1, 5, 9, 2, 6])
}

// =============================================================================
// Configuration
// =============================================================================

#[rstest]
fn test_zero_batch_size_is_rejected(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let error = scenario.as_parallel(Some(&pool), 0).unwrap_err();
    assert_eq!(error, CollectionError::InvalidBatchSize { batch_size: 0 });
    assert!(error.is_invalid_configuration());
}

#[rstest]
fn test_absent_pool_is_rejected(scenario: ImmutableSortedSet<i32>) {
    let error = scenario.as_parallel(None, 3).unwrap_err();
    assert_eq!(error, CollectionError::MissingWorkerPool);
    assert!(error.is_invalid_configuration());
}

#[rstest]
fn test_absent_pool_is_reported_before_batch_size(scenario: ImmutableSortedSet<i32>) {
    assert_eq!(
        scenario.as_parallel(None, 0).unwrap_err(),
        CollectionError::MissingWorkerPool
    );
}

// =============================================================================
// Partitioning
// =============================================================================

#[rstest]
fn test_scenario_batches(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 3).unwrap();
    let batches: Vec<_> = view.split().collect();
    let ranges: Vec<_> = batches.iter().map(|batch| batch.range()).collect();
    assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    assert_eq!(batches[2].as_slice(), &[9]);
}

#[rstest]
fn test_partition_is_restartable(scenario: ImmutableSortedSet<i32>) {
    let partition = scenario.partition(2).unwrap();
    let first: Vec<_> = partition.restart().map(|batch| batch.range()).collect();
    let second: Vec<_> = partition.map(|batch| batch.range()).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![0..2, 2..4, 4..6, 6..7]);
}

#[rstest]
fn test_batch_visits_its_range_in_ascending_order(scenario: ImmutableSortedSet<i32>) {
    for batch in scenario.partition(3).unwrap() {
        let mut visited = Vec::new();
        batch.for_each(|&element| visited.push(element));
        assert!(visited.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(visited.len(), batch.len());
    }
}

// =============================================================================
// Aggregation
// =============================================================================

#[rstest]
fn test_scenario_any_and_all(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 3).unwrap();
    assert!(view.any_satisfy(|&&element| element > 8));
    assert!(view.all_satisfy(|&&element| element > 0));
    assert!(!view.all_satisfy(|&&element| element > 2));
    assert!(!view.any_satisfy(|&&element| element > 9));
}

#[rstest]
fn test_empty_container_is_vacuous(pool: ThreadPool) {
    let empty: ImmutableSortedSet<i32> = ImmutableSortedSet::new();
    let view = empty.as_parallel(Some(&pool), 4).unwrap();
    assert!(view.all_satisfy(|_| false));
    assert!(!view.any_satisfy(|_| true));
    assert_eq!(view.count(|_| true), 0);
    assert_eq!(view.detect(|_| true), None);
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
#[case(64)]
fn test_results_do_not_depend_on_batch_size(pool: ThreadPool, #[case] batch_size: usize) {
    let set: ImmutableSortedSet<i32> = (0..500).collect();
    let view = set.as_parallel(Some(&pool), batch_size).unwrap();

    assert_eq!(
        view.count(|&&element| element % 7 == 0),
        set.iter().filter(|&&element| element % 7 == 0).count()
    );
    assert!(view.any_satisfy(|&&element| element == 499));
    assert!(view.all_satisfy(|&&element| element < 500));
    assert!(!view.all_satisfy(|&&element| element != 250));
}

#[rstest]
fn test_for_each_visits_every_element_once(pool: ThreadPool) {
    let set: ImmutableSortedSet<u32> = (0..1000).collect();
    let view = set.as_parallel(Some(&pool), 37).unwrap();
    let visited = Mutex::new(Vec::new());

    view.for_each(|&element| visited.lock().push(element));

    let mut visited = visited.into_inner();
    visited.sort_unstable();
    assert_eq!(visited, set.to_vec());
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(64)]
#[case(100)]
fn test_parallel_for_each_keeps_batch_order(pool: ThreadPool, #[case] batch_size: usize) {
    let set: ImmutableSortedSet<usize> = (0..64).collect();
    let view = set.as_parallel(Some(&pool), batch_size).unwrap();
    let per_batch: Vec<Mutex<Vec<usize>>> = (0..set.len().div_ceil(batch_size))
        .map(|_| Mutex::new(Vec::new()))
        .collect();

    // Elements equal their index, so `element / batch_size` is the batch index.
    view.for_each(|&element| per_batch[element / batch_size].lock().push(element));

    for (index, visited) in per_batch.into_iter().enumerate() {
        let start = index * batch_size;
        let end = (start + batch_size).min(set.len());
        assert_eq!(visited.into_inner().as_slice(), &set.as_slice()[start..end]);
    }
}

#[rstest]
fn test_detect_returns_some_match(pool: ThreadPool) {
    let set: ImmutableSortedSet<i32> = (0..200).collect();
    let view = set.as_parallel(Some(&pool), 10).unwrap();

    // Several batches hold a match; any of them may report first.
    let found = view.detect(|&&element| element % 50 == 49).unwrap();
    assert!([49, 99, 149, 199].contains(found));
    assert_eq!(view.detect(|&&element| element > 1000), None);
}

#[rstest]
fn test_detect_with_single_batch_is_first_match(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 100).unwrap();
    assert_eq!(view.detect(|&&element| element > 3), Some(&4));
}

#[rstest]
fn test_try_for_each_reports_failure(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 2).unwrap();
    let result = view.try_for_each(|&element| {
        if element == 9 {
            Err(CollectionError::DuplicateKey)
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err(CollectionError::DuplicateKey));
}

#[rstest]
fn test_short_circuit_skips_work(pool: ThreadPool) {
    let set: ImmutableSortedSet<u32> = (0..10_000).collect();
    let view = set.as_parallel(Some(&pool), 1).unwrap();
    let inspected = AtomicUsize::new(0);

    assert!(view.any_satisfy(|&&element| {
        inspected.fetch_add(1, Ordering::Relaxed);
        element < 100
    }));
    assert!(inspected.load(Ordering::Relaxed) <= set.len());
}

#[rstest]
fn test_panic_in_predicate_reaches_caller(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 2).unwrap();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        view.for_each(|&element| assert!(element != 5, "rejected element"));
    }));
    assert!(outcome.is_err());

    // The pool is still usable afterwards.
    assert_eq!(view.count(|_| true), 7);
}

// =============================================================================
// Lazy adapters
// =============================================================================

#[rstest]
fn test_select_then_collect(pool: ThreadPool) {
    let set: ImmutableSortedSet<u64> = (1..=100).collect();
    let view = set.as_parallel(Some(&pool), 8).unwrap();
    let collected = Mutex::new(Vec::new());

    view.select(|&&element| element % 25 == 0)
        .collect(|&element| element.to_string())
        .for_each(|text| collected.lock().push(text));

    let mut collected = collected.into_inner();
    collected.sort();
    assert_eq!(collected, vec!["100", "25", "50", "75"]);
}

#[rstest]
fn test_selected_view_short_circuits(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 2).unwrap();
    let odd = view.select(|&&element| element % 2 == 1);
    assert!(odd.all_satisfy(|&&element| element % 2 == 1));
    assert_eq!(odd.count(|_| true), 4);
    assert_eq!(odd.batch_size(), 2);
}

// =============================================================================
// Custom ordering and other containers
// =============================================================================

#[rstest]
fn test_view_over_custom_ordering(pool: ThreadPool) {
    let descending = ImmutableSortedSet::with_comparator(
        |left: &i32, right: &i32| right.cmp(left),
        [3, 1, 4, 1, 5, 9, 2, 6],
    );
    let view = descending.as_parallel(Some(&pool), 3).unwrap();
    assert!(view.ordering_policy().comparator().is_some());
    let first_batch = view.split().next().unwrap();
    assert_eq!(first_batch.as_slice(), &[9, 6, 5]);
}

#[rstest]
fn test_view_over_array_list(pool: ThreadPool) {
    let list = ImmutableArrayList::from_vec(vec![2, 2, 3, 3, 3]);
    let view = list.as_parallel(Some(&pool), 2).unwrap();
    assert_eq!(view.count(|&&element| element == 3), 3);
    assert_eq!(view.group_by(|&element| element)[&3].len(), 3);
}

// =============================================================================
// Sequential fallbacks
// =============================================================================

#[rstest]
fn test_fallbacks_match_container_operations(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 2).unwrap();

    assert_eq!(SequentialFallback::to_vec(&view), scenario.to_vec());
    assert_eq!(
        view.group_by(|element| element % 2),
        scenario.group_by(|element| element % 2)
    );
    assert_eq!(
        view.group_by_each(|&element| [element % 2, element % 3]),
        scenario.group_by_each(|&element| [element % 2, element % 3])
    );
    assert_eq!(
        view.flat_collect(|&element| [element, -element]).len(),
        scenario.len() * 2
    );
    assert_eq!(
        view.group_by_unique_key(|element| element % 2),
        Err(CollectionError::DuplicateKey)
    );
}

#[rstest]
fn test_flat_collect_result_can_be_viewed_again(pool: ThreadPool, scenario: ImmutableSortedSet<i32>) {
    let view = scenario.as_parallel(Some(&pool), 3).unwrap();
    let flattened = view.flat_collect(|&element| [element, -element]);
    let rewrapped = flattened
        .as_parallel(Some(view.pool()), view.batch_size())
        .unwrap();

    assert_eq!(rewrapped.batch_size(), 3);
    assert_eq!(rewrapped.split().count(), flattened.len().div_ceil(3));
    assert_eq!(rewrapped.count(|&&element| element < 0), scenario.len());
}
