//! Combining per-batch results on a worker pool.
//!
//! Each function here walks a view's partition on the calling thread, spawns
//! one job per batch into the view's pool and blocks until the scope ends.
//! Jobs only read the backing store, so no locking is needed around it; the
//! only shared state is the small result slot each operation owns.
//!
//! Short-circuiting operations race their batches: once one batch produces a
//! decisive answer, batches not yet dispatched are skipped and batches not yet
//! started return immediately. Batches already scanning run to completion.
//! Whatever the interleaving, the returned value equals what a sequential scan
//! of the whole container would produce (except [`detect`], see there).
//!
//! A panic inside a predicate or action is re-raised on the calling thread
//! once the scope has finished.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as MemoryOrdering};

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::batch::Batch;
use super::iterable::ParallelIterable;

/// Runs `action` on every element, one pool job per batch.
///
/// Within a batch elements are visited in ascending index order; batches may
/// run in any order relative to each other.
pub fn for_each<'a, V, F>(view: &V, action: F)
where
    V: ParallelIterable<'a> + ?Sized,
    F: Fn(V::Item) + Sync,
{
    debug!(
        operation = "for_each",
        batch_size = view.batch_size(),
        "dispatching batches"
    );
    let action = &action;
    view.pool().in_place_scope(|scope| {
        for (index, batch) in view.split().enumerate() {
            trace!(operation = "for_each", batch = index, "submitting batch");
            scope.spawn(move |_| batch.for_each(action));
        }
    });
}

/// Runs a fallible `action` on every element and returns the first error
/// recorded by any batch.
///
/// "First" means first to be recorded, not lowest index. After an error is
/// recorded, pending batches are skipped.
///
/// # Errors
///
/// Returns the error produced by `action`, if any.
pub fn try_for_each<'a, V, F, E>(view: &V, action: F) -> Result<(), E>
where
    V: ParallelIterable<'a> + ?Sized,
    F: Fn(V::Item) -> Result<(), E> + Sync,
    E: Send,
{
    let failure: Mutex<Option<E>> = Mutex::new(None);
    race(view, "try_for_each", |batch| {
        match batch.try_for_each(|item| match action(item) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => ControlFlow::Break(error),
        }) {
            ControlFlow::Break(error) => {
                let mut slot = failure.lock();
                if slot.is_none() {
                    *slot = Some(error);
                }
                true
            }
            ControlFlow::Continue(()) => false,
        }
    });
    failure.into_inner().map_or(Ok(()), Err)
}

/// Counts matching elements by summing per-batch counts.
pub fn count<'a, V, P>(view: &V, predicate: P) -> usize
where
    V: ParallelIterable<'a> + ?Sized,
    P: Fn(&V::Item) -> bool + Sync,
{
    debug!(
        operation = "count",
        batch_size = view.batch_size(),
        "dispatching batches"
    );
    let total = AtomicUsize::new(0);
    let (total_ref, predicate) = (&total, &predicate);
    view.pool().in_place_scope(|scope| {
        for (index, batch) in view.split().enumerate() {
            trace!(operation = "count", batch = index, "submitting batch");
            scope.spawn(move |_| {
                total_ref.fetch_add(batch.count(predicate), MemoryOrdering::Relaxed);
            });
        }
    });
    total.into_inner()
}

/// Returns `true` if any element satisfies `predicate`.
pub fn any_satisfy<'a, V, P>(view: &V, predicate: P) -> bool
where
    V: ParallelIterable<'a> + ?Sized,
    P: Fn(&V::Item) -> bool + Sync,
{
    race(view, "any_satisfy", |batch| batch.any_satisfy(&predicate))
}

/// Returns `true` if every element satisfies `predicate`.
pub fn all_satisfy<'a, V, P>(view: &V, predicate: P) -> bool
where
    V: ParallelIterable<'a> + ?Sized,
    P: Fn(&V::Item) -> bool + Sync,
{
    !race(view, "all_satisfy", |batch| !batch.all_satisfy(&predicate))
}

/// Returns some element satisfying `predicate`, or `None` if there is none.
///
/// Batches finish in scheduler order, so when several elements match, the
/// returned one is not necessarily the lowest-index match. It is always the
/// first match of the batch that reported first.
pub fn detect<'a, V, P>(view: &V, predicate: P) -> Option<V::Item>
where
    V: ParallelIterable<'a> + ?Sized,
    P: Fn(&V::Item) -> bool + Sync,
{
    let found: Mutex<Option<V::Item>> = Mutex::new(None);
    race(view, "detect", |batch| match batch.detect(&predicate) {
        Some(item) => {
            let mut slot = found.lock();
            if slot.is_none() {
                *slot = Some(item);
            }
            true
        }
        None => false,
    });
    found.into_inner()
}

/// Dispatches every batch to `decisive` until one of them returns `true`.
///
/// Returns whether any batch was decisive.
fn race<'a, V, F>(view: &V, operation: &'static str, decisive: F) -> bool
where
    V: ParallelIterable<'a> + ?Sized,
    F: Fn(V::Batch) -> bool + Sync,
{
    debug!(
        operation,
        batch_size = view.batch_size(),
        "dispatching batches"
    );
    let decided = AtomicBool::new(false);
    let (decided_ref, decisive) = (&decided, &decisive);
    view.pool().in_place_scope(|scope| {
        for (index, batch) in view.split().enumerate() {
            if decided_ref.load(MemoryOrdering::Acquire) {
                trace!(operation, batch = index, "decided, skipping remaining batches");
                break;
            }
            trace!(operation, batch = index, "submitting batch");
            scope.spawn(move |_| {
                if decided_ref.load(MemoryOrdering::Acquire) {
                    return;
                }
                if decisive(batch) {
                    decided_ref.store(true, MemoryOrdering::Release);
                }
            });
        }
    });
    let decided = decided.into_inner();
    if decided {
        debug!(operation, "short-circuited on a decisive batch");
    }
    decided
}
