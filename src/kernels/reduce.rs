//! Associative fold kernels
//!
//! Accumulation is strictly sequential inside every path and partials are
//! combined in chunk order, so unit, step, and generic paths fold the same
//! elements in the same order and stay bit-identical. The walk order is the
//! physical one the loop descriptor chose, not the logical order - the
//! offered reductions are all order-independent.

use crate::array::LoopSpec;
use crate::array::Storage;
use crate::dtype::Element;
use crate::ops::{combine, ReduceOp};

/// Unit path: fold a contiguous run
pub fn reduce_unit<T: Element>(op: ReduceOp, data: &[T]) -> T {
    debug_assert!(!data.is_empty());
    match op.identity::<T>() {
        Some(id) => data.iter().fold(id, |acc, &v| combine(op, acc, v)),
        None => data[1..].iter().fold(data[0], |acc, &v| combine(op, acc, v)),
    }
}

/// Step path: fold a constant-stride run
pub fn reduce_step<T: Element>(
    op: ReduceOp,
    storage: &Storage<T>,
    start: usize,
    bound: usize,
    step: isize,
) -> T {
    debug_assert!(bound > 0);
    let base = start as isize;
    let mut acc = match op.identity::<T>() {
        Some(id) => id,
        None => storage.get(start),
    };
    let skip_first = op.identity::<T>().is_none();
    let from = usize::from(skip_first);
    for k in from..bound {
        acc = combine(op, acc, storage.get((base + k as isize * step) as usize));
    }
    acc
}

/// Generic path: fold arbitrary positions one element at a time
pub fn reduce_generic<T: Element>(
    op: ReduceOp,
    storage: &Storage<T>,
    mut positions: impl Iterator<Item = usize>,
) -> Option<T> {
    let first = positions.next()?;
    let mut acc = match op.identity::<T>() {
        Some(id) => combine(op, id, storage.get(first)),
        None => storage.get(first),
    };
    for pos in positions {
        acc = combine(op, acc, storage.get(pos));
    }
    Some(acc)
}

/// Fold one chunk through the path its step selects
pub(crate) fn reduce_chunk<T: Element>(
    op: ReduceOp,
    storage: &Storage<T>,
    spec: &LoopSpec,
    chunk: usize,
) -> T {
    let start = spec.starts()[chunk];
    match spec.step() {
        1 => {
            let data = unsafe { storage.slice(start, spec.bound()) };
            reduce_unit(op, data)
        }
        0 => reduce_generic(op, storage, spec.chunk_positions(chunk))
            .expect("chunk bound is never zero"),
        step => reduce_step(op, storage, start, spec.bound(), step),
    }
}

/// Fold every chunk, combining partials in chunk order
///
/// Returns None for a zero-chunk (empty) iteration space.
pub(crate) fn reduce_chunks<T: Element>(
    op: ReduceOp,
    storage: &Storage<T>,
    spec: &LoopSpec,
) -> Option<T> {
    let mut acc: Option<T> = None;
    for chunk in 0..spec.chunk_count() {
        let partial = reduce_chunk(op, storage, spec, chunk);
        acc = Some(match acc {
            None => partial,
            Some(a) => combine(op, a, partial),
        });
    }
    acc
}
