//! In-place map kernels: unary and scalar-parameterised rewrites
//!
//! Three execution paths, selected by the loop descriptor chunk's step:
//! unit (contiguous, lane-batched), step (constant stride, lane-batched
//! gather/scatter), and generic (one element at a time over arbitrary
//! positions). All paths rewrite through [`apply_map`], so they are
//! bit-identical for the same logical elements.

use crate::array::LoopSpec;
use crate::array::Storage;
use crate::dtype::Element;
use crate::ops::{apply_map, MapOp};

/// Unit path: contiguous run starting at `start`
///
/// The `simd_bound` prefix is processed in `lanes`-sized batches (a shape the
/// compiler vectorizes), the remainder one element at a time.
pub fn map_unit<T: Element>(
    op: MapOp<T>,
    storage: &Storage<T>,
    start: usize,
    bound: usize,
    simd_bound: usize,
    lanes: usize,
) {
    debug_assert!(simd_bound <= bound);
    let data = unsafe { storage.slice_mut(start, bound) };
    let (batched, tail) = data.split_at_mut(simd_bound);
    for batch in batched.chunks_exact_mut(lanes) {
        for x in batch.iter_mut() {
            *x = apply_map(op, *x);
        }
    }
    for x in tail.iter_mut() {
        *x = apply_map(op, *x);
    }
}

/// Step path: constant non-zero stride between elements
///
/// Gather/scatter structure: `simd_bound` elements in `lanes`-sized index
/// batches, the remainder one at a time.
pub fn map_step<T: Element>(
    op: MapOp<T>,
    storage: &Storage<T>,
    start: usize,
    bound: usize,
    step: isize,
    simd_bound: usize,
    lanes: usize,
) {
    debug_assert_ne!(step, 0);
    let base = start as isize;
    let mut i = 0;
    while i < simd_bound {
        for l in 0..lanes {
            let pos = (base + (i + l) as isize * step) as usize;
            storage.set(pos, apply_map(op, storage.get(pos)));
        }
        i += lanes;
    }
    for k in simd_bound..bound {
        let pos = (base + k as isize * step) as usize;
        storage.set(pos, apply_map(op, storage.get(pos)));
    }
}

/// Generic path: arbitrary positions, always one element at a time
///
/// Also the path for aliased (step-0) runs: a position appearing n times is
/// rewritten n times, which is the defined write-through-broadcast behavior.
pub fn map_generic<T: Element>(
    op: MapOp<T>,
    storage: &Storage<T>,
    positions: impl Iterator<Item = usize>,
) {
    for pos in positions {
        storage.set(pos, apply_map(op, storage.get(pos)));
    }
}

/// Run one chunk of a loop spec through the path its step selects
pub(crate) fn map_chunk<T: Element>(
    op: MapOp<T>,
    storage: &Storage<T>,
    spec: &LoopSpec,
    chunk: usize,
) {
    let start = spec.starts()[chunk];
    match spec.step() {
        1 => map_unit(
            op,
            storage,
            start,
            spec.bound(),
            spec.simd_bound(),
            spec.simd_step(),
        ),
        0 => map_generic(op, storage, spec.chunk_positions(chunk)),
        step => map_step(
            op,
            storage,
            start,
            spec.bound(),
            step,
            spec.simd_bound(),
            spec.simd_step(),
        ),
    }
}

/// Run every chunk of a loop spec on the calling thread
pub(crate) fn map_chunks<T: Element>(op: MapOp<T>, storage: &Storage<T>, spec: &LoopSpec) {
    for chunk in 0..spec.chunk_count() {
        map_chunk(op, storage, spec, chunk);
    }
}
