//! Parallel chunk fan-out
//!
//! The parallel execution mode partitions a loop descriptor's chunks across
//! the rayon worker pool: one task per chunk, all tasks joined before the
//! call returns, first error propagated and sibling results discarded
//! (all-or-nothing join). Chunks write disjoint output regions, so no
//! locking is needed; correctness never depends on which chunk finishes
//! first.
//!
//! In-place parallel operators offer no partial-mutation guarantee beyond
//! "some prefix of chunks may have been applied" if a task fails - callers
//! needing atomicity must operate on a freshly copied storage. There is no
//! cancellation: in-flight chunks run to completion.

use crate::array::{LoopSpec, Storage};
use crate::dtype::Element;
use crate::error::Result;
use crate::kernels::{binary, reduce, unary};
use crate::ops::{BinaryOp, MapOp, ReduceOp};
use rayon::prelude::*;

/// Fan `count` chunk tasks out over the pool and join them all
///
/// The first task error is observed by the calling thread; results of
/// pending siblings are discarded.
pub(crate) fn join_chunks<F>(count: usize, task: F) -> Result<()>
where
    F: Fn(usize) -> Result<()> + Send + Sync,
{
    (0..count).into_par_iter().with_min_len(1).try_for_each(task)
}

/// Parallel in-place map over a loop spec's chunks
pub(crate) fn par_map_chunks<T: Element>(
    op: MapOp<T>,
    storage: &Storage<T>,
    spec: &LoopSpec,
) -> Result<()> {
    join_chunks(spec.chunk_count(), |chunk| {
        unary::map_chunk(op, storage, spec, chunk);
        Ok(())
    })
}

/// Parallel pairwise combine over corresponding chunk triples
#[allow(clippy::too_many_arguments)]
pub(crate) fn par_combine_chunks<T: Element>(
    op: BinaryOp,
    a: &Storage<T>,
    a_spec: &LoopSpec,
    b: &Storage<T>,
    b_spec: &LoopSpec,
    out: &Storage<T>,
    out_spec: &LoopSpec,
) -> Result<()> {
    join_chunks(out_spec.chunk_count(), |chunk| {
        binary::combine_chunk(op, a, a_spec, b, b_spec, out, out_spec, chunk);
        Ok(())
    })
}

/// Parallel in-place accumulation over corresponding chunk pairs
pub(crate) fn par_accumulate_chunks<T: Element>(
    op: BinaryOp,
    out: &Storage<T>,
    out_spec: &LoopSpec,
    src: &Storage<T>,
    src_spec: &LoopSpec,
) -> Result<()> {
    join_chunks(out_spec.chunk_count(), |chunk| {
        binary::accumulate_chunk(op, out, out_spec, src, src_spec, chunk);
        Ok(())
    })
}

/// Parallel reduction: per-chunk partials computed concurrently, then
/// combined associatively in chunk order on the calling thread
///
/// The fold order therefore matches the serial path exactly.
pub(crate) fn par_reduce_chunks<T: Element>(
    op: ReduceOp,
    storage: &Storage<T>,
    spec: &LoopSpec,
) -> Option<T> {
    let partials: Vec<T> = (0..spec.chunk_count())
        .into_par_iter()
        .with_min_len(1)
        .map(|chunk| reduce::reduce_chunk(op, storage, spec, chunk))
        .collect();
    partials
        .into_iter()
        .reduce(|acc, p| crate::ops::combine(op, acc, p))
}
