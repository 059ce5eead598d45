//! Operator kernels
//!
//! Each kernel family (map/unary, binary, reduce) exposes exactly three
//! execution paths, selected per chunk by the loop descriptor's step:
//!
//! - **unit** (`step == 1`): contiguous, lane-batched over the chunk's
//!   `simd_bound` prefix, scalar for the remainder
//! - **step** (constant non-zero step): lane-batched gather/scatter over the
//!   `simd_bound` prefix, scalar for the remainder
//! - **generic**: always scalar, one element at a time, for aliased
//!   (step-0) runs and arbitrary position streams
//!
//! The three paths produce bit-identical results for the same logical
//! elements: every path funnels through the same per-element functions in
//! `crate::ops`, and reductions accumulate sequentially in every path.
//!
//! Kernels assume their preconditions (shape reconciliation, disjoint
//! outputs, valid positions) already hold; validation lives at the array and
//! manager layers.

pub mod binary;
pub mod reduce;
pub mod simd;
pub mod unary;

use crate::array::Storage;
use crate::dtype::Element;

/// Copy elements between arbitrary position streams, in stream order
///
/// The position streams must have equal length; the destination region must
/// be disjoint from the source.
pub(crate) fn copy_positions<T: Element>(
    src: &Storage<T>,
    src_pos: impl Iterator<Item = usize>,
    dst: &Storage<T>,
    dst_pos: impl Iterator<Item = usize>,
) {
    for (ps, pd) in src_pos.zip(dst_pos) {
        dst.set(pd, src.get(ps));
    }
}

/// Gather a position stream into a fresh vector, in stream order
pub(crate) fn gather_to_vec<T: Element>(
    src: &Storage<T>,
    src_pos: impl Iterator<Item = usize>,
    len: usize,
) -> Vec<T> {
    let mut out = Vec::with_capacity(len);
    for pos in src_pos {
        out.push(src.get(pos));
    }
    out
}
