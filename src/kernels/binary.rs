//! Pairwise kernels: elementwise combination of two operands
//!
//! Operands reach these kernels already shape-reconciled (broadcast at the
//! array layer); every spec passed in covers the same logical elements in the
//! same order, so chunk i of each spec corresponds position-for-position.
//!
//! `combine_chunk` writes `out[i] = op(a[i], b[i])` into a third array;
//! `accumulate_chunk` folds `out[i] = op(out[i], src[i])` in place. The
//! output region must be disjoint from both inputs (fresh storage, or a
//! dedicated accumulator) - the array layer guarantees this.

use crate::array::LoopSpec;
use crate::array::Storage;
use crate::dtype::Element;
use crate::ops::{apply_binary, BinaryOp};

/// Unit path: all three runs contiguous
pub fn binary_unit<T: Element>(
    op: BinaryOp,
    a: &[T],
    b: &[T],
    out: &mut [T],
    simd_bound: usize,
    lanes: usize,
) {
    let bound = out.len();
    debug_assert_eq!(a.len(), bound);
    debug_assert_eq!(b.len(), bound);
    debug_assert!(simd_bound <= bound);

    let mut i = 0;
    while i < simd_bound {
        for l in 0..lanes {
            out[i + l] = apply_binary(op, a[i + l], b[i + l]);
        }
        i += lanes;
    }
    for k in simd_bound..bound {
        out[k] = apply_binary(op, a[k], b[k]);
    }
}

/// Step path: constant non-zero steps on every run
#[allow(clippy::too_many_arguments)]
pub fn binary_step<T: Element>(
    op: BinaryOp,
    a: &Storage<T>,
    a_start: usize,
    a_step: isize,
    b: &Storage<T>,
    b_start: usize,
    b_step: isize,
    out: &Storage<T>,
    out_start: usize,
    out_step: isize,
    bound: usize,
    simd_bound: usize,
    lanes: usize,
) {
    debug_assert!(a_step != 0 && b_step != 0 && out_step != 0);
    let (ab, bb, ob) = (a_start as isize, b_start as isize, out_start as isize);

    let mut i = 0;
    while i < simd_bound {
        for l in 0..lanes {
            let k = (i + l) as isize;
            let va = a.get((ab + k * a_step) as usize);
            let vb = b.get((bb + k * b_step) as usize);
            out.set((ob + k * out_step) as usize, apply_binary(op, va, vb));
        }
        i += lanes;
    }
    for k in simd_bound..bound {
        let k = k as isize;
        let va = a.get((ab + k * a_step) as usize);
        let vb = b.get((bb + k * b_step) as usize);
        out.set((ob + k * out_step) as usize, apply_binary(op, va, vb));
    }
}

/// Generic path: arbitrary position streams, one element at a time
pub fn binary_generic<T: Element>(
    op: BinaryOp,
    a: &Storage<T>,
    a_pos: impl Iterator<Item = usize>,
    b: &Storage<T>,
    b_pos: impl Iterator<Item = usize>,
    out: &Storage<T>,
    out_pos: impl Iterator<Item = usize>,
) {
    for ((pa, pb), po) in a_pos.zip(b_pos).zip(out_pos) {
        out.set(po, apply_binary(op, a.get(pa), b.get(pb)));
    }
}

/// Combine one chunk triple through the path the steps select
#[allow(clippy::too_many_arguments)]
pub(crate) fn combine_chunk<T: Element>(
    op: BinaryOp,
    a: &Storage<T>,
    a_spec: &LoopSpec,
    b: &Storage<T>,
    b_spec: &LoopSpec,
    out: &Storage<T>,
    out_spec: &LoopSpec,
    chunk: usize,
) {
    let bound = out_spec.bound();
    let (sa, sb, so) = (a_spec.step(), b_spec.step(), out_spec.step());

    if sa == 1 && sb == 1 && so == 1 {
        let av = unsafe { a.slice(a_spec.starts()[chunk], bound) };
        let bv = unsafe { b.slice(b_spec.starts()[chunk], bound) };
        let ov = unsafe { out.slice_mut(out_spec.starts()[chunk], bound) };
        binary_unit(op, av, bv, ov, out_spec.simd_bound(), out_spec.simd_step());
    } else if sa != 0 && sb != 0 && so != 0 {
        // All simd_bounds agree (same bound, same lanes, all steps non-zero)
        binary_step(
            op,
            a,
            a_spec.starts()[chunk],
            sa,
            b,
            b_spec.starts()[chunk],
            sb,
            out,
            out_spec.starts()[chunk],
            so,
            bound,
            out_spec.simd_bound(),
            out_spec.simd_step(),
        );
    } else {
        binary_generic(
            op,
            a,
            a_spec.chunk_positions(chunk),
            b,
            b_spec.chunk_positions(chunk),
            out,
            out_spec.chunk_positions(chunk),
        );
    }
}

/// Combine every chunk on the calling thread
#[allow(clippy::too_many_arguments)]
pub(crate) fn combine_chunks<T: Element>(
    op: BinaryOp,
    a: &Storage<T>,
    a_spec: &LoopSpec,
    b: &Storage<T>,
    b_spec: &LoopSpec,
    out: &Storage<T>,
    out_spec: &LoopSpec,
) {
    for chunk in 0..out_spec.chunk_count() {
        combine_chunk(op, a, a_spec, b, b_spec, out, out_spec, chunk);
    }
}

/// Fold one chunk of `src` into `out` in place: `out[i] = op(out[i], src[i])`
pub(crate) fn accumulate_chunk<T: Element>(
    op: BinaryOp,
    out: &Storage<T>,
    out_spec: &LoopSpec,
    src: &Storage<T>,
    src_spec: &LoopSpec,
    chunk: usize,
) {
    let bound = out_spec.bound();
    let (so, ss) = (out_spec.step(), src_spec.step());

    if so == 1 && ss == 1 {
        let ov = unsafe { out.slice_mut(out_spec.starts()[chunk], bound) };
        let sv = unsafe { src.slice(src_spec.starts()[chunk], bound) };
        let simd_bound = out_spec.simd_bound();
        let lanes = out_spec.simd_step();
        let mut i = 0;
        while i < simd_bound {
            for l in 0..lanes {
                ov[i + l] = apply_binary(op, ov[i + l], sv[i + l]);
            }
            i += lanes;
        }
        for k in simd_bound..bound {
            ov[k] = apply_binary(op, ov[k], sv[k]);
        }
    } else {
        for (po, ps) in out_spec
            .chunk_positions(chunk)
            .zip(src_spec.chunk_positions(chunk))
        {
            out.set(po, apply_binary(op, out.get(po), src.get(ps)));
        }
    }
}

/// Fold every chunk of `src` into `out` on the calling thread
pub(crate) fn accumulate_chunks<T: Element>(
    op: BinaryOp,
    out: &Storage<T>,
    out_spec: &LoopSpec,
    src: &Storage<T>,
    src_spec: &LoopSpec,
) {
    for chunk in 0..out_spec.chunk_count() {
        accumulate_chunk(op, out, out_spec, src, src_spec, chunk);
    }
}
