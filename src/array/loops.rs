//! Loop descriptor: chunked, kernel-ready decomposition of a layout walk
//!
//! A `LoopSpec` describes how to walk a layout in a requested logical order
//! as a sequence of constant-step runs ("chunks"). Contiguous (`step == 1`)
//! chunks carry a `simd_bound`: the largest multiple of the data-parallel
//! lane width not exceeding the chunk bound, so kernels can process that
//! portion in lane-sized batches and the remainder one element at a time.
//!
//! Loop specs are transient: recomputed per operation call, never persisted.

use super::iter::{walk_axes, Order};
use super::layout::Layout;
use super::shape::{Shape, STACK_DIMS};
use smallvec::SmallVec;

/// Execution path selected by a chunk's step
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkKind {
    /// `step == 1`: contiguous run, eligible for data-parallel batches
    Unit,
    /// Constant non-unit, non-zero step: strided run, gather/scatter eligible
    Step,
    /// `step == 0` (expanded axis): every position in the run aliases the
    /// same element; always walked one element at a time
    Generic,
}

/// Chunked walk of one layout in one logical order
///
/// Every chunk shares the same `bound` and `step`; only the start offsets
/// differ. Chunk starts are listed in the requested logical order, so the
/// i-th chunk of two specs built jointly over reconciled layouts covers the
/// same logical elements.
#[derive(Clone, Debug)]
pub struct LoopSpec {
    starts: Vec<usize>,
    bound: usize,
    step: isize,
    simd_bound: usize,
    simd_step: usize,
}

impl LoopSpec {
    /// Build the chunk decomposition of `layout` walked in `order`
    ///
    /// `lanes` is the data-parallel width in elements for the dtype being
    /// processed (see `kernels::simd::lanes`).
    pub fn build(layout: &Layout, order: Order, lanes: usize) -> Self {
        Self::build_many(&[layout], order, lanes).pop().unwrap()
    }

    /// Build corresponding chunk decompositions for several layouts over the
    /// same logical dims, walked in the same logical order
    ///
    /// Axis fusion only merges where every layout is contiguous across the
    /// pair, so all returned specs have the same chunk count and bound.
    pub fn build_many(layouts: &[&Layout], order: Order, lanes: usize) -> Vec<Self> {
        debug_assert!(!layouts.is_empty());
        let dims = layouts[0].dims();
        for l in &layouts[1..] {
            debug_assert_eq!(l.dims(), dims);
        }

        let size = layouts[0].size();
        if size == 0 {
            return layouts
                .iter()
                .map(|_| Self {
                    starts: Vec::new(),
                    bound: 0,
                    step: 1,
                    simd_bound: 0,
                    simd_step: lanes,
                })
                .collect();
        }

        // Axis sequence, fastest-varying last. For the natural order the
        // first layout (the operation's primary operand or output) decides
        // the physical walk; C and F depend only on rank.
        let axes = walk_axes(layouts[0], order);
        let rank = axes.len();

        if rank == 0 {
            return layouts
                .iter()
                .map(|l| Self::single(l.offset(), 1, 1, lanes))
                .collect();
        }

        let inner = axes[rank - 1];
        let mut bound = dims[inner];
        let steps: Vec<isize> = layouts.iter().map(|l| l.strides()[inner]).collect();

        // Fuse outer axes into the chunk while every layout stays contiguous
        // across the pair (strides[ax] == step * bound for all layouts).
        let mut outer_len = rank - 1;
        while outer_len > 0 {
            let ax = axes[outer_len - 1];
            let fusable = layouts
                .iter()
                .zip(steps.iter())
                .all(|(l, &step)| l.strides()[ax] == step * bound as isize);
            if !fusable {
                break;
            }
            bound *= dims[ax];
            outer_len -= 1;
        }

        let outer = &axes[..outer_len];
        layouts
            .iter()
            .zip(steps.iter())
            .map(|(l, &step)| {
                let starts = chunk_starts(l, outer, dims);
                let simd_bound = if step == 0 { 0 } else { bound - bound % lanes };
                Self {
                    starts,
                    bound,
                    step,
                    simd_bound,
                    simd_step: lanes,
                }
            })
            .collect()
    }

    fn single(start: usize, bound: usize, step: isize, lanes: usize) -> Self {
        Self {
            starts: vec![start],
            bound,
            step,
            simd_bound: bound - bound % lanes,
            simd_step: lanes,
        }
    }

    /// Chunk start offsets, in the requested logical order
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Number of chunks
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.starts.len()
    }

    /// Element count of every chunk
    #[inline]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Per-element step within a chunk
    #[inline]
    pub fn step(&self) -> isize {
        self.step
    }

    /// Data-parallel-eligible prefix of the bound (0 for aliased chunks)
    #[inline]
    pub fn simd_bound(&self) -> usize {
        self.simd_bound
    }

    /// Elements per data-parallel batch
    #[inline]
    pub fn simd_step(&self) -> usize {
        self.simd_step
    }

    /// Execution path selected by this spec's step
    #[inline]
    pub fn kind(&self) -> ChunkKind {
        match self.step {
            1 => ChunkKind::Unit,
            0 => ChunkKind::Generic,
            _ => ChunkKind::Step,
        }
    }

    /// Positions of one chunk, for the generic (scalar) path
    #[inline]
    pub fn chunk_positions(&self, chunk: usize) -> ChunkPositions {
        ChunkPositions {
            pos: self.starts[chunk] as isize,
            step: self.step,
            remaining: self.bound,
        }
    }
}

/// Start offsets of all chunks: an odometer over the non-fused outer axes,
/// fastest-varying last, yielding offsets in logical order
fn chunk_starts(layout: &Layout, outer: &[usize], dims: &[usize]) -> Vec<usize> {
    if outer.is_empty() {
        return vec![layout.offset()];
    }
    let outer_dims: Shape = outer.iter().map(|&ax| dims[ax]).collect();
    let outer_strides: SmallVec<[isize; STACK_DIMS]> =
        outer.iter().map(|&ax| layout.strides()[ax]).collect();

    let count = outer_dims.size();
    let mut starts = Vec::with_capacity(count);
    let mut idx: SmallVec<[usize; STACK_DIMS]> = SmallVec::from_elem(0, outer.len());
    let mut pos = layout.offset() as isize;
    for _ in 0..count {
        starts.push(pos as usize);
        for k in (0..outer.len()).rev() {
            idx[k] += 1;
            pos += outer_strides[k];
            if idx[k] < outer_dims[k] {
                break;
            }
            idx[k] = 0;
            pos -= outer_strides[k] * outer_dims[k] as isize;
        }
    }
    starts
}

/// Positions of one constant-step run, including step 0 (aliased) runs
pub struct ChunkPositions {
    pos: isize,
    step: isize,
    remaining: usize,
}

impl Iterator for ChunkPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos as usize;
        self.remaining -= 1;
        self.pos += self.step;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ChunkPositions {}
