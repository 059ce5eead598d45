//! Logical iteration orders and the position cursor
//!
//! A `PositionIter` yields each element's linear storage position exactly
//! once, in a requested logical order. It is a plain finite cursor: single
//! pass, not reusable after exhaustion; restart by constructing a fresh one.

use super::layout::Layout;
use super::shape::STACK_DIMS;
use smallvec::SmallVec;

/// Logical iteration order over an array's elements
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Order {
    /// Row-major ("C"): the last axis varies fastest
    #[default]
    RowMajor,
    /// Column-major ("F"): the first axis varies fastest
    ColMajor,
    /// Storage-natural: axes walked by increasing absolute stride, the
    /// physically cheapest order for this layout
    Natural,
}

/// Axis permutation for walking `layout` in `order`, fastest-varying axis LAST
///
/// This is the odometer convention: the returned sequence is advanced from
/// the back, so the last entry is the innermost loop.
pub(crate) fn walk_axes(layout: &Layout, order: Order) -> SmallVec<[usize; STACK_DIMS]> {
    let rank = layout.rank();
    match order {
        Order::RowMajor => (0..rank).collect(),
        Order::ColMajor => (0..rank).rev().collect(),
        Order::Natural => {
            let mut axes = layout.storage_order();
            axes.reverse();
            axes
        }
    }
}

/// Cursor yielding each valid linear position exactly once
///
/// Construction is O(rank); each step is O(1) amortized. The cursor holds a
/// permuted copy of the layout's dims and strides, so it stays valid even if
/// the originating array is dropped.
pub struct PositionIter {
    dims: SmallVec<[usize; STACK_DIMS]>,
    strides: SmallVec<[isize; STACK_DIMS]>,
    idx: SmallVec<[usize; STACK_DIMS]>,
    pos: isize,
    remaining: usize,
}

impl PositionIter {
    /// Create a cursor over `layout` in the requested logical order
    pub fn new(layout: &Layout, order: Order) -> Self {
        let axes = walk_axes(layout, order);
        let dims: SmallVec<[usize; STACK_DIMS]> =
            axes.iter().map(|&ax| layout.dims()[ax]).collect();
        let strides: SmallVec<[isize; STACK_DIMS]> =
            axes.iter().map(|&ax| layout.strides()[ax]).collect();
        let idx = SmallVec::from_elem(0, dims.len());
        Self {
            dims,
            strides,
            idx,
            pos: layout.offset() as isize,
            remaining: layout.size(),
        }
    }
}

impl Iterator for PositionIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.pos as usize;
        self.remaining -= 1;
        if self.remaining > 0 {
            // Odometer advance from the innermost (last) axis outward
            for k in (0..self.dims.len()).rev() {
                self.idx[k] += 1;
                self.pos += self.strides[k];
                if self.idx[k] < self.dims[k] {
                    break;
                }
                self.idx[k] = 0;
                self.pos -= self.strides[k] * self.dims[k] as isize;
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PositionIter {}
