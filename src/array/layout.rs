//! Layout: shape, strides, and offset mapping multi-indices to storage positions

use super::iter::{walk_axes, Order};
use super::shape::{Shape, STACK_DIMS};
use super::strides::Strides;
use smallvec::SmallVec;
use std::fmt;

/// Layout describes how an array's logical multi-indices map to linear
/// positions in its storage.
///
/// Address of the element at indices `[i0, i1, ..., in]`:
///   `offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]`
///
/// A stride of 0 marks an expanded (broadcast) axis: every index along it
/// maps to the same position. The layout itself carries no storage reference;
/// views are built by pairing a transformed `Layout` with a shared `Storage`.
#[derive(Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Shape,
    strides: Strides,
    offset: usize,
}

impl Layout {
    /// Create a contiguous row-major ("C") layout at offset 0
    pub fn contiguous(shape: Shape) -> Self {
        let strides = Strides::row_major(&shape);
        Self {
            shape,
            strides,
            offset: 0,
        }
    }

    /// Create a dense layout at offset 0 in the given order
    ///
    /// `Natural` has no meaning for a fresh allocation and is treated as
    /// row-major.
    pub fn dense(shape: Shape, order: Order) -> Self {
        let strides = match order {
            Order::ColMajor => Strides::col_major(&shape),
            Order::RowMajor | Order::Natural => Strides::row_major(&shape),
        };
        Self {
            shape,
            strides,
            offset: 0,
        }
    }

    /// Create a layout with explicit strides and offset
    ///
    /// No validation beyond arity: bounds against a concrete storage are
    /// checked where a storage is attached (the manager's `strided` wrap).
    pub fn with_strides(shape: Shape, strides: Strides, offset: usize) -> Self {
        debug_assert_eq!(shape.rank(), strides.len());
        Self {
            shape,
            strides,
            offset,
        }
    }

    /// The shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Per-axis extents
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.shape
    }

    /// Per-axis strides (in elements)
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Starting linear position in the storage
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of axes
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Total element count
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Linear position of a multi-index
    ///
    /// The index must already be validated (component count equals rank,
    /// every component within its axis); the array layer is the checked
    /// entry point.
    #[inline]
    pub fn position(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.rank());
        let mut pos = self.offset as isize;
        for (&i, &stride) in index.iter().zip(self.strides.iter()) {
            debug_assert!(i < usize::MAX);
            pos += i as isize * stride;
        }
        pos as usize
    }

    /// Axis permutation sorted by increasing absolute stride
    ///
    /// This is the storage order: walking axes with the smallest |stride|
    /// innermost visits memory as sequentially as the layout permits,
    /// independent of the logical (C/F) order a caller requested. Ties break
    /// toward the later axis so a contiguous row-major layout's natural walk
    /// reproduces its row-major walk.
    pub fn storage_order(&self) -> SmallVec<[usize; STACK_DIMS]> {
        let mut axes: SmallVec<[usize; STACK_DIMS]> = (0..self.rank()).collect();
        let strides = &self.strides;
        axes.sort_by(|&a, &b| {
            strides[a]
                .unsigned_abs()
                .cmp(&strides[b].unsigned_abs())
                .then(b.cmp(&a))
        });
        axes
    }

    /// Whether walking this layout in `order` visits the linear range
    /// `[offset, offset + size)` exactly once with no gaps
    ///
    /// Size-1 axes impose no constraint. Expanded (stride-0) axes of extent
    /// greater than 1 are never dense.
    pub fn is_dense(&self, order: Order) -> bool {
        let mut axes = walk_axes(self, order);
        axes.reverse(); // fastest-varying first
        let mut expected = 1isize;
        for &ax in axes.iter() {
            let dim = self.shape[ax];
            if dim == 1 {
                continue;
            }
            if self.strides[ax] != expected {
                return false;
            }
            expected *= dim as isize;
        }
        true
    }

    /// Whether this layout is dense row-major starting at its offset
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.is_dense(Order::RowMajor)
    }

    /// The minimum and maximum linear positions this layout can reach
    ///
    /// Used to validate a zero-copy wrap of a caller-supplied storage.
    pub fn span(&self) -> (isize, isize) {
        let mut lo = self.offset as isize;
        let mut hi = self.offset as isize;
        for (&dim, &stride) in self.shape.iter().zip(self.strides.iter()) {
            let reach = (dim as isize - 1) * stride;
            if reach < 0 {
                lo += reach;
            } else {
                hi += reach;
            }
        }
        (lo, hi)
    }

    /// Reverse all axes and strides: the full transpose, a pure O(1) view
    pub fn transpose(&self) -> Self {
        let shape: Shape = self.shape.iter().rev().copied().collect();
        let strides: Strides = self.strides.iter().rev().copied().collect();
        Self {
            shape,
            strides,
            offset: self.offset,
        }
    }

    /// Swap two axes (validated by the caller)
    pub(crate) fn swap_axes(&self, a: usize, b: usize) -> Self {
        let mut dims: SmallVec<[usize; STACK_DIMS]> = self.shape.iter().copied().collect();
        let mut strides: SmallVec<[isize; STACK_DIMS]> = self.strides.iter().copied().collect();
        dims.swap(a, b);
        strides.swap(a, b);
        Self {
            shape: dims.into_iter().collect(),
            strides: strides.into_iter().collect(),
            offset: self.offset,
        }
    }

    /// Broadcast a size-1 axis to `new_size` by zeroing its stride
    ///
    /// The caller has already validated that the current extent is 1.
    pub(crate) fn expand(&self, axis: usize, new_size: usize) -> Self {
        debug_assert_eq!(self.shape[axis], 1);
        Self {
            shape: self.shape.with_dim(axis, new_size),
            strides: self.strides.with_value(axis, 0),
            offset: self.offset,
        }
    }

    /// Restrict an axis to `[start, start + len)` (validated by the caller)
    pub(crate) fn narrow(&self, axis: usize, start: usize, len: usize) -> Self {
        let offset = self.offset as isize + start as isize * self.strides[axis];
        Self {
            shape: self.shape.with_dim(axis, len),
            strides: self.strides.clone(),
            offset: offset as usize,
        }
    }

    /// Remove a size-1 axis (validated by the caller)
    pub(crate) fn squeeze_axis(&self, axis: usize) -> Self {
        debug_assert_eq!(self.shape[axis], 1);
        Self {
            shape: self.shape.without_axis(axis),
            strides: self.strides.without_axis(axis),
            offset: self.offset,
        }
    }

    /// Insert a size-1 axis at `axis` (0 ..= rank, validated by the caller)
    pub(crate) fn unsqueeze(&self, axis: usize) -> Self {
        let stride = if axis < self.rank() {
            self.strides[axis] * self.shape[axis] as isize
        } else {
            1
        };
        let mut strides: SmallVec<[isize; STACK_DIMS]> = self.strides.iter().copied().collect();
        strides.insert(axis, stride);
        Self {
            shape: self.shape.with_inserted(axis, 1),
            strides: strides.into_iter().collect(),
            offset: self.offset,
        }
    }

    /// Broadcast this layout to a target shape, or None if incompatible
    ///
    /// Standard trailing-axis rule: pairs of extents must be equal, or the
    /// source extent must be 1 (that axis gets stride 0). The target may have
    /// higher rank; leading axes are broadcast.
    pub fn broadcast_to(&self, target: &[usize]) -> Option<Self> {
        if target.len() < self.rank() {
            return None;
        }

        let pad = target.len() - self.rank();
        let mut dims: SmallVec<[usize; STACK_DIMS]> = SmallVec::with_capacity(target.len());
        let mut strides: SmallVec<[isize; STACK_DIMS]> = SmallVec::with_capacity(target.len());

        for &t in &target[..pad] {
            dims.push(t);
            strides.push(0);
        }
        for ((&s, &st), &t) in self
            .shape
            .iter()
            .zip(self.strides.iter())
            .zip(&target[pad..])
        {
            if s == t {
                dims.push(t);
                strides.push(st);
            } else if s == 1 {
                dims.push(t);
                strides.push(0);
            } else {
                return None;
            }
        }

        Some(Self {
            shape: dims.into_iter().collect(),
            strides: strides.into_iter().collect(),
            offset: self.offset,
        })
    }

    /// Reinterpret as `new_shape` without data movement, or None if the
    /// layout is not dense row-major from its offset
    pub fn reshape_view(&self, new_shape: &Shape) -> Option<Self> {
        if !self.is_contiguous() {
            return None;
        }
        debug_assert_eq!(new_shape.size(), self.size());
        let strides = Strides::row_major(new_shape);
        Some(Self {
            shape: new_shape.clone(),
            strides,
            offset: self.offset,
        })
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout {{ shape: {:?}, strides: {:?}, offset: {} }}",
            self.shape, self.strides, self.offset
        )
    }
}

/// Compute the broadcast shape of two dim slices, trailing-axis rule
pub fn broadcast_dims(a: &[usize], b: &[usize]) -> Option<SmallVec<[usize; STACK_DIMS]>> {
    let max_rank = a.len().max(b.len());
    let mut result: SmallVec<[usize; STACK_DIMS]> = SmallVec::with_capacity(max_rank);

    for i in 0..max_rank {
        let a_dim = if i < a.len() { a[a.len() - 1 - i] } else { 1 };
        let b_dim = if i < b.len() { b[b.len() - 1 - i] } else { 1 };

        if a_dim == b_dim {
            result.push(a_dim);
        } else if a_dim == 1 {
            result.push(b_dim);
        } else if b_dim == 1 {
            result.push(a_dim);
        } else {
            return None;
        }
    }

    result.reverse();
    Some(result)
}
