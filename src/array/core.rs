//! Core NArray type

use super::iter::{Order, PositionIter};
use super::layout::{broadcast_dims, Layout};
use super::loops::LoopSpec;
use super::shape::Shape;
use super::storage::Storage;
use crate::dtype::{DType, Element};
use crate::error::{check_axis, Error, Result};
use crate::kernels::{self, simd};
use crate::manager::ExecMode;
use crate::ops::{BinaryOp, CompareOp, MapOp, ReduceOp, UnaryOp};

/// N-dimensional array: a layout over shared storage
///
/// `NArray` pairs exactly one [`Layout`] with one shared [`Storage`]
/// reference. View operations (`t`, `narrow`, `expand`, dense `reshape`, ...)
/// build a new layout over the same storage in O(1) with no data movement;
/// materializing operations (`copy`, `take`, non-dense `flatten`, binary
/// ops, ...) allocate fresh storage.
///
/// The array itself is an immutable view descriptor over mutable shared
/// data: in-place operators rewrite elements through the layout, and a write
/// through one view is visible through every alias of the same storage.
pub struct NArray<T: Element> {
    storage: Storage<T>,
    layout: Layout,
}

impl<T: Element> NArray<T> {
    /// Create an array from storage and layout
    pub fn from_parts(storage: Storage<T>, layout: Layout) -> Self {
        Self { storage, layout }
    }

    /// Allocate a zeroed contiguous array of `shape`
    pub(crate) fn alloc(shape: Shape) -> Self {
        let storage = Storage::new(shape.size());
        let layout = Layout::contiguous(shape);
        Self { storage, layout }
    }

    /// Create an array owning `data`, shaped `dims`, row-major
    ///
    /// Fails with `ShapeMismatch` if the data length does not equal the
    /// shape's element count.
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        let shape = Shape::of(dims)?;
        if data.len() != shape.size() {
            return Err(Error::ShapeMismatch {
                expected: dims.to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(Self {
            storage: Storage::from_vec(data),
            layout: Layout::contiguous(shape),
        })
    }

    /// Create an array copying `data`, shaped `dims`, row-major
    pub fn from_slice(data: &[T], dims: &[usize]) -> Result<Self> {
        Self::from_vec(data.to_vec(), dims)
    }

    /// Create a rank-0 array holding one value
    pub fn scalar(value: T) -> Self {
        Self {
            storage: Storage::from_vec(vec![value]),
            layout: Layout::contiguous(Shape::scalar()),
        }
    }

    // ------------------------------------------------------------------
    // Descriptors
    // ------------------------------------------------------------------

    /// The shape
    #[inline]
    pub fn shape(&self) -> &Shape {
        self.layout.shape()
    }

    /// Per-axis extents
    #[inline]
    pub fn dims(&self) -> &[usize] {
        self.layout.dims()
    }

    /// Number of axes
    #[inline]
    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    /// Total element count
    #[inline]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// The layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The shared storage
    #[inline]
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    fn checked_position(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.rank() {
            return Err(Error::ShapeMismatch {
                expected: self.dims().to_vec(),
                got: index.to_vec(),
            });
        }
        for (axis, (&i, &dim)) in index.iter().zip(self.dims().iter()).enumerate() {
            if i >= dim {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    axis,
                    size: dim,
                });
            }
        }
        Ok(self.layout.position(index))
    }

    /// Read one element by multi-index
    pub fn get(&self, index: &[usize]) -> Result<T> {
        Ok(self.storage.get(self.checked_position(index)?))
    }

    /// Overwrite one element by multi-index
    pub fn set(&self, index: &[usize], value: T) -> Result<()> {
        self.storage.set(self.checked_position(index)?, value);
        Ok(())
    }

    /// Add `value` to one element by multi-index
    pub fn inc(&self, index: &[usize], value: T) -> Result<()> {
        self.storage.inc(self.checked_position(index)?, value);
        Ok(())
    }

    /// Cursor over linear positions in the requested logical order
    pub fn positions(&self, order: Order) -> PositionIter {
        PositionIter::new(&self.layout, order)
    }

    /// Export elements as a vector, visited in the requested logical order
    pub fn to_vec(&self, order: Order) -> Vec<T> {
        if self.layout.is_dense(order) {
            let slice = unsafe { self.storage.slice(self.layout.offset(), self.size()) };
            return slice.to_vec();
        }
        kernels::gather_to_vec(&self.storage, self.positions(order), self.size())
    }

    // ------------------------------------------------------------------
    // Views and materializing shape transforms
    // ------------------------------------------------------------------

    fn view(&self, layout: Layout) -> Self {
        Self {
            storage: self.storage.clone(),
            layout,
        }
    }

    /// Reverse all axes: the full transpose, an O(1) view
    pub fn t(&self) -> Self {
        self.view(self.layout.transpose())
    }

    /// Swap two axes, an O(1) view
    pub fn swap_axes(&self, a: isize, b: isize) -> Result<Self> {
        let a = check_axis(a, self.rank())?;
        let b = check_axis(b, self.rank())?;
        Ok(self.view(self.layout.swap_axes(a, b)))
    }

    /// Broadcast a size-1 axis to `new_size` by zeroing its stride
    ///
    /// Reading through the expanded axis is well-defined (every replicated
    /// index reads the same element). Writing through it is also
    /// well-defined: all replicated indices alias one physical element, so an
    /// in-place operator applies once per logical position. Fails with
    /// `DimensionMismatch` if the current extent is not 1.
    pub fn expand(&self, axis: isize, new_size: usize) -> Result<Self> {
        let axis = check_axis(axis, self.rank())?;
        let current = self.dims()[axis];
        if current != 1 {
            return Err(Error::DimensionMismatch {
                axis,
                size: current,
            });
        }
        if new_size == 0 {
            return Err(Error::InvalidShape {
                dims: self.dims().to_vec(),
                axis,
            });
        }
        Ok(self.view(self.layout.expand(axis, new_size)))
    }

    /// Restrict `axis` to `[start, end)`, an O(1) view
    ///
    /// With `keep_dim` false a resulting size-1 axis is elided from the
    /// shape.
    pub fn narrow(&self, axis: isize, keep_dim: bool, start: usize, end: usize) -> Result<Self> {
        let axis = check_axis(axis, self.rank())?;
        let dim = self.dims()[axis];
        if start >= end {
            return Err(Error::InvalidArgument {
                arg: "start",
                reason: format!("empty range [{start}, {end})"),
            });
        }
        if end > dim {
            return Err(Error::IndexOutOfBounds {
                index: end - 1,
                axis,
                size: dim,
            });
        }
        let len = end - start;
        let mut layout = self.layout.narrow(axis, start, len);
        if !keep_dim && len == 1 {
            layout = layout.squeeze_axis(axis);
        }
        Ok(self.view(layout))
    }

    /// Broadcast to a target shape (trailing-axis rule), an O(1) view
    pub fn broadcast_to(&self, dims: &[usize]) -> Result<Self> {
        let layout = self
            .layout
            .broadcast_to(dims)
            .ok_or_else(|| Error::broadcast(self.dims(), dims))?;
        Ok(self.view(layout))
    }

    /// Remove a size-1 axis, an O(1) view
    pub fn squeeze(&self, axis: isize) -> Result<Self> {
        let axis = check_axis(axis, self.rank())?;
        let dim = self.dims()[axis];
        if dim != 1 {
            return Err(Error::DimensionMismatch { axis, size: dim });
        }
        Ok(self.view(self.layout.squeeze_axis(axis)))
    }

    /// Insert a size-1 axis at `axis` (0 ..= rank), an O(1) view
    pub fn unsqueeze(&self, axis: isize) -> Result<Self> {
        if axis < 0 || axis as usize > self.rank() {
            return Err(Error::axis(axis, self.rank()));
        }
        Ok(self.view(self.layout.unsqueeze(axis as usize)))
    }

    /// Reinterpret as `dims`
    ///
    /// Returns a view when the current layout is dense row-major from its
    /// offset; otherwise materializes by walking this array in row-major
    /// order into fresh storage. Fails with `IncompatibleShapeSize` if the
    /// element counts differ.
    pub fn reshape(&self, dims: &[usize]) -> Result<Self> {
        let new_shape = Shape::of(dims)?;
        if new_shape.size() != self.size() {
            return Err(Error::IncompatibleShapeSize {
                expected: new_shape.size(),
                got: self.size(),
                requested: dims.to_vec(),
            });
        }
        if let Some(layout) = self.layout.reshape_view(&new_shape) {
            return Ok(self.view(layout));
        }
        let copied = self.copy();
        let layout = copied.layout.reshape_view(&new_shape).unwrap();
        Ok(Self {
            storage: copied.storage,
            layout,
        })
    }

    /// Produce a rank-1 array visiting all elements in `order`
    ///
    /// A view when the layout is dense in that order, otherwise a
    /// materializing copy.
    pub fn flatten(&self, order: Order) -> Self {
        let size = self.size();
        if self.layout.is_dense(order) {
            let shape: Shape = [size].iter().copied().collect();
            let layout = Layout::with_strides(
                shape,
                [1isize].iter().copied().collect(),
                self.layout.offset(),
            );
            return self.view(layout);
        }
        let data = self.to_vec(order);
        Self {
            storage: Storage::from_vec(data),
            layout: Layout::contiguous([size].iter().copied().collect()),
        }
    }

    /// Gather `indices` along `axis` into a new array
    ///
    /// The result's extent along `axis` equals the number of indices, in the
    /// given order, repeats included. Always materializes.
    pub fn take(&self, axis: isize, indices: &[usize]) -> Result<Self> {
        let ax = check_axis(axis, self.rank())?;
        let dim = self.dims()[ax];
        for &i in indices {
            if i >= dim {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    axis: ax,
                    size: dim,
                });
            }
        }
        let out_shape = Shape::of(&{
            let mut dims = self.dims().to_vec();
            dims[ax] = indices.len();
            dims
        })?;
        let out = Self::alloc(out_shape);
        for (k, &i) in indices.iter().enumerate() {
            let src = self.layout.narrow(ax, i, 1);
            let dst = out.layout.narrow(ax, k, 1);
            kernels::copy_positions(
                &self.storage,
                PositionIter::new(&src, Order::RowMajor),
                &out.storage,
                PositionIter::new(&dst, Order::RowMajor),
            );
        }
        Ok(out)
    }

    /// Deep copy into fresh contiguous row-major storage
    pub fn copy(&self) -> Self {
        let data = self.to_vec(Order::RowMajor);
        Self {
            storage: Storage::from_vec(data),
            layout: Layout::contiguous(self.shape().clone()),
        }
    }

    /// This array if already dense row-major, otherwise a deep copy
    pub fn contiguous(&self) -> Self {
        if self.layout.is_contiguous() {
            self.clone()
        } else {
            self.copy()
        }
    }

    // ------------------------------------------------------------------
    // Elementwise operations
    // ------------------------------------------------------------------

    /// Apply a unary operator in place
    pub fn apply_(&self, op: UnaryOp) -> &Self {
        map_impl(self, MapOp::Unary(op), ExecMode::Serial);
        self
    }

    /// Overwrite every element with `cast(value)`
    pub fn fill_(&self, value: f64) -> &Self {
        map_impl(self, MapOp::Fill(T::from_f64(value)), ExecMode::Serial);
        self
    }

    /// Add `cast(value)` to every element
    pub fn add_scalar_(&self, value: f64) -> &Self {
        map_impl(self, MapOp::AddScalar(T::from_f64(value)), ExecMode::Serial);
        self
    }

    /// Multiply every element by `cast(value)`
    pub fn mul_scalar_(&self, value: f64) -> &Self {
        map_impl(self, MapOp::MulScalar(T::from_f64(value)), ExecMode::Serial);
        self
    }

    /// Bound every element to `[cast(lo), cast(hi)]`
    pub fn clamp_(&self, lo: f64, hi: f64) -> &Self {
        map_impl(
            self,
            MapOp::Clamp(T::from_f64(lo), T::from_f64(hi)),
            ExecMode::Serial,
        );
        self
    }

    /// Replace NaN elements with `cast(value)` (identity on integer kinds)
    pub fn replace_nan_(&self, value: f64) -> &Self {
        map_impl(self, MapOp::ReplaceNan(T::from_f64(value)), ExecMode::Serial);
        self
    }

    /// Apply a unary operator into a fresh array
    pub fn map(&self, op: UnaryOp) -> Self {
        let out = self.copy();
        out.apply_(op);
        out
    }

    /// 0/1 mask of elements satisfying `cmp` against `cast(value)`
    pub fn compare_mask(&self, cmp: CompareOp, value: f64) -> Self {
        let out = self.copy();
        map_impl(&out, MapOp::Mask(cmp, T::from_f64(value)), ExecMode::Serial);
        out
    }

    // ------------------------------------------------------------------
    // Binary operations
    // ------------------------------------------------------------------

    fn binary_op(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        combine_impl(self, other, op, ExecMode::Serial)
    }

    /// Elementwise addition with broadcasting
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Add)
    }

    /// Elementwise subtraction with broadcasting
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Sub)
    }

    /// Elementwise multiplication with broadcasting
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Mul)
    }

    /// Elementwise division with broadcasting
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Div)
    }

    /// Elementwise minimum with broadcasting
    pub fn minimum(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Min)
    }

    /// Elementwise maximum with broadcasting
    pub fn maximum(&self, other: &Self) -> Result<Self> {
        self.binary_op(other, BinaryOp::Max)
    }

    // ------------------------------------------------------------------
    // Reductions
    // ------------------------------------------------------------------

    /// Fold the whole array, accumulating in storage-natural order
    pub fn reduce(&self, op: ReduceOp) -> T {
        reduce_all_impl(self, op, ExecMode::Serial)
    }

    /// Sum of all elements
    pub fn sum(&self) -> T {
        self.reduce(ReduceOp::Sum)
    }

    /// Product of all elements
    pub fn prod(&self) -> T {
        self.reduce(ReduceOp::Prod)
    }

    /// Minimum element
    pub fn min(&self) -> T {
        self.reduce(ReduceOp::Min)
    }

    /// Maximum element
    pub fn max(&self) -> T {
        self.reduce(ReduceOp::Max)
    }

    /// Fold along one axis
    ///
    /// With `keep_dim` the reduced axis stays with extent 1; otherwise it is
    /// elided (a full-rank reduction of a rank-1 array yields a scalar
    /// array).
    pub fn reduce_axis(&self, op: ReduceOp, axis: isize, keep_dim: bool) -> Result<Self> {
        reduce_axis_impl(self, op, axis, keep_dim, ExecMode::Serial)
    }

    /// Sum along one axis
    pub fn sum_axis(&self, axis: isize, keep_dim: bool) -> Result<Self> {
        self.reduce_axis(ReduceOp::Sum, axis, keep_dim)
    }

    /// Ordinal (in the storage-natural walk) of the first minimum element
    pub fn argmin(&self) -> usize {
        self.arg_extreme(true)
    }

    /// Ordinal (in the storage-natural walk) of the first maximum element
    pub fn argmax(&self) -> usize {
        self.arg_extreme(false)
    }

    fn arg_extreme(&self, minimum: bool) -> usize {
        let mut iter = self.positions(Order::Natural).enumerate();
        let (_, first) = iter.next().expect("arrays are never empty");
        let mut best = self.storage.get(first);
        let mut at = 0usize;
        for (ord, pos) in iter {
            let v = self.storage.get(pos);
            let better = if minimum { v < best } else { v > best };
            if better {
                best = v;
                at = ord;
            }
        }
        at
    }

    // ------------------------------------------------------------------
    // Comparison
    // ------------------------------------------------------------------

    /// Element-by-element equality in canonical row-major order, regardless
    /// of the two layouts
    ///
    /// Integer kinds compare exactly (the tolerance is ignored); floating
    /// kinds compare with |a - b| <= tolerance. A shape mismatch is simply
    /// unequal, never an error. NaN is unequal to everything, including
    /// itself.
    pub fn deep_equals(&self, other: &Self, tolerance: f64) -> bool {
        if self.dims() != other.dims() {
            return false;
        }
        let lhs = self.positions(Order::RowMajor);
        let rhs = other.positions(Order::RowMajor);
        if T::DTYPE.is_float() {
            for (pa, pb) in lhs.zip(rhs) {
                let diff = (self.storage.get(pa).to_f64() - other.storage.get(pb).to_f64()).abs();
                if !(diff <= tolerance) {
                    return false;
                }
            }
        } else {
            for (pa, pb) in lhs.zip(rhs) {
                if self.storage.get(pa) != other.storage.get(pb) {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: Element> Clone for NArray<T> {
    /// Shallow clone: a new view sharing the same storage
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<T: Element> std::fmt::Debug for NArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NArray")
            .field("dtype", &self.dtype())
            .field("layout", &self.layout)
            .finish()
    }
}

// ----------------------------------------------------------------------
// Mode-aware operation drivers (shared by NArray methods and the Manager)
// ----------------------------------------------------------------------

pub(crate) fn map_impl<T: Element>(a: &NArray<T>, op: MapOp<T>, mode: ExecMode) {
    let spec = LoopSpec::build(&a.layout, Order::Natural, simd::lanes::<T>());
    match mode {
        ExecMode::Serial => kernels::unary::map_chunks(op, &a.storage, &spec),
        #[cfg(feature = "rayon")]
        ExecMode::Parallel => {
            crate::parallel::par_map_chunks(op, &a.storage, &spec)
                .expect("map kernels are infallible");
        }
    }
}

pub(crate) fn combine_impl<T: Element>(
    a: &NArray<T>,
    b: &NArray<T>,
    op: BinaryOp,
    mode: ExecMode,
) -> Result<NArray<T>> {
    let out_dims =
        broadcast_dims(a.dims(), b.dims()).ok_or_else(|| Error::broadcast(a.dims(), b.dims()))?;
    let out_shape: Shape = out_dims.iter().copied().collect();
    let a_bc = a.layout.broadcast_to(&out_dims).expect("reconciled above");
    let b_bc = b.layout.broadcast_to(&out_dims).expect("reconciled above");
    let out = NArray::alloc(out_shape);

    let lanes = simd::lanes::<T>();
    let specs = LoopSpec::build_many(&[&out.layout, &a_bc, &b_bc], Order::RowMajor, lanes);

    match mode {
        ExecMode::Serial => kernels::binary::combine_chunks(
            op, &a.storage, &specs[1], &b.storage, &specs[2], &out.storage, &specs[0],
        ),
        #[cfg(feature = "rayon")]
        ExecMode::Parallel => {
            crate::parallel::par_combine_chunks(
                op, &a.storage, &specs[1], &b.storage, &specs[2], &out.storage, &specs[0],
            )
            .expect("binary kernels are infallible");
        }
    }
    Ok(out)
}

pub(crate) fn reduce_all_impl<T: Element>(a: &NArray<T>, op: ReduceOp, mode: ExecMode) -> T {
    let spec = LoopSpec::build(&a.layout, Order::Natural, simd::lanes::<T>());
    let folded = match mode {
        ExecMode::Serial => kernels::reduce::reduce_chunks(op, &a.storage, &spec),
        #[cfg(feature = "rayon")]
        ExecMode::Parallel => crate::parallel::par_reduce_chunks(op, &a.storage, &spec),
    };
    folded.expect("arrays are never empty")
}

pub(crate) fn reduce_axis_impl<T: Element>(
    a: &NArray<T>,
    op: ReduceOp,
    axis: isize,
    keep_dim: bool,
    mode: ExecMode,
) -> Result<NArray<T>> {
    let ax = check_axis(axis, a.rank())?;
    let n = a.dims()[ax];
    let binary = op.as_binary();
    let lanes = simd::lanes::<T>();

    // Accumulator starts as a materialized copy of the first slice, then
    // folds the remaining slices in axis order.
    let out = NArray::from_parts(a.storage.clone(), a.layout.narrow(ax, 0, 1)).copy();
    for j in 1..n {
        let src = a.layout.narrow(ax, j, 1);
        let specs = LoopSpec::build_many(&[&out.layout, &src], Order::RowMajor, lanes);
        match mode {
            ExecMode::Serial => kernels::binary::accumulate_chunks(
                binary,
                &out.storage,
                &specs[0],
                &a.storage,
                &specs[1],
            ),
            #[cfg(feature = "rayon")]
            ExecMode::Parallel => {
                crate::parallel::par_accumulate_chunks(
                    binary,
                    &out.storage,
                    &specs[0],
                    &a.storage,
                    &specs[1],
                )
                .expect("binary kernels are infallible");
            }
        }
    }

    if keep_dim {
        Ok(out)
    } else {
        Ok(NArray {
            layout: out.layout.squeeze_axis(ax),
            storage: out.storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq_array(dims: &[usize]) -> NArray<f64> {
        let size: usize = dims.iter().product();
        NArray::from_vec((0..size).map(|i| i as f64).collect(), dims).unwrap()
    }

    #[test]
    fn test_get_set() {
        let a = seq_array(&[2, 3]);
        assert_eq!(a.get(&[1, 2]).unwrap(), 5.0);
        a.set(&[1, 2], 50.0).unwrap();
        assert_eq!(a.get(&[1, 2]).unwrap(), 50.0);

        let err = a.get(&[1, 3]).unwrap_err();
        match err {
            Error::IndexOutOfBounds { index, axis, size } => {
                assert_eq!((index, axis, size), (3, 1, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(a.get(&[1]).is_err());
    }

    #[test]
    fn test_transpose_shares_storage() {
        let a = seq_array(&[2, 3]);
        let t = a.t();
        assert_eq!(t.dims(), &[3, 2]);
        t.set(&[2, 1], 99.0).unwrap();
        assert_eq!(a.get(&[1, 2]).unwrap(), 99.0);
    }

    #[test]
    fn test_reshape_view_vs_copy() {
        let a = seq_array(&[2, 6]);
        let r = a.reshape(&[3, 4]).unwrap();
        // Dense source: reshape is a view over the same storage
        r.set(&[0, 0], 42.0).unwrap();
        assert_eq!(a.get(&[0, 0]).unwrap(), 42.0);

        let t = a.t(); // (6, 2), not dense row-major
        let m = t.reshape(&[12]).unwrap();
        m.set(&[0], -1.0).unwrap();
        // Materialized: source untouched
        assert_eq!(a.get(&[0, 0]).unwrap(), 42.0);

        let err = a.reshape(&[5, 5]).unwrap_err();
        assert!(matches!(err, Error::IncompatibleShapeSize { .. }));
    }

    #[test]
    fn test_binary_broadcast() {
        let a = seq_array(&[2, 3]);
        let row = NArray::from_vec(vec![10.0, 20.0, 30.0], &[3]).unwrap();
        let sum = a.add(&row).unwrap();
        assert_eq!(
            sum.to_vec(Order::RowMajor),
            vec![10.0, 21.0, 32.0, 13.0, 24.0, 35.0]
        );

        let bad = NArray::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        assert!(matches!(
            a.add(&bad).unwrap_err(),
            Error::BroadcastError { .. }
        ));
    }

    #[test]
    fn test_reduce_axis() {
        let a = seq_array(&[2, 3]);
        let cols = a.sum_axis(0, false).unwrap();
        assert_eq!(cols.dims(), &[3]);
        assert_eq!(cols.to_vec(Order::RowMajor), vec![3.0, 5.0, 7.0]);

        let rows = a.sum_axis(1, true).unwrap();
        assert_eq!(rows.dims(), &[2, 1]);
        assert_eq!(rows.to_vec(Order::RowMajor), vec![3.0, 12.0]);
    }

    #[test]
    fn test_deep_equals_across_layouts() {
        let a = seq_array(&[2, 3]);
        let b = a.t().copy().t();
        assert!(a.deep_equals(&b, 0.0));
        b.set(&[0, 1], 100.0).unwrap();
        assert!(!a.deep_equals(&b, 0.0));
        // Shape mismatch is false, not an error
        assert!(!a.deep_equals(&seq_array(&[3, 2]), 0.0));
    }

    #[test]
    fn test_argmin_argmax() {
        let a = NArray::from_vec(vec![3, 1, 4, 1, 5], &[5]).unwrap();
        assert_eq!(a.argmin(), 1); // first occurrence
        assert_eq!(a.argmax(), 4);
    }

    #[test]
    fn test_compare_mask() {
        let a = seq_array(&[4]);
        let mask = a.compare_mask(CompareOp::Ge, 2.0);
        assert_eq!(mask.to_vec(Order::RowMajor), vec![0.0, 0.0, 1.0, 1.0]);
        // Source untouched
        assert_eq!(a.get(&[0]).unwrap(), 0.0);
    }
}
