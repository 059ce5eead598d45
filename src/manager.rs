//! Manager: array construction and multi-array operations
//!
//! The manager is the construction boundary of the engine: factories
//! allocate and fill storage, `strided` wraps a caller-supplied storage
//! without copying, and `concat`/`stack` validate shape compatibility before
//! any data moves. It also selects the execution mode: a serial manager runs
//! each operation to completion on the calling thread; a parallel manager
//! fans the loop descriptor's chunks out over a worker pool.

use crate::array::{NArray, Layout, Order, PositionIter, Shape, Storage, Strides};
use crate::array::{combine_impl, map_impl, reduce_all_impl, reduce_axis_impl};
use crate::dtype::Element;
use crate::error::{check_axis, Error, Result};
use crate::kernels::copy_positions;
use crate::ops::{BinaryOp, MapOp, ReduceOp, UnaryOp};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Execution mode for whole-array operations
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// Run each operation to completion on the calling thread
    #[default]
    Serial,
    /// Partition each operation's chunks across the rayon worker pool,
    /// joining all tasks (first error wins) before returning
    #[cfg(feature = "rayon")]
    Parallel,
}

/// Array factory and multi-array operation dispatcher
#[derive(Copy, Clone, Debug, Default)]
pub struct Manager {
    mode: ExecMode,
}

impl Manager {
    /// A serial manager (the default)
    pub fn new() -> Self {
        Self {
            mode: ExecMode::Serial,
        }
    }

    /// A manager that fans elementwise and reduction work out over the
    /// rayon worker pool
    #[cfg(feature = "rayon")]
    pub fn parallel() -> Self {
        Self {
            mode: ExecMode::Parallel,
        }
    }

    /// The execution mode of this manager
    #[inline]
    pub fn mode(&self) -> ExecMode {
        self.mode
    }

    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    /// Array of zeros
    pub fn zeros<T: Element>(&self, dims: &[usize]) -> Result<NArray<T>> {
        Ok(NArray::alloc(Shape::of(dims)?))
    }

    /// Array of ones
    pub fn ones<T: Element>(&self, dims: &[usize]) -> Result<NArray<T>> {
        self.full(dims, 1.0)
    }

    /// Array filled with `cast(value)`
    pub fn full<T: Element>(&self, dims: &[usize], value: f64) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        let storage = Storage::from_vec(vec![T::from_f64(value); shape.size()]);
        Ok(NArray::from_parts(storage, Layout::contiguous(shape)))
    }

    /// Array filled with 0, 1, 2, ... in storage-natural walk order
    pub fn seq<T: Element>(&self, dims: &[usize]) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        let data: Vec<T> = (0..shape.size()).map(|i| T::from_f64(i as f64)).collect();
        Ok(NArray::from_parts(
            Storage::from_vec(data),
            Layout::contiguous(shape),
        ))
    }

    /// Array of uniform random values in [0, 1)
    ///
    /// Float-oriented: integer kinds truncate to 0; use
    /// [`Manager::randint`] for integer data.
    pub fn rand<T: Element, R: Rng>(
        &self,
        dims: &[usize],
        rng: &mut R,
    ) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        let data: Vec<T> = (0..shape.size())
            .map(|_| {
                let v: f64 = rng.random();
                T::from_f64(v)
            })
            .collect();
        Ok(NArray::from_parts(
            Storage::from_vec(data),
            Layout::contiguous(shape),
        ))
    }

    /// Array of standard normal random values (mean 0, std 1)
    pub fn randn<T: Element, R: Rng>(
        &self,
        dims: &[usize],
        rng: &mut R,
    ) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        let normal = StandardNormal;
        let data: Vec<T> = (0..shape.size())
            .map(|_| {
                let v: f64 = normal.sample(rng);
                T::from_f64(v)
            })
            .collect();
        Ok(NArray::from_parts(
            Storage::from_vec(data),
            Layout::contiguous(shape),
        ))
    }

    /// Array of uniform random integers in [low, high)
    pub fn randint<T: Element, R: Rng>(
        &self,
        dims: &[usize],
        low: i64,
        high: i64,
        rng: &mut R,
    ) -> Result<NArray<T>> {
        if low >= high {
            return Err(Error::InvalidArgument {
                arg: "low",
                reason: format!("empty range [{low}, {high})"),
            });
        }
        let shape = Shape::of(dims)?;
        let dist = rand::distr::Uniform::new(low, high).expect("validated non-empty range");
        let data: Vec<T> = (0..shape.size())
            .map(|_| T::from_f64(dist.sample(rng) as f64))
            .collect();
        Ok(NArray::from_parts(
            Storage::from_vec(data),
            Layout::contiguous(shape),
        ))
    }

    /// 2-D identity matrix of extent `n`
    pub fn eye<T: Element>(&self, n: usize) -> Result<NArray<T>> {
        let out = self.zeros::<T>(&[n, n])?;
        for i in 0..n {
            out.set(&[i, i], T::one())?;
        }
        Ok(out)
    }

    /// Array owning `data`, shaped `dims`, row-major
    pub fn from_vec<T: Element>(&self, data: Vec<T>, dims: &[usize]) -> Result<NArray<T>> {
        NArray::from_vec(data, dims)
    }

    /// Array copying `data`, shaped `dims`, row-major
    pub fn from_slice<T: Element>(&self, data: &[T], dims: &[usize]) -> Result<NArray<T>> {
        NArray::from_slice(data, dims)
    }

    /// Dense array filled from literal values given in `order`
    ///
    /// The values land in a freshly allocated storage in the given order; the
    /// layout is dense in that order.
    pub fn with_values<T: Element>(
        &self,
        dims: &[usize],
        order: Order,
        values: &[T],
    ) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        if values.len() != shape.size() {
            return Err(Error::ShapeMismatch {
                expected: dims.to_vec(),
                got: vec![values.len()],
            });
        }
        let storage = Storage::from_slice(values);
        Ok(NArray::from_parts(storage, Layout::dense(shape, order)))
    }

    /// Zero-copy strided view over an existing storage
    ///
    /// Validates that every reachable position lies within the storage.
    pub fn strided<T: Element>(
        &self,
        dims: &[usize],
        offset: usize,
        strides: &[isize],
        storage: Storage<T>,
    ) -> Result<NArray<T>> {
        let shape = Shape::of(dims)?;
        if strides.len() != shape.rank() {
            return Err(Error::InvalidArgument {
                arg: "strides",
                reason: format!(
                    "expected {} strides for shape {dims:?}, got {}",
                    shape.rank(),
                    strides.len()
                ),
            });
        }
        let layout = Layout::with_strides(shape, Strides::from(strides), offset);
        let (lo, hi) = layout.span();
        if lo < 0 || hi as usize >= storage.len() {
            return Err(Error::IndexOutOfBounds {
                index: if lo < 0 { offset } else { hi as usize },
                axis: 0,
                size: storage.len(),
            });
        }
        Ok(NArray::from_parts(storage, layout))
    }

    // ------------------------------------------------------------------
    // Multi-array operations
    // ------------------------------------------------------------------

    /// Concatenate along `axis`
    ///
    /// All arrays must share every extent except along `axis`; the first
    /// mismatch fails with `ShapeMismatch` naming both shapes, before any
    /// allocation. The result is materialized by copying each input through
    /// its own position cursor into the matching destination sub-range.
    pub fn concat<T: Element>(&self, axis: isize, arrays: &[&NArray<T>]) -> Result<NArray<T>> {
        let first = *arrays.first().ok_or(Error::InvalidArgument {
            arg: "arrays",
            reason: "concat requires at least one array".into(),
        })?;
        let ax = check_axis(axis, first.rank())?;

        let mut total = first.dims()[ax];
        for a in &arrays[1..] {
            let compatible = a.rank() == first.rank()
                && a.dims()
                    .iter()
                    .zip(first.dims().iter())
                    .enumerate()
                    .all(|(i, (&d, &e))| i == ax || d == e);
            if !compatible {
                return Err(Error::shape_mismatch(first.dims(), a.dims()));
            }
            total += a.dims()[ax];
        }

        let mut out_dims = first.dims().to_vec();
        out_dims[ax] = total;
        let out = NArray::alloc(Shape::of(&out_dims)?);

        let mut at = 0;
        for a in arrays {
            let len = a.dims()[ax];
            let dst = out.layout().narrow(ax, at, len);
            copy_positions(
                a.storage(),
                a.positions(Order::RowMajor),
                out.storage(),
                PositionIter::new(&dst, Order::RowMajor),
            );
            at += len;
        }
        Ok(out)
    }

    /// Stack along a new axis inserted at `axis` (0 ..= rank)
    ///
    /// All arrays must have identical shapes; the first mismatch fails with
    /// `ShapeMismatch` naming both shapes.
    pub fn stack<T: Element>(&self, axis: isize, arrays: &[&NArray<T>]) -> Result<NArray<T>> {
        let first = *arrays.first().ok_or(Error::InvalidArgument {
            arg: "arrays",
            reason: "stack requires at least one array".into(),
        })?;
        if axis < 0 || axis as usize > first.rank() {
            return Err(Error::axis(axis, first.rank()));
        }
        let ax = axis as usize;

        for a in &arrays[1..] {
            if a.dims() != first.dims() {
                return Err(Error::shape_mismatch(first.dims(), a.dims()));
            }
        }

        let mut out_dims = first.dims().to_vec();
        out_dims.insert(ax, arrays.len());
        let out = NArray::alloc(Shape::of(&out_dims)?);

        for (i, a) in arrays.iter().enumerate() {
            let dst = out.layout().narrow(ax, i, 1);
            copy_positions(
                a.storage(),
                a.positions(Order::RowMajor),
                out.storage(),
                PositionIter::new(&dst, Order::RowMajor),
            );
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Mode-aware whole-array operations
    // ------------------------------------------------------------------

    /// Apply a unary operator in place
    pub fn apply_<T: Element>(&self, a: &NArray<T>, op: UnaryOp) {
        map_impl(a, MapOp::Unary(op), self.mode);
    }

    /// Apply an in-place map (fill, clamp, scalar arithmetic, mask, ...)
    pub fn map_<T: Element>(&self, a: &NArray<T>, op: MapOp<T>) {
        map_impl(a, op, self.mode);
    }

    /// Elementwise binary operation with broadcasting
    pub fn binary<T: Element>(
        &self,
        a: &NArray<T>,
        b: &NArray<T>,
        op: BinaryOp,
    ) -> Result<NArray<T>> {
        combine_impl(a, b, op, self.mode)
    }

    /// Whole-array reduction in storage-natural accumulation order
    pub fn reduce<T: Element>(&self, a: &NArray<T>, op: ReduceOp) -> T {
        reduce_all_impl(a, op, self.mode)
    }

    /// Reduction along one axis
    pub fn reduce_axis<T: Element>(
        &self,
        a: &NArray<T>,
        op: ReduceOp,
        axis: isize,
        keep_dim: bool,
    ) -> Result<NArray<T>> {
        reduce_axis_impl(a, op, axis, keep_dim, self.mode)
    }
}
