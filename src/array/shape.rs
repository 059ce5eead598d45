//! Shape type: validated per-axis extents of an array

use crate::error::{check_axis, Error, Result};
use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Stack allocation threshold for dimensions
/// Most arrays have 4 or fewer axes, so we stack-allocate up to 4
pub(crate) const STACK_DIMS: usize = 4;

/// Validated per-axis extents of an array
///
/// Every extent is strictly positive; a rank-0 shape denotes a scalar with
/// size 1. Shapes are immutable once constructed - shape-transforming
/// operations build new `Shape` values.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Shape(SmallVec<[usize; STACK_DIMS]>);

impl Shape {
    /// Construct a validated shape
    ///
    /// Fails with `InvalidShape` if any extent is zero. An empty slice is the
    /// explicit rank-0 scalar case (size 1, no dims).
    pub fn of(dims: &[usize]) -> Result<Self> {
        for (axis, &dim) in dims.iter().enumerate() {
            if dim == 0 {
                return Err(Error::InvalidShape {
                    dims: dims.to_vec(),
                    axis,
                });
            }
        }
        Ok(Self(dims.iter().copied().collect()))
    }

    /// The rank-0 scalar shape
    pub fn scalar() -> Self {
        Self(SmallVec::new())
    }

    /// Total element count (product of extents, 1 for rank 0)
    #[inline]
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    /// Number of axes
    #[inline]
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Extent of one axis, failing with `AxisOutOfBounds` for an invalid axis
    pub fn dim(&self, axis: isize) -> Result<usize> {
        let axis = check_axis(axis, self.rank())?;
        Ok(self.0[axis])
    }

    /// View extents as a slice
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        self.0.as_slice()
    }

    /// Whether this is the rank-0 scalar shape
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a new shape with `extent` substituted at `axis`
    ///
    /// Internal: callers have already validated `axis` and `extent > 0`.
    pub(crate) fn with_dim(&self, axis: usize, extent: usize) -> Self {
        let mut dims = self.0.clone();
        dims[axis] = extent;
        Self(dims)
    }

    /// Build a new shape with the axis removed
    pub(crate) fn without_axis(&self, axis: usize) -> Self {
        let mut dims = self.0.clone();
        dims.remove(axis);
        Self(dims)
    }

    /// Build a new shape with a size-`extent` axis inserted at `axis`
    pub(crate) fn with_inserted(&self, axis: usize, extent: usize) -> Self {
        let mut dims = self.0.clone();
        dims.insert(axis, extent);
        Self(dims)
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        self.0.as_slice()
    }
}

// Internal construction paths (already-validated extents)
impl FromIterator<usize> for Shape {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_validates() {
        let shape = Shape::of(&[2, 3, 4]).unwrap();
        assert_eq!(shape.rank(), 3);
        assert_eq!(shape.size(), 24);

        let err = Shape::of(&[2, 0, 4]).unwrap_err();
        match err {
            Error::InvalidShape { dims, axis } => {
                assert_eq!(dims, vec![2, 0, 4]);
                assert_eq!(axis, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_scalar() {
        let shape = Shape::scalar();
        assert_eq!(shape.rank(), 0);
        assert_eq!(shape.size(), 1);
        assert!(shape.is_scalar());
    }

    #[test]
    fn test_dim() {
        let shape = Shape::of(&[2, 3]).unwrap();
        assert_eq!(shape.dim(0).unwrap(), 2);
        assert_eq!(shape.dim(1).unwrap(), 3);
        assert!(shape.dim(2).is_err());
        assert!(shape.dim(-1).is_err());
    }
}
