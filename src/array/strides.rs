//! Strides type: per-axis element offsets for array memory layout

use super::shape::STACK_DIMS;
use smallvec::SmallVec;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;

/// Per-axis element strides
///
/// Signed: a stride of 0 marks a broadcast (expanded) axis, and negative
/// strides are representable for reversed views. Strides are in ELEMENTS,
/// not bytes.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Strides(SmallVec<[isize; STACK_DIMS]>);

impl Strides {
    /// Canonical row-major ("C") strides for a dense buffer of `dims`
    pub fn row_major(dims: &[usize]) -> Self {
        let mut strides: SmallVec<[isize; STACK_DIMS]> = SmallVec::with_capacity(dims.len());
        let mut stride = 1isize;
        for &dim in dims.iter().rev() {
            strides.push(stride);
            stride *= dim as isize;
        }
        strides.reverse();
        Self(strides)
    }

    /// Canonical column-major ("F") strides for a dense buffer of `dims`
    pub fn col_major(dims: &[usize]) -> Self {
        let mut strides: SmallVec<[isize; STACK_DIMS]> = SmallVec::with_capacity(dims.len());
        let mut stride = 1isize;
        for &dim in dims.iter() {
            strides.push(stride);
            stride *= dim as isize;
        }
        Self(strides)
    }

    /// View strides as a slice
    #[inline]
    pub fn as_slice(&self) -> &[isize] {
        self.0.as_slice()
    }

    /// Number of stride entries
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this stride vector is empty (rank 0)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn with_value(&self, axis: usize, value: isize) -> Self {
        let mut strides = self.0.clone();
        strides[axis] = value;
        Self(strides)
    }

    pub(crate) fn without_axis(&self, axis: usize) -> Self {
        let mut strides = self.0.clone();
        strides.remove(axis);
        Self(strides)
    }
}

impl Deref for Strides {
    type Target = [isize];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<[isize]> for Strides {
    fn as_ref(&self) -> &[isize] {
        self.0.as_slice()
    }
}

impl From<&[isize]> for Strides {
    fn from(value: &[isize]) -> Self {
        Self(value.iter().copied().collect())
    }
}

impl FromIterator<isize> for Strides {
    fn from_iter<T: IntoIterator<Item = isize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
