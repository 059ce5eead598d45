//! Error types for narray

use thiserror::Error;

/// Result type alias using narray's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in narray operations
///
/// Every validated error carries the offending values, so a failing call can
/// be reproduced from its message alone. Validation happens before any
/// mutation or data movement: a rejected operation leaves its inputs
/// untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// A shape was constructed with a zero-sized dimension
    #[error("Invalid shape {dims:?}: dimension {axis} must be positive")]
    InvalidShape {
        /// The requested dimensions
        dims: Vec<usize>,
        /// Index of the first offending dimension
        axis: usize,
    },

    /// An axis index outside [0, rank)
    #[error("Axis {axis} out of bounds for array with {rank} axes")]
    AxisOutOfBounds {
        /// The requested axis
        axis: isize,
        /// Number of axes of the array
        rank: usize,
    },

    /// A multi-index or gather index outside its axis's valid range
    #[error("Index {index} out of bounds for axis {axis} of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// The axis being indexed
        axis: usize,
        /// Size of that axis
        size: usize,
    },

    /// Operands of an equal-shape operation have different shapes
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Shapes cannot be reconciled by broadcasting
    #[error("Cannot broadcast shapes {lhs:?} and {rhs:?}")]
    BroadcastError {
        /// Left-hand side shape
        lhs: Vec<usize>,
        /// Right-hand side shape
        rhs: Vec<usize>,
    },

    /// An expand was requested on an axis whose extent is not 1
    #[error("Cannot expand axis {axis} of size {size}: only size-1 axes can be expanded")]
    DimensionMismatch {
        /// The requested axis
        axis: usize,
        /// Current extent of that axis
        size: usize,
    },

    /// A reshape target whose element count differs from the source's
    #[error("Cannot reshape {got} elements into shape {requested:?} ({expected} elements)")]
    IncompatibleShapeSize {
        /// Element count of the requested shape
        expected: usize,
        /// Element count of the source array
        got: usize,
        /// The requested shape
        requested: Vec<usize>,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a broadcast error
    pub fn broadcast(lhs: &[usize], rhs: &[usize]) -> Self {
        Self::BroadcastError {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create an axis-out-of-bounds error
    pub fn axis(axis: isize, rank: usize) -> Self {
        Self::AxisOutOfBounds { axis, rank }
    }
}

/// Validate an axis index against a rank, returning the axis as `usize`
///
/// Axes are strict: no negative indexing. A negative or too-large axis fails
/// with `AxisOutOfBounds` carrying the requested value.
#[inline]
pub(crate) fn check_axis(axis: isize, rank: usize) -> Result<usize> {
    if axis < 0 || axis as usize >= rank {
        return Err(Error::axis(axis, rank));
    }
    Ok(axis as usize)
}
