//! # narray
//!
//! **Typed, strided n-dimensional arrays with per-dtype elementwise and
//! reduction kernels.**
//!
//! narray is the numeric core of a statistics/ML stack: a multi-dimensional
//! array (`NArray`) over shared, reference-counted storage, with
//! shape-transforming views, broadcasting, and operator kernels specialized
//! per element type.
//!
//! ## Design
//!
//! - **Views are O(1)**: transpose, narrow, expand, and dense reshape build a
//!   new stride layout over the same storage - no data movement, intentional
//!   aliasing.
//! - **Logical order and physical walk are decoupled**: operations walk
//!   memory in storage-natural order (axes sorted by stride magnitude)
//!   regardless of the logical C/F order a caller requests.
//! - **Three kernel paths**: every operator runs contiguous runs through a
//!   lane-batched unit path, constant-stride runs through a gather/scatter
//!   step path, and everything else through a scalar generic path - all
//!   three bit-identical for the same logical elements.
//! - **Validate then execute**: every shape/axis/index error is rejected
//!   before any mutation, with the offending values in the error.
//!
//! ## Quick Start
//!
//! ```
//! use narray::prelude::*;
//!
//! let m = Manager::new();
//! let a = m.seq::<f64>(&[2, 3])?;
//! let b = m.full::<f64>(&[3], 10.0)?;
//!
//! let c = a.add(&b)?;            // broadcasting binary op
//! let t = c.t();                 // zero-copy transpose
//! assert_eq!(t.dims(), &[3, 2]);
//! assert_eq!(c.sum(), 75.0);
//! # Ok::<(), narray::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel execution mode (`Manager::parallel()`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod dtype;
pub mod error;
pub mod kernels;
pub mod manager;
pub mod ops;
#[cfg(feature = "rayon")]
mod parallel;

pub use array::{NArray, Order, Shape, Storage};
pub use dtype::{DType, Element};
pub use error::{Error, Result};
pub use manager::Manager;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::array::{NArray, Layout, Order, PositionIter, Shape, Storage};
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::manager::{ExecMode, Manager};
    pub use crate::ops::{BinaryOp, CompareOp, MapOp, ReduceOp, UnaryOp};
}
