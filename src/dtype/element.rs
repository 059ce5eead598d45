//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for types that can be elements of an array
///
/// This trait connects Rust's type system to narray's runtime dtype
/// description. It is implemented for exactly the four supported primitive
/// kinds: `i8`, `i32`, `f32`, `f64`.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - basic requirements for kernels
/// - `Pod + Zeroable` - safe memory transmutation (bytemuck)
/// - `Add + Sub + Mul + Div + Neg` - native arithmetic (Output = Self)
/// - `PartialOrd` - comparison for min/max operations
///
/// # Casting
///
/// `from_f64` uses Rust's native `as` conversion: truncation toward zero with
/// saturation for integer kinds, and NaN mapping to 0. This is the "cast"
/// contract of the dtype registry; there is no custom rounding.
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + PartialOrd
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type (native `as`-cast semantics)
    fn from_f64(v: f64) -> Self;

    /// Zero value (additive identity)
    fn zero() -> Self;

    /// One value (multiplicative identity)
    fn one() -> Self;

    /// NaN test: always false for integer kinds
    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    /// The "no value" sentinel returned by empty-range minimum queries
    ///
    /// NaN for floating kinds; for integer kinds this is NaN pushed through
    /// the native cast (0), and the accompanying `-1` arg-min is the
    /// authoritative signal.
    #[inline]
    fn nan() -> Self {
        Self::from_f64(f64::NAN)
    }
}

impl Element for i8 {
    const DTYPE: DType = DType::I8;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i8
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i32
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}
