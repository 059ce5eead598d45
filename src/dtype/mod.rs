//! Data type system for narray
//!
//! This module provides the `DType` enum describing the four supported element
//! kinds, along with the `Element` trait that connects them to Rust's type
//! system.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by narray arrays
///
/// This enum describes the element type of an array at runtime. The casting
/// rules, identity values, and NaN test for each kind live on the [`Element`]
/// trait; `DType` carries the runtime-queryable facts (width, floatness) used
/// by shape-agnostic code such as `deep_equals` tolerance selection and error
/// messages.
///
/// Exactly one variant exists per kind; comparisons are by value (`Copy + Eq`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 8-bit signed integer ("byte")
    I8,
    /// 32-bit signed integer
    I32,
    /// 32-bit floating point
    F32,
    /// 64-bit floating point
    F64,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::I8 => 1,
            Self::I32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Returns true if this is an integer type
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I8 | Self::I32)
    }

    /// Get the default dtype for floating point data
    #[inline]
    pub const fn default_float() -> Self {
        Self::F64
    }

    /// Short name for display (e.g., "f64", "i32")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
