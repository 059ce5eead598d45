//! Operator kinds and their per-element semantics
//!
//! The functions here are the single source of truth for what each operator
//! does to one element. Every kernel execution path (unit, step, generic)
//! calls into the same per-element functions, which is what makes the paths
//! bit-identical for the same logical elements.

use crate::dtype::Element;

/// Elementwise unary operation kinds
///
/// Rounding ops (`Ceil`, `Floor`, `Rint`) are the identity on integer kinds.
/// Transcendental ops compute in f64 and cast back, matching the dtype's
/// native conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// Round toward positive infinity
    Ceil,
    /// Round toward negative infinity
    Floor,
    /// Round to nearest, ties to even
    Rint,
    /// Absolute value
    Abs,
    /// Negation
    Neg,
    /// -1, 0, or 1 by sign (NaN propagates)
    Sign,
    /// Square root
    Sqrt,
    /// Natural exponential
    Exp,
    /// Natural logarithm
    Ln,
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Hyperbolic tangent
    Tanh,
    /// Logistic function 1 / (1 + e^-x)
    Sigmoid,
    /// Reciprocal 1 / x
    Recip,
}

/// Elementwise binary operation kinds
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
    /// Elementwise minimum
    Min,
    /// Elementwise maximum
    Max,
}

/// Comparison kinds for mask construction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
}

/// Associative reduction kinds
///
/// All offered reductions are order-independent; accumulation follows the
/// physical storage-natural chunk walk, not the logical order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReduceOp {
    /// Sum of elements
    Sum,
    /// Product of elements
    Prod,
    /// Minimum element
    Min,
    /// Maximum element
    Max,
}

/// In-place map kinds: a unary op or a scalar-parameterised rewrite
///
/// Parameters are pre-cast to the element type once at dispatch, not per
/// element.
#[derive(Copy, Clone, Debug)]
pub enum MapOp<T> {
    /// Apply a [`UnaryOp`]
    Unary(UnaryOp),
    /// Overwrite every element with a constant
    Fill(T),
    /// Add a constant to every element
    AddScalar(T),
    /// Multiply every element by a constant
    MulScalar(T),
    /// Bound every element to `[lo, hi]`
    Clamp(T, T),
    /// Replace NaN elements with a constant (identity on integer kinds)
    ReplaceNan(T),
    /// Rewrite each element to 1 or 0 by comparing against a constant
    Mask(CompareOp, T),
}

/// Apply a unary operation to one element
#[inline]
pub fn apply_unary<T: Element>(op: UnaryOp, x: T) -> T {
    match op {
        UnaryOp::Ceil => {
            if T::DTYPE.is_float() {
                T::from_f64(x.to_f64().ceil())
            } else {
                x
            }
        }
        UnaryOp::Floor => {
            if T::DTYPE.is_float() {
                T::from_f64(x.to_f64().floor())
            } else {
                x
            }
        }
        UnaryOp::Rint => {
            if T::DTYPE.is_float() {
                T::from_f64(x.to_f64().round_ties_even())
            } else {
                x
            }
        }
        UnaryOp::Abs => {
            if x < T::zero() {
                -x
            } else {
                x
            }
        }
        UnaryOp::Neg => -x,
        UnaryOp::Sign => {
            let v = x.to_f64();
            if v > 0.0 {
                T::one()
            } else if v < 0.0 {
                -T::one()
            } else {
                // 0 stays 0; NaN propagates through the cast
                T::from_f64(v)
            }
        }
        UnaryOp::Sqrt => T::from_f64(x.to_f64().sqrt()),
        UnaryOp::Exp => T::from_f64(x.to_f64().exp()),
        UnaryOp::Ln => T::from_f64(x.to_f64().ln()),
        UnaryOp::Sin => T::from_f64(x.to_f64().sin()),
        UnaryOp::Cos => T::from_f64(x.to_f64().cos()),
        UnaryOp::Tan => T::from_f64(x.to_f64().tan()),
        UnaryOp::Tanh => T::from_f64(x.to_f64().tanh()),
        UnaryOp::Sigmoid => T::from_f64(1.0 / (1.0 + (-x.to_f64()).exp())),
        UnaryOp::Recip => T::from_f64(x.to_f64().recip()),
    }
}

/// Apply a binary operation to one pair of elements
///
/// Arithmetic runs in the native element type. `Min`/`Max` pick by native
/// comparison; with a NaN operand the comparison fails and the second operand
/// is returned.
#[inline]
pub fn apply_binary<T: Element>(op: BinaryOp, a: T, b: T) -> T {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Min => {
            if a < b {
                a
            } else {
                b
            }
        }
        BinaryOp::Max => {
            if a > b {
                a
            } else {
                b
            }
        }
    }
}

/// Apply a comparison to one element against a constant
#[inline]
pub fn apply_compare<T: Element>(cmp: CompareOp, x: T, v: T) -> bool {
    match cmp {
        CompareOp::Eq => x == v,
        CompareOp::Ne => x != v,
        CompareOp::Lt => x < v,
        CompareOp::Le => x <= v,
        CompareOp::Gt => x > v,
        CompareOp::Ge => x >= v,
    }
}

/// Apply an in-place map to one element
#[inline]
pub fn apply_map<T: Element>(op: MapOp<T>, x: T) -> T {
    match op {
        MapOp::Unary(u) => apply_unary(u, x),
        MapOp::Fill(v) => v,
        MapOp::AddScalar(v) => x + v,
        MapOp::MulScalar(v) => x * v,
        MapOp::Clamp(lo, hi) => {
            if x < lo {
                lo
            } else if x > hi {
                hi
            } else {
                x
            }
        }
        MapOp::ReplaceNan(v) => {
            if x.is_nan() {
                v
            } else {
                x
            }
        }
        MapOp::Mask(cmp, v) => {
            if apply_compare(cmp, x, v) {
                T::one()
            } else {
                T::zero()
            }
        }
    }
}

/// Fold one element into a reduction accumulator
#[inline]
pub fn combine<T: Element>(op: ReduceOp, acc: T, v: T) -> T {
    match op {
        ReduceOp::Sum => acc + v,
        ReduceOp::Prod => acc * v,
        ReduceOp::Min => {
            if v < acc {
                v
            } else {
                acc
            }
        }
        ReduceOp::Max => {
            if v > acc {
                v
            } else {
                acc
            }
        }
    }
}

impl ReduceOp {
    /// Identity accumulator, if the reduction has one
    ///
    /// `Min`/`Max` have no identity in these dtypes; folds seed from the
    /// first element instead.
    #[inline]
    pub fn identity<T: Element>(self) -> Option<T> {
        match self {
            ReduceOp::Sum => Some(T::zero()),
            ReduceOp::Prod => Some(T::one()),
            ReduceOp::Min | ReduceOp::Max => None,
        }
    }

    /// The binary op that pairwise-accumulates this reduction
    #[inline]
    pub fn as_binary(self) -> BinaryOp {
        match self {
            ReduceOp::Sum => BinaryOp::Add,
            ReduceOp::Prod => BinaryOp::Mul,
            ReduceOp::Min => BinaryOp::Min,
            ReduceOp::Max => BinaryOp::Max,
        }
    }
}
