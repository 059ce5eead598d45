//! Integration tests for the elementwise operator surface

use narray::prelude::*;

fn seq(dims: &[usize]) -> NArray<f64> {
    Manager::new().seq::<f64>(dims).unwrap()
}

#[test]
fn test_unary_rounding_per_dtype() {
    let m = Manager::new();

    let f = m
        .from_slice::<f64>(&[1.2, -1.2, 2.5, 3.5], &[4])
        .unwrap();
    assert_eq!(
        f.map(UnaryOp::Ceil).to_vec(Order::RowMajor),
        vec![2.0, -1.0, 3.0, 4.0]
    );
    assert_eq!(
        f.map(UnaryOp::Floor).to_vec(Order::RowMajor),
        vec![1.0, -2.0, 2.0, 3.0]
    );
    // Ties to even
    assert_eq!(
        f.map(UnaryOp::Rint).to_vec(Order::RowMajor),
        vec![1.0, -1.0, 2.0, 4.0]
    );

    // Identity on integer kinds
    let i = m.from_slice::<i32>(&[-3, 0, 7], &[3]).unwrap();
    for op in [UnaryOp::Ceil, UnaryOp::Floor, UnaryOp::Rint] {
        assert_eq!(i.map(op).to_vec(Order::RowMajor), vec![-3, 0, 7]);
    }
}

#[test]
fn test_unary_math() {
    let a = seq(&[4]); // 0,1,2,3
    let e = a.map(UnaryOp::Exp);
    for (x, y) in a
        .to_vec(Order::RowMajor)
        .iter()
        .zip(e.to_vec(Order::RowMajor))
    {
        assert_eq!(y, x.exp());
    }

    let neg = a.map(UnaryOp::Neg);
    assert_eq!(neg.to_vec(Order::RowMajor), vec![0.0, -1.0, -2.0, -3.0]);

    let abs = neg.map(UnaryOp::Abs);
    assert!(abs.deep_equals(&a, 0.0));

    let sig = Manager::new()
        .zeros::<f64>(&[3])
        .unwrap()
        .map(UnaryOp::Sigmoid);
    assert_eq!(sig.to_vec(Order::RowMajor), vec![0.5, 0.5, 0.5]);
}

#[test]
fn test_clamp_and_scalars() {
    let a = seq(&[6]);
    a.clamp_(1.0, 4.0);
    assert_eq!(
        a.to_vec(Order::RowMajor),
        vec![1.0, 1.0, 2.0, 3.0, 4.0, 4.0]
    );

    a.mul_scalar_(2.0).add_scalar_(1.0);
    assert_eq!(
        a.to_vec(Order::RowMajor),
        vec![3.0, 3.0, 5.0, 7.0, 9.0, 9.0]
    );
}

#[test]
fn test_replace_nan() {
    let m = Manager::new();
    let a = m
        .from_slice::<f64>(&[1.0, f64::NAN, 3.0], &[3])
        .unwrap();
    a.replace_nan_(0.0);
    assert_eq!(a.to_vec(Order::RowMajor), vec![1.0, 0.0, 3.0]);

    // Identity on integer kinds
    let i = m.from_slice::<i32>(&[1, 2, 3], &[3]).unwrap();
    i.replace_nan_(9.0);
    assert_eq!(i.to_vec(Order::RowMajor), vec![1, 2, 3]);
}

#[test]
fn test_binary_ops() {
    let m = Manager::new();
    let a = m.from_slice::<f64>(&[1.0, 8.0, 3.0], &[3]).unwrap();
    let b = m.from_slice::<f64>(&[4.0, 2.0, 3.0], &[3]).unwrap();

    assert_eq!(a.add(&b).unwrap().to_vec(Order::RowMajor), vec![5.0, 10.0, 6.0]);
    assert_eq!(a.sub(&b).unwrap().to_vec(Order::RowMajor), vec![-3.0, 6.0, 0.0]);
    assert_eq!(a.mul(&b).unwrap().to_vec(Order::RowMajor), vec![4.0, 16.0, 9.0]);
    assert_eq!(a.div(&b).unwrap().to_vec(Order::RowMajor), vec![0.25, 4.0, 1.0]);
    assert_eq!(
        a.minimum(&b).unwrap().to_vec(Order::RowMajor),
        vec![1.0, 2.0, 3.0]
    );
    assert_eq!(
        a.maximum(&b).unwrap().to_vec(Order::RowMajor),
        vec![4.0, 8.0, 3.0]
    );
}

/// Broadcasting follows the trailing-axis rule on both sides
#[test]
fn test_binary_two_sided_broadcast() {
    let m = Manager::new();
    let col = m.seq::<f64>(&[3, 1]).unwrap(); // [[0],[1],[2]]
    let row = m.seq::<f64>(&[1, 4]).unwrap(); // [[0,1,2,3]]
    let grid = col.add(&row).unwrap();
    assert_eq!(grid.dims(), &[3, 4]);
    assert_eq!(
        grid.to_vec(Order::RowMajor),
        vec![0.0, 1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 4.0, 2.0, 3.0, 4.0, 5.0]
    );
}

#[test]
fn test_binary_rejects_incompatible() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[3]).unwrap();
    let b = m.seq::<f64>(&[4]).unwrap();
    let err = a.add(&b).unwrap_err();
    match err {
        Error::BroadcastError { lhs, rhs } => {
            assert_eq!(lhs, vec![3]);
            assert_eq!(rhs, vec![4]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// NaN propagates through float arithmetic, never through integer kinds
#[test]
fn test_nan_propagation() {
    let m = Manager::new();
    let a = m.from_slice::<f64>(&[1.0, f64::NAN], &[2]).unwrap();
    let b = m.ones::<f64>(&[2]).unwrap();
    let sum = a.add(&b).unwrap();
    assert_eq!(sum.get(&[0]).unwrap(), 2.0);
    assert!(sum.get(&[1]).unwrap().is_nan());
}

#[test]
fn test_deep_equals_tolerance() {
    let m = Manager::new();
    let a = m.from_slice::<f64>(&[1.0, 2.0], &[2]).unwrap();
    let b = m.from_slice::<f64>(&[1.0 + 1e-7, 2.0], &[2]).unwrap();
    assert!(!a.deep_equals(&b, 0.0));
    assert!(a.deep_equals(&b, 1e-6));

    // Integer comparison is exact regardless of tolerance
    let x = m.from_slice::<i32>(&[1, 2], &[2]).unwrap();
    let y = m.from_slice::<i32>(&[1, 3], &[2]).unwrap();
    assert!(!x.deep_equals(&y, 10.0));
}

#[test]
fn test_int_division_truncates() {
    let m = Manager::new();
    let a = m.from_slice::<i32>(&[7, -7], &[2]).unwrap();
    let b = m.from_slice::<i32>(&[2, 2], &[2]).unwrap();
    assert_eq!(a.div(&b).unwrap().to_vec(Order::RowMajor), vec![3, -3]);
}

#[test]
fn test_byte_arithmetic_stays_in_i8() {
    let m = Manager::new();
    let a = m.from_slice::<i8>(&[10, 20], &[2]).unwrap();
    let b = m.from_slice::<i8>(&[3, 4], &[2]).unwrap();
    assert_eq!(a.add(&b).unwrap().to_vec(Order::RowMajor), vec![13i8, 24]);
    assert_eq!(a.dtype(), DType::I8);
}
