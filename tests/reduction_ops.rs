//! Integration tests for reductions

use narray::prelude::*;

fn seq(dims: &[usize]) -> NArray<f64> {
    Manager::new().seq::<f64>(dims).unwrap()
}

#[test]
fn test_full_reductions() {
    let a = seq(&[2, 3]); // 0..6
    assert_eq!(a.sum(), 15.0);
    assert_eq!(a.min(), 0.0);
    assert_eq!(a.max(), 5.0);
    assert_eq!(a.prod(), 0.0);

    let b = Manager::new().from_slice::<i32>(&[2, 3, 4], &[3]).unwrap();
    assert_eq!(b.prod(), 24);
}

/// Splitting at an arbitrary axis cut, reducing each half, and combining
/// equals the single-pass reduction within floating tolerance
#[test]
fn test_reduction_split_associativity() {
    let m = Manager::new();
    let mut rng = rand::rng();
    let a = m.rand::<f64, _>(&[100, 120], &mut rng).unwrap();
    assert!(a.size() >= 10_000);

    let total = a.sum();
    for cut in [1, 37, 64, 99] {
        let lo = a.narrow(0, true, 0, cut).unwrap().sum();
        let hi = a.narrow(0, true, cut, 100).unwrap().sum();
        let combined = lo + hi;
        assert!(
            (combined - total).abs() <= 1e-9 * total.abs(),
            "cut {cut}: {combined} vs {total}"
        );
    }
}

#[test]
fn test_axis_reductions() {
    let a = seq(&[2, 3, 4]);

    let sum0 = a.sum_axis(0, false).unwrap();
    assert_eq!(sum0.dims(), &[3, 4]);
    assert_eq!(sum0.get(&[0, 0]).unwrap(), 0.0 + 12.0);
    assert_eq!(sum0.get(&[2, 3]).unwrap(), 11.0 + 23.0);

    let sum2 = a.sum_axis(2, false).unwrap();
    assert_eq!(sum2.dims(), &[2, 3]);
    assert_eq!(sum2.get(&[0, 0]).unwrap(), 0.0 + 1.0 + 2.0 + 3.0);

    let kept = a.sum_axis(1, true).unwrap();
    assert_eq!(kept.dims(), &[2, 1, 4]);

    assert!(a.sum_axis(3, false).is_err());
}

#[test]
fn test_axis_min_max() {
    let m = Manager::new();
    let a = m
        .from_slice::<i32>(&[5, 1, 3, 2, 8, 0], &[2, 3])
        .unwrap();
    let min0 = a.reduce_axis(ReduceOp::Min, 0, false).unwrap();
    assert_eq!(min0.to_vec(Order::RowMajor), vec![2, 1, 0]);
    let max1 = a.reduce_axis(ReduceOp::Max, 1, false).unwrap();
    assert_eq!(max1.to_vec(Order::RowMajor), vec![5, 8]);
}

/// Reducing a rank-1 array along axis 0 yields a scalar array
#[test]
fn test_axis_reduce_to_scalar() {
    let a = seq(&[5]);
    let s = a.sum_axis(0, false).unwrap();
    assert_eq!(s.rank(), 0);
    assert_eq!(s.get(&[]).unwrap(), 10.0);
}

/// Axis reduction through a transposed view matches the other axis of the
/// base array
#[test]
fn test_axis_reduce_of_transpose() {
    let a = seq(&[3, 4]);
    let via_t = a.t().sum_axis(1, false).unwrap(); // sum over original axis 0
    let direct = a.sum_axis(0, false).unwrap();
    assert!(via_t.deep_equals(&direct, 0.0));
}

#[test]
fn test_argmin_argmax_first_occurrence() {
    let m = Manager::new();
    let a = m
        .from_slice::<f64>(&[4.0, 2.0, 7.0, 2.0, 7.0], &[5])
        .unwrap();
    assert_eq!(a.argmin(), 1);
    assert_eq!(a.argmax(), 2);
}

/// Storage-level min/arg-min range queries and their empty-range sentinels
#[test]
fn test_storage_min_sentinels() {
    let s = Storage::<f64>::from_vec(vec![3.0, -1.0, 2.0]);
    assert_eq!(s.min_value(0, 3), -1.0);
    assert_eq!(s.arg_min(0, 3), 1);

    // Empty ranges: NaN value sentinel, -1 index sentinel, at every start
    for start in 0..3 {
        assert!(s.min_value(start, 0).is_nan());
        assert_eq!(s.arg_min(start, 0), -1);
    }

    let ints = Storage::<i32>::from_vec(vec![5, 2, 9]);
    assert_eq!(ints.min_value(0, 3), 2);
    assert_eq!(ints.arg_min(1, 0), -1);
    // Integer kinds cast the NaN sentinel through the native conversion
    assert_eq!(ints.min_value(1, 0), 0);

    let bytes = Storage::<i8>::from_vec(vec![4, -2]);
    assert_eq!(bytes.min_value(0, 0), 0);
    assert_eq!(bytes.arg_min(0, 0), -1);

    let singles = Storage::<f32>::from_vec(vec![1.5, 0.5]);
    assert!(singles.min_value(2, 0).is_nan());
    assert_eq!(singles.arg_min(2, 0), -1);
}

/// Mean-style composition: sum / count stays consistent across layouts
#[test]
fn test_sum_matches_logical_content() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[4, 5]).unwrap();
    let t = a.t();
    assert_eq!(a.sum(), t.sum());
    assert_eq!(a.sum(), (0..20).sum::<i32>() as f64);
}
