//! Integration tests for shape operations (reshape, transpose, flatten,
//! concat, stack)

use narray::prelude::*;

fn seq(dims: &[usize]) -> NArray<f64> {
    Manager::new().seq::<f64>(dims).unwrap()
}

// ============================================================================
// Transpose
// ============================================================================

/// Transpose is an involution: a.t().t() deep-equals a
#[test]
fn test_transpose_involution() {
    for dims in [&[5][..], &[2, 3][..], &[2, 3, 4][..], &[1, 4, 1][..]] {
        let a = seq(dims);
        assert!(a.t().t().deep_equals(&a, 0.0));
    }
}

#[test]
fn test_transpose_reverses_axes() {
    let a = seq(&[2, 3, 4]);
    let t = a.t();
    assert_eq!(t.dims(), &[4, 3, 2]);
    assert_eq!(t.get(&[3, 1, 0]).unwrap(), a.get(&[0, 1, 3]).unwrap());
}

#[test]
fn test_swap_axes() {
    let a = seq(&[2, 3, 4]);
    let s = a.swap_axes(0, 2).unwrap();
    assert_eq!(s.dims(), &[4, 3, 2]);
    assert_eq!(s.get(&[1, 2, 0]).unwrap(), a.get(&[0, 2, 1]).unwrap());
    assert!(a.swap_axes(0, 3).is_err());
}

// ============================================================================
// Reshape / flatten
// ============================================================================

#[test]
fn test_reshape_preserves_row_major_reading() {
    let a = seq(&[2, 6]);
    let r = a.reshape(&[4, 3]).unwrap();
    assert_eq!(r.to_vec(Order::RowMajor), a.to_vec(Order::RowMajor));
}

#[test]
fn test_reshape_size_mismatch() {
    let a = seq(&[2, 6]);
    let err = a.reshape(&[5, 3]).unwrap_err();
    match err {
        Error::IncompatibleShapeSize {
            expected,
            got,
            requested,
        } => {
            assert_eq!(expected, 15);
            assert_eq!(got, 12);
            assert_eq!(requested, vec![5, 3]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_flatten_orders() {
    let a = seq(&[2, 3]);
    assert_eq!(
        a.flatten(Order::RowMajor).to_vec(Order::RowMajor),
        vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
    );
    assert_eq!(
        a.flatten(Order::ColMajor).to_vec(Order::RowMajor),
        vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]
    );
}

/// Flattening a dense array in its own order is a view; flattening in the
/// other order materializes
#[test]
fn test_flatten_view_vs_copy() {
    let a = seq(&[2, 3]);

    let view = a.flatten(Order::RowMajor);
    view.set(&[0], 99.0).unwrap();
    assert_eq!(a.get(&[0, 0]).unwrap(), 99.0);

    let copy = a.flatten(Order::ColMajor);
    copy.set(&[0], -1.0).unwrap();
    assert_eq!(a.get(&[0, 0]).unwrap(), 99.0);
}

// ============================================================================
// Concat
// ============================================================================

/// Concatenating (2,3) + (1,3) + (3,3) along axis 0 filled
/// 1..6, 7..9, 10..18 reads back 1..18 in storage-natural order
#[test]
fn test_concat_axis0_sequences() {
    let m = Manager::new();
    let a = m
        .from_slice::<f64>(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])
        .unwrap();
    let b = m.from_slice::<f64>(&[7.0, 8.0, 9.0], &[1, 3]).unwrap();
    let c = m
        .from_slice::<f64>(
            &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0],
            &[3, 3],
        )
        .unwrap();

    let out = m.concat(0, &[&a, &b, &c]).unwrap();
    assert_eq!(out.dims(), &[6, 3]);
    let expected: Vec<f64> = (1..=18).map(f64::from).collect();
    assert_eq!(out.to_vec(Order::Natural), expected);
}

#[test]
fn test_concat_axis1() {
    let m = Manager::new();
    let a = m.seq::<i32>(&[2, 2]).unwrap();
    let b = m.full::<i32>(&[2, 1], 9.0).unwrap();
    let out = m.concat(1, &[&a, &b]).unwrap();
    assert_eq!(out.dims(), &[2, 3]);
    assert_eq!(out.to_vec(Order::RowMajor), vec![0, 1, 9, 2, 3, 9]);
}

/// Concat copies through each input's own cursor: a transposed input lands
/// in logical order
#[test]
fn test_concat_transposed_input() {
    let m = Manager::new();
    let a = m.seq::<i32>(&[2, 2]).unwrap();
    let t = m.seq::<i32>(&[2, 2]).unwrap().t();
    let out = m.concat(0, &[&a, &t]).unwrap();
    assert_eq!(out.to_vec(Order::RowMajor), vec![0, 1, 2, 3, 0, 2, 1, 3]);
}

#[test]
fn test_concat_shape_mismatch() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[2, 3]).unwrap();
    let b = m.seq::<f64>(&[2, 4]).unwrap();
    let err = m.concat(0, &[&a, &b]).unwrap_err();
    match err {
        Error::ShapeMismatch { expected, got } => {
            assert_eq!(expected, vec![2, 3]);
            assert_eq!(got, vec![2, 4]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_concat_invalid_axis() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[2, 3]).unwrap();
    assert!(matches!(
        m.concat(2, &[&a]).unwrap_err(),
        Error::AxisOutOfBounds { axis: 2, rank: 2 }
    ));
}

// ============================================================================
// Stack
// ============================================================================

#[test]
fn test_stack_inserts_axis() {
    let m = Manager::new();
    let a = m.seq::<i32>(&[2, 3]).unwrap();
    let b = m.full::<i32>(&[2, 3], 1.0).unwrap();

    let front = m.stack(0, &[&a, &b]).unwrap();
    assert_eq!(front.dims(), &[2, 2, 3]);
    assert_eq!(front.get(&[0, 1, 2]).unwrap(), 5);
    assert_eq!(front.get(&[1, 1, 2]).unwrap(), 1);

    let mid = m.stack(1, &[&a, &b]).unwrap();
    assert_eq!(mid.dims(), &[2, 2, 3]);
    assert_eq!(mid.get(&[1, 0, 0]).unwrap(), 3);
    assert_eq!(mid.get(&[1, 1, 0]).unwrap(), 1);

    let back = m.stack(2, &[&a, &b]).unwrap();
    assert_eq!(back.dims(), &[2, 3, 2]);
    assert_eq!(back.get(&[1, 2, 0]).unwrap(), 5);
}

/// Stacking different shapes fails with ShapeMismatch naming both shapes
#[test]
fn test_stack_shape_mismatch_names_shapes() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[2, 3]).unwrap();
    let b = m.seq::<f64>(&[3, 2]).unwrap();
    let err = m.stack(0, &[&a, &b]).unwrap_err();
    match &err {
        Error::ShapeMismatch { expected, got } => {
            assert_eq!(expected, &vec![2, 3]);
            assert_eq!(got, &vec![3, 2]);
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("[2, 3]") && message.contains("[3, 2]"));
}

#[test]
fn test_stack_round_trip_via_narrow() {
    let m = Manager::new();
    let a = m.seq::<f64>(&[2, 3]).unwrap();
    let b = m.randn::<f64, _>(&[2, 3], &mut rand::rng()).unwrap();
    let stacked = m.stack(0, &[&a, &b]).unwrap();
    assert!(stacked.narrow(0, false, 0, 1).unwrap().deep_equals(&a, 0.0));
    assert!(stacked.narrow(0, false, 1, 2).unwrap().deep_equals(&b, 0.0));
}
