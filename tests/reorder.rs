//! Integration tests for hyperstack axis reordering.

use hyperfuse::{
    AxisAssignment, AxisOrder, AxisRole, Calibration, Hyperstack, HyperfuseError, Plane,
    StackShape,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const ALL_ORDERS: [AxisOrder; 6] = [
    AxisOrder::Czt,
    AxisOrder::Ctz,
    AxisOrder::Zct,
    AxisOrder::Ztc,
    AxisOrder::Tcz,
    AxisOrder::Tzc,
];

/// A stack whose plane at flat index i holds the single sample i.
fn numbered_stack(channels: u32, slices: u32, frames: u32) -> Hyperstack {
    let shape = StackShape::new(channels, slices, frames).unwrap();
    let planes: Vec<_> = (0..shape.plane_count())
        .map(|i| Arc::new(Plane::from_samples(1, 1, vec![i as f32]).unwrap()))
        .collect();
    Hyperstack::new("numbered", shape, planes).unwrap()
}

fn plane_values(stack: &Hyperstack) -> Vec<f32> {
    stack.planes().iter().map(|p| p.get_f32(0, 0)).collect()
}

#[test]
fn every_named_order_is_a_bijection() {
    let stack = numbered_stack(2, 3, 4);
    for order in &ALL_ORDERS {
        let assignment = order.assignment();
        let reordered = stack.reordered(&assignment);
        assert_eq!(reordered.planes().len(), 24, "{:?} dropped planes", order);

        // every input plane appears exactly once
        let mut values = plane_values(&reordered);
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f32> = (0..24).map(|i| i as f32).collect();
        assert_eq!(values, expected, "{:?} is not a bijection", order);

        // the extents follow the planes
        let shape = reordered.shape();
        assert_eq!(shape.plane_count(), 24);
    }
}

#[test]
fn applying_the_inverse_restores_the_original_order() {
    let stack = numbered_stack(2, 3, 4);
    for order in &ALL_ORDERS {
        let assignment = order.assignment();
        let restored = stack.reordered(&assignment).reordered(&assignment.inverse());
        assert_eq!(plane_values(&restored), plane_values(&stack));
        assert_eq!(restored.shape(), stack.shape());
    }
}

#[test]
fn ctz_swaps_slices_and_frames() {
    // channels 1, slices 2, frames 2; flat order is (z0 t0) (z1 t0) (z0 t1) (z1 t1)
    let stack = numbered_stack(1, 2, 2);
    let reordered = stack.reordered(&AxisOrder::Ctz.assignment());
    assert_eq!(plane_values(&reordered), vec![0.0, 2.0, 1.0, 3.0]);
    assert_eq!(reordered.shape().slices(), 2);
    assert_eq!(reordered.shape().frames(), 2);
}

#[test]
fn degenerate_stacks_keep_their_plane_order() {
    let degenerate = [(1u32, 1u32, 1u32), (5, 1, 1), (1, 4, 1), (1, 1, 3)];
    for &(c, z, t) in &degenerate {
        let stack = numbered_stack(c, z, t);
        for order in &ALL_ORDERS {
            let reordered = stack.reordered(&order.assignment());
            for (a, b) in stack.planes().iter().zip(reordered.planes()) {
                assert!(
                    Arc::ptr_eq(a, b),
                    "({}, {}, {}) reordered by {:?} moved a plane",
                    c,
                    z,
                    t,
                    order
                );
            }
        }
    }
}

#[test]
fn reordering_shares_planes_instead_of_copying() {
    let stack = numbered_stack(2, 2, 1);
    let reordered = stack.reordered(&AxisOrder::Zct.assignment());
    // same Arc allocations, permuted
    for plane in reordered.planes() {
        assert!(stack.planes().iter().any(|p| Arc::ptr_eq(p, plane)));
    }
}

#[test]
fn explicit_assignments_match_named_orders() {
    let stack = numbered_stack(2, 2, 2);
    let explicit =
        AxisAssignment::new(AxisRole::Slice, AxisRole::Channel, AxisRole::Frame).unwrap();
    assert_eq!(
        plane_values(&stack.reordered(&explicit)),
        plane_values(&stack.reordered(&AxisOrder::Zct.assignment()))
    );
    let identity = AxisAssignment::identity();
    assert_eq!(plane_values(&stack.reordered(&identity)), plane_values(&stack));
}

#[test]
fn reorder_by_name_matches_the_explicit_assignment() {
    let stack = numbered_stack(2, 3, 1);
    let by_name = stack.reordered_by_name("zct").unwrap();
    let explicit = stack.reordered(&AxisOrder::Zct.assignment());
    assert_eq!(plane_values(&by_name), plane_values(&explicit));
}

#[test]
fn unknown_name_is_rejected() {
    let stack = numbered_stack(2, 3, 1);
    match stack.reordered_by_name("XZY") {
        Err(HyperfuseError::UnknownOrdering(name)) => assert_eq!(name, "XZY"),
        other => panic!("expected an unknown ordering error, got {:?}", other),
    }
}

#[test]
fn reordering_carries_title_calibration_and_labels() {
    let shape = StackShape::new(2, 1, 1).unwrap();
    let planes = vec![
        Arc::new(
            Plane::from_samples(1, 1, vec![0.0f32])
                .unwrap()
                .with_label("first"),
        ),
        Arc::new(
            Plane::from_samples(1, 1, vec![1.0f32])
                .unwrap()
                .with_label("second"),
        ),
    ];
    let calibration = Calibration {
        pixel_width: 0.5,
        pixel_height: 0.5,
        pixel_depth: 2.0,
    };
    let stack = Hyperstack::new("labelled", shape, planes)
        .unwrap()
        .with_calibration(calibration);

    let reordered = stack.reordered(&AxisOrder::Tzc.assignment());
    assert_eq!(reordered.title(), "labelled");
    assert_eq!(reordered.calibration(), calibration);
    assert_eq!(reordered.shape().frames(), 2);
    assert_eq!(reordered.planes()[0].label(), Some("first"));
    assert_eq!(reordered.planes()[1].label(), Some("second"));
}
