//! Output bounds estimation for fusion.

use crate::stack::Hyperstack;
use crate::transform::InvertibleTransform;

/// The fused output extent: an integer size per dimension plus the
/// real-valued offset of the first output sample in the shared target
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedBounds {
    /// Samples per output dimension, in (x, y[, z]) order.
    pub size: Vec<usize>,
    /// Position of output sample (0, 0[, 0]) in the shared target space.
    pub offset: Vec<f64>,
}

/// Compute the smallest inclusive-corner box containing every transformed
/// input extent.
///
/// The native box of a volume spans its boundary sample positions,
/// `[0, w-1] x [0, h-1] (x [0, d-1])`; the trailing `+1` of the size
/// keeps both boundary samples addressable. Corner estimates coming back
/// from a transform are not assumed ordered, so both corners of every
/// volume enter the running pointwise reduction.
pub(crate) fn estimate<T: InvertibleTransform>(
    stacks: &[&Hyperstack],
    transforms: &[T],
    dimensionality: usize,
) -> FusedBounds {
    let mut global_min = vec![f64::INFINITY; dimensionality];
    let mut global_max = vec![f64::NEG_INFINITY; dimensionality];

    for (stack, transform) in stacks.iter().zip(transforms) {
        let mut min = vec![0.0; dimensionality];
        let mut max = vec![
            f64::from(stack.width() - 1),
            f64::from(stack.height() - 1),
        ];
        if dimensionality == 3 {
            max.push(f64::from(stack.shape().slices() - 1));
        }
        transform.estimate_bounds(&mut min, &mut max);

        for d in 0..dimensionality {
            // the volume may be reflected so that min is actually max
            global_max[d] = global_max[d].max(min[d].max(max[d]));
            global_min[d] = global_min[d].min(min[d].min(max[d]));
        }
    }

    let mut size = Vec::with_capacity(dimensionality);
    let mut offset = Vec::with_capacity(dimensionality);
    for d in 0..dimensionality {
        // inclusive of both boundary samples
        size.push((global_max[d] - global_min[d]).round() as usize + 1);
        offset.push(global_min[d]);
    }
    log::debug!("fused bounds: size {:?}, offset {:?}", size, offset);

    FusedBounds { size, offset }
}

#[cfg(test)]
mod tests {
    use super::estimate;
    use crate::stack::{Hyperstack, Plane, StackShape};
    use crate::transform::Affine2;
    use std::sync::Arc;

    fn flat(width: u32, height: u32) -> Hyperstack {
        let plane = Plane::zeros(width, height, crate::typedef::SampleType::Float32);
        Hyperstack::new(
            "flat",
            StackShape::new(1, 1, 1).unwrap(),
            vec![Arc::new(plane)],
        )
        .unwrap()
    }

    #[test]
    fn single_identity_volume_keeps_its_own_extent() {
        let stack = flat(7, 4);
        let transforms = [Affine2::identity()];
        let bounds = estimate(&[&stack], &transforms, 2);
        assert_eq!(bounds.size, vec![7, 4]);
        assert_eq!(bounds.offset, vec![0.0, 0.0]);
    }

    #[test]
    fn negative_offsets_move_the_origin() {
        let stack = flat(4, 4);
        let transforms = [Affine2::translation(-2.0, 3.0)];
        let bounds = estimate(&[&stack], &transforms, 2);
        assert_eq!(bounds.size, vec![4, 4]);
        assert_eq!(bounds.offset, vec![-2.0, 3.0]);
    }

    #[test]
    fn union_covers_all_volumes() {
        let a = flat(4, 4);
        let b = flat(4, 4);
        let transforms = [Affine2::identity(), Affine2::translation(2.0, 0.0)];
        let bounds = estimate(&[&a, &b], &transforms, 2);
        assert_eq!(bounds.size, vec![6, 4]);
        assert_eq!(bounds.offset, vec![0.0, 0.0]);
    }
}
