//! Conversion of hyperstacks into `ndarray` arrays, for handoff to
//! display or export collaborators.
//!
//! Available with the `ndarray_volumes` feature (enabled by default).

use super::{Hyperstack, Sample};
use ndarray::{Array, ArrayD, IxDyn};

impl Hyperstack {
    /// Export the stack as an array of shape
    /// `(frames, slices, channels, height, width)`, converting every
    /// sample to `T` with the usual round-and-saturate semantics for
    /// integer targets.
    pub fn to_ndarray<T: Sample>(&self) -> ArrayD<T> {
        let shape = self.shape();
        let dims = [
            shape.frames() as usize,
            shape.slices() as usize,
            shape.channels() as usize,
            self.height() as usize,
            self.width() as usize,
        ];
        let mut data = Vec::with_capacity(dims.iter().product());
        for t in 0..shape.frames() {
            for z in 0..shape.slices() {
                for c in 0..shape.channels() {
                    let plane = &self.planes()[shape.stack_index(c, z, t)];
                    for y in 0..self.height() {
                        for x in 0..self.width() {
                            data.push(T::from_f32(plane.get_f32(x, y)));
                        }
                    }
                }
            }
        }
        Array::from_shape_vec(IxDyn(&dims), data).expect("element count matches the shape")
    }
}

#[cfg(test)]
mod tests {
    use crate::stack::{Hyperstack, Plane, StackShape};
    use std::sync::Arc;

    #[test]
    fn export_follows_frame_slice_channel_order() {
        let planes: Vec<_> = (0..6)
            .map(|i| Arc::new(Plane::from_samples(2, 1, vec![i as f32, i as f32 + 0.5]).unwrap()))
            .collect();
        let stack =
            Hyperstack::new("nd", StackShape::new(3, 2, 1).unwrap(), planes).unwrap();
        let array = stack.to_ndarray::<f32>();
        assert_eq!(array.shape(), &[1, 2, 3, 1, 2]);
        // plane of channel 1, slice 1 sits at flat index 1 * 3 + 1 = 4
        assert_eq!(array[[0, 1, 1, 0, 0]], 4.0);
        assert_eq!(array[[0, 1, 1, 0, 1]], 4.5);
    }

    #[test]
    fn export_converts_to_integer_targets() {
        let plane = Plane::from_samples(1, 1, vec![300.7f32]).unwrap();
        let stack = Hyperstack::new(
            "clamp",
            StackShape::new(1, 1, 1).unwrap(),
            vec![Arc::new(plane)],
        )
        .unwrap();
        let array = stack.to_ndarray::<u8>();
        assert_eq!(array[[0, 0, 0, 0, 0]], 255);
    }
}
