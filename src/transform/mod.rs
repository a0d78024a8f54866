//! Invertible spatial transforms.
//!
//! A registered volume carries a coordinate map into the shared target
//! space. The fusion core only relies on the capability set of
//! [`InvertibleTransform`]: forward application, fallible inverse
//! application and bounds estimation. Concrete affine variants live in
//! [`affine`]; callers are free to supply their own implementations,
//! including non-linear ones.
//!
//! [`InvertibleTransform`]: ./trait.InvertibleTransform.html
//! [`affine`]: ./affine/index.html

pub mod affine;

pub use self::affine::{Affine2, Affine3};

use crate::error::Result;

/// An invertible coordinate map over 2 or 3 spatial dimensions.
///
/// Implementations must keep `apply` and `apply_inverse` consistent:
/// applying one after the other restores the point, up to floating point
/// error. The inverse may fail at individual points; this is a
/// recoverable per-point condition, not a structural one.
pub trait InvertibleTransform: Send + Sync {
    /// The number of spatial dimensions this transform operates on.
    fn dimensions(&self) -> usize;

    /// Map a point into the target space, in place.
    fn apply(&self, point: &mut [f64]);

    /// Map a point from the target space back to the source space, in
    /// place.
    ///
    /// # Errors
    ///
    /// - `HyperfuseError::NoninvertibleTransform` where the map has no
    ///   inverse; the point holds unspecified intermediate values then.
    fn apply_inverse(&self, point: &mut [f64]) -> Result<()>;

    /// Estimate the axis-aligned bounds of the image of the box spanned
    /// by `min` and `max`.
    ///
    /// Both slices carry the box corners on input and the transformed
    /// bounds on output. Implementations need not order the output: a
    /// reflecting transform may leave `min[d] > max[d]` for some axis,
    /// and consumers must take the pointwise minimum and maximum of the
    /// two corners. The default implementation maps every corner of the
    /// box through `apply` and folds the results.
    fn estimate_bounds(&self, min: &mut [f64], max: &mut [f64]) {
        let dims = min.len();
        debug_assert_eq!(dims, max.len());
        debug_assert_eq!(dims, self.dimensions());
        let mut out_min = vec![f64::INFINITY; dims];
        let mut out_max = vec![f64::NEG_INFINITY; dims];
        let mut corner = vec![0.0; dims];
        for mask in 0..(1u32 << dims) {
            for d in 0..dims {
                corner[d] = if mask & (1u32 << d) == 0 { min[d] } else { max[d] };
            }
            self.apply(&mut corner);
            for d in 0..dims {
                out_min[d] = out_min[d].min(corner[d]);
                out_max[d] = out_max[d].max(corner[d]);
            }
        }
        min.copy_from_slice(&out_min);
        max.copy_from_slice(&out_max);
    }
}

impl<T: InvertibleTransform + ?Sized> InvertibleTransform for &T {
    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn apply(&self, point: &mut [f64]) {
        (**self).apply(point)
    }

    fn apply_inverse(&self, point: &mut [f64]) -> Result<()> {
        (**self).apply_inverse(point)
    }

    fn estimate_bounds(&self, min: &mut [f64], max: &mut [f64]) {
        (**self).estimate_bounds(min, max)
    }
}

/// Adapter concatenating a uniform axial scale in front of another
/// transform.
///
/// Fusing anisotropic 3D volumes requires the z extent to be expressed in
/// lateral pixel units, so each registration transform is preceded by a
/// scale of `pixel_depth / pixel_width` along z. The adapter wraps
/// without touching the underlying transform, which keeps repeated bounds
/// estimation free of side effects. On 2D points the scale has no axis to
/// act on and the adapter is a plain passthrough.
#[derive(Debug, Clone, Copy)]
pub struct AxialScale<T> {
    inner: T,
    scale: f64,
}

impl<T: InvertibleTransform> AxialScale<T> {
    /// Wrap `inner`, scaling the z axis by `scale` before it applies.
    pub fn new(inner: T, scale: f64) -> Self {
        AxialScale { inner, scale }
    }
}

impl<T: InvertibleTransform> InvertibleTransform for AxialScale<T> {
    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn apply(&self, point: &mut [f64]) {
        if let Some(z) = point.get_mut(2) {
            *z *= self.scale;
        }
        self.inner.apply(point);
    }

    fn apply_inverse(&self, point: &mut [f64]) -> Result<()> {
        self.inner.apply_inverse(point)?;
        if let Some(z) = point.get_mut(2) {
            *z /= self.scale;
        }
        Ok(())
    }

    fn estimate_bounds(&self, min: &mut [f64], max: &mut [f64]) {
        // scale the box, then let the wrapped transform estimate with its
        // own method, preserving its corner conventions
        if let Some(z) = min.get_mut(2) {
            *z *= self.scale;
        }
        if let Some(z) = max.get_mut(2) {
            *z *= self.scale;
        }
        self.inner.estimate_bounds(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::affine::Affine3;
    use super::{AxialScale, InvertibleTransform};
    use approx::assert_abs_diff_eq;

    #[test]
    fn axial_scale_expands_z_only() {
        let scaled = AxialScale::new(Affine3::identity(), 4.0);
        let mut p = [1.0, 2.0, 3.0];
        scaled.apply(&mut p);
        assert_abs_diff_eq!(p[0], 1.0);
        assert_abs_diff_eq!(p[1], 2.0);
        assert_abs_diff_eq!(p[2], 12.0);
        scaled.apply_inverse(&mut p).unwrap();
        assert_abs_diff_eq!(p[2], 3.0);
    }

    #[test]
    fn axial_scale_feeds_bounds_estimation() {
        let scaled = AxialScale::new(Affine3::identity(), 2.0);
        let mut min = [0.0, 0.0, 0.0];
        let mut max = [9.0, 9.0, 4.0];
        scaled.estimate_bounds(&mut min, &mut max);
        assert_abs_diff_eq!(max[0], 9.0);
        assert_abs_diff_eq!(max[2], 8.0);
        assert_abs_diff_eq!(min[2], 0.0);
    }

    #[test]
    fn wrapping_does_not_mutate_the_inner_transform() {
        let inner = Affine3::translation(1.0, 0.0, 0.0);
        let scaled = AxialScale::new(inner, 2.0);
        // estimating twice through the adapter yields the same box
        let mut min_a = [0.0, 0.0, 0.0];
        let mut max_a = [1.0, 1.0, 1.0];
        scaled.estimate_bounds(&mut min_a, &mut max_a);
        let mut min_b = [0.0, 0.0, 0.0];
        let mut max_b = [1.0, 1.0, 1.0];
        scaled.estimate_bounds(&mut min_b, &mut max_b);
        assert_eq!(min_a, min_b);
        assert_eq!(max_a, max_b);
        // and the wrapped transform still maps z unscaled
        let mut p = [0.0, 0.0, 1.0];
        inner.apply(&mut p);
        assert_abs_diff_eq!(p[2], 1.0);
    }
}
