//! Per-channel inverse-mapping resampler.

use crate::error::Result;
use crate::interp::LinearInterpolator;
use crate::stack::{ChannelView, Plane};
use crate::transform::InvertibleTransform;
use crate::typedef::SampleType;

/// Fill one output channel volume by inverse-mapping every output sample
/// into `view` and interpolating.
///
/// `size` and `offset` come from bounds estimation and are shared by all
/// channels of a fusion request. Every output coordinate is shifted by
/// the offset, mapped back through the transform's inverse and sampled
/// with interpolation; the result is converted to `target_type`. Returns
/// the filled planes in z order.
///
/// # Errors
///
/// - `HyperfuseError::NoninvertibleTransform` if the transform has no
///   inverse at some required point. The partially filled channel is
///   dropped; a degenerate registration cannot produce usable output for
///   any voxel.
pub(crate) fn fuse_channel<T: InvertibleTransform>(
    size: &[usize],
    offset: &[f64],
    view: &ChannelView,
    transform: &T,
    target_type: SampleType,
    interpolator: &LinearInterpolator,
) -> Result<Vec<Plane>> {
    let dims = size.len();
    let width = size[0] as u32;
    let height = size[1] as u32;
    let depth = if dims == 3 { size[2] } else { 1 };

    let mut planes = Vec::with_capacity(depth);
    let mut pos = vec![0.0f64; dims];
    for z in 0..depth {
        let mut plane = Plane::zeros(width, height, target_type);
        for y in 0..height {
            for x in 0..width {
                pos[0] = f64::from(x) + offset[0];
                pos[1] = f64::from(y) + offset[1];
                if dims == 3 {
                    pos[2] = z as f64 + offset[2];
                }
                transform.apply_inverse(&mut pos)?;
                plane.set_from_f32(x, y, interpolator.interpolate(view, &pos));
            }
        }
        planes.push(plane);
    }
    Ok(planes)
}
