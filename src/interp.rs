//! Linear interpolation over channel views.
//!
//! Every tap that falls outside the source domain resolves to a fixed
//! fill value. Nothing is clamped or wrapped, so positions entirely
//! outside the domain yield exactly the fill value, and positions near
//! the border blend real samples with it.

use crate::stack::ChannelView;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Bilinear/trilinear interpolator with a fixed out-of-bounds fill value.
#[derive(Debug, Clone, Copy)]
pub struct LinearInterpolator {
    fill_value: f32,
}

impl LinearInterpolator {
    /// Create an interpolator yielding `fill_value` for taps outside the
    /// source domain.
    pub fn new(fill_value: f32) -> Self {
        LinearInterpolator { fill_value }
    }

    /// The configured out-of-bounds value.
    pub fn fill_value(&self) -> f32 {
        self.fill_value
    }

    /// Interpolate `view` at a real-valued position.
    ///
    /// `pos` holds 2 or 3 components (x, y[, z]); a 2-component position
    /// samples the single plane at z = 0. Positions exactly on the grid
    /// reproduce the stored sample.
    pub fn interpolate(&self, view: &ChannelView, pos: &[f64]) -> f32 {
        let x = pos[0];
        let y = pos[1];
        let z = if pos.len() > 2 { pos[2] } else { 0.0 };

        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();
        let wx = (x - xf) as f32;
        let wy = (y - yf) as f32;
        let wz = (z - zf) as f32;
        let x0 = xf as i64;
        let y0 = yf as i64;
        let z0 = zf as i64;

        let fill = self.fill_value;
        let tap = |ix: i64, iy: i64, iz: i64| view.value_or(ix, iy, iz, fill);

        let c00 = lerp(tap(x0, y0, z0), tap(x0 + 1, y0, z0), wx);
        let c10 = lerp(tap(x0, y0 + 1, z0), tap(x0 + 1, y0 + 1, z0), wx);
        let c0 = lerp(c00, c10, wy);
        if wz == 0.0 {
            return c0;
        }

        let c01 = lerp(tap(x0, y0, z0 + 1), tap(x0 + 1, y0, z0 + 1), wx);
        let c11 = lerp(tap(x0, y0 + 1, z0 + 1), tap(x0 + 1, y0 + 1, z0 + 1), wx);
        let c1 = lerp(c01, c11, wy);
        lerp(c0, c1, wz)
    }
}
