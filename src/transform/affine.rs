//! Affine transforms over homogeneous `nalgebra` matrices.

use super::InvertibleTransform;
use crate::error::{HyperfuseError, Result};
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// An invertible 2D affine transform backed by a homogeneous 3x3 matrix.
///
/// The inverse matrix is computed once at construction; applying the
/// inverse of a singular transform fails at every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    matrix: Matrix3<f64>,
    inverse: Option<Matrix3<f64>>,
}

impl Affine2 {
    /// Create a transform from its homogeneous matrix.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        let inverse = matrix.try_inverse();
        Affine2 { matrix, inverse }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Affine2::from_matrix(Matrix3::identity())
    }

    /// A pure translation by `(tx, ty)`.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Affine2::from_matrix(Matrix3::new(
            1.0, 0.0, tx,
            0.0, 1.0, ty,
            0.0, 0.0, 1.0,
        ))
    }

    /// An axis-aligned scaling. Negative factors reflect.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Affine2::from_matrix(Matrix3::new(
            sx, 0.0, 0.0,
            0.0, sy, 0.0,
            0.0, 0.0, 1.0,
        ))
    }

    /// A rigid transform: rotation by `theta` radians followed by a
    /// translation.
    pub fn rigid(theta: f64, tx: f64, ty: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Affine2::from_matrix(Matrix3::new(
            c, -s, tx,
            s, c, ty,
            0.0, 0.0, 1.0,
        ))
    }

    /// Borrow the homogeneous matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}

impl InvertibleTransform for Affine2 {
    fn dimensions(&self) -> usize {
        2
    }

    fn apply(&self, point: &mut [f64]) {
        let p = self.matrix * Vector3::new(point[0], point[1], 1.0);
        point[0] = p[0];
        point[1] = p[1];
    }

    fn apply_inverse(&self, point: &mut [f64]) -> Result<()> {
        let inverse = self.inverse.ok_or(HyperfuseError::NoninvertibleTransform)?;
        let p = inverse * Vector3::new(point[0], point[1], 1.0);
        point[0] = p[0];
        point[1] = p[1];
        Ok(())
    }
}

/// An invertible 3D affine transform backed by a homogeneous 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine3 {
    matrix: Matrix4<f64>,
    inverse: Option<Matrix4<f64>>,
}

impl Affine3 {
    /// Create a transform from its homogeneous matrix.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        let inverse = matrix.try_inverse();
        Affine3 { matrix, inverse }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Affine3::from_matrix(Matrix4::identity())
    }

    /// A pure translation by `(tx, ty, tz)`.
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Affine3::from_matrix(Matrix4::new(
            1.0, 0.0, 0.0, tx,
            0.0, 1.0, 0.0, ty,
            0.0, 0.0, 1.0, tz,
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// An axis-aligned scaling. Negative factors reflect.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Affine3::from_matrix(Matrix4::new(
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ))
    }

    /// Borrow the homogeneous matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }
}

impl InvertibleTransform for Affine3 {
    fn dimensions(&self) -> usize {
        3
    }

    fn apply(&self, point: &mut [f64]) {
        let p = self.matrix * Vector4::new(point[0], point[1], point[2], 1.0);
        point[0] = p[0];
        point[1] = p[1];
        point[2] = p[2];
    }

    fn apply_inverse(&self, point: &mut [f64]) -> Result<()> {
        let inverse = self.inverse.ok_or(HyperfuseError::NoninvertibleTransform)?;
        let p = inverse * Vector4::new(point[0], point[1], point[2], 1.0);
        point[0] = p[0];
        point[1] = p[1];
        point[2] = p[2];
        Ok(())
    }
}
