use std::ops::{Add, Mul};

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use super::{Point2, Vec3};

/// A 3x3 homogeneous transform for points in the editing plane.
///
/// Points are treated as column vectors `(x, y, 1)`, so `a * b` applies `b`
/// first and then `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3 {
    pub m: Matrix3<f64>,
}

impl Matrix3x3 {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, 0.0, dx,
            0.0, 1.0, dy,
            0.0, 0.0, 1.0,
        );
        Self { m }
    }

    pub fn from_translation_point(p: &Point2) -> Self {
        Self::translation(p.x, p.y)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            sx,  0.0, 0.0,
            0.0, sy,  0.0,
            0.0, 0.0, 1.0,
        );
        Self { m }
    }

    pub fn uniform_scaling(s: f64) -> Self {
        Self::scaling(s, s)
    }

    /// Counter-clockwise rotation about Z by `degrees`.
    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        #[rustfmt::skip]
        let m = Matrix3::new(
            c,   -s,  0.0,
            s,   c,   0.0,
            0.0, 0.0, 1.0,
        );
        Self { m }
    }

    /// Shear: `x' = x + kx * y`, `y' = y + ky * x`.
    pub fn shear(kx: f64, ky: f64) -> Self {
        #[rustfmt::skip]
        let m = Matrix3::new(
            1.0, kx,  0.0,
            ky,  1.0, 0.0,
            0.0, 0.0, 1.0,
        );
        Self { m }
    }

    /// Conjugate `op` so it acts around `pivot`: `T(pivot) * op * T(-pivot)`.
    pub fn about_pivot(pivot: &Point2, op: &Matrix3x3) -> Self {
        Self::from_translation_point(pivot) * *op * Self::translation(-pivot.x, -pivot.y)
    }

    pub fn row(&self, i: usize) -> Vec3 {
        self.m.row(i).transpose()
    }

    pub fn column(&self, i: usize) -> Vec3 {
        self.m.column(i).into_owned()
    }

    /// Apply to a point with homogeneous coordinate 1. The resulting `w`
    /// is dropped; every constructor here keeps it at 1.
    pub fn transform_point(&self, p: &Point2) -> Point2 {
        let v = self.m * Vec3::new(p.x, p.y, 1.0);
        Point2::new(v.x, v.y)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix3x3 {
    type Output = Matrix3x3;
    fn mul(self, rhs: Matrix3x3) -> Self::Output {
        Matrix3x3 { m: self.m * rhs.m }
    }
}

impl Mul<f64> for Matrix3x3 {
    type Output = Matrix3x3;
    fn mul(self, rhs: f64) -> Self::Output {
        Matrix3x3 { m: self.m * rhs }
    }
}

impl Mul<Vec3> for Matrix3x3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.m * rhs
    }
}

impl Mul<Point2> for Matrix3x3 {
    type Output = Point2;
    fn mul(self, rhs: Point2) -> Self::Output {
        self.transform_point(&rhs)
    }
}

impl Add for Matrix3x3 {
    type Output = Matrix3x3;
    fn add(self, rhs: Matrix3x3) -> Self::Output {
        Matrix3x3 { m: self.m + rhs.m }
    }
}
