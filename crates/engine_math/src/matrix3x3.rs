//! 3x3 matrix for homogeneous 2D transformations
//!
//! Points are column vectors `(x, y, 1)`; translation would live in the
//! third column.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::kernel::{self, EPSILON};
use crate::Vector2;

/// 3x3 matrix, fields named `m<row><col>`
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix3x3 {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3x3 {
    pub const IDENTITY: Self = Self::new(
        1.0, 0.0, 0.0,
        0.0, 1.0, 0.0,
        0.0, 0.0, 1.0,
    );

    /// Create a matrix from its entries in row-major order
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        m00: f64, m01: f64, m02: f64,
        m10: f64, m11: f64, m12: f64,
        m20: f64, m21: f64, m22: f64,
    ) -> Self {
        Self { m00, m01, m02, m10, m11, m12, m20, m21, m22 }
    }

    /// Homogeneous 2D scale
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(
            sx, 0.0, 0.0,
            0.0, sy, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Homogeneous 2D rotation by `angle` radians (counter-clockwise)
    pub fn rotate(angle: f64) -> Self {
        let c = kernel::cos(angle);
        let s = kernel::sin(angle);
        Self::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    pub fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20,
            self.m01, self.m11, self.m21,
            self.m02, self.m12, self.m22,
        )
    }

    /// Determinant by first-row cofactor expansion
    pub fn determinant(&self) -> f64 {
        self.m00 * (self.m11 * self.m22 - self.m12 * self.m21)
            - self.m01 * (self.m10 * self.m22 - self.m12 * self.m20)
            + self.m02 * (self.m10 * self.m21 - self.m11 * self.m20)
    }

    /// Inverse via the adjugate, or `None` when `|determinant| < EPSILON`
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if kernel::abs(det) < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        Some(Self::new(
            (self.m11 * self.m22 - self.m12 * self.m21) * inv_det,
            (self.m02 * self.m21 - self.m01 * self.m22) * inv_det,
            (self.m01 * self.m12 - self.m02 * self.m11) * inv_det,
            (self.m12 * self.m20 - self.m10 * self.m22) * inv_det,
            (self.m00 * self.m22 - self.m02 * self.m20) * inv_det,
            (self.m02 * self.m10 - self.m00 * self.m12) * inv_det,
            (self.m10 * self.m21 - self.m11 * self.m20) * inv_det,
            (self.m01 * self.m20 - self.m00 * self.m21) * inv_det,
            (self.m00 * self.m11 - self.m01 * self.m10) * inv_det,
        ))
    }

    /// Inverse, or the identity matrix when this matrix is singular
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    /// Transform a 2D point as `(x, y, 1)`, dropping the homogeneous row
    pub fn transform_point(&self, p: Vector2) -> Vector2 {
        let (x, y) = (p.x as f64, p.y as f64);
        Vector2::new(
            (self.m00 * x + self.m01 * y + self.m02) as f32,
            (self.m10 * x + self.m11 * y + self.m12) as f32,
        )
    }

    fn entries(&self) -> [f64; 9] {
        [
            self.m00, self.m01, self.m02,
            self.m10, self.m11, self.m12,
            self.m20, self.m21, self.m22,
        ]
    }

    fn map(&self, o: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let a = self.entries();
        let b = o.entries();
        Self::new(
            f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]),
            f(a[3], b[3]), f(a[4], b[4]), f(a[5], b[5]),
            f(a[6], b[6]), f(a[7], b[7]), f(a[8], b[8]),
        )
    }
}

impl PartialEq for Matrix3x3 {
    fn eq(&self, o: &Self) -> bool {
        self.entries()
            .iter()
            .zip(o.entries().iter())
            .all(|(&a, &b)| kernel::approx_equal(a, b))
    }
}

impl From<[[f64; 3]; 3]> for Matrix3x3 {
    fn from(r: [[f64; 3]; 3]) -> Self {
        Self::new(
            r[0][0], r[0][1], r[0][2],
            r[1][0], r[1][1], r[1][2],
            r[2][0], r[2][1], r[2][2],
        )
    }
}

impl From<Matrix3x3> for [[f64; 3]; 3] {
    fn from(m: Matrix3x3) -> Self {
        [
            [m.m00, m.m01, m.m02],
            [m.m10, m.m11, m.m12],
            [m.m20, m.m21, m.m22],
        ]
    }
}

impl std::ops::Mul for Matrix3x3 {
    type Output = Self;
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.m00 * o.m00 + self.m01 * o.m10 + self.m02 * o.m20,
            self.m00 * o.m01 + self.m01 * o.m11 + self.m02 * o.m21,
            self.m00 * o.m02 + self.m01 * o.m12 + self.m02 * o.m22,

            self.m10 * o.m00 + self.m11 * o.m10 + self.m12 * o.m20,
            self.m10 * o.m01 + self.m11 * o.m11 + self.m12 * o.m21,
            self.m10 * o.m02 + self.m11 * o.m12 + self.m12 * o.m22,

            self.m20 * o.m00 + self.m21 * o.m10 + self.m22 * o.m20,
            self.m20 * o.m01 + self.m21 * o.m11 + self.m22 * o.m21,
            self.m20 * o.m02 + self.m21 * o.m12 + self.m22 * o.m22,
        )
    }
}

impl std::ops::Add for Matrix3x3 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        self.map(&o, |a, b| a + b)
    }
}

impl std::ops::Sub for Matrix3x3 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        self.map(&o, |a, b| a - b)
    }
}

impl std::ops::Mul<f64> for Matrix3x3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.map(&self, |a, _| a * scalar)
    }
}

/// Scalar division; a divisor with `|s| < EPSILON` yields the identity matrix
impl std::ops::Div<f64> for Matrix3x3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        if kernel::abs(scalar) < EPSILON {
            return Self::IDENTITY;
        }
        self * (1.0 / scalar)
    }
}
