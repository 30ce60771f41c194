//! 2x2 matrix for linear 2D transformations

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::kernel::{self, EPSILON};
use crate::Vector2;

/// 2x2 matrix, fields named `m<row><col>`
///
/// The default value is the identity matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix2x2 {
    pub m00: f64,
    pub m01: f64,
    pub m10: f64,
    pub m11: f64,
}

impl Default for Matrix2x2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2x2 {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Create a matrix from its entries in row-major order
    #[inline]
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Axis-aligned scale
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy)
    }

    /// Counter-clockwise rotation by `angle` radians
    pub fn rotate(angle: f64) -> Self {
        let c = kernel::cos(angle);
        let s = kernel::sin(angle);
        Self::new(c, -s, s, c)
    }

    pub fn transpose(&self) -> Self {
        Self::new(self.m00, self.m10, self.m01, self.m11)
    }

    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Inverse, or `None` when `|determinant| < EPSILON`
    pub fn try_inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if kernel::abs(det) < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Self::new(
            self.m11 * inv_det,
            -self.m01 * inv_det,
            -self.m10 * inv_det,
            self.m00 * inv_det,
        ))
    }

    /// Inverse, falling back to the identity matrix for singular input
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    /// Matrix-vector product `M * v`
    pub fn transform(&self, v: Vector2) -> Vector2 {
        let (x, y) = (v.x as f64, v.y as f64);
        Vector2::new(
            (self.m00 * x + self.m01 * y) as f32,
            (self.m10 * x + self.m11 * y) as f32,
        )
    }
}

impl PartialEq for Matrix2x2 {
    fn eq(&self, o: &Self) -> bool {
        kernel::approx_equal(self.m00, o.m00)
            && kernel::approx_equal(self.m01, o.m01)
            && kernel::approx_equal(self.m10, o.m10)
            && kernel::approx_equal(self.m11, o.m11)
    }
}

impl From<[[f64; 2]; 2]> for Matrix2x2 {
    fn from(rows: [[f64; 2]; 2]) -> Self {
        Self::new(rows[0][0], rows[0][1], rows[1][0], rows[1][1])
    }
}

impl From<Matrix2x2> for [[f64; 2]; 2] {
    fn from(m: Matrix2x2) -> Self {
        [[m.m00, m.m01], [m.m10, m.m11]]
    }
}

impl std::ops::Mul for Matrix2x2 {
    type Output = Self;
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.m00 * o.m00 + self.m01 * o.m10,
            self.m00 * o.m01 + self.m01 * o.m11,
            self.m10 * o.m00 + self.m11 * o.m10,
            self.m10 * o.m01 + self.m11 * o.m11,
        )
    }
}

impl std::ops::Add for Matrix2x2 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self::new(
            self.m00 + o.m00,
            self.m01 + o.m01,
            self.m10 + o.m10,
            self.m11 + o.m11,
        )
    }
}

impl std::ops::Sub for Matrix2x2 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        Self::new(
            self.m00 - o.m00,
            self.m01 - o.m01,
            self.m10 - o.m10,
            self.m11 - o.m11,
        )
    }
}

impl std::ops::Mul<f64> for Matrix2x2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self::new(
            self.m00 * scalar,
            self.m01 * scalar,
            self.m10 * scalar,
            self.m11 * scalar,
        )
    }
}

/// Scalar division; a divisor with `|s| < EPSILON` yields the identity matrix
impl std::ops::Div<f64> for Matrix2x2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        if kernel::abs(scalar) < EPSILON {
            return Self::IDENTITY;
        }
        self * (1.0 / scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::PI;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Matrix2x2::default(), Matrix2x2::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotate_twice_equals_half_turn() {
        let quarter = Matrix2x2::rotate(PI / 2.0);
        assert_eq!(quarter, Matrix2x2::new(0.0, -1.0, 1.0, 0.0));
        assert_eq!(quarter * quarter, Matrix2x2::rotate(PI));
        assert_eq!(quarter * quarter, Matrix2x2::new(-1.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn test_rotate_vector() {
        let v = Matrix2x2::rotate(PI / 2.0).transform(Vector2::X);
        assert!((v.x - 0.0).abs() < 1e-5 && (v.y - 1.0).abs() < 1e-5, "got {:?}", v);
    }

    #[test]
    fn test_scale() {
        let s = Matrix2x2::scale(2.0, 3.0);
        assert_eq!(s.transform(Vector2::new(1.0, 1.0)), Vector2::new(2.0, 3.0));
        assert_eq!(s.determinant(), 6.0);
    }

    #[test]
    fn test_transpose() {
        let m = Matrix2x2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.transpose(), Matrix2x2::new(1.0, 3.0, 2.0, 4.0));
    }

    #[test]
    fn test_determinant_and_inverse() {
        let m = Matrix2x2::new(4.0, 7.0, 2.0, 6.0);
        assert_eq!(m.determinant(), 10.0);
        assert_eq!(m.inverse(), Matrix2x2::new(0.6, -0.7, -0.2, 0.4));
        assert_eq!(m * m.inverse(), Matrix2x2::IDENTITY);
        assert_eq!(m.inverse() * m, Matrix2x2::IDENTITY);
    }

    #[test]
    fn test_singular_inverse_falls_back_to_identity() {
        let m = Matrix2x2::new(1.0, 2.0, 2.0, 4.0);
        assert!(m.try_inverse().is_none());
        let inv = m.inverse();
        assert_eq!(inv.m00, 1.0);
        assert_eq!(inv.m01, 0.0);
        assert_eq!(inv.m10, 0.0);
        assert_eq!(inv.m11, 1.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Matrix2x2::new(1.0, 2.0, 3.0, 4.0);
        let b = Matrix2x2::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(a + b, Matrix2x2::new(6.0, 8.0, 10.0, 12.0));
        assert_eq!(b - a, Matrix2x2::new(4.0, 4.0, 4.0, 4.0));
        assert_eq!(a * b, Matrix2x2::new(19.0, 22.0, 43.0, 50.0));
        assert_ne!(a * b, b * a);
        assert_eq!(a * 2.0, Matrix2x2::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(a / 2.0, Matrix2x2::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn test_divide_by_near_zero_is_identity() {
        let a = Matrix2x2::new(1.0, 2.0, 3.0, 4.0);
        let r = a / 1e-9;
        assert_eq!(r.m00, 1.0);
        assert_eq!(r.m01, 0.0);
        assert_eq!(r.m10, 0.0);
        assert_eq!(r.m11, 1.0);
    }

    #[test]
    fn test_array_conversion() {
        let m: Matrix2x2 = [[1.0, 2.0], [3.0, 4.0]].into();
        assert_eq!(m, Matrix2x2::new(1.0, 2.0, 3.0, 4.0));
        let rows: [[f64; 2]; 2] = m.into();
        assert_eq!(rows, [[1.0, 2.0], [3.0, 4.0]]);
    }
}
