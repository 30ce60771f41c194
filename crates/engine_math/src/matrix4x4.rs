//! 4x4 matrix for homogeneous 3D transformations
//!
//! Storage is row-major: `m[row][col]`, and vectors are columns, so
//! `A * B` applies `B` first. Only rotation about Z is provided as a factory.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::kernel::{self, EPSILON};
use crate::{Vector3, Vector4};

/// 4x4 matrix (row-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub m: [[f64; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create a matrix from its 16 entries in row-major order
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64, m01: f64, m02: f64, m03: f64,
        m10: f64, m11: f64, m12: f64, m13: f64,
        m20: f64, m21: f64, m22: f64, m23: f64,
        m30: f64, m31: f64, m32: f64, m33: f64,
    ) -> Self {
        Self {
            m: [
                [m00, m01, m02, m03],
                [m10, m11, m12, m13],
                [m20, m21, m22, m23],
                [m30, m31, m32, m33],
            ],
        }
    }

    /// Create a matrix from rows
    #[inline]
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// Scale along the three axes
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::new(
            sx, 0.0, 0.0, 0.0,
            0.0, sy, 0.0, 0.0,
            0.0, 0.0, sz, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Translation, stored in the last column
    pub fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        Self::new(
            1.0, 0.0, 0.0, tx,
            0.0, 1.0, 0.0, ty,
            0.0, 0.0, 1.0, tz,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis by `angle` radians
    pub fn rotate_z(angle: f64) -> Self {
        let c = kernel::cos(angle);
        let s = kernel::sin(angle);
        Self::new(
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    #[allow(clippy::needless_range_loop)]
    pub fn transpose(&self) -> Self {
        let mut result = Self::IDENTITY;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[j][i];
            }
        }
        result
    }

    /// Transposed cofactor matrix (the adjugate), flattened row-major.
    ///
    /// Each entry is the signed 3x3 minor written out as six triple products.
    #[rustfmt::skip]
    fn adjugate(&self) -> [f64; 16] {
        let m: [f64; 16] = bytemuck::cast(self.m);
        let mut inv = [0.0; 16];

        inv[0]  =  m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15] + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
        inv[4]  = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15] - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
        inv[8]  =  m[4] * m[9]  * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15] + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9]  * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14] - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];

        inv[1]  = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15] - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
        inv[5]  =  m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15] + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
        inv[9]  = -m[0] * m[9]  * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15] - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
        inv[13] =  m[0] * m[9]  * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14] + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];

        inv[2]  =  m[1] * m[6]  * m[15] - m[1] * m[7]  * m[14] - m[5] * m[2] * m[15] + m[5] * m[3] * m[14] + m[13] * m[2] * m[7]  - m[13] * m[3] * m[6];
        inv[6]  = -m[0] * m[6]  * m[15] + m[0] * m[7]  * m[14] + m[4] * m[2] * m[15] - m[4] * m[3] * m[14] - m[12] * m[2] * m[7]  + m[12] * m[3] * m[6];
        inv[10] =  m[0] * m[5]  * m[15] - m[0] * m[7]  * m[13] - m[4] * m[1] * m[15] + m[4] * m[3] * m[13] + m[12] * m[1] * m[7]  - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5]  * m[14] + m[0] * m[6]  * m[13] + m[4] * m[1] * m[14] - m[4] * m[2] * m[13] - m[12] * m[1] * m[6]  + m[12] * m[2] * m[5];

        inv[3]  = -m[1] * m[6]  * m[11] + m[1] * m[7]  * m[10] + m[5] * m[2] * m[11] - m[5] * m[3] * m[10] - m[9]  * m[2] * m[7]  + m[9]  * m[3] * m[6];
        inv[7]  =  m[0] * m[6]  * m[11] - m[0] * m[7]  * m[10] - m[4] * m[2] * m[11] + m[4] * m[3] * m[10] + m[8]  * m[2] * m[7]  - m[8]  * m[3] * m[6];
        inv[11] = -m[0] * m[5]  * m[11] + m[0] * m[7]  * m[9]  + m[4] * m[1] * m[11] - m[4] * m[3] * m[9]  - m[8]  * m[1] * m[7]  + m[8]  * m[3] * m[5];
        inv[15] =  m[0] * m[5]  * m[10] - m[0] * m[6]  * m[9]  - m[4] * m[1] * m[10] + m[4] * m[2] * m[9]  + m[8]  * m[1] * m[6]  - m[8]  * m[2] * m[5];

        inv
    }

    /// Determinant from the first row and its cofactors
    pub fn determinant(&self) -> f64 {
        let adj = self.adjugate();
        Self::first_row_expansion(&self.m, &adj)
    }

    fn first_row_expansion(m: &[[f64; 4]; 4], adj: &[f64; 16]) -> f64 {
        m[0][0] * adj[0] + m[0][1] * adj[4] + m[0][2] * adj[8] + m[0][3] * adj[12]
    }

    /// Closed-form inverse, or `None` when `|determinant| < EPSILON`
    pub fn try_inverse(&self) -> Option<Self> {
        let adj = self.adjugate();
        let det = Self::first_row_expansion(&self.m, &adj);
        if kernel::abs(det) < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let scaled = adj.map(|c| c * inv_det);
        Some(Self::from_rows(bytemuck::cast(scaled)))
    }

    /// Inverse, or the identity matrix when this matrix is singular
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::IDENTITY)
    }

    /// Matrix-vector product `M * v`
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let v = [v.x as f64, v.y as f64, v.z as f64, v.w as f64];
        let row = |r: &[f64; 4]| (r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3]) as f32;
        Vector4::new(row(&self.m[0]), row(&self.m[1]), row(&self.m[2]), row(&self.m[3]))
    }

    /// Transform a point `(x, y, z, 1)` and drop the homogeneous coordinate
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let r = self.transform(Vector4::new(p.x, p.y, p.z, 1.0));
        Vector3::new(r.x, r.y, r.z)
    }

    #[allow(clippy::needless_range_loop)]
    fn zip_with(&self, o: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut result = Self::IDENTITY;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = f(self.m[i][j], o.m[i][j]);
            }
        }
        result
    }
}

impl PartialEq for Matrix4x4 {
    fn eq(&self, o: &Self) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(o.m.iter().flatten())
            .all(|(&a, &b)| kernel::approx_equal(a, b))
    }
}

impl From<[[f64; 4]; 4]> for Matrix4x4 {
    fn from(m: [[f64; 4]; 4]) -> Self {
        Self::from_rows(m)
    }
}

impl From<Matrix4x4> for [[f64; 4]; 4] {
    fn from(m: Matrix4x4) -> Self {
        m.m
    }
}

/// Row-by-column product: `result = self * o`
impl std::ops::Mul for Matrix4x4 {
    type Output = Self;
    #[allow(clippy::needless_range_loop)]
    fn mul(self, o: Self) -> Self {
        let mut result = [[0.0f64; 4]; 4];

        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.m[i][k] * o.m[k][j];
                }
            }
        }

        Self::from_rows(result)
    }
}

impl std::ops::Add for Matrix4x4 {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        self.zip_with(&o, |a, b| a + b)
    }
}

impl std::ops::Sub for Matrix4x4 {
    type Output = Self;
    fn sub(self, o: Self) -> Self {
        self.zip_with(&o, |a, b| a - b)
    }
}

impl std::ops::Mul<f64> for Matrix4x4 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        self.zip_with(&self, |a, _| a * scalar)
    }
}

/// Scalar division; a divisor with `|s| < EPSILON` yields the identity matrix
impl std::ops::Div<f64> for Matrix4x4 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        if kernel::abs(scalar) < EPSILON {
            return Self::IDENTITY;
        }
        self * (1.0 / scalar)
    }
}
