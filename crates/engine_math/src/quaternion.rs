//! Quaternion for representing rotations in 3D space
//!
//! A quaternion `(x, y, z, w)` has a vector part `(x, y, z)` and a scalar
//! part `w`. Only unit quaternions represent rotations; nothing here
//! normalizes implicitly, so call [`Quaternion::normalize`] or
//! [`Quaternion::normalized`] after composing or interpolating.

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::kernel;
use crate::Vector3;

/// Above this dot product [`Quaternion::slerp`] falls back to a normalized
/// lerp, since `sin(θ)` is too close to zero to divide by
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Quaternion with vector part (x, y, z) and scalar part w
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity rotation (0, 0, 0, 1)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// All-zero quaternion. Not a valid rotation.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Build a rotation of `angle_rad` around `axis`.
    ///
    /// The result is `(axis * sin(θ/2), cos(θ/2))`. `axis` must already be
    /// unit length; it is not normalized here.
    pub fn from_axis_angle(axis: Vector3, angle_rad: f32) -> Self {
        let half = angle_rad as f64 * 0.5;
        let s = kernel::sin(half) as f32;
        let c = kernel::cos(half) as f32;
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Component by index (0 = x, 1 = y, 2 = z, 3 = w)
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            3 => Some(self.w),
            _ => None,
        }
    }

    /// Four-component dot product
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared magnitude
    #[inline]
    pub fn length_square(&self) -> f32 {
        self.dot(*self)
    }

    /// Magnitude
    #[inline]
    pub fn length(&self) -> f32 {
        kernel::sqrt(self.length_square() as f64) as f32
    }

    /// Normalize in place; a zero-magnitude quaternion becomes [`Self::ZERO`]
    pub fn normalize(&mut self) {
        let mag = self.length();
        if mag > 0.0 {
            self.x /= mag;
            self.y /= mag;
            self.z /= mag;
            self.w /= mag;
        } else {
            *self = Self::ZERO;
        }
    }

    /// Normalized copy
    pub fn normalized(&self) -> Self {
        let mut result = *self;
        result.normalize();
        result
    }

    /// Negate the vector part. For unit quaternions this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate a vector with the sandwich product `q * (v, 0) * q*`.
    ///
    /// Assumes `self` is unit length.
    pub fn rotate(&self, v: Vector3) -> Vector3 {
        let p = Self::new(v.x, v.y, v.z, 0.0);
        let r = *self * p * self.conjugate();
        Vector3::new(r.x, r.y, r.z)
    }

    /// Spherical linear interpolation from `a` (t = 0) to `b` (t = 1).
    ///
    /// Takes the shorter arc by flipping `b` when the inputs point into
    /// opposite hemispheres. The result is normalized.
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        let mut dot = a.dot(b);
        let mut b = b;

        if dot < 0.0 {
            dot = -dot;
            b = b * -1.0;
        }

        if dot > SLERP_LINEAR_THRESHOLD {
            return (a + (b - a) * t).normalized();
        }

        let theta_0 = kernel::acos(dot as f64);
        let theta = theta_0 * t as f64;

        let sin_theta = kernel::sin(theta);
        let sin_theta_0 = kernel::sin(theta_0);

        let s0 = kernel::cos(theta) - dot as f64 * sin_theta / sin_theta_0;
        let s1 = sin_theta / sin_theta_0;

        (a * s0 as f32 + b * s1 as f32).normalized()
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        kernel::approx_equal(self.x as f64, other.x as f64)
            && kernel::approx_equal(self.y as f64, other.y as f64)
            && kernel::approx_equal(self.z as f64, other.z as f64)
            && kernel::approx_equal(self.w as f64, other.w as f64)
    }
}

impl Index<usize> for Quaternion {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Quaternion index out of range: {} (expected 0..4)", index),
        }
    }
}

impl IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Quaternion index out of range: {} (expected 0..4)", index),
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, q: Self) -> Self {
        Self::new(self.x + q.x, self.y + q.y, self.z + q.z, self.w + q.w)
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, q: Self) -> Self {
        Self::new(self.x - q.x, self.y - q.y, self.z - q.z, self.w - q.w)
    }
}

/// Hamilton product. Not commutative: `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
        )
    }
}

impl std::ops::Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w * scalar)
    }
}
