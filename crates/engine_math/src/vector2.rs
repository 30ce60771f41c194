//! 2D Vector type

use std::fmt;
use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::kernel;

/// 2D vector with x and y components
///
/// Equality is approximate: two vectors compare equal when every component
/// differs by less than [`kernel::EPSILON`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    /// Create a new Vector2
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The vector (0, 0)
    #[inline]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// The vector (1, 1)
    #[inline]
    pub const fn one() -> Self {
        Self::ONE
    }

    /// Component by index (0 = x, 1 = y), `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            _ => None,
        }
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product)
    #[inline]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_square(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude), computed with the kernel square root
    #[inline]
    pub fn length(self) -> f32 {
        kernel::sqrt(self.length_square() as f64) as f32
    }

    /// Unit-length copy, or the zero vector when the length is zero
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Normalize in place, with the same zero-vector fallback as [`Self::normalized`]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Distance between two points
    pub fn distance(a: Self, b: Self) -> f32 {
        (b - a).length()
    }

    /// Linear interpolation; `t` outside [0, 1] extrapolates
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }

    // ---- positional helpers ----

    /// Overwrite both components with `position`
    pub fn set_position(&mut self, position: Self) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Offset by `offset`
    pub fn move_by(&mut self, offset: Self) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Multiply each component by the matching factor
    pub fn set_scale(&mut self, factors: Self) {
        self.scale(factors);
    }

    /// Multiply each component by the matching factor
    pub fn scale(&mut self, factors: Self) {
        self.x *= factors.x;
        self.y *= factors.y;
    }

    /// Overwrite both components with `origin`
    pub fn set_origin(&mut self, origin: Self) {
        self.set_position(origin);
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        kernel::approx_equal(self.x as f64, other.x as f64)
            && kernel::approx_equal(self.y as f64, other.y as f64)
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Vector2 index out of range: {} (expected 0..2)", index),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Vector2 index out of range: {} (expected 0..2)", index),
        }
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector2({}, {})", self.x, self.y)
    }
}

impl From<[f32; 2]> for Vector2 {
    fn from(a: [f32; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

impl From<Vector2> for [f32; 2] {
    fn from(v: Vector2) -> Self {
        [v.x, v.y]
    }
}

// Operator overloads

impl std::ops::Add for Vector2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::SubAssign for Vector2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl std::ops::Mul<f32> for Vector2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::MulAssign<f32> for Vector2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl std::ops::Div<f32> for Vector2 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::DivAssign<f32> for Vector2 {
    #[inline]
    fn div_assign(&mut self, scalar: f32) {
        self.x /= scalar;
        self.y /= scalar;
    }
}

impl std::ops::Neg for Vector2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
