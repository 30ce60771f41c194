//! Numeric kernel and linear algebra
//!
//! Scalar functions computed from first principles, plus the small value
//! types built on top of them.
//!
//! ## Kernel
//!
//! - [`kernel`] - constants, rounding, `sqrt`/`exp`/`log`/`power`, trigonometry,
//!   hyperbolic functions, geometric formulas
//!
//! ## Vector Types
//!
//! - [`Vector2`] - 2D vector, also used as a position/scale
//! - [`Vector3`] - 3D vector with cross product
//! - [`Vector4`] - 4D vector, homogeneous input to [`Matrix4x4`]
//!
//! ## Rotation
//!
//! - [`Quaternion`] - rotation quaternion with Hamilton product and slerp
//!
//! ## Matrix Types
//!
//! - [`Matrix2x2`] - linear 2D transforms
//! - [`Matrix3x3`] - homogeneous 2D transforms
//! - [`Matrix4x4`] - homogeneous 3D transforms

pub mod kernel;
mod vector2;
mod vector3;
mod vector4;
mod quaternion;
pub mod matrix2x2;
pub mod matrix3x3;
pub mod matrix4x4;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
pub use quaternion::Quaternion;
pub use matrix2x2::Matrix2x2;
pub use matrix3x3::Matrix3x3;
pub use matrix4x4::Matrix4x4;
