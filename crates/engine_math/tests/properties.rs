//! Property tests across the kernel and the value types
//!
//! Each property is checked over a few hundred deterministic samples:
//! 1. Kernel identities (trig, exp/log, sqrt)
//! 2. Vector invariants (normalization, cross product)
//! 3. Quaternion rotations
//! 4. Matrix inverses and determinants

use engine_math::kernel::{self, PI};
use engine_math::{Matrix2x2, Matrix3x3, Matrix4x4, Quaternion, Vector2, Vector3, Vector4};

const SAMPLES: usize = 500;

/// Small LCG so the samples are identical on every run
struct Samples(u64);

impl Samples {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in `[0, 1)`
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    fn vector3(&mut self, r: f64) -> Vector3 {
        Vector3::new(
            self.range(-r, r) as f32,
            self.range(-r, r) as f32,
            self.range(-r, r) as f32,
        )
    }

    fn entries<const N: usize>(&mut self) -> [[f64; N]; N] {
        let mut m = [[0.0; N]; N];
        for row in m.iter_mut() {
            for v in row.iter_mut() {
                *v = self.range(-5.0, 5.0);
            }
        }
        m
    }
}

fn relative_error(actual: f64, expected: f64) -> f64 {
    (actual - expected).abs() / expected.abs().max(1.0)
}

// ==================== Kernel ====================

#[test]
fn test_pythagorean_identity() {
    let mut s = Samples::new(1);
    for _ in 0..SAMPLES {
        let x = s.range(-20.0, 20.0);
        let sum = kernel::square(kernel::sin(x)) + kernel::square(kernel::cos(x));
        assert!((sum - 1.0).abs() < 1e-5, "sin²+cos² = {} at x = {}", sum, x);
    }
}

#[test]
fn test_trig_matches_reference() {
    let mut s = Samples::new(2);
    for _ in 0..SAMPLES {
        let x = s.range(-10.0, 10.0);
        assert!((kernel::sin(x) - x.sin()).abs() < 1e-5, "sin({})", x);
        assert!((kernel::cos(x) - x.cos()).abs() < 1e-5, "cos({})", x);
        assert!((kernel::atan(x) - x.atan()).abs() < 1e-5, "atan({})", x);
    }
}

#[test]
fn test_inverse_trig_roundtrip() {
    let mut s = Samples::new(3);
    for _ in 0..SAMPLES {
        let x = s.range(-1.0, 1.0);
        assert!((kernel::sin(kernel::asin(x)) - x).abs() < 1e-5, "sin(asin({}))", x);
        assert!((kernel::cos(kernel::acos(x)) - x).abs() < 1e-5, "cos(acos({}))", x);
    }
}

#[test]
fn test_exp_log_roundtrip() {
    let mut s = Samples::new(4);
    for _ in 0..SAMPLES {
        let x = s.range(0.01, 100.0);
        let e = relative_error(kernel::exp(kernel::log(x)), x);
        assert!(e < 1e-5, "exp(log({})) relative error {}", x, e);

        let y = s.range(-10.0, 10.0);
        let back = kernel::log(kernel::exp(y));
        assert!((back - y).abs() < 1e-5, "log(exp({})) = {}", y, back);
    }
}

#[test]
fn test_sqrt_square() {
    let mut s = Samples::new(5);
    for _ in 0..SAMPLES {
        // Spread across many orders of magnitude
        let x = kernel::power(10.0, s.range(-6.0, 8.0));
        let r = kernel::sqrt(x);
        assert!(relative_error(r * r / x, 1.0) < 1e-9, "sqrt({})² = {}", x, r * r);
    }
}

#[test]
fn test_power_matches_repeated_multiplication() {
    let mut s = Samples::new(6);
    for _ in 0..100 {
        let base = s.range(0.5, 3.0);
        let n = (s.next_unit() * 8.0) as i32;
        let mut expected = 1.0;
        for _ in 0..n {
            expected *= base;
        }
        let e = relative_error(kernel::power(base, n as f64), expected);
        assert!(e < 1e-5, "{}^{} relative error {}", base, n, e);
    }
}

// ==================== Vectors ====================

#[test]
fn test_normalized_vectors_have_unit_length() {
    let mut s = Samples::new(7);
    for _ in 0..SAMPLES {
        let v = s.vector3(100.0);
        if v.length() < 1e-3 {
            continue;
        }
        let len = v.normalized().length();
        assert!((len - 1.0).abs() < 1e-4, "|normalized({})| = {}", v, len);
    }
    assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
    assert_eq!(Vector4::ZERO.normalized(), Vector4::ZERO);
}

#[test]
fn test_cross_product_is_perpendicular() {
    let mut s = Samples::new(8);
    for _ in 0..SAMPLES {
        let a = s.vector3(10.0);
        let b = s.vector3(10.0);
        let c = a.cross(b);
        let scale = a.length() * b.length() * c.length().max(1.0);
        assert!(c.dot(a).abs() / scale.max(1.0) < 1e-4);
        assert!(c.dot(b).abs() / scale.max(1.0) < 1e-4);
        // Anticommutative
        assert_eq!(b.cross(a), -c);
    }
}

#[test]
fn test_lerp_endpoints() {
    let mut s = Samples::new(9);
    for _ in 0..100 {
        let a = s.vector3(1.0);
        let b = s.vector3(1.0);
        assert_eq!(Vector3::lerp(a, b, 0.0), a);
        assert_eq!(Vector3::lerp(a, b, 1.0), b);
        let mid = Vector3::lerp(a, b, 0.5);
        assert!((Vector3::distance(a, mid) - Vector3::distance(mid, b)).abs() < 1e-4);
    }
}

// ==================== Quaternions ====================

#[test]
fn test_unit_quaternion_rotation_preserves_length() {
    let mut s = Samples::new(10);
    for _ in 0..SAMPLES {
        let axis = s.vector3(1.0);
        if axis.length() < 1e-2 {
            continue;
        }
        let angle = s.range(-PI, PI) as f32;
        let q = Quaternion::from_axis_angle(axis.normalized(), angle);
        assert!((q.length() - 1.0).abs() < 1e-4);

        let v = s.vector3(10.0);
        let rotated = q.rotate(v);
        assert!(
            (rotated.length() - v.length()).abs() < 1e-3,
            "|rotate({})| = {} (expected {})",
            v,
            rotated.length(),
            v.length()
        );

        // Conjugate undoes the rotation
        let back = q.conjugate().rotate(rotated);
        assert!(Vector3::distance(back, v) < 1e-3);
    }
}

#[test]
fn test_quarter_turn_about_z() {
    let q = Quaternion::from_axis_angle(Vector3::Z, (PI / 2.0) as f32);
    let r = q.rotate(Vector3::X);
    assert!(Vector3::distance(r, Vector3::Y) < 1e-5, "got {}", r);
}

#[test]
fn test_slerp_stays_normalized() {
    let a = Quaternion::from_axis_angle(Vector3::Y, 0.3);
    let b = Quaternion::from_axis_angle(Vector3::Y, 2.1);
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let q = Quaternion::slerp(a, b, t);
        assert!((q.length() - 1.0).abs() < 1e-4, "t = {}", t);
    }
    assert_eq!(Quaternion::slerp(a, b, 0.0), a);
    assert_eq!(Quaternion::slerp(a, b, 1.0), b);
}

// ==================== Matrices ====================

#[test]
fn test_matrix2_inverse_roundtrip() {
    let mut s = Samples::new(11);
    for _ in 0..SAMPLES {
        let m = Matrix2x2::from(s.entries::<2>());
        if m.determinant().abs() < 1.0 {
            continue;
        }
        assert_eq!(m * m.inverse(), Matrix2x2::IDENTITY, "{:?}", m);
    }
}

#[test]
fn test_matrix3_inverse_roundtrip() {
    let mut s = Samples::new(12);
    for _ in 0..SAMPLES {
        let m = Matrix3x3::from(s.entries::<3>());
        if m.determinant().abs() < 1.0 {
            continue;
        }
        assert_eq!(m * m.inverse(), Matrix3x3::IDENTITY, "{:?}", m);
    }
}

#[test]
fn test_matrix4_inverse_roundtrip() {
    let mut s = Samples::new(13);
    for _ in 0..SAMPLES {
        let m = Matrix4x4::from(s.entries::<4>());
        if m.determinant().abs() < 1.0 {
            continue;
        }
        assert_eq!(m * m.inverse(), Matrix4x4::IDENTITY, "{:?}", m);
        assert_eq!(m.inverse() * m, Matrix4x4::IDENTITY, "{:?}", m);
    }
}

/// Sum of squared entries, the bound used to scale determinant errors
fn frobenius_square<const N: usize>(m: &[[f64; N]; N]) -> f64 {
    m.iter().flatten().map(|v| v * v).sum()
}

#[test]
fn test_determinant_is_multiplicative() {
    let mut s = Samples::new(14);
    for _ in 0..100 {
        let a = Matrix4x4::from(s.entries::<4>());
        let b = Matrix4x4::from(s.entries::<4>());
        let ab = a * b;
        // |det| <= ||M||_F^4, so compare against that rather than det itself
        let scale = frobenius_square(&ab.m).powi(2);
        let e = (ab.determinant() - a.determinant() * b.determinant()).abs() / scale;
        assert!(e < 1e-12, "det(AB) scaled error {}", e);

        let a3 = Matrix3x3::from(s.entries::<3>());
        let b3 = Matrix3x3::from(s.entries::<3>());
        let ab3 = a3 * b3;
        let scale3 = frobenius_square(&<[[f64; 3]; 3]>::from(ab3)).powf(1.5);
        let e3 = (ab3.determinant() - a3.determinant() * b3.determinant()).abs() / scale3;
        assert!(e3 < 1e-12, "3x3 det(AB) scaled error {}", e3);
    }
}

#[test]
fn test_inverse_of_product_reverses_order() {
    let t = Matrix4x4::translate(3.0, -1.0, 2.0);
    let r = Matrix4x4::rotate_z(0.7);
    let s = Matrix4x4::scale(2.0, 0.5, 4.0);
    let m = t * r * s;
    assert_eq!(m.inverse(), s.inverse() * r.inverse() * t.inverse());

    let p = Vector3::new(1.0, 2.0, 3.0);
    let back = m.inverse().transform_point(m.transform_point(p));
    assert!(Vector3::distance(back, p) < 1e-4, "got {}", back);
}

#[test]
fn test_singular_matrices_fall_back_to_identity() {
    let zero2 = Matrix2x2::from([[0.0; 2]; 2]);
    let zero3 = Matrix3x3::from([[0.0; 3]; 3]);
    let zero4 = Matrix4x4::from([[0.0; 4]; 4]);

    assert_eq!(<[[f64; 2]; 2]>::from(zero2.inverse()), [[1.0, 0.0], [0.0, 1.0]]);
    assert_eq!(
        <[[f64; 3]; 3]>::from(zero3.inverse()),
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
    );
    assert_eq!(<[[f64; 4]; 4]>::from(zero4.inverse()), Matrix4x4::IDENTITY.m);
}
