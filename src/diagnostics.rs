//! Numeric self-check
//!
//! Exercises the kernel and the linear-algebra types over deterministic
//! random samples and reports the worst error seen by each check.

use std::fmt;

use engine_math::kernel;
use engine_math::{Matrix2x2, Matrix3x3, Matrix4x4, Quaternion, Vector3};

use crate::config::DiagnosticsConfig;

/// Vector components are drawn from `[-VECTOR_RANGE, VECTOR_RANGE]`
const VECTOR_RANGE: f64 = 100.0;

/// Matrix entries are drawn from `[-MATRIX_RANGE, MATRIX_RANGE]`
const MATRIX_RANGE: f64 = 5.0;

/// Matrices with `|det|` below this are skipped as (near) singular
const MIN_DETERMINANT: f64 = 1.0;

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: &'static str,
    /// Samples actually evaluated (skipped ones are not counted)
    pub samples: usize,
    /// Worst error over all evaluated samples, `NaN` if any sample produced `NaN`
    pub max_error: f64,
    pub passed: bool,
}

/// Results of every check, in the order they ran
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub checks: Vec<CheckResult>,
}

impl Report {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for check in &self.checks {
            writeln!(
                f,
                "[{}] {:<28} samples={:<6} max_error={:e}",
                if check.passed { "PASS" } else { "FAIL" },
                check.name,
                check.samples,
                check.max_error,
            )?;
        }
        let passed = self.checks.iter().filter(|c| c.passed).count();
        write!(f, "{}/{} checks passed", passed, self.checks.len())
    }
}

/// Linear congruential generator; the same seed always yields the same report
struct Sampler {
    state: u64,
}

impl Sampler {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Uniform in `[0, 1)`
    fn next_unit(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Uniform in `(0, hi]`
    fn positive(&mut self, hi: f64) -> f64 {
        hi * (1.0 - self.next_unit())
    }

    fn vector3(&mut self, r: f64) -> Vector3 {
        Vector3::new(
            self.range(-r, r) as f32,
            self.range(-r, r) as f32,
            self.range(-r, r) as f32,
        )
    }

    fn matrix<const N: usize>(&mut self) -> [[f64; N]; N] {
        let mut m = [[0.0; N]; N];
        for row in m.iter_mut() {
            for v in row.iter_mut() {
                *v = self.range(-MATRIX_RANGE, MATRIX_RANGE);
            }
        }
        m
    }
}

/// Run `sample` up to `samples` times and keep the worst error.
///
/// `sample` returns `None` to skip an unusable input. A check that ends up
/// with no evaluated samples fails.
fn check(
    name: &'static str,
    samples: usize,
    tolerance: f64,
    mut sample: impl FnMut() -> Option<f64>,
) -> CheckResult {
    let mut evaluated = 0;
    let mut max_error: f64 = 0.0;

    for _ in 0..samples {
        let Some(error) = sample() else {
            continue;
        };
        evaluated += 1;
        if error.is_nan() || error > max_error {
            max_error = error;
        }
    }

    let passed = evaluated > 0 && max_error <= tolerance;
    if evaluated == 0 {
        log::warn!("{}: no usable samples", name);
    } else if !passed {
        log::warn!("{}: max error {:e} exceeds tolerance {:e}", name, max_error, tolerance);
    } else {
        log::debug!("{}: {} samples, max error {:e}", name, evaluated, max_error);
    }

    CheckResult {
        name,
        samples: evaluated,
        max_error,
        passed,
    }
}

fn relative_error(actual: f64, expected: f64) -> f64 {
    kernel::abs(actual - expected) / kernel::abs(expected)
}

/// Largest absolute deviation between two equally sized entry lists
fn max_deviation<'a>(a: impl Iterator<Item = &'a f64>, b: impl Iterator<Item = &'a f64>) -> f64 {
    a.zip(b)
        .map(|(x, y)| kernel::abs(x - y))
        .fold(0.0, kernel::max)
}

/// Run every self-check with the given configuration
pub fn run(config: &DiagnosticsConfig) -> Report {
    log::info!(
        "Running self-check: {} samples per check, seed {:#x}, tolerance {:e}",
        config.samples,
        config.seed,
        config.tolerance
    );

    let mut rng = Sampler::new(config.seed);
    let n = config.samples;
    let tol = config.tolerance;
    let mut checks = Vec::new();

    checks.push(check("pythagorean_identity", n, tol, || {
        let x = rng.range(-config.angle_range, config.angle_range);
        let sum = kernel::square(kernel::sin(x)) + kernel::square(kernel::cos(x));
        Some(kernel::abs(sum - 1.0))
    }));

    checks.push(check("exp_log_roundtrip", n, tol, || {
        let x = rng.positive(config.exp_range);
        Some(relative_error(kernel::exp(kernel::log(x)), x))
    }));

    checks.push(check("sqrt_square", n, tol, || {
        let x = rng.positive(config.exp_range);
        Some(relative_error(kernel::square(kernel::sqrt(x)), x))
    }));

    checks.push(check("vector_normalization", n, tol, || {
        let v = rng.vector3(VECTOR_RANGE);
        if v.length() == 0.0 {
            return None;
        }
        Some(kernel::abs(v.normalized().length() as f64 - 1.0))
    }));

    checks.push(check("quaternion_rotation_length", n, tol, || {
        let axis = rng.vector3(1.0);
        if axis.length() < 1e-3 {
            return None;
        }
        let angle = rng.range(-config.angle_range, config.angle_range);
        let q = Quaternion::from_axis_angle(axis.normalized(), angle as f32);
        let v = rng.vector3(VECTOR_RANGE);
        let before = v.length() as f64;
        let after = q.rotate(v).length() as f64;
        Some(kernel::abs(after - before) / kernel::max(before, 1.0))
    }));

    checks.push(check("matrix2_inverse", n, tol, || {
        let m = Matrix2x2::from(rng.matrix::<2>());
        if kernel::abs(m.determinant()) < MIN_DETERMINANT {
            return None;
        }
        let p: [[f64; 2]; 2] = (m * m.try_inverse()?).into();
        let i: [[f64; 2]; 2] = Matrix2x2::IDENTITY.into();
        Some(max_deviation(p.iter().flatten(), i.iter().flatten()))
    }));

    checks.push(check("matrix3_inverse", n, tol, || {
        let m = Matrix3x3::from(rng.matrix::<3>());
        if kernel::abs(m.determinant()) < MIN_DETERMINANT {
            return None;
        }
        let p: [[f64; 3]; 3] = (m * m.try_inverse()?).into();
        let i: [[f64; 3]; 3] = Matrix3x3::IDENTITY.into();
        Some(max_deviation(p.iter().flatten(), i.iter().flatten()))
    }));

    checks.push(check("matrix4_inverse", n, tol, || {
        let m = Matrix4x4::from(rng.matrix::<4>());
        if kernel::abs(m.determinant()) < MIN_DETERMINANT {
            return None;
        }
        let p = m * m.try_inverse()?;
        Some(max_deviation(p.m.iter().flatten(), Matrix4x4::IDENTITY.m.iter().flatten()))
    }));

    let report = Report { checks };
    if report.all_passed() {
        log::info!("All {} checks passed", report.checks.len());
    } else {
        log::warn!("{} check(s) failed", report.failures().count());
    }
    report
}
