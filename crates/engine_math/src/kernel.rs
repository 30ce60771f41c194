//! Scalar numeric kernel
//!
//! Elementary functions computed from first principles: nothing in here calls
//! into `f64::sin`, `f64::sqrt` or any other platform math routine.
//!
//! Domain violations (square root of a negative, logarithm of a non-positive
//! number, `asin` outside [-1, 1], ...) are reported by returning `NaN`.
//! Callers must check for it explicitly.
//!
//! The transcendental functions are truncated series summed until the next
//! term drops below [`EPSILON`], so results are accurate to roughly that
//! tolerance rather than to the last ulp.

/// Archimedes' constant
#[allow(clippy::approx_constant, clippy::excessive_precision)]
pub const PI: f64 = 3.14159265358979323846;

/// Euler's number
#[allow(clippy::approx_constant, clippy::excessive_precision)]
pub const EULER: f64 = 2.71828182845904523536;

/// Universal tolerance for approximate equality and singularity checks
pub const EPSILON: f64 = 1e-6;

/// Natural logarithm of 2, used for range reduction in [`log`]
#[allow(clippy::approx_constant, clippy::excessive_precision)]
const LN_2: f64 = 0.693147180559945309417;

/// Natural logarithm of 10, used by [`log10`]
#[allow(clippy::approx_constant, clippy::excessive_precision)]
const LN_10: f64 = 2.302585092994045684018;

/// Bounds of the interval [`log`] reduces its argument into
#[allow(clippy::approx_constant)]
const SQRT_2: f64 = 1.4142135623730951;
#[allow(clippy::approx_constant)]
const FRAC_1_SQRT_2: f64 = 0.7071067811865476;

/// Largest argument for which `exp` is still finite in `f64`
const MAX_EXP_ARG: f64 = 709.782712893384;

/// Newton-Raphson iteration count for [`sqrt`]
const SQRT_ITERATIONS: usize = 20;

/// Above this many multiples, [`modulo`] pre-reduces with a single division
const MODULO_LOOP_LIMIT: f64 = 1024.0;

/// Quotients this large leave no meaningful remainder in `f64`
const MODULO_PRECISION_LIMIT: f64 = 9_007_199_254_740_992.0;

// ==================== Basic helpers ====================

/// Absolute value
#[inline]
pub fn abs(x: f64) -> f64 {
    if x < 0.0 { -x } else { x }
}

/// Larger of two values
#[inline]
pub fn max(a: f64, b: f64) -> f64 {
    if a > b { a } else { b }
}

/// Smaller of two values
#[inline]
pub fn min(a: f64, b: f64) -> f64 {
    if a < b { a } else { b }
}

#[inline]
pub fn square(x: f64) -> f64 {
    x * x
}

#[inline]
pub fn cube(x: f64) -> f64 {
    x * x * x
}

/// Approximate equality using [`EPSILON`]: `|a - b| < EPSILON`
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    approx_equal_within(a, b, EPSILON)
}

/// Approximate equality with a caller-supplied tolerance
#[inline]
pub fn approx_equal_within(a: f64, b: f64, epsilon: f64) -> bool {
    abs(a - b) < epsilon
}

/// Truncate toward zero without going through the platform math library
#[inline]
fn truncate(x: f64) -> f64 {
    (x as i64) as f64
}

#[inline]
fn is_integral(x: f64) -> bool {
    abs(x) < MODULO_PRECISION_LIMIT && truncate(x) == x
}

// ==================== Rounding ====================

/// Round half away from zero
pub fn round(x: f64) -> i32 {
    if x >= 0.0 {
        (x + 0.5) as i32
    } else {
        (x - 0.5) as i32
    }
}

/// Largest integer not greater than `x`
pub fn floor(x: f64) -> i32 {
    let i = x as i32;
    if x < 0.0 && x != i as f64 {
        i - 1
    } else {
        i
    }
}

/// Smallest integer not less than `x`
pub fn ceil(x: f64) -> i32 {
    let i = x as i32;
    if x > 0.0 && x != i as f64 {
        i + 1
    } else {
        i
    }
}

/// Bring `a` into `[0, b)` by repeated subtraction/addition of `b`.
///
/// This is meant for bounded angle reduction. When `a` is more than a
/// thousand multiples of `b` away from the target range a single division
/// removes the bulk first; beyond 2^53 multiples there is no meaningful
/// remainder and `NaN` is returned. `b <= 0` or non-finite inputs also
/// yield `NaN`.
pub fn modulo(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() || b <= 0.0 {
        return f64::NAN;
    }

    let mut a = a;
    let multiples = abs(a / b);
    if multiples >= MODULO_PRECISION_LIMIT {
        return f64::NAN;
    }
    if multiples > MODULO_LOOP_LIMIT {
        a -= b * truncate(a / b);
    }

    while a >= b {
        a -= b;
    }
    while a < 0.0 {
        a += b;
    }
    // `a + b` can round up to exactly `b` for tiny negative `a`
    if a >= b {
        a = 0.0;
    }
    a
}

// ==================== Roots, powers, exponentials ====================

/// Square root by Newton-Raphson.
///
/// Runs exactly 20 iterations starting from `m / 2`, where `m` is `x` scaled
/// by powers of four into `[0.25, 4)`; the scale is undone afterwards with
/// the matching power of two. Negative input yields `NaN`.
pub fn sqrt(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 || x.is_infinite() {
        return x;
    }

    let mut m = x;
    let mut scale = 1.0;
    while m >= 4.0 {
        m *= 0.25;
        scale *= 2.0;
    }
    while m < 0.25 {
        m *= 4.0;
        scale *= 0.5;
    }

    let mut guess = m / 2.0;
    for _ in 0..SQRT_ITERATIONS {
        guess = (guess + m / guess) / 2.0;
    }
    guess * scale
}

/// `e^x` by its Taylor series.
///
/// Negative arguments are evaluated as `1 / e^-x` so the series never has to
/// cancel large alternating terms.
pub fn exp(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x > MAX_EXP_ARG {
        return f64::INFINITY;
    }
    if x < 0.0 {
        return 1.0 / exp(-x);
    }

    let mut result = 1.0;
    let mut term = 1.0;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        term *= x / n;
        result += term;
        n += 1.0;
    }
    result
}

/// Natural logarithm via `2 * atanh((x - 1) / (x + 1))`.
///
/// `x` is first brought into `[1/√2, √2]` by halving/doubling, each step
/// adding or removing `ln 2`, which keeps `|(x - 1) / (x + 1)|` below 0.18.
pub fn log(x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return f64::NAN;
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }

    let mut m = x;
    let mut k = 0.0;
    while m > SQRT_2 {
        m *= 0.5;
        k += 1.0;
    }
    while m < FRAC_1_SQRT_2 {
        m *= 2.0;
        k -= 1.0;
    }

    let y = (m - 1.0) / (m + 1.0);
    let y2 = y * y;
    let mut result = 0.0;
    let mut term = y;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        result += term / (2.0 * n - 1.0);
        term *= y2;
        n += 1.0;
    }
    2.0 * result + k * LN_2
}

/// Base-10 logarithm
pub fn log10(x: f64) -> f64 {
    log(x) / LN_10
}

/// `base` raised to `exponent`.
///
/// - base 0: `NaN` for `exponent <= 0`, otherwise 0
/// - exponent 0: 1
/// - negative base: only integral exponents are defined, anything else is `NaN`
/// - otherwise `exp(exponent * log(base))`
pub fn power(base: f64, exponent: f64) -> f64 {
    if base == 0.0 {
        if exponent <= 0.0 {
            return f64::NAN;
        }
        return 0.0;
    }
    if exponent == 0.0 {
        return 1.0;
    }
    if base < 0.0 {
        if !is_integral(exponent) {
            return f64::NAN;
        }
        let magnitude = power(-base, exponent);
        return if (exponent as i64) % 2 == 0 { magnitude } else { -magnitude };
    }
    exp(exponent * log(base))
}

/// `n!` as a float; `NaN` for negative `n`
pub fn factorial(n: i32) -> f64 {
    if n < 0 {
        return f64::NAN;
    }
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
    }
    result
}

// ==================== Trigonometry ====================

/// Degrees to radians
#[inline]
pub fn radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

/// Radians to degrees
#[inline]
pub fn degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Sine by Taylor series after reducing `x` into `[0, 2π)`
pub fn sin(x: f64) -> f64 {
    let x = modulo(x, 2.0 * PI);
    if x.is_nan() {
        return f64::NAN;
    }

    let x2 = x * x;
    let mut result = x;
    let mut term = x;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        term *= -x2 / ((2.0 * n) * (2.0 * n + 1.0));
        result += term;
        n += 1.0;
    }
    result
}

/// Cosine by its own Taylor series after reducing `x` into `[0, 2π)`
pub fn cos(x: f64) -> f64 {
    let x = modulo(x, 2.0 * PI);
    if x.is_nan() {
        return f64::NAN;
    }

    let x2 = x * x;
    let mut result = 1.0;
    let mut term = 1.0;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        term *= -x2 / ((2.0 * n - 1.0) * (2.0 * n));
        result += term;
        n += 1.0;
    }
    result
}

/// Tangent; `+inf` where the cosine is exactly zero
pub fn tan(x: f64) -> f64 {
    let s = sin(x);
    let c = cos(x);
    if c != 0.0 {
        s / c
    } else {
        f64::INFINITY
    }
}

/// Arcsine, `NaN` outside `[-1, 1]`.
///
/// For `|x| > 0.5` the half-angle identity
/// `asin(x) = π/2 - 2 asin(sqrt((1 - x) / 2))` keeps the series argument
/// small; the raw series barely converges near ±1.
pub fn asin(x: f64) -> f64 {
    if x.is_nan() || !(-1.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x < -0.5 {
        return -asin(-x);
    }
    if x > 0.5 {
        return PI / 2.0 - 2.0 * asin_series(sqrt((1.0 - x) / 2.0));
    }
    asin_series(x)
}

fn asin_series(x: f64) -> f64 {
    let x2 = x * x;
    let mut result = x;
    let mut term = x;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        term *= (2.0 * n - 1.0) * (2.0 * n - 1.0) * x2 / ((2.0 * n) * (2.0 * n + 1.0));
        result += term;
        n += 1.0;
    }
    result
}

/// Arccosine as `π/2 - asin(x)`
pub fn acos(x: f64) -> f64 {
    PI / 2.0 - asin(x)
}

/// Arctangent.
///
/// The Maclaurin series only converges on `[-1, 1]`, so larger magnitudes
/// go through `atan(x) = ±π/2 - atan(1/x)`. Arguments above 0.5 are halved
/// in angle with `atan(x) = 2 atan(x / (1 + sqrt(1 + x²)))` first.
pub fn atan(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return -atan(-x);
    }
    if x > 1.0 {
        return PI / 2.0 - atan(1.0 / x);
    }
    if x > 0.5 {
        return 2.0 * atan(x / (1.0 + sqrt(1.0 + x * x)));
    }

    let x2 = x * x;
    let mut result = x;
    let mut term = x;
    let mut n = 1.0;
    while abs(term) > EPSILON {
        term *= -x2 * (2.0 * n - 1.0) / (2.0 * n + 1.0);
        result += term;
        n += 1.0;
    }
    result
}

// ==================== Hyperbolic ====================

pub fn sinh(x: f64) -> f64 {
    (exp(x) - exp(-x)) / 2.0
}

pub fn cosh(x: f64) -> f64 {
    (exp(x) + exp(-x)) / 2.0
}

/// Hyperbolic tangent, saturating at ±1 once `e^2x` leaves `f64` range
pub fn tanh(x: f64) -> f64 {
    let e2x = exp(2.0 * x);
    if e2x.is_infinite() {
        return 1.0;
    }
    (e2x - 1.0) / (e2x + 1.0)
}

// ==================== Geometry ====================

pub fn circle_area(radius: f64) -> f64 {
    PI * radius * radius
}

pub fn circle_circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

pub fn rectangle_area(width: f64, height: f64) -> f64 {
    width * height
}

pub fn rectangle_perimeter(width: f64, height: f64) -> f64 {
    2.0 * (width + height)
}

pub fn triangle_area(base: f64, height: f64) -> f64 {
    0.5 * base * height
}

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    sqrt(dx * dx + dy * dy)
}

/// Linear interpolation, unclamped
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
