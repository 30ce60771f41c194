//! Engine utilities
//!
//! Numeric kernel and linear algebra (re-exported as [`math`]) plus the
//! configuration and self-check used by the `engine_utilities` binary.

pub mod config;
pub mod diagnostics;

pub use engine_math as math;
