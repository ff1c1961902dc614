//! Shared test utilities for the primitive-array workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Deterministic data generators
//! - Scenario and CSV fixtures
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{create_ramp, fixtures::scenario};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Asserts two float slices have the same length and agree element-wise,
/// treating NaN as equal to NaN.
#[macro_export]
macro_rules! assert_slices_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f64] = &$left;
        let right: &[f64] = &$right;
        assert_eq!(left.len(), right.len(), "slice lengths differ");
        for (i, (l, r)) in left.iter().zip(right).enumerate() {
            if l.is_nan() || r.is_nan() {
                assert!(
                    l.is_nan() && r.is_nan(),
                    "assertion failed at [{}]: {:?} vs {:?}",
                    i,
                    l,
                    r
                );
            } else {
                $crate::assert_approx_eq!(*l, *r, $epsilon);
            }
        }
    }};
}
