//! Shared test utilities for the colocation workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Mock destination grids and ungridded data (`fixtures`)
//! - Deterministic scattered point generators (`generators`)
//! - Approximate equality assertions for output grids
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
//! Then import in your integration tests:
//!
//! ```ignore
//! use test_utils::{make_square_5x3_2d_grid, assert_grid_approx_eq};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f64, 1.0_f64, 0.001_f64);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(left == right || diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro asserting that filled output rows match expected rows cell by cell.
///
/// Cells equal exactly (including matching infinities) always pass; other
/// cells must be within `epsilon`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_grid_approx_eq;
///
/// assert_grid_approx_eq!(out[0].filled_rows(), expected, 1.0e-15);
/// ```
#[macro_export]
macro_rules! assert_grid_approx_eq {
    ($actual:expr, $expected:expr, $epsilon:expr) => {{
        let actual: Vec<Vec<f64>> = $actual;
        let expected: Vec<Vec<f64>> = $expected;
        assert_eq!(actual.len(), expected.len(), "row count differs");
        for (row, (a_row, e_row)) in actual.iter().zip(&expected).enumerate() {
            assert_eq!(a_row.len(), e_row.len(), "column count differs in row {}", row);
            for (col, (&a, &e)) in a_row.iter().zip(e_row).enumerate() {
                if !(a == e || (a - e).abs() <= $epsilon) {
                    panic!(
                        "assertion failed: grid mismatch at [{}][{}]\n  actual: {:?}\nexpected: {:?}",
                        row, col, actual, expected
                    );
                }
            }
        }
    }};
}
