//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use oscilloscope_rs::{synthesis::generate_sine, types::linspace};

/// Duration of the reference recording in seconds
pub const REFERENCE_T_MAX: f64 = 3.0;

/// Samples in the reference recording
pub const REFERENCE_POINTS: usize = 300;

/// Tolerance used by the reference value checks
pub const REFERENCE_TOLERANCE: f64 = 1e-6;

/// 1 Hz sine sampled at 300 points over [0, 3] s
pub fn reference_signal() -> Vec<f64> {
    generate_sine(&linspace(0.0, REFERENCE_T_MAX, REFERENCE_POINTS), 1.0)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
