//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::io::Write;
use std::path::PathBuf;

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

/// Assert every coordinate lies inside the chart space
pub fn assert_in_chart_space(x: f64, y: f64) {
    assert!(
        (0.0..=100.0).contains(&x) && (0.0..=100.0).contains(&y),
        "Point ({}, {}) is outside the 0..=100 chart space",
        x,
        y
    );
}

/// Write `contents` to a fresh file named `name` inside `dir`
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(contents.as_bytes()).expect("write fixture");
    path
}
