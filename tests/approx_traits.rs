#![cfg(feature = "approx")]

use approx::{assert_abs_diff_eq, assert_relative_eq, assert_relative_ne, assert_ulps_eq};
use core::f32::consts::FRAC_PI_2;
use lanemath::{Matrix, Quaternion, Vector};

// ── Vector ───────────────────────────────────────────────────────────

#[test]
fn vector_default_tolerances() {
    let a = Vector::new(1.0, 2.0, 3.0, 4.0);
    let b = Vector::new(1.0 + 1e-6, 2.0, 3.0, 4.0);
    assert_abs_diff_eq!(a, b);
    assert_relative_eq!(a, b);
    assert_relative_ne!(a, Vector::new(1.01, 2.0, 3.0, 4.0));
}

#[test]
fn vector_ulps() {
    let a = Vector::uniform(10.0);
    let b = Vector::uniform(f32::from_bits(10.0_f32.to_bits() + 4));
    assert_ulps_eq!(a, b);
    assert_ulps_eq!(a, b, max_ulps = 4);
}

#[test]
fn vector_explicit_epsilon() {
    let a = Vector::new(0.0, 0.0, 0.0, 0.0);
    let b = Vector::new(0.05, -0.05, 0.0, 0.0);
    assert_abs_diff_eq!(a, b, epsilon = 0.1);
}

// ── Quaternion ───────────────────────────────────────────────────────

#[test]
fn quaternion_inverse_product() {
    let q = Quaternion::from_axis_angle(Vector::new(0.0, 0.6, 0.8, 0.0), 1.2);
    assert_relative_eq!(q * q.inverse(), Quaternion::identity());
}

#[test]
fn quaternion_rotation() {
    let q = Quaternion::from_axis_angle(Vector::z_axis(), FRAC_PI_2);
    assert_abs_diff_eq!(q.rotate(Vector::x_axis()), Vector::new(0.0, 1.0, 0.0, 1.0));
}

// ── Matrix ───────────────────────────────────────────────────────────

#[test]
fn matrix_orthonormal() {
    let q = Quaternion::from_axis_angle(Vector::new(0.48, 0.6, 0.64, 0.0), 0.75);
    let m = Matrix::from_quaternion(q);
    assert_relative_eq!(m * m.transpose(), Matrix::identity());
}

#[test]
fn matrix_mismatch_detected() {
    let m = Matrix::identity();
    let n = Matrix::scaling(Vector::new(1.0, 1.0, 1.001, 0.0));
    assert_relative_ne!(m, n);
}
