//! Portable scalar backend.
//!
//! Lanes are a plain `[f32; 4]` and no operation is overridden: every method
//! is the provided definition from [`crate::traits`]. This is the reference
//! the SIMD backends are tested against, and the backend used on targets
//! without a supported instruction set or with the `force-scalar` feature.

use crate::simd::BackendKind;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};

/// Portable backend over `[f32; 4]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scalar;

impl VectorOps for Scalar {
    type Lanes = [f32; 4];

    const KIND: BackendKind = BackendKind::Scalar;

    #[inline]
    fn set(x: f32, y: f32, z: f32, w: f32) -> [f32; 4] {
        [x, y, z, w]
    }

    #[inline]
    fn to_array(v: [f32; 4]) -> [f32; 4] {
        v
    }
}

impl QuaternionOps for Scalar {}

impl MatrixOps for Scalar {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_summation_order() {
        // ((a + b) + c) + d would give 1 here
        let v0 = [1.0e8, 1.0, -1.0e8, 1.0];
        let v1 = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(Scalar::dot(v0, v1), [0.0; 4]);
    }

    #[test]
    fn cross3_clears_w() {
        let r = Scalar::cross3([1.0, 0.0, 0.0, 5.0], [0.0, 1.0, 0.0, 7.0]);
        assert_eq!(r, [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn normalize3_keeps_w() {
        let r = Scalar::normalize3([3.0, 0.0, 4.0, 9.0]);
        assert_eq!(r, [0.6, 0.0, 0.8, 9.0]);
    }

    #[test]
    fn fast_variants_are_exact() {
        let v = [1.0, 2.0, 2.0, 4.0];
        assert_eq!(Scalar::length_fast(v), Scalar::length(v));
        assert_eq!(Scalar::normalize3_fast(v), Scalar::normalize3(v));
    }

    #[test]
    fn shuffle_accepts_full_byte_range() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(Scalar::shuffle::<0x00>(v), [1.0; 4]);
        assert_eq!(Scalar::shuffle::<0xFF>(v), [4.0; 4]);
        assert_eq!(Scalar::shuffle::<0x1B>(v), [4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn slerp_coincident_returns_target() {
        let q = [0.0, 0.0, 0.0, 1.0];
        assert_eq!(Scalar::quat_slerp(q, q, 0.25), q);
        // opposite sign is the same rotation; shortest arc gives back q
        let nq = [0.0, 0.0, 0.0, -1.0];
        assert_eq!(Scalar::quat_slerp(q, nq, 0.25), q);
    }

    #[test]
    fn identity_mat_rows() {
        let m = Scalar::mat_identity();
        assert_eq!(m[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Scalar::mat_transpose(m), m);
    }
}
