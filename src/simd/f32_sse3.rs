//! SSE3-accelerated f32 kernels for x86_64.
//!
//! Shares the SSE2 register layout and kernels. SSE3 adds horizontal adds
//! (`haddps`) for the dot products and `addsubps` for the quaternion product.

use core::arch::x86_64::*;

use super::delegate;
use super::f32_sse2::{self, shuffle, xyz_mask};
use crate::mask;
use crate::simd::BackendKind;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};

/// SSE3 backend over `__m128`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sse3;

/// `(x + y) + (z + w)` broadcast: `hadd` pairs neighbours, the second pass
/// adds the pair sums.
#[inline(always)]
pub fn dot(v0: __m128, v1: __m128) -> __m128 {
    unsafe {
        let t = _mm_mul_ps(v0, v1);
        let pairs = _mm_hadd_ps(t, t);
        _mm_hadd_ps(pairs, pairs)
    }
}

#[inline(always)]
pub fn dot3(v0: __m128, v1: __m128) -> __m128 {
    unsafe {
        let t = _mm_and_ps(_mm_mul_ps(v0, v1), xyz_mask());
        let pairs = _mm_hadd_ps(t, t);
        _mm_hadd_ps(pairs, pairs)
    }
}

/// Hamilton product `q1 q0` by three `addsub` steps, permuting the partial
/// result between steps so the alternating sign lands on the right lanes.
#[inline(always)]
pub fn quat_mul(q0: __m128, q1: __m128) -> __m128 {
    unsafe {
        let w1 = shuffle::<{ mask::WWWW }>(q1);
        let x1 = shuffle::<{ mask::XXXX }>(q1);
        let y1 = shuffle::<{ mask::YYYY }>(q1);
        let z1 = shuffle::<{ mask::ZZZZ }>(q1);

        let e = _mm_addsub_ps(
            _mm_mul_ps(w1, shuffle::<{ mask::YXWZ }>(q0)),
            _mm_mul_ps(x1, shuffle::<{ mask::ZWXY }>(q0)),
        );
        let e = _mm_addsub_ps(
            shuffle::<{ mask::WYZX }>(e),
            _mm_mul_ps(y1, shuffle::<{ mask::XZYW }>(q0)),
        );
        let e = _mm_addsub_ps(
            shuffle::<{ mask::YWZX }>(e),
            _mm_mul_ps(z1, shuffle::<{ mask::YXZW }>(q0)),
        );
        shuffle::<{ mask::XYWZ }>(e)
    }
}

/// Lengths and normalization built on the `hadd` dot product.
#[inline(always)]
fn length(v: __m128) -> __m128 {
    unsafe { _mm_sqrt_ps(dot(v, v)) }
}

#[inline(always)]
fn length3(v: __m128) -> __m128 {
    unsafe { _mm_sqrt_ps(dot3(v, v)) }
}

impl VectorOps for Sse3 {
    type Lanes = __m128;

    const KIND: BackendKind = BackendKind::Sse3;

    delegate! { f32_sse2 =>
        fn set(x: f32, y: f32, z: f32, w: f32) -> __m128;
        fn to_array(v: __m128) -> [f32; 4];
        fn splat(s: f32) -> __m128;
        fn zero() -> __m128;
        fn add(v0: __m128, v1: __m128) -> __m128;
        fn sub(v0: __m128, v1: __m128) -> __m128;
        fn mul(v0: __m128, v1: __m128) -> __m128;
        fn div(v0: __m128, v1: __m128) -> __m128;
        fn neg(v: __m128) -> __m128;
        fn scale(v: __m128, s: f32) -> __m128;
        fn muladd(v0: __m128, v1: __m128, v2: __m128) -> __m128;
        fn cross3(v0: __m128, v1: __m128) -> __m128;
        fn lerp(from: __m128, to: __m128, t: f32) -> __m128;
        fn min(v0: __m128, v1: __m128) -> __m128;
        fn max(v0: __m128, v1: __m128) -> __m128;
    }

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> __m128 {
        unsafe { f32_sse2::load_aligned(ptr) }
    }
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> __m128 {
        unsafe { f32_sse2::load_unaligned(ptr) }
    }
    #[inline(always)]
    fn shuffle<const MASK: i32>(v: __m128) -> __m128 {
        shuffle::<MASK>(v)
    }
    #[inline(always)]
    fn dot(v0: __m128, v1: __m128) -> __m128 {
        dot(v0, v1)
    }
    #[inline(always)]
    fn dot3(v0: __m128, v1: __m128) -> __m128 {
        dot3(v0, v1)
    }
    #[inline(always)]
    fn length(v: __m128) -> __m128 {
        length(v)
    }
    #[inline(always)]
    fn length3(v: __m128) -> __m128 {
        length3(v)
    }
    #[inline(always)]
    fn length_fast(v: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot(v, v))) }
    }
    #[inline(always)]
    fn length3_fast(v: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot3(v, v))) }
    }
    #[inline(always)]
    fn normalize(v: __m128) -> __m128 {
        unsafe { _mm_mul_ps(v, _mm_div_ps(_mm_set1_ps(1.0), length(v))) }
    }
    #[inline(always)]
    fn normalize_fast(v: __m128) -> __m128 {
        unsafe { _mm_mul_ps(v, _mm_rsqrt_ps(dot(v, v))) }
    }
    #[inline(always)]
    fn normalize3(v: __m128) -> __m128 {
        let scaled = unsafe { _mm_mul_ps(v, _mm_div_ps(_mm_set1_ps(1.0), length3(v))) };
        f32_sse2::select_w(scaled, v)
    }
    #[inline(always)]
    fn normalize3_fast(v: __m128) -> __m128 {
        f32_sse2::select_w(unsafe { _mm_mul_ps(v, _mm_rsqrt_ps(dot3(v, v))) }, v)
    }
}

impl QuaternionOps for Sse3 {
    delegate! { f32_sse2 =>
        fn quat_conjugate(q: __m128) -> __m128;
    }

    #[inline(always)]
    fn quat_inverse(q: __m128) -> __m128 {
        unsafe { _mm_mul_ps(f32_sse2::quat_conjugate(q), _mm_div_ps(_mm_set1_ps(1.0), dot(q, q))) }
    }
    #[inline(always)]
    fn quat_mul(q0: __m128, q1: __m128) -> __m128 {
        quat_mul(q0, q1)
    }
}

impl MatrixOps for Sse3 {
    delegate! { f32_sse2 =>
        fn mat_transpose(m: [__m128; 4]) -> [__m128; 4];
        fn mat_mul(m0: [__m128; 4], m1: [__m128; 4]) -> [__m128; 4];
        fn mat_rotate(m: [__m128; 4], v: __m128) -> __m128;
        fn mat_transform(m: [__m128; 4], v: __m128) -> __m128;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::f32_sse2::{set, to_array};

    #[test]
    fn hadd_dot_matches_pairwise_order() {
        let v0 = set(1.0e8, 1.0, -1.0e8, 1.0);
        let v1 = set(1.0, 1.0, 1.0, 1.0);
        assert_eq!(to_array(dot(v0, v1)), [0.0; 4]);
    }

    #[test]
    fn dot3_ignores_w() {
        let v = set(1.0, 2.0, 3.0, 100.0);
        assert_eq!(to_array(dot3(v, v)), [14.0; 4]);
    }

    #[test]
    fn addsub_product_matches_sse2() {
        let q0 = set(1.0, -2.0, 3.0, -4.0);
        let q1 = set(0.5, 0.25, -0.75, 2.0);
        assert_eq!(to_array(quat_mul(q0, q1)), to_array(f32_sse2::quat_mul(q0, q1)));
        let i = set(0.0, 0.0, 0.0, 1.0);
        assert_eq!(to_array(quat_mul(q0, i)), [1.0, -2.0, 3.0, -4.0]);
    }
}
