//! SSE4.1-accelerated f32 kernels for x86_64.
//!
//! Builds on the SSE3 backend. `dpps` computes dot products in one
//! instruction and `blendps` replaces the mask-and-or sequences that fix
//! individual lanes.

use core::arch::x86_64::*;

use super::delegate;
use super::f32_sse2::{self, shuffle};
use super::f32_sse3;
use crate::simd::BackendKind;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};

/// SSE4.1 backend over `__m128`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sse4;

/// Immediate for `blendps`: take w from the second operand.
const BLEND_W: i32 = 0b1000;

/// Dot product over all four lanes, broadcast.
#[inline(always)]
pub fn dot(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_dp_ps::<0xFF>(v0, v1) }
}

/// Dot product over x, y, z, broadcast.
#[inline(always)]
pub fn dot3(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_dp_ps::<0x7F>(v0, v1) }
}

#[inline(always)]
pub fn cross3(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_blend_ps::<BLEND_W>(f32_sse2::cross3_raw(v0, v1), _mm_setzero_ps()) }
}

#[inline(always)]
pub fn normalize3(v: __m128) -> __m128 {
    unsafe {
        let inv = _mm_div_ps(_mm_set1_ps(1.0), _mm_sqrt_ps(dot3(v, v)));
        _mm_blend_ps::<BLEND_W>(_mm_mul_ps(v, inv), v)
    }
}

#[inline(always)]
pub fn normalize3_fast(v: __m128) -> __m128 {
    unsafe { _mm_blend_ps::<BLEND_W>(_mm_mul_ps(v, _mm_rsqrt_ps(dot3(v, v))), v) }
}

impl VectorOps for Sse4 {
    type Lanes = __m128;

    const KIND: BackendKind = BackendKind::Sse4;

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
    fn cross3(v0: __m128, v1: __m128) -> __m128 {
        cross3(v0, v1)
    }
    #[inline(always)]
    fn length(v: __m128) -> __m128 {
        unsafe { _mm_sqrt_ps(dot(v, v)) }
    }
    #[inline(always)]
    fn length_fast(v: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot(v, v))) }
    }
    #[inline(always)]
    fn length3(v: __m128) -> __m128 {
        unsafe { _mm_sqrt_ps(dot3(v, v)) }
    }
    #[inline(always)]
    fn length3_fast(v: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot3(v, v))) }
    }
    #[inline(always)]
    fn normalize(v: __m128) -> __m128 {
        unsafe { _mm_mul_ps(v, _mm_div_ps(_mm_set1_ps(1.0), _mm_sqrt_ps(dot(v, v)))) }
    }
    #[inline(always)]
    fn normalize_fast(v: __m128) -> __m128 {
        unsafe { _mm_mul_ps(v, _mm_rsqrt_ps(dot(v, v))) }
    }
    #[inline(always)]
    fn normalize3(v: __m128) -> __m128 {
        normalize3(v)
    }
    #[inline(always)]
    fn normalize3_fast(v: __m128) -> __m128 {
        normalize3_fast(v)
    }
}

impl QuaternionOps for Sse4 {
    delegate! { f32_sse2 =>
        fn quat_conjugate(q: __m128) -> __m128;
    }
    delegate! { f32_sse3 =>
        fn quat_mul(q0: __m128, q1: __m128) -> __m128;
    }

    #[inline(always)]
    fn quat_inverse(q: __m128) -> __m128 {
        unsafe { _mm_mul_ps(f32_sse2::quat_conjugate(q), _mm_div_ps(_mm_set1_ps(1.0), dot(q, q))) }
    }
    #[inline(always)]
    fn quat_rotate(q: __m128, v: __m128) -> __m128 {
        unsafe {
            let qw = shuffle::<{ crate::mask::WWWW }>(q);
            let v1 = _mm_add_ps(cross3(q, v), _mm_mul_ps(v, qw));
            let v2 = cross3(v1, q);
            let r = _mm_sub_ps(_mm_add_ps(_mm_mul_ps(q, dot3(q, v)), _mm_mul_ps(v1, qw)), v2);
            _mm_blend_ps::<BLEND_W>(r, _mm_set1_ps(1.0))
        }
    }
}

impl MatrixOps for Sse4 {
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
    fn dpps_masks() {
        let v0 = set(1.0, 2.0, 3.0, 4.0);
        let v1 = set(5.0, 6.0, 7.0, 8.0);
        assert_eq!(to_array(dot(v0, v1)), [70.0; 4]);
        assert_eq!(to_array(dot3(v0, v1)), [38.0; 4]);
    }

    #[test]
    fn blend_fixes_w() {
        let c = to_array(cross3(set(0.0, 1.0, 0.0, 3.0), set(0.0, 0.0, 1.0, 5.0)));
        assert_eq!(c, [1.0, 0.0, 0.0, 0.0]);
        let n = to_array(normalize3(set(0.0, 3.0, 4.0, -2.0)));
        assert_eq!(n, [0.0, 0.6, 0.8, -2.0]);
    }

    #[test]
    fn rotate_about_z() {
        // 90 degrees about +z takes +x to +y
        let h = core::f32::consts::FRAC_1_SQRT_2;
        let q = set(0.0, 0.0, h, h);
        let r = to_array(Sse4::quat_rotate(q, set(1.0, 0.0, 0.0, 0.0)));
        assert!((r[0]).abs() < 1e-6 && (r[1] - 1.0).abs() < 1e-6 && r[2].abs() < 1e-6);
        assert_eq!(r[3], 1.0);
    }
}
