//! SSE2-accelerated f32 kernels for x86_64.
//!
//! SSE2 provides 128-bit registers → 4×f32 lanes. SSE2 is part of the x86_64
//! baseline, so this backend is always available on that architecture. The
//! kernels are free functions so the SSE3 and SSE4.1 backends can reuse them.

use core::arch::x86_64::*;

use crate::mask;
use crate::simd::BackendKind;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};

/// SSE2 backend over `__m128`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sse2;

/// All bits set in x, y, z; clear in w.
#[inline(always)]
pub(crate) fn xyz_mask() -> __m128 {
    unsafe { _mm_castsi128_ps(_mm_set_epi32(0, -1, -1, -1)) }
}

/// Take x, y, z from `xyz` and w from `w`.
#[inline(always)]
pub(crate) fn select_w(xyz: __m128, w: __m128) -> __m128 {
    let m = xyz_mask();
    unsafe { _mm_or_ps(_mm_and_ps(xyz, m), _mm_andnot_ps(m, w)) }
}

#[inline(always)]
pub fn set(x: f32, y: f32, z: f32, w: f32) -> __m128 {
    unsafe { _mm_set_ps(w, z, y, x) }
}

#[inline(always)]
pub fn to_array(v: __m128) -> [f32; 4] {
    let mut out = [0.0_f32; 4];
    unsafe { _mm_storeu_ps(out.as_mut_ptr(), v) };
    out
}

/// # Safety
///
/// `ptr` must be valid for reading four `f32` and 16-byte aligned.
#[inline(always)]
pub unsafe fn load_aligned(ptr: *const f32) -> __m128 {
    debug_assert!(ptr as usize % 16 == 0, "pointer {ptr:p} is not 16-byte aligned");
    unsafe { _mm_load_ps(ptr) }
}

/// # Safety
///
/// `ptr` must be valid for reading four `f32`.
#[inline(always)]
pub unsafe fn load_unaligned(ptr: *const f32) -> __m128 {
    unsafe { _mm_loadu_ps(ptr) }
}

#[inline(always)]
pub fn splat(s: f32) -> __m128 {
    unsafe { _mm_set1_ps(s) }
}

#[inline(always)]
pub fn zero() -> __m128 {
    unsafe { _mm_setzero_ps() }
}

#[inline(always)]
pub fn shuffle<const MASK: i32>(v: __m128) -> __m128 {
    unsafe { _mm_shuffle_ps::<MASK>(v, v) }
}

#[inline(always)]
pub fn add(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_add_ps(v0, v1) }
}

#[inline(always)]
pub fn sub(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_sub_ps(v0, v1) }
}

#[inline(always)]
pub fn mul(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_mul_ps(v0, v1) }
}

#[inline(always)]
pub fn div(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_div_ps(v0, v1) }
}

#[inline(always)]
pub fn neg(v: __m128) -> __m128 {
    sub(zero(), v)
}

#[inline(always)]
pub fn scale(v: __m128, s: f32) -> __m128 {
    mul(v, splat(s))
}

#[inline(always)]
pub fn muladd(v0: __m128, v1: __m128, v2: __m128) -> __m128 {
    add(mul(v0, v1), v2)
}

/// Horizontal sum `(x + y) + (z + w)` broadcast to all lanes.
#[inline(always)]
fn hsum(t: __m128) -> __m128 {
    let pairs = add(t, shuffle::<{ mask::YXWZ }>(t));
    add(pairs, shuffle::<{ mask::ZWXY }>(pairs))
}

#[inline(always)]
pub fn dot(v0: __m128, v1: __m128) -> __m128 {
    hsum(mul(v0, v1))
}

#[inline(always)]
pub fn dot3(v0: __m128, v1: __m128) -> __m128 {
    hsum(unsafe { _mm_and_ps(mul(v0, v1), xyz_mask()) })
}

/// Products before the final lane fix; w holds garbage.
#[inline(always)]
pub(crate) fn cross3_raw(v0: __m128, v1: __m128) -> __m128 {
    let a = mul(shuffle::<{ mask::YZXW }>(v0), shuffle::<{ mask::ZXYW }>(v1));
    let b = mul(shuffle::<{ mask::ZXYW }>(v0), shuffle::<{ mask::YZXW }>(v1));
    sub(a, b)
}

#[inline(always)]
pub fn cross3(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_and_ps(cross3_raw(v0, v1), xyz_mask()) }
}

#[inline(always)]
pub fn length_sqr(v: __m128) -> __m128 {
    dot(v, v)
}

#[inline(always)]
pub fn length(v: __m128) -> __m128 {
    unsafe { _mm_sqrt_ps(dot(v, v)) }
}

/// `1 / rsqrt(x)`; stays 0 for a zero vector where `x * rsqrt(x)` would be NaN.
#[inline(always)]
pub fn length_fast(v: __m128) -> __m128 {
    unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot(v, v))) }
}

#[inline(always)]
pub fn length3_sqr(v: __m128) -> __m128 {
    dot3(v, v)
}

#[inline(always)]
pub fn length3(v: __m128) -> __m128 {
    unsafe { _mm_sqrt_ps(dot3(v, v)) }
}

#[inline(always)]
pub fn length3_fast(v: __m128) -> __m128 {
    unsafe { _mm_rcp_ps(_mm_rsqrt_ps(dot3(v, v))) }
}

#[inline(always)]
pub fn normalize(v: __m128) -> __m128 {
    mul(v, div(splat(1.0), length(v)))
}

#[inline(always)]
pub fn normalize_fast(v: __m128) -> __m128 {
    mul(v, unsafe { _mm_rsqrt_ps(dot(v, v)) })
}

#[inline(always)]
pub fn normalize3(v: __m128) -> __m128 {
    select_w(mul(v, div(splat(1.0), length3(v))), v)
}

#[inline(always)]
pub fn normalize3_fast(v: __m128) -> __m128 {
    select_w(mul(v, unsafe { _mm_rsqrt_ps(dot3(v, v)) }), v)
}

#[inline(always)]
pub fn lerp(from: __m128, to: __m128, t: f32) -> __m128 {
    let s = splat(t);
    add(mul(s, to), sub(from, mul(s, from)))
}

/// `minps` returns the second operand on NaN, the same as `a < b ? a : b`.
#[inline(always)]
pub fn min(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_min_ps(v0, v1) }
}

#[inline(always)]
pub fn max(v0: __m128, v1: __m128) -> __m128 {
    unsafe { _mm_max_ps(v0, v1) }
}

#[inline(always)]
pub fn quat_conjugate(q: __m128) -> __m128 {
    unsafe { _mm_xor_ps(q, set(-0.0, -0.0, -0.0, 0.0)) }
}

#[inline(always)]
pub fn quat_inverse(q: __m128) -> __m128 {
    mul(quat_conjugate(q), div(splat(1.0), dot(q, q)))
}

/// Hamilton product `q1 q0` as four broadcast-multiply-adds against sign
/// flipped permutations of `q0`.
#[inline(always)]
pub fn quat_mul(q0: __m128, q1: __m128) -> __m128 {
    let flip = |v: __m128, signs: __m128| unsafe { _mm_xor_ps(v, signs) };

    let mut r = mul(shuffle::<{ mask::WWWW }>(q1), q0);
    r = add(
        r,
        mul(
            shuffle::<{ mask::XXXX }>(q1),
            flip(shuffle::<{ mask::WZYX }>(q0), set(0.0, -0.0, 0.0, -0.0)),
        ),
    );
    r = add(
        r,
        mul(
            shuffle::<{ mask::YYYY }>(q1),
            flip(shuffle::<{ mask::ZWXY }>(q0), set(0.0, 0.0, -0.0, -0.0)),
        ),
    );
    add(
        r,
        mul(
            shuffle::<{ mask::ZZZZ }>(q1),
            flip(shuffle::<{ mask::YXWZ }>(q0), set(-0.0, 0.0, 0.0, -0.0)),
        ),
    )
}

#[inline(always)]
pub fn quat_rotate(q: __m128, v: __m128) -> __m128 {
    let qw = shuffle::<{ mask::WWWW }>(q);
    let v1 = add(cross3(q, v), mul(v, qw));
    let v2 = cross3(v1, q);
    let r = sub(add(mul(q, dot3(q, v)), mul(v1, qw)), v2);
    select_w(r, set(0.0, 0.0, 0.0, 1.0))
}

#[inline(always)]
pub fn mat_transpose(m: [__m128; 4]) -> [__m128; 4] {
    unsafe {
        let t0 = _mm_unpacklo_ps(m[0], m[1]);
        let t1 = _mm_unpacklo_ps(m[2], m[3]);
        let t2 = _mm_unpackhi_ps(m[0], m[1]);
        let t3 = _mm_unpackhi_ps(m[2], m[3]);
        [
            _mm_movelh_ps(t0, t1),
            _mm_movehl_ps(t1, t0),
            _mm_movelh_ps(t2, t3),
            _mm_movehl_ps(t3, t2),
        ]
    }
}

/// Linear combination of `rows` weighted by the lanes of `v`.
#[inline(always)]
fn combine3(rows: &[__m128; 4], v: __m128) -> __m128 {
    let r = mul(rows[0], shuffle::<{ mask::XXXX }>(v));
    let r = add(r, mul(rows[1], shuffle::<{ mask::YYYY }>(v)));
    add(r, mul(rows[2], shuffle::<{ mask::ZZZZ }>(v)))
}

#[inline(always)]
fn combine4(rows: &[__m128; 4], v: __m128) -> __m128 {
    add(combine3(rows, v), mul(rows[3], shuffle::<{ mask::WWWW }>(v)))
}

#[inline(always)]
pub fn mat_mul(m0: [__m128; 4], m1: [__m128; 4]) -> [__m128; 4] {
    [
        combine4(&m1, m0[0]),
        combine4(&m1, m0[1]),
        combine4(&m1, m0[2]),
        combine4(&m1, m0[3]),
    ]
}

#[inline(always)]
pub fn mat_rotate(m: [__m128; 4], v: __m128) -> __m128 {
    select_w(combine3(&m, v), v)
}

#[inline(always)]
pub fn mat_transform(m: [__m128; 4], v: __m128) -> __m128 {
    combine4(&m, v)
}

impl VectorOps for Sse2 {
    type Lanes = __m128;

    const KIND: BackendKind = BackendKind::Sse2;

    #[inline(always)]
    fn set(x: f32, y: f32, z: f32, w: f32) -> __m128 {
        set(x, y, z, w)
    }
    #[inline(always)]
    fn to_array(v: __m128) -> [f32; 4] {
        to_array(v)
    }
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> __m128 {
        unsafe { load_aligned(ptr) }
    }
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> __m128 {
        unsafe { load_unaligned(ptr) }
    }
    #[inline(always)]
    fn splat(s: f32) -> __m128 {
        splat(s)
    }
    #[inline(always)]
    fn zero() -> __m128 {
        zero()
    }
    #[inline(always)]
    fn shuffle<const MASK: i32>(v: __m128) -> __m128 {
        shuffle::<MASK>(v)
    }
    #[inline(always)]
    fn add(v0: __m128, v1: __m128) -> __m128 {
        add(v0, v1)
    }
    #[inline(always)]
    fn sub(v0: __m128, v1: __m128) -> __m128 {
        sub(v0, v1)
    }
    #[inline(always)]
    fn mul(v0: __m128, v1: __m128) -> __m128 {
        mul(v0, v1)
    }
    #[inline(always)]
    fn div(v0: __m128, v1: __m128) -> __m128 {
        div(v0, v1)
    }
    #[inline(always)]
    fn neg(v: __m128) -> __m128 {
        neg(v)
    }
    #[inline(always)]
    fn scale(v: __m128, s: f32) -> __m128 {
        scale(v, s)
    }
    #[inline(always)]
    fn muladd(v0: __m128, v1: __m128, v2: __m128) -> __m128 {
        muladd(v0, v1, v2)
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
    fn length_sqr(v: __m128) -> __m128 {
        length_sqr(v)
    }
    #[inline(always)]
    fn length(v: __m128) -> __m128 {
        length(v)
    }
    #[inline(always)]
    fn length_fast(v: __m128) -> __m128 {
        length_fast(v)
    }
    #[inline(always)]
    fn length3_sqr(v: __m128) -> __m128 {
        length3_sqr(v)
    }
    #[inline(always)]
    fn length3(v: __m128) -> __m128 {
        length3(v)
    }
    #[inline(always)]
    fn length3_fast(v: __m128) -> __m128 {
        length3_fast(v)
    }
    #[inline(always)]
    fn normalize(v: __m128) -> __m128 {
        normalize(v)
    }
    #[inline(always)]
    fn normalize_fast(v: __m128) -> __m128 {
        normalize_fast(v)
    }
    #[inline(always)]
    fn normalize3(v: __m128) -> __m128 {
        normalize3(v)
    }
    #[inline(always)]
    fn normalize3_fast(v: __m128) -> __m128 {
        normalize3_fast(v)
    }
    #[inline(always)]
    fn lerp(from: __m128, to: __m128, t: f32) -> __m128 {
        lerp(from, to, t)
    }
    #[inline(always)]
    fn min(v0: __m128, v1: __m128) -> __m128 {
        min(v0, v1)
    }
    #[inline(always)]
    fn max(v0: __m128, v1: __m128) -> __m128 {
        max(v0, v1)
    }
}

impl QuaternionOps for Sse2 {
    #[inline(always)]
    fn quat_conjugate(q: __m128) -> __m128 {
        quat_conjugate(q)
    }
    #[inline(always)]
    fn quat_inverse(q: __m128) -> __m128 {
        quat_inverse(q)
    }
    #[inline(always)]
    fn quat_mul(q0: __m128, q1: __m128) -> __m128 {
        quat_mul(q0, q1)
    }
    #[inline(always)]
    fn quat_rotate(q: __m128, v: __m128) -> __m128 {
        quat_rotate(q, v)
    }
}

impl MatrixOps for Sse2 {
    #[inline(always)]
    fn mat_transpose(m: [__m128; 4]) -> [__m128; 4] {
        mat_transpose(m)
    }
    #[inline(always)]
    fn mat_mul(m0: [__m128; 4], m1: [__m128; 4]) -> [__m128; 4] {
        mat_mul(m0, m1)
    }
    #[inline(always)]
    fn mat_rotate(m: [__m128; 4], v: __m128) -> __m128 {
        mat_rotate(m, v)
    }
    #[inline(always)]
    fn mat_transform(m: [__m128; 4], v: __m128) -> __m128 {
        mat_transform(m, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_lane_order() {
        assert_eq!(to_array(set(1.0, 2.0, 3.0, 4.0)), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn shuffle_uses_named_masks() {
        let v = set(1.0, 2.0, 3.0, 4.0);
        assert_eq!(to_array(shuffle::<{ mask::WZYX }>(v)), [4.0, 3.0, 2.0, 1.0]);
        assert_eq!(to_array(shuffle::<{ mask::ZWXY }>(v)), [3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn transpose_4x4() {
        let m = [
            set(1.0, 2.0, 3.0, 4.0),
            set(5.0, 6.0, 7.0, 8.0),
            set(9.0, 10.0, 11.0, 12.0),
            set(13.0, 14.0, 15.0, 16.0),
        ];
        let t = mat_transpose(m).map(to_array);
        assert_eq!(t[0], [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(t[1], [2.0, 6.0, 10.0, 14.0]);
        assert_eq!(t[3], [4.0, 8.0, 12.0, 16.0]);
    }

    #[test]
    fn conjugate_flips_sign_bits_only() {
        let q = set(1.0, -2.0, 0.0, -4.0);
        let c = to_array(quat_conjugate(q));
        assert_eq!(c, [-1.0, 2.0, -0.0, -4.0]);
        assert!(c[2].is_sign_negative());
    }

    #[test]
    fn fast_length_of_zero_is_zero() {
        assert_eq!(to_array(length_fast(zero())), [0.0; 4]);
    }

    #[test]
    fn rotate_sets_w_to_one() {
        let q = set(0.0, 0.0, 0.0, 1.0);
        let v = set(1.0, 2.0, 3.0, 9.0);
        assert_eq!(to_array(quat_rotate(q, v)), [1.0, 2.0, 3.0, 1.0]);
    }
}
