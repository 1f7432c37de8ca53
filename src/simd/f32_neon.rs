//! NEON-accelerated f32 kernels for aarch64.
//!
//! NEON provides 128-bit registers → 4×f32 lanes. There is no single
//! arbitrary-shuffle instruction, so permutations that are not a fixed
//! `ext`/`rev` pattern fall back to the portable lane shuffle.

use core::arch::aarch64::*;

use crate::simd::BackendKind;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};

/// NEON backend over `float32x4_t`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neon;

#[inline(always)]
pub fn set(x: f32, y: f32, z: f32, w: f32) -> float32x4_t {
    let lanes = [x, y, z, w];
    unsafe { vld1q_f32(lanes.as_ptr()) }
}

#[inline(always)]
pub fn to_array(v: float32x4_t) -> [f32; 4] {
    let mut out = [0.0_f32; 4];
    unsafe { vst1q_f32(out.as_mut_ptr(), v) };
    out
}

#[inline(always)]
pub fn splat(s: f32) -> float32x4_t {
    unsafe { vdupq_n_f32(s) }
}

#[inline(always)]
pub fn add(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
    unsafe { vaddq_f32(v0, v1) }
}

#[inline(always)]
pub fn mul(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
    unsafe { vmulq_f32(v0, v1) }
}

/// Keep lanes x, y, z of `xyz` and lane w of `w`.
#[inline(always)]
fn keep_w(xyz: float32x4_t, w: float32x4_t) -> float32x4_t {
    unsafe { vcopyq_laneq_f32::<3, 3>(xyz, w) }
}

/// `faddp` reduces pairwise, giving `(x + y) + (z + w)`.
#[inline(always)]
pub fn dot(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
    unsafe { vdupq_n_f32(vaddvq_f32(vmulq_f32(v0, v1))) }
}

#[inline(always)]
pub fn dot3(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
    unsafe { vdupq_n_f32(vaddvq_f32(vsetq_lane_f32::<3>(0.0, vmulq_f32(v0, v1)))) }
}

/// Reciprocal square root estimate refined by one Newton-Raphson step.
#[inline(always)]
fn rsqrt(x: float32x4_t) -> float32x4_t {
    unsafe {
        let e = vrsqrteq_f32(x);
        vmulq_f32(e, vrsqrtsq_f32(vmulq_f32(x, e), e))
    }
}

/// `x * rsqrt(x)`, with zero mapped to zero rather than `0 * inf`.
#[inline(always)]
fn sqrt_fast(x: float32x4_t) -> float32x4_t {
    unsafe {
        let r = vmulq_f32(x, rsqrt(x));
        vbslq_f32(vceqzq_f32(x), vdupq_n_f32(0.0), r)
    }
}

#[inline(always)]
pub fn normalize(v: float32x4_t) -> float32x4_t {
    unsafe { vmulq_f32(v, vdivq_f32(vdupq_n_f32(1.0), vsqrtq_f32(dot(v, v)))) }
}

#[inline(always)]
pub fn normalize3(v: float32x4_t) -> float32x4_t {
    let inv = unsafe { vdivq_f32(vdupq_n_f32(1.0), vsqrtq_f32(dot3(v, v))) };
    keep_w(mul(v, inv), v)
}

#[inline(always)]
pub fn quat_conjugate(q: float32x4_t) -> float32x4_t {
    keep_w(unsafe { vnegq_f32(q) }, q)
}

/// Hamilton product `q1 q0` as four broadcast-multiply-adds against sign
/// flipped permutations of `q0` (`ext` and `rev64` give the three needed).
#[inline(always)]
pub fn quat_mul(q0: float32x4_t, q1: float32x4_t) -> float32x4_t {
    unsafe {
        let zwxy = vextq_f32::<2>(q0, q0);
        let wzyx = vrev64q_f32(zwxy);
        let yxwz = vrev64q_f32(q0);

        let mut r = vmulq_f32(vdupq_laneq_f32::<3>(q1), q0);
        r = vaddq_f32(
            r,
            vmulq_f32(vdupq_laneq_f32::<0>(q1), vmulq_f32(wzyx, set(1.0, -1.0, 1.0, -1.0))),
        );
        r = vaddq_f32(
            r,
            vmulq_f32(vdupq_laneq_f32::<1>(q1), vmulq_f32(zwxy, set(1.0, 1.0, -1.0, -1.0))),
        );
        vaddq_f32(
            r,
            vmulq_f32(vdupq_laneq_f32::<2>(q1), vmulq_f32(yxwz, set(-1.0, 1.0, 1.0, -1.0))),
        )
    }
}

#[inline(always)]
fn combine3(rows: &[float32x4_t; 4], v: float32x4_t) -> float32x4_t {
    unsafe {
        let r = vmulq_laneq_f32::<0>(rows[0], v);
        let r = vaddq_f32(r, vmulq_laneq_f32::<1>(rows[1], v));
        vaddq_f32(r, vmulq_laneq_f32::<2>(rows[2], v))
    }
}

#[inline(always)]
fn combine4(rows: &[float32x4_t; 4], v: float32x4_t) -> float32x4_t {
    unsafe { vaddq_f32(combine3(rows, v), vmulq_laneq_f32::<3>(rows[3], v)) }
}

impl VectorOps for Neon {
    type Lanes = float32x4_t;

    const KIND: BackendKind = BackendKind::Neon;

    #[inline(always)]
    fn set(x: f32, y: f32, z: f32, w: f32) -> float32x4_t {
        set(x, y, z, w)
    }
    #[inline(always)]
    fn to_array(v: float32x4_t) -> [f32; 4] {
        to_array(v)
    }
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f32) -> float32x4_t {
        debug_assert!(ptr as usize % 16 == 0, "pointer {ptr:p} is not 16-byte aligned");
        unsafe { vld1q_f32(ptr) }
    }
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> float32x4_t {
        unsafe { vld1q_f32(ptr) }
    }
    #[inline(always)]
    fn splat(s: f32) -> float32x4_t {
        splat(s)
    }
    #[inline(always)]
    fn zero() -> float32x4_t {
        splat(0.0)
    }
    #[inline(always)]
    fn add(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        add(v0, v1)
    }
    #[inline(always)]
    fn sub(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        unsafe { vsubq_f32(v0, v1) }
    }
    #[inline(always)]
    fn mul(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        mul(v0, v1)
    }
    #[inline(always)]
    fn div(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        unsafe { vdivq_f32(v0, v1) }
    }
    #[inline(always)]
    fn neg(v: float32x4_t) -> float32x4_t {
        unsafe { vsubq_f32(vdupq_n_f32(0.0), v) }
    }
    #[inline(always)]
    fn scale(v: float32x4_t, s: f32) -> float32x4_t {
        unsafe { vmulq_n_f32(v, s) }
    }
    #[inline(always)]
    fn muladd(v0: float32x4_t, v1: float32x4_t, v2: float32x4_t) -> float32x4_t {
        // separate multiply and add; fmla would round once
        add(mul(v0, v1), v2)
    }
    #[inline(always)]
    fn dot(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        dot(v0, v1)
    }
    #[inline(always)]
    fn dot3(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        dot3(v0, v1)
    }
    #[inline(always)]
    fn length(v: float32x4_t) -> float32x4_t {
        unsafe { vsqrtq_f32(dot(v, v)) }
    }
    #[inline(always)]
    fn length_fast(v: float32x4_t) -> float32x4_t {
        sqrt_fast(dot(v, v))
    }
    #[inline(always)]
    fn length3(v: float32x4_t) -> float32x4_t {
        unsafe { vsqrtq_f32(dot3(v, v)) }
    }
    #[inline(always)]
    fn length3_fast(v: float32x4_t) -> float32x4_t {
        sqrt_fast(dot3(v, v))
    }
    #[inline(always)]
    fn normalize(v: float32x4_t) -> float32x4_t {
        normalize(v)
    }
    #[inline(always)]
    fn normalize_fast(v: float32x4_t) -> float32x4_t {
        mul(v, rsqrt(dot(v, v)))
    }
    #[inline(always)]
    fn normalize3(v: float32x4_t) -> float32x4_t {
        normalize3(v)
    }
    #[inline(always)]
    fn normalize3_fast(v: float32x4_t) -> float32x4_t {
        keep_w(mul(v, rsqrt(dot3(v, v))), v)
    }
    #[inline(always)]
    fn lerp(from: float32x4_t, to: float32x4_t, t: f32) -> float32x4_t {
        unsafe {
            let s = vdupq_n_f32(t);
            vaddq_f32(vmulq_f32(s, to), vsubq_f32(from, vmulq_f32(s, from)))
        }
    }
    /// `fmin` would prefer the non-NaN operand; select keeps `a < b ? a : b`.
    #[inline(always)]
    fn min(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        unsafe { vbslq_f32(vcltq_f32(v0, v1), v0, v1) }
    }
    #[inline(always)]
    fn max(v0: float32x4_t, v1: float32x4_t) -> float32x4_t {
        unsafe { vbslq_f32(vcgtq_f32(v0, v1), v0, v1) }
    }
}

impl QuaternionOps for Neon {
    #[inline(always)]
    fn quat_conjugate(q: float32x4_t) -> float32x4_t {
        quat_conjugate(q)
    }
    #[inline(always)]
    fn quat_inverse(q: float32x4_t) -> float32x4_t {
        unsafe { vmulq_f32(quat_conjugate(q), vdivq_f32(vdupq_n_f32(1.0), dot(q, q))) }
    }
    #[inline(always)]
    fn quat_mul(q0: float32x4_t, q1: float32x4_t) -> float32x4_t {
        quat_mul(q0, q1)
    }
}

impl MatrixOps for Neon {
    #[inline(always)]
    fn mat_mul(m0: [float32x4_t; 4], m1: [float32x4_t; 4]) -> [float32x4_t; 4] {
        [
            combine4(&m1, m0[0]),
            combine4(&m1, m0[1]),
            combine4(&m1, m0[2]),
            combine4(&m1, m0[3]),
        ]
    }
    #[inline(always)]
    fn mat_rotate(m: [float32x4_t; 4], v: float32x4_t) -> float32x4_t {
        keep_w(combine3(&m, v), v)
    }
    #[inline(always)]
    fn mat_transform(m: [float32x4_t; 4], v: float32x4_t) -> float32x4_t {
        combine4(&m, v)
    }
}
