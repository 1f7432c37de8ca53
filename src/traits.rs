//! Backend operation traits.
//!
//! Every operation of the library is a method of [`VectorOps`],
//! [`QuaternionOps`] or [`MatrixOps`]. Two primitives per backend are
//! required (`set` and `to_array`); everything else has a provided method
//! holding the portable definition. A backend overrides exactly the
//! operations it has a faster kernel for and inherits the rest, so each
//! operation has one visible definition per backend and none is ever missing.
//!
//! Composite defaults (normalize, reflect, slerp, rotate, ...) are written in
//! terms of other trait methods, so overriding a primitive like `dot` also
//! accelerates everything built on it.

use core::f32::consts::PI;

use num_traits::Float;

use crate::compare::{ALMOST_EPSILON, ULP_TOLERANCE, lanes_almost_eq, lanes_eq};
use crate::mask;
use crate::simd::BackendKind;

#[inline(always)]
fn map2<B: VectorOps + ?Sized>(
    v0: B::Lanes,
    v1: B::Lanes,
    f: impl Fn(f32, f32) -> f32,
) -> B::Lanes {
    let a = B::to_array(v0);
    let b = B::to_array(v1);
    B::set(f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3]))
}

/// Four-lane vector operations.
///
/// Reductions (`dot`, `length`, ...) return the scalar broadcast into all
/// four lanes so the result can feed further lane-wise operations directly.
pub trait VectorOps {
    /// Native register type holding four `f32` lanes.
    type Lanes: Copy;

    /// Which instruction set this backend targets.
    const KIND: BackendKind;

    /// Build from individual lanes.
    fn set(x: f32, y: f32, z: f32, w: f32) -> Self::Lanes;

    /// Extract all lanes in `[x, y, z, w]` order.
    fn to_array(v: Self::Lanes) -> [f32; 4];

    #[inline]
    fn from_array(a: [f32; 4]) -> Self::Lanes {
        Self::set(a[0], a[1], a[2], a[3])
    }

    /// Load four floats from 16-byte aligned memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32` and aligned to 16 bytes.
    /// Alignment is only checked in debug builds.
    #[inline]
    unsafe fn load_aligned(ptr: *const f32) -> Self::Lanes {
        debug_assert!(ptr as usize % 16 == 0, "pointer {ptr:p} is not 16-byte aligned");
        unsafe { Self::load_unaligned(ptr) }
    }

    /// Load four floats from memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32`.
    #[inline]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Lanes {
        Self::from_array(unsafe { ptr.cast::<[f32; 4]>().read_unaligned() })
    }

    #[inline]
    fn splat(s: f32) -> Self::Lanes {
        Self::set(s, s, s, s)
    }

    #[inline]
    fn zero() -> Self::Lanes {
        Self::splat(0.0)
    }

    #[inline]
    fn one() -> Self::Lanes {
        Self::splat(1.0)
    }

    #[inline]
    fn half() -> Self::Lanes {
        Self::splat(0.5)
    }

    #[inline]
    fn two() -> Self::Lanes {
        Self::splat(2.0)
    }

    /// `(0, 0, 0, 1)`
    #[inline]
    fn origin() -> Self::Lanes {
        Self::set(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    fn x_axis() -> Self::Lanes {
        Self::set(1.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    fn y_axis() -> Self::Lanes {
        Self::set(0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    fn z_axis() -> Self::Lanes {
        Self::set(0.0, 0.0, 1.0, 0.0)
    }

    /// Permute lanes; see [`crate::mask`] for the encoding.
    #[inline]
    fn shuffle<const MASK: i32>(v: Self::Lanes) -> Self::Lanes {
        const { assert!(MASK >= 0 && MASK <= 0xFF, "shuffle mask out of range") }
        let a = Self::to_array(v);
        Self::set(
            a[mask::source(MASK, 0)],
            a[mask::source(MASK, 1)],
            a[mask::source(MASK, 2)],
            a[mask::source(MASK, 3)],
        )
    }

    #[inline]
    fn add(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| a + b)
    }

    #[inline]
    fn sub(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| a - b)
    }

    #[inline]
    fn mul(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| a * b)
    }

    #[inline]
    fn div(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| a / b)
    }

    /// `zero() - v`
    #[inline]
    fn neg(v: Self::Lanes) -> Self::Lanes {
        Self::sub(Self::zero(), v)
    }

    #[inline]
    fn scale(v: Self::Lanes, s: f32) -> Self::Lanes {
        Self::mul(v, Self::splat(s))
    }

    /// `v0 * v1 + v2`, rounded after the multiply and after the add.
    #[inline]
    fn muladd(v0: Self::Lanes, v1: Self::Lanes, v2: Self::Lanes) -> Self::Lanes {
        Self::add(Self::mul(v0, v1), v2)
    }

    /// `(x0*x1 + y0*y1) + (z0*z1 + w0*w1)` in all lanes.
    #[inline]
    fn dot(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        let a = Self::to_array(v0);
        let b = Self::to_array(v1);
        Self::splat((a[0] * b[0] + a[1] * b[1]) + (a[2] * b[2] + a[3] * b[3]))
    }

    /// `(x0*x1 + y0*y1) + z0*z1` in all lanes.
    #[inline]
    fn dot3(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        let a = Self::to_array(v0);
        let b = Self::to_array(v1);
        Self::splat((a[0] * b[0] + a[1] * b[1]) + a[2] * b[2])
    }

    /// Cross product of the xyz parts. The w lane is always zero.
    #[inline]
    fn cross3(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        let a = Self::to_array(v0);
        let b = Self::to_array(v1);
        Self::set(
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
            0.0,
        )
    }

    #[inline]
    fn length_sqr(v: Self::Lanes) -> Self::Lanes {
        Self::dot(v, v)
    }

    #[inline]
    fn length(v: Self::Lanes) -> Self::Lanes {
        Self::splat(Float::sqrt(Self::x(Self::length_sqr(v))))
    }

    /// Within [`FAST_TOLERANCE`](crate::compare::FAST_TOLERANCE) of `length`.
    #[inline]
    fn length_fast(v: Self::Lanes) -> Self::Lanes {
        Self::length(v)
    }

    #[inline]
    fn length3_sqr(v: Self::Lanes) -> Self::Lanes {
        Self::dot3(v, v)
    }

    #[inline]
    fn length3(v: Self::Lanes) -> Self::Lanes {
        Self::splat(Float::sqrt(Self::x(Self::length3_sqr(v))))
    }

    #[inline]
    fn length3_fast(v: Self::Lanes) -> Self::Lanes {
        Self::length3(v)
    }

    /// `v * (1 / length(v))`, all four lanes.
    #[inline]
    fn normalize(v: Self::Lanes) -> Self::Lanes {
        Self::scale(v, 1.0 / Self::x(Self::length(v)))
    }

    #[inline]
    fn normalize_fast(v: Self::Lanes) -> Self::Lanes {
        Self::normalize(v)
    }

    /// Scales xyz by `1 / length3(v)` and keeps w.
    #[inline]
    fn normalize3(v: Self::Lanes) -> Self::Lanes {
        let inv = 1.0 / Self::x(Self::length3(v));
        let a = Self::to_array(v);
        Self::set(a[0] * inv, a[1] * inv, a[2] * inv, a[3])
    }

    #[inline]
    fn normalize3_fast(v: Self::Lanes) -> Self::Lanes {
        Self::normalize3(v)
    }

    /// `t*to + (from - t*from)`; `t` is not clamped.
    #[inline]
    fn lerp(from: Self::Lanes, to: Self::Lanes, t: f32) -> Self::Lanes {
        let s = Self::splat(t);
        Self::add(Self::mul(s, to), Self::sub(from, Self::mul(s, from)))
    }

    /// `2 * n * dot3(n, v) - v` with `n = normalize(normal)`.
    #[inline]
    fn reflect(v: Self::Lanes, normal: Self::Lanes) -> Self::Lanes {
        let n = Self::normalize(normal);
        let double_proj = Self::mul(n, Self::mul(Self::dot3(n, v), Self::two()));
        Self::sub(double_proj, v)
    }

    /// Per-lane minimum; yields the second operand when either lane is NaN.
    #[inline]
    fn min(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| if a < b { a } else { b })
    }

    /// Per-lane maximum; yields the second operand when either lane is NaN.
    #[inline]
    fn max(v0: Self::Lanes, v1: Self::Lanes) -> Self::Lanes {
        map2::<Self>(v0, v1, |a, b| if a > b { a } else { b })
    }

    /// All lanes within [`ULP_TOLERANCE`] units in the last place.
    #[inline]
    fn equal(v0: Self::Lanes, v1: Self::Lanes) -> bool {
        lanes_eq(Self::to_array(v0), Self::to_array(v1), ULP_TOLERANCE)
    }

    /// All lanes within [`ALMOST_EPSILON`], relative above magnitude 1.
    #[inline]
    fn almost_equal(v0: Self::Lanes, v1: Self::Lanes) -> bool {
        lanes_almost_eq(Self::to_array(v0), Self::to_array(v1), ALMOST_EPSILON)
    }

    #[inline]
    fn x(v: Self::Lanes) -> f32 {
        Self::to_array(v)[0]
    }

    #[inline]
    fn y(v: Self::Lanes) -> f32 {
        Self::to_array(v)[1]
    }

    #[inline]
    fn z(v: Self::Lanes) -> f32 {
        Self::to_array(v)[2]
    }

    #[inline]
    fn w(v: Self::Lanes) -> f32 {
        Self::to_array(v)[3]
    }

    /// Lane `i`. Panics if `i >= 4`.
    #[inline]
    fn component(v: Self::Lanes, i: usize) -> f32 {
        assert!(i < 4, "lane index {i} out of range 0..4");
        Self::to_array(v)[i]
    }
}

/// Quaternion operations over the vector lane type.
///
/// Lanes hold `(x, y, z, w)` with `w` the real part.
pub trait QuaternionOps: VectorOps {
    #[inline]
    fn quat_zero() -> Self::Lanes {
        Self::zero()
    }

    /// `(0, 0, 0, 1)`
    #[inline]
    fn quat_identity() -> Self::Lanes {
        Self::origin()
    }

    /// # Safety
    ///
    /// Same contract as [`VectorOps::load_aligned`].
    #[inline]
    unsafe fn quat_load_aligned(ptr: *const f32) -> Self::Lanes {
        unsafe { Self::load_aligned(ptr) }
    }

    /// # Safety
    ///
    /// Same contract as [`VectorOps::load_unaligned`].
    #[inline]
    unsafe fn quat_load_unaligned(ptr: *const f32) -> Self::Lanes {
        unsafe { Self::load_unaligned(ptr) }
    }

    /// `(-x, -y, -z, w)`
    #[inline]
    fn quat_conjugate(q: Self::Lanes) -> Self::Lanes {
        let a = Self::to_array(q);
        Self::set(-a[0], -a[1], -a[2], a[3])
    }

    /// Conjugate divided by the squared norm. A zero norm propagates Inf/NaN.
    #[inline]
    fn quat_inverse(q: Self::Lanes) -> Self::Lanes {
        let inv_norm = 1.0 / Self::x(Self::length_sqr(q));
        let a = Self::to_array(q);
        Self::set(
            a[0] * -inv_norm,
            a[1] * -inv_norm,
            a[2] * -inv_norm,
            a[3] * inv_norm,
        )
    }

    #[inline]
    fn quat_neg(q: Self::Lanes) -> Self::Lanes {
        Self::neg(q)
    }

    #[inline]
    fn quat_normalize(q: Self::Lanes) -> Self::Lanes {
        Self::normalize(q)
    }

    /// Rotation `q0` followed by rotation `q1` (the Hamilton product `q1 q0`).
    #[inline]
    fn quat_mul(q0: Self::Lanes, q1: Self::Lanes) -> Self::Lanes {
        let [x0, y0, z0, w0] = Self::to_array(q0);
        let [x1, y1, z1, w1] = Self::to_array(q1);
        Self::set(
            w1 * x0 + x1 * w0 + y1 * z0 - z1 * y0,
            w1 * y0 - x1 * z0 + y1 * w0 + z1 * x0,
            w1 * z0 + x1 * y0 - y1 * x0 + z1 * w0,
            w1 * w0 - x1 * x0 - y1 * y0 - z1 * z0,
        )
    }

    #[inline]
    fn quat_add(q0: Self::Lanes, q1: Self::Lanes) -> Self::Lanes {
        Self::add(q0, q1)
    }

    #[inline]
    fn quat_sub(q0: Self::Lanes, q1: Self::Lanes) -> Self::Lanes {
        Self::sub(q0, q1)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// Returns `q1` (sign-corrected) unchanged when the inputs coincide, which
    /// keeps `acos` in its domain and avoids dividing by a vanishing sine.
    fn quat_slerp(q0: Self::Lanes, q1: Self::Lanes, t: f32) -> Self::Lanes {
        let mut cos = Self::x(Self::dot(q0, q1));

        // Negated target keeps the angle acute so we never spin the long way
        let qd = if cos < 0.0 {
            let neg = Self::quat_neg(q1);
            cos = Self::x(Self::dot(q0, neg));
            neg
        } else {
            q1
        };

        let angle = if -1.0 < cos {
            if cos < 1.0 {
                Float::acos(cos)
            } else {
                return qd;
            }
        } else {
            PI
        };

        if Float::abs(angle) < f32::EPSILON {
            return qd;
        }

        let inv_sin = 1.0 / Float::sin(angle);
        let c0 = Float::sin((1.0 - t) * angle) * inv_sin;
        let c1 = Float::sin(t * angle) * inv_sin;

        Self::quat_add(Self::scale(q0, c0), Self::scale(qd, c1))
    }

    /// Rotate `v` by unit quaternion `q` (`q v q*`). The result has `w = 1`.
    ///
    /// With `u = q.xyz`: `v1 = u × v + v·q.w`, `v2 = v1 × u`, and the result
    /// is `u (u·v) + v1·q.w - v2`, which expands to
    /// `v + 2w (u × v) + 2 u × (u × v)` for unit `q`.
    #[inline]
    fn quat_rotate(q: Self::Lanes, v: Self::Lanes) -> Self::Lanes {
        let qw = Self::w(q);
        let v1 = Self::add(Self::cross3(q, v), Self::scale(v, qw));
        let v2 = Self::cross3(v1, q);
        let d = Self::x(Self::dot3(q, v));
        let r = Self::to_array(Self::sub(Self::add(Self::scale(q, d), Self::scale(v1, qw)), v2));
        Self::set(r[0], r[1], r[2], 1.0)
    }
}

/// 4x4 row-major matrix operations; a matrix is four rows of lanes.
pub trait MatrixOps: VectorOps {
    #[inline]
    fn mat_zero() -> [Self::Lanes; 4] {
        [Self::zero(); 4]
    }

    #[inline]
    fn mat_identity() -> [Self::Lanes; 4] {
        [Self::x_axis(), Self::y_axis(), Self::z_axis(), Self::origin()]
    }

    /// Load 16 row-major floats.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 `f32` and aligned to 16 bytes.
    #[inline]
    unsafe fn mat_load_aligned(ptr: *const f32) -> [Self::Lanes; 4] {
        unsafe {
            [
                Self::load_aligned(ptr),
                Self::load_aligned(ptr.add(4)),
                Self::load_aligned(ptr.add(8)),
                Self::load_aligned(ptr.add(12)),
            ]
        }
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 `f32`.
    #[inline]
    unsafe fn mat_load_unaligned(ptr: *const f32) -> [Self::Lanes; 4] {
        unsafe {
            [
                Self::load_unaligned(ptr),
                Self::load_unaligned(ptr.add(4)),
                Self::load_unaligned(ptr.add(8)),
                Self::load_unaligned(ptr.add(12)),
            ]
        }
    }

    #[inline]
    fn mat_transpose(m: [Self::Lanes; 4]) -> [Self::Lanes; 4] {
        let r = m.map(Self::to_array);
        core::array::from_fn(|row| Self::set(r[0][row], r[1][row], r[2][row], r[3][row]))
    }

    /// `r[row][col] = Σ_k m0[row][k] * m1[k][col]`
    #[inline]
    fn mat_mul(m0: [Self::Lanes; 4], m1: [Self::Lanes; 4]) -> [Self::Lanes; 4] {
        let a = m0.map(Self::to_array);
        let b = m1.map(Self::to_array);
        core::array::from_fn(|row| {
            let c = |col: usize| {
                a[row][0] * b[0][col]
                    + a[row][1] * b[1][col]
                    + a[row][2] * b[2][col]
                    + a[row][3] * b[3][col]
            };
            Self::set(c(0), c(1), c(2), c(3))
        })
    }

    #[inline]
    fn mat_add(m0: [Self::Lanes; 4], m1: [Self::Lanes; 4]) -> [Self::Lanes; 4] {
        core::array::from_fn(|row| Self::add(m0[row], m1[row]))
    }

    #[inline]
    fn mat_sub(m0: [Self::Lanes; 4], m1: [Self::Lanes; 4]) -> [Self::Lanes; 4] {
        core::array::from_fn(|row| Self::sub(m0[row], m1[row]))
    }

    /// Upper-left 3x3 block applied to `v`; w passes through unchanged.
    #[inline]
    fn mat_rotate(m: [Self::Lanes; 4], v: Self::Lanes) -> Self::Lanes {
        let r = m.map(Self::to_array);
        let [x, y, z, w] = Self::to_array(v);
        let c = |col: usize| r[0][col] * x + r[1][col] * y + r[2][col] * z;
        Self::set(c(0), c(1), c(2), w)
    }

    /// Full homogeneous transform: `result[col] = Σ_k m[k][col] * v[k]`.
    #[inline]
    fn mat_transform(m: [Self::Lanes; 4], v: Self::Lanes) -> Self::Lanes {
        let r = m.map(Self::to_array);
        let [x, y, z, w] = Self::to_array(v);
        let c = |col: usize| r[0][col] * x + r[1][col] * y + r[2][col] * z + r[3][col] * w;
        Self::set(c(0), c(1), c(2), c(3))
    }
}

/// A complete backend: vector, quaternion and matrix operations.
pub trait Backend: QuaternionOps + MatrixOps {}

impl<B: QuaternionOps + MatrixOps> Backend for B {}
