//! Approximate floating-point comparison used by `equal` / `almost_equal`.

use num_traits::Float;

/// Maximum distance in units in the last place for [`real_eq`] based
/// equality (`Vector::equal` and friends).
pub const ULP_TOLERANCE: u32 = 100;

/// Relative tolerance for [`real_almost_eq`] (`Vector::almost_equal`).
pub const ALMOST_EPSILON: f32 = 1e-5;

/// Relative error bound of the `*_fast` length and normalize variants.
///
/// SSE uses the hardware reciprocal square root estimate (12 bits), NEON
/// refines its estimate with one Newton-Raphson step. The portable backend
/// computes the exact value.
pub const FAST_TOLERANCE: f32 = 1e-3;

/// Map the bit pattern of an `f32` onto a monotonically ordered integer line,
/// so adjacent floats differ by exactly one.
#[inline]
fn ordered_bits(f: f32) -> i32 {
    let i = f.to_bits() as i32;
    if i < 0 { i32::MIN.wrapping_sub(i) } else { i }
}

/// Distance between `a` and `b` in units in the last place.
///
/// `+0.0` and `-0.0` are zero apart. Returns `u32::MAX` if either is NaN.
#[inline]
pub fn ulps_between(a: f32, b: f32) -> u32 {
    if a.is_nan() || b.is_nan() {
        return u32::MAX;
    }
    ordered_bits(a).abs_diff(ordered_bits(b))
}

/// `true` if `a` and `b` are at most `ulps` representable floats apart.
///
/// Equal infinities compare equal; NaN never does.
#[inline]
pub fn real_eq(a: f32, b: f32, ulps: u32) -> bool {
    a == b || ulps_between(a, b) <= ulps
}

/// `true` if `|a - b| <= epsilon * max(1, |a|, |b|)`.
///
/// Absolute near zero, relative for large magnitudes. Used where results of
/// different computation orders must agree (e.g. `q * q⁻¹ ≈ identity`).
#[inline]
pub fn real_almost_eq(a: f32, b: f32, epsilon: f32) -> bool {
    if a == b {
        return true;
    }
    let scale = 1.0_f32.max(Float::abs(a)).max(Float::abs(b));
    Float::abs(a - b) <= epsilon * scale
}

#[inline]
pub(crate) fn lanes_eq(a: [f32; 4], b: [f32; 4], ulps: u32) -> bool {
    a.iter().zip(b.iter()).all(|(&x, &y)| real_eq(x, y, ulps))
}

#[inline]
pub(crate) fn lanes_almost_eq(a: [f32; 4], b: [f32; 4], epsilon: f32) -> bool {
    a.iter().zip(b.iter()).all(|(&x, &y)| real_almost_eq(x, y, epsilon))
}
