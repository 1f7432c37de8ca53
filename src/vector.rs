use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::align::Align16;
use crate::simd::Active;
use crate::traits::VectorOps;

/// Four-lane `f32` vector on the active backend.
pub type Vector = Vec4<Active>;

/// Cartesian basis direction for [`Vec4::axis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Four `f32` lanes `(x, y, z, w)` held in backend `B`'s native register.
///
/// Plain value type: every operation returns a new vector. Reductions such
/// as [`dot`](Self::dot) and [`length`](Self::length) return the scalar
/// broadcast into all four lanes; read it with [`x`](Self::x).
///
/// `==` compares lanes exactly. After arithmetic use [`equal`](Self::equal)
/// (ULP based) or [`almost_equal`](Self::almost_equal).
///
/// ```
/// use lanemath::Vector;
///
/// let a = Vector::new(1.0, 2.0, 3.0, 0.0);
/// let b = Vector::new(4.0, 5.0, 6.0, 0.0);
/// assert_eq!(a.dot3(b).x(), 32.0);
/// assert_eq!((a + b).to_array(), [5.0, 7.0, 9.0, 0.0]);
/// assert_eq!(a.cross3(b).to_array(), [-3.0, 6.0, -3.0, 0.0]);
/// ```
#[repr(transparent)]
pub struct Vec4<B: VectorOps> {
    lanes: B::Lanes,
}

impl<B: VectorOps> Clone for Vec4<B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: VectorOps> Copy for Vec4<B> {}

// ── Constructors ─────────────────────────────────────────────────────

impl<B: VectorOps> Vec4<B> {
    /// Wrap a native register.
    #[inline]
    pub fn from_lanes(lanes: B::Lanes) -> Self {
        Self { lanes }
    }

    /// The native register.
    #[inline]
    pub fn lanes(self) -> B::Lanes {
        self.lanes
    }

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::from_lanes(B::set(x, y, z, w))
    }

    /// All four lanes set to `s`.
    #[inline]
    pub fn uniform(s: f32) -> Self {
        Self::from_lanes(B::splat(s))
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_lanes(B::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self::from_lanes(B::one())
    }

    #[inline]
    pub fn half() -> Self {
        Self::from_lanes(B::half())
    }

    #[inline]
    pub fn two() -> Self {
        Self::from_lanes(B::two())
    }

    /// The homogeneous origin `(0, 0, 0, 1)`.
    #[inline]
    pub fn origin() -> Self {
        Self::from_lanes(B::origin())
    }

    /// Unit basis vector with w = 0.
    #[inline]
    pub fn axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::x_axis(),
            Axis::Y => Self::y_axis(),
            Axis::Z => Self::z_axis(),
        }
    }

    #[inline]
    pub fn x_axis() -> Self {
        Self::from_lanes(B::x_axis())
    }

    #[inline]
    pub fn y_axis() -> Self {
        Self::from_lanes(B::y_axis())
    }

    #[inline]
    pub fn z_axis() -> Self {
        Self::from_lanes(B::z_axis())
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        Self::from_lanes(B::from_array(a))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        B::to_array(self.lanes)
    }

    /// Load from storage whose type guarantees 16-byte alignment.
    #[inline]
    pub fn from_aligned(data: &Align16<[f32; 4]>) -> Self {
        // SAFETY: Align16 places the array on a 16-byte boundary.
        Self::from_lanes(unsafe { B::load_aligned(data.0.as_ptr()) })
    }

    /// Load four floats from a 16-byte aligned address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32` and aligned to 16 bytes.
    /// Misalignment is caught by a debug assertion only; in release builds
    /// it is undefined behaviour.
    #[inline]
    pub unsafe fn from_aligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::load_aligned(ptr) })
    }

    #[inline]
    pub fn from_unaligned(data: &[f32; 4]) -> Self {
        // SAFETY: a reference to [f32; 4] is valid for four reads.
        Self::from_lanes(unsafe { B::load_unaligned(data.as_ptr()) })
    }

    /// Load four floats from any address.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32`.
    #[inline]
    pub unsafe fn from_unaligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::load_unaligned(ptr) })
    }
}

// ── Arithmetic and geometry ──────────────────────────────────────────

impl<B: VectorOps> Vec4<B> {
    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self::from_lanes(B::add(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(B::sub(self.lanes, rhs.lanes))
    }

    /// Lane-wise product.
    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(B::mul(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn div(self, rhs: Self) -> Self {
        Self::from_lanes(B::div(self.lanes, rhs.lanes))
    }

    /// `zero() - self`
    #[inline]
    pub fn neg(self) -> Self {
        Self::from_lanes(B::neg(self.lanes))
    }

    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::from_lanes(B::scale(self.lanes, s))
    }

    /// `self * m + a`, never fused.
    #[inline]
    pub fn muladd(self, m: Self, a: Self) -> Self {
        Self::from_lanes(B::muladd(self.lanes, m.lanes, a.lanes))
    }

    /// Four-lane dot product, broadcast.
    #[inline]
    pub fn dot(self, rhs: Self) -> Self {
        Self::from_lanes(B::dot(self.lanes, rhs.lanes))
    }

    /// Dot product of x, y, z, broadcast.
    #[inline]
    pub fn dot3(self, rhs: Self) -> Self {
        Self::from_lanes(B::dot3(self.lanes, rhs.lanes))
    }

    /// Cross product of the xyz parts; w is zero.
    #[inline]
    pub fn cross3(self, rhs: Self) -> Self {
        Self::from_lanes(B::cross3(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn length_sqr(self) -> Self {
        Self::from_lanes(B::length_sqr(self.lanes))
    }

    #[inline]
    pub fn length(self) -> Self {
        Self::from_lanes(B::length(self.lanes))
    }

    /// Approximate [`length`](Self::length), relative error at most
    /// [`FAST_TOLERANCE`](crate::compare::FAST_TOLERANCE).
    #[inline]
    pub fn length_fast(self) -> Self {
        Self::from_lanes(B::length_fast(self.lanes))
    }

    #[inline]
    pub fn length3_sqr(self) -> Self {
        Self::from_lanes(B::length3_sqr(self.lanes))
    }

    #[inline]
    pub fn length3(self) -> Self {
        Self::from_lanes(B::length3(self.lanes))
    }

    #[inline]
    pub fn length3_fast(self) -> Self {
        Self::from_lanes(B::length3_fast(self.lanes))
    }

    /// Scale all four lanes by `1 / length()`. A zero vector gives NaN.
    #[inline]
    pub fn normalize(self) -> Self {
        Self::from_lanes(B::normalize(self.lanes))
    }

    #[inline]
    pub fn normalize_fast(self) -> Self {
        Self::from_lanes(B::normalize_fast(self.lanes))
    }

    /// Scale x, y, z by `1 / length3()`; w is preserved.
    #[inline]
    pub fn normalize3(self) -> Self {
        Self::from_lanes(B::normalize3(self.lanes))
    }

    #[inline]
    pub fn normalize3_fast(self) -> Self {
        Self::from_lanes(B::normalize3_fast(self.lanes))
    }

    /// Linear interpolation, `t` unclamped. `lerp(a, b, 0) == a`.
    #[inline]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::from_lanes(B::lerp(self.lanes, to.lanes, t))
    }

    /// Mirror `self` about `normal`, which need not be unit length.
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        Self::from_lanes(B::reflect(self.lanes, normal.lanes))
    }

    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        Self::from_lanes(B::min(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        Self::from_lanes(B::max(self.lanes, rhs.lanes))
    }

    /// Lane permutation with a compile-time mask from [`crate::mask`].
    #[inline]
    pub fn shuffle<const MASK: i32>(self) -> Self {
        Self::from_lanes(B::shuffle::<MASK>(self.lanes))
    }
}

// ── Comparison and lane access ───────────────────────────────────────

impl<B: VectorOps> Vec4<B> {
    /// Every lane within [`ULP_TOLERANCE`](crate::compare::ULP_TOLERANCE) ULPs.
    #[inline]
    pub fn equal(self, rhs: Self) -> bool {
        B::equal(self.lanes, rhs.lanes)
    }

    /// Every lane within [`ALMOST_EPSILON`](crate::compare::ALMOST_EPSILON),
    /// relative for magnitudes above 1.
    #[inline]
    pub fn almost_equal(self, rhs: Self) -> bool {
        B::almost_equal(self.lanes, rhs.lanes)
    }

    #[inline]
    pub fn x(self) -> f32 {
        B::x(self.lanes)
    }

    #[inline]
    pub fn y(self) -> f32 {
        B::y(self.lanes)
    }

    #[inline]
    pub fn z(self) -> f32 {
        B::z(self.lanes)
    }

    #[inline]
    pub fn w(self) -> f32 {
        B::w(self.lanes)
    }

    /// Lane `i`.
    ///
    /// # Panics
    ///
    /// If `i >= 4`.
    #[inline]
    pub fn component(self, i: usize) -> f32 {
        B::component(self.lanes, i)
    }
}

// ── Standard traits ──────────────────────────────────────────────────

impl<B: VectorOps> Default for Vec4<B> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<B: VectorOps> PartialEq for Vec4<B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<B: VectorOps> fmt::Debug for Vec4<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        f.debug_struct("Vec4")
            .field("x", &x)
            .field("y", &y)
            .field("z", &z)
            .field("w", &w)
            .finish()
    }
}

impl<B: VectorOps> fmt::Display for Vec4<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        write!(f, "({x}, {y}, {z}, {w})")
    }
}

impl<B: VectorOps> From<[f32; 4]> for Vec4<B> {
    fn from(a: [f32; 4]) -> Self {
        Self::from_array(a)
    }
}

impl<B: VectorOps> From<Vec4<B>> for [f32; 4] {
    fn from(v: Vec4<B>) -> Self {
        v.to_array()
    }
}

// ── Operators ────────────────────────────────────────────────────────

macro_rules! lane_binop {
    ($Op:ident, $method:ident, $OpAssign:ident, $assign:ident) => {
        impl<B: VectorOps> $Op for Vec4<B> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                Self::from_lanes(B::$method(self.lanes, rhs.lanes))
            }
        }

        impl<B: VectorOps> $OpAssign for Vec4<B> {
            #[inline]
            fn $assign(&mut self, rhs: Self) {
                self.lanes = B::$method(self.lanes, rhs.lanes);
            }
        }

        impl<B: VectorOps> $Op<Vec4<B>> for &Vec4<B> {
            type Output = Vec4<B>;

            #[inline]
            fn $method(self, rhs: Vec4<B>) -> Vec4<B> {
                Vec4::from_lanes(B::$method(self.lanes, rhs.lanes))
            }
        }

        impl<B: VectorOps> $Op<&Vec4<B>> for Vec4<B> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: &Self) -> Self {
                Self::from_lanes(B::$method(self.lanes, rhs.lanes))
            }
        }

        impl<B: VectorOps> $Op<&Vec4<B>> for &Vec4<B> {
            type Output = Vec4<B>;

            #[inline]
            fn $method(self, rhs: &Vec4<B>) -> Vec4<B> {
                Vec4::from_lanes(B::$method(self.lanes, rhs.lanes))
            }
        }

        impl<B: VectorOps> $OpAssign<&Vec4<B>> for Vec4<B> {
            #[inline]
            fn $assign(&mut self, rhs: &Self) {
                self.lanes = B::$method(self.lanes, rhs.lanes);
            }
        }
    };
}

lane_binop!(Add, add, AddAssign, add_assign);
lane_binop!(Sub, sub, SubAssign, sub_assign);
lane_binop!(Mul, mul, MulAssign, mul_assign);
lane_binop!(Div, div, DivAssign, div_assign);

impl<B: VectorOps> Mul<f32> for Vec4<B> {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl<B: VectorOps> Mul<f32> for &Vec4<B> {
    type Output = Vec4<B>;

    #[inline]
    fn mul(self, s: f32) -> Vec4<B> {
        self.scale(s)
    }
}

impl<B: VectorOps> Mul<Vec4<B>> for f32 {
    type Output = Vec4<B>;

    #[inline]
    fn mul(self, v: Vec4<B>) -> Vec4<B> {
        v.scale(self)
    }
}

impl<B: VectorOps> MulAssign<f32> for Vec4<B> {
    #[inline]
    fn mul_assign(&mut self, s: f32) {
        *self = self.scale(s);
    }
}

impl<B: VectorOps> Neg for Vec4<B> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(B::neg(self.lanes))
    }
}

impl<B: VectorOps> Neg for &Vec4<B> {
    type Output = Vec4<B>;

    #[inline]
    fn neg(self) -> Vec4<B> {
        Vec4::from_lanes(B::neg(self.lanes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask;

    #[test]
    fn constants() {
        assert_eq!(Vector::zero().to_array(), [0.0; 4]);
        assert_eq!(Vector::one().to_array(), [1.0; 4]);
        assert_eq!(Vector::half().to_array(), [0.5; 4]);
        assert_eq!(Vector::two().to_array(), [2.0; 4]);
        assert_eq!(Vector::uniform(-3.0).to_array(), [-3.0; 4]);
        assert_eq!(Vector::origin().to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Vector::axis(Axis::Y).to_array(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(Vector::axis(Axis::Z), Vector::z_axis());
    }

    #[test]
    fn operators() {
        let a = Vector::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector::new(2.0, 4.0, 8.0, 16.0);
        assert_eq!((a + b).to_array(), [3.0, 6.0, 11.0, 20.0]);
        assert_eq!((b - a).to_array(), [1.0, 2.0, 5.0, 12.0]);
        assert_eq!((a * b).to_array(), [2.0, 8.0, 24.0, 64.0]);
        assert_eq!((b / a).to_array(), [2.0, 2.0, 8.0 / 3.0, 4.0]);
        assert_eq!((a * 2.0).to_array(), (2.0 * a).to_array());
        assert_eq!((-a).to_array(), [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!(&a + &b, a + b);

        let mut c = a;
        c += b;
        c -= a;
        c *= 0.5;
        assert_eq!(c.to_array(), [1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn neg_of_zero_is_positive_zero() {
        let n = Vector::zero().neg().to_array();
        assert!(n.iter().all(|v| *v == 0.0 && v.is_sign_positive()));
    }

    #[test]
    fn lerp_endpoints_and_extrapolation() {
        let a = Vector::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).to_array(), [3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.lerp(b, 2.0).to_array(), [9.0, 10.0, 11.0, 12.0]);
    }

    #[test]
    fn reflect_renormalizes_normal() {
        let v = Vector::new(1.0, -1.0, 0.0, 0.0);
        let r = v.reflect(Vector::new(0.0, 10.0, 0.0, 0.0));
        assert!(r.almost_equal(Vector::new(-1.0, -1.0, 0.0, 0.0)));
    }

    #[test]
    fn min_max() {
        let a = Vector::new(1.0, 5.0, -3.0, 0.0);
        let b = Vector::new(2.0, 4.0, -4.0, 0.0);
        assert_eq!(a.min(b).to_array(), [1.0, 4.0, -4.0, 0.0]);
        assert_eq!(a.max(b).to_array(), [2.0, 5.0, -3.0, 0.0]);
    }

    #[test]
    fn lengths() {
        let v = Vector::new(1.0, 2.0, 2.0, 4.0);
        assert_eq!(v.length_sqr().to_array(), [25.0; 4]);
        assert_eq!(v.length().to_array(), [5.0; 4]);
        assert_eq!(v.length3_sqr().x(), 9.0);
        assert_eq!(v.length3().x(), 3.0);
        let n = v.normalize3();
        assert!(n.length3().almost_equal(Vector::one()));
        assert_eq!(n.w(), 4.0);
        assert!(v.normalize().length().equal(Vector::one()));
    }

    #[test]
    fn shuffle_named_and_built() {
        let v = Vector::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.shuffle::<{ mask::WZYX }>().to_array(), [4.0, 3.0, 2.0, 1.0]);
        assert_eq!(v.shuffle::<{ mask::XYZW }>(), v);
        assert_eq!(v.shuffle::<{ mask::lanes(2, 2, 1, 0) }>().to_array(), [3.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn components() {
        let v = Vector::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!((v.x(), v.y(), v.z(), v.w()), (1.0, 2.0, 3.0, 4.0));
        for i in 0..4 {
            assert_eq!(v.component(i), (i + 1) as f32);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn component_out_of_range() {
        Vector::one().component(4);
    }

    #[test]
    fn aligned_and_unaligned_loads() {
        let a = Align16([1.0_f32, -2.0, 3.0, -4.0]);
        let v = Vector::from_aligned(&a);
        assert_eq!(v, Vector::from_unaligned(&[1.0, -2.0, 3.0, -4.0]));

        let buf = [0.0_f32, 1.0, 2.0, 3.0, 4.0];
        let u = unsafe { Vector::from_unaligned_ptr(buf.as_ptr().add(1)) };
        assert_eq!(u.to_array(), [1.0, 2.0, 3.0, 4.0]);
        let p = unsafe { Vector::from_aligned_ptr(a.as_ptr()) };
        assert_eq!(p, v);
    }

    #[test]
    fn display() {
        assert_eq!(Vector::new(1.0, -2.5, 0.0, 4.0).to_string(), "(1, -2.5, 0, 4)");
    }
}
