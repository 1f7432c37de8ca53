use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Float;

use crate::align::Align16;
use crate::simd::Active;
use crate::traits::QuaternionOps;
use crate::vector::Vec4;

/// Quaternion on the active backend.
pub type Quaternion = Quat<Active>;

/// Rotation quaternion, `(x, y, z)` imaginary and `w` real.
///
/// Same lane layout as [`Vec4`]. Unit norm is not enforced; only
/// [`normalize`](Self::normalize) establishes it, and
/// [`rotate`](Self::rotate) assumes it.
///
/// Multiplication composes rotations in application order: `a * b` rotates
/// by `a` first, then by `b`.
///
/// ```
/// use lanemath::{Quaternion, Vector};
/// use core::f32::consts::FRAC_PI_2;
///
/// let about_z = Quaternion::from_axis_angle(Vector::z_axis(), FRAC_PI_2);
/// let v = about_z.rotate(Vector::x_axis());
/// assert!(v.almost_equal(Vector::new(0.0, 1.0, 0.0, 1.0)));
/// ```
#[repr(transparent)]
pub struct Quat<B: QuaternionOps> {
    lanes: B::Lanes,
}

impl<B: QuaternionOps> Clone for Quat<B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: QuaternionOps> Copy for Quat<B> {}

// ── Constructors ─────────────────────────────────────────────────────

impl<B: QuaternionOps> Quat<B> {
    #[inline]
    pub fn from_lanes(lanes: B::Lanes) -> Self {
        Self { lanes }
    }

    #[inline]
    pub fn lanes(self) -> B::Lanes {
        self.lanes
    }

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::from_lanes(B::set(x, y, z, w))
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_lanes(B::quat_zero())
    }

    /// No rotation, `(0, 0, 0, 1)`.
    #[inline]
    pub fn identity() -> Self {
        Self::from_lanes(B::quat_identity())
    }

    /// Rotation by `angle` radians about `axis`, which must be unit length.
    #[inline]
    pub fn from_axis_angle(axis: Vec4<B>, angle: f32) -> Self {
        let (s, c) = Float::sin_cos(angle * 0.5);
        Self::new(axis.x() * s, axis.y() * s, axis.z() * s, c)
    }

    #[inline]
    pub fn from_vector(v: Vec4<B>) -> Self {
        Self::from_lanes(v.lanes())
    }

    #[inline]
    pub fn to_vector(self) -> Vec4<B> {
        Vec4::from_lanes(self.lanes)
    }

    #[inline]
    pub fn from_array(a: [f32; 4]) -> Self {
        Self::from_lanes(B::from_array(a))
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        B::to_array(self.lanes)
    }

    #[inline]
    pub fn from_aligned(data: &Align16<[f32; 4]>) -> Self {
        // SAFETY: Align16 places the array on a 16-byte boundary.
        Self::from_lanes(unsafe { B::quat_load_aligned(data.0.as_ptr()) })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn from_aligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::quat_load_aligned(ptr) })
    }

    #[inline]
    pub fn from_unaligned(data: &[f32; 4]) -> Self {
        // SAFETY: a reference to [f32; 4] is valid for four reads.
        Self::from_lanes(unsafe { B::quat_load_unaligned(data.as_ptr()) })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading four `f32`.
    #[inline]
    pub unsafe fn from_unaligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::quat_load_unaligned(ptr) })
    }
}

// ── Core operations ──────────────────────────────────────────────────

impl<B: QuaternionOps> Quat<B> {
    /// `(-x, -y, -z, w)`
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::from_lanes(B::quat_conjugate(self.lanes))
    }

    /// Conjugate over squared norm. A zero quaternion yields Inf/NaN lanes.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::from_lanes(B::quat_inverse(self.lanes))
    }

    /// Negate all four lanes. Represents the same rotation.
    #[inline]
    pub fn neg(self) -> Self {
        Self::from_lanes(B::quat_neg(self.lanes))
    }

    #[inline]
    pub fn normalize(self) -> Self {
        Self::from_lanes(B::quat_normalize(self.lanes))
    }

    /// `self` followed by `then`.
    #[inline]
    pub fn mul(self, then: Self) -> Self {
        Self::from_lanes(B::quat_mul(self.lanes, then.lanes))
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self::from_lanes(B::quat_add(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(B::quat_sub(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::from_lanes(B::scale(self.lanes, s))
    }

    /// Four-lane dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        B::x(B::dot(self.lanes, rhs.lanes))
    }

    #[inline]
    pub fn length(self) -> f32 {
        B::x(B::length(self.lanes))
    }

    /// Spherical interpolation along the shortest arc, `t` unclamped.
    ///
    /// When `self` and `to` coincide (up to sign) the result is `to`, with
    /// its sign flipped to lie on the same hemisphere as `self`.
    #[inline]
    pub fn slerp(self, to: Self, t: f32) -> Self {
        Self::from_lanes(B::quat_slerp(self.lanes, to.lanes, t))
    }

    /// Rotate the xyz part of `v`. The result has w = 1.
    #[inline]
    pub fn rotate(self, v: Vec4<B>) -> Vec4<B> {
        Vec4::from_lanes(B::quat_rotate(self.lanes, v.lanes()))
    }

    /// Every lane within [`ULP_TOLERANCE`](crate::compare::ULP_TOLERANCE) ULPs.
    #[inline]
    pub fn equal(self, rhs: Self) -> bool {
        B::equal(self.lanes, rhs.lanes)
    }

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
}

// ── Standard traits ──────────────────────────────────────────────────

impl<B: QuaternionOps> Default for Quat<B> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<B: QuaternionOps> PartialEq for Quat<B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<B: QuaternionOps> fmt::Debug for Quat<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        f.debug_struct("Quat")
            .field("x", &x)
            .field("y", &y)
            .field("z", &z)
            .field("w", &w)
            .finish()
    }
}

impl<B: QuaternionOps> fmt::Display for Quat<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.to_array();
        write!(f, "({x}, {y}, {z}, {w})")
    }
}

impl<B: QuaternionOps> From<Vec4<B>> for Quat<B> {
    fn from(v: Vec4<B>) -> Self {
        Self::from_vector(v)
    }
}

impl<B: QuaternionOps> From<Quat<B>> for Vec4<B> {
    fn from(q: Quat<B>) -> Self {
        q.to_vector()
    }
}

// ── Operators ────────────────────────────────────────────────────────

impl<B: QuaternionOps> Mul for Quat<B> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(B::quat_mul(self.lanes, rhs.lanes))
    }
}

impl<B: QuaternionOps> MulAssign for Quat<B> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.lanes = B::quat_mul(self.lanes, rhs.lanes);
    }
}

impl<B: QuaternionOps> Mul<f32> for Quat<B> {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        self.scale(s)
    }
}

impl<B: QuaternionOps> Add for Quat<B> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_lanes(B::quat_add(self.lanes, rhs.lanes))
    }
}

impl<B: QuaternionOps> AddAssign for Quat<B> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.lanes = B::quat_add(self.lanes, rhs.lanes);
    }
}

impl<B: QuaternionOps> Sub for Quat<B> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(B::quat_sub(self.lanes, rhs.lanes))
    }
}

impl<B: QuaternionOps> SubAssign for Quat<B> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.lanes = B::quat_sub(self.lanes, rhs.lanes);
    }
}

impl<B: QuaternionOps> Neg for Quat<B> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_lanes(B::quat_neg(self.lanes))
    }
}

/// Rotate a vector: `q * v` is [`Quat::rotate`].
impl<B: QuaternionOps> Mul<Vec4<B>> for Quat<B> {
    type Output = Vec4<B>;

    #[inline]
    fn mul(self, v: Vec4<B>) -> Vec4<B> {
        self.rotate(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;
    use core::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_and_zero() {
        assert_eq!(Quaternion::identity().to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Quaternion::zero().to_array(), [0.0; 4]);
        assert_eq!(Quaternion::default(), Quaternion::identity());
    }

    #[test]
    fn axis_angle_half_turn() {
        let q = Quaternion::from_axis_angle(Vector::y_axis(), PI);
        assert!(q.almost_equal(Quaternion::new(0.0, 1.0, 0.0, 0.0)));
        let v = q.rotate(Vector::new(1.0, 0.0, 0.0, 0.0));
        assert!(v.almost_equal(Vector::new(-1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn composition_order() {
        // z first takes x to y; x second takes y to z
        let qz = Quaternion::from_axis_angle(Vector::z_axis(), FRAC_PI_2);
        let qx = Quaternion::from_axis_angle(Vector::x_axis(), FRAC_PI_2);
        let v = Vector::x_axis();

        let composed = (qz * qx).rotate(v);
        let stepwise = qx.rotate(qz.rotate(v));
        assert!(composed.almost_equal(Vector::new(0.0, 0.0, 1.0, 1.0)));
        assert!(composed.almost_equal(stepwise));

        let other = (qx * qz).rotate(v);
        assert!(other.almost_equal(Vector::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn neg_is_same_rotation() {
        let q = Quaternion::from_axis_angle(Vector::new(0.6, 0.0, 0.8, 0.0), 1.2);
        let v = Vector::new(1.0, 2.0, 3.0, 0.0);
        assert!(q.rotate(v).almost_equal((-q).rotate(v)));
        assert_eq!((-q).to_array(), q.neg().to_array());
    }

    #[test]
    fn dot_and_length() {
        let q = Quaternion::new(1.0, -2.0, 3.0, -4.0);
        assert_eq!(q.dot(q), 30.0);
        assert_eq!(q.length(), 30.0_f32.sqrt());
    }

    #[test]
    fn display() {
        assert_eq!(Quaternion::identity().to_string(), "(0, 0, 0, 1)");
    }
}
