mod ops;

use core::fmt;

use crate::align::Align16;
use crate::quaternion::Quat;
use crate::simd::Active;
use crate::traits::{MatrixOps, QuaternionOps};
use crate::vector::Vec4;

/// 4x4 matrix on the active backend.
pub type Matrix = Mat4<Active>;

/// 4x4 `f32` matrix, four row vectors.
///
/// Storage and indexing are row-major. Vectors are treated as rows and
/// multiplied on the left: [`transform`](Self::transform) computes
/// `result[col] = Σ_k v[k] * m[k][col]`, so the translation lives in row 3
/// and `(a * b).transform(v) == b.transform(a.transform(v))`.
///
/// # Examples
///
/// ```
/// use lanemath::{Matrix, Vector};
///
/// let m = Matrix::translation(Vector::new(1.0, 2.0, 3.0, 0.0));
/// let p = m.transform(Vector::origin());
/// assert_eq!(p.to_array(), [1.0, 2.0, 3.0, 1.0]);
///
/// // directions (w = 0) ignore translation
/// let d = m.transform(Vector::x_axis());
/// assert_eq!(d.to_array(), [1.0, 0.0, 0.0, 0.0]);
/// ```
pub struct Mat4<B: MatrixOps> {
    rows: [B::Lanes; 4],
}

impl<B: MatrixOps> Clone for Mat4<B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: MatrixOps> Copy for Mat4<B> {}

impl<B: MatrixOps> Mat4<B> {
    #[inline]
    pub fn from_lanes(rows: [B::Lanes; 4]) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn lanes(self) -> [B::Lanes; 4] {
        self.rows
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_lanes(B::mat_zero())
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_lanes(B::mat_identity())
    }

    #[inline]
    pub fn from_rows(rows: [Vec4<B>; 4]) -> Self {
        Self::from_lanes(rows.map(Vec4::lanes))
    }

    /// Build from a row-major 2D array `[[row0], [row1], ...]`.
    #[inline]
    pub fn new(rows: [[f32; 4]; 4]) -> Self {
        Self::from_lanes(rows.map(B::from_array))
    }

    /// Load 16 row-major floats from storage whose type guarantees alignment.
    #[inline]
    pub fn from_aligned(data: &Align16<[f32; 16]>) -> Self {
        // SAFETY: Align16 places the array on a 16-byte boundary and every
        // row starts a multiple of 16 bytes after it.
        Self::from_lanes(unsafe { B::mat_load_aligned(data.0.as_ptr()) })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 `f32` and aligned to 16 bytes.
    #[inline]
    pub unsafe fn from_aligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::mat_load_aligned(ptr) })
    }

    #[inline]
    pub fn from_unaligned(data: &[f32; 16]) -> Self {
        // SAFETY: a reference to [f32; 16] is valid for sixteen reads.
        Self::from_lanes(unsafe { B::mat_load_unaligned(data.as_ptr()) })
    }

    /// # Safety
    ///
    /// `ptr` must be valid for reading 16 `f32`.
    #[inline]
    pub unsafe fn from_unaligned_ptr(ptr: *const f32) -> Self {
        Self::from_lanes(unsafe { B::mat_load_unaligned(ptr) })
    }

    /// Translation by the xyz part of `t`.
    #[inline]
    pub fn translation(t: Vec4<B>) -> Self {
        let mut rows = B::mat_identity();
        rows[3] = B::set(t.x(), t.y(), t.z(), 1.0);
        Self::from_lanes(rows)
    }

    /// Non-uniform scale by the xyz part of `s`.
    #[inline]
    pub fn scaling(s: Vec4<B>) -> Self {
        Self::from_lanes([
            B::set(s.x(), 0.0, 0.0, 0.0),
            B::set(0.0, s.y(), 0.0, 0.0),
            B::set(0.0, 0.0, s.z(), 0.0),
            B::origin(),
        ])
    }

    /// Rotation matrix of unit quaternion `q`.
    ///
    /// `Mat4::from_quaternion(q).rotate(v)` matches `q.rotate(v)` in x, y, z.
    pub fn from_quaternion(q: Quat<B>) -> Self
    where
        B: QuaternionOps,
    {
        let [x, y, z, w] = q.to_array();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);
        Self::from_lanes([
            B::set(1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw), 2.0 * (xz - yw), 0.0),
            B::set(2.0 * (xy - zw), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + xw), 0.0),
            B::set(2.0 * (xz + yw), 2.0 * (yz - xw), 1.0 - 2.0 * (xx + yy), 0.0),
            B::origin(),
        ])
    }

    /// Row `i`.
    ///
    /// # Panics
    ///
    /// If `i >= 4`.
    #[inline]
    pub fn row(self, i: usize) -> Vec4<B> {
        assert!(i < 4, "row index {i} out of range 0..4");
        Vec4::from_lanes(self.rows[i])
    }

    #[inline]
    pub fn rows(self) -> [Vec4<B>; 4] {
        self.rows.map(Vec4::from_lanes)
    }

    /// Element at `(row, col)`. Panics if either index is `>= 4`.
    #[inline]
    pub fn get(self, row: usize, col: usize) -> f32 {
        self.row(row).component(col)
    }

    /// 16 floats, row-major.
    pub fn to_array(self) -> [f32; 16] {
        let mut out = [0.0_f32; 16];
        for (chunk, row) in out.chunks_exact_mut(4).zip(self.rows) {
            chunk.copy_from_slice(&B::to_array(row));
        }
        out
    }

    #[inline]
    pub fn to_rows_array(self) -> [[f32; 4]; 4] {
        self.rows.map(B::to_array)
    }
}

// ── Operations ───────────────────────────────────────────────────────

impl<B: MatrixOps> Mat4<B> {
    #[inline]
    pub fn transpose(self) -> Self {
        Self::from_lanes(B::mat_transpose(self.rows))
    }

    /// `r[row][col] = Σ_k self[row][k] * rhs[k][col]`
    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_mul(self.rows, rhs.rows))
    }

    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_add(self.rows, rhs.rows))
    }

    #[inline]
    pub fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_sub(self.rows, rhs.rows))
    }

    /// Apply the upper-left 3x3 block to `v`; w passes through.
    #[inline]
    pub fn rotate(self, v: Vec4<B>) -> Vec4<B> {
        Vec4::from_lanes(B::mat_rotate(self.rows, v.lanes()))
    }

    /// Full homogeneous transform, translation included.
    #[inline]
    pub fn transform(self, v: Vec4<B>) -> Vec4<B> {
        Vec4::from_lanes(B::mat_transform(self.rows, v.lanes()))
    }

    /// Every row [`Vec4::equal`].
    pub fn equal(self, rhs: Self) -> bool {
        self.rows.iter().zip(rhs.rows.iter()).all(|(a, b)| B::equal(*a, *b))
    }

    /// Every row [`Vec4::almost_equal`].
    pub fn almost_equal(self, rhs: Self) -> bool {
        self.rows.iter().zip(rhs.rows.iter()).all(|(a, b)| B::almost_equal(*a, *b))
    }
}

impl<B: MatrixOps> Default for Mat4<B> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<B: MatrixOps> PartialEq for Mat4<B> {
    fn eq(&self, other: &Self) -> bool {
        self.to_array() == other.to_array()
    }
}

impl<B: MatrixOps> fmt::Debug for Mat4<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_rows_array().iter()).finish()
    }
}

impl<B: MatrixOps> fmt::Display for Mat4<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

impl<B: MatrixOps> From<[[f32; 4]; 4]> for Mat4<B> {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self::new(rows)
    }
}
