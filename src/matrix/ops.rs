use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use crate::traits::MatrixOps;
use crate::vector::Vec4;

use super::Mat4;

// ── Row-wise addition and subtraction ────────────────────────────────

impl<B: MatrixOps> Add for Mat4<B> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_add(self.rows, rhs.rows))
    }
}

impl<B: MatrixOps> AddAssign for Mat4<B> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.rows = B::mat_add(self.rows, rhs.rows);
    }
}

impl<B: MatrixOps> Sub for Mat4<B> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_sub(self.rows, rhs.rows))
    }
}

impl<B: MatrixOps> SubAssign for Mat4<B> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.rows = B::mat_sub(self.rows, rhs.rows);
    }
}

// ── Matrix product ───────────────────────────────────────────────────

impl<B: MatrixOps> Mul for Mat4<B> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_lanes(B::mat_mul(self.rows, rhs.rows))
    }
}

impl<B: MatrixOps> MulAssign for Mat4<B> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.rows = B::mat_mul(self.rows, rhs.rows);
    }
}

// ── Reference variants ───────────────────────────────────────────────
// Mat4 is Copy, so &Mat4 ops just deref and delegate.

macro_rules! forward_ref_binop {
    ($Op:ident, $method:ident) => {
        impl<B: MatrixOps> $Op<Mat4<B>> for &Mat4<B> {
            type Output = Mat4<B>;
            fn $method(self, rhs: Mat4<B>) -> Mat4<B> {
                $Op::$method(*self, rhs)
            }
        }

        impl<B: MatrixOps> $Op<&Mat4<B>> for Mat4<B> {
            type Output = Mat4<B>;
            fn $method(self, rhs: &Mat4<B>) -> Mat4<B> {
                $Op::$method(self, *rhs)
            }
        }

        impl<B: MatrixOps> $Op<&Mat4<B>> for &Mat4<B> {
            type Output = Mat4<B>;
            fn $method(self, rhs: &Mat4<B>) -> Mat4<B> {
                $Op::$method(*self, *rhs)
            }
        }
    };
}

forward_ref_binop!(Add, add);
forward_ref_binop!(Sub, sub);
forward_ref_binop!(Mul, mul);

// ── Row vector times matrix ──────────────────────────────────────────

/// `v * m` is [`Mat4::transform`].
impl<B: MatrixOps> Mul<Mat4<B>> for Vec4<B> {
    type Output = Vec4<B>;

    #[inline]
    fn mul(self, m: Mat4<B>) -> Vec4<B> {
        m.transform(self)
    }
}

impl<B: MatrixOps> Mul<&Mat4<B>> for Vec4<B> {
    type Output = Vec4<B>;

    #[inline]
    fn mul(self, m: &Mat4<B>) -> Vec4<B> {
        m.transform(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::Matrix;
    use crate::vector::Vector;

    #[test]
    fn reference_variants() {
        let a = Matrix::new([
            [1.0, 2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [3.0, 0.0, 0.0, 1.0],
        ]);
        let b = Matrix::identity();
        assert_eq!(&a * &b, a * b);
        assert_eq!(&a + b, a + b);
        assert_eq!(a - &b, a - b);

        let mut c = a;
        c *= b;
        c += a;
        c -= a;
        assert_eq!(c, a);
    }

    #[test]
    fn row_vector_product() {
        let m = Matrix::translation(Vector::new(0.0, 5.0, 0.0, 0.0));
        let p = Vector::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!((p * m).to_array(), [1.0, 6.0, 1.0, 1.0]);
        assert_eq!(p * &m, m.transform(p));
    }
}
