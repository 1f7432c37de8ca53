//! [`approx`] trait implementations (feature `approx`).
//!
//! Tolerances apply per lane and every lane must pass. The defaults match
//! the inherent comparisons: `default_epsilon` is
//! [`ALMOST_EPSILON`](crate::compare::ALMOST_EPSILON) and `default_max_ulps`
//! is [`ULP_TOLERANCE`](crate::compare::ULP_TOLERANCE).

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::compare::{ALMOST_EPSILON, ULP_TOLERANCE};
use crate::matrix::Mat4;
use crate::quaternion::Quat;
use crate::traits::{MatrixOps, QuaternionOps, VectorOps};
use crate::vector::Vec4;

fn all_lanes<const N: usize>(a: [f32; N], b: [f32; N], f: impl Fn(&f32, &f32) -> bool) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| f(x, y))
}

macro_rules! impl_approx {
    ($ty:ident, $bound:ident) => {
        impl<B: $bound> AbsDiffEq for $ty<B> {
            type Epsilon = f32;

            fn default_epsilon() -> f32 {
                ALMOST_EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
                all_lanes(self.to_array(), other.to_array(), |a, b| {
                    a.abs_diff_eq(b, epsilon)
                })
            }
        }

        impl<B: $bound> RelativeEq for $ty<B> {
            fn default_max_relative() -> f32 {
                ALMOST_EPSILON
            }

            fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
                all_lanes(self.to_array(), other.to_array(), |a, b| {
                    a.relative_eq(b, epsilon, max_relative)
                })
            }
        }

        impl<B: $bound> UlpsEq for $ty<B> {
            fn default_max_ulps() -> u32 {
                ULP_TOLERANCE
            }

            fn ulps_eq(&self, other: &Self, epsilon: f32, max_ulps: u32) -> bool {
                all_lanes(self.to_array(), other.to_array(), |a, b| {
                    a.ulps_eq(b, epsilon, max_ulps)
                })
            }
        }
    };
}

impl_approx!(Vec4, VectorOps);
impl_approx!(Quat, QuaternionOps);
impl_approx!(Mat4, MatrixOps);
