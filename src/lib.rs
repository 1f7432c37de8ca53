//! # lanemath
//!
//! Portable 4-lane `f32` vector, quaternion and 4x4 matrix math with the
//! SIMD backend chosen at compile time. no-std compatible, no allocation.
//!
//! ## Quick start
//!
//! ```
//! use lanemath::{Matrix, Quaternion, Vector};
//! use core::f32::consts::FRAC_PI_2;
//!
//! let q = Quaternion::from_axis_angle(Vector::z_axis(), FRAC_PI_2);
//! let v = q.rotate(Vector::new(1.0, 0.0, 0.0, 0.0));
//! assert!(v.almost_equal(Vector::new(0.0, 1.0, 0.0, 1.0)));
//!
//! let m = Matrix::from_quaternion(q) * Matrix::translation(Vector::new(0.0, 0.0, 5.0, 0.0));
//! let p = m.transform(Vector::origin().add(Vector::x_axis()));
//! assert!(p.almost_equal(Vector::new(0.0, 1.0, 5.0, 1.0)));
//! ```
//!
//! ## Modules
//!
//! - [`vector`]: [`Vec4`], four lanes `(x, y, z, w)`. Arithmetic, dot and
//!   cross products, lengths, normalization, interpolation, reflection and
//!   compile-time lane shuffles. Reductions broadcast into all lanes.
//!
//! - [`quaternion`]: [`Quat`], rotations with conjugate, inverse, Hamilton
//!   product, slerp and vector rotation.
//!
//! - [`matrix`]: [`Mat4`], row-major 4x4 with product, transpose,
//!   homogeneous transform and 3x3 rotation of row vectors.
//!
//! - [`traits`]: the backend protocol. [`VectorOps`], [`QuaternionOps`]
//!   and [`MatrixOps`] hold a portable definition of every operation as a
//!   provided method; each backend overrides only what it accelerates.
//!
//! - [`simd`]: the backends ([`simd::Scalar`], `Sse2`, `Sse3`, `Sse4`,
//!   `Neon`) and [`simd::Active`], the one selected for the target.
//!
//! - [`mask`]: named shuffle masks and the `const fn` mask builder.
//!
//! - [`compare`]: ULP and relative float comparison used by `equal` and
//!   `almost_equal`.
//!
//! [`Vector`], [`Quaternion`] and [`Matrix`] are the types on the active
//! backend; the generic forms let code name a specific backend, e.g.
//! `Vec4<simd::Scalar>`, to compare results across backends.
//!
//! ## Backend selection
//!
//! Fixed at build time from the enabled target features: SSE4.1 > SSE3 >
//! SSE2 on x86_64, NEON on aarch64, the portable scalar backend elsewhere.
//! Build with `-C target-cpu=native` to pick up the widest one. All backends
//! agree within [`compare::ALMOST_EPSILON`] relative error; the `*_fast`
//! variants within [`compare::FAST_TOLERANCE`].
//!
//! ## Cargo features
//!
//! | Feature        | Default  | Description |
//! |----------------|----------|-------------|
//! | `std`          | yes      | Hardware FPU via system libm, CPU check in [`initialize`], `std::error::Error` |
//! | `libm`         | no       | Pure-Rust software float math for `no_std` builds |
//! | `force-scalar` | no       | Use the portable backend regardless of target features |
//! | `log`          | no       | Report the selected backend through the `log` facade |
//! | `approx`       | no       | `approx` crate comparison traits for all types |

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("enable either the `std` or the `libm` feature for float math");

pub mod align;
#[cfg(feature = "approx")]
mod approx_eq;
pub mod compare;
mod init;
pub mod mask;
pub mod matrix;
pub mod quaternion;
pub mod simd;
pub mod traits;
pub mod vector;

pub use align::Align16;
pub use init::{Config, InitError, finalize, initialize, required_feature};
pub use matrix::{Mat4, Matrix};
pub use quaternion::{Quat, Quaternion};
pub use simd::{ACTIVE, BackendKind, active_backend};
pub use traits::{Backend, MatrixOps, QuaternionOps, VectorOps};
pub use vector::{Axis, Vec4, Vector};
