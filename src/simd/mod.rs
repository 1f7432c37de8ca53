//! Backends with compile-time architecture dispatch.
//!
//! Each backend is a zero-sized type implementing
//! [`VectorOps`](crate::traits::VectorOps),
//! [`QuaternionOps`](crate::traits::QuaternionOps) and
//! [`MatrixOps`](crate::traits::MatrixOps). The public types are generic
//! over the backend; the `Vector`, `Quaternion` and `Matrix` aliases use
//! [`Active`], the one picked for the compilation target.
//!
//! ## Dispatch strategy
//!
//! Selection is a `cfg` chain on `target_arch` / `target_feature`; there is
//! no runtime switching. On x86_64 the widest available instruction set wins:
//! SSE4.1 > SSE3 > SSE2. Enable via `-C target-cpu=native` or
//! `-C target-feature=+sse4.1` etc. The `force-scalar` Cargo feature pins
//! the portable backend everywhere.
//!
//! ## Architecture support
//!
//! | Arch      | ISA       | Backend        | Overrides                                  |
//! |-----------|-----------|----------------|--------------------------------------------|
//! | `x86_64`  | SSE4.1    | [`Sse4`]       | SSE3 + `dp_ps` dot, `blend` lane fixing   |
//! | `x86_64`  | SSE3      | [`Sse3`]       | SSE2 + `hadd` dot, `addsub` quat multiply |
//! | `x86_64`  | SSE2      | [`Sse2`]       | arithmetic, geometry, quaternion, matrix  |
//! | `aarch64` | NEON      | [`Neon`]       | arithmetic, geometry, quaternion, matrix  |
//! | other     | scalar    | [`Scalar`]     | none                                       |
//!
//! Every backend that compiles on the current target is available by name,
//! so code (and the test suite) can compare e.g. `Vec4<Sse2>` against
//! `Vec4<Scalar>` regardless of which one is active.

use core::fmt;

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod f32_sse2;
#[cfg(all(target_arch = "x86_64", target_feature = "sse3"))]
pub mod f32_sse3;
#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
pub mod f32_sse4;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub mod f32_neon;

pub use scalar::Scalar;

#[cfg(target_arch = "x86_64")]
pub use f32_sse2::Sse2;
#[cfg(all(target_arch = "x86_64", target_feature = "sse3"))]
pub use f32_sse3::Sse3;
#[cfg(all(target_arch = "x86_64", target_feature = "sse4.1"))]
pub use f32_sse4::Sse4;

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
pub use f32_neon::Neon;

/// Instruction set a backend targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Scalar,
    Sse2,
    Sse3,
    Sse4,
    Neon,
}

impl BackendKind {
    /// Human-readable name, as used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Scalar => "scalar",
            BackendKind::Sse2 => "SSE2",
            BackendKind::Sse3 => "SSE3",
            BackendKind::Sse4 => "SSE4.1",
            BackendKind::Neon => "NEON",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The backend selected for this compilation.
#[cfg(any(
    feature = "force-scalar",
    not(any(
        target_arch = "x86_64",
        all(target_arch = "aarch64", target_feature = "neon")
    ))
))]
pub type Active = Scalar;

#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "x86_64",
    target_feature = "sse4.1"
))]
pub type Active = Sse4;

#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "x86_64",
    target_feature = "sse3",
    not(target_feature = "sse4.1")
))]
pub type Active = Sse3;

#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "x86_64",
    not(target_feature = "sse3"),
    not(target_feature = "sse4.1")
))]
pub type Active = Sse2;

#[cfg(all(
    not(feature = "force-scalar"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
pub type Active = Neon;

/// Kind of [`Active`].
pub const ACTIVE: BackendKind = <Active as crate::traits::VectorOps>::KIND;

/// Kind of the backend selected for this compilation.
#[inline]
pub const fn active_backend() -> BackendKind {
    ACTIVE
}

/// Forward trait methods to free kernel functions of another backend module.
///
/// Used by the SSE3 and SSE4.1 backends, which share the SSE2 register type
/// and only replace a handful of kernels.
#[cfg(all(
    target_arch = "x86_64",
    any(target_feature = "sse3", target_feature = "sse4.1")
))]
macro_rules! delegate {
    ($module:ident => $(fn $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
        $(
            #[inline(always)]
            fn $name($($arg: $ty),*) -> $ret {
                $module::$name($($arg),*)
            }
        )*
    };
}

#[cfg(all(
    target_arch = "x86_64",
    any(target_feature = "sse3", target_feature = "sse4.1")
))]
pub(crate) use delegate;
