//! Named lane permutation patterns for [`Vector::shuffle`](crate::Vector::shuffle).
//!
//! A mask selects, for each output lane, which input lane it copies. The
//! encoding is the SSE `_MM_SHUFFLE` layout: two bits per output lane, output
//! lane `x` in bits 0..2 up to output lane `w` in bits 6..8. Every backend
//! decodes the same value, so a mask means the same thing everywhere.
//!
//! Masks are const generic arguments, so they must be known at compile time:
//!
//! ```
//! use lanemath::{mask, Vector};
//!
//! let v = Vector::new(1.0, 2.0, 3.0, 4.0);
//! assert_eq!(v.shuffle::<{ mask::YZXW }>().to_array(), [2.0, 3.0, 1.0, 4.0]);
//! assert_eq!(v.shuffle::<{ mask::lanes(3, 3, 0, 0) }>().to_array(), [4.0, 4.0, 1.0, 1.0]);
//! ```
//!
//! [`lanes`] rejects out-of-range indices during constant evaluation:
//!
//! ```compile_fail
//! use lanemath::{mask, Vector};
//!
//! let v = Vector::one();
//! let _ = v.shuffle::<{ mask::lanes(0, 1, 2, 4) }>();
//! ```
//!
//! A raw mask must fit in 8 bits on every backend, the portable one included:
//!
//! ```compile_fail
//! use lanemath::{simd::Scalar, Vec4};
//!
//! let v: Vec4<Scalar> = Vec4::new(1.0, 2.0, 3.0, 4.0);
//! let _ = v.shuffle::<0x100>();
//! ```
//!
//! ```compile_fail
//! use lanemath::{simd::Scalar, Vec4};
//!
//! let v: Vec4<Scalar> = Vec4::new(1.0, 2.0, 3.0, 4.0);
//! let _ = v.shuffle::<{ -1 }>();
//! ```

/// Build a mask from the source lane of each output lane.
///
/// Panics (a compile error in const context) if any index is not in `0..4`.
pub const fn lanes(x: u32, y: u32, z: u32, w: u32) -> i32 {
    assert!(x < 4 && y < 4 && z < 4 && w < 4, "lane index out of range");
    (x | (y << 2) | (z << 4) | (w << 6)) as i32
}

/// Source lane index for output lane `lane` (0..4) of `mask`.
#[inline(always)]
pub const fn source(mask: i32, lane: usize) -> usize {
    ((mask >> (lane * 2)) & 0b11) as usize
}

macro_rules! named_masks {
    ($($name:ident = ($x:literal, $y:literal, $z:literal, $w:literal)),* $(,)?) => {
        $(
            #[doc = concat!("Output lanes taken from input lanes `(", stringify!($x), ", ", stringify!($y), ", ", stringify!($z), ", ", stringify!($w), ")`.")]
            pub const $name: i32 = lanes($x, $y, $z, $w);
        )*
    };
}

named_masks! {
    XYZW = (0, 1, 2, 3),
    XXXX = (0, 0, 0, 0),
    YYYY = (1, 1, 1, 1),
    ZZZZ = (2, 2, 2, 2),
    WWWW = (3, 3, 3, 3),
    YZXW = (1, 2, 0, 3),
    ZXYW = (2, 0, 1, 3),
    WZYX = (3, 2, 1, 0),
    ZWXY = (2, 3, 0, 1),
    YXWZ = (1, 0, 3, 2),
    XZYW = (0, 2, 1, 3),
    YXZW = (1, 0, 2, 3),
    WYZX = (3, 1, 2, 0),
    YWZX = (1, 3, 2, 0),
    XYWZ = (0, 1, 3, 2),
    XYXY = (0, 1, 0, 1),
    ZWZW = (2, 3, 2, 3),
    XXYY = (0, 0, 1, 1),
    ZZWW = (2, 2, 3, 3),
    XYXW = (0, 1, 0, 3),
    XYXZ = (0, 1, 0, 2),
}
