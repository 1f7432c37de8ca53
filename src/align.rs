//! 16-byte aligned storage.
//!
//! SSE aligned loads fault on misaligned addresses. [`Align16`] carries the
//! alignment in the type, so the safe `from_aligned` constructors need no
//! runtime check.

use core::ops::{Deref, DerefMut};

/// A value stored at a 16-byte aligned address.
///
/// ```
/// use lanemath::{Align16, Vector};
///
/// let data = Align16([1.0_f32, 2.0, 3.0, 4.0]);
/// let v: Vector = Vector::from_aligned(&data);
/// assert_eq!(v.to_array(), *data);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C, align(16))]
pub struct Align16<T>(pub T);

impl<T> Align16<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Align16<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Align16<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Align16<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self(value)
    }
}
