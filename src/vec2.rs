use crate::{Scalar, Tuple2};
use core::ops::{Add, Mul, Neg, Sub};

/// Free 2D vector, the operand of the planar transform variants.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<S> {
    pub x: S,
    pub y: S,
}

impl<S: Scalar> Vec2<S> {
    #[inline]
    pub fn new(x: S, y: S) -> Self { Self { x, y } }

    #[inline]
    pub fn zero() -> Self { Self::new(S::ZERO, S::ZERO) }

    #[inline]
    pub fn dot(self, rhs: Self) -> S { self.x * rhs.x + self.y * rhs.y }

    #[inline]
    pub fn norm(self) -> S { self.dot(self).sqrt() }
}

impl<S: Scalar> Tuple2<S> for Vec2<S> {
    #[inline] fn x(&self) -> S { self.x }
    #[inline] fn y(&self) -> S { self.y }
    #[inline] fn set(&mut self, x: S, y: S) {
        self.x = x; self.y = y;
    }
}

impl<S: Scalar> Default for Vec2<S> {
    fn default() -> Self { Self::zero() }
}

impl<S: Scalar> Add for Vec2<S> {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y) }
}

impl<S: Scalar> Sub for Vec2<S> {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y) }
}

impl<S: Scalar> Neg for Vec2<S> {
    type Output = Self;
    #[inline] fn neg(self) -> Self { Self::new(-self.x, -self.y) }
}

impl<S: Scalar> Mul<S> for Vec2<S> {
    type Output = Self;
    #[inline] fn mul(self, rhs: S) -> Self { Self::new(self.x * rhs, self.y * rhs) }
}

impl<S: Scalar> core::fmt::Display for Vec2<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
