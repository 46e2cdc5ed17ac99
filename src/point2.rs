use crate::{Scalar, Tuple2, Vec2};
use core::ops::Sub;

/// A point in the plane (distinct from Vec2: points have position, vectors have direction).
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2<S> {
    pub x: S,
    pub y: S,
}

impl<S: Scalar> Point2<S> {
    #[inline]
    pub fn new(x: S, y: S) -> Self { Self { x, y } }

    #[inline]
    pub fn origin() -> Self { Self::new(S::ZERO, S::ZERO) }

    #[inline]
    pub fn to_vec(self) -> Vec2<S> { Vec2::new(self.x, self.y) }
}

impl<S: Scalar> Tuple2<S> for Point2<S> {
    #[inline] fn x(&self) -> S { self.x }
    #[inline] fn y(&self) -> S { self.y }
    #[inline] fn set(&mut self, x: S, y: S) {
        self.x = x; self.y = y;
    }
}

impl<S: Scalar> Default for Point2<S> {
    fn default() -> Self { Self::origin() }
}

// Point - Point = Vec
impl<S: Scalar> Sub for Point2<S> {
    type Output = Vec2<S>;
    #[inline] fn sub(self, rhs: Self) -> Vec2<S> { Vec2::new(self.x - rhs.x, self.y - rhs.y) }
}

impl<S: Scalar> core::fmt::Display for Point2<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
