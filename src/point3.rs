use crate::{Scalar, Tuple3, Vec3};
use core::ops::{Add, Sub};

/// A point in 3D space. Points have position, vectors have direction.
///
/// Rotations act on points and vectors identically; the distinction only
/// matters to the rigid transforms built on top of this kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

impl<S: Scalar> Point3<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S) -> Self { Self { x, y, z } }

    #[inline]
    pub fn origin() -> Self { Self::new(S::ZERO, S::ZERO, S::ZERO) }

    #[inline]
    pub fn to_vec(self) -> Vec3<S> { Vec3::new(self.x, self.y, self.z) }

    #[inline]
    pub fn from_vec(v: Vec3<S>) -> Self { Self::new(v.x, v.y, v.z) }

    #[inline]
    pub fn distance(self, other: Self) -> S { (other - self).norm() }
}

impl<S: Scalar> Tuple3<S> for Point3<S> {
    #[inline] fn x(&self) -> S { self.x }
    #[inline] fn y(&self) -> S { self.y }
    #[inline] fn z(&self) -> S { self.z }
    #[inline] fn set(&mut self, x: S, y: S, z: S) {
        self.x = x; self.y = y; self.z = z;
    }
}

impl<S: Scalar> Default for Point3<S> {
    fn default() -> Self { Self::origin() }
}

impl<S: Scalar> From<Vec3<S>> for Point3<S> {
    #[inline]
    fn from(v: Vec3<S>) -> Self { Self::from_vec(v) }
}

// Point - Point = Vec
impl<S: Scalar> Sub for Point3<S> {
    type Output = Vec3<S>;
    #[inline] fn sub(self, rhs: Self) -> Vec3<S> {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Point + Vec = Point
impl<S: Scalar> Add<Vec3<S>> for Point3<S> {
    type Output = Self;
    #[inline] fn add(self, rhs: Vec3<S>) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<S: Scalar> core::fmt::Display for Point3<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
