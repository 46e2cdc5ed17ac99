use crate::{Scalar, Tuple3};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Free 3D vector. Also the carrier of rotation vectors (axis scaled by angle).
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

impl<S: Scalar> Vec3<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S) -> Self { Self { x, y, z } }

    #[inline]
    pub fn zero() -> Self { Self::new(S::ZERO, S::ZERO, S::ZERO) }

    #[inline]
    pub fn splat(v: S) -> Self { Self::new(v, v, v) }

    #[inline]
    pub fn unit_x() -> Self { Self::new(S::ONE, S::ZERO, S::ZERO) }

    #[inline]
    pub fn unit_y() -> Self { Self::new(S::ZERO, S::ONE, S::ZERO) }

    #[inline]
    pub fn unit_z() -> Self { Self::new(S::ZERO, S::ZERO, S::ONE) }

    #[inline]
    pub fn nan() -> Self { Self::splat(S::NAN) }

    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    #[inline]
    pub fn norm_sq(self) -> S { self.dot(self) }

    #[inline]
    pub fn norm(self) -> S { self.norm_sq().sqrt() }

    #[inline]
    pub fn normalize(self) -> Self {
        let n = self.norm();
        self / n
    }

    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let n = self.norm();
        if n > S::EPSILON { Some(self / n) } else { None }
    }

    /// Returns the element-wise product (Hadamard product)
    #[inline]
    pub fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn max_element(self) -> S {
        self.x.max(self.y.max(self.z))
    }

    #[inline]
    pub fn contains_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Extend to Vec4 with a given w component
    #[inline]
    pub fn extend(self, w: S) -> crate::Vec4<S> {
        crate::Vec4::new(self.x, self.y, self.z, w)
    }

    #[inline]
    pub fn as_array(&self) -> [S; 3] {
        [self.x, self.y, self.z]
    }
}

impl<S: Scalar> Tuple3<S> for Vec3<S> {
    #[inline] fn x(&self) -> S { self.x }
    #[inline] fn y(&self) -> S { self.y }
    #[inline] fn z(&self) -> S { self.z }
    #[inline] fn set(&mut self, x: S, y: S, z: S) {
        self.x = x; self.y = y; self.z = z;
    }
}

impl<S: Scalar> Default for Vec3<S> {
    fn default() -> Self { Self::zero() }
}

impl<S: Scalar> From<[S; 3]> for Vec3<S> {
    fn from(a: [S; 3]) -> Self { Self::new(a[0], a[1], a[2]) }
}

impl<S: Scalar> From<Vec3<S>> for [S; 3] {
    fn from(v: Vec3<S>) -> Self { [v.x, v.y, v.z] }
}

impl<S: Scalar> Add for Vec3<S> {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<S: Scalar> Sub for Vec3<S> {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<S: Scalar> Neg for Vec3<S> {
    type Output = Self;
    #[inline] fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z) }
}

impl<S: Scalar> Mul<S> for Vec3<S> {
    type Output = Self;
    #[inline] fn mul(self, rhs: S) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<S: Scalar> Div<S> for Vec3<S> {
    type Output = Self;
    #[inline] fn div(self, rhs: S) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl<S: Scalar> AddAssign for Vec3<S> {
    #[inline] fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x; self.y += rhs.y; self.z += rhs.z;
    }
}

impl<S: Scalar> SubAssign for Vec3<S> {
    #[inline] fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x; self.y -= rhs.y; self.z -= rhs.z;
    }
}

impl<S: Scalar> MulAssign<S> for Vec3<S> {
    #[inline] fn mul_assign(&mut self, rhs: S) {
        self.x *= rhs; self.y *= rhs; self.z *= rhs;
    }
}

impl<S: Scalar> core::fmt::Display for Vec3<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product() {
        let x = Vec3::<f64>::unit_x();
        let y = Vec3::<f64>::unit_y();
        let z = x.cross(y);
        assert_eq!(z, Vec3::unit_z());
        // Anti-commutative
        assert_eq!(y.cross(x), -z);
    }

    #[test]
    fn try_normalize_rejects_zero() {
        assert!(Vec3::<f64>::zero().try_normalize().is_none());
        let n = Vec3::new(1.0, 2.0, 2.0).try_normalize().unwrap();
        assert!((n.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_is_detected() {
        assert!(Vec3::<f64>::nan().contains_nan());
        assert!(!Vec3::new(1.0, 2.0, 3.0).contains_nan());
    }
}
