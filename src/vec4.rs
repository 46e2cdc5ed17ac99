use crate::error::{Error, Result};
use crate::Scalar;
use core::ops::{Add, Mul, Sub};

/// 4-component vector. Rotations act on `xyz` and pass `w` through.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4<S> {
    pub x: S,
    pub y: S,
    pub z: S,
    pub w: S,
}

impl<S: Scalar> Vec4<S> {
    #[inline]
    pub fn new(x: S, y: S, z: S, w: S) -> Self { Self { x, y, z, w } }

    #[inline]
    pub fn zero() -> Self { Self::new(S::ZERO, S::ZERO, S::ZERO, S::ZERO) }

    #[inline]
    pub fn dot(self, rhs: Self) -> S {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    pub fn norm(self) -> S { self.dot(self).sqrt() }

    /// Truncate to Vec3 (drop w)
    #[inline]
    pub fn truncate(self) -> crate::Vec3<S> {
        crate::Vec3::new(self.x, self.y, self.z)
    }

    /// Component by index, failing outside `0..4`.
    pub fn component(&self, index: usize) -> Result<S> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(Error::ComponentOutOfBounds { index, len: 4 }),
        }
    }

    pub fn set_component(&mut self, index: usize, value: S) -> Result<()> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(Error::ComponentOutOfBounds { index, len: 4 }),
        }
        Ok(())
    }

    #[inline]
    pub fn as_array(&self) -> [S; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl<S: Scalar> Default for Vec4<S> {
    fn default() -> Self { Self::zero() }
}

impl<S: Scalar> Add for Vec4<S> {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl<S: Scalar> Sub for Vec4<S> {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl<S: Scalar> Mul<S> for Vec4<S> {
    type Output = Self;
    #[inline] fn mul(self, rhs: S) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl<S: Scalar> core::fmt::Display for Vec4<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_bounds() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.component(3), Ok(4.0));
        assert_eq!(v.component(4), Err(Error::ComponentOutOfBounds { index: 4, len: 4 }));
        v.set_component(0, 9.0).unwrap();
        assert_eq!(v.x, 9.0);
        assert!(v.set_component(7, 0.0).is_err());
    }
}
