//! Capability traits shared by the point and vector containers.
//!
//! Transform entry points take `impl Tuple3<S>` so the same kernel call
//! rotates a [`Point3`](crate::Point3) or a [`Vec3`](crate::Vec3).

use crate::error::{Error, Result};
use crate::{Scalar, Vec2, Vec3};

/// Two-component coordinate holder.
pub trait Tuple2<S: Scalar> {
    fn x(&self) -> S;
    fn y(&self) -> S;
    fn set(&mut self, x: S, y: S);

    /// Component by index, failing outside `0..2`.
    fn component(&self, index: usize) -> Result<S> {
        match index {
            0 => Ok(self.x()),
            1 => Ok(self.y()),
            _ => Err(Error::ComponentOutOfBounds { index, len: 2 }),
        }
    }

    fn set_component(&mut self, index: usize, value: S) -> Result<()> {
        match index {
            0 => self.set(value, self.y()),
            1 => self.set(self.x(), value),
            _ => return Err(Error::ComponentOutOfBounds { index, len: 2 }),
        }
        Ok(())
    }

    #[inline]
    fn to_vec2(&self) -> Vec2<S> {
        Vec2::new(self.x(), self.y())
    }
}

/// Three-component coordinate holder.
pub trait Tuple3<S: Scalar> {
    fn x(&self) -> S;
    fn y(&self) -> S;
    fn z(&self) -> S;
    fn set(&mut self, x: S, y: S, z: S);

    /// Component by index, failing outside `0..3`.
    fn component(&self, index: usize) -> Result<S> {
        match index {
            0 => Ok(self.x()),
            1 => Ok(self.y()),
            2 => Ok(self.z()),
            _ => Err(Error::ComponentOutOfBounds { index, len: 3 }),
        }
    }

    fn set_component(&mut self, index: usize, value: S) -> Result<()> {
        match index {
            0 => self.set(value, self.y(), self.z()),
            1 => self.set(self.x(), value, self.z()),
            2 => self.set(self.x(), self.y(), value),
            _ => return Err(Error::ComponentOutOfBounds { index, len: 3 }),
        }
        Ok(())
    }

    #[inline]
    fn to_vec3(&self) -> Vec3<S> {
        Vec3::new(self.x(), self.y(), self.z())
    }

    #[inline]
    fn set_vec3(&mut self, v: Vec3<S>) {
        self.set(v.x, v.y, v.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, Point3};

    #[test]
    fn checked_components() {
        let mut p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(p.component(2), Ok(3.0));
        assert_eq!(p.component(3), Err(Error::ComponentOutOfBounds { index: 3, len: 3 }));
        p.set_component(1, -2.0).unwrap();
        assert_eq!(p, Point3::new(1.0, -2.0, 3.0));
        assert!(p.set_component(5, 0.0).is_err());
    }

    #[test]
    fn checked_components_2d() {
        let mut p = Point2::new(1.0, 2.0);
        p.set_component(0, 4.0).unwrap();
        assert_eq!(p.component(0), Ok(4.0));
        assert!(p.component(2).is_err());
    }
}
