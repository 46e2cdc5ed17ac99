use crate::{conversion, Mat3, Orientation, Quaternion, Real, Vec3};

/// Rotation of `angle` radians about `axis`.
///
/// Conversions in this crate produce a unit axis; values built by hand may
/// carry any non-zero axis, which is normalized on use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisAngle<S> {
    pub axis: Vec3<S>,
    pub angle: S,
}

impl<S: Real> AxisAngle<S> {
    #[inline]
    pub fn new(axis: Vec3<S>, angle: S) -> Self {
        Self { axis, angle }
    }

    /// Zero angle about the X axis.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Vec3::unit_x(), S::ZERO)
    }

    #[inline]
    pub fn nan() -> Self {
        Self::new(Vec3::nan(), S::NAN)
    }

    /// Direction of `v` as axis, its length as angle.
    pub fn from_rotation_vector(v: Vec3<S>) -> Self {
        match v.try_normalize() {
            Some(axis) => Self::new(axis, v.norm()),
            None => Self::identity(),
        }
    }

    pub fn to_rotation_vector(&self) -> Vec3<S> {
        match self.axis.try_normalize() {
            Some(axis) => axis * self.angle,
            None => Vec3::zero(),
        }
    }

    pub fn contains_nan(&self) -> bool {
        self.axis.contains_nan() || self.angle.is_nan()
    }
}

impl<S: Real> Default for AxisAngle<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Real> Orientation<S> for AxisAngle<S> {
    fn to_rotation_mat3(&self) -> Mat3<S> {
        conversion::matrix_from_axis_angle(self.axis, self.angle)
    }

    fn to_quaternion(&self) -> Quaternion<S> {
        conversion::quaternion_from_axis_angle(self.axis, self.angle)
    }
}

impl<S: Real> core::fmt::Display for AxisAngle<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "axis {} angle {}", self.axis, self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_vector_roundtrip() {
        let v = Vec3::<f64>::new(0.0, 3.0, 4.0);
        let aa = AxisAngle::from_rotation_vector(v);
        assert!((aa.angle - 5.0).abs() < 1e-12);
        assert!((aa.axis.norm() - 1.0).abs() < 1e-12);
        assert!((aa.to_rotation_vector() - v).norm() < 1e-12);
    }

    #[test]
    fn zero_vector_is_identity() {
        assert_eq!(AxisAngle::<f64>::from_rotation_vector(Vec3::zero()), AxisAngle::identity());
    }
}
