use crate::conversion;
use crate::error::{Error, Result};
use crate::matrix_tools;
use crate::{
    AxisAngle, Mat3, Matrix3Read, Matrix3Write, Orientation, Quaternion, QuaternionRead, Real, Transform, Tuple3,
    Vec3, YawPitchRoll,
};

/// Proper rotation matrix: orthonormal rows and columns, determinant +1.
///
/// Every public mutator either builds its value from a representation that
/// is a rotation by construction, or validates a staged copy and commits it
/// only when it passes. A rejected assignment leaves the matrix as it was.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationMatrix<S> {
    m: Mat3<S>,
}

impl<S: Real> RotationMatrix<S> {
    #[inline]
    pub fn identity() -> Self {
        Self { m: Mat3::identity() }
    }

    /// All-NaN marker for an unknown orientation.
    #[inline]
    pub fn nan() -> Self {
        Self { m: Mat3::nan() }
    }

    /// Validated: fails with [`Error::NotARotationMatrix`] unless `m` is a
    /// rotation within [`Real::ROTATION_EPS`].
    pub fn from_matrix<M: Matrix3Read<S>>(m: &M) -> Result<Self> {
        let mut r = Self::identity();
        r.set_from(m)?;
        Ok(r)
    }

    pub fn from_quaternion<Q: QuaternionRead<S>>(q: &Q) -> Self {
        Self { m: conversion::matrix_from_quaternion(q) }
    }

    pub fn from_axis_angle(aa: &AxisAngle<S>) -> Self {
        Self { m: conversion::matrix_from_axis_angle(aa.axis, aa.angle) }
    }

    pub fn from_rotation_vector(v: Vec3<S>) -> Self {
        Self { m: conversion::matrix_from_rotation_vector(v) }
    }

    pub fn from_yaw_pitch_roll(yaw: S, pitch: S, roll: S) -> Self {
        Self { m: conversion::matrix_from_yaw_pitch_roll(yaw, pitch, roll) }
    }

    #[inline]
    pub fn from_yaw(angle: S) -> Self {
        Self { m: Mat3::rotation_z(angle) }
    }

    #[inline]
    pub fn from_pitch(angle: S) -> Self {
        Self { m: Mat3::rotation_y(angle) }
    }

    #[inline]
    pub fn from_roll(angle: S) -> Self {
        Self { m: Mat3::rotation_x(angle) }
    }

    pub fn from_orientation<O: Orientation<S>>(o: &O) -> Self {
        Self { m: o.to_rotation_mat3() }
    }

    /// Stores `m` without validation. Only for compositions that preserve
    /// the invariant, such as the product of two rotations.
    #[inline]
    pub(crate) fn set_unchecked(&mut self, m: Mat3<S>) {
        self.m = m;
    }

    pub fn set_from_quaternion<Q: QuaternionRead<S>>(&mut self, q: &Q) {
        *self = Self::from_quaternion(q);
    }

    pub fn set_from_axis_angle(&mut self, aa: &AxisAngle<S>) {
        *self = Self::from_axis_angle(aa);
    }

    pub fn set_from_rotation_vector(&mut self, v: Vec3<S>) {
        *self = Self::from_rotation_vector(v);
    }

    pub fn set_from_yaw_pitch_roll(&mut self, yaw: S, pitch: S, roll: S) {
        *self = Self::from_yaw_pitch_roll(yaw, pitch, roll);
    }

    pub fn set_to_yaw(&mut self, angle: S) {
        *self = Self::from_yaw(angle);
    }

    pub fn set_to_pitch(&mut self, angle: S) {
        *self = Self::from_pitch(angle);
    }

    pub fn set_to_roll(&mut self, angle: S) {
        *self = Self::from_roll(angle);
    }

    pub fn set_from_orientation<O: Orientation<S>>(&mut self, o: &O) {
        *self = Self::from_orientation(o);
    }

    /// Orthonormalizes `m` and stores the result. Fails when Gram-Schmidt
    /// collapses, leaving `self` untouched.
    pub fn set_and_normalize<M: Matrix3Read<S>>(&mut self, m: &M) -> Result<()> {
        self.m = matrix_tools::orthonormalize(m)?;
        Ok(())
    }

    /// Re-orthonormalizes to remove accumulated floating-point drift.
    pub fn normalize(&mut self) -> Result<()> {
        self.m = matrix_tools::orthonormalize(&self.m)?;
        Ok(())
    }

    pub fn transpose(&mut self) {
        self.m.transpose_in_place();
    }

    /// Same as [`transpose`](Self::transpose).
    pub fn invert(&mut self) {
        self.transpose();
    }

    #[inline]
    pub fn as_mat3(&self) -> &Mat3<S> {
        &self.m
    }

    fn compose(&mut self, other: &Mat3<S>, other_first: bool, transpose_this: bool, transpose_other: bool) {
        let m = if other_first {
            matrix_tools::multiply_raw(other, transpose_other, &self.m, transpose_this)
        } else {
            matrix_tools::multiply_raw(&self.m, transpose_this, other, transpose_other)
        };
        self.set_unchecked(m);
    }

    /// `self ← self·m` for a general matrix; the product is validated.
    pub fn multiply_matrix<M: Matrix3Read<S>>(&mut self, m: &M) -> Result<()> {
        let product = matrix_tools::multiply_raw(&self.m, false, m, false);
        self.set_from(&product)
    }

    /// `self ← m·self` for a general matrix; the product is validated.
    pub fn pre_multiply_matrix<M: Matrix3Read<S>>(&mut self, m: &M) -> Result<()> {
        let product = matrix_tools::multiply_raw(m, false, &self.m, false);
        self.set_from(&product)
    }

    /// Rotates about the local Z axis: `self ← self·Rz(angle)`.
    pub fn append_yaw(&mut self, angle: S) {
        self.compose(&Mat3::rotation_z(angle), false, false, false);
    }

    pub fn append_pitch(&mut self, angle: S) {
        self.compose(&Mat3::rotation_y(angle), false, false, false);
    }

    pub fn append_roll(&mut self, angle: S) {
        self.compose(&Mat3::rotation_x(angle), false, false, false);
    }

    /// Rotates about the world Z axis: `self ← Rz(angle)·self`.
    pub fn prepend_yaw(&mut self, angle: S) {
        self.compose(&Mat3::rotation_z(angle), true, false, false);
    }

    pub fn prepend_pitch(&mut self, angle: S) {
        self.compose(&Mat3::rotation_y(angle), true, false, false);
    }

    pub fn prepend_roll(&mut self, angle: S) {
        self.compose(&Mat3::rotation_x(angle), true, false, false);
    }

    /// Element-wise blend of `r0` and `rf` followed by Gram-Schmidt.
    ///
    /// Cheaper than a quaternion interpolation and not constant speed along
    /// the geodesic. Fails when the blend collapses (`r0` and `rf` half a
    /// turn apart at `alpha = 0.5`).
    pub fn interpolate(&mut self, r0: &RotationMatrix<S>, rf: &RotationMatrix<S>, alpha: S) -> Result<()> {
        let blend = matrix_tools::lerp(r0, rf, alpha);
        self.m = matrix_tools::orthonormalize(&blend)?;
        Ok(())
    }

    /// Angle of the relative rotation `selfᵗ·other`, in `[0, π]`.
    pub fn distance<O: Orientation<S>>(&self, other: &O) -> S {
        let relative = matrix_tools::multiply_raw(&self.m, true, &other.to_rotation_mat3(), false);
        let q = conversion::quaternion_from_matrix(&relative);
        S::TWO * q.vector_part().norm().atan2(q.s().abs())
    }

    pub fn yaw_pitch_roll(&self) -> YawPitchRoll<S> {
        conversion::yaw_pitch_roll_from_matrix(&self.m)
    }

    pub fn yaw(&self) -> S {
        self.yaw_pitch_roll().yaw
    }

    pub fn pitch(&self) -> S {
        self.yaw_pitch_roll().pitch
    }

    pub fn roll(&self) -> S {
        self.yaw_pitch_roll().roll
    }

    pub fn rotation_vector(&self) -> Vec3<S> {
        conversion::rotation_vector_from_matrix(&self.m)
    }

    pub fn axis_angle(&self) -> AxisAngle<S> {
        conversion::axis_angle_from_matrix(&self.m)
    }

    /// Composes with an external transform, `self ← T·self`, then
    /// re-orthonormalizes.
    pub fn apply_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        let mut m = self.m;
        t.apply_to_orientation(&mut m)?;
        self.set_and_normalize(&m)
    }

    pub fn apply_inverse_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        let mut m = self.m;
        t.apply_inverse_to_orientation(&mut m)?;
        self.set_and_normalize(&m)
    }
}

// Columns: other operand first, transpose self, transpose other. A
// rotation's inverse is its transpose, so both spellings share one product.
macro_rules! rotation_products {
    ($(
        $(#[$doc:meta])*
        $name:ident => $other_first:literal, $transpose_this:literal, $transpose_other:literal;
    )*) => {
        impl<S: Real> RotationMatrix<S> {
            $(
                $(#[$doc])*
                pub fn $name<O: Orientation<S>>(&mut self, other: &O) {
                    self.compose(&other.to_rotation_mat3(), $other_first, $transpose_this, $transpose_other);
                }
            )*
        }
    };
}

rotation_products! {
    /// `self ← self·R`. Accepts any orientation: rotation matrix,
    /// quaternion, axis-angle or yaw-pitch-roll.
    multiply => false, false, false;
    /// `self ← selfᵗ·R`
    multiply_transpose_this => false, true, false;
    /// `self ← self·Rᵗ`
    multiply_transpose_other => false, false, true;
    /// `self ← selfᵗ·Rᵗ`
    multiply_transpose_both => false, true, true;
    /// `self ← self⁻¹·R`
    multiply_invert_this => false, true, false;
    /// `self ← self·R⁻¹`
    multiply_invert_other => false, false, true;
    /// `self ← self⁻¹·R⁻¹`
    multiply_invert_both => false, true, true;
    /// `self ← R·self`
    pre_multiply => true, false, false;
    /// `self ← R·selfᵗ`
    pre_multiply_transpose_this => true, true, false;
    /// `self ← Rᵗ·self`
    pre_multiply_transpose_other => true, false, true;
    /// `self ← Rᵗ·selfᵗ`
    pre_multiply_transpose_both => true, true, true;
    /// `self ← R·self⁻¹`
    pre_multiply_invert_this => true, true, false;
    /// `self ← R⁻¹·self`
    pre_multiply_invert_other => true, false, true;
    /// `self ← R⁻¹·self⁻¹`
    pre_multiply_invert_both => true, true, true;
}

impl<S: Real> Matrix3Read<S> for RotationMatrix<S> {
    const IS_ROTATION: bool = true;

    #[inline] fn m00(&self) -> S { self.m.m00 }
    #[inline] fn m01(&self) -> S { self.m.m01 }
    #[inline] fn m02(&self) -> S { self.m.m02 }
    #[inline] fn m10(&self) -> S { self.m.m10 }
    #[inline] fn m11(&self) -> S { self.m.m11 }
    #[inline] fn m12(&self) -> S { self.m.m12 }
    #[inline] fn m20(&self) -> S { self.m.m20 }
    #[inline] fn m21(&self) -> S { self.m.m21 }
    #[inline] fn m22(&self) -> S { self.m.m22 }
}

impl<S: Real> Matrix3Write<S> for RotationMatrix<S> {
    /// Commits only if the values form a rotation within
    /// [`Real::ROTATION_EPS`].
    fn set_components(
        &mut self,
        m00: S, m01: S, m02: S,
        m10: S, m11: S, m12: S,
        m20: S, m21: S, m22: S,
    ) -> Result<()> {
        let staged = Mat3::new(m00, m01, m02, m10, m11, m12, m20, m21, m22);
        if !staged.is_rotation_matrix(S::ROTATION_EPS) {
            tracing::debug!(det = staged.determinant().to_f64(), "rejected non-rotation matrix");
            return Err(Error::NotARotationMatrix);
        }
        self.m = staged;
        Ok(())
    }

    fn set_identity(&mut self) {
        *self = Self::identity();
    }

    fn set_to_nan(&mut self) {
        *self = Self::nan();
    }
}

impl<S: Real> Orientation<S> for RotationMatrix<S> {
    #[inline]
    fn to_rotation_mat3(&self) -> Mat3<S> {
        self.m
    }
}

impl<S: Real> Transform<S> for RotationMatrix<S> {
    fn apply_to_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        self.transform_matrix(m)
    }

    fn apply_inverse_to_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        self.inverse_transform_matrix(m)
    }

    fn apply_to_orientation(&self, m: &mut Mat3<S>) -> Result<()> {
        *m = matrix_tools::multiply_raw(&self.m, false, &*m, false);
        Ok(())
    }

    fn apply_inverse_to_orientation(&self, m: &mut Mat3<S>) -> Result<()> {
        *m = matrix_tools::multiply_raw(&self.m, true, &*m, false);
        Ok(())
    }

    fn apply_to_quaternion(&self, q: &mut Quaternion<S>) {
        q.pre_multiply(self);
    }

    fn apply_inverse_to_quaternion(&self, q: &mut Quaternion<S>) {
        q.pre_multiply_conjugate_other(self);
    }

    fn apply_to_tuple<T: Tuple3<S>>(&self, t: &mut T) -> Result<()> {
        self.transform(t);
        Ok(())
    }

    fn apply_inverse_to_tuple<T: Tuple3<S>>(&self, t: &mut T) -> Result<()> {
        self.inverse_transform(t)
    }
}

impl<S: Real> Default for RotationMatrix<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Real> TryFrom<Mat3<S>> for RotationMatrix<S> {
    type Error = Error;

    fn try_from(m: Mat3<S>) -> Result<Self> {
        Self::from_matrix(&m)
    }
}

impl<S: Real> From<RotationMatrix<S>> for Mat3<S> {
    fn from(r: RotationMatrix<S>) -> Self {
        r.m
    }
}

impl<S: Real> core::fmt::Display for RotationMatrix<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let m = &self.m;
        write!(
            f,
            "[{}, {}, {}; {}, {}, {}; {}, {}, {}]",
            m.m00, m.m01, m.m02, m.m10, m.m11, m.m12, m.m20, m.m21, m.m22
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, Vec2};
    use core::f64::consts::{FRAC_PI_2, PI};

    fn r1() -> RotationMatrix<f64> {
        RotationMatrix::from_yaw_pitch_roll(0.4, -0.9, 2.0)
    }

    fn r2() -> RotationMatrix<f64> {
        RotationMatrix::from_axis_angle(&AxisAngle::new(Vec3::new(0.2, 1.0, -0.4), 1.3))
    }

    #[test]
    fn yaw_quarter_turn() {
        let r = RotationMatrix::from_yaw(FRAC_PI_2);
        let mut v = Vec3::new(1.0, 0.0, 0.0);
        r.transform(&mut v);
        assert!((v - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn constructors_are_rotations() {
        for r in [
            r1(),
            r2(),
            RotationMatrix::from_quaternion(&Quaternion::new(0.1, 0.2, 0.3, 0.4)),
            RotationMatrix::from_rotation_vector(Vec3::new(3.0, 0.0, 1.0)),
            RotationMatrix::from_pitch(-2.0),
        ] {
            assert!(r.is_rotation_matrix(1e-12));
            assert!((r.determinant() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn rejected_assignment_keeps_previous_value() {
        let mut r = r1();
        let shear = Mat3::new(1.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(r.set_from(&shear), Err(Error::NotARotationMatrix));
        assert_eq!(r, r1());

        let mirror = Mat3::diagonal(Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(RotationMatrix::from_matrix(&mirror), Err(Error::NotARotationMatrix));
        assert!(RotationMatrix::try_from(r2().to_mat3()).is_ok());
    }

    #[test]
    fn inverse_is_transpose() {
        let mut r = r1();
        r.invert();
        assert!(r.epsilon_equals(&r1().to_mat3().transpose(), 0.0));
        let mut general = r1().to_mat3();
        general.invert().unwrap();
        assert!(r.epsilon_equals(&general, 1e-12));
        assert!((r1().to_mat3() * r.to_mat3()).is_identity(1e-12));
    }

    #[test]
    fn product_surface() {
        let mut r = r1();
        r.multiply(&r2());
        assert!(r.epsilon_equals(&(r1().to_mat3() * r2().to_mat3()), 1e-14));

        let mut r = r1();
        r.pre_multiply_invert_other(&r2());
        assert!(r.epsilon_equals(&(r2().to_mat3().transpose() * r1().to_mat3()), 1e-14));

        let mut r = r1();
        r.multiply_invert_both(&r2());
        assert!(r.epsilon_equals(&(r1().to_mat3().transpose() * r2().to_mat3().transpose()), 1e-14));

        let mut r = r1();
        r.pre_multiply_transpose_this(&r2());
        assert!(r.epsilon_equals(&(r2().to_mat3() * r1().to_mat3().transpose()), 1e-14));

        let mut r = r1();
        let copy = r;
        r.multiply_invert_this(&copy);
        assert!(r.is_identity(1e-12));
    }

    #[test]
    fn quaternion_operand() {
        let q = Quaternion::from_yaw_pitch_roll(-0.3, 0.8, 0.1);
        let mut a = r1();
        a.multiply(&q);
        let mut b = r1();
        b.multiply(&RotationMatrix::from_quaternion(&q));
        assert!(a.epsilon_equals(&b, 0.0));

        let mut a = r1();
        a.pre_multiply(&YawPitchRoll::new(-0.3, 0.8, 0.1));
        let mut b = r1();
        b.pre_multiply(&RotationMatrix::from_yaw_pitch_roll(-0.3, 0.8, 0.1));
        assert!(a.epsilon_equals(&b, 1e-14));
    }

    #[test]
    fn general_matrix_operand_is_validated() {
        let mut r = r1();
        assert_eq!(r.multiply_matrix(&Mat3::diagonal(Vec3::new(2.0, 1.0, 1.0))), Err(Error::NotARotationMatrix));
        assert_eq!(r, r1());
        r.pre_multiply_matrix(&r2().to_mat3()).unwrap();
        assert!(r.epsilon_equals(&(r2().to_mat3() * r1().to_mat3()), 1e-14));
    }

    #[test]
    fn append_prepend() {
        let mut r = r1();
        r.append_roll(0.5);
        assert!(r.epsilon_equals(&(r1().to_mat3() * Mat3::rotation_x(0.5)), 1e-15));
        let mut r = r1();
        r.prepend_yaw(0.5);
        assert!(r.epsilon_equals(&(Mat3::rotation_z(0.5) * r1().to_mat3()), 1e-15));
    }

    #[test]
    fn interpolate_identical_inputs() {
        let mut r = RotationMatrix::identity();
        r.interpolate(&r1(), &r1(), 0.5).unwrap();
        assert!(r.epsilon_equals(&r1(), 1e-12));
    }

    #[test]
    fn interpolate_endpoints_and_collapse() {
        let mut r = RotationMatrix::identity();
        r.interpolate(&r1(), &r2(), 0.0).unwrap();
        assert!(r.epsilon_equals(&r1(), 1e-12));
        r.interpolate(&r1(), &r2(), 1.0).unwrap();
        assert!(r.epsilon_equals(&r2(), 1e-12));
        r.interpolate(&r1(), &r2(), 0.3).unwrap();
        assert!(r.is_rotation_matrix(1e-12));

        let before = r;
        let half_turn = RotationMatrix::from_roll(PI);
        assert_eq!(
            r.interpolate(&RotationMatrix::identity(), &half_turn, 0.5),
            Err(Error::NotARotationMatrix)
        );
        assert_eq!(r, before);
    }

    #[test]
    fn distance_between_rotations() {
        let a = RotationMatrix::<f64>::from_pitch(0.2);
        let b = RotationMatrix::from_pitch(-0.5);
        assert!((a.distance(&b) - 0.7).abs() < 1e-12);
        assert!(a.distance(&a).abs() < 1e-7);
        assert!((a.distance(&Quaternion::from_pitch(-0.5)) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn getters_roundtrip() {
        let r = RotationMatrix::<f64>::from_yaw_pitch_roll(1.0, 0.5, -0.25);
        assert!((r.yaw() - 1.0).abs() < 1e-12);
        assert!((r.pitch() - 0.5).abs() < 1e-12);
        assert!((r.roll() + 0.25).abs() < 1e-12);

        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!((RotationMatrix::from_rotation_vector(v).rotation_vector() - v).norm() < 1e-12);
        let aa = RotationMatrix::<f64>::from_roll(-1.0).axis_angle();
        assert!((aa.angle - 1.0).abs() < 1e-12);
        assert!((aa.axis - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn tuples_and_planar() {
        let r = r1();
        let mut p = Point3::new(2.0, -1.0, 0.5);
        r.transform(&mut p);
        r.inverse_transform(&mut p).unwrap();
        assert!(p.distance(Point3::new(2.0, -1.0, 0.5)) < 1e-12);

        let mut v = Vec2::new(0.0, 1.0);
        RotationMatrix::from_yaw(FRAC_PI_2).transform_2d(&mut v, true).unwrap();
        assert!((v.x + 1.0).abs() < 1e-12 && v.y.abs() < 1e-12);
        assert_eq!(r.transform_2d(&mut v, true), Err(Error::NotPlanar));
    }

    #[test]
    fn apply_transform_renormalizes() {
        let t = r2();
        let mut r = r1();
        r.apply_transform(&t).unwrap();
        assert!(r.epsilon_equals(&(r2().to_mat3() * r1().to_mat3()), 1e-14));
        assert!(r.is_rotation_matrix(1e-14));
        r.apply_inverse_transform(&t).unwrap();
        assert!(r.epsilon_equals(&r1(), 1e-12));

        let mut r = r1();
        r.apply_transform(&Quaternion::from_roll(0.3)).unwrap();
        assert!(r.epsilon_equals(&(Mat3::rotation_x(0.3) * r1().to_mat3()), 1e-12));
    }

    #[test]
    fn set_and_normalize_repairs_drift() {
        let mut drifted = r1().to_mat3();
        drifted.m01 += 1e-6;
        let mut r = RotationMatrix::identity();
        r.set_and_normalize(&drifted).unwrap();
        assert!(r.is_rotation_matrix(1e-14));
        assert!(r.epsilon_equals(&r1(), 1e-5));
    }

    #[test]
    fn dense_assignment_is_validated() {
        let buf = [[2.0_f64; 3]; 3];
        let mut r = RotationMatrix::identity();
        assert_eq!(r.read_from_dense(0, 0, &buf), Err(Error::NotARotationMatrix));
        assert!(r.is_identity(0.0));
    }
}
