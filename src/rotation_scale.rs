use crate::error::{Error, Result};
use crate::{Mat3, Matrix3Read, Matrix3Write, Orientation, Real, RotationMatrix, Transform, Vec3};

/// A rotation followed by a non-negative per-axis scale: `M = R·diag(s)`.
///
/// Element `(i, j)` is `R(i, j)·s(j)`, computed on read. Mirroring is not
/// representable, so every scale factor stays non-negative. Rotation-only
/// mutators (products, elementary rotations, interpolation) act on `R`
/// and leave the scale alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationScaleMatrix<S> {
    rotation: RotationMatrix<S>,
    scale: Vec3<S>,
}

/// Fails with [`Error::NotARotationScaleMatrix`] if any factor is negative.
pub fn check_if_scales_proper<S: Real>(scale: Vec3<S>) -> Result<()> {
    if scale.x < S::ZERO || scale.y < S::ZERO || scale.z < S::ZERO {
        tracing::debug!(
            sx = scale.x.to_f64(),
            sy = scale.y.to_f64(),
            sz = scale.z.to_f64(),
            "negative scale factor"
        );
        return Err(Error::NotARotationScaleMatrix);
    }
    Ok(())
}

impl<S: Real> RotationScaleMatrix<S> {
    pub fn identity() -> Self {
        Self { rotation: RotationMatrix::identity(), scale: Vec3::splat(S::ONE) }
    }

    pub fn new(rotation: RotationMatrix<S>, scale: Vec3<S>) -> Result<Self> {
        check_if_scales_proper(scale)?;
        Ok(Self { rotation, scale })
    }

    /// Decomposes `m`; see [`set_components`](Matrix3Write::set_components).
    pub fn from_matrix<M: Matrix3Read<S>>(m: &M) -> Result<Self> {
        let mut rs = Self::identity();
        rs.set_from(m)?;
        Ok(rs)
    }

    #[inline]
    pub fn rotation(&self) -> &RotationMatrix<S> {
        &self.rotation
    }

    #[inline]
    pub fn scale_factors(&self) -> Vec3<S> {
        self.scale
    }

    pub fn max_scale(&self) -> S {
        self.scale.max_element()
    }

    pub fn set_rotation(&mut self, rotation: &RotationMatrix<S>) {
        self.rotation = *rotation;
    }

    pub fn set_rotation_from<O: Orientation<S>>(&mut self, o: &O) {
        self.rotation.set_from_orientation(o);
    }

    /// Validated like [`RotationMatrix::from_matrix`].
    pub fn set_rotation_from_matrix<M: Matrix3Read<S>>(&mut self, m: &M) -> Result<()> {
        self.rotation.set_from(m)
    }

    pub fn set_rotation_from_yaw_pitch_roll(&mut self, yaw: S, pitch: S, roll: S) {
        self.rotation.set_from_yaw_pitch_roll(yaw, pitch, roll);
    }

    pub fn set_rotation_to_yaw(&mut self, angle: S) {
        self.rotation.set_to_yaw(angle);
    }

    pub fn set_rotation_to_pitch(&mut self, angle: S) {
        self.rotation.set_to_pitch(angle);
    }

    pub fn set_rotation_to_roll(&mut self, angle: S) {
        self.rotation.set_to_roll(angle);
    }

    pub fn set_scale(&mut self, scale: Vec3<S>) -> Result<()> {
        check_if_scales_proper(scale)?;
        self.scale = scale;
        Ok(())
    }

    pub fn set_uniform_scale(&mut self, scale: S) -> Result<()> {
        self.set_scale(Vec3::splat(scale))
    }

    pub fn reset_scale(&mut self) {
        self.scale = Vec3::splat(S::ONE);
    }

    /// Multiplies every scale factor by `factor`.
    pub fn scale(&mut self, factor: S) -> Result<()> {
        self.set_scale(self.scale * factor)
    }

    /// Multiplies the scale factors component-wise by `factors`.
    pub fn scale_xyz(&mut self, factors: Vec3<S>) -> Result<()> {
        self.set_scale(self.scale.hadamard(factors))
    }

    /// `R ← R·O`; the scale is untouched.
    pub fn multiply<O: Orientation<S>>(&mut self, other: &O) {
        self.rotation.multiply(other);
    }

    /// `R ← R·Oᵗ`
    pub fn multiply_transpose_other<O: Orientation<S>>(&mut self, other: &O) {
        self.rotation.multiply_transpose_other(other);
    }

    /// `R ← O·R`
    pub fn pre_multiply<O: Orientation<S>>(&mut self, other: &O) {
        self.rotation.pre_multiply(other);
    }

    /// `R ← Oᵗ·R`
    pub fn pre_multiply_transpose_other<O: Orientation<S>>(&mut self, other: &O) {
        self.rotation.pre_multiply_transpose_other(other);
    }

    pub fn append_yaw(&mut self, angle: S) {
        self.rotation.append_yaw(angle);
    }

    pub fn append_pitch(&mut self, angle: S) {
        self.rotation.append_pitch(angle);
    }

    pub fn append_roll(&mut self, angle: S) {
        self.rotation.append_roll(angle);
    }

    pub fn prepend_yaw(&mut self, angle: S) {
        self.rotation.prepend_yaw(angle);
    }

    pub fn prepend_pitch(&mut self, angle: S) {
        self.rotation.prepend_pitch(angle);
    }

    pub fn prepend_roll(&mut self, angle: S) {
        self.rotation.prepend_roll(angle);
    }

    /// Interpolates the rotation part only.
    pub fn interpolate(&mut self, r0: &RotationMatrix<S>, rf: &RotationMatrix<S>, alpha: S) -> Result<()> {
        self.rotation.interpolate(r0, rf, alpha)
    }

    pub fn normalize_rotation(&mut self) -> Result<()> {
        self.rotation.normalize()
    }

    /// Applies an external transform to the rotation part.
    pub fn apply_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        self.rotation.apply_transform(t)
    }

    pub fn apply_inverse_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        self.rotation.apply_inverse_transform(t)
    }
}

impl<S: Real> Matrix3Read<S> for RotationScaleMatrix<S> {
    #[inline] fn m00(&self) -> S { self.rotation.m00() * self.scale.x }
    #[inline] fn m01(&self) -> S { self.rotation.m01() * self.scale.y }
    #[inline] fn m02(&self) -> S { self.rotation.m02() * self.scale.z }
    #[inline] fn m10(&self) -> S { self.rotation.m10() * self.scale.x }
    #[inline] fn m11(&self) -> S { self.rotation.m11() * self.scale.y }
    #[inline] fn m12(&self) -> S { self.rotation.m12() * self.scale.z }
    #[inline] fn m20(&self) -> S { self.rotation.m20() * self.scale.x }
    #[inline] fn m21(&self) -> S { self.rotation.m21() * self.scale.y }
    #[inline] fn m22(&self) -> S { self.rotation.m22() * self.scale.z }

    /// `diag(s)⁻¹·Rᵗ`; singular when any scale factor is zero.
    fn inverse_matrix(&self) -> Result<Mat3<S>> {
        let s = self.scale;
        if s.x == S::ZERO || s.y == S::ZERO || s.z == S::ZERO {
            return Err(Error::SingularMatrix);
        }
        let mut inv = self.rotation.to_mat3().transpose();
        inv.scale_rows(Vec3::new(s.x.recip(), s.y.recip(), s.z.recip()));
        Ok(inv)
    }

    /// Scaling never moves a vector out of the XY plane, so only the
    /// rotation is checked.
    fn is_planar(&self, eps: S) -> bool {
        self.rotation.is_matrix_2d(eps)
    }
}

impl<S: Real> Matrix3Write<S> for RotationScaleMatrix<S> {
    /// Decomposes the values as `R·diag(s)`: the determinant must be
    /// positive, `s(j)` is the norm of column `j`, and the normalized
    /// columns must form a rotation. Nothing is committed on failure.
    fn set_components(
        &mut self,
        m00: S, m01: S, m02: S,
        m10: S, m11: S, m12: S,
        m20: S, m21: S, m22: S,
    ) -> Result<()> {
        let staged = Mat3::new(m00, m01, m02, m10, m11, m12, m20, m21, m22);
        let det = staged.determinant();
        if !(det > S::ZERO) {
            tracing::debug!(det = det.to_f64(), "rotation-scale decomposition needs a positive determinant");
            return Err(Error::NotARotationScaleMatrix);
        }

        let scale = Vec3::new(
            Vec3::new(m00, m10, m20).norm(),
            Vec3::new(m01, m11, m21).norm(),
            Vec3::new(m02, m12, m22).norm(),
        );
        if scale.x == S::ZERO || scale.y == S::ZERO || scale.z == S::ZERO {
            return Err(Error::NotARotationScaleMatrix);
        }

        let mut rotation = staged;
        rotation.scale_cols(Vec3::new(scale.x.recip(), scale.y.recip(), scale.z.recip()));
        if !rotation.is_rotation_matrix(S::ROTATION_EPS) {
            tracing::debug!(det = det.to_f64(), "columns are not orthogonal after removing scale");
            return Err(Error::NotARotationScaleMatrix);
        }

        self.rotation.set_unchecked(rotation);
        self.scale = scale;
        Ok(())
    }

    fn set_identity(&mut self) {
        *self = Self::identity();
    }

    fn set_to_nan(&mut self) {
        self.rotation.set_to_nan();
        self.scale = Vec3::nan();
    }
}

impl<S: Real> Orientation<S> for RotationScaleMatrix<S> {
    fn to_rotation_mat3(&self) -> Mat3<S> {
        self.rotation.to_mat3()
    }
}

impl<S: Real> Default for RotationScaleMatrix<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Real> TryFrom<Mat3<S>> for RotationScaleMatrix<S> {
    type Error = Error;

    fn try_from(m: Mat3<S>) -> Result<Self> {
        Self::from_matrix(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, Quaternion, Vec2};
    use core::f64::consts::FRAC_PI_2;

    fn sample_rotation() -> RotationMatrix<f64> {
        RotationMatrix::from_yaw_pitch_roll(0.7, 0.2, -1.4)
    }

    #[test]
    fn scaled_identity_elements() {
        let rs = RotationScaleMatrix::new(RotationMatrix::identity(), Vec3::new(2.0, 3.0, 4.0)).unwrap();
        assert_eq!(rs.get(0, 0), Ok(2.0));
        assert_eq!(rs.get(1, 1), Ok(3.0));
        assert_eq!(rs.get(2, 2), Ok(4.0));
        for (i, v) in rs.to_array().iter().enumerate() {
            if i % 4 != 0 {
                assert_eq!(*v, 0.0);
            }
        }
    }

    #[test]
    fn decomposition_recovers_parts() {
        let scale = Vec3::new(0.5, 2.0, 7.0);
        let composite = sample_rotation().to_mat3() * Mat3::diagonal(scale);
        let rs = RotationScaleMatrix::from_matrix(&composite).unwrap();
        assert!((rs.scale_factors() - scale).norm() < 1e-12);
        assert!(rs.rotation().epsilon_equals(&sample_rotation(), 1e-12));
        assert!(rs.epsilon_equals(&composite, 1e-12));
    }

    #[test]
    fn mirroring_and_shear_are_rejected() {
        let mut rs = RotationScaleMatrix::new(sample_rotation(), Vec3::new(1.0, 2.0, 3.0)).unwrap();
        let before = rs;

        let mirrored = sample_rotation().to_mat3() * Mat3::diagonal(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(rs.set_from(&mirrored), Err(Error::NotARotationScaleMatrix));
        let sheared = Mat3::new(1.0, 0.3, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(rs.set_from(&sheared), Err(Error::NotARotationScaleMatrix));
        assert_eq!(rs.set_from(&Mat3::zero()), Err(Error::NotARotationScaleMatrix));
        assert_eq!(rs, before);

        assert_eq!(rs.set_scale(Vec3::new(1.0, -0.1, 1.0)), Err(Error::NotARotationScaleMatrix));
        assert_eq!(rs.scale(-1.0), Err(Error::NotARotationScaleMatrix));
        assert!(RotationScaleMatrix::new(sample_rotation(), Vec3::new(-1.0, 1.0, 1.0)).is_err());
        assert_eq!(rs, before);
    }

    #[test]
    fn scale_updates() {
        let mut rs = RotationScaleMatrix::<f64>::identity();
        rs.scale(2.0).unwrap();
        rs.scale_xyz(Vec3::new(1.0, 0.5, 3.0)).unwrap();
        assert_eq!(rs.scale_factors(), Vec3::new(2.0, 1.0, 6.0));
        assert_eq!(rs.max_scale(), 6.0);
        rs.reset_scale();
        assert_eq!(rs.scale_factors(), Vec3::splat(1.0));
    }

    #[test]
    fn rotation_mutators_keep_scale() {
        let scale = Vec3::new(1.0, 2.0, 3.0);
        let mut rs = RotationScaleMatrix::new(RotationMatrix::identity(), scale).unwrap();
        rs.multiply(&Quaternion::from_yaw(0.5));
        rs.prepend_pitch(0.25);
        rs.append_roll(-0.1);
        assert_eq!(rs.scale_factors(), scale);

        let mut expected = RotationMatrix::from_pitch(0.25);
        expected.multiply(&RotationMatrix::from_yaw(0.5));
        expected.append_roll(-0.1);
        assert!(rs.rotation().epsilon_equals(&expected, 1e-14));

        rs.interpolate(&RotationMatrix::identity(), &sample_rotation(), 1.0).unwrap();
        assert!(rs.rotation().epsilon_equals(&sample_rotation(), 1e-12));
        assert_eq!(rs.scale_factors(), scale);
    }

    #[test]
    fn transform_and_inverse() {
        let rs = RotationScaleMatrix::new(sample_rotation(), Vec3::new(2.0, 0.5, 4.0)).unwrap();
        let mut p = Point3::new(1.0, 2.0, 3.0);
        rs.transform(&mut p);
        let expected = sample_rotation().to_mat3() * Vec3::new(2.0, 1.0, 12.0);
        assert!((p.to_vec() - expected).norm() < 1e-12);
        rs.inverse_transform(&mut p).unwrap();
        assert!(p.distance(Point3::new(1.0, 2.0, 3.0)) < 1e-12);

        let general = rs.to_mat3().try_inverse().unwrap();
        assert!(rs.inverse_matrix().unwrap().epsilon_equals(&general, 1e-12));
    }

    #[test]
    fn zero_scale_is_singular() {
        let rs = RotationScaleMatrix::new(sample_rotation(), Vec3::new(1.0, 0.0, 1.0)).unwrap();
        let mut v = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(rs.inverse_transform(&mut v), Err(Error::SingularMatrix));
        assert_eq!(v, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn planar_checks_rotation_only() {
        let rs = RotationScaleMatrix::new(RotationMatrix::from_yaw(FRAC_PI_2), Vec3::new(2.0, 2.0, 5.0)).unwrap();
        let mut v = Vec2::new(1.0, 0.0);
        rs.transform_2d(&mut v, true).unwrap();
        assert!(v.x.abs() < 1e-12 && (v.y - 2.0).abs() < 1e-12);
        rs.inverse_transform_2d(&mut v, true).unwrap();
        assert!((v.x - 1.0).abs() < 1e-12 && v.y.abs() < 1e-12);

        let tilted = RotationScaleMatrix::new(RotationMatrix::from_roll(0.2), Vec3::splat(1.0)).unwrap();
        assert_eq!(tilted.transform_2d(&mut v, true), Err(Error::NotPlanar));
    }

    #[test]
    fn nan_marker() {
        let mut rs = RotationScaleMatrix::<f64>::identity();
        rs.set_to_nan();
        assert!(rs.contains_nan());
        rs.set_identity();
        assert!(rs.is_identity(0.0));
    }
}
