//! Read-only and mutable capability sets shared by the matrix and
//! quaternion types, plus the seams through which orientations and
//! external transforms plug into the kernel.

use crate::conversion;
use crate::dense::{check_block, DenseMatrix};
use crate::error::{check_index, Error, Result};
use crate::matrix_tools;
use crate::{AxisAngle, Mat3, Quaternion, Real, Tuple2, Tuple3, Vec3, Vec4, YawPitchRoll};

/// Read access to a 3x3 matrix and every operation that leaves it untouched.
///
/// Implementors only supply the nine element accessors. `RotationMatrix`
/// sets [`IS_ROTATION`](Self::IS_ROTATION) so that inverses resolve to
/// transposes at compile time.
pub trait Matrix3Read<S: Real>: Sized {
    /// `true` when the implementor always holds a proper rotation.
    const IS_ROTATION: bool = false;

    fn m00(&self) -> S;
    fn m01(&self) -> S;
    fn m02(&self) -> S;
    fn m10(&self) -> S;
    fn m11(&self) -> S;
    fn m12(&self) -> S;
    fn m20(&self) -> S;
    fn m21(&self) -> S;
    fn m22(&self) -> S;

    /// Element (row, col), failing outside `0..=2`.
    fn get(&self, row: usize, col: usize) -> Result<S> {
        check_index(row)?;
        check_index(col)?;
        Ok(match (row, col) {
            (0, 0) => self.m00(),
            (0, 1) => self.m01(),
            (0, 2) => self.m02(),
            (1, 0) => self.m10(),
            (1, 1) => self.m11(),
            (1, 2) => self.m12(),
            (2, 0) => self.m20(),
            (2, 1) => self.m21(),
            _ => self.m22(),
        })
    }

    fn row(&self, row: usize) -> Result<Vec3<S>> {
        Ok(Vec3::new(self.get(row, 0)?, self.get(row, 1)?, self.get(row, 2)?))
    }

    fn col(&self, col: usize) -> Result<Vec3<S>> {
        Ok(Vec3::new(self.get(0, col)?, self.get(1, col)?, self.get(2, col)?))
    }

    /// Row-major `[m00, m01, m02, m10, m11, m12, m20, m21, m22]`.
    fn to_array(&self) -> [S; 9] {
        [
            self.m00(), self.m01(), self.m02(),
            self.m10(), self.m11(), self.m12(),
            self.m20(), self.m21(), self.m22(),
        ]
    }

    fn to_mat3(&self) -> Mat3<S> {
        Mat3::from_array(self.to_array())
    }

    fn determinant(&self) -> S {
        self.m00() * (self.m11() * self.m22() - self.m21() * self.m12())
            - self.m01() * (self.m10() * self.m22() - self.m20() * self.m12())
            + self.m02() * (self.m10() * self.m21() - self.m20() * self.m11())
    }

    fn trace(&self) -> S {
        self.m00() + self.m11() + self.m22()
    }

    fn contains_nan(&self) -> bool {
        self.to_array().iter().any(|v| v.is_nan())
    }

    fn is_zero(&self, eps: S) -> bool {
        self.to_array().iter().all(|v| v.abs() <= eps)
    }

    fn is_identity(&self, eps: S) -> bool {
        self.to_array()
            .iter()
            .enumerate()
            .all(|(i, v)| if i % 4 == 0 { (*v - S::ONE).abs() <= eps } else { v.abs() <= eps })
    }

    fn is_skew_symmetric(&self, eps: S) -> bool {
        self.m00().abs() <= eps
            && self.m11().abs() <= eps
            && self.m22().abs() <= eps
            && (self.m01() + self.m10()).abs() <= eps
            && (self.m02() + self.m20()).abs() <= eps
            && (self.m12() + self.m21()).abs() <= eps
    }

    /// Rows unit length and mutually orthogonal within `eps`, positive determinant.
    fn is_rotation_matrix(&self, eps: S) -> bool {
        let r0 = Vec3::new(self.m00(), self.m01(), self.m02());
        let r1 = Vec3::new(self.m10(), self.m11(), self.m12());
        let r2 = Vec3::new(self.m20(), self.m21(), self.m22());
        (r0.norm_sq() - S::ONE).abs() <= eps
            && (r1.norm_sq() - S::ONE).abs() <= eps
            && (r2.norm_sq() - S::ONE).abs() <= eps
            && r0.dot(r1).abs() <= eps
            && r0.dot(r2).abs() <= eps
            && r1.dot(r2).abs() <= eps
            && self.determinant() > S::ZERO
    }

    /// Row and column 2 equal `(0, 0, 1)` within `eps`.
    fn is_matrix_2d(&self, eps: S) -> bool {
        self.m02().abs() <= eps
            && self.m12().abs() <= eps
            && self.m20().abs() <= eps
            && self.m21().abs() <= eps
            && (self.m22() - S::ONE).abs() <= eps
    }

    /// Planarity test used by the 2D transform variants.
    fn is_planar(&self, eps: S) -> bool {
        self.is_matrix_2d(eps)
    }

    fn epsilon_equals<M: Matrix3Read<S>>(&self, other: &M, eps: S) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (*a - *b).abs() <= eps)
    }

    /// The inverse as a plain matrix: the transpose for rotations, the
    /// adjugate over the determinant otherwise.
    fn inverse_matrix(&self) -> Result<Mat3<S>> {
        if Self::IS_ROTATION {
            Ok(self.to_mat3().transpose())
        } else {
            matrix_tools::inverse(self).ok_or(Error::SingularMatrix)
        }
    }

    /// `v ← M·v`
    fn transform<T: Tuple3<S>>(&self, v: &mut T) {
        let (x, y, z) = (v.x(), v.y(), v.z());
        v.set(
            self.m00() * x + self.m01() * y + self.m02() * z,
            self.m10() * x + self.m11() * y + self.m12() * z,
            self.m20() * x + self.m21() * y + self.m22() * z,
        );
    }

    /// `dst ← M·src`
    fn transform_into<A: Tuple3<S>, B: Tuple3<S>>(&self, src: &A, dst: &mut B) {
        let mut v = src.to_vec3();
        self.transform(&mut v);
        dst.set_vec3(v);
    }

    /// `dst ← dst + M·src`
    fn add_transform<A: Tuple3<S>, B: Tuple3<S>>(&self, src: &A, dst: &mut B) {
        let mut v = src.to_vec3();
        self.transform(&mut v);
        dst.set_vec3(dst.to_vec3() + v);
    }

    /// `dst ← dst - M·src`
    fn sub_transform<A: Tuple3<S>, B: Tuple3<S>>(&self, src: &A, dst: &mut B) {
        let mut v = src.to_vec3();
        self.transform(&mut v);
        dst.set_vec3(dst.to_vec3() - v);
    }

    /// Rotates `xyz` and passes `w` through.
    fn transform_vec4(&self, v: &mut Vec4<S>) {
        let mut xyz = v.truncate();
        self.transform(&mut xyz);
        v.x = xyz.x;
        v.y = xyz.y;
        v.z = xyz.z;
    }

    /// Applies the upper-left 2x2 block. With `check_if_planar` the matrix
    /// must first pass [`is_planar`](Self::is_planar).
    fn transform_2d<T: Tuple2<S>>(&self, v: &mut T, check_if_planar: bool) -> Result<()> {
        if check_if_planar && !self.is_planar(S::PLANAR_EPS) {
            return Err(Error::NotPlanar);
        }
        let (x, y) = (v.x(), v.y());
        v.set(self.m00() * x + self.m01() * y, self.m10() * x + self.m11() * y);
        Ok(())
    }

    /// `X ← M·X·M⁻¹` (`M·X·Mᵗ` for rotations).
    fn transform_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        let inv = self.inverse_matrix()?;
        let left = matrix_tools::multiply_raw(self, false, &*m, false);
        *m = matrix_tools::multiply_raw(&left, false, &inv, false);
        Ok(())
    }

    /// `v ← M⁻¹·v`
    fn inverse_transform<T: Tuple3<S>>(&self, v: &mut T) -> Result<()> {
        self.inverse_matrix()?.transform(v);
        Ok(())
    }

    fn inverse_transform_vec4(&self, v: &mut Vec4<S>) -> Result<()> {
        self.inverse_matrix()?.transform_vec4(v);
        Ok(())
    }

    fn inverse_transform_2d<T: Tuple2<S>>(&self, v: &mut T, check_if_planar: bool) -> Result<()> {
        if check_if_planar && !self.is_planar(S::PLANAR_EPS) {
            return Err(Error::NotPlanar);
        }
        self.inverse_matrix()?.transform_2d(v, false)
    }

    /// `X ← M⁻¹·X·M`
    fn inverse_transform_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        let inv = self.inverse_matrix()?;
        let left = matrix_tools::multiply_raw(&inv, false, &*m, false);
        *m = matrix_tools::multiply_raw(&left, false, self, false);
        Ok(())
    }

    /// Writes the nine elements into `dense` with `(start_row, start_col)` as
    /// the top-left corner.
    fn write_to_dense<D: DenseMatrix<S>>(&self, start_row: usize, start_col: usize, dense: &mut D) -> Result<()> {
        check_block(&*dense, start_row, start_col, 3, 3)?;
        let a = self.to_array();
        for (i, v) in a.iter().enumerate() {
            dense.set_entry(start_row + i / 3, start_col + i % 3, *v);
        }
        Ok(())
    }
}

/// Raw assignment of a 3x3 matrix.
///
/// Assignment is fallible because invariant-bearing implementors validate or
/// decompose the incoming values; a rejected assignment leaves the target
/// untouched.
pub trait Matrix3Write<S: Real>: Matrix3Read<S> {
    #[allow(clippy::too_many_arguments)]
    fn set_components(
        &mut self,
        m00: S, m01: S, m02: S,
        m10: S, m11: S, m12: S,
        m20: S, m21: S, m22: S,
    ) -> Result<()>;

    fn set_identity(&mut self);

    fn set_to_nan(&mut self);

    /// Row-major `[m00, m01, m02, m10, m11, m12, m20, m21, m22]`.
    fn set_from_array(&mut self, a: &[S; 9]) -> Result<()> {
        self.set_components(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], a[8])
    }

    fn set_from<M: Matrix3Read<S>>(&mut self, other: &M) -> Result<()> {
        self.set_from_array(&other.to_array())
    }

    /// Reads a 3x3 block with `(start_row, start_col)` as its top-left corner.
    fn read_from_dense<D: DenseMatrix<S>>(&mut self, start_row: usize, start_col: usize, dense: &D) -> Result<()> {
        check_block(dense, start_row, start_col, 3, 3)?;
        let mut a = [S::ZERO; 9];
        for (i, v) in a.iter_mut().enumerate() {
            *v = dense.entry(start_row + i / 3, start_col + i % 3);
        }
        self.set_from_array(&a)
    }
}

/// Anything denoting a proper rotation.
///
/// Lets the composition operators accept rotation matrices, quaternions,
/// axis-angles and yaw-pitch-roll triples through one signature.
pub trait Orientation<S: Real> {
    fn to_rotation_mat3(&self) -> Mat3<S>;

    fn to_quaternion(&self) -> Quaternion<S> {
        conversion::quaternion_from_matrix(&self.to_rotation_mat3())
    }
}

/// Read access to a quaternion and every operation that leaves it untouched.
pub trait QuaternionRead<S: Real>: Sized {
    fn x(&self) -> S;
    fn y(&self) -> S;
    fn z(&self) -> S;
    fn s(&self) -> S;

    /// `[x, y, z, s]`
    fn to_array(&self) -> [S; 4] {
        [self.x(), self.y(), self.z(), self.s()]
    }

    fn vector_part(&self) -> Vec3<S> {
        Vec3::new(self.x(), self.y(), self.z())
    }

    fn norm_sq(&self) -> S {
        self.x() * self.x() + self.y() * self.y() + self.z() * self.z() + self.s() * self.s()
    }

    fn norm(&self) -> S {
        self.norm_sq().sqrt()
    }

    fn dot<Q: QuaternionRead<S>>(&self, other: &Q) -> S {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.s() * other.s()
    }

    fn contains_nan(&self) -> bool {
        self.to_array().iter().any(|v| v.is_nan())
    }

    fn is_unit(&self, eps: S) -> bool {
        (self.norm_sq() - S::ONE).abs() <= eps
    }

    /// Rotation confined to the XY plane, i.e. a pure yaw.
    fn is_planar(&self, eps: S) -> bool {
        self.x().abs() <= eps && self.y().abs() <= eps
    }

    /// Rotation angle in `[0, 2π]`.
    fn angle(&self) -> S {
        S::TWO * self.vector_part().norm().atan2(self.s())
    }

    /// Angle of the relative rotation between `self` and `other`, in `[0, π]`.
    fn distance<Q: QuaternionRead<S>>(&self, other: &Q) -> S {
        let d = crate::quat::hamilton(self, true, other, false);
        S::TWO * d.vector_part().norm().atan2(d.s().abs())
    }

    /// Component-wise comparison; `q` and `-q` are different here.
    fn epsilon_equals<Q: QuaternionRead<S>>(&self, other: &Q, eps: S) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (*a - *b).abs() <= eps)
    }

    /// Same rotation within `eps` radians; `q` and `-q` compare equal.
    fn geometrically_equals<Q: QuaternionRead<S>>(&self, other: &Q, eps: S) -> bool {
        self.distance(other) <= eps
    }

    fn to_axis_angle(&self) -> AxisAngle<S> {
        conversion::axis_angle_from_quaternion(self)
    }

    fn to_rotation_vector(&self) -> Vec3<S> {
        conversion::rotation_vector_from_quaternion(self)
    }

    fn to_yaw_pitch_roll(&self) -> YawPitchRoll<S> {
        conversion::yaw_pitch_roll_from_quaternion(self)
    }

    fn to_matrix(&self) -> Mat3<S> {
        conversion::matrix_from_quaternion(self)
    }

    /// `v ← q·v·q̄`
    fn transform<T: Tuple3<S>>(&self, v: &mut T) {
        v.set_vec3(crate::quat::rotate(self, false, v.to_vec3()));
    }

    /// `v ← q̄·v·q`
    fn inverse_transform<T: Tuple3<S>>(&self, v: &mut T) {
        v.set_vec3(crate::quat::rotate(self, true, v.to_vec3()));
    }

    fn transform_vec4(&self, v: &mut Vec4<S>) {
        let r = crate::quat::rotate(self, false, v.truncate());
        v.x = r.x;
        v.y = r.y;
        v.z = r.z;
    }

    fn inverse_transform_vec4(&self, v: &mut Vec4<S>) {
        let r = crate::quat::rotate(self, true, v.truncate());
        v.x = r.x;
        v.y = r.y;
        v.z = r.z;
    }

    fn transform_2d<T: Tuple2<S>>(&self, v: &mut T, check_if_planar: bool) -> Result<()> {
        if check_if_planar && !self.is_planar(S::PLANAR_EPS) {
            return Err(Error::NotPlanar);
        }
        let r = crate::quat::rotate(self, false, Vec3::new(v.x(), v.y(), S::ZERO));
        v.set(r.x, r.y);
        Ok(())
    }

    fn inverse_transform_2d<T: Tuple2<S>>(&self, v: &mut T, check_if_planar: bool) -> Result<()> {
        if check_if_planar && !self.is_planar(S::PLANAR_EPS) {
            return Err(Error::NotPlanar);
        }
        let r = crate::quat::rotate(self, true, Vec3::new(v.x(), v.y(), S::ZERO));
        v.set(r.x, r.y);
        Ok(())
    }

    /// `X ← R·X·Rᵗ` with `R` the matrix of this quaternion.
    fn transform_matrix(&self, m: &mut Mat3<S>) {
        let r = self.to_matrix();
        let left = matrix_tools::multiply_raw(&r, false, &*m, false);
        *m = matrix_tools::multiply_raw(&left, false, &r, true);
    }

    /// `X ← Rᵗ·X·R`
    fn inverse_transform_matrix(&self, m: &mut Mat3<S>) {
        let r = self.to_matrix();
        let left = matrix_tools::multiply_raw(&r, true, &*m, false);
        *m = matrix_tools::multiply_raw(&left, false, &r, false);
    }
}

/// An external transform the kernel types can be pushed through.
///
/// Implemented outside the kernel by rigid-body and affine transforms;
/// `RotationMatrix` and `Quaternion` implement it so a rotation can act as
/// one.
pub trait Transform<S: Real> {
    /// Re-expresses a linear operator: `M ← T·M·T⁻¹`.
    fn apply_to_matrix(&self, m: &mut Mat3<S>) -> Result<()>;
    fn apply_inverse_to_matrix(&self, m: &mut Mat3<S>) -> Result<()>;
    /// Composes an orientation held as a raw matrix: `M ← T·M`.
    fn apply_to_orientation(&self, m: &mut Mat3<S>) -> Result<()>;
    fn apply_inverse_to_orientation(&self, m: &mut Mat3<S>) -> Result<()>;
    /// `q ← T·q`
    fn apply_to_quaternion(&self, q: &mut Quaternion<S>);
    fn apply_inverse_to_quaternion(&self, q: &mut Quaternion<S>);
    fn apply_to_tuple<T: Tuple3<S>>(&self, t: &mut T) -> Result<()>;
    fn apply_inverse_to_tuple<T: Tuple3<S>>(&self, t: &mut T) -> Result<()>;
}
