use crate::error::{check_index, Result};
use crate::matrix_tools::{self, Operand};
use crate::{Matrix3Read, Matrix3Write, Real, Transform, Vec3};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// General 3x3 matrix with no invariant, row-major storage.
///
/// ```text
/// | m00 m01 m02 |
/// | m10 m11 m12 |
/// | m20 m21 m22 |
/// ```
///
/// Every mutator works in place. Products read both operands into locals
/// before writing, so `self` may also appear as the operand (through a
/// copy) without corrupting the result.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3<S> {
    pub m00: S,
    pub m01: S,
    pub m02: S,
    pub m10: S,
    pub m11: S,
    pub m12: S,
    pub m20: S,
    pub m21: S,
    pub m22: S,
}

impl<S: Real> Mat3<S> {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(m00: S, m01: S, m02: S, m10: S, m11: S, m12: S, m20: S, m21: S, m22: S) -> Self {
        Self { m00, m01, m02, m10, m11, m12, m20, m21, m22 }
    }

    /// Row-major `[m00, m01, m02, m10, m11, m12, m20, m21, m22]`.
    #[inline]
    pub fn from_array(a: [S; 9]) -> Self {
        Self::new(a[0], a[1], a[2], a[3], a[4], a[5], a[6], a[7], a[8])
    }

    #[inline]
    pub fn from_rows(r0: Vec3<S>, r1: Vec3<S>, r2: Vec3<S>) -> Self {
        Self::new(r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z)
    }

    #[inline]
    pub fn from_cols(c0: Vec3<S>, c1: Vec3<S>, c2: Vec3<S>) -> Self {
        Self::new(c0.x, c1.x, c2.x, c0.y, c1.y, c2.y, c0.z, c1.z, c2.z)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::from_array([S::ZERO; 9])
    }

    #[inline]
    pub fn identity() -> Self {
        Self::diagonal(Vec3::splat(S::ONE))
    }

    #[inline]
    pub fn nan() -> Self {
        Self::from_array([S::NAN; 9])
    }

    #[inline]
    pub fn diagonal(d: Vec3<S>) -> Self {
        Self::new(d.x, S::ZERO, S::ZERO, S::ZERO, d.y, S::ZERO, S::ZERO, S::ZERO, d.z)
    }

    /// Cross-product ("tilde") matrix `[v]×` such that `[v]× w = v × w`.
    pub fn tilde(v: Vec3<S>) -> Self {
        Self::new(
            S::ZERO, -v.z,    v.y,
            v.z,     S::ZERO, -v.x,
            -v.y,    v.x,     S::ZERO,
        )
    }

    /// Rotation matrix about X axis (roll)
    pub fn rotation_x(angle: S) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(S::ONE, S::ZERO, S::ZERO, S::ZERO, c, -s, S::ZERO, s, c)
    }

    /// Rotation matrix about Y axis (pitch)
    pub fn rotation_y(angle: S) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, S::ZERO, s, S::ZERO, S::ONE, S::ZERO, -s, S::ZERO, c)
    }

    /// Rotation matrix about Z axis (yaw)
    pub fn rotation_z(angle: S) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, S::ZERO, s, c, S::ZERO, S::ZERO, S::ZERO, S::ONE)
    }

    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn set(&mut self, m00: S, m01: S, m02: S, m10: S, m11: S, m12: S, m20: S, m21: S, m22: S) {
        *self = Self::new(m00, m01, m02, m10, m11, m12, m20, m21, m22);
    }

    #[inline]
    fn element_mut(&mut self, row: usize, col: usize) -> Result<&mut S> {
        check_index(row)?;
        check_index(col)?;
        Ok(match (row, col) {
            (0, 0) => &mut self.m00,
            (0, 1) => &mut self.m01,
            (0, 2) => &mut self.m02,
            (1, 0) => &mut self.m10,
            (1, 1) => &mut self.m11,
            (1, 2) => &mut self.m12,
            (2, 0) => &mut self.m20,
            (2, 1) => &mut self.m21,
            _ => &mut self.m22,
        })
    }

    /// Sets element (row, col), failing outside `0..=2`.
    pub fn set_element(&mut self, row: usize, col: usize, value: S) -> Result<()> {
        *self.element_mut(row, col)? = value;
        Ok(())
    }

    pub fn set_row(&mut self, row: usize, v: Vec3<S>) -> Result<()> {
        check_index(row)?;
        for (col, value) in v.as_array().into_iter().enumerate() {
            *self.element_mut(row, col)? = value;
        }
        Ok(())
    }

    pub fn set_col(&mut self, col: usize, v: Vec3<S>) -> Result<()> {
        check_index(col)?;
        for (row, value) in v.as_array().into_iter().enumerate() {
            *self.element_mut(row, col)? = value;
        }
        Ok(())
    }

    pub fn set_to_zero(&mut self) {
        *self = Self::zero();
    }

    pub fn fill(&mut self, value: S) {
        *self = Self::from_array([value; 9]);
    }

    pub fn set_to_tilde(&mut self, v: Vec3<S>) {
        *self = Self::tilde(v);
    }

    pub fn set_to_diagonal(&mut self, d: Vec3<S>) {
        *self = Self::diagonal(d);
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20,
            self.m01, self.m11, self.m21,
            self.m02, self.m12, self.m22,
        )
    }

    pub fn transpose_in_place(&mut self) {
        *self = self.transpose();
    }

    pub fn negate(&mut self) {
        *self = -*self;
    }

    /// Element-wise absolute value.
    pub fn abs(&mut self) {
        *self = self.map(|v| v.abs());
    }

    pub fn scale(&mut self, factor: S) {
        *self = *self * factor;
    }

    pub fn scale_row(&mut self, row: usize, factor: S) -> Result<()> {
        check_index(row)?;
        for col in 0..3 {
            *self.element_mut(row, col)? *= factor;
        }
        Ok(())
    }

    pub fn scale_col(&mut self, col: usize, factor: S) -> Result<()> {
        check_index(col)?;
        for row in 0..3 {
            *self.element_mut(row, col)? *= factor;
        }
        Ok(())
    }

    /// Scales row `i` by `factors[i]`: `self ← diag(factors)·self`.
    pub fn scale_rows(&mut self, factors: Vec3<S>) {
        let (a, f) = (self.to_array(), factors.as_array());
        *self = Self::from_array(core::array::from_fn(|i| a[i] * f[i / 3]));
    }

    /// Scales column `j` by `factors[j]`: `self ← self·diag(factors)`.
    pub fn scale_cols(&mut self, factors: Vec3<S>) {
        let (a, f) = (self.to_array(), factors.as_array());
        *self = Self::from_array(core::array::from_fn(|i| a[i] * f[i % 3]));
    }

    fn map(&self, f: impl Fn(S) -> S) -> Self {
        Self::from_array(self.to_array().map(f))
    }

    /// Inverse as a new value, `None` when singular.
    pub fn try_inverse(&self) -> Option<Self> {
        matrix_tools::inverse(self)
    }

    /// Inverts in place. Returns `false` and leaves `self` untouched when
    /// the matrix is singular.
    pub fn try_invert(&mut self) -> bool {
        match self.try_inverse() {
            Some(inv) => {
                *self = inv;
                true
            }
            None => false,
        }
    }

    /// Inverts in place, failing with [`Error::SingularMatrix`](crate::Error::SingularMatrix)
    /// when the matrix is singular.
    pub fn invert(&mut self) -> Result<()> {
        let inv = self.inverse_matrix()?;
        *self = inv;
        Ok(())
    }

    /// Gram-Schmidt orthonormalization of the rows; see
    /// [`matrix_tools::orthonormalize`]. Untouched on failure.
    pub fn normalize(&mut self) -> Result<()> {
        *self = matrix_tools::orthonormalize(&*self)?;
        Ok(())
    }

    /// `self ← self·selfᵗ`
    pub fn multiply_outer(&mut self) {
        *self = matrix_tools::multiply_raw(&*self, false, &*self, true);
    }

    /// `self ← self + alpha·(other - self)`
    pub fn interpolate<M: Matrix3Read<S>>(&mut self, other: &M, alpha: S) {
        *self = matrix_tools::lerp(&*self, other, alpha);
    }

    /// Re-expresses this linear operator through `t`: `self ← T·self·T⁻¹`.
    pub fn apply_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        t.apply_to_matrix(self)
    }

    pub fn apply_inverse_transform<T: Transform<S>>(&mut self, t: &T) -> Result<()> {
        t.apply_inverse_to_matrix(self)
    }
}

macro_rules! in_place_products {
    (@product $this:ident, $other:ident, this($lop:ident), other($rop:ident)) => {
        matrix_tools::product(&$this, Operand::$lop, $other, Operand::$rop)
    };
    (@product $this:ident, $other:ident, other($lop:ident), this($rop:ident)) => {
        matrix_tools::product($other, Operand::$lop, &$this, Operand::$rop)
    };
    ($(
        $(#[$doc:meta])*
        $name:ident => $lhs:ident($lop:ident), $rhs:ident($rop:ident);
    )*) => {
        impl<S: Real> Mat3<S> {
            $(
                $(#[$doc])*
                pub fn $name<M: Matrix3Read<S>>(&mut self, other: &M) -> Result<()> {
                    let this = *self;
                    *self = in_place_products!(@product this, other, $lhs($lop), $rhs($rop))?;
                    Ok(())
                }
            )*
        }
    };
}

impl<S: Real> Mat3<S> {
    /// `self ← self·other`
    pub fn multiply<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(&*self, false, other, false);
    }

    /// `self ← other·self`
    pub fn pre_multiply<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(other, false, &*self, false);
    }

    /// `self ← selfᵗ·other`
    pub fn multiply_transpose_this<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(&*self, true, other, false);
    }

    /// `self ← self·otherᵗ`
    pub fn multiply_transpose_other<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(&*self, false, other, true);
    }

    /// `self ← selfᵗ·otherᵗ`
    pub fn multiply_transpose_both<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(&*self, true, other, true);
    }

    /// `self ← other·selfᵗ`
    pub fn pre_multiply_transpose_this<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(other, false, &*self, true);
    }

    /// `self ← otherᵗ·self`
    pub fn pre_multiply_transpose_other<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(other, true, &*self, false);
    }

    /// `self ← otherᵗ·selfᵗ`
    pub fn pre_multiply_transpose_both<M: Matrix3Read<S>>(&mut self, other: &M) {
        *self = matrix_tools::multiply_raw(other, true, &*self, true);
    }
}

in_place_products! {
    /// `self ← self⁻¹·other`
    multiply_invert_this => this(Inverted), other(AsIs);
    /// `self ← self·other⁻¹`; a rotation operand is transposed instead.
    multiply_invert_other => this(AsIs), other(Inverted);
    /// `self ← self⁻¹·other⁻¹`
    multiply_invert_both => this(Inverted), other(Inverted);
    /// `self ← selfᵗ·other⁻¹`
    multiply_transpose_this_invert_other => this(Transposed), other(Inverted);
    /// `self ← self⁻¹·otherᵗ`
    multiply_invert_this_transpose_other => this(Inverted), other(Transposed);
    /// `self ← other·self⁻¹`
    pre_multiply_invert_this => other(AsIs), this(Inverted);
    /// `self ← other⁻¹·self`; a rotation operand is transposed instead.
    pre_multiply_invert_other => other(Inverted), this(AsIs);
    /// `self ← other⁻¹·self⁻¹`
    pre_multiply_invert_both => other(Inverted), this(Inverted);
    /// `self ← other⁻¹·selfᵗ`
    pre_multiply_transpose_this_invert_other => other(Inverted), this(Transposed);
    /// `self ← otherᵗ·self⁻¹`
    pre_multiply_invert_this_transpose_other => other(Transposed), this(Inverted);
}

impl<S: Real> Matrix3Read<S> for Mat3<S> {
    #[inline] fn m00(&self) -> S { self.m00 }
    #[inline] fn m01(&self) -> S { self.m01 }
    #[inline] fn m02(&self) -> S { self.m02 }
    #[inline] fn m10(&self) -> S { self.m10 }
    #[inline] fn m11(&self) -> S { self.m11 }
    #[inline] fn m12(&self) -> S { self.m12 }
    #[inline] fn m20(&self) -> S { self.m20 }
    #[inline] fn m21(&self) -> S { self.m21 }
    #[inline] fn m22(&self) -> S { self.m22 }
}

impl<S: Real> Matrix3Write<S> for Mat3<S> {
    fn set_components(
        &mut self,
        m00: S, m01: S, m02: S,
        m10: S, m11: S, m12: S,
        m20: S, m21: S, m22: S,
    ) -> Result<()> {
        self.set(m00, m01, m02, m10, m11, m12, m20, m21, m22);
        Ok(())
    }

    fn set_identity(&mut self) {
        *self = Self::identity();
    }

    fn set_to_nan(&mut self) {
        *self = Self::nan();
    }
}

impl<S: Real> Default for Mat3<S> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<S: Real> From<[S; 9]> for Mat3<S> {
    fn from(a: [S; 9]) -> Self {
        Self::from_array(a)
    }
}

impl<S: Real> Add for Mat3<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (a, b) = (self.to_array(), rhs.to_array());
        Self::from_array(core::array::from_fn(|i| a[i] + b[i]))
    }
}

impl<S: Real> Sub for Mat3<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let (a, b) = (self.to_array(), rhs.to_array());
        Self::from_array(core::array::from_fn(|i| a[i] - b[i]))
    }
}

impl<S: Real> AddAssign for Mat3<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<S: Real> SubAssign for Mat3<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<S: Real> Neg for Mat3<S> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl<S: Real> Mul<S> for Mat3<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: S) -> Self {
        self.map(|v| v * rhs)
    }
}

// Mat3 * Vec3
impl<S: Real> Mul<Vec3<S>> for Mat3<S> {
    type Output = Vec3<S>;
    #[inline]
    fn mul(self, rhs: Vec3<S>) -> Vec3<S> {
        let mut v = rhs;
        self.transform(&mut v);
        v
    }
}

// Mat3 * Mat3
impl<S: Real> Mul for Mat3<S> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        matrix_tools::multiply_raw(&self, false, &rhs, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Point3, RotationMatrix, Vec2, Vec4};

    fn sample() -> Mat3<f64> {
        Mat3::new(1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0)
    }

    #[test]
    fn identity() {
        let m = Mat3::<f64>::identity();
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(m * v, v);
    }

    #[test]
    fn checked_element_access() {
        let mut m = sample();
        assert_eq!(m.get(2, 1), Ok(6.0));
        assert_eq!(m.get(3, 0), Err(Error::RowOrColumnOutOfBounds { index: 3 }));
        assert_eq!(m.get(0, 7), Err(Error::RowOrColumnOutOfBounds { index: 7 }));
        m.set_element(1, 2, -1.0).unwrap();
        assert_eq!(m.m12, -1.0);
        assert!(m.set_element(3, 3, 0.0).is_err());
        assert!(m.set_row(4, Vec3::zero()).is_err());
    }

    #[test]
    fn rows_and_columns() {
        let mut m = sample();
        assert_eq!(m.row(1).unwrap(), Vec3::new(0.0, 1.0, 4.0));
        assert_eq!(m.col(2).unwrap(), Vec3::new(3.0, 4.0, 0.0));
        m.set_col(0, Vec3::new(9.0, 8.0, 7.0)).unwrap();
        assert_eq!(m.col(0).unwrap(), Vec3::new(9.0, 8.0, 7.0));
        m.scale_row(0, 2.0).unwrap();
        assert_eq!(m.row(0).unwrap(), Vec3::new(18.0, 4.0, 6.0));
    }

    #[test]
    fn scale_rows_and_cols_match_diagonal_products() {
        let d = Vec3::new(2.0, 3.0, 4.0);
        let mut rows = sample();
        rows.scale_rows(d);
        assert_eq!(rows, Mat3::diagonal(d) * sample());
        let mut cols = sample();
        cols.scale_cols(d);
        assert_eq!(cols, sample() * Mat3::diagonal(d));
    }

    #[test]
    fn tilde_is_cross_product() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let w = Vec3::new(4.0, 5.0, 6.0);
        let result = Mat3::tilde(v) * w;
        let expected = v.cross(w);
        assert!((result - expected).norm() < 1e-12);
        assert!(Mat3::tilde(v).is_skew_symmetric(0.0));
    }

    #[test]
    fn inverse_roundtrip() {
        let m = sample();
        let mut inv = m;
        inv.invert().unwrap();
        assert!((m * inv).is_identity(1e-12));
        let mut back = inv;
        back.invert().unwrap();
        assert!(back.epsilon_equals(&m, 1e-12));
    }

    #[test]
    fn invert_both_forms_fail_on_zero() {
        let mut z = Mat3::<f64>::zero();
        assert!(!z.try_invert());
        assert_eq!(z, Mat3::zero());
        assert_eq!(z.invert(), Err(Error::SingularMatrix));

        let mut id = Mat3::<f64>::identity();
        assert!(id.try_invert());
        assert_eq!(id, Mat3::identity());
    }

    #[test]
    fn in_place_products_read_before_write() {
        let a = sample();
        let b = Mat3::new(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 1.0);

        let mut m = a;
        m.multiply(&b);
        assert_eq!(m, a * b);

        let mut m = a;
        m.pre_multiply(&b);
        assert_eq!(m, b * a);

        // self as its own operand
        let mut m = a;
        let copy = m;
        m.multiply(&copy);
        assert_eq!(m, a * a);

        let mut m = a;
        m.multiply_transpose_this(&b);
        assert_eq!(m, a.transpose() * b);

        let mut m = a;
        m.pre_multiply_transpose_both(&b);
        assert_eq!(m, b.transpose() * a.transpose());
    }

    #[test]
    fn invert_variants() {
        let a = sample();
        let b = Mat3::new(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 1.0);

        let mut m = a;
        m.multiply_invert_this(&a).unwrap();
        assert!(m.is_identity(1e-12));

        let mut m = a;
        m.pre_multiply_invert_other(&a).unwrap();
        assert!(m.is_identity(1e-12));

        let mut m = a;
        m.multiply_invert_other(&b).unwrap();
        assert!((m * b).epsilon_equals(&a, 1e-12));

        let mut m = a;
        m.pre_multiply_invert_this(&b).unwrap();
        assert!((m * a).epsilon_equals(&b, 1e-12));

        let mut m = a;
        assert_eq!(m.multiply_invert_other(&Mat3::zero()), Err(Error::SingularMatrix));
        assert_eq!(m, a);
    }

    #[test]
    fn rotation_operand_inverts_by_transpose() {
        let r = RotationMatrix::from_yaw_pitch_roll(0.2, 0.5, -0.9);
        let mut m = sample();
        m.multiply_invert_other(&r).unwrap();
        let mut expected = sample();
        expected.multiply_transpose_other(&r);
        assert_eq!(m, expected);
    }

    #[test]
    fn multiply_outer_is_symmetric() {
        let mut m = sample();
        m.multiply_outer();
        assert_eq!(m, m.transpose());
    }

    #[test]
    fn normalize_is_idempotent_on_rotations() {
        let r = Mat3::rotation_z(0.7) * Mat3::rotation_x(-0.3);
        let mut n = r;
        n.normalize().unwrap();
        assert!(n.epsilon_equals(&r, 1e-14));
    }

    #[test]
    fn normalize_failure_leaves_matrix() {
        let mut m = Mat3::new(0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let before = m;
        assert_eq!(m.normalize(), Err(Error::NotARotationMatrix));
        assert_eq!(m, before);
    }

    #[test]
    fn transform_tuples() {
        let m = sample();
        let mut p = Point3::new(1.0, 1.0, 1.0);
        m.transform(&mut p);
        assert_eq!(p, Point3::new(6.0, 5.0, 11.0));
        m.inverse_transform(&mut p).unwrap();
        assert!(p.distance(Point3::new(1.0, 1.0, 1.0)) < 1e-12);

        let mut acc = Vec3::new(1.0, 0.0, 0.0);
        m.add_transform(&Vec3::new(1.0, 1.0, 1.0), &mut acc);
        assert_eq!(acc, Vec3::new(7.0, 5.0, 11.0));
        m.sub_transform(&Vec3::new(1.0, 1.0, 1.0), &mut acc);
        assert_eq!(acc, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn transform_vec4_passes_w_through() {
        let m = Mat3::rotation_z(core::f64::consts::FRAC_PI_2);
        let mut v = Vec4::new(1.0, 0.0, 0.0, 5.0);
        m.transform_vec4(&mut v);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
        assert_eq!(v.w, 5.0);
    }

    #[test]
    fn transform_2d_checks_planarity() {
        let mut planar = Mat3::rotation_z(core::f64::consts::FRAC_PI_2);
        let mut v = Vec2::new(1.0, 0.0);
        planar.transform_2d(&mut v, true).unwrap();
        assert!(v.x.abs() < 1e-12 && (v.y - 1.0).abs() < 1e-12);

        planar.m02 = 0.5;
        let mut v = Vec2::new(1.0, 0.0);
        assert_eq!(planar.transform_2d(&mut v, true), Err(Error::NotPlanar));
        assert_eq!(v, Vec2::new(1.0, 0.0));
        // unchecked variant ignores the off-plane entries
        planar.transform_2d(&mut v, false).unwrap();
    }

    #[test]
    fn transform_matrix_conjugates() {
        let r = Mat3::rotation_y(0.4);
        let d = Mat3::diagonal(Vec3::new(1.0, 2.0, 3.0));
        let mut x = d;
        r.transform_matrix(&mut x).unwrap();
        assert!(x.epsilon_equals(&(r * d * r.transpose()), 1e-12));
        r.inverse_transform_matrix(&mut x).unwrap();
        assert!(x.epsilon_equals(&d, 1e-12));
        assert_eq!(Mat3::zero().transform_matrix(&mut x), Err(Error::SingularMatrix));
    }

    #[test]
    fn dense_interop() {
        let m = sample();
        let mut buf = [[0.0_f64; 5]; 4];
        m.write_to_dense(1, 2, &mut buf).unwrap();
        assert_eq!(buf[1][2], 1.0);
        assert_eq!(buf[3][4], 0.0);
        assert_eq!(buf[3][3], 6.0);
        let mut back = Mat3::zero();
        back.read_from_dense(1, 2, &buf).unwrap();
        assert_eq!(back, m);
        assert!(matches!(m.write_to_dense(2, 0, &mut buf), Err(Error::DenseOutOfRange { .. })));
        assert!(matches!(back.read_from_dense(0, 3, &buf), Err(Error::DenseOutOfRange { .. })));
    }

    #[test]
    fn array_layout_is_row_major() {
        let m = sample();
        assert_eq!(m.to_array(), [1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0]);
        assert_eq!(Mat3::from(m.to_array()), m);
    }
}
