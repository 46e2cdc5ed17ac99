use crate::conversion;
use crate::dense::{check_block, DenseMatrix};
use crate::error::Result;
use crate::matrix_tools;
use crate::{AxisAngle, Mat3, Matrix3Read, Orientation, QuaternionRead, Real, Transform, Tuple3, Vec3};

/// Unit quaternion `s + xi + yj + zk` representing a rotation.
///
/// Normalizing setters keep the norm at one; [`set_unchecked`](Self::set_unchecked)
/// and [`new_unchecked`](Self::new_unchecked) store raw values for callers
/// that normalize later. `q` and `-q` denote the same rotation; use
/// [`geometrically_equals`](QuaternionRead::geometrically_equals) to compare
/// rotations.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion<S> {
    x: S,
    y: S,
    z: S,
    s: S,
}

/// Hamilton product `a·b`, optionally conjugating either operand on the fly.
/// Reads both operands before building the result.
#[inline]
pub(crate) fn hamilton<S: Real, A: QuaternionRead<S>, B: QuaternionRead<S>>(
    a: &A,
    conj_a: bool,
    b: &B,
    conj_b: bool,
) -> Quaternion<S> {
    let av = if conj_a { -a.vector_part() } else { a.vector_part() };
    let bv = if conj_b { -b.vector_part() } else { b.vector_part() };
    let (as_, bs) = (a.s(), b.s());
    let v = bv * as_ + av * bs + av.cross(bv);
    Quaternion::new_unchecked(v.x, v.y, v.z, as_ * bs - av.dot(bv))
}

/// `q·v·q̄` (or `q̄·v·q` with `conj`) without forming the intermediate
/// products: `t = 2(qv × v)`, `v' = v + s·t + qv × t`.
#[inline]
pub(crate) fn rotate<S: Real, Q: QuaternionRead<S>>(q: &Q, conj: bool, v: Vec3<S>) -> Vec3<S> {
    let qv = if conj { -q.vector_part() } else { q.vector_part() };
    let t = qv.cross(v) * S::TWO;
    v + t * q.s() + qv.cross(t)
}

impl<S: Real> Quaternion<S> {
    /// Normalizing constructor.
    pub fn new(x: S, y: S, z: S, s: S) -> Self {
        let mut q = Self::new_unchecked(x, y, z, s);
        q.normalize();
        q
    }

    #[inline]
    pub fn new_unchecked(x: S, y: S, z: S, s: S) -> Self {
        Self { x, y, z, s }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new_unchecked(S::ZERO, S::ZERO, S::ZERO, S::ONE)
    }

    #[inline]
    pub fn nan() -> Self {
        Self::new_unchecked(S::NAN, S::NAN, S::NAN, S::NAN)
    }

    /// From `[x, y, z, s]`, normalized.
    pub fn from_array(a: [S; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    pub fn from_matrix<M: Matrix3Read<S>>(m: &M) -> Self {
        conversion::quaternion_from_matrix(m)
    }

    pub fn from_axis_angle(aa: &AxisAngle<S>) -> Self {
        conversion::quaternion_from_axis_angle(aa.axis, aa.angle)
    }

    pub fn from_rotation_vector(v: Vec3<S>) -> Self {
        conversion::quaternion_from_rotation_vector(v)
    }

    pub fn from_yaw_pitch_roll(yaw: S, pitch: S, roll: S) -> Self {
        conversion::quaternion_from_yaw_pitch_roll(yaw, pitch, roll)
    }

    /// Rotation about Z.
    pub fn from_yaw(angle: S) -> Self {
        let (sin, cos) = (angle * S::HALF).sin_cos();
        Self::new_unchecked(S::ZERO, S::ZERO, sin, cos)
    }

    /// Rotation about Y.
    pub fn from_pitch(angle: S) -> Self {
        let (sin, cos) = (angle * S::HALF).sin_cos();
        Self::new_unchecked(S::ZERO, sin, S::ZERO, cos)
    }

    /// Rotation about X.
    pub fn from_roll(angle: S) -> Self {
        let (sin, cos) = (angle * S::HALF).sin_cos();
        Self::new_unchecked(sin, S::ZERO, S::ZERO, cos)
    }

    pub fn from_orientation<O: Orientation<S>>(o: &O) -> Self {
        o.to_quaternion()
    }

    /// Sets and normalizes.
    pub fn set(&mut self, x: S, y: S, z: S, s: S) {
        *self = Self::new(x, y, z, s);
    }

    /// Stores the raw components; the result may be non-unit.
    #[inline]
    pub fn set_unchecked(&mut self, x: S, y: S, z: S, s: S) {
        *self = Self::new_unchecked(x, y, z, s);
    }

    pub fn set_from<Q: QuaternionRead<S>>(&mut self, other: &Q) {
        self.set(other.x(), other.y(), other.z(), other.s());
    }

    pub fn set_from_array(&mut self, a: &[S; 4]) {
        *self = Self::from_array(*a);
    }

    pub fn set_from_matrix<M: Matrix3Read<S>>(&mut self, m: &M) {
        *self = Self::from_matrix(m);
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

    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    pub fn set_to_nan(&mut self) {
        *self = Self::nan();
    }

    pub fn yaw(&self) -> S {
        self.to_yaw_pitch_roll().yaw
    }

    pub fn pitch(&self) -> S {
        self.to_yaw_pitch_roll().pitch
    }

    pub fn roll(&self) -> S {
        self.to_yaw_pitch_roll().roll
    }

    /// Scales to unit norm.
    ///
    /// NaN components are left as they are and the zero quaternion becomes
    /// the identity. Near unit norm the Padé estimate `2/(1+n²)` replaces
    /// the square root.
    pub fn normalize(&mut self) {
        if self.contains_nan() {
            return;
        }
        let n2 = self.norm_sq();
        if n2 == S::ZERO {
            tracing::debug!("normalizing a zero quaternion, resetting to identity");
            *self = Self::identity();
            return;
        }
        let inv = if (S::ONE - n2).abs() < S::QUAT_NORM_FAST_BAND {
            S::TWO / (S::ONE + n2)
        } else {
            n2.sqrt().recip()
        };
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
        self.s *= inv;
    }

    /// Normalizes and picks the sign with `s >= 0`, so the rotation angle
    /// lies in `[0, π]`.
    pub fn normalize_and_limit_to_pi(&mut self) {
        self.normalize();
        if self.s < S::ZERO {
            self.negate();
        }
    }

    pub fn conjugate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
        self.z = -self.z;
    }

    /// Flips every component; the rotation is unchanged.
    pub fn negate(&mut self) {
        *self = Self::new_unchecked(-self.x, -self.y, -self.z, -self.s);
    }

    /// Inverse rotation: the conjugate after normalizing.
    pub fn invert(&mut self) {
        self.normalize();
        self.conjugate();
    }

    /// Hamilton product of `self` and `other` in either order, normalized
    /// back into `self`.
    fn compose<O: QuaternionRead<S>>(&mut self, other: &O, other_first: bool, conj_this: bool, conj_other: bool) {
        let q = if other_first {
            hamilton(other, conj_other, &*self, conj_this)
        } else {
            hamilton(&*self, conj_this, other, conj_other)
        };
        self.set_from(&q);
    }

    /// `self ← self·q`
    pub fn multiply<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), false, false, false);
    }

    /// `self ← self̄·q`
    pub fn multiply_conjugate_this<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), false, true, false);
    }

    /// `self ← self·q̄`
    pub fn multiply_conjugate_other<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), false, false, true);
    }

    /// `self ← q·self`
    pub fn pre_multiply<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), true, false, false);
    }

    /// `self ← q·self̄`
    pub fn pre_multiply_conjugate_this<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), true, true, false);
    }

    /// `self ← q̄·self`
    pub fn pre_multiply_conjugate_other<O: Orientation<S>>(&mut self, other: &O) {
        self.compose(&other.to_quaternion(), true, false, true);
    }

    /// `self ← self·quat(m)` for any matrix holding a rotation. The matrix
    /// is converted inline and not validated.
    pub fn multiply_matrix<M: Matrix3Read<S>>(&mut self, m: &M) {
        self.compose(&conversion::quaternion_from_matrix(m), false, false, false);
    }

    /// `self ← quat(m)·self`
    pub fn pre_multiply_matrix<M: Matrix3Read<S>>(&mut self, m: &M) {
        self.compose(&conversion::quaternion_from_matrix(m), true, false, false);
    }

    /// Rotates about the local Z axis: `self ← self·Qz(angle)`.
    pub fn append_yaw(&mut self, angle: S) {
        self.compose(&Self::from_yaw(angle), false, false, false);
    }

    pub fn append_pitch(&mut self, angle: S) {
        self.compose(&Self::from_pitch(angle), false, false, false);
    }

    pub fn append_roll(&mut self, angle: S) {
        self.compose(&Self::from_roll(angle), false, false, false);
    }

    /// Rotates about the world Z axis: `self ← Qz(angle)·self`.
    pub fn prepend_yaw(&mut self, angle: S) {
        self.compose(&Self::from_yaw(angle), true, false, false);
    }

    pub fn prepend_pitch(&mut self, angle: S) {
        self.compose(&Self::from_pitch(angle), true, false, false);
    }

    pub fn prepend_roll(&mut self, angle: S) {
        self.compose(&Self::from_roll(angle), true, false, false);
    }

    /// Shortest-arc interpolation from `q0` (alpha = 0) to `qf` (alpha = 1).
    ///
    /// The relative rotation `q̄0·qf` is scaled in angle by `alpha` and
    /// composed back onto `q0`.
    pub fn interpolate<A: QuaternionRead<S>, B: QuaternionRead<S>>(&mut self, q0: &A, qf: &B, alpha: S) {
        let mut qf = Self::new_unchecked(qf.x(), qf.y(), qf.z(), qf.s());
        if q0.dot(&qf) < S::ZERO {
            qf.negate();
        }
        let diff = hamilton(q0, true, &qf, false);
        let aa = conversion::axis_angle_from_quaternion(&diff);
        let scaled = conversion::quaternion_from_axis_angle(aa.axis, aa.angle * alpha);
        self.set_from(&hamilton(q0, false, &scaled, false));
    }

    /// Pushes this quaternion through an external transform: `self ← T·self`.
    pub fn apply_transform<T: Transform<S>>(&mut self, t: &T) {
        t.apply_to_quaternion(self);
    }

    pub fn apply_inverse_transform<T: Transform<S>>(&mut self, t: &T) {
        t.apply_inverse_to_quaternion(self);
    }

    /// Writes `[x, y, z, s]` as a column starting at `(start_row, col)`.
    pub fn write_to_dense<D: DenseMatrix<S>>(&self, start_row: usize, col: usize, dense: &mut D) -> Result<()> {
        check_block(&*dense, start_row, col, 4, 1)?;
        for (i, v) in self.to_array().into_iter().enumerate() {
            dense.set_entry(start_row + i, col, v);
        }
        Ok(())
    }

    /// Reads a column `[x, y, z, s]` and normalizes it.
    pub fn read_from_dense<D: DenseMatrix<S>>(&mut self, start_row: usize, col: usize, dense: &D) -> Result<()> {
        check_block(dense, start_row, col, 4, 1)?;
        let a: [S; 4] = core::array::from_fn(|i| dense.entry(start_row + i, col));
        self.set_from_array(&a);
        Ok(())
    }
}

impl<S: Real> QuaternionRead<S> for Quaternion<S> {
    #[inline] fn x(&self) -> S { self.x }
    #[inline] fn y(&self) -> S { self.y }
    #[inline] fn z(&self) -> S { self.z }
    #[inline] fn s(&self) -> S { self.s }
}

impl<S: Real> Orientation<S> for Quaternion<S> {
    fn to_rotation_mat3(&self) -> Mat3<S> {
        conversion::matrix_from_quaternion(self)
    }

    fn to_quaternion(&self) -> Quaternion<S> {
        let mut q = *self;
        q.normalize();
        q
    }
}

impl<S: Real> Transform<S> for Quaternion<S> {
    fn apply_to_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        self.transform_matrix(m);
        Ok(())
    }

    fn apply_inverse_to_matrix(&self, m: &mut Mat3<S>) -> Result<()> {
        self.inverse_transform_matrix(m);
        Ok(())
    }

    fn apply_to_orientation(&self, m: &mut Mat3<S>) -> Result<()> {
        *m = matrix_tools::multiply_raw(&self.to_matrix(), false, &*m, false);
        Ok(())
    }

    fn apply_inverse_to_orientation(&self, m: &mut Mat3<S>) -> Result<()> {
        *m = matrix_tools::multiply_raw(&self.to_matrix(), true, &*m, false);
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
        self.inverse_transform(t);
        Ok(())
    }
}

impl<S: Real> Default for Quaternion<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Real> From<AxisAngle<S>> for Quaternion<S> {
    fn from(aa: AxisAngle<S>) -> Self {
        Self::from_axis_angle(&aa)
    }
}

impl<S: Real> core::fmt::Display for Quaternion<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.s)
    }
}
