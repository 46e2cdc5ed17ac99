//! Conversions between rotation representations.
//!
//! Every function is total: NaN input yields NaN output, degenerate input
//! (zero-length axis, zero quaternion) yields the identity. Nothing here
//! allocates or fails.
//!
//! Yaw-pitch-roll follows the aerospace convention `R = Rz(yaw)·Ry(pitch)·Rx(roll)`.

use crate::{AxisAngle, Mat3, Matrix3Read, Quaternion, QuaternionRead, Real, Vec3, YawPitchRoll};

/// Shepperd's extraction: picks the largest of `{trace, m00, m11, m22}` so
/// the divisor never approaches zero, then normalizes.
pub fn quaternion_from_matrix<S: Real, M: Matrix3Read<S>>(m: &M) -> Quaternion<S> {
    if m.contains_nan() {
        return Quaternion::nan();
    }
    let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = m.to_array();
    let trace = m00 + m11 + m22;
    let quarter = S::HALF * S::HALF;

    let (x, y, z, s) = if trace >= m00 && trace >= m11 && trace >= m22 {
        let s4 = S::TWO * (S::ONE + trace).sqrt();
        let inv = s4.recip();
        ((m21 - m12) * inv, (m02 - m20) * inv, (m10 - m01) * inv, s4 * quarter)
    } else if m00 >= m11 && m00 >= m22 {
        let s4 = S::TWO * (S::ONE + m00 - m11 - m22).sqrt();
        let inv = s4.recip();
        (s4 * quarter, (m01 + m10) * inv, (m02 + m20) * inv, (m21 - m12) * inv)
    } else if m11 >= m22 {
        let s4 = S::TWO * (S::ONE + m11 - m00 - m22).sqrt();
        let inv = s4.recip();
        ((m01 + m10) * inv, s4 * quarter, (m12 + m21) * inv, (m02 - m20) * inv)
    } else {
        let s4 = S::TWO * (S::ONE + m22 - m00 - m11).sqrt();
        let inv = s4.recip();
        ((m02 + m20) * inv, (m12 + m21) * inv, s4 * quarter, (m10 - m01) * inv)
    };
    Quaternion::new(x, y, z, s)
}

/// Rotation matrix of `q`. The quaternion does not need to be unit length;
/// the zero quaternion maps to the identity.
pub fn matrix_from_quaternion<S: Real, Q: QuaternionRead<S>>(q: &Q) -> Mat3<S> {
    if q.contains_nan() {
        return Mat3::nan();
    }
    let n2 = q.norm_sq();
    if n2 == S::ZERO {
        return Mat3::identity();
    }
    let k = S::TWO / n2;
    let (x, y, z, w) = (q.x(), q.y(), q.z(), q.s());
    let (xx, yy, zz) = (x * x * k, y * y * k, z * z * k);
    let (xy, xz, yz) = (x * y * k, x * z * k, y * z * k);
    let (wx, wy, wz) = (w * x * k, w * y * k, w * z * k);

    Mat3::new(
        S::ONE - (yy + zz), xy - wz,            xz + wy,
        xy + wz,            S::ONE - (xx + zz), yz - wx,
        xz - wy,            yz + wx,            S::ONE - (xx + yy),
    )
}

/// `qs = cos(angle/2)`, `q(xyz) = axis·sin(angle/2)` with the axis normalized
/// first. A zero-length axis gives the identity.
pub fn quaternion_from_axis_angle<S: Real>(axis: Vec3<S>, angle: S) -> Quaternion<S> {
    if axis.contains_nan() || angle.is_nan() {
        return Quaternion::nan();
    }
    let len = axis.norm();
    if len < S::NORMALIZE_EPS {
        return Quaternion::identity();
    }
    let (sin, cos) = (angle * S::HALF).sin_cos();
    let v = axis * (sin / len);
    Quaternion::new_unchecked(v.x, v.y, v.z, cos)
}

/// Angle in `[0, 2π]`. The identity rotation reports angle 0 about the X axis.
pub fn axis_angle_from_quaternion<S: Real, Q: QuaternionRead<S>>(q: &Q) -> AxisAngle<S> {
    if q.contains_nan() {
        return AxisAngle::nan();
    }
    let v = q.vector_part();
    let len = v.norm();
    if len > S::NORMALIZE_EPS {
        AxisAngle::new(v / len, S::TWO * len.atan2(q.s()))
    } else {
        AxisAngle::new(Vec3::unit_x(), S::ZERO)
    }
}

/// Delegates to [`quaternion_from_axis_angle`] with the vector's direction
/// as axis and its length as angle.
pub fn quaternion_from_rotation_vector<S: Real>(v: Vec3<S>) -> Quaternion<S> {
    quaternion_from_axis_angle(v, v.norm())
}

pub fn rotation_vector_from_quaternion<S: Real, Q: QuaternionRead<S>>(q: &Q) -> Vec3<S> {
    if q.contains_nan() {
        return Vec3::nan();
    }
    let v = q.vector_part();
    let len = v.norm();
    if len > S::NORMALIZE_EPS {
        v * (S::TWO * len.atan2(q.s()) / len)
    } else if q.s() != S::ZERO {
        // first order: angle ~ 2|v|/s
        v * (S::TWO / q.s())
    } else {
        Vec3::zero()
    }
}

/// Rodrigues' formula `R = cI + s[u]× + (1-c)·u·uᵗ`.
pub fn matrix_from_axis_angle<S: Real>(axis: Vec3<S>, angle: S) -> Mat3<S> {
    if axis.contains_nan() || angle.is_nan() {
        return Mat3::nan();
    }
    let len = axis.norm();
    if len < S::NORMALIZE_EPS {
        return Mat3::identity();
    }
    let u = axis / len;
    let (s, c) = angle.sin_cos();
    let t = S::ONE - c;

    Mat3::new(
        c + t * u.x * u.x,       t * u.x * u.y - s * u.z, t * u.x * u.z + s * u.y,
        t * u.x * u.y + s * u.z, c + t * u.y * u.y,       t * u.y * u.z - s * u.x,
        t * u.x * u.z - s * u.y, t * u.y * u.z + s * u.x, c + t * u.z * u.z,
    )
}

/// Angle in `[0, π]`; the π branch is resolved by the quaternion extraction.
pub fn axis_angle_from_matrix<S: Real, M: Matrix3Read<S>>(m: &M) -> AxisAngle<S> {
    let mut q = quaternion_from_matrix(m);
    q.normalize_and_limit_to_pi();
    axis_angle_from_quaternion(&q)
}

pub fn matrix_from_rotation_vector<S: Real>(v: Vec3<S>) -> Mat3<S> {
    matrix_from_axis_angle(v, v.norm())
}

/// Norm in `[0, π]`.
pub fn rotation_vector_from_matrix<S: Real, M: Matrix3Read<S>>(m: &M) -> Vec3<S> {
    let mut q = quaternion_from_matrix(m);
    q.normalize_and_limit_to_pi();
    rotation_vector_from_quaternion(&q)
}

/// Expanded `Rz(yaw)·Ry(pitch)·Rx(roll)`, written out entry by entry.
pub fn matrix_from_yaw_pitch_roll<S: Real>(yaw: S, pitch: S, roll: S) -> Mat3<S> {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    let (sr, cr) = roll.sin_cos();

    Mat3::new(
        cy * cp, cy * sp * sr - sy * cr, cy * sp * cr + sy * sr,
        sy * cp, sy * sp * sr + cy * cr, sy * sp * cr - cy * sr,
        -sp,     cp * sr,                cp * cr,
    )
}

pub fn quaternion_from_yaw_pitch_roll<S: Real>(yaw: S, pitch: S, roll: S) -> Quaternion<S> {
    let (sy, cy) = (yaw * S::HALF).sin_cos();
    let (sp, cp) = (pitch * S::HALF).sin_cos();
    let (sr, cr) = (roll * S::HALF).sin_cos();

    Quaternion::new_unchecked(
        cy * cp * sr - sy * sp * cr,
        sy * cp * sr + cy * sp * cr,
        sy * cp * cr - cy * sp * sr,
        cy * cp * cr + sy * sp * sr,
    )
}

/// Pitch in `[-π/2, π/2]`. At gimbal lock the whole in-plane rotation goes
/// into yaw and roll is zero.
pub fn yaw_pitch_roll_from_matrix<S: Real, M: Matrix3Read<S>>(m: &M) -> YawPitchRoll<S> {
    if m.contains_nan() {
        return YawPitchRoll::nan();
    }
    let cos_pitch = (m.m00() * m.m00() + m.m10() * m.m10()).sqrt();
    let pitch = (-m.m20()).atan2(cos_pitch);
    if cos_pitch < S::ROTATION_EPS {
        YawPitchRoll::new((-m.m01()).atan2(m.m11()), pitch, S::ZERO)
    } else {
        YawPitchRoll::new(m.m10().atan2(m.m00()), pitch, m.m21().atan2(m.m22()))
    }
}

pub fn yaw_pitch_roll_from_quaternion<S: Real, Q: QuaternionRead<S>>(q: &Q) -> YawPitchRoll<S> {
    yaw_pitch_roll_from_matrix(&matrix_from_quaternion(q))
}
