use crate::{conversion, Mat3, Orientation, Quaternion, Real};

/// Aerospace Euler angles, applied as `Rz(yaw)·Ry(pitch)·Rx(roll)`.
/// Singular at `pitch = ±π/2`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YawPitchRoll<S> {
    pub yaw: S,
    pub pitch: S,
    pub roll: S,
}

impl<S: Real> YawPitchRoll<S> {
    #[inline]
    pub fn new(yaw: S, pitch: S, roll: S) -> Self {
        Self { yaw, pitch, roll }
    }

    #[inline]
    pub fn nan() -> Self {
        Self::new(S::NAN, S::NAN, S::NAN)
    }

    pub fn contains_nan(&self) -> bool {
        self.yaw.is_nan() || self.pitch.is_nan() || self.roll.is_nan()
    }

    pub fn to_matrix(&self) -> Mat3<S> {
        conversion::matrix_from_yaw_pitch_roll(self.yaw, self.pitch, self.roll)
    }
}

impl<S: Real> Orientation<S> for YawPitchRoll<S> {
    fn to_rotation_mat3(&self) -> Mat3<S> {
        self.to_matrix()
    }

    fn to_quaternion(&self) -> Quaternion<S> {
        conversion::quaternion_from_yaw_pitch_roll(self.yaw, self.pitch, self.roll)
    }
}

impl<S: Real> core::fmt::Display for YawPitchRoll<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "yaw {} pitch {} roll {}", self.yaw, self.pitch, self.roll)
    }
}
