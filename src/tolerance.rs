use crate::Scalar;

/// Scalar carrying the numerical tolerances the rotation kernel checks against.
///
/// Every threshold is a compile-time constant tied to the precision of the
/// scalar; nothing here is mutable at runtime.
pub trait Real: Scalar {
    /// `|det|` at or below this value makes a matrix non-invertible.
    const SINGULAR_EPS: Self;
    /// Tolerance of the orthonormality and `det = +1` checks.
    const ROTATION_EPS: Self;
    /// Tolerance of the "confined to the XY plane" checks.
    const PLANAR_EPS: Self;
    /// Shortest row or axis accepted before normalizing it.
    const NORMALIZE_EPS: Self;
    /// Half-width of the band around 1 where a squared quaternion norm is
    /// normalized with the Padé estimate `1/sqrt(n) ~ 2/(1+n)`.
    const QUAT_NORM_FAST_BAND: Self;
}

impl Real for f64 {
    const SINGULAR_EPS: Self = 1.0e-16;
    const ROTATION_EPS: Self = 1.0e-7;
    const PLANAR_EPS: Self = 1.0e-8;
    const NORMALIZE_EPS: Self = 1.0e-12;
    const QUAT_NORM_FAST_BAND: Self = 2.107342e-8;
}

impl Real for f32 {
    const SINGULAR_EPS: Self = 1.0e-10;
    const ROTATION_EPS: Self = 1.0e-4;
    const PLANAR_EPS: Self = 1.0e-5;
    const NORMALIZE_EPS: Self = 1.0e-6;
    const QUAT_NORM_FAST_BAND: Self = 1.0e-6;
}
