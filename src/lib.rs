//! tang-rotation: 3D rotation algebra
//!
//! General 3x3 matrices, proper rotation matrices, rotation-scale
//! composites and unit quaternions, with conversions to and from
//! axis-angle, rotation-vector and yaw-pitch-roll forms.
//!
//! # Design principles
//! - Generic over a `Real` scalar (f32, f64) carrying its own tolerances
//! - `#[repr(C)]` value types, no heap allocation anywhere
//! - Every mutator works in place and tolerates aliasing with its operands
//! - Invariant-bearing types validate a staged copy before committing
//! - Read-only and mutable capabilities are separate traits

#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod scalar;
mod tolerance;
mod error;
mod tuple;
mod vec2;
mod vec3;
mod vec4;
mod point2;
mod point3;
mod traits;
mod dense;
mod mat3;
mod quat;
mod axis_angle;
mod yaw_pitch_roll;
mod rotation;
mod rotation_scale;

pub mod conversion;
pub mod matrix_tools;

pub use scalar::Scalar;
pub use tolerance::Real;
pub use error::{Error, Result};
pub use tuple::{Tuple2, Tuple3};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use point2::Point2;
pub use point3::Point3;
pub use traits::{Matrix3Read, Matrix3Write, Orientation, QuaternionRead, Transform};
pub use dense::DenseMatrix;
pub use mat3::Mat3;
pub use quat::Quaternion;
pub use axis_angle::AxisAngle;
pub use yaw_pitch_roll::YawPitchRoll;
pub use rotation::RotationMatrix;
pub use rotation_scale::{check_if_scales_proper, RotationScaleMatrix};

/// Cross-product matrix [v]× such that [v]× w = v × w
pub fn skew<S: Real>(v: &Vec3<S>) -> Mat3<S> {
    Mat3::tilde(*v)
}

// Bytemuck impls for concrete f32/f64 types (generic structs can't derive Pod)
#[cfg(feature = "bytemuck")]
mod bytemuck_impls {
    use super::*;

    macro_rules! impl_pod {
        ($t:ty) => {
            // SAFETY: All fields are the same float type, #[repr(C)], no padding
            unsafe impl bytemuck::Zeroable for $t {}
            unsafe impl bytemuck::Pod for $t {}
        };
    }

    impl_pod!(Vec2<f32>);
    impl_pod!(Vec2<f64>);
    impl_pod!(Vec3<f32>);
    impl_pod!(Vec3<f64>);
    impl_pod!(Vec4<f32>);
    impl_pod!(Vec4<f64>);
    impl_pod!(Point2<f32>);
    impl_pod!(Point2<f64>);
    impl_pod!(Point3<f32>);
    impl_pod!(Point3<f64>);
    impl_pod!(Mat3<f32>);
    impl_pod!(Mat3<f64>);
    impl_pod!(Quaternion<f32>);
    impl_pod!(Quaternion<f64>);
}
