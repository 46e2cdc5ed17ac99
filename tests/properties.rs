//! Randomized algebraic properties of the rotation kernel.
//!
//! Every test draws from a seeded `StdRng` so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tang_rotation::{
    AxisAngle, Error, Mat3, Matrix3Read, Matrix3Write, Quaternion, QuaternionRead, RotationMatrix,
    RotationScaleMatrix, Vec3,
};

const SAMPLES: usize = 200;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn random_vec3(rng: &mut StdRng, range: f64) -> Vec3<f64> {
    Vec3::new(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

/// Well-conditioned general matrix: a random rotation times a scale in
/// [0.5, 3) times another rotation.
fn random_invertible(rng: &mut StdRng) -> Mat3<f64> {
    let a = random_rotation(rng).to_mat3();
    let b = random_rotation(rng).to_mat3();
    let d = Mat3::diagonal(Vec3::new(
        rng.gen_range(0.5..3.0),
        rng.gen_range(0.5..3.0),
        rng.gen_range(0.5..3.0),
    ));
    a * d * b
}

fn random_matrix(rng: &mut StdRng) -> Mat3<f64> {
    Mat3::from_array(core::array::from_fn(|_| rng.gen_range(-10.0..10.0)))
}

fn random_quaternion(rng: &mut StdRng) -> Quaternion<f64> {
    loop {
        let a: [f64; 4] = core::array::from_fn(|_| rng.gen_range(-1.0..1.0));
        if a.iter().map(|v| v * v).sum::<f64>() > 1e-3 {
            return Quaternion::from_array(a);
        }
    }
}

fn random_rotation(rng: &mut StdRng) -> RotationMatrix<f64> {
    RotationMatrix::from_quaternion(&random_quaternion(rng))
}

#[test]
fn inverse_roundtrips() {
    let mut rng = rng(1);
    for _ in 0..SAMPLES {
        let m = random_invertible(&mut rng);
        let mut inv = m;
        inv.invert().unwrap();
        assert!((m * inv).is_identity(1e-10), "{m:?}");
        let mut back = inv;
        back.invert().unwrap();
        assert!(back.epsilon_equals(&m, 1e-9));
    }
}

#[test]
fn rotation_orthonormality() {
    let mut rng = rng(2);
    for _ in 0..SAMPLES {
        let r = random_rotation(&mut rng);
        let m = r.to_mat3();
        assert!((m * m.transpose()).is_identity(1e-12));
        assert!((r.determinant() - 1.0).abs() < 1e-12);
        let mut inv = r;
        inv.invert();
        let general = m.try_inverse().unwrap();
        assert!(inv.epsilon_equals(&general, 1e-12));
        assert!(inv.epsilon_equals(&m.transpose(), 0.0));
    }
}

#[test]
fn normalize_is_idempotent_and_orthonormal() {
    let mut rng = rng(3);
    for _ in 0..SAMPLES {
        let r = random_rotation(&mut rng).to_mat3();
        let mut n = r;
        n.normalize().unwrap();
        assert!(n.epsilon_equals(&r, 1e-12));

        let mut m = random_matrix(&mut rng);
        if m.normalize().is_ok() {
            assert!(m.is_rotation_matrix(1e-12));
            let t = m.transpose();
            assert!(t.is_rotation_matrix(1e-12));
        }
    }
}

#[test]
fn quaternion_matrix_roundtrip() {
    let mut rng = rng(4);
    for _ in 0..SAMPLES {
        let q = random_quaternion(&mut rng);
        let back = Quaternion::from_matrix(&q.to_matrix());
        assert!(back.geometrically_equals(&q, 1e-10));
        let same_sign = back.epsilon_equals(&q, 1e-10);
        let mut neg = q;
        neg.negate();
        assert!(same_sign || back.epsilon_equals(&neg, 1e-10));
    }
}

#[test]
fn quaternion_axis_angle_roundtrip() {
    let mut rng = rng(5);
    for _ in 0..SAMPLES {
        let q = random_quaternion(&mut rng);
        let aa = q.to_axis_angle();
        assert!((aa.axis.norm() - 1.0).abs() < 1e-12);
        let back = Quaternion::from_axis_angle(&aa);
        assert!(back.epsilon_equals(&q, 1e-12));
    }
}

#[test]
fn identity_is_neutral() {
    let mut rng = rng(6);
    for _ in 0..SAMPLES {
        let m = random_matrix(&mut rng);
        let mut p = m;
        p.multiply(&Mat3::identity());
        assert_eq!(p, m);

        let q = random_quaternion(&mut rng);
        let mut p = q;
        p.multiply(&Quaternion::identity());
        assert!(p.epsilon_equals(&q, 1e-15));
    }
}

#[test]
fn quaternion_interpolation() {
    let mut rng = rng(7);
    for _ in 0..SAMPLES {
        let q0 = random_quaternion(&mut rng);
        let qf = random_quaternion(&mut rng);
        let alpha = rng.gen_range(0.0..1.0);
        let mut out = Quaternion::identity();

        out.interpolate(&q0, &q0, alpha);
        assert!(out.geometrically_equals(&q0, 1e-7));

        out.interpolate(&q0, &qf, 0.0);
        assert!(out.geometrically_equals(&q0, 1e-10));

        out.interpolate(&q0, &qf, 1.0);
        assert!(out.geometrically_equals(&qf, 1e-10));

        // the path never leaves the shorter arc
        out.interpolate(&q0, &qf, alpha);
        let total = q0.distance(&qf);
        assert!((q0.distance(&out) - alpha * total).abs() < 1e-9);
    }
}

#[test]
fn rotation_scale_decomposition() {
    let mut rng = rng(8);
    for _ in 0..SAMPLES {
        let r = random_rotation(&mut rng);
        let scale = Vec3::new(
            rng.gen_range(0.1..5.0),
            rng.gen_range(0.1..5.0),
            rng.gen_range(0.1..5.0),
        );
        let composite = r.to_mat3() * Mat3::diagonal(scale);
        let rs = RotationScaleMatrix::from_matrix(&composite).unwrap();
        assert!((rs.scale_factors() - scale).norm() < 1e-10);
        assert!(rs.rotation().epsilon_equals(&r, 1e-10));

        let mut mirrored = scale;
        mirrored.y = -mirrored.y;
        let bad = r.to_mat3() * Mat3::diagonal(mirrored);
        assert_eq!(RotationScaleMatrix::from_matrix(&bad), Err(Error::NotARotationScaleMatrix));
        let mut rs = rs;
        assert_eq!(rs.set_scale(mirrored), Err(Error::NotARotationScaleMatrix));
    }
}

#[test]
fn rotation_validation_never_commits_garbage() {
    let mut rng = rng(9);
    for _ in 0..SAMPLES {
        let r = random_rotation(&mut rng);
        let mut target = r;
        let m = random_matrix(&mut rng);
        if target.set_from(&m).is_err() {
            assert_eq!(target, r);
        } else {
            assert!(target.is_rotation_matrix(1e-7));
        }
    }
}

#[test]
fn transforms_agree_across_representations() {
    let mut rng = rng(10);
    for _ in 0..SAMPLES {
        let q = random_quaternion(&mut rng);
        let r = RotationMatrix::from_quaternion(&q);
        let aa: AxisAngle<f64> = q.to_axis_angle();
        let v = random_vec3(&mut rng, 10.0);

        let (mut a, mut b, mut c) = (v, v, v);
        q.transform(&mut a);
        r.transform(&mut b);
        RotationMatrix::from_axis_angle(&aa).transform(&mut c);
        assert!((a - b).norm() < 1e-10);
        assert!((a - c).norm() < 1e-10);

        q.inverse_transform(&mut a);
        assert!((a - v).norm() < 1e-10);
    }
}

#[test]
fn aliasing_products_match_copies() {
    let mut rng = rng(11);
    for _ in 0..SAMPLES {
        let a = random_matrix(&mut rng);

        let mut m = a;
        let copy = m;
        m.multiply_transpose_other(&copy);
        assert_eq!(m, a * a.transpose());

        let mut m = a;
        let copy = m;
        m.pre_multiply_transpose_other(&copy);
        assert_eq!(m, a.transpose() * a);
    }
}
