//! Allocation-free 3x3 primitives shared by every matrix type.
//!
//! Each function reads all of its operands into locals before building the
//! result, so the in-place methods on [`Mat3`], `RotationMatrix` and
//! `RotationScaleMatrix` can hand their own storage in as an operand and
//! overwrite it afterwards. The out-parameter functions here cannot alias
//! under the borrow rules; use the in-place methods for that.

use crate::error::{Error, Result};
use crate::{Mat3, Matrix3Read, Real, Vec3};

/// How an operand enters a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    AsIs,
    Transposed,
    Inverted,
}

#[inline]
fn transposed<S: Copy>(a: [S; 9]) -> [S; 9] {
    [a[0], a[3], a[6], a[1], a[4], a[7], a[2], a[5], a[8]]
}

/// `op(a)·op(b)` where `op` optionally transposes. Every other product in
/// the crate reduces to this one.
#[inline]
pub fn multiply_raw<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(
    a: &A,
    transpose_a: bool,
    b: &B,
    transpose_b: bool,
) -> Mat3<S> {
    let a = if transpose_a { transposed(a.to_array()) } else { a.to_array() };
    let b = if transpose_b { transposed(b.to_array()) } else { b.to_array() };
    let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = a;
    let [b00, b01, b02, b10, b11, b12, b20, b21, b22] = b;
    Mat3::new(
        a00 * b00 + a01 * b10 + a02 * b20,
        a00 * b01 + a01 * b11 + a02 * b21,
        a00 * b02 + a01 * b12 + a02 * b22,
        a10 * b00 + a11 * b10 + a12 * b20,
        a10 * b01 + a11 * b11 + a12 * b21,
        a10 * b02 + a11 * b12 + a12 * b22,
        a20 * b00 + a21 * b10 + a22 * b20,
        a20 * b01 + a21 * b11 + a22 * b21,
        a20 * b02 + a21 * b12 + a22 * b22,
    )
}

/// Turns an operand mode into a matrix plus a transpose flag. Inverting a
/// rotation becomes a transpose; inverting anything else costs a real
/// inverse and may fail.
#[inline]
fn resolve<S: Real, A: Matrix3Read<S>>(a: &A, op: Operand) -> Result<(Mat3<S>, bool)> {
    match op {
        Operand::AsIs => Ok((a.to_mat3(), false)),
        Operand::Transposed => Ok((a.to_mat3(), true)),
        Operand::Inverted if A::IS_ROTATION => Ok((a.to_mat3(), true)),
        Operand::Inverted => inverse(a).map(|m| (m, false)).ok_or(Error::SingularMatrix),
    }
}

/// `op_a(a)·op_b(b)`
pub fn product<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(
    a: &A,
    op_a: Operand,
    b: &B,
    op_b: Operand,
) -> Result<Mat3<S>> {
    let (ma, ta) = resolve(a, op_a)?;
    let (mb, tb) = resolve(b, op_b)?;
    Ok(multiply_raw(&ma, ta, &mb, tb))
}

/// Adjugate over determinant, or `None` when `|det|` is at or below
/// [`Real::SINGULAR_EPS`].
pub fn inverse<S: Real, M: Matrix3Read<S>>(m: &M) -> Option<Mat3<S>> {
    let [m00, m01, m02, m10, m11, m12, m20, m21, m22] = m.to_array();
    let det = m.determinant();
    if det.abs() <= S::SINGULAR_EPS {
        tracing::debug!(det = det.to_f64(), "matrix is singular, not inverting");
        return None;
    }
    let inv_det = det.recip();
    Some(Mat3::new(
        (m11 * m22 - m12 * m21) * inv_det,
        (m02 * m21 - m01 * m22) * inv_det,
        (m01 * m12 - m02 * m11) * inv_det,
        (m12 * m20 - m10 * m22) * inv_det,
        (m00 * m22 - m02 * m20) * inv_det,
        (m02 * m10 - m00 * m12) * inv_det,
        (m10 * m21 - m11 * m20) * inv_det,
        (m01 * m20 - m00 * m21) * inv_det,
        (m00 * m11 - m01 * m10) * inv_det,
    ))
}

/// `out ← m⁻¹`. Returns `false` and leaves `out` untouched when `m` is singular.
pub fn invert<S: Real, M: Matrix3Read<S>>(m: &M, out: &mut Mat3<S>) -> bool {
    match inverse(m) {
        Some(inv) => {
            *out = inv;
            true
        }
        None => false,
    }
}

/// `out ← m⁻¹`, failing with [`Error::SingularMatrix`] when `m` is singular.
pub fn invert_or_err<S: Real, M: Matrix3Read<S>>(m: &M, out: &mut Mat3<S>) -> Result<()> {
    *out = inverse(m).ok_or(Error::SingularMatrix)?;
    Ok(())
}

/// `out ← a·b`
pub fn multiply<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) {
    *out = multiply_raw(a, false, b, false);
}

/// `out ← aᵗ·b`
pub fn multiply_transpose_left<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) {
    *out = multiply_raw(a, true, b, false);
}

/// `out ← a·bᵗ`
pub fn multiply_transpose_right<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) {
    *out = multiply_raw(a, false, b, true);
}

/// `out ← aᵗ·bᵗ`
pub fn multiply_transpose_both<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) {
    *out = multiply_raw(a, true, b, true);
}

/// `out ← a⁻¹·b`
pub fn multiply_invert_left<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) -> Result<()> {
    *out = product(a, Operand::Inverted, b, Operand::AsIs)?;
    Ok(())
}

/// `out ← a·b⁻¹`
pub fn multiply_invert_right<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) -> Result<()> {
    *out = product(a, Operand::AsIs, b, Operand::Inverted)?;
    Ok(())
}

/// `out ← a⁻¹·b⁻¹`
pub fn multiply_invert_both<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, out: &mut Mat3<S>) -> Result<()> {
    *out = product(a, Operand::Inverted, b, Operand::Inverted)?;
    Ok(())
}

/// `out ← aᵗ·b⁻¹`
pub fn multiply_transpose_left_invert_right<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(
    a: &A,
    b: &B,
    out: &mut Mat3<S>,
) -> Result<()> {
    *out = product(a, Operand::Transposed, b, Operand::Inverted)?;
    Ok(())
}

/// `out ← a⁻¹·bᵗ`
pub fn multiply_invert_left_transpose_right<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(
    a: &A,
    b: &B,
    out: &mut Mat3<S>,
) -> Result<()> {
    *out = product(a, Operand::Inverted, b, Operand::Transposed)?;
    Ok(())
}

/// Gram-Schmidt on the rows: row 0 is normalized, row 1 loses its
/// projection on row 0 and is normalized, row 2 is `row0 × row1`. The result
/// is right-handed by construction.
pub fn orthonormalize<S: Real, M: Matrix3Read<S>>(m: &M) -> Result<Mat3<S>> {
    let r0 = Vec3::new(m.m00(), m.m01(), m.m02());
    let r1 = Vec3::new(m.m10(), m.m11(), m.m12());

    let n0 = r0.norm();
    if n0.is_nan() || n0 <= S::NORMALIZE_EPS {
        tracing::debug!(norm = n0.to_f64(), "orthonormalize: row 0 collapsed");
        return Err(Error::NotARotationMatrix);
    }
    let x = r0 / n0;

    let r1 = r1 - x * x.dot(r1);
    let n1 = r1.norm();
    if n1.is_nan() || n1 <= S::NORMALIZE_EPS {
        tracing::debug!(norm = n1.to_f64(), "orthonormalize: row 1 collapsed");
        return Err(Error::NotARotationMatrix);
    }
    let y = r1 / n1;

    Ok(Mat3::from_rows(x, y, x.cross(y)))
}

/// Element-wise `a + alpha·(b - a)`.
pub fn lerp<S: Real, A: Matrix3Read<S>, B: Matrix3Read<S>>(a: &A, b: &B, alpha: S) -> Mat3<S> {
    let a = a.to_array();
    let b = b.to_array();
    let mut out = [S::ZERO; 9];
    for i in 0..9 {
        out[i] = a[i] + alpha * (b[i] - a[i]);
    }
    Mat3::from_array(out)
}
