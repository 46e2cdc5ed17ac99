//! Error type for the rotation kernel.

/// Every failure the kernel reports.
///
/// All variants describe caller or data errors. Nothing is retried
/// internally and no variant carries heap data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The determinant is too close to zero for the matrix to be inverted.
    #[error("matrix is singular")]
    SingularMatrix,
    /// Rows or columns are not orthonormal, or the determinant is not +1.
    #[error("matrix is not a proper rotation matrix")]
    NotARotationMatrix,
    /// The matrix is not a rotation times a non-negative diagonal scale, or a
    /// scale factor is negative.
    #[error("matrix is not a rotation-scale matrix")]
    NotARotationScaleMatrix,
    /// A 2D operation was requested on a matrix or quaternion that is not
    /// confined to the XY plane.
    #[error("matrix is not confined to the XY plane")]
    NotPlanar,
    /// Matrix row or column selector outside `0..=2`.
    #[error("row or column index {index} is out of bounds (expected 0..=2)")]
    RowOrColumnOutOfBounds { index: usize },
    /// Tuple component selector outside the tuple's dimension.
    #[error("component index {index} is out of bounds (expected 0..{len})")]
    ComponentOutOfBounds { index: usize, len: usize },
    /// A dense buffer does not hold enough rows or columns past the offset.
    #[error(
        "dense buffer of {rows}x{cols} cannot hold a {needed_rows}x{needed_cols} block at ({start_row}, {start_col})"
    )]
    DenseOutOfRange {
        rows: usize,
        cols: usize,
        start_row: usize,
        start_col: usize,
        needed_rows: usize,
        needed_cols: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Fails with [`Error::RowOrColumnOutOfBounds`] unless `index` selects a row
/// or column of a 3x3 matrix.
#[inline]
pub(crate) fn check_index(index: usize) -> Result<()> {
    if index < 3 {
        Ok(())
    } else {
        Err(Error::RowOrColumnOutOfBounds { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_check() {
        assert!(check_index(0).is_ok());
        assert!(check_index(2).is_ok());
        assert_eq!(check_index(3), Err(Error::RowOrColumnOutOfBounds { index: 3 }));
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_messages() {
        use std::string::ToString;
        assert_eq!(Error::SingularMatrix.to_string(), "matrix is singular");
        assert_eq!(
            Error::ComponentOutOfBounds { index: 4, len: 4 }.to_string(),
            "component index 4 is out of bounds (expected 0..4)"
        );
    }
}
