//! Interop with external dense matrix buffers.
//!
//! The kernel never stores data in these buffers; they are only an exchange
//! format, read from or written to at a row/column offset.

use crate::error::{Error, Result};

/// A row-by-column numeric buffer owned outside the kernel.
pub trait DenseMatrix<S> {
    fn num_rows(&self) -> usize;
    fn num_cols(&self) -> usize;
    /// Entry at `(row, col)`. Callers have already bounds-checked.
    fn entry(&self, row: usize, col: usize) -> S;
    fn set_entry(&mut self, row: usize, col: usize, value: S);
}

impl<S: Copy, const R: usize, const C: usize> DenseMatrix<S> for [[S; C]; R] {
    #[inline]
    fn num_rows(&self) -> usize { R }
    #[inline]
    fn num_cols(&self) -> usize { C }
    #[inline]
    fn entry(&self, row: usize, col: usize) -> S { self[row][col] }
    #[inline]
    fn set_entry(&mut self, row: usize, col: usize, value: S) { self[row][col] = value; }
}

/// Fails with [`Error::DenseOutOfRange`] unless a `needed_rows x needed_cols`
/// block fits at `(start_row, start_col)`.
pub(crate) fn check_block<S, D: DenseMatrix<S>>(
    dense: &D,
    start_row: usize,
    start_col: usize,
    needed_rows: usize,
    needed_cols: usize,
) -> Result<()> {
    let (rows, cols) = (dense.num_rows(), dense.num_cols());
    let fits = start_row
        .checked_add(needed_rows)
        .is_some_and(|end| end <= rows)
        && start_col.checked_add(needed_cols).is_some_and(|end| end <= cols);
    if fits {
        Ok(())
    } else {
        Err(Error::DenseOutOfRange { rows, cols, start_row, start_col, needed_rows, needed_cols })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_fits() {
        let buf = [[0.0_f64; 4]; 5];
        assert!(check_block(&buf, 0, 0, 3, 3).is_ok());
        assert!(check_block(&buf, 2, 1, 3, 3).is_ok());
        assert!(check_block(&buf, 3, 0, 3, 3).is_err());
        assert!(check_block(&buf, 0, 2, 3, 3).is_err());
        assert!(check_block(&buf, usize::MAX, 0, 3, 3).is_err());
    }
}
