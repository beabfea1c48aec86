//! Column-major addressing shared by every view.
//!
//! Uses column-major (Fortran) order to match LAPACK and faer: element
//! `(row, col)` of an `nrow x ncol` matrix lives at `row + col * nrow`.

use crate::error::MatrixError;

/// Flat offset of `(row, col)` in a column-major buffer with leading dimension `nrow`.
///
/// # Examples
///
/// ```
/// use ndmatrix::layout::offset;
///
/// assert_eq!(offset(0, 0, 3), 0);
/// assert_eq!(offset(2, 0, 3), 2);
/// assert_eq!(offset(1, 2, 3), 7);
/// ```
#[inline]
pub fn offset(row: usize, col: usize, nrow: usize) -> usize {
    row + col * nrow
}

/// Inverse of [`offset`].
#[inline]
pub fn coordinates(offset: usize, nrow: usize) -> (usize, usize) {
    (offset % nrow, offset / nrow)
}

/// Bounds-check `(row, col)` and return its flat offset.
///
/// # Errors
///
/// Returns `MatrixError::IndexOutOfRange` if either coordinate is out of bounds.
#[inline]
pub fn checked_offset(
    row: usize,
    col: usize,
    nrow: usize,
    ncol: usize,
) -> Result<usize, MatrixError> {
    if row >= nrow || col >= ncol {
        return Err(MatrixError::IndexOutOfRange {
            row,
            col,
            nrow,
            ncol,
        });
    }
    Ok(offset(row, col, nrow))
}
