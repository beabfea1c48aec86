//! Restoring the structural invariant of a view's implied region.
//!
//! Kernels such as Cholesky factorization write only one triangle and leave
//! the other holding whatever was there before. Normalization rewrites the
//! implied region from the canonical one so that the raw buffer agrees with
//! what [`Matrix::get`] reports:
//!
//! ```text
//! UpperTriangular  a[row, col] = 0                 for row > col
//! LowerTriangular  a[row, col] = 0                 for row < col
//! Hermitian        a[row, col] = conj(a[col, row]) for row > col
//! Dense            nothing to do
//! ```
//!
//! Construction never normalizes implicitly: the buffer may be aliased by a
//! caller who does not expect it to change. Copy first if the source must be
//! preserved.

use tracing::trace;

use crate::kind::Kind;
use crate::layout::offset;
use crate::matrix::Matrix;
use crate::scalar::Scalar;

impl<T: Scalar> Matrix<T> {
    /// Rewrite the implied region in place and return `self` for chaining.
    ///
    /// Writes through the shared storage, so every alias observes the change.
    /// Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmatrix::{Kind, Matrix};
    ///
    /// let dense = Matrix::from_column_major(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let mut upper = dense.copy_as(Kind::UpperTriangular, true).unwrap();
    /// upper.normalize();
    /// assert_eq!(upper.data(), vec![1.0, 0.0, 3.0, 4.0]);
    /// ```
    pub fn normalize(&mut self) -> &mut Self {
        let (nrow, ncol, kind) = (self.nrow(), self.ncol(), self.kind());
        trace!(%kind, nrow, ncol, "normalizing implied region");
        self.storage().with_slice_mut(|a| match kind {
            Kind::Dense => {}
            Kind::UpperTriangular => {
                for col in 0..ncol {
                    for row in (col + 1)..nrow {
                        a[offset(row, col, nrow)] = T::zero();
                    }
                }
            }
            Kind::LowerTriangular => {
                for col in 0..ncol {
                    for row in 0..col.min(nrow) {
                        a[offset(row, col, nrow)] = T::zero();
                    }
                }
            }
            Kind::Hermitian => {
                for col in 0..ncol {
                    for row in (col + 1)..nrow {
                        a[offset(row, col, nrow)] = a[offset(col, row, nrow)].conjugate();
                    }
                }
            }
        });
        self
    }
}
