//! Structural matrix views over shared column-major storage.
//!
//! A [`Matrix`] pairs a shape and a [`Kind`] with a [`Storage`] handle. Every
//! kind uses the same addressing; they differ only in how the implied
//! (non-canonical) region is read and written:
//!
//! | Kind            | get below/above the stored triangle | set there             |
//! |-----------------|-------------------------------------|-----------------------|
//! | Dense           | stored value                        | stored                |
//! | UpperTriangular | zero (row > col)                    | zero: no-op, else error |
//! | LowerTriangular | zero (row < col)                    | zero: no-op, else error |
//! | Hermitian       | conj of mirror (row > col)          | conj into the mirror  |

use crate::element::ElementType;
use crate::error::MatrixError;
use crate::kind::Kind;
use crate::layout::{checked_offset, offset};
use crate::scalar::Scalar;
use crate::storage::Storage;

/// A column-major matrix view with a structural kind.
///
/// `Clone` aliases the storage: both clones observe each other's writes.
/// Use [`Matrix::copy_as`] with `force_copy = true` for an independent copy.
#[derive(Debug, Clone)]
pub struct Matrix<T: Scalar> {
    nrow: usize,
    ncol: usize,
    kind: Kind,
    storage: Storage<T>,
}

/// `nrow * ncol`, or `ShapeMismatch` against `len` when the product overflows.
fn element_count(nrow: usize, ncol: usize, len: usize) -> Result<usize, MatrixError> {
    nrow.checked_mul(ncol).ok_or(MatrixError::ShapeMismatch {
        expected: usize::MAX,
        actual: len,
    })
}

fn validate_shape(nrow: usize, ncol: usize, kind: Kind, len: usize) -> Result<(), MatrixError> {
    if kind.requires_square() && nrow != ncol {
        return Err(MatrixError::NotSquare { nrow, ncol });
    }
    let expected = element_count(nrow, ncol, len)?;
    if expected != len {
        return Err(MatrixError::ShapeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

impl<T: Scalar> Matrix<T> {
    /// Wrap existing storage without copying or normalizing it.
    ///
    /// The caller is responsible for the implied region; call
    /// [`Matrix::normalize`] if it may be stale.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ShapeMismatch` if `storage.len() != nrow * ncol`,
    /// and `MatrixError::NotSquare` for a non-square Hermitian view.
    pub fn from_storage(
        nrow: usize,
        ncol: usize,
        storage: Storage<T>,
        kind: Kind,
    ) -> Result<Self, MatrixError> {
        validate_shape(nrow, ncol, kind, storage.len())?;
        Ok(Self {
            nrow,
            ncol,
            kind,
            storage,
        })
    }

    /// Create a matrix with fresh storage where every element, stored or not,
    /// holds `value`.
    pub fn filled(nrow: usize, ncol: usize, kind: Kind, value: T) -> Result<Self, MatrixError> {
        let len = element_count(nrow, ncol, 0)?;
        Self::from_storage(nrow, ncol, Storage::filled(len, value), kind)
    }

    /// Create a zero-initialized matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmatrix::{Kind, Matrix};
    ///
    /// let m: Matrix<f64> = Matrix::zeros(2, 3, Kind::Dense).unwrap();
    /// assert_eq!(m.nrow(), 2);
    /// assert_eq!(m.ncol(), 3);
    /// assert_eq!(m.get(1, 2).unwrap(), 0.0);
    /// ```
    pub fn zeros(nrow: usize, ncol: usize, kind: Kind) -> Result<Self, MatrixError> {
        Self::filled(nrow, ncol, kind, T::zero())
    }

    /// Dense matrix from column-major data.
    pub fn from_column_major(nrow: usize, ncol: usize, data: Vec<T>) -> Result<Self, MatrixError> {
        Self::from_storage(nrow, ncol, Storage::from_vec(data), Kind::Dense)
    }

    #[inline]
    pub fn nrow(&self) -> usize {
        self.nrow
    }

    #[inline]
    pub fn ncol(&self) -> usize {
        self.ncol
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrow == self.ncol
    }

    /// The storage handle backing this view.
    #[inline]
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// Whether `(row, col)` is in the canonical region of this view.
    #[inline]
    pub fn is_stored(&self, row: usize, col: usize) -> bool {
        self.kind.is_stored(row, col)
    }

    /// Raw column-major elements, implied region included as-is.
    pub fn data(&self) -> Vec<T> {
        self.storage.to_vec()
    }

    /// Read element `(row, col)` according to the view's kind.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::IndexOutOfRange` if the coordinate is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        let off = checked_offset(row, col, self.nrow, self.ncol)?;
        if self.is_stored(row, col) {
            return Ok(self.storage.read(off));
        }
        match self.kind {
            Kind::Hermitian => Ok(self.storage.read(offset(col, row, self.nrow)).conjugate()),
            _ => Ok(T::zero()),
        }
    }

    /// Write element `(row, col)` according to the view's kind.
    ///
    /// Writing zero into the implied region of a triangular view is accepted
    /// and changes nothing. Writing below the diagonal of a Hermitian view
    /// stores the conjugate into the mirror cell `(col, row)`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::IndexOutOfRange` for a bad coordinate and
    /// `MatrixError::ReadOnlyViolation` for a nonzero write into the implied
    /// region of a triangular view.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        let off = checked_offset(row, col, self.nrow, self.ncol)?;
        if self.is_stored(row, col) {
            self.storage.write(off, value);
            return Ok(());
        }
        match self.kind {
            Kind::Hermitian => {
                self.storage
                    .write(offset(col, row, self.nrow), value.conjugate());
                Ok(())
            }
            _ if value.is_zero() => Ok(()),
            kind => Err(MatrixError::ReadOnlyViolation { row, col, kind }),
        }
    }

    /// Whether this view shares storage with another.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        self.storage.shares_storage_with(&other.storage)
    }

    /// Whether other views of this storage exist.
    pub fn is_view(&self) -> bool {
        self.storage.is_shared()
    }

    /// Reinterpret the same storage under another kind (zero-copy).
    ///
    /// The implied region is not touched.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::NotSquare` when viewing a non-square matrix as
    /// Hermitian.
    pub fn view_as(&self, kind: Kind) -> Result<Self, MatrixError> {
        Self::from_storage(self.nrow, self.ncol, self.storage.clone(), kind)
    }

    /// View under `kind`, sharing storage unless `force_copy` is set.
    pub fn copy_as(&self, kind: Kind, force_copy: bool) -> Result<Self, MatrixError> {
        let storage = if force_copy {
            self.storage.deep_copy()
        } else {
            self.storage.clone()
        };
        Self::from_storage(self.nrow, self.ncol, storage, kind)
    }

    /// Copy into another element type under `kind`. Always copies.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ElementTypeMismatch` when a complex element with
    /// a nonzero imaginary part would be narrowed to a real type.
    pub fn convert<U: Scalar>(&self, kind: Kind) -> Result<Matrix<U>, MatrixError> {
        let storage = self
            .storage
            .convert::<U>()
            .ok_or(MatrixError::ElementTypeMismatch {
                expected: U::ELEMENT_TYPE,
                actual: T::ELEMENT_TYPE,
            })?;
        Matrix::from_storage(self.nrow, self.ncol, storage, kind)
    }

    /// Dense copy with the implied region materialized.
    pub fn to_dense(&self) -> Self {
        let mut data = Vec::with_capacity(self.nrow * self.ncol);
        self.storage.with_slice(|stored| {
            for col in 0..self.ncol {
                for row in 0..self.nrow {
                    data.push(self.read_unchecked(stored, row, col));
                }
            }
        });
        Self {
            nrow: self.nrow,
            ncol: self.ncol,
            kind: Kind::Dense,
            storage: Storage::from_vec(data),
        }
    }

    /// Logical elements as rows (outer vec is rows, inner vec is columns).
    ///
    /// # Examples
    ///
    /// ```
    /// use ndmatrix::Matrix;
    ///
    /// let m = Matrix::from_column_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.to_rows(), vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
    /// ```
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.storage.with_slice(|stored| {
            (0..self.nrow)
                .map(|row| {
                    (0..self.ncol)
                        .map(|col| self.read_unchecked(stored, row, col))
                        .collect()
                })
                .collect()
        })
    }

    #[inline]
    fn read_unchecked(&self, stored: &[T], row: usize, col: usize) -> T {
        if self.is_stored(row, col) {
            stored[offset(row, col, self.nrow)]
        } else if self.kind == Kind::Hermitian {
            stored[offset(col, row, self.nrow)].conjugate()
        } else {
            T::zero()
        }
    }
}
