//! Runtime-typed matrices and vectors.
//!
//! Construction from literals and kernels that choose their output type at
//! runtime (for example eigenvalues that may or may not be real) produce
//! values whose element type is only known after the call. These enums close
//! over the four supported element types.

use crate::element::{ElementType, common_type};
use crate::error::MatrixError;
use crate::kind::Kind;
use crate::matrix::Matrix;
use crate::scalar::{Scalar, c32, c64};

/// Dispatch `$body` over every variant, binding the typed payload to `$m`.
macro_rules! dispatch {
    ($value:expr, $ty:ident, $m:ident => $body:expr) => {
        match $value {
            $ty::Single($m) => $body,
            $ty::Double($m) => $body,
            $ty::ComplexSingle($m) => $body,
            $ty::ComplexDouble($m) => $body,
        }
    };
}

/// A matrix of any supported element type.
#[derive(Debug, Clone)]
pub enum AnyMatrix {
    Single(Matrix<f32>),
    Double(Matrix<f64>),
    ComplexSingle(Matrix<c32>),
    ComplexDouble(Matrix<c64>),
}

impl AnyMatrix {
    pub fn element_type(&self) -> ElementType {
        dispatch!(self, AnyMatrix, m => m.element_type())
    }

    pub fn nrow(&self) -> usize {
        dispatch!(self, AnyMatrix, m => m.nrow())
    }

    pub fn ncol(&self) -> usize {
        dispatch!(self, AnyMatrix, m => m.ncol())
    }

    pub fn kind(&self) -> Kind {
        dispatch!(self, AnyMatrix, m => m.kind())
    }

    /// Element `(row, col)` widened to complex double.
    pub fn get_c64(&self, row: usize, col: usize) -> Result<c64, MatrixError> {
        dispatch!(self, AnyMatrix, m => m.get(row, col).map(Scalar::to_c64))
    }

    /// Borrow as a typed matrix.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ElementTypeMismatch` if `T` is not the stored type.
    pub fn as_typed<T: Scalar>(&self) -> Result<&Matrix<T>, MatrixError> {
        T::matrix_ref(self).ok_or(MatrixError::ElementTypeMismatch {
            expected: T::ELEMENT_TYPE,
            actual: self.element_type(),
        })
    }

    /// Unwrap into the typed matrix.
    pub fn into_typed<T: Scalar>(self) -> Result<Matrix<T>, MatrixError> {
        self.as_typed::<T>().cloned()
    }

    /// View under another kind, sharing storage unless `force_copy` is set.
    pub fn copy_as(&self, kind: Kind, force_copy: bool) -> Result<Self, MatrixError> {
        dispatch!(self, AnyMatrix, m => m.copy_as(kind, force_copy).map(AnyMatrix::from))
    }

    /// Copy converted to `target` under `kind`.
    pub fn convert(&self, target: ElementType, kind: Kind) -> Result<Self, MatrixError> {
        dispatch!(self, AnyMatrix, m => convert_matrix(m, target, kind))
    }
}

/// Common element type of several runtime-typed matrices.
pub fn common_type_of(operands: &[&AnyMatrix]) -> Result<ElementType, MatrixError> {
    let types: Vec<ElementType> = operands.iter().map(|m| m.element_type()).collect();
    common_type(&types)
}

fn convert_matrix<T: Scalar>(
    m: &Matrix<T>,
    target: ElementType,
    kind: Kind,
) -> Result<AnyMatrix, MatrixError> {
    Ok(match target {
        ElementType::Single => AnyMatrix::Single(m.convert(kind)?),
        ElementType::Double => AnyMatrix::Double(m.convert(kind)?),
        ElementType::ComplexSingle => AnyMatrix::ComplexSingle(m.convert(kind)?),
        ElementType::ComplexDouble => AnyMatrix::ComplexDouble(m.convert(kind)?),
    })
}

impl<T: Scalar> From<Matrix<T>> for AnyMatrix {
    fn from(matrix: Matrix<T>) -> Self {
        T::into_any_matrix(matrix)
    }
}

/// A vector of any supported element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyVector {
    Single(Vec<f32>),
    Double(Vec<f64>),
    ComplexSingle(Vec<c32>),
    ComplexDouble(Vec<c64>),
}

impl AnyVector {
    pub fn element_type(&self) -> ElementType {
        match self {
            AnyVector::Single(_) => ElementType::Single,
            AnyVector::Double(_) => ElementType::Double,
            AnyVector::ComplexSingle(_) => ElementType::ComplexSingle,
            AnyVector::ComplexDouble(_) => ElementType::ComplexDouble,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, AnyVector, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements widened to complex double.
    pub fn to_c64_vec(&self) -> Vec<c64> {
        dispatch!(self, AnyVector, v => v.iter().map(|x| x.to_c64()).collect())
    }

    /// Borrow as a typed slice.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ElementTypeMismatch` if `T` is not the stored type.
    pub fn as_typed<T: Scalar>(&self) -> Result<&[T], MatrixError> {
        T::vector_ref(self).ok_or(MatrixError::ElementTypeMismatch {
            expected: T::ELEMENT_TYPE,
            actual: self.element_type(),
        })
    }
}

impl<T: Scalar> From<Vec<T>> for AnyVector {
    fn from(values: Vec<T>) -> Self {
        T::into_any_vector(values)
    }
}
