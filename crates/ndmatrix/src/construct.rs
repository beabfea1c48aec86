//! Matrix construction functions.
//!
//! | Function                       | Copies? | Normalizes? |
//! |--------------------------------|---------|-------------|
//! | [`make_matrix`]                | fresh   | no          |
//! | [`make_matrix_from_buffer`]    | no      | no          |
//! | [`create_matrix_from_sequence`]| fresh   | no          |
//! | [`copy_matrix`]                | if forced or retyped | no |

use crate::any::AnyMatrix;
use crate::config::MatrixConfig;
use crate::element::{ElementType, common_type};
use crate::error::MatrixError;
use crate::kind::Kind;
use crate::layout::offset;
use crate::matrix::Matrix;
use crate::scalar::{Scalar, c32, c64};
use crate::storage::Storage;

/// A numeric literal whose element type is inferred at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Integer(i64),
    Single(f32),
    Double(f64),
    ComplexSingle(c32),
    ComplexDouble(c64),
}

impl Literal {
    /// Element type this literal infers under `config`.
    pub fn element_type(&self, config: &MatrixConfig) -> ElementType {
        let ty = match self {
            Literal::Integer(_) | Literal::Double(_) => ElementType::Double,
            Literal::Single(_) => ElementType::Single,
            Literal::ComplexSingle(_) => ElementType::ComplexSingle,
            Literal::ComplexDouble(_) => ElementType::ComplexDouble,
        };
        if config.widen_to_double {
            ty.widened()
        } else {
            ty
        }
    }

    pub fn to_c64(&self) -> c64 {
        match *self {
            Literal::Integer(x) => c64::new(x as f64, 0.0),
            Literal::Single(x) => x.to_c64(),
            Literal::Double(x) => x.to_c64(),
            Literal::ComplexSingle(z) => z.to_c64(),
            Literal::ComplexDouble(z) => z,
        }
    }
}

macro_rules! impl_literal_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<$t> for Literal {
                fn from(value: $t) -> Self {
                    Literal::$variant(value.into())
                }
            }
        )*
    };
}

impl_literal_from!(i32 => Integer, i64 => Integer, f32 => Single, f64 => Double, c32 => ComplexSingle, c64 => ComplexDouble);

/// Create an `nrow x ncol` matrix of `kind` with every element set to `initial`.
///
/// The implied region is filled too; no normalization is applied.
pub fn make_matrix<T: Scalar>(
    nrow: usize,
    ncol: usize,
    kind: Kind,
    initial: T,
) -> Result<Matrix<T>, MatrixError> {
    Matrix::filled(nrow, ncol, kind, initial)
}

/// Wrap caller-supplied column-major storage. No copy, no invariant check.
pub fn make_matrix_from_buffer<T: Scalar>(
    nrow: usize,
    ncol: usize,
    elements: Storage<T>,
    kind: Kind,
) -> Result<Matrix<T>, MatrixError> {
    Matrix::from_storage(nrow, ncol, elements, kind)
}

/// Build a matrix from a row-major sequence of literals.
///
/// `nrow` is `contents.len() / ncol`. The element type is `element_type` if
/// given, otherwise the common type of the literals under `config`.
///
/// # Errors
///
/// Returns `MatrixError::LengthMismatch` if `ncol` is zero or does not divide
/// `contents.len()`, and `MatrixError::ElementTypeMismatch` if `element_type`
/// is real but a literal has a nonzero imaginary part.
///
/// # Examples
///
/// ```
/// use ndmatrix::{Kind, Literal, MatrixConfig, create_matrix_from_sequence};
///
/// let contents: Vec<Literal> = (1..=6i64).map(Literal::from).collect();
/// let m = create_matrix_from_sequence(3, &contents, Kind::Dense, None, &MatrixConfig::default())
///     .unwrap();
/// assert_eq!((m.nrow(), m.ncol()), (2, 3));
/// assert_eq!(m.get_c64(0, 1).unwrap().re, 2.0);
/// assert_eq!(m.get_c64(1, 2).unwrap().re, 6.0);
/// ```
pub fn create_matrix_from_sequence(
    ncol: usize,
    contents: &[Literal],
    kind: Kind,
    element_type: Option<ElementType>,
    config: &MatrixConfig,
) -> Result<AnyMatrix, MatrixError> {
    if ncol == 0 || contents.len() % ncol != 0 {
        return Err(MatrixError::LengthMismatch {
            len: contents.len(),
            ncol,
        });
    }
    let ty = match element_type {
        Some(ty) => ty,
        None => {
            let types: Vec<ElementType> =
                contents.iter().map(|l| l.element_type(config)).collect();
            // an empty sequence has nothing to infer from
            if types.is_empty() {
                ElementType::Double
            } else {
                common_type(&types)?
            }
        }
    };
    let nrow = contents.len() / ncol;
    Ok(match ty {
        ElementType::Single => AnyMatrix::Single(from_row_major(nrow, ncol, contents, kind, ty)?),
        ElementType::Double => AnyMatrix::Double(from_row_major(nrow, ncol, contents, kind, ty)?),
        ElementType::ComplexSingle => {
            AnyMatrix::ComplexSingle(from_row_major(nrow, ncol, contents, kind, ty)?)
        }
        ElementType::ComplexDouble => {
            AnyMatrix::ComplexDouble(from_row_major(nrow, ncol, contents, kind, ty)?)
        }
    })
}

fn from_row_major<T: Scalar>(
    nrow: usize,
    ncol: usize,
    contents: &[Literal],
    kind: Kind,
    ty: ElementType,
) -> Result<Matrix<T>, MatrixError> {
    let mut data = vec![T::zero(); nrow * ncol];
    for (i, literal) in contents.iter().enumerate() {
        let (row, col) = (i / ncol, i % ncol);
        let literal_type = literal.element_type(&MatrixConfig::default());
        data[offset(row, col, nrow)] =
            T::try_from_c64(literal.to_c64()).ok_or(MatrixError::ElementTypeMismatch {
                expected: ty,
                actual: literal_type,
            })?;
    }
    Matrix::from_storage(nrow, ncol, Storage::from_vec(data), kind)
}

/// Copy or re-view a matrix under another kind and/or element type.
///
/// With `target_type` unchanged (or `None`) and `force_copy == false` the
/// result aliases the source storage; otherwise it owns a fresh buffer. A
/// type change always copies. The implied region is never normalized.
pub fn copy_matrix(
    matrix: &AnyMatrix,
    target_kind: Option<Kind>,
    target_type: Option<ElementType>,
    force_copy: bool,
) -> Result<AnyMatrix, MatrixError> {
    let kind = target_kind.unwrap_or(matrix.kind());
    match target_type {
        Some(ty) if ty != matrix.element_type() => matrix.convert(ty, kind),
        _ => matrix.copy_as(kind, force_copy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(values: &[i64]) -> Vec<Literal> {
        values.iter().copied().map(Literal::from).collect()
    }

    #[test]
    fn test_sequence_row_major() {
        let m = create_matrix_from_sequence(
            3,
            &literals(&[1, 2, 3, 4, 5, 6]),
            Kind::Dense,
            None,
            &MatrixConfig::default(),
        )
        .unwrap();
        let m = m.as_typed::<f64>().unwrap();
        assert_eq!(m.nrow(), 2);
        assert_eq!(m.get(0, 0).unwrap(), 1.0);
        assert_eq!(m.get(0, 1).unwrap(), 2.0);
        assert_eq!(m.get(0, 2).unwrap(), 3.0);
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
        assert_eq!(m.get(1, 2).unwrap(), 6.0);
        // stored column-major
        assert_eq!(m.data(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_sequence_length_mismatch() {
        let result = create_matrix_from_sequence(
            4,
            &literals(&[1, 2, 3, 4, 5]),
            Kind::Dense,
            None,
            &MatrixConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            MatrixError::LengthMismatch { len: 5, ncol: 4 }
        );
    }

    #[test]
    fn test_sequence_zero_columns() {
        let result =
            create_matrix_from_sequence(0, &[], Kind::Dense, None, &MatrixConfig::default());
        assert!(matches!(result, Err(MatrixError::LengthMismatch { .. })));
    }

    #[test]
    fn test_sequence_type_inference() {
        let contents = [Literal::from(1.0f32), Literal::from(c32::new(0.0, 1.0))];
        let m = create_matrix_from_sequence(2, &contents, Kind::Dense, None, &MatrixConfig::default())
            .unwrap();
        assert_eq!(m.element_type(), ElementType::ComplexSingle);

        let m = create_matrix_from_sequence(2, &contents, Kind::Dense, None, &MatrixConfig::widening())
            .unwrap();
        assert_eq!(m.element_type(), ElementType::ComplexDouble);
    }

    #[test]
    fn test_sequence_explicit_type() {
        let m = create_matrix_from_sequence(
            1,
            &literals(&[7]),
            Kind::Dense,
            Some(ElementType::Single),
            &MatrixConfig::default(),
        )
        .unwrap();
        assert_eq!(m.as_typed::<f32>().unwrap().get(0, 0).unwrap(), 7.0);
    }

    #[test]
    fn test_sequence_explicit_real_rejects_complex() {
        let contents = [Literal::from(c64::new(1.0, 1.0))];
        let result = create_matrix_from_sequence(
            1,
            &contents,
            Kind::Dense,
            Some(ElementType::Double),
            &MatrixConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            MatrixError::ElementTypeMismatch {
                expected: ElementType::Double,
                actual: ElementType::ComplexDouble,
            }
        );
    }

    #[test]
    fn test_make_matrix_fills_everything() {
        let m = make_matrix(2, 2, Kind::UpperTriangular, 3.0f64).unwrap();
        // raw storage is filled, the view still reads zero below the diagonal
        assert_eq!(m.data(), vec![3.0; 4]);
        assert_eq!(m.get(1, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_make_matrix_from_buffer_aliases() {
        let storage = Storage::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let mut m = make_matrix_from_buffer(2, 2, storage.clone(), Kind::Dense).unwrap();
        m.set(0, 0, 10.0).unwrap();
        assert_eq!(storage.read(0), 10.0);
    }

    #[test]
    fn test_copy_matrix_aliasing() {
        let m = AnyMatrix::from(Matrix::from_column_major(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap());

        let alias = copy_matrix(&m, Some(Kind::UpperTriangular), None, false).unwrap();
        assert!(
            alias
                .as_typed::<f64>()
                .unwrap()
                .shares_storage_with(m.as_typed::<f64>().unwrap())
        );
        assert_eq!(alias.kind(), Kind::UpperTriangular);

        let forced = copy_matrix(&m, None, None, true).unwrap();
        assert!(
            !forced
                .as_typed::<f64>()
                .unwrap()
                .shares_storage_with(m.as_typed::<f64>().unwrap())
        );

        let retyped = copy_matrix(&m, None, Some(ElementType::ComplexDouble), false).unwrap();
        assert_eq!(retyped.element_type(), ElementType::ComplexDouble);
        assert_eq!(retyped.get_c64(1, 0).unwrap(), c64::new(2.0, 0.0));
    }
}
