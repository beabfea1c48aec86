//! Reshaping kernel output buffers into results.

use crate::any::AnyVector;
use crate::element::Precision;
use crate::error::MatrixError;
use crate::layout::offset;
use crate::matrix::Matrix;
use crate::scalar::{Scalar, c32, c64};

fn check_padded_len(len: usize, m: usize, nrhs: usize, n: usize) -> Result<(), MatrixError> {
    if n > m {
        return Err(MatrixError::ShapeMismatch {
            expected: m,
            actual: n,
        });
    }
    if len < m * nrhs {
        return Err(MatrixError::ShapeMismatch {
            expected: m * nrhs,
            actual: len,
        });
    }
    Ok(())
}

/// Extract the `n x nrhs` solution embedded in the first `n` rows of each
/// column of an `m x nrhs` column-major buffer.
///
/// # Errors
///
/// Returns `MatrixError::ShapeMismatch` if `n > m` or the buffer holds fewer
/// than `m * nrhs` elements.
///
/// # Examples
///
/// ```
/// use ndmatrix::kernel::matrix_from_first_rows;
///
/// let padded = [1.0, 2.0, 9.0, 3.0, 4.0, 9.0];
/// let x = matrix_from_first_rows(&padded, 3, 2, 2).unwrap();
/// assert_eq!(x.to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
/// ```
pub fn matrix_from_first_rows<T: Scalar>(
    buffer: &[T],
    m: usize,
    nrhs: usize,
    n: usize,
) -> Result<Matrix<T>, MatrixError> {
    check_padded_len(buffer.len(), m, nrhs, n)?;
    let data = (0..nrhs)
        .flat_map(|col| {
            let start = offset(0, col, m);
            buffer[start..start + n].iter().copied()
        })
        .collect();
    Matrix::from_column_major(n, nrhs, data)
}

/// Per-column sum of squared magnitudes over rows `n..m` of an `m x nrhs`
/// column-major buffer.
///
/// For an over-determined least-squares solve these are the squared residual
/// norms. With `n == m` every sum is zero.
pub fn sum_last_rows<T: Scalar>(
    buffer: &[T],
    m: usize,
    nrhs: usize,
    n: usize,
) -> Result<Vec<T>, MatrixError> {
    check_padded_len(buffer.len(), m, nrhs, n)?;
    Ok((0..nrhs)
        .map(|col| {
            let total: f64 = buffer[offset(n, col, m)..offset(0, col + 1, m)]
                .iter()
                .map(|x| x.abs_sqr())
                .sum();
            T::from_real_f64(total)
        })
        .collect())
}

/// Assemble `n` values from a buffer holding `n` real parts followed by `n`
/// imaginary parts.
///
/// The result is complex of the buffer's precision. With `narrow` set and
/// every imaginary part exactly zero, the real-typed vector is returned
/// instead. Narrowing is never automatic.
///
/// # Errors
///
/// Returns `MatrixError::ShapeMismatch` if the buffer is shorter than `2 * n`.
///
/// # Examples
///
/// ```
/// use ndmatrix::element::ElementType;
/// use ndmatrix::kernel::combine_real_imag;
///
/// let parts = [1.0f64, 2.0, 0.0, 0.0];
/// assert_eq!(combine_real_imag(&parts, 2, false).unwrap().element_type(), ElementType::ComplexDouble);
/// assert_eq!(combine_real_imag(&parts, 2, true).unwrap().element_type(), ElementType::Double);
/// ```
pub fn combine_real_imag<R: Scalar>(
    buffer: &[R],
    n: usize,
    narrow: bool,
) -> Result<AnyVector, MatrixError> {
    if buffer.len() < 2 * n {
        return Err(MatrixError::ShapeMismatch {
            expected: 2 * n,
            actual: buffer.len(),
        });
    }
    let (re, im) = (&buffer[..n], &buffer[n..2 * n]);
    if narrow && im.iter().all(|x| x.is_zero()) {
        return Ok(AnyVector::from(re.to_vec()));
    }
    let values = re
        .iter()
        .zip(im)
        .map(|(&a, &b)| c64::new(a.to_c64().re, b.to_c64().re));
    Ok(match R::ELEMENT_TYPE.precision() {
        Precision::Single => AnyVector::ComplexSingle(values.map(c32::from_c64_lossy).collect()),
        Precision::Double => AnyVector::ComplexDouble(values.collect()),
    })
}
