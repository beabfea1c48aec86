//! Conversion between strided kernel arguments and faer matrices.
//!
//! Kernels receive column-major arrays with a leading dimension `lda >= nrow`.
//! faer is also column-major, so a packed copy (`lda == nrow`) can be viewed
//! directly with `MatRef::from_column_major_slice`.
//!
//! The eigen solvers always run in complex double precision; callers narrow
//! the results back to their own element type.

use faer::linalg::solvers::{EvdError, Qr, Solve};
use faer::{Mat, MatRef};

use crate::scalar::{Scalar, c64};

/// Copy an `nrow x ncol` block with leading dimension `lda` into a packed
/// complex-double buffer.
pub(crate) fn gather_c64<T: Scalar>(a: &[T], lda: usize, nrow: usize, ncol: usize) -> Vec<c64> {
    let mut packed = Vec::with_capacity(nrow * ncol);
    for col in 0..ncol {
        packed.extend(a[col * lda..col * lda + nrow].iter().map(|x| x.to_c64()));
    }
    packed
}

/// Write a packed complex-double buffer back into a strided block.
pub(crate) fn scatter_c64<T: Scalar>(packed: &[c64], a: &mut [T], lda: usize, nrow: usize) {
    for (i, &z) in packed.iter().enumerate() {
        let (row, col) = (i % nrow, i / nrow);
        a[row + col * lda] = T::from_c64_lossy(z);
    }
}

/// Fill the mirror of the `uplo` triangle so the packed matrix is Hermitian.
///
/// Imaginary parts on the diagonal are dropped.
pub(crate) fn hermitian_from_triangle(packed: &mut [c64], n: usize, uplo: u8) {
    for col in 0..n {
        let d = packed[col + col * n];
        packed[col + col * n] = c64::new(d.re, 0.0);
        for row in col + 1..n {
            let (lower, upper) = (row + col * n, col + row * n);
            if uplo == b'U' {
                packed[lower] = packed[upper].conjugate();
            } else {
                packed[upper] = packed[lower].conjugate();
            }
        }
    }
}

/// Column-major copy of a faer matrix.
fn packed_from_mat(mat: &Mat<c64>) -> Vec<c64> {
    let mut data = Vec::with_capacity(mat.nrows() * mat.ncols());
    for col in 0..mat.ncols() {
        for row in 0..mat.nrows() {
            data.push(mat[(row, col)]);
        }
    }
    data
}

/// Partial pivoting LU of a packed `n x n` matrix.
pub(crate) struct PivotedLu {
    /// `L` strictly below the diagonal (unit diagonal implied), `U` on and
    /// above it.
    pub factors: Vec<c64>,
    /// `row_order[i]` is the input row that ends up as row `i` of `L U`.
    pub row_order: Vec<usize>,
    /// First exactly zero diagonal element of `U`.
    pub zero_pivot: Option<usize>,
}

/// Factor `packed` and, unless `U` is singular, overwrite the packed
/// `n x nrhs` right-hand sides with the solution.
pub(crate) fn lu_solve(packed: &[c64], n: usize, rhs: &mut [c64], nrhs: usize) -> PivotedLu {
    let lu = MatRef::from_column_major_slice(packed, n, n).partial_piv_lu();
    let (l, u) = (lu.L(), lu.U());
    let mut factors = Vec::with_capacity(n * n);
    for col in 0..n {
        for row in 0..n {
            factors.push(if row > col { l[(row, col)] } else { u[(row, col)] });
        }
    }
    let zero_pivot = (0..n).find(|&k| u[(k, k)] == c64::new(0.0, 0.0));
    if zero_pivot.is_none() {
        let mut x = MatRef::from_column_major_slice(&*rhs, n, nrhs).to_owned();
        lu.solve_in_place(&mut x);
        rhs.copy_from_slice(&packed_from_mat(&x));
    }
    PivotedLu {
        factors,
        row_order: lu.P().arrays().0.to_vec(),
        zero_pivot,
    }
}

/// Lower Cholesky factor of the Hermitian matrix whose lower triangle is
/// packed in `packed`, zero above the diagonal.
///
/// On failure returns the order of the first leading minor that is not
/// positive definite.
pub(crate) fn cholesky_lower(packed: &[c64], n: usize) -> Result<Vec<c64>, usize> {
    let mat = MatRef::from_column_major_slice(packed, n, n);
    let Ok(llt) = mat.llt(faer::Side::Lower) else {
        let order = (1..=n)
            .find(|&k| mat.submatrix(0, 0, k, k).llt(faer::Side::Lower).is_err())
            .unwrap_or(n);
        return Err(order);
    };
    let l = llt.L();
    let mut factor = vec![c64::new(0.0, 0.0); n * n];
    for col in 0..n {
        for row in col..n {
            factor[row + col * n] = l[(row, col)];
        }
    }
    Ok(factor)
}

/// Householder QR of a packed `m x n` matrix with `m >= n`.
///
/// Returns the full `m x m` factor `Q` and the `n x n` upper triangular `R`,
/// both packed.
pub(crate) fn householder_qr(packed: &[c64], m: usize, n: usize) -> (Vec<c64>, Vec<c64>) {
    let qr: Qr<c64> = Qr::new(MatRef::from_column_major_slice(packed, m, n));
    let q = qr.compute_Q();
    let r_mat = qr.thin_R();
    let mut r = vec![c64::new(0.0, 0.0); n * n];
    for col in 0..n {
        for row in 0..=col {
            r[row + col * n] = r_mat[(row, col)];
        }
    }
    (packed_from_mat(&q), r)
}

/// Eigenvalues of a packed Hermitian `n x n` matrix, nondecreasing.
pub(crate) fn self_adjoint_eigenvalues(packed: &[c64], n: usize) -> Result<Vec<f64>, EvdError> {
    let mat = MatRef::from_column_major_slice(packed, n, n);
    let evd = mat.self_adjoint_eigen(faer::Side::Lower)?;
    let s = evd.S();
    Ok((0..n).map(|i| s[i].re).collect())
}

/// Eigenvalues of a packed general `n x n` matrix.
pub(crate) fn general_eigenvalues(packed: &[c64], n: usize) -> Result<Vec<c64>, EvdError> {
    let mat = MatRef::from_column_major_slice(packed, n, n);
    let evd = mat.eigen()?;
    let s = evd.S();
    Ok((0..n).map(|i| s[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gather_respects_leading_dimension() {
        // 2x2 block inside a 3-row array
        let a = [1.0f64, 2.0, 99.0, 3.0, 4.0, 99.0];
        let packed = gather_c64(&a, 3, 2, 2);
        assert_eq!(
            packed,
            vec![
                c64::new(1.0, 0.0),
                c64::new(2.0, 0.0),
                c64::new(3.0, 0.0),
                c64::new(4.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_scatter_leaves_padding() {
        let mut a = [0.0f32; 6];
        let packed = [c64::new(1.0, 5.0), c64::new(2.0, 0.0), c64::new(3.0, 0.0), c64::new(4.0, 0.0)];
        scatter_c64(&packed, &mut a, 3, 2);
        assert_eq!(a, [1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
    }

    #[test]
    fn test_hermitian_from_upper() {
        let mut packed = vec![
            c64::new(2.0, 0.5),
            c64::new(99.0, 0.0),
            c64::new(1.0, 1.0),
            c64::new(3.0, 0.0),
        ];
        hermitian_from_triangle(&mut packed, 2, b'U');
        assert_eq!(packed[0], c64::new(2.0, 0.0));
        assert_eq!(packed[1], c64::new(1.0, -1.0));
    }

    #[test]
    fn test_self_adjoint_eigenvalues_diagonal() {
        let packed = [
            c64::new(3.0, 0.0),
            c64::new(0.0, 0.0),
            c64::new(0.0, 0.0),
            c64::new(-1.0, 0.0),
        ];
        let w = self_adjoint_eigenvalues(&packed, 2).unwrap();
        assert_relative_eq!(w[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_solve_and_factors() {
        // [[0, 1], [2, 3]] x = [1, 5]  ->  x = [1, 1]
        let packed = [
            c64::new(0.0, 0.0),
            c64::new(2.0, 0.0),
            c64::new(1.0, 0.0),
            c64::new(3.0, 0.0),
        ];
        let mut rhs = [c64::new(1.0, 0.0), c64::new(5.0, 0.0)];
        let lu = lu_solve(&packed, 2, &mut rhs, 1);
        assert_eq!(lu.zero_pivot, None);
        assert_eq!(lu.row_order, vec![1, 0]);
        assert_relative_eq!(lu.factors[0].re, 2.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[0].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(rhs[1].re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cholesky_reports_failing_minor() {
        // leading 1x1 minor is fine, the 2x2 one is indefinite
        let packed = [
            c64::new(1.0, 0.0),
            c64::new(2.0, 0.0),
            c64::new(0.0, 0.0),
            c64::new(1.0, 0.0),
        ];
        assert_eq!(cholesky_lower(&packed, 2), Err(2));
    }

    #[test]
    fn test_householder_qr_reproduces_input() {
        let packed: Vec<c64> = [1.0, 1.0, 1.0, 0.0, 1.0, 2.0]
            .iter()
            .map(|&x| c64::new(x, 0.0))
            .collect();
        let (q, r) = householder_qr(&packed, 3, 2);
        assert_eq!((q.len(), r.len()), (9, 4));
        assert_eq!(r[1], c64::new(0.0, 0.0));
        for col in 0..2 {
            for row in 0..3 {
                let value = (0..2).fold(c64::new(0.0, 0.0), |acc, k| {
                    acc + q[row + k * 3] * r[k + col * 2]
                });
                assert_relative_eq!(value.re, packed[row + col * 3].re, epsilon = 1e-12);
                assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_general_eigenvalues_rotation() {
        // [[0, -1], [1, 0]] has eigenvalues +-i
        let packed = [
            c64::new(0.0, 0.0),
            c64::new(1.0, 0.0),
            c64::new(-1.0, 0.0),
            c64::new(0.0, 0.0),
        ];
        let mut w = general_eigenvalues(&packed, 2).unwrap();
        w.sort_by(|a, b| a.im.total_cmp(&b.im));
        assert_relative_eq!(w[0].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(w[0].im, -1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1].im, 1.0, epsilon = 1e-12);
    }
}
