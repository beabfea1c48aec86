//! Typed drivers over the kernel table.
//!
//! Each driver copies its operands into kernel-owned buffers, so the caller's
//! storage is never modified and no alias observes intermediate results.

use tracing::{debug, instrument};

use crate::any::AnyVector;
use crate::backend::{
    GeevComplexFn, GeevRealFn, GelsFn, GesvFn, HeevFn, KernelTable, PotrfFn, SyevFn,
};
use crate::error::MatrixError;
use crate::kernel::{
    WorkspaceSpec, check_info, combine_real_imag, matrix_from_first_rows, resolve_procedure_name,
    resolve_procedure_name2, sum_last_rows, with_workspace,
};
use crate::kind::Kind;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::storage::Storage;

fn lapack_int(value: usize) -> Result<i32, MatrixError> {
    i32::try_from(value).map_err(|_| MatrixError::DimensionTooLarge { value })
}

fn require_square<T: Scalar>(a: &Matrix<T>) -> Result<usize, MatrixError> {
    if a.is_square() {
        Ok(a.nrow())
    } else {
        Err(MatrixError::NotSquare {
            nrow: a.nrow(),
            ncol: a.ncol(),
        })
    }
}

fn require_rows<T: Scalar>(b: &Matrix<T>, nrow: usize) -> Result<(), MatrixError> {
    if b.nrow() == nrow {
        Ok(())
    } else {
        Err(MatrixError::ShapeMismatch {
            expected: nrow,
            actual: b.nrow(),
        })
    }
}

/// Solve `A X = B` for square `A`.
///
/// Operands are read through their views, so a triangular or Hermitian `A`
/// is solved as the matrix it represents.
///
/// # Errors
///
/// `NotSquare` or `ShapeMismatch` for incompatible operands, and a
/// `KernelError::NumericalFailure` when `A` is exactly singular.
///
/// # Examples
///
/// ```
/// use ndmatrix::{Matrix, backend::KernelTable, solve};
///
/// let a = Matrix::from_column_major(2, 2, vec![2.0f64, 1.0, 1.0, 3.0]).unwrap();
/// let b = Matrix::from_column_major(2, 1, vec![3.0, 5.0]).unwrap();
/// let x = solve(&KernelTable::reference(), &a, &b).unwrap();
/// assert!((x.get(0, 0).unwrap() - 0.8).abs() < 1e-12);
/// assert!((x.get(1, 0).unwrap() - 1.4).abs() < 1e-12);
/// ```
#[instrument(level = "debug", skip_all, fields(element = %T::ELEMENT_TYPE))]
pub fn solve<T: Scalar>(
    table: &KernelTable,
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<Matrix<T>, MatrixError> {
    let n = require_square(a)?;
    require_rows(b, n)?;
    let nrhs = b.ncol();

    let name = resolve_procedure_name("gesv", T::ELEMENT_TYPE);
    let gesv = table.lookup::<GesvFn<T>>(&name)?;

    let mut lu = a.to_dense().data();
    let mut x = b.to_dense().data();
    let mut ipiv = vec![0; n];
    let mut info = 0;
    let (n32, nrhs32) = (lapack_int(n)?, lapack_int(nrhs)?);
    gesv(
        n32,
        nrhs32,
        &mut lu,
        n32.max(1),
        &mut ipiv,
        &mut x,
        n32.max(1),
        &mut info,
    );
    check_info(&name, info)?;
    Matrix::from_column_major(n, nrhs, x)
}

/// Cholesky factor of a Hermitian positive definite `A` as a triangular view.
///
/// `kind` selects the factor: `UpperTriangular` gives `U` with `A = U^H U`,
/// `LowerTriangular` gives `L` with `A = L L^H`. The kernel only writes the
/// requested triangle; the result is normalized so its storage holds zeros
/// in the implied region.
///
/// # Errors
///
/// `UnsupportedKind` unless `kind` is triangular, `NotSquare` for a
/// rectangular `A`, and `KernelError::NumericalFailure` when `A` is not
/// positive definite.
#[instrument(level = "debug", skip_all, fields(element = %T::ELEMENT_TYPE, kind = %kind))]
pub fn cholesky<T: Scalar>(
    table: &KernelTable,
    a: &Matrix<T>,
    kind: Kind,
) -> Result<Matrix<T>, MatrixError> {
    let uplo = match kind {
        Kind::UpperTriangular | Kind::LowerTriangular => kind.uplo(),
        _ => None,
    }
    .ok_or(MatrixError::UnsupportedKind {
        operation: "cholesky",
        kind,
    })?;
    let n = require_square(a)?;

    let name = resolve_procedure_name("potrf", T::ELEMENT_TYPE);
    let potrf = table.lookup::<PotrfFn<T>>(&name)?;

    let mut factor = a.to_dense().data();
    let mut info = 0;
    let n32 = lapack_int(n)?;
    potrf(uplo, n32, &mut factor, n32.max(1), &mut info);
    check_info(&name, info)?;

    let mut result = Matrix::from_storage(n, n, Storage::from_vec(factor), kind)?;
    result.normalize();
    Ok(result)
}

/// Solution and squared residual norms of a least-squares problem.
#[derive(Debug, Clone)]
pub struct LeastSquares<T: Scalar> {
    /// `n x nrhs` solution.
    pub solution: Matrix<T>,
    /// Squared residual norm per right-hand side. Zero unless `A` has more
    /// rows than columns.
    pub residuals: Vec<T>,
}

/// Least-squares solution of `A X = B` for full rank `A`.
///
/// Over-determined systems (`m > n`) minimize `|A x - b|`; under-determined
/// ones return the minimum norm solution.
///
/// # Errors
///
/// `ShapeMismatch` if `B` does not have `m` rows, `KernelError::NumericalFailure`
/// if `A` is rank deficient.
#[instrument(level = "debug", skip_all, fields(element = %T::ELEMENT_TYPE))]
pub fn least_squares<T: Scalar>(
    table: &KernelTable,
    a: &Matrix<T>,
    b: &Matrix<T>,
) -> Result<LeastSquares<T>, MatrixError> {
    let (m, n, nrhs) = (a.nrow(), a.ncol(), b.ncol());
    require_rows(b, m)?;
    let ldb = m.max(n).max(1);

    let name = resolve_procedure_name("gels", T::ELEMENT_TYPE);
    let gels = table.lookup::<GelsFn<T>>(&name)?;

    let mut qr = a.to_dense().data();
    let mut padded = vec![T::zero(); ldb * nrhs];
    for (col, column) in b.to_dense().data().chunks(m.max(1)).enumerate().take(nrhs) {
        padded[col * ldb..col * ldb + column.len()].copy_from_slice(column);
    }

    let (m32, n32, nrhs32, ldb32) = (
        lapack_int(m)?,
        lapack_int(n)?,
        lapack_int(nrhs)?,
        lapack_int(ldb)?,
    );
    with_workspace(&[WorkspaceSpec::of::<T>()], |ws| {
        let (lwork, work) = ws.slot_mut::<T>(0)?;
        let mut info = 0;
        gels(
            b'N',
            m32,
            n32,
            nrhs32,
            &mut qr,
            m32.max(1),
            &mut padded,
            ldb32,
            work,
            lwork,
            &mut info,
        );
        check_info(&name, info)
    })?;

    Ok(LeastSquares {
        solution: matrix_from_first_rows(&padded, ldb, nrhs, n)?,
        residuals: sum_last_rows(&padded, ldb, nrhs, n)?,
    })
}

/// Eigenvalues of a general square matrix.
///
/// The result is complex of the input's precision. With `narrow` set and
/// every imaginary part exactly zero, a real vector is returned instead.
#[instrument(level = "debug", skip_all, fields(element = %T::ELEMENT_TYPE, narrow = narrow))]
pub fn eigenvalues<T: Scalar>(
    table: &KernelTable,
    a: &Matrix<T>,
    narrow: bool,
) -> Result<AnyVector, MatrixError> {
    let n = require_square(a)?;
    let n32 = lapack_int(n)?;
    let name = resolve_procedure_name("geev", T::ELEMENT_TYPE);
    let mut data = a.to_dense().data();
    let spec = [WorkspaceSpec::of::<T>()];

    if T::ELEMENT_TYPE.is_complex() {
        let geev = table.lookup::<GeevComplexFn<T, T::Component>>(&name)?;
        let mut w = vec![T::zero(); n];
        let mut rwork = vec![<T::Component as Scalar>::zero(); 2 * n];
        with_workspace(&spec, |ws| {
            let (lwork, work) = ws.slot_mut::<T>(0)?;
            let mut info = 0;
            geev(
                n32,
                &mut data,
                n32.max(1),
                &mut w,
                work,
                lwork,
                &mut rwork,
                &mut info,
            );
            check_info(&name, info)
        })?;
        if narrow && w.iter().all(|z| z.imag_component().is_zero()) {
            debug!("narrowing complex eigenvalues to real");
            return Ok(AnyVector::from(
                w.into_iter().map(Scalar::real_component).collect::<Vec<_>>(),
            ));
        }
        Ok(AnyVector::from(w))
    } else {
        let geev = table.lookup::<GeevRealFn<T>>(&name)?;
        let mut parts = vec![T::zero(); 2 * n];
        let (wr, wi) = parts.split_at_mut(n);
        with_workspace(&spec, |ws| {
            let (lwork, work) = ws.slot_mut::<T>(0)?;
            let mut info = 0;
            geev(n32, &mut data, n32.max(1), &mut *wr, &mut *wi, work, lwork, &mut info);
            check_info(&name, info)
        })?;
        combine_real_imag(&parts, n, narrow)
    }
}

/// Eigenvalues of a Hermitian (real symmetric) matrix, ascending.
///
/// The kernel reads one triangle: the lower one for a `LowerTriangular`
/// view, otherwise the upper one. Complex inputs need a second, real
/// workspace whose size is negotiated alongside the first.
#[instrument(level = "debug", skip_all, fields(element = %T::ELEMENT_TYPE))]
pub fn hermitian_eigenvalues<T: Scalar>(
    table: &KernelTable,
    a: &Matrix<T>,
) -> Result<Vec<T::Component>, MatrixError> {
    let n = require_square(a)?;
    let n32 = lapack_int(n)?;
    let resolved = resolve_procedure_name2("syev", "heev", T::ELEMENT_TYPE);
    debug!(
        procedure = %resolved.name,
        precision = %resolved.precision,
        is_complex = resolved.is_complex,
        "resolved hermitian eigen kernel"
    );
    let name = &resolved.name;
    let uplo = a.kind().uplo().unwrap_or(b'U');
    let mut data = a.to_dense().data();
    let mut w = vec![<T::Component as Scalar>::zero(); n];

    if resolved.is_complex {
        let heev = table.lookup::<HeevFn<T, T::Component>>(name)?;
        let specs = [
            WorkspaceSpec::of::<T>(),
            WorkspaceSpec::of::<T::Component>(),
        ];
        with_workspace(&specs, |ws| {
            let ((lwork, work), (lrwork, rwork)) = ws.pair_mut::<T, T::Component>(0, 1)?;
            let mut info = 0;
            heev(
                b'N',
                uplo,
                n32,
                &mut data,
                n32.max(1),
                &mut w,
                work,
                lwork,
                rwork,
                lrwork,
                &mut info,
            );
            check_info(name, info)
        })?;
    } else {
        let syev = table.lookup::<SyevFn<T, T::Component>>(name)?;
        with_workspace(&[WorkspaceSpec::of::<T>()], |ws| {
            let (lwork, work) = ws.slot_mut::<T>(0)?;
            let mut info = 0;
            syev(
                b'N',
                uplo,
                n32,
                &mut data,
                n32.max(1),
                &mut w,
                work,
                lwork,
                &mut info,
            );
            check_info(name, info)
        })?;
    }
    Ok(w)
}
