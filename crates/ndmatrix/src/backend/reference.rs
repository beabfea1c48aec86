//! Reference kernels.
//!
//! Thin wrappers following LAPACK calling conventions over faer's dense
//! solvers: column-major arrays with explicit leading dimensions, an `info`
//! out-parameter (`-i` for a bad `i`-th argument, positive for a numerical
//! failure) and `lwork = -1` workspace queries that report the required size
//! through the size slot and the first work element.
//!
//! Every element type is widened to complex double, factored by faer and
//! narrowed on write-back.

use tracing::debug;

use crate::backend::faer_interop::{
    cholesky_lower, gather_c64, general_eigenvalues, hermitian_from_triangle, householder_qr,
    lu_solve, scatter_c64, self_adjoint_eigenvalues,
};
use crate::layout::offset;
use crate::scalar::{Scalar, c64};

/// Negated 1-based position of the first failed argument check, or zero.
fn argument_error(bad: &[bool]) -> i32 {
    bad.iter()
        .position(|&b| b)
        .map_or(0, |i| -(i as i32 + 1))
}

/// Elements needed for a `rows x cols` block with leading dimension `ld`.
///
/// An empty block needs none, whatever `ld` is.
fn needed(ld: i32, rows: i32, cols: i32) -> usize {
    if rows <= 0 || cols <= 0 {
        return 0;
    }
    ld.max(0) as usize * (cols as usize - 1) + rows as usize
}

fn too_short<T>(slice: &[T], len: i32) -> bool {
    slice.len() < len.max(0) as usize
}

/// Shared handling of the `lwork` argument.
///
/// Returns `Some(())` when the caller should go on with the computation.
fn negotiate<T: Scalar>(work: &mut [T], lwork: &mut i32, minimum: i32) -> Option<()> {
    if *lwork == -1 {
        *lwork = minimum;
        if let Some(w) = work.first_mut() {
            *w = T::from_real_f64(minimum as f64);
        }
        return None;
    }
    Some(())
}

const ZERO: c64 = c64::new(0.0, 0.0);

/// LAPACK style interchanges: row `k` was swapped with row `ipiv[k]`
/// (1-based), applied in order `k = 0, 1, ...`.
fn interchanges(row_order: &[usize]) -> Vec<i32> {
    let n = row_order.len();
    let mut current: Vec<usize> = (0..n).collect();
    let mut position: Vec<usize> = (0..n).collect();
    let mut ipiv = Vec::with_capacity(n);
    for k in 0..n {
        let p = position[row_order[k]];
        ipiv.push(p as i32 + 1);
        current.swap(k, p);
        position[current[k]] = k;
        position[current[p]] = p;
    }
    ipiv
}

/// Solve `A X = B` by LU factorization with partial pivoting.
///
/// On exit `a` holds the `L` and `U` factors, `ipiv` the 1-based row
/// interchanges and `b` the solution. `info = k` means `U(k, k)` is exactly
/// zero; the factorization is complete but no solution is computed.
#[allow(clippy::too_many_arguments)]
pub fn gesv<T: Scalar>(
    n: i32,
    nrhs: i32,
    a: &mut [T],
    lda: i32,
    ipiv: &mut [i32],
    b: &mut [T],
    ldb: i32,
    info: &mut i32,
) {
    *info = argument_error(&[
        n < 0,
        nrhs < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
        too_short(ipiv, n),
        b.len() < needed(ldb, n, nrhs),
        ldb < n.max(1),
    ]);
    if *info != 0 || n == 0 {
        return;
    }
    let (n, nrhs, lda, ldb) = (n as usize, nrhs as usize, lda as usize, ldb as usize);

    let mut x = gather_c64(b, ldb, n, nrhs);
    let lu = lu_solve(&gather_c64(a, lda, n, n), n, &mut x, nrhs);
    scatter_c64(&lu.factors, a, lda, n);
    ipiv[..n].copy_from_slice(&interchanges(&lu.row_order));
    match lu.zero_pivot {
        Some(k) => *info = k as i32 + 1,
        None => scatter_c64(&x, b, ldb, n),
    }
}

/// Cholesky factorization of a Hermitian positive definite matrix.
///
/// Only the `uplo` triangle of `a` is read and only that triangle is
/// overwritten (with `U` such that `A = U^H U`, or `L` such that `A = L L^H`).
/// The opposite triangle is left as it was. `info = k` means the leading
/// minor of order `k` is not positive definite; `a` is then unchanged.
pub fn potrf<T: Scalar>(uplo: u8, n: i32, a: &mut [T], lda: i32, info: &mut i32) {
    let uplo = uplo.to_ascii_uppercase();
    *info = argument_error(&[
        uplo != b'U' && uplo != b'L',
        n < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
    ]);
    if *info != 0 || n == 0 {
        return;
    }
    let (n, lda) = (n as usize, lda as usize);

    let mut packed = gather_c64(a, lda, n, n);
    hermitian_from_triangle(&mut packed, n, uplo);
    let l = match cholesky_lower(&packed, n) {
        Ok(l) => l,
        Err(order) => {
            *info = order as i32;
            return;
        }
    };
    for col in 0..n {
        for row in col..n {
            let value = l[offset(row, col, n)];
            if uplo == b'U' {
                a[offset(col, row, lda)] = T::from_c64_lossy(value.conjugate());
            } else {
                a[offset(row, col, lda)] = T::from_c64_lossy(value);
            }
        }
    }
}

/// Minimum `lwork` accepted by [`gels`].
pub fn gels_min_lwork(m: i32, n: i32, nrhs: i32) -> i32 {
    let mn = m.min(n).max(0);
    (mn + mn.max(nrhs)).max(1)
}

/// Least squares or minimum norm solution of `A X = B` for full rank `A`.
///
/// `b` is `max(m, n) x nrhs` with leading dimension `ldb`. On exit the first
/// `n` rows of each column hold the solution; when `m > n` rows `n..m` hold
/// the residual components, whose squared sum is the squared residual norm.
/// Only `trans = 'N'` is supported. `info = k` means `R(k, k)` is zero, i.e.
/// `A` is rank deficient. `a` is left unchanged.
#[allow(clippy::too_many_arguments)]
pub fn gels<T: Scalar>(
    trans: u8,
    m: i32,
    n: i32,
    nrhs: i32,
    a: &mut [T],
    lda: i32,
    b: &mut [T],
    ldb: i32,
    work: &mut [T],
    lwork: &mut i32,
    info: &mut i32,
) {
    let minimum = gels_min_lwork(m, n, nrhs);
    let query = *lwork == -1;
    *info = argument_error(&[
        trans.to_ascii_uppercase() != b'N',
        m < 0,
        n < 0,
        nrhs < 0,
        a.len() < needed(lda, m, n),
        lda < m.max(1),
        b.len() < needed(ldb, m.max(n), nrhs),
        ldb < m.max(n).max(1),
        !query && too_short(work, *lwork),
        !query && *lwork < minimum,
    ]);
    if *info != 0 || negotiate(work, lwork, minimum).is_none() {
        return;
    }
    let (m, n, nrhs, lda, ldb) = (
        m as usize,
        n as usize,
        nrhs as usize,
        lda as usize,
        ldb as usize,
    );
    let rows = m.max(n);
    if m.min(n) == 0 {
        for r in 0..nrhs {
            for row in 0..rows {
                b[offset(row, r, ldb)] = T::zero();
            }
        }
        return;
    }

    let mut rhs = gather_c64(b, ldb, rows, nrhs);
    *info = if m >= n {
        overdetermined(&gather_c64(a, lda, m, n), m, n, &mut rhs)
    } else {
        let mut adjoint = vec![ZERO; n * m];
        for col in 0..n {
            for row in 0..m {
                adjoint[offset(col, row, n)] = a[offset(row, col, lda)].to_c64().conjugate();
            }
        }
        underdetermined(&adjoint, m, n, &mut rhs)
    };
    if *info == 0 {
        scatter_c64(&rhs, b, ldb, rows);
    }
}

/// Position of the first zero on the diagonal of a packed `n x n` `R`.
fn rank_deficiency(r: &[c64], n: usize) -> Option<i32> {
    (0..n)
        .find(|&k| r[offset(k, k, n)] == ZERO)
        .map(|k| k as i32 + 1)
}

/// `A = Q R`, then `Q^H b` in place and `R x = (Q^H b)[..n]`. `rhs` holds
/// `m`-row columns.
fn overdetermined(packed: &[c64], m: usize, n: usize, rhs: &mut [c64]) -> i32 {
    let (q, r) = householder_qr(packed, m, n);
    if let Some(info) = rank_deficiency(&r, n) {
        return info;
    }
    for col in rhs.chunks_exact_mut(m) {
        let projected: Vec<c64> = (0..m)
            .map(|i| (0..m).fold(ZERO, |acc, k| acc + q[offset(k, i, m)].conjugate() * col[k]))
            .collect();
        col.copy_from_slice(&projected);
        for k in (0..n).rev() {
            let s = (k + 1..n).fold(col[k], |acc, j| acc - r[offset(k, j, n)] * col[j]);
            col[k] = s / r[offset(k, k, n)];
        }
    }
    0
}

/// Minimum norm solution through `A^H = Q R`: `R^H y = b`, `x = Q[:, ..m] y`.
/// `adjoint` is the packed `n x m` `A^H`; `rhs` holds `n`-row columns with
/// the right-hand side in the first `m` rows.
fn underdetermined(adjoint: &[c64], m: usize, n: usize, rhs: &mut [c64]) -> i32 {
    let (q, r) = householder_qr(adjoint, n, m);
    if let Some(info) = rank_deficiency(&r, m) {
        return info;
    }
    for col in rhs.chunks_exact_mut(n) {
        for i in 0..m {
            let s = (0..i).fold(col[i], |acc, k| acc - r[offset(k, i, m)].conjugate() * col[k]);
            col[i] = s / r[offset(i, i, m)].conjugate();
        }
        let y = col[..m].to_vec();
        for (i, x) in col.iter_mut().enumerate() {
            *x = y
                .iter()
                .enumerate()
                .fold(ZERO, |acc, (k, &yk)| acc + q[offset(i, k, n)] * yk);
        }
    }
    0
}

/// Snap near-zero imaginary parts of the eigenvalues of a real matrix and
/// emit complex ones as exact conjugate pairs, positive imaginary part first.
fn real_spectrum(w: Vec<c64>, scale: f64) -> Vec<c64> {
    let tol = 16.0 * w.len() as f64 * f64::EPSILON * scale;
    let snapped: Vec<c64> = w
        .into_iter()
        .map(|z| if z.im.abs() <= tol { c64::new(z.re, 0.0) } else { z })
        .collect();
    let mut paired = Vec::with_capacity(snapped.len());
    for &z in &snapped {
        if z.im == 0.0 {
            paired.push(z);
        } else if z.im > 0.0 {
            paired.push(z);
            paired.push(z.conjugate());
        }
    }
    if paired.len() == snapped.len() {
        paired
    } else {
        snapped
    }
}

/// Minimum `lwork` accepted by [`geev_real`].
pub fn geev_real_min_lwork(n: i32) -> i32 {
    (3 * n).max(1)
}

/// Eigenvalues of a general real matrix.
///
/// Real and imaginary parts go to `wr` and `wi`. Real eigenvalues have an
/// imaginary part of exactly zero; complex ones appear as consecutive
/// conjugate pairs. `info > 0` means the eigenvalue iteration did not
/// converge. `a` is left unchanged.
#[allow(clippy::too_many_arguments)]
pub fn geev_real<T: Scalar>(
    n: i32,
    a: &mut [T],
    lda: i32,
    wr: &mut [T],
    wi: &mut [T],
    work: &mut [T],
    lwork: &mut i32,
    info: &mut i32,
) {
    let minimum = geev_real_min_lwork(n);
    let query = *lwork == -1;
    *info = argument_error(&[
        n < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
        too_short(wr, n),
        too_short(wi, n),
        !query && too_short(work, *lwork),
        !query && *lwork < minimum,
    ]);
    if *info != 0 || negotiate(work, lwork, minimum).is_none() || n == 0 {
        return;
    }
    let (n, lda) = (n as usize, lda as usize);
    let packed = gather_c64(a, lda, n, n);
    let scale = packed.iter().map(|z| z.abs_sqr()).sum::<f64>().sqrt();
    match general_eigenvalues(&packed, n) {
        Ok(w) => {
            for (i, z) in real_spectrum(w, scale).into_iter().enumerate() {
                wr[i] = T::from_real_f64(z.re);
                wi[i] = T::from_real_f64(z.im);
            }
        }
        Err(err) => {
            debug!(?err, "eigenvalue iteration failed");
            *info = 1;
        }
    }
}

/// Minimum `lwork` accepted by [`geev_complex`].
pub fn geev_complex_min_lwork(n: i32) -> i32 {
    (2 * n).max(1)
}

/// Eigenvalues of a general complex matrix into `w`.
///
/// `rwork` must hold at least `2 n` elements. `a` is left unchanged.
#[allow(clippy::too_many_arguments)]
pub fn geev_complex<T: Scalar>(
    n: i32,
    a: &mut [T],
    lda: i32,
    w: &mut [T],
    work: &mut [T],
    lwork: &mut i32,
    rwork: &mut [T::Component],
    info: &mut i32,
) {
    let minimum = geev_complex_min_lwork(n);
    let query = *lwork == -1;
    *info = argument_error(&[
        n < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
        too_short(w, n),
        !query && too_short(work, *lwork),
        !query && *lwork < minimum,
        too_short(rwork, 2 * n),
    ]);
    if *info != 0 || negotiate(work, lwork, minimum).is_none() || n == 0 {
        return;
    }
    let (n, lda) = (n as usize, lda as usize);
    match general_eigenvalues(&gather_c64(a, lda, n, n), n) {
        Ok(values) => {
            for (slot, z) in w.iter_mut().zip(values) {
                *slot = T::from_c64_lossy(z);
            }
        }
        Err(err) => {
            debug!(?err, "eigenvalue iteration failed");
            *info = 1;
        }
    }
}

/// Eigenvalues of the Hermitian matrix held in the `uplo` triangle of `a`,
/// written to `w` in ascending order. Returns the `info` code.
fn hermitian_eigenvalues_into<T: Scalar, W: Scalar>(
    uplo: u8,
    n: usize,
    a: &[T],
    lda: usize,
    w: &mut [W],
) -> i32 {
    let mut packed = gather_c64(a, lda, n, n);
    hermitian_from_triangle(&mut packed, n, uplo);
    match self_adjoint_eigenvalues(&packed, n) {
        Ok(values) => {
            for (slot, x) in w.iter_mut().zip(values) {
                *slot = W::from_real_f64(x);
            }
            0
        }
        Err(err) => {
            debug!(?err, "symmetric eigenvalue iteration failed");
            1
        }
    }
}

/// Minimum `lwork` accepted by [`syev`].
pub fn syev_min_lwork(n: i32) -> i32 {
    (3 * n - 1).max(1)
}

/// Eigenvalues of a real symmetric matrix, ascending.
///
/// Only `jobz = 'N'` (eigenvalues only) is supported; `a` is left unchanged.
#[allow(clippy::too_many_arguments)]
pub fn syev<T: Scalar>(
    jobz: u8,
    uplo: u8,
    n: i32,
    a: &mut [T],
    lda: i32,
    w: &mut [T::Component],
    work: &mut [T],
    lwork: &mut i32,
    info: &mut i32,
) {
    let uplo = uplo.to_ascii_uppercase();
    let minimum = syev_min_lwork(n);
    let query = *lwork == -1;
    *info = argument_error(&[
        jobz.to_ascii_uppercase() != b'N',
        uplo != b'U' && uplo != b'L',
        n < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
        too_short(w, n),
        !query && too_short(work, *lwork),
        !query && *lwork < minimum,
    ]);
    if *info != 0 || negotiate(work, lwork, minimum).is_none() || n == 0 {
        return;
    }
    *info = hermitian_eigenvalues_into(uplo, n as usize, a, lda as usize, w);
}

/// Minimum `(lwork, lrwork)` accepted by [`heev`].
pub fn heev_min_lwork(n: i32) -> (i32, i32) {
    ((2 * n - 1).max(1), (3 * n - 2).max(1))
}

/// Eigenvalues of a complex Hermitian matrix, ascending.
///
/// Takes a second, real workspace `rwork` whose size is negotiated through
/// `lrwork` like `lwork`. A query is made when either size is `-1`; both
/// sizes are then reported. Only `jobz = 'N'` is supported.
#[allow(clippy::too_many_arguments)]
pub fn heev<T: Scalar>(
    jobz: u8,
    uplo: u8,
    n: i32,
    a: &mut [T],
    lda: i32,
    w: &mut [T::Component],
    work: &mut [T],
    lwork: &mut i32,
    rwork: &mut [T::Component],
    lrwork: &mut i32,
    info: &mut i32,
) {
    let uplo = uplo.to_ascii_uppercase();
    let (min_work, min_rwork) = heev_min_lwork(n);
    let query = *lwork == -1 || *lrwork == -1;
    *info = argument_error(&[
        jobz.to_ascii_uppercase() != b'N',
        uplo != b'U' && uplo != b'L',
        n < 0,
        a.len() < needed(lda, n, n),
        lda < n.max(1),
        too_short(w, n),
        !query && too_short(work, *lwork),
        !query && *lwork < min_work,
        !query && too_short(rwork, *lrwork),
        !query && *lrwork < min_rwork,
    ]);
    if *info != 0 {
        return;
    }
    if query {
        *lwork = -1;
        *lrwork = -1;
        negotiate(work, lwork, min_work);
        negotiate(rwork, lrwork, min_rwork);
        return;
    }
    if n == 0 {
        return;
    }
    *info = hermitian_eigenvalues_into(uplo, n as usize, a, lda as usize, w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gesv_2x2() {
        // [[2, 1], [1, 3]] x = [3, 5]  ->  x = [0.8, 1.4]
        let mut a = [2.0f64, 1.0, 1.0, 3.0];
        let mut b = [3.0, 5.0];
        let mut ipiv = [0; 2];
        let mut info = 0;
        gesv(2, 1, &mut a, 2, &mut ipiv, &mut b, 2, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(b[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(b[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_gesv_pivots() {
        // zero leading entry forces a row swap
        let mut a = [0.0f64, 1.0, 1.0, 0.0];
        let mut b = [2.0, 3.0];
        let mut ipiv = [0; 2];
        let mut info = 0;
        gesv(2, 1, &mut a, 2, &mut ipiv, &mut b, 2, &mut info);
        assert_eq!(info, 0);
        assert_eq!(ipiv, [2, 2]);
        assert_relative_eq!(b[0], 3.0);
        assert_relative_eq!(b[1], 2.0);
    }

    #[test]
    fn test_gesv_singular() {
        let mut a = [1.0f64, 2.0, 2.0, 4.0];
        let mut b = [1.0, 1.0];
        let mut ipiv = [0; 2];
        let mut info = 0;
        gesv(2, 1, &mut a, 2, &mut ipiv, &mut b, 2, &mut info);
        assert_eq!(info, 2);
        // right-hand side untouched
        assert_eq!(b, [1.0, 1.0]);
    }

    #[test]
    fn test_gesv_bad_leading_dimension() {
        let mut a = [1.0f64; 9];
        let mut b = [1.0; 3];
        let mut ipiv = [0; 3];
        let mut info = 0;
        gesv(3, 1, &mut a, 2, &mut ipiv, &mut b, 3, &mut info);
        assert_eq!(info, -4);
    }

    #[test]
    fn test_interchanges_reproduce_row_order() {
        let row_order = [2, 0, 3, 1];
        let ipiv = interchanges(&row_order);
        let mut rows: Vec<usize> = (0..4).collect();
        for (k, &p) in ipiv.iter().enumerate() {
            assert!(p as usize > k);
            rows.swap(k, p as usize - 1);
        }
        assert_eq!(rows, row_order);
    }

    #[test]
    fn test_empty_problems_need_no_elements() {
        let mut info = 7;
        gesv::<f64>(0, 2, &mut [], 1, &mut [], &mut [], 1, &mut info);
        assert_eq!(info, 0);

        // 0 x 2 system: the solution rows are zeroed
        let mut b = [5.0f64, 5.0];
        let mut lwork = gels_min_lwork(0, 2, 1);
        let mut work = vec![0.0; lwork as usize];
        gels(b'N', 0, 2, 1, &mut [], 1, &mut b, 2, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_eq!(b, [0.0, 0.0]);

        potrf::<c64>(b'U', 0, &mut [], 1, &mut info);
        assert_eq!(info, 0);
    }

    #[test]
    fn test_short_buffer_still_rejected() {
        // 2 x 2 with lda = 3 needs 3 + 2 elements
        let mut a = [1.0f64; 4];
        let mut info = 0;
        potrf(b'L', 2, &mut a, 3, &mut info);
        assert_eq!(info, -3);
    }

    #[test]
    fn test_gesv_complex() {
        // i x = 1  ->  x = -i
        let mut a = [c64::new(0.0, 1.0)];
        let mut b = [c64::new(1.0, 0.0)];
        let mut ipiv = [0];
        let mut info = 0;
        gesv(1, 1, &mut a, 1, &mut ipiv, &mut b, 1, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(b[0].re, 0.0);
        assert_relative_eq!(b[0].im, -1.0);
    }

    #[test]
    fn test_potrf_lower_leaves_upper() {
        // [[4, 2], [2, 5]] = L L^T with L = [[2, 0], [1, 2]]
        let mut a = [4.0f64, 2.0, -7.0, 5.0];
        let mut info = 0;
        potrf(b'L', 2, &mut a, 2, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(a[0], 2.0);
        assert_relative_eq!(a[1], 1.0);
        assert_relative_eq!(a[3], 2.0);
        assert_eq!(a[2], -7.0);
    }

    #[test]
    fn test_potrf_upper() {
        let mut a = [4.0f32, 99.0, 2.0, 5.0];
        let mut info = 0;
        potrf(b'U', 2, &mut a, 2, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(a[0], 2.0);
        assert_relative_eq!(a[2], 1.0);
        assert_relative_eq!(a[3], 2.0);
        assert_eq!(a[1], 99.0);
    }

    #[test]
    fn test_potrf_not_positive_definite() {
        let mut a = [1.0f64, 2.0, 2.0, 1.0];
        let mut info = 0;
        potrf(b'L', 2, &mut a, 2, &mut info);
        assert_eq!(info, 2);
    }

    #[test]
    fn test_potrf_bad_uplo() {
        let mut a = [1.0f64];
        let mut info = 0;
        potrf(b'X', 1, &mut a, 1, &mut info);
        assert_eq!(info, -1);
    }

    #[test]
    fn test_gels_query() {
        let mut a = [0.0f64; 6];
        let mut b = [0.0; 3];
        let mut work = [0.0];
        let mut lwork = -1;
        let mut info = 0;
        gels(b'N', 3, 2, 1, &mut a, 3, &mut b, 3, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_eq!(lwork, gels_min_lwork(3, 2, 1));
        assert_eq!(work[0], lwork as f64);
    }

    #[test]
    fn test_gels_overdetermined_fit() {
        // fit y = c0 + c1 t through (0, 1), (1, 2), (2, 2)
        let mut a = [1.0f64, 1.0, 1.0, 0.0, 1.0, 2.0];
        let mut b = [1.0, 2.0, 2.0];
        let mut lwork = gels_min_lwork(3, 2, 1);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        gels(b'N', 3, 2, 1, &mut a, 3, &mut b, 3, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(b[0], 7.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(b[1], 0.5, epsilon = 1e-12);
        // squared residual norm is 1/6
        assert_relative_eq!(b[2] * b[2], 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gels_underdetermined_min_norm() {
        // x0 + x1 = 2  ->  minimum norm solution (1, 1)
        let mut a = [1.0f64, 1.0];
        let mut b = [2.0, 0.0];
        let mut lwork = gels_min_lwork(1, 2, 1);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        gels(b'N', 1, 2, 1, &mut a, 1, &mut b, 2, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(b[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(b[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gels_rank_deficient() {
        let mut a = [1.0f64, 1.0, 0.0, 0.0];
        let mut b = [1.0, 1.0];
        let mut lwork = 4;
        let mut work = [0.0; 4];
        let mut info = 0;
        gels(b'N', 2, 2, 1, &mut a, 2, &mut b, 2, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 2);
    }

    #[test]
    fn test_gels_small_workspace() {
        let mut a = [1.0f64; 4];
        let mut b = [1.0; 2];
        let mut lwork = 1;
        let mut work = [0.0];
        let mut info = 0;
        gels(b'N', 2, 2, 1, &mut a, 2, &mut b, 2, &mut work, &mut lwork, &mut info);
        assert_eq!(info, -10);
    }

    #[test]
    fn test_geev_real_complex_pair() {
        let mut a = [0.0f64, 1.0, -1.0, 0.0];
        let (mut wr, mut wi) = ([0.0; 2], [0.0; 2]);
        let mut lwork = geev_real_min_lwork(2);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        geev_real(2, &mut a, 2, &mut wr, &mut wi, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(wr[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(wi[0], 1.0, epsilon = 1e-12);
        assert_eq!(wi[1], -wi[0]);
    }

    #[test]
    fn test_geev_real_exact_zero_imaginary() {
        // upper triangular: eigenvalues are the diagonal
        let mut a = [2.0f64, 0.0, 5.0, -3.0];
        let (mut wr, mut wi) = ([0.0; 2], [0.0; 2]);
        let mut lwork = geev_real_min_lwork(2);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        geev_real(2, &mut a, 2, &mut wr, &mut wi, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_eq!(wi, [0.0, 0.0]);
        let mut wr = wr.to_vec();
        wr.sort_by(f64::total_cmp);
        assert_relative_eq!(wr[0], -3.0, epsilon = 1e-12);
        assert_relative_eq!(wr[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_syev_reads_one_triangle() {
        // lower triangle of [[2, 1], [1, 2]], garbage above
        let mut a = [2.0f64, 1.0, 100.0, 2.0];
        let mut w = [0.0; 2];
        let mut lwork = syev_min_lwork(2);
        let mut work = vec![0.0; lwork as usize];
        let mut info = 0;
        syev(b'N', b'L', 2, &mut a, 2, &mut w, &mut work, &mut lwork, &mut info);
        assert_eq!(info, 0);
        assert_relative_eq!(w[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_heev_query_reports_both_sizes() {
        let mut a = [c64::new(0.0, 0.0); 9];
        let mut w = [0.0f64; 3];
        let mut work = [c64::new(0.0, 0.0)];
        let mut rwork = [0.0f64];
        let (mut lwork, mut lrwork) = (-1, -1);
        let mut info = 0;
        heev(
            b'N', b'U', 3, &mut a, 3, &mut w, &mut work, &mut lwork, &mut rwork, &mut lrwork,
            &mut info,
        );
        assert_eq!(info, 0);
        assert_eq!((lwork, lrwork), heev_min_lwork(3));
    }

    #[test]
    fn test_heev_pauli_y() {
        // [[0, -i], [i, 0]] has eigenvalues -1 and 1
        let mut a = [
            c64::new(0.0, 0.0),
            c64::new(0.0, 1.0),
            c64::new(0.0, -1.0),
            c64::new(0.0, 0.0),
        ];
        let mut w = [0.0f64; 2];
        let (mut lwork, mut lrwork) = heev_min_lwork(2);
        let mut work = vec![c64::new(0.0, 0.0); lwork as usize];
        let mut rwork = vec![0.0; lrwork as usize];
        let mut info = 0;
        heev(
            b'N', b'U', 2, &mut a, 2, &mut w, &mut work, &mut lwork, &mut rwork, &mut lrwork,
            &mut info,
        );
        assert_eq!(info, 0);
        assert_relative_eq!(w[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(w[1], 1.0, epsilon = 1e-12);
    }
}
