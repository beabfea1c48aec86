//! Kernel backends.
//!
//! Kernels are plain function pointers following LAPACK conventions, stored
//! in a [`KernelTable`] under their fully qualified [`ProcedureName`]. A
//! driver resolves the name for its element type and looks the kernel up with
//! the signature it expects:
//!
//! ```
//! use ndmatrix::backend::{GesvFn, KernelTable};
//! use ndmatrix::element::ElementType;
//! use ndmatrix::kernel::resolve_procedure_name;
//!
//! let table = KernelTable::reference();
//! let name = resolve_procedure_name("gesv", ElementType::Double);
//! let gesv = table.lookup::<GesvFn<f64>>(&name).unwrap();
//!
//! let (mut a, mut b, mut ipiv, mut info) = ([4.0], [2.0], [0], 0);
//! gesv(1, 1, &mut a, 1, &mut ipiv, &mut b, 1, &mut info);
//! assert_eq!((info, b[0]), (0, 0.5));
//! ```
//!
//! # Backends
//!
//! - `reference`: loop implementations with faer eigen solvers, registered
//!   by [`KernelTable::reference`]
//!
//! Other backends (system LAPACK, vendor libraries) register their own
//! function pointers under the same names.

mod faer_interop;
pub mod reference;

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::MatrixError;
use crate::kernel::ProcedureName;
use crate::scalar::{c32, c64};

/// `xGESV(n, nrhs, a, lda, ipiv, b, ldb, info)`
pub type GesvFn<T> = fn(i32, i32, &mut [T], i32, &mut [i32], &mut [T], i32, &mut i32);

/// `xPOTRF(uplo, n, a, lda, info)`
pub type PotrfFn<T> = fn(u8, i32, &mut [T], i32, &mut i32);

/// `xGELS(trans, m, n, nrhs, a, lda, b, ldb, work, lwork, info)`
pub type GelsFn<T> =
    fn(u8, i32, i32, i32, &mut [T], i32, &mut [T], i32, &mut [T], &mut i32, &mut i32);

/// `SGEEV`/`DGEEV` eigenvalues only: `(n, a, lda, wr, wi, work, lwork, info)`
pub type GeevRealFn<T> = fn(i32, &mut [T], i32, &mut [T], &mut [T], &mut [T], &mut i32, &mut i32);

/// `CGEEV`/`ZGEEV` eigenvalues only: `(n, a, lda, w, work, lwork, rwork, info)`
pub type GeevComplexFn<T, R> =
    fn(i32, &mut [T], i32, &mut [T], &mut [T], &mut i32, &mut [R], &mut i32);

/// `xSYEV(jobz, uplo, n, a, lda, w, work, lwork, info)`
///
/// `R` is the eigenvalue type, the same as `T` for the real kernels it names.
pub type SyevFn<T, R> = fn(u8, u8, i32, &mut [T], i32, &mut [R], &mut [T], &mut i32, &mut i32);

/// `xHEEV(jobz, uplo, n, a, lda, w, work, lwork, rwork, lrwork, info)`
pub type HeevFn<T, R> =
    fn(u8, u8, i32, &mut [T], i32, &mut [R], &mut [T], &mut i32, &mut [R], &mut i32, &mut i32);

/// Kernels keyed by qualified name.
///
/// Each entry remembers its function pointer type; [`KernelTable::lookup`]
/// only succeeds with exactly that type.
#[derive(Default)]
pub struct KernelTable {
    kernels: HashMap<ProcedureName, Box<dyn Any>>,
}

impl fmt::Debug for KernelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&ProcedureName> = self.kernels.keys().collect();
        names.sort();
        f.debug_struct("KernelTable").field("kernels", &names).finish()
    }
}

impl KernelTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `kernel` under `name`, replacing any previous entry.
    pub fn register<F: Copy + 'static>(&mut self, name: impl AsRef<str>, kernel: F) -> &mut Self {
        self.kernels
            .insert(ProcedureName::new(name), Box::new(kernel));
        self
    }

    pub fn contains(&self, name: &ProcedureName) -> bool {
        self.kernels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Fetch the kernel registered under `name` as an `F`.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::UnknownProcedure` if nothing is registered under
    /// `name` and `MatrixError::SignatureMismatch` if the entry has another
    /// type.
    pub fn lookup<F: Copy + 'static>(&self, name: &ProcedureName) -> Result<F, MatrixError> {
        let entry = self
            .kernels
            .get(name)
            .ok_or_else(|| MatrixError::UnknownProcedure { name: name.clone() })?;
        let kernel = entry
            .downcast_ref::<F>()
            .copied()
            .ok_or_else(|| MatrixError::SignatureMismatch { name: name.clone() })?;
        debug!(procedure = %name, "resolved kernel");
        Ok(kernel)
    }

    /// Table holding the [`reference`] kernels for all four element types.
    pub fn reference() -> Self {
        let mut table = Self::new();
        table
            .register::<GesvFn<f32>>("SGESV", reference::gesv::<f32>)
            .register::<GesvFn<f64>>("DGESV", reference::gesv::<f64>)
            .register::<GesvFn<c32>>("CGESV", reference::gesv::<c32>)
            .register::<GesvFn<c64>>("ZGESV", reference::gesv::<c64>)
            .register::<PotrfFn<f32>>("SPOTRF", reference::potrf::<f32>)
            .register::<PotrfFn<f64>>("DPOTRF", reference::potrf::<f64>)
            .register::<PotrfFn<c32>>("CPOTRF", reference::potrf::<c32>)
            .register::<PotrfFn<c64>>("ZPOTRF", reference::potrf::<c64>)
            .register::<GelsFn<f32>>("SGELS", reference::gels::<f32>)
            .register::<GelsFn<f64>>("DGELS", reference::gels::<f64>)
            .register::<GelsFn<c32>>("CGELS", reference::gels::<c32>)
            .register::<GelsFn<c64>>("ZGELS", reference::gels::<c64>)
            .register::<GeevRealFn<f32>>("SGEEV", reference::geev_real::<f32>)
            .register::<GeevRealFn<f64>>("DGEEV", reference::geev_real::<f64>)
            .register::<GeevComplexFn<c32, f32>>("CGEEV", reference::geev_complex::<c32>)
            .register::<GeevComplexFn<c64, f64>>("ZGEEV", reference::geev_complex::<c64>)
            .register::<SyevFn<f32, f32>>("SSYEV", reference::syev::<f32>)
            .register::<SyevFn<f64, f64>>("DSYEV", reference::syev::<f64>)
            .register::<HeevFn<c32, f32>>("CHEEV", reference::heev::<c32>)
            .register::<HeevFn<c64, f64>>("ZHEEV", reference::heev::<c64>);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::kernel::resolve_procedure_name;

    #[test]
    fn test_reference_covers_all_prefixes() {
        let table = KernelTable::reference();
        for root in ["gesv", "potrf", "gels", "geev"] {
            for ty in ElementType::ALL {
                assert!(table.contains(&resolve_procedure_name(root, ty)));
            }
        }
        assert_eq!(table.len(), 20);
    }

    #[test]
    fn test_unknown_procedure() {
        let table = KernelTable::reference();
        let name = ProcedureName::new("DGESVD");
        assert_eq!(
            table.lookup::<GesvFn<f64>>(&name).unwrap_err(),
            MatrixError::UnknownProcedure { name }
        );
    }

    #[test]
    fn test_signature_mismatch() {
        let table = KernelTable::reference();
        let name = ProcedureName::new("DGESV");
        assert_eq!(
            table.lookup::<GesvFn<f32>>(&name).unwrap_err(),
            MatrixError::SignatureMismatch { name }
        );
    }

    #[test]
    fn test_register_replaces() {
        fn failing(_: u8, _: i32, _: &mut [f64], _: i32, info: &mut i32) {
            *info = 1;
        }
        let mut table = KernelTable::reference();
        table.register::<PotrfFn<f64>>("dpotrf", failing);
        let potrf = table
            .lookup::<PotrfFn<f64>>(&ProcedureName::new("DPOTRF"))
            .unwrap();
        let mut info = 0;
        potrf(b'L', 1, &mut [1.0], 1, &mut info);
        assert_eq!(info, 1);
    }
}
