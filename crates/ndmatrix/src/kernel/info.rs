//! Translating kernel status codes into errors.

use tracing::debug;

use crate::error::{KernelError, MatrixError};
use crate::kernel::ProcedureName;

/// Check the `info` status a kernel wrote back.
///
/// Zero is success. Negative codes become [`KernelError::InvalidArgument`],
/// positive codes [`KernelError::NumericalFailure`]; both keep the raw code.
///
/// # Examples
///
/// ```
/// use ndmatrix::kernel::{ProcedureName, check_info};
///
/// let name = ProcedureName::new("DPOTRF");
/// assert!(check_info(&name, 0).is_ok());
/// assert!(check_info(&name, 2).is_err());
/// ```
pub fn check_info(procedure: &ProcedureName, info: i32) -> Result<(), MatrixError> {
    if info == 0 {
        return Ok(());
    }
    debug!(%procedure, info, "kernel reported nonzero status");
    let procedure = procedure.clone();
    let err = if info < 0 {
        KernelError::InvalidArgument { procedure, info }
    } else {
        KernelError::NumericalFailure { procedure, info }
    };
    Err(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_success() {
        assert_eq!(check_info(&ProcedureName::new("DGESV"), 0), Ok(()));
    }

    #[test]
    fn test_negative_is_invalid_argument() {
        let err = check_info(&ProcedureName::new("DGESV"), -3).unwrap_err();
        match err {
            MatrixError::Kernel(KernelError::InvalidArgument { procedure, info }) => {
                assert_eq!(procedure.as_str(), "DGESV");
                assert_eq!(info, -3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_positive_is_numerical_failure() {
        let err = check_info(&ProcedureName::new("ZPOTRF"), 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Kernel(KernelError::NumericalFailure {
                procedure: ProcedureName::new("ZPOTRF"),
                info: 2
            })
        );
    }
}
