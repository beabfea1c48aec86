//! ndmatrix - typed matrices over LAPACK-style kernels
//!
//! This crate provides structured matrix views (dense, triangular, Hermitian)
//! over shared column-major storage, and the machinery for calling
//! type-specialized numerical kernels on them.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Drivers (drivers module)
//!     → solve, cholesky, least_squares, eigenvalues, hermitian_eigenvalues
//!
//! Level 2: Kernel protocol (kernel module)
//!     → resolve_procedure_name, with_workspace, check_info, result assembly
//!
//! Level 3: Backend (backend module)
//!     → KernelTable of function pointers, reference kernels
//! ```
//!
//! Views read and write their implied region according to their [`Kind`]:
//! a triangular view reads zero outside its triangle, a Hermitian view reads
//! the conjugate of the mirrored element. Kernels that write only one triangle
//! are followed by [`Matrix::normalize`].
//!
//! # Example
//!
//! ```
//! use ndmatrix::{Kind, Matrix, c64};
//!
//! let mut h: Matrix<c64> = Matrix::zeros(2, 2, Kind::Hermitian).unwrap();
//! h.set(0, 1, c64::new(1.0, 2.0)).unwrap();
//! assert_eq!(h.get(1, 0).unwrap(), c64::new(1.0, -2.0));
//!
//! // same storage, viewed as upper triangular
//! let u = h.view_as(Kind::UpperTriangular).unwrap();
//! assert_eq!(u.get(1, 0).unwrap(), c64::new(0.0, 0.0));
//! assert!(u.shares_storage_with(&h));
//! ```

pub mod any;
pub mod backend;
pub mod config;
pub mod construct;
pub mod drivers;
pub mod element;
pub mod error;
pub mod kernel;
pub mod kind;
pub mod layout;
pub mod matrix;
mod normalize;
pub mod scalar;
pub mod storage;

pub use any::{AnyMatrix, AnyVector, common_type_of};
pub use config::MatrixConfig;
pub use construct::{
    Literal, copy_matrix, create_matrix_from_sequence, make_matrix, make_matrix_from_buffer,
};
pub use drivers::{LeastSquares, cholesky, eigenvalues, hermitian_eigenvalues, least_squares, solve};
pub use element::{ElementType, Precision, common_type};
pub use error::{KernelError, MatrixError};
pub use kind::Kind;
pub use matrix::Matrix;
pub use scalar::{Scalar, c32, c64};
pub use storage::Storage;
