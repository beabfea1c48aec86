//! Error types for ndmatrix.

use thiserror::Error;

use crate::element::ElementType;
use crate::kernel::ProcedureName;
use crate::kernel::workspace::WorkElement;
use crate::kind::Kind;

/// Errors that can occur in matrix construction, element access and kernel calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Coordinate outside `0..nrow` x `0..ncol`.
    #[error("index ({row}, {col}) is out of range for a {nrow}x{ncol} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        nrow: usize,
        ncol: usize,
    },

    /// Non-zero write into the implied-zero half of a triangular matrix.
    #[error("cannot write a non-zero value at ({row}, {col}): implied-zero region of a {kind} view")]
    ReadOnlyViolation { row: usize, col: usize, kind: Kind },

    /// Sequence length is not a multiple of the declared column count.
    #[error("sequence of length {len} cannot be split into {ncol} columns")]
    LengthMismatch { len: usize, ncol: usize },

    /// No element type can represent every operand.
    #[error("no element type can represent the combination {flags:#06b}")]
    UnrepresentableTypeCombination { flags: u8 },

    /// A native kernel reported a nonzero status code.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Hermitian matrices must be square.
    #[error("matrix must be square: got {nrow}x{ncol}")]
    NotSquare { nrow: usize, ncol: usize },

    /// Buffer length does not match `nrow * ncol`.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A runtime-typed value was accessed as the wrong element type.
    #[error("element type mismatch: expected {expected}, got {actual}")]
    ElementTypeMismatch {
        expected: ElementType,
        actual: ElementType,
    },

    /// A scratch buffer was accessed as the wrong element type.
    #[error("workspace slot {slot} holds {actual} elements, not {expected}")]
    WorkspaceTypeMismatch {
        slot: usize,
        expected: WorkElement,
        actual: WorkElement,
    },

    /// A scratch slot index beyond the declared workspace specifications.
    #[error("workspace slot {slot} does not exist ({count} declared)")]
    UnknownWorkspaceSlot { slot: usize, count: usize },

    /// No kernel is registered under this name.
    #[error("no kernel registered as {name}")]
    UnknownProcedure { name: ProcedureName },

    /// A kernel is registered under this name with a different signature.
    #[error("kernel {name} was requested with an incompatible signature")]
    SignatureMismatch { name: ProcedureName },

    /// A dimension does not fit the kernels' 32-bit integer arguments.
    #[error("dimension {value} exceeds the kernel integer range")]
    DimensionTooLarge { value: usize },

    /// An operation was asked to produce a view of a kind it cannot produce.
    #[error("{operation} cannot produce a {kind} matrix")]
    UnsupportedKind {
        operation: &'static str,
        kind: Kind,
    },
}

/// A nonzero `info` status returned by a kernel.
///
/// The sign of `info` decides the variant: negative codes name the offending
/// argument (`-info`, 1-based), positive codes report a numerical condition such
/// as a zero pivot or a non-positive leading minor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("{procedure}: illegal argument value (info = {info})")]
    InvalidArgument { procedure: ProcedureName, info: i32 },

    #[error("{procedure}: numerical failure (info = {info})")]
    NumericalFailure { procedure: ProcedureName, info: i32 },
}

impl KernelError {
    /// Name of the kernel that reported the status.
    pub fn procedure(&self) -> &ProcedureName {
        match self {
            Self::InvalidArgument { procedure, .. } | Self::NumericalFailure { procedure, .. } => {
                procedure
            }
        }
    }

    /// Raw status code.
    pub fn info(&self) -> i32 {
        match self {
            Self::InvalidArgument { info, .. } | Self::NumericalFailure { info, .. } => *info,
        }
    }
}
