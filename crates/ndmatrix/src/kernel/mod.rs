//! Calling typed kernels correctly.
//!
//! A driver picks the element type of its operands, resolves the kernel's
//! qualified name, negotiates scratch memory, invokes the kernel, checks its
//! status code and finally reshapes the output buffer:
//!
//! ```text
//! resolve_procedure_name -> with_workspace { kernel call; check_info } -> assembly
//! ```

mod assembly;
mod info;
mod procedure;
pub mod workspace;

pub use assembly::{combine_real_imag, matrix_from_first_rows, sum_last_rows};
pub use info::check_info;
pub use procedure::{
    ProcedureName, ResolvedProcedure, prefix, resolve_procedure_name, resolve_procedure_name2,
};
pub use workspace::{
    Phase, QUERY_SIZE, WorkBuffer, WorkElement, WorkScalar, Workspace, WorkspaceSpec,
    with_workspace,
};
