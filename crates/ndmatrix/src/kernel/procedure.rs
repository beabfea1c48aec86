//! Type-qualified kernel names.
//!
//! LAPACK-style kernels come in four variants distinguished by a one-letter
//! prefix:
//!
//! ```text
//! S  real-single     D  real-double
//! C  complex-single  Z  complex-double
//! ```

use std::fmt;

use crate::element::{ElementType, Precision};

/// Fully qualified kernel identifier, e.g. `DGESV`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcedureName(String);

impl ProcedureName {
    /// Wrap a name as-is (uppercased).
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcedureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Precision/domain prefix of an element type.
pub fn prefix(element_type: ElementType) -> char {
    match element_type {
        ElementType::Single => 'S',
        ElementType::Double => 'D',
        ElementType::ComplexSingle => 'C',
        ElementType::ComplexDouble => 'Z',
    }
}

/// Qualify `root` for `element_type`.
///
/// # Examples
///
/// ```
/// use ndmatrix::element::ElementType;
/// use ndmatrix::kernel::resolve_procedure_name;
///
/// assert_eq!(resolve_procedure_name("gesv", ElementType::Double).as_str(), "DGESV");
/// assert_eq!(resolve_procedure_name("gesv", ElementType::ComplexDouble).as_str(), "ZGESV");
/// ```
pub fn resolve_procedure_name(root: &str, element_type: ElementType) -> ProcedureName {
    ProcedureName::new(format!("{}{}", prefix(element_type), root))
}

/// Result of [`resolve_procedure_name2`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProcedure {
    pub name: ProcedureName,
    pub precision: Precision,
    pub is_complex: bool,
}

/// Qualify an operation whose real and complex variants have different roots
/// (for example `syev` vs `heev`).
///
/// Callers use `precision` and `is_complex` to pick the argument layout, since
/// complex variants commonly take extra real workspace.
pub fn resolve_procedure_name2(
    real_root: &str,
    complex_root: &str,
    element_type: ElementType,
) -> ResolvedProcedure {
    let is_complex = element_type.is_complex();
    let root = if is_complex { complex_root } else { real_root };
    ResolvedProcedure {
        name: resolve_procedure_name(root, element_type),
        precision: element_type.precision(),
        is_complex,
    }
}
