//! Element types and common-type promotion.
//!
//! Each element type owns one capability bit:
//!
//! ```text
//! Single        = 0b0001
//! Double        = 0b0010
//! ComplexSingle = 0b0100
//! ComplexDouble = 0b1000
//! ```
//!
//! Promotion ORs the bits of every operand and maps the union back to the
//! narrowest type that is at least as precise as every operand and complex if
//! any operand is complex. Promotion never narrows.

use std::fmt;

use crate::error::MatrixError;

/// Floating point precision of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Precision {
    Single,
    Double,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => f.write_str("single"),
            Precision::Double => f.write_str("double"),
        }
    }
}

/// Runtime tag for the four supported element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Single,
    Double,
    ComplexSingle,
    ComplexDouble,
}

impl ElementType {
    /// All element types, narrowest first.
    pub const ALL: [ElementType; 4] = [
        ElementType::Single,
        ElementType::Double,
        ElementType::ComplexSingle,
        ElementType::ComplexDouble,
    ];

    /// Capability bit of this type.
    #[inline]
    pub fn flag(self) -> u8 {
        match self {
            ElementType::Single => 1,
            ElementType::Double => 2,
            ElementType::ComplexSingle => 4,
            ElementType::ComplexDouble => 8,
        }
    }

    /// Build an element type from its precision and domain.
    pub fn from_parts(precision: Precision, is_complex: bool) -> Self {
        match (precision, is_complex) {
            (Precision::Single, false) => ElementType::Single,
            (Precision::Double, false) => ElementType::Double,
            (Precision::Single, true) => ElementType::ComplexSingle,
            (Precision::Double, true) => ElementType::ComplexDouble,
        }
    }

    /// Map a union of capability bits to the narrowest type covering all of them.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::UnrepresentableTypeCombination` for an empty set
    /// or bits outside the four known flags.
    pub fn from_flags(flags: u8) -> Result<Self, MatrixError> {
        if flags == 0 || flags & !0b1111 != 0 {
            return Err(MatrixError::UnrepresentableTypeCombination { flags });
        }
        let is_complex = flags & 0b1100 != 0;
        let is_double = flags & 0b1010 != 0;
        let precision = if is_double {
            Precision::Double
        } else {
            Precision::Single
        };
        Ok(Self::from_parts(precision, is_complex))
    }

    #[inline]
    pub fn precision(self) -> Precision {
        match self {
            ElementType::Single | ElementType::ComplexSingle => Precision::Single,
            ElementType::Double | ElementType::ComplexDouble => Precision::Double,
        }
    }

    #[inline]
    pub fn is_complex(self) -> bool {
        matches!(self, ElementType::ComplexSingle | ElementType::ComplexDouble)
    }

    /// Real type of the same precision.
    pub fn real_type(self) -> Self {
        Self::from_parts(self.precision(), false)
    }

    /// Complex type of the same precision.
    pub fn complex_type(self) -> Self {
        Self::from_parts(self.precision(), true)
    }

    /// Double precision type of the same domain.
    pub fn widened(self) -> Self {
        Self::from_parts(Precision::Double, self.is_complex())
    }

    /// Size of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            ElementType::Single => 4,
            ElementType::Double | ElementType::ComplexSingle => 8,
            ElementType::ComplexDouble => 16,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Single => f.write_str("real-single"),
            ElementType::Double => f.write_str("real-double"),
            ElementType::ComplexSingle => f.write_str("complex-single"),
            ElementType::ComplexDouble => f.write_str("complex-double"),
        }
    }
}

/// Narrowest element type that can represent every operand.
///
/// # Errors
///
/// Returns `MatrixError::UnrepresentableTypeCombination` if `operands` is empty.
///
/// # Examples
///
/// ```
/// use ndmatrix::element::{ElementType, common_type};
///
/// let ty = common_type(&[ElementType::Single, ElementType::ComplexDouble]).unwrap();
/// assert_eq!(ty, ElementType::ComplexDouble);
///
/// // single + complex-single stays single precision
/// let ty = common_type(&[ElementType::Single, ElementType::ComplexSingle]).unwrap();
/// assert_eq!(ty, ElementType::ComplexSingle);
/// ```
pub fn common_type(operands: &[ElementType]) -> Result<ElementType, MatrixError> {
    let flags = operands.iter().fold(0u8, |acc, ty| acc | ty.flag());
    ElementType::from_flags(flags)
}
