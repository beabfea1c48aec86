//! Structural kinds of a matrix view.
//!
//! All kinds share the same column-major addressing; a kind only decides
//! which coordinates are backed by storage (the canonical region) and what
//! the remaining coordinates read as.
//!
//! ```text
//! Dense           every (row, col)
//! UpperTriangular row <= col   (rest reads as zero)
//! LowerTriangular row >= col   (rest reads as zero)
//! Hermitian       row <= col   (rest reads as conj of the mirror)
//! ```

use std::fmt;

/// Structural kind of a matrix view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    #[default]
    Dense,
    UpperTriangular,
    LowerTriangular,
    Hermitian,
}

impl Kind {
    /// Whether `(row, col)` lies in the canonical (stored) region.
    #[inline]
    pub fn is_stored(self, row: usize, col: usize) -> bool {
        match self {
            Kind::Dense => true,
            Kind::UpperTriangular | Kind::Hermitian => row <= col,
            Kind::LowerTriangular => row >= col,
        }
    }

    /// Whether the implied region reads as zero.
    #[inline]
    pub fn is_triangular(self) -> bool {
        matches!(self, Kind::UpperTriangular | Kind::LowerTriangular)
    }

    /// Whether the kind requires `nrow == ncol`.
    #[inline]
    pub fn requires_square(self) -> bool {
        matches!(self, Kind::Hermitian)
    }

    /// LAPACK `uplo` flag of the stored triangle, if the kind stores one.
    pub fn uplo(self) -> Option<u8> {
        match self {
            Kind::UpperTriangular | Kind::Hermitian => Some(b'U'),
            Kind::LowerTriangular => Some(b'L'),
            Kind::Dense => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Dense => f.write_str("dense"),
            Kind::UpperTriangular => f.write_str("upper-triangular"),
            Kind::LowerTriangular => f.write_str("lower-triangular"),
            Kind::Hermitian => f.write_str("hermitian"),
        }
    }
}
