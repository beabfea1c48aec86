//! Scalar trait for matrix element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub use faer::{c32, c64};

use crate::any::{AnyMatrix, AnyVector};
use crate::element::ElementType;
use crate::kernel::workspace::WorkScalar;
use crate::matrix::Matrix;

/// Trait for scalar types supported by ndmatrix.
///
/// This trait wraps faer's `ComplexField` with the arithmetic and conversion
/// operations the views and kernels need, and links each Rust type to its
/// runtime [`ElementType`] tag.
pub trait Scalar:
    ComplexField
    + WorkScalar
    + Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Runtime tag of this type.
    const ELEMENT_TYPE: ElementType;

    /// Real type of the same precision.
    type Component: Scalar;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Complex conjugate; identity for real types.
    fn conjugate(self) -> Self;

    /// Squared magnitude, widened to f64.
    fn abs_sqr(self) -> f64;

    #[inline]
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Real part as the component type.
    fn real_component(self) -> Self::Component;

    /// Imaginary part as the component type (zero for real types).
    fn imag_component(self) -> Self::Component;

    fn from_real_f64(x: f64) -> Self;

    /// Widen to complex double. Exact for every supported type.
    fn to_c64(self) -> c64;

    /// Narrow from complex double, dropping the imaginary part of real types.
    fn from_c64_lossy(z: c64) -> Self;

    /// Narrow from complex double, refusing to drop a nonzero imaginary part.
    fn try_from_c64(z: c64) -> Option<Self> {
        if Self::ELEMENT_TYPE.is_complex() || z.im == 0.0 {
            Some(Self::from_c64_lossy(z))
        } else {
            None
        }
    }

    fn into_any_matrix(matrix: Matrix<Self>) -> AnyMatrix;

    fn matrix_ref(any: &AnyMatrix) -> Option<&Matrix<Self>>;

    fn into_any_vector(values: Vec<Self>) -> AnyVector;

    fn vector_ref(any: &AnyVector) -> Option<&[Self]>;
}

macro_rules! impl_real_scalar {
    ($t:ty, $tag:ident) => {
        impl Scalar for $t {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;
            type Component = $t;

            fn one() -> Self {
                1.0
            }

            #[inline]
            fn conjugate(self) -> Self {
                self
            }

            #[inline]
            fn abs_sqr(self) -> f64 {
                let x = self as f64;
                x * x
            }

            #[inline]
            fn real_component(self) -> Self {
                self
            }

            #[inline]
            fn imag_component(self) -> Self {
                0.0
            }

            #[inline]
            fn from_real_f64(x: f64) -> Self {
                x as $t
            }

            #[inline]
            fn to_c64(self) -> c64 {
                c64::new(self as f64, 0.0)
            }

            #[inline]
            fn from_c64_lossy(z: c64) -> Self {
                z.re as $t
            }

            fn into_any_matrix(matrix: Matrix<Self>) -> AnyMatrix {
                AnyMatrix::$tag(matrix)
            }

            fn matrix_ref(any: &AnyMatrix) -> Option<&Matrix<Self>> {
                match any {
                    AnyMatrix::$tag(m) => Some(m),
                    _ => None,
                }
            }

            fn into_any_vector(values: Vec<Self>) -> AnyVector {
                AnyVector::$tag(values)
            }

            fn vector_ref(any: &AnyVector) -> Option<&[Self]> {
                match any {
                    AnyVector::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($t:ty, $re:ty, $tag:ident) => {
        impl Scalar for $t {
            const ELEMENT_TYPE: ElementType = ElementType::$tag;
            type Component = $re;

            fn one() -> Self {
                <$t>::new(1.0, 0.0)
            }

            #[inline]
            fn conjugate(self) -> Self {
                <$t>::new(self.re, -self.im)
            }

            #[inline]
            fn abs_sqr(self) -> f64 {
                let (re, im) = (self.re as f64, self.im as f64);
                re * re + im * im
            }

            #[inline]
            fn real_component(self) -> $re {
                self.re
            }

            #[inline]
            fn imag_component(self) -> $re {
                self.im
            }

            #[inline]
            fn from_real_f64(x: f64) -> Self {
                <$t>::new(x as $re, 0.0)
            }

            #[inline]
            fn to_c64(self) -> c64 {
                c64::new(self.re as f64, self.im as f64)
            }

            #[inline]
            fn from_c64_lossy(z: c64) -> Self {
                <$t>::new(z.re as $re, z.im as $re)
            }

            fn into_any_matrix(matrix: Matrix<Self>) -> AnyMatrix {
                AnyMatrix::$tag(matrix)
            }

            fn matrix_ref(any: &AnyMatrix) -> Option<&Matrix<Self>> {
                match any {
                    AnyMatrix::$tag(m) => Some(m),
                    _ => None,
                }
            }

            fn into_any_vector(values: Vec<Self>) -> AnyVector {
                AnyVector::$tag(values)
            }

            fn vector_ref(any: &AnyVector) -> Option<&[Self]> {
                match any {
                    AnyVector::$tag(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_real_scalar!(f32, Single);
impl_real_scalar!(f64, Double);
impl_complex_scalar!(c32, f32, ComplexSingle);
impl_complex_scalar!(c64, f64, ComplexDouble);
