//! Two-phase workspace negotiation.
//!
//! Many kernels need caller-allocated scratch whose optimal size only the
//! kernel knows. They are called twice:
//!
//! ```text
//! Querying   size slot = -1, one-element buffer  -> kernel writes optimal size
//! (sizing)   max(size slot, buffer[0]) per slot, reallocate its buffer
//! Executing  size slot = allocated length        -> kernel does the work
//! ```
//!
//! [`with_workspace`] runs a body through both phases. Several slots (for
//! example a scalar `work` and an integer `iwork`) are sized independently but
//! move through the phases together. Scratch is owned by the call and dropped
//! on every exit path.

use std::fmt;

use tracing::debug;

use crate::element::ElementType;
use crate::error::MatrixError;
use crate::scalar::{c32, c64};

/// Element kind of one scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkElement {
    Scalar(ElementType),
    /// LAPACK integer (`i32`).
    Integer,
}

impl fmt::Display for WorkElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkElement::Scalar(ty) => ty.fmt(f),
            WorkElement::Integer => f.write_str("integer"),
        }
    }
}

/// Declaration of one scratch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceSpec {
    pub element: WorkElement,
}

impl WorkspaceSpec {
    pub fn scalar(element_type: ElementType) -> Self {
        Self {
            element: WorkElement::Scalar(element_type),
        }
    }

    pub fn integer() -> Self {
        Self {
            element: WorkElement::Integer,
        }
    }

    /// Slot holding elements of type `E`.
    pub fn of<E: WorkScalar>() -> Self {
        Self {
            element: E::WORK_ELEMENT,
        }
    }
}

/// Owned scratch buffer of one of the supported element kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkBuffer {
    Single(Vec<f32>),
    Double(Vec<f64>),
    ComplexSingle(Vec<c32>),
    ComplexDouble(Vec<c64>),
    Integer(Vec<i32>),
}

impl WorkBuffer {
    /// Zero-filled buffer of `len` elements.
    pub fn allocate(element: WorkElement, len: usize) -> Self {
        match element {
            WorkElement::Scalar(ElementType::Single) => WorkBuffer::Single(vec![0.0; len]),
            WorkElement::Scalar(ElementType::Double) => WorkBuffer::Double(vec![0.0; len]),
            WorkElement::Scalar(ElementType::ComplexSingle) => {
                WorkBuffer::ComplexSingle(vec![c32::new(0.0, 0.0); len])
            }
            WorkElement::Scalar(ElementType::ComplexDouble) => {
                WorkBuffer::ComplexDouble(vec![c64::new(0.0, 0.0); len])
            }
            WorkElement::Integer => WorkBuffer::Integer(vec![0; len]),
        }
    }

    pub fn element(&self) -> WorkElement {
        match self {
            WorkBuffer::Single(_) => WorkElement::Scalar(ElementType::Single),
            WorkBuffer::Double(_) => WorkElement::Scalar(ElementType::Double),
            WorkBuffer::ComplexSingle(_) => WorkElement::Scalar(ElementType::ComplexSingle),
            WorkBuffer::ComplexDouble(_) => WorkElement::Scalar(ElementType::ComplexDouble),
            WorkBuffer::Integer(_) => WorkElement::Integer,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            WorkBuffer::Single(v) => v.len(),
            WorkBuffer::Double(v) => v.len(),
            WorkBuffer::ComplexSingle(v) => v.len(),
            WorkBuffer::ComplexDouble(v) => v.len(),
            WorkBuffer::Integer(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size a kernel reported in the first element, LAPACK's `WORK(1)`.
    ///
    /// Floating point sizes are rounded up; an empty buffer reports zero.
    pub fn reported_size(&self) -> i32 {
        match self {
            WorkBuffer::Single(v) => v.first().map_or(0, |x| x.ceil() as i32),
            WorkBuffer::Double(v) => v.first().map_or(0, |x| x.ceil() as i32),
            WorkBuffer::ComplexSingle(v) => v.first().map_or(0, |z| z.re.ceil() as i32),
            WorkBuffer::ComplexDouble(v) => v.first().map_or(0, |z| z.re.ceil() as i32),
            WorkBuffer::Integer(v) => v.first().copied().unwrap_or(0),
        }
    }
}

/// Types that can live in a [`WorkBuffer`].
pub trait WorkScalar: Copy + 'static {
    const WORK_ELEMENT: WorkElement;

    fn slice_mut(buffer: &mut WorkBuffer) -> Option<&mut [Self]>;
}

macro_rules! impl_work_scalar {
    ($t:ty, $variant:ident, $element:expr) => {
        impl WorkScalar for $t {
            const WORK_ELEMENT: WorkElement = $element;

            fn slice_mut(buffer: &mut WorkBuffer) -> Option<&mut [Self]> {
                match buffer {
                    WorkBuffer::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_work_scalar!(f32, Single, WorkElement::Scalar(ElementType::Single));
impl_work_scalar!(f64, Double, WorkElement::Scalar(ElementType::Double));
impl_work_scalar!(c32, ComplexSingle, WorkElement::Scalar(ElementType::ComplexSingle));
impl_work_scalar!(c64, ComplexDouble, WorkElement::Scalar(ElementType::ComplexDouble));
impl_work_scalar!(i32, Integer, WorkElement::Integer);

/// Phase a body is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Querying,
    Executing,
}

/// Sentinel size meaning "report the optimal size, do no work".
pub const QUERY_SIZE: i32 = -1;

#[derive(Debug)]
struct WorkSlot {
    size: i32,
    buffer: WorkBuffer,
}

/// Scratch slots handed to the body of [`with_workspace`].
#[derive(Debug)]
pub struct Workspace {
    phase: Phase,
    slots: Vec<WorkSlot>,
}

impl Workspace {
    fn querying(specs: &[WorkspaceSpec]) -> Self {
        let slots = specs
            .iter()
            .map(|spec| WorkSlot {
                size: QUERY_SIZE,
                buffer: WorkBuffer::allocate(spec.element, 1),
            })
            .collect();
        Self {
            phase: Phase::Querying,
            slots,
        }
    }

    /// Read back every size slot and reallocate for the executing phase.
    ///
    /// A kernel may report its size through the size slot, through the first
    /// buffer element (leaving the slot at the sentinel), or both; the larger
    /// of the two wins.
    fn size_for_execution(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let requested = slot.size.max(slot.buffer.reported_size());
            // a kernel that leaves the sentinel or reports nonsense still gets one element
            let len = requested.max(1);
            debug!(slot = i, requested, allocated = len, element = %slot.buffer.element(), "sizing workspace");
            slot.buffer = WorkBuffer::allocate(slot.buffer.element(), len as usize);
            slot.size = len;
        }
        self.phase = Phase::Executing;
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_query(&self) -> bool {
        self.phase == Phase::Querying
    }

    /// Number of declared slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&mut self, slot: usize) -> Result<&mut WorkSlot, MatrixError> {
        let count = self.slots.len();
        self.slots
            .get_mut(slot)
            .ok_or(MatrixError::UnknownWorkspaceSlot { slot, count })
    }

    /// Current value of a size slot.
    pub fn size(&self, slot: usize) -> Result<i32, MatrixError> {
        self.slots
            .get(slot)
            .map(|s| s.size)
            .ok_or(MatrixError::UnknownWorkspaceSlot {
                slot,
                count: self.slots.len(),
            })
    }

    /// Length of the buffer currently allocated for a slot.
    pub fn allocated(&self, slot: usize) -> Result<usize, MatrixError> {
        self.slots
            .get(slot)
            .map(|s| s.buffer.len())
            .ok_or(MatrixError::UnknownWorkspaceSlot {
                slot,
                count: self.slots.len(),
            })
    }

    /// Mutable size slot, passed to the kernel as its `lwork`-style argument.
    pub fn size_slot(&mut self, slot: usize) -> Result<&mut i32, MatrixError> {
        Ok(&mut self.slot(slot)?.size)
    }

    /// Typed scratch buffer of a slot.
    pub fn buffer_mut<E: WorkScalar>(&mut self, slot: usize) -> Result<&mut [E], MatrixError> {
        Ok(self.slot_mut::<E>(slot)?.1)
    }

    /// Size slot and typed buffer of one slot.
    pub fn slot_mut<E: WorkScalar>(
        &mut self,
        slot: usize,
    ) -> Result<(&mut i32, &mut [E]), MatrixError> {
        typed(slot, self.slot(slot)?)
    }

    /// Two distinct slots borrowed at once.
    ///
    /// # Panics
    ///
    /// Panics if `first == second`.
    #[allow(clippy::type_complexity)]
    pub fn pair_mut<A: WorkScalar, B: WorkScalar>(
        &mut self,
        first: usize,
        second: usize,
    ) -> Result<((&mut i32, &mut [A]), (&mut i32, &mut [B])), MatrixError> {
        assert_ne!(first, second, "workspace slots must be distinct");
        let count = self.slots.len();
        if first >= count || second >= count {
            return Err(MatrixError::UnknownWorkspaceSlot {
                slot: first.max(second),
                count,
            });
        }
        let (lo, hi) = self.slots.split_at_mut(first.max(second));
        let (a, b) = if first < second {
            (&mut lo[first], &mut hi[0])
        } else {
            (&mut hi[0], &mut lo[second])
        };
        Ok((typed(first, a)?, typed(second, b)?))
    }
}

fn typed<E: WorkScalar>(
    index: usize,
    slot: &mut WorkSlot,
) -> Result<(&mut i32, &mut [E]), MatrixError> {
    let actual = slot.buffer.element();
    let buffer = E::slice_mut(&mut slot.buffer).ok_or(MatrixError::WorkspaceTypeMismatch {
        slot: index,
        expected: E::WORK_ELEMENT,
        actual,
    })?;
    Ok((&mut slot.size, buffer))
}

/// Run `body` through the query and execution phases.
///
/// `body` is evaluated exactly twice when the query succeeds: first with every
/// size slot at [`QUERY_SIZE`] and one-element buffers, then with buffers of
/// the sizes the first call wrote back. Its result from the first call is
/// discarded. If the first call fails, the error is returned and `body` is
/// not called again. Side effects other than the kernel call must be
/// idempotent.
///
/// # Examples
///
/// ```
/// use ndmatrix::kernel::{Phase, WorkspaceSpec, with_workspace};
///
/// let mut calls = 0;
/// let len = with_workspace(&[WorkspaceSpec::of::<f64>()], |ws| {
///     calls += 1;
///     if ws.phase() == Phase::Querying {
///         *ws.size_slot(0)? = 16;
///     }
///     Ok(ws.buffer_mut::<f64>(0)?.len())
/// })
/// .unwrap();
/// assert_eq!(calls, 2);
/// assert_eq!(len, 16);
/// ```
pub fn with_workspace<R, F>(specs: &[WorkspaceSpec], mut body: F) -> Result<R, MatrixError>
where
    F: FnMut(&mut Workspace) -> Result<R, MatrixError>,
{
    let mut workspace = Workspace::querying(specs);
    body(&mut workspace)?;
    workspace.size_for_execution();
    body(&mut workspace)
}
