//! Shared element buffer backing matrix views.

use std::cell::RefCell;
use std::rc::Rc;

use crate::element::ElementType;
use crate::scalar::Scalar;

/// Flat, typed element buffer shared by reference between views.
///
/// Cloning a `Storage` creates another handle to the same elements; a write
/// through one handle is visible through every other. Use [`Storage::deep_copy`]
/// for an exclusively owned copy.
///
/// Everything runs on the calling thread, so the handle is `Rc<RefCell<_>>`
/// rather than `Arc`.
#[derive(Debug, Clone)]
pub struct Storage<T: Scalar> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T: Scalar> Storage<T> {
    /// Create storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, T::zero())
    }

    /// Create storage with every element set to `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from_vec(vec![value; len])
    }

    /// Create storage from existing vector (takes ownership, no copy).
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn element_type(&self) -> ElementType {
        T::ELEMENT_TYPE
    }

    /// Read the element at a flat offset.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn read(&self, offset: usize) -> T {
        self.data.borrow()[offset]
    }

    /// Write the element at a flat offset.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= self.len()`.
    #[inline]
    pub fn write(&self, offset: usize, value: T) {
        self.data.borrow_mut()[offset] = value;
    }

    /// Run `f` on an immutable view of the elements.
    pub fn with_slice<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.data.borrow())
    }

    /// Run `f` on a mutable view of the elements.
    pub fn with_slice_mut<R>(&self, f: impl FnOnce(&mut [T]) -> R) -> R {
        f(&mut self.data.borrow_mut())
    }

    /// Snapshot of the elements.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.borrow().clone()
    }

    /// Exclusively owned copy of the elements.
    pub fn deep_copy(&self) -> Self {
        Self::from_vec(self.to_vec())
    }

    /// Copy converted to another element type.
    ///
    /// Returns `None` if a nonzero imaginary part would be dropped.
    pub fn convert<U: Scalar>(&self) -> Option<Storage<U>> {
        self.data
            .borrow()
            .iter()
            .map(|x| U::try_from_c64(x.to_c64()))
            .collect::<Option<Vec<U>>>()
            .map(Storage::from_vec)
    }

    /// Whether both handles point at the same elements.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Whether other handles to these elements exist.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.data) > 1
    }

    /// Take the elements out if this is the only handle, copy them otherwise.
    pub fn into_vec(self) -> Vec<T> {
        match Rc::try_unwrap(self.data) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        }
    }
}
