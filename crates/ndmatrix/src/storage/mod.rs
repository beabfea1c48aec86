//! Storage types for matrix data.
//!
//! Storage is always a flat vector; shape and structural kind come from the
//! [`Matrix`](crate::matrix::Matrix) view wrapping it.

mod buffer;

pub use buffer::Storage;
