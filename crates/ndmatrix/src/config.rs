//! Construction-time configuration.

/// Options threaded explicitly through matrix construction.
///
/// Replaces a process-wide "force floating point" switch: the same call with
/// the same config always infers the same element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixConfig {
    /// Promote single precision literals to double precision of the same
    /// domain when inferring an element type. Integer literals always infer
    /// real-double.
    pub widen_to_double: bool,
}

impl MatrixConfig {
    /// Config with `widen_to_double` enabled.
    pub fn widening() -> Self {
        Self {
            widen_to_double: true,
        }
    }
}
