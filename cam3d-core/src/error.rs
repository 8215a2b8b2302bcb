//! Error taxonomy for the transform math layer.

use thiserror::Error;

/// Errors raised by vector and matrix operations.
///
/// Every error is local to a single call. Arguments are validated before any
/// mutation begins, so a failed call leaves the receiver exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// A numeric input is out of range: non-positive near/far/aspect, a field
    /// of view outside (0, 180) degrees, or a zero-length vector where a
    /// direction is required.
    #[error("invalid argument: {what}")]
    InvalidArgument { what: &'static str },

    /// A geometrically degenerate configuration: coincident eye and center in
    /// a look-at, an up vector parallel to the view direction, or a singular
    /// matrix handed to inversion.
    #[error("degenerate transform: {what}")]
    DegenerateTransform { what: &'static str },
}
