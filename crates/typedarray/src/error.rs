use std::{fmt, result};

use thiserror::Error;

pub type Result<T, E = Error> = result::Result<T, E>;

/// Error types for typedarray operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] fmt::Error),

    // Allocation errors
    #[error("Couldn't allocate {requested} elements (current capacity: {capacity})")]
    Allocation { requested: usize, capacity: usize },

    // State errors
    #[error("Cannot {operation} on a non-empty array (size: {size})")]
    InvalidState {
        operation: &'static str,
        size: usize,
    },

    // Bounds errors
    #[error("Index out of range: index: {index}, len: {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Tuple out of range: tuple: {tuple}, tuples: {tuples}")]
    TupleOutOfRange { tuple: usize, tuples: usize },
    #[error("Component out of range: component: {component}, components: {components}")]
    ComponentOutOfRange {
        component: usize,
        components: usize,
    },

    // Argument errors
    #[error("Wrong tuple length: expected {expected} components, got {got}")]
    WrongTupleLength { expected: usize, got: usize },
    #[error("Value count {len} is not a multiple of {components} components")]
    PartialTuple { len: usize, components: usize },
    #[error("Number of components must be at least 1")]
    ZeroComponents,
    #[error("Mismatched number of components: expected {expected}, got {got}")]
    MismatchedComponents { expected: usize, got: usize },
    #[error("Growth factor must be finite and greater than 1, got {0}")]
    InvalidGrowthFactor(f64),
}

/// Coarse classification of an [`Error`].
///
/// Lets calling layers translate failures into their own reporting
/// convention without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Capacity could not be satisfied. Recoverable, array unchanged.
    Allocation,
    /// An operation's precondition on the current state was violated.
    InvalidState,
    /// A flat, tuple or component index fell outside the valid bounds.
    IndexOutOfRange,
    /// An argument was malformed independently of the array state.
    InvalidArgument,
    /// The diagnostic sink refused a write.
    Format,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Allocation { .. } => ErrorKind::Allocation,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::IndexOutOfRange { .. }
            | Self::TupleOutOfRange { .. }
            | Self::ComponentOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::WrongTupleLength { .. }
            | Self::PartialTuple { .. }
            | Self::ZeroComponents
            | Self::MismatchedComponents { .. }
            | Self::InvalidGrowthFactor(_) => ErrorKind::InvalidArgument,
            Self::Format(_) => ErrorKind::Format,
        }
    }

    /// Returns true if retrying with a smaller request may succeed.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        self.kind() == ErrorKind::Allocation
    }
}
