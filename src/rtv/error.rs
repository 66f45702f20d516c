//! The structural-invariant error kind, raised only by the `validate` debug
//! audit. Plain `Debug`-derived enum with no `thiserror`, constructed
//! directly at each check site rather than through a builder.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateError {
    /// A Leaf was found at a shift other than zero.
    LeafAtNonZeroShift { shift: u32 },
    /// An Internal was found at shift zero.
    InternalAtZeroShift,
    /// A present child followed an absent one — children must pack
    /// left-dense.
    GapInChildren,
    /// The element count reachable from a node didn't match what its
    /// parent's bookkeeping expected.
    SizeMismatch { expected: usize, actual: usize },
    /// `rootSize` was not a multiple of the branch factor.
    RootSizeNotMultipleOfBranchFactor { root_size: usize },
    /// The tail held `tailSize == B` (it must always be promoted before the
    /// operation returns).
    TailFull,
    /// `root` was absent but `rootSize`/`shift` were nonzero.
    AbsentRootWithNonzeroBookkeeping,
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidateError::LeafAtNonZeroShift { shift } => {
                write!(f, "leaf node found at non-zero shift {shift}")
            }
            ValidateError::InternalAtZeroShift => {
                write!(f, "internal node found at shift zero")
            }
            ValidateError::GapInChildren => {
                write!(f, "internal node has a gap in its children")
            }
            ValidateError::SizeMismatch { expected, actual } => {
                write!(f, "expected {expected} elements but found {actual}")
            }
            ValidateError::RootSizeNotMultipleOfBranchFactor { root_size } => {
                write!(f, "root_size {root_size} is not a multiple of the branch factor")
            }
            ValidateError::TailFull => write!(f, "tail is full at rest"),
            ValidateError::AbsentRootWithNonzeroBookkeeping => {
                write!(f, "root is absent but root_size/shift are nonzero")
            }
        }
    }
}

impl std::error::Error for ValidateError {}
