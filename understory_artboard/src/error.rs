// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for transform inversion, stack balance and session ordering.

use core::fmt;

use crate::session::{SessionOp, SessionState};

/// Error returned when inverting a transform whose determinant is (nearly) zero.
///
/// Hit mapping surfaces this instead of substituting the identity, since a
/// silent fallback would report wrong content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SingularTransformError {
    /// Determinant `a·d − b·c` of the rejected transform.
    pub determinant: f64,
}

impl fmt::Display for SingularTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform is not invertible (determinant {:e})",
            self.determinant
        )
    }
}

impl core::error::Error for SingularTransformError {}

/// Error returned by a `restore` that has no matching `save`.
///
/// This always indicates unbalanced save/restore calls in the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StackUnderflowError;

impl fmt::Display for StackUnderflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("restore called without a matching save")
    }
}

impl core::error::Error for StackUnderflowError {}

/// Error returned when a [`RenderSession`](crate::RenderSession) method is
/// called out of sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidSessionStateError {
    /// The rejected operation.
    pub operation: SessionOp,
    /// The state the session was in when the operation was attempted.
    pub state: SessionState,
}

impl fmt::Display for InvalidSessionStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot {:?} while the render session is {:?}",
            self.operation, self.state
        )
    }
}

impl core::error::Error for InvalidSessionStateError {}

/// Errors produced by the stack-manipulating [`RenderSession`](crate::RenderSession) calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The call was made out of sequence.
    InvalidState(InvalidSessionStateError),
    /// A nested `restore` tried to pop the session's fit transform.
    StackUnderflow(StackUnderflowError),
    /// `end` was called while nested saves were still open.
    Unbalanced {
        /// Number of nested saves without a matching restore.
        open: usize,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(err) => err.fmt(f),
            Self::StackUnderflow(err) => err.fmt(f),
            Self::Unbalanced { open } => {
                write!(f, "render session ended with {open} unmatched save(s)")
            }
        }
    }
}

impl core::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidState(err) => Some(err),
            Self::StackUnderflow(err) => Some(err),
            Self::Unbalanced { .. } => None,
        }
    }
}

impl From<InvalidSessionStateError> for SessionError {
    fn from(err: InvalidSessionStateError) -> Self {
        Self::InvalidState(err)
    }
}

impl From<StackUnderflowError> for SessionError {
    fn from(err: StackUnderflowError) -> Self {
        Self::StackUnderflow(err)
    }
}
