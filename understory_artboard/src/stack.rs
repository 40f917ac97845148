// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::error::StackUnderflowError;
use crate::matrix::Matrix2D;

/// Save/restore stack of composed transforms.
///
/// Each entry is the full transform in effect at that nesting level, so
/// [`TransformStack::current`] never has to walk the stack. An empty stack
/// behaves as the identity.
///
/// ```rust
/// use understory_artboard::{Matrix2D, TransformStack};
///
/// let mut stack = TransformStack::new();
/// stack.save(Matrix2D::scale(2.0, 2.0));
/// stack.save(Matrix2D::translate(5.0, 0.0));
/// // Inner translation is scaled by the outer level.
/// assert_eq!(stack.current(), Matrix2D::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0));
///
/// stack.restore().unwrap();
/// stack.restore().unwrap();
/// assert!(stack.restore().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransformStack {
    entries: Vec<Matrix2D>,
}

impl TransformStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Composes `matrix` onto the current top and pushes the result.
    ///
    /// Returns the new top.
    pub fn save(&mut self, matrix: Matrix2D) -> Matrix2D {
        let top = Matrix2D::compose(self.current(), matrix);
        self.entries.push(top);
        top
    }

    /// Pops the most recent unmatched [`save`](Self::save).
    ///
    /// Returns the popped transform.
    ///
    /// # Errors
    ///
    /// Returns [`StackUnderflowError`] when the stack is empty. This is a
    /// caller bug (unbalanced save/restore) and should not be ignored.
    pub fn restore(&mut self) -> Result<Matrix2D, StackUnderflowError> {
        self.entries.pop().ok_or_else(|| {
            tracing::error!("transform stack underflow: restore without save");
            StackUnderflowError
        })
    }

    /// Concatenates `matrix` onto the current top in place, without pushing.
    ///
    /// The change is undone by the `restore` matching the enclosing `save`.
    ///
    /// # Errors
    ///
    /// Returns [`StackUnderflowError`] when there is no saved level to
    /// modify.
    pub fn transform(&mut self, matrix: Matrix2D) -> Result<Matrix2D, StackUnderflowError> {
        let Some(top) = self.entries.last_mut() else {
            tracing::error!("transform stack underflow: transform without save");
            return Err(StackUnderflowError);
        };
        *top = Matrix2D::compose(*top, matrix);
        Ok(*top)
    }

    /// Returns the active transform, or the identity when empty.
    #[must_use]
    pub fn current(&self) -> Matrix2D {
        self.entries.last().copied().unwrap_or(Matrix2D::IDENTITY)
    }

    /// Number of unmatched saves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no save is outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every level above `depth`.
    ///
    /// Used to unwind an aborted scope; does nothing if the stack is already
    /// at or below `depth`.
    pub fn truncate(&mut self, depth: usize) {
        self.entries.truncate(depth);
    }
}
