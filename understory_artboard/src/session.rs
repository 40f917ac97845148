// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame render session: fit transform scoping around content draws.
//!
//! ## Usage
//!
//! 1) Call [`RenderSession::begin`] with the destination and content rects;
//!    this resolves the fit transform and saves it onto the session's stack.
//! 2) Call [`RenderSession::draw`] one or more times; each callback receives
//!    the composed transform to render with.
//! 3) Optionally call [`RenderSession::postprocess`] for effects that run on
//!    the host's backing resources after drawing.
//! 4) Call [`RenderSession::end`] to restore the stack.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_artboard::{Alignment, Fit, RenderSession, SessionState};
//!
//! let mut session = RenderSession::new();
//! let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
//! let content = Rect::new(0.0, 0.0, 100.0, 50.0);
//!
//! session.begin(dest, content, Fit::Contain, Alignment::CENTER).unwrap();
//! let corner = session
//!     .draw(|transform| transform.apply(Point::new(0.0, 0.0)))
//!     .unwrap();
//! assert_eq!(corner, Point::new(0.0, 50.0));
//! session.end().unwrap();
//! assert_eq!(session.state(), SessionState::Idle);
//! ```

use kurbo::Rect;

use crate::error::{InvalidSessionStateError, SessionError, StackUnderflowError};
use crate::fit::{Alignment, Fit, resolve};
use crate::matrix::Matrix2D;
use crate::stack::TransformStack;

/// Lifecycle state of a [`RenderSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No frame is in progress.
    #[default]
    Idle,
    /// The fit transform is active and draws may be issued.
    Prepared,
    /// A draw callback is running.
    Drawing,
}

/// Operations that are checked against the current [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOp {
    /// [`RenderSession::begin`].
    Begin,
    /// [`RenderSession::draw`].
    Draw,
    /// [`RenderSession::postprocess`].
    Postprocess,
    /// [`RenderSession::save`].
    Save,
    /// [`RenderSession::transform`].
    Transform,
    /// [`RenderSession::restore`].
    Restore,
    /// [`RenderSession::end`].
    End,
}

/// Content that can be drawn through a [`RenderSession`].
///
/// `C` is the host's drawing context, passed through untouched.
pub trait ContentSource<C: ?Sized> {
    /// Intrinsic bounds of the content in its own coordinate space.
    fn bounds(&self) -> Rect;

    /// Renders the content into `ctx`, mapping content coordinates through
    /// `transform`.
    fn draw(&mut self, ctx: &mut C, transform: Matrix2D);

    /// Runs effects on `ctx` after the content has been drawn.
    ///
    /// Called once per [`RenderSession::render_frame`], after
    /// [`draw`](Self::draw) and before the fit transform is removed. The
    /// default does nothing.
    fn postprocess(&mut self, ctx: &mut C) {
        let _ = ctx;
    }
}

/// Orchestrates one frame of content drawing under a fit transform.
///
/// The session owns a [`TransformStack`]. Hosts that need an outer transform
/// for every frame (for example a device pixel ratio) can seed it with
/// [`RenderSession::with_stack`]; the fit transform is composed on top and
/// removed again by [`RenderSession::end`].
///
/// A session is single-threaded state. If input arrives on another thread,
/// hit mapping should use [`HitMapper`](crate::HitMapper) with its own copy
/// of the layout rather than sharing the session.
#[derive(Clone, Debug, Default)]
pub struct RenderSession {
    stack: TransformStack,
    state: SessionState,
    /// Stack depth before `begin` pushed the fit transform.
    scope_depth: usize,
    fit_transform: Matrix2D,
    draw_passes: u32,
    paused: bool,
}

impl RenderSession {
    /// Creates an idle session with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::with_stack(TransformStack::new())
    }

    /// Creates an idle session on top of an existing stack.
    ///
    /// Whatever `stack` currently holds becomes the outer transform for every
    /// frame.
    #[must_use]
    pub fn with_stack(stack: TransformStack) -> Self {
        Self {
            stack,
            state: SessionState::Idle,
            scope_depth: 0,
            fit_transform: Matrix2D::IDENTITY,
            draw_passes: 0,
            paused: false,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the underlying transform stack.
    #[must_use]
    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    /// Returns the composed transform draws currently render with.
    #[must_use]
    pub fn current_transform(&self) -> Matrix2D {
        self.stack.current()
    }

    /// Returns the fit transform resolved by the last [`begin`](Self::begin),
    /// without any outer transform.
    #[must_use]
    pub fn fit_transform(&self) -> Matrix2D {
        self.fit_transform
    }

    /// Returns whether the host has marked this session as suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Marks the session as suspended or running.
    ///
    /// This is a flag for the host's frame loop; it does not affect any
    /// transform.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Starts a frame: resolves the fit transform for `content` inside `dest`
    /// and saves it onto the stack.
    ///
    /// Returns the composed transform.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSessionStateError`] unless the session is idle. A
    /// session is never implicitly restarted; finish the previous frame with
    /// [`end`](Self::end) or [`abort`](Self::abort) first.
    pub fn begin(
        &mut self,
        dest: Rect,
        content: Rect,
        fit: Fit,
        alignment: Alignment,
    ) -> Result<Matrix2D, InvalidSessionStateError> {
        self.expect_state(SessionOp::Begin, SessionState::Idle)?;
        let fit_transform = resolve(content, dest, fit, alignment);
        self.scope_depth = self.stack.depth();
        self.fit_transform = fit_transform;
        self.draw_passes = 0;
        let composed = self.stack.save(fit_transform);
        self.state = SessionState::Prepared;
        tracing::trace!(?dest, ?content, ?fit, "render session prepared");
        Ok(composed)
    }

    /// Runs a draw callback with the current composed transform.
    ///
    /// May be called any number of times per frame. Without intervening
    /// [`save`](Self::save)/[`transform`](Self::transform) calls every
    /// callback sees the same transform.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSessionStateError`] unless the session is prepared.
    pub fn draw<F, R>(&mut self, f: F) -> Result<R, InvalidSessionStateError>
    where
        F: FnOnce(Matrix2D) -> R,
    {
        self.expect_state(SessionOp::Draw, SessionState::Prepared)?;
        self.state = SessionState::Drawing;
        let out = f(self.stack.current());
        self.state = SessionState::Prepared;
        self.draw_passes = self.draw_passes.saturating_add(1);
        Ok(out)
    }

    /// Runs a postprocess callback after drawing.
    ///
    /// The callback typically captures the host's backing resources
    /// (command buffer, device); the session only checks ordering.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSessionStateError`] unless the session is prepared.
    pub fn postprocess<F, R>(&mut self, f: F) -> Result<R, InvalidSessionStateError>
    where
        F: FnOnce() -> R,
    {
        self.expect_state(SessionOp::Postprocess, SessionState::Prepared)?;
        Ok(f())
    }

    /// Opens a nested scope, composing `matrix` onto the current transform.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSessionStateError`] unless the session is prepared.
    pub fn save(&mut self, matrix: Matrix2D) -> Result<Matrix2D, InvalidSessionStateError> {
        self.expect_state(SessionOp::Save, SessionState::Prepared)?;
        Ok(self.stack.save(matrix))
    }

    /// Concatenates `matrix` onto the active level without opening a scope.
    ///
    /// The change lasts until the enclosing scope is restored; at the top
    /// level that is [`end`](Self::end).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] unless the session is prepared.
    pub fn transform(&mut self, matrix: Matrix2D) -> Result<Matrix2D, SessionError> {
        self.expect_state(SessionOp::Transform, SessionState::Prepared)?;
        Ok(self.stack.transform(matrix)?)
    }

    /// Closes the innermost nested scope.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] unless the session is prepared,
    /// and [`SessionError::StackUnderflow`] when no nested scope is open (the
    /// fit transform itself is only removed by [`end`](Self::end)).
    pub fn restore(&mut self) -> Result<Matrix2D, SessionError> {
        self.expect_state(SessionOp::Restore, SessionState::Prepared)?;
        if self.open_saves() == 0 {
            tracing::error!("render session restore without matching save");
            return Err(StackUnderflowError.into());
        }
        Ok(self.stack.restore()?)
    }

    /// Finishes the frame and removes the fit transform.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] unless the session is prepared,
    /// and [`SessionError::Unbalanced`] if nested saves are still open; the
    /// session stays prepared in that case so the caller can restore them or
    /// [`abort`](Self::abort).
    pub fn end(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionOp::End, SessionState::Prepared)?;
        let open = self.open_saves();
        if open != 0 {
            tracing::error!(open, "render session ended with unbalanced saves");
            return Err(SessionError::Unbalanced { open });
        }
        self.stack.restore()?;
        self.state = SessionState::Idle;
        tracing::trace!(passes = self.draw_passes, "render session ended");
        Ok(())
    }

    /// Abandons the current frame.
    ///
    /// Drops everything pushed since [`begin`](Self::begin), including open
    /// nested scopes, and returns to [`SessionState::Idle`]. Does nothing when
    /// already idle.
    ///
    /// This also recovers a session left in [`SessionState::Drawing`] by a
    /// draw callback that panicked and was caught.
    pub fn abort(&mut self) {
        if self.state == SessionState::Idle {
            return;
        }
        tracing::warn!(state = ?self.state, "render session aborted");
        self.stack.truncate(self.scope_depth);
        self.state = SessionState::Idle;
    }

    /// Draws `source` for one frame: `begin`, a single `draw`, the source's
    /// [`postprocess`](ContentSource::postprocess) hook, then `end`.
    ///
    /// Returns the composed transform the content was drawn with.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidState`] if a frame is already in
    /// progress.
    pub fn render_frame<C, S>(
        &mut self,
        ctx: &mut C,
        source: &mut S,
        dest: Rect,
        fit: Fit,
        alignment: Alignment,
    ) -> Result<Matrix2D, SessionError>
    where
        C: ?Sized,
        S: ContentSource<C> + ?Sized,
    {
        let transform = self.begin(dest, source.bounds(), fit, alignment)?;
        self.draw(|m| source.draw(ctx, m))?;
        self.postprocess(|| source.postprocess(ctx))?;
        self.end()?;
        Ok(transform)
    }

    /// Snapshot of the current session state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> RenderSessionDebugInfo {
        RenderSessionDebugInfo {
            state: self.state,
            stack_depth: self.stack.depth(),
            open_saves: self.open_saves(),
            current_transform: self.stack.current(),
            fit_transform: self.fit_transform,
            draw_passes: self.draw_passes,
            paused: self.paused,
        }
    }

    fn open_saves(&self) -> usize {
        match self.state {
            SessionState::Idle => 0,
            SessionState::Prepared | SessionState::Drawing => {
                self.stack.depth().saturating_sub(self.scope_depth + 1)
            }
        }
    }

    fn expect_state(
        &self,
        operation: SessionOp,
        expected: SessionState,
    ) -> Result<(), InvalidSessionStateError> {
        if self.state == expected {
            return Ok(());
        }
        tracing::warn!(?operation, state = ?self.state, "render session call out of sequence");
        Err(InvalidSessionStateError {
            operation,
            state: self.state,
        })
    }
}

/// Debug snapshot of a [`RenderSession`] state.
#[derive(Clone, Copy, Debug)]
pub struct RenderSessionDebugInfo {
    /// Lifecycle state.
    pub state: SessionState,
    /// Total depth of the transform stack, including any seeded levels.
    pub stack_depth: usize,
    /// Nested saves opened since `begin` and not yet restored.
    pub open_saves: usize,
    /// Transform draws would currently receive.
    pub current_transform: Matrix2D,
    /// Fit transform resolved by the last `begin`.
    pub fit_transform: Matrix2D,
    /// Draw callbacks run since the last `begin`.
    pub draw_passes: u32,
    /// Host-controlled pause flag.
    pub paused: bool,
}
