// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_artboard --heading-base-level=0

//! Understory Artboard: mapping vector content into a view and back.
//!
//! This crate sits between a host drawing surface and a self-contained
//! vector content unit (an "artboard") with intrinsic bounds. It provides:
//! - [`resolve`]: the transform that places content inside a destination
//!   rectangle according to a [`Fit`] policy and an [`Alignment`].
//! - [`TransformStack`]: save/restore scoping of composed [`Matrix2D`]s.
//! - [`RenderSession`]: a small state machine that wraps one frame of content
//!   drawing (and an optional postprocess pass) in the fit transform.
//! - [`HitMapper`]: inverse mapping of pointer positions from the view back
//!   into content space.
//!
//! It does **not** own a surface, a GPU device, frame pacing or the content
//! itself. Callers are expected to:
//! - Report the current destination rect (view bounds) each frame.
//! - Render content through the transform handed to their draw callback.
//! - Feed pointer positions through [`HitMapper`] before hit testing content.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_artboard::{Alignment, Fit, HitMapper, RenderSession};
//!
//! let view = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let artboard = Rect::new(0.0, 0.0, 400.0, 400.0);
//!
//! let mut session = RenderSession::new();
//! session.begin(view, artboard, Fit::Contain, Alignment::CENTER).unwrap();
//! session
//!     .draw(|transform| {
//!         // Hand `transform` to the renderer that rasterizes the artboard.
//!         let corner = transform.apply(Point::new(400.0, 400.0));
//!         assert_eq!(corner, Point::new(700.0, 600.0));
//!     })
//!     .unwrap();
//! session.end().unwrap();
//!
//! // A click in the middle of the view lands in the middle of the artboard.
//! let mapper = HitMapper::new(artboard, view, Fit::Contain, Alignment::CENTER);
//! let hit = mapper.to_content(Point::new(400.0, 300.0)).unwrap();
//! assert!((hit.x - 200.0).abs() < 1e-9 && (hit.y - 200.0).abs() < 1e-9);
//! ```
//!
//! ## Degenerate layouts
//!
//! Zero-sized rects are common for a frame or two while a view is being
//! resized. They are not errors: [`resolve`] returns [`Matrix2D::IDENTITY`]
//! for them so the render loop keeps going and the transform stays
//! invertible.
//!
//! ## Errors
//!
//! - [`SingularTransformError`]: a transform could not be inverted.
//! - [`StackUnderflowError`]: `restore` without a matching `save`.
//! - [`InvalidSessionStateError`] / [`SessionError`]: session calls made out
//!   of order.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod error;
mod fit;
mod hit;
mod matrix;
mod session;
mod stack;

pub use error::{
    InvalidSessionStateError, SessionError, SingularTransformError, StackUnderflowError,
};
pub use fit::{Alignment, Fit, FitResolver, fit_scale, has_area, resolve};
pub use hit::{HitMapper, map_point_to_content};
pub use matrix::{Matrix2D, SINGULAR_EPSILON};
pub use session::{ContentSource, RenderSession, RenderSessionDebugInfo, SessionOp, SessionState};
pub use stack::TransformStack;
