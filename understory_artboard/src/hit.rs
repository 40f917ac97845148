// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping pointer positions from destination space back into content space.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_artboard::{Alignment, Fit, HitMapper};
//!
//! let content = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
//! let mapper = HitMapper::new(content, dest, Fit::Contain, Alignment::CENTER);
//!
//! // Center of the view is the center of the artboard.
//! let hit = mapper.to_content(Point::new(100.0, 100.0)).unwrap();
//! assert_eq!(hit, Point::new(50.0, 25.0));
//!
//! // The letterbox bars are outside the content.
//! assert_eq!(mapper.to_content_inside(Point::new(100.0, 10.0)).unwrap(), None);
//! ```

use kurbo::{Point, Rect};

use crate::error::SingularTransformError;
use crate::fit::{Alignment, Fit, LayoutKey};
use crate::matrix::Matrix2D;

/// Maps `dest_point` into the coordinate space of `content`.
///
/// Resolves the fit transform for the given layout and applies its inverse.
///
/// # Errors
///
/// Returns [`SingularTransformError`] when the fit transform cannot be
/// inverted. Degenerate rects resolve to the identity and never fail; this
/// only happens for extreme but non-zero scales.
pub fn map_point_to_content(
    dest_point: Point,
    content: Rect,
    dest: Rect,
    fit: Fit,
    alignment: Alignment,
) -> Result<Point, SingularTransformError> {
    HitMapper::new(content, dest, fit, alignment).to_content(dest_point)
}

/// Cached view/content mapping for one layout.
///
/// Holds the forward fit transform and its inverse. Update it with
/// [`HitMapper::set_layout`] whenever the destination or content rect
/// changes; unchanged layouts keep the cached inverse.
///
/// Input handlers running on a different thread than rendering can own their
/// own `HitMapper` and receive layout updates from the render thread.
#[derive(Clone, Debug)]
pub struct HitMapper {
    layout: LayoutKey,
    forward: Matrix2D,
    inverse: Result<Matrix2D, SingularTransformError>,
}

impl HitMapper {
    /// Creates a mapper for `content` fitted into `dest`.
    #[must_use]
    pub fn new(content: Rect, dest: Rect, fit: Fit, alignment: Alignment) -> Self {
        let layout = LayoutKey {
            content,
            dest,
            fit,
            alignment,
        };
        let forward = layout.resolve();
        Self {
            layout,
            forward,
            inverse: forward.invert(),
        }
    }

    /// Updates the layout, recomputing the transforms only if it changed.
    ///
    /// Returns `true` if the transforms were recomputed.
    pub fn set_layout(
        &mut self,
        content: Rect,
        dest: Rect,
        fit: Fit,
        alignment: Alignment,
    ) -> bool {
        let layout = LayoutKey {
            content,
            dest,
            fit,
            alignment,
        };
        if layout == self.layout {
            return false;
        }
        *self = Self::new(content, dest, fit, alignment);
        true
    }

    /// Content bounds of the current layout.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.layout.content
    }

    /// Destination rect of the current layout.
    #[must_use]
    pub fn dest_rect(&self) -> Rect {
        self.layout.dest
    }

    /// Forward (content → destination) transform.
    #[must_use]
    pub fn transform(&self) -> Matrix2D {
        self.forward
    }

    /// Maps a destination-space point into content space.
    ///
    /// # Errors
    ///
    /// Returns [`SingularTransformError`] if the layout's fit transform is
    /// not invertible. Callers handling input typically drop the event.
    pub fn to_content(&self, dest_point: Point) -> Result<Point, SingularTransformError> {
        match self.inverse {
            Ok(inverse) => Ok(inverse.apply(dest_point)),
            Err(err) => {
                tracing::warn!(
                    determinant = err.determinant,
                    "cannot map point into content: fit transform is singular"
                );
                Err(err)
            }
        }
    }

    /// Like [`HitMapper::to_content`], but returns `Ok(None)` when the point
    /// lands outside the content bounds.
    ///
    /// Points exactly on the content edge count as inside.
    ///
    /// # Errors
    ///
    /// Returns [`SingularTransformError`] if the layout's fit transform is
    /// not invertible.
    pub fn to_content_inside(
        &self,
        dest_point: Point,
    ) -> Result<Option<Point>, SingularTransformError> {
        let pt = self.to_content(dest_point)?;
        let bounds = self.layout.content;
        let inside = pt.x >= bounds.min_x()
            && pt.x <= bounds.max_x()
            && pt.y >= bounds.min_y()
            && pt.y <= bounds.max_y();
        Ok(inside.then_some(pt))
    }

    /// Maps a content-space point into destination space.
    #[must_use]
    pub fn to_dest(&self, content_point: Point) -> Point {
        self.forward.apply(content_point)
    }
}
