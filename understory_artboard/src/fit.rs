// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit and alignment policies, and the transform that places content inside
//! a destination rectangle.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_artboard::{Alignment, Fit, resolve};
//!
//! let content = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
//!
//! let m = resolve(content, dest, Fit::Contain, Alignment::CENTER);
//! assert_eq!(m.apply(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
//! assert_eq!(m.apply(Point::new(100.0, 50.0)), Point::new(200.0, 150.0));
//! ```

use kurbo::Rect;

use crate::matrix::Matrix2D;

/// Leftover space smaller than this fraction of the destination extent is
/// treated as zero.
const SLACK_EPSILON: f64 = 1e-9;

/// How content is scaled into a destination rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Fit {
    /// Stretch each axis independently so the content fills the destination.
    Fill,
    /// Uniform scale so the whole content is visible (the smaller ratio).
    #[default]
    Contain,
    /// Uniform scale so the destination is fully covered (the larger ratio).
    Cover,
    /// Uniform scale that matches the destination width.
    FitWidth,
    /// Uniform scale that matches the destination height.
    FitHeight,
    /// Like [`Fit::Contain`], but never scales content up.
    ScaleDown,
    /// Keep the content at its intrinsic size.
    None,
}

/// Normalized anchor used to distribute leftover space after scaling.
///
/// `(0, 0)` places the content flush with the destination's top-left corner,
/// `(1, 1)` flush with its bottom-right corner, and `(0.5, 0.5)` centers it.
/// Intermediate values interpolate linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alignment {
    x: f64,
    y: f64,
}

impl Alignment {
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self { x: 0.0, y: 0.0 };
    /// Top edge, horizontally centered.
    pub const TOP_CENTER: Self = Self { x: 0.5, y: 0.0 };
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self { x: 1.0, y: 0.0 };
    /// Left edge, vertically centered.
    pub const CENTER_LEFT: Self = Self { x: 0.0, y: 0.5 };
    /// Centered on both axes.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };
    /// Right edge, vertically centered.
    pub const CENTER_RIGHT: Self = Self { x: 1.0, y: 0.5 };
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self { x: 0.0, y: 1.0 };
    /// Bottom edge, horizontally centered.
    pub const BOTTOM_CENTER: Self = Self { x: 0.5, y: 1.0 };
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self { x: 1.0, y: 1.0 };

    /// Creates an alignment from factors in `[0, 1]`.
    ///
    /// Out-of-range factors are clamped; NaN is treated as centered.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: normalize_factor(x),
            y: normalize_factor(y),
        }
    }

    /// Creates an alignment from factors in `[-1, 1]`, where `-1` is the
    /// start edge, `0` the center and `1` the end edge.
    #[must_use]
    pub fn from_signed(x: f64, y: f64) -> Self {
        Self::new((x + 1.0) * 0.5, (y + 1.0) * 0.5)
    }

    /// Horizontal factor in `[0, 1]`.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical factor in `[0, 1]`.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

fn normalize_factor(v: f64) -> f64 {
    if v.is_nan() { 0.5 } else { v.clamp(0.0, 1.0) }
}

/// Returns `true` if `rect` has a positive, finite area.
///
/// Both the coordinates and the extents must be finite; a rect spanning
/// `-1e308..1e308` has finite corners but an infinite width.
///
/// Rects failing this check resolve to the identity transform.
#[must_use]
pub fn has_area(rect: Rect) -> bool {
    let (w, h) = (rect.width(), rect.height());
    rect.x0.is_finite()
        && rect.y0.is_finite()
        && rect.x1.is_finite()
        && rect.y1.is_finite()
        && w.is_finite()
        && h.is_finite()
        && w > 0.0
        && h > 0.0
}

/// Returns the `(scale_x, scale_y)` pair `fit` applies to map `content` into
/// `dest`.
///
/// Degenerate rects, and ratios that overflow or underflow to zero, yield
/// `(1.0, 1.0)`.
#[must_use]
pub fn fit_scale(content: Rect, dest: Rect, fit: Fit) -> (f64, f64) {
    checked_scale(content, dest, fit)
        .map_or((1.0, 1.0), |(scale, _)| scale)
}

/// Fit scale together with the raw per-axis ratios, or `None` when either
/// rect is degenerate or a chosen scale is zero or non-finite.
fn checked_scale(content: Rect, dest: Rect, fit: Fit) -> Option<((f64, f64), (f64, f64))> {
    if !has_area(content) || !has_area(dest) {
        return None;
    }
    let (sx, sy) = raw_scale(content, dest);
    let (scale_x, scale_y) = apply_fit(sx, sy, fit);
    let usable = |s: f64| s.is_finite() && s != 0.0;
    if usable(scale_x) && usable(scale_y) {
        Some(((scale_x, scale_y), (sx, sy)))
    } else {
        None
    }
}

fn raw_scale(content: Rect, dest: Rect) -> (f64, f64) {
    (
        dest.width() / content.width(),
        dest.height() / content.height(),
    )
}

fn apply_fit(sx: f64, sy: f64, fit: Fit) -> (f64, f64) {
    match fit {
        Fit::Fill => (sx, sy),
        Fit::Contain => {
            let s = sx.min(sy);
            (s, s)
        }
        Fit::Cover => {
            let s = sx.max(sy);
            (s, s)
        }
        Fit::FitWidth => (sx, sx),
        Fit::FitHeight => (sy, sy),
        Fit::ScaleDown => {
            let s = sx.min(sy).min(1.0);
            (s, s)
        }
        Fit::None => (1.0, 1.0),
    }
}

/// Leftover space along one axis after scaling.
///
/// When the chosen scale is the axis' own ratio the scaled extent is the
/// destination extent by construction, so the slack is exactly zero.
fn axis_slack(dest_extent: f64, content_extent: f64, scale: f64, raw: f64) -> f64 {
    let scaled = if scale == raw {
        dest_extent
    } else {
        content_extent * scale
    };
    let slack = dest_extent - scaled;
    if slack.abs() <= SLACK_EPSILON * dest_extent {
        0.0
    } else {
        slack
    }
}

/// Computes the transform that places `content` inside `dest`.
///
/// The content is scaled according to `fit`, then any leftover space
/// (positive or negative) is distributed according to `alignment`. A
/// degenerate `content` or `dest` (zero or negative extent, non-finite
/// coordinates or extents) yields [`Matrix2D::IDENTITY`] rather than a
/// singular transform, as does a scale ratio that overflows or underflows
/// to zero.
#[must_use]
pub fn resolve(content: Rect, dest: Rect, fit: Fit, alignment: Alignment) -> Matrix2D {
    let Some(((scale_x, scale_y), (sx, sy))) = checked_scale(content, dest, fit) else {
        tracing::debug!(?content, ?dest, ?fit, "degenerate fit, using identity");
        return Matrix2D::IDENTITY;
    };

    let slack_x = axis_slack(dest.width(), content.width(), scale_x, sx);
    let slack_y = axis_slack(dest.height(), content.height(), scale_y, sy);

    let tx = dest.x0 + slack_x * alignment.x - content.x0 * scale_x;
    let ty = dest.y0 + slack_y * alignment.y - content.y0 * scale_y;

    let m = Matrix2D::new(scale_x, 0.0, 0.0, scale_y, tx, ty);
    if !m.is_finite() {
        tracing::debug!(?content, ?dest, "non-finite fit offset, using identity");
        return Matrix2D::IDENTITY;
    }
    tracing::trace!(?fit, ?alignment, scale_x, scale_y, tx, ty, "resolved fit");
    m
}

/// Inputs that fully determine a fit transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutKey {
    pub(crate) content: Rect,
    pub(crate) dest: Rect,
    pub(crate) fit: Fit,
    pub(crate) alignment: Alignment,
}

impl LayoutKey {
    pub(crate) fn resolve(&self) -> Matrix2D {
        resolve(self.content, self.dest, self.fit, self.alignment)
    }
}

/// Caching wrapper around [`resolve`].
///
/// Fit transforms only change when the layout does, so hosts that resolve
/// every frame can keep one of these and skip the arithmetic while the
/// destination and content rects are stable.
#[derive(Clone, Debug, Default)]
pub struct FitResolver {
    last: Option<(LayoutKey, Matrix2D)>,
}

impl FitResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Resolves the fit transform, reusing the previous result when all
    /// inputs are unchanged.
    pub fn resolve(
        &mut self,
        content: Rect,
        dest: Rect,
        fit: Fit,
        alignment: Alignment,
    ) -> Matrix2D {
        let key = LayoutKey {
            content,
            dest,
            fit,
            alignment,
        };
        match self.last {
            Some((last_key, m)) if last_key == key => m,
            _ => {
                let m = key.resolve();
                self.last = Some((key, m));
                m
            }
        }
    }

    /// Returns the most recently resolved transform, if any.
    #[must_use]
    pub fn last(&self) -> Option<Matrix2D> {
        self.last.map(|(_, m)| m)
    }

    /// Forgets the cached transform.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{Alignment, Fit, FitResolver, fit_scale, has_area, resolve};
    use crate::Matrix2D;

    const ALL_FITS: [Fit; 7] = [
        Fit::Fill,
        Fit::Contain,
        Fit::Cover,
        Fit::FitWidth,
        Fit::FitHeight,
        Fit::ScaleDown,
        Fit::None,
    ];

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn contain_centers_letterboxed_content() {
        let content = Rect::new(0.0, 0.0, 100.0, 50.0);
        let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
        let m = resolve(content, dest, Fit::Contain, Alignment::CENTER);

        assert_eq!(m, Matrix2D::new(2.0, 0.0, 0.0, 2.0, 0.0, 50.0));
        assert_eq!(m.apply(Point::new(0.0, 0.0)), Point::new(0.0, 50.0));
        assert_eq!(m.apply(Point::new(100.0, 50.0)), Point::new(200.0, 150.0));
    }

    #[test]
    fn scale_down_never_enlarges() {
        let content = Rect::new(0.0, 0.0, 50.0, 50.0);
        let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
        let m = resolve(content, dest, Fit::ScaleDown, Alignment::CENTER);

        assert_eq!(m, Matrix2D::new(1.0, 0.0, 0.0, 1.0, 75.0, 75.0));

        // Larger content still shrinks like `Contain`.
        let big = Rect::new(0.0, 0.0, 400.0, 800.0);
        assert_eq!(
            resolve(big, dest, Fit::ScaleDown, Alignment::CENTER),
            resolve(big, dest, Fit::Contain, Alignment::CENTER)
        );
    }

    #[test]
    fn degenerate_rects_resolve_to_identity() {
        let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
        let flat = Rect::new(0.0, 0.0, 0.0, 50.0);
        for fit in ALL_FITS {
            assert_eq!(
                resolve(flat, dest, fit, Alignment::BOTTOM_RIGHT),
                Matrix2D::IDENTITY
            );
            assert_eq!(
                resolve(dest, flat, fit, Alignment::TOP_LEFT),
                Matrix2D::IDENTITY
            );
        }
        let nan = Rect::new(0.0, 0.0, f64::NAN, 10.0);
        assert!(!has_area(nan));
        assert_eq!(
            resolve(nan, dest, Fit::Fill, Alignment::CENTER),
            Matrix2D::IDENTITY
        );
        // Inverted rects have negative extent.
        assert!(!has_area(Rect::new(10.0, 10.0, 0.0, 0.0)));
    }

    #[test]
    fn unrepresentable_scales_resolve_to_identity() {
        let dest = Rect::new(0.0, 0.0, 200.0, 100.0);

        // Finite corners, but the width overflows.
        let wide = Rect::new(-1e308, 0.0, 1e308, 10.0);
        assert!(!has_area(wide));
        for fit in ALL_FITS {
            assert_eq!(
                resolve(wide, dest, fit, Alignment::CENTER),
                Matrix2D::IDENTITY
            );
        }

        // Both rects have area, but the ratio underflows to zero one way and
        // overflows to infinity the other.
        let huge = Rect::new(0.0, 0.0, 1e200, 1e200);
        let tiny = Rect::new(0.0, 0.0, 1e-200, 1e-200);
        assert!(has_area(huge) && has_area(tiny));
        for fit in ALL_FITS {
            if fit == Fit::None {
                continue;
            }
            assert_eq!(
                resolve(huge, tiny, fit, Alignment::CENTER),
                Matrix2D::IDENTITY
            );
            assert_eq!(
                resolve(tiny, huge, fit, Alignment::CENTER),
                Matrix2D::IDENTITY
            );
            assert_eq!(fit_scale(huge, tiny, fit), (1.0, 1.0));
        }
    }

    #[test]
    fn per_fit_scales() {
        let content = Rect::new(0.0, 0.0, 100.0, 50.0);
        let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
        assert_eq!(fit_scale(content, dest, Fit::Fill), (2.0, 4.0));
        assert_eq!(fit_scale(content, dest, Fit::Contain), (2.0, 2.0));
        assert_eq!(fit_scale(content, dest, Fit::Cover), (4.0, 4.0));
        assert_eq!(fit_scale(content, dest, Fit::FitWidth), (2.0, 2.0));
        assert_eq!(fit_scale(content, dest, Fit::FitHeight), (4.0, 4.0));
        assert_eq!(fit_scale(content, dest, Fit::ScaleDown), (1.0, 1.0));
        assert_eq!(fit_scale(content, dest, Fit::None), (1.0, 1.0));
        assert_eq!(
            fit_scale(Rect::ZERO, dest, Fit::Cover),
            (1.0, 1.0),
            "degenerate content"
        );
    }

    #[test]
    fn alignment_interpolates_slack() {
        let content = Rect::new(0.0, 0.0, 10.0, 10.0);
        let dest = Rect::new(0.0, 0.0, 110.0, 10.0);

        let start = resolve(content, dest, Fit::Contain, Alignment::CENTER_LEFT);
        let end = resolve(content, dest, Fit::Contain, Alignment::CENTER_RIGHT);
        let quarter = resolve(content, dest, Fit::Contain, Alignment::new(0.25, 0.5));

        assert_eq!(start.tx, 0.0);
        assert_eq!(end.tx, 100.0);
        assert_eq!(quarter.tx, 25.0);
    }

    #[test]
    fn cover_overflow_is_aligned_too() {
        // Negative slack: the content overflows and alignment picks the
        // visible part.
        let content = Rect::new(0.0, 0.0, 100.0, 50.0);
        let dest = Rect::new(0.0, 0.0, 100.0, 100.0);

        let centered = resolve(content, dest, Fit::Cover, Alignment::CENTER);
        assert_eq!(centered, Matrix2D::new(2.0, 0.0, 0.0, 2.0, -50.0, 0.0));

        let left = resolve(content, dest, Fit::Cover, Alignment::TOP_LEFT);
        assert_eq!(left.tx, 0.0);
    }

    #[test]
    fn content_and_dest_origins_are_honored() {
        let content = Rect::new(-50.0, -25.0, 50.0, 25.0);
        let dest = Rect::new(10.0, 20.0, 210.0, 120.0);
        let m = resolve(content, dest, Fit::Fill, Alignment::TOP_LEFT);

        let top_left = m.apply(Point::new(-50.0, -25.0));
        let bottom_right = m.apply(Point::new(50.0, 25.0));
        assert!(close(top_left, Point::new(10.0, 20.0)));
        assert!(close(bottom_right, Point::new(210.0, 120.0)));
    }

    #[test]
    fn matching_aspect_ignores_alignment() {
        // 0.7 and 2.1 / 3.0 do not divide exactly in binary floating point.
        let content = Rect::new(0.0, 0.0, 10.0, 3.0);
        let dest = Rect::new(0.0, 0.0, 7.0, 2.1);
        let a = resolve(content, dest, Fit::Contain, Alignment::TOP_LEFT);
        let b = resolve(content, dest, Fit::Contain, Alignment::BOTTOM_RIGHT);
        assert_eq!(a, b);
        assert_eq!(a.tx, 0.0);
        assert_eq!(a.ty, 0.0);
    }

    #[test]
    fn fit_none_keeps_intrinsic_size() {
        let content = Rect::new(0.0, 0.0, 40.0, 20.0);
        let dest = Rect::new(0.0, 0.0, 100.0, 100.0);
        let m = resolve(content, dest, Fit::None, Alignment::BOTTOM_RIGHT);
        assert_eq!(m, Matrix2D::new(1.0, 0.0, 0.0, 1.0, 60.0, 80.0));
    }

    #[test]
    fn alignment_constructors_normalize() {
        assert_eq!(Alignment::new(-1.0, 2.0), Alignment::BOTTOM_LEFT);
        assert_eq!(Alignment::new(f64::NAN, 0.0), Alignment::TOP_CENTER);
        assert_eq!(Alignment::from_signed(-1.0, 1.0), Alignment::BOTTOM_LEFT);
        assert_eq!(Alignment::from_signed(0.0, 0.0), Alignment::CENTER);
        assert_eq!(Alignment::default(), Alignment::CENTER);
        assert_eq!(Fit::default(), Fit::Contain);
    }

    #[test]
    fn resolver_caches_until_layout_changes() {
        let content = Rect::new(0.0, 0.0, 100.0, 50.0);
        let dest = Rect::new(0.0, 0.0, 200.0, 200.0);
        let mut resolver = FitResolver::new();
        assert_eq!(resolver.last(), None);

        let m = resolver.resolve(content, dest, Fit::Contain, Alignment::CENTER);
        assert_eq!(resolver.last(), Some(m));
        assert_eq!(
            resolver.resolve(content, dest, Fit::Contain, Alignment::CENTER),
            m
        );

        let wider = Rect::new(0.0, 0.0, 400.0, 200.0);
        let m2 = resolver.resolve(content, wider, Fit::Contain, Alignment::CENTER);
        assert_eq!(m2, resolve(content, wider, Fit::Contain, Alignment::CENTER));

        resolver.invalidate();
        assert_eq!(resolver.last(), None);
    }
}
