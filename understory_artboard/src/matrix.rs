// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Mul;

use kurbo::{Affine, Point, Rect};

use crate::error::SingularTransformError;

/// Determinants with a smaller magnitude than this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// 2×3 affine transform.
///
/// The six coefficients map a point as
///
/// ```text
/// x' = a·x + c·y + tx
/// y' = b·x + d·y + ty
/// ```
///
/// which is the same coefficient order as [`kurbo::Affine`], so conversions
/// in either direction are lossless.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2D {
    /// X scale / rotation component.
    pub a: f64,
    /// Y shear / rotation component.
    pub b: f64,
    /// X shear / rotation component.
    pub c: f64,
    /// Y scale / rotation component.
    pub d: f64,
    /// X translation.
    pub tx: f64,
    /// Y translation.
    pub ty: f64,
}

impl Matrix2D {
    /// The neutral transform.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Creates a transform from its six coefficients.
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// Returns the neutral transform.
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Axis-aligned scale about the origin.
    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Pure translation.
    #[must_use]
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns the transform equivalent to applying `inner` first, then `outer`.
    #[must_use]
    pub fn compose(outer: Self, inner: Self) -> Self {
        Self {
            a: outer.a * inner.a + outer.c * inner.b,
            b: outer.b * inner.a + outer.d * inner.b,
            c: outer.a * inner.c + outer.c * inner.d,
            d: outer.b * inner.c + outer.d * inner.d,
            tx: outer.a * inner.tx + outer.c * inner.ty + outer.tx,
            ty: outer.b * inner.tx + outer.d * inner.ty + outer.ty,
        }
    }

    /// Determinant of the linear part, `a·d − b·c`.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`SingularTransformError`] when the determinant is within
    /// [`SINGULAR_EPSILON`] of zero or is not finite.
    pub fn invert(&self) -> Result<Self, SingularTransformError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(SingularTransformError { determinant: det });
        }
        let inv_det = 1.0 / det;
        Ok(Self {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            tx: (self.c * self.ty - self.d * self.tx) * inv_det,
            ty: (self.b * self.tx - self.a * self.ty) * inv_det,
        })
    }

    /// Maps a point through this transform.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(
            self.a * pt.x + self.c * pt.y + self.tx,
            self.b * pt.x + self.d * pt.y + self.ty,
        )
    }

    /// Maps a rectangle and returns the bounding box of its four corners.
    #[must_use]
    pub fn apply_rect_bbox(&self, rect: Rect) -> Rect {
        Affine::from(*self).transform_rect_bbox(rect)
    }

    /// Returns `true` if every coefficient is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_coeffs().iter().all(|v| v.is_finite())
    }

    /// Coefficient-wise comparison with an absolute tolerance.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.as_coeffs()
            .iter()
            .zip(other.as_coeffs())
            .all(|(l, r)| (l - r).abs() <= epsilon)
    }

    /// Returns the coefficients as `[a, b, c, d, tx, ty]`.
    #[must_use]
    pub const fn as_coeffs(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }
}

impl Default for Matrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix2D {
    type Output = Self;

    /// `outer * inner`, the same order as [`Matrix2D::compose`].
    fn mul(self, inner: Self) -> Self {
        Self::compose(self, inner)
    }
}

impl Mul<Point> for Matrix2D {
    type Output = Point;

    fn mul(self, pt: Point) -> Point {
        self.apply(pt)
    }
}

impl From<Affine> for Matrix2D {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, tx, ty] = affine.as_coeffs();
        Self { a, b, c, d, tx, ty }
    }
}

impl From<Matrix2D> for Affine {
    fn from(m: Matrix2D) -> Self {
        Self::new(m.as_coeffs())
    }
}
