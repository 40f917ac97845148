// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the `understory_artboard` demos.
//!
//! Run:
//! - `cargo run -p understory_artboard_demos --example stress_test`
//! - `cargo run -p understory_artboard_demos --example touch_mapping`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_artboard::{ContentSource, Matrix2D};

/// Installs a `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Stand-in for a GPU drawing context: records the device-space corners of
/// every artboard drawn into it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Device-space bounds of each draw, in submission order.
    pub draws: Vec<Rect>,
    /// Number of postprocess passes run on this surface.
    pub postprocess_passes: u32,
}

/// Artboard with fixed intrinsic bounds.
#[derive(Debug, Clone, Copy)]
pub struct Artboard {
    /// Intrinsic bounds in artboard units.
    pub bounds: Rect,
}

impl ContentSource<RecordingSurface> for Artboard {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn draw(&mut self, ctx: &mut RecordingSurface, transform: Matrix2D) {
        let placed = transform.apply_rect_bbox(self.bounds);
        tracing::debug!(?placed, "artboard drawn");
        ctx.draws.push(placed);
    }

    fn postprocess(&mut self, ctx: &mut RecordingSurface) {
        // A real host would encode its blur/clip compute passes here.
        ctx.postprocess_passes += 1;
    }
}

/// Formats a point with two decimals.
#[must_use]
pub fn fmt_point(p: Point) -> String {
    format!("({:.2}, {:.2})", p.x, p.y)
}
