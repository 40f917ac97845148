// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw the same artboard many times per frame.
//!
//! Every simulated tap adds three more copies; each copy is drawn in its own
//! nested scope on a grid inside the fitted artboard area, followed by one
//! postprocess pass per frame.
//!
//! Run:
//! - `cargo run -p understory_artboard_demos --example stress_test`
//! - `RUST_LOG=debug cargo run -p understory_artboard_demos --example stress_test`

use kurbo::Rect;
use understory_artboard::{Alignment, Fit, Matrix2D, RenderSession, TransformStack};
use understory_artboard_demos::{Artboard, RecordingSurface, init_logging};

fn main() {
    init_logging();

    let mut artboard = Artboard {
        bounds: Rect::new(0.0, 0.0, 500.0, 500.0),
    };
    // Phone-sized view below a 60pt header, rendered at 3x.
    let view = Rect::new(0.0, 60.0, 390.0, 844.0);
    let mut device = TransformStack::new();
    device.save(Matrix2D::scale(3.0, 3.0));
    let mut session = RenderSession::with_stack(device);

    let mut draw_repeat: u32 = 1;
    for frame in 0..6 {
        // The host pauses rendering while the app is backgrounded.
        session.set_paused(frame == 3);
        if session.is_paused() {
            tracing::info!(frame, "paused, skipping frame");
            continue;
        }

        let mut surface = RecordingSurface::default();
        if let Err(err) = draw_frame(&mut session, &mut artboard, &mut surface, view, draw_repeat) {
            tracing::error!(%err, frame, "frame aborted");
            session.abort();
            continue;
        }

        let info = session.debug_info();
        tracing::info!(
            frame,
            copies = surface.draws.len(),
            postprocess = surface.postprocess_passes,
            stack_depth = info.stack_depth,
            "frame done"
        );
        if let (Some(first), Some(last)) = (surface.draws.first(), surface.draws.last()) {
            tracing::info!(?first, ?last, "device-space extent of first and last copy");
        }

        // Simulated tap.
        draw_repeat += 3;
    }
}

fn draw_frame(
    session: &mut RenderSession,
    artboard: &mut Artboard,
    surface: &mut RecordingSurface,
    view: Rect,
    copies: u32,
) -> Result<(), understory_artboard::SessionError> {
    use understory_artboard::ContentSource as _;

    session.begin(view, artboard.bounds, Fit::Contain, Alignment::CENTER)?;

    let cols = grid_columns(copies);
    let cell = 1.0 / f64::from(cols);
    let size = artboard.bounds.size();
    for i in 0..copies {
        let (col, row) = (i % cols, i / cols);
        let placement = Matrix2D::compose(
            Matrix2D::translate(
                size.width * cell * f64::from(col),
                size.height * cell * f64::from(row),
            ),
            Matrix2D::scale(cell, cell),
        );
        session.save(placement)?;
        session.draw(|m| artboard.draw(surface, m))?;
        session.restore()?;
    }

    session.postprocess(|| artboard.postprocess(surface))?;
    session.end()
}

/// Smallest column count whose square grid holds `copies`.
fn grid_columns(copies: u32) -> u32 {
    let mut cols = 1;
    while cols * cols < copies {
        cols += 1;
    }
    cols
}
