// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map touch positions in a view back onto the artboard for every fit mode.
//!
//! Run:
//! - `cargo run -p understory_artboard_demos --example touch_mapping`

use kurbo::{Point, Rect};
use understory_artboard::{Alignment, Fit, HitMapper};
use understory_artboard_demos::{fmt_point, init_logging};

fn main() {
    init_logging();

    let artboard = Rect::new(0.0, 0.0, 400.0, 300.0);
    let view = Rect::new(0.0, 0.0, 320.0, 480.0);
    let touches = [
        Point::new(160.0, 240.0),
        Point::new(10.0, 10.0),
        Point::new(300.0, 400.0),
    ];

    for fit in [
        Fit::Fill,
        Fit::Contain,
        Fit::Cover,
        Fit::FitWidth,
        Fit::FitHeight,
        Fit::ScaleDown,
        Fit::None,
    ] {
        let mapper = HitMapper::new(artboard, view, fit, Alignment::CENTER);
        println!("{fit:?}: transform {:?}", mapper.transform().as_coeffs());
        for touch in touches {
            match mapper.to_content_inside(touch) {
                Ok(Some(hit)) => println!("  {} -> {}", fmt_point(touch), fmt_point(hit)),
                Ok(None) => println!("  {} -> outside artboard", fmt_point(touch)),
                Err(err) => tracing::warn!(%err, "touch ignored"),
            }
        }
    }
}
