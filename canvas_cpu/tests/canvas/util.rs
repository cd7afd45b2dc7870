// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions shared across different tests.

use canvas_common::color::{AlphaColor, Srgb};
use canvas_common::colour;
use canvas_common::geometry::Polygon;
use canvas_common::kurbo::{BezPath, Point};
use canvas_common::rect::Rect;
use canvas_cpu::brush::GradientBrush;
use canvas_cpu::{Canvas, CanvasSettings};
use std::f64::consts::PI;

pub(crate) fn get_canvas(width: u32, height: u32) -> Canvas {
    Canvas::new(width, height)
}

pub(crate) fn get_canvas_with(width: u32, height: u32, settings: CanvasSettings) -> Canvas {
    Canvas::with_settings(width, height, settings)
}

pub(crate) fn solid(colour: AlphaColor<Srgb>) -> GradientBrush {
    GradientBrush::solid(colour)
}

pub(crate) fn argb(colour: AlphaColor<Srgb>) -> u32 {
    colour::from_alpha_color(colour)
}

/// Count the pixels of the canvas that have exactly the given colour.
pub(crate) fn count(canvas: &Canvas, argb: u32) -> usize {
    canvas.pixmap().data().iter().filter(|&&p| p == argb).count()
}

/// Check that every pixel of `area` has the given colour, and that no other pixel has it.
pub(crate) fn check_area(canvas: &Canvas, area: Rect, argb: u32) {
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let inside = area.contains(x as i32, y as i32);
            let pixel = canvas.pixel(x, y).unwrap();

            assert_eq!(
                pixel == argb,
                inside,
                "pixel ({x}, {y}) is {pixel:#010x}, expected {}{argb:#010x}",
                if inside { "" } else { "anything but " }
            );
        }
    }
}

pub(crate) fn pentagon() -> Polygon {
    Polygon::new([
        (50.0, 10.5),
        (90.3, 40.5),
        (75.2, 90.5),
        (25.4, 90.5),
        (10.1, 40.5),
    ])
}

/// A five-pointed star drawn with a single self-intersecting line.
pub(crate) fn crossed_line_star() -> BezPath {
    let radius = 40.0;

    let mut path = BezPath::new();
    for i in 0..5 {
        let angle = (-90.0 + 144.0 * f64::from(i)) * PI / 180.0;
        let point = Point::new(50.0 + radius * angle.cos(), 50.0 + radius * angle.sin());
        if i == 0 {
            path.move_to(point);
        } else {
            path.line_to(point);
        }
    }
    path.close_path();

    path
}
