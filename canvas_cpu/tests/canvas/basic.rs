// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for basic functionality.

use crate::util::{
    argb, check_area, count, crossed_line_star, get_canvas, get_canvas_with, pentagon, solid,
};
use canvas_common::color::palette::css::{BEIGE, LIME, RED, WHITE};
use canvas_common::geometry::Line;
use canvas_common::kurbo::{BezPath, Circle, Rect};
use canvas_common::peniko::Fill;
use canvas_common::rect::Rect as PixelRect;
use canvas_cpu::CanvasSettings;

#[test]
fn full_cover() {
    let mut canvas = get_canvas(8, 8);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 8.0, 8.0), &mut solid(BEIGE));

    assert_eq!(count(&canvas, argb(BEIGE)), 64);
}

#[test]
fn box_covers_its_edges() {
    let mut canvas = get_canvas(20, 20);

    canvas.fill(
        &[
            Line::from_coords(0.0, 0.0, 0.0, 10.0),
            Line::from_coords(10.0, 10.0, 10.0, 0.0),
        ],
        &mut solid(LIME),
    );

    check_area(&canvas, PixelRect::new(0, 0, 11, 11), argb(LIME));
}

#[test]
fn filled_triangle() {
    let mut canvas = get_canvas(100, 100);

    let path = {
        let mut path = BezPath::new();
        path.move_to((5.0, 5.0));
        path.line_to((95.0, 50.0));
        path.line_to((5.0, 95.0));
        path.close_path();

        path
    };

    canvas.fill_path(&path, &mut solid(LIME));

    let lime = argb(LIME);
    assert_eq!(canvas.pixel(5, 50), Some(lime));
    assert_eq!(canvas.pixel(94, 50), Some(lime));
    assert_eq!(canvas.pixel(96, 50), Some(0));
    assert_eq!(canvas.pixel(50, 10), Some(0));
    assert_eq!(canvas.pixel(50, 30), Some(lime));
}

#[test]
fn pentagon_rows_are_single_spans() {
    let mut canvas = get_canvas(100, 100);
    let red = argb(RED);

    canvas.fill(&pentagon(), &mut solid(RED));

    for y in 11..=90 {
        let row = canvas.pixmap().row(y);
        let first = row.iter().position(|&p| p == red).unwrap();
        let last = row.iter().rposition(|&p| p == red).unwrap();

        assert!(row[first..=last].iter().all(|&p| p == red), "row {y}");
    }
    assert!(canvas.pixmap().row(10).iter().all(|&p| p == 0));
    assert!(canvas.pixmap().row(91).iter().all(|&p| p == 0));
}

#[test]
fn star_with_non_zero() {
    let mut canvas = get_canvas(100, 100);

    canvas.fill_path(&crossed_line_star(), &mut solid(RED));

    assert_eq!(canvas.pixel(50, 50), Some(argb(RED)));
}

#[test]
fn star_with_even_odd() {
    let mut canvas = get_canvas_with(
        100,
        100,
        CanvasSettings {
            fill_rule: Fill::EvenOdd,
            ..CanvasSettings::default()
        },
    );

    canvas.fill_path(&crossed_line_star(), &mut solid(RED));

    assert_eq!(canvas.pixel(50, 50), Some(0));
    // The tips are still filled.
    assert_eq!(canvas.pixel(50, 15), Some(argb(RED)));

    canvas.set_fill_rule(Fill::NonZero);
    canvas.fill_path(&crossed_line_star(), &mut solid(RED));
    assert_eq!(canvas.pixel(50, 50), Some(argb(RED)));
}

#[test]
fn filled_circle_area() {
    let mut canvas = get_canvas(64, 64);

    canvas.fill(&Circle::new((32.0, 32.0), 20.0), &mut solid(RED));

    let area = count(&canvas, argb(RED));
    assert!((1150..1350).contains(&area), "area {area}");
}

#[test]
fn shape_is_clipped_to_canvas() {
    let mut canvas = get_canvas(8, 8);

    canvas.fill_rect(&Rect::new(-10.0, -10.0, 5.0, 5.0), &mut solid(RED));

    check_area(&canvas, PixelRect::new(0, 0, 6, 6), argb(RED));
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(0, 0, 6, 6)));
}

#[test]
fn shape_outside_canvas() {
    let mut canvas = get_canvas(8, 8);

    canvas.fill_rect(&Rect::new(20.0, 20.0, 30.0, 30.0), &mut solid(RED));

    assert_eq!(count(&canvas, 0), 64);
    assert_eq!(canvas.take_dirty(), None);
}

#[test]
fn path_with_nan_is_ignored() {
    let mut canvas = get_canvas(16, 16);

    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((f64::NAN, 8.0));
    path.line_to((12.0, 12.0));
    path.close_path();

    canvas.fill_path(&path, &mut solid(RED));

    assert_eq!(count(&canvas, 0), 256);
    assert_eq!(canvas.take_dirty(), None);
}

#[test]
fn degenerate_lines_render_nothing() {
    let mut canvas = get_canvas(16, 16);

    canvas.fill(
        &[
            Line::from_coords(3.0, 3.0, 3.0, 3.0),
            Line::from_coords(0.0, 5.0, 15.0, 5.0),
        ],
        &mut solid(RED),
    );

    assert_eq!(count(&canvas, 0), 256);
}

#[test]
fn stroked_rect() {
    let mut canvas = get_canvas(16, 16);

    canvas.stroke(&Rect::new(2.0, 2.0, 12.0, 8.0), &mut solid(RED));

    let red = argb(RED);
    assert_eq!(count(&canvas, red), 32);
    assert_eq!(canvas.pixel(2, 2), Some(red));
    assert_eq!(canvas.pixel(12, 8), Some(red));
    assert_eq!(canvas.pixel(5, 5), Some(0));
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(2, 2, 11, 7)));
}

#[test]
fn stroke_stored_lines() {
    let mut canvas = get_canvas_with(
        16,
        16,
        CanvasSettings {
            store_lines: true,
            ..CanvasSettings::default()
        },
    );

    canvas.stroke(&Rect::new(2.0, 2.0, 12.0, 8.0), &mut solid(RED));

    assert_eq!(canvas.draw_lines().len(), 4);
    assert_eq!(count(&canvas, argb(RED)), 32);
}

#[test]
fn lines_are_released_without_storage() {
    let mut canvas = get_canvas(16, 16);

    canvas.fill_rect(&Rect::new(2.0, 2.0, 12.0, 8.0), &mut solid(RED));

    assert!(canvas.draw_lines().is_empty());
}

#[test]
fn semi_transparent_fill() {
    let mut canvas = get_canvas(4, 4);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 4.0, 4.0), &mut solid(WHITE));
    canvas.fill_rect(
        &Rect::new(0.0, 0.0, 4.0, 4.0),
        &mut solid(RED.with_alpha(0.5)),
    );

    let [r, g, b, a] = canvas_common::colour::unpack(canvas.pixel(1, 1).unwrap());
    assert_eq!((r, a), (255, 255));
    assert!((120..=135).contains(&g) && g == b, "{g} {b}");
}

#[test]
fn semi_transparent_fill_on_empty_canvas() {
    let mut canvas = get_canvas(4, 4);

    canvas.fill_rect(
        &Rect::new(0.0, 0.0, 4.0, 4.0),
        &mut solid(RED.with_alpha(0.5)),
    );

    assert_eq!(canvas.pixel(2, 2), Some(0x80FF_0000));
}

#[test]
fn very_tall_shape_only_scans_canvas_rows() {
    let mut canvas = get_canvas(8, 8);

    canvas.fill_rect(&Rect::new(2.0, -1.0e9, 4.0, 1.0e9), &mut solid(RED));

    check_area(&canvas, PixelRect::new(2, 0, 3, 8), argb(RED));
}
