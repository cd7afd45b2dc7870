// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for tracking the region touched by render operations.

use crate::util::{argb, count, get_canvas, get_canvas_with, solid};
use canvas_common::boundary::Bounds;
use canvas_common::color::palette::css::RED;
use canvas_common::kurbo::Rect;
use canvas_common::rect::Rect as PixelRect;
use canvas_cpu::CanvasSettings;

#[test]
fn fresh_canvas_is_clean() {
    let mut canvas = get_canvas(16, 16);

    assert!(!canvas.boundary().is_valid());
    assert_eq!(canvas.take_dirty(), None);
}

#[test]
fn take_dirty_resets() {
    let mut canvas = get_canvas(16, 16);

    canvas.fill_rect(&Rect::new(2.0, 2.0, 5.0, 5.0), &mut solid(RED));
    assert!(canvas.boundary().contains(5, 5));
    assert!(!canvas.boundary().contains(6, 5));

    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(2, 2, 4, 4)));
    assert_eq!(canvas.take_dirty(), None);
}

#[test]
fn operations_are_merged() {
    let mut canvas = get_canvas(16, 16);

    canvas.fill_rect(&Rect::new(2.0, 2.0, 5.0, 5.0), &mut solid(RED));
    canvas.fill_rect(&Rect::new(8.0, 1.0, 10.0, 12.0), &mut solid(RED));

    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(2, 1, 9, 12)));
}

#[test]
fn accumulated_region_survives_taking() {
    let mut canvas = get_canvas_with(
        16,
        16,
        CanvasSettings {
            accumulate_dirty: true,
            ..CanvasSettings::default()
        },
    );

    canvas.fill_rect(&Rect::new(2.0, 2.0, 5.0, 5.0), &mut solid(RED));
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(2, 2, 4, 4)));

    canvas.fill_rect(&Rect::new(0.0, 0.0, 1.0, 1.0), &mut solid(RED));
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(0, 0, 6, 6)));
}

#[test]
fn clearing_marks_the_region() {
    let mut canvas = get_canvas(8, 8);
    canvas.fill_rect(&Rect::new(0.0, 0.0, 8.0, 8.0), &mut solid(RED));
    canvas.take_dirty();

    canvas.clear_rect(PixelRect::new(-4, -4, 8, 8));

    assert_eq!(count(&canvas, 0), 16);
    assert_eq!(count(&canvas, argb(RED)), 48);
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(0, 0, 4, 4)));

    canvas.clear();
    assert_eq!(count(&canvas, 0), 64);
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(0, 0, 8, 8)));
}

#[test]
fn resize_keeps_content_and_resets_region() {
    let mut canvas = get_canvas(8, 8);
    canvas.fill_rect(&Rect::new(0.0, 0.0, 3.0, 3.0), &mut solid(RED));

    canvas.resize(16, 4);

    assert_eq!((canvas.width(), canvas.height()), (16, 4));
    assert_eq!(count(&canvas, argb(RED)), 16);
    assert_eq!(canvas.take_dirty(), None);

    // Rows beyond the old height can be rendered into.
    canvas.fill_rect(&Rect::new(12.0, 0.0, 20.0, 20.0), &mut solid(RED));
    assert_eq!(canvas.take_dirty(), Some(PixelRect::new(12, 0, 4, 4)));
}
