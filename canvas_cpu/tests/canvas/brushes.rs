// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for filling shapes with gradient and texture brushes.

use crate::util::{argb, count, get_canvas, get_canvas_with};
use canvas_common::buffer::PixelBuffer;
use canvas_common::color::palette::css::{BLACK, BLUE, RED, WHITE};
use canvas_common::colour::GradientStops;
use canvas_common::kurbo::Rect;
use canvas_cpu::brush::{Brush, Gradient, GradientBrush, TextureBrush};
use canvas_cpu::{CanvasSettings, Command, Rotation};

fn gradient(kind: Gradient) -> GradientBrush {
    GradientBrush::new(kind, 4, 4, GradientStops::two(RED, BLUE)).unwrap()
}

#[test]
fn horizontal_gradient_spans_the_shape() {
    let mut canvas = get_canvas(40, 20);
    let mut brush = gradient(Gradient::Horizontal);

    canvas.fill_rect(&Rect::new(10.0, 5.0, 30.0, 15.0), &mut brush);

    assert_eq!(canvas.pixel(10, 5), Some(argb(RED)));
    assert_eq!(canvas.pixel(30, 15), Some(argb(BLUE)));
    // Colours change monotonically from left to right.
    let row = &canvas.pixmap().row(10)[10..=30];
    assert!(row.windows(2).all(|p| (p[0] >> 16) & 0xFF >= (p[1] >> 16) & 0xFF));
    // The brush is back at its own size.
    assert_eq!(brush.size(), (4, 4));
}

#[test]
fn vertical_gradient_rows_are_uniform() {
    let mut canvas = get_canvas(16, 16);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 15.0, 15.0), &mut gradient(Gradient::Vertical));

    for y in 0..16 {
        let row = canvas.pixmap().row(y);
        assert!(row.iter().all(|&p| p == row[0]), "row {y}");
    }
    assert_eq!(canvas.pixel(0, 0), Some(argb(RED)));
    assert_eq!(canvas.pixel(0, 15), Some(argb(BLUE)));
}

#[test]
fn rotated_gradient() {
    let mut canvas = get_canvas(20, 20);
    canvas.set_rotation(Rotation::new(90.0));

    canvas.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &mut gradient(Gradient::Horizontal));

    assert_eq!(canvas.pixel(3, 0), Some(argb(RED)));
    assert_eq!(canvas.pixel(7, 10), Some(argb(BLUE)));
    assert_eq!(canvas.pixel(0, 5), canvas.pixel(10, 5));

    canvas.reset_rotation();
    canvas.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &mut gradient(Gradient::Horizontal));
    assert_eq!(canvas.pixel(0, 5), Some(argb(RED)));
}

#[test]
fn circular_gradient_is_symmetric() {
    let mut canvas = get_canvas(21, 21);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 20.0, 20.0), &mut gradient(Gradient::Circular));

    assert_eq!(canvas.pixel(10, 10), Some(argb(BLUE)));
    assert_eq!(canvas.pixel(0, 10), canvas.pixel(20, 10));
    assert_eq!(canvas.pixel(10, 0), canvas.pixel(10, 20));
    assert_eq!(canvas.pixel(0, 0), Some(argb(RED)));
}

#[test]
fn texture_tiles_across_the_canvas() {
    let texture = PixelBuffer::from_parts(
        vec![0xFF00_0001, 0xFF00_0002, 0xFF00_0003, 0xFF00_0004],
        2,
        2,
    );
    let mut brush = TextureBrush::new(texture).unwrap();
    let mut canvas = get_canvas(8, 8);
    canvas.set_command(Command::FOLLOW_CANVAS | Command::NO_AUTO_SIZE);

    canvas.fill_rect(&Rect::new(1.0, 1.0, 7.0, 7.0), &mut brush);

    for y in 1..=7 {
        for x in 1..=7 {
            let expected = 0xFF00_0001 + x % 2 + (y % 2) * 2;
            assert_eq!(canvas.pixel(x, y), Some(expected), "({x}, {y})");
        }
    }
    assert_eq!(canvas.pixel(0, 0), Some(0));
}

#[test]
fn texture_is_scaled_to_the_shape() {
    let texture = PixelBuffer::from_parts(vec![0xFF00_0001, 0xFF00_0002], 2, 1);
    let mut brush = TextureBrush::new(texture)
        .unwrap()
        .with_interpolation(canvas_common::resample::Interpolation::Nearest);
    let mut canvas = get_canvas(8, 8);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 8.0, 8.0), &mut brush);

    // The texture is stretched over the bounds of the rectangle.
    assert_eq!(canvas.pixel(3, 4), Some(0xFF00_0001));
    assert_eq!(canvas.pixel(4, 4), Some(0xFF00_0002));
    assert_eq!(brush.size(), (2, 1));
}

#[test]
fn antialiasing_keeps_whole_positions_exact() {
    let shape = Rect::new(2.0, 2.0, 30.0, 12.0);
    let ramp = || GradientStops::two(BLACK, WHITE);

    let mut plain = get_canvas(32, 16);
    let mut brush = GradientBrush::new(Gradient::ForwardDiagonal, 1, 1, ramp()).unwrap();
    plain.fill_rect(&shape, &mut brush);

    let mut smooth = get_canvas_with(
        32,
        16,
        CanvasSettings {
            antialiasing: true,
            ..CanvasSettings::default()
        },
    );
    smooth.fill_rect(&shape, &mut brush);

    assert_eq!(plain.pixmap().data(), smooth.pixmap().data());
}

#[test]
fn inverted_rotation_mirrors() {
    let mut clockwise = get_canvas(20, 20);
    clockwise.set_rotation(Rotation::new(90.0));
    clockwise.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &mut gradient(Gradient::Horizontal));

    let mut counter = get_canvas(20, 20);
    counter.set_rotation(Rotation::new(90.0));
    counter.set_command(Command::INVERT_ROTATION);
    counter.fill_rect(&Rect::new(0.0, 0.0, 10.0, 10.0), &mut gradient(Gradient::Horizontal));

    assert_eq!(clockwise.pixel(5, 0), counter.pixel(5, 10));
    assert_eq!(clockwise.pixel(5, 10), counter.pixel(5, 0));
}

#[test]
fn huge_shape_uses_a_clamped_brush() {
    let mut canvas = get_canvas(8, 8);
    let mut brush = gradient(Gradient::ForwardDiagonal);

    canvas.fill_rect(&Rect::new(0.0, 0.0, 4.0e7, 4.0e7), &mut brush);

    assert_eq!(count(&canvas, 0), 0);
    assert_eq!(canvas.pixel(0, 0), Some(argb(RED)));
    assert_eq!(brush.size(), (4, 4));
}
