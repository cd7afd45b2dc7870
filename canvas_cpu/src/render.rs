// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic render operations.

use crate::brush::{Brush, BrushSession};
use crate::filler::{PolygonFiller, Span};
use crate::scanner::{LineScanner, Scanner};
use crate::settings::{CanvasSettings, Command, RenderSettings, Rotation};
use canvas_common::boundary::{Boundary, Bounds};
use canvas_common::buffer::PixelBuffer;
use canvas_common::colour;
use canvas_common::geometry::{bounding_rect, Line, LineSource};
use canvas_common::kurbo::{self, BezPath};
use canvas_common::peniko::Fill;
use canvas_common::rect::Rect;
use log::trace;

/// A render context drawing into a buffer of packed ARGB pixels.
#[derive(Debug)]
pub struct Canvas {
    pub(crate) target: PixelBuffer<u32>,
    pub(crate) settings: CanvasSettings,
    pub(crate) scanner: LineScanner,
    pub(crate) filler: PolygonFiller,
    pub(crate) line_buf: Vec<Line>,
    pub(crate) span_buf: Vec<Span>,
    pub(crate) dirty: Boundary,
    pub(crate) rotation: Rotation,
    pub(crate) command: Command,
}

impl Canvas {
    /// Create a new canvas with the given width and height in pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_settings(width, height, CanvasSettings::default())
    }

    /// Create a new canvas with explicit settings.
    pub fn with_settings(width: u32, height: u32, settings: CanvasSettings) -> Self {
        let target = PixelBuffer::new(width, height);

        let mut scanner = LineScanner::new();
        scanner.set_store_lines(settings.store_lines);
        scanner.set_clip(Some(0..target.height() as i32));

        let mut dirty = Boundary::new();
        dirty.set_accumulative(settings.accumulate_dirty);

        Self {
            target,
            settings,
            scanner,
            filler: PolygonFiller::new(settings.fill_rule),
            line_buf: vec![],
            span_buf: vec![],
            dirty,
            rotation: Rotation::default(),
            command: Command::empty(),
        }
    }

    /// Fill a figure with a brush.
    ///
    /// With [`Command::BRESENHAM`] set, the outline of the figure is drawn instead.
    pub fn fill<S: LineSource + ?Sized>(&mut self, shape: &S, brush: &mut dyn Brush) {
        self.line_buf.clear();
        shape.push_lines(self.settings.tolerance, &mut self.line_buf);
        self.render_lines(brush);
    }

    /// Fill a path.
    pub fn fill_path(&mut self, path: &BezPath, brush: &mut dyn Brush) {
        self.fill(path, brush);
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: &kurbo::Rect, brush: &mut dyn Brush) {
        self.fill(rect, brush);
    }

    /// Draw the outline of a figure with a brush.
    pub fn stroke<S: LineSource + ?Sized>(&mut self, shape: &S, brush: &mut dyn Brush) {
        let command = self.command;
        self.command |= Command::BRESENHAM;
        self.fill(shape, brush);
        self.command = command;
    }

    /// Set the rotation of brushes.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Reset the rotation of brushes.
    pub fn reset_rotation(&mut self) {
        self.rotation = Rotation::default();
    }

    /// Set the command flags of subsequent render operations.
    pub fn set_command(&mut self, command: Command) {
        self.command = command;
    }

    /// Set the current fill rule.
    pub fn set_fill_rule(&mut self, fill_rule: Fill) {
        self.settings.fill_rule = fill_rule;
        self.filler.set_fill_rule(fill_rule);
    }

    /// The settings of the canvas.
    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// The segments of the last figure, if the canvas stores them.
    pub fn draw_lines(&self) -> &[Line] {
        self.scanner.draw_lines()
    }

    /// The region touched since the dirty region was last taken.
    pub fn boundary(&self) -> &Boundary {
        &self.dirty
    }

    /// Return the touched region and start tracking anew.
    ///
    /// Canvases created with [`CanvasSettings::accumulate_dirty`] keep their region.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        let bounds = self.dirty.bounds();
        self.dirty.clear(false);
        bounds
    }

    /// Clear the given region to transparent.
    pub fn clear_rect(&mut self, rect: Rect) {
        self.target.clear(rect.x, rect.y, rect.width, rect.height);
        if let Some(area) = rect.intersect(&self.rect()) {
            self.dirty.update(Some(area));
        }
    }

    /// Clear the whole canvas to transparent.
    pub fn clear(&mut self) {
        self.clear_rect(self.rect());
    }

    /// Resize the canvas, keeping the overlapping content.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.target.set_size(width, height) {
            self.scanner
                .set_clip(Some(0..self.target.height() as i32));
            self.dirty.clear(true);
        }
    }

    /// The pixels of the canvas.
    pub fn pixmap(&self) -> &PixelBuffer<u32> {
        &self.target
    }

    /// The pixel at `(x, y)`, if it lies on the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.target.get(x, y)
    }

    /// Return the width of the canvas.
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    /// Return the height of the canvas.
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    fn render_lines(&mut self, brush: &mut dyn Brush) {
        self.line_buf.retain(Line::is_valid);
        let Some(bounds) = bounding_rect(&self.line_buf) else {
            trace!("nothing to render");
            return;
        };

        let mut command = self.command;
        if self.settings.antialiasing {
            command |= Command::ANTIALIAS;
        }
        let settings = RenderSettings {
            bounds,
            rotation: self.rotation,
            command,
        };

        self.scanner.begin();
        self.scanner.scan(&self.line_buf);

        let brush = BrushSession::new(brush, &settings);
        let touched = if command.contains(Command::BRESENHAM) {
            self.stroke_lines(&*brush)
        } else {
            self.fill_spans(&*brush)
        };
        drop(brush);

        if !self.settings.store_lines {
            self.scanner.end();
        }

        if let Some(touched) = touched {
            self.dirty.update(Some(touched));
        }
    }

    fn fill_spans(&mut self, brush: &dyn Brush) -> Option<Rect> {
        let clip = self.rect();
        self.span_buf.clear();
        self.filler
            .fill(self.scanner.scan_lines(), &clip, &mut self.span_buf);

        let mut touched: Option<Rect> = None;
        for span in &self.span_buf {
            let colours = brush.read_line(span.x0, span.y, span.len() as usize);
            let row = &mut self.target.row_mut(span.y as u32)[span.x0 as usize..=span.x1 as usize];

            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = colour::source_over(*pixel, colours.get(i));
            }

            let area = Rect::from_edges(span.x0, span.y, span.x1 + 1, span.y + 1);
            touched = Some(touched.map_or(area, |t| t.union(&area)));
        }

        touched
    }

    fn stroke_lines(&mut self, brush: &dyn Brush) -> Option<Rect> {
        let clip = self.rect();
        let lines = if self.settings.store_lines {
            self.scanner.draw_lines()
        } else {
            &self.line_buf[..]
        };

        let target = &mut self.target;
        let mut touched: Option<Rect> = None;
        for line in lines {
            // Lines that miss the canvas entirely are not walked.
            let misses = bounding_rect(core::slice::from_ref(line)).is_none_or(|b| {
                Rect::new(b.x, b.y, b.width + 1, b.height + 1)
                    .intersect(&clip)
                    .is_none()
            });
            if misses {
                continue;
            }

            bresenham(line, |x, y| {
                if !clip.contains(x, y) {
                    return;
                }
                let Some(colour) = brush.read_pixel(x, y) else {
                    return;
                };

                let (px, py) = (x as u32, y as u32);
                if let Some(dst) = target.get(px, py) {
                    target.set(px, py, colour::source_over(dst, colour));
                }

                let area = Rect::new(x, y, 1, 1);
                touched = Some(touched.map_or(area, |t| t.union(&area)));
            });
        }

        touched
    }
}

/// Walk the pixels of a line from its start point up to, but excluding, its end point.
///
/// Consecutive segments of a closed outline therefore touch every vertex once.
fn bresenham(line: &Line, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (line.p0.x.round() as i32, line.p0.y.round() as i32);
    let (x1, y1) = (line.p1.x.round() as i32, line.p1.y.round() as i32);

    let dx = (i64::from(x1) - i64::from(x0)).abs();
    let dy = -(i64::from(y1) - i64::from(y0)).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    while (x0, y0) != (x1, y1) {
        plot(x0, y0);

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
