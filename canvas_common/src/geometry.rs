// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points, line segments and the decomposition of figures into segments.

use crate::kurbo::{self, BezPath, PathEl, Shape};
use crate::rect::Rect;
use log::warn;

/// A point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// The x coordinate of the point.
    pub x: f32,
    /// The y coordinate of the point.
    pub y: f32,
}

impl Point {
    /// The point `(0, 0)`.
    pub const ZERO: Self = Self::new(0., 0.);

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl core::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<kurbo::Point> for Point {
    fn from(value: kurbo::Point) -> Self {
        Self::new(value.x as f32, value.y as f32)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

/// A line segment.
///
/// A line is valid if both end points are finite and the end points differ.
/// Invalid lines are kept as-is so that consumers can decide to skip them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// The start point of the line.
    pub p0: Point,
    /// The end point of the line.
    pub p1: Point,
    valid: bool,
}

impl Line {
    /// Create a new line.
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let p0 = p0.into();
        let p1 = p1.into();
        let valid = p0.is_finite() && p1.is_finite() && p0 != p1;

        Self { p0, p1, valid }
    }

    /// Create a new line from its four coordinates.
    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    /// Whether the line is finite and non-degenerate.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The difference between the end and the start point.
    pub fn delta(&self) -> Point {
        self.p1 - self.p0
    }
}

/// Return the smallest integer rectangle covering all valid lines, if there are any.
pub fn bounding_rect(lines: &[Line]) -> Option<Rect> {
    let mut valid = lines.iter().filter(|l| l.is_valid());
    let first = valid.next()?;

    let mut min = Point::new(first.p0.x.min(first.p1.x), first.p0.y.min(first.p1.y));
    let mut max = Point::new(first.p0.x.max(first.p1.x), first.p0.y.max(first.p1.y));

    for line in valid {
        min.x = min.x.min(line.p0.x).min(line.p1.x);
        min.y = min.y.min(line.p0.y).min(line.p1.y);
        max.x = max.x.max(line.p0.x).max(line.p1.x);
        max.y = max.y.max(line.p0.y).max(line.p1.y);
    }

    let x = min.x.floor() as i32;
    let y = min.y.floor() as i32;
    Some(Rect::new(
        x,
        y,
        max.x.ceil() as i32 - x,
        max.y.ceil() as i32 - y,
    ))
}

/// A figure that can be decomposed into line segments.
pub trait LineSource {
    /// Append the segments of this figure to `out`.
    ///
    /// Curved figures are flattened so that no segment deviates from the curve by more
    /// than `tolerance`.
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>);
}

impl LineSource for [Line] {
    fn push_lines(&self, _: f64, out: &mut Vec<Line>) {
        out.extend_from_slice(self);
    }
}

impl LineSource for Vec<Line> {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        self.as_slice().push_lines(tolerance, out);
    }
}

impl<const N: usize> LineSource for [Line; N] {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        self.as_slice().push_lines(tolerance, out);
    }
}

/// A closed polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from its corners. The last corner connects back to the first one.
    pub fn new(points: impl IntoIterator<Item = impl Into<Point>>) -> Self {
        Self {
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    /// The corners of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl LineSource for Polygon {
    fn push_lines(&self, _: f64, out: &mut Vec<Line>) {
        if self.points.len() < 2 {
            return;
        }

        for pair in self.points.windows(2) {
            out.push(Line::new(pair[0], pair[1]));
        }

        out.push(Line::new(self.points[self.points.len() - 1], self.points[0]));
    }
}

impl LineSource for BezPath {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        flatten(self.elements().iter().copied(), tolerance, out);
    }
}

impl LineSource for kurbo::Rect {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        flatten(self.path_elements(tolerance), tolerance, out);
    }
}

impl LineSource for kurbo::Ellipse {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        flatten(self.path_elements(tolerance), tolerance, out);
    }
}

impl LineSource for kurbo::Circle {
    fn push_lines(&self, tolerance: f64, out: &mut Vec<Line>) {
        flatten(self.path_elements(tolerance), tolerance, out);
    }
}

/// Flatten a path into line segments, closing every subpath.
///
/// A path that contains NaN is ill-defined, so nothing is appended for it.
fn flatten(path: impl IntoIterator<Item = PathEl>, tolerance: f64, out: &mut Vec<Line>) {
    let start_len = out.len();
    let mut cb = FlattenerCallback {
        line_buf: &mut *out,
        start: Point::ZERO,
        p0: Point::ZERO,
        is_nan: false,
    };

    kurbo::flatten(path, tolerance, |el| cb.callback(el));
    cb.close();

    let is_nan = cb.is_nan;
    if is_nan {
        warn!("A path contains NaN, ignoring it.");

        out.truncate(start_len);
    }
}

struct FlattenerCallback<'a> {
    line_buf: &'a mut Vec<Line>,
    start: Point,
    p0: Point,
    is_nan: bool,
}

impl FlattenerCallback<'_> {
    fn callback(&mut self, el: PathEl) {
        match el {
            PathEl::MoveTo(p) => {
                self.is_nan |= p.is_nan();
                self.close();

                self.start = p.into();
                self.p0 = self.start;
            }
            PathEl::LineTo(p) => {
                self.is_nan |= p.is_nan();

                let p = p.into();
                self.line_buf.push(Line::new(self.p0, p));
                self.p0 = p;
            }
            PathEl::ClosePath => self.close(),
            // `kurbo::flatten` only emits move, line and close elements.
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        }
    }

    /// Connect the current point back to the start of the subpath.
    fn close(&mut self) {
        if self.p0 != self.start {
            self.line_buf.push(Line::new(self.p0, self.start));
            self.p0 = self.start;
        }
    }
}
