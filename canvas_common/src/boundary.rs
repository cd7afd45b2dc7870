// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-region tracking.
//!
//! A boundary accumulates the smallest box covering everything a render target touched
//! since it was last cleared, so that only that part of the target needs to be presented
//! again.
//!
//! Two kinds exist: [`Boundary`] tracks an axis-aligned rectangle, [`RotatedBoundary`]
//! additionally remembers where the extreme points were touched so that containment can be
//! tested against the rotated quadrilateral spanned by them.

use crate::rect::Rect;
use log::trace;

/// The sentinel for an unset minimum.
const UNSET_MIN: i32 = i32::MAX;
/// The sentinel for an unset maximum.
const UNSET_MAX: i32 = 0;

/// Common interface of the dirty-region trackers.
pub trait Bounds {
    /// Expand the boundary so that it covers `area`.
    ///
    /// `None` signals that the caller touched no area at all and resets the boundary, subject
    /// to the same rules as a soft [`clear`](Bounds::clear). An empty rectangle is ignored.
    fn update(&mut self, area: Option<Rect>);

    /// Reset the boundary to empty.
    ///
    /// Accumulative boundaries ignore this unless `by_force` is set.
    fn clear(&mut self, by_force: bool);

    /// Whether the pixel `(x, y)` lies within the boundary.
    fn contains(&self, x: i32, y: i32) -> bool;

    /// The axis-aligned box covered by the boundary, if it is valid.
    fn bounds(&self) -> Option<Rect>;

    /// Whether the boundary covers any area with positive maximum coordinates.
    fn is_valid(&self) -> bool;

    /// Whether the boundary lies within `[-1, max_width] × [-1, max_height]`.
    fn is_confined(&self, max_width: i32, max_height: i32) -> bool;
}

/// An axis-aligned dirty rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Boundary {
    /// `[min_x, min_y, max_x, max_y]`, maxima exclusive.
    coords: [i32; 4],
    accumulative: bool,
}

impl Default for Boundary {
    fn default() -> Self {
        Self::new()
    }
}

impl Boundary {
    const MIN_X: usize = 0;
    const MIN_Y: usize = 1;
    const MAX_X: usize = 2;
    const MAX_Y: usize = 3;
    const EMPTY: [i32; 4] = [UNSET_MIN, UNSET_MIN, UNSET_MAX, UNSET_MAX];

    /// Create an empty boundary.
    pub fn new() -> Self {
        Self {
            coords: Self::EMPTY,
            accumulative: false,
        }
    }

    /// Create an empty boundary that only resets on forced clears.
    pub fn accumulative() -> Self {
        Self {
            coords: Self::EMPTY,
            accumulative: true,
        }
    }

    /// Whether this boundary ignores soft clears.
    pub fn is_accumulative(&self) -> bool {
        self.accumulative
    }

    /// Make the boundary ignore (or honour) soft clears.
    pub fn set_accumulative(&mut self, accumulative: bool) {
        self.accumulative = accumulative;
    }

    /// The raw `[min_x, min_y, max_x, max_y]` coordinates.
    pub fn coords(&self) -> [i32; 4] {
        self.coords
    }
}

impl Bounds for Boundary {
    fn update(&mut self, area: Option<Rect>) {
        let Some(area) = area else {
            self.clear(false);
            return;
        };

        if area.is_empty() {
            trace!("ignoring empty update {area:?}");
            return;
        }

        let c = &mut self.coords;
        c[Self::MIN_X] = c[Self::MIN_X].min(area.x);
        c[Self::MIN_Y] = c[Self::MIN_Y].min(area.y);
        c[Self::MAX_X] = c[Self::MAX_X].max(area.right());
        c[Self::MAX_Y] = c[Self::MAX_Y].max(area.bottom());
    }

    fn clear(&mut self, by_force: bool) {
        if self.accumulative && !by_force {
            return;
        }

        self.coords = Self::EMPTY;
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds().is_some_and(|b| b.contains(x, y))
    }

    fn bounds(&self) -> Option<Rect> {
        let c = &self.coords;
        self.is_valid().then(|| {
            Rect::from_edges(c[Self::MIN_X], c[Self::MIN_Y], c[Self::MAX_X], c[Self::MAX_Y])
        })
    }

    fn is_valid(&self) -> bool {
        self.coords[Self::MAX_X] > 0 && self.coords[Self::MAX_Y] > 0
    }

    fn is_confined(&self, max_width: i32, max_height: i32) -> bool {
        confined(&self.coords[..4], max_width, max_height)
    }
}

/// A dirty region that also tracks the corner extrema of rotated shapes.
///
/// Besides the bounding box, it remembers the x coordinate at which the minimum and the
/// maximum y were reached and the y coordinate at which the minimum and maximum x were
/// reached. The four points (top, right, bottom, left) span a quadrilateral, which is exact
/// for a single rotated rectangle, and containment is tested against its two triangles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotatedBoundary {
    /// `[min_x, min_y, max_x, max_y, y_at_min_x, x_at_min_y, y_at_max_x, x_at_max_y]`, all
    /// of them pixels covered by the boundary.
    coords: [i32; 8],
    accumulative: bool,
}

impl Default for RotatedBoundary {
    fn default() -> Self {
        Self::new()
    }
}

impl RotatedBoundary {
    const MIN_X: usize = 0;
    const MIN_Y: usize = 1;
    const MAX_X: usize = 2;
    const MAX_Y: usize = 3;
    const Y_AT_MIN_X: usize = 4;
    const X_AT_MIN_Y: usize = 5;
    const Y_AT_MAX_X: usize = 6;
    const X_AT_MAX_Y: usize = 7;
    const EMPTY: [i32; 8] = [
        UNSET_MIN,
        UNSET_MIN,
        UNSET_MAX - 1,
        UNSET_MAX - 1,
        0,
        0,
        0,
        0,
    ];

    /// Create an empty boundary.
    pub fn new() -> Self {
        Self {
            coords: Self::EMPTY,
            accumulative: false,
        }
    }

    /// Create an empty boundary that only resets on forced clears.
    pub fn accumulative() -> Self {
        Self {
            coords: Self::EMPTY,
            accumulative: true,
        }
    }

    /// The raw coordinates, see the type documentation for their order.
    pub fn coords(&self) -> [i32; 8] {
        self.coords
    }

    /// Expand the boundary so that it covers the given pixels, usually the four corner pixels
    /// of a rotated rectangle.
    ///
    /// Ties are broken so that the four extrema walk around the shape clockwise: the topmost
    /// point prefers the left, the rightmost the top, the bottommost the right and the leftmost
    /// the bottom. For an axis-aligned rectangle, this picks its four corners.
    pub fn update_points(&mut self, points: impl IntoIterator<Item = (i32, i32)>) {
        let c = &mut self.coords;

        for (x, y) in points {
            if x < c[Self::MIN_X] || (x == c[Self::MIN_X] && y > c[Self::Y_AT_MIN_X]) {
                c[Self::MIN_X] = x;
                c[Self::Y_AT_MIN_X] = y;
            }
            if y < c[Self::MIN_Y] || (y == c[Self::MIN_Y] && x < c[Self::X_AT_MIN_Y]) {
                c[Self::MIN_Y] = y;
                c[Self::X_AT_MIN_Y] = x;
            }
            if x > c[Self::MAX_X] || (x == c[Self::MAX_X] && y < c[Self::Y_AT_MAX_X]) {
                c[Self::MAX_X] = x;
                c[Self::Y_AT_MAX_X] = y;
            }
            if y > c[Self::MAX_Y] || (y == c[Self::MAX_Y] && x > c[Self::X_AT_MAX_Y]) {
                c[Self::MAX_Y] = y;
                c[Self::X_AT_MAX_Y] = x;
            }
        }
    }

    /// The bounding box with exclusive maxima.
    fn edges(&self) -> [i32; 4] {
        let c = &self.coords;
        [
            c[Self::MIN_X],
            c[Self::MIN_Y],
            c[Self::MAX_X].saturating_add(1),
            c[Self::MAX_Y].saturating_add(1),
        ]
    }

    /// The top, right, bottom and left extreme points.
    fn extrema(&self) -> [(i64, i64); 4] {
        let c = self.coords.map(i64::from);
        [
            (c[Self::X_AT_MIN_Y], c[Self::MIN_Y]),
            (c[Self::MAX_X], c[Self::Y_AT_MAX_X]),
            (c[Self::X_AT_MAX_Y], c[Self::MAX_Y]),
            (c[Self::MIN_X], c[Self::Y_AT_MIN_X]),
        ]
    }
}

impl Bounds for RotatedBoundary {
    fn update(&mut self, area: Option<Rect>) {
        let Some(area) = area else {
            self.clear(false);
            return;
        };

        if area.is_empty() {
            trace!("ignoring empty update {area:?}");
            return;
        }

        let (x0, y0) = (area.x, area.y);
        let (x1, y1) = (area.right() - 1, area.bottom() - 1);
        self.update_points([(x0, y0), (x1, y0), (x1, y1), (x0, y1)]);
    }

    fn clear(&mut self, by_force: bool) {
        if self.accumulative && !by_force {
            return;
        }

        self.coords = Self::EMPTY;
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        let [x0, y0, x1, y1] = self.edges();
        if !self.is_valid() || x < x0 || y < y0 || x >= x1 || y >= y1 {
            return false;
        }

        let [top, right, bottom, left] = self.extrema();
        let p = (i64::from(x), i64::from(y));

        in_triangle(p, top, right, bottom) || in_triangle(p, top, bottom, left)
    }

    fn bounds(&self) -> Option<Rect> {
        let [x0, y0, x1, y1] = self.edges();
        self.is_valid().then(|| Rect::from_edges(x0, y0, x1, y1))
    }

    fn is_valid(&self) -> bool {
        let [_, _, x1, y1] = self.edges();
        x1 > 0 && y1 > 0
    }

    fn is_confined(&self, max_width: i32, max_height: i32) -> bool {
        confined(&self.edges(), max_width, max_height)
    }
}

fn confined(coords: &[i32], max_width: i32, max_height: i32) -> bool {
    let [min_x, min_y, max_x, max_y] = [coords[0], coords[1], coords[2], coords[3]];

    max_x > 0
        && max_y > 0
        && min_x >= -1
        && min_y >= -1
        && max_x <= max_width
        && max_y <= max_height
}

/// The sign of the cross product of `(b - a)` and `(p - a)`.
fn edge(p: (i64, i64), a: (i64, i64), b: (i64, i64)) -> i64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Point-in-triangle test, inclusive of the edges and independent of the winding order.
fn in_triangle(p: (i64, i64), a: (i64, i64), b: (i64, i64), c: (i64, i64)) -> bool {
    let d1 = edge(p, a, b);
    let d2 = edge(p, b, c);
    let d3 = edge(p, c, a);

    let has_neg = d1 < 0 || d2 < 0 || d3 < 0;
    let has_pos = d1 > 0 || d2 > 0 || d3 > 0;

    !(has_neg && has_pos)
}
