// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning the crossings of a row into horizontal fill spans.

use crate::scanner::{Crossing, ScanLine, EPSILON};
use canvas_common::peniko::Fill;
use canvas_common::rect::Rect;
use smallvec::SmallVec;

/// A horizontal run of pixels on one row, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// The row.
    pub y: i32,
    /// The first covered column.
    pub x0: i32,
    /// The last covered column.
    pub x1: i32,
}

impl Span {
    /// The number of pixels covered by the span.
    pub fn len(&self) -> u32 {
        (self.x1 - self.x0 + 1) as u32
    }

    /// Whether the span covers no pixels. Spans produced by the filler never are.
    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0
    }
}

/// Emits the spans covered by a shape under a fill rule.
///
/// A pixel is covered if its integer position lies between two crossings that bound the
/// inside of the shape, matching the way the scanner samples rows at integer positions.
#[derive(Clone, Debug)]
pub struct PolygonFiller {
    fill_rule: Fill,
    scratch: SmallVec<[Crossing; 16]>,
}

impl Default for PolygonFiller {
    fn default() -> Self {
        Self::new(Fill::NonZero)
    }
}

impl PolygonFiller {
    /// Create a new filler with the given fill rule.
    pub fn new(fill_rule: Fill) -> Self {
        Self {
            fill_rule,
            scratch: SmallVec::new(),
        }
    }

    /// The fill rule.
    pub fn fill_rule(&self) -> Fill {
        self.fill_rule
    }

    /// Set the fill rule.
    pub fn set_fill_rule(&mut self, fill_rule: Fill) {
        self.fill_rule = fill_rule;
    }

    /// Append the spans of all `lines` that fall within `clip` to `out`.
    pub fn fill<'a>(
        &mut self,
        lines: impl IntoIterator<Item = ScanLine<'a>>,
        clip: &Rect,
        out: &mut Vec<Span>,
    ) {
        for line in lines {
            self.fill_row(&line, clip, out);
        }
    }

    /// Append the spans of a single row to `out`.
    pub fn fill_row(&mut self, line: &ScanLine<'_>, clip: &Rect, out: &mut Vec<Span>) {
        if line.row < clip.y || line.row >= clip.bottom() || line.crossings.len() < 2 {
            return;
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(line.crossings);
        self.scratch.sort_by(|a, b| a.x.total_cmp(&b.x));
        merge_vertices(&mut self.scratch);

        let y = line.row;
        let mut push = |a: f32, b: f32| {
            let x0 = ((a - EPSILON).ceil() as i32).max(clip.x);
            let x1 = ((b + EPSILON).floor() as i32).min(clip.right() - 1);
            if x0 <= x1 {
                out.push(Span { y, x0, x1 });
            }
        };

        match self.fill_rule {
            Fill::EvenOdd => {
                for pair in self.scratch.chunks_exact(2) {
                    push(pair[0].x, pair[1].x);
                }
            }
            Fill::NonZero => {
                let mut winding = 0_i32;
                let mut start = 0.0;
                for crossing in &self.scratch {
                    let prev = winding;
                    winding += i32::from(crossing.winding);

                    if prev == 0 && winding != 0 {
                        start = crossing.x;
                    } else if prev != 0 && winding == 0 {
                        push(start, crossing.x);
                    }
                }
            }
        }
    }
}

/// Drop the second of two coincident crossings running in the same direction.
///
/// Two consecutive edges of a contour that meet exactly on a row both report the shared
/// vertex. If the contour passes through the row there, the vertex must only count once.
fn merge_vertices(crossings: &mut SmallVec<[Crossing; 16]>) {
    let mut i = 1;
    while i < crossings.len() {
        let (prev, cur) = (crossings[i - 1], crossings[i]);
        if (cur.x - prev.x).abs() <= EPSILON && cur.winding == prev.winding {
            crossings.remove(i);
        } else {
            i += 1;
        }
    }
}
