// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Converting line segments into per-row crossings.
//!
//! Rows are sampled at integer y coordinates. Each segment contributes one crossing to every
//! row between its end points, including a row an end point lies on. End points that are
//! within a small epsilon of a row are snapped onto it, so that shapes sharing a vertex or
//! an edge agree on which rows they touch.
//!
//! A crossing on a row that an end point was snapped onto (or lies within [`END_EPSILON`]
//! of) is placed exactly at the end point. Two edges of a contour meeting near a row then
//! report the same crossing there, which the filler merges into one.

use canvas_common::geometry::Line;
use core::ops::Range;
use log::trace;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Segments whose vertical extent is at most this are considered horizontal and skipped.
pub const EPSILON: f32 = 1.0e-4;

/// A segment starting less than this below a row still covers the row.
pub const START_EPSILON: f32 = 1.0e-4;

/// A segment ending less than this above a row still covers the row.
pub const END_EPSILON: f32 = 5.0e-4;

/// The crossing of a segment with a row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    /// The x coordinate of the crossing.
    pub x: f32,
    /// `1` if the segment runs downwards (increasing y), `-1` if it runs upwards.
    pub winding: i8,
}

/// The kind of fill an axis line is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillKind {
    /// The crossings of a closed polyline; pairs of crossings bound filled spans.
    Polyline,
}

/// The crossings of all scanned segments with one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanLine<'a> {
    /// The row index.
    pub row: i32,
    /// Whether the crossings are x positions on a horizontal row.
    pub horizontal: bool,
    /// How the crossings are meant to be filled.
    pub kind: FillKind,
    /// The crossings, in the order the segments were scanned.
    pub crossings: &'a [Crossing],
}

impl ScanLine<'_> {
    /// The crossings sorted by their position.
    pub fn sorted(&self) -> SmallVec<[Crossing; 8]> {
        let mut sorted: SmallVec<[Crossing; 8]> = self.crossings.iter().copied().collect();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
        sorted
    }

    /// The positions of the crossings, in the order the segments were scanned.
    pub fn positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.crossings.iter().map(|c| c.x)
    }
}

/// Interface of a scan converter.
///
/// A session starts with [`begin`](Scanner::begin), accumulates crossings over any number of
/// [`scan`](Scanner::scan) calls, and is read with [`scan_lines`](Scanner::scan_lines). A row
/// is only complete once every segment of the shape has been scanned, since a later segment
/// can still add crossings to it.
pub trait Scanner {
    /// Start a new session, discarding the crossings and lines of the previous one.
    fn begin(&mut self);

    /// Add the crossings of `lines`. Invalid and horizontal segments are skipped.
    fn scan(&mut self, lines: &[Line]);

    /// The rows touched so far, in increasing row order.
    fn scan_lines(&self) -> impl Iterator<Item = ScanLine<'_>>;

    /// The segments scanned in this session, if they are being stored.
    fn draw_lines(&self) -> &[Line];

    /// Release the crossings and lines of the session.
    fn end(&mut self);
}

/// A scan converter that walks each segment row by row.
#[derive(Clone, Debug, Default)]
pub struct LineScanner {
    rows: BTreeMap<i32, SmallVec<[Crossing; 4]>>,
    lines: Vec<Line>,
    store_lines: bool,
    clip: Option<Range<i32>>,
}

impl LineScanner {
    /// Create a new scanner.
    ///
    /// The scanner records every row a segment spans. Segments far outside of the area of
    /// interest should be limited with [`set_clip`](Self::set_clip), which [`Canvas`] does
    /// for its own height.
    ///
    /// [`Canvas`]: crate::Canvas
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether scanned segments are retained for [`draw_lines`](Scanner::draw_lines).
    pub fn store_lines(&self) -> bool {
        self.store_lines
    }

    /// Retain (or stop retaining) scanned segments.
    pub fn set_store_lines(&mut self, store_lines: bool) {
        self.store_lines = store_lines;
    }

    /// Only record crossings for rows within `rows`, or for all rows with `None`.
    pub fn set_clip(&mut self, rows: Option<Range<i32>>) {
        self.clip = rows;
    }

    /// The number of rows touched so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The crossings of a single row, if it was touched.
    pub fn row(&self, row: i32) -> Option<ScanLine<'_>> {
        self.rows.get(&row).map(|c| scan_line(row, c))
    }

    fn scan_one(&mut self, line: &Line) {
        if !line.is_valid() {
            trace!("skipping invalid line {line:?}");
            return;
        }

        let (x1, y1) = (line.p0.x, line.p0.y);
        let (x2, y2) = (line.p1.x, line.p1.y);

        let dy = y2 - y1;
        if dy.abs() <= EPSILON {
            return;
        }
        let dx = x2 - x1;

        let inverse_slope = dx / dy;
        let intercept = x1 - y1 * inverse_slope;

        let ((top_x, top), (bottom_x, bottom)) = if dy > 0.0 {
            ((x1, y1), (x2, y2))
        } else {
            ((x2, y2), (x1, y1))
        };

        let mut start = top.floor();
        if top - start >= START_EPSILON {
            start += 1.0;
        }
        let mut end = bottom.floor();
        if bottom - end >= 1.0 - END_EPSILON {
            end += 1.0;
        }

        // Float to int casts saturate, which keeps far away segments representable.
        let mut start = start as i32;
        let mut end = end as i32;
        if let Some(clip) = &self.clip {
            start = start.max(clip.start);
            end = end.min(clip.end - 1);
        }
        if start > end {
            return;
        }

        let winding: i8 = if dy > 0.0 { 1 } else { -1 };
        // Descending segments are walked from their bottom row upwards.
        let (mut row, step) = if dy > 0.0 { (start, 1) } else { (end, -1) };
        let mut remaining = i64::from(end) - i64::from(start) + 1;

        while remaining > 0 {
            let y = row as f32;
            let x = if (y - top).abs() <= END_EPSILON {
                top_x
            } else if (y - bottom).abs() <= END_EPSILON {
                bottom_x
            } else {
                y * inverse_slope + intercept
            };
            self.rows
                .entry(row)
                .or_default()
                .push(Crossing { x, winding });

            row = row.wrapping_add(step);
            remaining -= 1;
        }
    }
}

impl Scanner for LineScanner {
    fn begin(&mut self) {
        self.rows.clear();
        if self.store_lines {
            self.lines.clear();
        }
    }

    fn scan(&mut self, lines: &[Line]) {
        for line in lines {
            self.scan_one(line);

            if self.store_lines && line.is_valid() {
                self.lines.push(*line);
            }
        }
    }

    fn scan_lines(&self) -> impl Iterator<Item = ScanLine<'_>> {
        self.rows.iter().map(|(&row, c)| scan_line(row, c))
    }

    fn draw_lines(&self) -> &[Line] {
        if self.store_lines {
            &self.lines
        } else {
            &[]
        }
    }

    fn end(&mut self) {
        self.rows.clear();
        self.lines.clear();
    }
}

fn scan_line(row: i32, crossings: &[Crossing]) -> ScanLine<'_> {
    ScanLine {
        row,
        horizontal: true,
        kind: FillKind::Polyline,
        crossings,
    }
}
