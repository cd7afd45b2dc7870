// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate includes the data structures shared by the canvas renderers: geometry
//! representations and line sources, integer rectangles and dirty-region trackers, packed
//! ARGB colour math and colour ramps, and the resizable pixel buffer.
//!
//! # Usage
//!
//! This crate is usually not used on its own; [`canvas_cpu`] builds the scan converter and
//! the brush engine on top of it.
//!
//! # Contents
//!
//! - [`geometry`]: points, line segments, polygons and the [`LineSource`](geometry::LineSource)
//!   trait that decomposes figures into segments.
//! - [`rect`]: integer rectangles.
//! - [`boundary`]: axis-aligned and rotation-aware dirty-region trackers.
//! - [`colour`]: packed ARGB helpers, fixed-point blending and colour ramps.
//! - [`buffer`]: a resizable two-dimensional pixel buffer.
//! - [`resample`]: nearest and bilinear scaling of pixel data.
//!
//! [`canvas_cpu`]: https://crates.io/crates/canvas_cpu
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![expect(
    clippy::cast_possible_truncation,
    reason = "We temporarily ignore those because the casts\
only break in edge cases, and most of them are conversions between f32 pixel coordinates and integer rows."
)]

pub mod boundary;
pub mod buffer;
pub mod colour;
pub mod geometry;
pub mod rect;
pub mod resample;

pub use peniko;
pub use peniko::color;
pub use peniko::kurbo;
