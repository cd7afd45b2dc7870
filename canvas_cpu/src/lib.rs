// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate implements a scan-converting software renderer.
//!
//! Figures are decomposed into line segments, the [`scanner`] computes where every segment
//! crosses each pixel row, the [`filler`] pairs the crossings into horizontal spans under a
//! fill rule, and a [`Brush`](brush::Brush) supplies the colours of every span. The
//! [`Canvas`] ties these together, composites the colours into its pixel buffer and keeps
//! track of the region it touched.
//!
//! ```
//! use canvas_cpu::brush::{Gradient, GradientBrush};
//! use canvas_cpu::Canvas;
//! use canvas_common::color::palette::css::{BLUE, RED};
//! use canvas_common::colour::GradientStops;
//! use canvas_common::kurbo::Rect;
//!
//! let mut canvas = Canvas::new(64, 64);
//! let mut brush =
//!     GradientBrush::new(Gradient::Horizontal, 1, 1, GradientStops::two(RED, BLUE)).unwrap();
//!
//! canvas.fill_rect(&Rect::new(8.0, 8.0, 56.0, 56.0), &mut brush);
//!
//! assert_eq!(canvas.pixel(8, 30), Some(0xFFFF_0000));
//! assert_eq!(canvas.pixel(56, 30), Some(0xFF00_00FF));
//! assert_eq!(canvas.take_dirty(), Some(canvas_common::rect::Rect::new(8, 8, 49, 49)));
//! ```
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
    reason = "We convert between f32 coordinates and integer pixels in many places, \
where the values are known to be in range of the canvas"
)]

pub mod brush;
mod error;
pub mod filler;
mod render;
pub mod scanner;
pub mod settings;

pub use error::{Error, Result};
pub use render::Canvas;
pub use settings::{CanvasSettings, Command, RenderSettings, Rotation};
