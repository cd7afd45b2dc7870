// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings of a canvas and of a single render operation.

use crate::error::Error;
use bitflags::bitflags;
use canvas_common::peniko::Fill;
use canvas_common::rect::Rect;

bitflags! {
    /// Flags controlling how a brush is applied during a render operation.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Command: u32 {
        /// Position the brush relative to the canvas origin instead of the shape's bounds.
        const FOLLOW_CANVAS = 1 << 0;
        /// Keep the brush at its current size instead of fitting it to the shape's bounds.
        const NO_AUTO_SIZE = 1 << 1;
        /// Rotate the brush in the opposite direction.
        const INVERT_ROTATION = 1 << 2;
        /// Sample with sub-pixel precision and blend neighbouring brush entries.
        const ANTIALIAS = 1 << 3;
        /// Stroke the outline of the shape instead of filling it.
        const BRESENHAM = 1 << 4;
    }
}

impl TryFrom<u32> for Command {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(Error::UnsupportedCommand(bits & !Self::all().bits()))
    }
}

/// The rotation applied to a brush.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// The rotation angle, in degrees, clockwise.
    pub angle: f32,
    /// Horizontal shear, as the change in x per unit of y.
    pub skew: f32,
    /// The centre of rotation in canvas coordinates. Defaults to the centre of the bounds.
    pub centre: Option<(f32, f32)>,
}

impl Rotation {
    /// A rotation by `angle` degrees around the centre of the bounds.
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Rotate around the given centre.
    pub fn with_centre(mut self, x: f32, y: f32) -> Self {
        self.centre = Some((x, y));
        self
    }

    /// Add horizontal shear.
    pub fn with_skew(mut self, skew: f32) -> Self {
        self.skew = skew;
        self
    }

    /// Whether the rotation has any effect.
    pub fn is_identity(&self) -> bool {
        self.angle.rem_euclid(360.0) == 0.0 && self.skew == 0.0
    }
}

/// Settings of a single render operation, handed to a brush for the length of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderSettings {
    /// The destination area of the operation.
    pub bounds: Rect,
    /// The rotation of the brush.
    pub rotation: Rotation,
    /// Flags controlling the operation.
    pub command: Command,
}

impl RenderSettings {
    /// Settings for rendering into `bounds` without rotation or flags.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the command flags.
    pub fn with_command(mut self, command: Command) -> Self {
        self.command = command;
        self
    }
}

/// Settings of a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    /// The fill rule used for shapes.
    pub fill_rule: Fill,
    /// Whether brushes are sampled with sub-pixel precision by default.
    pub antialiasing: bool,
    /// The tolerance used when flattening curves.
    pub tolerance: f64,
    /// Whether the dirty region keeps growing across [`take_dirty`](crate::Canvas::take_dirty).
    pub accumulate_dirty: bool,
    /// Whether the segments of the last shape are retained by the scanner.
    pub store_lines: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            fill_rule: Fill::NonZero,
            antialiasing: false,
            tolerance: 0.25,
            accumulate_dirty: false,
            store_lines: false,
        }
    }
}
