// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushes: pixel sources that map destination pixels to colours.
//!
//! A brush owns a buffer of packed ARGB colours. Gradient brushes hold a one-dimensional
//! colour ramp and map each destination pixel to a position along it, texture brushes hold a
//! two-dimensional image that is tiled across the destination.
//!
//! Brushes are used in sessions. [`Brush::receive_settings`] positions, rotates and, unless
//! told otherwise, resizes the brush to fit the destination bounds of a render operation.
//! [`Brush::flush_settings`] resets the brush to its idle state. [`Brush::session`] brackets
//! both in a guard, so that the brush is restored even if rendering panics.

mod angle;
mod gradient;
mod texture;

pub use gradient::{CircularDistances, GradientBrush, GradientFunction};
pub use texture::TextureBrush;

use crate::error::Error;
use crate::settings::{Command, RenderSettings};
use canvas_common::buffer::MAX_DIMENSION;
use canvas_common::colour;
use canvas_common::rect::Rect;
use core::ops::{Deref, DerefMut};
use log::{debug, trace};

/// The way a brush maps destination pixels to its colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Gradient {
    /// A single colour.
    Solid = 0,
    /// Left to right.
    Horizontal = 1,
    /// Top to bottom.
    Vertical = 2,
    /// From the vertical centre line outwards.
    HorizontalCentral = 3,
    /// From the horizontal centre line outwards.
    VerticalCentral = 4,
    /// From the top left corner to the bottom right corner.
    ForwardDiagonal = 5,
    /// From the top right corner to the bottom left corner.
    BackwardDiagonal = 6,
    /// From the diagonal through the centre outwards.
    DiagonalCentral = 7,
    /// Left to right in the upper half, right to left in the lower half.
    HorizontalSwitch = 8,
    /// From the outside inwards, by distance from the centre.
    Circular = 9,
    /// From the outline of the inscribed ellipse inwards.
    Elliptical = 10,
    /// Towards a ring halfway between the centre and the inscribed ellipse.
    MiddleCircular = 11,
    /// Clockwise around the centre, starting at the positive x axis.
    Conical = 12,
    /// Clockwise around the centre and back, mirrored at 180 degrees.
    Conical2 = 13,
    /// From the edges inwards.
    Rectangular = 14,
    /// A tiled image.
    Texture = 15,
    /// A mapping provided by a [`GradientFunction`].
    UserDefined = 16,
}

impl TryFrom<u8> for Gradient {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Ok(match tag {
            0 => Self::Solid,
            1 => Self::Horizontal,
            2 => Self::Vertical,
            3 => Self::HorizontalCentral,
            4 => Self::VerticalCentral,
            5 => Self::ForwardDiagonal,
            6 => Self::BackwardDiagonal,
            7 => Self::DiagonalCentral,
            8 => Self::HorizontalSwitch,
            9 => Self::Circular,
            10 => Self::Elliptical,
            11 => Self::MiddleCircular,
            12 => Self::Conical,
            13 => Self::Conical2,
            14 => Self::Rectangular,
            15 => Self::Texture,
            16 => Self::UserDefined,
            _ => return Err(Error::UnsupportedGradient(tag)),
        })
    }
}

/// The colours of a run of pixels on one row or column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSample<'a> {
    /// Every pixel has the same colour.
    Solid(u32),
    /// A run of the brush's own colours.
    Slice(&'a [u32]),
    /// Colours computed per pixel.
    Pixels(Vec<u32>),
}

impl LineSample<'_> {
    /// The colour of the `i`th pixel of the run.
    ///
    /// Pixels past the end of a run are transparent.
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        match self {
            Self::Solid(c) => *c,
            Self::Slice(s) => s.get(i).copied().unwrap_or(colour::TRANSPARENT),
            Self::Pixels(p) => p.get(i).copied().unwrap_or(colour::TRANSPARENT),
        }
    }
}

/// A source of colours for destination pixels.
pub trait Brush {
    /// How the brush maps pixels to its colours.
    fn kind(&self) -> Gradient;

    /// The current size of the brush.
    fn size(&self) -> (u32, u32);

    /// The colours of the brush.
    fn data(&self) -> &[u32];

    /// The index into [`data`](Brush::data) for the destination pixel `(x, y)`.
    ///
    /// With `int_calculation`, the pixel is transformed into brush space with 16.16 fixed-point
    /// arithmetic, otherwise with floats. Returns `None` if the pixel has no sample.
    fn index_of(&self, x: i32, y: i32, int_calculation: bool) -> Option<usize>;

    /// The colour of the destination pixel `(x, y)`, or `None` if it has no sample.
    fn read_pixel(&self, x: i32, y: i32) -> Option<u32>;

    /// The colours of `len` destination pixels starting at `(x, y)` and going right.
    fn read_line(&self, x: i32, y: i32, len: usize) -> LineSample<'_>;

    /// The colours of `len` destination pixels starting at `(x, y)` and going down.
    fn read_column(&self, x: i32, y: i32, len: usize) -> LineSample<'_> {
        LineSample::Pixels(
            (0..len)
                .map(|i| {
                    self.read_pixel(x, y.saturating_add(i as i32))
                        .unwrap_or(colour::TRANSPARENT)
                })
                .collect(),
        )
    }

    /// Prepare the brush for a render operation.
    fn receive_settings(&mut self, settings: &RenderSettings);

    /// Reset the brush after a render operation.
    fn flush_settings(&mut self);

    /// Start a session that ends when the returned guard is dropped.
    fn session(&mut self, settings: &RenderSettings) -> BrushSession<'_, Self>
    where
        Self: Sized,
    {
        BrushSession::new(self, settings)
    }
}

/// A brush within a session. Flushes the brush's settings when dropped.
#[derive(Debug)]
pub struct BrushSession<'a, B: Brush + ?Sized> {
    brush: &'a mut B,
}

impl<'a, B: Brush + ?Sized> BrushSession<'a, B> {
    /// Start a session of `brush` for `settings`.
    pub fn new(brush: &'a mut B, settings: &RenderSettings) -> Self {
        brush.receive_settings(settings);
        Self { brush }
    }
}

impl<B: Brush + ?Sized> Deref for BrushSession<'_, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        self.brush
    }
}

impl<B: Brush + ?Sized> DerefMut for BrushSession<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.brush
    }
}

impl<B: Brush + ?Sized> Drop for BrushSession<'_, B> {
    fn drop(&mut self) {
        self.brush.flush_settings();
    }
}

/// Bilinear blend of four entries of `data`.
///
/// `indices` are the top left, top right, bottom left and bottom right entries, `tx` and `ty`
/// 8.8 fixed-point weights. Without a remainder the top left entry is returned unchanged.
#[inline]
pub fn blend(data: &[u32], indices: [usize; 4], tx: u32, ty: u32) -> u32 {
    let sample = |i: usize| data.get(i).copied().unwrap_or(colour::TRANSPARENT);
    let c00 = sample(indices[0]);

    if tx == 0 && ty == 0 {
        return c00;
    }

    colour::bilinear(
        c00,
        sample(indices[1]),
        sample(indices[2]),
        sample(indices[3]),
        tx,
        ty,
    )
}

const FIXED_ONE: f32 = 65536.0;

/// The transient state of a brush during a render operation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Session {
    pub(crate) active: bool,
    pub(crate) antialias: bool,
    /// Whether the brush was resized to fit the bounds and has to be restored.
    pub(crate) resized: bool,
    rotated: bool,
    /// Whether the bounds were too large for the brush, see [`Session::fit`].
    scaled: bool,
    scale: (f32, f32),
    sin: f32,
    cos: f32,
    skew: f32,
    sin_fixed: i64,
    cos_fixed: i64,
    skew_fixed: i64,
    centre: (f32, f32),
    centre_fixed: (i64, i64),
    offset: (i32, i32),
}

impl Session {
    /// Set up a session for `settings`.
    ///
    /// The rotation is stored inverted, since it maps destination pixels back into brush
    /// space.
    pub(crate) fn begin(settings: &RenderSettings) -> Self {
        let RenderSettings {
            bounds,
            rotation,
            command,
        } = *settings;

        let mut angle = rotation.angle;
        if command.contains(Command::INVERT_ROTATION) {
            angle = -angle;
        }
        let (sin, cos) = (-angle).to_radians().sin_cos();
        let centre = rotation.centre.unwrap_or_else(|| bounds.centre());
        let offset = if command.contains(Command::FOLLOW_CANVAS) {
            (0, 0)
        } else {
            (bounds.x, bounds.y)
        };

        trace!("brush session for {bounds:?} at {angle} degrees");

        Self {
            active: true,
            antialias: command.contains(Command::ANTIALIAS),
            resized: false,
            rotated: !rotation.is_identity(),
            scaled: false,
            scale: (1.0, 1.0),
            sin,
            cos,
            skew: rotation.skew,
            sin_fixed: fixed(sin),
            cos_fixed: fixed(cos),
            skew_fixed: fixed(rotation.skew),
            centre,
            centre_fixed: (fixed(centre.0), fixed(centre.1)),
            offset,
        }
    }

    /// The size a brush should take for `settings`, if it should be resized at all.
    ///
    /// Bounds larger than [`MAX_DIMENSION`] are clamped. Brush-space positions are then
    /// scaled down, so the brush still stretches across the whole bounds.
    pub(crate) fn fit(
        &mut self,
        settings: &RenderSettings,
        current: (u32, u32),
    ) -> Option<(u32, u32)> {
        let Rect { width, height, .. } = settings.bounds;
        if settings.command.contains(Command::NO_AUTO_SIZE) || width <= 0 || height <= 0 {
            return None;
        }

        let (width, height) = (width as u32, height as u32);
        let size = (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION));
        if size != (width, height) {
            debug!("clamping brush size {width}x{height} to {size:?}");
            self.scaled = true;
            self.scale = (
                size.0 as f32 / width as f32,
                size.1 as f32 / height as f32,
            );
        }

        (size != current).then_some(size)
    }

    /// Whether the transform from destination to brush space is a plain translation.
    pub(crate) fn is_translation(&self) -> bool {
        !self.rotated && !self.scaled
    }

    /// The brush-space position of the destination pixel `(x, y)`, in integers.
    pub(crate) fn local_fixed(&self, x: i32, y: i32) -> (i32, i32) {
        if self.scaled {
            let (lx, ly) = self.local(x as f32, y as f32);
            return (lx.round() as i32, ly.round() as i32);
        }
        if !self.rotated {
            return (
                x.wrapping_sub(self.offset.0),
                y.wrapping_sub(self.offset.1),
            );
        }

        let dx = (i64::from(x) << 16) - self.centre_fixed.0;
        let dy = (i64::from(y) << 16) - self.centre_fixed.1;

        let ly = (dx * self.sin_fixed + dy * self.cos_fixed) >> 16;
        let lx = ((dx * self.cos_fixed - dy * self.sin_fixed) >> 16) - ((ly * self.skew_fixed) >> 16);

        let lx = lx + self.centre_fixed.0 - (i64::from(self.offset.0) << 16);
        let ly = ly + self.centre_fixed.1 - (i64::from(self.offset.1) << 16);

        // Round to the nearest integer.
        (
            ((lx + 0x8000) >> 16) as i32,
            ((ly + 0x8000) >> 16) as i32,
        )
    }

    /// The brush-space position of the destination point `(x, y)`.
    pub(crate) fn local(&self, x: f32, y: f32) -> (f32, f32) {
        let (lx, ly) = self.unscaled(x, y);
        if self.scaled {
            (lx * self.scale.0, ly * self.scale.1)
        } else {
            (lx, ly)
        }
    }

    fn unscaled(&self, x: f32, y: f32) -> (f32, f32) {
        let (ox, oy) = (self.offset.0 as f32, self.offset.1 as f32);
        if !self.rotated {
            return (x - ox, y - oy);
        }

        let (dx, dy) = (x - self.centre.0, y - self.centre.1);
        let ly = dx * self.sin + dy * self.cos;
        let lx = dx * self.cos - dy * self.sin - ly * self.skew;

        (lx + self.centre.0 - ox, ly + self.centre.1 - oy)
    }
}

fn fixed(v: f32) -> i64 {
    (v * FIXED_ONE).round() as i64
}
