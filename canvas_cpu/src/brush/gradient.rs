// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gradient brushes.

use super::{angle, blend, Brush, Gradient, LineSample, Session};
use crate::error::{Error, Result};
use crate::settings::RenderSettings;
use canvas_common::buffer::MAX_DIMENSION;
use canvas_common::color::{AlphaColor, Srgb};
use canvas_common::colour::{self, ColourRamp, GradientStops};
use core::fmt::{self, Debug, Formatter};
use log::{debug, trace};
use std::sync::Arc;

/// A custom mapping from brush space to a colour ramp.
pub trait GradientFunction: Debug + Send + Sync {
    /// The number of colours a brush of the given size needs.
    fn length(&self, width: u32, height: u32) -> usize;

    /// The position along the ramp of the brush-space point `(x, y)`, or `None` if the
    /// point has no colour.
    ///
    /// Positions are clamped to the length of the ramp.
    fn position(&self, x: f32, y: f32, width: u32, height: u32) -> Option<f32>;
}

/// The radius of the ellipse inscribed into a brush, for every whole degree.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularDistances {
    radii: Vec<f32>,
}

impl CircularDistances {
    /// Compute the table for a brush of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let a = f64::from(width) / 2.0;
        let b = f64::from(height) / 2.0;

        let radii = (0..360)
            .map(|degree| {
                let (sin, cos) = f64::from(degree).to_radians().sin_cos();
                let d = ((b * cos).powi(2) + (a * sin).powi(2)).sqrt();
                if d > 0.0 {
                    (a * b / d) as f32
                } else {
                    0.0
                }
            })
            .collect();

        Self { radii }
    }

    /// The radius at `angle` degrees.
    pub fn at(&self, angle: f32) -> f32 {
        let degree = (angle.max(0.0) as usize) % 360;
        self.radii.get(degree).copied().unwrap_or(0.0)
    }
}

/// A brush that maps destination pixels onto a one-dimensional colour ramp.
///
/// The number of colours depends on the kind of gradient and the size of the brush. When the
/// brush is resized, it is refilled from its [`ColourRamp`], so that the gradient always
/// spans the whole brush.
#[derive(Clone)]
pub struct GradientBrush {
    kind: Gradient,
    function: Option<Arc<dyn GradientFunction>>,
    ramp: Arc<dyn ColourRamp + Send + Sync>,
    invert: bool,
    width: u32,
    height: u32,
    data: Vec<u32>,
    distances: Option<CircularDistances>,
    original: (u32, u32),
    original_data: Vec<u32>,
    session: Session,
}

impl GradientBrush {
    /// Create a gradient brush of the given kind and size.
    ///
    /// Textures and user-defined gradients have their own constructors,
    /// [`TextureBrush::new`](super::TextureBrush::new) and
    /// [`GradientBrush::user_defined`].
    pub fn new(
        kind: Gradient,
        width: u32,
        height: u32,
        ramp: impl ColourRamp + Send + Sync + 'static,
    ) -> Result<Self> {
        if matches!(kind, Gradient::Texture | Gradient::UserDefined) {
            return Err(Error::UnsupportedGradient(kind as u8));
        }

        Ok(Self::build(kind, None, Arc::new(ramp), width, height))
    }

    /// A brush of a single colour.
    pub fn solid(colour: AlphaColor<Srgb>) -> Self {
        Self::build(
            Gradient::Solid,
            None,
            Arc::new(GradientStops::solid(colour)),
            1,
            1,
        )
    }

    /// Create a brush that maps pixels onto the ramp with `function`.
    pub fn user_defined(
        function: impl GradientFunction + 'static,
        width: u32,
        height: u32,
        ramp: impl ColourRamp + Send + Sync + 'static,
    ) -> Self {
        Self::build(
            Gradient::UserDefined,
            Some(Arc::new(function)),
            Arc::new(ramp),
            width,
            height,
        )
    }

    fn build(
        kind: Gradient,
        function: Option<Arc<dyn GradientFunction>>,
        ramp: Arc<dyn ColourRamp + Send + Sync>,
        width: u32,
        height: u32,
    ) -> Self {
        let mut brush = Self {
            kind,
            function,
            ramp,
            invert: false,
            width,
            height,
            data: vec![],
            distances: None,
            original: (width, height),
            original_data: vec![],
            session: Session::default(),
        };
        brush.resize_internally(width, height);
        brush.original = brush.size();
        brush.original_data = brush.data.clone();

        brush
    }

    /// Run the ramp from its end to its start.
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        let (width, height) = self.size();
        self.resize_internally(width, height);
        self.original_data = self.data.clone();
        self
    }

    /// The size the brush was created with.
    pub fn original_size(&self) -> (u32, u32) {
        self.original
    }

    /// Temporarily resize the brush, refilling it from its ramp.
    ///
    /// [`restore`](Self::restore) goes back to the size the brush was created with.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.size() {
            return;
        }

        debug!(
            "resizing {:?} brush from {:?} to {:?}",
            self.kind,
            self.size(),
            (width, height)
        );
        self.resize_internally(width, height);
    }

    /// Go back to the size and colours the brush was created with.
    pub fn restore(&mut self) {
        if self.size() == self.original {
            return;
        }

        (self.width, self.height) = self.original;
        self.data.clone_from(&self.original_data);
        self.distances = self.needs_distances().then(|| {
            CircularDistances::new(self.width, self.height)
        });
    }

    fn needs_distances(&self) -> bool {
        matches!(self.kind, Gradient::Elliptical | Gradient::MiddleCircular)
    }

    fn resize_internally(&mut self, width: u32, height: u32) {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            debug!("clamping brush size {width}x{height} to at most {MAX_DIMENSION}");
        }
        self.width = width.min(MAX_DIMENSION);
        self.height = height.min(MAX_DIMENSION);

        let length = self.length();
        let span = (length - 1) as f32;
        self.data = (0..length)
            .map(|i| self.ramp.colour(i as f32, span, self.invert))
            .collect();

        self.distances = self
            .needs_distances()
            .then(|| CircularDistances::new(self.width, self.height));
    }

    /// The number of colours for the current size.
    fn length(&self) -> usize {
        let (w, h) = (self.width as usize, self.height as usize);

        let length = match self.kind {
            Gradient::Solid => 1,
            Gradient::Horizontal | Gradient::HorizontalSwitch => w + 1,
            Gradient::Vertical => h + 1,
            Gradient::HorizontalCentral => w / 2 + 1,
            Gradient::VerticalCentral => h / 2 + 1,
            Gradient::ForwardDiagonal | Gradient::BackwardDiagonal => w + h + 1,
            Gradient::DiagonalCentral => (w + h) / 2 + 1,
            Gradient::Circular | Gradient::Elliptical | Gradient::MiddleCircular => {
                w.max(h) / 2 + 1
            }
            Gradient::Conical | Gradient::Conical2 => 361,
            Gradient::Rectangular => w.min(h) / 2 + 1,
            Gradient::Texture => w * h,
            Gradient::UserDefined => self
                .function
                .as_ref()
                .map_or(1, |f| f.length(self.width, self.height)),
        };

        length.max(1)
    }

    /// The unclamped position along the ramp of a brush-space point.
    fn position(&self, x: f32, y: f32) -> Option<f32> {
        let (w, h) = (self.width as f32, self.height as f32);
        let (cx, cy) = (w / 2.0, h / 2.0);
        let last = (self.data.len() - 1) as f32;

        let position = match self.kind {
            Gradient::Solid => 0.0,
            Gradient::Horizontal => x,
            Gradient::Vertical => y,
            Gradient::HorizontalCentral => (x - cx).abs(),
            Gradient::VerticalCentral => (y - cy).abs(),
            Gradient::ForwardDiagonal => x + y,
            Gradient::BackwardDiagonal => w - x + y,
            Gradient::DiagonalCentral => (x + y - (w + h) / 2.0).abs(),
            Gradient::HorizontalSwitch => {
                if y < cy {
                    x
                } else {
                    w - x
                }
            }
            Gradient::Circular => last - (x - cx).hypot(y - cy),
            Gradient::Elliptical | Gradient::MiddleCircular => {
                let (dx, dy) = (x - cx, y - cy);
                let max = self
                    .distances
                    .as_ref()
                    .map_or(0.0, |d| d.at(angle::degrees(dx, dy)));
                let t = if max > 0.0 {
                    (dx.hypot(dy) / max).min(1.0)
                } else {
                    1.0
                };

                if self.kind == Gradient::Elliptical {
                    last * (1.0 - t)
                } else {
                    last * (1.0 - (2.0 * t - 1.0).abs())
                }
            }
            Gradient::Conical => angle::degrees(x - cx, y - cy),
            Gradient::Conical2 => {
                let a = angle::degrees(x - cx, y - cy);
                if a <= 180.0 {
                    2.0 * a
                } else {
                    2.0 * (360.0 - a)
                }
            }
            Gradient::Rectangular => x.min(w - x).min(y).min(h - y),
            Gradient::Texture => return None,
            Gradient::UserDefined => {
                self.function
                    .as_ref()?
                    .position(x, y, self.width, self.height)?
            }
        };

        Some(position)
    }

    /// The index and fractional remainder of a brush-space point.
    fn sample_at(&self, x: f32, y: f32) -> Option<(usize, f32)> {
        if self.data.is_empty() {
            return None;
        }

        let position = self.position(x, y)?;
        if !position.is_finite() {
            return None;
        }

        let position = position.clamp(0.0, (self.data.len() - 1) as f32);
        let index = position.floor();

        Some((index as usize, position - index))
    }
}

impl Debug for GradientBrush {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GradientBrush")
            .field("kind", &self.kind)
            .field("size", &self.size())
            .field("length", &self.data.len())
            .field("invert", &self.invert)
            .field("original", &self.original)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Brush for GradientBrush {
    fn kind(&self) -> Gradient {
        self.kind
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn data(&self) -> &[u32] {
        &self.data
    }

    fn index_of(&self, x: i32, y: i32, int_calculation: bool) -> Option<usize> {
        let (lx, ly) = if int_calculation {
            let (lx, ly) = self.session.local_fixed(x, y);
            (lx as f32, ly as f32)
        } else {
            self.session.local(x as f32, y as f32)
        };

        self.sample_at(lx, ly).map(|(index, _)| index)
    }

    fn read_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.kind == Gradient::Solid {
            return self.data.first().copied();
        }

        if self.session.antialias {
            let (lx, ly) = self.session.local(x as f32, y as f32);
            let (index, fraction) = self.sample_at(lx, ly)?;
            let next = (index + 1).min(self.data.len() - 1);

            Some(blend(
                &self.data,
                [index, next, index, next],
                colour::weight(fraction),
                0,
            ))
        } else {
            self.index_of(x, y, true)
                .and_then(|index| self.data.get(index).copied())
        }
    }

    fn read_line(&self, x: i32, y: i32, len: usize) -> LineSample<'_> {
        if self.kind == Gradient::Solid {
            return LineSample::Solid(self.data.first().copied().unwrap_or(colour::TRANSPARENT));
        }

        if self.session.is_translation() && !self.session.antialias {
            match self.kind {
                Gradient::Horizontal => {
                    let (lx, _) = self.session.local_fixed(x, y);
                    if let Ok(start) = usize::try_from(lx) {
                        if let Some(slice) = self.data.get(start..start + len) {
                            return LineSample::Slice(slice);
                        }
                    }
                }
                Gradient::Vertical => {
                    return LineSample::Solid(
                        self.read_pixel(x, y).unwrap_or(colour::TRANSPARENT),
                    );
                }
                _ => {}
            }
        }

        LineSample::Pixels(
            (0..len)
                .map(|i| {
                    self.read_pixel(x.saturating_add(i as i32), y)
                        .unwrap_or(colour::TRANSPARENT)
                })
                .collect(),
        )
    }

    fn read_column(&self, x: i32, y: i32, len: usize) -> LineSample<'_> {
        if self.kind == Gradient::Solid {
            return LineSample::Solid(self.data.first().copied().unwrap_or(colour::TRANSPARENT));
        }

        if self.session.is_translation() && !self.session.antialias {
            match self.kind {
                Gradient::Vertical => {
                    let (_, ly) = self.session.local_fixed(x, y);
                    if let Ok(start) = usize::try_from(ly) {
                        if let Some(slice) = self.data.get(start..start + len) {
                            return LineSample::Slice(slice);
                        }
                    }
                }
                Gradient::Horizontal => {
                    return LineSample::Solid(
                        self.read_pixel(x, y).unwrap_or(colour::TRANSPARENT),
                    );
                }
                _ => {}
            }
        }

        LineSample::Pixels(
            (0..len)
                .map(|i| {
                    self.read_pixel(x, y.saturating_add(i as i32))
                        .unwrap_or(colour::TRANSPARENT)
                })
                .collect(),
        )
    }

    fn receive_settings(&mut self, settings: &RenderSettings) {
        if self.session.active {
            trace!("restarting an active brush session");
            self.flush_settings();
        }

        let mut session = Session::begin(settings);
        if self.kind != Gradient::Solid {
            if let Some((width, height)) = session.fit(settings, self.size()) {
                self.resize(width, height);
                session.resized = true;
            }
        }

        self.session = session;
    }

    fn flush_settings(&mut self) {
        if self.session.resized {
            self.restore();
        }

        trace!("ending brush session");
        self.session = Session::default();
    }
}
