// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture brushes.

use super::{blend, Brush, Gradient, LineSample, Session};
use crate::error::{Error, Result};
use crate::settings::RenderSettings;
use canvas_common::buffer::{PixelBuffer, ResizeCommand};
use canvas_common::colour;
use canvas_common::resample::Interpolation;
use log::{debug, trace};

/// A brush that tiles an image across the destination.
#[derive(Debug, Clone)]
pub struct TextureBrush {
    texture: PixelBuffer<u32>,
    /// The texture as it was before a session resized it.
    original: Option<PixelBuffer<u32>>,
    interpolation: Interpolation,
    session: Session,
}

impl TextureBrush {
    /// Create a brush from an image of packed ARGB pixels.
    pub fn new(texture: PixelBuffer<u32>) -> Result<Self> {
        if texture.is_empty() {
            return Err(Error::EmptyTexture);
        }

        Ok(Self {
            texture,
            original: None,
            interpolation: Interpolation::default(),
            session: Session::default(),
        })
    }

    /// Use `interpolation` when the texture is scaled to fit the bounds of a render operation.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// The image of the brush.
    pub fn texture(&self) -> &PixelBuffer<u32> {
        &self.texture
    }

    /// Temporarily scale the texture to a new size.
    ///
    /// [`restore`](Self::restore) goes back to the unscaled texture.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.size() || width == 0 || height == 0 {
            return;
        }

        debug!(
            "scaling texture from {:?} to {:?}",
            self.size(),
            (width, height)
        );
        if self.original.is_none() {
            self.original = Some(self.texture.clone());
        }
        self.texture
            .resize(width, height, ResizeCommand::scale_content(self.interpolation));
    }

    /// Go back to the texture as it was before [`resize`](Self::resize).
    pub fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            self.texture = original;
        }
    }

    fn wrap(&self, x: i32, y: i32) -> (usize, usize) {
        let (w, h) = self.size();
        (
            x.rem_euclid(w as i32) as usize,
            y.rem_euclid(h as i32) as usize,
        )
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let (x, y) = self.wrap(x, y);
        x + y * self.texture.width() as usize
    }
}

impl Brush for TextureBrush {
    fn kind(&self) -> Gradient {
        Gradient::Texture
    }

    fn size(&self) -> (u32, u32) {
        self.texture.size()
    }

    fn data(&self) -> &[u32] {
        self.texture.data()
    }

    fn index_of(&self, x: i32, y: i32, int_calculation: bool) -> Option<usize> {
        let (lx, ly) = if int_calculation {
            self.session.local_fixed(x, y)
        } else {
            let (lx, ly) = self.session.local(x as f32, y as f32);
            if !lx.is_finite() || !ly.is_finite() {
                return None;
            }
            (lx.floor() as i32, ly.floor() as i32)
        };

        Some(self.index(lx, ly))
    }

    fn read_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.session.antialias {
            return self
                .index_of(x, y, true)
                .and_then(|i| self.texture.data().get(i).copied());
        }

        let (lx, ly) = self.session.local(x as f32, y as f32);
        if !lx.is_finite() || !ly.is_finite() {
            return None;
        }
        let (x0, y0) = (lx.floor(), ly.floor());
        let (x0i, y0i) = (x0 as i32, y0 as i32);

        let indices = [
            self.index(x0i, y0i),
            self.index(x0i.wrapping_add(1), y0i),
            self.index(x0i, y0i.wrapping_add(1)),
            self.index(x0i.wrapping_add(1), y0i.wrapping_add(1)),
        ];

        Some(blend(
            self.texture.data(),
            indices,
            colour::weight(lx - x0),
            colour::weight(ly - y0),
        ))
    }

    fn read_line(&self, x: i32, y: i32, len: usize) -> LineSample<'_> {
        if self.session.is_translation() && !self.session.antialias {
            let (lx, ly) = self.session.local_fixed(x, y);
            let (start, row) = self.wrap(lx, ly);
            let row = self.texture.row(row as u32);

            if let Some(slice) = row.get(start..start + len) {
                return LineSample::Slice(slice);
            }
            return LineSample::Pixels(
                (0..len)
                    .map(|i| row[(start + i) % row.len()])
                    .collect(),
            );
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

    fn receive_settings(&mut self, settings: &RenderSettings) {
        if self.session.active {
            trace!("restarting an active brush session");
            self.flush_settings();
        }

        let mut session = Session::begin(settings);
        if let Some((width, height)) = session.fit(settings, self.size()) {
            self.resize(width, height);
            session.resized = true;
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
