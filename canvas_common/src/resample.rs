// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scaling of two-dimensional pixel data.

use crate::colour::{self, WEIGHT_ONE};
use core::fmt::Debug;

/// An element of a [`PixelBuffer`](crate::buffer::PixelBuffer).
///
/// Element types that carry pixel data set [`IS_PIXEL`](Element::IS_PIXEL) and provide a
/// real interpolation, which allows buffers of them to rescale their content on resize.
pub trait Element: Copy + Default + Debug + PartialEq {
    /// Whether this element type represents pixel data that can be interpolated.
    const IS_PIXEL: bool = false;

    /// Interpolate from `a` towards `b` by `t / 256`.
    ///
    /// The default picks the nearer of the two values.
    fn lerp(a: Self, b: Self, t: u32) -> Self {
        if t < WEIGHT_ONE / 2 {
            a
        } else {
            b
        }
    }
}

/// Packed ARGB.
impl Element for u32 {
    const IS_PIXEL: bool = true;

    #[inline(always)]
    fn lerp(a: Self, b: Self, t: u32) -> Self {
        colour::lerp(a, b, t)
    }
}

/// Packed ARGB, as signed integers.
impl Element for i32 {
    const IS_PIXEL: bool = true;

    #[inline(always)]
    fn lerp(a: Self, b: Self, t: u32) -> Self {
        colour::lerp(a as u32, b as u32, t) as i32
    }
}

/// Single-channel intensity.
impl Element for u8 {
    const IS_PIXEL: bool = true;

    #[inline(always)]
    fn lerp(a: Self, b: Self, t: u32) -> Self {
        let t = t.min(WEIGHT_ONE);
        ((u32::from(a) * (WEIGHT_ONE - t) + u32::from(b) * t) >> 8) as u8
    }
}

impl Element for f32 {}

impl Element for u16 {}

/// The interpolation used when scaling pixel data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Pick the nearest source pixel.
    Nearest,
    /// Blend the four surrounding source pixels.
    #[default]
    Bilinear,
}

/// Scale `src` of size `src_width × src_height` to `dst_width × dst_height`.
///
/// Pixel centres are mapped onto each other, and samples outside of the source are clamped
/// to its edge.
pub fn scale<T: Element>(
    interpolation: Interpolation,
    src: &[T],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> Vec<T> {
    let len = dst_width as usize * dst_height as usize;
    let (sw, sh) = (src_width as usize, src_height as usize);
    let (dw, dh) = (dst_width as usize, dst_height as usize);

    if sw == 0 || sh == 0 || src.len() < sw * sh {
        return vec![T::default(); len];
    }
    if (sw, sh) == (dw, dh) {
        return src[..len].to_vec();
    }

    let mut out = Vec::with_capacity(len);

    match interpolation {
        Interpolation::Nearest => {
            for y in 0..dh {
                let sy = (y * sh / dh).min(sh - 1);
                let row = &src[sy * sw..(sy + 1) * sw];
                out.extend((0..dw).map(|x| row[(x * sw / dw).min(sw - 1)]));
            }
        }
        Interpolation::Bilinear => {
            let x_ratio = sw as f32 / dw as f32;
            let y_ratio = sh as f32 / dh as f32;
            let source_pos = |pos: usize, ratio: f32, max: usize| {
                let p = ((pos as f32 + 0.5) * ratio - 0.5).clamp(0.0, (max - 1) as f32);
                let p0 = p as usize;
                let p1 = (p0 + 1).min(max - 1);
                (p0, p1, colour::weight(p - p0 as f32))
            };

            for y in 0..dh {
                let (y0, y1, ty) = source_pos(y, y_ratio, sh);
                let (row0, row1) = (&src[y0 * sw..(y0 + 1) * sw], &src[y1 * sw..(y1 + 1) * sw]);

                out.extend((0..dw).map(|x| {
                    let (x0, x1, tx) = source_pos(x, x_ratio, sw);
                    let top = T::lerp(row0[x0], row0[x1], tx);
                    let bottom = T::lerp(row1[x0], row1[x1], tx);
                    T::lerp(top, bottom, ty)
                }));
            }
        }
    }

    out
}
