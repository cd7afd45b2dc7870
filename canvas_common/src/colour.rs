// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed ARGB colours, fixed-point blending and colour ramps.
//!
//! Colours are stored as `0xAARRGGBB` in a [`u32`] with straight (non-premultiplied) alpha.

use crate::color::{AlphaColor, Srgb};
use smallvec::SmallVec;

/// Fully transparent black.
pub const TRANSPARENT: u32 = 0;

/// Mask of the red and blue channels.
const RB_MASK: u32 = 0x00FF_00FF;
/// Mask of the alpha and green channels.
const AG_MASK: u32 = 0xFF00_FF00;

/// The weight that selects the second colour entirely in [`lerp`].
pub const WEIGHT_ONE: u32 = 256;

/// Pack four 8-bit channels into `0xAARRGGBB`.
#[inline(always)]
pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Unpack `0xAARRGGBB` into `[r, g, b, a]`.
#[inline(always)]
pub const fn unpack(argb: u32) -> [u8; 4] {
    [
        (argb >> 16) as u8,
        (argb >> 8) as u8,
        argb as u8,
        (argb >> 24) as u8,
    ]
}

/// The alpha channel of a packed colour.
#[inline(always)]
pub const fn alpha(argb: u32) -> u8 {
    (argb >> 24) as u8
}

/// Convert a colour to packed ARGB, rounding each channel to 8 bits.
pub fn from_alpha_color(color: AlphaColor<Srgb>) -> u32 {
    #[expect(clippy::cast_possible_truncation, reason = "deliberate quantization")]
    let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    let [r, g, b, a] = color.components;

    pack(quantize(r), quantize(g), quantize(b), quantize(a))
}

/// Interpolate between two packed colours with an 8.8 fixed-point weight.
///
/// `t` ranges from 0 (all `a`) to [`WEIGHT_ONE`] (all `b`). The red/blue and alpha/green
/// channel pairs are blended as two lanes of one multiplication each; the weights sum to 256
/// so no lane can overflow into its neighbour.
#[inline(always)]
pub const fn lerp(a: u32, b: u32, t: u32) -> u32 {
    let t = if t > WEIGHT_ONE { WEIGHT_ONE } else { t };
    let inv = WEIGHT_ONE - t;

    let rb = (((a & RB_MASK) * inv + (b & RB_MASK) * t) >> 8) & RB_MASK;
    let ag = (((a & AG_MASK) >> 8) * inv + ((b & AG_MASK) >> 8) * t) & AG_MASK;

    rb | ag
}

/// Bilinear interpolation between four packed colours.
///
/// `c00` is the top-left sample, `c10` top-right, `c01` bottom-left and `c11` bottom-right.
/// `tx` and `ty` are 8.8 fixed-point weights as in [`lerp`].
#[inline(always)]
pub const fn bilinear(c00: u32, c10: u32, c01: u32, c11: u32, tx: u32, ty: u32) -> u32 {
    let top = lerp(c00, c10, tx);
    let bottom = lerp(c01, c11, tx);

    lerp(top, bottom, ty)
}

/// Convert a fraction in `[0, 1]` to an 8.8 fixed-point weight.
#[inline(always)]
pub fn weight(fraction: f32) -> u32 {
    (fraction.clamp(0.0, 1.0) * WEIGHT_ONE as f32 + 0.5) as u32
}

/// Composite `src` over `dst`.
///
/// Both colours have straight alpha, so each channel of the result is the alpha-weighted mean
/// of the two inputs. A fully transparent `dst` contributes nothing.
#[inline(always)]
pub fn source_over(dst: u32, src: u32) -> u32 {
    let sa = u32::from(alpha(src));

    match sa {
        255 => src,
        0 => dst,
        _ => {
            let da = u32::from(alpha(dst));
            if da == 0 {
                return src;
            }

            // Weights scaled by 255 * 255.
            let src_weight = sa * 255;
            let dst_weight = da * (255 - sa);
            let total = src_weight + dst_weight;

            let [sr, sg, sb, _] = unpack(src);
            let [dr, dg, db, _] = unpack(dst);
            #[expect(clippy::cast_possible_truncation, reason = "the mean is at most 255")]
            let mix = |s: u8, d: u8| {
                ((u32::from(s) * src_weight + u32::from(d) * dst_weight + total / 2) / total) as u8
            };
            #[expect(clippy::cast_possible_truncation, reason = "the total is at most 255 * 255")]
            let out_a = ((total + 127) / 255) as u8;

            pack(mix(sr, dr), mix(sg, dg), mix(sb, db), out_a)
        }
    }
}

/// A source of colours along a one-dimensional ramp.
pub trait ColourRamp {
    /// The packed ARGB colour at `position` along a ramp of length `span`.
    ///
    /// With `invert`, the ramp runs from its end to its start.
    fn colour(&self, position: f32, span: f32, invert: bool) -> u32;
}

impl ColourRamp for AlphaColor<Srgb> {
    fn colour(&self, _: f32, _: f32, _: bool) -> u32 {
        from_alpha_color(*self)
    }
}

/// A colour stop of a [`GradientStops`] ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColourStop {
    /// The position of the stop, between 0 and 1.
    pub offset: f32,
    /// The colour at the stop.
    pub colour: AlphaColor<Srgb>,
}

impl From<(f32, AlphaColor<Srgb>)> for ColourStop {
    fn from((offset, colour): (f32, AlphaColor<Srgb>)) -> Self {
        Self { offset, colour }
    }
}

/// A colour ramp interpolating linearly between colour stops.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStops {
    stops: SmallVec<[ColourStop; 4]>,
}

impl GradientStops {
    /// Create a ramp from colour stops. Stops are sorted by offset, offsets are clamped to
    /// `[0, 1]`.
    ///
    /// A ramp without stops is transparent everywhere.
    pub fn new(stops: impl IntoIterator<Item = impl Into<ColourStop>>) -> Self {
        let mut stops: SmallVec<[ColourStop; 4]> = stops
            .into_iter()
            .map(Into::into)
            .map(|s: ColourStop| ColourStop {
                offset: if s.offset.is_nan() {
                    0.0
                } else {
                    s.offset.clamp(0.0, 1.0)
                },
                ..s
            })
            .collect();
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        Self { stops }
    }

    /// A ramp going from `start` to `end`.
    pub fn two(start: AlphaColor<Srgb>, end: AlphaColor<Srgb>) -> Self {
        Self::new([(0.0, start), (1.0, end)])
    }

    /// A ramp of a single colour.
    pub fn solid(colour: AlphaColor<Srgb>) -> Self {
        Self::new([(0.0, colour)])
    }

    /// The stops of this ramp.
    pub fn stops(&self) -> &[ColourStop] {
        &self.stops
    }

    /// The colour at `t` in `[0, 1]`.
    pub fn at(&self, t: f32) -> AlphaColor<Srgb> {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return AlphaColor::new([0.0; 4]);
        };

        if t <= first.offset {
            return first.colour;
        }
        if t >= last.offset {
            return last.colour;
        }

        for pair in self.stops.windows(2) {
            let (s0, s1) = (pair[0], pair[1]);
            if t <= s1.offset {
                let range = s1.offset - s0.offset;
                if range <= f32::EPSILON {
                    return s1.colour;
                }

                let f = (t - s0.offset) / range;
                let [a, b] = [s0.colour.components, s1.colour.components];
                return AlphaColor::new(core::array::from_fn(|i| a[i] + (b[i] - a[i]) * f));
            }
        }

        last.colour
    }
}

impl ColourRamp for GradientStops {
    fn colour(&self, position: f32, span: f32, invert: bool) -> u32 {
        let t = if span > 0.0 {
            (position / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let t = if invert { 1.0 - t } else { t };

        from_alpha_color(self.at(t))
    }
}
