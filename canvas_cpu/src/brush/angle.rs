// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar angles from a lookup table.

use std::sync::OnceLock;

/// Number of table steps between a slope of 0 and a slope of 1.
const STEPS: usize = 2048;

/// `atan(i / STEPS)` in degrees, for `i` in `0..=STEPS`. Covers the first octant.
fn table() -> &'static [f32; STEPS + 1] {
    static TABLE: OnceLock<Box<[f32; STEPS + 1]>> = OnceLock::new();

    TABLE.get_or_init(|| {
        Box::new(core::array::from_fn(|i| {
            (i as f64 / STEPS as f64).atan().to_degrees() as f32
        }))
    })
}

/// The angle of `(dx, dy)` in degrees, in `[0, 360)`.
///
/// Angles grow clockwise on screen, starting at the positive x axis. The origin has an angle
/// of 0. Slopes are looked up in a single octant and mirrored into the other seven.
pub(crate) fn degrees(dx: f32, dy: f32) -> f32 {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax == 0.0 && ay == 0.0 {
        return 0.0;
    }

    let lookup = |n: f32, d: f32| table()[((n / d) * STEPS as f32 + 0.5) as usize];

    // The angle within the quadrant, mirrored across the diagonal for steep slopes.
    let a = if ax >= ay {
        lookup(ay, ax)
    } else {
        90.0 - lookup(ax, ay)
    };

    let angle = match (dx >= 0.0, dy >= 0.0) {
        (true, true) => a,
        (false, true) => 180.0 - a,
        (false, false) => 180.0 + a,
        (true, false) => 360.0 - a,
    };

    if angle >= 360.0 {
        angle - 360.0
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::degrees;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.05
    }

    #[test]
    fn axes_and_diagonals() {
        assert_eq!(degrees(0.0, 0.0), 0.0);
        assert!(close(degrees(1.0, 0.0), 0.0));
        assert!(close(degrees(1.0, 1.0), 45.0));
        assert!(close(degrees(0.0, 1.0), 90.0));
        assert!(close(degrees(-1.0, 1.0), 135.0));
        assert!(close(degrees(-1.0, 0.0), 180.0));
        assert!(close(degrees(-1.0, -1.0), 225.0));
        assert!(close(degrees(0.0, -1.0), 270.0));
        assert!(close(degrees(1.0, -1.0), 315.0));
    }

    #[test]
    fn matches_atan2_in_every_octant() {
        for step in 0..72 {
            let expected = step as f32 * 5.0 + 2.5;
            let (sin, cos) = expected.to_radians().sin_cos();
            let actual = degrees(cos * 50.0, sin * 50.0);

            assert!(close(actual, expected), "{actual} != {expected}");
        }
    }
}
