// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::Scalar;

use super::gradient::DEGENERATE_THRESHOLD;
use super::GradientColors;

/// An elliptical radial gradient brush.
///
/// `t` is 0 at the center and 1 on the ellipse defined by the radii.
#[derive(Clone, PartialEq, Debug)]
pub struct RadialGradient {
    /// Color mapping.
    pub colors: GradientColors,

    /// Center as a fraction of the region.
    ///
    /// Default: (0.5, 0.5)
    pub center: (f64, f64),

    /// Horizontal radius as a fraction of the region width.
    ///
    /// Default: 0.5
    pub radius_x: f64,

    /// Vertical radius as a fraction of the region height.
    ///
    /// Default: 0.5
    pub radius_y: f64,

    /// When set, overrides both radii with a circle of this diameter,
    /// as a fraction of the smaller region side.
    ///
    /// Default: None
    pub diameter: Option<f64>,

    center_x: f64,
    center_y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Default for RadialGradient {
    fn default() -> Self {
        RadialGradient::new((0.5, 0.5), 0.5, 0.5, GradientColors::default())
    }
}

impl RadialGradient {
    /// Creates a new elliptical gradient.
    ///
    /// The brush must be configured before use.
    pub fn new(center: (f64, f64), radius_x: f64, radius_y: f64, colors: GradientColors) -> Self {
        RadialGradient {
            colors,
            center,
            radius_x,
            radius_y,
            diameter: None,
            center_x: 0.0,
            center_y: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
        }
    }

    /// Creates a new circular gradient.
    pub fn circle(center: (f64, f64), diameter: f64, colors: GradientColors) -> Self {
        let mut g = RadialGradient::new(center, 0.5, 0.5, colors);
        g.diameter = Some(diameter);
        g
    }

    pub(crate) fn configure(&mut self, width: f64, height: f64) {
        self.center_x = self.center.0 * width;
        self.center_y = self.center.1 * height;

        let (rx, ry) = match self.diameter {
            Some(d) => {
                let r = (d * width.min(height)).half();
                (r, r)
            }
            None => (self.radius_x * width, self.radius_y * height),
        };

        self.scale_x = inverted_radius(rx);
        self.scale_y = inverted_radius(ry);
    }

    /// Returns a raw gradient parameter at a pixel center.
    pub(crate) fn param_at(&self, x: i32, y: i32) -> f64 {
        let dx = (f64::from(x) + 0.5 - self.center_x) * self.scale_x;
        let dy = (f64::from(y) + 0.5 - self.center_y) * self.scale_y;
        (dx.sqr() + dy.sqr()).sqrt()
    }
}

fn inverted_radius(r: f64) -> f64 {
    if !r.is_finite() || r.abs().is_nearly_zero_within_tolerance(DEGENERATE_THRESHOLD) {
        log::trace!("degenerate radial gradient radius");
        0.0
    } else {
        1.0 / r.abs()
    }
}
