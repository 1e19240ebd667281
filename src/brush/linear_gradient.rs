// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::Scalar;

use super::gradient::DEGENERATE_THRESHOLD;
use super::GradientColors;

/// A linear gradient brush.
///
/// Endpoints are fractions of the target region, so the same brush
/// fits any region size after `configure`.
#[derive(Clone, PartialEq, Debug)]
pub struct LinearGradient {
    /// Color mapping.
    pub colors: GradientColors,

    /// Start point as a fraction of the region.
    ///
    /// Default: (0.5, 0.0)
    pub from: (f64, f64),

    /// End point as a fraction of the region.
    ///
    /// Default: (0.5, 1.0)
    pub to: (f64, f64),

    start_x: f64,
    start_y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl Default for LinearGradient {
    fn default() -> Self {
        LinearGradient::new((0.5, 0.0), (0.5, 1.0), GradientColors::default())
    }
}

impl LinearGradient {
    /// Creates a new linear gradient.
    ///
    /// The brush must be configured before use.
    pub fn new(from: (f64, f64), to: (f64, f64), colors: GradientColors) -> Self {
        LinearGradient {
            colors,
            from,
            to,
            start_x: 0.0,
            start_y: 0.0,
            scale_x: 0.0,
            scale_y: 0.0,
        }
    }

    pub(crate) fn configure(&mut self, width: f64, height: f64) {
        self.start_x = self.from.0 * width;
        self.start_y = self.from.1 * height;

        let dx = (self.to.0 - self.from.0) * width;
        let dy = (self.to.1 - self.from.1) * height;
        let length_sqr = dx.sqr() + dy.sqr();
        if !length_sqr.is_finite() || length_sqr.sqrt().is_nearly_zero_within_tolerance(DEGENERATE_THRESHOLD) {
            log::trace!("degenerate linear gradient axis");
            self.scale_x = 0.0;
            self.scale_y = 0.0;
            return;
        }

        // Projection onto the axis divided by its length.
        self.scale_x = dx / length_sqr;
        self.scale_y = dy / length_sqr;
    }

    /// Returns a raw gradient parameter at a pixel center.
    pub(crate) fn param_at(&self, x: i32, y: i32) -> f64 {
        let px = f64::from(x) + 0.5 - self.start_x;
        let py = f64::from(y) + 0.5 - self.start_y;
        px * self.scale_x + py * self.scale_y
    }
}
