// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A conical gradient brush.
///
/// `t` depends only on the direction from the center: it is 1 along the
/// configured angle (in both directions) and 0 perpendicular to it.
#[derive(Clone, PartialEq, Debug)]
pub struct ConicalGradient {
    /// Color mapping.
    pub colors: super::GradientColors,

    /// Center as a fraction of the region.
    ///
    /// Default: (0.5, 0.5)
    pub center: (f64, f64),

    /// Gradient axis angle in degrees, counter-clockwise on screen.
    ///
    /// Default: 0
    pub angle: f64,

    center_x: f64,
    center_y: f64,
    angle_rad: f64,
}

impl Default for ConicalGradient {
    fn default() -> Self {
        ConicalGradient::new((0.5, 0.5), 0.0, super::GradientColors::default())
    }
}

impl ConicalGradient {
    /// Creates a new conical gradient.
    ///
    /// The brush must be configured before use.
    pub fn new(center: (f64, f64), angle: f64, colors: super::GradientColors) -> Self {
        ConicalGradient {
            colors,
            center,
            angle,
            center_x: 0.0,
            center_y: 0.0,
            angle_rad: 0.0,
        }
    }

    pub(crate) fn configure(&mut self, width: f64, height: f64) {
        self.center_x = self.center.0 * width;
        self.center_y = self.center.1 * height;
        self.angle_rad = if self.angle.is_finite() { self.angle.to_radians() } else { 0.0 };
    }

    /// Returns a raw gradient parameter at a pixel center.
    pub(crate) fn param_at(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(x) + 0.5 - self.center_x;
        // Y axis points down.
        let dy = self.center_y - (f64::from(y) + 0.5);
        (dy.atan2(dx) - self.angle_rad).cos().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn along_axis() {
        let mut g = ConicalGradient::default();
        g.configure(11.0, 11.0);
        // Center is at 5.5, the center of pixel 5.
        assert!((g.param_at(9, 5) - 1.0).abs() < 1e-12);
        assert!((g.param_at(1, 5) - 1.0).abs() < 1e-12);
        assert!(g.param_at(5, 9).abs() < 1e-12);
        assert!((g.param_at(9, 1) - 0.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rotated() {
        let mut g = ConicalGradient::default();
        g.angle = 90.0;
        g.configure(11.0, 11.0);
        assert!((g.param_at(5, 1) - 1.0).abs() < 1e-12);
        assert!(g.param_at(9, 5).abs() < 1e-12);
    }

    #[test]
    fn at_center() {
        let mut g = ConicalGradient::default();
        g.configure(11.0, 11.0);
        assert!(g.param_at(5, 5).is_finite());
    }
}
