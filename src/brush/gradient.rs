// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::{Color, ColorU8, PremultipliedColorU8};

use super::{BrushCommon, RepeatMode};

// Gradient axes shorter than this are treated as degenerate.
pub const DEGENERATE_THRESHOLD: f64 = 1.0 / (1 << 15) as f64;


/// Color mapping shared by all gradient-like brushes.
///
/// A brush computes a raw parameter `t` for each pixel, which is then
/// repeated, jittered, optionally remapped by a log curve and inverted,
/// and finally converted into a color.
#[derive(Clone, PartialEq, Debug)]
pub struct GradientColors {
    /// A color at `t == 0`.
    ///
    /// Default: black
    pub low: ColorU8,

    /// A color at `t == 1`.
    ///
    /// Default: white
    pub high: ColorU8,

    /// Default: RepeatMode::None
    pub repeat: RepeatMode,

    /// Remaps `t` by `log10(9t + 1)`.
    ///
    /// Default: false
    pub log_scale: bool,

    /// Inverts `t`.
    ///
    /// Default: false
    pub decreasing: bool,
}

impl Default for GradientColors {
    fn default() -> Self {
        GradientColors {
            low: ColorU8::BLACK,
            high: ColorU8::WHITE,
            repeat: RepeatMode::None,
            log_scale: false,
            decreasing: false,
        }
    }
}

impl GradientColors {
    /// Creates a new two-color mapping with default options.
    pub fn new(low: ColorU8, high: ColorU8) -> Self {
        GradientColors {
            low,
            high,
            ..GradientColors::default()
        }
    }

    /// Maps a raw gradient parameter into the 0..=1 range.
    pub fn map_param(&self, t: f64, common: &BrushCommon, x: i32, y: i32) -> f64 {
        let mut t = self.repeat.apply(t);
        t = common.jitter.apply(t, x, y);

        if self.log_scale {
            t = (9.0 * t + 1.0).log10();
        }

        if self.decreasing {
            t = 1.0 - t;
        }

        t
    }

    /// Returns a straight color for a mapped parameter.
    pub fn color(&self, t: f64, common: &BrushCommon) -> ColorU8 {
        match common.palette {
            Some(ref palette) => palette.color_at(t),
            None => {
                if t <= 0.0 {
                    self.low
                } else if t >= 1.0 {
                    self.high
                } else {
                    Color::from(self.low).lerp(&Color::from(self.high), t as f32).to_color_u8()
                }
            }
        }
    }

    pub(crate) fn shade(&self, t: f64, common: &BrushCommon, x: i32, y: i32) -> PremultipliedColorU8 {
        let t = self.map_param(t, common, x, y);
        self.color(t, common).premultiply().scale(common.opacity())
    }

    pub(crate) fn is_opaque(&self, common: &BrushCommon) -> bool {
        match common.palette {
            Some(ref palette) => palette.stops().iter().all(|s| s.color().is_opaque()),
            None => self.low.is_opaque() && self.high.is_opaque(),
        }
    }
}
