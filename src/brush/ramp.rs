// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use strict_num::NormalizedF32;

use crate::{Color, ColorU8};

/// A color ramp point.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop {
    pub(crate) position: NormalizedF32,
    pub(crate) color: ColorU8,
}

impl GradientStop {
    /// Creates a new color ramp point.
    ///
    /// `position` will be clamped to a 0..=1 range.
    pub fn new(position: f32, color: ColorU8) -> Self {
        GradientStop {
            position: NormalizedF32::new_clamped(position),
            color,
        }
    }

    /// Returns stop's position.
    pub fn position(&self) -> f32 {
        self.position.get()
    }

    /// Returns stop's color.
    pub fn color(&self) -> ColorU8 {
        self.color
    }
}


/// An ordered color ramp.
///
/// When set on a brush, replaces the brush's low/high interpolation.
#[derive(Clone, PartialEq, Debug)]
pub struct ColorRamp {
    stops: Vec<GradientStop>,
}

impl ColorRamp {
    /// Creates a new color ramp.
    ///
    /// Stops are sorted by position. Stops with equal positions keep their order,
    /// which produces a hard color transition.
    ///
    /// Returns `None` when `stops` is empty.
    pub fn new(mut stops: Vec<GradientStop>) -> Option<Self> {
        if stops.is_empty() {
            return None;
        }

        // `sort_by` is stable.
        stops.sort_by(|a, b| a.position.get().partial_cmp(&b.position.get()).unwrap_or(core::cmp::Ordering::Equal));
        Some(ColorRamp { stops })
    }

    /// Creates a ramp from evenly spaced colors.
    ///
    /// Returns `None` when `colors` is empty.
    pub fn from_colors(colors: &[ColorU8]) -> Option<Self> {
        let n = colors.len();
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let pos = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
                GradientStop::new(pos, *c)
            })
            .collect();
        Self::new(stops)
    }

    /// Returns ramp's stops.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Returns an interpolated color at `t`.
    ///
    /// Colors before the first stop and after the last one are padded.
    pub fn color_at(&self, t: f64) -> ColorU8 {
        let t = t as f32;
        let first = self.stops[0];
        if t <= first.position.get() {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (l, r) = (pair[0], pair[1]);
            if t <= r.position.get() {
                let span = r.position.get() - l.position.get();
                if span <= 0.0 {
                    return r.color;
                }

                let f = (t - l.position.get()) / span;
                return Color::from(l.color).lerp(&Color::from(r.color), f).to_color_u8();
            }
        }

        self.stops[self.stops.len() - 1].color
    }
}
