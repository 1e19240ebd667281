// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use core::f64::consts::PI;
use std::str::FromStr;

use crate::Error;

use crate::scalar::Scalar;

/// A 1-D resampling filter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Filter {
    /// Nearest neighbor when upsampling, area average when downsampling.
    Box,
    /// Linear interpolation, aka tent.
    Triangle,
    /// A quadratic bell.
    Bell,
    /// A cubic B-spline. Smooth, but blurry.
    BSpline,
    /// A Catmull-Rom cubic spline.
    CatmullRom,
    /// A sinc without a window.
    Sinc,
    /// A sinc windowed by a wider sinc, with three lobes.
    Lanczos3,
    /// A Mitchell-Netravali cubic with B = C = 1/3.
    Mitchell,
    /// A gaussian.
    Gaussian,
    /// A sinc with a Blackman window.
    Blackman,
    /// A sinc with a Hann window.
    Hann,
}

impl Filter {
    /// Returns the filter radius.
    ///
    /// The filter is zero outside of `-support..=support`.
    pub fn support(&self) -> f64 {
        match self {
            Filter::Box => 0.5,
            Filter::Triangle => 1.0,
            Filter::Bell => 1.5,
            Filter::BSpline => 2.0,
            Filter::CatmullRom => 2.0,
            Filter::Sinc => 4.0,
            Filter::Lanczos3 => 3.0,
            Filter::Mitchell => 2.0,
            Filter::Gaussian => 1.25,
            Filter::Blackman => 3.0,
            Filter::Hann => 3.0,
        }
    }

    /// Evaluates the filter at `x`.
    pub fn weight(&self, x: f64) -> f64 {
        match self {
            Filter::Box => {
                // Half-open, so a sample exactly between two pixels is counted once.
                if x > -0.5 && x <= 0.5 { 1.0 } else { 0.0 }
            }
            Filter::Triangle => {
                let x = x.abs();
                if x < 1.0 { 1.0 - x } else { 0.0 }
            }
            Filter::Bell => {
                let x = x.abs();
                if x < 0.5 {
                    0.75 - x.sqr()
                } else if x < 1.5 {
                    (x - 1.5).sqr().half()
                } else {
                    0.0
                }
            }
            Filter::BSpline => {
                let x = x.abs();
                if x < 1.0 {
                    0.5 * x * x * x - x.sqr() + 2.0 / 3.0
                } else if x < 2.0 {
                    let x = 2.0 - x;
                    x * x * x / 6.0
                } else {
                    0.0
                }
            }
            Filter::CatmullRom => cubic(x, 0.0, 0.5),
            Filter::Mitchell => cubic(x, 1.0 / 3.0, 1.0 / 3.0),
            Filter::Sinc => {
                if x.abs() < 4.0 { sinc(x) } else { 0.0 }
            }
            Filter::Lanczos3 => {
                if x.abs() < 3.0 { sinc(x) * sinc(x / 3.0) } else { 0.0 }
            }
            Filter::Gaussian => {
                if x.abs() < 1.25 {
                    (-2.0 * x.sqr()).exp() * (2.0 / PI).sqrt()
                } else {
                    0.0
                }
            }
            Filter::Blackman => {
                let n = self.support();
                if x.abs() < n {
                    let t = PI * x / n;
                    sinc(x) * (0.42 + 0.5 * t.cos() + 0.08 * (2.0 * t).cos())
                } else {
                    0.0
                }
            }
            Filter::Hann => {
                let n = self.support();
                if x.abs() < n {
                    sinc(x) * (0.5 + 0.5 * (PI * x / n).cos())
                } else {
                    0.0
                }
            }
        }
    }

    /// Returns filter's name as accepted by `from_str`.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Box => "box",
            Filter::Triangle => "triangle",
            Filter::Bell => "bell",
            Filter::BSpline => "bspline",
            Filter::CatmullRom => "catrom",
            Filter::Sinc => "sinc",
            Filter::Lanczos3 => "lanczos3",
            Filter::Mitchell => "mitchell",
            Filter::Gaussian => "gaussian",
            Filter::Blackman => "blackman",
            Filter::Hann => "hann",
        }
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = match s {
            "box" => Filter::Box,
            "triangle" | "tent" => Filter::Triangle,
            "bell" => Filter::Bell,
            "bspline" => Filter::BSpline,
            "catrom" | "catmullrom" => Filter::CatmullRom,
            "sinc" => Filter::Sinc,
            "lanczos3" => Filter::Lanczos3,
            "mitchell" => Filter::Mitchell,
            "gaussian" | "gauss" => Filter::Gaussian,
            "blackman" => Filter::Blackman,
            "hann" | "hanning" => Filter::Hann,
            _ => return Err(Error::UnknownFilter(s.to_string())),
        };

        Ok(filter)
    }
}

/// Parses a filter name, where `"none"` means no filtering.
pub fn parse_filter(s: &str) -> Result<Option<Filter>, Error> {
    if s == "none" {
        return Ok(None);
    }

    s.parse().map(Some)
}

fn sinc(x: f64) -> f64 {
    if x.is_nearly_zero_within_tolerance(1e-9) {
        return 1.0;
    }

    let x = x * PI;
    x.sin() / x
}

// Mitchell-Netravali family of cubics.
fn cubic(x: f64, b: f64, c: f64) -> f64 {
    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    let n = if x < 1.0 {
        (12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b)
    } else if x < 2.0 {
        (-b - 6.0 * c) * x3 + (6.0 * b + 30.0 * c) * x2 + (-12.0 * b - 48.0 * c) * x + (8.0 * b + 24.0 * c)
    } else {
        0.0
    };

    n / 6.0
}
