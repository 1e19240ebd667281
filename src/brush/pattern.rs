// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::str::FromStr;

use crate::Error;

use super::GradientColors;

const DEFAULT_STRIDE: u32 = 8;

/// A stripe orientation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Orientation {
    /// Stripes run left to right, alternating down the region.
    Horizontal,
    /// Stripes run top to bottom, alternating across the region.
    Vertical,
}

impl Default for Orientation {
    #[inline]
    fn default() -> Self {
        Orientation::Horizontal
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            _ => Err(Error::UnknownOrientation(s.to_string())),
        }
    }
}

#[inline]
fn band(n: i32, stride: u32) -> i32 {
    n.div_euclid(stride as i32).rem_euclid(2)
}

fn check_stride(stride: u32) -> Result<u32, Error> {
    if stride == 0 || stride > crate::MAX_DIMENSION {
        return Err(Error::InvalidStride(stride));
    }

    Ok(stride)
}


/// A brush of alternating bands.
///
/// Even bands use the low color, odd ones the high color.
#[derive(Clone, PartialEq, Debug)]
pub struct Stripe {
    /// Color mapping.
    pub colors: GradientColors,

    /// Default: Orientation::Horizontal
    pub orientation: Orientation,

    stride: u32,
}

impl Default for Stripe {
    fn default() -> Self {
        Stripe {
            colors: GradientColors::default(),
            orientation: Orientation::default(),
            stride: DEFAULT_STRIDE,
        }
    }
}

impl Stripe {
    /// Creates a new stripe brush.
    ///
    /// `stride` is a band width in pixels and must be positive.
    pub fn new(stride: u32, orientation: Orientation, colors: GradientColors) -> Result<Self, Error> {
        Ok(Stripe {
            colors,
            orientation,
            stride: check_stride(stride)?,
        })
    }

    /// Returns band width.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Sets band width.
    ///
    /// On error, the stride is left unchanged.
    pub fn set_stride(&mut self, stride: u32) -> Result<(), Error> {
        self.stride = check_stride(stride)?;
        Ok(())
    }

    pub(crate) fn param_at(&self, x: i32, y: i32) -> f64 {
        let n = match self.orientation {
            Orientation::Horizontal => y,
            Orientation::Vertical => x,
        };

        f64::from(band(n, self.stride))
    }
}


/// A checkerboard brush.
#[derive(Clone, PartialEq, Debug)]
pub struct Checker {
    /// Color mapping.
    pub colors: GradientColors,

    stride: u32,
}

impl Default for Checker {
    fn default() -> Self {
        Checker {
            colors: GradientColors::default(),
            stride: DEFAULT_STRIDE,
        }
    }
}

impl Checker {
    /// Creates a new checker brush.
    ///
    /// `stride` is a cell size in pixels and must be positive.
    pub fn new(stride: u32, colors: GradientColors) -> Result<Self, Error> {
        Ok(Checker {
            colors,
            stride: check_stride(stride)?,
        })
    }

    /// Returns cell size.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Sets cell size.
    ///
    /// On error, the stride is left unchanged.
    pub fn set_stride(&mut self, stride: u32) -> Result<(), Error> {
        self.stride = check_stride(stride)?;
        Ok(())
    }

    pub(crate) fn param_at(&self, x: i32, y: i32) -> f64 {
        f64::from(band(x, self.stride) ^ band(y, self.stride))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripes() {
        let s = Stripe::new(2, Orientation::Vertical, GradientColors::default()).unwrap();
        let row: Vec<f64> = (-2..6).map(|x| s.param_at(x, 100)).collect();
        assert_eq!(row, &[1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);

        let s = Stripe::new(1, Orientation::Horizontal, GradientColors::default()).unwrap();
        assert_eq!(s.param_at(5, 0), 0.0);
        assert_eq!(s.param_at(5, 1), 1.0);
    }

    #[test]
    fn checker() {
        let c = Checker::new(3, GradientColors::default()).unwrap();
        assert_eq!(c.param_at(0, 0), 0.0);
        assert_eq!(c.param_at(3, 0), 1.0);
        assert_eq!(c.param_at(0, 3), 1.0);
        assert_eq!(c.param_at(3, 3), 0.0);
        assert_eq!(c.param_at(-1, 0), 1.0);
    }

    #[test]
    fn invalid_stride() {
        assert!(Stripe::new(0, Orientation::Vertical, GradientColors::default()).is_err());
        let mut c = Checker::default();
        assert!(c.set_stride(0).is_err());
        assert_eq!(c.stride(), DEFAULT_STRIDE);
    }

    #[test]
    fn parse_orientation() {
        assert_eq!("vertical".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
