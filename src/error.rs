// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use thiserror::Error;

/// A list of errors produced by the crate.
///
/// Only validation and allocation problems are reported.
/// Numeric edge cases inside pixel loops are clamped and never surface here.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum Error {
    /// Picture width or height is zero or bigger than `MAX_DIMENSION`.
    #[allow(missing_docs)]
    #[error("invalid picture size {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel storage could not be reserved.
    #[error("failed to allocate {0} pixels")]
    AllocationFailed(usize),

    /// Raw pixel data length doesn't match picture dimensions.
    #[allow(missing_docs)]
    #[error("expected {expected} bytes of pixel data, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Unknown paint brush type name.
    #[error("unknown paint brush type \"{0}\": should be solid, linear, radial, conical, tile, stripe or checker")]
    UnknownBrushType(String),

    /// Unknown gradient repeat mode name.
    #[error("unknown repeat mode \"{0}\": should be no, yes or reversing")]
    UnknownRepeatMode(String),

    /// Unknown orientation name.
    #[error("unknown orientation \"{0}\": should be horizontal or vertical")]
    UnknownOrientation(String),

    /// Unknown resampling filter name.
    #[error("unknown filter \"{0}\"")]
    UnknownFilter(String),

    /// Unknown blend mode name.
    #[error("unknown blend mode \"{0}\"")]
    UnknownBlendMode(String),

    /// Unknown arithmetic operation name.
    #[error("unknown arithmetic operation \"{0}\"")]
    UnknownArithmeticOp(String),

    /// Unknown rotation method name.
    #[error("unknown rotation method \"{0}\": should be shear or areamap")]
    UnknownRotateMethod(String),

    /// Opacity percentage is outside of the 0..=100 range.
    #[error("opacity {0} is out of range: should be between 0 and 100")]
    OpacityOutOfRange(f64),

    /// Jitter percentage is outside of the 0..=100 range.
    #[error("jitter {0} is out of range: should be between 0 and 100")]
    JitterOutOfRange(f64),

    /// Stripe or checker stride is zero.
    #[error("invalid stride {0}: should be greater than zero")]
    InvalidStride(u32),

    /// Requested number of colors cannot be produced.
    #[error("invalid number of colors {0}: should be between 1 and 256")]
    InvalidColorCount(usize),

    /// A brush with the same name is already registered.
    #[error("paint brush \"{0}\" already exists")]
    BrushExists(String),

    /// There is no brush with such name.
    #[error("can't find paint brush \"{0}\"")]
    BrushNotFound(String),

    /// PNG decoding error.
    #[cfg(feature = "png-format")]
    #[error("failed to decode PNG: {0}")]
    PngDecoding(String),

    /// PNG encoding error.
    #[cfg(feature = "png-format")]
    #[error("failed to encode PNG: {0}")]
    PngEncoding(String),
}
