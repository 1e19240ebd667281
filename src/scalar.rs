// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

pub trait Scalar {
    fn half(self) -> Self;
    fn sqr(self) -> Self;
    fn bound(self, min: Self, max: Self) -> Self;
    fn fract_floor(self) -> Self;
    fn is_nearly_zero_within_tolerance(self, tolerance: Self) -> bool;
}

impl Scalar for f64 {
    fn half(self) -> f64 {
        self * 0.5
    }

    fn sqr(self) -> f64 {
        self * self
    }

    // Returns `max` for NaN/inf.
    fn bound(self, min: Self, max: Self) -> Self {
        max.min(self).max(min)
    }

    // Unlike `fract`, always in 0..1 for negative numbers too.
    fn fract_floor(self) -> Self {
        self - self.floor()
    }

    fn is_nearly_zero_within_tolerance(self, tolerance: Self) -> bool {
        debug_assert!(tolerance >= 0.0);
        self.abs() <= tolerance
    }
}
