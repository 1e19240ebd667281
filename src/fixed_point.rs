// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

/// A 18.14 fixed point.
///
/// Used by filter weight tables, where 14 fractional bits are enough
/// to keep the sum of 8-bit channels multiplied by weights within `i32`.
pub type FDot14 = i32;

pub mod fdot14 {
    use super::*;

    pub const BITS: u32 = 14;

    pub const ONE: FDot14 = 1 << BITS;

    pub const HALF: FDot14 = 1 << (BITS - 1);

    pub fn from_f64(n: f64) -> FDot14 {
        let n = n * ONE as f64;
        if n >= 0.0 {
            (n + 0.5) as i32
        } else {
            (n - 0.5) as i32
        }
    }

    /// Rounds an accumulated `channel * weight` sum back to a channel value.
    pub fn round_to_u8(acc: i32) -> u8 {
        let n = (acc + HALF) >> BITS;
        n.max(0).min(255) as u8
    }
}

/// Return a*b/255, rounding any fractional bits.
#[inline]
pub fn mul_255(a: u32, b: u32) -> u32 {
    let prod = a * b + 128;
    (prod + (prod >> 8)) >> 8
}
