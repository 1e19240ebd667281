// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::Error;

const DEFAULT_SEED: u64 = 0x853C_49E6_748F_EA9B;

/// A deterministic pseudo-random number generator.
///
/// xorshift64* with a fixed default seed, so the same seed
/// always produces the same sequence on every platform.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Random {
    state: u64,
}

impl Default for Random {
    fn default() -> Self {
        Random::new(DEFAULT_SEED)
    }
}

impl Random {
    /// Creates a new generator.
    ///
    /// A zero seed is replaced with the default one, since xorshift
    /// never leaves the zero state.
    pub fn new(seed: u64) -> Self {
        Random {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    /// Returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Returns the next value in the 0..1 range.
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u64())
    }

    /// Returns a value in the 0..1 range that depends only on the seed and a position.
    ///
    /// Unlike `next_f64`, doesn't advance the state, which keeps per-pixel
    /// evaluation independent of the traversal order.
    pub fn at(&self, x: i32, y: i32) -> f64 {
        let key = self.state
            ^ (x as u32 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
            ^ (y as u32 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
        unit_f64(splitmix64(key))
    }
}

#[inline]
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// Uses the top 53 bits, which is exactly the f64 mantissa.
#[inline]
fn unit_f64(n: u64) -> f64 {
    (n >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}


/// Small noise added to color ramp parameters.
///
/// Breaks visible banding in gradients.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Jitter {
    range: f64,
    offset: f64,
    random: Random,
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::NONE
    }
}

impl Jitter {
    /// No jitter.
    pub const NONE: Jitter = Jitter {
        range: 0.0,
        offset: 0.0,
        random: Random { state: DEFAULT_SEED },
    };

    /// Creates a new jitter from a percentage.
    ///
    /// `percent` must be in the 0..=100 range.
    pub fn new(percent: f64) -> Result<Self, Error> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::JitterOutOfRange(percent));
        }

        let range = percent / 100.0;
        Ok(Jitter {
            range,
            offset: -range * 0.5,
            random: Random::default(),
        })
    }

    /// Returns a copy with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random = Random::new(seed);
        self
    }

    /// Returns jitter range in the 0..=1 range.
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Checks that the jitter does nothing.
    pub fn is_none(&self) -> bool {
        self.range == 0.0
    }

    /// Returns a noise value for a position in the `-range/2..range/2` range.
    #[inline]
    pub fn value_at(&self, x: i32, y: i32) -> f64 {
        self.random.at(x, y) * self.range + self.offset
    }

    /// Adds noise to a parameter and clamps it to 0..=1.
    #[inline]
    pub fn apply(&self, t: f64, x: i32, y: i32) -> f64 {
        if self.is_none() {
            return t;
        }

        (t + self.value_at(x, y)).max(0.0).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_deterministic() {
        let mut a = Random::new(42);
        let mut b = Random::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn unit_range() {
        let mut r = Random::default();
        for _ in 0..1000 {
            let n = r.next_f64();
            assert!(n >= 0.0 && n < 1.0);
        }
    }

    #[test]
    fn position_hash_is_stable() {
        let r = Random::new(7);
        assert_eq!(r.at(10, 20), r.at(10, 20));
        assert_ne!(r.at(10, 20), r.at(20, 10));
    }

    #[test]
    fn jitter_validation() {
        assert!(Jitter::new(-1.0).is_err());
        assert!(Jitter::new(100.5).is_err());
        assert!(Jitter::new(0.0).unwrap().is_none());
        assert_eq!(Jitter::new(50.0).unwrap().range(), 0.5);
    }

    #[test]
    fn jitter_bounds() {
        let j = Jitter::new(20.0).unwrap();
        for y in 0..20 {
            for x in 0..20 {
                let v = j.value_at(x, y);
                assert!(v >= -0.1 && v <= 0.1);
                let t = j.apply(0.0, x, y);
                assert!(t >= 0.0 && t <= 0.1);
            }
        }
    }
}
