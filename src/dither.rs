// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Variable-coefficient error diffusion.
//!
//! Each channel is reduced to the intensities of an [`ApproxTable`].
//! The quantization error is spread to three neighbors with coefficients
//! that depend on the original intensity, which avoids the regular
//! patterns a fixed kernel produces in flat areas.

use crate::{Error, Picture, Pixel};

/// A mapping from an 8-bit intensity to the closest representable one.
#[derive(Clone, PartialEq, Eq)]
pub struct ApproxTable {
    values: [u8; 256],
}

impl ApproxTable {
    /// Creates a table with `levels` evenly spaced intensities, including 0 and 255.
    ///
    /// `levels` must be in a 2..=256 range.
    pub fn with_levels(levels: usize) -> Result<Self, Error> {
        if levels < 2 || levels > 256 {
            return Err(Error::InvalidColorCount(levels));
        }

        let steps = (levels - 1) as u32;
        Ok(Self::from_fn(|v| {
            let level = (u32::from(v) * steps + 127) / 255;
            ((level * 255 + steps / 2) / steps) as u8
        }))
    }

    /// Creates a table that maps each intensity to the nearest one from a list.
    ///
    /// Ties are resolved towards the darker intensity.
    pub fn from_intensities(intensities: &[u8]) -> Result<Self, Error> {
        if intensities.is_empty() {
            return Err(Error::InvalidColorCount(0));
        }

        let mut sorted = intensities.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        Ok(Self::from_fn(|v| {
            let mut best = sorted[0];
            for &c in &sorted[1..] {
                if v.abs_diff(c) < v.abs_diff(best) {
                    best = c;
                }
            }

            best
        }))
    }

    /// Creates a table from a function.
    pub fn from_fn<F: FnMut(u8) -> u8>(mut f: F) -> Self {
        let mut values = [0; 256];
        for (i, v) in values.iter_mut().enumerate() {
            *v = f(i as u8);
        }

        ApproxTable { values }
    }

    /// Returns the representable intensity for `v`.
    #[inline]
    pub fn approximate(&self, v: u8) -> u8 {
        self.values[usize::from(v)]
    }
}

impl core::fmt::Debug for ApproxTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut levels = self.values.to_vec();
        levels.dedup();
        f.debug_struct("ApproxTable")
            .field("levels", &levels)
            .finish()
    }
}

// (forward, diagonally behind, down, sum) for intensities 0..=127.
// The upper half mirrors the lower one.
#[rustfmt::skip]
const COEFFICIENTS: [(i32, i32, i32, i32); 128] = [
    (13, 0, 5, 18),       (13, 0, 5, 18),       (21, 0, 10, 31),      (7, 0, 4, 11),
    (8, 0, 5, 13),        (47, 3, 28, 78),      (23, 3, 13, 39),      (15, 3, 8, 26),
    (22, 6, 11, 39),      (43, 15, 20, 78),     (7, 3, 3, 13),        (501, 224, 211, 936),
    (249, 116, 103, 468), (165, 80, 67, 312),   (123, 62, 49, 234),   (489, 256, 191, 936),
    (81, 44, 31, 156),    (483, 272, 181, 936), (60, 35, 22, 117),    (53, 32, 19, 104),
    (237, 148, 83, 468),  (471, 304, 161, 936), (3, 2, 1, 6),         (459, 304, 161, 924),
    (38, 25, 14, 77),     (453, 296, 175, 924), (225, 146, 91, 462),  (149, 96, 63, 308),
    (111, 71, 49, 231),   (63, 40, 29, 132),    (73, 46, 35, 154),    (435, 272, 217, 924),
    (108, 67, 56, 231),   (13, 8, 7, 28),       (213, 130, 119, 462), (423, 256, 245, 924),
    (5, 3, 3, 11),        (281, 173, 162, 616), (141, 89, 78, 308),   (283, 183, 150, 616),
    (71, 47, 36, 154),    (285, 193, 138, 616), (13, 9, 6, 28),       (41, 29, 18, 88),
    (36, 26, 15, 77),     (289, 213, 114, 616), (145, 109, 54, 308),  (291, 223, 102, 616),
    (73, 57, 24, 154),    (293, 233, 90, 616),  (21, 17, 6, 44),      (295, 243, 78, 616),
    (37, 31, 9, 77),      (27, 23, 6, 56),      (149, 129, 30, 308),  (299, 263, 54, 616),
    (75, 67, 12, 154),    (43, 39, 6, 88),      (151, 139, 18, 308),  (303, 283, 30, 616),
    (38, 36, 3, 77),      (305, 293, 18, 616),  (153, 149, 6, 308),   (307, 303, 6, 616),
    (1, 1, 0, 2),         (101, 105, 2, 208),   (49, 53, 2, 104),     (95, 107, 6, 208),
    (23, 27, 2, 52),      (89, 109, 10, 208),   (43, 55, 6, 104),     (83, 111, 14, 208),
    (5, 7, 1, 13),        (172, 181, 37, 390),  (97, 76, 22, 195),    (72, 41, 17, 130),
    (119, 47, 29, 195),   (4, 1, 1, 6),         (4, 1, 1, 6),         (4, 1, 1, 6),
    (4, 1, 1, 6),         (4, 1, 1, 6),         (4, 1, 1, 6),         (4, 1, 1, 6),
    (4, 1, 1, 6),         (4, 1, 1, 6),         (65, 18, 17, 100),    (95, 29, 26, 150),
    (185, 62, 53, 300),   (30, 11, 9, 50),      (35, 14, 11, 60),     (85, 37, 28, 150),
    (55, 26, 19, 100),    (80, 41, 29, 150),    (155, 86, 59, 300),   (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
    (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),        (5, 3, 2, 10),
];

#[inline]
fn coefficients(intensity: u8) -> (i32, i32, i32, i32) {
    let i = if intensity < 128 { intensity } else { 255 - intensity };
    COEFFICIENTS[usize::from(i)]
}

// Errors are carried with 8 fractional bits.
const ERROR_BITS: i32 = 8;
const MAX_VALUE: i32 = 255 << ERROR_BITS;

/// Reduces each color channel of a picture to intensities of `table`.
///
/// Rows are traversed left to right and right to left in turns.
/// Alpha is preserved.
pub fn dither(src: &Picture, table: &ApproxTable) -> Result<Picture, Error> {
    let mut dest = Picture::new(src.width(), src.height())?;

    let width = src.width() as usize;
    // One extra cell on each side, so neighbors of edge pixels need no checks.
    let mut current = vec![[0i32; 3]; width + 2];
    let mut next = vec![[0i32; 3]; width + 2];

    let associated = src.is_associated();
    for y in 0..src.height() {
        let reverse = y % 2 == 1;
        let src_row = src.row(y);
        let dest_row = dest.row_mut(y);

        for i in 0..width {
            let x = if reverse { width - 1 - i } else { i };
            let s = if associated { src_row[x].unassociate() } else { src_row[x] };

            let cell = x + 1;
            let (ahead, behind) = if reverse { (cell - 1, cell + 1) } else { (cell + 1, cell - 1) };

            let mut out = [0u8; 3];
            for (c, v) in [s.red(), s.green(), s.blue()].iter().enumerate() {
                let corrected = ((i32::from(*v) << ERROR_BITS) + current[cell][c]).max(0).min(MAX_VALUE);
                let value = ((corrected + (1 << (ERROR_BITS - 1))) >> ERROR_BITS) as u8;
                let q = table.approximate(value);
                out[c] = q;

                let residual = corrected - (i32::from(q) << ERROR_BITS);
                let (r, dl, _, sum) = coefficients(*v);
                let forward = residual * r / sum;
                let diagonal = residual * dl / sum;
                current[ahead][c] += forward;
                next[behind][c] += diagonal;
                next[cell][c] += residual - forward - diagonal;
            }

            dest_row[x] = Pixel::from_rgba(out[0], out[1], out[2], s.alpha()).associate();
        }

        core::mem::swap(&mut current, &mut next);
        for e in next.iter_mut() {
            *e = [0; 3];
        }
    }

    dest.analyze();
    Ok(dest)
}
