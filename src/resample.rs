// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::borrow::Cow;

use crate::{Error, Filter, Picture, PictureFlags, Pixel};

use crate::fixed_point::{fdot14, FDot14};

/// Contributions of source pixels to a single destination pixel.
#[derive(Clone, PartialEq, Debug)]
pub struct Sample {
    /// Index of the first contributing source pixel.
    pub start: usize,
    /// Weights of consecutive source pixels.
    ///
    /// Sum to exactly `fdot14::ONE` unless the filter has no support here.
    pub weights: Vec<FDot14>,
}

/// Per-destination-pixel filter weights along one axis.
#[derive(Clone, PartialEq, Debug)]
pub struct WeightTable {
    samples: Vec<Sample>,
}

impl WeightTable {
    /// Computes weights for scaling `src_size` pixels into `dest_size` pixels.
    ///
    /// Both sizes must be positive.
    pub fn new(src_size: u32, dest_size: u32, filter: Filter) -> Self {
        debug_assert!(src_size > 0 && dest_size > 0);

        let scale = f64::from(dest_size) / f64::from(src_size);
        // When downsampling, the filter is stretched to cover all source pixels.
        let (radius, filter_scale) = if scale < 1.0 {
            (filter.support() / scale, scale)
        } else {
            (filter.support(), 1.0)
        };

        let last = i64::from(src_size) - 1;
        let mut samples = Vec::with_capacity(dest_size as usize);
        let mut weights = Vec::new();
        for i in 0..dest_size {
            let center = (f64::from(i) + 0.5) / scale;
            let left = ((center - radius).floor() as i64).max(0).min(last);
            let right = ((center + radius).ceil() as i64).max(0).min(last);

            weights.clear();
            let mut sum = 0.0;
            for j in left..=right {
                let w = filter.weight((j as f64 + 0.5 - center) * filter_scale);
                weights.push(w);
                sum += w;
            }

            let factor = if sum == 0.0 { 1.0 } else { 1.0 / sum };

            // Rounding the running sum keeps the total at `ONE` and the sign of
            // every weight.
            let mut cumulative = 0.0;
            let mut prev: FDot14 = 0;
            let mut fixed: Vec<FDot14> = weights
                .iter()
                .map(|w| {
                    cumulative += w * factor;
                    let rounded = fdot14::from_f64(cumulative);
                    let weight = rounded - prev;
                    prev = rounded;
                    weight
                })
                .collect();

            let mut start = left as usize;
            while fixed.len() > 1 && fixed[0] == 0 {
                fixed.remove(0);
                start += 1;
            }
            while fixed.len() > 1 && fixed[fixed.len() - 1] == 0 {
                fixed.pop();
            }

            samples.push(Sample { start, weights: fixed });
        }

        WeightTable { samples }
    }

    /// Returns samples for each destination pixel.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

/// Scales `src` into `dest` using separable filters.
///
/// The horizontal pass runs first, into an intermediate picture of
/// `dest.width() x src.height()`, followed by the vertical pass.
///
/// Filtering happens on premultiplied colors, so `dest` is always associated.
pub fn resample(src: &Picture, dest: &mut Picture, filter_h: Filter, filter_v: Filter) -> Result<(), Error> {
    let src = associated(src);

    let h_table = WeightTable::new(src.width(), dest.width(), filter_h);
    let v_table = WeightTable::new(src.height(), dest.height(), filter_v);

    let mut tmp = Picture::new(dest.width(), src.height())?;
    for y in 0..src.height() {
        convolve_row(src.row(y), tmp.row_mut(y), &h_table);
    }

    let width = dest.width() as usize;
    let mut acc = vec![[0i32; 4]; width];
    for (y, sample) in v_table.samples().iter().enumerate() {
        for a in acc.iter_mut() {
            *a = [0; 4];
        }

        for (k, w) in sample.weights.iter().enumerate() {
            let row = tmp.row((sample.start + k) as u32);
            for (a, p) in acc.iter_mut().zip(row) {
                accumulate(a, *p, *w);
            }
        }

        let row = dest.row_mut(y as u32);
        for (d, a) in row.iter_mut().zip(&acc) {
            *d = store(a);
        }
    }

    dest.set_associated(true);
    dest.remove_flags(PictureFlags::GREYSCALE);
    if src.flags().contains(PictureFlags::GREYSCALE) {
        dest.insert_flags(PictureFlags::GREYSCALE);
    }
    dest.set_translucency(!src.is_opaque());
    Ok(())
}

fn associated(src: &Picture) -> Cow<'_, Picture> {
    if src.is_associated() {
        Cow::Borrowed(src)
    } else {
        let mut src = src.clone();
        src.associate();
        Cow::Owned(src)
    }
}

fn convolve_row(src: &[Pixel], dest: &mut [Pixel], table: &WeightTable) {
    for (d, sample) in dest.iter_mut().zip(table.samples()) {
        let mut acc = [0i32; 4];
        let pixels = &src[sample.start..sample.start + sample.weights.len()];
        for (p, w) in pixels.iter().zip(&sample.weights) {
            accumulate(&mut acc, *p, *w);
        }

        *d = store(&acc);
    }
}

#[inline]
fn accumulate(acc: &mut [i32; 4], p: Pixel, w: FDot14) {
    acc[0] += i32::from(p.red()) * w;
    acc[1] += i32::from(p.green()) * w;
    acc[2] += i32::from(p.blue()) * w;
    acc[3] += i32::from(p.alpha()) * w;
}

// Negative lobes can push colors above alpha, which is not a valid premultiplied color.
#[inline]
fn store(acc: &[i32; 4]) -> Pixel {
    let a = fdot14::round_to_u8(acc[3]);
    Pixel::from_rgba(
        fdot14::round_to_u8(acc[0]).min(a),
        fdot14::round_to_u8(acc[1]).min(a),
        fdot14::round_to_u8(acc[2]).min(a),
        a,
    )
}

/// Scales a picture using nearest neighbor sampling.
///
/// Pixels are copied as is, so the association state is preserved.
pub fn scale_nearest(src: &Picture, width: u32, height: u32) -> Result<Picture, Error> {
    let mut dest = Picture::new(width, height)?;
    let src_w = u64::from(src.width());
    let src_h = u64::from(src.height());
    let map: Vec<usize> = (0..u64::from(width))
        .map(|x| ((2 * x + 1) * src_w / (2 * u64::from(width))) as usize)
        .collect();

    for y in 0..height {
        let sy = ((2 * u64::from(y) + 1) * src_h / (2 * u64::from(height))) as u32;
        let src_row = src.row(sy);
        for (d, sx) in dest.row_mut(y).iter_mut().zip(&map) {
            *d = src_row[*sx];
        }
    }

    dest.copy_flags(src);
    Ok(dest)
}

impl Picture {
    /// Returns a copy of the picture scaled to a new size.
    pub fn resized(&self, width: u32, height: u32, filter: Filter) -> Result<Picture, Error> {
        let mut dest = Picture::new(width, height)?;
        resample(self, &mut dest, filter, filter)?;
        Ok(dest)
    }
}
