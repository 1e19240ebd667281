// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Color quantization by variance-minimizing cube splitting.
//!
//! Colors are binned into a 32x32x32 grid with an extra zero margin at
//! index 0, so moments of any box can be computed from eight corner lookups
//! into cumulative tables.

use arrayvec::ArrayVec;

use crate::{ColorU8, Error, Picture, Pixel};

/// Maximum number of colors.
pub const MAX_COLORS: usize = 256;

const SIDE: usize = 33;
const TABLE_SIZE: usize = SIDE * SIDE * SIDE;

#[inline]
fn index(r: usize, g: usize, b: usize) -> usize {
    (r * SIDE + g) * SIDE + b
}

#[inline]
fn cell(c: u8) -> usize {
    usize::from(c >> 3) + 1
}

/// Cumulative color moments of a picture.
#[derive(Clone)]
pub struct Histogram {
    wt: Vec<i64>,
    mr: Vec<i64>,
    mg: Vec<i64>,
    mb: Vec<i64>,
    m2: Vec<f64>,
}

impl Histogram {
    /// Collects colors of a picture.
    ///
    /// Fully transparent pixels have no color and are skipped.
    pub fn new(src: &Picture) -> Self {
        let mut hist = Histogram {
            wt: vec![0; TABLE_SIZE],
            mr: vec![0; TABLE_SIZE],
            mg: vec![0; TABLE_SIZE],
            mb: vec![0; TABLE_SIZE],
            m2: vec![0.0; TABLE_SIZE],
        };

        let associated = src.is_associated();
        for p in src.pixels() {
            if p.alpha() == crate::ALPHA_U8_TRANSPARENT {
                continue;
            }

            let p = if associated { p.unassociate() } else { p };
            let (r, g, b) = (i64::from(p.red()), i64::from(p.green()), i64::from(p.blue()));
            let i = index(cell(p.red()), cell(p.green()), cell(p.blue()));
            hist.wt[i] += 1;
            hist.mr[i] += r;
            hist.mg[i] += g;
            hist.mb[i] += b;
            hist.m2[i] += (r * r + g * g + b * b) as f64;
        }

        hist.accumulate();
        hist
    }

    // Converts per-cell moments into moments of the box from the origin to each cell.
    fn accumulate(&mut self) {
        for r in 1..SIDE {
            let mut area_w = [0i64; SIDE];
            let mut area_r = [0i64; SIDE];
            let mut area_g = [0i64; SIDE];
            let mut area_b = [0i64; SIDE];
            let mut area_2 = [0f64; SIDE];
            for g in 1..SIDE {
                let (mut line_w, mut line_r, mut line_g, mut line_b, mut line_2) = (0, 0, 0, 0, 0.0);
                for b in 1..SIDE {
                    let i = index(r, g, b);
                    let prev = index(r - 1, g, b);

                    line_w += self.wt[i];
                    line_r += self.mr[i];
                    line_g += self.mg[i];
                    line_b += self.mb[i];
                    line_2 += self.m2[i];

                    area_w[b] += line_w;
                    area_r[b] += line_r;
                    area_g[b] += line_g;
                    area_b[b] += line_b;
                    area_2[b] += line_2;

                    self.wt[i] = self.wt[prev] + area_w[b];
                    self.mr[i] = self.mr[prev] + area_r[b];
                    self.mg[i] = self.mg[prev] + area_g[b];
                    self.mb[i] = self.mb[prev] + area_b[b];
                    self.m2[i] = self.m2[prev] + area_2[b];
                }
            }
        }
    }

    /// Returns the number of counted pixels.
    pub fn total(&self) -> i64 {
        self.wt[index(SIDE - 1, SIDE - 1, SIDE - 1)]
    }
}

impl core::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Histogram")
            .field("total", &self.total())
            .finish()
    }
}


#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Axis {
    Red,
    Green,
    Blue,
}

/// A box in the histogram grid.
///
/// Lower bounds are exclusive and upper bounds inclusive.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cube {
    r0: usize,
    r1: usize,
    g0: usize,
    g1: usize,
    b0: usize,
    b1: usize,
}

impl Cube {
    fn whole() -> Self {
        Cube { r0: 0, r1: SIDE - 1, g0: 0, g1: SIDE - 1, b0: 0, b1: SIDE - 1 }
    }

    /// Returns the number of grid cells inside the cube.
    pub fn volume(&self) -> usize {
        (self.r1 - self.r0) * (self.g1 - self.g0) * (self.b1 - self.b0)
    }

    /// Returns the number of pixels inside the cube.
    pub fn weight(&self, hist: &Histogram) -> i64 {
        self.vol(&hist.wt)
    }

    /// Returns the mean color of pixels inside the cube.
    ///
    /// An empty cube is black.
    pub fn mean(&self, hist: &Histogram) -> ColorU8 {
        let w = self.weight(hist);
        if w == 0 {
            return ColorU8::BLACK;
        }

        let mean = |m: &[i64]| ((self.vol(m) + w / 2) / w).max(0).min(255) as u8;
        ColorU8::from_rgb(mean(&hist.mr), mean(&hist.mg), mean(&hist.mb))
    }

    fn vol<T>(&self, m: &[T]) -> T
        where T: Copy + core::ops::Add<Output = T> + core::ops::Sub<Output = T>
    {
        m[index(self.r1, self.g1, self.b1)]
            - m[index(self.r1, self.g1, self.b0)]
            - m[index(self.r1, self.g0, self.b1)]
            + m[index(self.r1, self.g0, self.b0)]
            - m[index(self.r0, self.g1, self.b1)]
            + m[index(self.r0, self.g1, self.b0)]
            + m[index(self.r0, self.g0, self.b1)]
            - m[index(self.r0, self.g0, self.b0)]
    }

    // The part of `vol` that doesn't depend on the upper bound along `axis`.
    fn bottom(&self, axis: Axis, m: &[i64]) -> i64 {
        match axis {
            Axis::Red => {
                -m[index(self.r0, self.g1, self.b1)]
                    + m[index(self.r0, self.g1, self.b0)]
                    + m[index(self.r0, self.g0, self.b1)]
                    - m[index(self.r0, self.g0, self.b0)]
            }
            Axis::Green => {
                -m[index(self.r1, self.g0, self.b1)]
                    + m[index(self.r1, self.g0, self.b0)]
                    + m[index(self.r0, self.g0, self.b1)]
                    - m[index(self.r0, self.g0, self.b0)]
            }
            Axis::Blue => {
                -m[index(self.r1, self.g1, self.b0)]
                    + m[index(self.r1, self.g0, self.b0)]
                    + m[index(self.r0, self.g1, self.b0)]
                    - m[index(self.r0, self.g0, self.b0)]
            }
        }
    }

    // The part of `vol` with the upper bound along `axis` replaced by `pos`.
    fn top(&self, axis: Axis, pos: usize, m: &[i64]) -> i64 {
        match axis {
            Axis::Red => {
                m[index(pos, self.g1, self.b1)]
                    - m[index(pos, self.g1, self.b0)]
                    - m[index(pos, self.g0, self.b1)]
                    + m[index(pos, self.g0, self.b0)]
            }
            Axis::Green => {
                m[index(self.r1, pos, self.b1)]
                    - m[index(self.r1, pos, self.b0)]
                    - m[index(self.r0, pos, self.b1)]
                    + m[index(self.r0, pos, self.b0)]
            }
            Axis::Blue => {
                m[index(self.r1, self.g1, pos)]
                    - m[index(self.r1, self.g0, pos)]
                    - m[index(self.r0, self.g1, pos)]
                    + m[index(self.r0, self.g0, pos)]
            }
        }
    }

    fn variance(&self, hist: &Histogram) -> f64 {
        let w = self.vol(&hist.wt);
        if w == 0 {
            return 0.0;
        }

        let r = self.vol(&hist.mr) as f64;
        let g = self.vol(&hist.mg) as f64;
        let b = self.vol(&hist.mb) as f64;
        self.vol(&hist.m2) - (r * r + g * g + b * b) / w as f64
    }

    fn bounds(&self, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::Red => (self.r0, self.r1),
            Axis::Green => (self.g0, self.g1),
            Axis::Blue => (self.b0, self.b1),
        }
    }

    // Finds a cut plane along `axis` that maximizes the between-part variance.
    fn maximize(&self, hist: &Histogram, axis: Axis, whole: &Moments) -> Option<(f64, usize)> {
        let base = Moments {
            w: self.bottom(axis, &hist.wt),
            r: self.bottom(axis, &hist.mr),
            g: self.bottom(axis, &hist.mg),
            b: self.bottom(axis, &hist.mb),
        };

        let (first, last) = self.bounds(axis);
        let mut best: Option<(f64, usize)> = None;
        for pos in first + 1..last {
            let half = Moments {
                w: base.w + self.top(axis, pos, &hist.wt),
                r: base.r + self.top(axis, pos, &hist.mr),
                g: base.g + self.top(axis, pos, &hist.mg),
                b: base.b + self.top(axis, pos, &hist.mb),
            };

            // Never split off an empty part.
            if half.w == 0 || half.w == whole.w {
                continue;
            }

            let rest = Moments {
                w: whole.w - half.w,
                r: whole.r - half.r,
                g: whole.g - half.g,
                b: whole.b - half.b,
            };

            let score = half.score() + rest.score();
            if best.map_or(true, |(max, _)| score > max) {
                best = Some((score, pos));
            }
        }

        best
    }

    // Splits the cube in two, shrinking `self` to the lower part.
    fn cut(&mut self, hist: &Histogram) -> Option<Cube> {
        let whole = Moments {
            w: self.vol(&hist.wt),
            r: self.vol(&hist.mr),
            g: self.vol(&hist.mg),
            b: self.vol(&hist.mb),
        };

        let mut best: Option<(f64, usize, Axis)> = None;
        for &axis in &[Axis::Red, Axis::Green, Axis::Blue] {
            if let Some((score, pos)) = self.maximize(hist, axis, &whole) {
                if best.map_or(true, |(max, _, _)| score > max) {
                    best = Some((score, pos, axis));
                }
            }
        }

        let (_, pos, axis) = best?;
        let mut upper = *self;
        match axis {
            Axis::Red => {
                self.r1 = pos;
                upper.r0 = pos;
            }
            Axis::Green => {
                self.g1 = pos;
                upper.g0 = pos;
            }
            Axis::Blue => {
                self.b1 = pos;
                upper.b0 = pos;
            }
        }

        Some(upper)
    }

    fn split_priority(&self, hist: &Histogram) -> f64 {
        if self.volume() > 1 {
            self.variance(hist)
        } else {
            0.0
        }
    }
}

struct Moments {
    w: i64,
    r: i64,
    g: i64,
    b: i64,
}

impl Moments {
    #[inline]
    fn score(&self) -> f64 {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        (r * r + g * g + b * b) / self.w as f64
    }
}

/// Splits the color space into at most `colors` cubes.
///
/// Splitting stops earlier when no cube can be split further,
/// like when a picture has fewer distinct colors.
pub fn split_color_space(hist: &Histogram, colors: usize) -> Result<ArrayVec<Cube, MAX_COLORS>, Error> {
    if colors == 0 || colors > MAX_COLORS {
        return Err(Error::InvalidColorCount(colors));
    }

    let mut cubes = ArrayVec::<Cube, MAX_COLORS>::new();
    let mut priority = [0.0f64; MAX_COLORS];
    cubes.push(Cube::whole());

    let mut next = 0;
    while cubes.len() < colors {
        let mut cube = cubes[next];
        match cube.cut(hist) {
            Some(upper) => {
                cubes[next] = cube;
                priority[next] = cube.split_priority(hist);
                priority[cubes.len()] = upper.split_priority(hist);
                cubes.push(upper);
            }
            None => priority[next] = 0.0,
        }

        let (best, max) = priority[..cubes.len()]
            .iter()
            .enumerate()
            .fold((0, 0.0), |acc, (i, v)| if *v > acc.1 { (i, *v) } else { acc });

        if max <= 0.0 {
            log::debug!("color space can't be split further: {} of {} colors", cubes.len(), colors);
            break;
        }

        next = best;
    }

    Ok(cubes)
}


/// A mapping from histogram cells to palette colors.
#[derive(Clone)]
pub struct LookupTable {
    cells: Vec<ColorU8>,
    colors: Vec<ColorU8>,
}

impl LookupTable {
    /// Assigns each cube's mean color to all cells it covers.
    pub fn new(hist: &Histogram, cubes: &[Cube]) -> Self {
        let mut cells = vec![ColorU8::BLACK; TABLE_SIZE];
        let mut colors = Vec::with_capacity(cubes.len());
        for cube in cubes {
            let color = cube.mean(hist);
            colors.push(color);
            for r in cube.r0 + 1..=cube.r1 {
                for g in cube.g0 + 1..=cube.g1 {
                    let start = index(r, g, cube.b0 + 1);
                    let end = index(r, g, cube.b1);
                    for c in &mut cells[start..=end] {
                        *c = color;
                    }
                }
            }
        }

        LookupTable { cells, colors }
    }

    /// Returns palette colors, one per cube.
    pub fn colors(&self) -> &[ColorU8] {
        &self.colors
    }

    /// Returns a palette color for a straight color.
    #[inline]
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> ColorU8 {
        self.cells[index(cell(r), cell(g), cell(b))]
    }
}

impl core::fmt::Debug for LookupTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LookupTable")
            .field("colors", &self.colors)
            .finish()
    }
}

/// Replaces colors of `src` with palette colors, writing them into `dest`.
///
/// Alpha is preserved. Only the overlap of both pictures, aligned at the
/// top-left corner, is written. `dest` keeps its association state.
pub fn apply_lookup_table(dest: &mut Picture, src: &Picture, table: &LookupTable) {
    let region = match dest.bounds().intersect(&src.bounds()) {
        Some(v) => v,
        None => return,
    };

    let src_associated = src.is_associated();
    let dest_associated = dest.is_associated();
    let width = region.width() as usize;
    for y in 0..region.height() {
        let src_row = &src.row(y)[..width];
        let dest_row = &mut dest.row_mut(y)[..width];
        for (d, s) in dest_row.iter_mut().zip(src_row) {
            let s = if src_associated { s.unassociate() } else { *s };
            let c = table.lookup(s.red(), s.green(), s.blue());
            let p = Pixel::from_rgba(c.red(), c.green(), c.blue(), s.alpha());
            *d = if dest_associated { p.associate() } else { p };
        }
    }
}

/// Reduces a picture to at most `colors` colors.
pub fn quantize(src: &Picture, colors: usize) -> Result<Picture, Error> {
    let hist = Histogram::new(src);
    let cubes = split_color_space(&hist, colors)?;
    let table = LookupTable::new(&hist, &cubes);

    let mut dest = Picture::new(src.width(), src.height())?;
    apply_lookup_table(&mut dest, src, &table);
    dest.analyze();
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picture(colors: &[[u8; 4]]) -> Picture {
        let data: Vec<u8> = colors.iter().flatten().cloned().collect();
        Picture::from_rgba(colors.len() as u32, 1, &data).unwrap()
    }

    #[test]
    fn cumulative_moments() {
        let src = picture(&[[0, 0, 0, 255], [255, 255, 255, 255], [255, 0, 0, 255]]);
        let hist = Histogram::new(&src);
        assert_eq!(hist.total(), 3);
        let whole = Cube::whole();
        assert_eq!(whole.weight(&hist), 3);
        assert_eq!(whole.vol(&hist.mr), 510);
        assert_eq!(whole.volume(), 32 * 32 * 32);
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let src = picture(&[[10, 20, 30, 0], [1, 2, 3, 255]]);
        assert_eq!(Histogram::new(&src).total(), 1);
    }

    #[test]
    fn invalid_color_count() {
        let hist = Histogram::new(&picture(&[[0, 0, 0, 255]]));
        assert!(split_color_space(&hist, 0).is_err());
        assert!(split_color_space(&hist, 257).is_err());
    }

    #[test]
    fn early_stop() {
        let src = picture(&[[0, 0, 0, 255], [255, 255, 255, 255], [0, 0, 0, 255]]);
        let hist = Histogram::new(&src);
        let cubes = split_color_space(&hist, 16).unwrap();
        assert_eq!(cubes.len(), 2);
        let table = LookupTable::new(&hist, &cubes);
        let mut colors = table.colors().to_vec();
        colors.sort_by_key(|c| c.red());
        assert_eq!(colors, &[ColorU8::BLACK, ColorU8::WHITE]);
    }

    #[test]
    fn two_clusters() {
        let src = picture(&[
            [250, 0, 0, 255],
            [246, 0, 0, 255],
            [0, 0, 250, 255],
            [0, 0, 246, 255],
        ]);
        let hist = Histogram::new(&src);
        let cubes = split_color_space(&hist, 2).unwrap();
        assert_eq!(cubes.len(), 2);
        let table = LookupTable::new(&hist, &cubes);
        assert_eq!(table.lookup(250, 0, 0), ColorU8::from_rgb(248, 0, 0));
        assert_eq!(table.lookup(0, 0, 246), ColorU8::from_rgb(0, 0, 248));
    }
}
