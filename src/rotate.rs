// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use std::borrow::Cow;
use std::str::FromStr;

use crate::{ColorU8, Error, Picture, PictureFlags, Pixel};

use crate::scalar::Scalar;

// Angles closer than this to a right angle are treated as exact.
const RIGHT_ANGLE_TOLERANCE: f64 = 1e-9;

/// An arbitrary angle rotation algorithm.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RotateMethod {
    /// Three consecutive shears, each interpolating between two pixels.
    Shear,
    /// Inverse mapping of each destination pixel with bilinear interpolation.
    AreaMap,
}

impl Default for RotateMethod {
    fn default() -> Self {
        RotateMethod::Shear
    }
}

impl FromStr for RotateMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shear" => Ok(RotateMethod::Shear),
            "areamap" | "area-map" => Ok(RotateMethod::AreaMap),
            _ => Err(Error::UnknownRotateMethod(s.to_string())),
        }
    }
}

/// Rotates a picture counter-clockwise by `angle` degrees.
///
/// Multiples of 90 degrees are lossless. Other angles use three shears.
///
/// The result is large enough to hold all of the rotated picture.
/// Uncovered pixels are set to `background`.
pub fn rotate(src: &Picture, angle: f64, background: ColorU8) -> Result<Picture, Error> {
    rotate_with(src, angle, RotateMethod::Shear, background)
}

/// Rotates a picture counter-clockwise by `angle` degrees using a specified method.
pub fn rotate_with(
    src: &Picture,
    angle: f64,
    method: RotateMethod,
    background: ColorU8,
) -> Result<Picture, Error> {
    let angle = if angle.is_finite() { angle.rem_euclid(360.0) } else { 0.0 };
    let quadrants = (angle / 90.0).round();
    let residual = angle - quadrants * 90.0;
    let quadrants = quadrants as u32 % 4;

    if residual.is_nearly_zero_within_tolerance(RIGHT_ANGLE_TOLERANCE) {
        log::debug!("lossless rotation by {} degrees", quadrants * 90);
        return rotate_right_angle(src, quadrants);
    }

    match method {
        RotateMethod::Shear => {
            log::debug!("shear rotation by {} quadrants and {} degrees", quadrants, residual);
            let src = if quadrants == 0 {
                Cow::Borrowed(src)
            } else {
                Cow::Owned(rotate_right_angle(src, quadrants)?)
            };

            rotate_shear(&src, residual.to_radians(), background)
        }
        RotateMethod::AreaMap => {
            log::debug!("area map rotation by {} degrees", angle);
            rotate_area_map(src, angle.to_radians(), background)
        }
    }
}

fn rotate_right_angle(src: &Picture, quadrants: u32) -> Result<Picture, Error> {
    match quadrants {
        0 => Ok(src.clone()),
        1 => rotate90(src),
        2 => rotate180(src),
        _ => rotate270(src),
    }
}

/// Rotates a picture counter-clockwise by 90 degrees.
///
/// Lossless.
pub fn rotate90(src: &Picture) -> Result<Picture, Error> {
    let mut dest = Picture::new(src.height(), src.width())?;
    let last_x = src.width() - 1;
    for y in 0..dest.height() {
        let sx = (last_x - y) as usize;
        for (x, d) in dest.row_mut(y).iter_mut().enumerate() {
            *d = src.row(x as u32)[sx];
        }
    }

    dest.copy_flags(src);
    Ok(dest)
}

/// Rotates a picture by 180 degrees.
///
/// Lossless.
pub fn rotate180(src: &Picture) -> Result<Picture, Error> {
    let mut dest = src.clone();
    dest.flip_vertical();
    dest.flip_horizontal();
    Ok(dest)
}

/// Rotates a picture clockwise by 90 degrees.
///
/// Lossless.
pub fn rotate270(src: &Picture) -> Result<Picture, Error> {
    let mut dest = Picture::new(src.height(), src.width())?;
    let last_y = src.height() - 1;
    for y in 0..dest.height() {
        let sx = y as usize;
        for (x, d) in dest.row_mut(y).iter_mut().enumerate() {
            *d = src.row(last_y - x as u32)[sx];
        }
    }

    dest.copy_flags(src);
    Ok(dest)
}

/// Returns a size of the rotated picture's bounding box.
///
/// The size is grown by a pixel when needed to keep the same parity as
/// the source, so pixel centers of both pictures stay aligned.
fn rotated_size(width: u32, height: u32, angle: f64) -> Result<(u32, u32), Error> {
    let (sin, cos) = angle.sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let w = f64::from(width);
    let h = f64::from(height);
    let new_w = grow_to_parity(w * cos + h * sin, width);
    let new_h = grow_to_parity(w * sin + h * cos, height);
    if new_w > crate::MAX_DIMENSION || new_h > crate::MAX_DIMENSION {
        return Err(Error::InvalidDimension { width: new_w, height: new_h });
    }

    Ok((new_w, new_h))
}

fn grow_to_parity(size: f64, old: u32) -> u32 {
    // Tolerate float noise, like 9.000000001.
    let mut n = (size - 1e-6).ceil().max(1.0) as u32;
    if (n ^ old) & 1 != 0 {
        n += 1;
    }

    n
}

// Grows `size` by the shear extent, keeping its parity.
fn sheared_size(size: u32, other: u32, shear: f64) -> u32 {
    size + 2 * (shear.abs() * f64::from(other)).half().ceil() as u32
}

fn rotate_shear(src: &Picture, angle: f64, background: ColorU8) -> Result<Picture, Error> {
    let src = associated(src);
    let bg = Pixel::from(background.premultiply());

    // A counter-clockwise rotation on screen, with Y pointing down, is
    // x' = x*cos + y*sin, y' = -x*sin + y*cos, which is X(a) * Y(b) * X(a).
    let a = (angle / 2.0).tan();
    let b = -angle.sin();

    let (width, height) = rotated_size(src.width(), src.height(), angle)?;

    // Intermediate sizes differ from the source by an even number of pixels,
    // so offsets between pictures stay integer.
    let w1 = sheared_size(src.width(), src.height(), a);
    let pass1 = shear_x(&src, w1, src.height(), a, bg)?;
    let h2 = sheared_size(src.height(), w1, b);
    let pass2 = shear_y(&pass1, w1, h2, b, bg)?;
    let mut dest = shear_x(&pass2, width, height, a, bg)?;

    finish_flags(&mut dest, &src, background);
    Ok(dest)
}

fn shear_x(src: &Picture, width: u32, height: u32, shear: f64, bg: Pixel) -> Result<Picture, Error> {
    let mut dest = Picture::new(width, height)?;
    let dx = (i64::from(src.width()) - i64::from(width)) / 2;
    let dy = (i64::from(src.height()) - i64::from(height)) / 2;
    let half_h = f64::from(height).half();
    for y in 0..height {
        let sy = i64::from(y) + dy;
        let row = dest.row_mut(y);
        if sy < 0 || sy >= i64::from(src.height()) {
            row.iter_mut().for_each(|p| *p = bg);
            continue;
        }

        let src_row = src.row(sy as u32);
        let yc = f64::from(y) + 0.5 - half_h;
        let (offset, w) = split_offset(dx as f64 - shear * yc);
        for (x, d) in row.iter_mut().enumerate() {
            let u = x as i64 + offset;
            *d = lerp_pixel(fetch(src_row, u, bg), fetch(src_row, u + 1, bg), w);
        }
    }

    Ok(dest)
}

fn shear_y(src: &Picture, width: u32, height: u32, shear: f64, bg: Pixel) -> Result<Picture, Error> {
    let mut dest = Picture::new(width, height)?;
    let dx = (i64::from(src.width()) - i64::from(width)) / 2;
    let dy = (i64::from(src.height()) - i64::from(height)) / 2;
    let half_w = f64::from(width).half();
    let src_h = i64::from(src.height());

    let columns: Vec<(i64, i64, u32)> = (0..width)
        .map(|x| {
            let xc = f64::from(x) + 0.5 - half_w;
            let (offset, w) = split_offset(dy as f64 - shear * xc);
            (i64::from(x) + dx, offset, w)
        })
        .collect();

    let fetch_at = |sx: i64, sy: i64| -> Pixel {
        if sx < 0 || sx >= i64::from(src.width()) || sy < 0 || sy >= src_h {
            bg
        } else {
            src.row(sy as u32)[sx as usize]
        }
    };

    for y in 0..height {
        let row = dest.row_mut(y);
        for (d, &(sx, offset, w)) in row.iter_mut().zip(&columns) {
            let v = i64::from(y) + offset;
            *d = lerp_pixel(fetch_at(sx, v), fetch_at(sx, v + 1), w);
        }
    }

    Ok(dest)
}

fn rotate_area_map(src: &Picture, angle: f64, background: ColorU8) -> Result<Picture, Error> {
    let src = associated(src);
    let bg = Pixel::from(background.premultiply());
    let (width, height) = rotated_size(src.width(), src.height(), angle)?;
    let mut dest = Picture::new(width, height)?;

    let (sin, cos) = angle.sin_cos();
    let src_half_w = f64::from(src.width()).half();
    let src_half_h = f64::from(src.height()).half();
    let half_w = f64::from(width).half();
    let half_h = f64::from(height).half();
    let src_w = i64::from(src.width());
    let src_h = i64::from(src.height());

    let fetch_at = |sx: i64, sy: i64| -> Pixel {
        if sx < 0 || sx >= src_w || sy < 0 || sy >= src_h {
            bg
        } else {
            src.row(sy as u32)[sx as usize]
        }
    };

    for y in 0..height {
        let yc = f64::from(y) + 0.5 - half_h;
        let row = dest.row_mut(y);
        for (x, d) in row.iter_mut().enumerate() {
            let xc = x as f64 + 0.5 - half_w;
            // Inverse of the counter-clockwise rotation.
            let u = cos * xc - sin * yc + src_half_w - 0.5;
            let v = sin * xc + cos * yc + src_half_h - 0.5;
            let (ui, wu) = split_offset(u);
            let (vi, wv) = split_offset(v);
            let top = lerp_pixel(fetch_at(ui, vi), fetch_at(ui + 1, vi), wu);
            let bottom = lerp_pixel(fetch_at(ui, vi + 1), fetch_at(ui + 1, vi + 1), wu);
            *d = lerp_pixel(top, bottom, wv);
        }
    }

    finish_flags(&mut dest, &src, background);
    Ok(dest)
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

fn finish_flags(dest: &mut Picture, src: &Picture, background: ColorU8) {
    let greyscale = src.flags().contains(PictureFlags::GREYSCALE) && Pixel::from(background).is_grey();
    dest.set_associated(true);
    dest.set_translucency(!(src.is_opaque() && background.is_opaque()));
    if greyscale {
        dest.insert_flags(PictureFlags::GREYSCALE);
    } else {
        dest.remove_flags(PictureFlags::GREYSCALE);
    }
}

/// Splits a coordinate into an integer part and an 8-bit fraction in 0..=256.
#[inline]
fn split_offset(n: f64) -> (i64, u32) {
    let i = n.floor();
    let w = ((n - i) * 256.0 + 0.5) as u32;
    (i as i64, w)
}

#[inline]
fn fetch(row: &[Pixel], x: i64, bg: Pixel) -> Pixel {
    if x < 0 {
        bg
    } else {
        row.get(x as usize).cloned().unwrap_or(bg)
    }
}

// Interpolates premultiplied pixels, `w` is the weight of `p1` in 0..=256.
#[inline]
fn lerp_pixel(p0: Pixel, p1: Pixel, w: u32) -> Pixel {
    if w == 0 || p0 == p1 {
        return p0;
    }

    if w >= 256 {
        return p1;
    }

    let inv = 256 - w;
    let ch = |a: u8, b: u8| ((u32::from(a) * inv + u32::from(b) * w + 128) >> 8) as u8;
    Pixel::from_rgba(
        ch(p0.red(), p1.red()),
        ch(p0.green(), p1.green()),
        ch(p0.blue(), p1.blue()),
        ch(p0.alpha(), p1.alpha()),
    )
}
